/* phone-forward
 *
 * To the extent possible under law, the author(s) have dedicated all
 * copyright and related and neighboring rights to this software to
 * the public domain worldwide. This software is distributed without
 * any warranty.
 *
 * You should have received a copy of the CC0 Public Domain Dedication
 * along with this software.
 * If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
 */

//! Arena-backed prefix tree shared by the forward and reverse tries.
//!
//! Both `F` and `R` (see the crate-level docs) are instances of this same
//! node shape: a fixed-arity child array, a parent back-link, and a data
//! list. They differ only in how the engine disciplines the `append` flag
//! of [`Trie::add_text`] — the forward trie only ever replaces (`append =
//! false`), the reverse trie only ever appends.
//!
//! Parent back-pointers are cyclic in a borrow-checked language, so nodes
//! live in a [`slab::Slab`] and reference each other by index instead of by
//! pointer (Design Notes, §9).

use slab::Slab;

use crate::alphabet::{to_digits, Digit, ALPHABET_SIZE};

/// Index of a node in a [`Trie`]'s arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(usize);

struct Node {
    children: [Option<NodeId>; ALPHABET_SIZE],
    non_null_children: u8,
    parent: Option<NodeId>,
    parent_slot: Option<u8>,
    data: Vec<String>,
}

impl Node {
    fn new(parent: Option<NodeId>, parent_slot: Option<u8>) -> Self {
        Node {
            children: [None; ALPHABET_SIZE],
            non_null_children: 0,
            parent,
            parent_slot,
            data: Vec::new(),
        }
    }
}

pub(crate) struct Trie {
    nodes: Slab<Node>,
    root: NodeId,
}

impl Trie {
    pub(crate) fn new() -> Self {
        let mut nodes = Slab::new();
        let root = NodeId(nodes.insert(Node::new(None, None)));
        Trie { nodes, root }
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn child(&self, id: NodeId, digit: Digit) -> Option<NodeId> {
        self.node(id).children[digit.index()]
    }

    pub(crate) fn data(&self, id: NodeId) -> &[String] {
        &self.node(id).data
    }

    /// Walks `digits` from the root. Returns `None` as soon as the path
    /// breaks.
    pub(crate) fn walk(&self, digits: &[Digit]) -> Option<NodeId> {
        let mut current = self.root;
        for digit in digits {
            current = self.node(current).children[digit.index()]?;
        }
        Some(current)
    }

    /// Value-under-prefix test (§4.1): does the node reached by `prefix`
    /// hold `value` (or, if `value` is `None`, hold any payload at all)?
    pub(crate) fn value_under_prefix(&self, prefix: &[Digit], value: Option<&str>) -> bool {
        match self.walk(prefix) {
            None => false,
            Some(id) => match value {
                None => !self.node(id).data.is_empty(),
                Some(v) => self.node(id).data.iter().any(|entry| entry == v),
            },
        }
    }

    fn ensure_path(&mut self, digits: &[Digit]) -> NodeId {
        let mut current = self.root;
        for digit in digits {
            let idx = digit.index();
            current = match self.node(current).children[idx] {
                Some(next) => next,
                None => {
                    let new_id = NodeId(self.nodes.insert(Node::new(Some(current), Some(idx as u8))));
                    let node = self.node_mut(current);
                    node.children[idx] = Some(new_id);
                    node.non_null_children += 1;
                    new_id
                }
            };
        }
        current
    }

    /// Add-text (§4.1). Creates the path spelled by `path` if needed, then
    /// installs `payload` at the terminal node: replaces the sole existing
    /// entry when `append` is false (returning it), or appends to the tail
    /// when `append` is true.
    pub(crate) fn add_text(&mut self, path: &[Digit], payload: String, append: bool) -> Option<String> {
        let node_id = self.ensure_path(path);
        let node = self.node_mut(node_id);
        if node.data.is_empty() || append {
            node.data.push(payload);
            None
        } else {
            debug_assert_eq!(node.data.len(), 1, "replace-only trie node should hold at most one payload");
            Some(std::mem::replace(&mut node.data[0], payload))
        }
    }

    /// Remove-one-entry (§4.1). Assumes `entry` exists under `path`;
    /// violating that precondition is a programmer error.
    pub(crate) fn remove_one_entry(&mut self, path: &[Digit], entry: &str) {
        let node_id = self
            .walk(path)
            .expect("remove_one_entry: path does not exist in the trie");
        let node = self.node_mut(node_id);
        let pos = node
            .data
            .iter()
            .position(|s| s == entry)
            .expect("remove_one_entry: entry does not exist under path");
        node.data.remove(pos);

        if node.data.is_empty() && node.non_null_children == 0 {
            self.safe_delete_subtree(node_id);
        }
    }

    /// Safe-delete-subtree (§4.1): climbs dead ancestor chains before
    /// detaching, so nodes that exist only to carry the path to
    /// `root_to_delete` are trimmed along with it.
    pub(crate) fn safe_delete_subtree(&mut self, root_to_delete: NodeId) {
        if root_to_delete == self.root {
            self.free_subtree(root_to_delete);
            return;
        }

        let mut current = root_to_delete;
        loop {
            let parent = self.node(current).parent.expect("non-root node has no parent");
            if parent == self.root {
                break;
            }
            let parent_node = self.node(parent);
            if parent_node.non_null_children == 1 && parent_node.data.is_empty() {
                current = parent;
            } else {
                break;
            }
        }

        let parent = self.node(current).parent.expect("non-root node has no parent");
        let slot = self.node(current).parent_slot.expect("non-root node has no parent slot") as usize;
        let parent_node = self.node_mut(parent);
        debug_assert_eq!(parent_node.children[slot], Some(current));
        parent_node.children[slot] = None;
        parent_node.non_null_children -= 1;

        self.free_subtree(current);
    }

    /// Free-subtree (§4.1): recursively frees all descendants, then the
    /// node itself. The tree's root is special-cased: it cannot be removed
    /// from the arena (every `Trie` must keep a stable root `NodeId`), so
    /// freeing it just clears its own children and payload.
    fn free_subtree(&mut self, root_to_delete: NodeId) {
        let children: Vec<NodeId> = self.node(root_to_delete).children.iter().filter_map(|c| *c).collect();
        for child in children {
            self.free_subtree(child);
        }

        if root_to_delete == self.root {
            let node = self.node_mut(root_to_delete);
            node.children = [None; ALPHABET_SIZE];
            node.non_null_children = 0;
            node.data.clear();
        } else {
            self.nodes.remove(root_to_delete.0);
        }
    }

    /// Longest-match walk for `phfwdGet` (§4.3): returns the depth and
    /// payload of the deepest visited node that holds one, or `(0, None)`
    /// if no node along the path does.
    pub(crate) fn longest_match(&self, digits: &[Digit]) -> (usize, Option<&str>) {
        let mut current = self.root;
        let mut best_depth = 0;
        let mut best = self.node(current).data.first().map(String::as_str);

        for (i, digit) in digits.iter().enumerate() {
            match self.node(current).children[digit.index()] {
                Some(next) => current = next,
                None => break,
            }
            if let Some(payload) = self.node(current).data.first() {
                best = Some(payload);
                best_depth = i + 1;
            }
        }

        (best_depth, best)
    }

    /// Contains-live-entry test (§4.1): prunes payloads `a` for which
    /// `witness` has no target stored at path `a` at all, and reports
    /// whether any payload survived.
    pub(crate) fn contains_live_entry(&mut self, id: NodeId, witness: &Trie) -> bool {
        let node = self.node_mut(id);
        node.data.retain(|a| witness.value_under_prefix(&to_digits(a), None));
        !node.data.is_empty()
    }

    /// Precise lazy pruning used by `phfwdReverse` (§4.4): keeps only
    /// payloads `a` for which `witness` stores exactly `target_prefix` at
    /// path `a`.
    pub(crate) fn prune_stale(&mut self, id: NodeId, witness: &Trie, target_prefix: &str) {
        let node = self.node_mut(id);
        node.data
            .retain(|a| witness.value_under_prefix(&to_digits(a), Some(target_prefix)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<Digit> {
        to_digits(s)
    }

    #[test]
    fn add_text_replace_then_remove_collapses_chain() {
        let mut trie = Trie::new();
        trie.add_text(&digits("123"), "a".into(), false);
        assert!(trie.value_under_prefix(&digits("123"), Some("a")));

        let node = trie.walk(&digits("123")).unwrap();
        trie.remove_one_entry(&digits("123"), "a");
        // the node and its now-dead ancestor chain are gone
        assert!(trie.walk(&digits("123")).is_none());
        // node id reused is fine; just confirm the path is gone
        let _ = node;
    }

    #[test]
    fn safe_delete_preserves_sibling() {
        let mut trie = Trie::new();
        trie.add_text(&digits("12"), "x".into(), true);
        trie.add_text(&digits("13"), "y".into(), true);

        let node_12 = trie.walk(&digits("12")).unwrap();
        trie.safe_delete_subtree(node_12);

        assert!(trie.walk(&digits("12")).is_none());
        assert!(trie.value_under_prefix(&digits("13"), Some("y")));
    }

    #[test]
    fn longest_match_finds_deepest_payload() {
        let mut trie = Trie::new();
        trie.add_text(&digits("12"), "500".into(), false);
        trie.add_text(&digits("1234"), "900".into(), false);

        let (depth, payload) = trie.longest_match(&digits("123456"));
        assert_eq!(depth, 4);
        assert_eq!(payload, Some("900"));

        let (depth, payload) = trie.longest_match(&digits("9"));
        assert_eq!(depth, 0);
        assert_eq!(payload, None);
    }
}
