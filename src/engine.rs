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

//! The forwarding engine: composes the forward and reverse tries into the
//! five public operations (§4).

use crate::alphabet::{is_valid_number, to_digits, Digit, ALPHABET_SIZE};
use crate::sequence::PhoneNumbers;
use crate::trie::Trie;

/// Owns a forward trie `F` and a reverse trie `R` and answers forwarding
/// queries against them.
///
/// Engine policy (§7): no internal retries, no logging, no aborts except
/// programmer-error assertions. Safe Rust has no allocation-failure return
/// path to preserve — the global allocator aborts the process on OOM rather
/// than handing back an error `Vec`/`String` growth could propagate — so
/// unlike the original this type's methods never report `null`/`false` for
/// that reason; the only `false` this struct ever returns is for invalid
/// input (§4.2).
pub struct PhoneForward {
    forward: Trie,
    reverse: Trie,
}

impl PhoneForward {
    /// Creates an empty container.
    pub fn new() -> Self {
        PhoneForward {
            forward: Trie::new(),
            reverse: Trie::new(),
        }
    }

    /// Adds a forwarding from `source` to `target` (§4.2).
    ///
    /// Rejects (returning `false`) if either string is not a valid number
    /// or if `source == target`. Replaces any existing forwarding from
    /// `source`.
    pub fn add(&mut self, source: &str, target: &str) -> bool {
        if !is_valid_number(source) || !is_valid_number(target) || source == target {
            return false;
        }

        let source_digits = to_digits(source);
        let target_digits = to_digits(target);

        let previous_target = self.forward.add_text(&source_digits, target.to_string(), false);
        if let Some(previous_target) = previous_target {
            let previous_digits = to_digits(&previous_target);
            self.reverse.remove_one_entry(&previous_digits, source);
        }
        self.reverse.add_text(&target_digits, source.to_string(), true);

        true
    }

    /// Removes the subtree rooted at `prefix` from `F` (§4.5). `R` is left
    /// untouched; its stale entries are pruned lazily on the next `reverse`
    /// call that visits them.
    pub fn remove(&mut self, prefix: &str) {
        if !is_valid_number(prefix) {
            return;
        }
        let digits = to_digits(prefix);
        if let Some(node) = self.forward.walk(&digits) {
            self.forward.safe_delete_subtree(node);
        }
    }

    /// Forward lookup (§4.3): longest matching prefix, identity fallback.
    /// Always returns exactly one string.
    pub fn get(&self, num: &str) -> PhoneNumbers {
        if !is_valid_number(num) {
            return PhoneNumbers::empty();
        }
        let digits = to_digits(num);
        let (matched_len, target) = self.forward.longest_match(&digits);
        let mut result = target.map(str::to_string).unwrap_or_default();
        result.push_str(&num[matched_len..]);
        PhoneNumbers::single(result)
    }

    /// Reverse lookup (§4.4): every live source that forwards onto `num`,
    /// plus `num` itself, lazily pruning stale entries of `R` along the
    /// way. Sorted and deduplicated.
    pub fn reverse(&mut self, num: &str) -> PhoneNumbers {
        if !is_valid_number(num) {
            return PhoneNumbers::empty();
        }
        let digits = to_digits(num);

        let mut results = Vec::new();
        let mut current = self.reverse.root();

        for (i, digit) in digits.iter().enumerate() {
            match self.reverse.child(current, *digit) {
                Some(next) => current = next,
                None => break,
            }
            let matched_len = i + 1;
            let prefix = &num[..matched_len];

            self.reverse.prune_stale(current, &self.forward, prefix);
            for source in self.reverse.data(current) {
                results.push(format!("{source}{}", &num[matched_len..]));
            }
        }

        results.push(num.to_string());
        results.sort();
        results.dedup();

        PhoneNumbers::new(results)
    }

    /// Non-trivial count (§4.7).
    pub fn non_trivial_count(&mut self, set: &str, len: usize) -> u64 {
        if set.is_empty() || len == 0 {
            return 0;
        }

        let mut mask = [false; ALPHABET_SIZE];
        let mut found_any_digit = false;
        for c in set.chars() {
            if let Ok(digit) = Digit::try_from(c) {
                mask[digit.index()] = true;
                found_any_digit = true;
            }
        }
        if !found_any_digit {
            return 0;
        }

        let digit_count = mask.iter().filter(|&&present| present).count() as u64;
        self.non_trivial_count_at(self.reverse.root(), &mask, 0, len, digit_count)
    }

    fn non_trivial_count_at(&mut self, node: crate::trie::NodeId, mask: &[bool; ALPHABET_SIZE], depth: usize, len: usize, digit_count: u64) -> u64 {
        if self.reverse.contains_live_entry(node, &self.forward) {
            return digit_count.wrapping_pow((len - depth) as u32);
        }
        if depth == len {
            return 0;
        }

        let mut total: u64 = 0;
        for (i, present) in mask.iter().enumerate() {
            if *present {
                if let Some(child) = self.reverse.child(node, Digit::from_index(i)) {
                    total = total.wrapping_add(self.non_trivial_count_at(child, mask, depth + 1, len, digit_count));
                }
            }
        }
        total
    }
}

impl Default for PhoneForward {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_scenario() {
        let mut pf = PhoneForward::new();
        pf.add("12", "500");
        pf.add("1234", "900");

        assert_eq!(pf.get("123456").get(0), Some("90056"));
        assert_eq!(pf.get("1299").get(0), Some("50099"));
        assert_eq!(pf.get("9").get(0), Some("9"));
    }

    #[test]
    fn replace_cleans_up_reverse_lazily() {
        let mut pf = PhoneForward::new();
        pf.add("5", "77");
        pf.add("5", "88");

        assert_eq!(pf.get("5").get(0), Some("88"));
        assert_eq!(&*pf.reverse("77"), &["77".to_string()]);
        assert_eq!(&*pf.reverse("88"), &["5".to_string(), "88".to_string()]);
    }

    #[test]
    fn subtree_removal_is_lazy_on_reverse() {
        let mut pf = PhoneForward::new();
        pf.add("12", "34");
        pf.add("125", "99");
        pf.remove("12");

        assert_eq!(pf.get("12999").get(0), Some("12999"));
        assert_eq!(&*pf.reverse("34"), &["34".to_string()]);
        assert_eq!(&*pf.reverse("99"), &["99".to_string()]);
    }

    #[test]
    fn reverse_sorts_and_dedups() {
        let mut pf = PhoneForward::new();
        pf.add("1", "2");
        pf.add("11", "2");

        assert_eq!(&*pf.reverse("2"), &["1".to_string(), "11".to_string(), "2".to_string()]);
    }

    #[test]
    fn non_trivial_count_scenario() {
        let mut pf = PhoneForward::new();
        assert_eq!(pf.non_trivial_count("0123456789", 5), 0);

        pf.add("07", "99");
        assert_eq!(pf.non_trivial_count("9", 3), 1);
        assert_eq!(pf.non_trivial_count("89", 3), 2);
        assert_eq!(pf.non_trivial_count("9", 2), 1);
    }

    #[test]
    fn non_decimal_symbols_round_trip_through_reverse() {
        let mut pf = PhoneForward::new();
        pf.add(":", ";");
        assert_eq!(&*pf.reverse(";"), &[":".to_string(), ";".to_string()]);
    }

    #[test]
    fn add_rejects_invalid_and_identical_numbers() {
        let mut pf = PhoneForward::new();
        assert!(!pf.add("123", "123"));
        assert!(!pf.add("", "1"));
        assert!(!pf.add("1", ""));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut pf = PhoneForward::new();
        pf.add("123", "9");
        pf.remove("123");
        pf.remove("123");
        assert_eq!(pf.get("123").get(0), Some("123"));
    }

    #[test]
    fn non_trivial_count_of_zero_length_is_always_zero() {
        let mut pf = PhoneForward::new();
        pf.add("1", "2");
        assert_eq!(pf.non_trivial_count("0123456789", 0), 0);
    }
}
