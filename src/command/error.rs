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

//! Error reporting for the command language (§6.3).

use thiserror::Error;

/// An error surfaced while lexing, parsing, or executing a statement.
///
/// `Display` renders exactly the wire format the driver writes to the
/// diagnostic stream, so `main` can print `{e}` and stop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// First lexical error at the given 1-based character index.
    #[error("ERROR {0}")]
    Lexical(usize),

    /// End of file where a token was required, including an unterminated
    /// comment.
    #[error("ERROR EOF")]
    UnexpectedEof,

    /// An operation (`NEW`, `DEL`, `>`, `?`, `@`) failed at runtime.
    /// `index` is the 1-based position of the operator's first character.
    #[error("ERROR {op} {index}")]
    Operation { op: &'static str, index: usize },
}
