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

//! Tokenizer for the command language (§6.2).
//!
//! Tokens are identifiers (a letter then alphanumerics), phone numbers
//! (runs of alphabet symbols), and the operators `?`, `@`, `>`. Whitespace
//! separates tokens; `$$ … $$` delimits comments, which may not nest.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::alphabet::is_alphabet_char;
use crate::command::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    New,
    Del,
    Ident(String),
    Number(String),
    Question,
    At,
    Greater,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    /// 1-based index of the token's first character.
    pub(crate) pos: usize,
}

pub(crate) struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.char_indices().peekable(),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), CommandError> {
        loop {
            match self.chars.peek().copied() {
                Some((_, c)) if c.is_whitespace() => {
                    self.chars.next();
                }
                Some((start, '$')) => {
                    self.chars.next();
                    match self.chars.peek().copied() {
                        Some((_, '$')) => {
                            self.chars.next();
                            self.skip_comment_body()?;
                        }
                        _ => return Err(CommandError::Lexical(start + 1)),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consumes up to and including the closing `$$` of a comment whose
    /// opening `$$` has already been consumed.
    fn skip_comment_body(&mut self) -> Result<(), CommandError> {
        loop {
            match self.chars.next() {
                Some((_, '$')) => {
                    if let Some((_, '$')) = self.chars.peek().copied() {
                        self.chars.next();
                        return Ok(());
                    }
                }
                Some(_) => {}
                None => return Err(CommandError::UnexpectedEof),
            }
        }
    }

    /// Returns the next token, `Ok(None)` on clean end of input.
    pub(crate) fn next_token(&mut self) -> Result<Option<Token>, CommandError> {
        self.skip_whitespace_and_comments()?;

        let (start, c) = match self.chars.peek().copied() {
            Some(pair) => pair,
            None => return Ok(None),
        };

        let pos = start + 1;
        match c {
            '?' => {
                self.chars.next();
                Ok(Some(Token { kind: TokenKind::Question, pos }))
            }
            '@' => {
                self.chars.next();
                Ok(Some(Token { kind: TokenKind::At, pos }))
            }
            '>' => {
                self.chars.next();
                Ok(Some(Token { kind: TokenKind::Greater, pos }))
            }
            c if c.is_ascii_alphabetic() => {
                let mut ident = String::new();
                while let Some((_, c)) = self.chars.peek().copied() {
                    if c.is_ascii_alphanumeric() {
                        ident.push(c);
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                let kind = match ident.as_str() {
                    "NEW" => TokenKind::New,
                    "DEL" => TokenKind::Del,
                    _ => TokenKind::Ident(ident),
                };
                Ok(Some(Token { kind, pos }))
            }
            c if is_alphabet_char(c) => {
                let mut number = String::new();
                while let Some((_, c)) = self.chars.peek().copied() {
                    if is_alphabet_char(c) {
                        number.push(c);
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                Ok(Some(Token { kind: TokenKind::Number(number), pos }))
            }
            _ => Err(CommandError::Lexical(pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Result<Vec<TokenKind>, CommandError> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        while let Some(token) = lexer.next_token()? {
            out.push(token.kind);
        }
        Ok(out)
    }

    #[test]
    fn lexes_redirect_statement() {
        assert_eq!(
            tokens("12 > 34").unwrap(),
            vec![TokenKind::Number("12".into()), TokenKind::Greater, TokenKind::Number("34".into())]
        );
    }

    #[test]
    fn lexes_keywords_and_identifiers() {
        assert_eq!(
            tokens("NEW base1").unwrap(),
            vec![TokenKind::New, TokenKind::Ident("base1".into())]
        );
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            tokens("12 $$ a comment $$ ?").unwrap(),
            vec![TokenKind::Number("12".into()), TokenKind::Question]
        );
    }

    #[test]
    fn unterminated_comment_is_eof() {
        assert_eq!(tokens("12 $$ nope"), Err(CommandError::UnexpectedEof));
    }

    #[test]
    fn lone_dollar_is_lexical_error() {
        assert_eq!(tokens("12 $ 34"), Err(CommandError::Lexical(4)));
    }

    #[test]
    fn stray_symbol_is_lexical_error() {
        assert_eq!(tokens("12 < 34"), Err(CommandError::Lexical(4)));
    }
}
