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

//! Executes a parsed [`Statement`] against a [`Registry`] (§6.2/§6.3).

use std::io::Write;

use crate::command::error::CommandError;
use crate::command::parser::Statement;
use crate::command::registry::Registry;

/// Executes one statement, writing any query output to `out`.
///
/// A statement that needs a current database but has none returns an
/// [`CommandError::Operation`] for the caller to report, matching §7's
/// "missing current database" error kind.
pub(crate) fn execute(statement: Statement, registry: &mut Registry, out: &mut impl Write) -> Result<(), CommandError> {
    match statement {
        Statement::NewDb { name, .. } => {
            registry.set_or_create(&name);
            Ok(())
        }

        Statement::DelDb { name, op_pos } => {
            if registry.delete(&name) {
                Ok(())
            } else {
                Err(CommandError::Operation { op: "DEL", index: op_pos })
            }
        }

        Statement::DelNum { num, op_pos } => match registry.current_mut() {
            Some(db) => {
                db.remove(&num);
                Ok(())
            }
            None => Err(CommandError::Operation { op: "DEL", index: op_pos }),
        },

        Statement::Redirect { source, target, op_pos } => match registry.current_mut() {
            Some(db) => {
                if db.add(&source, &target) {
                    Ok(())
                } else {
                    Err(CommandError::Operation { op: ">", index: op_pos })
                }
            }
            None => Err(CommandError::Operation { op: ">", index: op_pos }),
        },

        Statement::Get { num, op_pos } => match registry.current_mut() {
            Some(db) => {
                let result = db.get(&num);
                writeln!(out, "{}", result.get(0).expect("phfwdGet always returns one string"))
                    .expect("writing to the output stream failed");
                Ok(())
            }
            None => Err(CommandError::Operation { op: "?", index: op_pos }),
        },

        Statement::Reverse { num, op_pos } => match registry.current_mut() {
            Some(db) => {
                for source in db.reverse(&num).iter() {
                    writeln!(out, "{source}").expect("writing to the output stream failed");
                }
                Ok(())
            }
            None => Err(CommandError::Operation { op: "?", index: op_pos }),
        },

        Statement::Count { num, op_pos } => match registry.current_mut() {
            Some(db) => {
                let len = num.len().saturating_sub(12);
                let count = db.non_trivial_count(&num, len);
                writeln!(out, "{count}").expect("writing to the output stream failed");
                Ok(())
            }
            None => Err(CommandError::Operation { op: "@", index: op_pos }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parser::Parser;

    fn run(input: &str) -> (String, Result<(), CommandError>) {
        let mut registry = Registry::new();
        let mut parser = Parser::new(input);
        let mut out = Vec::new();
        let mut result = Ok(());
        while let Some(statement) = parser.next_statement().unwrap() {
            result = execute(statement, &mut registry, &mut out);
            if result.is_err() {
                break;
            }
        }
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn end_to_end_session() {
        let (out, result) = run("NEW base 12 > 34 125 > 99 12999?");
        assert!(result.is_ok());
        assert_eq!(out, "34999\n");
    }

    #[test]
    fn redirect_without_database_is_an_operation_error() {
        let (_, result) = run("12 > 34");
        assert_eq!(result, Err(CommandError::Operation { op: ">", index: 4 }));
    }

    #[test]
    fn reverse_prints_one_number_per_line() {
        let (out, result) = run("NEW base 1 > 2 11 > 2 ? 2");
        assert!(result.is_ok());
        assert_eq!(out, "1\n11\n2\n");
    }
}
