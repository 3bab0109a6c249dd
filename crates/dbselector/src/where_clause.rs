//! WHERE fragment rendering.

use crate::clause::{BracketKind, Clause, ClauseList};
use crate::namer::ParamNamer;

/// Render `clauses` into a WHERE fragment, binding values through `namer`.
///
/// Single left-to-right scan. Open brackets are buffered and attached after
/// the keyword of the next condition; close brackets are written immediately
/// as `) `. Every condition starts with a space, so the result can be
/// appended directly to a statement head. No clauses yields an empty string.
pub fn render_where(clauses: &ClauseList, namer: &mut ParamNamer<'_>) -> String {
    let mut sql = String::new();
    let mut open_brackets = String::new();

    for clause in clauses {
        match clause {
            Clause::Bracket(BracketKind::Open) => open_brackets.push_str(" ("),
            Clause::Bracket(BracketKind::Close) => sql.push_str(") "),
            Clause::Predicate {
                connector,
                field,
                operator,
                value,
            } => {
                let ph = namer.bind(field, value.clone());
                sql.push_str(&format!(
                    " {connector}{open_brackets} {field} {operator} {ph}"
                ));
                open_brackets.clear();
            }
            Clause::InList {
                connector,
                field,
                values,
            } => {
                let list = namer.bind_list(field, values);
                sql.push_str(&format!(" {connector}{open_brackets} {field} IN {list}"));
                open_brackets.clear();
            }
            Clause::AlwaysTrue { connector } => {
                sql.push_str(&format!(" {connector}{open_brackets} true"));
                open_brackets.clear();
            }
        }
    }

    sql
}
