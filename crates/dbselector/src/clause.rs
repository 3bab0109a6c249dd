//! Ordered WHERE-section state.
//!
//! Clauses render in insertion order. Brackets are plain markers, not a
//! parse tree: nothing checks their balance while rendering, and a leading
//! `AND`/`OR` is rendered as given. [`ClauseList::validate`] is available for
//! callers that want those mistakes reported.

use crate::error::{SelectorError, SelectorResult};
use crate::value::Value;
use std::fmt;

/// Logical keyword prefixed to a rendered condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    Where,
    And,
    Or,
}

impl Connector {
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::Where => "WHERE",
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

/// One unit of WHERE-section state.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `<connector> field operator :bind`
    Predicate {
        connector: Connector,
        field: String,
        operator: String,
        value: Value,
    },
    /// `<connector> field IN (:b1,:b2,...)`; never empty.
    InList {
        connector: Connector,
        field: String,
        values: Vec<Value>,
    },
    /// `<connector> true`
    AlwaysTrue { connector: Connector },
    Bracket(BracketKind),
}

impl Clause {
    /// Connector of a condition-bearing clause; `None` for brackets.
    pub fn connector(&self) -> Option<Connector> {
        match self {
            Clause::Predicate { connector, .. }
            | Clause::InList { connector, .. }
            | Clause::AlwaysTrue { connector } => Some(*connector),
            Clause::Bracket(_) => None,
        }
    }
}

/// Insertion-ordered list of clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseList {
    clauses: Vec<Clause>,
}

impl ClauseList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_predicate(
        &mut self,
        connector: Connector,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: Value,
    ) {
        self.clauses.push(Clause::Predicate {
            connector,
            field: field.into(),
            operator: operator.into(),
            value,
        });
    }

    /// Append a set-membership test.
    ///
    /// An empty `WHERE ... IN` becomes `WHERE true`, so the statement still
    /// carries a WHERE keyword for any following `AND`/`OR`. An empty
    /// `AND ... IN` / `OR ... IN` is dropped.
    pub fn push_in(&mut self, connector: Connector, field: impl Into<String>, values: Vec<Value>) {
        if !values.is_empty() {
            self.clauses.push(Clause::InList {
                connector,
                field: field.into(),
                values,
            });
        } else if connector == Connector::Where {
            self.clauses.push(Clause::AlwaysTrue { connector });
        }
    }

    pub fn push_bracket(&mut self, kind: BracketKind) {
        self.clauses.push(Clause::Bracket(kind));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Check bracket balance and that the first condition uses `WHERE`.
    pub fn validate(&self) -> SelectorResult<()> {
        let mut depth = 0usize;
        let mut seen_condition = false;

        for (pos, clause) in self.clauses.iter().enumerate() {
            match clause {
                Clause::Bracket(BracketKind::Open) => depth += 1,
                Clause::Bracket(BracketKind::Close) => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        SelectorError::grammar(format!(
                            "closing bracket at clause {pos} has no matching open bracket"
                        ))
                    })?;
                }
                _ => {
                    let connector = clause.connector().unwrap_or(Connector::Where);
                    if !seen_condition && connector != Connector::Where {
                        return Err(SelectorError::grammar(format!(
                            "first condition starts with {connector} instead of WHERE"
                        )));
                    }
                    if seen_condition && connector == Connector::Where {
                        return Err(SelectorError::grammar(format!(
                            "WHERE repeated at clause {pos}"
                        )));
                    }
                    seen_condition = true;
                }
            }
        }

        if depth > 0 {
            return Err(SelectorError::grammar(format!(
                "{depth} open bracket(s) never closed"
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ClauseList {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
