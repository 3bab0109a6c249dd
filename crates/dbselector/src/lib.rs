//! # dbselector
//!
//! A fluent builder for parameterized SQL statements.
//!
//! ## Features
//!
//! - **Values are always bound**: predicates, SET items and INSERT rows become
//!   placeholders plus a bind collection, never inline text
//! - **Two placeholder styles**: named (`:name1`) or positional (`$1` for
//!   PostgreSQL, `?` for MySQL/SQLite)
//! - **Collision-free bind names**: every placeholder in one render gets a
//!   unique, deterministic name
//! - **Struct rows**: `#[derive(Row)]` maps struct fields to INSERT columns
//!
//! ## Example
//!
//! ```ignore
//! use dbselector::Selector;
//!
//! let mut sel = Selector::new();
//! sel.select_from("user")
//!     .open_bracket()
//!     .where_("name", "=", "Vova")
//!     .or("age", "<", 18)
//!     .close_bracket()
//!     .and_in("height", [170, 171, 172])
//!     .order_by_bound("email", "DESC")
//!     .limit(5);
//!
//! let (sql, binds) = sel.render()?;
//! let (sql, params) = sel.render_positional()?;
//! ```
//!
//! ## Unchecked input
//!
//! Table names, field names, operators, RETURNING columns and the raw ORDER BY
//! string are written into the SQL as given. Only values are parameterized.

// Lets `#[derive(Row)]` output (which names `dbselector::`) resolve inside this crate.
extern crate self as dbselector;

pub mod clause;
pub mod config;
pub mod error;
pub mod namer;
pub mod row;
pub mod selector;
pub mod statement;
pub mod value;
pub mod where_clause;

pub use clause::{BracketKind, Clause, ClauseList, Connector};
pub use config::{Dialect, SelectorConfig};
pub use error::{SelectorError, SelectorResult};
pub use namer::{ParamNamer, Placeholder, PlaceholderStyle};
pub use row::{ColumnField, FieldDef, Row, SKIP_COLUMN, map_columns, read_values};
pub use selector::{PositionalQuery, Selector};
pub use statement::{OrderDirection, StatementKind};
pub use value::{NamedBinds, Value};
pub use where_clause::render_where;

#[cfg(feature = "derive")]
pub use dbselector_derive::Row;
