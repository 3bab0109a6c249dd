//! Row values for INSERT and the struct-to-column mapper.
//!
//! A [`Row`] describes its own fields: declared name, optional column
//! override, and a positional value accessor. `#[derive(Row)]` generates the
//! implementation; hand-written impls work too.
//!
//! ```ignore
//! use dbselector::Row;
//!
//! #[derive(Row)]
//! struct Post {
//!     id: i64,
//!     #[db(column = "post_title")]
//!     title: String,
//!     #[db(skip)]
//!     cached_html: Option<String>,
//! }
//! ```

use crate::error::{SelectorError, SelectorResult};
use crate::value::Value;

/// Column override that removes a field from the statement.
pub const SKIP_COLUMN: &str = "-";

/// Declared field of a row type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as declared.
    pub name: &'static str,
    /// Explicit column name; `Some("-")` excludes the field.
    pub column: Option<&'static str>,
}

impl FieldDef {
    pub const fn new(name: &'static str) -> Self {
        Self { name, column: None }
    }

    pub const fn with_column(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column: Some(column),
        }
    }
}

/// A value that can be written as one row of an INSERT.
pub trait Row {
    /// Type name used in mapping errors.
    fn type_name(&self) -> &'static str;

    /// Fields in declaration order.
    fn fields(&self) -> &'static [FieldDef];

    /// Value of the field at `index` (an index into [`Row::fields`]).
    ///
    /// Returns `None` when the field cannot be read. Excluded fields are never
    /// requested.
    fn field_value(&self, index: usize) -> Option<Value>;
}

impl<R: Row + ?Sized> Row for &R {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn fields(&self) -> &'static [FieldDef] {
        (**self).fields()
    }

    fn field_value(&self, index: usize) -> Option<Value> {
        (**self).field_value(index)
    }
}

impl<R: Row + ?Sized> Row for Box<R> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn fields(&self) -> &'static [FieldDef] {
        (**self).fields()
    }

    fn field_value(&self, index: usize) -> Option<Value> {
        (**self).field_value(index)
    }
}

/// A resolved column and the field it reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnField {
    pub column: &'static str,
    pub index: usize,
}

/// Resolve the `(column, field index)` list for a row.
///
/// Columns come from the override when present, otherwise the field name is
/// used verbatim (no case conversion). Fields overridden with `-` are skipped.
pub fn map_columns(row: &dyn Row) -> SelectorResult<Vec<ColumnField>> {
    let fields = row.fields();
    if fields.is_empty() {
        return Err(SelectorError::mapping(
            row.type_name(),
            "row declares no fields",
        ));
    }

    let mut columns = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        let column = match field.column {
            Some(SKIP_COLUMN) => continue,
            Some(column) => {
                validate_override(row.type_name(), field.name, column)?;
                column
            }
            None => field.name,
        };
        columns.push(ColumnField { column, index });
    }
    Ok(columns)
}

/// Read the values for `columns` from `row`, in column order.
pub fn read_values(row: &dyn Row, columns: &[ColumnField]) -> SelectorResult<Vec<Value>> {
    columns
        .iter()
        .map(|col| {
            row.field_value(col.index).ok_or_else(|| {
                SelectorError::mapping(
                    row.type_name(),
                    format!("field #{} ({}) cannot be read", col.index, col.column),
                )
            })
        })
        .collect()
}

fn validate_override(type_name: &str, field: &str, column: &str) -> SelectorResult<()> {
    if column.is_empty() {
        return Err(SelectorError::mapping(
            type_name,
            format!("field '{field}' has an empty column override"),
        ));
    }
    if column.contains('"') {
        return Err(SelectorError::mapping(
            type_name,
            format!("field '{field}' has a malformed column override: {column}"),
        ));
    }
    Ok(())
}
