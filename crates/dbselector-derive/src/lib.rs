//! Derive macros for dbselector
//!
//! Provides `#[derive(Row)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod row;

/// Derive `Row` for a struct so it can be passed to `Selector::values`.
///
/// # Example
///
/// ```ignore
/// use dbselector::Row;
///
/// #[derive(Row)]
/// struct Post {
///     id: i64,
///     #[db(column = "post_title")]
///     title: String,
///     #[db(skip)]
///     rendered: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[db(column = "name")]` - Use `name` as the column instead of the field name
/// - `#[db(column = "-")]` or `#[db(skip)]` - Leave the field out of the statement
///
/// Field names are used verbatim; no case conversion is applied. Every
/// non-skipped field type must convert into `dbselector::Value` via `From`
/// and implement `Clone`.
#[proc_macro_derive(Row, attributes(db))]
pub fn derive_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    row::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
