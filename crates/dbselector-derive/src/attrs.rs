//! Field-level `#[db(...)]` attribute parsing.

use syn::{LitStr, Result};

/// Column mapping for one struct field.
pub(crate) enum ColumnAttr {
    /// No override: the field name is the column.
    Default,
    /// Explicit column name.
    Rename(String),
    /// `#[db(skip)]` or `#[db(column = "-")]`.
    Skip,
}

/// Parse every `#[db(...)]` attribute on a field. Later attributes win.
pub(crate) fn parse_column_attr(field: &syn::Field) -> Result<ColumnAttr> {
    let mut result = ColumnAttr::Default;

    for attr in &field.attrs {
        if !attr.path().is_ident("db") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                result = ColumnAttr::Skip;
                return Ok(());
            }

            if meta.path.is_ident("column") {
                let lit: LitStr = meta.value()?.parse()?;
                let column = lit.value();
                if column.is_empty() {
                    return Err(syn::Error::new_spanned(lit, "column name must not be empty"));
                }
                if column.contains('"') {
                    return Err(syn::Error::new_spanned(
                        lit,
                        "column name must not contain '\"'",
                    ));
                }
                result = if column == "-" {
                    ColumnAttr::Skip
                } else {
                    ColumnAttr::Rename(column)
                };
                return Ok(());
            }

            Err(meta.error("unsupported db attribute, expected `column = \"...\"` or `skip`"))
        })?;
    }

    Ok(result)
}
