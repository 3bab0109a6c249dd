//! Row derive macro implementation

use crate::attrs::{ColumnAttr, parse_column_attr};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Row can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Row can only be derived for structs",
            ));
        }
    };

    let mut field_defs = Vec::with_capacity(fields.len());
    let mut value_arms = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let field_name = ident.unraw().to_string();

        match parse_column_attr(field)? {
            ColumnAttr::Default => {
                field_defs.push(quote! { dbselector::FieldDef::new(#field_name) });
            }
            ColumnAttr::Rename(column) => {
                field_defs.push(quote! { dbselector::FieldDef::with_column(#field_name, #column) });
            }
            ColumnAttr::Skip => {
                field_defs.push(quote! {
                    dbselector::FieldDef::with_column(#field_name, dbselector::SKIP_COLUMN)
                });
                // Skipped fields are never read, so their type needs no conversion.
                continue;
            }
        }

        value_arms.push(quote! {
            #index => ::core::option::Option::Some(
                dbselector::Value::from(::core::clone::Clone::clone(&self.#ident))
            ),
        });
    }

    Ok(quote! {
        impl #impl_generics dbselector::Row for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #name_str
            }

            fn fields(&self) -> &'static [dbselector::FieldDef] {
                const FIELDS: &[dbselector::FieldDef] = &[#(#field_defs),*];
                FIELDS
            }

            fn field_value(&self, index: usize) -> ::core::option::Option<dbselector::Value> {
                match index {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
