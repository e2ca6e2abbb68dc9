// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query blueprint generation.
//!
//! For `Author { id: i64, name: String, university_id: Option<i64> }`:
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, Default)]
//! pub struct AuthorBlueprint {
//!     pub id: Vec<i64>,
//!     pub id_range: Vec<i64>,
//!     pub name: Vec<String>,
//!     pub name_like: Vec<String>,
//!     pub university_id: Option<Vec<Option<i64>>>,
//!     pub inclusive: bool,
//!     pub limit: i64,
//!     pub offset: i64,
//!     pub order_by: String,
//!     pub order_direction: String,
//! }
//! ```
//!
//! Every slot has a private clause method returning its SQL text and bound
//! values for a starting placeholder index. `conditions` threads the index
//! through all clauses in slot order, so numbered placeholders stay unique
//! across the whole predicate.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use super::{Context, Emitter, ident};
use crate::{error::Result, model::FieldModel};

/// One blueprint slot and its clause method.
struct Slot {
    field:  TokenStream,
    clause: TokenStream,
    method: Ident
}

pub fn produce(ctx: &Context<'_>, out: &Emitter<'_>) -> Result<()> {
    let model = ctx.model;
    let runtime = &ctx.runtime;
    let vis = &ctx.vis;
    let blueprint = &ctx.blueprint;

    let mut slots = Vec::new();
    for field in model.fields.values() {
        out.imports(&field.import_hints)?;
        slots.extend(field_slots(ctx, field)?);
    }

    let fields = slots.iter().map(|slot| &slot.field);
    let clauses = slots.iter().map(|slot| &slot.clause);
    let methods = slots.iter().map(|slot| &slot.method);

    let unscoped_field = model.soft_delete_field.as_ref().map(|_| {
        quote! {
            /// Include soft-deleted rows.
            #vis unscoped: bool,
        }
    });
    let predicate = predicate_method(ctx);
    let order_clause = order_clause_method(ctx);
    let doc = format!("Query blueprint for `{}` records.", model.name);

    let tokens = quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default)]
        #vis struct #blueprint {
            #(#fields,)*
            /// Join clauses with `OR` instead of `AND`.
            #vis inclusive: bool,
            /// Row limit; values below 1 use the store default.
            #vis limit: i64,
            /// Rows to skip.
            #vis offset: i64,
            /// Column to order by.
            #vis order_by: ::std::string::String,
            /// `asc` or `desc`.
            #vis order_direction: ::std::string::String,
            #unscoped_field
        }

        impl #blueprint {
            #(#clauses)*

            fn conditions(
                &self,
                base: usize
            ) -> (::std::vec::Vec<::std::string::String>, ::std::vec::Vec<#runtime::Value>) {
                let mut clauses: ::std::vec::Vec<::std::string::String> = ::std::vec::Vec::new();
                let mut values: ::std::vec::Vec<#runtime::Value> = ::std::vec::Vec::new();
                #(
                    let (clause, bound) = self.#methods(base + values.len());
                    if !clause.is_empty() {
                        clauses.push(clause);
                        values.extend(bound);
                    }
                )*
                (clauses, values)
            }

            #predicate

            /// Values bound by the predicate, in placeholder order.
            #vis fn values(&self) -> ::std::vec::Vec<#runtime::Value> {
                self.conditions(1).1
            }

            /// Whether any caller-set condition applies.
            #vis fn has_conditions(&self) -> bool {
                !self.conditions(1).0.is_empty()
            }

            #order_clause
        }

        impl ::core::fmt::Display for #blueprint {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.predicate(1))
            }
        }
    };
    out.fragment(tokens)
}

fn field_slots(ctx: &Context<'_>, field: &FieldModel) -> Result<Vec<Slot>> {
    let model = ctx.model;
    let vis = &ctx.vis;
    let ty = ctx.field_type(field)?;
    let column = model.qualified(&field.column);
    let mut slots = Vec::with_capacity(3);

    let exact = ident(&field.name)?;
    let method = format_ident!("clause_{}", exact);
    if field.category.is_nullable() {
        slots.push(Slot {
            field: quote! { #vis #exact: ::core::option::Option<::std::vec::Vec<#ty>> },
            clause: nullable_in_clause(ctx, &exact, &method, &column),
            method
        });
    } else {
        slots.push(Slot {
            field: quote! { #vis #exact: ::std::vec::Vec<#ty> },
            clause: in_clause(ctx, &exact, &method, &column),
            method
        });
    }

    if let Some(range) = &field.range_slot {
        let range = ident(range)?;
        let method = format_ident!("clause_{}", range);
        slots.push(Slot {
            field: quote! { #vis #range: ::std::vec::Vec<#ty> },
            clause: range_clause(ctx, &range, &method, &column),
            method
        });
    }

    if let Some(like) = &field.like_slot {
        let like = ident(like)?;
        let method = format_ident!("clause_{}", like);
        slots.push(Slot {
            field: quote! { #vis #like: ::std::vec::Vec<::std::string::String> },
            clause: like_clause(ctx, &like, &method, &column),
            method
        });
    }

    Ok(slots)
}

fn clause_return(ctx: &Context<'_>) -> TokenStream {
    let runtime = &ctx.runtime;
    quote! { (::std::string::String, ::std::vec::Vec<#runtime::Value>) }
}

fn empty_clause() -> TokenStream {
    quote! { (::std::string::String::new(), ::std::vec::Vec::new()) }
}

/// Loop pushing one placeholder and one value per element of `items`.
fn in_list(ctx: &Context<'_>, items: TokenStream, column: &str) -> TokenStream {
    let runtime = &ctx.runtime;
    let placeholder = ctx.model.dialect.placeholder(&quote! { base + offset });
    let template = format!("{column} IN ({{}})");
    quote! {
        let mut placeholders = ::std::vec::Vec::with_capacity(#items.len());
        let mut values = ::std::vec::Vec::with_capacity(#items.len());
        for (offset, item) in #items.iter().enumerate() {
            placeholders.push(#placeholder);
            values.push(#runtime::Value::from(item.clone()));
        }
        (::std::format!(#template, placeholders.join(",")), values)
    }
}

fn in_clause(ctx: &Context<'_>, slot: &Ident, method: &Ident, column: &str) -> TokenStream {
    let returns = clause_return(ctx);
    let empty = empty_clause();
    let list = in_list(ctx, quote! { self.#slot }, column);
    quote! {
        #[allow(unused_variables)]
        fn #method(&self, base: usize) -> #returns {
            if self.#slot.is_empty() {
                return #empty;
            }
            #list
        }
    }
}

fn nullable_in_clause(ctx: &Context<'_>, slot: &Ident, method: &Ident, column: &str) -> TokenStream {
    let returns = clause_return(ctx);
    let empty = empty_clause();
    let present = ctx.model.dialect.null_present_predicate(column);
    let absent = format!("{column} IS NULL");
    let list = in_list(ctx, quote! { items }, column);
    quote! {
        #[allow(unused_variables)]
        fn #method(&self, base: usize) -> #returns {
            let ::core::option::Option::Some(items) = &self.#slot else {
                return #empty;
            };
            if items.is_empty() {
                return (::std::string::String::from(#present), ::std::vec::Vec::new());
            }
            if items.iter().any(::core::option::Option::is_none) {
                return (::std::string::String::from(#absent), ::std::vec::Vec::new());
            }
            #list
        }
    }
}

fn range_clause(ctx: &Context<'_>, slot: &Ident, method: &Ident, column: &str) -> TokenStream {
    let runtime = &ctx.runtime;
    let returns = clause_return(ctx);
    let empty = empty_clause();
    let lower = ctx.model.dialect.placeholder(&quote! { base });
    let upper = ctx.model.dialect.placeholder(&quote! { base + 1 });
    let template = format!("({column} > {{}} AND {column} < {{}})");
    quote! {
        #[allow(unused_variables)]
        fn #method(&self, base: usize) -> #returns {
            if self.#slot.len() != 2 {
                return #empty;
            }
            (
                ::std::format!(#template, #lower, #upper),
                ::std::vec![
                    #runtime::Value::from(self.#slot[0].clone()),
                    #runtime::Value::from(self.#slot[1].clone())
                ]
            )
        }
    }
}

fn like_clause(ctx: &Context<'_>, slot: &Ident, method: &Ident, column: &str) -> TokenStream {
    let runtime = &ctx.runtime;
    let returns = clause_return(ctx);
    let empty = empty_clause();
    let placeholder = ctx.model.dialect.placeholder(&quote! { base + offset });
    let template = format!("{column} LIKE {{}}");
    quote! {
        #[allow(unused_variables)]
        fn #method(&self, base: usize) -> #returns {
            if self.#slot.is_empty() {
                return #empty;
            }
            let mut parts = ::std::vec::Vec::with_capacity(self.#slot.len());
            let mut values = ::std::vec::Vec::with_capacity(self.#slot.len());
            for (offset, pattern) in self.#slot.iter().enumerate() {
                parts.push(::std::format!(#template, #placeholder));
                values.push(#runtime::Value::from(pattern.clone()));
            }
            let joiner = if self.inclusive { " OR " } else { " AND " };
            (parts.join(joiner), values)
        }
    }
}

/// `predicate(base)`: `WHERE ...` text, soft-delete scope included.
fn predicate_method(ctx: &Context<'_>) -> TokenStream {
    let model = ctx.model;
    let vis = &ctx.vis;

    let scope = model.soft_delete_column().map(|column| {
        let scoped_only = format!("WHERE {} IS NULL", model.qualified(column));
        let grouped = format!("WHERE ({{}}) AND {} IS NULL", model.qualified(column));
        let appended = format!("WHERE {{}} AND {} IS NULL", model.qualified(column));
        quote! {
            if !self.unscoped {
                if clauses.is_empty() {
                    return ::std::string::String::from(#scoped_only);
                }
                if self.inclusive && joined.contains(" OR ") {
                    return ::std::format!(#grouped, joined);
                }
                return ::std::format!(#appended, joined);
            }
        }
    });

    quote! {
        /// `WHERE` clause with placeholders numbered from `base`, or an
        /// empty string when nothing applies.
        #vis fn predicate(&self, base: usize) -> ::std::string::String {
            let (clauses, _) = self.conditions(base);
            let joiner = if self.inclusive { " OR " } else { " AND " };
            let joined = clauses.join(joiner);
            #scope
            if clauses.is_empty() {
                return ::std::string::String::new();
            }
            ::std::format!("WHERE {}", joined)
        }
    }
}

/// `order_clause()`: `ORDER BY` for a known column, else empty.
fn order_clause_method(ctx: &Context<'_>) -> TokenStream {
    let model = ctx.model;
    let vis = &ctx.vis;
    let mut columns: Vec<&str> = model.fields.values().map(|f| f.column.as_str()).collect();
    columns.sort_unstable();
    let qualified: Vec<String> = columns.iter().map(|c| model.qualified(c)).collect();

    quote! {
        /// `ORDER BY` clause for `order_by`, or an empty string when it names
        /// no column.
        #vis fn order_clause(&self) -> ::std::string::String {
            let column = match self.order_by.as_str() {
                #(#columns => #qualified,)*
                _ => return ::std::string::String::new()
            };
            let direction = if self.order_direction.eq_ignore_ascii_case("desc") {
                "DESC"
            } else {
                "ASC"
            };
            ::std::format!("ORDER BY {} {}", column, direction)
        }
    }
}
