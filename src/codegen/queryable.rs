// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Read methods: finder, counter and one selector per field.
//!
//! Fragments go out in that order. A missing blueprint reads as the default
//! blueprint, so the soft-delete scope applies to every read.

mod counter;
mod finder;
mod selector;

use proc_macro2::TokenStream;
use quote::quote;

use super::{Context, Emitter};
use crate::error::Result;

pub fn produce(ctx: &Context<'_>, out: &Emitter<'_>) -> Result<()> {
    finder::produce(ctx, out)?;
    counter::produce(ctx, out)?;
    for field in ctx.model.fields.values() {
        selector::produce(ctx, out, field)?;
    }
    Ok(())
}

/// Statements appending predicate, ordering and paging to `query`.
///
/// Expects `blueprint: &Blueprint` and `query: String` in scope.
fn paging(ctx: &Context<'_>) -> TokenStream {
    let default_limit = proc_macro2::Literal::i64_unsuffixed(ctx.model.default_limit);
    quote! {
        let predicate = blueprint.predicate(1);
        if !predicate.is_empty() {
            query.push(' ');
            query.push_str(&predicate);
        }
        let order = blueprint.order_clause();
        if !order.is_empty() {
            query.push(' ');
            query.push_str(&order);
        }
        let limit = if blueprint.limit < 1 { #default_limit } else { blueprint.limit };
        let offset = if blueprint.offset < 0 { 0 } else { blueprint.offset };
        query.push_str(&::std::format!(" LIMIT {} OFFSET {}", limit, offset));
    }
}

/// Wrap store methods in an inherent impl block.
fn store_impl(ctx: &Context<'_>, doc: &str, definition: TokenStream) -> TokenStream {
    let runtime = &ctx.runtime;
    let store = &ctx.store;
    quote! {
        impl<D: #runtime::Connection> #store<D> {
            #[doc = #doc]
            #definition
        }
    }
}
