// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Guarded delete generation.
//!
//! `delete_<plural>` refuses a missing blueprint and a blueprint without
//! caller-set conditions. The soft-delete scope does not count as a
//! condition, so it cannot turn an empty blueprint into a mass delete.

use quote::quote;

use super::{Context, Emitter, ident};
use crate::error::Result;

pub fn produce(ctx: &Context<'_>, out: &Emitter<'_>) -> Result<()> {
    let model = ctx.model;
    let runtime = &ctx.runtime;
    let store = &ctx.store;

    let template = format!("DELETE FROM {} {{}};", model.table);
    let name = model.delete_method();
    let method = ident(&name)?;
    let blueprint_arg = ctx.blueprint_arg();
    let returns = ctx.result(quote! { i64 });
    let prepare = ctx.prepare();

    let definition = out.method(
        &name,
        &ctx.vis,
        quote! { fn #method(&self, blueprint: #blueprint_arg) -> #returns },
        quote! {{
            let ::core::option::Option::Some(blueprint) =
                blueprint.filter(|blueprint| blueprint.has_conditions())
            else {
                return ::core::result::Result::Err(#runtime::Error::InvalidDeletionBlueprint);
            };
            let query = ::std::format!(#template, blueprint.predicate(1));
            #prepare
            let outcome = statement.execute(&blueprint.values())?;
            ::core::result::Result::Ok(outcome.rows_affected)
        }}
    )?;

    let doc = format!(
        "Delete `{}` rows matching `blueprint`; an empty blueprint is refused.",
        model.name
    );
    out.fragment(quote! {
        impl<D: #runtime::Connection> #store<D> {
            #[doc = #doc]
            #definition
        }
    })
}
