// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `count_<plural>`: `SELECT COUNT(*)` with the blueprint predicate.

use quote::quote;

use super::store_impl;
use crate::{
    codegen::{Context, Emitter, ident},
    error::Result
};

pub fn produce(ctx: &Context<'_>, out: &Emitter<'_>) -> Result<()> {
    let model = ctx.model;
    let runtime = &ctx.runtime;
    let bare = format!("SELECT COUNT(*) FROM {};", model.table);
    let filtered = format!("SELECT COUNT(*) FROM {} {{}};", model.table);

    let name = model.count_method();
    let method = ident(&name)?;
    let blueprint_arg = ctx.blueprint_arg();
    let returns = ctx.result(quote! { i64 });
    let resolve = ctx.resolve_blueprint();
    let prepare = ctx.prepare();

    let definition = out.method(
        &name,
        &ctx.vis,
        quote! { fn #method(&self, blueprint: #blueprint_arg) -> #returns },
        quote! {{
            #resolve
            let predicate = blueprint.predicate(1);
            let query = if predicate.is_empty() {
                ::std::string::String::from(#bare)
            } else {
                ::std::format!(#filtered, predicate)
            };
            #prepare
            let mut rows = statement.query(&blueprint.values())?;
            match rows.next_row()? {
                ::core::option::Option::Some(row) => row.get(0),
                ::core::option::Option::None => {
                    ::core::result::Result::Err(#runtime::Error::InvalidScan)
                }
            }
        }}
    )?;

    let doc = format!("Count `{}` records matching `blueprint`.", model.name);
    out.fragment(store_impl(ctx, &doc, definition))
}
