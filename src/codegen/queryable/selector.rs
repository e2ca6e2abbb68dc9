// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `select_<plural(field)>`: one column of matching rows.

use quote::quote;

use super::{paging, store_impl};
use crate::{
    codegen::{Context, Emitter, ident},
    error::Result,
    model::FieldModel
};

pub fn produce(ctx: &Context<'_>, out: &Emitter<'_>, field: &FieldModel) -> Result<()> {
    let model = ctx.model;
    out.imports(&field.import_hints)?;

    let ty = ctx.field_type(field)?;
    let head = format!(
        "SELECT {} FROM {}",
        model.qualified(&field.column),
        model.table
    );

    let name = model.select_method(field);
    let method = ident(&name)?;
    let blueprint_arg = ctx.blueprint_arg();
    let returns = ctx.result(quote! { ::std::vec::Vec<#ty> });
    let resolve = ctx.resolve_blueprint();
    let paging = paging(ctx);
    let prepare = ctx.prepare();

    let definition = out.method(
        &name,
        &ctx.vis,
        quote! { fn #method(&self, blueprint: #blueprint_arg) -> #returns },
        quote! {{
            #resolve
            let mut query = ::std::string::String::from(#head);
            #paging
            #prepare
            let mut rows = statement.query(&blueprint.values())?;
            let mut selected = ::std::vec::Vec::new();
            while let ::core::option::Option::Some(row) = rows.next_row()? {
                selected.push(row.get(0)?);
            }
            ::core::result::Result::Ok(selected)
        }}
    )?;

    let doc = format!("Select `{}` of matching `{}` records.", field.name, model.name);
    out.fragment(store_impl(ctx, &doc, definition))
}
