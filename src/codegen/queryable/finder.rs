// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `find_<plural>`: scan whole records.
//!
//! ```text
//! SELECT flags,name,system_id,university_id FROM authors WHERE ... LIMIT 100 OFFSET 0
//! ```
//!
//! Columns are read back by their position in the sorted column list.
//! Struct fields without a column are filled with their `Default`.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use super::{paging, store_impl};
use crate::{
    codegen::{Context, Emitter, ident},
    error::Result
};

pub fn produce(ctx: &Context<'_>, out: &Emitter<'_>) -> Result<()> {
    let model = ctx.model;
    out.import(&model.name)?;

    let sorted = model.sorted_fields();
    let columns: Vec<&str> = sorted.iter().map(|field| field.column.as_str()).collect();
    let head = format!("SELECT {} FROM {}", columns.join(","), model.table);

    let inits = model
        .all_fields
        .iter()
        .map(|name| {
            let member = ident(name)?;
            let init = match sorted.iter().position(|field| &field.name == name) {
                Some(index) => {
                    let index = Literal::usize_unsuffixed(index);
                    quote! { row.get(#index)? }
                }
                None => quote! { ::core::default::Default::default() }
            };
            Ok(quote! { #member: #init })
        })
        .collect::<Result<Vec<TokenStream>>>()?;

    let record = &ctx.record;
    let name = model.find_method();
    let method = ident(&name)?;
    let blueprint_arg = ctx.blueprint_arg();
    let returns = ctx.result(quote! { ::std::vec::Vec<#record> });
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
            let mut records = ::std::vec::Vec::new();
            while let ::core::option::Option::Some(row) = rows.next_row()? {
                records.push(#record { #(#inits,)* });
            }
            ::core::result::Result::Ok(records)
        }}
    )?;

    let doc = format!("Find `{}` records matching `blueprint`.", model.name);
    out.fragment(store_impl(ctx, &doc, definition))
}
