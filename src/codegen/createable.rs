// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Batch insert generation.
//!
//! ```text
//! INSERT INTO authors (flags,name,university_id) VALUES (?,?,?), (?,?,?);
//! INSERT INTO multi_auto (created_at,name) VALUES ($1,$2), ($3,$4) RETURNING id;
//! ```
//!
//! Postgres groups number their placeholders `index * columns + position`,
//! so every row owns a disjoint range.

use proc_macro2::Literal;
use quote::quote;

use super::{Context, Emitter, ident};
use crate::{dialect::Dialect, error::Result};

pub fn produce(ctx: &Context<'_>, out: &Emitter<'_>) -> Result<()> {
    let model = ctx.model;
    let fields = model.insert_fields();
    if fields.is_empty() {
        return Ok(());
    }
    out.import(&model.name)?;

    let runtime = &ctx.runtime;
    let record = &ctx.record;
    let store = &ctx.store;
    let columns: Vec<&str> = fields.iter().map(|f| f.column.as_str()).collect();
    let count = Literal::usize_unsuffixed(columns.len());
    let template = format!(
        "INSERT INTO {} ({}) VALUES {{}}{};",
        model.table,
        columns.join(","),
        model.dialect.insert_suffix(model.primary_key_column.as_deref())
    );
    let accessors = fields
        .iter()
        .map(|field| ident(&field.name))
        .collect::<Result<Vec<_>>>()?;

    let group = match model.dialect {
        Dialect::Default => {
            let text = format!("({})", vec!["?"; columns.len()].join(","));
            quote! { groups.push(::std::string::String::from(#text)); }
        }
        Dialect::Postgres => {
            let text = format!("({})", vec!["${}"; columns.len()].join(","));
            let positions = (1..=columns.len()).map(|position| {
                let position = Literal::usize_unsuffixed(position);
                quote! { index * #count + #position }
            });
            quote! { groups.push(::std::format!(#text, #(#positions),*)); }
        }
    };

    let run = if model.dialect.returns_inserted_keys() {
        quote! {
            let mut rows = statement.query(&values)?;
            let mut key = 0;
            while let ::core::option::Option::Some(row) = rows.next_row()? {
                key = row.get(0)?;
            }
            ::core::result::Result::Ok(key)
        }
    } else {
        quote! {
            let outcome = statement.execute(&values)?;
            ::core::result::Result::Ok(outcome.last_insert_id)
        }
    };

    let name = model.create_method();
    let method = ident(&name)?;
    let returns = ctx.result(quote! { i64 });
    let prepare = ctx.prepare();
    let definition = out.method(
        &name,
        &ctx.vis,
        quote! { fn #method(&self, records: &[#record]) -> #returns },
        quote! {{
            if records.is_empty() {
                return ::core::result::Result::Ok(0);
            }
            let mut groups = ::std::vec::Vec::with_capacity(records.len());
            let mut values = ::std::vec::Vec::with_capacity(records.len() * #count);
            for (index, record) in records.iter().enumerate() {
                #group
                #(values.push(#runtime::Value::from(record.#accessors.clone()));)*
            }
            let query = ::std::format!(#template, groups.join(", "));
            #prepare
            #run
        }}
    )?;

    let doc = format!("Insert `{}` records; returns the last generated key.", model.name);
    out.fragment(quote! {
        impl<D: #runtime::Connection> #store<D> {
            #[doc = #doc]
            #[allow(unused_variables)]
            #definition
        }
    })
}
