// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-field update generation.
//!
//! Every writable (non auto-increment) field gets `update_<record>_<field>`.
//! Bitmask fields also get `add_<record>_<field>` (`c = c | v`) and
//! `drop_<record>_<field>` (`c = c & ~v`).
//!
//! Binding order depends on the dialect. The default dialect binds the new
//! value first, ahead of the blueprint values. Postgres numbers the
//! blueprint from `$1` and puts the new value last, so the target
//! placeholder is `$(len + 1)`.

use proc_macro2::TokenStream;
use quote::quote;

use super::{Context, Emitter, ident};
use crate::{error::Result, model::FieldModel};

/// Assignment shapes.
#[derive(Clone, Copy)]
enum Assignment {
    Set,
    Add,
    Drop
}

impl Assignment {
    /// `SET` expression template with `{}` standing for the placeholder.
    fn template(self, column: &str) -> String {
        match self {
            Self::Set => format!("{column} = {{}}"),
            Self::Add => format!("{column} = {column} | {{}}"),
            Self::Drop => format!("{column} = {column} & ~{{}}")
        }
    }
}

pub fn produce(ctx: &Context<'_>, out: &Emitter<'_>) -> Result<()> {
    let model = ctx.model;
    let runtime = &ctx.runtime;
    let store = &ctx.store;

    let mut methods = Vec::new();
    for field in model.fields.values().filter(|field| field.is_writable()) {
        out.imports(&field.import_hints)?;
        methods.push(update_method(ctx, out, field, Assignment::Set)?);
        if field.bitmask {
            methods.push(update_method(ctx, out, field, Assignment::Add)?);
            methods.push(update_method(ctx, out, field, Assignment::Drop)?);
        }
    }
    if methods.is_empty() {
        return Ok(());
    }

    out.fragment(quote! {
        impl<D: #runtime::Connection> #store<D> {
            #(#methods)*
        }
    })
}

fn update_method(
    ctx: &Context<'_>,
    out: &Emitter<'_>,
    field: &FieldModel,
    assignment: Assignment
) -> Result<TokenStream> {
    let model = ctx.model;
    let runtime = &ctx.runtime;
    let ty = ctx.field_type(field)?;
    let head = format!(
        "UPDATE {} SET {}",
        model.table,
        assignment.template(&field.column)
    );

    let bind = if model.dialect.binds_target_last() {
        quote! {
            let mut values = ::std::vec::Vec::new();
            let mut predicate = ::std::string::String::new();
            if let ::core::option::Option::Some(blueprint) = blueprint {
                predicate = blueprint.predicate(1);
                values = blueprint.values();
            }
            let mut query = ::std::format!(#head, ::std::format!("${}", values.len() + 1));
            if !predicate.is_empty() {
                query.push(' ');
                query.push_str(&predicate);
            }
            values.push(#runtime::Value::from(value));
        }
    } else {
        quote! {
            let mut values = ::std::vec![#runtime::Value::from(value)];
            let mut query = ::std::format!(#head, "?");
            if let ::core::option::Option::Some(blueprint) = blueprint {
                let predicate = blueprint.predicate(2);
                if !predicate.is_empty() {
                    query.push(' ');
                    query.push_str(&predicate);
                }
                values.extend(blueprint.values());
            }
        }
    };

    let name = match assignment {
        Assignment::Set => model.update_method(field),
        Assignment::Add => model.add_method(field),
        Assignment::Drop => model.drop_method(field)
    };
    let method = ident(&name)?;
    let blueprint_arg = ctx.blueprint_arg();
    let returns = ctx.result(quote! { i64 });
    let prepare = ctx.prepare();
    let doc = match assignment {
        Assignment::Set => format!("Set `{}` on matching rows.", field.name),
        Assignment::Add => format!("Set bits of `{}` on matching rows.", field.name),
        Assignment::Drop => format!("Clear bits of `{}` on matching rows.", field.name)
    };

    let definition = out.method(
        &name,
        &ctx.vis,
        quote! { fn #method(&self, value: #ty, blueprint: #blueprint_arg) -> #returns },
        quote! {{
            #bind
            #prepare
            let outcome = statement.execute(&values)?;
            ::core::result::Result::Ok(outcome.rows_affected)
        }}
    )?;
    Ok(quote! {
        #[doc = #doc]
        #definition
    })
}
