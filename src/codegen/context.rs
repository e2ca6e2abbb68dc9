// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-producer generation context.
//!
//! Built inside each producer from the shared [`RecordModel`]. It owns the
//! parsed identifiers and paths the producer splices into its tokens, so
//! nothing `!Send` ever crosses a thread.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Path, Type, Visibility};

use crate::{
    config::{self, Config},
    error::{Error, Result},
    model::{FieldModel, RecordModel, parse_type}
};

/// Tokens and names shared by every feature generator of one record.
pub struct Context<'a> {
    /// The record being generated.
    pub model:     &'a RecordModel,
    /// Runtime crate path (`::marlow_core`).
    pub runtime:   Path,
    /// Visibility of emitted items.
    pub vis:       Visibility,
    /// Record type.
    pub record:    Ident,
    /// Store type.
    pub store:     Ident,
    /// Blueprint type.
    pub blueprint: Ident
}

impl<'a> Context<'a> {
    /// Build the context for `model`.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] when the runtime path or a generated name does not
    /// parse.
    pub fn new(model: &'a RecordModel, config: &Config) -> Result<Self> {
        let runtime = syn::parse_str::<Path>(&config.runtime_crate)
            .map_err(|err| Error::format(err, config.runtime_crate.clone()))?;
        let vis = match config.visibility {
            config::Visibility::Public => syn::parse_quote!(pub),
            config::Visibility::Inherit => syn::parse_str::<Visibility>(&model.vis)
                .map_err(|err| Error::format(err, model.vis.clone()))?
        };
        Ok(Self {
            model,
            runtime,
            vis,
            record: ident(&model.name)?,
            store: ident(&model.store_name)?,
            blueprint: ident(&model.blueprint_name)?
        })
    }

    /// Field type tokens.
    pub fn field_type(&self, field: &FieldModel) -> Result<Type> {
        parse_type(&field.type_expr).map_err(|err| Error::format(err, field.type_expr.clone()))
    }

    /// `Result<ok, runtime::Error>`.
    pub fn result(&self, ok: TokenStream) -> TokenStream {
        let runtime = &self.runtime;
        quote! { ::core::result::Result<#ok, #runtime::Error> }
    }

    /// Type of an optional blueprint argument.
    pub fn blueprint_arg(&self) -> TokenStream {
        let blueprint = &self.blueprint;
        quote! { ::core::option::Option<&#blueprint> }
    }

    /// Statements binding `blueprint` to the argument or a default
    /// blueprint when the caller passed `None`.
    pub fn resolve_blueprint(&self) -> TokenStream {
        let blueprint = &self.blueprint;
        quote! {
            let fallback;
            let blueprint = match blueprint {
                ::core::option::Option::Some(blueprint) => blueprint,
                ::core::option::Option::None => {
                    fallback = <#blueprint as ::core::default::Default>::default();
                    &fallback
                }
            };
        }
    }

    /// Statements logging and preparing `query`, binding `statement`.
    pub fn prepare(&self) -> TokenStream {
        quote! {
            self.logger.log(&query);
            let mut statement = self.db.prepare(&query)?;
        }
    }
}

/// Parse a generated or source identifier.
pub fn ident(name: &str) -> Result<Ident> {
    syn::parse_str::<Ident>(name).map_err(|err| Error::format(err, name.to_owned()))
}
