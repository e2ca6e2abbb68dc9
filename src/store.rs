// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Store type and repository trait.
//!
//! The store owns the database handle and the statement logger. Feature
//! producers add inherent methods to it; once they are done the collected
//! signatures become a `{Name}Repository` trait, implemented for the store by
//! delegating to those inherent methods.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, Pat, Signature};

use crate::{
    codegen::{Context, ident},
    coordinator::MethodTable,
    error::{Error, Result}
};

/// `{Name}Store<D>` with its constructor.
pub fn store_type(ctx: &Context<'_>, without_methods: bool) -> TokenStream {
    let runtime = &ctx.runtime;
    let store = &ctx.store;
    let vis = &ctx.vis;
    let doc = format!("Data-access store for `{}` records.", ctx.model.name);
    let allow = without_methods.then(|| quote! { #[allow(dead_code)] });

    quote! {
        #[doc = #doc]
        #allow
        #vis struct #store<D> {
            db: D,
            logger: #runtime::Logger
        }

        impl<D> #store<D> {
            /// Wrap `db`; statements go to `logger`, or nowhere when `None`.
            #vis fn new(db: D, logger: ::core::option::Option<#runtime::Logger>) -> Self {
                Self {
                    db,
                    logger: logger.unwrap_or_default()
                }
            }
        }
    }
}

/// `{Name}Repository` and its implementation for the store, or `None` when
/// the store has no methods.
///
/// # Errors
///
/// [`Error::Format`] when a collected signature does not parse.
pub fn repository(ctx: &Context<'_>, methods: &MethodTable) -> Result<Option<TokenStream>> {
    if methods.is_empty() {
        return Ok(None);
    }
    let runtime = &ctx.runtime;
    let store = &ctx.store;
    let vis = &ctx.vis;
    let repository = ident(&ctx.model.repository_name)?;

    let mut declarations = Vec::with_capacity(methods.len());
    let mut delegations = Vec::with_capacity(methods.len());
    for signature in methods.values() {
        let signature = syn::parse_str::<Signature>(signature)
            .map_err(|err| Error::format(err, signature.clone()))?;
        let method = &signature.ident;
        let args = arguments(&signature)?;
        declarations.push(quote! { #signature; });
        delegations.push(quote! {
            #signature {
                #store::<D>::#method(self, #(#args),*)
            }
        });
    }

    let doc = format!("Operations of a `{}` store.", ctx.model.name);
    Ok(Some(quote! {
        #[doc = #doc]
        #vis trait #repository {
            #(#declarations)*
        }

        impl<D: #runtime::Connection> #repository for #store<D> {
            #(#delegations)*
        }
    }))
}

/// Names of the typed arguments of `signature`, receiver excluded.
fn arguments(signature: &Signature) -> Result<Vec<&syn::Ident>> {
    signature
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Receiver(_) => None,
            FnArg::Typed(typed) => Some(typed)
        })
        .map(|typed| match typed.pat.as_ref() {
            Pat::Ident(pat) => Ok(&pat.ident),
            other => Err(Error::format(
                "store method argument is not an identifier",
                quote!(#other).to_string()
            ))
        })
        .collect()
}
