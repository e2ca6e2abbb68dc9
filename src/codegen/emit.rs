// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Producer side of the record pipeline.
//!
//! Each feature producer owns an [`Emitter`]. Fragments, import hints and
//! method signatures travel to the coordinator as [`Message`]s on a single
//! channel; [`Emitter::finish`] sends the producer's final result and drops
//! its sender, which is how the coordinator knows the producer is done.
//!
//! Everything sent is plain text. Token streams are rendered before they
//! leave the producer thread.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{Sender, SyncSender}
};

use proc_macro2::TokenStream;
use quote::quote;
use syn::Visibility;

use super::Feature;
use crate::error::{Error, Result};

/// One unit of producer output.
#[derive(Debug)]
pub enum Message {
    /// A rendered code fragment.
    Fragment {
        /// Producing feature.
        feature: Feature,
        /// Rendered tokens.
        text:    String
    },

    /// A short name the fragment needs in scope.
    Import {
        /// Producing feature.
        feature: Feature,
        /// Short name.
        hint:    String
    },

    /// A store method the fragment defines.
    Method {
        /// Producing feature.
        feature:   Feature,
        /// Method name.
        name:      String,
        /// Rendered `fn` signature.
        signature: String
    },

    /// The producer finished.
    Done {
        /// Producing feature.
        feature: Feature,
        /// Its outcome.
        result:  Result<()>
    }
}

/// Sending half of the coordinator channel.
#[derive(Debug, Clone)]
pub enum Outbox {
    /// Bounded queue; producers block when the coordinator lags.
    Bounded(SyncSender<Message>),
    /// Unbounded queue for inline producers.
    Unbounded(Sender<Message>)
}

impl Outbox {
    fn send(&self, message: Message) -> Result<()> {
        let sent = match self {
            Self::Bounded(tx) => tx.send(message).is_ok(),
            Self::Unbounded(tx) => tx.send(message).is_ok()
        };
        if sent { Ok(()) } else { Err(Error::closed()) }
    }
}

/// Output handle of one feature producer.
pub struct Emitter<'a> {
    feature: Feature,
    outbox:  Outbox,
    cancel:  &'a AtomicBool
}

impl<'a> Emitter<'a> {
    /// Create an emitter for `feature`.
    pub fn new(feature: Feature, outbox: Outbox, cancel: &'a AtomicBool) -> Self {
        Self {
            feature,
            outbox,
            cancel
        }
    }

    /// Send a code fragment.
    ///
    /// # Errors
    ///
    /// [`Error::Emit`] when the record was cancelled or the coordinator is
    /// gone.
    pub fn fragment(&self, tokens: TokenStream) -> Result<()> {
        self.send(Message::Fragment {
            feature: self.feature,
            text:    tokens.to_string()
        })
    }

    /// Declare short names the fragments need.
    pub fn imports<'h>(&self, hints: impl IntoIterator<Item = &'h String>) -> Result<()> {
        for hint in hints {
            self.import(hint)?;
        }
        Ok(())
    }

    /// Declare one short name.
    pub fn import(&self, hint: &str) -> Result<()> {
        self.send(Message::Import {
            feature: self.feature,
            hint:    hint.to_owned()
        })
    }

    /// Declare a store method and return its definition.
    ///
    /// `signature` is the `fn name(&self, ...) -> ...` part; the returned
    /// tokens prepend `vis` and append `body`.
    pub fn method(
        &self,
        name: &str,
        vis: &Visibility,
        signature: TokenStream,
        body: TokenStream
    ) -> Result<TokenStream> {
        self.send(Message::Method {
            feature:   self.feature,
            name:      name.to_owned(),
            signature: signature.to_string()
        })?;
        Ok(quote! { #vis #signature #body })
    }

    /// Report the producer's result and close its side of the channel.
    pub fn finish(self, result: Result<()>) {
        let _ = self.outbox.send(Message::Done {
            feature: self.feature,
            result
        });
    }

    fn send(&self, message: Message) -> Result<()> {
        if self.cancel.load(Ordering::Acquire) {
            return Err(Error::closed());
        }
        self.outbox.send(message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn messages_carry_the_feature() {
        let cancel = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel();
        let emitter = Emitter::new(Feature::Queryable, Outbox::Unbounded(tx), &cancel);
        emitter.import("NaiveDate").unwrap();
        emitter.fragment(quote! { struct A; }).unwrap();
        emitter.finish(Ok(()));

        let messages: Vec<_> = rx.iter().collect();
        assert_eq!(messages.len(), 3);
        assert!(matches!(
            &messages[0],
            Message::Import { feature: Feature::Queryable, hint } if hint == "NaiveDate"
        ));
        assert!(matches!(&messages[2], Message::Done { result: Ok(()), .. }));
    }

    #[test]
    fn cancelled_emitter_refuses_output() {
        let cancel = AtomicBool::new(true);
        let (tx, _rx) = mpsc::channel();
        let emitter = Emitter::new(Feature::Blueprint, Outbox::Unbounded(tx), &cancel);
        assert!(matches!(emitter.import("X"), Err(Error::Emit(_))));
    }

    #[test]
    fn method_returns_full_definition() {
        let cancel = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel();
        let emitter = Emitter::new(Feature::Deleteable, Outbox::Unbounded(tx), &cancel);
        let vis: Visibility = syn::parse_quote!(pub);
        let tokens = emitter
            .method("run", &vis, quote! { fn run(&self) }, quote! { {} })
            .unwrap();
        assert_eq!(tokens.to_string(), quote! { pub fn run(&self) {} }.to_string());
        drop(emitter);
        assert!(matches!(
            rx.recv().unwrap(),
            Message::Method { ref name, .. } if name == "run"
        ));
    }
}
