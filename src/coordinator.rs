// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Record coordinator.
//!
//! Fans one record out to its enabled feature producers and gathers their
//! output:
//!
//! ```text
//!              ┌─ createable ─┐
//! RecordModel ─┼─ updateable ─┼─► channel ─► coordinator ─► RecordOutput
//!              ├─ ...         │
//!              └─ blueprint  ─┘
//! ```
//!
//! Producers share one channel. The coordinator drains it until every
//! sender is gone, which doubles as the join barrier. Fragments land in a
//! per-feature buffer and are concatenated in [`Feature::ORDER`], so the
//! output does not depend on scheduling.
//!
//! The first producer error wins: the coordinator raises the cancel flag,
//! later producers fail their next send, and their errors are dropped.

use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver}
    },
    thread
};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{
    codegen::{Context, Emitter, Feature, Message, Outbox},
    config::{Config, Schedule},
    error::{Error, Result},
    model::RecordModel,
    store
};

/// Messages buffered before producers block.
const CHANNEL_CAPACITY: usize = 64;

const FEATURE_COUNT: usize = Feature::ORDER.len();

/// Generated code of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutput {
    /// Record name.
    pub name:    String,
    /// Emitted items.
    pub body:    RecordBody,
    /// Short names the items need in scope.
    pub imports: BTreeSet<String>
}

/// Body of a [`RecordOutput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBody {
    /// Every feature is switched off; nothing is emitted.
    Disabled,
    /// Rendered items: store, feature fragments, repository trait.
    Emitted(String)
}

/// Store methods in emission order; the first definition of a name wins.
pub type MethodTable = IndexMap<String, String>;

/// Generate the code of one record.
///
/// # Errors
///
/// The first producer error, or [`Error::Format`] when a generated name does
/// not parse.
pub fn generate_record(model: &RecordModel, config: &Config) -> Result<RecordOutput> {
    if model.features.is_empty() {
        debug!(target: "marlow.coordinator", record = %model.name, "all features disabled");
        return Ok(RecordOutput {
            name:    model.name.clone(),
            body:    RecordBody::Disabled,
            imports: BTreeSet::new()
        });
    }

    let enabled: Vec<Feature> = Feature::ORDER
        .into_iter()
        .filter(|feature| feature.is_enabled(model))
        .collect();
    if enabled.is_empty() {
        debug!(target: "marlow.coordinator", record = %model.name, "no columns, store only");
    }

    let mut collector = Collector::default();
    let cancel = AtomicBool::new(false);
    match config.schedule {
        Schedule::Sequential => {
            let (tx, rx) = mpsc::channel();
            for &feature in &enabled {
                let out = Emitter::new(feature, Outbox::Unbounded(tx.clone()), &cancel);
                if !run(feature, model, config, out) {
                    break;
                }
            }
            drop(tx);
            collector.drain(model, rx, &cancel)?;
        }
        Schedule::Threaded => {
            let (tx, rx) = mpsc::sync_channel(CHANNEL_CAPACITY);
            thread::scope(|scope| {
                for &feature in &enabled {
                    let out = Emitter::new(feature, Outbox::Bounded(tx.clone()), &cancel);
                    scope.spawn(move || run(feature, model, config, out));
                }
                drop(tx);
                collector.drain(model, rx, &cancel)
            })?;
        }
    }

    let ctx = Context::new(model, config)?;
    let methods = collector.methods(model);
    let mut items = vec![store::store_type(&ctx, methods.is_empty()).to_string()];
    items.extend(collector.fragments.into_iter().flatten());
    if let Some(repository) = store::repository(&ctx, &methods)? {
        items.push(repository.to_string());
    }

    debug!(
        target: "marlow.coordinator",
        record = %model.name,
        features = enabled.len(),
        methods = methods.len(),
        imports = collector.imports.len(),
        "record generated"
    );
    Ok(RecordOutput {
        name:    model.name.clone(),
        body:    RecordBody::Emitted(items.join("\n")),
        imports: collector.imports
    })
}

/// Body of one producer, on whatever thread runs it. Returns whether it
/// succeeded.
fn run(feature: Feature, model: &RecordModel, config: &Config, out: Emitter<'_>) -> bool {
    let result = Context::new(model, config).and_then(|ctx| feature.produce(&ctx, &out));
    let succeeded = result.is_ok();
    out.finish(result);
    succeeded
}

/// Output gathered from every producer of one record.
#[derive(Default)]
struct Collector {
    fragments: [Vec<String>; FEATURE_COUNT],
    methods:   [Vec<(String, String)>; FEATURE_COUNT],
    imports:   BTreeSet<String>
}

impl Collector {
    /// Receive until all producers are done; return the first error.
    fn drain(
        &mut self,
        model: &RecordModel,
        rx: Receiver<Message>,
        cancel: &AtomicBool
    ) -> Result<()> {
        let mut failure: Option<Error> = None;
        for message in rx {
            match message {
                Message::Fragment {
                    feature,
                    text
                } => self.fragments[feature.index()].push(text),
                Message::Import {
                    hint, ..
                } => {
                    self.imports.insert(hint);
                }
                Message::Method {
                    feature,
                    name,
                    signature
                } => self.methods[feature.index()].push((name, signature)),
                Message::Done {
                    feature,
                    result: Ok(())
                } => {
                    debug!(
                        target: "marlow.coordinator",
                        record = %model.name,
                        feature = feature.name(),
                        "producer finished"
                    );
                }
                Message::Done {
                    feature,
                    result: Err(err)
                } => {
                    if failure.is_some() {
                        debug!(
                            target: "marlow.coordinator",
                            record = %model.name,
                            feature = feature.name(),
                            error = %err,
                            "discarding error after cancellation"
                        );
                        continue;
                    }
                    warn!(
                        target: "marlow.coordinator",
                        record = %model.name,
                        feature = feature.name(),
                        error = %err,
                        "producer failed, cancelling record"
                    );
                    cancel.store(true, Ordering::Release);
                    failure = Some(err);
                }
            }
        }
        failure.map_or(Ok(()), Err)
    }

    fn methods(&self, model: &RecordModel) -> MethodTable {
        let mut table = MethodTable::new();
        for (name, signature) in self.methods.iter().flatten() {
            if table.contains_key(name) {
                debug!(
                    target: "marlow.coordinator",
                    record = %model.name,
                    method = %name,
                    "duplicate store method ignored"
                );
                continue;
            }
            table.insert(name.clone(), signature.clone());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scan;

    const AUTHOR: &str = r#"
pub struct Author {
    #[marlow = "tableName=authors"]
    table: (),
    #[marlow = "column=system_id&autoIncrement=true"]
    pub id: i64,
    #[marlow = "column=name"]
    pub name: String,
    #[marlow = "column=flags&bitmask=true"]
    pub flags: u8,
}
"#;

    fn model(source: &str) -> RecordModel {
        let unit = scan::scan("author.rs", source).unwrap();
        RecordModel::build(&unit.records[0], &unit.imports, &Config::default()).unwrap()
    }

    fn body(output: &RecordOutput) -> &str {
        match &output.body {
            RecordBody::Emitted(text) => text,
            RecordBody::Disabled => panic!("record was disabled")
        }
    }

    #[test]
    fn schedules_produce_identical_output() {
        let model = model(AUTHOR);
        let threaded = generate_record(&model, &Config::default()).unwrap();
        let sequential = generate_record(
            &model,
            &Config::default().with_schedule(Schedule::Sequential)
        )
        .unwrap();
        assert_eq!(threaded, sequential);
    }

    #[test]
    fn threaded_output_is_stable() {
        let model = model(AUTHOR);
        let first = generate_record(&model, &Config::default()).unwrap();
        for _ in 0..8 {
            assert_eq!(generate_record(&model, &Config::default()).unwrap(), first);
        }
    }

    #[test]
    fn fragments_follow_feature_order() {
        let output = generate_record(&model(AUTHOR), &Config::default()).unwrap();
        let text = body(&output);
        let position = |needle: &str| {
            text.find(needle)
                .unwrap_or_else(|| panic!("missing {needle}"))
        };
        assert!(position("struct AuthorStore") < position("fn create_authors"));
        assert!(position("fn create_authors") < position("fn update_author_name"));
        assert!(position("fn update_author_name") < position("fn delete_authors"));
        assert!(position("fn delete_authors") < position("fn find_authors"));
        assert!(position("fn find_authors") < position("struct AuthorBlueprint"));
        assert!(position("struct AuthorBlueprint") < position("trait AuthorRepository"));
    }

    #[test]
    fn imports_are_collected() {
        let output = generate_record(&model(AUTHOR), &Config::default()).unwrap();
        assert!(output.imports.contains("Author"));
    }

    #[test]
    fn disabled_record() {
        let source = AUTHOR.replace(
            "tableName=authors",
            "tableName=authors&queryable=false&createable=false&updateable=false&deleteable=false"
        );
        let output = generate_record(&model(&source), &Config::default()).unwrap();
        assert_eq!(output.body, RecordBody::Disabled);
        assert!(output.imports.is_empty());
    }

    #[test]
    fn record_without_columns_gets_store_only() {
        let output = generate_record(
            &model("pub struct Empty {\n    #[marlow = \"tableName=empties\"]\n    table: (),\n}\n"),
            &Config::default()
        )
        .unwrap();
        let text = body(&output);
        assert!(text.contains("struct EmptyStore"));
        assert!(!text.contains("EmptyBlueprint"));
        assert!(!text.contains("EmptyRepository"));
    }

    #[test]
    fn bad_runtime_path_fails_the_record() {
        let config = Config::default().with_runtime_crate("not a path");
        let result = generate_record(&model(AUTHOR), &config);
        assert!(matches!(result, Err(Error::Format { .. })));
    }

    #[test]
    fn first_defined_method_wins() {
        let mut collector = Collector::default();
        collector.methods[Feature::Createable.index()].push(("run".into(), "first".into()));
        collector.methods[Feature::Queryable.index()].push(("run".into(), "second".into()));
        let table = collector.methods(&model(AUTHOR));
        assert_eq!(table.len(), 1);
        assert_eq!(table["run"], "first");
    }
}
