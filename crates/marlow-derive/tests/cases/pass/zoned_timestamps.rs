// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, FixedOffset, Local, Utc};
use marlow_derive::Marlow;

#[derive(Debug, Clone, Default, Marlow)]
#[marlow = "tableName=events"]
pub struct Event {
    #[marlow = "column=id&autoIncrement=true"]
    pub id: i64,

    #[marlow = "column=at"]
    pub at: Option<DateTime<FixedOffset>>,

    #[marlow = "column=seen"]
    pub seen: Option<DateTime<Local>>,

    #[marlow = "column=stored"]
    pub stored: Option<DateTime<Utc>>,
}

fn main() {
    let blueprint = EventBlueprint {
        at: Some(vec![None]),
        ..Default::default()
    };
    assert_eq!(blueprint.to_string(), "WHERE events.at IS NULL");

    let _ = EventStore::<Box<dyn marlow_core::Connection>>::find_events;
    let _ = EventStore::<Box<dyn marlow_core::Connection>>::update_event_at;
    let _ = EventStore::<Box<dyn marlow_core::Connection>>::select_seens;
}
