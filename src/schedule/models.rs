/// Data models for schedule payloads
///
/// The serde layout mirrors the upstream API exactly, so one slot
/// type deserializes both the versus families and Salmon-Run (absent
/// fields are defaulted, matching the upstream payloads).

use crate::core::mode::ModeId;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One scheduled rotation window.
///
/// Versus slots carry a rule and a two-stage list; Salmon-Run slots
/// carry a single stage and a weapon lineup instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub rule: Rule,
    #[serde(default)]
    pub stages: Vec<Stage>,
    /// Festival slots are invisible to rule and time search.
    #[serde(default)]
    pub is_fest: bool,
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
}

/// Rule played within a slot, as the upstream names it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// The versus schedule families, keyed as the upstream keys them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersusSchedules {
    #[serde(default)]
    pub regular: Vec<TimeSlot>,
    #[serde(default)]
    pub bankara_challenge: Vec<TimeSlot>,
    #[serde(default)]
    pub bankara_open: Vec<TimeSlot>,
    #[serde(default, rename = "x")]
    pub x_match: Vec<TimeSlot>,
}

/// Immutable snapshot of every schedule family. The store swaps the
/// whole snapshot on refresh; searches only ever read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleIndex {
    pub versus: VersusSchedules,
    /// Position-ordered: Salmon-Run rotations span days, so they are
    /// addressed by index rather than time of day.
    pub salmon: Vec<TimeSlot>,
}

impl ScheduleIndex {
    /// Slot sequence for a concrete mode. Composite and unknown
    /// identifiers own no schedule bucket and yield an empty sequence.
    pub fn slots(&self, id: &ModeId) -> &[TimeSlot] {
        match id {
            ModeId::Regular => &self.versus.regular,
            ModeId::Challenge => &self.versus.bankara_challenge,
            ModeId::Open => &self.versus.bankara_open,
            ModeId::X => &self.versus.x_match,
            ModeId::Salmon => &self.salmon,
            _ => &[],
        }
    }
}
