/// Mode and rule registries
///
/// Closed tables mapping the stable mode/rule identifiers to display
/// descriptors. Lookup never fails: identifiers the tables don't know
/// come back with an empty display name and the identifier preserved.

use serde::{Deserialize, Serialize};

/// Stable identifier for a schedule mode.
///
/// `Bankara` and `ByRule` are query-time directives that fan out to a
/// set of concrete modes inside the search engine. They never name a
/// schedule bucket of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeId {
    Regular,
    Challenge,
    Open,
    X,
    Salmon,
    /// Fan out to Challenge + Open.
    Bankara,
    /// Fan out to Challenge + Open + X.
    ByRule,
    /// Anything else, identifier preserved for later branching. The
    /// empty string is the "no mode" case bare rule phrases carry.
    Other(String),
}

impl ModeId {
    /// Resolve an identifier string. Total; unknown strings land in
    /// `Other` unchanged.
    pub fn from_identifier(identifier: &str) -> ModeId {
        match identifier {
            "REGULAR" => ModeId::Regular,
            "CHALLENGE" => ModeId::Challenge,
            "OPEN" => ModeId::Open,
            "X" => ModeId::X,
            "SALMON" => ModeId::Salmon,
            "BANKARA" => ModeId::Bankara,
            "BYRULE" => ModeId::ByRule,
            other => ModeId::Other(other.to_string()),
        }
    }

    /// The identifier string this id was resolved from.
    pub fn as_str(&self) -> &str {
        match self {
            ModeId::Regular => "REGULAR",
            ModeId::Challenge => "CHALLENGE",
            ModeId::Open => "OPEN",
            ModeId::X => "X",
            ModeId::Salmon => "SALMON",
            ModeId::Bankara => "BANKARA",
            ModeId::ByRule => "BYRULE",
            ModeId::Other(identifier) => identifier,
        }
    }
}

/// Display descriptor for a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub id: ModeId,
    pub display_name: &'static str,
    /// Embed accent color, 0xRRGGBB.
    pub color: u32,
}

/// The renderable modes. Composites and unknowns are deliberately
/// absent so they resolve with an empty display name.
const MODE_TABLE: &[(ModeId, &str, u32)] = &[
    (ModeId::Regular, "レギュラーマッチ", 0xCFF622),
    (ModeId::Challenge, "バンカラマッチ（チャレンジ）", 0xF54910),
    (ModeId::Open, "バンカラマッチ（オープン）", 0xF54910),
    (ModeId::X, "Xマッチ", 0x0FDB9B),
    (ModeId::Salmon, "サーモンラン", 0xFF5600),
];

/// Look up the display descriptor for an identifier string.
///
/// Never fails. Unknown identifiers produce a Mode with an empty
/// display name and the identifier kept intact.
pub fn get_mode(identifier: &str) -> Mode {
    mode_for(ModeId::from_identifier(identifier))
}

/// Look up the display descriptor for an already-resolved id.
pub fn mode_for(id: ModeId) -> Mode {
    for (known, display_name, color) in MODE_TABLE {
        if known == &id {
            return Mode {
                id,
                display_name: *display_name,
                color: *color,
            };
        }
    }
    Mode {
        id,
        display_name: "",
        color: 0,
    }
}

/// Key of the rule played within a slot, matching the upstream key
/// strings exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKey {
    Area,
    Goal,
    Loft,
    Clam,
    TurfWar,
}

impl RuleKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKey::Area => "AREA",
            RuleKey::Goal => "GOAL",
            RuleKey::Loft => "LOFT",
            RuleKey::Clam => "CLAM",
            RuleKey::TurfWar => "TURF_WAR",
        }
    }

    /// Parse an upstream key string. Unknown keys are `None`.
    pub fn from_key(key: &str) -> Option<RuleKey> {
        match key {
            "AREA" => Some(RuleKey::Area),
            "GOAL" => Some(RuleKey::Goal),
            "LOFT" => Some(RuleKey::Loft),
            "CLAM" => Some(RuleKey::Clam),
            "TURF_WAR" => Some(RuleKey::TurfWar),
            _ => None,
        }
    }
}
