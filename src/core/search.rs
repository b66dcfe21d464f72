/// Search engine
///
/// Resolves a SearchQuery against a schedule snapshot and a "now"
/// instant. Pure computation: no locking, no I/O, no error return.
/// Every input, however contradictory, produces a well-formed result.

use crate::core::mode::{mode_for, Mode, ModeId, RuleKey};
use crate::core::parser::SearchQuery;
use crate::schedule::models::{ScheduleIndex, TimeSlot};
use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Schedule timestamps are published in JST. Rotations flip on odd
/// hours of that clock regardless of where the process runs.
const SOURCE_UTC_OFFSET_HOURS: i32 = 9;

fn source_timezone() -> FixedOffset {
    FixedOffset::east_opt(SOURCE_UTC_OFFSET_HOURS * 3600).expect("fixed source offset is in range")
}

/// Outcome of one search: the query it answered, whether anything
/// matched, and one (mode, slot) pair per scanned mode in fan-out
/// order. An absent slot means that mode had no match.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub query: SearchQuery,
    pub found: bool,
    pub slots: Vec<(Mode, Option<TimeSlot>)>,
}

/// Resolve a query against a schedule snapshot.
///
/// Strategy selection: Salmon-Run addressing when the mode is SALMON,
/// otherwise rule search when a rule is present, otherwise time search.
///
/// # Arguments
/// * `query` - Parsed intent to resolve
/// * `index` - Immutable schedule snapshot to read
/// * `now` - Instant the relative time math anchors on
///
/// # Returns
/// * A well-formed `SearchResult`, whatever the input was
pub fn search(query: &SearchQuery, index: &ScheduleIndex, now: DateTime<Utc>) -> SearchResult {
    if query.mode.id == ModeId::Salmon {
        return search_salmon(query, index);
    }
    if let Some(rule) = query.rule {
        return search_by_rule(query, rule, index);
    }
    search_by_time(query, index, now)
}

/// Rule search: per mode, skip the first `skip_count` non-festival
/// matches and return the next one.
fn search_by_rule(query: &SearchQuery, rule: RuleKey, index: &ScheduleIndex) -> SearchResult {
    let skip_count = match query.relative_offset {
        Some(n) if n >= 0 => n as usize,
        _ => 0,
    };

    let mut slots = Vec::new();
    for id in rule_search_targets(&query.mode.id, rule) {
        let matched = lookup_by_rule(index.slots(&id), rule, skip_count);
        slots.push((mode_for(id), matched.cloned()));
    }

    let found = slots.iter().any(|(_, slot)| slot.is_some());
    SearchResult {
        query: query.clone(),
        found,
        slots,
    }
}

/// Which concrete modes a rule search scans. Turf war only ever runs
/// in the regular queue, whatever mode the query asked for.
fn rule_search_targets(mode: &ModeId, rule: RuleKey) -> Vec<ModeId> {
    if rule == RuleKey::TurfWar {
        return vec![ModeId::Regular];
    }
    match mode {
        ModeId::Bankara => vec![ModeId::Challenge, ModeId::Open],
        ModeId::ByRule => vec![ModeId::Challenge, ModeId::Open, ModeId::X],
        other => vec![other.clone()],
    }
}

fn lookup_by_rule(slots: &[TimeSlot], rule: RuleKey, mut skip_count: usize) -> Option<&TimeSlot> {
    for slot in slots {
        if slot.is_fest {
            continue;
        }
        if slot.rule.key == rule.as_str() {
            if skip_count == 0 {
                return Some(slot);
            }
            skip_count -= 1;
        }
    }
    None
}

/// Time search: snap to the enclosing odd-hour slot start, apply the
/// relative hop if any, let an absolute hour override everything.
fn search_by_time(query: &SearchQuery, index: &ScheduleIndex, now: DateTime<Utc>) -> SearchResult {
    let base_hour = base_start_hour(query, now);

    let targets = match &query.mode.id {
        ModeId::Bankara => vec![ModeId::Challenge, ModeId::Open],
        other => vec![other.clone()],
    };

    let mut slots = Vec::new();
    for id in targets {
        let matched = lookup_by_start_hour(index.slots(&id), base_hour);
        slots.push((mode_for(id), matched.cloned()));
    }

    let found = slots.iter().any(|(_, slot)| slot.is_some());
    SearchResult {
        query: query.clone(),
        found,
        slots,
    }
}

/// The slot-start hour a time query resolves to, always in [0, 23].
fn base_start_hour(query: &SearchQuery, now: DateTime<Utc>) -> u32 {
    let hour = now.with_timezone(&source_timezone()).hour() as i32;
    let mut base = odd_slot_start(hour);
    if let Some(offset) = query.relative_offset {
        base = (base + offset * 2).rem_euclid(24);
    }
    if let Some(hour) = query.absolute_hour {
        base = odd_slot_start(hour as i32);
    }
    base as u32
}

/// Snap an hour down to the odd hour its two-hour slot starts at.
fn odd_slot_start(hour: i32) -> i32 {
    (hour - (hour + 1).rem_euclid(2)).rem_euclid(24)
}

/// Matching is by hour of day only, not full timestamp. The snapshot
/// horizon is assumed to hold at most one non-festival slot starting
/// at any given hour; the first hit wins.
fn lookup_by_start_hour(slots: &[TimeSlot], hour: u32) -> Option<&TimeSlot> {
    slots
        .iter()
        .find(|slot| !slot.is_fest && slot.start_time.hour() == hour)
}

/// Salmon-Run addressing: rotations span days, so the offset picks a
/// position in the sequence instead of a time of day. Out-of-range
/// and negative offsets are not-found, never an error.
fn search_salmon(query: &SearchQuery, index: &ScheduleIndex) -> SearchResult {
    let offset = query.relative_offset.unwrap_or(0);
    let matched = usize::try_from(offset)
        .ok()
        .and_then(|position| index.salmon.get(position));
    SearchResult {
        query: query.clone(),
        found: matched.is_some(),
        slots: vec![(query.mode.clone(), matched.cloned())],
    }
}
