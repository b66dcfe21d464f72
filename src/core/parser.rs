/// Shorthand query parser
///
/// Turns free-form schedule shorthand (次のガチマ, エリア20, 19時の
/// ナワバリ, ...) into a structured SearchQuery. Parsing is total:
/// text the grammar doesn't recognize yields the "ignore" sentinel
/// instead of an error.

use crate::core::mode::{get_mode, Mode, RuleKey};
use regex::Regex;
use std::sync::LazyLock;

/// Structured intent extracted from one shorthand command.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// The substring the grammar actually consumed. Empty means the
    /// text was not a command and should be ignored.
    pub original_text: String,
    /// Net hop count from 次の/前の tokens. `None` when neither token
    /// occurred, which is distinct from an explicit zero (次の前の).
    pub relative_offset: Option<i32>,
    /// Requested start hour, from the 時の prefix or a trailing bare
    /// number. Wins over `relative_offset` at resolution time.
    pub absolute_hour: Option<u32>,
    pub mode: Mode,
    pub rule: Option<RuleKey>,
}

impl SearchQuery {
    /// Sentinel for text that matched no part of the grammar.
    pub fn ignored() -> SearchQuery {
        SearchQuery {
            original_text: String::new(),
            relative_offset: None,
            absolute_hour: None,
            mode: get_mode(""),
            rule: None,
        }
    }

    /// True when the text was not a command at all.
    pub fn should_ignore(&self) -> bool {
        self.original_text.is_empty()
    }
}

const FORWARD_TOKEN: &str = "次の";
const BACK_TOKEN: &str = "前の";

// <command> := [次の|前の]* [<hour> 時の] <phrase> [<hour>]
// <phrase>  := <mode-alias> | <mode-alias><rule-alias> | <rule-alias>
//
// Alternation order matters twice over: longer aliases must come
// before their prefixes (ガチマッチ before ガチマ before ガチ,
// ホコバトル before ホコ), and the catch-all branch that can match
// the empty string must come last so real phrases win.
static QUERY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<rel>(次の|前の)*)",
        r"((?P<hpre>\d{1,2}) ?時の)?",
        r"(?P<phrase>ナワバリ(バトル)?",
        r"|レギュラー(マッチ)?",
        r"|サーモンラン|サーモン|シャケ|鮭",
        r"|(ガチマッチ|ガチマ|ガチ|リグマ",
        r"|(リーグ|バンカラ|バカマ|オープン|チャレンジ|エックス|[Xx])( ?マッチ)?",
        r")?(ガチ)?(?P<rule>エリア|ホコバトル|ホコ|ヤグラ|アサリ)?",
        r") ?(?P<htail>\d{1,2})?",
    ))
    .expect("query grammar pattern is valid")
});

/// Ordered-prefix alias table for modes. First hit wins, so the more
/// specific alias of a family has to sit above the general one.
const MODE_ALIASES: &[(&str, &str)] = &[
    ("ガチマ", "CHALLENGE"),
    ("チャレンジ", "CHALLENGE"),
    ("リグマ", "OPEN"),
    ("リーグ", "OPEN"),
    ("オープン", "OPEN"),
    ("レギュラー", "REGULAR"),
    ("バンカラ", "BANKARA"),
    ("バカマ", "BANKARA"),
    ("サーモン", "SALMON"),
    ("シャケ", "SALMON"),
    ("鮭", "SALMON"),
    ("エックス", "X"),
    ("X", "X"),
    ("x", "X"),
];

/// Ordered-prefix alias table for rules. ホコ also covers ホコバトル.
const RULE_ALIASES: &[(&str, RuleKey)] = &[
    ("エリア", RuleKey::Area),
    ("ホコ", RuleKey::Goal),
    ("ヤグラ", RuleKey::Loft),
    ("アサリ", RuleKey::Clam),
];

fn mode_identifier_for(phrase: &str) -> &'static str {
    for (alias, identifier) in MODE_ALIASES.iter().copied() {
        if phrase.starts_with(alias) {
            return identifier;
        }
    }
    ""
}

fn rule_for_alias(alias: &str) -> Option<RuleKey> {
    RULE_ALIASES
        .iter()
        .find(|(prefix, _)| alias.starts_with(prefix))
        .map(|(_, rule)| *rule)
}

/// Parse one shorthand command.
///
/// Never fails. Unrecognized text returns the ignore sentinel, and a
/// numeric field that doesn't parse degrades to unspecified.
pub fn parse(input: &str) -> SearchQuery {
    let Some(caps) = QUERY_PATTERN.captures(input) else {
        return SearchQuery::ignored();
    };

    let original_text = caps.get(0).map_or("", |m| m.as_str()).to_string();

    let rel_text = caps.name("rel").map_or("", |m| m.as_str());
    let forward = rel_text.matches(FORWARD_TOKEN).count() as i32;
    let back = rel_text.matches(BACK_TOKEN).count() as i32;
    let relative_offset = if forward > 0 || back > 0 {
        Some(forward - back)
    } else {
        None
    };

    // The dedicated 時の capture wins over the trailing bare number.
    let absolute_hour = caps
        .name("hpre")
        .or_else(|| caps.name("htail"))
        .and_then(|m| m.as_str().parse::<u32>().ok());

    let phrase = caps.name("phrase").map_or("", |m| m.as_str());
    let rule = if phrase.starts_with("ナワバリ") {
        Some(RuleKey::TurfWar)
    } else {
        caps.name("rule").and_then(|m| rule_for_alias(m.as_str()))
    };

    let mut identifier = mode_identifier_for(phrase);
    if identifier.is_empty() {
        // A bare rule phrase searches both ranked queues, except turf
        // war, which stays modeless until the engine maps it to the
        // regular queue.
        if matches!(rule, Some(r) if r != RuleKey::TurfWar) {
            identifier = "BANKARA";
        }
    }

    SearchQuery {
        original_text,
        relative_offset,
        absolute_hour,
        mode: get_mode(identifier),
        rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        text: &str,
        relative_offset: Option<i32>,
        absolute_hour: Option<u32>,
        identifier: &str,
        rule: Option<RuleKey>,
    ) -> SearchQuery {
        SearchQuery {
            original_text: text.to_string(),
            relative_offset,
            absolute_hour,
            mode: get_mode(identifier),
            rule,
        }
    }

    #[test]
    fn test_unrelated_text_is_ignored() {
        assert!(parse("こんにちは").should_ignore());
        assert!(parse("hello world").should_ignore());
        assert!(parse("").should_ignore());
    }

    #[test]
    fn test_relative_token_counting() {
        assert_eq!(parse("次のガチマ").relative_offset, Some(1));
        assert_eq!(parse("前のガチマ").relative_offset, Some(-1));
        assert_eq!(parse("次の次のガチマ").relative_offset, Some(2));
        assert_eq!(parse("次の前の次のガチマ").relative_offset, Some(1));
    }

    #[test]
    fn test_explicit_zero_offset_differs_from_unspecified() {
        // One forward, one back: the user did say something about time.
        assert_eq!(parse("次の前のガチマ").relative_offset, Some(0));
        assert_eq!(parse("ガチマ").relative_offset, None);
    }

    #[test]
    fn test_mode_aliases() {
        let cases = [
            ("ガチマ", "CHALLENGE"),
            ("ガチマッチ", "CHALLENGE"),
            ("チャレンジ", "CHALLENGE"),
            ("チャレンジマッチ", "CHALLENGE"),
            ("リグマ", "OPEN"),
            ("リーグ", "OPEN"),
            ("リーグマッチ", "OPEN"),
            ("オープン", "OPEN"),
            ("オープンマッチ", "OPEN"),
            ("レギュラー", "REGULAR"),
            ("レギュラーマッチ", "REGULAR"),
            ("バンカラ", "BANKARA"),
            ("バンカラマッチ", "BANKARA"),
            ("バカマ", "BANKARA"),
            ("サーモンラン", "SALMON"),
            ("サーモン", "SALMON"),
            ("シャケ", "SALMON"),
            ("鮭", "SALMON"),
            ("エックス", "X"),
            ("エックスマッチ", "X"),
            ("Xマッチ", "X"),
            ("xマッチ", "X"),
            ("X マッチ", "X"),
            ("x マッチ", "X"),
            // ナワバリ is a rule phrase, not a mode alias.
            ("ナワバリ", ""),
            ("ナワバリバトル", ""),
            // A bare ガチ prefix names no mode by itself.
            ("ガチヤグラ", ""),
        ];
        for (phrase, want) in cases {
            assert_eq!(mode_identifier_for(phrase), want, "phrase {}", phrase);
        }
    }

    #[test]
    fn test_rule_aliases() {
        assert_eq!(rule_for_alias("エリア"), Some(RuleKey::Area));
        assert_eq!(rule_for_alias("ホコ"), Some(RuleKey::Goal));
        assert_eq!(rule_for_alias("ホコバトル"), Some(RuleKey::Goal));
        assert_eq!(rule_for_alias("ヤグラ"), Some(RuleKey::Loft));
        assert_eq!(rule_for_alias("アサリ"), Some(RuleKey::Clam));
        assert_eq!(rule_for_alias("バトル"), None);
    }

    #[test]
    fn test_parse_full_queries() {
        let cases = [
            ("ガチマ", query("ガチマ", None, None, "CHALLENGE", None)),
            (
                "次の次の前の次の次のガチマッチ",
                query(
                    "次の次の前の次の次のガチマッチ",
                    Some(3),
                    None,
                    "CHALLENGE",
                    None,
                ),
            ),
            ("次のガチマ", query("次のガチマ", Some(1), None, "CHALLENGE", None)),
            (
                "次のオープンマッチ",
                query("次のオープンマッチ", Some(1), None, "OPEN", None),
            ),
            (
                "ガチマアサリ",
                query("ガチマアサリ", None, None, "CHALLENGE", Some(RuleKey::Clam)),
            ),
            (
                "次のリグマヤグラ",
                query("次のリグマヤグラ", Some(1), None, "OPEN", Some(RuleKey::Loft)),
            ),
            (
                "次のナワバリバトル",
                query(
                    "次のナワバリバトル",
                    Some(1),
                    None,
                    "",
                    Some(RuleKey::TurfWar),
                ),
            ),
            (
                "エリア20",
                query("エリア20", None, Some(20), "BANKARA", Some(RuleKey::Area)),
            ),
            (
                "19 時のガチマッチ",
                query("19 時のガチマッチ", None, Some(19), "CHALLENGE", None),
            ),
            ("ガチマ 20", query("ガチマ 20", None, Some(20), "CHALLENGE", None)),
            (
                "次のエリア",
                query("次のエリア", Some(1), None, "BANKARA", Some(RuleKey::Area)),
            ),
            (
                "次のガチヤグラ",
                query("次のガチヤグラ", Some(1), None, "BANKARA", Some(RuleKey::Loft)),
            ),
            (
                "次のガチマヤグラ",
                query(
                    "次のガチマヤグラ",
                    Some(1),
                    None,
                    "CHALLENGE",
                    Some(RuleKey::Loft),
                ),
            ),
            ("シャケ", query("シャケ", None, None, "SALMON", None)),
            (
                "次のサーモンラン",
                query("次のサーモンラン", Some(1), None, "SALMON", None),
            ),
            (
                "ナワバリバトル",
                query("ナワバリバトル", None, None, "", Some(RuleKey::TurfWar)),
            ),
            (
                "次のレギュラーマッチ",
                query("次のレギュラーマッチ", Some(1), None, "REGULAR", None),
            ),
            (
                "次のエックスマッチ",
                query("次のエックスマッチ", Some(1), None, "X", None),
            ),
            (
                "次の次のエックスマッチガチホコバトル",
                query(
                    "次の次のエックスマッチガチホコバトル",
                    Some(2),
                    None,
                    "X",
                    Some(RuleKey::Goal),
                ),
            ),
            (
                "Xマッチアサリ",
                query("Xマッチアサリ", None, None, "X", Some(RuleKey::Clam)),
            ),
            (
                "x マッチガチエリア",
                query("x マッチガチエリア", None, None, "X", Some(RuleKey::Area)),
            ),
        ];
        for (input, want) in cases {
            assert_eq!(parse(input), want, "input {}", input);
        }
    }

    #[test]
    fn test_hour_prefix_wins_over_trailing_number() {
        let parsed = parse("19 時のガチマッチ20");
        assert_eq!(parsed.absolute_hour, Some(19));
    }

    #[test]
    fn test_hour_and_offset_can_coexist() {
        let parsed = parse("次のエリア20");
        assert_eq!(parsed.relative_offset, Some(1));
        assert_eq!(parsed.absolute_hour, Some(20));
        assert_eq!(parsed.rule, Some(RuleKey::Area));
    }
}
