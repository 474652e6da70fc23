//! Pattern cascade matcher.
//!
//! Each title family owns an ordered rule table. Rules are tried strictly
//! in table order against the simplified title; the first rule whose
//! pattern matches and whose extractor accepts the captures wins, and
//! evaluation stops. There is no scoring and no backtracking across rules.
//! An extractor may refuse a syntactic match (conflicting seasons in a
//! multi-part title, an air date that is not a real calendar date), which
//! sends evaluation on to the next rule.
//!
//! The tables live in [`episode`] and [`album`]; order in those tables is
//! part of the contract.

pub(crate) mod album;
pub(crate) mod episode;

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::normalize::{self, strip_request_info, NormalizedTitle};

static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// The two title families with a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFamily {
    Episode,
    Album,
}

/// Everything a single cascade rule can pull out of a title.
///
/// `title` is always present and may be empty for titleless forms; the
/// `Option` fields distinguish absent from empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Series or artist title segment, cleaned. Empty for titleless rules.
    pub title: String,
    /// Artist name, album family only.
    pub artist: Option<String>,
    /// Album title, album family only.
    pub album: Option<String>,
    /// Bracketed anime subgroup.
    pub subgroup: Option<String>,
    /// 8-character release hash, brackets stripped.
    pub hash: Option<String>,
    pub season: Option<i32>,
    /// Season episode numbers, capture order, de-duplicated.
    pub episodes: Vec<i32>,
    /// Anime absolute episode numbers, capture order, de-duplicated.
    pub absolute_episodes: Vec<i32>,
    pub air_year: Option<i32>,
    pub air_month: Option<i32>,
    pub air_day: Option<i32>,
    /// Album release year.
    pub year: Option<i32>,
    /// Special, OVA or extras release.
    pub special: bool,
    /// Season-only release without episode markers.
    pub full_season: bool,
}

/// Capture handler of one rule. Receives the whole haystack because some
/// rules have to inspect the text right after the match span.
pub(crate) type Extract = fn(&Captures<'_>, &str) -> Option<ExtractionResult>;

pub(crate) struct Rule {
    pattern: Regex,
    extract: Extract,
}

impl Rule {
    /// Panics on a malformed pattern; every pattern is a table literal
    /// exercised by the test suite.
    pub(crate) fn new(pattern: &str, extract: Extract) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            extract,
        }
    }
}

/// Normalize a raw title and run it through one family's cascade.
///
/// `None` means the title was rejected by validation or no rule accepted
/// it.
///
/// # Example
///
/// ```
/// use ongaku_parse::cascade::{parse_title, TitleFamily};
///
/// let result = parse_title("Series.Name.S01E05.mp3", TitleFamily::Episode).unwrap();
/// assert_eq!(result.title, "Series Name");
/// assert_eq!(result.season, Some(1));
/// assert_eq!(result.episodes, vec![5]);
/// ```
pub fn parse_title(raw: &str, family: TitleFamily) -> Option<ExtractionResult> {
    let normalized = normalize::normalize(raw).ok()?;
    match_title(&normalized, family)
}

/// Cascade over an already normalized title.
pub(crate) fn match_title(
    normalized: &NormalizedTitle,
    family: TitleFamily,
) -> Option<ExtractionResult> {
    let rules: &[Rule] = match family {
        TitleFamily::Episode => &episode::RULES,
        TitleFamily::Album => &album::RULES,
    };

    let haystack = normalized.simple_title.as_str();
    for (index, rule) in rules.iter().enumerate() {
        let Some(caps) = rule.pattern.captures(haystack) else {
            continue;
        };
        if let Some(result) = (rule.extract)(&caps, haystack) {
            tracing::trace!(index, title = haystack, "cascade rule matched");
            return Some(result);
        }
    }

    tracing::debug!(title = haystack, ?family, "no cascade rule matched");
    None
}

// ── Shared capture helpers ──────────────────────────────────────────────

/// All digit runs in a cluster capture, in order. The regex engine only
/// retains the last repeated capture, so repeating groups capture the
/// whole cluster and the runs are scanned out here.
pub(crate) fn digit_runs(text: &str) -> Vec<i32> {
    RE_DIGITS
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Series/artist title canonicalization shared by all extractors.
pub(crate) fn clean_title(raw: &str) -> String {
    let title = raw.replace(['.', '_'], " ");
    strip_request_info(&title).trim_matches(' ').to_string()
}

/// Named capture parsed as a number, `None` when absent or not numeric.
pub(crate) fn group_i32(caps: &Captures<'_>, name: &str) -> Option<i32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

/// Release hash from the `hash`/`hashb` capture. Brackets are stripped and
/// the resolution literal some groups put in that slot is not a hash.
pub(crate) fn release_hash(caps: &Captures<'_>) -> Option<String> {
    let hash = caps.name("hash").or_else(|| caps.name("hashb"))?;
    let hash = hash.as_str().trim_matches(['[', ']']);
    if hash.is_empty() || hash == "1280x720" {
        return None;
    }
    Some(hash.to_string())
}
