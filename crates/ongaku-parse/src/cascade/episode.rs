//! Episode-family rule table.
//!
//! Ordered from most to least specific; overlapping anime forms keep their
//! historical positions because table order is the only disambiguation
//! between them. Dedicated extractors handle the forms where a plain
//! capture read is not enough: repeated season/episode blocks, compact
//! digit packs and air dates that need calendar validation.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use super::{clean_title, digit_runs, group_i32, release_hash, ExtractionResult, Rule};

/// One `SxxEyy` block inside a bare multi-part chain.
static RE_BARE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)S?(\d{1,2}|\d{4})((?:[ex]{1,2}\d{1,3})+)").unwrap());

/// One block inside a titled multi-part chain, dashed episode runs allowed.
static RE_TITLED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)S?(\d{1,2}|\d{4})((?:(?:[ex]|[-_. ]e){1,2}\d{1,3})+)").unwrap()
});

/// One block of a single-digit episode chain.
static RE_DIGIT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)S?(\d{1,2})((?:(?:-|[ex]){1,2}\d)+)").unwrap());

/// Another date-like component right after a matched span.
static RE_DATE_CONTINUES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W+[0-3][0-9]").unwrap());

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

pub(crate) static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Multi-part without a title: S01E05.S01E06
        Rule::new(
            r"(?i)^\W*S?(?<chain>(?:\d{1,2}|\d{4})(?:[ex]{1,2}\d{1,3})+(?:(?:\W+S?|S)(?:\d{1,2}|\d{4})(?:[ex]{1,2}\d{1,3})+)+)(?:\D|$)",
            extract_bare_chain,
        ),
        // Without a title, single and multi: S01E05, 1x05, S01E04E05
        Rule::new(
            r"(?i)^S?(?<season>\d{1,2}|\d{4})(?<eps>(?:(?:-|[ex]|\W[ex]|_){1,2}\d{2,3})+)(?:\D|$)",
            extract_standard,
        ),
        // Anime: [SubGroup] Title Episode NN, optional bracketed hash
        Rule::new(
            r"(?i)^\[(?<subgroup>.+?)\][-_. ]?(?<title>.+?)[-_. ]Episode(?<abs>(?:[-_. ]+\d{2,3})+)(?:(?<hash>\[.{8}\])|\D|$)",
            extract_standard,
        ),
        // Anime: [SubGroup] Title NNN SxxEyy, absolute before the season block
        Rule::new(
            r"(?i)^\[(?<subgroup>.+?)\](?:_|-|\s|\.)?(?<title>.+?)(?<abs>(?:[-_\W&&[^()\[!]]+\d{2,3})+)(?:_|-|\s|\.)+S?(?<season>\d{1,2})(?<eps>(?:(?:-|[ex]|\W[ex]){1,2}\d{2})+)(?:$|(?<hash>[(\[]\w{8}[)\]])(?:$|\.)|[^0-9].*?(?<hashb>[(\[]\w{8}[)\]])?(?:$|\.))",
            extract_standard,
        ),
        // Anime: [SubGroup] Title SxxEyy NNN, absolute after the season block
        Rule::new(
            r"(?i)^\[(?<subgroup>.+?)\](?:_|-|\s|\.)?(?<title>.+?)[-_\W&&[^()\[!]]+S?(?<season>\d{1,2})(?<eps>(?:(?:-|[ex]|\W[ex]){1,2}\d{2})+)(?<abs>(?:(?:_|-|\s|\.)+\d{2,3})+)(?:$|(?<hash>\[\w{8}\])(?:$|\.)|[^0-9].*?(?<hashb>\[\w{8}\])?(?:$|\.))",
            extract_standard,
        ),
        // Anime: [SubGroup] Title SxxEyy
        Rule::new(
            r"(?i)^\[(?<subgroup>.+?)\](?:_|-|\s|\.)?(?<title>.+?)[-_\W&&[^()\[!]]+S?(?<season>\d{1,2})(?<eps>(?:(?:[ex]|\W[ex]){1,2}\d{2})+)(?:\s|\.).*?(?<hash>\[\w{8}\])?(?:$|\.)",
            extract_standard,
        ),
        // Anime: [SubGroup] Title-ending-in-number NNN
        Rule::new(
            r"(?i)^\[(?<subgroup>.+?)\][-_. ]?(?<title>[^-]+?\d+?)(?<abs>[-_. ]+\d{3}(?:[-_. ]\d{3})*)(?:[-_. ]+(?<special>special|ova|ovd))?(?:$|(?<hash>\[\w{8}\])(?:$|\.mkv)|[^0-9].*?(?<hashb>\[\w{8}\])?(?:$|\.mkv))",
            extract_standard,
        ),
        // Anime: [SubGroup] Title - NNN, dash-separated absolute
        Rule::new(
            r"(?i)^\[(?<subgroup>.+?)\][-_. ]?(?<title>.+?)(?<abs>(?:[. ]-[. ]\d{2,3})+)(?:[_. ][-_. ]*(?<special>special|ova|ovd))?(?:$|(?<hash>\[\w{8}\])(?:$|\.mkv)|[^0-9-].*?(?<hashb>\[\w{8}\])?(?:$|\.mkv))",
            extract_standard,
        ),
        // Anime: [SubGroup] Title NNN, optionally parenthesized
        Rule::new(
            r"(?i)^\[(?<subgroup>.+?)\][-_. ]?(?<title>.+?)[-_. ]+\(?(?<abs>\d{2,3}(?:[-_. ]\d{2,3})*)\)?(?:[-_. ]+(?<special>special|ova|ovd))?(?:$|(?<hash>\[\w{8}\])(?:$|\.mkv)|[^0-9].*?(?<hashb>\[\w{8}\])?(?:$|\.mkv))",
            extract_standard,
        ),
        // Anime: Title SxxEyy NNN [SubGroup]
        Rule::new(
            r"(?i)^(?<title>.+?)[-_\W&&[^()\[!]]+S?(?<season>\d{1,2})(?<eps>(?:(?:[ex]|\W[ex]){1,2}\d{2})+)(?:.*?[^0-9])(?<abs>\d{3}(?:[-_. ]\d{3})*)[^0-9].*?\[(?<subgroup>.+?)\](?:$|\.mkv)",
            extract_standard,
        ),
        // Anime: Title NNN [SubGroup], optional bracketed hash
        Rule::new(
            r"(?i)^(?<title>.+?)(?<abs>(?:(?:_|-|\s|\.)+\d{3})+)[^0-9].*?\[(?<subgroup>.+?)\].*?(?<hash>\[\w{8}\])?(?:$|\.)",
            extract_standard,
        ),
        // Anime: Title NNN [8charHash]
        Rule::new(
            r"(?i)^(?<title>.+?)(?<abs>(?:(?:_|-|\s|\.)+\d{2,3})+)(?:[-_. ]+(?<special>special|ova|ovd))?[-_. ]+.*?(?<hash>\[\w{8}\])(?:$|\.)",
            extract_standard,
        ),
        // Air date plus season/episode, combined date token; S/E is the result
        Rule::new(
            r"(?i)^(?<title>.+?)?\W*(?<airdate>\d{4}\W+[0-1][0-9]\W+[0-3][0-9])[-_. ]s?(?<season>\d{1,2})[ex](?<eps>\d{1,3})(?:\D|$)",
            extract_date_with_episode,
        ),
        // Air date plus season/episode, split date groups
        Rule::new(
            r"(?i)^(?<title>.+?)?\W*(?<airyear>\d{4})\W+(?<airmonth>[0-1][0-9])\W+(?<airday>[0-3][0-9]).*?[^0-9]s?(?<season>\d{1,2})[ex](?<eps>\d{1,3})(?:\D|$)",
            extract_split_date_with_episode,
        ),
        // Multi-episode repeated: S01E05 - S01E06
        Rule::new(
            r"(?i)^(?<title>.+?)(?<chain>(?:[-_\W&&[^()\[!]]+S?(?:\d{1,2}|\d{4})(?:(?:[ex]|[-_. ]e){1,2}\d{1,3})+){2,})(?:\D|$)",
            extract_titled_chain,
        ),
        // Title + season/episode, single and multi: the workhorse
        Rule::new(
            r"(?i)^(?<title>.+?)[-_\W&&[^()\[!]]+S?(?<season>\d{1,2})(?<eps>(?:[ex]|\W[ex]|_){1,2}\d{2,3}(?:(?:-|[ex]|\W[ex]|_){1,2}\d{2,3})*)(?:\D|$)",
            extract_standard,
        ),
        // Title + 4-digit season: S2016E05
        Rule::new(
            r"(?i)^(?<title>.+?)[-_\W&&[^()\[!]]+S(?<season>\d{4})(?<eps>(?:e|\We|_){1,2}\d{2,3}(?:(?:-|e|\We|_){1,2}\d{2,3})*)(?:\D|$)",
            extract_standard,
        ),
        // Title + 4-digit season: 2016x05
        Rule::new(
            r"(?i)^(?<title>.+?)[-_\W&&[^()\[!]]+(?<season>\d{4})(?<eps>(?:x|\Wx|_){1,2}\d{2,3}(?:(?:-|x|\Wx|_){1,2}\d{2,3})*)(?:\D|$)",
            extract_standard,
        ),
        // Mini-series with year in title: Part 1, Part01, e01
        Rule::new(
            r"(?i)^(?<title>.+?\d{4})\W+(?<eps>(?:(?:Part\W?|e)\d{1,2})+)(?:\D|$)",
            extract_standard,
        ),
        // Mini-series: Part 1, Part01
        Rule::new(
            r"(?i)^(?<title>.+?)\W+(?<eps>(?:(?:Part\W?|e)\d{1,2})+)(?:\D|$)",
            extract_part_episode,
        ),
        // Mini-series: Part One..Nine
        Rule::new(
            r"(?i)^(?<title>.+?)\W+Part[-._ ](?<epword>One|Two|Three|Four|Five|Six|Seven|Eight|Nine)[-._ ]",
            extract_word_episode,
        ),
        // Mini-series: XofY
        Rule::new(
            r"(?i)^(?<title>.+?)\W+(?<eps>\d{1,2})of\d+(?:\D|$)",
            extract_standard,
        ),
        // Long form: Season 01 Episode 03
        Rule::new(
            r#"(?i)(?:.*"|^)(?<title>.*?)[-_\W&&[^()\[]]+\W?Season\W?(?<season>\d{1,2})(?:\W|_)+Episode\W[-_. ]?(?<eps>\d{1,2}(?:[-_. ]\d{1,2})*)(?:\D|$)"#,
            extract_standard,
        ),
        // No separator before the marker: TitleS01E11E12
        Rule::new(
            r"(?i)^(?<title>.*?)(?:\W?|_)S(?<season>\d{2})(?<eps>(?:E\d{2})+)(?:\D|$)",
            extract_standard,
        ),
        // Single-digit episodes: S6.E1E2, S6E1E2
        Rule::new(
            r"(?i)^(?<title>.+?)[-_. ]S(?<season>\d{1,2}|\d{4})(?<eps>(?:(?:[-_. ][ex]?|[ex])\d{1,2})+)(?:\D|$)",
            extract_standard,
        ),
        // S1E1 with or without separators
        Rule::new(
            r#"(?i)(?:.*"|^)(?<title>.*?)(?:\W?|_)S(?<season>\d{1,2})(?:\W|_)?E(?<eps>\d{1,2})(?:\D|$)"#,
            extract_standard,
        ),
        // 3-digit season: S010E05
        Rule::new(
            r#"(?i)(?:.*"|^)(?<title>.*?)(?:\W?|_)S(?<season>\d{3})(?:\W|_)?E(?<eps>\d{1,2})(?:\D|$)"#,
            extract_standard,
        ),
        // 5-digit episode: S01e12345
        Rule::new(
            r"(?i)^(?<title>.+?)(?:_|-|\s|\.)+S?(?<season>\d{1,2})(?:-|[ex]|\W[ex]|_){1,2}(?<eps>\d{5})(?:\D|$)",
            extract_standard,
        ),
        // 5-digit multi-episode: S01.ep12345-ep12346
        Rule::new(
            r"(?i)^(?<title>.+?)(?:_|-|\s|\.)+S?(?<season>\d{1,2})(?<eps>(?:(?:[-_. ]{1,3}ep){1,2}\d{5})+)(?:\D|$)",
            extract_standard,
        ),
        // Separated: S01 - E01
        Rule::new(
            r"(?i)^(?<title>.+?)(?:_|-|\s|\.)+S(?<season>\d{2})\W-\WE(?<eps>\d{2})(?:[^0-9\\]|$)",
            extract_standard,
        ),
        // Season-only release: S01, Season 1, optional EXTRAS/SUBPACK marker
        Rule::new(
            r"(?i)^(?<title>.+?)\W(?:S|Season)\W?(?<season>\d{1,2})(?:\W+|_|$)(?<extras>EXTRAS|SUBPACK)?",
            extract_season_only,
        ),
        // 4-digit season-only release
        Rule::new(
            r"(?i)^(?<title>.+?)\W(?:S|Season)\W?(?<season>\d{4})(?:\W+|_|$)(?<extras>EXTRAS|SUBPACK)?",
            extract_season_only,
        ),
        // Bracketed season/episode: [S01E05], [1x05]
        Rule::new(
            r"(?i)^(?<title>.+?)[-_\W&&[^()\[!]]+\[S?(?<season>\d{1,2})(?<eps>(?:(?:-|[ex]|\W[ex]|_){1,2}\d{2})+)\]",
            extract_standard,
        ),
        // Compact 3-digit season+episode: Title.103, Title.113
        Rule::new(
            r"(?i)^(?<title>.+?)?(?<chain>(?:[-_\W&&[^()\[!]]+[1-9](?:[1-9][0-9]|0[1-9]))+)(?:[^a-z0-9]|$)",
            extract_compact,
        ),
        // Plain air date: Title.2015.01.02
        Rule::new(
            r"(?i)^(?<title>.+?)?\W*(?<airyear>\d{4})\W+(?<airmonth>[0-1][0-9])\W+(?<airday>[0-3][0-9])",
            extract_air_date,
        ),
        // Compact 4-digit season+episode: Title.1103
        Rule::new(
            r"(?i)^(?:(?<title>.+?)[-_\W&&[^()\[!]]+|(?<titleb>.*?[^()\[ex0-9])|)(?<chain>\d{4}(?:[-_\W&&[^()\[!]]+\d{4})*)(?:$|_|[^\w)\]](?:[^0-9]|$))",
            extract_compact,
        ),
        // 4-digit episode without a title
        Rule::new(
            r"(?i)^S?(?<season>\d{1,2})(?<eps>(?:(?:-|[ex]|\W[ex]|_){1,2}\d{4})+)(?:$|_|\W)",
            extract_standard,
        ),
        // 4-digit episode with a title
        Rule::new(
            r"(?i)^(?<title>.+?)[-_\W&&[^()\[!]]+S?(?<season>\d{1,2})(?<eps>(?:(?:-|[ex]|\W[ex]|_){1,2}\d{4})+)(?:$|[^0-9ip])",
            extract_standard,
        ),
        // Single-digit episode chain: 2x1, S01E1-E2
        Rule::new(
            r"(?i)^(?<title>.*?)(?<chain>(?:[-_\W&&[^()\[!]]+S?\d{1,2}(?:(?:-|[ex]){1,2}\d)+)+)(?:$|_|\W)",
            extract_digit_chain,
        ),
        // iTunes layout: Season 1\05 Title
        Rule::new(
            r"(?i)^Season(?:_|-|\s|\.)(?<season>\d{1,2})(?:_|-|\s|\.|\\)(?<eps>\d{1,2})(?:\D|$)",
            extract_standard,
        ),
        // Anime: e/ep-prefixed absolute, optional subgroup
        Rule::new(
            r"(?i)^(?:\[(?<subgroup>.+?)\][-_. ]?)?(?<title>.+?)(?<abs>(?:(?:_|-|\s|\.)+(?:e|ep)\d{2,3})+).*?(?<hash>\[\w{8}\])?(?:$|\.)",
            extract_standard,
        ),
        // Anime: Title Episode NN without a subgroup
        Rule::new(
            r"(?i)^(?<title>.+?)[-_. ]Episode(?<abs>(?:[-_. ]+\d{2,3})+)(?:(?<hash>\[.{8}\])|\D|$)",
            extract_standard,
        ),
        // Anime: plain absolute, optional subgroup and hash
        Rule::new(
            r"(?i)^(?:\[(?<subgroup>.+?)\][-_. ]?)?(?<title>.+?)(?<abs>(?:[-_. ]+\d{2,3})+)(?:(?<hash>\[.{8}\])|\D|$)",
            extract_standard,
        ),
        // Anime: absolute with the wide separator class
        Rule::new(
            r"(?i)^(?:\[(?<subgroup>.+?)\][-_. ]?)?(?<title>.+?)(?<abs>(?:[-_\W&&[^()\[!]]+\d{2,3})+)(?:(?<hash>\[.{8}\])|\D|$)",
            extract_standard,
        ),
        // Packed 5-digit season+double-episode: extant.10708.hdtv
        Rule::new(
            r"(?i)^(?<title>.+?)[-_. ](?<season>0?\d?)(?<eps>\d{4})[-_. ]",
            extract_packed_episodes,
        ),
    ]
});

// ── Extractors ──────────────────────────────────────────────────────────

fn push_unique(list: &mut Vec<i32>, value: i32) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Capture read shared by most rules. A rule that lacks a season group but
/// caught plain episode numbers is a mini-series release: season 1.
fn extract_standard(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    let title = caps
        .name("title")
        .or_else(|| caps.name("titleb"))
        .map_or_else(String::new, |m| clean_title(m.as_str()));

    let mut episodes = Vec::new();
    if let Some(eps) = caps.name("eps") {
        for episode in digit_runs(eps.as_str()) {
            push_unique(&mut episodes, episode);
        }
    }

    let mut absolute_episodes = Vec::new();
    if let Some(abs) = caps.name("abs") {
        for episode in digit_runs(abs.as_str()) {
            push_unique(&mut absolute_episodes, episode);
        }
    }

    let season = match group_i32(caps, "season") {
        None if !episodes.is_empty() && absolute_episodes.is_empty() => Some(1),
        season => season,
    };

    Some(ExtractionResult {
        title,
        season,
        episodes,
        absolute_episodes,
        subgroup: caps.name("subgroup").map(|m| m.as_str().to_string()),
        hash: release_hash(caps),
        special: caps.name("special").is_some(),
        ..Default::default()
    })
}

/// Season/episode blocks of a multi-part chain. All blocks must name the
/// same season; a disagreement refuses the whole rule.
fn scan_blocks(chain: &str, block: &Regex) -> Option<(i32, Vec<i32>)> {
    let mut season = None;
    let mut episodes = Vec::new();
    for caps in block.captures_iter(chain) {
        let number: i32 = caps[1].parse().ok()?;
        match season {
            Some(current) if current != number => {
                tracing::debug!(chain, "conflicting seasons in multi-part title");
                return None;
            }
            _ => season = Some(number),
        }
        for episode in digit_runs(&caps[2]) {
            push_unique(&mut episodes, episode);
        }
    }
    Some((season?, episodes))
}

fn extract_bare_chain(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    let (season, episodes) = scan_blocks(&caps["chain"], &RE_BARE_BLOCK)?;
    Some(ExtractionResult {
        season: Some(season),
        episodes,
        ..Default::default()
    })
}

fn extract_titled_chain(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    let (season, episodes) = scan_blocks(&caps["chain"], &RE_TITLED_BLOCK)?;
    Some(ExtractionResult {
        title: clean_title(&caps["title"]),
        season: Some(season),
        episodes,
        ..Default::default()
    })
}

fn extract_digit_chain(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    let (season, episodes) = scan_blocks(&caps["chain"], &RE_DIGIT_BLOCK)?;
    Some(ExtractionResult {
        title: clean_title(&caps["title"]),
        season: Some(season),
        episodes,
        ..Default::default()
    })
}

/// Compact `SEE`/`SSEE` digit packs: the trailing two digits are the
/// episode, the rest the season. All packs must agree on the season.
fn extract_compact(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    let chain = &caps["chain"];
    let mut season = None;
    let mut episodes = Vec::new();
    for run in digit_runs(chain) {
        let (candidate, episode) = (run / 100, run % 100);
        match season {
            Some(current) if current != candidate => {
                tracing::debug!(chain, "conflicting seasons in compact title");
                return None;
            }
            _ => season = Some(candidate),
        }
        push_unique(&mut episodes, episode);
    }

    let title = caps
        .name("title")
        .or_else(|| caps.name("titleb"))
        .map_or_else(String::new, |m| clean_title(m.as_str()));

    Some(ExtractionResult {
        title,
        season: Some(season?),
        episodes,
        ..Default::default()
    })
}

fn date_continues(haystack: &str, end: usize) -> bool {
    RE_DATE_CONTINUES.is_match(&haystack[end..])
}

fn valid_air_date(year: i32, month: i32, day: i32) -> bool {
    if year < 1900 {
        return false;
    }
    let (Ok(month), Ok(day)) = (u32::try_from(month), u32::try_from(day)) else {
        return false;
    };
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        tracing::debug!(year, month, day, "not a real calendar date");
        return false;
    }
    true
}

/// Combined date token followed by a season/episode marker. The date is
/// consumed and validated; season and episode are the result.
fn extract_date_with_episode(caps: &Captures<'_>, haystack: &str) -> Option<ExtractionResult> {
    let airdate = caps.name("airdate")?;
    if date_continues(haystack, airdate.end()) {
        return None;
    }
    let &[year, month, day] = digit_runs(airdate.as_str()).as_slice() else {
        return None;
    };
    if !valid_air_date(year, month, day) {
        return None;
    }
    extract_standard(caps, haystack)
}

/// Split date groups followed by a season/episode marker.
fn extract_split_date_with_episode(
    caps: &Captures<'_>,
    haystack: &str,
) -> Option<ExtractionResult> {
    let airday = caps.name("airday")?;
    if date_continues(haystack, airday.end()) {
        return None;
    }
    let (year, month, day) = (
        group_i32(caps, "airyear")?,
        group_i32(caps, "airmonth")?,
        group_i32(caps, "airday")?,
    );
    if !valid_air_date(year, month, day) {
        return None;
    }
    extract_standard(caps, haystack)
}

/// Plain air date; the date itself is the result.
fn extract_air_date(caps: &Captures<'_>, haystack: &str) -> Option<ExtractionResult> {
    let airday = caps.name("airday")?;
    if date_continues(haystack, airday.end()) {
        return None;
    }
    let (year, month, day) = (
        group_i32(caps, "airyear")?,
        group_i32(caps, "airmonth")?,
        group_i32(caps, "airday")?,
    );
    if !valid_air_date(year, month, day) {
        return None;
    }

    let title = caps
        .name("title")
        .map_or_else(String::new, |m| clean_title(m.as_str()));
    Some(ExtractionResult {
        title,
        air_year: Some(year),
        air_month: Some(month),
        air_day: Some(day),
        ..Default::default()
    })
}

/// Mini-series `Part`/`e` episodes. An `e` marker right after a digit run
/// is a stray (episode-of-an-episode reading); those titles belong to the
/// absolute rules further down.
fn extract_part_episode(caps: &Captures<'_>, haystack: &str) -> Option<ExtractionResult> {
    let eps = caps.name("eps")?;
    let title = caps.name("title")?;
    if eps.as_str().starts_with(['e', 'E'])
        && title.as_str().ends_with(|c: char| c.is_ascii_digit())
    {
        return None;
    }
    extract_standard(caps, haystack)
}

fn extract_word_episode(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    let word = caps.name("epword")?.as_str().to_lowercase();
    let episode = NUMBER_WORDS.iter().position(|w| *w == word)? as i32;
    Some(ExtractionResult {
        title: clean_title(&caps["title"]),
        season: Some(1),
        episodes: vec![episode],
        ..Default::default()
    })
}

fn extract_season_only(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    let extras = caps.name("extras").is_some();
    Some(ExtractionResult {
        title: clean_title(&caps["title"]),
        season: group_i32(caps, "season"),
        special: extras,
        full_season: !extras,
        ..Default::default()
    })
}

/// Packed season+double-episode digits: `10708` is season 1, episodes 7
/// and 8. The season digits may be absent entirely.
fn extract_packed_episodes(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    let season = caps
        .name("season")
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let eps = caps.name("eps")?.as_str();
    let (first, second) = eps.split_at(2);

    let mut episodes = Vec::new();
    push_unique(&mut episodes, first.parse().ok()?);
    push_unique(&mut episodes, second.parse().ok()?);

    Some(ExtractionResult {
        title: clean_title(&caps["title"]),
        season: Some(season),
        episodes,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::super::{parse_title, ExtractionResult, TitleFamily};

    fn ep(raw: &str) -> ExtractionResult {
        parse_title(raw, TitleFamily::Episode).expect("should parse")
    }

    #[test]
    fn test_single_episode() {
        let result = ep("Show.Name.1x05");
        assert_eq!(result.title, "Show Name");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5]);
    }

    #[test]
    fn test_non_ascii_title_kept_whole() {
        // Letters outside ASCII are word characters, not separators.
        let accented = ep("Café.S01E05");
        assert_eq!(accented.title, "Café");
        assert_eq!(accented.season, Some(1));
        assert_eq!(accented.episodes, vec![5]);

        let cjk = ep("こち亀.S01E05");
        assert_eq!(cjk.title, "こち亀");
        assert_eq!(cjk.episodes, vec![5]);
    }

    #[test]
    fn test_multi_episode_formats() {
        assert_eq!(ep("Show.Name.S02E01E02.flac").episodes, vec![1, 2]);
        assert_eq!(ep("Show.Name.S02E01E02.flac").season, Some(2));
        assert_eq!(ep("Show.Name.S01E05-06").episodes, vec![5, 6]);
        assert_eq!(ep("Show.Name.S01E01E02E03").episodes, vec![1, 2, 3]);
        // Repeats collapse.
        assert_eq!(ep("Show.Name.S01E05E05").episodes, vec![5]);
    }

    #[test]
    fn test_titleless_episode() {
        let result = ep("S01E05");
        assert_eq!(result.title, "");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5]);
    }

    #[test]
    fn test_bare_multi_part_chain() {
        let result = ep("S01E05.S01E06");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5, 6]);

        // Disagreeing seasons refuse the chain rule; the single-block rule
        // then reads the first part only.
        let conflict = ep("S01E05.S02E06");
        assert_eq!(conflict.season, Some(1));
        assert_eq!(conflict.episodes, vec![5]);
    }

    #[test]
    fn test_titled_multi_part_chain() {
        let result = ep("Show.S01E05.S01E06");
        assert_eq!(result.title, "Show");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5, 6]);
    }

    #[test]
    fn test_anime_absolute_with_hash() {
        let result = ep("[SubGroup] Series Title - 05 [ABCDEF12].mkv");
        assert_eq!(result.subgroup.as_deref(), Some("SubGroup"));
        assert_eq!(result.title, "Series Title");
        assert_eq!(result.absolute_episodes, vec![5]);
        assert_eq!(result.hash.as_deref(), Some("ABCDEF12"));
        assert_eq!(result.season, None);
    }

    #[test]
    fn test_anime_absolute_before_season_block() {
        let result = ep("[Grp] Show 101 S01E05");
        assert_eq!(result.absolute_episodes, vec![101]);
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5]);
    }

    #[test]
    fn test_anime_absolute_after_season_block() {
        let result = ep("[Grp] Show S01E05 101");
        assert_eq!(result.subgroup.as_deref(), Some("Grp"));
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5]);
        assert_eq!(result.absolute_episodes, vec![101]);
    }

    #[test]
    fn test_anime_season_episode_with_trailing_hash() {
        let result = ep("[Grp] Show S01E05 [ABCD1234]");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5]);
        assert_eq!(result.hash.as_deref(), Some("ABCD1234"));
    }

    #[test]
    fn test_anime_title_ending_in_number() {
        let result = ep("[Grp] Title 2 - 303 [ABCD1234].mkv");
        assert_eq!(result.title, "Title 2");
        assert_eq!(result.absolute_episodes, vec![303]);
        assert_eq!(result.hash.as_deref(), Some("ABCD1234"));
    }

    #[test]
    fn test_anime_parenthesized_absolute() {
        let result = ep("[Grp] Title (01)");
        assert_eq!(result.subgroup.as_deref(), Some("Grp"));
        assert_eq!(result.absolute_episodes, vec![1]);
    }

    #[test]
    fn test_anime_special_marker() {
        let result = ep("[Grp] Title - 05 - Special");
        assert_eq!(result.absolute_episodes, vec![5]);
        assert!(result.special);
    }

    #[test]
    fn test_anime_trailing_subgroup() {
        let result = ep("Show S01E05 105 [Group].mkv");
        assert_eq!(result.subgroup.as_deref(), Some("Group"));
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5]);
        assert_eq!(result.absolute_episodes, vec![105]);

        let result = ep("Show.Name.105.[SubsGroup].mkv");
        assert_eq!(result.subgroup.as_deref(), Some("SubsGroup"));
        assert_eq!(result.absolute_episodes, vec![105]);
    }

    #[test]
    fn test_anime_absolute_with_mandatory_hash() {
        let result = ep("Title.Name.22.stuff.[ABCD1234]");
        assert_eq!(result.title, "Title Name");
        assert_eq!(result.absolute_episodes, vec![22]);
        assert_eq!(result.hash.as_deref(), Some("ABCD1234"));
    }

    #[test]
    fn test_air_date_with_trailing_episode_marker() {
        // Junk between the date and the marker moves it to the split-date
        // rule; the result is the same season/episode pair.
        let result = ep("Show 2015 11 05 stuff S01E03");
        assert_eq!(result.title, "Show");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![3]);
        assert_eq!(result.air_year, None);
    }

    #[test]
    fn test_plain_air_date() {
        let result = ep("Show.Name.2015.11.02.Source");
        assert_eq!(result.title, "Show Name");
        assert_eq!(result.air_year, Some(2015));
        assert_eq!(result.air_month, Some(11));
        assert_eq!(result.air_day, Some(2));
        assert_eq!(result.season, None);
        assert!(result.episodes.is_empty());
    }

    #[test]
    fn test_four_digit_season() {
        assert_eq!(ep("Show.Name.S2016E05").season, Some(2016));
        assert_eq!(ep("Show.Name.S2016E05").episodes, vec![5]);
        assert_eq!(ep("Show.Name.2016x05").season, Some(2016));
        assert_eq!(ep("Show.Name.2016x05").episodes, vec![5]);
    }

    #[test]
    fn test_mini_series_parts() {
        let with_year = ep("Show.2012.Part.1");
        assert_eq!(with_year.title, "Show 2012");
        assert_eq!(with_year.season, Some(1));
        assert_eq!(with_year.episodes, vec![1]);

        let plain = ep("Show.Name.e5");
        assert_eq!(plain.season, Some(1));
        assert_eq!(plain.episodes, vec![5]);

        let word = ep("Show.Name.Part.Two.720p");
        assert_eq!(word.title, "Show Name");
        assert_eq!(word.season, Some(1));
        assert_eq!(word.episodes, vec![2]);

        let of_form = ep("Show.Name.5of9");
        assert_eq!(of_form.season, Some(1));
        assert_eq!(of_form.episodes, vec![5]);
    }

    #[test]
    fn test_stray_e_after_digits_is_not_an_episode() {
        // The digits before the marker win as an absolute episode instead.
        let result = ep("Title.12.e5");
        assert_eq!(result.season, None);
        assert!(result.episodes.is_empty());
        assert_eq!(result.absolute_episodes, vec![12]);
    }

    #[test]
    fn test_season_episode_long_form() {
        let result = ep("Show Name Season 2 Episode 3");
        assert_eq!(result.title, "Show Name");
        assert_eq!(result.season, Some(2));
        assert_eq!(result.episodes, vec![3]);
    }

    #[test]
    fn test_marker_without_separator() {
        let result = ep("Show.NameS01E11E12");
        assert_eq!(result.title, "Show Name");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![11, 12]);

        let single = ep("Show NameS1E1");
        assert_eq!(single.season, Some(1));
        assert_eq!(single.episodes, vec![1]);
    }

    #[test]
    fn test_single_digit_episodes() {
        let result = ep("Show.Name.S6.E1E2");
        assert_eq!(result.season, Some(6));
        assert_eq!(result.episodes, vec![1, 2]);
    }

    #[test]
    fn test_three_digit_season() {
        let result = ep("Show.NameS010E05");
        assert_eq!(result.season, Some(10));
        assert_eq!(result.episodes, vec![5]);
    }

    #[test]
    fn test_five_digit_episodes() {
        assert_eq!(ep("Show.S01e12345").episodes, vec![12345]);
        assert_eq!(ep("Show.S01e12345").season, Some(1));
        assert_eq!(
            ep("Show.S01.ep12345-ep12346").episodes,
            vec![12345, 12346]
        );
    }

    #[test]
    fn test_separated_season_and_episode() {
        let result = ep("Show.Name.S01 - E02");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![2]);
    }

    #[test]
    fn test_season_only_release() {
        let result = ep("Show.Name.S01");
        assert_eq!(result.title, "Show Name");
        assert_eq!(result.season, Some(1));
        assert!(result.full_season);
        assert!(!result.special);

        let extras = ep("Show.Name.S01.EXTRAS");
        assert!(extras.special);
        assert!(!extras.full_season);

        let word = ep("Show.Name.Season.1");
        assert!(word.full_season);

        let four_digit = ep("Show.Name.Season.2016");
        assert_eq!(four_digit.season, Some(2016));
        assert!(four_digit.full_season);
    }

    #[test]
    fn test_bracketed_season_episode() {
        let result = ep("Show.Name.[1x05]");
        assert_eq!(result.title, "Show Name");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5]);
    }

    #[test]
    fn test_compact_three_digit() {
        assert_eq!(ep("Show.103").season, Some(1));
        assert_eq!(ep("Show.103").episodes, vec![3]);
        assert_eq!(ep("Show.113").episodes, vec![13]);

        let multi = ep("Show.103.104");
        assert_eq!(multi.season, Some(1));
        assert_eq!(multi.episodes, vec![3, 4]);

        // Disagreeing packs fall through to the absolute rule.
        let conflict = ep("Show.103.204");
        assert_eq!(conflict.season, None);
        assert_eq!(conflict.absolute_episodes, vec![103, 204]);
    }

    #[test]
    fn test_compact_four_digit() {
        assert_eq!(ep("Show.1103").season, Some(11));
        assert_eq!(ep("Show.1103").episodes, vec![3]);

        let titleless = ep("1103.Source");
        assert_eq!(titleless.title, "");
        assert_eq!(titleless.season, Some(11));
        assert_eq!(titleless.episodes, vec![3]);

        let multi = ep("Show.1103.1104");
        assert_eq!(multi.season, Some(11));
        assert_eq!(multi.episodes, vec![3, 4]);

        // No separator before the digits at all.
        let joined = ep("Show1103");
        assert_eq!(joined.title, "Show");
        assert_eq!(joined.season, Some(11));
        assert_eq!(joined.episodes, vec![3]);

        let trailed = ep("Show.4605.Source");
        assert_eq!(trailed.season, Some(46));
        assert_eq!(trailed.episodes, vec![5]);
    }

    #[test]
    fn test_four_digit_episode() {
        let titled = ep("Show.Name.S01E2015.Source");
        assert_eq!(titled.season, Some(1));
        assert_eq!(titled.episodes, vec![2015]);

        let bare = ep("S01e2015");
        assert_eq!(bare.season, Some(1));
        assert_eq!(bare.episodes, vec![2015]);
    }

    #[test]
    fn test_single_digit_chain() {
        let result = ep("Show.Name.2x1");
        assert_eq!(result.season, Some(2));
        assert_eq!(result.episodes, vec![1]);

        // Disagreeing seasons leave nothing for any later rule.
        assert!(parse_title("Show.1x1.2x2", TitleFamily::Episode).is_none());
    }

    #[test]
    fn test_itunes_layout() {
        let result = ep(r"Season 1\05 Title");
        assert_eq!(result.title, "");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![5]);
    }

    #[test]
    fn test_absolute_episode_forms() {
        assert_eq!(ep("Show.Name.e123").absolute_episodes, vec![123]);
        assert_eq!(ep("Show.Name.Episode.55").absolute_episodes, vec![55]);
        assert_eq!(ep("Show.Name.05").absolute_episodes, vec![5]);
        assert_eq!(ep("Show.Name.100").absolute_episodes, vec![100]);
        assert_eq!(
            ep("[Grp].Title.Episode.55[ABCD1234]").hash.as_deref(),
            Some("ABCD1234")
        );
        // Brace separators only fit the wide-class rule.
        assert_eq!(ep("Show.{05}").absolute_episodes, vec![5]);
    }

    #[test]
    fn test_packed_double_episode() {
        let result = ep("extant.10708.hdtv-lol");
        assert_eq!(result.title, "extant");
        assert_eq!(result.season, Some(1));
        assert_eq!(result.episodes, vec![7, 8]);
    }
}
