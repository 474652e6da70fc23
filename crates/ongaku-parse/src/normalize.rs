//! Release title normalization pipeline.
//!
//! Every parser entry point runs the same preparation before any pattern
//! matching:
//!
//! 1. Validation: obfuscated, empty and hashed titles are rejected.
//! 2. Reversed-title repair: titles published backwards are flipped.
//! 3. File extension stripping on the repaired title.
//! 4. Simplification to a fixpoint: resolution noise, website prefixes,
//!    torrent suffixes and air date rewrites, repeated until the title
//!    stops changing.
//!
//! The result carries all three forms because later stages want different
//! ones: quality detection reads the repaired title, language and release
//! group extraction read the extension-stripped title, and the matcher
//! cascades run on the simplified title.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::extensions::remove_file_extension;

/// Marker sequences of a reversed release title (`p027`, `p0801`, `50E10S`).
static RE_REVERSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-._ ](p027|p0801|\d{2}E\d{2}S)[-._ ]").unwrap());

/// Resolution, codec and container noise stripped before matching.
static RE_SIMPLE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:(?:480|720|1080|2160|320)[ip]|[xh][\W_]?26[45]|DD\W?5\W1|[<>?*:|]|848x480|1280x720|1920x1080|3840x2160|4096x2160|(?:8|10)b(?:it)?)\s*",
    )
    .unwrap()
});

/// Bracketed website tag at the front of a title, like `[ www.site.com ]`.
static RE_WEBSITE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[\s*[a-z]+(?:\.[a-z]+)+\s*\][- ]*").unwrap());

/// Tracker tags appended to torrent titles.
static RE_TORRENT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[(?:ettv|rartv|rarbg|cttv)\]$").unwrap());

/// Air date in either year-first or year-last order, ready for rewriting.
static RE_AIR_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?<prefix>.*?[^0-9])??(?:(?<airyear>\d{4})[_.-](?<airmonth>[0-1][0-9])[_.-](?<airday>[0-3][0-9])|(?<airmonth2>[0-1][0-9])[_.-](?<airday2>[0-3][0-9])[_.-](?<airyear2>\d{4}))(?:[^0-9]|$)",
    )
    .unwrap()
});

/// Six digit air date (`YYMMDD`) between delimiters.
static RE_SIX_DIGIT_AIR_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[_.-](?<airdate>[1-9]\d[0-1][0-9][0-3][0-9])[_.-]").unwrap()
});

/// Hashed and placeholder release names rejected outright.
static HASHED_RELEASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // md5 and mixed-case hash prefixes
        Regex::new(r"^[0-9a-zA-Z]{32}").unwrap(),
        // shorter lower-case hashes
        Regex::new(r"^[a-z0-9]{24}$").unwrap(),
        // letter-run plus digits obfuscation
        Regex::new(r"^[A-Z]{11}\d{3}$").unwrap(),
        Regex::new(r"^[a-z]{12}\d{3}$").unwrap(),
        // backup archives
        Regex::new(r"^Backup_\d{5,}S\d{2}-\d{2}$").unwrap(),
        // bare placeholder names
        Regex::new(r"^123$").unwrap(),
        Regex::new(r"(?i)^abc$").unwrap(),
        Regex::new(r"(?i)^b00bs$").unwrap(),
    ]
});

/// Bracketed request tags inside artist or album segments.
static RE_REQUEST_INFO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.+?\]").unwrap());

/// Word separators collapsed to spaces by [`normalize_title`].
static RE_WORD_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s|\.|,|_|-|=|\|)+").unwrap());

/// Anything that is neither a word character nor whitespace.
static RE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// English articles and conjunctions dropped during comparison folding.
static RE_COMMON_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:a|an|the|and|or|of)\b\s?").unwrap());

static RE_DUPLICATE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Articles with their surrounding boundary, for positional filtering.
static RE_TITLE_ARTICLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\b|_)(?<article>a|an|the|and|or|of)(?:\b|_)").unwrap());

/// Non-word noise removed when folding names for comparison.
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\W_]").unwrap());

/// Why a raw title was refused before any parsing was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectedInput {
    /// Title advertises an obfuscated payload (`password` plus `yenc`).
    #[error("title carries obfuscation markers")]
    NoiseMarkers,
    /// Title has no letters or digits at all.
    #[error("title contains no alphanumeric characters")]
    NotAlphanumeric,
    /// Title matches a known hashed or placeholder release shape.
    #[error("title looks like a hashed release")]
    HashedRelease,
}

/// The three title forms produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTitle {
    /// Input title after reversed-title repair, extension included.
    pub title: String,
    /// Repaired title with a trailing media extension removed.
    pub release_title: String,
    /// Fully simplified title the matcher cascades run on.
    pub simple_title: String,
}

/// Validate and canonicalize a raw release title.
pub fn normalize(raw: &str) -> Result<NormalizedTitle, RejectedInput> {
    validate(raw)?;

    let title = repair_reversed(raw);
    let release_title = remove_file_extension(&title);

    let mut simple_title = release_title.clone();
    loop {
        let pass = simplify_pass(&simple_title);
        if pass == simple_title {
            break;
        }
        simple_title = pass;
    }

    Ok(NormalizedTitle {
        title,
        release_title,
        simple_title,
    })
}

fn validate(title: &str) -> Result<(), RejectedInput> {
    let lower = title.to_lowercase();
    if lower.contains("password") && lower.contains("yenc") {
        return Err(RejectedInput::NoiseMarkers);
    }

    if !title.chars().any(char::is_alphanumeric) {
        return Err(RejectedInput::NotAlphanumeric);
    }

    let without_extension = remove_file_extension(title);
    if HASHED_RELEASES.iter().any(|regex| regex.is_match(&without_extension)) {
        tracing::debug!(title, "rejected hashed release title");
        return Err(RejectedInput::HashedRelease);
    }

    Ok(())
}

/// Flip a reversed release title back around, leaving the extension alone.
fn repair_reversed(title: &str) -> String {
    if !RE_REVERSED.is_match(title) {
        return title.to_string();
    }

    let stripped = remove_file_extension(title);
    let reversed: String = stripped.chars().rev().collect();
    let repaired = format!("{reversed}{}", &title[stripped.len()..]);
    tracing::debug!(title, repaired, "reversed title repaired");
    repaired
}

/// One round of title simplification. [`normalize`] applies this until the
/// output stops changing, so nested noise like `72720p0p` cannot survive a
/// single lucky pass.
fn simplify_pass(title: &str) -> String {
    let mut simple = RE_SIMPLE_TITLE.replace_all(title, "").into_owned();
    simple = RE_WEBSITE_PREFIX.replace(&simple, "").into_owned();
    simple = RE_TORRENT_SUFFIX.replace(&simple, "").into_owned();

    if let Some(caps) = RE_AIR_DATE.captures(&simple) {
        simple = rewrite_air_date(&caps);
    }

    if let Some((token, fixed)) = six_digit_air_date(&simple) {
        simple = simple.replace(&token, &fixed);
    }

    simple
}

/// Canonicalize a matched air date to `YYYY.MM.DD`, dropping the tail.
fn rewrite_air_date(caps: &Captures<'_>) -> String {
    let prefix = caps.name("prefix").map_or("", |m| m.as_str());
    let year = caps
        .name("airyear")
        .or_else(|| caps.name("airyear2"))
        .map_or("", |m| m.as_str());
    let month = caps
        .name("airmonth")
        .or_else(|| caps.name("airmonth2"))
        .map_or("", |m| m.as_str());
    let day = caps
        .name("airday")
        .or_else(|| caps.name("airday2"))
        .map_or("", |m| m.as_str());

    format!("{prefix}{year}.{month}.{day}")
}

/// Expand the first delimited `YYMMDD` token to `20YY.MM.DD`.
///
/// `00` in both month and day positions means the token was a plain number,
/// not a date, and is left alone.
fn six_digit_air_date(title: &str) -> Option<(String, String)> {
    let caps = RE_SIX_DIGIT_AIR_DATE.captures(title)?;
    let date = &caps["airdate"];
    let (year, month, day) = (&date[0..2], &date[2..4], &date[4..6]);

    if month == "00" && day == "00" {
        return None;
    }

    Some((date.to_string(), format!("20{year}.{month}.{day}")))
}

/// Strip bracketed request tags like `[REQ]` out of a name segment.
pub(crate) fn strip_request_info(segment: &str) -> String {
    RE_REQUEST_INFO.replace_all(segment, "").into_owned()
}

/// Strip a leading website tag. Shared with release group extraction.
pub(crate) fn remove_website_prefix(title: &str) -> String {
    RE_WEBSITE_PREFIX.replace(title, "").into_owned()
}

/// Fold an artist name down to a comparison key: articles, punctuation and
/// accents removed, lowercased. Purely numeric names pass through as-is.
///
/// # Example
///
/// ```
/// use ongaku_parse::clean_artist_name;
///
/// assert_eq!(clean_artist_name("The Black Keys"), "theblackkeys");
/// ```
pub fn clean_artist_name(name: &str) -> String {
    if name.parse::<i64>().is_ok() {
        return name.to_string();
    }

    let stripped = remove_articles(name);
    let folded = RE_NON_WORD.replace_all(&stripped, "").to_lowercase();
    folded.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Remove article words except a leading one and a bare trailing `a`.
fn remove_articles(name: &str) -> String {
    let mut kept = String::with_capacity(name.len());
    let mut copied = 0;
    let mut search = 0;

    while search < name.len() {
        let Some(caps) = RE_TITLE_ARTICLES.captures_at(name, search) else {
            break;
        };
        let (Some(whole), Some(article)) = (caps.get(0), caps.name("article")) else {
            break;
        };

        let leading = whole.start() == 0;
        let trailing_a = article.as_str().eq_ignore_ascii_case("a") && article.end() == name.len();
        if leading || trailing_a {
            // Skip only the first character so an article hidden behind the
            // kept one (as in "of_the") is still found.
            search = whole.start() + 1;
            continue;
        }

        kept.push_str(&name[copied..whole.start()]);
        copied = whole.end();
        search = whole.end();
    }

    kept.push_str(&name[copied..]);
    kept
}

/// Fold a title for comparison: separators to spaces, punctuation and
/// common words dropped, whitespace collapsed, lowercased.
pub fn normalize_title(title: &str) -> String {
    let title = RE_WORD_DELIMITERS.replace_all(title, " ");
    let title = RE_PUNCTUATION.replace_all(&title, "");
    let title = RE_COMMON_WORDS.replace_all(&title, "");
    let title = RE_DUPLICATE_SPACES.replace_all(&title, " ");
    title.trim().to_lowercase()
}
