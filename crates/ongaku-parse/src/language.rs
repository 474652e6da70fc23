//! Release language detection.
//!
//! Detection runs in two stages: a plain substring scan for unambiguous
//! language words, then a delimiter-aware regex for short tokens (`ita`,
//! `FR`, `rus`, ...) that would otherwise false-match inside ordinary
//! words. English is the fallback when neither stage finds anything.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Language;

/// Short language tokens that need surrounding delimiters to be trusted.
static RE_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\W|_)(?<italian>\b(?:ita|italian)\b)|(?<german>german\b|videomann)|(?<flemish>flemish)|(?<greek>greek)|(?<french>(?:\W|_)(?:FR|VOSTFR)(?:\W|_))|(?<russian>\brus\b)|(?<dutch>nl\W?subs?)|(?<hungarian>\b(?:HUNDUB|HUN)\b)|(?<spanish>\b(?:español|castellano)\b)",
    )
    .unwrap()
});

/// Unambiguous language words, checked in order against the lowercased title.
const LANGUAGE_KEYWORDS: &[(&str, Language)] = &[
    ("english", Language::English),
    ("french", Language::French),
    ("spanish", Language::Spanish),
    ("danish", Language::Danish),
    ("dutch", Language::Dutch),
    ("japanese", Language::Japanese),
    ("cantonese", Language::Cantonese),
    ("mandarin", Language::Mandarin),
    ("korean", Language::Korean),
    ("russian", Language::Russian),
    ("polish", Language::Polish),
    ("vietnamese", Language::Vietnamese),
    ("swedish", Language::Swedish),
    ("norwegian", Language::Norwegian),
    ("nordic", Language::Norwegian),
    ("finnish", Language::Finnish),
    ("turkish", Language::Turkish),
    ("portuguese", Language::Portuguese),
    ("hungarian", Language::Hungarian),
];

/// Named groups of [`RE_LANGUAGE`] in the order they take precedence.
const LANGUAGE_GROUPS: &[(&str, Language)] = &[
    ("italian", Language::Italian),
    ("german", Language::German),
    ("flemish", Language::Flemish),
    ("greek", Language::Greek),
    ("spanish", Language::Spanish),
    ("french", Language::French),
    ("russian", Language::Russian),
    ("dutch", Language::Dutch),
    ("hungarian", Language::Hungarian),
];

/// Detect the release language from a title, defaulting to English.
///
/// # Example
///
/// ```
/// use ongaku_parse::{parse_language, Language};
///
/// assert_eq!(parse_language("Artist.Album.2015.French.FLAC"), Language::French);
/// assert_eq!(parse_language("Artist.Album.2015.FLAC"), Language::English);
/// ```
pub fn parse_language(title: &str) -> Language {
    let lower = title.to_lowercase();

    for (keyword, language) in LANGUAGE_KEYWORDS {
        if lower.contains(keyword) {
            return *language;
        }
    }

    if let Some(caps) = RE_LANGUAGE.captures(title) {
        for (group, language) in LANGUAGE_GROUPS {
            if caps.name(group).is_some() {
                return *language;
            }
        }
    }

    Language::English
}
