//! Release record assembly.
//!
//! The two entry points normalize a raw release title, run the matching
//! rule table and attach the extracted metadata:
//!
//!  1. [`parse_music_title`] reads track-level metadata from a single file
//!     name; the artist capture keeps its dots so initials survive.
//!  2. [`parse_album_title`] reads album-level metadata and attaches
//!     language, quality, release group and release hash.
//!
//! Both return `None` when validation rejects the input or no rule accepts
//! it; a miss never yields a partially filled record.

use std::sync::LazyLock;

use regex::Regex;

use crate::cascade::{self, TitleFamily};
use crate::language::parse_language;
use crate::model::{ArtistTitleInfo, Language, ParsedAlbumInfo, ParsedTrackInfo};
use crate::normalize::{self, clean_artist_name, strip_request_info};
use crate::quality::QualityDetect;
use crate::release_group::parse_release_group;

/// Track rule table. Rules two through four are identical; the table is
/// kept as is because its order decides which match wins.
static TRACK_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // NN - Artist - Track
        r"(?i)(?<tracknum>\d*)[-| ]?(?<artist>[a-zA-Z0-9, ().&_]*)[-| ]?(?<track>[a-zA-Z0-9, ().&_]+)",
        // NN - Track
        r"(?i)(?<tracknum>\d*)[-| .]?(?<track>[a-zA-Z0-9, ().&_]+)",
        // Track only
        r"(?i)(?<tracknum>\d*)[-| .]?(?<track>[a-zA-Z0-9, ().&_]+)",
        // Artist - Track
        r"(?i)(?<tracknum>\d*)[-| .]?(?<track>[a-zA-Z0-9, ().&_]+)",
        // NN - Artist - Track, variant separator
        r"(?i)(?<tracknum>\d*)[-| ]?(?<artist>[a-zA-Z0-9, ().&_]*)[-| ]?(?<track>[a-zA-Z0-9, ().&_]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Parse track-level metadata out of a single file release title.
///
/// # Example
///
/// ```
/// use ongaku_parse::parser::parse_music_title;
/// use ongaku_parse::quality::NoQuality;
///
/// let track = parse_music_title("02-Artist Name-Track Title", &NoQuality).unwrap();
/// assert_eq!(track.artist_title, "Artist Name");
/// assert_eq!(track.title, "Track Title");
/// assert_eq!(track.track_numbers, vec![2]);
/// ```
pub fn parse_music_title(title: &str, quality: &dyn QualityDetect) -> Option<ParsedTrackInfo> {
    let normalized = normalize::normalize(title).ok()?;

    let haystack = normalized.simple_title.as_str();
    let mut matched = None;
    for (index, rule) in TRACK_RULES.iter().enumerate() {
        if let Some(caps) = rule.captures(haystack) {
            tracing::trace!(index, title = haystack, "track rule matched");
            matched = Some(caps);
            break;
        }
    }
    let Some(caps) = matched else {
        tracing::debug!(title = haystack, "no track rule matched");
        return None;
    };

    let artist = caps.name("artist").map_or("", |m| m.as_str()).replace('_', " ");
    let artist_title = reconstruct_artist(strip_request_info(&artist).trim_matches(' '));

    let track_number: i32 = caps
        .name("tracknum")
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let track_numbers = if track_number > 0 {
        vec![track_number]
    } else {
        Vec::new()
    };

    let artist_title_info = ArtistTitleInfo::from_title(&artist_title);
    Some(ParsedTrackInfo {
        artist_title,
        title: caps["track"].trim_matches(' ').to_string(),
        track_numbers,
        artist_title_info,
        quality: quality.detect(&normalized.title),
        language: Language::default(),
    })
}

/// Parse album-level metadata out of a release title.
///
/// Language and release group are read from the extension-stripped release
/// title, quality from the repaired raw title; a `subgroup` capture wins
/// over the generic release group scan.
pub fn parse_album_title(title: &str, quality: &dyn QualityDetect) -> Option<ParsedAlbumInfo> {
    let normalized = normalize::normalize(title).ok()?;
    let extraction = cascade::match_title(&normalized, TitleFamily::Album)?;

    let artist_name = extraction.artist.unwrap_or_default();
    let release_group = extraction
        .subgroup
        .or_else(|| parse_release_group(&normalized.release_title));

    let artist_title_info = ArtistTitleInfo::from_title(&artist_name);
    Some(ParsedAlbumInfo {
        artist_name,
        album_title: extraction.album.unwrap_or_default(),
        release_year: extraction.year.unwrap_or(0),
        artist_title_info,
        quality: quality.detect(&normalized.title),
        language: parse_language(&normalized.release_title),
        release_group,
        release_hash: extraction.hash,
    })
}

/// Artist name from a release title, falling back to the folded comparison
/// key when no album rule accepts the title.
pub fn parse_artist_name(title: &str, quality: &dyn QualityDetect) -> String {
    match parse_album_title(title, quality) {
        Some(parsed) => parsed.artist_name,
        None => clean_artist_name(title),
    }
}

/// Rebuild an artist name from its dot-separated tokens.
///
/// Single letters accumulate into a dot-joined acronym so `W.A.S.P` comes
/// back out as `W.A.S.P.` instead of `W A S P`. A lone `a` only joins an
/// acronym already in progress (or one about to start); everywhere else it
/// is a word. Numeric tokens are ordinary words.
fn reconstruct_artist(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('.').collect();

    let mut name = String::with_capacity(raw.len() + parts.len());
    let mut previous_acronym = false;
    for (index, part) in parts.iter().enumerate() {
        let next_single = parts.get(index + 1).is_some_and(|next| next.len() == 1);
        let single_letter =
            part.len() == 1 && !part.eq_ignore_ascii_case("a") && part.parse::<i32>().is_err();

        if single_letter || (part.eq_ignore_ascii_case("a") && (previous_acronym || next_single)) {
            name.push_str(part);
            name.push('.');
            previous_acronym = true;
        } else {
            if previous_acronym {
                name.push(' ');
                previous_acronym = false;
            }
            name.push_str(part);
            name.push(' ');
        }
    }

    name.trim_matches(' ').to_string()
}
