//! Release group extraction.
//!
//! Scene releases append the group after a dash (`...-GRP`), anime fansubs
//! lead with it in square brackets (`[Group] ...`). Both forms are matched
//! on the extension-stripped release title, not the simplified one, because
//! simplification may eat the very tokens the group hides behind.

use std::sync::LazyLock;

use regex::Regex;

use crate::extensions::remove_file_extension;
use crate::normalize::remove_website_prefix;

/// Anime subgroup in leading square brackets, non-space at both edges.
static RE_ANIME_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[(?<subgroup>\S(?:.*?\S)?)\]").unwrap());

/// Episode-marker prefixes and obfuscation suffixes removed before matching.
static RE_CLEAN_RELEASE_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:.*?[-._ ]S\d+E\d+[-._ ])|(?:-(?:RP|1|NZBGeek|Obfuscated|Scrambled|sample))+$")
        .unwrap()
});

/// Dash-prefixed release group candidate.
static RE_RELEASE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)-(?<releasegroup>[a-z0-9]+)(?:\b|[-._ ])").unwrap());

/// Tokens that disqualify a candidate despite the leading dash.
const NOT_A_GROUP: &[&str] = &["web-dl", "480p", "720p", "1080p", "2160p"];

/// Extract the release group from a release title.
///
/// A bracketed anime subgroup wins outright. Otherwise the last
/// dash-prefixed token that is not a resolution or source marker is taken,
/// and purely numeric tokens are discarded.
///
/// # Example
///
/// ```
/// use ongaku_parse::release_group::parse_release_group;
///
/// assert_eq!(
///     parse_release_group("Artist.Name-Album.Title.(2015).FLAC-NOGRP"),
///     Some("NOGRP".to_string())
/// );
/// ```
pub fn parse_release_group(title: &str) -> Option<String> {
    let trimmed = remove_file_extension(title.trim());
    let trimmed = remove_website_prefix(&trimmed);

    if let Some(caps) = RE_ANIME_GROUP.captures(&trimmed) {
        return Some(caps["subgroup"].to_string());
    }

    let cleaned = RE_CLEAN_RELEASE_GROUP.replace_all(&trimmed, "");

    let mut group: Option<&str> = None;
    for caps in RE_RELEASE_GROUP.captures_iter(&cleaned) {
        let Some(candidate) = caps.name("releasegroup") else {
            continue;
        };
        let lead_in = cleaned[..candidate.end()].to_lowercase();
        if NOT_A_GROUP.iter().any(|token| lead_in.ends_with(token)) {
            continue;
        }
        group = Some(candidate.as_str());
    }

    let group = group?;
    if group.parse::<i32>().is_ok() {
        return None;
    }

    Some(group.to_string())
}
