//! Album-family rule table.
//!
//! Artist and album are split on the dash between them; the spaced-dash
//! forms run before the tight-dash forms so that a hyphenated artist name
//! is not cut in half when a spaced separator is present. Discography
//! releases carry no single album and keep only the artist.

use std::sync::LazyLock;

use regex::Captures;

use super::{clean_title, group_i32, ExtractionResult, Rule};

pub(crate) static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Artist - Album (Year Source)
        Rule::new(
            r"(?i)^(?<artist>.+?)(?: - )+(?<album>.+?)\W*(?:\(|\[).+?(?<year>\d{4})",
            extract_album,
        ),
        // Artist - Album (Year)
        Rule::new(
            r"(?i)^(?<artist>.+?)(?: - )+(?<album>.+?)\W*(?:\(|\[)(?<year>\d{4})",
            extract_album,
        ),
        // Artist - Album (Source)
        Rule::new(
            r"(?i)^(?<artist>.+?)(?: - )+(?<album>.+?)\W*(?:\(|\[)",
            extract_album,
        ),
        // Artist - Album Year
        Rule::new(
            r"(?i)^(?<artist>.+?)(?: - )+(?<album>.+?)\W*(?<year>\d{4}|\d{3})",
            extract_album,
        ),
        // Artist Discography 1997 - 2005
        Rule::new(
            r"(?i)^(?<artist>.+?)\W*(?<discography>Discograghy|Discografia).+(?<startyear>\d{4}).+(?<endyear>\d{4})",
            extract_discography,
        ),
        // Artist-Album (Year Source)
        Rule::new(
            r"(?i)^(?<artist>.+?)(?:-)+(?<album>.+?)\W*(?:\(|\[).+?(?<year>\d{4})",
            extract_album,
        ),
        // Artist-Album (Year)
        Rule::new(
            r"(?i)^(?<artist>.+?)(?:-)+(?<album>.+?)\W*(?:\(|\[)(?<year>\d{4})",
            extract_album,
        ),
        // Artist-Album (Source)
        Rule::new(
            r"(?i)^(?<artist>.+?)(?:-)+(?<album>.+?)\W*(?:\(|\[)",
            extract_album,
        ),
        // Artist-Album Year
        Rule::new(
            r"(?i)^(?<artist>.+?)(?:-)+(?<album>.+?)\W*(?<year>\d{4}|\d{3})",
            extract_album,
        ),
    ]
});

fn extract_album(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    Some(ExtractionResult {
        artist: Some(clean_title(&caps["artist"])),
        album: Some(clean_title(&caps["album"])),
        year: group_i32(caps, "year"),
        ..Default::default()
    })
}

fn extract_discography(caps: &Captures<'_>, _haystack: &str) -> Option<ExtractionResult> {
    Some(ExtractionResult {
        artist: Some(clean_title(&caps["artist"])),
        ..Default::default()
    })
}
