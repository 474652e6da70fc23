//! Parsed release metadata returned by the title parsers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::quality::Quality;

/// Title followed by an optional four digit year.
static RE_YEAR_IN_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?<title>.+?)(?:\W|_)?(?<year>\d{4})").unwrap());

/// Artist title with the release year split out when one is embedded in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistTitleInfo {
    /// Artist title exactly as parsed.
    pub title: String,
    /// Artist title with a trailing year removed, if one was present.
    pub title_without_year: String,
    /// Year embedded in the title, or `0` when absent.
    pub year: i32,
}

impl ArtistTitleInfo {
    /// Split an embedded year out of an artist title.
    ///
    /// # Example
    ///
    /// ```
    /// use ongaku_parse::ArtistTitleInfo;
    ///
    /// let info = ArtistTitleInfo::from_title("London 2012");
    /// assert_eq!(info.title_without_year, "London");
    /// assert_eq!(info.year, 2012);
    /// ```
    pub fn from_title(title: &str) -> Self {
        match RE_YEAR_IN_TITLE.captures(title) {
            Some(caps) => Self {
                title: title.to_string(),
                title_without_year: caps["title"].to_string(),
                year: caps["year"].parse().unwrap_or(0),
            },
            None => Self {
                title: title.to_string(),
                title_without_year: title.to_string(),
                year: 0,
            },
        }
    }
}

/// Track-level metadata parsed from a single file release title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedTrackInfo {
    /// Artist name with separator dots reassembled into words and acronyms.
    pub artist_title: String,
    /// Track title.
    pub title: String,
    /// Track numbers found in the title; empty when none were recognized.
    pub track_numbers: Vec<i32>,
    /// Artist title with an embedded year split out.
    pub artist_title_info: ArtistTitleInfo,
    /// Audio quality detected from the release title.
    pub quality: Quality,
    /// Release language.
    pub language: Language,
}

/// Album-level metadata parsed from a release title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedAlbumInfo {
    /// Artist name with separators replaced by spaces.
    pub artist_name: String,
    /// Album title with separators replaced by spaces.
    pub album_title: String,
    /// Release year, or `0` when the title carried none.
    pub release_year: i32,
    /// Artist name with an embedded year split out.
    pub artist_title_info: ArtistTitleInfo,
    /// Audio quality detected from the release title.
    pub quality: Quality,
    /// Release language.
    pub language: Language,
    /// Scene release group or fansub group, when one could be extracted.
    pub release_group: Option<String>,
    /// Checksum tag carried in the release title.
    pub release_hash: Option<String>,
}

/// Languages recognized in release titles.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Language {
    #[default]
    Unknown,
    English,
    French,
    Spanish,
    German,
    Italian,
    Danish,
    Dutch,
    Japanese,
    Cantonese,
    Mandarin,
    Russian,
    Polish,
    Vietnamese,
    Swedish,
    Norwegian,
    Finnish,
    Turkish,
    Portuguese,
    Flemish,
    Greek,
    Korean,
    Hungarian,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_title_info_splits_year() {
        let info = ArtistTitleInfo::from_title("The Artist 2015");
        assert_eq!(info.title, "The Artist 2015");
        assert_eq!(info.title_without_year, "The Artist");
        assert_eq!(info.year, 2015);
    }

    #[test]
    fn test_artist_title_info_without_year() {
        let info = ArtistTitleInfo::from_title("The Artist");
        assert_eq!(info.title, "The Artist");
        assert_eq!(info.title_without_year, "The Artist");
        assert_eq!(info.year, 0);
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::French.to_string(), "French");
        assert_eq!(Language::default(), Language::Unknown);
    }

    #[test]
    fn test_album_info_serde_round_trip() {
        let info = ParsedAlbumInfo {
            artist_name: "Artist Name".to_string(),
            album_title: "Album Title".to_string(),
            release_year: 2015,
            artist_title_info: ArtistTitleInfo::from_title("Artist Name"),
            quality: Quality::new("FLAC"),
            language: Language::English,
            release_group: Some("GROUP".to_string()),
            release_hash: None,
        };

        let json = serde_json::to_value(&info).expect("should serialize");
        assert_eq!(json["album_title"], "Album Title");
        assert_eq!(json["release_year"], 2015);
        assert_eq!(json["language"], "English");
        assert_eq!(json["quality"], "FLAC");

        let back: ParsedAlbumInfo = serde_json::from_value(json).expect("should deserialize");
        assert_eq!(back, info);
    }
}
