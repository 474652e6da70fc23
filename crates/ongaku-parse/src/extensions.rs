//! Known audio file extensions and release title extension stripping.

use std::sync::LazyLock;

use phf::phf_set;
use regex::{Captures, Regex};

/// Trailing file extension candidate: a dot followed by 2-4 alphanumerics.
static RE_FILE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.[a-z0-9]{2,4}$").unwrap());

/// Audio container extensions recognized as media files.
pub static MEDIA_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    ".mp1",
    ".mp2",
    ".mp3",
    ".m4a",
    ".m4b",
    ".m4p",
    ".aac",
    ".ogg",
    ".oga",
    ".opus",
    ".wma",
    ".wav",
    ".wv",
    ".flac",
    ".ape",
    ".aif",
    ".aiff",
    ".alac",
};

/// Sidecar extensions stripped alongside audio extensions.
const SIDECAR_EXTENSIONS: &[&str] = &[".par2", ".nzb"];

/// Remove a trailing media or sidecar extension from a release title.
///
/// Unknown extensions stay in place so titles ending in things like
/// `.mkv` or a dotted abbreviation are left untouched.
pub fn remove_file_extension(title: &str) -> String {
    RE_FILE_EXTENSION
        .replace(title, |caps: &Captures<'_>| {
            let extension = caps[0].to_lowercase();
            if MEDIA_EXTENSIONS.contains(extension.as_str())
                || SIDECAR_EXTENSIONS.contains(&extension.as_str())
            {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
