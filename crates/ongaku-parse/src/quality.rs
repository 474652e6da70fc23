//! Opaque audio quality values and the detection seam used by the parsers.
//!
//! The parsers never interpret quality themselves; they hand the repaired
//! release title to a [`QualityDetect`] implementation and store whatever
//! comes back.

use serde::{Deserialize, Serialize};

/// Audio quality label carried through parsed results without interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quality(String);

impl Quality {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Quality used when nothing could be detected.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }
}

/// Detects audio quality from release metadata.
pub trait QualityDetect {
    /// Detect quality from a release title or file name.
    fn detect(&self, title: &str) -> Quality;

    /// Detect quality from media properties, falling back to the description.
    ///
    /// Callers with probed media info (codec description, bitrate, sample
    /// rate) can override this; the default only looks at the description.
    fn detect_media(&self, description: &str, _bitrate: u32, _sample_rate: u32) -> Quality {
        self.detect(description)
    }
}

/// Detector that never recognizes a quality.
///
/// Useful for tests and for callers that only need title decomposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuality;

impl QualityDetect for NoQuality {
    fn detect(&self, _title: &str) -> Quality {
        Quality::unknown()
    }
}
