//! Line-segment output handed to a visualizer.

use refract_math::DVec3;
use serde::{Deserialize, Serialize};

use crate::Band;

/// A line segment, serialized as `[[x, y, z], [x, y, z]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[DVec3; 2]", into = "[DVec3; 2]")]
pub struct Segment {
    pub start: DVec3,
    pub end: DVec3,
}

impl Segment {
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }
}

impl From<[DVec3; 2]> for Segment {
    fn from([start, end]: [DVec3; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Segment> for [DVec3; 2] {
    fn from(segment: Segment) -> Self {
        [segment.start, segment.end]
    }
}

/// The four legs of a traced ray, in travel order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSegments {
    /// Origin to entry point
    pub incoming: Segment,
    /// Entry point to internal reflection point
    pub inside1: Segment,
    /// Internal reflection point to exit point
    pub inside2: Segment,
    /// Exit point to the end of the drawn extension
    pub outgoing: Segment,
}

impl PathSegments {
    pub fn as_array(&self) -> [Segment; 4] {
        [self.incoming, self.inside1, self.inside2, self.outgoing]
    }
}

/// One traced ray: its color and four connected segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayPath {
    #[serde(rename = "color")]
    pub band: Band,
    #[serde(rename = "path")]
    pub segments: PathSegments,
}

impl RayPath {
    pub fn color(&self) -> &'static str {
        self.band.label()
    }

    /// True when each segment starts within `tolerance` of where the previous one ends.
    pub fn is_contiguous(&self, tolerance: f64) -> bool {
        self.segments
            .as_array()
            .windows(2)
            .all(|w| w[0].end.abs_diff_eq(w[1].start, tolerance))
    }
}
