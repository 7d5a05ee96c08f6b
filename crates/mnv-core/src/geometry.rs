//! Geometry rules for media resizing.
//!
//! A candidate size goes through a fixed pipeline: clamp the width to the
//! editing surface, derive the height from the aspect ratio, then reject
//! the whole candidate if either dimension falls under the minimum. The
//! bounds are asymmetric on purpose — clamped above, rejected below — so
//! a drag past the minimum freezes the size instead of pinning it.

/// Smallest width or height a media node may take, in pixels.
pub const MIN_MEDIA_DIMENSION: u32 = 100;

/// A rendered size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn meets_minimum(&self) -> bool {
        self.width >= MIN_MEDIA_DIMENSION && self.height >= MIN_MEDIA_DIMENSION
    }
}

/// Width-to-height ratio of the media's intrinsic dimensions.
///
/// Captured once when the media finishes loading and fixed for the life
/// of the node view. Construction fails on degenerate (zero) dimensions,
/// so a held value is always a positive finite ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f32);

impl AspectRatio {
    /// Build from the media's natural (intrinsic) dimensions.
    pub fn from_natural(natural_width: u32, natural_height: u32) -> Option<Self> {
        if natural_width == 0 || natural_height == 0 {
            return None;
        }
        Some(Self(natural_width as f32 / natural_height as f32))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Height consistent with this ratio at the given width, rounded to
    /// whole pixels (ties away from zero).
    pub fn height_for_width(&self, width: u32) -> u32 {
        (width as f32 / self.0).round() as u32
    }
}

/// Run a candidate width through the constraint pipeline.
///
/// `candidate_width` is signed: a large shrink delta may take it below
/// zero, which the minimum bound then rejects. Returns `None` when the
/// candidate violates the minimum; the caller keeps the prior size.
pub fn constrain_candidate(
    candidate_width: i64,
    container_width: u32,
    ratio: AspectRatio,
) -> Option<Dimensions> {
    let width = candidate_width.clamp(0, i64::from(container_width)) as u32;
    let dims = Dimensions::new(width, ratio.height_for_width(width));
    dims.meets_minimum().then_some(dims)
}
