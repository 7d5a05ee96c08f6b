pub mod geometry;
pub mod model;

pub use geometry::{AspectRatio, Dimensions, MIN_MEDIA_DIMENSION, constrain_candidate};
pub use model::{AlignMode, AttrPatch, FloatMode, MediaAttrs, MediaKind};
