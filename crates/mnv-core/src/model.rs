//! Attribute model for embedded media nodes.
//!
//! A media node view mirrors one document node's attribute set. The host
//! editing framework owns the node; the view reads a `MediaAttrs` snapshot
//! and emits `AttrPatch` values back. Field names on the wire match the
//! document schema (`media-type`, `dataFloat`, `dataAlign`), and
//! dimensions accept either JSON numbers or numeric strings — older
//! documents stored `width: "800"`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// What kind of media the node embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "img")]
    Image,
    #[serde(rename = "video")]
    Video,
}

impl MediaKind {
    /// The HTML tag the rendering layer should emit for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Image => "img",
            Self::Video => "video",
        }
    }
}

/// Float placement of the media within the surrounding text flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatMode {
    #[default]
    None,
    Left,
    Right,
}

impl FloatMode {
    /// Rendering class for this mode, or `None` when unset.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("f-left"),
            Self::Right => Some("f-right"),
        }
    }
}

/// Block alignment of the media (mutually exclusive with floating).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl AlignMode {
    /// Rendering class for this mode, or `None` when unset.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("align-left"),
            Self::Center => Some("align-center"),
            Self::Right => Some("align-right"),
        }
    }
}

/// Snapshot of a media node's attributes as stored in the host document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttrs {
    pub src: String,

    #[serde(rename = "media-type")]
    pub kind: MediaKind,

    /// Current rendered width in pixels.
    #[serde(deserialize_with = "dimension_from_number_or_string")]
    pub width: u32,

    /// Current rendered height in pixels.
    #[serde(deserialize_with = "dimension_from_number_or_string")]
    pub height: u32,

    #[serde(default, rename = "dataFloat")]
    pub float: FloatMode,

    #[serde(default, rename = "dataAlign")]
    pub align: AlignMode,
}

/// Partial attribute update emitted toward the host document.
///
/// Only the fields the view ever mutates are present; the host merges
/// `Some` fields into the node's attribute set (last write wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttrPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(rename = "dataFloat", skip_serializing_if = "Option::is_none")]
    pub float: Option<FloatMode>,

    #[serde(rename = "dataAlign", skip_serializing_if = "Option::is_none")]
    pub align: Option<AlignMode>,
}

impl AttrPatch {
    /// A patch carrying only a new size.
    pub fn size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.float.is_none() && self.align.is_none()
    }

    /// Merge this patch into an attribute set.
    pub fn apply_to(&self, attrs: &mut MediaAttrs) {
        if let Some(w) = self.width {
            attrs.width = w;
        }
        if let Some(h) = self.height {
            attrs.height = h;
        }
        if let Some(f) = self.float {
            attrs.float = f;
        }
        if let Some(a) = self.align {
            attrs.align = a;
        }
    }
}

/// Accept `800`, `800.0`, or `"800"` for a pixel dimension.
fn dimension_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct DimensionVisitor;

    impl Visitor<'_> for DimensionVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a pixel dimension as a number or numeric string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("dimension {v} out of range")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("dimension {v} out of range")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 {
                Ok(v.round() as u32)
            } else {
                Err(E::custom(format!("dimension {v} out of range")))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && *n >= 0.0 && *n <= u32::MAX as f64)
                .map(|n| n.round() as u32)
                .ok_or_else(|| E::custom(format!("invalid dimension string {v:?}")))
        }
    }

    deserializer.deserialize_any(DimensionVisitor)
}
