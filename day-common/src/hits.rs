//! Search hit model
//!
//! A hit is one event record returned by the hosted search index. Only the
//! identifier and the date take part in grouping; every other field is
//! carried through untouched for the renderer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minimal view of a record the grouping pipeline needs
///
/// Implemented by [`Hit`] and by references to any implementor, so the
/// grouper can work on borrowed or owned sequences alike.
pub trait HitRecord {
    /// Stable record identifier (used for logging and fingerprints)
    fn object_id(&self) -> &str;

    /// Raw date field, if the record carries one
    fn raw_date(&self) -> Option<&str>;
}

impl<T: HitRecord + ?Sized> HitRecord for &T {
    fn object_id(&self) -> &str {
        (**self).object_id()
    }

    fn raw_date(&self) -> Option<&str> {
        (**self).raw_date()
    }
}

/// Event hit as indexed from the CMS
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hit {
    /// CMS document id
    #[serde(rename = "_id")]
    pub id: String,

    /// ISO-ish date string (may be missing or malformed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Promo image URL
    #[serde(
        default,
        rename = "pictureUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub picture_url: Option<String>,

    /// Portable text blocks describing the event (opaque)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<Vec<Value>>,

    /// Portable text blocks for the venue (opaque)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<Value>>,

    /// Tag references, resolved or not (opaque)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_tags: Option<Vec<Value>>,

    /// "Add to calendar" link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_link: Option<String>,

    /// Any other indexed fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Hit {
    /// Create a hit with only an id and an optional date
    pub fn new(id: impl Into<String>, date: Option<&str>) -> Self {
        Self {
            id: id.into(),
            date: date.map(str::to_string),
            ..Default::default()
        }
    }

    /// Builder-style title setter
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl HitRecord for Hit {
    fn object_id(&self) -> &str {
        &self.id
    }

    fn raw_date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}
