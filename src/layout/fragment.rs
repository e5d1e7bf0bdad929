//! Positioned text fragments, the atoms of layout analysis.
//!
//! A fragment is a complete string as the page extractor yields it (one
//! span of uniformly styled text), together with its bounding box and font.
//! The engine never edits a fragment; the only thing it adds is the column
//! label assigned by the column classifier.

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

/// A positioned run of text extracted from a page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fragment {
    /// The text string
    pub text: String,
    /// Bounding box in page space (y grows downward)
    pub bbox: Rect,
    /// Font name, empty when the extractor did not report one
    #[serde(default, alias = "font", deserialize_with = "null_as_empty")]
    pub font_name: String,
    /// Font size in points
    #[serde(default, alias = "size")]
    pub font_size: f32,
    /// Extractor flags, carried through untouched
    #[serde(default)]
    pub flags: Option<u32>,
    /// Column label assigned during page analysis
    #[serde(skip)]
    pub column: usize,
}

impl Fragment {
    /// Create a fragment in column 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::geometry::Rect;
    /// use layout_oxide::layout::Fragment;
    ///
    /// let f = Fragment::new("Total", Rect::from_points(10.0, 20.0, 50.0, 30.0), "Helvetica", 10.0);
    /// assert_eq!(f.center().x, 30.0);
    /// assert_eq!(f.center().y, 25.0);
    /// ```
    pub fn new(
        text: impl Into<String>,
        bbox: Rect,
        font_name: impl Into<String>,
        font_size: f32,
    ) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_name: font_name.into(),
            font_size,
            flags: None,
            column: 0,
        }
    }

    /// Return the same fragment labelled with `column`.
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Horizontal extent of the bounding box.
    pub fn width(&self) -> f32 {
        self.bbox.width
    }

    /// Vertical extent of the bounding box.
    pub fn height(&self) -> f32 {
        self.bbox.height
    }

    /// True when the text is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check that the fragment's geometry can be reasoned about.
    ///
    /// `index` is only used to locate the fragment in the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        if !self.bbox.is_finite() {
            return Err(Error::InvalidFragment {
                index,
                reason: format!("non-finite bbox {:?}", self.bbox.to_array()),
            });
        }
        if !self.font_size.is_finite() {
            return Err(Error::InvalidFragment {
                index,
                reason: format!("non-finite font size {}", self.font_size),
            });
        }
        Ok(())
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
