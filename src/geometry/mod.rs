//! Geometric primitives for layout analysis.
//!
//! This module provides basic geometric types and operations used throughout
//! the layout analysis algorithms. Page coordinates follow the extraction
//! convention: the origin is the top-left corner and y grows downward.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

/// Number of decimal places used when bounding boxes leave the engine.
pub const BBOX_DECIMALS: u32 = 2;

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in page space.
///
/// Stored as origin plus dimensions; the `[x0, y0, x1, y1]` corner form is
/// what gets serialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    ///
    /// Corners may be given in either order; the result always has
    /// non-negative width and height.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.y, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// let center = rect.center();
    /// assert_eq!(center.x, 50.0);
    /// assert_eq!(center.y, 25.0);
    /// ```
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corner form `[x0, y0, x1, y1]`.
    pub fn to_array(&self) -> [f32; 4] {
        [self.left(), self.top(), self.right(), self.bottom()]
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Length of the shared horizontal span of two rectangles (0 when disjoint).
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::geometry::Rect;
    ///
    /// let a = Rect::from_points(0.0, 0.0, 50.0, 10.0);
    /// let b = Rect::from_points(40.0, 20.0, 90.0, 30.0);
    /// assert_eq!(a.horizontal_overlap(&b), 10.0);
    /// ```
    pub fn horizontal_overlap(&self, other: &Rect) -> f32 {
        (self.right().min(other.right()) - self.left().max(other.left())).max(0.0)
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::new(25.0, 25.0, 50.0, 50.0);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union.x, 0.0);
    /// assert_eq!(union.y, 0.0);
    /// assert_eq!(union.right(), 75.0);
    /// assert_eq!(union.bottom(), 75.0);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Union of every rectangle in the iterator, `None` when it is empty.
    pub fn union_all<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| Some(acc.map_or(*r, |a| a.union(r))))
    }

    /// Round the corner coordinates to `decimals` places.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::geometry::Rect;
    ///
    /// let r = Rect::from_points(1.004, 2.126, 10.0, 20.555).rounded(2);
    /// assert_eq!(r.left(), 1.0);
    /// assert_eq!(r.top(), 2.13);
    /// assert!((r.bottom() - 20.56).abs() < 1e-4);
    /// ```
    pub fn rounded(&self, decimals: u32) -> Rect {
        let [x0, y0, x1, y1] = self.to_array();
        Rect::from_points(
            round_to(x0, decimals),
            round_to(y0, decimals),
            round_to(x1, decimals),
            round_to(y1, decimals),
        )
    }
}

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let factor = 10f64.powi(decimals as i32);
    ((value as f64 * factor).round() / factor) as f32
}

impl Serialize for Rect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        for v in self.to_array() {
            tuple.serialize_element(&round_to(v, BBOX_DECIMALS))?;
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Rect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let corners = <[f32; 4]>::deserialize(deserializer)?;
        if corners.iter().any(|v| !v.is_finite()) {
            return Err(de::Error::custom("bbox coordinates must be finite"));
        }
        let [x0, y0, x1, y1] = corners;
        Ok(Rect::from_points(x0, y0, x1, y1))
    }
}
