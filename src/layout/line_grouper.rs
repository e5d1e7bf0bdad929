//! Grouping of fragments into text lines.
//!
//! Fragments are walked top to bottom (by vertical center, then left edge).
//! A fragment joins the open line while its vertical center stays within the
//! merge delta of the previously accepted fragment; otherwise the line is
//! closed and a new one starts. The delta is a fraction of the median
//! fragment height, so it follows the page's dominant font size.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::geometry::{Point, Rect};
use crate::layout::clustering::{mean, positive_median_or};
use crate::layout::fragment::Fragment;
use crate::pipeline::config::LineConfig;
use crate::utils::safe_float_cmp;

/// A line of text: fragments sharing a vertical band, ordered left to right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Member fragments, left to right
    #[serde(skip)]
    pub fragments: Vec<Fragment>,
    /// Member texts joined by single spaces
    pub text: String,
    /// Union of the member bounding boxes
    pub bbox: Rect,
    /// Majority column of the member fragments
    #[serde(rename = "col")]
    pub column: usize,
}

impl Line {
    /// Center of the line's bounding box.
    pub fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Height of the line's bounding box.
    pub fn height(&self) -> f32 {
        self.bbox.height
    }

    /// Mean font size of the member fragments, ignoring non-positive sizes.
    pub fn mean_font_size(&self) -> Option<f32> {
        let sizes: Vec<f32> = self
            .fragments
            .iter()
            .map(|f| f.font_size)
            .filter(|s| *s > 0.0)
            .collect();
        mean(&sizes)
    }

    /// Last non-whitespace character of the text.
    pub fn trailing_char(&self) -> Option<char> {
        self.text.trim_end().chars().last()
    }
}

/// Accumulates fragments for a line until it is closed.
#[derive(Debug, Clone)]
pub struct LineBuilder {
    fragments: Vec<Fragment>,
    bbox: Rect,
    last_center_y: f32,
}

impl LineBuilder {
    /// Open a line with its first fragment.
    pub fn start(first: Fragment) -> Self {
        Self {
            bbox: first.bbox,
            last_center_y: first.center().y,
            fragments: vec![first],
        }
    }

    /// Whether `fragment` sits close enough vertically to join this line.
    pub fn accepts(&self, fragment: &Fragment, threshold: f32) -> bool {
        (fragment.center().y - self.last_center_y).abs() <= threshold
    }

    /// Add a fragment to the line.
    pub fn push(&mut self, fragment: Fragment) {
        self.bbox = self.bbox.union(&fragment.bbox);
        self.last_center_y = fragment.center().y;
        self.fragments.push(fragment);
    }

    /// Number of fragments accumulated so far.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// True when no fragment has been accumulated (never for a started builder).
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Close the line: order members left to right and derive text and column.
    pub fn finish(mut self) -> Line {
        self.fragments.sort_by(horizontal_order);
        let text = self
            .fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let column = majority_column(self.fragments.iter().map(|f| f.column));
        Line {
            fragments: self.fragments,
            text,
            bbox: self.bbox,
            column,
        }
    }
}

/// Left-to-right order of fragments.
///
/// Ties on the left edge fall through to the right edge, the top edge, the
/// text and the font size, so the result never depends on input order.
fn horizontal_order(a: &Fragment, b: &Fragment) -> Ordering {
    safe_float_cmp(a.bbox.left(), b.bbox.left())
        .then_with(|| safe_float_cmp(a.bbox.right(), b.bbox.right()))
        .then_with(|| safe_float_cmp(a.bbox.top(), b.bbox.top()))
        .then_with(|| a.text.cmp(&b.text))
        .then_with(|| safe_float_cmp(a.font_size, b.font_size))
}

/// Most frequent column id; ties resolve to the lowest id, empty input to 0.
///
/// # Examples
///
/// ```
/// use layout_oxide::layout::line_grouper::majority_column;
///
/// assert_eq!(majority_column([2, 1, 2]), 2);
/// assert_eq!(majority_column([3, 1]), 1);
/// assert_eq!(majority_column(std::iter::empty()), 0);
/// ```
pub fn majority_column(columns: impl IntoIterator<Item = usize>) -> usize {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for column in columns {
        *counts.entry(column).or_default() += 1;
    }

    let mut best: Option<(usize, usize)> = None;
    for (column, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((column, count));
        }
    }
    best.map_or(0, |(column, _)| column)
}

/// Vertical-center delta under which two fragments share a line.
pub fn line_merge_threshold(fragments: &[Fragment], config: &LineConfig) -> f32 {
    if let Some(threshold) = config.merge_threshold {
        return threshold;
    }
    let median_height =
        positive_median_or(fragments.iter().map(Fragment::height), config.fallback_height);
    config.min_threshold.max(median_height * config.height_ratio)
}

/// Group fragments into lines ordered top to bottom.
///
/// Every input fragment ends up in exactly one line. Lines are sorted by
/// vertical center; fragments within a line are sorted by left edge.
///
/// # Examples
///
/// ```
/// use layout_oxide::geometry::Rect;
/// use layout_oxide::layout::{Fragment, line_grouper::group_fragments_into_lines};
/// use layout_oxide::pipeline::LineConfig;
///
/// let fragments = vec![
///     Fragment::new("world", Rect::from_points(60.0, 101.0, 100.0, 111.0), "", 10.0),
///     Fragment::new("Hello", Rect::from_points(10.0, 100.0, 50.0, 110.0), "", 10.0),
///     Fragment::new("Next", Rect::from_points(10.0, 130.0, 40.0, 140.0), "", 10.0),
/// ];
/// let lines = group_fragments_into_lines(fragments, &LineConfig::default());
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].text, "Hello world");
/// assert_eq!(lines[1].text, "Next");
/// ```
pub fn group_fragments_into_lines(fragments: Vec<Fragment>, config: &LineConfig) -> Vec<Line> {
    if fragments.is_empty() {
        return vec![];
    }

    let threshold = line_merge_threshold(&fragments, config);

    let mut sorted = fragments;
    sorted.sort_by(|a, b| {
        safe_float_cmp(a.center().y, b.center().y).then_with(|| horizontal_order(a, b))
    });

    let mut lines = vec![];
    let mut iter = sorted.into_iter();
    let mut current = match iter.next() {
        Some(first) => LineBuilder::start(first),
        None => return lines,
    };

    for fragment in iter {
        if current.accepts(&fragment, threshold) {
            current.push(fragment);
        } else {
            let next = LineBuilder::start(fragment);
            lines.push(std::mem::replace(&mut current, next).finish());
        }
    }
    lines.push(current.finish());

    // Mixed-height lines can have bbox centers out of walk order
    lines.sort_by(|a, b| safe_float_cmp(a.center().y, b.center().y));

    log::debug!(
        "Line grouping: threshold={:.2}, lines={}",
        threshold,
        lines.len()
    );

    lines
}
