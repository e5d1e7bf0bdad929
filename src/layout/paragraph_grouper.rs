//! Paragraph grouping within a single column.
//!
//! Lines of one column are walked top to bottom and accreted into the open
//! paragraph until one of the break rules fires:
//!
//! 1. the vertical gap to the previous line exceeds the paragraph gap,
//! 2. the previous line ends a sentence and the gap exceeds a looser bound,
//! 3. the left edge moves by more than the indent threshold (when enabled).
//!
//! All thresholds derive from the median line height of the column, so
//! small and large print are handled alike.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::geometry::Rect;
use crate::layout::clustering::positive_median_or;
use crate::layout::line_grouper::Line;
use crate::pipeline::config::{IndentRule, ParagraphConfig};
use crate::utils::safe_float_cmp;

/// An ordered run of lines within one column.
///
/// Lines are referenced by their index in the page's line list, which is
/// also how paragraphs appear in the JSON output.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// Indices of the member lines, top to bottom
    pub line_indices: Vec<usize>,
    /// Union of the member line boxes
    pub bbox: Rect,
}

impl Paragraph {
    /// Number of lines.
    pub fn len(&self) -> usize {
        self.line_indices.len()
    }

    /// True for a paragraph without lines (never produced by the grouper).
    pub fn is_empty(&self) -> bool {
        self.line_indices.is_empty()
    }

    /// Member line texts joined by newlines.
    pub fn text(&self, lines: &[Line]) -> String {
        self.line_indices
            .iter()
            .filter_map(|&i| lines.get(i))
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for Paragraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.line_indices.len()))?;
        for index in &self.line_indices {
            seq.serialize_element(index)?;
        }
        seq.end()
    }
}

/// Accumulates lines for a paragraph until it is closed.
#[derive(Debug, Clone)]
pub struct ParagraphBuilder {
    line_indices: Vec<usize>,
    bbox: Rect,
}

impl ParagraphBuilder {
    /// Open a paragraph with its first line.
    pub fn start(index: usize, line: &Line) -> Self {
        Self {
            line_indices: vec![index],
            bbox: line.bbox,
        }
    }

    /// Append a line.
    pub fn push(&mut self, index: usize, line: &Line) {
        self.bbox = self.bbox.union(&line.bbox);
        self.line_indices.push(index);
    }

    /// Close the paragraph.
    pub fn finish(self) -> Paragraph {
        Paragraph {
            line_indices: self.line_indices,
            bbox: self.bbox,
        }
    }
}

/// Why a new paragraph was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    /// Vertical gap above the paragraph gap
    Gap,
    /// Sentence end followed by a moderate gap
    Punctuation,
    /// Left edge moved
    Indent,
}

/// Thresholds derived for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphThresholds {
    /// Gap that always breaks
    pub gap: f32,
    /// Gap that breaks after terminal punctuation
    pub punctuation_gap: f32,
    /// Left-edge change that breaks, `None` when the rule is off
    pub indent: Option<f32>,
}

impl ParagraphThresholds {
    /// Derive thresholds from the median positive height of `lines`.
    pub fn derive<'a>(lines: impl IntoIterator<Item = &'a Line>, config: &ParagraphConfig) -> Self {
        let median_height =
            positive_median_or(lines.into_iter().map(Line::height), config.fallback_height);
        let indent = match config.indent {
            IndentRule::Disabled => None,
            IndentRule::Absolute(points) => Some(points),
            IndentRule::RelativeToLineHeight(multiple) => Some(multiple * median_height),
        };
        Self {
            gap: config
                .gap_threshold
                .unwrap_or(config.gap_ratio * median_height),
            punctuation_gap: config.punctuation_gap_ratio * median_height,
            indent,
        }
    }
}

/// Decide whether `curr` starts a new paragraph after `prev`.
pub fn paragraph_break(
    prev: &Line,
    curr: &Line,
    thresholds: &ParagraphThresholds,
    terminal_punctuation: &[char],
) -> Option<BreakReason> {
    let gap = curr.bbox.top() - prev.bbox.bottom();
    if gap > thresholds.gap {
        return Some(BreakReason::Gap);
    }

    let ends_sentence = prev
        .trailing_char()
        .is_some_and(|c| terminal_punctuation.contains(&c));
    if ends_sentence && gap > thresholds.punctuation_gap {
        return Some(BreakReason::Punctuation);
    }

    if let Some(indent) = thresholds.indent {
        if (curr.bbox.left() - prev.bbox.left()).abs() > indent {
            return Some(BreakReason::Indent);
        }
    }

    None
}

/// Group the lines selected by `candidates` into paragraphs.
///
/// `candidates` are indices into `lines`, normally the non-table lines of
/// one column. They are visited top to bottom (by top edge, then left
/// edge); the returned paragraphs keep that order and reference lines by
/// their index in `lines`. Out-of-range indices are ignored.
///
/// # Examples
///
/// ```
/// use layout_oxide::geometry::Rect;
/// use layout_oxide::layout::{Fragment, LineBuilder};
/// use layout_oxide::layout::paragraph_grouper::group_lines_into_paragraphs;
/// use layout_oxide::pipeline::ParagraphConfig;
///
/// let line = |text: &str, y: f32| {
///     LineBuilder::start(Fragment::new(text, Rect::from_points(10.0, y, 200.0, y + 10.0), "", 10.0))
///         .finish()
/// };
/// let lines = vec![line("First paragraph", 100.0), line("continues here.", 112.0), line("Second", 150.0)];
///
/// let paragraphs = group_lines_into_paragraphs(&lines, &[0, 1, 2], &ParagraphConfig::default());
/// assert_eq!(paragraphs.len(), 2);
/// assert_eq!(paragraphs[0].line_indices, vec![0, 1]);
/// assert_eq!(paragraphs[1].line_indices, vec![2]);
/// ```
pub fn group_lines_into_paragraphs(
    lines: &[Line],
    candidates: &[usize],
    config: &ParagraphConfig,
) -> Vec<Paragraph> {
    let mut order: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| i < lines.len())
        .collect();
    if order.is_empty() {
        return vec![];
    }
    order.sort_by(|&a, &b| {
        safe_float_cmp(lines[a].bbox.top(), lines[b].bbox.top())
            .then_with(|| safe_float_cmp(lines[a].bbox.left(), lines[b].bbox.left()))
    });

    let thresholds = ParagraphThresholds::derive(order.iter().map(|&i| &lines[i]), config);

    let mut paragraphs = vec![];
    let mut current = ParagraphBuilder::start(order[0], &lines[order[0]]);
    for pair in order.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        match paragraph_break(&lines[prev], &lines[curr], &thresholds, &config.terminal_punctuation) {
            Some(reason) => {
                log::trace!("Paragraph break before line {}: {:?}", curr, reason);
                let next = ParagraphBuilder::start(curr, &lines[curr]);
                paragraphs.push(std::mem::replace(&mut current, next).finish());
            },
            None => current.push(curr, &lines[curr]),
        }
    }
    paragraphs.push(current.finish());

    log::debug!(
        "Paragraph grouping: {} lines, gap={:.2}, paragraphs={}",
        order.len(),
        thresholds.gap,
        paragraphs.len()
    );

    paragraphs
}
