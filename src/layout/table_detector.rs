//! Table detection using alignment analysis.
//!
//! Two strategies are available behind the [`TableDetector`] trait:
//!
//! - [`SegmentAlignmentDetector`] (default): every line is split into
//!   segments at wide horizontal gaps. Consecutive multi-segment lines whose
//!   segments overlap horizontally form a block, and the block's columns are
//!   recovered by clustering the segment centers of that block only. Keeping
//!   the clustering local to a block stops unrelated aligned body text (list
//!   indents, hanging captions) from being read as table columns.
//! - [`GlobalGridDetector`]: fragment centers of the whole page are
//!   clustered once, and runs of lines that touch several of those global
//!   columns are read as grids.
//!
//! The strategy is chosen with [`TableStrategyType`]; a page is only ever
//! analysed by one of them.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::geometry::Rect;
use crate::layout::clustering::{cluster_1d, cluster_labels, nearest_cluster, Cluster};
use crate::layout::line_grouper::Line;
use crate::pipeline::config::{TableConfig, TableStrategyType};

/// A detected table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Cell texts, row-major; unmatched cells hold an empty string
    pub rows: Vec<Vec<String>>,
    /// Bounding box, rounded to the configured number of decimals
    pub bbox: Rect,
    /// Indices (into the analysed line slice) of the lines the rows came from
    #[serde(skip)]
    pub line_indices: Vec<usize>,
    /// Horizontal centers of the derived columns, left to right
    #[serde(skip)]
    pub column_centers: Vec<f32>,
}

impl Table {
    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of derived columns.
    pub fn num_cols(&self) -> usize {
        self.column_centers.len()
    }

    /// Text of one cell.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// A contiguous run of fragments within one line with no wide gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Left edge
    pub x0: f32,
    /// Right edge
    pub x1: f32,
    /// Member texts joined by single spaces
    pub text: String,
    /// Number of fragments in the run
    pub fragment_count: usize,
}

impl Segment {
    /// Horizontal center.
    pub fn center(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Length of the horizontal span shared with `other`.
    pub fn overlap(&self, other: &Segment) -> f32 {
        (self.x1.min(other.x1) - self.x0.max(other.x0)).max(0.0)
    }

    /// Two segments align when they share more than `tolerance` points.
    pub fn aligns_with(&self, other: &Segment, tolerance: f32) -> bool {
        self.overlap(other) > tolerance
    }
}

/// Gap between consecutive fragments that starts a new segment in `line`.
///
/// Derived from the line's mean font size: a space is about
/// `space_width_ratio` of the font size wide, and a break needs
/// `space_scale` spaces.
pub fn segment_gap_threshold(line: &Line, config: &TableConfig) -> f32 {
    if let Some(gap) = config.segment_gap {
        return gap;
    }
    let font_size = line.mean_font_size().unwrap_or(config.fallback_font_size);
    font_size * config.space_width_ratio * config.space_scale
}

/// Split a line into segments at wide horizontal gaps.
///
/// # Examples
///
/// ```
/// use layout_oxide::geometry::Rect;
/// use layout_oxide::layout::{Fragment, LineBuilder};
/// use layout_oxide::layout::table_detector::split_into_segments;
/// use layout_oxide::pipeline::TableConfig;
///
/// let mut builder = LineBuilder::start(
///     Fragment::new("Unit", Rect::from_points(10.0, 0.0, 30.0, 10.0), "", 10.0),
/// );
/// builder.push(Fragment::new("price", Rect::from_points(33.0, 0.0, 60.0, 10.0), "", 10.0));
/// builder.push(Fragment::new("12.50", Rect::from_points(200.0, 0.0, 230.0, 10.0), "", 10.0));
/// let segments = split_into_segments(&builder.finish(), &TableConfig::default());
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].text, "Unit price");
/// assert_eq!(segments[1].text, "12.50");
/// ```
pub fn split_into_segments(line: &Line, config: &TableConfig) -> Vec<Segment> {
    let Some(first) = line.fragments.first() else {
        return vec![];
    };
    let threshold = segment_gap_threshold(line, config);

    let mut runs: Vec<Vec<usize>> = vec![vec![0]];
    let mut prev_right = first.bbox.right();
    for (i, fragment) in line.fragments.iter().enumerate().skip(1) {
        let gap = fragment.bbox.left() - prev_right;
        if gap > threshold {
            runs.push(vec![i]);
        } else if let Some(run) = runs.last_mut() {
            run.push(i);
        }
        prev_right = fragment.bbox.right();
    }

    runs.into_iter()
        .map(|run| {
            let members: Vec<_> = run.iter().map(|&i| &line.fragments[i]).collect();
            Segment {
                x0: members.iter().map(|f| f.bbox.left()).fold(f32::INFINITY, f32::min),
                x1: members.iter().map(|f| f.bbox.right()).fold(f32::NEG_INFINITY, f32::max),
                text: members.iter().map(|f| f.text.as_str()).collect::<Vec<_>>().join(" "),
                fragment_count: members.len(),
            }
        })
        .collect()
}

/// True when at least one segment of `a` aligns with a segment of `b`.
fn rows_align(a: &[Segment], b: &[Segment], tolerance: f32) -> bool {
    a.iter()
        .any(|sa| b.iter().any(|sb| sa.aligns_with(sb, tolerance)))
}

/// Append `text` to a cell, separated by a space.
fn append_cell(cell: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !cell.is_empty() {
        cell.push(' ');
    }
    cell.push_str(text);
}

/// Trait for table detection strategies.
///
/// Implementations receive the page's lines in top-to-bottom order and
/// return the tables they find. Every returned table has at least the
/// configured minimum number of rows and columns.
pub trait TableDetector: Send + Sync {
    /// Detect tables among `lines`.
    fn detect(&self, lines: &[Line]) -> Vec<Table>;

    /// Return the name of this strategy for debugging.
    fn name(&self) -> &'static str;
}

/// Create the table detector selected by `config.strategy`.
pub fn create_detector(config: &TableConfig) -> Box<dyn TableDetector> {
    match config.strategy {
        TableStrategyType::SegmentAlignment => Box::new(SegmentAlignmentDetector::new(config.clone())),
        TableStrategyType::GlobalGrid => Box::new(GlobalGridDetector::new(config.clone())),
    }
}

/// Detect tables with the strategy selected in `config`.
pub fn detect_tables(lines: &[Line], config: &TableConfig) -> Vec<Table> {
    create_detector(config).detect(lines)
}

/// Segment/overlap table detection.
#[derive(Debug, Clone, Default)]
pub struct SegmentAlignmentDetector {
    config: TableConfig,
}

impl SegmentAlignmentDetector {
    /// Create a detector with the given settings.
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Turn an accepted block of lines into a table.
    ///
    /// Returns `None` when the block's segments collapse into fewer than
    /// `min_cols` columns.
    fn build_table(&self, lines: &[Line], segments: &[Vec<Segment>], block: &[usize]) -> Option<Table> {
        let centers: Vec<f32> = block
            .iter()
            .flat_map(|&i| segments[i].iter().map(Segment::center))
            .collect();
        let clusters = cluster_1d(&centers, self.config.column_cluster_gap);
        if clusters.len() < self.config.min_cols {
            log::debug!(
                "Rejecting table block at lines {:?}: {} derived column(s)",
                block,
                clusters.len()
            );
            return None;
        }

        let rows: Vec<Vec<String>> = block
            .iter()
            .map(|&i| route_segments(&segments[i], &clusters))
            .collect();

        let bbox = Rect::union_all(block.iter().map(|&i| &lines[i].bbox))?
            .rounded(self.config.bbox_decimals);

        Some(Table {
            rows,
            bbox,
            line_indices: block.to_vec(),
            column_centers: clusters.iter().map(|c| c.mean).collect(),
        })
    }

    fn flush(&self, tables: &mut Vec<Table>, lines: &[Line], segments: &[Vec<Segment>], block: &[usize]) {
        if block.len() < self.config.min_rows {
            log::trace!("Discarding table candidate with {} row(s)", block.len());
            return;
        }
        if let Some(table) = self.build_table(lines, segments, block) {
            log::debug!(
                "Table detected: {} rows × {} cols, bbox={:?}",
                table.num_rows(),
                table.num_cols(),
                table.bbox.to_array()
            );
            tables.push(table);
        }
    }
}

/// Route each segment's text into the cell of the nearest column.
fn route_segments(segments: &[Segment], clusters: &[Cluster]) -> Vec<String> {
    let mut cells = vec![String::new(); clusters.len()];
    for segment in segments {
        if let Some(col) = nearest_cluster(clusters, segment.center()) {
            append_cell(&mut cells[col], &segment.text);
        }
    }
    cells
}

impl TableDetector for SegmentAlignmentDetector {
    fn detect(&self, lines: &[Line]) -> Vec<Table> {
        if lines.len() < self.config.min_rows {
            return vec![];
        }

        let tolerance = self.config.overlap_tolerance;
        let segments: Vec<Vec<Segment>> = lines
            .iter()
            .map(|line| split_into_segments(line, &self.config))
            .collect();
        let multi = |i: usize| segments[i].len() >= 2;

        let mut tables = vec![];
        let mut block: Vec<usize> = vec![];

        for i in 0..lines.len() {
            if let Some(&last) = block.last() {
                if multi(i) && rows_align(&segments[i], &segments[last], tolerance) {
                    block.push(i);
                    continue;
                }
                log::trace!("Line {} breaks table block of {} line(s)", i, block.len());
                self.flush(&mut tables, lines, &segments, &block);
                block.clear();
            }

            // A block only starts when the next line is multi-column and aligned too
            let starts = multi(i)
                && i + 1 < lines.len()
                && multi(i + 1)
                && rows_align(&segments[i], &segments[i + 1], tolerance);
            if starts {
                log::trace!("Table block starts at line {}", i);
                block.push(i);
            }
        }
        self.flush(&mut tables, lines, &segments, &block);

        tables
    }

    fn name(&self) -> &'static str {
        "SegmentAlignmentDetector"
    }
}

/// Page-wide grid table detection.
///
/// Fragment centers of the whole page are clustered into global columns.
/// Lines touching at least `min_cols` global columns are grid rows; runs of
/// at least `min_rows` consecutive grid rows become tables. Rows without any
/// populated cell are dropped, and the bounding box is the union of the
/// member fragments rather than of whole lines.
#[derive(Debug, Clone, Default)]
pub struct GlobalGridDetector {
    config: TableConfig,
}

impl GlobalGridDetector {
    /// Create a detector with the given settings.
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Build a table from a run of grid rows.
    ///
    /// `populated` holds, per line, the global columns touched by a
    /// non-blank fragment. Only those columns and rows make it into the table.
    fn build_table(
        &self,
        lines: &[Line],
        labels: &[Vec<usize>],
        populated: &[BTreeSet<usize>],
        clusters: &[Cluster],
        run: &[usize],
    ) -> Option<Table> {
        let kept_lines: Vec<usize> = run.iter().copied().filter(|&i| !populated[i].is_empty()).collect();
        if kept_lines.len() < self.config.min_rows {
            return None;
        }
        let used: BTreeSet<usize> = kept_lines.iter().flat_map(|&i| populated[i].iter().copied()).collect();
        if used.len() < self.config.min_cols {
            return None;
        }
        let col_of: BTreeMap<usize, usize> = used.iter().enumerate().map(|(col, &label)| (label, col)).collect();

        let rows: Vec<Vec<String>> = kept_lines
            .iter()
            .map(|&i| {
                let mut cells = vec![String::new(); used.len()];
                for (fragment, label) in lines[i].fragments.iter().zip(&labels[i]) {
                    if let Some(&col) = col_of.get(label) {
                        append_cell(&mut cells[col], &fragment.text);
                    }
                }
                cells
            })
            .collect();

        let member_boxes = kept_lines.iter().flat_map(|&i| {
            lines[i]
                .fragments
                .iter()
                .filter(|f| !f.is_blank())
                .map(|f| &f.bbox)
        });
        let bbox = Rect::union_all(member_boxes)?.rounded(self.config.bbox_decimals);

        Some(Table {
            rows,
            bbox,
            line_indices: kept_lines,
            column_centers: used.iter().map(|&label| clusters[label].mean).collect(),
        })
    }
}

impl TableDetector for GlobalGridDetector {
    fn detect(&self, lines: &[Line]) -> Vec<Table> {
        if lines.len() < self.config.min_rows {
            return vec![];
        }

        let centers: Vec<f32> = lines
            .iter()
            .flat_map(|line| line.fragments.iter().map(|f| f.center().x))
            .collect();
        let clusters = cluster_1d(&centers, self.config.column_cluster_gap);
        let flat_labels = cluster_labels(&clusters, centers.len());

        // Regroup the flat labels per line
        let mut labels: Vec<Vec<usize>> = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for line in lines {
            labels.push(flat_labels[offset..offset + line.fragments.len()].to_vec());
            offset += line.fragments.len();
        }

        // Columns reached by non-blank text, per line
        let populated: Vec<BTreeSet<usize>> = lines
            .iter()
            .zip(&labels)
            .map(|(line, line_labels)| {
                line.fragments
                    .iter()
                    .zip(line_labels)
                    .filter(|(f, _)| !f.is_blank())
                    .map(|(_, &label)| label)
                    .collect()
            })
            .collect();
        let is_grid_row = |i: usize| populated[i].len() >= self.config.min_cols;

        let mut tables = vec![];
        let mut run: Vec<usize> = vec![];
        for i in 0..=lines.len() {
            if i < lines.len() && is_grid_row(i) {
                run.push(i);
                continue;
            }
            if run.len() >= self.config.min_rows {
                if let Some(table) = self.build_table(lines, &labels, &populated, &clusters, &run) {
                    log::debug!(
                        "Grid table detected: {} rows × {} cols",
                        table.num_rows(),
                        table.num_cols()
                    );
                    tables.push(table);
                }
            }
            run.clear();
        }

        tables
    }

    fn name(&self) -> &'static str {
        "GlobalGridDetector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fragment::Fragment;
    use crate::layout::line_grouper::LineBuilder;

    fn mock_line(y: f32, cells: &[(&str, f32, f32)]) -> Line {
        let mut fragments = cells
            .iter()
            .map(|(text, x0, x1)| Fragment::new(*text, Rect::from_points(*x0, y, *x1, y + 10.0), "Helvetica", 10.0));
        let mut builder = LineBuilder::start(fragments.next().unwrap());
        for f in fragments {
            builder.push(f);
        }
        builder.finish()
    }

    #[test]
    fn test_segment_threshold_from_font_size() {
        let line = mock_line(0.0, &[("a", 0.0, 10.0)]);
        let threshold = segment_gap_threshold(&line, &TableConfig::default());
        assert!((threshold - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_segment_threshold_override() {
        let line = mock_line(0.0, &[("a", 0.0, 10.0)]);
        let config = TableConfig::default().with_segment_gap(3.0);
        assert_eq!(segment_gap_threshold(&line, &config), 3.0);
    }

    #[test]
    fn test_split_on_wide_gap() {
        let line = mock_line(0.0, &[("Name", 10.0, 40.0), ("Age", 200.0, 220.0)]);
        let segments = split_into_segments(&line, &TableConfig::default());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].x0, 10.0);
        assert_eq!(segments[0].x1, 40.0);
        assert_eq!(segments[1].text, "Age");
    }

    #[test]
    fn test_no_split_on_word_gap() {
        let line = mock_line(0.0, &[("Hello", 10.0, 40.0), ("world", 44.0, 70.0)]);
        let segments = split_into_segments(&line, &TableConfig::default());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Hello world");
        assert_eq!(segments[0].fragment_count, 2);
    }

    #[test]
    fn test_segment_overlap() {
        let a = Segment { x0: 0.0, x1: 40.0, text: "a".into(), fragment_count: 1 };
        let b = Segment { x0: 30.0, x1: 80.0, text: "b".into(), fragment_count: 1 };
        let c = Segment { x0: 36.0, x1: 80.0, text: "c".into(), fragment_count: 1 };
        assert_eq!(a.overlap(&b), 10.0);
        assert!(a.aligns_with(&b, 5.0));
        // 4 points of overlap is not enough
        assert!(!a.aligns_with(&c, 5.0));
    }

    #[test]
    fn test_detect_simple_grid() {
        let lines = vec![
            mock_line(100.0, &[("Name", 10.0, 40.0), ("Age", 200.0, 220.0)]),
            mock_line(120.0, &[("Alice", 10.0, 42.0), ("30", 202.0, 215.0)]),
        ];
        let tables = SegmentAlignmentDetector::default().detect(&lines);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_cols(), 2);
        assert_eq!(table.rows, vec![vec!["Name", "Age"], vec!["Alice", "30"]]);
        assert_eq!(table.line_indices, vec![0, 1]);
        assert_eq!(table.bbox.to_array(), [10.0, 100.0, 220.0, 130.0]);
    }

    #[test]
    fn test_single_multi_column_line_is_not_a_table() {
        let lines = vec![
            mock_line(100.0, &[("Name", 10.0, 40.0), ("Age", 200.0, 220.0)]),
            mock_line(120.0, &[("Just a sentence of body text", 10.0, 220.0)]),
        ];
        assert!(SegmentAlignmentDetector::default().detect(&lines).is_empty());
    }

    #[test]
    fn test_misaligned_rows_are_not_a_table() {
        let lines = vec![
            mock_line(100.0, &[("a", 10.0, 40.0), ("b", 200.0, 230.0)]),
            mock_line(120.0, &[("c", 80.0, 120.0), ("d", 300.0, 330.0)]),
        ];
        assert!(SegmentAlignmentDetector::default().detect(&lines).is_empty());
    }

    #[test]
    fn test_body_text_separates_tables() {
        let lines = vec![
            mock_line(100.0, &[("a1", 10.0, 40.0), ("b1", 200.0, 230.0)]),
            mock_line(120.0, &[("a2", 10.0, 40.0), ("b2", 200.0, 230.0)]),
            mock_line(140.0, &[("A paragraph between the tables", 10.0, 230.0)]),
            mock_line(160.0, &[("c1", 10.0, 40.0), ("d1", 200.0, 230.0)]),
            mock_line(180.0, &[("c2", 10.0, 40.0), ("d2", 200.0, 230.0)]),
            mock_line(200.0, &[("c3", 10.0, 40.0), ("d3", 200.0, 230.0)]),
        ];
        let tables = SegmentAlignmentDetector::default().detect(&lines);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].line_indices, vec![0, 1]);
        assert_eq!(tables[1].line_indices, vec![3, 4, 5]);
        assert_eq!(tables[1].cell(2, 1), Some("d3"));
    }

    #[test]
    fn test_breaking_line_can_start_next_block() {
        let lines = vec![
            mock_line(100.0, &[("a1", 10.0, 40.0), ("b1", 200.0, 230.0)]),
            mock_line(120.0, &[("a2", 10.0, 40.0), ("b2", 200.0, 230.0)]),
            // shifted grid: breaks the first block, starts the second
            mock_line(140.0, &[("x1", 300.0, 330.0), ("y1", 450.0, 480.0)]),
            mock_line(160.0, &[("x2", 300.0, 330.0), ("y2", 450.0, 480.0)]),
        ];
        let tables = SegmentAlignmentDetector::default().detect(&lines);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].rows, vec![vec!["x1", "y1"], vec!["x2", "y2"]]);
    }

    #[test]
    fn test_segments_sharing_a_column_are_concatenated() {
        let config = TableConfig::default().with_column_cluster_gap(40.0);
        let lines = vec![
            mock_line(100.0, &[("A", 0.0, 40.0), ("B", 200.0, 240.0)]),
            mock_line(120.0, &[("C", 0.0, 30.0), ("D", 40.0, 60.0)]),
        ];
        let tables = SegmentAlignmentDetector::new(config).detect(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, vec![vec!["A", "B"], vec!["C D", ""]]);
    }

    #[test]
    fn test_unmatched_cells_are_empty() {
        let lines = vec![
            mock_line(100.0, &[("h1", 10.0, 40.0), ("h2", 110.0, 140.0), ("h3", 210.0, 240.0)]),
            mock_line(120.0, &[("v1", 10.0, 40.0), ("v3", 210.0, 240.0)]),
        ];
        let tables = SegmentAlignmentDetector::default().detect(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[1], vec!["v1", "", "v3"]);
    }

    #[test]
    fn test_block_with_single_derived_column_is_dropped() {
        // Two segments per line, but their centers sit within the column cluster gap
        let lines = vec![
            mock_line(100.0, &[("a", 0.0, 6.0), ("b", 16.0, 22.0)]),
            mock_line(120.0, &[("c", 0.0, 6.0), ("d", 16.0, 22.0)]),
        ];
        assert!(SegmentAlignmentDetector::default().detect(&lines).is_empty());
    }

    #[test]
    fn test_min_rows_respected() {
        let config = TableConfig::default().with_min_size(3, 2);
        let lines = vec![
            mock_line(100.0, &[("a", 10.0, 40.0), ("b", 200.0, 230.0)]),
            mock_line(120.0, &[("c", 10.0, 40.0), ("d", 200.0, 230.0)]),
        ];
        assert!(SegmentAlignmentDetector::new(config).detect(&lines).is_empty());
    }

    #[test]
    fn test_bbox_is_rounded() {
        let lines = vec![
            mock_line(100.004, &[("a", 10.126, 40.0), ("b", 200.0, 230.0)]),
            mock_line(120.0, &[("c", 10.0, 40.0), ("d", 200.0, 230.0)]),
        ];
        let tables = SegmentAlignmentDetector::default().detect(&lines);
        assert_eq!(tables[0].bbox.left(), 10.0);
        assert_eq!(tables[0].bbox.top(), 100.0);
    }

    #[test]
    fn test_global_grid_detects_rows() {
        let lines = vec![
            mock_line(100.0, &[("x", 10.0, 30.0), ("y", 110.0, 130.0), ("z", 210.0, 230.0)]),
            mock_line(120.0, &[("1", 12.0, 28.0), ("2", 112.0, 128.0), ("3", 212.0, 228.0)]),
        ];
        let tables = GlobalGridDetector::default().detect(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, vec![vec!["x", "y", "z"], vec!["1", "2", "3"]]);
        assert_eq!(tables[0].bbox.to_array(), [10.0, 100.0, 230.0, 130.0]);
    }

    #[test]
    fn test_global_grid_ignores_single_column_lines() {
        let lines = vec![
            mock_line(100.0, &[("Body text line one", 10.0, 230.0)]),
            mock_line(120.0, &[("Body text line two", 10.0, 230.0)]),
        ];
        assert!(GlobalGridDetector::default().detect(&lines).is_empty());
    }

    #[test]
    fn test_global_grid_ignores_blank_only_columns() {
        let lines = vec![
            mock_line(100.0, &[("a", 10.0, 30.0), ("b", 110.0, 130.0), (" ", 210.0, 230.0)]),
            mock_line(120.0, &[("c", 10.0, 30.0), ("d", 110.0, 130.0), ("  ", 210.0, 230.0)]),
        ];
        let tables = GlobalGridDetector::default().detect(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].num_cols(), 2);
        assert_eq!(tables[0].rows, vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(tables[0].bbox.to_array(), [10.0, 100.0, 130.0, 130.0]);
    }

    #[test]
    fn test_global_grid_blank_column_does_not_satisfy_min_cols() {
        let lines = vec![
            mock_line(100.0, &[("a", 10.0, 30.0), (" ", 110.0, 130.0)]),
            mock_line(120.0, &[("c", 10.0, 30.0), (" ", 110.0, 130.0)]),
        ];
        assert!(GlobalGridDetector::default().detect(&lines).is_empty());
    }

    #[test]
    fn test_create_detector_matches_strategy() {
        let segment = create_detector(&TableConfig::default());
        assert_eq!(segment.name(), "SegmentAlignmentDetector");
        let grid = create_detector(&TableConfig::default().with_strategy(TableStrategyType::GlobalGrid));
        assert_eq!(grid.name(), "GlobalGridDetector");
    }

    #[test]
    fn test_too_few_lines() {
        let lines = vec![mock_line(100.0, &[("a", 10.0, 40.0), ("b", 200.0, 230.0)])];
        assert!(detect_tables(&lines, &TableConfig::default()).is_empty());
        assert!(detect_tables(&[], &TableConfig::default()).is_empty());
    }
}
