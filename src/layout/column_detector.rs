//! Column classification for page fragments.
//!
//! Fragments are assigned to columns by clustering their horizontal centers.
//! The merge cutoff adapts to the page: it is a fraction of the median
//! fragment width, never below a fixed floor, so that word-sized fragments
//! in one column chain together while the gutter between columns does not.

use crate::layout::clustering::{cluster_1d, cluster_labels, median};
use crate::layout::fragment::Fragment;
use crate::pipeline::config::ColumnConfig;

/// Distance cutoff used to merge fragment centers into one column.
///
/// An explicit `gap_threshold` in the configuration wins; otherwise the
/// cutoff is `max(min_gap, width_ratio × median width)`.
pub fn column_gap_threshold(fragments: &[Fragment], config: &ColumnConfig) -> f32 {
    if let Some(threshold) = config.gap_threshold {
        return threshold;
    }

    let widths: Vec<f32> = fragments.iter().map(Fragment::width).collect();
    let median_width = median(&widths).unwrap_or(0.0);
    config.min_gap.max(median_width * config.width_ratio)
}

/// Assign a column id to every fragment.
///
/// The result is parallel to `fragments`. Column 0 is the leftmost cluster
/// of horizontal centers; ids above `max_columns - 1` collapse into the last
/// column.
///
/// # Examples
///
/// ```
/// use layout_oxide::geometry::Rect;
/// use layout_oxide::layout::{Fragment, column_detector::classify_columns};
/// use layout_oxide::pipeline::ColumnConfig;
///
/// let fragments = vec![
///     Fragment::new("right", Rect::from_points(280.0, 0.0, 320.0, 10.0), "", 10.0),
///     Fragment::new("left", Rect::from_points(30.0, 0.0, 70.0, 10.0), "", 10.0),
/// ];
/// assert_eq!(classify_columns(&fragments, &ColumnConfig::default()), vec![1, 0]);
/// ```
pub fn classify_columns(fragments: &[Fragment], config: &ColumnConfig) -> Vec<usize> {
    match fragments.len() {
        0 => return vec![],
        1 => return vec![0],
        _ => {},
    }

    let threshold = column_gap_threshold(fragments, config);
    let centers: Vec<f32> = fragments.iter().map(|f| f.center().x).collect();
    let clusters = cluster_1d(&centers, threshold);
    let last_column = config.max_columns.saturating_sub(1);

    log::debug!(
        "Column classification: {} fragments, threshold={:.1}, clusters={}, cap={}",
        fragments.len(),
        threshold,
        clusters.len(),
        config.max_columns
    );

    cluster_labels(&clusters, fragments.len())
        .into_iter()
        .map(|label| label.min(last_column))
        .collect()
}

/// Number of distinct columns in a label vector.
pub fn column_count(labels: &[usize]) -> usize {
    labels.iter().max().map_or(0, |max| max + 1)
}
