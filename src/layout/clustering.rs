//! One-dimensional clustering and summary statistics for layout analysis.
//!
//! Column detection and table column recovery both reduce to grouping scalar
//! positions (horizontal centers). In one dimension, single-linkage
//! agglomerative clustering with a distance cutoff is equivalent to sorting
//! the values and cutting wherever two neighbours are further apart than the
//! cutoff, which is what [`cluster_1d`] does. Every cluster is therefore a
//! contiguous interval of the sorted values, and clusters come out ordered
//! left to right.

use crate::utils::safe_float_cmp;

/// A group of values produced by [`cluster_1d`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Indices of the member values in the input slice, in ascending value order
    pub members: Vec<usize>,
    /// Smallest member value
    pub min: f32,
    /// Largest member value
    pub max: f32,
    /// Arithmetic mean of the member values
    pub mean: f32,
}

impl Cluster {
    fn from_members(members: Vec<usize>, values: &[f32]) -> Self {
        let picked: Vec<f32> = members.iter().map(|&i| values[i]).collect();
        let min = picked.iter().copied().fold(f32::INFINITY, f32::min);
        let max = picked.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Self {
            mean: mean(&picked).unwrap_or(min),
            members,
            min,
            max,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Cluster scalar values by single-linkage with distance cutoff `max_gap`.
///
/// Two neighbouring values (in sorted order) end up in the same cluster when
/// their distance is at most `max_gap`. The result is ordered by ascending
/// mean, so the index of a cluster is its left-to-right rank.
///
/// # Examples
///
/// ```
/// use layout_oxide::layout::clustering::cluster_1d;
///
/// let clusters = cluster_1d(&[300.0, 52.0, 48.0, 310.0], 20.0);
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].members, vec![2, 1]);
/// assert_eq!(clusters[1].members, vec![0, 3]);
/// ```
pub fn cluster_1d(values: &[f32], max_gap: f32) -> Vec<Cluster> {
    if values.is_empty() {
        return vec![];
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| safe_float_cmp(values[a], values[b]));

    let mut clusters = vec![];
    let mut current = vec![order[0]];
    for pair in order.windows(2) {
        let gap = values[pair[1]] - values[pair[0]];
        if gap <= max_gap {
            current.push(pair[1]);
        } else {
            clusters.push(Cluster::from_members(std::mem::take(&mut current), values));
            current.push(pair[1]);
        }
    }
    clusters.push(Cluster::from_members(current, values));

    // Contiguous intervals are already in mean order; the stable sort keeps
    // the labelling explicit for callers that rely on it.
    clusters.sort_by(|a, b| safe_float_cmp(a.mean, b.mean));
    clusters
}

/// Per-value cluster label for the output of [`cluster_1d`].
pub fn cluster_labels(clusters: &[Cluster], len: usize) -> Vec<usize> {
    let mut labels = vec![0; len];
    for (label, cluster) in clusters.iter().enumerate() {
        for &member in &cluster.members {
            labels[member] = label;
        }
    }
    labels
}

/// Index of the cluster whose mean is closest to `value`.
///
/// Ties go to the lower index. Returns `None` for an empty slice.
pub fn nearest_cluster(clusters: &[Cluster], value: f32) -> Option<usize> {
    clusters
        .iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| {
            safe_float_cmp((a.mean - value).abs(), (b.mean - value).abs()).then(ia.cmp(ib))
        })
        .map(|(i, _)| i)
}

/// Median of `values`; the mean of the two middle values for even lengths.
///
/// # Examples
///
/// ```
/// use layout_oxide::layout::clustering::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| safe_float_cmp(*a, *b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean of `values`, `None` when empty.
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

/// Median of the strictly positive values, or `fallback` when there are none.
///
/// Guards threshold derivation against empty pages and zero-height boxes.
pub fn positive_median_or(values: impl IntoIterator<Item = f32>, fallback: f32) -> f32 {
    let positive: Vec<f32> = values.into_iter().filter(|v| *v > 0.0).collect();
    median(&positive).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_empty() {
        assert!(cluster_1d(&[], 10.0).is_empty());
    }

    #[test]
    fn test_cluster_single() {
        let clusters = cluster_1d(&[42.0], 10.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members, vec![0]);
        assert_eq!(clusters[0].mean, 42.0);
    }

    #[test]
    fn test_cluster_identical_values() {
        let clusters = cluster_1d(&[5.0, 5.0, 5.0], 0.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }

    #[test]
    fn test_cluster_chains_through_neighbours() {
        // 0 -> 8 -> 16 -> 24: each step is within 10, so single-linkage chains them
        let clusters = cluster_1d(&[0.0, 8.0, 16.0, 24.0], 10.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].min, 0.0);
        assert_eq!(clusters[0].max, 24.0);
    }

    #[test]
    fn test_cluster_gap_boundary_is_inclusive() {
        assert_eq!(cluster_1d(&[0.0, 10.0], 10.0).len(), 1);
        assert_eq!(cluster_1d(&[0.0, 10.5], 10.0).len(), 2);
    }

    #[test]
    fn test_clusters_ordered_left_to_right() {
        let clusters = cluster_1d(&[500.0, 10.0, 250.0, 12.0, 505.0], 20.0);
        assert_eq!(clusters.len(), 3);
        assert!(clusters[0].mean < clusters[1].mean);
        assert!(clusters[1].mean < clusters[2].mean);
        assert_eq!(cluster_labels(&clusters, 5), vec![2, 0, 1, 0, 2]);
    }

    #[test]
    fn test_nearest_cluster() {
        let clusters = cluster_1d(&[0.0, 100.0], 10.0);
        assert_eq!(nearest_cluster(&clusters, 30.0), Some(0));
        assert_eq!(nearest_cluster(&clusters, 80.0), Some(1));
        // Equidistant goes to the lower index
        assert_eq!(nearest_cluster(&clusters, 50.0), Some(0));
        assert_eq!(nearest_cluster(&[], 50.0), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_positive_median_fallback() {
        assert_eq!(positive_median_or(vec![0.0, -1.0], 10.0), 10.0);
        assert_eq!(positive_median_or(vec![0.0, 12.0, 8.0], 10.0), 10.0);
        assert_eq!(positive_median_or(vec![12.0], 10.0), 12.0);
        assert_eq!(positive_median_or(Vec::new(), 7.5), 7.5);
    }
}
