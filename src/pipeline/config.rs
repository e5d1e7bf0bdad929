//! Unified configuration for the layout pipeline.
//!
//! Every threshold the engine uses is either given here explicitly or derived
//! from page statistics using the ratios given here. Each stage owns one
//! section:
//! - [`ColumnConfig`]: column classification
//! - [`LineConfig`]: line grouping
//! - [`TableConfig`]: table detection
//! - [`ParagraphConfig`]: paragraph grouping

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Maximum number of columns; fragments beyond the cap join the last column
    pub max_columns: usize,
    /// Explicit center-distance cutoff; derived from median width when `None`
    pub gap_threshold: Option<f32>,
    /// Floor of the derived cutoff, in points
    pub min_gap: f32,
    /// Fraction of the median fragment width used as the derived cutoff
    pub width_ratio: f32,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            max_columns: 4,
            gap_threshold: None,
            min_gap: 30.0,
            width_ratio: 0.6,
        }
    }
}

impl ColumnConfig {
    /// Set the column cap.
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    /// Use a fixed cutoff instead of the width-derived one.
    pub fn with_gap_threshold(mut self, threshold: f32) -> Self {
        self.gap_threshold = Some(threshold);
        self
    }
}

/// Line grouping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Explicit vertical-center delta for merging; derived from median height when `None`
    pub merge_threshold: Option<f32>,
    /// Fraction of the median fragment height used as the derived delta
    pub height_ratio: f32,
    /// Floor of the derived delta, in points
    pub min_threshold: f32,
    /// Median height assumed when no fragment has a positive height
    pub fallback_height: f32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            merge_threshold: None,
            height_ratio: 0.4,
            min_threshold: 2.0,
            fallback_height: 10.0,
        }
    }
}

impl LineConfig {
    /// Use a fixed merge delta.
    pub fn with_merge_threshold(mut self, threshold: f32) -> Self {
        self.merge_threshold = Some(threshold);
        self
    }

    /// Change the height fraction used for the derived delta.
    pub fn with_height_ratio(mut self, ratio: f32) -> Self {
        self.height_ratio = ratio;
        self
    }
}

/// Table detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStrategyType {
    /// Split lines into segments, chain lines whose segments overlap, then
    /// recover columns inside each block
    #[default]
    SegmentAlignment,
    /// Cluster every fragment center on the page once and read grids off
    /// runs of lines that span several global columns
    GlobalGrid,
}

/// Table detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Which detector to run
    pub strategy: TableStrategyType,
    /// Approximate space width as a fraction of font size
    pub space_width_ratio: f32,
    /// How many space widths make a segment break
    pub space_scale: f32,
    /// Explicit segment break gap; derived from the line's font size when `None`
    pub segment_gap: Option<f32>,
    /// Font size assumed for lines whose fragments report none
    pub fallback_font_size: f32,
    /// Minimum shared horizontal span for two segments to count as aligned
    pub overlap_tolerance: f32,
    /// Cutoff for clustering segment centers into table columns
    pub column_cluster_gap: f32,
    /// Minimum number of rows for a table to be reported
    pub min_rows: usize,
    /// Minimum number of derived columns for a table to be reported
    pub min_cols: usize,
    /// Decimal places kept in table bounding boxes
    pub bbox_decimals: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            strategy: TableStrategyType::default(),
            space_width_ratio: 0.6,
            space_scale: 1.5,
            segment_gap: None,
            fallback_font_size: 10.0,
            overlap_tolerance: 5.0,
            column_cluster_gap: 20.0,
            min_rows: 2,
            min_cols: 2,
            bbox_decimals: 2,
        }
    }
}

impl TableConfig {
    /// Select the detection strategy.
    pub fn with_strategy(mut self, strategy: TableStrategyType) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use a fixed segment break gap.
    pub fn with_segment_gap(mut self, gap: f32) -> Self {
        self.segment_gap = Some(gap);
        self
    }

    /// Set the table column clustering cutoff.
    pub fn with_column_cluster_gap(mut self, gap: f32) -> Self {
        self.column_cluster_gap = gap;
        self
    }

    /// Set the minimum row and column counts.
    pub fn with_min_size(mut self, min_rows: usize, min_cols: usize) -> Self {
        self.min_rows = min_rows;
        self.min_cols = min_cols;
        self
    }
}

/// When a change of left edge between consecutive lines starts a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum IndentRule {
    /// Indentation never breaks a paragraph
    #[default]
    Disabled,
    /// Break when the left edge moves by more than this many points
    Absolute(f32),
    /// Break when the left edge moves by more than this multiple of the median line height
    RelativeToLineHeight(f32),
}

/// Paragraph grouping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphConfig {
    /// Explicit vertical gap that breaks a paragraph; derived when `None`
    pub gap_threshold: Option<f32>,
    /// Fraction of the median line height used as the derived gap
    pub gap_ratio: f32,
    /// Fraction of the median line height a gap must exceed to break after
    /// terminal punctuation
    pub punctuation_gap_ratio: f32,
    /// Indentation rule
    pub indent: IndentRule,
    /// Characters that end a sentence
    pub terminal_punctuation: Vec<char>,
    /// Median line height assumed when no line has a positive height
    pub fallback_height: f32,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            gap_threshold: None,
            gap_ratio: 0.6,
            punctuation_gap_ratio: 0.2,
            indent: IndentRule::Disabled,
            terminal_punctuation: vec!['.', '!', '?', ':'],
            fallback_height: 10.0,
        }
    }
}

impl ParagraphConfig {
    /// Use a fixed paragraph gap.
    pub fn with_gap_threshold(mut self, threshold: f32) -> Self {
        self.gap_threshold = Some(threshold);
        self
    }

    /// Change the height fraction used for the derived gap.
    pub fn with_gap_ratio(mut self, ratio: f32) -> Self {
        self.gap_ratio = ratio;
        self
    }

    /// Set the indentation rule.
    pub fn with_indent(mut self, indent: IndentRule) -> Self {
        self.indent = indent;
        self
    }
}

/// Configuration for the whole page pipeline.
///
/// # Examples
///
/// ```
/// use layout_oxide::pipeline::{LayoutConfig, TableStrategyType};
///
/// let config = LayoutConfig::default()
///     .with_max_columns(2)
///     .with_table_strategy(TableStrategyType::GlobalGrid);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Column classification
    pub columns: ColumnConfig,
    /// Line grouping
    pub lines: LineConfig,
    /// Table detection
    pub tables: TableConfig,
    /// Paragraph grouping
    pub paragraphs: ParagraphConfig,
    /// Run table detection at all; when false every line goes to paragraphs
    pub extract_tables: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Default configuration with table extraction enabled.
    pub fn new() -> Self {
        Self {
            columns: ColumnConfig::default(),
            lines: LineConfig::default(),
            tables: TableConfig::default(),
            paragraphs: ParagraphConfig::default(),
            extract_tables: true,
        }
    }

    /// Defaults plus the indentation paragraph rule (1.5 × median line height).
    pub fn indent_aware() -> Self {
        let mut config = Self::new();
        config.paragraphs.indent = IndentRule::RelativeToLineHeight(1.5);
        config
    }

    /// Set the column cap.
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.columns.max_columns = max_columns;
        self
    }

    /// Select the table detection strategy.
    pub fn with_table_strategy(mut self, strategy: TableStrategyType) -> Self {
        self.tables.strategy = strategy;
        self
    }

    /// Enable or disable table extraction.
    pub fn with_table_extraction(mut self, enable: bool) -> Self {
        self.extract_tables = enable;
        self
    }

    /// Check every field for values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let c = &self.columns;
        if c.max_columns == 0 {
            return Err(Error::invalid_config("columns.max_columns", "must be at least 1"));
        }
        check_override("columns.gap_threshold", c.gap_threshold)?;
        check_non_negative("columns.min_gap", c.min_gap)?;
        check_positive("columns.width_ratio", c.width_ratio)?;

        let l = &self.lines;
        check_override("lines.merge_threshold", l.merge_threshold)?;
        check_positive("lines.height_ratio", l.height_ratio)?;
        check_non_negative("lines.min_threshold", l.min_threshold)?;
        check_positive("lines.fallback_height", l.fallback_height)?;

        let t = &self.tables;
        check_positive("tables.space_width_ratio", t.space_width_ratio)?;
        check_positive("tables.space_scale", t.space_scale)?;
        check_override("tables.segment_gap", t.segment_gap)?;
        check_positive("tables.fallback_font_size", t.fallback_font_size)?;
        check_non_negative("tables.overlap_tolerance", t.overlap_tolerance)?;
        check_non_negative("tables.column_cluster_gap", t.column_cluster_gap)?;
        if t.min_rows < 2 {
            return Err(Error::invalid_config("tables.min_rows", "a table needs at least 2 rows"));
        }
        if t.min_cols < 2 {
            return Err(Error::invalid_config("tables.min_cols", "a table needs at least 2 columns"));
        }
        if t.bbox_decimals > 6 {
            return Err(Error::invalid_config("tables.bbox_decimals", "at most 6 decimal places"));
        }

        let p = &self.paragraphs;
        check_override("paragraphs.gap_threshold", p.gap_threshold)?;
        check_positive("paragraphs.gap_ratio", p.gap_ratio)?;
        check_non_negative("paragraphs.punctuation_gap_ratio", p.punctuation_gap_ratio)?;
        check_positive("paragraphs.fallback_height", p.fallback_height)?;
        match p.indent {
            IndentRule::Disabled => {},
            IndentRule::Absolute(v) => check_non_negative("paragraphs.indent", v)?,
            IndentRule::RelativeToLineHeight(v) => check_positive("paragraphs.indent", v)?,
        }

        Ok(())
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(field, format!("must be finite and positive, got {}", value)))
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(field, format!("must be finite and non-negative, got {}", value)))
    }
}

fn check_override(field: &'static str, value: Option<f32>) -> Result<()> {
    value.map_or(Ok(()), |v| check_non_negative(field, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::new();
        assert_eq!(config.columns.max_columns, 4);
        assert_eq!(config.tables.min_rows, 2);
        assert_eq!(config.tables.min_cols, 2);
        assert_eq!(config.tables.strategy, TableStrategyType::SegmentAlignment);
        assert_eq!(config.paragraphs.indent, IndentRule::Disabled);
        assert!(config.extract_tables);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_indent_aware_preset() {
        let config = LayoutConfig::indent_aware();
        assert_eq!(config.paragraphs.indent, IndentRule::RelativeToLineHeight(1.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_columns() {
        let err = LayoutConfig::new().with_max_columns(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "columns.max_columns", .. }));
    }

    #[test]
    fn test_rejects_nan_ratio() {
        let mut config = LayoutConfig::new();
        config.lines.height_ratio = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_override() {
        let mut config = LayoutConfig::new();
        config.paragraphs = config.paragraphs.with_gap_threshold(-1.0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "paragraphs.gap_threshold", .. }));
    }

    #[test]
    fn test_rejects_single_row_tables() {
        let mut config = LayoutConfig::new();
        config.tables = config.tables.with_min_size(1, 2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "columns": { "max_columns": 2 },
            "tables": { "strategy": "global_grid" },
            "paragraphs": { "indent": { "mode": "absolute", "value": 12.0 } }
        }"#;
        let config: LayoutConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.columns.max_columns, 2);
        assert_eq!(config.columns.min_gap, 30.0);
        assert_eq!(config.tables.strategy, TableStrategyType::GlobalGrid);
        assert_eq!(config.paragraphs.indent, IndentRule::Absolute(12.0));
        assert!(config.extract_tables);
        assert!(config.validate().is_ok());
    }
}
