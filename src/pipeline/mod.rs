//! Page layout pipeline with clean stage boundaries.
//!
//! Each page is processed independently through these stages:
//!
//! ```text
//! Fragment[] (positioned text from the page extractor)
//!     ↓
//! [Column classifier] (column id per fragment)
//!     ↓
//! [Line grouper] (Line[], majority column per line)
//!     ↓
//! [TableDetector] (pluggable: segment alignment or global grid)
//!     ↓
//! table exclusion set
//!     ↓
//! [Paragraph grouper] (per column, non-table lines only)
//!     ↓
//! PageLayout (JSON / plain text)
//! ```
//!
//! # Key Design Principles
//!
//! 1. **Pure per-page function**: a page's layout depends only on its own
//!    fragments and the configuration. Pages can be analysed in any order,
//!    or in parallel by the caller.
//!
//! 2. **Infallible stages**: empty or degenerate input yields empty output.
//!    Errors are limited to rejected configuration and malformed input records.
//!
//! 3. **Pluggable table strategy**: selected through [`TableConfig::strategy`].

pub mod config;
pub mod page_layout;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// Re-export main types
pub use config::{
    ColumnConfig, IndentRule, LayoutConfig, LineConfig, ParagraphConfig, TableConfig,
    TableStrategyType,
};
pub use page_layout::{DocumentLayout, PageLayout};

use crate::error::Result;
use crate::layout::column_detector::{classify_columns, column_count};
use crate::layout::line_grouper::group_fragments_into_lines;
use crate::layout::paragraph_grouper::group_lines_into_paragraphs;
use crate::layout::table_detector::{create_detector, TableDetector};
use crate::layout::{Fragment, Line, Paragraph, Table};

/// One page of input: its size and the fragments extracted from it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    /// 1-based page number
    #[serde(default = "first_page")]
    pub page_number: usize,
    /// Page width in points
    #[serde(default)]
    pub width: f32,
    /// Page height in points
    #[serde(default)]
    pub height: f32,
    /// Extracted fragments, in any order
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

fn first_page() -> usize {
    1
}

impl Page {
    /// Create a page, checking every fragment's geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFragment`](crate::Error::InvalidFragment) for the
    /// first fragment with a non-finite bounding box or font size.
    pub fn new(page_number: usize, width: f32, height: f32, fragments: Vec<Fragment>) -> Result<Self> {
        let page = Self {
            page_number,
            width,
            height,
            fragments,
        };
        page.validate()?;
        Ok(page)
    }

    /// Parse a page from JSON and check it.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_oxide::pipeline::Page;
    ///
    /// let page = Page::from_json(r#"{
    ///     "page_number": 2, "width": 612, "height": 792,
    ///     "fragments": [ { "text": "Hi", "bbox": [10, 10, 30, 20], "font": "Helvetica", "size": 10 } ]
    /// }"#).unwrap();
    /// assert_eq!(page.page_number, 2);
    /// assert_eq!(page.fragments[0].font_name, "Helvetica");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let page: Self = serde_json::from_str(json)?;
        page.validate()?;
        Ok(page)
    }

    /// Check every fragment's geometry.
    pub fn validate(&self) -> Result<()> {
        self.fragments
            .iter()
            .enumerate()
            .try_for_each(|(i, fragment)| fragment.validate(i))
    }
}

/// Indices of the lines that fall inside any table.
///
/// A line is inside a table when its vertical center lies within the
/// table's vertical extent and its box overlaps the table horizontally.
pub fn table_exclusion_set(lines: &[Line], tables: &[Table]) -> BTreeSet<usize> {
    let mut excluded = BTreeSet::new();
    for table in tables {
        let b = &table.bbox;
        for (i, line) in lines.iter().enumerate() {
            let cy = line.center().y;
            let inside_vertically = b.top() <= cy && cy <= b.bottom();
            let overlaps_horizontally = line.bbox.horizontal_overlap(b) > 0.0;
            if inside_vertically && overlaps_horizontally {
                excluded.insert(i);
            }
        }
    }
    excluded
}

/// The page layout pipeline - orchestrates the full flow.
///
/// # Examples
///
/// ```
/// use layout_oxide::geometry::Rect;
/// use layout_oxide::layout::Fragment;
/// use layout_oxide::pipeline::LayoutPipeline;
///
/// let pipeline = LayoutPipeline::new();
/// let layout = pipeline.analyze_fragments(vec![
///     Fragment::new("Hello", Rect::from_points(10.0, 100.0, 50.0, 110.0), "", 10.0),
///     Fragment::new("world", Rect::from_points(55.0, 101.0, 95.0, 111.0), "", 10.0),
/// ]);
/// assert_eq!(layout.lines.len(), 1);
/// assert_eq!(layout.lines[0].text, "Hello world");
/// assert_eq!(layout.paragraph_count(), 1);
/// ```
pub struct LayoutPipeline {
    config: LayoutConfig,
    table_detector: Box<dyn TableDetector>,
}

impl LayoutPipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        let config = LayoutConfig::default();
        let table_detector = create_detector(&config.tables);
        Self {
            config,
            table_detector,
        }
    }

    /// Create a pipeline with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) when the
    /// configuration fails [`LayoutConfig::validate`].
    pub fn with_config(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        let table_detector = create_detector(&config.tables);
        Ok(Self {
            config,
            table_detector,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Analyse one page.
    pub fn analyze_page(&self, page: &Page) -> PageLayout {
        self.analyze(page.page_number, page.width, page.height, page.fragments.clone())
    }

    /// Analyse a bare fragment list as page 1 of unknown size.
    pub fn analyze_fragments(&self, fragments: Vec<Fragment>) -> PageLayout {
        self.analyze(1, 0.0, 0.0, fragments)
    }

    /// Analyse every page of a document independently.
    pub fn analyze_document(&self, pages: &[Page]) -> DocumentLayout {
        DocumentLayout::new(pages.iter().map(|page| self.analyze_page(page)).collect())
    }

    fn analyze(&self, page_number: usize, width: f32, height: f32, fragments: Vec<Fragment>) -> PageLayout {
        let fragments: Vec<Fragment> = fragments.into_iter().filter(|f| !f.is_blank()).collect();
        if fragments.is_empty() {
            log::debug!("Page {}: no fragments", page_number);
            return PageLayout::empty(page_number, width, height);
        }

        // Stage 1: columns
        let labels = classify_columns(&fragments, &self.config.columns);
        let columns = column_count(&labels);
        let fragments: Vec<Fragment> = fragments
            .into_iter()
            .zip(labels)
            .map(|(fragment, column)| fragment.with_column(column))
            .collect();

        // Stage 2: lines
        let lines = group_fragments_into_lines(fragments, &self.config.lines);

        // Stage 3: tables
        let tables = if self.config.extract_tables {
            self.table_detector.detect(&lines)
        } else {
            vec![]
        };
        let excluded = table_exclusion_set(&lines, &tables);

        // Stage 4: paragraphs, per column
        let mut candidates: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, line) in lines.iter().enumerate() {
            if !excluded.contains(&i) {
                candidates.entry(line.column).or_default().push(i);
            }
        }
        let paragraphs_by_col: BTreeMap<usize, Vec<Paragraph>> = candidates
            .into_iter()
            .map(|(column, indices)| {
                (column, group_lines_into_paragraphs(&lines, &indices, &self.config.paragraphs))
            })
            .collect();

        log::debug!(
            "Page {}: {} columns, {} lines, {} tables ({} lines excluded), strategy={}",
            page_number,
            columns,
            lines.len(),
            tables.len(),
            excluded.len(),
            self.table_detector.name()
        );

        PageLayout {
            page_number,
            width,
            height,
            lines,
            paragraphs_by_col,
            tables,
        }
    }
}

impl Default for LayoutPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutPipeline")
            .field("config", &self.config)
            .field("table_detector", &self.table_detector.name())
            .finish()
    }
}
