//! Assembled page and document structures.
//!
//! These are the outputs of [`LayoutPipeline`](crate::pipeline::LayoutPipeline).
//! They serialize to the JSON shape downstream consumers expect:
//!
//! ```text
//! {
//!   "page_number": 1, "width": 612.0, "height": 792.0,
//!   "lines": [ { "text": "...", "bbox": [x0, y0, x1, y1], "col": 0 } ],
//!   "paragraphs_by_col": { "0": [ [0, 1, 2], [3] ] },
//!   "tables": [ { "rows": [ ["a", "b"] ], "bbox": [x0, y0, x1, y1] } ]
//! }
//! ```
//!
//! Paragraphs are lists of indices into `lines`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::layout::{Line, Paragraph, Table};

/// Layout of a single page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    /// 1-based page number
    pub page_number: usize,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// All lines of the page, top to bottom, including table lines
    pub lines: Vec<Line>,
    /// Paragraphs of non-table lines, keyed by column id
    pub paragraphs_by_col: BTreeMap<usize, Vec<Paragraph>>,
    /// Detected tables, top to bottom
    pub tables: Vec<Table>,
}

impl PageLayout {
    /// A page with no content.
    pub fn empty(page_number: usize, width: f32, height: f32) -> Self {
        Self {
            page_number,
            width,
            height,
            lines: vec![],
            paragraphs_by_col: BTreeMap::new(),
            tables: vec![],
        }
    }

    /// True when the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of paragraphs over all columns.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs_by_col.values().map(Vec::len).sum()
    }

    /// Text of a paragraph: its line texts joined by newlines.
    pub fn paragraph_text(&self, paragraph: &Paragraph) -> String {
        paragraph.text(&self.lines)
    }

    /// Render the page as plain text.
    ///
    /// Paragraphs come first, column by column, separated by blank lines.
    /// Tables follow, one row per line with tab-separated cells.
    pub fn to_plain_text(&self) -> String {
        let mut blocks: Vec<String> = self
            .paragraphs_by_col
            .values()
            .flatten()
            .map(|p| self.paragraph_text(p))
            .collect();

        for table in &self.tables {
            let rows: Vec<String> = table.rows.iter().map(|row| row.join("\t")).collect();
            blocks.push(rows.join("\n"));
        }

        blocks.join("\n\n")
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if
    /// serde_json fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Layout of every page in a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    /// Number of pages
    pub page_count: usize,
    /// Per-page layouts, in input order
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// Wrap a list of page layouts.
    pub fn new(pages: Vec<PageLayout>) -> Self {
        Self {
            page_count: pages.len(),
            pages,
        }
    }

    /// Plain text of all pages separated by form feeds.
    pub fn to_plain_text(&self) -> String {
        self.pages
            .iter()
            .map(PageLayout::to_plain_text)
            .collect::<Vec<_>>()
            .join("\n\u{c}\n")
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
