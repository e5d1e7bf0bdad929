// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::manual_find)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Layout Oxide
//!
//! Layout reconstruction for positioned PDF text: turns the flat list of text
//! fragments a page extractor yields into columns, lines, paragraphs and tables.
//!
//! ## Core Features
//!
//! - **Column Detection**: 1-D clustering of fragment centers with an adaptive cutoff
//! - **Line Grouping**: vertical-center proximity, majority-vote column per line
//! - **Table Detection**: 2 pluggable strategies (Segment Alignment, Global Grid)
//! - **Paragraphs**: gap, sentence-end and indentation rules, per column
//! - **Output**: JSON page structure and plain text
//!
//! ## Architecture
//! - **Pure per-page pipeline**: no shared state between pages
//! - **Infallible analysis**: empty or degenerate input yields empty output
//! - **Pluggable Design**: trait-based table detection strategies
//!
//! ## Quick Start
//!
//! ```
//! use layout_oxide::geometry::Rect;
//! use layout_oxide::layout::Fragment;
//! use layout_oxide::pipeline::{LayoutConfig, LayoutPipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fragments = vec![
//!     Fragment::new("Name", Rect::from_points(10.0, 100.0, 40.0, 110.0), "Helvetica", 10.0),
//!     Fragment::new("Age", Rect::from_points(200.0, 100.0, 220.0, 110.0), "Helvetica", 10.0),
//!     Fragment::new("Alice", Rect::from_points(10.0, 120.0, 42.0, 130.0), "Helvetica", 10.0),
//!     Fragment::new("30", Rect::from_points(202.0, 120.0, 215.0, 130.0), "Helvetica", 10.0),
//! ];
//!
//! let pipeline = LayoutPipeline::with_config(LayoutConfig::default())?;
//! let layout = pipeline.analyze_fragments(fragments);
//!
//! assert_eq!(layout.tables.len(), 1);
//! assert_eq!(layout.tables[0].rows[1], vec!["Alice", "30"]);
//! println!("{}", layout.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Geometry primitives
pub mod geometry;

// Layout heuristics
pub mod layout;

// Page and document orchestration
pub mod pipeline;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use layout::{Fragment, Line, Paragraph, Table};
pub use pipeline::{DocumentLayout, LayoutConfig, LayoutPipeline, Page, PageLayout};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan_sorts_last() {
            let mut values = vec![3.0, f32::NAN, -1.0, 2.0];
            values.sort_by(|a, b| safe_float_cmp(*a, *b));
            assert_eq!(&values[..3], &[-1.0, 2.0, 3.0]);
            assert!(values[3].is_nan());
        }

        #[test]
        fn test_safe_float_cmp_infinity() {
            assert_eq!(safe_float_cmp(f32::INFINITY, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(f32::NEG_INFINITY, f32::INFINITY), Ordering::Less);
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
