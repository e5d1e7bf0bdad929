//! Layout analysis algorithms for positioned text.
//!
//! Each stage of the page pipeline lives in its own module:
//! - Column classification by 1-D clustering of horizontal centers
//! - Line grouping by vertical-center proximity
//! - Table detection by segment alignment (or page-wide grid clustering)
//! - Paragraph grouping by gap, punctuation and indentation rules

pub mod clustering;
pub mod column_detector;
pub mod fragment;
pub mod line_grouper;
pub mod paragraph_grouper;
pub mod table_detector;

// Re-export main types
pub use clustering::{cluster_1d, median, Cluster};
pub use column_detector::classify_columns;
pub use fragment::Fragment;
pub use line_grouper::{group_fragments_into_lines, Line, LineBuilder};
pub use paragraph_grouper::{group_lines_into_paragraphs, Paragraph, ParagraphBuilder};
pub use table_detector::{
    create_detector, detect_tables, GlobalGridDetector, Segment, SegmentAlignmentDetector,
    Table, TableDetector,
};
