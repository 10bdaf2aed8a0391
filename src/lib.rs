//! # cap-features
//!
//! Streaming extraction of `cap_features` blocks from XML documents.
//!
//! Documents are processed with an event-driven parser; no tree is built,
//! so input size is not bounded by memory. For every `cap_features` element
//! the report gets a header line, and for every chunk of non-whitespace text
//! inside it a feature line carrying the most recently seen `weight`
//! attribute.
//!
//! ## Example
//!
//! ```rust
//! use cap_features::extract_str;
//!
//! let xml = r#"<cap_features><f weight="3">alpha</f></cap_features>"#;
//! assert_eq!(extract_str(xml).unwrap(), "cap_features\n    alpha 3\n");
//! ```
//!
//! Custom processing can plug into the same parser by implementing
//! [`ContentHandler`] and driving it with [`SaxParser`].

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Streaming parser
pub mod handler;
pub mod sax;

// Feature report
pub mod extractor;
pub mod report;

// Re-exports for convenience
pub use error::{Error, ParseError, Result};
pub use extractor::{
    extract_file, extract_files, extract_reader, extract_reader_with_limits, extract_str,
    FeatureExtractor, WEIGHT,
};
pub use handler::{Attributes, ContentHandler};
pub use limits::Limits;
pub use report::{parse_report, Feature, FeatureBlock, CAP_FEATURES};
pub use sax::SaxParser;

/// Version of the cap-features library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
