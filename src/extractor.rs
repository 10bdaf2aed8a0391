//! Extraction of `cap_features` blocks
//!
//! [`FeatureExtractor`] is a [`ContentHandler`] with two states, outside and
//! inside a `cap_features` element. Entering a block writes the header line.
//! Every non-whitespace chunk of character data inside the block writes one
//! feature line carrying the most recent `weight` attribute.
//!
//! The weight is sticky: an element without a `weight` attribute reuses the
//! last value seen, and the value survives across sibling `cap_features`
//! blocks of the same document. Only a new document starts from an empty
//! weight.
//!
//! ```
//! let report = cap_features::extract_str(
//!     r#"<cap_features><f weight="5">a</f><g>b</g></cap_features>"#,
//! ).unwrap();
//! assert_eq!(report, "cap_features\n    a 5\n    b 5\n");
//! ```

use crate::error::{Error, Result};
use crate::handler::{Attributes, ContentHandler};
use crate::limits::Limits;
use crate::report::{write_feature, write_header, CAP_FEATURES};
use crate::sax::SaxParser;
use std::io::{BufRead, Write};
use std::path::Path;

/// Attribute carrying a feature's weight
pub const WEIGHT: &str = "weight";

/// Streaming report writer for one document
#[derive(Debug)]
pub struct FeatureExtractor<W: Write> {
    out: W,
    /// Open `cap_features` elements; inside while non-zero
    depth: usize,
    last_weight: String,
    last_name: String,
}

impl<W: Write> FeatureExtractor<W> {
    /// Create an extractor writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            last_weight: String::new(),
            last_name: String::new(),
        }
    }

    /// Whether the parser is currently within a `cap_features` element
    pub fn is_inside(&self) -> bool {
        self.depth > 0
    }

    /// Most recent `weight` value, empty if none seen yet
    pub fn last_weight(&self) -> &str {
        &self.last_weight
    }

    /// Most recently reported feature text
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Get a reference to the sink
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the extractor and return the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ContentHandler for FeatureExtractor<W> {
    fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<()> {
        if !self.is_inside() {
            if name == CAP_FEATURES {
                self.depth = 1;
                write_header(&mut self.out)?;
            }
            return Ok(());
        }

        if let Some(weight) = attributes.get(WEIGHT) {
            self.last_weight.clear();
            self.last_weight.push_str(weight);
        }
        if name == CAP_FEATURES {
            log::debug!("nested {} element", CAP_FEATURES);
            self.depth += 1;
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<()> {
        if self.is_inside() && name == CAP_FEATURES {
            self.depth -= 1;
        }
        Ok(())
    }

    fn characters(&mut self, content: &str) -> Result<()> {
        if content.trim().is_empty() || !self.is_inside() {
            return Ok(());
        }

        self.last_name.clear();
        self.last_name.push_str(content);
        write_feature(&mut self.out, &self.last_name, &self.last_weight)?;
        Ok(())
    }
}

/// Stream one document from `input`, writing its report to `out`
///
/// No depth or attribute limits are applied.
pub fn extract_reader<R: BufRead, W: Write>(input: R, out: W) -> Result<()> {
    extract_reader_with_limits(input, out, Limits::unbounded())
}

/// Like [`extract_reader`], with explicit parser limits
pub fn extract_reader_with_limits<R: BufRead, W: Write>(
    input: R,
    out: W,
    limits: Limits,
) -> Result<()> {
    let mut extractor = FeatureExtractor::new(out);
    SaxParser::new()
        .with_limits(limits)
        .parse_reader(input, &mut extractor)
}

/// Stream one file, writing its report to `out`
pub fn extract_file<P: AsRef<Path>, W: Write>(path: P, out: W) -> Result<()> {
    let mut extractor = FeatureExtractor::new(out);
    SaxParser::new().parse_file(path, &mut extractor)
}

/// Process files in order, stopping at the first failure
///
/// Each file gets a fresh extractor. Lines already written stay written when
/// a later file fails; the returned error names the failing path.
pub fn extract_files<I, P, W>(paths: I, mut out: W) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    W: Write,
{
    for path in paths {
        let path = path.as_ref();
        extract_file(path, &mut out).map_err(|e| e.in_file(path))?;
        log::debug!("finished {}", path.display());
    }
    Ok(())
}

/// Extract the report of an in-memory document as a string
pub fn extract_str(xml: &str) -> Result<String> {
    let mut out = Vec::new();
    extract_reader(xml.as_bytes(), &mut out)?;
    String::from_utf8(out).map_err(|e| Error::Report(e.to_string()))
}
