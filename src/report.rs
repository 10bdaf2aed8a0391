//! The plain-text feature report
//!
//! A report is a sequence of blocks. Each block starts with a line reading
//! exactly `cap_features`, followed by one line per feature made of four
//! spaces, the feature text, one space and the weight (possibly empty):
//!
//! ```text
//! cap_features
//!     alpha 3
//!     beta 3
//! ```
//!
//! The writers here are used by the extractor; [`parse_report`] reads a
//! report back, e.g. to load it into an index.

use crate::error::{Error, Result};
use std::fmt;
use std::io::{BufRead, Write};

/// Element that delimits one report block, also the block header line
pub const CAP_FEATURES: &str = "cap_features";

/// Indentation of a feature line
pub const FEATURE_INDENT: &str = "    ";

/// Write a block header line
pub fn write_header<W: Write + ?Sized>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", CAP_FEATURES)
}

/// Write a feature line
pub fn write_feature<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    weight: &str,
) -> std::io::Result<()> {
    writeln!(out, "{}{} {}", FEATURE_INDENT, name, weight)
}

/// One reported feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Feature text
    pub name: String,
    /// Raw weight value, empty when none was seen
    pub weight: String,
}

impl Feature {
    /// Create a new feature
    pub fn new(name: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: weight.into(),
        }
    }

    /// The weight as an integer score, if it is one
    pub fn score(&self) -> Option<i64> {
        self.weight.trim().parse().ok()
    }
}

/// Features of one `cap_features` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureBlock {
    /// Features in report order
    pub features: Vec<Feature>,
}

impl FeatureBlock {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature
    pub fn with_feature(mut self, name: impl Into<String>, weight: impl Into<String>) -> Self {
        self.features.push(Feature::new(name, weight));
        self
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the block has no features
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl fmt::Display for FeatureBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", CAP_FEATURES)?;
        for feature in &self.features {
            writeln!(f, "{}{} {}", FEATURE_INDENT, feature.name, feature.weight)?;
        }
        Ok(())
    }
}

/// Read a report back into blocks
pub fn parse_report<R: BufRead>(input: R) -> Result<Vec<FeatureBlock>> {
    let mut blocks: Vec<FeatureBlock> = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;

        if line == CAP_FEATURES {
            blocks.push(FeatureBlock::new());
        } else if let Some(body) = line.strip_prefix(FEATURE_INDENT) {
            let block = blocks.last_mut().ok_or_else(|| {
                Error::Report(format!("line {}: feature before any {} line", line_no, CAP_FEATURES))
            })?;
            // The feature text may itself contain spaces; the weight never does
            let (name, weight) = body.rsplit_once(' ').ok_or_else(|| {
                Error::Report(format!("line {}: missing weight separator", line_no))
            })?;
            block.features.push(Feature::new(name, weight));
        } else if !line.trim().is_empty() {
            return Err(Error::Report(format!(
                "line {}: unexpected content '{}'",
                line_no, line
            )));
        }
    }

    log::debug!("read {} feature blocks", blocks.len());
    Ok(blocks)
}
