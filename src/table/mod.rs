//! The weighting table: sort code ranges mapped to checksum rules.
//!
//! Records are read from a plain text file (one rule per line, the layout
//! Vocalink publishes as `valacdos.txt`). A table is built once and never
//! mutated afterwards.

mod error;
mod lazy;
mod rule;

pub use error::{RuleError, TableError};
pub use lazy::LazyTable;
pub use rule::{Method, WeightingRule, WEIGHT_COUNT};

use std::fs;
use std::path::Path;

/// File name looked up in the working directory when no path is configured.
pub const DEFAULT_TABLE_FILE: &str = "valacdos.txt";

/// Ordered, read-only collection of weighting rules.
///
/// Order is source order. Ranges may overlap, in which case every matching
/// rule applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightingTable {
    rules: Vec<WeightingRule>,
}

impl WeightingTable {
    pub fn from_rules(rules: Vec<WeightingRule>) -> Self {
        Self { rules }
    }

    /// Parse every non-blank line as a rule. A single bad record fails the
    /// whole table.
    pub fn parse(source: &str) -> Result<Self, TableError> {
        let rules = source
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                WeightingRule::parse_line(line).map_err(|source| TableError::Record {
                    line: idx + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Read and parse a table file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let source = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse(&source)?;
        tracing::debug!(
            path = %path.display(),
            rules = table.len(),
            "loaded weighting table"
        );
        Ok(table)
    }

    pub fn rules(&self) -> &[WeightingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose range contains `sort_code`, in table order.
    pub fn matching(&self, sort_code: u32) -> impl Iterator<Item = &WeightingRule> + '_ {
        self.rules.iter().filter(move |rule| rule.contains(sort_code))
    }
}
