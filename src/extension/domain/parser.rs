//! Descriptor-resource grammar.
//!
//! A descriptor resource lists one implementation type name per line. A `#`
//! starts a comment that runs to the end of the line, surrounding whitespace is
//! ignored, and blank lines are skipped. Names are collected across every
//! resource contributing to one capability, keeping the first occurrence only.

use super::{DescriptorSyntaxError, QualifiedTypeName};
use std::collections::HashSet;

/// Ordered, duplicate-free list of candidate implementation names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    names: Vec<QualifiedTypeName>,
    seen: HashSet<QualifiedTypeName>,
}

impl CandidateList {
    /// Creates an empty candidate list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every line of one resource into a fresh list.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorSyntaxError`] for the first malformed line.
    pub fn from_lines<I, S>(location: &str, lines: I) -> Result<Self, DescriptorSyntaxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut candidates = Self::new();
        for (index, line) in lines.into_iter().enumerate() {
            candidates.push_line(location, index + 1, line.as_ref())?;
        }
        Ok(candidates)
    }

    /// Parses one descriptor line and appends its name if not yet present.
    ///
    /// Returns `true` when a new name was appended. Comments, blank lines and
    /// repeated names return `false`.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorSyntaxError::EmbeddedWhitespace`] when the entry
    /// contains a space or tab, or [`DescriptorSyntaxError::IllegalTypeName`]
    /// when it is not a dotted identifier.
    pub fn push_line(
        &mut self,
        location: &str,
        line_number: usize,
        line: &str,
    ) -> Result<bool, DescriptorSyntaxError> {
        let entry = strip_comment(line).trim();
        if entry.is_empty() {
            return Ok(false);
        }

        if entry.contains([' ', '\t']) {
            return Err(DescriptorSyntaxError::EmbeddedWhitespace {
                location: location.to_owned(),
                line_number,
                line: entry.to_owned(),
            });
        }

        let name = QualifiedTypeName::new(entry)
            .map_err(|_| DescriptorSyntaxError::IllegalTypeName {
                location: location.to_owned(),
                line_number,
                line: entry.to_owned(),
            })?;

        if !self.seen.insert(name.clone()) {
            return Ok(false);
        }
        self.names.push(name);
        Ok(true)
    }

    /// Returns the candidate names in first-seen order.
    #[must_use]
    pub fn names(&self) -> &[QualifiedTypeName] {
        &self.names
    }

    /// Returns the number of distinct candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no candidate has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Consumes the list, returning the names in first-seen order.
    #[must_use]
    pub fn into_names(self) -> Vec<QualifiedTypeName> {
        self.names
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(content, _)| content)
}
