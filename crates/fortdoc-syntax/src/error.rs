//! Parse failures.
//!
//! Construction of a [`Tree`](crate::Tree) either succeeds completely or fails
//! with one of these. Reconstruction never fails.

use thiserror::Error;

/// Why a source text could not be split into blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An opening line was found but no `end <keyword>` line follows it.
    ///
    /// `line` is the 1-based line number of the opener in the source.
    #[error("no `end {keyword}` statement found for the {keyword} opened at line {line}")]
    EndStatementNotFound { keyword: &'static str, line: usize },

    /// Constructs are nested deeper than the builder is willing to recurse.
    #[error("constructs nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ParseError {
    /// Move a line number reported against a sub-span to the enclosing source.
    pub(crate) fn shifted(self, lines: usize) -> Self {
        match self {
            ParseError::EndStatementNotFound { keyword, line } => {
                ParseError::EndStatementNotFound {
                    keyword,
                    line: line + lines,
                }
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
