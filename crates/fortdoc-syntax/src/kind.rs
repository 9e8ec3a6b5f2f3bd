//! Construct kinds and keyword matching.

use crate::line::strip_comment;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_PROGRAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bprogram\b").unwrap());
static RE_MODULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bmodule\b").unwrap());
static RE_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfunction\b").unwrap());
static RE_SUBROUTINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsubroutine\b").unwrap());
static RE_TYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btype\b").unwrap());

// `end` and the keyword may be separated by any whitespace, or none (`endmodule`).
static RE_END_PROGRAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bend\s*program\b").unwrap());
static RE_END_MODULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bend\s*module\b").unwrap());
static RE_END_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bend\s*function\b").unwrap());
static RE_END_SUBROUTINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bend\s*subroutine\b").unwrap());
static RE_END_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bend\s*type\b").unwrap());

/// The named block constructs the builder recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    Program,
    Module,
    Function,
    Subroutine,
    /// A derived-type definition (`type :: point` ... `end type`).
    Type,
}

impl ConstructKind {
    /// All kinds, in the order openers are tested on a line.
    pub const ALL: [ConstructKind; 5] = [
        ConstructKind::Program,
        ConstructKind::Module,
        ConstructKind::Function,
        ConstructKind::Subroutine,
        ConstructKind::Type,
    ];

    /// Keyword that opens the construct and follows `end` in its closing line.
    pub fn keyword(self) -> &'static str {
        match self {
            ConstructKind::Program => "program",
            ConstructKind::Module => "module",
            ConstructKind::Function => "function",
            ConstructKind::Subroutine => "subroutine",
            ConstructKind::Type => "type",
        }
    }

    fn keyword_re(self) -> &'static Regex {
        match self {
            ConstructKind::Program => &RE_PROGRAM,
            ConstructKind::Module => &RE_MODULE,
            ConstructKind::Function => &RE_FUNCTION,
            ConstructKind::Subroutine => &RE_SUBROUTINE,
            ConstructKind::Type => &RE_TYPE,
        }
    }

    fn end_re(self) -> &'static Regex {
        match self {
            ConstructKind::Program => &RE_END_PROGRAM,
            ConstructKind::Module => &RE_END_MODULE,
            ConstructKind::Function => &RE_END_FUNCTION,
            ConstructKind::Subroutine => &RE_END_SUBROUTINE,
            ConstructKind::Type => &RE_END_TYPE,
        }
    }

    /// True if `line` opens a construct of this kind.
    ///
    /// The keyword must appear as a whole word, in any case, in the code part
    /// of the line. A type definition additionally needs the keyword in the
    /// declaration part (before the first `,` or `:`) with no parenthesis
    /// there, so `type(point) :: p` is a declaration and not an opener.
    ///
    /// `module procedure foo` inside an `interface` block reads as a module
    /// opener, so such a file fails to parse with a missing `end module`.
    pub fn opens(self, line: &str) -> bool {
        let code = strip_comment(line);
        match self {
            ConstructKind::Type => {
                let declaration = code.split([',', ':']).next().unwrap_or_default();
                RE_TYPE.is_match(declaration) && !declaration.contains(['(', ')'])
            }
            _ => self.keyword_re().is_match(code),
        }
    }

    /// True if the code part of `line` contains `end <keyword>` as whole words.
    pub fn closes(self, line: &str) -> bool {
        self.end_re().is_match(strip_comment(line))
    }

    /// The first kind, in [`ConstructKind::ALL`] order, that `line` opens.
    pub fn opened_by(line: &str) -> Option<ConstructKind> {
        ConstructKind::ALL.into_iter().find(|kind| kind.opens(line))
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
