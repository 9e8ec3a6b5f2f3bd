//! Locating a construct's closing line and cutting the line sequence around it.

use crate::error::{ParseError, Result};
use crate::kind::ConstructKind;
use tracing::trace;

/// Index of the first line after `start` that closes a `kind` construct.
///
/// The opener line itself is never its own closing line.
pub fn find_end_statement(lines: &[&str], kind: ConstructKind, start: usize) -> Result<usize> {
    let found = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| kind.closes(line))
        .map(|(i, _)| i);

    match found {
        Some(end) => {
            trace!(%kind, start, end, "located end statement");
            Ok(end)
        }
        None => Err(ParseError::EndStatementNotFound {
            keyword: kind.keyword(),
            line: start + 1,
        }),
    }
}

/// A line sequence cut into the part before a construct, the construct
/// itself (opener through closing line), and the rest.
#[derive(Debug, PartialEq, Eq)]
pub struct Split<'l, 'a> {
    pub before: &'l [&'a str],
    pub block: &'l [&'a str],
    pub after: &'l [&'a str],
}

/// Cut `lines` around the `kind` construct opened at `start`.
///
/// The three slices are contiguous and together cover `lines` exactly.
pub fn split_block<'l, 'a>(
    lines: &'l [&'a str],
    kind: ConstructKind,
    start: usize,
) -> Result<Split<'l, 'a>> {
    let end = find_end_statement(lines, kind, start)?;
    let (before, rest) = lines.split_at(start);
    let (block, after) = rest.split_at(end - start + 1);
    Ok(Split {
        before,
        block,
        after,
    })
}
