//! Node builder: leftmost-match partition of a line sequence into nodes.
//!
//! The first line that opens a construct splits the sequence into text before
//! it, the construct itself, and the remainder, which is partitioned the same
//! way. Lines that open nothing stay opaque text. Siblings are handled in a
//! loop; only nesting recurses, through [`Construct::from_lines`].

use crate::error::{ParseError, Result};
use crate::kind::ConstructKind;
use crate::line::join_lines;
use crate::locate::split_block;
use crate::node::{Construct, Node};

/// Recursion guard for the builder.
///
/// Parsed source never gets near it. A construct opened inside one of the same
/// kind is cut off at the first `end <keyword>`, which closes the outer one, so
/// real nesting is at most one level per [`ConstructKind`].
pub const MAX_DEPTH: usize = 256;

/// Partition `lines` into nodes.
///
/// `offset` is the 0-based index of `lines[0]` in the whole source and is only
/// used for line numbers; `depth` is the nesting depth of the constructs found.
pub(crate) fn build_nodes(lines: &[&str], offset: usize, depth: usize) -> Result<Vec<Node>> {
    if depth > MAX_DEPTH {
        return Err(ParseError::NestingTooDeep { limit: MAX_DEPTH });
    }

    let mut nodes = Vec::new();
    let mut rest = lines;
    let mut base = offset;

    loop {
        let opener = rest
            .iter()
            .enumerate()
            .find_map(|(i, line)| ConstructKind::opened_by(line).map(|kind| (i, kind)));

        let Some((start, kind)) = opener else {
            nodes.push(Node::Text(join_lines(rest)));
            break;
        };

        let split = split_block(rest, kind, start).map_err(|err| err.shifted(base))?;
        if !split.before.is_empty() {
            nodes.push(Node::Text(join_lines(split.before)));
        }
        nodes.push(Node::Construct(Construct::from_lines(
            kind,
            split.block,
            base + start,
            depth,
        )?));

        if split.after.is_empty() {
            break;
        }
        base += split.before.len() + split.block.len();
        rest = split.after;
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::split_lines;

    fn kinds(nodes: &[Node]) -> Vec<Option<ConstructKind>> {
        nodes.iter().map(Node::kind).collect()
    }

    #[test]
    fn plain_text_is_one_leaf() {
        let nodes = build_nodes(&split_lines("x = 1\ny = 2\n"), 0, 0).unwrap();
        assert_eq!(nodes, vec![Node::Text("x = 1\ny = 2\n".to_string())]);
    }

    #[test]
    fn before_block_after() {
        let text = "! lead\nsubroutine a\nend subroutine\nsubroutine b\nend subroutine\n";
        let nodes = build_nodes(&split_lines(text), 0, 0).unwrap();
        assert_eq!(
            kinds(&nodes),
            vec![
                None,
                Some(ConstructKind::Subroutine),
                Some(ConstructKind::Subroutine),
                None,
            ]
        );
        assert_eq!(nodes[0], Node::Text("! lead".to_string()));
        assert_eq!(nodes[3], Node::Text(String::new()));
        let lines: Vec<usize> = nodes
            .iter()
            .filter_map(Node::as_construct)
            .map(Construct::line)
            .collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn adjacent_constructs_have_no_leaf_between() {
        let nodes = build_nodes(&split_lines("type a\nend type\ntype b\nend type"), 0, 0).unwrap();
        assert_eq!(kinds(&nodes), vec![Some(ConstructKind::Type), Some(ConstructKind::Type)]);
    }

    #[test]
    fn missing_end_reports_source_line() {
        let text = "module m\nend module\n\nsubroutine s\n  x = 1\n";
        let err = build_nodes(&split_lines(text), 0, 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::EndStatementNotFound {
                keyword: "subroutine",
                line: 4,
            }
        );
    }

    #[test]
    fn missing_nested_end_reports_source_line() {
        let text = "module m\ncontains\n  function f()\n  end subroutine\nend module\n";
        let err = build_nodes(&split_lines(text), 0, 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::EndStatementNotFound {
                keyword: "function",
                line: 3,
            }
        );
    }

    #[test]
    fn same_kind_nesting_ends_at_first_end() {
        let text = "module a\nmodule b\nend module\nend module\n";
        let err = build_nodes(&split_lines(text), 0, 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::EndStatementNotFound {
                keyword: "module",
                line: 2,
            }
        );
    }

    #[test]
    fn module_procedure_in_interface_is_unsupported() {
        let text = "module m\ninterface area\n  module procedure circle_area\nend interface\nend module m\n";
        let err = build_nodes(&split_lines(text), 0, 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::EndStatementNotFound {
                keyword: "module",
                line: 3,
            }
        );
    }

    #[test]
    fn nesting_beyond_limit_is_an_error() {
        let shallow = split_lines("module m\nend module");
        assert!(build_nodes(&shallow, 0, MAX_DEPTH).is_ok());

        let nested = split_lines("module m\n  x = 1\nend module");
        assert_eq!(
            build_nodes(&nested, 0, MAX_DEPTH),
            Err(ParseError::NestingTooDeep { limit: MAX_DEPTH })
        );
    }
}
