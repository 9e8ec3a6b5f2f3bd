//! Tree nodes.
//!
//! A [`Body`] is an ordered run of [`Node`]s. Each node is either opaque text
//! or a [`Construct`] with a header, an optional documentation block, a nested
//! body and a closing line. Every node reconstructs to exactly the text it was
//! built from until its documentation is rewritten.

use crate::build::build_nodes;
use crate::error::Result;
use crate::kind::ConstructKind;
use crate::line::{
    indent_width, is_blank, is_continuation, is_doc_line, join_lines, line_ending_of,
    COMMENT_MARKER, LINE_FEED,
};
use std::fmt;
use tracing::trace;

/// One element of a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Verbatim text containing no recognized construct.
    Text(String),
    Construct(Construct),
}

impl Node {
    /// Construct kind, or `None` for opaque text.
    pub fn kind(&self) -> Option<ConstructKind> {
        match self {
            Node::Text(_) => None,
            Node::Construct(c) => Some(c.kind),
        }
    }

    /// Nodes nested directly inside this one.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Construct(c) => c.body.nodes(),
        }
    }

    pub fn as_construct(&self) -> Option<&Construct> {
        match self {
            Node::Construct(c) => Some(c),
            Node::Text(_) => None,
        }
    }

    pub fn as_construct_mut(&mut self) -> Option<&mut Construct> {
        match self {
            Node::Construct(c) => Some(c),
            Node::Text(_) => None,
        }
    }

    /// Current text of the node.
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => f.write_str(text),
            Node::Construct(c) => fmt::Display::fmt(c, f),
        }
    }
}

/// An ordered sequence of nodes without a header of its own.
///
/// An empty body stands for zero lines; a body holding one empty text node
/// stands for a single blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    nodes: Vec<Node>,
}

impl Body {
    pub(crate) fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(LINE_FEED)?;
            }
            fmt::Display::fmt(node, f)?;
        }
        Ok(())
    }
}

/// A named block: header statement, documentation, body, closing statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construct {
    kind: ConstructKind,
    /// 1-based line of the header's first line in the parsed source.
    line: usize,
    /// Header lines joined by `\n`, without a trailing terminator.
    header: String,
    /// Documentation lines, each including its terminator.
    doc: String,
    body: Body,
    closing: String,
    indent_level: usize,
    line_ending: &'static str,
}

impl Construct {
    /// Build from the lines of a located block (opener through closing line).
    ///
    /// `offset` is the 0-based index of `lines[0]` in the whole source and
    /// `depth` the nesting depth of this construct.
    pub(crate) fn from_lines(
        kind: ConstructKind,
        lines: &[&str],
        offset: usize,
        depth: usize,
    ) -> Result<Self> {
        debug_assert!(lines.len() >= 2, "a block has an opener and a closing line");
        let last = lines.len() - 1;

        // Header runs through the first line that does not continue.
        let header_end = (0..last)
            .find(|&i| !is_continuation(lines[i]))
            .unwrap_or(last.saturating_sub(1));
        let header = join_lines(&lines[..=header_end]);

        let doc_start = header_end + 1;
        let doc_len = lines[doc_start..last]
            .iter()
            .take_while(|line| !is_blank(line) && is_doc_line(line))
            .count();
        let doc: String = lines[doc_start..doc_start + doc_len]
            .iter()
            .flat_map(|line| [*line, LINE_FEED])
            .collect();

        let body_start = doc_start + doc_len;
        let body_lines = &lines[body_start..last];
        let indent_level = body_lines
            .iter()
            .find(|line| !is_blank(line))
            .map_or(0, |line| indent_width(line));

        let body = if body_lines.is_empty() {
            Body::default()
        } else {
            Body::new(build_nodes(body_lines, offset + body_start, depth + 1)?)
        };

        trace!(%kind, line = offset + 1, doc_lines = doc_len, indent_level, "built construct");

        Ok(Self {
            kind,
            line: offset + 1,
            header,
            doc,
            body,
            closing: lines[last].to_string(),
            indent_level,
            line_ending: line_ending_of(lines[0]),
        })
    }

    pub fn kind(&self) -> ConstructKind {
        self.kind
    }

    /// 1-based line number where the construct starts.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Header statement, including continuation lines.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// First header line with surrounding whitespace removed.
    pub fn signature(&self) -> &str {
        self.header.lines().next().unwrap_or_default().trim()
    }

    /// Raw documentation block, comment markers and terminators included.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn has_doc(&self) -> bool {
        !self.doc.is_empty()
    }

    /// Documentation text with indentation, comment markers and the single
    /// space after them removed.
    pub fn doc_text(&self) -> String {
        self.doc
            .lines()
            .map(|line| {
                let line = line.trim_start();
                let line = line.strip_prefix(COMMENT_MARKER).unwrap_or(line);
                line.strip_prefix(' ').unwrap_or(line)
            })
            .collect::<Vec<_>>()
            .join(LINE_FEED)
    }

    /// Closing statement line.
    pub fn closing(&self) -> &str {
        &self.closing
    }

    /// Leading spaces of the first non-blank body line when the construct was built.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Replace the documentation block with `doc`.
    ///
    /// Each line of `doc` becomes `<indent>! <line>`, indented by
    /// [`indent_level`](Self::indent_level). Any previous documentation is
    /// discarded; an empty `doc` removes the block.
    pub fn write_doc(&mut self, doc: &str) {
        let indent = " ".repeat(self.indent_level);
        self.doc = doc
            .lines()
            .map(|line| format!("{indent}{COMMENT_MARKER} {line}{}", self.line_ending))
            .collect();
    }

    /// Current text of the construct.
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        f.write_str(LINE_FEED)?;
        f.write_str(&self.doc)?;
        if !self.body.is_empty() {
            fmt::Display::fmt(&self.body, f)?;
            f.write_str(LINE_FEED)?;
        }
        f.write_str(&self.closing)
    }
}
