//! The parsed source file.

use crate::build::build_nodes;
use crate::error::{ParseError, Result};
use crate::line::split_lines;
use crate::node::{Body, Construct, Node};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A whole source file split into nodes.
///
/// `Tree::parse(text)?.to_source() == text` for any text that parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Body,
}

impl Tree {
    /// Parse `source` into a tree.
    pub fn parse(source: &str) -> Result<Self> {
        let root = Body::new(build_nodes(&split_lines(source), 0, 0)?);
        let tree = Self { root };
        debug!(
            lines = source.lines().count(),
            constructs = tree.constructs().count(),
            "parsed source"
        );
        Ok(tree)
    }

    /// Top-level nodes.
    pub fn root(&self) -> &Body {
        &self.root
    }

    /// Reconstructed source text.
    pub fn to_source(&self) -> String {
        self.to_string()
    }

    /// Every node below the root in depth-first pre-order.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        walk_into(self.root.nodes(), &mut out);
        out
    }

    /// Every construct in depth-first pre-order.
    pub fn constructs(&self) -> impl Iterator<Item = &Construct> {
        self.walk().into_iter().filter_map(Node::as_construct)
    }

    /// Call `f` on every construct in depth-first pre-order, with its nesting
    /// depth (0 for top-level constructs). Stops at the first error.
    ///
    /// A construct is handed to `f` before anything nested inside it, so
    /// documentation written on an outer construct is already part of its
    /// text by the time its children are visited.
    pub fn try_for_each_construct_mut<E, F>(&mut self, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(&mut Construct, usize) -> std::result::Result<(), E>,
    {
        visit_mut(self.root.nodes_mut(), 0, &mut f)
    }
}

fn walk_into<'t>(nodes: &'t [Node], out: &mut Vec<&'t Node>) {
    for node in nodes {
        out.push(node);
        walk_into(node.children(), out);
    }
}

fn visit_mut<E, F>(nodes: &mut [Node], depth: usize, f: &mut F) -> std::result::Result<(), E>
where
    F: FnMut(&mut Construct, usize) -> std::result::Result<(), E>,
{
    for node in nodes {
        if let Some(construct) = node.as_construct_mut() {
            f(&mut *construct, depth)?;
            visit_mut(construct.body_mut().nodes_mut(), depth + 1, f)?;
        }
    }
    Ok(())
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl FromStr for Tree {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Tree::parse(s)
    }
}
