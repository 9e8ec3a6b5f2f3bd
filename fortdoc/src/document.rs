//! Documentation pass over a parsed tree.

use crate::engine::{DocEngine, DocRequest};
use anyhow::{Context, Result};
use fortdoc_syntax::{ConstructKind, Node, Tree};
use tracing::{debug, warn};

/// Outcome of [`insert_docs`] on one tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InsertReport {
    /// Constructs whose documentation block was written.
    pub documented: usize,
    /// Constructs left alone because they already had documentation or the
    /// engine returned nothing.
    pub skipped: usize,
}

impl InsertReport {
    pub fn changed(&self) -> bool {
        self.documented > 0
    }
}

/// Ask `engine` for documentation of every construct, outermost first, and
/// write it into the tree.
///
/// Constructs that already carry documentation are skipped unless
/// `overwrite` is set. Each construct is written at most once.
pub fn insert_docs(
    tree: &mut Tree,
    engine: &mut dyn DocEngine,
    overwrite: bool,
) -> Result<InsertReport> {
    let mut report = InsertReport::default();

    tree.try_for_each_construct_mut(|construct, depth| -> Result<()> {
        if construct.has_doc() && !overwrite {
            debug!(line = construct.line(), kind = %construct.kind(), "already documented");
            report.skipped += 1;
            return Ok(());
        }

        let request = DocRequest {
            kind: construct.kind(),
            source: construct.to_source(),
        };
        let doc = engine.generate(&request).with_context(|| {
            format!(
                "{} engine failed on line {}: {}",
                engine.name(),
                construct.line(),
                construct.signature()
            )
        })?;

        if doc.trim().is_empty() {
            warn!(line = construct.line(), kind = %construct.kind(), "engine returned no documentation");
            report.skipped += 1;
            return Ok(());
        }

        debug!(line = construct.line(), kind = %construct.kind(), depth, "writing documentation");
        construct.write_doc(&doc);
        report.documented += 1;
        Ok(())
    })?;

    Ok(report)
}

/// A construct without a documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undocumented {
    pub kind: ConstructKind,
    pub line: usize,
    pub depth: usize,
    pub signature: String,
}

/// Every construct without documentation, in source order.
pub fn undocumented(tree: &Tree) -> Vec<Undocumented> {
    let mut out = Vec::new();
    collect_undocumented(tree.root().nodes(), 0, &mut out);
    out
}

fn collect_undocumented(nodes: &[Node], depth: usize, out: &mut Vec<Undocumented>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Construct(construct) => {
                if !construct.has_doc() {
                    out.push(Undocumented {
                        kind: construct.kind(),
                        line: construct.line(),
                        depth,
                        signature: construct.signature().to_string(),
                    });
                }
                collect_undocumented(construct.body().nodes(), depth + 1, out);
            }
        }
    }
}
