//! fortdoc syntax library: lossless block structure for Fortran sources.
//!
//! Splits a source file into `program`, `module`, `function`, `subroutine`
//! and derived-type blocks, each with its header statement, documentation
//! comment block, body and closing statement. Everything the parser does not
//! recognize is kept as opaque text, so the tree always reconstructs to the
//! exact input. The only mutation offered is replacing a block's
//! documentation comments.
//!
//! ```
//! use fortdoc_syntax::{ConstructKind, Tree};
//!
//! let mut tree = Tree::parse("module m\ntype t\nend type\nend module\n").unwrap();
//! tree.try_for_each_construct_mut(|c, _| {
//!     if c.kind() == ConstructKind::Type {
//!         c.write_doc("A point type.");
//!     }
//!     Ok::<_, std::convert::Infallible>(())
//! })
//! .unwrap();
//! assert_eq!(
//!     tree.to_source(),
//!     "module m\ntype t\n! A point type.\nend type\nend module\n"
//! );
//! ```

mod build;
mod error;
pub mod kind;
pub mod line;
pub mod locate;
mod node;
mod tree;

pub use build::MAX_DEPTH;
pub use error::{ParseError, Result};
pub use kind::ConstructKind;
pub use node::{Body, Construct, Node};
pub use tree::Tree;
