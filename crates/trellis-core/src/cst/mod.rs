//! Concrete Syntax Tree (CST) for declarations and statements
//!
//! This module implements a lossless syntax tree using the Rowan library.
//! Every byte of the source, including whitespace and comments, is part of
//! the tree, so `tree.text()` always reproduces the formatted source.
//!
//! ## Architecture
//!
//! The CST uses Rowan's green/red tree pattern:
//!
//! - **Green Tree**: Immutable, position-independent storage
//!   - Stores actual source text with trivia (whitespace, comments)
//!   - Shared between tree versions: an edit rebuilds only the spine
//!   - Cheap to clone (uses Arc internally)
//!
//! - **Red Tree**: Dynamically constructed view with parent pointers
//!   - Created on-demand for traversal
//!   - Parent links are non-owning, so trees never form reference cycles
//!
//! ## Trivia Handling
//!
//! Trivia is attached to tokens (see [`trivia`]):
//! - **Leading trivia**: everything before a token back to the previous
//!   line's end (indentation, blank lines, comments, directives)
//! - **Trailing trivia**: everything after a token up to the line break
//!
//! ## Example
//!
//! ```rust
//! use trellis_core::cst::{SyntaxKind, SyntaxNode, make};
//! use trellis_core::ordering::ModifierKind;
//!
//! let class = make::class_decl(
//!     "",
//!     &[ModifierKind::Public],
//!     "Counter",
//!     vec![make::line("    ", make::field(&[ModifierKind::Private], "int", "count"))],
//! );
//! let root = SyntaxNode::new_root(make::compilation_unit(vec![class]));
//!
//! assert_eq!(
//!     root.text().to_string(),
//!     "public class Counter\n{\n    private int count;\n}\n"
//! );
//! assert!(root.descendants().any(|n| n.kind() == SyntaxKind::FieldDecl));
//! ```

mod language;
mod nodes;
mod syntax_kind;

pub mod ast;
pub mod edit;
pub mod make;
pub mod trivia;

pub use ast::is_single_line;
pub use language::TrellisLanguage;
pub use nodes::*;
pub use syntax_kind::SyntaxKind;
pub use trivia::{TriviaInfo, TriviaList};
