//! Trellis Core
//!
//! Structural editing for an immutable, formatting-preserving syntax tree of
//! declarations and statements. Every edit returns a new tree; the input tree
//! is never changed and every byte of trivia not involved in the edit is kept.
//!
//! - [`ordering`]: canonical orders for modifiers and members
//! - [`insert`]: ordered insertion with trivia redistribution
//! - [`chain`]: brace analysis and rewriting for `if`/`else` chains
//! - [`arguments`]: argument-to-parameter resolution
//! - [`remove`]: node removal with trivia preservation

pub mod arguments;
pub mod chain;
pub mod config;
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod error;
pub mod insert;
pub mod ordering;
pub mod remove;
pub mod result;

// Re-export commonly used types
pub use arguments::{
    ArgumentResolver, ParameterSymbol, ResolveOptions, SemanticModel, Signature, SymbolInfo,
    TypeSymbol,
};
pub use chain::{Branch, BranchChain, BranchPosition, DelimiterAction};
// Configuration system
pub use config::{ConfigLoader, FormattingOptions, MemberSortMode, TrellisConfiguration};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken, TrellisLanguage, TriviaList};
pub use error::{ErrorKind, TrellisError};
pub use insert::{Inserter, Insertion};
pub use ordering::{
    Accessibility, CanonicalOrder, MemberComparer, MemberKind, MemberOrder, ModifierComparer,
    ModifierKind, ModifierOrder,
};
pub use remove::{RemoveOptions, Remover};
pub use result::Result;

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
