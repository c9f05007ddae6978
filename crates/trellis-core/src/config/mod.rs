//! Configuration system for trellis
//!
//! This module provides:
//! - JSON, JSONC and TOML configuration file support
//! - Auto-discovery by traversing up directories
//! - Strong typing with serde and JSON Schema generation via schemars
//!
//! ## Configuration Files
//!
//! - `.trellisrc.json` - dotfile config (JSON)
//! - `trellis.jsonc` - JSON with comments and trailing commas
//! - `trellis.json` - standard JSON
//! - `trellis.toml` - TOML
//!
//! ## Example Configuration
//!
//! ```jsonc
//! {
//!   "ordering": { "memberSortMode": "byKindThenByName" },
//!   "formatting": { "indentStyle": "spaces", "indentSize": 4, "newline": "lf" },
//!   "removal": { "stripDocumentationComments": true },
//!   "arguments": { "allowParams": true, "allowCandidate": false }
//! }
//! ```

mod loader;
mod trellis_config;

pub use loader::ConfigLoader;
pub use trellis_config::{
    ArgumentConfiguration, FormattingConfiguration, FormattingOptions, IndentStyle,
    MemberSortMode, NewlineStyle, OrderingConfiguration, RemovalConfiguration,
    TrellisConfiguration,
};
