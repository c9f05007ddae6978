//! Configuration types for trellis

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::TrellisError;
use crate::result::Result;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrellisConfiguration {
    /// JSON schema reference, ignored at runtime
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[schemars(description = "Canonical ordering settings")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<OrderingConfiguration>,

    #[schemars(description = "Formatting used for synthesized trivia")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingConfiguration>,

    #[schemars(description = "Node removal settings")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal: Option<RemovalConfiguration>,

    #[schemars(description = "Argument resolution defaults")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<ArgumentConfiguration>,
}

/// Ordering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderingConfiguration {
    #[schemars(description = "How members compare when checking canonical order")]
    pub member_sort_mode: Option<MemberSortMode>,
}

/// Member comparison mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MemberSortMode {
    /// Rank only; members of the same kind keep their relative order
    #[default]
    ByKind,
    /// Rank, then ordinal name comparison
    ByKindThenByName,
}

/// Formatting configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattingConfiguration {
    #[schemars(description = "Indent with spaces or tabs")]
    pub indent_style: Option<IndentStyle>,

    #[schemars(description = "Number of spaces per indentation level")]
    pub indent_size: Option<usize>,

    #[schemars(description = "Line break style for synthesized lines")]
    pub newline: Option<NewlineStyle>,
}

/// Indent style for formatting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    #[default]
    Spaces,
    Tabs,
}

/// Line break style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NewlineStyle {
    #[default]
    Lf,
    Crlf,
}

/// Removal configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemovalConfiguration {
    #[schemars(description = "Drop the /// comment block directly above a removed node")]
    pub strip_documentation_comments: Option<bool>,
}

/// Argument resolution configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentConfiguration {
    #[schemars(description = "Map surplus positional arguments to a trailing params parameter")]
    pub allow_params: Option<bool>,

    #[schemars(description = "Use the first candidate when overload resolution is ambiguous")]
    pub allow_candidate: Option<bool>,
}

/// Resolved formatting settings used when trivia has to be synthesized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingOptions {
    /// One level of indentation
    pub indent_unit: String,
    pub newline: String,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            newline: "\n".to_string(),
        }
    }
}

impl TrellisConfiguration {
    /// Load configuration from file
    ///
    /// `.json` is parsed as strict JSON, `.jsonc` as JSON with comments and
    /// trailing commas, `.toml` as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| TrellisError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        match ext {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| TrellisError::config_error(format!("Invalid JSON: {e}"))),
            Some("jsonc") => Self::from_jsonc_str(&content),
            Some("toml") => toml::from_str(&content)
                .map_err(|e| TrellisError::config_error(format!("Invalid TOML: {e}"))),
            other => Err(TrellisError::config_error(format!(
                "Unsupported config extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Parse JSON with comments and trailing commas
    pub fn from_jsonc_str(content: &str) -> Result<Self> {
        json5::from_str(content)
            .map_err(|e| TrellisError::config_error(format!("Invalid JSONC: {e}")))
    }

    /// JSON schema for the configuration file
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(TrellisConfiguration);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
    }

    /// Reject values the editing operations cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.formatting.as_ref().and_then(|f| f.indent_size) == Some(0) {
            return Err(TrellisError::config_error(
                "formatting.indentSize must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn member_sort_mode(&self) -> MemberSortMode {
        self.ordering
            .as_ref()
            .and_then(|o| o.member_sort_mode)
            .unwrap_or_default()
    }

    pub fn formatting_options(&self) -> FormattingOptions {
        let Some(formatting) = &self.formatting else {
            return FormattingOptions::default();
        };
        let indent_unit = match formatting.indent_style.unwrap_or_default() {
            IndentStyle::Tabs => "\t".to_string(),
            IndentStyle::Spaces => " ".repeat(formatting.indent_size.unwrap_or(4)),
        };
        let newline = match formatting.newline.unwrap_or_default() {
            NewlineStyle::Lf => "\n",
            NewlineStyle::Crlf => "\r\n",
        };
        FormattingOptions {
            indent_unit,
            newline: newline.to_string(),
        }
    }

    pub fn strip_documentation_comments(&self) -> bool {
        self.removal
            .as_ref()
            .and_then(|r| r.strip_documentation_comments)
            .unwrap_or(true)
    }

    pub fn allow_params(&self) -> bool {
        self.arguments
            .as_ref()
            .and_then(|a| a.allow_params)
            .unwrap_or(false)
    }

    pub fn allow_candidate(&self) -> bool {
        self.arguments
            .as_ref()
            .and_then(|a| a.allow_candidate)
            .unwrap_or(false)
    }
}
