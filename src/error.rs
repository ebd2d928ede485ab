//! Error taxonomy for rule compilation, table loading and matcher misuse.

use thiserror::Error;

/// Errors produced while compiling rules, loading tables, or querying a [`crate::Checker`].
///
/// Ordinary Unicode data gaps are never represented here: an unmapped code point silently
/// resolves to `AL`/`Cn` (see [`crate::class::CLASS_DATA_ERROR_FALLBACK`]) rather than raising
/// an error, since that is the library's documented behaviour for codepoints missing from a
/// data table.
#[derive(Debug, Error)]
pub enum LbcError {
    /// A rule string could not be tokenised, or its brackets were unbalanced, or it did not
    /// contain exactly one verdict symbol.
    #[error("rule parse error in {}: {message}", rule_name.as_deref().unwrap_or("<unnamed>"))]
    Parse {
        /// Name of the offending rule, if it had one.
        rule_name: Option<String>,
        /// Human-readable description of what went wrong.
        message: String,
    },

    /// An argument supplied by the caller was out of the range the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The rule tree or matcher state reached a condition that should be unreachable given a
    /// correctly compiled rule set. Indicates a corrupted or hand-built `Pattern` tree.
    #[error("internal invariant violated: {0}")]
    Internal(String),

    /// A class/East-Asian table's JSON payload could not be deserialized.
    #[error("failed to parse table {key:?}: {source}")]
    TableParse {
        /// The table key (built-in identifier or file path) that failed to load.
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A class/East-Asian table could not be read from disk.
    #[error("failed to read table {key:?}: {source}")]
    TableIo {
        /// The table key (built-in identifier or file path) that failed to load.
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl LbcError {
    pub(crate) fn parse(rule_name: Option<&str>, message: impl Into<String>) -> Self {
        LbcError::Parse {
            rule_name: rule_name.map(str::to_owned),
            message: message.into(),
        }
    }
}
