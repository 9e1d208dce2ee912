//! Translation options.

use serde::Deserialize;

/// What to do with keyword arguments at call sites, which have no lowering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordArguments {
    /// Abort with a compilation error.
    #[default]
    Reject,
    /// Drop them from the emitted call and log a warning.
    Drop,
}

/// Options for one translation run. Deserializable from the `[transpile]`
/// table of `pyjs.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranspileOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Directory every `require` points into.
    pub adapter_dir: String,
    pub keyword_arguments: KeywordArguments,
    /// Validate handler output shapes while dispatching.
    pub contract_checks: bool,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            adapter_dir: "./not_python".into(),
            keyword_arguments: KeywordArguments::Reject,
            contract_checks: cfg!(debug_assertions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_table_keeps_defaults() {
        let options: TranspileOptions = toml::from_str(
            r#"
indent_width = 2
keyword_arguments = "drop"
"#,
        )
        .unwrap();
        assert_eq!(options.indent_width, 2);
        assert_eq!(options.keyword_arguments, KeywordArguments::Drop);
        assert_eq!(options.adapter_dir, "./not_python");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: Result<TranspileOptions, _> = toml::from_str("keyword_arguments = \"ignore\"");
        assert!(result.is_err());
    }
}
