//! Typed model of the metadata block embedded in grammar artifacts.
//!
//! The compiler appends a JSON block to every artifact carrying the
//! human-facing side of the grammar: the language name plus symbol and field
//! names in id order. This module models that block with [`facet`] and
//! deserializes it via [`facet_json`].

use facet::Facet;

use crate::loader::LoadError;

/// The metadata block of a compiled grammar artifact.
///
/// Symbol and field lists mirror the binary tables: entry `i` of
/// [`symbols`](Self::symbols) describes symbol id `i`, and entry `i` of
/// [`fields`](Self::fields) names field id `i + 1` (field ids are 1-based;
/// 0 means "no field").
#[derive(Debug, Clone, Facet)]
pub struct Metadata {
    /// The short name of the language (e.g. `"bash"` or `"rust"`).
    pub name: String,

    /// Per-symbol descriptions, in symbol-id order.
    pub symbols: Vec<SymbolInfo>,

    /// Field names, in field-id order.
    #[facet(default)]
    pub fields: Vec<String>,
}

/// Description of a single grammar symbol.
#[derive(Debug, Clone, Facet)]
pub struct SymbolInfo {
    /// Symbol name as it appears in syntax trees.
    pub name: String,

    /// Whether nodes for this symbol are named.
    #[facet(default)]
    pub named: bool,
}

/// Parses an artifact's metadata block into a strongly typed [`Metadata`].
///
/// # Errors
///
/// Returns [`LoadError::Malformed`] if the block is not valid JSON or fails
/// schema deserialization.
pub fn parse_metadata(json: &str) -> Result<Metadata, LoadError> {
    facet_json::from_str(json).map_err(|e| LoadError::Malformed(format!("metadata: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_metadata() {
        let json = r#"{
            "name": "bash",
            "symbols": [
                {"name": "end", "named": false},
                {"name": "word", "named": true}
            ],
            "fields": ["name", "body"]
        }"#;

        let metadata = parse_metadata(json).unwrap();
        assert_eq!(metadata.name, "bash");
        assert_eq!(metadata.symbols.len(), 2);
        assert_eq!(metadata.symbols[1].name, "word");
        assert!(metadata.symbols[1].named);
        assert_eq!(metadata.fields, vec!["name", "body"]);
    }

    #[test]
    fn test_parse_defaults() {
        let json = r#"{
            "name": "toy",
            "symbols": [{"name": "end"}]
        }"#;

        let metadata = parse_metadata(json).unwrap();
        assert!(!metadata.symbols[0].named);
        assert!(metadata.fields.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        let err = parse_metadata("not json").unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }
}
