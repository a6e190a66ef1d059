//! The validated, immutable language handle.
//!
//! A [`Language`] is only constructible from an artifact that passed every
//! structural check in [`crate::loader::load`]. It is never mutated after
//! construction, so clones share the underlying data without locking and a
//! handle may be used from any thread.

use std::sync::Arc;

use crate::artifact::{to_index, Header, SymbolEntry, SYMBOL_ENTRY_LEN};
use crate::metadata::Metadata;

/// A validated, read-only view over a compiled grammar artifact.
///
/// `Language` is the output boundary of the loader: a parser binds to one of
/// these and performs its parse-table lookups through [`tables`](Self::tables)
/// and the typed symbol accessors. Cloning is cheap (the underlying data is
/// reference-counted) and each handle produced by a separate load is fully
/// independent of every other.
#[derive(Debug, Clone)]
pub struct Language {
    inner: Arc<LanguageData>,
}

#[derive(Debug)]
struct LanguageData {
    header: Header,
    tables: Vec<u8>,
    metadata: Metadata,
}

impl Language {
    pub(crate) fn new(header: Header, tables: Vec<u8>, metadata: Metadata) -> Self {
        Self {
            inner: Arc::new(LanguageData {
                header,
                tables,
                metadata,
            }),
        }
    }

    /// Returns the short name of the language (e.g. `"bash"`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.metadata.name
    }

    /// Returns the ABI version the artifact was compiled against.
    #[must_use]
    pub fn abi_version(&self) -> u32 {
        self.inner.header.abi_version
    }

    /// Returns the number of grammar symbols.
    #[must_use]
    pub fn symbol_count(&self) -> u32 {
        self.inner.header.symbol_count
    }

    /// Returns the number of named fields declared by the grammar.
    #[must_use]
    pub fn field_count(&self) -> u32 {
        self.inner.header.field_count
    }

    /// Returns the name of the symbol with the given id, if it exists.
    #[must_use]
    pub fn symbol_name(&self, id: u16) -> Option<&str> {
        self.inner
            .metadata
            .symbols
            .get(usize::from(id))
            .map(|symbol| symbol.name.as_str())
    }

    /// Returns `true` if the symbol with the given id produces named
    /// syntax-tree nodes. Unknown ids are not named.
    #[must_use]
    pub fn symbol_is_named(&self, id: u16) -> bool {
        self.symbol_entry(id).is_some_and(|entry| entry.is_named())
    }

    /// Returns `true` if the symbol with the given id is a terminal
    /// (lexical) token. Unknown ids are not terminal.
    #[must_use]
    pub fn symbol_is_terminal(&self, id: u16) -> bool {
        self.symbol_entry(id)
            .is_some_and(|entry| entry.is_terminal())
    }

    /// Returns the name of the field with the given id, if it exists.
    ///
    /// Field ids are 1-based; id 0 means "no field" and always returns
    /// `None`.
    #[must_use]
    pub fn field_name(&self, id: u16) -> Option<&str> {
        let index = usize::from(id).checked_sub(1)?;
        self.inner.metadata.fields.get(index).map(String::as_str)
    }

    /// Returns the validated symbol-table bytes for parse-table lookups.
    #[must_use]
    pub fn tables(&self) -> &[u8] {
        &self.inner.tables
    }

    fn symbol_entry(&self, id: u16) -> Option<SymbolEntry> {
        let width = to_index(SYMBOL_ENTRY_LEN);
        let start = usize::from(id).checked_mul(width)?;
        let end = start.checked_add(width)?;
        SymbolEntry::decode(self.inner.tables.get(start..end)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::fixtures::bash_artifact;
    use crate::loader::load;

    fn bash() -> Language {
        load(&bash_artifact()).unwrap()
    }

    #[test]
    fn test_basic_accessors() {
        let language = bash();
        assert_eq!(language.name(), "bash");
        assert_eq!(language.abi_version(), crate::artifact::ABI_VERSION);
        assert_eq!(language.symbol_count(), 4);
        assert_eq!(language.field_count(), 3);
    }

    #[test]
    fn test_symbol_lookups() {
        let language = bash();

        assert_eq!(language.symbol_name(0), Some("end"));
        assert_eq!(language.symbol_name(1), Some("word"));
        assert_eq!(language.symbol_name(4), None);

        assert!(!language.symbol_is_named(0));
        assert!(language.symbol_is_terminal(0));
        assert!(language.symbol_is_named(2));
        assert!(!language.symbol_is_terminal(2));
        assert!(!language.symbol_is_named(100));
    }

    #[test]
    fn test_field_ids_are_one_based() {
        let language = bash();

        assert_eq!(language.field_name(0), None);
        assert_eq!(language.field_name(1), Some("name"));
        assert_eq!(language.field_name(3), Some("condition"));
        assert_eq!(language.field_name(4), None);
    }

    #[test]
    fn test_tables_cover_all_symbols() {
        let language = bash();
        let width = to_index(SYMBOL_ENTRY_LEN);
        assert_eq!(language.tables().len(), 4 * width);
    }

    #[test]
    fn test_clone_shares_data() {
        let language = bash();
        let clone = language.clone();
        drop(language);
        assert_eq!(clone.name(), "bash");
        assert_eq!(clone.symbol_name(3), Some("comment"));
    }

    #[test]
    fn test_language_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Language>();
    }
}
