//! Grammar artifact loading and validation for incremental parsers.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// Binary layout of compiled grammar artifacts.
///
/// This module pins down the wire format produced by the grammar compiler:
/// the fixed-size header, the symbol table, and the constants (magic number,
/// supported ABI window) that the loader checks against. Everything else in
/// the crate builds upon these definitions.
pub mod artifact;

/// The validated, immutable language handle.
///
/// A [`Language`](language::Language) is the output boundary of this crate:
/// a read-only view over an artifact that passed validation, cheap to clone
/// and safe to share across threads, consumed by a parser for its
/// parse-table lookups.
pub mod language;

/// Artifact validation and [`Language`](language::Language) construction.
///
/// Loading exists to protect the parser from malformed or incompatible
/// artifacts. It enforces the format's invariants up front so that every
/// handle a parser ever sees is structurally sound.
pub mod loader;

/// Typed model of the metadata block embedded in artifacts.
///
/// The metadata block carries the human-facing side of a grammar (language
/// name, symbol and field names) as JSON alongside the binary tables.
pub mod metadata;

pub use artifact::{Header, ABI_VERSION, MIN_COMPATIBLE_ABI_VERSION};
pub use language::Language;
pub use loader::{load, LoadError};
pub use metadata::{parse_metadata, Metadata, SymbolInfo};
