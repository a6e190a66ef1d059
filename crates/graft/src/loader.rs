//! Artifact validation and [`Language`] construction.
//!
//! This module performs structural checks over raw artifact bytes before any
//! handle is produced: magic and ABI-version verification, section bounds
//! checks, and consistency between the binary tables and the metadata block.
//! Loading is a single-shot pure function; a failing artifact never becomes
//! valid without modification, so there is nothing to retry.

use crate::artifact::{
    to_index, Header, ABI_VERSION, HEADER_LEN, MAGIC, MIN_COMPATIBLE_ABI_VERSION, SYMBOL_ENTRY_LEN,
};
use crate::language::Language;
use crate::metadata::{parse_metadata, Metadata};

/// Represents a failure encountered when loading a grammar artifact.
///
/// All variants are terminal and local: the loader reports the specific kind
/// so the caller can decide whether to regenerate the artifact or upgrade
/// the runtime. There is no partial success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The artifact was absent or zero-length.
    Empty,

    /// A structural check failed; the message names the failing check.
    Malformed(String),

    /// The artifact's ABI version falls outside the supported window.
    IncompatibleVersion {
        /// Version found in the artifact header.
        found: u32,
        /// Oldest supported version.
        min: u32,
        /// Newest supported version.
        max: u32,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadError::Empty => write!(f, "empty grammar artifact"),
            LoadError::Malformed(msg) => write!(f, "malformed grammar artifact: {msg}"),
            LoadError::IncompatibleVersion { found, min, max } => {
                write!(f, "incompatible ABI version {found} (supported: {min} to {max})")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Validates a compiled grammar artifact and produces a [`Language`] handle.
///
/// This function runs several structural passes over the raw bytes:
///
/// - Checks the artifact is non-empty and carries a complete header.
/// - Checks the magic number and ABI-version window.
/// - Checks that the symbol table and metadata block are in bounds and do
///   not overlap the header.
/// - Checks that the symbol table length matches the declared symbol count.
/// - Parses the metadata block and cross-checks its symbol and field counts
///   against the header.
///
/// The operation is pure and reentrant: it does no I/O, never suspends, and
/// independent calls share no mutable state. Loading the same bytes twice
/// yields two independent, behaviorally identical handles.
///
/// # Errors
///
/// - [`LoadError::Empty`] for a zero-length artifact.
/// - [`LoadError::IncompatibleVersion`] when the ABI version is outside
///   [`MIN_COMPATIBLE_ABI_VERSION`]`..=`[`ABI_VERSION`].
/// - [`LoadError::Malformed`] for any other structural violation.
pub fn load(bytes: &[u8]) -> Result<Language, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Empty);
    }

    let header = Header::decode(bytes)
        .ok_or_else(|| LoadError::Malformed("artifact shorter than header".to_string()))?;

    check_magic(header)?;
    check_abi_version(header)?;

    let tables = check_symbol_table(bytes, header)?;
    let metadata = check_metadata(bytes, header)?;

    Ok(Language::new(header, tables.to_vec(), metadata))
}

fn check_magic(header: Header) -> Result<(), LoadError> {
    if header.magic == MAGIC {
        Ok(())
    } else {
        Err(LoadError::Malformed(format!(
            "bad magic number {:#010x}",
            header.magic
        )))
    }
}

fn check_abi_version(header: Header) -> Result<(), LoadError> {
    if (MIN_COMPATIBLE_ABI_VERSION..=ABI_VERSION).contains(&header.abi_version) {
        Ok(())
    } else {
        Err(LoadError::IncompatibleVersion {
            found: header.abi_version,
            min: MIN_COMPATIBLE_ABI_VERSION,
            max: ABI_VERSION,
        })
    }
}

fn check_symbol_table(bytes: &[u8], header: Header) -> Result<&[u8], LoadError> {
    if header.symbol_table_offset < HEADER_LEN {
        return Err(LoadError::Malformed(
            "symbol table overlaps header".to_string(),
        ));
    }

    let table = section(bytes, header.symbol_table_offset, header.symbol_table_len)
        .ok_or_else(|| LoadError::Malformed("symbol table out of bounds".to_string()))?;

    let expected = u64::from(header.symbol_count) * u64::from(SYMBOL_ENTRY_LEN);
    if u64::from(header.symbol_table_len) != expected {
        return Err(LoadError::Malformed(format!(
            "symbol table length {} inconsistent with symbol count {}",
            header.symbol_table_len, header.symbol_count
        )));
    }

    Ok(table)
}

fn check_metadata(bytes: &[u8], header: Header) -> Result<Metadata, LoadError> {
    if header.metadata_offset < HEADER_LEN {
        return Err(LoadError::Malformed(
            "metadata block overlaps header".to_string(),
        ));
    }

    let block = section(bytes, header.metadata_offset, header.metadata_len)
        .ok_or_else(|| LoadError::Malformed("metadata block out of bounds".to_string()))?;

    let json = std::str::from_utf8(block)
        .map_err(|_| LoadError::Malformed("metadata block is not valid UTF-8".to_string()))?;

    let metadata = parse_metadata(json)?;

    if metadata.symbols.len() != to_index(header.symbol_count) {
        return Err(LoadError::Malformed(format!(
            "metadata lists {} symbols but header declares {}",
            metadata.symbols.len(),
            header.symbol_count
        )));
    }

    if metadata.fields.len() != to_index(header.field_count) {
        return Err(LoadError::Malformed(format!(
            "metadata lists {} fields but header declares {}",
            metadata.fields.len(),
            header.field_count
        )));
    }

    Ok(metadata)
}

fn section(bytes: &[u8], offset: u32, len: u32) -> Option<&[u8]> {
    let start = to_index(offset);
    let end = start.checked_add(to_index(len))?;
    bytes.get(start..end)
}
