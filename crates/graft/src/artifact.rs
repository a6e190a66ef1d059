//! Binary layout of compiled grammar artifacts.
//!
//! An artifact is a versioned binary descriptor emitted by the grammar
//! compiler: a fixed-size little-endian header, a symbol table of
//! fixed-width entries, and a JSON metadata block (see
//! [`crate::metadata`]). All header integers are `u32` little-endian.

/// Magic number at the start of every artifact (`"GRFT"` in ASCII).
pub const MAGIC: u32 = 0x4752_4654;

/// ABI version emitted by the current generation of the grammar compiler.
pub const ABI_VERSION: u32 = 15;

/// Oldest artifact ABI version this runtime can still load.
///
/// Artifacts older than this must be regenerated; newer ones need a runtime
/// upgrade. The window matches the compiler generations still in circulation.
pub const MIN_COMPATIBLE_ABI_VERSION: u32 = 13;

/// Size in bytes of the fixed artifact header.
pub const HEADER_LEN: u32 = 32;

/// Size in bytes of one symbol-table entry.
pub const SYMBOL_ENTRY_LEN: u32 = 8;

/// Flag bit marking a symbol as named (visible in syntax trees).
pub const SYMBOL_NAMED: u32 = 1 << 0;

/// Flag bit marking a symbol as terminal (a lexical token).
pub const SYMBOL_TERMINAL: u32 = 1 << 1;

/// The decoded fixed-size header of a grammar artifact.
///
/// A `Header` records the artifact's compatibility tag and where its two
/// variable-sized sections live. Decoding a header performs no validation
/// beyond length; the checks belong to [`crate::loader::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format discriminator; must equal [`MAGIC`].
    pub magic: u32,

    /// ABI version the artifact was compiled against.
    pub abi_version: u32,

    /// Number of grammar symbols in the symbol table.
    pub symbol_count: u32,

    /// Number of named fields declared by the grammar.
    pub field_count: u32,

    /// Byte offset of the symbol table from the start of the artifact.
    pub symbol_table_offset: u32,

    /// Byte length of the symbol table.
    pub symbol_table_len: u32,

    /// Byte offset of the JSON metadata block from the start of the artifact.
    pub metadata_offset: u32,

    /// Byte length of the JSON metadata block.
    pub metadata_len: u32,
}

impl Header {
    /// Decodes the header from the first [`HEADER_LEN`] bytes of an artifact.
    ///
    /// Returns `None` when fewer than [`HEADER_LEN`] bytes are available.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < to_index(HEADER_LEN) {
            return None;
        }
        Some(Self {
            magic: read_u32(bytes, 0),
            abi_version: read_u32(bytes, 4),
            symbol_count: read_u32(bytes, 8),
            field_count: read_u32(bytes, 12),
            symbol_table_offset: read_u32(bytes, 16),
            symbol_table_len: read_u32(bytes, 20),
            metadata_offset: read_u32(bytes, 24),
            metadata_len: read_u32(bytes, 28),
        })
    }
}

/// One entry in the artifact's symbol table.
///
/// Entries are fixed-width so the parser can index them directly by symbol
/// id. Names live in the metadata block, in symbol-id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolEntry {
    /// Bitset of `SYMBOL_*` flags.
    pub flags: u32,

    /// Reserved for future table data; always zero today.
    pub reserved: u32,
}

impl SymbolEntry {
    /// Decodes one entry from a [`SYMBOL_ENTRY_LEN`]-byte slice.
    ///
    /// Returns `None` when the slice is shorter than an entry.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < to_index(SYMBOL_ENTRY_LEN) {
            return None;
        }
        Some(Self {
            flags: read_u32(bytes, 0),
            reserved: read_u32(bytes, 4),
        })
    }

    /// Returns `true` if this symbol produces named syntax-tree nodes.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.flags & SYMBOL_NAMED != 0
    }

    /// Returns `true` if this symbol is a terminal (lexical) token.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.flags & SYMBOL_TERMINAL != 0
    }
}

// Wire-format quantities are u32; saturate rather than wrap when the host
// cannot index that far, so bounds checks downstream fail closed.
pub(crate) fn to_index(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(word)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_header_fields() {
        let bytes = fixtures::bash_artifact();
        let header = Header::decode(&bytes).unwrap();

        assert_eq!(header.magic, MAGIC);
        assert_eq!(header.abi_version, ABI_VERSION);
        assert_eq!(header.symbol_count, 4);
        assert_eq!(header.field_count, 3);
        assert_eq!(header.symbol_table_offset, HEADER_LEN);
        assert_eq!(header.symbol_table_len, 4 * SYMBOL_ENTRY_LEN);
    }

    #[test]
    fn test_decode_header_too_short() {
        let bytes = fixtures::bash_artifact();
        assert!(Header::decode(&bytes[..31]).is_none());
        assert!(Header::decode(&[]).is_none());
    }

    #[test]
    fn test_symbol_entry_flags() {
        let entry = SymbolEntry::decode(&[3, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(entry.is_named());
        assert!(entry.is_terminal());
        assert_eq!(entry.reserved, 0);

        let plain = SymbolEntry::decode(&[0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(!plain.is_named());
        assert!(!plain.is_terminal());
    }

    #[test]
    fn test_symbol_entry_too_short() {
        assert!(SymbolEntry::decode(&[1, 0, 0]).is_none());
    }
}
