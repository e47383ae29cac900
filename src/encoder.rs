//! Connection-scoped HPACK compression context.
//!
//! `FieldEncoder` owns the dynamic table and the pending table-size update,
//! and turns one (name, value) pair at a time into its wire representation
//! under a chosen [`EncodingStrategy`]. It lives for the whole connection
//! and is handed `&mut` into every header-block encode; callers serialize
//! access across streams.

use std::collections::VecDeque;

use crate::field::{self, Name};
use crate::static_table::STATIC_TABLE_SIZE;

/// Default dynamic table size (RFC 7541 Section 4.2, SETTINGS default).
pub const DEFAULT_DYNAMIC_TABLE_SIZE: usize = 4096;

/// Per-entry size overhead (RFC 7541 Section 4.1).
const ENTRY_OVERHEAD: usize = 32;

/// How one header field is allowed to interact with the dynamic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingStrategy {
    /// Literal that may be added to the dynamic table, or an indexed
    /// reference to an entry already there.
    Index,
    /// Plain literal, kept out of the dynamic table (values that never
    /// repeat, like a response's content length).
    IgnoreIndex,
    /// Never-indexed literal: intermediaries must not cache the value
    /// (cookies, attachment filenames).
    NeverIndex,
}

struct TableEntry {
    name: String,
    value: String,
}

/// The dynamic table: most-recent entry first, evicted oldest-first.
/// Wire indices continue where the static table ends (62 = newest).
pub struct DynamicTable {
    entries: VecDeque<TableEntry>,
    size: usize,
    max_size: usize,
}

impl DynamicTable {
    fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            size: 0,
            max_size,
        }
    }

    /// Table cost of one entry: octet lengths plus the fixed overhead.
    pub fn entry_size(name: &str, value: &str) -> usize {
        name.len() + value.len() + ENTRY_OVERHEAD
    }

    fn insert(&mut self, name: &str, value: &str) {
        let entry_size = Self::entry_size(name, value);
        if entry_size > self.max_size {
            // An entry larger than the table empties it (RFC 7541 Section 4.4)
            self.entries.clear();
            self.size = 0;
            return;
        }
        while self.size + entry_size > self.max_size {
            if let Some(evicted) = self.entries.pop_back() {
                self.size -= Self::entry_size(&evicted.name, &evicted.value);
            }
        }
        self.entries.push_front(TableEntry {
            name: name.to_ascii_lowercase(),
            value: value.to_string(),
        });
        self.size += entry_size;
    }

    fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        while self.size > self.max_size {
            if let Some(evicted) = self.entries.pop_back() {
                self.size -= Self::entry_size(&evicted.name, &evicted.value);
            }
        }
    }

    /// Wire index of an exact (name, value) match, if present.
    pub fn find_exact(&self, name: &str, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name) && e.value == value)
            .map(|pos| STATIC_TABLE_SIZE + 1 + pos)
    }

    /// Wire index of the newest entry carrying this name, if any.
    pub fn find_name(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name))
            .map(|pos| STATIC_TABLE_SIZE + 1 + pos)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current table size in octets, including per-entry overhead.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Configured maximum table size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

/// Stateful single-field encoder sharing one dynamic table across all the
/// header blocks of a connection.
pub struct FieldEncoder {
    table: DynamicTable,
    pending_size_update: Option<usize>,
}

impl Default for FieldEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldEncoder {
    /// Context with the RFC default table size and no update queued.
    pub fn new() -> Self {
        Self {
            table: DynamicTable::new(DEFAULT_DYNAMIC_TABLE_SIZE),
            pending_size_update: None,
        }
    }

    /// Change the dynamic table limit (driven by a SETTINGS exchange).
    /// Shrinks the table immediately and queues the mandatory size-update
    /// instruction for the start of the next header block.
    pub fn set_max_table_size(&mut self, max_size: usize) {
        self.table.set_max_size(max_size);
        self.pending_size_update = Some(max_size);
    }

    /// Write the queued size update, if any, at the start of a header block.
    ///
    /// Writes zero bytes when nothing is queued. `None` means the update is
    /// queued but does not fit; the update stays queued in that case.
    pub fn ensure_size_update(&mut self, buf: &mut [u8]) -> Option<usize> {
        match self.pending_size_update {
            None => Some(0),
            Some(max_size) => {
                let written = field::size_update(max_size, buf)?;
                self.pending_size_update = None;
                Some(written)
            }
        }
    }

    /// Currently queued size update, if any.
    pub(crate) fn queued_size_update(&self) -> Option<usize> {
        self.pending_size_update
    }

    /// Put a consumed size update back in the queue. Used when the frame it
    /// was written into is discarded wholesale, so the bytes never reached
    /// the peer.
    pub(crate) fn requeue_size_update(&mut self, update: Option<usize>) {
        if update.is_some() {
            self.pending_size_update = update;
        }
    }

    /// Encode one (name, value) pair into `buf` under `strategy`.
    ///
    /// Returns the bytes written, or `None` (buffer untouched, table
    /// unchanged) when the field does not fit. The dynamic table is only
    /// mutated after the field's bytes are fully in the buffer, so a failed
    /// attempt can be replayed against a fresh buffer.
    pub fn encode_field(
        &mut self,
        buf: &mut [u8],
        static_index: Option<usize>,
        strategy: EncodingStrategy,
        name: &str,
        value: &str,
    ) -> Option<usize> {
        match strategy {
            EncodingStrategy::NeverIndex => {
                field::literal_never_indexed(self.resolve_name(static_index, name), value, buf)
            }
            EncodingStrategy::IgnoreIndex => {
                field::literal_without_indexing(self.resolve_name(static_index, name), value, buf)
            }
            EncodingStrategy::Index => {
                if self.table.max_size() == 0 {
                    return field::literal_without_indexing(
                        self.resolve_name(static_index, name),
                        value,
                        buf,
                    );
                }
                if let Some(index) = self.table.find_exact(name, value) {
                    return field::indexed(index, buf);
                }
                if DynamicTable::entry_size(name, value) > self.table.max_size() {
                    // Would evict the whole table and still not be reusable
                    return field::literal_without_indexing(
                        self.resolve_name(static_index, name),
                        value,
                        buf,
                    );
                }
                let written = field::literal_with_indexing(
                    self.resolve_name(static_index, name),
                    value,
                    buf,
                )?;
                self.table.insert(name, value);
                Some(written)
            }
        }
    }

    /// Pick the cheapest name operand: static index, then a dynamic entry
    /// with the same name, then the name spelled out.
    fn resolve_name<'n>(&self, static_index: Option<usize>, name: &'n str) -> Name<'n> {
        match static_index.or_else(|| self.table.find_name(name)) {
            Some(index) => Name::Index(index),
            None => Name::Literal(name),
        }
    }

    /// Read access to the dynamic table, mainly for inspection in tests.
    pub fn table(&self) -> &DynamicTable {
        &self.table
    }
}
