//! Response header storage and the resumable cursor the encoder walks.
//!
//! `ResponseHeaders` is an ordered, case-insensitive, multi-valued header
//! collection. `HeaderCursor` enumerates it one wire field at a time: a
//! name carrying N values yields N separate (name, value) pairs, and the
//! cursor's two-level position survives across partial frames so a header
//! block can be split without re-emitting or skipping a value.

use crate::static_table;

/// Ordered, case-insensitive, multi-valued response header collection.
///
/// Names are normalized to lowercase ASCII on insertion (HTTP/2 requires
/// lowercase field names on the wire). Entry order is insertion order;
/// appending to an existing name keeps the entry where it first appeared.
#[derive(Debug, Default, Clone)]
pub struct ResponseHeaders {
    entries: Vec<(String, Vec<String>)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value for `name`, creating the entry if it is new.
    pub fn append(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = name.as_ref().to_ascii_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value.into()),
            None => self.entries.push((name, vec![value.into()])),
        }
    }

    /// Replace all values for `name` with a single value.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = name.as_ref().to_ascii_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => {
                values.clear();
                values.push(value.into());
            }
            None => self.entries.push((name, vec![value.into()])),
        }
    }

    /// Remove an entry entirely. Returns whether it existed.
    pub fn remove(&mut self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref().to_ascii_lowercase();
        let before = self.entries.len();
        self.entries.retain(|(n, _)| *n != name);
        self.entries.len() != before
    }

    /// First value for `name`, if any.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        let name = name.as_ref();
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// All values for `name`; empty when the entry does not exist.
    pub fn get_all(&self, name: impl AsRef<str>) -> &[String] {
        let name = name.as_ref();
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// Which concrete collection a cursor walks. Trailers carry no `:status`,
/// which the frame driver cares about; iteration itself is identical.
/// `Generic` lets tests and alternate callers feed any multi-value map.
#[derive(Clone, Copy)]
pub enum HeaderSet<'a> {
    Response(&'a ResponseHeaders),
    Trailers(&'a ResponseHeaders),
    Generic(&'a [(String, Vec<String>)]),
}

impl<'a> HeaderSet<'a> {
    fn entries(&self) -> &'a [(String, Vec<String>)] {
        match *self {
            HeaderSet::Response(headers) | HeaderSet::Trailers(headers) => &headers.entries,
            HeaderSet::Generic(entries) => entries,
        }
    }

    fn entry(&self, index: usize) -> Option<(&'a str, &'a [String])> {
        self.entries()
            .get(index)
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    fn entry_count(&self) -> usize {
        self.entries().len()
    }
}

/// Resumable cursor over a [`HeaderSet`], one wire field per step.
///
/// The position is an explicit (entry, value) index pair: after a partial
/// frame the cursor is parked on the first value that has not been written
/// anywhere, and the next frame continues from exactly there. A cursor is
/// owned by one in-progress header block encode; it is not meant to be
/// shared.
pub struct HeaderCursor<'a> {
    set: HeaderSet<'a>,
    entry: usize,
    value: usize,
    started: bool,
    static_hint: Option<usize>,
}

impl<'a> HeaderCursor<'a> {
    /// Cursor positioned before the first field.
    pub fn new(set: HeaderSet<'a>) -> Self {
        Self {
            set,
            entry: 0,
            value: 0,
            started: false,
            static_hint: None,
        }
    }

    /// Step to the next (name, value) pair. A name with several values is
    /// visited once per value; entries with an empty value list are skipped
    /// and never produce a field. Returns `false` once exhausted.
    pub fn advance(&mut self) -> bool {
        if !self.started {
            self.started = true;
            return self.seek_entry(0);
        }
        if self.entry >= self.set.entry_count() {
            return false;
        }
        if let Some((_, values)) = self.set.entry(self.entry) {
            if self.value + 1 < values.len() {
                self.value += 1;
                return true;
            }
        }
        self.seek_entry(self.entry + 1)
    }

    /// Find the next entry at or after `from` that has at least one value.
    fn seek_entry(&mut self, from: usize) -> bool {
        let mut index = from;
        while let Some((name, values)) = self.set.entry(index) {
            if !values.is_empty() {
                self.entry = index;
                self.value = 0;
                self.static_hint = static_table::name_index(name);
                return true;
            }
            index += 1;
        }
        self.entry = self.set.entry_count();
        self.value = 0;
        self.static_hint = None;
        false
    }

    /// The pair the cursor is parked on, or `None` before the first
    /// `advance` and after exhaustion.
    pub fn current(&self) -> Option<(&'a str, &'a str)> {
        if !self.started {
            return None;
        }
        let (name, values) = self.set.entry(self.entry)?;
        values.get(self.value).map(|value| (name, value.as_str()))
    }

    /// Static table hint for the current *name*, independent of which of
    /// its values is being emitted. Cached per entry.
    pub fn static_index(&self) -> Option<usize> {
        self.static_hint
    }

    /// Rewind to before the first field. For restarting an encode from
    /// scratch; resuming after a short buffer does not use this.
    pub fn reset(&mut self) {
        self.entry = 0;
        self.value = 0;
        self.started = false;
        self.static_hint = None;
    }

    /// Whether this cursor walks a trailer block (no `:status` field).
    pub fn is_trailers(&self) -> bool {
        matches!(self.set, HeaderSet::Trailers(_))
    }
}
