//! Scoped marshalling buffers
//!
//! Composite structures are handed to the engine as a contiguous array of
//! fixed-size records plus a NULL-terminated table of pointers to them, with
//! every string copied into owned NUL-terminated storage. [`ScopedBuffer`]
//! owns all three and releases them together when dropped, on success and
//! failure paths alike.

use std::collections::TryReserveError;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use sheetwright_engine::{DocumentEngine, Status};

use crate::error::{Error, WriteError};

/// Why a buffer could not be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Storage could not be reserved
    Alloc(TryReserveError),
    /// A string contained an interior NUL byte
    InteriorNul,
}

impl From<TryReserveError> for BufferError {
    fn from(err: TryReserveError) -> Self {
        BufferError::Alloc(err)
    }
}

impl BufferError {
    /// Convert into the crate error, taking the NUL message from the engine
    pub fn into_error<E: DocumentEngine + ?Sized>(self, engine: &E) -> Error {
        match self {
            BufferError::Alloc(err) => Error::AllocationFailure(err),
            BufferError::InteriorNul => {
                WriteError::from_engine(engine, Status::PARAMETER_VALIDATION).into()
            }
        }
    }
}

/// Copy `text` into an owned NUL-terminated string without aborting on OOM
pub fn c_string(text: &str) -> Result<CString, BufferError> {
    if text.as_bytes().contains(&0) {
        return Err(BufferError::InteriorNul);
    }
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(text.len() + 1)?;
    bytes.extend_from_slice(text.as_bytes());
    // Capacity already covers the terminator, so this does not reallocate
    CString::new(bytes).map_err(|_| BufferError::InteriorNul)
}

/// Owned string storage for one buffer
#[derive(Debug, Default)]
pub struct StringStore {
    strings: Vec<CString>,
}

impl StringStore {
    /// Copy `text` in and return a pointer to the copy
    ///
    /// The pointer stays valid for as long as the store (or the buffer that
    /// took it over) is alive.
    pub fn push(&mut self, text: &str) -> Result<*const c_char, BufferError> {
        let owned = c_string(text)?;
        self.strings.try_reserve(1)?;
        // Moving a CString does not move its heap bytes
        let ptr = owned.as_ptr();
        self.strings.push(owned);
        Ok(ptr)
    }

    /// Like [`StringStore::push`], mapping `None` to NULL
    pub fn push_opt(&mut self, text: Option<&str>) -> Result<*const c_char, BufferError> {
        match text {
            Some(text) => self.push(text),
            None => Ok(ptr::null()),
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Records, their strings and a NULL-terminated pointer table
///
/// Built immediately before one engine call and dropped right after it.
/// Raw pointers make the type neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct ScopedBuffer<R> {
    strings: StringStore,
    records: Vec<R>,
    table: Vec<*const R>,
}

impl<R> ScopedBuffer<R> {
    /// A buffer holding nothing; performs no allocation
    pub const fn empty() -> Self {
        Self {
            strings: StringStore {
                strings: Vec::new(),
            },
            records: Vec::new(),
            table: Vec::new(),
        }
    }

    /// Encode each item into a record
    ///
    /// `encode` copies the strings it needs into the provided store. On any
    /// error everything allocated so far is released before returning.
    pub fn build<T, F>(items: &[T], mut encode: F) -> Result<Self, BufferError>
    where
        F: FnMut(&T, &mut StringStore) -> Result<R, BufferError>,
    {
        if items.is_empty() {
            return Ok(Self::empty());
        }

        let mut strings = StringStore::default();
        let mut records = Vec::new();
        records.try_reserve_exact(items.len())?;
        for item in items {
            records.push(encode(item, &mut strings)?);
        }

        // Records are in place; the table points into their final storage
        let mut table = Vec::new();
        table.try_reserve_exact(records.len() + 1)?;
        table.extend(records.iter().map(|record| record as *const R));
        table.push(ptr::null());

        Ok(Self {
            strings,
            records,
            table,
        })
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of owned strings
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// The NULL-terminated pointer table, or NULL when there are no records
    pub fn table_ptr(&self) -> *const *const R {
        if self.table.is_empty() {
            ptr::null()
        } else {
            self.table.as_ptr()
        }
    }
}

impl<R> Drop for ScopedBuffer<R> {
    fn drop(&mut self) {
        if !self.records.is_empty() {
            tracing::trace!(
                "Releasing buffer of {} records and {} strings",
                self.records.len(),
                self.strings.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[derive(Debug)]
    struct Label {
        text: *const c_char,
        width: u32,
    }

    fn labels(items: &[(&str, u32)]) -> Result<ScopedBuffer<Label>, BufferError> {
        ScopedBuffer::build(items, |(text, width), strings| {
            Ok(Label {
                text: strings.push(text)?,
                width: *width,
            })
        })
    }

    #[test]
    fn test_empty_buffer_has_null_table() {
        let buffer = labels(&[]).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.table_ptr().is_null());
        assert_eq!(buffer.string_count(), 0);
    }

    #[test]
    fn test_table_is_null_terminated() {
        let buffer = labels(&[("North", 10), ("South", 12)]).unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.string_count(), 2);

        let table = buffer.table_ptr();
        unsafe {
            let first = &**table;
            assert_eq!(CStr::from_ptr(first.text).to_str().unwrap(), "North");
            assert_eq!((**table.add(1)).width, 12);
            assert!((*table.add(2)).is_null());
        }
    }

    #[test]
    fn test_interior_nul_fails() {
        let err = labels(&[("ok", 1), ("bad\0text", 2)]).unwrap_err();
        assert_eq!(err, BufferError::InteriorNul);
    }

    #[test]
    fn test_push_opt_null() {
        let mut store = StringStore::default();
        assert!(store.push_opt(None).unwrap().is_null());
        assert!(store.is_empty());
    }

    #[test]
    fn test_c_string_keeps_text() {
        let owned = c_string("Zürich").unwrap();
        assert_eq!(owned.to_str().unwrap(), "Zürich");
        assert_eq!(c_string("a\0b"), Err(BufferError::InteriorNul));
    }
}
