//! Opaque engine handles
//!
//! Documents, sheets, formats and charts are owned by the engine. Callers only
//! ever hold these copyable ids and forward them back into engine calls.

use std::fmt;

/// Raw handle value
pub type Handle = u64;

/// Null handle constant
pub const HANDLE_NULL: Handle = 0;

macro_rules! engine_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(Handle);

        impl $name {
            pub(crate) const fn new(raw: Handle) -> Self {
                Self(raw)
            }

            /// Wrap a raw handle, mapping [`HANDLE_NULL`] to `None`
            pub const fn from_raw(raw: Handle) -> Option<Self> {
                if raw == HANDLE_NULL {
                    None
                } else {
                    Some(Self(raw))
                }
            }

            /// The raw handle value
            pub const fn raw(self) -> Handle {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

engine_handle!(
    /// An open document
    DocumentId
);
engine_handle!(
    /// A worksheet inside a document
    SheetId
);
engine_handle!(
    /// A cell format (style) registered with a document
    FormatId
);
engine_handle!(
    /// A chart registered with a document
    ChartId
);

/// Raw value of an optional format, [`HANDLE_NULL`] when absent
pub fn format_to_raw(format: Option<FormatId>) -> Handle {
    format.map_or(HANDLE_NULL, FormatId::raw)
}

/// Hands out unique, non-null handles
#[derive(Debug)]
pub struct HandleAllocator {
    next_handle: Handle,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self {
            next_handle: 1, // Start at 1, 0 is null
        }
    }

    /// Allocate the next raw handle
    pub fn next(&mut self) -> Handle {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle_is_none() {
        assert_eq!(FormatId::from_raw(HANDLE_NULL), None);
        assert_eq!(FormatId::from_raw(7).map(FormatId::raw), Some(7));
        assert_eq!(format_to_raw(None), HANDLE_NULL);
    }

    #[test]
    fn test_allocator_skips_null() {
        let mut handles = HandleAllocator::new();
        assert_eq!(handles.next(), 1);
        assert_eq!(handles.next(), 2);
    }
}
