//! Error types for IronFB runtime operations.

use thiserror::Error;

/// Core error type for builder operations.
///
/// Every variant is a misuse of the builder's state machine or its size
/// limit. Readers never fail: they trust the buffer they were given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A field or the end of an object was written outside `start_object`.
    #[error("not in object: tried to write an object field outside of start_object/end_object")]
    NotInObject,

    /// An object, vector or string was started while another object was open.
    #[error("object is nested: tried to start a new object while one is being written")]
    ObjectIsNested,

    /// A struct slot was set for a struct that was not written in place.
    #[error("struct is not inline: struct at offset {offset} but builder is at {current}")]
    StructIsNotInline {
        /// Offset returned when the struct was written.
        offset: u32,
        /// Current builder offset.
        current: u32,
    },

    /// A relative offset pointed forward into data that has not been written.
    #[error("offset arithmetic error: offset {offset} is beyond current offset {current}")]
    OffsetArithmetic {
        /// Referenced offset.
        offset: u32,
        /// Current builder offset.
        current: u32,
    },

    /// A vtable slot index beyond the field count given to `start_object`.
    #[error("slot {slot} out of range for object with {num_fields} fields")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Field count of the open object.
        num_fields: usize,
    },

    /// Requested buffer exceeds the maximum size.
    #[error("buffer too large: requested {requested} bytes, maximum {max} bytes")]
    BufferTooLarge {
        /// Requested size in bytes.
        requested: usize,
        /// Maximum supported size in bytes.
        max: usize,
    },
}

/// Result type alias for IronFB runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::SlotOutOfRange {
            slot: 4,
            num_fields: 3,
        };
        assert_eq!(
            err.to_string(),
            "slot 4 out of range for object with 3 fields"
        );

        let err = Error::StructIsNotInline {
            offset: 8,
            current: 12,
        };
        assert!(err.to_string().contains("offset 8"));
    }
}
