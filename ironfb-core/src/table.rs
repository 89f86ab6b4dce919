//! Zero-copy read access to tables and structs.
//!
//! A [`Table`] is a byte slice plus the position of an object inside it.
//! Generated accessors hold one and translate field reads into calls on it.
//!
//! # Wire Format
//! ```text
//! table:  +0: SOffset to vtable (table_pos - vtable_pos)
//!         +4: field data ...
//! vtable: +0: VOffset vtable size in bytes
//!         +2: VOffset object size in bytes
//!         +4: VOffset per field, 0 when the field is absent
//! ```
//!
//! Offsets passed to the methods below are relative to [`Table::pos`], which
//! is how the generated code addresses fields.

use crate::buffer::ReadBuffer;
use crate::types::{SIZE_UOFFSET, Scalar, UOffset, VOffset};

/// A view over one object inside a finished buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table<'a> {
    /// The whole buffer.
    pub bytes: &'a [u8],
    /// Absolute position of the object within `bytes`.
    pub pos: usize,
}

impl<'a> Table<'a> {
    /// Creates a view of the object at `pos`.
    #[inline]
    #[must_use]
    pub const fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    /// Returns the root object of a finished buffer.
    ///
    /// # Arguments
    /// * `bytes` - Finished buffer
    /// * `offset` - Position of the root offset, usually 0
    #[inline]
    #[must_use]
    pub fn get_root(bytes: &'a [u8], offset: usize) -> Self {
        let n = bytes.get_u32_le(offset) as usize;
        Self::new(bytes, n + offset)
    }

    /// Looks up a field in the vtable.
    ///
    /// Returns the field's offset relative to `pos`, or 0 when the field is
    /// absent. Slots beyond the end of the vtable (fields added by a newer
    /// schema) read as absent.
    #[inline]
    #[must_use]
    pub fn offset(&self, vtable_offset: VOffset) -> usize {
        let vtable = (self.pos as i64 - i64::from(self.bytes.get_i32_le(self.pos))) as usize;
        let vtable_end = self.bytes.get_u16_le(vtable);
        if vtable_offset < vtable_end {
            return self.bytes.get_u16_le(vtable + vtable_offset as usize) as usize;
        }
        0
    }

    /// Follows the [`UOffset`] stored at `off`.
    #[inline]
    #[must_use]
    pub fn indirect(&self, off: usize) -> usize {
        off + self.get::<UOffset>(off) as usize
    }

    /// Reads the string referenced from `off`.
    ///
    /// Invalid UTF-8 reads as an empty string, the same as an absent field.
    /// Use [`Table::string_bytes`] to tell the two apart.
    #[inline]
    #[must_use]
    pub fn string(&self, off: usize) -> &'a str {
        std::str::from_utf8(self.string_bytes(off)).unwrap_or("")
    }

    /// Returns the raw bytes of the string referenced from `off`, without
    /// the NUL terminator.
    #[inline]
    #[must_use]
    pub fn string_bytes(&self, off: usize) -> &'a [u8] {
        let bytes: &'a [u8] = self.bytes;
        let off = self.indirect(off);
        let len = self.get::<UOffset>(off) as usize;
        let start = self.pos + off + SIZE_UOFFSET;
        &bytes[start..start + len]
    }

    /// Returns the element count of the vector referenced from `off`.
    #[inline]
    #[must_use]
    pub fn vector_len(&self, off: usize) -> usize {
        let off = self.indirect(off);
        self.get::<UOffset>(off) as usize
    }

    /// Returns the start of the elements of the vector referenced from
    /// `off`, relative to `pos`.
    #[inline]
    #[must_use]
    pub fn vector(&self, off: usize) -> usize {
        self.indirect(off) + SIZE_UOFFSET
    }

    /// Returns a view of the union payload referenced from `off`.
    #[inline]
    #[must_use]
    pub fn union(&self, off: usize) -> Table<'a> {
        let off = self.indirect(off);
        Table::new(self.bytes, self.pos + off)
    }

    /// Reads a scalar at `off`.
    #[inline(always)]
    #[must_use]
    pub fn get<T: Scalar>(&self, off: usize) -> T {
        T::read_le(self.bytes, self.pos + off)
    }

    /// Reads the scalar in vtable slot `slot`, or `default` when absent.
    #[inline]
    #[must_use]
    pub fn get_slot<T: Scalar>(&self, slot: VOffset, default: T) -> T {
        let off = self.offset(slot);
        if off == 0 {
            return default;
        }
        self.get(off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A hand-assembled buffer:
    /// root offset, vtable (3 slots, slot 1 absent), table with an i32,
    /// a string offset and a vector offset, then the string and the vector.
    fn sample() -> Vec<u8> {
        let mut buf = Vec::new();
        // 0: root offset -> table at 16
        buf.extend_from_slice(&16u32.to_le_bytes());
        // 4: vtable: size 10, object size 16, slots [4, 0, 8] + pad to 16
        buf.extend_from_slice(&10u16.to_le_bytes());
        buf.extend_from_slice(&16u16.to_le_bytes());
        buf.extend_from_slice(&4u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&8u16.to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        // 16: table: soffset = 16 - 4 = 12
        buf.extend_from_slice(&12i32.to_le_bytes());
        // 20: i32 field
        buf.extend_from_slice(&(-5i32).to_le_bytes());
        // 24: string offset -> 32 (relative 8)
        buf.extend_from_slice(&8u32.to_le_bytes());
        // 28: vector offset -> 40 (relative 12)
        buf.extend_from_slice(&12u32.to_le_bytes());
        // 32: string "hi" + NUL + pad
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(b"hi\0\0");
        // 40: vector of three u16
        buf.extend_from_slice(&3u32.to_le_bytes());
        for v in [10u16, 20, 30] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    #[test]
    fn test_get_root() {
        let buf = sample();
        let tab = Table::get_root(&buf, 0);
        assert_eq!(tab.pos, 16);
    }

    #[test]
    fn test_offset_lookup() {
        let buf = sample();
        let tab = Table::get_root(&buf, 0);
        assert_eq!(tab.offset(4), 4);
        assert_eq!(tab.offset(6), 0);
        assert_eq!(tab.offset(8), 8);
        // Beyond the vtable end reads as absent.
        assert_eq!(tab.offset(12), 0);
    }

    #[test]
    fn test_scalar_and_slot_reads() {
        let buf = sample();
        let tab = Table::get_root(&buf, 0);
        assert_eq!(tab.get::<i32>(4), -5);
        assert_eq!(tab.get_slot::<i32>(4, 99), -5);
        assert_eq!(tab.get_slot::<i32>(6, 99), 99);
    }

    #[test]
    fn test_string_read() {
        let buf = sample();
        let tab = Table::get_root(&buf, 0);
        assert_eq!(tab.string(8), "hi");
        assert_eq!(tab.string_bytes(8), b"hi");
    }

    #[test]
    fn test_invalid_utf8_string_keeps_raw_bytes() {
        let mut buf = sample();
        // Overwrite "hi" with a lone continuation byte.
        buf[36] = 0x80;
        let tab = Table::get_root(&buf, 0);
        assert_eq!(tab.string(8), "");
        assert_eq!(tab.string_bytes(8), &[0x80, b'i']);
    }

    #[test]
    fn test_vector_read() {
        let buf = sample();
        let tab = Table::get_root(&buf, 0);
        // Field at table offset 12 (the vector reference).
        assert_eq!(tab.vector_len(12), 3);
        let base = tab.vector(12);
        assert_eq!(tab.get::<u16>(base), 10);
        assert_eq!(tab.get::<u16>(base + 2 * 2), 30);
    }

    #[test]
    fn test_union_view() {
        let buf = sample();
        let tab = Table::get_root(&buf, 0);
        let payload = tab.union(8);
        assert_eq!(payload.pos, 32);
    }
}
