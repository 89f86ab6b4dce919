//! Offset types and the [`Scalar`] trait.
//!
//! The wire format uses three offset widths:
//! - [`UOffset`] for forward references (tables, strings, vectors)
//! - [`SOffset`] for the table-to-vtable reference, which may point either way
//! - [`VOffset`] for entries inside a vtable

use crate::buffer::{ReadBuffer, WriteBuffer};

/// Unsigned offset, counted from the end of the buffer while building.
pub type UOffset = u32;

/// Signed offset from a table to its vtable.
pub type SOffset = i32;

/// Offset stored inside a vtable.
pub type VOffset = u16;

/// Size of a [`UOffset`] in bytes.
pub const SIZE_UOFFSET: usize = 4;

/// Size of an [`SOffset`] in bytes.
pub const SIZE_SOFFSET: usize = 4;

/// Size of a [`VOffset`] in bytes.
pub const SIZE_VOFFSET: usize = 2;

/// Number of metadata entries at the start of each vtable
/// (vtable byte size and object byte size).
pub const VTABLE_METADATA_FIELDS: usize = 2;

/// Largest buffer a [`Builder`](crate::Builder) will grow to.
pub const MAX_BUFFER_SIZE: usize = 1 << 31;

/// A fixed-size little-endian value that can be read from and written to a
/// buffer.
///
/// Implemented for `bool` and every primitive integer and float type the
/// schema language knows.
pub trait Scalar: Copy + PartialEq {
    /// Encoded width in bytes. Also the natural alignment.
    const SIZE: usize;

    /// Reads a value at `offset`.
    fn read_le(buf: &[u8], offset: usize) -> Self;

    /// Writes the value at `offset`.
    fn write_le(self, buf: &mut [u8], offset: usize);
}

impl Scalar for bool {
    const SIZE: usize = 1;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_u8(offset) != 0
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_u8(offset, u8::from(self));
    }
}

impl Scalar for u8 {
    const SIZE: usize = 1;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_u8(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_u8(offset, self);
    }
}

impl Scalar for i8 {
    const SIZE: usize = 1;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_i8(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_i8(offset, self);
    }
}

impl Scalar for u16 {
    const SIZE: usize = 2;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_u16_le(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_u16_le(offset, self);
    }
}

impl Scalar for i16 {
    const SIZE: usize = 2;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_i16_le(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_i16_le(offset, self);
    }
}

impl Scalar for u32 {
    const SIZE: usize = 4;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_u32_le(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_u32_le(offset, self);
    }
}

impl Scalar for i32 {
    const SIZE: usize = 4;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_i32_le(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_i32_le(offset, self);
    }
}

impl Scalar for u64 {
    const SIZE: usize = 8;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_u64_le(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_u64_le(offset, self);
    }
}

impl Scalar for i64 {
    const SIZE: usize = 8;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_i64_le(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_i64_le(offset, self);
    }
}

impl Scalar for f32 {
    const SIZE: usize = 4;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_f32_le(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_f32_le(offset, self);
    }
}

impl Scalar for f64 {
    const SIZE: usize = 8;

    #[inline(always)]
    fn read_le(buf: &[u8], offset: usize) -> Self {
        buf.get_f64_le(offset)
    }

    #[inline(always)]
    fn write_le(self, buf: &mut [u8], offset: usize) {
        buf.put_f64_le(offset, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_sizes() {
        assert_eq!(<bool as Scalar>::SIZE, 1);
        assert_eq!(<i16 as Scalar>::SIZE, 2);
        assert_eq!(<f32 as Scalar>::SIZE, 4);
        assert_eq!(<u64 as Scalar>::SIZE, 8);
        assert_eq!(<UOffset as Scalar>::SIZE, SIZE_UOFFSET);
        assert_eq!(<SOffset as Scalar>::SIZE, SIZE_SOFFSET);
        assert_eq!(<VOffset as Scalar>::SIZE, SIZE_VOFFSET);
    }

    #[test]
    fn test_scalar_round_trip() {
        let mut buf = [0u8; 16];

        (-7i16).write_le(&mut buf, 2);
        assert_eq!(i16::read_le(&buf, 2), -7);

        1.5f64.write_le(&mut buf, 8);
        assert_eq!(f64::read_le(&buf, 8), 1.5);

        true.write_le(&mut buf, 0);
        assert!(bool::read_le(&buf, 0));
        assert_eq!(buf[0], 1);
    }

    #[test]
    fn test_bool_reads_any_nonzero_as_true() {
        let buf = [0u8, 7u8];
        assert!(!bool::read_le(&buf, 0));
        assert!(bool::read_le(&buf, 1));
    }
}
