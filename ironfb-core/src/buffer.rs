//! Buffer traits for positional little-endian access.
//!
//! This module provides:
//! - [`ReadBuffer`] trait for read-only buffer access
//! - [`WriteBuffer`] trait for read-write buffer access
//!
//! Both are implemented for byte slices and `Vec<u8>`, which is all the
//! [`Table`](crate::Table) and [`Builder`](crate::Builder) need.

/// Trait for read-only buffer access with primitive reads.
///
/// All read methods use little-endian byte order, the only byte order the
/// wire format knows.
pub trait ReadBuffer {
    /// Returns the buffer as a byte slice.
    fn as_slice(&self) -> &[u8];

    /// Returns the length of the buffer in bytes.
    fn len(&self) -> usize;

    /// Returns true if the buffer is empty.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a u8 at the given offset.
    #[inline(always)]
    fn get_u8(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    /// Reads an i8 at the given offset.
    #[inline(always)]
    fn get_i8(&self, offset: usize) -> i8 {
        self.as_slice()[offset] as i8
    }

    /// Reads a u16 in little-endian at the given offset.
    #[inline(always)]
    fn get_u16_le(&self, offset: usize) -> u16 {
        let bytes = &self.as_slice()[offset..offset + 2];
        u16::from_le_bytes([bytes[0], bytes[1]])
    }

    /// Reads an i16 in little-endian at the given offset.
    #[inline(always)]
    fn get_i16_le(&self, offset: usize) -> i16 {
        let bytes = &self.as_slice()[offset..offset + 2];
        i16::from_le_bytes([bytes[0], bytes[1]])
    }

    /// Reads a u32 in little-endian at the given offset.
    #[inline(always)]
    fn get_u32_le(&self, offset: usize) -> u32 {
        let bytes = &self.as_slice()[offset..offset + 4];
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Reads an i32 in little-endian at the given offset.
    #[inline(always)]
    fn get_i32_le(&self, offset: usize) -> i32 {
        let bytes = &self.as_slice()[offset..offset + 4];
        i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Reads a u64 in little-endian at the given offset.
    #[inline(always)]
    fn get_u64_le(&self, offset: usize) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.as_slice()[offset..offset + 8]);
        u64::from_le_bytes(raw)
    }

    /// Reads an i64 in little-endian at the given offset.
    #[inline(always)]
    fn get_i64_le(&self, offset: usize) -> i64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.as_slice()[offset..offset + 8]);
        i64::from_le_bytes(raw)
    }

    /// Reads an f32 in little-endian at the given offset.
    #[inline(always)]
    fn get_f32_le(&self, offset: usize) -> f32 {
        f32::from_bits(self.get_u32_le(offset))
    }

    /// Reads an f64 in little-endian at the given offset.
    #[inline(always)]
    fn get_f64_le(&self, offset: usize) -> f64 {
        f64::from_bits(self.get_u64_le(offset))
    }

    /// Returns a slice of bytes at the given offset and length.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to start from
    /// * `len` - Number of bytes to read
    #[inline(always)]
    fn get_bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.as_slice()[offset..offset + len]
    }
}

/// Trait for read-write buffer access with primitive writes.
///
/// All write methods use little-endian byte order.
pub trait WriteBuffer: ReadBuffer {
    /// Returns the buffer as a mutable byte slice.
    fn as_mut_slice(&mut self) -> &mut [u8];

    /// Writes a u8 at the given offset.
    #[inline(always)]
    fn put_u8(&mut self, offset: usize, value: u8) {
        self.as_mut_slice()[offset] = value;
    }

    /// Writes an i8 at the given offset.
    #[inline(always)]
    fn put_i8(&mut self, offset: usize, value: i8) {
        self.as_mut_slice()[offset] = value as u8;
    }

    /// Writes a u16 in little-endian at the given offset.
    #[inline(always)]
    fn put_u16_le(&mut self, offset: usize, value: u16) {
        self.as_mut_slice()[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    /// Writes an i16 in little-endian at the given offset.
    #[inline(always)]
    fn put_i16_le(&mut self, offset: usize, value: i16) {
        self.as_mut_slice()[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    /// Writes a u32 in little-endian at the given offset.
    #[inline(always)]
    fn put_u32_le(&mut self, offset: usize, value: u32) {
        self.as_mut_slice()[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Writes an i32 in little-endian at the given offset.
    #[inline(always)]
    fn put_i32_le(&mut self, offset: usize, value: i32) {
        self.as_mut_slice()[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Writes a u64 in little-endian at the given offset.
    #[inline(always)]
    fn put_u64_le(&mut self, offset: usize, value: u64) {
        self.as_mut_slice()[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
    }

    /// Writes an i64 in little-endian at the given offset.
    #[inline(always)]
    fn put_i64_le(&mut self, offset: usize, value: i64) {
        self.as_mut_slice()[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
    }

    /// Writes an f32 in little-endian at the given offset.
    #[inline(always)]
    fn put_f32_le(&mut self, offset: usize, value: f32) {
        self.put_u32_le(offset, value.to_bits());
    }

    /// Writes an f64 in little-endian at the given offset.
    #[inline(always)]
    fn put_f64_le(&mut self, offset: usize, value: f64) {
        self.put_u64_le(offset, value.to_bits());
    }

    /// Writes a byte slice at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to write to
    /// * `src` - Source bytes to copy
    #[inline(always)]
    fn put_bytes(&mut self, offset: usize, src: &[u8]) {
        self.as_mut_slice()[offset..offset + src.len()].copy_from_slice(src);
    }

    /// Fills a range with zeros.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to start from
    /// * `len` - Number of bytes to zero
    #[inline]
    fn zero(&mut self, offset: usize, len: usize) {
        self.as_mut_slice()[offset..offset + len].fill(0);
    }
}

impl ReadBuffer for [u8] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline(always)]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl WriteBuffer for [u8] {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl ReadBuffer for Vec<u8> {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl WriteBuffer for Vec<u8> {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}
