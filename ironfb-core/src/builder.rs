//! Back-to-front buffer construction.
//!
//! The [`Builder`] grows a byte buffer from its tail towards its head. Every
//! prepend lands in front of the previous one, so children are written before
//! the objects that reference them and offsets always point forward.
//!
//! Offsets returned by the builder ([`UOffset`]) are measured from the END
//! of the buffer, which keeps them stable while the buffer grows.
//!
//! Tables are written between [`Builder::start_object`] and
//! [`Builder::end_object`]; each field records its position in the current
//! vtable through a slot. `end_object` writes the vtable, reusing an
//! identical one written earlier when possible.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::{Error, Result};
use crate::types::{
    MAX_BUFFER_SIZE, SIZE_SOFFSET, SIZE_UOFFSET, SIZE_VOFFSET, SOffset, Scalar, UOffset,
    VOffset, VTABLE_METADATA_FIELDS,
};

/// Default initial capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Builds one or more buffers back to front.
#[derive(Debug, Clone)]
pub struct Builder {
    bytes: Vec<u8>,
    head: usize,
    minalign: usize,
    current_vtable: Option<Vec<UOffset>>,
    object_end: UOffset,
    vtables: Vec<UOffset>,
}

impl Builder {
    /// Creates a builder with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_zeroed(DEFAULT_CAPACITY)
    }

    /// Creates a builder with the given initial capacity.
    ///
    /// The buffer still grows on demand.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooLarge`] if `capacity` exceeds 2 GiB.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity > MAX_BUFFER_SIZE {
            return Err(Error::BufferTooLarge {
                requested: capacity,
                max: MAX_BUFFER_SIZE,
            });
        }
        Ok(Self::with_zeroed(capacity))
    }

    fn with_zeroed(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity],
            head: capacity,
            minalign: 1,
            current_vtable: None,
            object_end: 0,
            vtables: Vec::new(),
        }
    }

    /// Clears all written data and bookkeeping, keeping the allocation.
    pub fn reset(&mut self) {
        self.head = self.bytes.len();
        self.minalign = 1;
        self.current_vtable = None;
        self.object_end = 0;
        self.vtables.clear();
    }

    /// Returns the bytes written so far.
    ///
    /// After [`Builder::finish`] this is the complete buffer.
    #[must_use]
    pub fn finished_data(&self) -> &[u8] {
        &self.bytes[self.head..]
    }

    /// Returns the current offset, measured from the end of the buffer.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> UOffset {
        (self.bytes.len() - self.head) as UOffset
    }

    /// Returns the largest alignment requested so far.
    #[must_use]
    pub const fn minalign(&self) -> usize {
        self.minalign
    }

    /// Writes `n` zero bytes.
    #[inline]
    pub fn pad(&mut self, n: usize) {
        self.bytes.zero(self.head - n, n);
        self.head -= n;
    }

    /// Aligns the buffer so that an element of `size` bytes is aligned after
    /// `additional_bytes` more bytes are written, growing the buffer as
    /// needed.
    ///
    /// `size` must be a power of two.
    ///
    /// # Panics
    /// Panics if the buffer would have to grow beyond 2 GiB.
    #[inline]
    pub fn prep(&mut self, size: usize, additional_bytes: usize) {
        if size > self.minalign {
            self.minalign = size;
        }
        let used = self.bytes.len() - self.head;
        let align_size = (used + additional_bytes).wrapping_neg() & (size - 1);
        let total_size = align_size + size + additional_bytes;
        if self.head < total_size {
            self.grow(total_size);
        }
        self.pad(align_size);
    }

    fn grow(&mut self, free_size: usize) {
        let old_size = self.bytes.len();
        let used = old_size - self.head;
        let needed = used + free_size;
        assert!(
            needed <= MAX_BUFFER_SIZE,
            "cannot grow buffer beyond 2 gigabytes"
        );
        let new_size = DEFAULT_CAPACITY
            .max(old_size * 2)
            .min(MAX_BUFFER_SIZE)
            .max(needed);

        let mut grown = vec![0u8; new_size];
        grown[new_size - old_size..].copy_from_slice(&self.bytes);
        self.bytes = grown;
        self.head += new_size - old_size;
    }

    /// Writes a scalar without alignment or capacity checks.
    ///
    /// Callers must have reserved the space with [`Builder::prep`].
    #[inline]
    pub fn place<T: Scalar>(&mut self, x: T) {
        self.head -= T::SIZE;
        x.write_le(&mut self.bytes, self.head);
    }

    /// Aligns for and writes a scalar.
    ///
    /// # Panics
    /// Panics if the buffer would have to grow beyond 2 GiB.
    #[inline]
    pub fn prepend<T: Scalar>(&mut self, x: T) {
        self.prep(T::SIZE, 0);
        self.place(x);
    }

    /// Writes a scalar into vtable slot `slot` unless it equals `default`.
    ///
    /// # Errors
    /// Returns an error if no object is open or `slot` is out of range.
    #[inline]
    pub fn prepend_slot<T: Scalar>(&mut self, slot: usize, x: T, default: T) -> Result<()> {
        if x != default {
            self.prepend(x);
            self.slot(slot)?;
        }
        Ok(())
    }

    /// Writes an [`SOffset`] to `off`, relative to where it is written.
    ///
    /// # Errors
    /// Returns [`Error::OffsetArithmetic`] if `off` has not been written yet.
    pub fn prepend_soffset_relative(&mut self, off: UOffset) -> Result<()> {
        self.prep(SIZE_SOFFSET, 0);
        let current = self.offset();
        if off > current {
            return Err(Error::OffsetArithmetic {
                offset: off,
                current,
            });
        }
        let relative = current - off + SIZE_SOFFSET as UOffset;
        self.place(relative as SOffset);
        Ok(())
    }

    /// Writes a [`UOffset`] to `off`, relative to where it is written.
    ///
    /// # Errors
    /// Returns [`Error::OffsetArithmetic`] if `off` has not been written yet.
    pub fn prepend_uoffset_relative(&mut self, off: UOffset) -> Result<()> {
        self.prep(SIZE_UOFFSET, 0);
        let current = self.offset();
        if off > current {
            return Err(Error::OffsetArithmetic {
                offset: off,
                current,
            });
        }
        let relative = current - off + SIZE_UOFFSET as UOffset;
        self.place(relative);
        Ok(())
    }

    /// Writes a reference into vtable slot `slot` unless it equals `default`.
    ///
    /// # Errors
    /// Returns an error if no object is open, `slot` is out of range, or `x`
    /// has not been written yet.
    pub fn prepend_uoffset_relative_slot(
        &mut self,
        slot: usize,
        x: UOffset,
        default: UOffset,
    ) -> Result<()> {
        if x != default {
            self.prepend_uoffset_relative(x)?;
            self.slot(slot)?;
        }
        Ok(())
    }

    /// Records an inline struct in vtable slot `slot`.
    ///
    /// Structs are stored inline, so `x` must be the offset returned by the
    /// struct's create function called immediately before.
    ///
    /// # Errors
    /// Returns [`Error::StructIsNotInline`] if the struct was not just
    /// written, or a slot error.
    pub fn prepend_struct_slot(&mut self, slot: usize, x: UOffset, default: UOffset) -> Result<()> {
        if x != default {
            self.assert_nested(x)?;
            self.slot(slot)?;
        }
        Ok(())
    }

    /// Starts a table with `num_fields` vtable slots.
    ///
    /// `num_fields` counts every field of the table, deprecated ones included.
    ///
    /// # Errors
    /// Returns [`Error::ObjectIsNested`] if another object is open.
    pub fn start_object(&mut self, num_fields: usize) -> Result<()> {
        self.assert_not_nested()?;
        self.current_vtable = Some(vec![0; num_fields]);
        self.object_end = self.offset();
        Ok(())
    }

    /// Sets vtable slot `slot` to the current offset.
    ///
    /// # Errors
    /// Returns an error if no object is open or `slot` is out of range.
    pub fn slot(&mut self, slot: usize) -> Result<()> {
        let current = self.offset();
        let vtable = self.current_vtable.as_mut().ok_or(Error::NotInObject)?;
        let num_fields = vtable.len();
        let entry = vtable
            .get_mut(slot)
            .ok_or(Error::SlotOutOfRange { slot, num_fields })?;
        *entry = current;
        Ok(())
    }

    /// Finishes the open table and returns its offset.
    ///
    /// # Errors
    /// Returns [`Error::NotInObject`] if no object is open.
    pub fn end_object(&mut self) -> Result<UOffset> {
        let vtable = self.current_vtable.take().ok_or(Error::NotInObject)?;
        self.write_vtable(&vtable)
    }

    /// Writes the vtable for the object just finished.
    ///
    /// A vtable has the following format:
    /// ```text
    /// <VOffset: size of the vtable in bytes, including this value>
    /// <VOffset: size of the object in bytes, including the vtable offset>
    /// <VOffset: offset for a field> * N, deprecated fields included
    /// ```
    fn write_vtable(&mut self, vtable: &[UOffset]) -> Result<UOffset> {
        // Placeholder for the table-to-vtable offset, patched below.
        self.prepend_soffset_relative(0)?;
        let object_offset = self.offset();

        let metadata = VTABLE_METADATA_FIELDS * SIZE_VOFFSET;
        let existing = self.vtables.iter().rev().copied().find(|&vt2_offset| {
            let vt2_start = self.bytes.len() - vt2_offset as usize;
            let vt2_len = self.bytes.get_u16_le(vt2_start) as usize;
            let vt2 = &self.bytes[vt2_start + metadata..vt2_start + vt2_len];
            vtable_equal(vtable, object_offset, vt2)
        });

        match existing {
            Some(vt2_offset) => {
                self.head = self.bytes.len() - object_offset as usize;
                let relative = vt2_offset as SOffset - object_offset as SOffset;
                self.bytes.put_i32_le(self.head, relative);
            }
            None => {
                for &off in vtable.iter().rev() {
                    let entry = if off != 0 { object_offset - off } else { 0 };
                    self.prepend(entry as VOffset);
                }
                self.prepend((object_offset - self.object_end) as VOffset);
                let vtable_bytes = (vtable.len() + VTABLE_METADATA_FIELDS) * SIZE_VOFFSET;
                self.prepend(vtable_bytes as VOffset);

                let object_pos = self.bytes.len() - object_offset as usize;
                let relative = self.offset() as SOffset - object_offset as SOffset;
                self.bytes.put_i32_le(object_pos, relative);
                self.vtables.push(self.offset());
            }
        }

        Ok(object_offset)
    }

    /// Starts a vector of `num_elems` elements of `elem_size` bytes each,
    /// aligned to `alignment`.
    ///
    /// Elements are then prepended last to first, and the vector closed with
    /// [`Builder::end_vector`].
    ///
    /// # Errors
    /// Returns [`Error::ObjectIsNested`] if an object is open, or
    /// [`Error::BufferTooLarge`] if the vector cannot fit in 2 GiB.
    pub fn start_vector(
        &mut self,
        elem_size: usize,
        num_elems: usize,
        alignment: usize,
    ) -> Result<UOffset> {
        self.assert_not_nested()?;
        self.assert_fits(
            elem_size.saturating_mul(num_elems),
            alignment.max(SIZE_UOFFSET),
        )?;
        self.prep(SIZE_UOFFSET, elem_size * num_elems);
        self.prep(alignment, elem_size * num_elems);
        Ok(self.offset())
    }

    /// Writes the length prefix of the vector being built and returns its
    /// offset.
    pub fn end_vector(&mut self, num_elems: usize) -> UOffset {
        // Space was reserved by start_vector.
        self.place(num_elems as UOffset);
        self.offset()
    }

    /// Writes a NUL-terminated string and returns its offset.
    ///
    /// # Errors
    /// Returns [`Error::ObjectIsNested`] if an object is open, or
    /// [`Error::BufferTooLarge`] if the string cannot fit in 2 GiB.
    pub fn create_string(&mut self, s: &str) -> Result<UOffset> {
        self.assert_not_nested()?;
        let bytes = s.as_bytes();
        self.assert_fits(bytes.len() + 1, SIZE_UOFFSET)?;
        self.prep(SIZE_UOFFSET, bytes.len() + 1);
        self.pad(1);
        self.head -= bytes.len();
        self.bytes.put_bytes(self.head, bytes);
        Ok(self.end_vector(bytes.len()))
    }

    /// Finishes the buffer with `root` as its root table.
    ///
    /// # Errors
    /// Returns an error if an object is still open or `root` is invalid.
    pub fn finish(&mut self, root: UOffset) -> Result<()> {
        self.assert_not_nested()?;
        self.prep(self.minalign, SIZE_UOFFSET);
        self.prepend_uoffset_relative(root)
    }

    /// Checks that `len` bytes, plus a length prefix and up to `align`
    /// bytes of padding, still fit in the largest supported buffer.
    fn assert_fits(&self, len: usize, align: usize) -> Result<()> {
        let requested = (self.offset() as usize)
            .saturating_add(len)
            .saturating_add(SIZE_UOFFSET)
            .saturating_add(align);
        if requested > MAX_BUFFER_SIZE {
            return Err(Error::BufferTooLarge {
                requested,
                max: MAX_BUFFER_SIZE,
            });
        }
        Ok(())
    }

    fn assert_not_nested(&self) -> Result<()> {
        if self.current_vtable.is_some() {
            return Err(Error::ObjectIsNested);
        }
        Ok(())
    }

    fn assert_nested(&self, obj: UOffset) -> Result<()> {
        let current = self.offset();
        if obj != current {
            return Err(Error::StructIsNotInline {
                offset: obj,
                current,
            });
        }
        Ok(())
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares an unwritten vtable with a written one (metadata excluded).
fn vtable_equal(vtable: &[UOffset], object_start: UOffset, written: &[u8]) -> bool {
    if vtable.len() * SIZE_VOFFSET != written.len() {
        return false;
    }
    vtable.iter().enumerate().all(|(i, &elem)| {
        let x = written.get_u16_le(i * SIZE_VOFFSET);
        if x == 0 && elem == 0 {
            return true;
        }
        i64::from(x) == i64::from(object_start) - i64::from(elem)
    })
}
