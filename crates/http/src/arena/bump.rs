//! Fixed-capacity bump allocator on top of [`bumpalo`].
//!
//! An [`Arena`] owns one `bumpalo` chunk sized at construction. The allocation limit is
//! pinned to that chunk, so the arena never asks the global allocator for more memory.
//! Every allocation is also charged against the configured capacity, rounded up to the
//! word size; the running total is what [`Arena::offset`] reports.
//!
//! Memory is never freed piece by piece: the whole arena is rewound with
//! [`Arena::reset`], which needs `&mut self`. Every slice handed out borrows the arena, so
//! the borrow checker guarantees that no view survives a reset.
//!
//! # Invariants
//!
//! - `0 <= offset <= capacity`
//! - the backing chunk is allocated once; running out is an [`ArenaError`], never a new chunk

use std::cell::Cell;
use std::fmt;

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;

use crate::arena::ArenaError;
use crate::ensure;

/// Every allocation is charged in multiples of the machine word size.
pub const ARENA_ALIGNMENT: usize = size_of::<usize>();

/// Rounds `size` up to the next multiple of [`ARENA_ALIGNMENT`], `None` on overflow.
#[inline]
pub const fn align_forward(size: usize) -> Option<usize> {
    match size.checked_add(ARENA_ALIGNMENT - 1) {
        Some(padded) => Some(padded & !(ARENA_ALIGNMENT - 1)),
        None => None,
    }
}

/// A fixed-capacity bump allocator.
///
/// Allocation goes through `&self`, so any number of slices can be alive at the same
/// time. Resetting goes through `&mut self`, so none of them can be alive afterwards.
pub struct Arena {
    bump: Bump,
    capacity: usize,
    used: Cell<usize>,
}

impl Arena {
    /// Allocates the single backing chunk, at least `capacity` bytes large.
    pub fn new(capacity: usize) -> Self {
        let bump = Bump::with_capacity(capacity);
        bump.set_allocation_limit(Some(bump.allocated_bytes()));
        Self { bump, capacity, used: Cell::new(0) }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes charged since the last reset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.used.get()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.used.get()
    }

    #[inline]
    pub(crate) fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Carves `size` zeroed bytes out of the arena.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::OutOfMemory`] when `size`, rounded up to the word size, does not
    /// fit in the remaining capacity; nothing is charged in that case.
    #[allow(clippy::mut_from_ref, reason = "every call returns a fresh bump allocation")]
    pub fn push(&self, size: usize) -> Result<&mut [u8], ArenaError> {
        let mut bytes = BumpVec::new_in(&self.bump);
        self.grow(&mut bytes, size)?;
        bytes.resize(size, 0);
        Ok(bytes.into_bump_slice_mut())
    }

    /// Pushes a copy of `src`.
    #[allow(clippy::mut_from_ref, reason = "every call returns a fresh bump allocation")]
    pub fn push_copy(&self, src: &[u8]) -> Result<&mut [u8], ArenaError> {
        let mut bytes = BumpVec::new_in(&self.bump);
        self.grow(&mut bytes, src.len())?;
        bytes.extend_from_slice(src);
        Ok(bytes.into_bump_slice_mut())
    }

    /// Pushes a copy of `s` and returns it as a string view.
    pub fn push_str(&self, s: &str) -> Result<&str, ArenaError> {
        let bytes = self.push_copy(s.as_bytes())?;
        std::str::from_utf8(bytes).map_err(|_e| ArenaError::Format)
    }

    /// Pushes a fresh range of `new_size` bytes and copies `old` into its front. The old
    /// range stays allocated until the next reset.
    #[allow(clippy::mut_from_ref, reason = "delegates to push")]
    pub fn realloc(&self, old: &[u8], new_size: usize) -> Result<&mut [u8], ArenaError> {
        let dst = self.push(new_size)?;
        let copied = old.len().min(new_size);
        dst[..copied].copy_from_slice(&old[..copied]);
        Ok(dst)
    }

    /// Formats `args` into an exactly-sized arena string.
    ///
    /// The arguments are rendered twice: once to measure, once to write.
    pub fn format(&self, args: fmt::Arguments<'_>) -> Result<&str, ArenaError> {
        let mut counter = ByteCounter(0);
        fmt::write(&mut counter, args).map_err(|_e| ArenaError::Format)?;

        let mut writer = SliceWriter { dst: self.push(counter.0)?, written: 0 };
        fmt::write(&mut writer, args).map_err(|_e| ArenaError::Format)?;

        let SliceWriter { dst, written } = writer;
        let dst: &[u8] = dst;
        std::str::from_utf8(&dst[..written]).map_err(|_e| ArenaError::Format)
    }

    /// Makes room in `items` for `capacity` elements in total and charges the new storage.
    ///
    /// The whole new block is charged: storage left behind by a move is not reclaimed
    /// before the next reset.
    pub(crate) fn grow<T>(&self, items: &mut BumpVec<'_, T>, capacity: usize) -> Result<(), ArenaError> {
        let available = self.remaining();
        let size = capacity.checked_mul(size_of::<T>()).ok_or(ArenaError::out_of_memory(usize::MAX, available))?;
        let aligned = align_forward(size).ok_or(ArenaError::out_of_memory(size, available))?;
        ensure!(aligned <= available, ArenaError::out_of_memory(size, available));

        items
            .try_reserve_exact(capacity.saturating_sub(items.len()))
            .map_err(|_e| ArenaError::out_of_memory(size, available))?;
        self.used.set(self.used.get() + aligned);
        Ok(())
    }

    /// Rewinds the arena. The backing chunk is kept for the next round.
    pub fn reset(&mut self) {
        self.bump.reset();
        self.used.set(0);
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena").field("capacity", &self.capacity).field("offset", &self.used.get()).finish()
    }
}

struct ByteCounter(usize);

impl fmt::Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

struct SliceWriter<'a> {
    dst: &'a mut [u8],
    written: usize,
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.written + s.len();
        if end > self.dst.len() {
            return Err(fmt::Error);
        }
        self.dst[self.written..end].copy_from_slice(s.as_bytes());
        self.written = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_rounds_up_to_word() {
        assert_eq!(align_forward(0), Some(0));
        assert_eq!(align_forward(1), Some(ARENA_ALIGNMENT));
        assert_eq!(align_forward(ARENA_ALIGNMENT), Some(ARENA_ALIGNMENT));
        assert_eq!(align_forward(ARENA_ALIGNMENT + 1), Some(2 * ARENA_ALIGNMENT));
        assert_eq!(align_forward(usize::MAX), None);
    }

    #[test]
    fn push_charges_aligned_size() {
        let arena = Arena::new(64);

        let first = arena.push(3).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(arena.offset(), ARENA_ALIGNMENT);

        let second = arena.push(ARENA_ALIGNMENT).unwrap();
        assert_eq!(second.len(), ARENA_ALIGNMENT);
        assert_eq!(arena.offset(), 2 * ARENA_ALIGNMENT);

        first.copy_from_slice(b"abc");
        second.fill(7);
        assert_eq!(first, b"abc");
        assert!(second.iter().all(|b| *b == 7));
    }

    #[test]
    fn pushed_bytes_are_zeroed() {
        let mut arena = Arena::new(32);
        assert!(arena.push(32).unwrap().iter().all(|b| *b == 0));

        arena.reset();
        arena.push_copy(b"dirty").unwrap();
        arena.reset();
        assert!(arena.push(5).unwrap().iter().all(|b| *b == 0));
    }

    #[test]
    fn push_beyond_capacity_fails_without_charging() {
        let arena = Arena::new(16);
        arena.push(9).unwrap();

        let err = arena.push(1).unwrap_err();
        assert_eq!(err, ArenaError::OutOfMemory { requested: 1, available: 0 });
        assert_eq!(arena.offset(), 16);

        let arena = Arena::new(16);
        assert!(matches!(arena.push(usize::MAX), Err(ArenaError::OutOfMemory { .. })));
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn offset_never_exceeds_capacity() {
        for capacity in [0, 1, 7, 8, 13, 64, 100] {
            let arena = Arena::new(capacity);
            for size in [0, 1, 3, 8, 9, 17] {
                let _ = arena.push(size);
                assert!(arena.offset() <= arena.capacity());
            }
        }
    }

    #[test]
    fn reset_restores_full_capacity() {
        let mut arena = Arena::new(32);
        arena.push_copy(b"hello").unwrap();
        arena.push(24).unwrap();
        assert_eq!(arena.remaining(), 0);
        assert!(arena.push(1).is_err());

        arena.reset();
        assert_eq!(arena.offset(), 0);
        assert_eq!(arena.push(32).unwrap().len(), 32);

        arena.reset();
        arena.reset();
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn backing_chunk_never_grows() {
        let arena = Arena::new(64);
        let allocated = arena.bump().allocated_bytes();

        assert!(arena.push(1 << 20).is_err());
        let mut bypass: BumpVec<'_, u8> = BumpVec::new_in(arena.bump());
        assert!(bypass.try_reserve(1 << 20).is_err());

        assert_eq!(arena.bump().allocated_bytes(), allocated);
    }

    #[test]
    fn push_str_and_copy() {
        let arena = Arena::new(64);
        assert_eq!(arena.push_str("Tracker").unwrap(), "Tracker");
        assert_eq!(arena.push_copy(b"\x00\xff").unwrap(), b"\x00\xff");
        assert_eq!(arena.offset(), 2 * ARENA_ALIGNMENT);
    }

    #[test]
    fn realloc_copies_into_new_range() {
        let arena = Arena::new(64);
        let old = arena.push_copy(b"abcd").unwrap();
        let grown = arena.realloc(old, 10).unwrap();
        assert_eq!(&grown[..4], b"abcd");
        assert_eq!(&grown[4..], &[0; 6]);
        assert_eq!(arena.offset(), ARENA_ALIGNMENT + 16);

        let shrunk = arena.realloc(b"xyz", 2).unwrap();
        assert_eq!(shrunk, b"xy");
    }

    #[test]
    fn format_is_exactly_sized() {
        let arena = Arena::new(64);
        let s = arena.format(format_args!("{} {}", 404, "Not Found")).unwrap();
        assert_eq!(s, "404 Not Found");
        assert_eq!(arena.offset(), 16);

        let small = Arena::new(8);
        assert!(matches!(small.format(format_args!("{}", "too long for it")), Err(ArenaError::OutOfMemory { .. })));
    }
}
