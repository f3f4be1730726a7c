//! Growable vector whose storage is charged to an [`Arena`].

use std::fmt;
use std::ops::{Deref, DerefMut};

use bumpalo::collections::Vec as BumpVec;

use crate::arena::{Arena, ArenaError};

/// A `bumpalo` vector that asks its [`Arena`] before every growth.
///
/// Growth follows `(capacity + 1) * 2` and falls back to the exact size when the doubled
/// block no longer fits. Storage abandoned by a move stays charged until the arena resets.
pub struct ArenaVec<'a, T> {
    arena: &'a Arena,
    items: BumpVec<'a, T>,
}

impl<'a, T> ArenaVec<'a, T> {
    pub const DEFAULT_CAPACITY: usize = 7;

    /// An empty vector; nothing is allocated until the first push.
    pub fn new_in(arena: &'a Arena) -> Self {
        Self { arena, items: BumpVec::new_in(arena.bump()) }
    }

    pub fn with_capacity_in(capacity: usize, arena: &'a Arena) -> Result<Self, ArenaError> {
        let mut vec = Self::new_in(arena);
        arena.grow(&mut vec.items, capacity)?;
        Ok(vec)
    }

    #[inline]
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Ensures room for `additional` more elements.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArenaError> {
        let Some(needed) = self.items.len().checked_add(additional) else {
            return Err(ArenaError::out_of_memory(usize::MAX, self.arena.remaining()));
        };
        if needed <= self.items.capacity() {
            return Ok(());
        }

        let doubled = self.items.capacity().saturating_add(1).saturating_mul(2).max(Self::DEFAULT_CAPACITY);
        if doubled > needed && self.arena.grow(&mut self.items, doubled).is_ok() {
            return Ok(());
        }
        self.arena.grow(&mut self.items, needed)
    }

    pub fn push(&mut self, value: T) -> Result<(), ArenaError> {
        self.reserve(1)?;
        self.items.push(value);
        Ok(())
    }

    /// Converts into a slice that lives as long as the arena borrow.
    pub fn into_slice(self) -> &'a [T] {
        self.items.into_bump_slice()
    }

    #[allow(clippy::mut_from_ref, reason = "the vector is consumed")]
    pub fn into_slice_mut(self) -> &'a mut [T] {
        self.items.into_bump_slice_mut()
    }
}

impl<T: Copy> ArenaVec<'_, T> {
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), ArenaError> {
        self.reserve(src.len())?;
        self.items.extend_from_slice(src);
        Ok(())
    }
}

impl ArenaVec<'_, u8> {
    /// Appends formatted text. Running out of arena is reported as
    /// [`ArenaError::OutOfMemory`], not as a formatting error.
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), ArenaError> {
        let mut adapter = FmtAdapter { vec: self, error: None };
        match fmt::write(&mut adapter, args) {
            Ok(()) => Ok(()),
            Err(_) => Err(adapter.error.unwrap_or(ArenaError::Format)),
        }
    }
}

struct FmtAdapter<'v, 'a> {
    vec: &'v mut ArenaVec<'a, u8>,
    error: Option<ArenaError>,
}

impl fmt::Write for FmtAdapter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.vec.extend_from_slice(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

impl<T> Deref for ArenaVec<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for ArenaVec<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T: PartialEq> PartialEq for ArenaVec<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self[..] == other[..]
    }
}

impl<T: fmt::Debug> fmt::Debug for ArenaVec<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
