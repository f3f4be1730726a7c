//! Open-addressing hash map backing json objects.
//!
//! Keys are string views compared byte by byte. Slots are probed linearly from the
//! FNV-1 hash of the key. The slot table lives in the arena: it is allocated with
//! [`DEFAULT_OBJECT_CAPACITY`] slots on the first insert and, once the load reaches
//! [`MAX_LOAD_PERCENT`], replaced by a table of `(capacity + 1) * 3` slots with every
//! entry rehashed. Entries are never removed.
//!
//! Iteration follows slot order, not insertion order.

use std::fmt;

use crate::arena::{Arena, ArenaError, ArenaVec};
use crate::json::Value;

pub const DEFAULT_OBJECT_CAPACITY: usize = 37;

pub const MAX_LOAD_PERCENT: usize = 65;

const FNV_OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// FNV-1: multiply, then xor.
pub fn fnv1(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| hash.wrapping_mul(FNV_PRIME) ^ u64::from(*byte))
}

type Slot<'a> = Option<(&'a str, Value<'a>)>;

pub struct JsonObject<'a> {
    arena: &'a Arena,
    slots: &'a mut [Slot<'a>],
    len: usize,
}

impl<'a> JsonObject<'a> {
    /// An empty object. No slot table is allocated until the first insert.
    pub fn new_in(arena: &'a Arena) -> Self {
        Self { arena, slots: &mut [], len: 0 }
    }

    fn with_capacity_in(capacity: usize, arena: &'a Arena) -> Result<Self, ArenaError> {
        Ok(Self { arena, slots: Self::allocate(arena, capacity)?, len: 0 })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a new entry. When the arena cannot hold a larger slot table the object is
    /// left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already present. Json objects with duplicate keys are rejected
    /// outright rather than resolved by keeping either value.
    pub fn insert(&mut self, key: &'a str, value: Value<'a>) -> Result<(), ArenaError> {
        if self.slots.is_empty() {
            self.slots = Self::allocate(self.arena, DEFAULT_OBJECT_CAPACITY)?;
        } else if 100 * self.len / self.slots.len() >= MAX_LOAD_PERCENT {
            self.grow()?;
        }

        let index = self.probe(key);
        let slot = &mut self.slots[index];
        if slot.is_some() {
            panic!("tried to insert a duplicate key `{key}` into a json object");
        }

        *slot = Some((key, value));
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        if self.slots.is_empty() {
            return None;
        }
        self.slots[self.probe(key)].as_ref().map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get_u64(key).and_then(|n| u32::try_from(n).ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &Value<'a>)> + '_ {
        self.slots.iter().flatten().map(|(key, value)| (*key, value))
    }

    /// Index of the slot holding `key`, or of the empty slot where it would go.
    ///
    /// Terminates because the load factor keeps at least one slot empty.
    fn probe(&self, key: &str) -> usize {
        let capacity = self.slots.len();
        #[allow(clippy::cast_possible_truncation, reason = "the remainder is below the slot count")]
        let mut index = (fnv1(key.as_bytes()) % capacity as u64) as usize;

        loop {
            match &self.slots[index] {
                Some((existing, _)) if *existing != key => index = (index + 1) % capacity,
                _ => return index,
            }
        }
    }

    fn grow(&mut self) -> Result<(), ArenaError> {
        let slots = Self::allocate(self.arena, (self.slots.len() + 1) * 3)?;
        let old = std::mem::replace(&mut self.slots, slots);

        for (key, value) in old.iter_mut().filter_map(Option::take) {
            let index = self.probe(key);
            self.slots[index] = Some((key, value));
        }
        Ok(())
    }

    fn allocate(arena: &'a Arena, capacity: usize) -> Result<&'a mut [Slot<'a>], ArenaError> {
        let mut slots = ArenaVec::with_capacity_in(capacity, arena)?;
        for _ in 0..capacity {
            slots.push(None)?;
        }
        Ok(slots.into_slice_mut())
    }
}

/// Equal when both hold the same keys mapped to equal values, whatever the slot layout.
impl PartialEq for JsonObject<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Debug for JsonObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
