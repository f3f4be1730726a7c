//! Incremental json writer.
//!
//! [`JsonWriter`] appends json text to an arena-backed buffer. Each writer is a plain
//! local value, so independent responses can be built side by side. Commas are inserted
//! automatically: a key or a value gets a leading `,` when the enclosing container
//! already has content. Bracket balance is not checked; the caller is trusted to close
//! what it opens.

use crate::arena::{Arena, ArenaError, ArenaVec};
use crate::json::value::MAX_SAFE_INTEGER;

const INITIAL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing written yet in the current container.
    Clean,
    /// The current container already holds a value.
    Dirty,
    /// A key was just written, its value comes next.
    AfterKey,
}

#[derive(Debug)]
pub struct JsonWriter<'a> {
    buf: ArenaVec<'a, u8>,
    state: State,
}

impl<'a> JsonWriter<'a> {
    /// Starts a new document in `arena` with a small buffer already reserved.
    pub fn begin(arena: &'a Arena) -> Result<Self, ArenaError> {
        Ok(Self { buf: ArenaVec::with_capacity_in(INITIAL_CAPACITY, arena)?, state: State::Clean })
    }

    pub fn begin_object(&mut self) -> Result<(), ArenaError> {
        self.open(b'{')
    }

    pub fn end_object(&mut self) -> Result<(), ArenaError> {
        self.close(b'}')
    }

    pub fn begin_array(&mut self) -> Result<(), ArenaError> {
        self.open(b'[')
    }

    pub fn end_array(&mut self) -> Result<(), ArenaError> {
        self.close(b']')
    }

    /// Writes `"name":`, preceded by a comma if the object already has an entry.
    pub fn put_key(&mut self, name: &str) -> Result<(), ArenaError> {
        self.separate()?;
        self.quoted(name)?;
        self.buf.push(b':')?;
        self.state = State::AfterKey;
        Ok(())
    }

    /// Writes `value` between quotes. The text is copied verbatim, nothing is escaped.
    pub fn put_string(&mut self, value: &str) -> Result<(), ArenaError> {
        self.separate()?;
        self.quoted(value)?;
        self.state = State::Dirty;
        Ok(())
    }

    /// Integral values are written without a fractional part; NaN and infinities as `null`.
    pub fn put_number(&mut self, value: f64) -> Result<(), ArenaError> {
        if !value.is_finite() {
            return self.put_null();
        }

        self.separate()?;
        if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            #[allow(clippy::cast_possible_truncation, reason = "integral and within 2^53")]
            let integer = value as i64;
            self.buf.push_fmt(format_args!("{integer}"))?;
        } else {
            self.buf.push_fmt(format_args!("{value}"))?;
        }
        self.state = State::Dirty;
        Ok(())
    }

    pub fn put_bool(&mut self, value: bool) -> Result<(), ArenaError> {
        self.literal(if value { b"true" } else { b"false" })
    }

    pub fn put_true(&mut self) -> Result<(), ArenaError> {
        self.put_bool(true)
    }

    pub fn put_false(&mut self) -> Result<(), ArenaError> {
        self.put_bool(false)
    }

    pub fn put_null(&mut self) -> Result<(), ArenaError> {
        self.literal(b"null")
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finishes the document and returns everything written as an arena view.
    pub fn end(self) -> &'a [u8] {
        self.buf.into_slice()
    }

    fn open(&mut self, bracket: u8) -> Result<(), ArenaError> {
        self.separate()?;
        self.buf.push(bracket)?;
        self.state = State::Clean;
        Ok(())
    }

    fn close(&mut self, bracket: u8) -> Result<(), ArenaError> {
        self.buf.push(bracket)?;
        self.state = State::Dirty;
        Ok(())
    }

    fn literal(&mut self, text: &[u8]) -> Result<(), ArenaError> {
        self.separate()?;
        self.buf.extend_from_slice(text)?;
        self.state = State::Dirty;
        Ok(())
    }

    fn quoted(&mut self, text: &str) -> Result<(), ArenaError> {
        self.buf.push(b'"')?;
        self.buf.extend_from_slice(text.as_bytes())?;
        self.buf.push(b'"')
    }

    #[inline]
    fn separate(&mut self) -> Result<(), ArenaError> {
        if self.state == State::Dirty {
            self.buf.push(b',')?;
        }
        Ok(())
    }
}
