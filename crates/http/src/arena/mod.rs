//! Arena memory substrate.
//!
//! Everything a connection produces lives in one [`Arena`]: the received bytes, the
//! request headers, the parsed json tree, the serialized json output and the encoded
//! response. Views into it are plain borrowed slices, so their lifetime is bounded by the
//! arena borrow and they cannot outlive [`Arena::reset`].
//!
//! - [`Arena`]: fixed-capacity bump allocator over one `bumpalo` chunk
//! - [`ArenaVec`]: growable vector whose storage is charged to an arena
//! - [`ArenaError`]: allocation failures, always recoverable

mod bump;
mod error;
mod vec;

pub use bump::ARENA_ALIGNMENT;
pub use bump::Arena;
pub use bump::align_forward;
pub use error::ArenaError;
pub use vec::ArenaVec;
