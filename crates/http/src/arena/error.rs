use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena out of memory, requested {requested} bytes but only {available} available")]
    OutOfMemory { requested: usize, available: usize },

    #[error("formatting into the arena failed")]
    Format,
}

impl ArenaError {
    pub fn out_of_memory(requested: usize, available: usize) -> Self {
        Self::OutOfMemory { requested, available }
    }
}
