use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitSetError {
    #[error(
        "cannot remove {elem}: word {word_index} is not allocated (set has {word_count} words)"
    )]
    WordNotAllocated {
        elem: usize,
        word_index: usize,
        word_count: usize,
    },
    #[error("cannot insert {elem}: elements may not exceed {max}")]
    ElementTooLarge { elem: usize, max: usize },
    #[error("cannot insert {elem}: out of memory")]
    OutOfMemory {
        elem: usize,
        #[source]
        source: TryReserveError,
    },
}
