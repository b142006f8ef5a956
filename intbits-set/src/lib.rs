//! Sets of small non-negative integers backed by a vector of machine words.
//!
//! ```
//! use intbits_set::BitSet;
//!
//! let mut s = BitSet::new();
//! s.insert(1);
//! s.insert(9);
//! s.insert(144);
//! assert_eq!(s.to_string(), "{1 9 144}");
//! assert_eq!(s.len(), 3);
//! ```

pub mod bitset;
pub mod error;

pub use bitset::{BitSet, Iter, MAX_ELEM, WORD_BITS, Word};
pub use error::BitSetError;
