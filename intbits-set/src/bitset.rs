use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub,
        SubAssign,
    },
};

use crate::error::BitSetError;

/// Storage unit of a [`BitSet`]. Its width is the target's pointer width.
pub type Word = usize;

/// Number of elements covered by a single [`Word`], fixed at build time.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Largest element [`BitSet::try_insert`] accepts. A set holding it needs
/// 512 MiB of words.
pub const MAX_ELEM: usize = u32::MAX as usize;

/// A set of small non-negative integers packed into a vector of words.
///
/// Bit `b` of word `w` represents the element `w * WORD_BITS + b`. Words are
/// appended on demand by [`BitSet::insert`] and stay allocated after their
/// elements are removed; only [`BitSet::compact`] gives storage back.
#[derive(Debug, Clone)]
pub struct BitSet {
    data: Vec<Word>,
}

/// Splits an element into its word index and bit offset.
fn locate(elem: usize) -> (usize, u32) {
    (elem / WORD_BITS, (elem % WORD_BITS) as u32)
}

fn mask(off: u32) -> Word {
    1 << off
}

impl BitSet {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty set with enough zeroed words to hold `n_bits` elements.
    pub fn with_capacity(n_bits: usize) -> Self {
        BitSet {
            data: vec![0; n_bits.div_ceil(WORD_BITS)],
        }
    }

    pub fn word_count(&self) -> usize {
        self.data.len()
    }

    pub fn words(&self) -> &[Word] {
        &self.data
    }

    pub fn contains(&self, elem: usize) -> bool {
        let (idx, off) = locate(elem);
        self.data.get(idx).is_some_and(|word| (word >> off) & 1 == 1)
    }

    /// Adds `elem`, growing the storage if its word is not allocated yet.
    ///
    /// Returns `true` if the element was not already a member.
    pub fn insert(&mut self, elem: usize) -> bool {
        let (idx, off) = locate(elem);
        if idx >= self.data.len() {
            self.data.resize(idx + 1, 0);
        }

        let word = &mut self.data[idx];
        let added = *word & mask(off) == 0;
        *word |= mask(off);
        added
    }

    /// Like [`BitSet::insert`], but fails instead of aborting when `elem`
    /// exceeds [`MAX_ELEM`] or the storage cannot grow.
    ///
    /// The set is unchanged on error.
    pub fn try_insert(&mut self, elem: usize) -> Result<bool, BitSetError> {
        if elem > MAX_ELEM {
            return Err(BitSetError::ElementTooLarge {
                elem,
                max: MAX_ELEM,
            });
        }

        let (idx, _) = locate(elem);
        if let Some(missing) = (idx + 1).checked_sub(self.data.len()) {
            self.data
                .try_reserve(missing)
                .map_err(|source| BitSetError::OutOfMemory { elem, source })?;
        }

        Ok(self.insert(elem))
    }

    /// Inserts elements in order and stops at the first one
    /// [`BitSet::try_insert`] rejects.
    pub fn try_insert_all<I>(&mut self, elems: I) -> Result<(), BitSetError>
    where
        I: IntoIterator<Item = usize>,
    {
        for elem in elems {
            self.try_insert(elem)?;
        }
        Ok(())
    }

    pub fn insert_all<I>(&mut self, elems: I)
    where
        I: IntoIterator<Item = usize>,
    {
        for elem in elems {
            self.insert(elem);
        }
    }

    /// Removes `elem` and reports whether it was a member.
    ///
    /// The word holding `elem` must already be allocated. Otherwise the set
    /// is left untouched and [`BitSetError::WordNotAllocated`] is returned.
    pub fn remove(&mut self, elem: usize) -> Result<bool, BitSetError> {
        let (idx, off) = locate(elem);
        let word_count = self.data.len();

        let Some(word) = self.data.get_mut(idx) else {
            return Err(BitSetError::WordNotAllocated {
                elem,
                word_index: idx,
                word_count,
            });
        };

        let present = *word & mask(off) != 0;
        *word &= !mask(off);
        Ok(present)
    }

    /// Zeroes every word. The word count is kept.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Counts the members by scanning every word.
    pub fn len(&self) -> usize {
        self.data.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&word| word == 0)
    }

    /// Returns the members in ascending order.
    ///
    /// The returned vector is a snapshot and does not follow later mutation.
    pub fn elems(&self) -> Vec<usize> {
        let mut elems = Vec::with_capacity(self.len());
        elems.extend(self.iter());
        elems
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.data,
            word_index: 0,
            current: self.data.first().copied().unwrap_or(0),
        }
    }

    /// Returns an independent set with the same members.
    pub fn copy(&self) -> BitSet {
        self.clone()
    }

    pub fn min(&self) -> Option<usize> {
        let (idx, word) = self
            .data
            .iter()
            .enumerate()
            .find(|&(_, &word)| word != 0)?;
        Some(idx * WORD_BITS + word.trailing_zeros() as usize)
    }

    pub fn max(&self) -> Option<usize> {
        let (idx, word) = self
            .data
            .iter()
            .enumerate()
            .rfind(|&(_, &word)| word != 0)?;
        Some(idx * WORD_BITS + (WORD_BITS - 1 - word.leading_zeros() as usize))
    }

    /// Sets `self` to `self ∪ other`.
    ///
    /// Words of `other` past the end of `self` are appended.
    pub fn union_with(&mut self, other: &BitSet) {
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a |= *b;
        }

        if other.data.len() > self.data.len() {
            let tail = &other.data[self.data.len()..];
            self.data.extend_from_slice(tail);
        }
    }

    /// Sets `self` to `self ∩ other`.
    ///
    /// Words of `self` past the end of `other` are zeroed.
    pub fn intersect_with(&mut self, other: &BitSet) {
        let common = self.data.len().min(other.data.len());

        for (a, b) in self.data[..common].iter_mut().zip(&other.data[..common]) {
            *a &= *b;
        }

        self.data[common..].fill(0);
    }

    /// Sets `self` to `self − other`.
    pub fn difference_with(&mut self, other: &BitSet) {
        let common = self.data.len().min(other.data.len());

        for (a, b) in self.data[..common].iter_mut().zip(&other.data[..common]) {
            *a &= !*b;
        }
    }

    /// Sets `self` to `self ⊕ other`.
    ///
    /// Words of `other` past the end of `self` are appended.
    pub fn symmetric_difference_with(&mut self, other: &BitSet) {
        let common = self.data.len().min(other.data.len());

        for (a, b) in self.data[..common].iter_mut().zip(&other.data[..common]) {
            *a ^= *b;
        }

        if other.data.len() > common {
            self.data.extend_from_slice(&other.data[common..]);
        }
    }

    pub fn is_subset(&self, other: &BitSet) -> bool {
        self.data.iter().enumerate().all(|(i, &word)| {
            let theirs = other.data.get(i).copied().unwrap_or(0);
            word & !theirs == 0
        })
    }

    pub fn is_superset(&self, other: &BitSet) -> bool {
        other.is_subset(self)
    }

    pub fn is_disjoint(&self, other: &BitSet) -> bool {
        self.data.iter().zip(&other.data).all(|(a, b)| a & b == 0)
    }

    /// Drops trailing all-zero words.
    ///
    /// This is the only operation that lowers [`BitSet::word_count`].
    pub fn compact(&mut self) {
        let len = self.trimmed().len();
        self.data.truncate(len);
    }

    fn trimmed(&self) -> &[Word] {
        let len = self
            .data
            .iter()
            .rposition(|&word| word != 0)
            .map_or(0, |last| last + 1);
        &self.data[..len]
    }
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl Eq for BitSet {}

impl Hash for BitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.trimmed().hash(state);
    }
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, elem) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{elem}")?;
        }
        f.write_str("}")
    }
}

impl Extend<usize> for BitSet {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        self.insert_all(iter);
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = BitSet::new();
        set.insert_all(iter);
        set
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Ascending iterator over the members of a [`BitSet`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    words: &'a [Word],
    word_index: usize,
    current: Word,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current == 0 {
            if self.word_index + 1 >= self.words.len() {
                return None;
            }
            self.word_index += 1;
            self.current = self.words[self.word_index];
        }

        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(self.word_index * WORD_BITS + bit)
    }
}

impl FusedIterator for Iter<'_> {}

impl BitOr for &BitSet {
    type Output = BitSet;

    fn bitor(self, rhs: Self) -> BitSet {
        let mut out = self.copy();
        out.union_with(rhs);
        out
    }
}

impl BitAnd for &BitSet {
    type Output = BitSet;

    fn bitand(self, rhs: Self) -> BitSet {
        let mut out = self.copy();
        out.intersect_with(rhs);
        out
    }
}

impl Sub for &BitSet {
    type Output = BitSet;

    fn sub(self, rhs: Self) -> BitSet {
        let mut out = self.copy();
        out.difference_with(rhs);
        out
    }
}

impl BitXor for &BitSet {
    type Output = BitSet;

    fn bitxor(self, rhs: Self) -> BitSet {
        let mut out = self.copy();
        out.symmetric_difference_with(rhs);
        out
    }
}

impl BitOrAssign<&BitSet> for BitSet {
    fn bitor_assign(&mut self, rhs: &BitSet) {
        self.union_with(rhs);
    }
}

impl BitAndAssign<&BitSet> for BitSet {
    fn bitand_assign(&mut self, rhs: &BitSet) {
        self.intersect_with(rhs);
    }
}

impl SubAssign<&BitSet> for BitSet {
    fn sub_assign(&mut self, rhs: &BitSet) {
        self.difference_with(rhs);
    }
}

impl BitXorAssign<&BitSet> for BitSet {
    fn bitxor_assign(&mut self, rhs: &BitSet) {
        self.symmetric_difference_with(rhs);
    }
}
