//! A fixed length bit vector used to keep visited sets of labels and routes.

#[cfg(test)]
#[path = "../../../tests/unit/algorithms/structures/bitvec_test.rs"]
mod bitvec_test;

use std::fmt::Display;

/// A bit vector of fixed length, a block is `u64`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitVec {
    blocks: Vec<u64>,
    length: usize,
}

const BITS_IN_BLOCK: usize = u64::BITS as usize;

impl BitVec {
    /// Creates a new bit vector with all bits unset.
    pub fn new(length: usize) -> Self {
        let block_count = length.div_ceil(BITS_IN_BLOCK);
        Self { blocks: vec![0; block_count], length }
    }

    /// Sets or unsets bit at given index. Panics when index is out of range.
    pub fn set(&mut self, index: usize, bit: bool) {
        assert!(index < self.length, "bit index {index} is out of range {}", self.length);
        let mask = 1 << (index % BITS_IN_BLOCK);
        let block = &mut self.blocks[index / BITS_IN_BLOCK];

        if bit {
            *block |= mask;
        } else {
            *block &= !mask;
        }
    }

    /// Returns a copy of the vector with the given bit set.
    pub fn with(&self, index: usize) -> Self {
        let mut other = self.clone();
        other.set(index, true);
        other
    }

    /// Gets bit at given index, returns `None` when index is out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.length {
            return None;
        }

        Some((self.blocks[index / BITS_IN_BLOCK] >> (index % BITS_IN_BLOCK)) & 1 != 0)
    }

    /// Returns true if bit at given index is set.
    pub fn contains(&self, index: usize) -> bool {
        self.get(index).unwrap_or(false)
    }

    /// Returns true if both vectors have at least one common set bit.
    pub fn intersects(&self, other: &Self) -> bool {
        assert_eq!(self.length, other.length, "bit vectors must have the same length");
        self.blocks.iter().zip(other.blocks.iter()).any(|(x, y)| x & y != 0)
    }

    /// Returns amount of set bits.
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|block| block.count_ones() as usize).sum()
    }

    /// Returns indices of set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().enumerate().flat_map(|(block_idx, &block)| {
            (0..BITS_IN_BLOCK)
                .filter(move |bit_idx| (block >> bit_idx) & 1 != 0)
                .map(move |bit_idx| block_idx * BITS_IN_BLOCK + bit_idx)
        })
    }

    /// Returns length of the vector.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if vector has zero length.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl Display for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for i in 0..self.length {
            write!(f, "{}", if self.contains(i) { 1 } else { 0 })?;
        }
        write!(f, "]")
    }
}
