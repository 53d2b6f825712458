//! This module contains data structures.

mod bitvec;
pub use self::bitvec::BitVec;
