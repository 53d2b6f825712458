//! This module contains generic algorithms and data structures used by the pricing engine.

pub mod structures;
