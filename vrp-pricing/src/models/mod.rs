//! A collection of models to represent the pricing problem: stops, depots, carriers, dual prices
//! and priced routes (orders).

mod common;
pub use self::common::*;

mod problem;
pub use self::problem::*;

pub mod duals;
#[doc(hidden)]
pub mod examples;
pub mod fleet;
pub mod graph;
pub mod order;
