//! This crate contains a pricing engine for column generation over depot based delivery routes.
//!
//! # Overview
//!
//! A master problem (an external LP/MIP solver) selects a profitable subset of routes, called
//! **orders**, subject to per-stop capacity and per-carrier usage limits. The pricing subproblem
//! implemented here repeatedly searches for new routes with a positive reduced cost under the
//! current dual prices and feeds them back to the master.
//!
//! The search is a bidirectional resource constrained shortest path labeling:
//!
//! - every depot seeds one forward and one backward label;
//! - labels are extended over stop arcs while half of the route budget (visits, load, distance)
//!   is respected, and an exact visited-set dominance rule prunes equivalent partial paths;
//! - labels which reach the virtual sink are connected with opposite direction labels of the same
//!   depot (meet in the middle), the resulting closed route is deduplicated by its depot and
//!   visited set and passed to loading, which chooses dispatch quantities and a carrier.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vrp_pricing::prelude::*;
//! use vrp_pricing::models::examples::{create_example_config, create_example_problem};
//!
//! let problem = Arc::new(create_example_problem().unwrap());
//! let config = create_example_config();
//! let mut pricer = Pricer::new(problem.clone(), config, Arc::new(Environment::silent())).unwrap();
//!
//! let duals = DualPrices::zero(&problem);
//! let result = pricer.price(&duals, 10, 100).unwrap();
//!
//! assert!(!result.orders.is_empty());
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod config;
pub mod generation;
pub mod models;
pub mod prelude;
pub mod pricing;
pub mod utils;
