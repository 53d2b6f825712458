//! This module reimports commonly used types.

pub use crate::config::{CarrierPolicy, Config, GenerationConfig, PricingConfig, RouteLimits, Scheduling, read_config};

pub use crate::generation::{Column, ColumnGeneration, MasterProblem};

pub use crate::models::Problem;
pub use crate::models::duals::{Constraint, DualPrices};
pub use crate::models::order::{Order, Route};

pub use crate::pricing::{Pricer, PricingResult};

pub use crate::utils::{Environment, GenericError, GenericResult, InfoLogger};
