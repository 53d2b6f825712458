//! Pricing and column generation configuration.

#[cfg(test)]
#[path = "../tests/unit/config_test.rs"]
mod config_test;

use crate::models::{Distance, Load};
use crate::utils::{Float, GenericResult};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read};

/// A full configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Specifies labeling search configuration.
    pub pricing: PricingConfig,
    /// Specifies column generation loop configuration.
    pub generation: GenerationConfig,
}

/// Route limits applied to a complete route.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteLimits {
    /// Max amount of visited stops. Default is 8.
    pub max_visits: usize,
    /// Max route load. Default is 16.
    pub max_capacity: Load,
    /// Max route distance. Default is 3.
    pub max_distance: Distance,
    /// A minimum load of a partial path to be considered for connection. Default is 5.
    pub min_carrier_load: Load,
}

impl Default for RouteLimits {
    fn default() -> Self {
        Self { max_visits: 8, max_capacity: 16., max_distance: 3., min_carrier_load: 5. }
    }
}

/// Specifies how labels are polled from the frontier.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Scheduling {
    /// A single frontier per direction: shortest distance first.
    #[default]
    Global,
    /// A frontier per depot and direction: the least expanded depot goes first.
    DepotFairness,
}

/// Specifies how carriers are considered during loading.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CarrierPolicy {
    /// Any carrier of the route depot which can drive the route.
    #[default]
    LeastViolation,
    /// The first carrier of the route depot which can drive the route, load is clamped to its bounds.
    DepotBound,
}

/// A labeling search configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingConfig {
    /// Complete route limits.
    pub limits: RouteLimits,
    /// A share of route limits available for a single direction. Default is 0.5.
    pub expansion_ratio: Float,
    /// A multiplier of stop dual prices applied to stop values. Default is 1.
    pub dual_multiplier: Float,
    /// A minimum primal price of an emitted order. Default is 0.
    pub min_profit: Float,
    /// Max arc length. Default is max distance multiplied by expansion ratio.
    pub arc_threshold: Option<Distance>,
    /// Frontier scheduling policy.
    pub scheduling: Scheduling,
    /// Carrier selection policy.
    pub carrier_policy: CarrierPolicy,
    /// Log search progress every this amount of expanded labels. Zero disables progress logging.
    pub log_interval: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            limits: RouteLimits::default(),
            expansion_ratio: 0.5,
            dual_multiplier: 1.,
            min_profit: 0.,
            arc_threshold: None,
            scheduling: Scheduling::default(),
            carrier_policy: CarrierPolicy::default(),
            log_interval: 1000,
        }
    }
}

impl PricingConfig {
    /// Returns max arc length.
    pub fn arc_threshold(&self) -> Distance {
        self.arc_threshold.unwrap_or(self.limits.max_distance * self.expansion_ratio)
    }

    /// Returns max load of a single direction path.
    pub fn half_capacity(&self) -> Load {
        self.limits.max_capacity * self.expansion_ratio
    }

    /// Returns max distance of a single direction path.
    pub fn half_distance(&self) -> Distance {
        self.limits.max_distance * self.expansion_ratio
    }

    /// Returns max amount of visits of a single direction path.
    pub fn half_visits(&self) -> usize {
        (self.limits.max_visits as Float * self.expansion_ratio).ceil() as usize
    }

    /// Checks that configuration values are consistent.
    pub fn validate(&self) -> GenericResult<()> {
        let limits = &self.limits;

        if limits.max_visits == 0 {
            return Err("max visits must be positive".into());
        }

        let is_non_negative = |value: Float| value.is_finite() && value >= 0.;

        if !is_non_negative(limits.max_capacity) || !is_non_negative(limits.max_distance) {
            return Err("max capacity and max distance must be non-negative".into());
        }

        if !is_non_negative(limits.min_carrier_load) || limits.min_carrier_load > limits.max_capacity {
            return Err("min carrier load must be in range [0, max capacity]".into());
        }

        if !(self.expansion_ratio > 0. && self.expansion_ratio <= 1.) {
            return Err(format!("expansion ratio must be in range (0, 1], got {}", self.expansion_ratio).into());
        }

        if !self.dual_multiplier.is_finite() || !self.min_profit.is_finite() {
            return Err("dual multiplier and min profit must be finite".into());
        }

        if self.arc_threshold.is_some_and(|threshold| !is_non_negative(threshold)) {
            return Err("arc threshold must be non-negative".into());
        }

        Ok(())
    }
}

/// A column generation loop configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Total time limit in seconds. Default is 160.
    pub time_limit: u64,
    /// Max amount of columns in master problem. Default is 300000.
    pub max_columns: usize,
    /// Max amount of columns generated by one pricing call. Default is 100.
    pub columns_per_iteration: usize,
    /// A share of remaining time given to master problem solve. Default is 0.3.
    pub master_time_share: Float,
    /// Max amount of iterations. Default is unlimited.
    pub max_iterations: Option<usize>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            time_limit: 160,
            max_columns: 300_000,
            columns_per_iteration: 100,
            master_time_share: 0.3,
            max_iterations: None,
        }
    }
}

impl GenerationConfig {
    /// Checks that configuration values are consistent.
    pub fn validate(&self) -> GenericResult<()> {
        if self.columns_per_iteration == 0 {
            return Err("columns per iteration must be positive".into());
        }

        if !(self.master_time_share > 0. && self.master_time_share < 1.) {
            return Err(format!("master time share must be in range (0, 1), got {}", self.master_time_share).into());
        }

        Ok(())
    }
}

/// Reads config from reader and validates it.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    let config: Config = serde_json::from_reader(reader)?;

    config.pricing.validate()?;
    config.generation.validate()?;

    Ok(config)
}
