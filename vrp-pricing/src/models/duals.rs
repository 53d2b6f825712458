//! Dual prices (shadow prices) of master problem constraints.

#[cfg(test)]
#[path = "../../tests/unit/models/duals_test.rs"]
mod duals_test;

use crate::models::{CarrierId, Problem, StopId};
use crate::utils::{Float, GenericError, GenericResult};
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifies a master problem constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Total dispatch to the stop is limited. Named as `F{stop}`.
    StopCapacity(StopId),
    /// Carrier usage is limited. Named as `C{carrier}`.
    CarrierUsage(CarrierId),
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::StopCapacity(stop) => write!(f, "F{stop}"),
            Constraint::CarrierUsage(carrier) => write!(f, "C{carrier}"),
        }
    }
}

impl FromStr for Constraint {
    type Err = GenericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_id =
            |id: &str| id.parse::<usize>().map_err(|_| GenericError::from(format!("invalid constraint: '{s}'")));

        match s.split_at_checked(1) {
            Some(("F", id)) => parse_id(id).map(Constraint::StopCapacity),
            Some(("C", id)) => parse_id(id).map(Constraint::CarrierUsage),
            _ => Err(format!("invalid constraint: '{s}'").into()),
        }
    }
}

/// Keeps dual prices of master problem constraints.
#[derive(Clone, Debug, Default)]
pub struct DualPrices {
    values: FxHashMap<Constraint, Float>,
}

impl DualPrices {
    /// Creates dual prices with zero value for every constraint of the problem.
    pub fn zero(problem: &Problem) -> Self {
        Self { values: problem.constraints().map(|(constraint, _)| (constraint, 0.)).collect() }
    }

    /// Sets dual price of the constraint.
    pub fn set(&mut self, constraint: Constraint, value: Float) {
        self.values.insert(constraint, value);
    }

    /// Sets dual price of the constraint.
    pub fn with(mut self, constraint: Constraint, value: Float) -> Self {
        self.set(constraint, value);
        self
    }

    /// Returns dual price of the constraint. Absence of the value is an error: pricing without
    /// complete duals produces wrong reduced costs.
    pub fn get(&self, constraint: Constraint) -> GenericResult<Float> {
        self.values.get(&constraint).copied().ok_or_else(|| format!("missing dual price for '{constraint}'").into())
    }

    /// Returns amount of known dual prices.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no dual prices are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Constraint, Float)> for DualPrices {
    fn from_iter<T: IntoIterator<Item = (Constraint, Float)>>(iter: T) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
