#[cfg(test)]
#[path = "../../tests/unit/utils/environment_test.rs"]
mod environment_test;

use crate::utils::{Float, Timer};
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the pricer.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Specifies a computational quota for a long running computation.
/// The main purpose is to allow to stop algorithm in reaction to external events such
/// as user cancellation, timer, etc.
pub trait Quota {
    /// Returns true when computation should be stopped.
    fn is_reached(&self) -> bool;
}

/// A time quota.
pub struct TimeQuota {
    start: Timer,
    limit_in_secs: Float,
}

impl TimeQuota {
    /// Creates a new instance of `TimeQuota`.
    pub fn new(limit_in_secs: Float) -> Self {
        Self { start: Timer::start(), limit_in_secs }
    }

    /// Returns seconds left before the quota is reached.
    pub fn remaining_secs(&self) -> Float {
        (self.limit_in_secs - self.start.elapsed_secs_as_float()).max(0.)
    }
}

impl Quota for TimeQuota {
    fn is_reached(&self) -> bool {
        self.start.elapsed_secs_as_float() > self.limit_in_secs
    }
}

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// An external quota which can stop any computation, e.g. user cancellation.
    pub quota: Option<Arc<dyn Quota + Send + Sync>>,

    /// Information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment` with the given logger and no quota.
    pub fn new(logger: InfoLogger) -> Self {
        Self { quota: None, logger }
    }

    /// Creates an instance of `Environment` which discards all log messages.
    pub fn silent() -> Self {
        Self::new(Arc::new(|_| {}))
    }

    /// Sets an external quota.
    pub fn with_quota(mut self, quota: Arc<dyn Quota + Send + Sync>) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Returns true if external quota is specified and reached.
    pub fn is_quota_reached(&self) -> bool {
        self.quota.as_ref().is_some_and(|quota| quota.is_reached())
    }

    /// Writes a message using the logger.
    pub fn log(&self, message: &str) {
        (self.logger)(message)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Arc::new(|msg: &str| println!("{msg}")))
    }
}
