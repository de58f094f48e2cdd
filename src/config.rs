//! Integrator configuration.
//!
//! The configuration is split the same way the lab input files are:
//! [`TimeVars`] for the time interval and initial step, [`AdaptVars`] for
//! the step-size controller. Both derive `serde` traits so a caller can load
//! them from whatever format it likes; the integrator itself never parses
//! anything and treats the values as already validated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time interval and initial (or fixed) step size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeVars {
    /// Start of the integration interval
    pub tstart: f64,
    /// End of the integration interval
    pub tend: f64,
    /// Initial step for the adaptive driver, constant step for the fixed one
    pub dt: f64,
}

impl TimeVars {
    /// Create a time specification
    pub fn new(tstart: f64, tend: f64, dt: f64) -> Self {
        Self { tstart, tend, dt }
    }
}

/// Step-size controller parameters.
///
/// After each attempt the controller computes
/// `dtchange = s * errtest^(-1/5)`. A rejected step is shrunk by `dtchange`
/// clamped to `[dtfailmin, dtfailmax]`; an accepted step grows (or shrinks)
/// by `dtchange` capped at `dtpassmax`, but only when `|1 - dtchange|`
/// exceeds the `dtpassmin` deadband.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptVars {
    /// Deadband: accepted steps keep their size unless the change exceeds this
    pub dtpassmin: f64,
    /// Largest growth factor after an accepted step
    pub dtpassmax: f64,
    /// Smallest shrink factor after a rejected step
    pub dtfailmin: f64,
    /// Largest shrink factor after a rejected step
    pub dtfailmax: f64,
    /// Safety factor, 0 < s < 1
    pub s: f64,
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Maximum number of outer steps
    pub maxsteps: u64,
    /// Maximum number of rejected attempts on a single step
    pub maxfail: u64,
}

impl Default for AdaptVars {
    fn default() -> Self {
        Self {
            dtpassmin: 0.1,
            dtpassmax: 5.0,
            dtfailmin: 0.1,
            dtfailmax: 0.5,
            s: 0.9,
            rtol: 1.0e-5,
            atol: 1.0e-5,
            maxsteps: 2000,
            maxfail: 60,
        }
    }
}

impl AdaptVars {
    /// Default controller with the given tolerances
    pub fn with_tolerances(rtol: f64, atol: f64) -> Self {
        Self {
            rtol,
            atol,
            ..Self::default()
        }
    }
}

/// How the adaptive driver treats the step that lands exactly on `tend`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStepPolicy {
    /// The landing step is committed whatever its error estimate
    #[default]
    Unconditional,
    /// The landing step passes through the normal acceptance test and may
    /// be rejected and shrunk like any other step
    Tested,
}

/// Complete, immutable integrator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    /// Time interval and step size
    pub timevars: TimeVars,
    /// Step-size controller
    #[serde(default)]
    pub adaptvars: AdaptVars,
    /// Treatment of the landing step
    #[serde(default)]
    pub final_step: FinalStepPolicy,
}

impl IntegratorConfig {
    /// Configuration with the default controller
    pub fn new(timevars: TimeVars) -> Self {
        Self {
            timevars,
            adaptvars: AdaptVars::default(),
            final_step: FinalStepPolicy::default(),
        }
    }

    /// Replace the controller parameters
    pub fn with_adaptvars(mut self, adaptvars: AdaptVars) -> Self {
        self.adaptvars = adaptvars;
        self
    }

    /// Replace the landing-step policy
    pub fn with_final_step(mut self, final_step: FinalStepPolicy) -> Self {
        self.final_step = final_step;
        self
    }

    /// Check the configuration for values the integrator cannot work with.
    ///
    /// The integrator does not call this; it is for the code that builds or
    /// loads the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let TimeVars { tstart, tend, dt } = self.timevars;
        for (name, value) in [("tstart", tstart), ("tend", tend), ("dt", dt)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if tend <= tstart {
            return Err(ConfigError::InvertedTimeBounds { tstart, tend });
        }
        if dt <= 0.0 {
            return Err(ConfigError::NonPositive { name: "dt", value: dt });
        }

        let a = &self.adaptvars;
        for (name, value) in [
            ("rtol", a.rtol),
            ("atol", a.atol),
            ("dtpassmax", a.dtpassmax),
            ("dtfailmin", a.dtfailmin),
            ("dtfailmax", a.dtfailmax),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !a.dtpassmin.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "dtpassmin",
                value: a.dtpassmin,
            });
        }
        if a.dtpassmin < 0.0 {
            return Err(ConfigError::Negative {
                name: "dtpassmin",
                value: a.dtpassmin,
            });
        }
        if !(a.s > 0.0 && a.s < 1.0) {
            return Err(ConfigError::SafetyFactor { s: a.s });
        }
        if a.dtfailmin > a.dtfailmax {
            return Err(ConfigError::InvertedBounds {
                min_name: "dtfailmin",
                min: a.dtfailmin,
                max_name: "dtfailmax",
                max: a.dtfailmax,
            });
        }
        if a.dtfailmax >= 1.0 {
            return Err(ConfigError::FailFactorTooLarge {
                dtfailmax: a.dtfailmax,
            });
        }
        if a.maxsteps == 0 {
            return Err(ConfigError::NoStepBudget);
        }
        Ok(())
    }
}

/// Configuration rejected by [`IntegratorConfig::validate`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value is NaN or infinite
    #[error("{name} = {value} is not finite")]
    NonFinite {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// A value that must be strictly positive is not
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// A value that must not be negative is
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// `tend` does not lie after `tstart`
    #[error("tend ({tend}) must be greater than tstart ({tstart})")]
    InvertedTimeBounds {
        /// Start time
        tstart: f64,
        /// End time
        tend: f64,
    },
    /// Safety factor outside (0, 1)
    #[error("safety factor s must lie in (0, 1), got {s}")]
    SafetyFactor {
        /// Offending value
        s: f64,
    },
    /// A lower bound exceeds its upper bound
    #[error("{min_name} ({min}) must not exceed {max_name} ({max})")]
    InvertedBounds {
        /// Name of the lower bound
        min_name: &'static str,
        /// Lower bound
        min: f64,
        /// Name of the upper bound
        max_name: &'static str,
        /// Upper bound
        max: f64,
    },
    /// A rejected step would not shrink
    #[error("dtfailmax must be below 1 so rejected steps shrink, got {dtfailmax}")]
    FailFactorTooLarge {
        /// Offending value
        dtfailmax: f64,
    },
    /// `maxsteps` is zero
    #[error("maxsteps must be at least 1")]
    NoStepBudget,
}
