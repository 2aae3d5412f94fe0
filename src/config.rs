// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `SizingGraph`.

/// The imaginary step used for complex-step differentiation, unless
/// configured otherwise.
pub const DEFAULT_COMPLEX_STEP: f64 = 1e-40;

/// Configuration options for the `SizingGraph`.
#[derive(Clone, Debug)]
pub struct SizingGraphConfig {
    /// The size of the imaginary perturbation used to compute partial
    /// derivatives.  Complex-step derivatives don't suffer from subtractive
    /// cancellation, so this can be made arbitrarily small.
    pub complex_step: f64,

    /// Whether to allow design variables that are not consumed by any
    /// component.  When this is `false`, such declarations are rejected as
    /// configuration errors.
    pub allow_unused_design_variables: bool,
}

impl Default for SizingGraphConfig {
    fn default() -> Self {
        Self {
            complex_step: DEFAULT_COMPLEX_STEP,
            allow_unused_design_variables: false,
        }
    }
}
