//! The seam between the calculator and the property engine.

use crate::error::Result;

/// Magnitude at or above which CoolProp signals failure (`_HUGE`).
pub const FAILURE_SENTINEL: f64 = 1.0e308;

/// Message used when the engine fails without saying why.
pub const UNKNOWN_FAILURE: &str = "Unknown CoolProp error";

/// The external property engine, as the calculator sees it.
///
/// All values are SI.  An engine should report a failed call as
/// `Err(CalcError::EngineFailure(diagnostic))`, with the diagnostic read
/// in the same critical section as the call.  An `Ok` holding a sentinel
/// (see [`is_failure`]) or an empty string is also accepted; the
/// calculator then falls back to [`last_error`](PropertyEngine::last_error),
/// which another thread may have overwritten by then.
pub trait PropertyEngine: Send + Sync {
    /// Real-fluid property from two independent inputs.
    fn props_si(
        &self,
        output: &str,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        fluid: &str,
    ) -> Result<f64>;

    /// Humid-air property from three independent inputs.
    #[allow(clippy::too_many_arguments)]
    fn ha_props_si(
        &self,
        output: &str,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        name3: &str,
        value3: f64,
    ) -> Result<f64>;

    /// Trivial (state-independent) property, e.g. `Tcrit` or `M`.
    fn props1_si(&self, output: &str, fluid: &str) -> Result<f64>;

    /// Phase name at a state point; empty means failure.
    fn phase_si(
        &self,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        fluid: &str,
    ) -> Result<String>;

    /// Global parameter string (`version`, `gitrevision`, `FluidsList`, …).
    fn global_param(&self, param: &str) -> Result<String>;

    /// Fluid parameter string (`CAS`, `aliases`, `REFPROP_name`, …).
    fn fluid_param(&self, fluid: &str, param: &str) -> Result<String>;

    /// The engine's most recent diagnostic, if any.
    fn last_error(&self) -> Option<String>;
}

/// `true` if `x` is one of the engine's failure sentinels.
pub fn is_failure(x: f64) -> bool {
    x.is_nan() || x.abs() >= FAILURE_SENTINEL
}
