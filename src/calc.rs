//! The calculation facade: validate, normalize, convert, call the
//! engine, check for failure, convert back.
//!
//! Two layers live here.  The typed methods ([`Calculator::props`],
//! [`Calculator::ha_props`], …) take Rust values and return
//! [`Result`]; the cell methods ([`Calculator::cprop_e`],
//! [`Calculator::cpropha_si`], …) take loosely typed [`CellValue`]
//! arguments the way a spreadsheet passes them and always return a
//! [`CellValue`], rendering any failure as an `Error:` string.

use std::panic::{self, AssertUnwindSafe};

use converter::{Converter, RuleSet};
use tracing::warn;

use crate::backend::{COOLPROP_PATH_VAR, CoolPropBackend};
use crate::engine::{PropertyEngine, UNKNOWN_FAILURE, is_failure};
use crate::error::*;
use crate::names;
use crate::value::CellValue;

/// Units the caller's input and output values are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// K, Pa, J/kg; values go to the engine unchanged.
    Si,
    /// °C, bar, kJ/kg.
    Engineering,
}

impl Units {
    fn converter(self, rules: RuleSet) -> Converter {
        match self {
            Units::Si => Converter::identity(rules),
            Units::Engineering => Converter::engineering(rules),
        }
    }
}

/// Entry point for every property call.
///
/// Construction never fails: when CoolProp cannot be loaded the
/// calculator is still created, and every engine-backed operation
/// returns the `ERROR: CoolProp not installed.` message.
///
/// ```
/// use coolprop_calc::Calculator;
///
/// let calc = Calculator::unavailable("no library in this doctest");
/// let h = calc.cprop("H", "T", 25.0, "P", 1.0, "Water");
/// assert!(h.is_error());
/// ```
pub struct Calculator {
    engine: Result<Box<dyn PropertyEngine>>,
}

impl Calculator {
    // ================================================================
    //  Constructors
    // ================================================================

    /// Wrap an already-loaded engine.
    pub fn new(engine: impl PropertyEngine + 'static) -> Self {
        Self {
            engine: Ok(Box::new(engine)),
        }
    }

    /// Load CoolProp from the environment (see [`CoolPropBackend::from_env`]).
    pub fn from_env() -> Self {
        match CoolPropBackend::from_env() {
            Ok(backend) => Self::new(backend),
            Err(e) => Self { engine: Err(e) },
        }
    }

    /// A calculator with no engine; every engine call reports `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            engine: Err(CalcError::EngineUnavailable(reason.into())),
        }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_ok()
    }

    fn engine(&self) -> Result<&dyn PropertyEngine> {
        self.engine.as_deref().map_err(Clone::clone)
    }

    // ================================================================
    //  Typed operations
    // ================================================================

    /// Real-fluid property from two independent inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn props(
        &self,
        units: Units,
        output: &str,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        fluid: &str,
    ) -> Result<f64> {
        let engine = self.engine()?;
        let output = required(output, "output")?;
        let name1 = required(name1, "name1")?;
        let name2 = required(name2, "name2")?;
        let fluid = required(fluid, "fluid")?;

        guarded(|| {
            let output = names::normalize_fluid_property(output);
            let name1 = names::normalize_fluid_property(name1);
            let name2 = names::normalize_fluid_property(name2);
            let fluid = names::normalize_fluid(fluid);

            let conv = units.converter(RuleSet::Fluid);
            let x = engine.props_si(
                output,
                name1,
                conv.to_si(name1, value1),
                name2,
                conv.to_si(name2, value2),
                fluid,
            )?;
            Ok(conv.from_si(output, checked(engine, x)?))
        })
    }

    /// Humid-air property from three independent inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn ha_props(
        &self,
        units: Units,
        output: &str,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        name3: &str,
        value3: f64,
    ) -> Result<f64> {
        let engine = self.engine()?;
        let output = required(output, "output")?;
        let name1 = required(name1, "name1")?;
        let name2 = required(name2, "name2")?;
        let name3 = required(name3, "name3")?;

        guarded(|| {
            let output = names::normalize_humid_air_property(output);
            let name1 = names::normalize_humid_air_property(name1);
            let name2 = names::normalize_humid_air_property(name2);
            let name3 = names::normalize_humid_air_property(name3);

            let conv = units.converter(RuleSet::HumidAir);
            let x = engine.ha_props_si(
                output,
                name1,
                conv.to_si(name1, value1),
                name2,
                conv.to_si(name2, value2),
                name3,
                conv.to_si(name3, value3),
            )?;
            Ok(conv.from_si(output, checked(engine, x)?))
        })
    }

    /// State-independent property such as `Tcrit`, `pcrit` or `M`.
    pub fn trivial_props(&self, units: Units, output: &str, fluid: &str) -> Result<f64> {
        let engine = self.engine()?;
        let output = required(output, "output")?;
        let fluid = required(fluid, "fluid")?;

        guarded(|| {
            let output = names::normalize_fluid_property(output);
            let fluid = names::normalize_fluid(fluid);
            let conv = units.converter(RuleSet::Fluid);
            let x = engine.props1_si(output, fluid)?;
            Ok(conv.from_si(output, checked(engine, x)?))
        })
    }

    /// Phase name (`liquid`, `twophase`, `supercritical_gas`, …).
    pub fn phase_name(
        &self,
        units: Units,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        fluid: &str,
    ) -> Result<String> {
        let engine = self.engine()?;
        let name1 = required(name1, "name1")?;
        let name2 = required(name2, "name2")?;
        let fluid = required(fluid, "fluid")?;

        guarded(|| {
            let name1 = names::normalize_fluid_property(name1);
            let name2 = names::normalize_fluid_property(name2);
            let fluid = names::normalize_fluid(fluid);
            let conv = units.converter(RuleSet::Fluid);
            let phase = engine.phase_si(
                name1,
                conv.to_si(name1, value1),
                name2,
                conv.to_si(name2, value2),
                fluid,
            )?;
            non_empty(engine, phase)
        })
    }

    /// Global engine parameter, e.g. `version` or `FluidsList`.
    pub fn global_param_string(&self, param: &str) -> Result<String> {
        let engine = self.engine()?;
        let param = required(param, "param")?;
        guarded(|| non_empty(engine, engine.global_param(param)?))
    }

    /// Per-fluid parameter, e.g. `CAS` or `aliases`.
    pub fn fluid_param_string(&self, fluid: &str, param: &str) -> Result<String> {
        let engine = self.engine()?;
        let fluid = required(fluid, "fluid")?;
        let param = required(param, "param")?;
        guarded(|| {
            let fluid = names::normalize_fluid(fluid);
            non_empty(engine, engine.fluid_param(fluid, param)?)
        })
    }

    // ================================================================
    //  Cell operations: real fluids
    // ================================================================

    /// `CPROP_SI`: inputs and result in SI units.
    pub fn cprop_si(
        &self,
        output: impl Into<CellValue>,
        name1: impl Into<CellValue>,
        value1: impl Into<CellValue>,
        name2: impl Into<CellValue>,
        value2: impl Into<CellValue>,
        fluid: impl Into<CellValue>,
    ) -> CellValue {
        let args = [output.into(), name1.into(), value1.into(), name2.into(), value2.into(), fluid.into()];
        self.fluid_cell(Units::Si, &args)
    }

    /// `CPROP_E`: inputs and result in engineering units.
    pub fn cprop_e(
        &self,
        output: impl Into<CellValue>,
        name1: impl Into<CellValue>,
        value1: impl Into<CellValue>,
        name2: impl Into<CellValue>,
        value2: impl Into<CellValue>,
        fluid: impl Into<CellValue>,
    ) -> CellValue {
        let args = [output.into(), name1.into(), value1.into(), name2.into(), value2.into(), fluid.into()];
        self.fluid_cell(Units::Engineering, &args)
    }

    /// `CPROP`: same as [`cprop_e`](Self::cprop_e).
    pub fn cprop(
        &self,
        output: impl Into<CellValue>,
        name1: impl Into<CellValue>,
        value1: impl Into<CellValue>,
        name2: impl Into<CellValue>,
        value2: impl Into<CellValue>,
        fluid: impl Into<CellValue>,
    ) -> CellValue {
        self.cprop_e(output, name1, value1, name2, value2, fluid)
    }

    pub(crate) fn fluid_cell(&self, units: Units, args: &[CellValue; 6]) -> CellValue {
        let [output, name1, value1, name2, value2, fluid] = args;
        self.cell(|| {
            let (output, name1, name2, fluid) = (
                output.name_arg("output")?,
                name1.name_arg("name1")?,
                name2.name_arg("name2")?,
                fluid.name_arg("fluid")?,
            );
            let (value1, value2) = (value1.number_arg("value1")?, value2.number_arg("value2")?);
            self.props(units, output, name1, value1, name2, value2, fluid)
        })
    }

    // ================================================================
    //  Cell operations: humid air
    // ================================================================

    /// `CPROPHA_SI`: inputs and result in SI units.
    #[allow(clippy::too_many_arguments)]
    pub fn cpropha_si(
        &self,
        output: impl Into<CellValue>,
        name1: impl Into<CellValue>,
        value1: impl Into<CellValue>,
        name2: impl Into<CellValue>,
        value2: impl Into<CellValue>,
        name3: impl Into<CellValue>,
        value3: impl Into<CellValue>,
    ) -> CellValue {
        let args = [
            output.into(), name1.into(), value1.into(), name2.into(), value2.into(), name3.into(), value3.into(),
        ];
        self.humid_air_cell(Units::Si, &args)
    }

    /// `CPROPHA_E`: inputs and result in engineering units.
    #[allow(clippy::too_many_arguments)]
    pub fn cpropha_e(
        &self,
        output: impl Into<CellValue>,
        name1: impl Into<CellValue>,
        value1: impl Into<CellValue>,
        name2: impl Into<CellValue>,
        value2: impl Into<CellValue>,
        name3: impl Into<CellValue>,
        value3: impl Into<CellValue>,
    ) -> CellValue {
        let args = [
            output.into(), name1.into(), value1.into(), name2.into(), value2.into(), name3.into(), value3.into(),
        ];
        self.humid_air_cell(Units::Engineering, &args)
    }

    /// `CPROPHA`: same as [`cpropha_e`](Self::cpropha_e).
    #[allow(clippy::too_many_arguments)]
    pub fn cpropha(
        &self,
        output: impl Into<CellValue>,
        name1: impl Into<CellValue>,
        value1: impl Into<CellValue>,
        name2: impl Into<CellValue>,
        value2: impl Into<CellValue>,
        name3: impl Into<CellValue>,
        value3: impl Into<CellValue>,
    ) -> CellValue {
        self.cpropha_e(output, name1, value1, name2, value2, name3, value3)
    }

    pub(crate) fn humid_air_cell(&self, units: Units, args: &[CellValue; 7]) -> CellValue {
        let [output, name1, value1, name2, value2, name3, value3] = args;
        self.cell(|| {
            let (output, name1, name2, name3) = (
                output.name_arg("output")?,
                name1.name_arg("name1")?,
                name2.name_arg("name2")?,
                name3.name_arg("name3")?,
            );
            let (value1, value2, value3) = (
                value1.number_arg("value1")?,
                value2.number_arg("value2")?,
                value3.number_arg("value3")?,
            );
            self.ha_props(units, output, name1, value1, name2, value2, name3, value3)
        })
    }

    // ================================================================
    //  Cell operations: trivial properties, phase, parameters
    // ================================================================

    /// `PROPS1_SI`: trivial property in SI units.
    pub fn props1_si(&self, output: impl Into<CellValue>, fluid: impl Into<CellValue>) -> CellValue {
        self.props1_cell(Units::Si, &[output.into(), fluid.into()])
    }

    /// `PROPS1`: trivial property in engineering units.
    pub fn props1(&self, output: impl Into<CellValue>, fluid: impl Into<CellValue>) -> CellValue {
        self.props1_cell(Units::Engineering, &[output.into(), fluid.into()])
    }

    pub(crate) fn props1_cell(&self, units: Units, args: &[CellValue; 2]) -> CellValue {
        let [output, fluid] = args;
        self.cell(|| {
            let (output, fluid) = (output.name_arg("output")?, fluid.name_arg("fluid")?);
            self.trivial_props(units, output, fluid)
        })
    }

    /// `PHASE_SI`: phase name from SI inputs.
    pub fn phase_si(
        &self,
        name1: impl Into<CellValue>,
        value1: impl Into<CellValue>,
        name2: impl Into<CellValue>,
        value2: impl Into<CellValue>,
        fluid: impl Into<CellValue>,
    ) -> CellValue {
        let args = [name1.into(), value1.into(), name2.into(), value2.into(), fluid.into()];
        self.phase_cell(Units::Si, &args)
    }

    /// `PHASE`: phase name from engineering-unit inputs.
    pub fn phase(
        &self,
        name1: impl Into<CellValue>,
        value1: impl Into<CellValue>,
        name2: impl Into<CellValue>,
        value2: impl Into<CellValue>,
        fluid: impl Into<CellValue>,
    ) -> CellValue {
        let args = [name1.into(), value1.into(), name2.into(), value2.into(), fluid.into()];
        self.phase_cell(Units::Engineering, &args)
    }

    pub(crate) fn phase_cell(&self, units: Units, args: &[CellValue; 5]) -> CellValue {
        let [name1, value1, name2, value2, fluid] = args;
        self.cell(|| {
            let (name1, name2, fluid) = (
                name1.name_arg("name1")?,
                name2.name_arg("name2")?,
                fluid.name_arg("fluid")?,
            );
            let (value1, value2) = (value1.number_arg("value1")?, value2.number_arg("value2")?);
            self.phase_name(units, name1, value1, name2, value2, fluid)
        })
    }

    /// `GLOBALPARAM`
    pub fn global_param(&self, param: impl Into<CellValue>) -> CellValue {
        let param = param.into();
        self.cell(|| self.global_param_string(param.name_arg("param")?))
    }

    /// `FLUIDPARAM`
    pub fn fluid_param(&self, fluid: impl Into<CellValue>, param: impl Into<CellValue>) -> CellValue {
        let (fluid, param) = (fluid.into(), param.into());
        self.cell(|| self.fluid_param_string(fluid.name_arg("fluid")?, param.name_arg("param")?))
    }

    // ================================================================
    //  Engine-independent helpers
    // ================================================================

    /// `MIXTURESTRING`: build `HEOS::A[x]&B[y]` from parallel ranges.
    ///
    /// Needs no engine, so it works even when CoolProp is missing.
    pub fn mixture_string(&self, components: &[CellValue], fractions: &[CellValue]) -> CellValue {
        mixture_string(components, fractions).into()
    }

    /// `CPROPDIAG`: where the library was looked for, and whether it loaded.
    pub fn diagnostics(&self) -> CellValue {
        let mut out = String::from("CoolProp library search paths:\n");
        let mut n = 0;
        if let Ok(path) = std::env::var(COOLPROP_PATH_VAR) {
            n += 1;
            let found = std::path::Path::new(&path).exists();
            out += &format!("{n}. {COOLPROP_PATH_VAR}={path} - {}\n", found_label(found));
        }
        for (candidate, found) in CoolPropBackend::search_report() {
            n += 1;
            out += &format!("{n}. {} - {}\n", candidate.display(), found_label(found));
        }

        out += "\nEngine: ";
        match self.engine() {
            Ok(engine) => {
                let version = engine
                    .global_param("version")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| "unknown".into());
                out += &format!("loaded (CoolProp {version})");
            }
            Err(e) => out += &format!("not loaded ({e})"),
        }
        CellValue::Text(out)
    }

    /// Availability gate shared by every engine-backed cell operation.
    fn cell<T: Into<CellValue>>(&self, op: impl FnOnce() -> Result<T>) -> CellValue {
        match self.engine() {
            Err(e) => CellValue::Text(e.to_string()),
            Ok(_) => op().into(),
        }
    }
}

/// Build a CoolProp mixture identifier from component names and mole
/// fractions.  Blank component cells are skipped.
pub fn mixture_string(components: &[CellValue], fractions: &[CellValue]) -> Result<String> {
    if components.len() != fractions.len() {
        return Err(CalcError::InvalidInput(format!(
            "number of components ({}) must match number of fractions ({})",
            components.len(),
            fractions.len()
        )));
    }
    if components.is_empty() {
        return Err(CalcError::InvalidInput("at least one component is required".into()));
    }

    let mut parts = Vec::with_capacity(components.len());
    for (i, (component, fraction)) in components.iter().zip(fractions).enumerate() {
        if component.is_blank() {
            continue;
        }
        let name = component.to_string();
        let x = fraction.as_number().ok_or_else(|| {
            CalcError::InvalidInput(format!("fraction at position {} is not a number", i + 1))
        })?;
        if !(0.0..=1.0).contains(&x) {
            return Err(CalcError::InvalidInput(format!(
                "fraction {x} at position {} is out of range [0, 1]",
                i + 1
            )));
        }
        parts.push(format!("{}[{x}]", name.trim()));
    }

    if parts.is_empty() {
        return Err(CalcError::InvalidInput("no valid components found".into()));
    }
    Ok(format!("HEOS::{}", parts.join("&")))
}

// ── Helpers ─────────────────────────────────────────────────────────

fn required<'a>(s: &'a str, what: &'static str) -> Result<&'a str> {
    match s.trim() {
        "" => Err(CalcError::MissingArgument(what)),
        t => Ok(t),
    }
}

fn found_label(found: bool) -> &'static str {
    if found { "FOUND" } else { "NOT FOUND" }
}

/// Sentinel check: ±1e308 and NaN become `EngineFailure` carrying the
/// engine's own diagnostic.
fn checked(engine: &dyn PropertyEngine, x: f64) -> Result<f64> {
    if is_failure(x) {
        return Err(engine_failure(engine));
    }
    Ok(x)
}

fn non_empty(engine: &dyn PropertyEngine, s: String) -> Result<String> {
    match s.trim() {
        "" => Err(engine_failure(engine)),
        t => Ok(t.to_string()),
    }
}

fn engine_failure(engine: &dyn PropertyEngine) -> CalcError {
    let msg = engine
        .last_error()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_FAILURE.into());
    warn!(error = %msg, "engine reported failure");
    CalcError::EngineFailure(msg)
}

/// Run an engine interaction, turning a panic into an `Engine` error so
/// that nothing escapes to the host.
fn guarded<T>(op: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "engine call panicked".into());
        warn!(error = %msg, "engine call panicked");
        Err(CalcError::Engine(msg))
    })
}
