//! # coolprop-calc
//!
//! Spreadsheet functions for [CoolProp](http://www.coolprop.org/):
//! real-fluid and humid-air properties in SI or engineering units, with
//! every failure returned as a readable cell string instead of an error.
//!
//! ## Highlights
//!
//! * **Forgiving names**: `"temp"`, `"rho"`, `"enthalpy"` map to CoolProp's
//!   `T`, `D`, `H`; unknown codes pass through untouched
//! * **Engineering units**: `CPROP` / `CPROPHA` work in °C, bar and kJ/kg
//! * **Never throws**: missing arguments, text where a number belongs,
//!   engine failures and a missing library all come back as `Error:` text
//! * **Thread-safe**: a global mutex serializes calls into CoolProp, and
//!   each failure carries the diagnostic read under that same lock
//! * **Packaging**: `oxt-pack` bundles the functions as a LibreOffice extension
//!
//! ## Quick example
//!
//! ```no_run
//! use coolprop_calc::Calculator;
//!
//! // COOLPROP_PATH is read from the environment or a .env file.
//! let calc = Calculator::from_env();
//!
//! // Enthalpy of water at 25 °C, 1 bar, in kJ/kg
//! let h = calc.cprop("H", "T", 25.0, "P", 1.0, "Water");
//! println!("h = {h}");
//!
//! // Humidity ratio of air at 25 °C, 1.01325 bar, 50 % RH
//! let w = calc.cpropha("W", "T", 25.0, "P", 1.01325, "RH", 0.5);
//! println!("W = {w}");
//! ```
//!
//! ## Typed API
//!
//! The cell functions are thin adapters over typed methods that return
//! [`Result`]:
//!
//! ```no_run
//! use coolprop_calc::{Calculator, Units};
//!
//! let calc = Calculator::from_env();
//! let t_sat = calc.props(Units::Engineering, "T", "P", 1.01325, "Q", 0.0, "Water")?;
//! # Ok::<(), coolprop_calc::CalcError>(())
//! ```

// ── Internal modules ─────────────────────────────────────────────────
pub mod backend;
pub mod calc;
pub mod engine;
pub mod error;
pub mod names;
pub mod package;
pub mod registry;
pub mod value;

// ── Public re-exports ────────────────────────────────────────────────
pub use backend::CoolPropBackend;
pub use calc::{Calculator, Units, mixture_string};
pub use engine::{PropertyEngine, is_failure};
pub use error::{CalcError, Result};
pub use value::CellValue;

pub use converter::{Converter, EnergyUnit, PressUnit, RuleSet, TempUnit, UnitSystem};
