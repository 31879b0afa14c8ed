//! Unit conversion for CoolProp values.
//!
//! CoolProp works strictly in SI: **K, Pa, J/kg, J/(kg·K)**.  This crate
//! converts values keyed by their canonical property code (`"T"`,
//! `"P"`, `"H"`, …) between SI and whatever the caller prefers
//! (engineering units by default: °C, bar, kJ/kg).
//!
//! Only three quantities ever need scaling: temperature, pressure and
//! specific energy (enthalpy, internal energy, entropy, heat capacity).
//! Codes that are not in a [`RuleSet`] pass through untouched; quality,
//! phase indices, humidity ratio and dimensionless numbers are already
//! unit-free.
//!
//! # Presets
//!
//! | Preset          | T   | P   | H, S, Cp |
//! |-----------------|-----|-----|----------|
//! | `si()`          | K   | Pa  | J/kg     |
//! | `engineering()` | °C  | bar | kJ/kg    |
//!
//! ```
//! use converter::{Converter, RuleSet};
//!
//! let conv = Converter::engineering(RuleSet::Fluid);
//! assert_eq!(conv.to_si("T", 0.0), 273.15);
//! assert_eq!(conv.to_si("P", 1.0), 1e5);
//! assert_eq!(conv.from_si("H", 2500e3), 2500.0);
//! assert_eq!(conv.to_si("Q", 0.5), 0.5);
//! ```

// ────────────────────────────────────────────────────────────────────
//  Unit enums
// ────────────────────────────────────────────────────────────────────

/// Temperature unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempUnit {
    /// Kelvin (SI)
    Kelvin,
    /// Degrees Celsius
    Celsius,
}

/// Pressure unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressUnit {
    /// Pascal (SI)
    Pa,
    /// Bar (1 bar = 1e5 Pa)
    Bar,
}

/// Specific energy unit, also used for entropy and heat capacity
/// (the temperature part of J/(kg·K) is a difference and never offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyUnit {
    /// J/kg (SI)
    JPerKg,
    /// kJ/kg
    KJPerKg,
}

/// The kind of physical quantity a property code carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Temperature,
    Pressure,
    SpecificEnergy,
}

// ────────────────────────────────────────────────────────────────────
//  Rule sets: which canonical codes carry which quantity
// ────────────────────────────────────────────────────────────────────

use Quantity::{Pressure, SpecificEnergy, Temperature};

const FLUID_RULES: &[(&str, Quantity)] = &[
    ("T", Temperature),
    ("Tcrit", Temperature),
    ("Tmax", Temperature),
    ("Tmin", Temperature),
    ("Ttriple", Temperature),
    ("T_freeze", Temperature),
    ("T_reducing", Temperature),
    ("P", Pressure),
    ("Pcrit", Pressure),
    ("pmax", Pressure),
    ("pmin", Pressure),
    ("ptriple", Pressure),
    ("p_reducing", Pressure),
    ("H", SpecificEnergy),
    ("U", SpecificEnergy),
    ("S", SpecificEnergy),
    ("Cp", SpecificEnergy),
    ("Cpmass", SpecificEnergy),
    ("Cvmass", SpecificEnergy),
    ("Cp0mass", SpecificEnergy),
    ("G", SpecificEnergy),
    ("Hmolar", SpecificEnergy),
    ("Umolar", SpecificEnergy),
    ("Smolar", SpecificEnergy),
    ("Smolar_residual", SpecificEnergy),
    ("Cpmolar", SpecificEnergy),
    ("Cvmolar", SpecificEnergy),
    ("Cp0molar", SpecificEnergy),
    ("Gmolar", SpecificEnergy),
];

const HUMID_AIR_RULES: &[(&str, Quantity)] = &[
    ("T", Temperature),
    ("Twb", Temperature),
    ("Tdp", Temperature),
    ("P", Pressure),
    ("P_w", Pressure),
    ("Hda", SpecificEnergy),
    ("Hha", SpecificEnergy),
    ("Sda", SpecificEnergy),
    ("Sha", SpecificEnergy),
    ("Cda", SpecificEnergy),
    ("Cha", SpecificEnergy),
];

/// Which property vocabulary a code belongs to.
///
/// The two vocabularies overlap (`"T"` and `"P"` mean the same in both)
/// but are otherwise independent: `"H"` is a fluid enthalpy, while humid
/// air uses `"Hda"` / `"Hha"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSet {
    /// Single-phase / real-fluid properties (`PropsSI`).
    Fluid,
    /// Psychrometric properties of moist air (`HAPropsSI`).
    HumidAir,
}

impl RuleSet {
    fn rules(self) -> &'static [(&'static str, Quantity)] {
        match self {
            RuleSet::Fluid => FLUID_RULES,
            RuleSet::HumidAir => HUMID_AIR_RULES,
        }
    }

    /// Quantity carried by `code`, or `None` if it needs no conversion.
    /// Codes are matched exactly (they are already canonical).
    pub fn quantity(self, code: &str) -> Option<Quantity> {
        self.rules()
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, q)| *q)
    }

    /// Every `(code, quantity)` rule in this set.
    pub fn codes(self) -> impl Iterator<Item = (&'static str, Quantity)> {
        self.rules().iter().copied()
    }
}

// ────────────────────────────────────────────────────────────────────
//  UnitSystem (user configuration)
// ────────────────────────────────────────────────────────────────────

/// Describes the set of units the caller works in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSystem {
    pub temperature: TempUnit,
    pub pressure:    PressUnit,
    pub energy:      EnergyUnit,
}

impl UnitSystem {
    /// CoolProp native: K, Pa, J/kg.
    pub fn si() -> Self {
        Self {
            temperature: TempUnit::Kelvin,
            pressure:    PressUnit::Pa,
            energy:      EnergyUnit::JPerKg,
        }
    }

    /// Engineering / HVAC: °C, bar, kJ/kg.
    pub fn engineering() -> Self {
        Self {
            temperature: TempUnit::Celsius,
            pressure:    PressUnit::Bar,
            energy:      EnergyUnit::KJPerKg,
        }
    }

    /// `true` when every quantity is already SI (conversion is a no-op).
    pub fn is_si(&self) -> bool {
        *self == Self::si()
    }
}

// ────────────────────────────────────────────────────────────────────
//  Converter = UnitSystem + RuleSet
// ────────────────────────────────────────────────────────────────────

/// Converts values between the caller's units and CoolProp's SI units.
#[derive(Debug, Clone)]
pub struct Converter {
    pub units: UnitSystem,
    pub rules: RuleSet,
}

impl Converter {
    pub fn new(rules: RuleSet, units: UnitSystem) -> Self {
        Self { units, rules }
    }

    /// °C, bar, kJ/kg.
    pub fn engineering(rules: RuleSet) -> Self {
        Self::new(rules, UnitSystem::engineering())
    }

    /// Identity converter; values are already SI.
    pub fn identity(rules: RuleSet) -> Self {
        Self::new(rules, UnitSystem::si())
    }

    // ── Temperature ─────────────────────────────────────────────────

    /// User → SI (K)
    pub fn t_to_si(&self, t: f64) -> f64 {
        match self.units.temperature {
            TempUnit::Kelvin  => t,
            TempUnit::Celsius => t + 273.15,
        }
    }

    /// SI (K) → User
    pub fn t_from_si(&self, t: f64) -> f64 {
        match self.units.temperature {
            TempUnit::Kelvin  => t,
            TempUnit::Celsius => t - 273.15,
        }
    }

    // ── Pressure ────────────────────────────────────────────────────

    /// User → SI (Pa)
    pub fn p_to_si(&self, p: f64) -> f64 {
        match self.units.pressure {
            PressUnit::Pa  => p,
            PressUnit::Bar => p * 1e5,
        }
    }

    /// SI (Pa) → User
    pub fn p_from_si(&self, p: f64) -> f64 {
        match self.units.pressure {
            PressUnit::Pa  => p,
            PressUnit::Bar => p / 1e5,
        }
    }

    // ── Specific energy / entropy / heat capacity ───────────────────

    /// User → SI (J/kg)
    pub fn e_to_si(&self, e: f64) -> f64 {
        match self.units.energy {
            EnergyUnit::JPerKg  => e,
            EnergyUnit::KJPerKg => e * 1000.0,
        }
    }

    /// SI (J/kg) → User
    pub fn e_from_si(&self, e: f64) -> f64 {
        match self.units.energy {
            EnergyUnit::JPerKg  => e,
            EnergyUnit::KJPerKg => e / 1000.0,
        }
    }

    // ── Generic key‑based conversion ────────────────────────────────

    /// Convert a user value to SI, choosing the rule by canonical
    /// property code.  Unknown codes are returned unchanged.
    pub fn to_si(&self, code: &str, val: f64) -> f64 {
        match self.rules.quantity(code) {
            Some(Quantity::Temperature)    => self.t_to_si(val),
            Some(Quantity::Pressure)       => self.p_to_si(val),
            Some(Quantity::SpecificEnergy) => self.e_to_si(val),
            None                           => val,
        }
    }

    /// Convert an SI value back to user units.
    pub fn from_si(&self, code: &str, val: f64) -> f64 {
        match self.rules.quantity(code) {
            Some(Quantity::Temperature)    => self.t_from_si(val),
            Some(Quantity::Pressure)       => self.p_from_si(val),
            Some(Quantity::SpecificEnergy) => self.e_from_si(val),
            None                           => val,
        }
    }
}
