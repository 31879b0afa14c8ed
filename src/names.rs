//! Property and substance name normalization.
//!
//! Users type whatever is natural (`temp`, `rho`, `RH`, `h2o`); CoolProp
//! wants its exact canonical codes (`T`, `D`, `R`, `Water`).  Lookups are
//! case-insensitive.  Names that are not in a table pass through
//! **verbatim**, original casing included, so codes this crate does not
//! know about still reach the engine untouched.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Real-fluid property aliases (`PropsSI` vocabulary), keyed lowercase.
pub const FLUID_ALIASES: &[(&str, &str)] = &[
    // Temperature
    ("t", "T"), ("temp", "T"), ("temperature", "T"),
    // Pressure
    ("p", "P"), ("pres", "P"), ("pressure", "P"),
    // Enthalpy
    ("h", "H"), ("enth", "H"), ("enthalpy", "H"), ("hmass", "H"),
    // Internal energy
    ("u", "U"), ("internalenergy", "U"), ("umass", "U"),
    // Entropy
    ("s", "S"), ("entr", "S"), ("entropy", "S"), ("smass", "S"),
    // Molar density
    ("dmolar", "Dmolar"), ("dmol", "Dmolar"),
    ("delta", "Delta"),
    // Mass density
    ("rho", "D"), ("dens", "D"), ("dmass", "D"),
    // Heat capacities
    ("cvmass", "Cvmass"), ("cv", "Cvmass"),
    ("cpmass", "Cpmass"), ("cp", "Cpmass"),
    ("cpmolar", "Cpmolar"), ("cpmol", "Cpmolar"),
    ("cvmolar", "Cvmolar"), ("cvmol", "Cvmolar"),
    // Quality
    ("q", "Q"), ("quality", "Q"), ("x", "Q"),
    // Reduced state and Helmholtz terms
    ("tau", "Tau"),
    ("alpha0", "Alpha0"),
    ("alphar", "Alphar"),
    // Transport and derived properties
    ("speed_of_sound", "A"), ("a", "A"),
    ("bvirial", "Bvirial"),
    ("k", "K"), ("conductivity", "K"),
    ("cvirial", "Cvirial"),
    ("dipole_moment", "DIPOLE_MOMENT"),
    ("fh", "FH"),
    ("g", "G"), ("gmass", "G"),
    ("helmoltzmass", "HELMHOLTZMASS"),
    ("helmholtzmolar", "HELMHOLTZMOLAR"),
    ("gamma", "gamma"),
    ("isobaric_expansion_coefficient", "isobaric_expansion_coefficient"),
    ("isothermal_compressibility", "isothermal_compressibility"),
    ("surface_tension", "surface_tension"),
    // Fluid constants
    ("mm", "MM"), ("molar_mass", "MM"),
    ("pcrit", "Pcrit"), ("p_critical", "Pcrit"),
    ("phase", "Phase"),
    ("pmax", "pmax"),
    ("pmin", "pmin"),
    ("prandtl", "Prandtl"),
    ("ptriple", "ptriple"),
    ("p_reducing", "p_reducing"),
    ("rhocrit", "rhocrit"),
    ("rhomass_reducing", "rhomass_reducing"),
    ("smolar_residual", "Smolar_residual"),
    ("tcrit", "Tcrit"),
    ("tmax", "Tmax"),
    ("tmin", "Tmin"),
    ("ttriple", "Ttriple"),
    ("t_freeze", "T_freeze"),
    ("t_reducing", "T_reducing"),
    ("mu", "MU"), ("viscosity", "MU"),
    ("z", "Z"),
];

/// Humid-air property aliases (`HAPropsSI` vocabulary), keyed lowercase.
pub const HUMID_AIR_ALIASES: &[(&str, &str)] = &[
    // Wet bulb
    ("twb", "Twb"), ("wetbulb", "Twb"), ("t_wb", "Twb"),
    // Dew point
    ("tdp", "Tdp"), ("dewpoint", "Tdp"), ("t_dp", "Tdp"),
    // Dry bulb
    ("t", "T"), ("tdb", "T"), ("t_db", "T"),
    // Pressure
    ("p", "P"),
    ("p_w", "P_w"),
    // Relative humidity
    ("r", "R"), ("rh", "R"), ("relhum", "R"),
    // Humidity ratio
    ("w", "W"), ("omega", "W"), ("humrat", "W"),
    // Enthalpy / entropy per kg dry air and per kg humid air
    ("hda", "Hda"), ("hha", "Hha"),
    ("sda", "Sda"), ("sha", "Sha"),
    // Heat capacity
    ("cda", "Cda"), ("cpda", "Cda"),
    ("cha", "Cha"), ("cpha", "Cha"),
    // Transport
    ("k", "K"), ("conductivity", "K"),
    ("mu", "MU"), ("viscosity", "MU"),
    // Water mole fraction
    ("psi_w", "Psi_w"), ("y", "Psi_w"),
    // Specific volume
    ("vda", "Vda"), ("vha", "Vha"),
    ("z", "Z"),
    // Density
    ("dda", "Dda"), ("rhoda", "Dda"),
    ("dha", "Dha"), ("rhoha", "Dha"),
];

/// Substance aliases, keyed lowercase with `-`, `_` and spaces removed.
pub const SUBSTANCE_ALIASES: &[(&str, &str)] = &[
    ("1butene", "1-Butene"), ("acetone", "Acetone"), ("air", "Air"),
    ("ammonia", "Ammonia"), ("nh3", "Ammonia"),
    ("argon", "Argon"), ("ar", "Argon"),
    ("benzene", "Benzene"),
    ("carbondioxide", "CarbonDioxide"), ("co2", "CarbonDioxide"),
    ("carbonmonoxide", "CarbonMonoxide"), ("co", "CarbonMonoxide"),
    ("carbonylsulfide", "CarbonylSulfide"), ("cos", "CarbonylSulfide"),
    ("cis2butene", "cis-2-Butene"),
    ("cyclohexane", "CycloHexane"), ("cyclopentane", "Cyclopentane"),
    ("cyclopropane", "CycloPropane"),
    ("d4", "D4"), ("d5", "D5"), ("d6", "D6"),
    ("deuterium", "Deuterium"), ("d2", "Deuterium"),
    ("dichloroethane", "Dichloroethane"), ("diethylether", "DiethylEther"),
    ("dimethylcarbonate", "DimethylCarbonate"),
    ("dimethylether", "DimethylEther"), ("dme", "DimethylEther"),
    ("ethane", "Ethane"), ("c2h6", "Ethane"),
    ("ethanol", "Ethanol"), ("ethylbenzene", "EthylBenzene"),
    ("ethylene", "Ethylene"), ("c2h4", "Ethylene"),
    ("ethyleneoxide", "EthyleneOxide"),
    ("fluorine", "Fluorine"), ("f2", "Fluorine"),
    ("heavywater", "HeavyWater"), ("d2o", "HeavyWater"),
    ("helium", "Helium"), ("he", "Helium"),
    ("hfe143m", "HFE143m"),
    ("hydrogen", "Hydrogen"), ("h2", "Hydrogen"),
    ("hydrogenchloride", "HydrogenChloride"), ("hcl", "HydrogenChloride"),
    ("hydrogensulfide", "HydrogenSulfide"), ("h2s", "HydrogenSulfide"),
    ("isobutane", "IsoButane"), ("ibutane", "IsoButane"),
    ("isobutene", "IsoButene"), ("ibutene", "IsoButene"),
    ("isohexane", "Isohexane"), ("isopentane", "Isopentane"),
    ("krypton", "Krypton"), ("kr", "Krypton"),
    ("mxylene", "m-Xylene"),
    ("md2m", "MD2M"), ("md3m", "MD3M"), ("md4m", "MD4M"), ("mdm", "MDM"),
    ("methane", "Methane"), ("ch4", "Methane"),
    ("methanol", "Methanol"), ("meoh", "Methanol"),
    ("methyllinoleate", "MethylLinoleate"), ("methyllinolenate", "MethylLinolenate"),
    ("methyloleate", "MethylOleate"), ("methylpalmitate", "MethylPalmitate"),
    ("methylstearate", "MethylStearate"),
    ("mm", "MM"),
    ("nbutane", "n-Butane"), ("butane", "n-Butane"),
    ("ndecane", "n-Decane"), ("decane", "n-Decane"),
    ("ndodecane", "n-Dodecane"), ("dodecane", "n-Dodecane"),
    ("nheptane", "n-Heptane"), ("heptane", "n-Heptane"),
    ("nhexane", "n-Hexane"), ("hexane", "n-Hexane"),
    ("nnonane", "n-Nonane"), ("nonane", "n-Nonane"),
    ("noctane", "n-Octane"), ("octane", "n-Octane"),
    ("npentane", "n-Pentane"), ("pentane", "n-Pentane"),
    ("npropane", "n-Propane"), ("propane", "n-Propane"),
    ("nundecane", "n-Undecane"), ("undecane", "n-Undecane"),
    ("neon", "Neon"), ("ne", "Neon"),
    ("neopentane", "Neopentane"),
    ("nitrogen", "Nitrogen"), ("n2", "Nitrogen"),
    ("nitrousoxide", "NitrousOxide"), ("n2o", "NitrousOxide"),
    ("novec649", "Novec649"),
    ("oxylene", "o-Xylene"),
    ("orthodeuterium", "OrthoDeuterium"), ("orthohydrogen", "OrthoHydrogen"),
    ("oxygen", "Oxygen"), ("o2", "Oxygen"),
    ("pxylene", "p-Xylene"),
    ("paradeuterium", "ParaDeuterium"), ("parahydrogen", "ParaHydrogen"),
    ("propylene", "Propylene"), ("c3h6", "Propylene"),
    ("propyne", "Propyne"),
    // Refrigerants
    ("r11", "R11"), ("r113", "R113"), ("r114", "R114"), ("r115", "R115"),
    ("r116", "R116"), ("r12", "R12"), ("r123", "R123"),
    ("r1233zde", "R1233zd(E)"), ("r1233zd(e)", "R1233zd(E)"),
    ("r1234yf", "R1234yf"),
    ("r1234zee", "R1234ze(E)"), ("r1234ze(e)", "R1234ze(E)"),
    ("r1234zez", "R1234ze(Z)"), ("r1234ze(z)", "R1234ze(Z)"),
    ("r124", "R124"), ("r125", "R125"), ("r13", "R13"),
    ("r134a", "R134a"), ("r13i1", "R13I1"), ("r14", "R14"),
    ("r141b", "R141b"), ("r142b", "R142b"), ("r143a", "R143a"),
    ("r152a", "R152A"), ("r161", "R161"), ("r21", "R21"),
    ("r218", "R218"), ("r22", "R22"), ("r227ea", "R227EA"),
    ("r23", "R23"), ("r236ea", "R236EA"), ("r236fa", "R236FA"),
    ("r245ca", "R245ca"), ("r245fa", "R245fa"), ("r32", "R32"),
    ("r365mfc", "R365MFC"), ("r40", "R40"),
    ("r404a", "R404A"), ("r407c", "R407C"), ("r41", "R41"),
    ("r410a", "R410A"), ("r507a", "R507A"),
    ("rc318", "RC318"),
    ("ses36", "SES36"),
    ("sulfurdioxide", "SulfurDioxide"), ("so2", "SulfurDioxide"),
    ("sulfurhexafluoride", "SulfurHexafluoride"), ("sf6", "SulfurHexafluoride"),
    ("toluene", "Toluene"),
    ("trans2butene", "trans-2-Butene"),
    ("water", "Water"), ("h2o", "Water"),
    ("xenon", "Xenon"), ("xe", "Xenon"),
];

/// A case-insensitive alias table.
///
/// Built once from a static `(alias, canonical)` slice.
pub struct AliasTable {
    entries: &'static [(&'static str, &'static str)],
    index: HashMap<&'static str, &'static str>,
}

impl AliasTable {
    fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            entries,
            index: entries.iter().copied().collect(),
        }
    }

    /// Canonical code for `name`, or `name` itself when it is not an
    /// alias.
    pub fn normalize<'a>(&self, name: &'a str) -> &'a str {
        self.index
            .get(name.to_lowercase().as_str())
            .copied()
            .unwrap_or(name)
    }

    /// `true` if the lowercased `name` is a known alias.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name.to_lowercase().as_str())
    }

    /// All `(alias, canonical)` pairs, in declaration order.
    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

pub static FLUID: LazyLock<AliasTable> = LazyLock::new(|| AliasTable::new(FLUID_ALIASES));
pub static HUMID_AIR: LazyLock<AliasTable> = LazyLock::new(|| AliasTable::new(HUMID_AIR_ALIASES));
static SUBSTANCES: LazyLock<AliasTable> = LazyLock::new(|| AliasTable::new(SUBSTANCE_ALIASES));

/// Normalize a real-fluid property name (`"temp"` → `"T"`).
pub fn normalize_fluid_property(name: &str) -> &str {
    FLUID.normalize(name)
}

/// Normalize a humid-air property name (`"rh"` → `"R"`).
pub fn normalize_humid_air_property(name: &str) -> &str {
    HUMID_AIR.normalize(name)
}

/// Normalize a substance name (`"h2o"` → `"Water"`, `"R-134a"` →
/// `"R134a"`).
///
/// Dashes, underscores and spaces are ignored for the lookup.  Mixture
/// strings (`"HEOS::..."` or anything containing `&`) and unknown names
/// are returned verbatim.
pub fn normalize_fluid(fluid: &str) -> &str {
    if fluid.contains('&') || is_heos_prefixed(fluid) {
        return fluid;
    }
    let key: String = fluid
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect();
    SUBSTANCES
        .index
        .get(key.to_lowercase().as_str())
        .copied()
        .unwrap_or(fluid)
}

fn is_heos_prefixed(fluid: &str) -> bool {
    fluid
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("HEOS::"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_no_duplicate_aliases() {
        for table in [FLUID_ALIASES, HUMID_AIR_ALIASES, SUBSTANCE_ALIASES] {
            let mut seen = std::collections::HashSet::new();
            for (alias, _) in table {
                assert!(seen.insert(*alias), "duplicate alias {alias}");
                assert_eq!(*alias, alias.to_lowercase());
            }
        }
    }

    #[test]
    fn heos_prefix_is_case_insensitive() {
        assert!(is_heos_prefixed("heos::Water"));
        assert!(is_heos_prefixed("HEOS::R32[0.5]&R125[0.5]"));
        assert!(!is_heos_prefixed("HEO"));
        assert!(!is_heos_prefixed("Water"));
    }
}
