//! Static description of the spreadsheet functions, as the host's
//! function wizard presents them, plus a positional dispatcher.

use serde::Serialize;

use crate::calc::{Calculator, Units};
use crate::error::CalcError;
use crate::value::CellValue;

/// Add-in implementation name registered with the host.
pub const IMPLE_NAME: &str = "org.openoffice.sheet.addin.CoolPropWrapper";
/// Service the add-in implements.
pub const SERVICE_NAME: &str = "com.sun.star.sheet.AddIn";
/// The single function-wizard category.
pub const CATEGORY: &str = "CoolProp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArgSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// What a registered function does when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Fluid(Units),
    HumidAir(Units),
    Props1(Units),
    Phase(Units),
    GlobalParam,
    FluidParam,
    MixtureString,
    Diagnostics,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub display_name: &'static str,
    pub programmatic_name: &'static str,
    pub description: &'static str,
    pub args: &'static [ArgSpec],
    #[serde(skip)]
    op: Op,
}

impl FunctionSpec {
    pub fn category(&self) -> &'static str {
        CATEGORY
    }
}

const fn arg(name: &'static str, description: &'static str) -> ArgSpec {
    ArgSpec { name, description }
}

// ── Argument lists ──────────────────────────────────────────────────

const FLUID_SI_ARGS: &[ArgSpec] = &[
    arg("Output", "Property to calculate (e.g., 'H', 'S', 'T', 'P')"),
    arg("Name1", "First property name (e.g., 'T', 'P', 'H')"),
    arg("Value1", "First property value (in SI units)"),
    arg("Name2", "Second property name"),
    arg("Value2", "Second property value (in SI units)"),
    arg("Fluid", "Fluid name (e.g., 'Water', 'R134a')"),
];

const FLUID_E_ARGS: &[ArgSpec] = &[
    arg("Output", "Property to calculate (e.g., 'H', 'S', 'T', 'P')"),
    arg("Name1", "First property name (e.g., 'T', 'P', 'H')"),
    arg("Value1", "First property value (in engineering units)"),
    arg("Name2", "Second property name"),
    arg("Value2", "Second property value (in engineering units)"),
    arg("Fluid", "Fluid name (e.g., 'Water', 'R134a')"),
];

const HA_SI_ARGS: &[ArgSpec] = &[
    arg("Output", "Property to calculate (e.g., 'W', 'Hha', 'RH')"),
    arg("Name1", "First property name (e.g., 'T', 'P')"),
    arg("Value1", "First property value (in SI units)"),
    arg("Name2", "Second property name"),
    arg("Value2", "Second property value (in SI units)"),
    arg("Name3", "Third property name (e.g., 'R' for relative humidity)"),
    arg("Value3", "Third property value (in SI units)"),
];

const HA_E_ARGS: &[ArgSpec] = &[
    arg("Output", "Property to calculate (e.g., 'W', 'Hha', 'RH')"),
    arg("Name1", "First property name (e.g., 'T', 'P')"),
    arg("Value1", "First property value (in engineering units)"),
    arg("Name2", "Second property name"),
    arg("Value2", "Second property value (in engineering units)"),
    arg("Name3", "Third property name (e.g., 'RH' for relative humidity)"),
    arg("Value3", "Third property value (in engineering units)"),
];

const PROPS1_ARGS: &[ArgSpec] = &[
    arg("Output", "Trivial property (e.g., 'Tcrit', 'pcrit', 'M')"),
    arg("Fluid", "Fluid name (e.g., 'Water', 'R134a')"),
];

const PHASE_SI_ARGS: &[ArgSpec] = &[
    arg("Name1", "First property name (e.g., 'T', 'P')"),
    arg("Value1", "First property value (in SI units)"),
    arg("Name2", "Second property name"),
    arg("Value2", "Second property value (in SI units)"),
    arg("Fluid", "Fluid name (e.g., 'Water', 'R134a')"),
];

const PHASE_E_ARGS: &[ArgSpec] = &[
    arg("Name1", "First property name (e.g., 'T', 'P')"),
    arg("Value1", "First property value (in engineering units)"),
    arg("Name2", "Second property name"),
    arg("Value2", "Second property value (in engineering units)"),
    arg("Fluid", "Fluid name (e.g., 'Water', 'R134a')"),
];

// ── Function table ──────────────────────────────────────────────────

pub static FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec {
        display_name: "CPROP_SI",
        programmatic_name: "getCProp_SI",
        description: "Calculate thermodynamic properties of real fluids using SI units (K, Pa, J/kg, etc.)",
        args: FLUID_SI_ARGS,
        op: Op::Fluid(Units::Si),
    },
    FunctionSpec {
        display_name: "CPROP_E",
        programmatic_name: "getCProp_E",
        description: "Calculate thermodynamic properties of real fluids using engineering units (°C, bar, kJ/kg, etc.)",
        args: FLUID_E_ARGS,
        op: Op::Fluid(Units::Engineering),
    },
    FunctionSpec {
        display_name: "CPROP",
        programmatic_name: "getCProp",
        description: "Calculate thermodynamic properties of real fluids (default: engineering units)",
        args: FLUID_E_ARGS,
        op: Op::Fluid(Units::Engineering),
    },
    FunctionSpec {
        display_name: "CPROPHA_SI",
        programmatic_name: "getCPropHA_SI",
        description: "Calculate humid air properties using SI units (K, Pa, J/kg, etc.)",
        args: HA_SI_ARGS,
        op: Op::HumidAir(Units::Si),
    },
    FunctionSpec {
        display_name: "CPROPHA_E",
        programmatic_name: "getCPropHA_E",
        description: "Calculate humid air properties using engineering units (°C, bar, kJ/kg, etc.)",
        args: HA_E_ARGS,
        op: Op::HumidAir(Units::Engineering),
    },
    FunctionSpec {
        display_name: "CPROPHA",
        programmatic_name: "getCPropHA",
        description: "Calculate humid air properties (default: engineering units)",
        args: HA_E_ARGS,
        op: Op::HumidAir(Units::Engineering),
    },
    FunctionSpec {
        display_name: "PROPS1_SI",
        programmatic_name: "getProps1_SI",
        description: "Trivial (state-independent) fluid property in SI units",
        args: PROPS1_ARGS,
        op: Op::Props1(Units::Si),
    },
    FunctionSpec {
        display_name: "PROPS1",
        programmatic_name: "getProps1",
        description: "Trivial (state-independent) fluid property in engineering units",
        args: PROPS1_ARGS,
        op: Op::Props1(Units::Engineering),
    },
    FunctionSpec {
        display_name: "PHASE_SI",
        programmatic_name: "getPhase_SI",
        description: "Phase of a fluid at a state given in SI units",
        args: PHASE_SI_ARGS,
        op: Op::Phase(Units::Si),
    },
    FunctionSpec {
        display_name: "PHASE",
        programmatic_name: "getPhase",
        description: "Phase of a fluid at a state given in engineering units",
        args: PHASE_E_ARGS,
        op: Op::Phase(Units::Engineering),
    },
    FunctionSpec {
        display_name: "GLOBALPARAM",
        programmatic_name: "getGlobalParam",
        description: "CoolProp global parameter (e.g., 'version', 'gitrevision', 'FluidsList')",
        args: &[arg("Param", "Parameter name (e.g., 'version')")],
        op: Op::GlobalParam,
    },
    FunctionSpec {
        display_name: "FLUIDPARAM",
        programmatic_name: "getFluidParam",
        description: "CoolProp fluid parameter string (e.g., 'CAS', 'aliases', 'formula')",
        args: &[
            arg("Fluid", "Fluid name (e.g., 'Water', 'R134a')"),
            arg("Param", "Parameter name (e.g., 'CAS')"),
        ],
        op: Op::FluidParam,
    },
    FunctionSpec {
        display_name: "MIXTURESTRING",
        programmatic_name: "getMixtureString",
        description: "Build a CoolProp mixture string (HEOS::A[x]&B[y]) from components and mole fractions",
        args: &[
            arg("Components", "Range of component fluid names"),
            arg("Fractions", "Range of mole fractions (0 to 1), same size as Components"),
        ],
        op: Op::MixtureString,
    },
    FunctionSpec {
        display_name: "CPROPDIAG",
        programmatic_name: "getCPropDiag",
        description: "Show where the CoolProp library was searched for and whether it loaded",
        args: &[],
        op: Op::Diagnostics,
    },
];

// ── Lookups ─────────────────────────────────────────────────────────

pub fn by_display_name(display: &str) -> Option<&'static FunctionSpec> {
    FUNCTIONS.iter().find(|f| f.display_name == display)
}

pub fn by_programmatic_name(name: &str) -> Option<&'static FunctionSpec> {
    FUNCTIONS.iter().find(|f| f.programmatic_name == name)
}

/// Display name → programmatic name; unknown gives "".
pub fn programmatic_name(display: &str) -> &'static str {
    by_display_name(display).map_or("", |f| f.programmatic_name)
}

/// Programmatic name → display name; unknown gives "".
pub fn display_name(programmatic: &str) -> &'static str {
    by_programmatic_name(programmatic).map_or("", |f| f.display_name)
}

pub fn function_description(programmatic: &str) -> &'static str {
    by_programmatic_name(programmatic).map_or("", |f| f.description)
}

pub fn display_argument_name(programmatic: &str, n: usize) -> &'static str {
    by_programmatic_name(programmatic)
        .and_then(|f| f.args.get(n))
        .map_or("", |a| a.name)
}

pub fn argument_description(programmatic: &str, n: usize) -> &'static str {
    by_programmatic_name(programmatic)
        .and_then(|f| f.args.get(n))
        .map_or("", |a| a.description)
}

/// Every function lives in the one category.
pub fn category_display_name(_programmatic: &str) -> &'static str {
    CATEGORY
}

pub fn supports_service(name: &str) -> bool {
    name == SERVICE_NAME
}

pub fn supported_service_names() -> &'static [&'static str] {
    &[SERVICE_NAME]
}

// ── Dispatch ────────────────────────────────────────────────────────

/// Call a registered function by display name (or programmatic name)
/// with positional arguments.  Missing trailing arguments are `Empty`.
///
/// `MIXTURESTRING` receives its two ranges flattened one after the
/// other: the first half of `args` are component names, the second half
/// the fractions.
pub fn invoke(name: &str, args: &[CellValue], calc: &Calculator) -> CellValue {
    let Some(func) = by_display_name(name).or_else(|| by_programmatic_name(name)) else {
        return CalcError::Engine(format!("Unknown function {name}")).to_string().into();
    };

    if func.op != Op::MixtureString && args.len() > func.args.len() {
        return CellValue::Text(
            CalcError::InvalidInput(format!(
                "{} takes {} arguments, got {}",
                func.display_name,
                func.args.len(),
                args.len()
            ))
            .to_string(),
        );
    }

    match func.op {
        Op::Fluid(units) => calc.fluid_cell(units, &padded(args)),
        Op::HumidAir(units) => calc.humid_air_cell(units, &padded(args)),
        Op::Props1(units) => calc.props1_cell(units, &padded(args)),
        Op::Phase(units) => calc.phase_cell(units, &padded(args)),
        Op::GlobalParam => {
            let [param] = padded(args);
            calc.global_param(param)
        }
        Op::FluidParam => {
            let [fluid, param] = padded(args);
            calc.fluid_param(fluid, param)
        }
        Op::MixtureString if args.len() % 2 != 0 => CellValue::Text(
            CalcError::InvalidInput(format!(
                "{} expects two ranges of equal size, got {} values",
                func.display_name,
                args.len()
            ))
            .to_string(),
        ),
        Op::MixtureString => {
            let (components, fractions) = args.split_at(args.len() / 2);
            calc.mixture_string(components, fractions)
        }
        Op::Diagnostics => calc.diagnostics(),
    }
}

fn padded<const N: usize>(args: &[CellValue]) -> [CellValue; N] {
    std::array::from_fn(|i| args.get(i).cloned().unwrap_or(CellValue::Empty))
}
