//! Low-level FFI bindings for the CoolProp shared library.
//!
//! The library is loaded at runtime via [`libloading`] and every entry
//! point used by the calculator is resolved once, up front, so calls go
//! straight through a cached function pointer.

#![allow(non_snake_case)]

use std::ffi::{CString, c_char, c_double, c_int, c_long};
use std::path::{Path, PathBuf};

use libloading::Library;

// ── Buffer sizes ────────────────────────────────────────────────────
/// Output buffer for phase strings and fluid parameters.
pub const COOLPROP_STRLEN: usize = 2000;
/// Output buffer for global parameters (fluid lists can be long).
pub const COOLPROP_PARAMLEN: usize = 10000;

// ── Error type ──────────────────────────────────────────────────────
#[derive(Debug)]
pub enum CoolPropSysError {
    /// The shared library could not be found or loaded.
    LibraryLoadFailed(String),
    /// A required symbol was not found in the library.
    SymbolNotFound(String),
    /// An argument contained an interior NUL byte.
    InvalidString(String),
}

impl std::fmt::Display for CoolPropSysError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LibraryLoadFailed(msg) => write!(f, "CoolProp library load failed: {msg}"),
            Self::SymbolNotFound(sym) => {
                write!(f, "Symbol not found in CoolProp library: {sym}")
            }
            Self::InvalidString(s) => write!(f, "String contains a NUL byte: {s:?}"),
        }
    }
}

impl std::error::Error for CoolPropSysError {}

// ── Function pointer type aliases ───────────────────────────────────
// Signatures follow CoolPropLib.h.

/// PropsSI(output, name1, prop1, name2, prop2, ref)
type FnPropsSI = unsafe extern "C" fn(
    *const c_char,
    *const c_char,
    c_double,
    *const c_char,
    c_double,
    *const c_char,
) -> c_double;

/// HAPropsSI(output, name1, prop1, name2, prop2, name3, prop3)
type FnHAPropsSI = unsafe extern "C" fn(
    *const c_char,
    *const c_char,
    c_double,
    *const c_char,
    c_double,
    *const c_char,
    c_double,
) -> c_double;

/// Props1SI(fluid, output)
type FnProps1SI = unsafe extern "C" fn(*const c_char, *const c_char) -> c_double;

/// PhaseSI(name1, prop1, name2, prop2, ref, phase, n)
type FnPhaseSI = unsafe extern "C" fn(
    *const c_char,
    c_double,
    *const c_char,
    c_double,
    *const c_char,
    *mut c_char,
    c_int,
) -> c_long;

/// get_global_param_string(param, output, n)
type FnGlobalParam = unsafe extern "C" fn(*const c_char, *mut c_char, c_int) -> c_long;

/// get_fluid_param_string(fluid, param, output, n)
type FnFluidParam =
    unsafe extern "C" fn(*const c_char, *const c_char, *mut c_char, c_int) -> c_long;

// ── Dynamic library wrapper ─────────────────────────────────────────

/// Shared-library file names tried on the current platform, in order.
pub fn library_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["CoolProp.dll", "coolprop.dll"]
    } else if cfg!(target_os = "macos") {
        &["libCoolProp.dylib", "libcoolprop.dylib"]
    } else {
        &["libCoolProp.so", "libcoolprop.so"]
    }
}

/// Holds a dynamically-loaded CoolProp shared library with
/// **pre-resolved function pointers**.
///
/// If any required symbol is missing the constructor returns an error
/// instead of failing later at call time.
pub struct CoolPropLibrary {
    /// Must stay alive to keep the function pointers valid.
    _lib: Library,
    path: PathBuf,

    fn_props_si: FnPropsSI,
    fn_ha_props_si: FnHAPropsSI,
    fn_props1_si: FnProps1SI,
    fn_phase_si: FnPhaseSI,
    fn_global_param: FnGlobalParam,
    fn_fluid_param: FnFluidParam,
}

impl CoolPropLibrary {
    // ── Symbol resolution ───────────────────────────────────────────

    /// Resolve a single symbol as a typed function pointer.
    fn resolve<T: Copy>(lib: &Library, name: &[u8]) -> Result<T, CoolPropSysError> {
        // SAFETY: the type aliases above match the exported C signatures.
        let sym: libloading::Symbol<T> = unsafe { lib.get(name) }.map_err(|_| {
            let display =
                String::from_utf8_lossy(&name[..name.len().saturating_sub(1)]).to_string();
            CoolPropSysError::SymbolNotFound(display)
        })?;
        Ok(*sym)
    }

    fn resolve_all(lib: Library, path: PathBuf) -> Result<Self, CoolPropSysError> {
        Ok(Self {
            fn_props_si: Self::resolve(&lib, b"PropsSI\0")?,
            fn_ha_props_si: Self::resolve(&lib, b"HAPropsSI\0")?,
            fn_props1_si: Self::resolve(&lib, b"Props1SI\0")?,
            fn_phase_si: Self::resolve(&lib, b"PhaseSI\0")?,
            fn_global_param: Self::resolve(&lib, b"get_global_param_string\0")?,
            fn_fluid_param: Self::resolve(&lib, b"get_fluid_param_string\0")?,
            _lib: lib,
            path,
        })
    }

    // ── Constructors ────────────────────────────────────────────────

    /// Load CoolProp from a **directory** containing the shared library.
    ///
    /// Every name from [`library_candidates`] is tried inside `dir`; a
    /// file that exists but fails to load (wrong architecture, missing
    /// dependency) does not stop the search.  Finally the system loader
    /// path is tried with the bare file names.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CoolPropSysError> {
        let candidates = library_candidates();
        let mut errors = Vec::new();

        for name in candidates {
            let full = dir.join(name);
            if full.exists() {
                match unsafe { Library::new(&full) } {
                    Ok(lib) => return Self::resolve_all(lib, full),
                    Err(e) => errors.push(format!("{}: {e}", full.display())),
                }
            }
        }

        match Self::load_system() {
            Ok(lib) => Ok(lib),
            Err(_) if errors.is_empty() => Err(CoolPropSysError::LibraryLoadFailed(format!(
                "No CoolProp library found in {} (tried: {candidates:?})",
                dir.display()
            ))),
            Err(_) => Err(CoolPropSysError::LibraryLoadFailed(format!(
                "CoolProp library found but could not be loaded:\n  - {}",
                errors.join("\n  - ")
            ))),
        }
    }

    /// Load CoolProp from an **exact file path**.
    pub fn load_from_file(path: &Path) -> Result<Self, CoolPropSysError> {
        let lib = unsafe { Library::new(path) }.map_err(|e| {
            CoolPropSysError::LibraryLoadFailed(format!("{}: {e}", path.display()))
        })?;
        Self::resolve_all(lib, path.to_path_buf())
    }

    /// Load CoolProp through the system loader search path
    /// (`PATH` / `LD_LIBRARY_PATH` / `DYLD_LIBRARY_PATH`).
    pub fn load_system() -> Result<Self, CoolPropSysError> {
        let candidates = library_candidates();
        for name in candidates {
            if let Ok(lib) = unsafe { Library::new(*name) } {
                return Self::resolve_all(lib, PathBuf::from(name));
            }
        }
        Err(CoolPropSysError::LibraryLoadFailed(format!(
            "No CoolProp library on the system search path (tried: {candidates:?})"
        )))
    }

    /// Path the library was loaded from (a bare file name when the
    /// system loader resolved it).
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── CoolProp function wrappers ──────────────────────────────────

    pub unsafe fn PropsSI(
        &self,
        output: *const c_char,
        name1: *const c_char,
        prop1: c_double,
        name2: *const c_char,
        prop2: c_double,
        fluid: *const c_char,
    ) -> c_double {
        unsafe { (self.fn_props_si)(output, name1, prop1, name2, prop2, fluid) }
    }

    pub unsafe fn HAPropsSI(
        &self,
        output: *const c_char,
        name1: *const c_char,
        prop1: c_double,
        name2: *const c_char,
        prop2: c_double,
        name3: *const c_char,
        prop3: c_double,
    ) -> c_double {
        unsafe { (self.fn_ha_props_si)(output, name1, prop1, name2, prop2, name3, prop3) }
    }

    pub unsafe fn Props1SI(&self, fluid: *const c_char, output: *const c_char) -> c_double {
        unsafe { (self.fn_props1_si)(fluid, output) }
    }

    /// Returns 0 on failure; the phase name is written into `phase`.
    pub unsafe fn PhaseSI(
        &self,
        name1: *const c_char,
        prop1: c_double,
        name2: *const c_char,
        prop2: c_double,
        fluid: *const c_char,
        phase: *mut c_char,
        n: c_int,
    ) -> c_long {
        unsafe { (self.fn_phase_si)(name1, prop1, name2, prop2, fluid, phase, n) }
    }

    /// Returns 0 on failure.
    pub unsafe fn get_global_param_string(
        &self,
        param: *const c_char,
        output: *mut c_char,
        n: c_int,
    ) -> c_long {
        unsafe { (self.fn_global_param)(param, output, n) }
    }

    /// Returns 0 on failure.
    pub unsafe fn get_fluid_param_string(
        &self,
        fluid: *const c_char,
        param: *const c_char,
        output: *mut c_char,
        n: c_int,
    ) -> c_long {
        unsafe { (self.fn_fluid_param)(fluid, param, output, n) }
    }
}

// ── String helpers ──────────────────────────────────────────────────

/// Convert a Rust `&str` into a NUL-terminated C string.
pub fn to_c_string(s: &str) -> Result<CString, CoolPropSysError> {
    CString::new(s).map_err(|_| CoolPropSysError::InvalidString(s.to_string()))
}

/// Convert a NUL-terminated (or fully-filled) output buffer back into a
/// trimmed Rust `String`.
pub fn from_c_buffer(buffer: &[c_char]) -> String {
    let bytes: Vec<u8> = buffer
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).trim().to_string()
}
