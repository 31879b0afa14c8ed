use std::env;
use std::ffi::{c_char, c_int};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, Once};

use coolprop_sys::*;
use tracing::{debug, info, warn};

use crate::engine::{PropertyEngine, UNKNOWN_FAILURE, is_failure};
use crate::error::*;

// ── Global lock ─────────────────────────────────────────────────────
// CoolProp keeps one process-wide error string.  A call and the read of
// its diagnostic happen under one guard, and the diagnostic travels back
// inside the call's own `Err`.
static COOLPROP_LOCK: Mutex<()> = Mutex::new(());

/// Environment variable naming the CoolProp library file or the
/// directory that contains it.
pub const COOLPROP_PATH_VAR: &str = "COOLPROP_PATH";

// ── Backend ─────────────────────────────────────────────────────────

/// [`PropertyEngine`] backed by the CoolProp shared library.
pub struct CoolPropBackend {
    lib: CoolPropLibrary,
}

impl CoolPropBackend {
    // ================================================================
    //  Constructors
    // ================================================================

    /// Load CoolProp from a library file or a directory containing it.
    pub fn load(path: &Path) -> Result<Self> {
        let lib = if path.is_dir() {
            CoolPropLibrary::load_from_dir(path)
        } else {
            CoolPropLibrary::load_from_file(path)
        }
        .map_err(|e| CalcError::EngineUnavailable(e.to_string()))?;
        Ok(Self::with_library(lib))
    }

    /// Locate and load CoolProp using `.env`, `COOLPROP_PATH`, the
    /// executable's directory, the working directory, standard install
    /// locations and finally the system loader path.
    pub fn from_env() -> Result<Self> {
        Self::load_dotenv();
        let mut tried = Vec::<String>::new();

        if let Ok(path) = env::var(COOLPROP_PATH_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load(&p) {
                    Ok(backend) => return Ok(backend),
                    Err(e) => tried.push(format!("{COOLPROP_PATH_VAR}={path} ({e})")),
                }
            } else {
                tried.push(format!("{COOLPROP_PATH_VAR}={path} (does not exist)"));
            }
        }

        for (candidate, exists) in Self::search_report() {
            if !exists {
                tried.push(format!("{} (not found)", candidate.display()));
                continue;
            }
            match CoolPropLibrary::load_from_file(&candidate) {
                Ok(lib) => return Ok(Self::with_library(lib)),
                Err(e) => tried.push(e.to_string()),
            }
        }

        match CoolPropLibrary::load_system() {
            Ok(lib) => Ok(Self::with_library(lib)),
            Err(e) => {
                tried.push(e.to_string());
                warn!("CoolProp library not available");
                Err(CalcError::EngineUnavailable(format!(
                    "Tried:\n  - {}\nSet {COOLPROP_PATH_VAR} to the CoolProp shared library or its directory.",
                    tried.join("\n  - ")
                )))
            }
        }
    }

    fn with_library(lib: CoolPropLibrary) -> Self {
        info!(path = %lib.path().display(), "CoolProp library loaded");
        Self { lib }
    }

    /// Where the library was loaded from.
    pub fn library_path(&self) -> &Path {
        self.lib.path()
    }

    // ── .env loading (once) ──────────────────────────────────────────

    fn load_dotenv() {
        static DOTENV_INIT: Once = Once::new();
        DOTENV_INIT.call_once(|| {
            if dotenvy::dotenv().is_ok() { return; }
            if let Ok(dir) = env::var("CARGO_MANIFEST_DIR") {
                let p = PathBuf::from(dir).join(".env");
                if p.exists() { let _ = dotenvy::from_path(&p); return; }
            }
            if let Some(dir) = Self::exe_dir() {
                let p = dir.join(".env");
                if p.exists() { let _ = dotenvy::from_path(&p); }
            }
        });
    }

    // ── Path discovery ───────────────────────────────────────────────

    fn exe_dir() -> Option<PathBuf> {
        env::current_exe().ok()?.parent().map(Path::to_path_buf)
    }

    fn search_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(dir) = Self::exe_dir() { dirs.push(dir); }
        if let Ok(dir) = env::current_dir() { dirs.push(dir); }

        #[cfg(target_os = "windows")]
        let standard_dirs = [r"C:\Program Files\CoolProp", r"C:\Program Files (x86)\CoolProp"];
        #[cfg(target_os = "linux")]
        let standard_dirs = ["/usr/local/lib", "/usr/lib", "/opt/coolprop"];
        #[cfg(target_os = "macos")]
        let standard_dirs = ["/usr/local/lib", "/opt/homebrew/lib", "/opt/coolprop"];
        #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
        let standard_dirs: [&str; 0] = [];

        dirs.extend(standard_dirs.iter().map(PathBuf::from));
        dirs
    }

    /// Every candidate library file outside `COOLPROP_PATH`, with
    /// whether it exists.
    pub fn search_report() -> Vec<(PathBuf, bool)> {
        Self::search_dirs()
            .into_iter()
            .flat_map(|dir| library_candidates().iter().map(move |name| dir.join(name)))
            .map(|p| {
                let exists = p.is_file();
                (p, exists)
            })
            .collect()
    }

    // ================================================================
    //  Lock and diagnostics helpers
    // ================================================================

    /// Acquire the global CoolProp lock, recovering gracefully from
    /// poisoning instead of panicking.
    fn lock_coolprop() -> Result<MutexGuard<'static, ()>> {
        COOLPROP_LOCK.lock().map_err(|_| {
            CalcError::Engine("CoolProp global lock is poisoned (a previous call panicked)".into())
        })
    }

    /// Read CoolProp's `errstring`.  **Caller must hold COOLPROP_LOCK.**
    fn errstring_inner(&self) -> Option<String> {
        let param = to_c_string("errstring").ok()?;
        let mut buf = vec![0 as c_char; COOLPROP_PARAMLEN];
        let ok = unsafe {
            self.lib
                .get_global_param_string(param.as_ptr(), buf.as_mut_ptr(), buf.len() as c_int)
        };
        let msg = from_c_buffer(&buf);
        (ok != 0 && !msg.is_empty()).then_some(msg)
    }

    /// Turn a sentinel into `EngineFailure` carrying `errstring`.
    /// **Caller must hold COOLPROP_LOCK.**
    fn settle_number(&self, x: f64) -> Result<f64> {
        let diagnostic = if is_failure(x) { self.errstring_inner() } else { None };
        settle(x, diagnostic)
    }

    /// Same as [`settle_number`](Self::settle_number) for string calls.
    /// **Caller must hold COOLPROP_LOCK.**
    fn settle_text(&self, s: String) -> Result<String> {
        let diagnostic = if s.is_empty() { self.errstring_inner() } else { None };
        settle_string(s, diagnostic)
    }

    fn c_str(s: &str) -> Result<std::ffi::CString> {
        to_c_string(s).map_err(|e| CalcError::Engine(e.to_string()))
    }

    /// Call a string-returning CoolProp function with a fresh buffer.
    /// A return code of 0 or an empty buffer is an `EngineFailure`.
    fn read_string(
        &self,
        capacity: usize,
        call: impl FnOnce(*mut c_char, c_int) -> std::ffi::c_long,
    ) -> Result<String> {
        let _guard = Self::lock_coolprop()?;
        let mut buf = vec![0 as c_char; capacity];
        let ok = call(buf.as_mut_ptr(), buf.len() as c_int);
        let out = if ok == 0 { String::new() } else { from_c_buffer(&buf) };
        self.settle_text(out)
    }
}

impl PropertyEngine for CoolPropBackend {
    fn props_si(
        &self,
        output: &str,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        fluid: &str,
    ) -> Result<f64> {
        let (o, n1, n2, f) = (
            Self::c_str(output)?,
            Self::c_str(name1)?,
            Self::c_str(name2)?,
            Self::c_str(fluid)?,
        );
        let _guard = Self::lock_coolprop()?;
        let x = unsafe {
            self.lib
                .PropsSI(o.as_ptr(), n1.as_ptr(), value1, n2.as_ptr(), value2, f.as_ptr())
        };
        debug!(output, name1, value1, name2, value2, fluid, result = x, "PropsSI");
        self.settle_number(x)
    }

    fn ha_props_si(
        &self,
        output: &str,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        name3: &str,
        value3: f64,
    ) -> Result<f64> {
        let (o, n1, n2, n3) = (
            Self::c_str(output)?,
            Self::c_str(name1)?,
            Self::c_str(name2)?,
            Self::c_str(name3)?,
        );
        let _guard = Self::lock_coolprop()?;
        let x = unsafe {
            self.lib.HAPropsSI(
                o.as_ptr(),
                n1.as_ptr(),
                value1,
                n2.as_ptr(),
                value2,
                n3.as_ptr(),
                value3,
            )
        };
        debug!(output, name1, value1, name2, value2, name3, value3, result = x, "HAPropsSI");
        self.settle_number(x)
    }

    fn props1_si(&self, output: &str, fluid: &str) -> Result<f64> {
        let (o, f) = (Self::c_str(output)?, Self::c_str(fluid)?);
        let _guard = Self::lock_coolprop()?;
        let x = unsafe { self.lib.Props1SI(f.as_ptr(), o.as_ptr()) };
        debug!(output, fluid, result = x, "Props1SI");
        self.settle_number(x)
    }

    fn phase_si(
        &self,
        name1: &str,
        value1: f64,
        name2: &str,
        value2: f64,
        fluid: &str,
    ) -> Result<String> {
        let (n1, n2, f) = (Self::c_str(name1)?, Self::c_str(name2)?, Self::c_str(fluid)?);
        self.read_string(COOLPROP_STRLEN, |buf, n| unsafe {
            self.lib
                .PhaseSI(n1.as_ptr(), value1, n2.as_ptr(), value2, f.as_ptr(), buf, n)
        })
    }

    fn global_param(&self, param: &str) -> Result<String> {
        let p = Self::c_str(param)?;
        self.read_string(COOLPROP_PARAMLEN, |buf, n| unsafe {
            self.lib.get_global_param_string(p.as_ptr(), buf, n)
        })
    }

    fn fluid_param(&self, fluid: &str, param: &str) -> Result<String> {
        let (f, p) = (Self::c_str(fluid)?, Self::c_str(param)?);
        self.read_string(COOLPROP_STRLEN, |buf, n| unsafe {
            self.lib.get_fluid_param_string(f.as_ptr(), p.as_ptr(), buf, n)
        })
    }

    /// Failures already carry their diagnostic; this only reads whatever
    /// `errstring` CoolProp still holds.
    fn last_error(&self) -> Option<String> {
        let _guard = Self::lock_coolprop().ok()?;
        self.errstring_inner()
    }
}

// ── Outcome helpers ─────────────────────────────────────────────────

fn failure(diagnostic: Option<String>) -> CalcError {
    let msg = diagnostic
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_FAILURE.into());
    warn!(error = %msg, "CoolProp reported a failure");
    CalcError::EngineFailure(msg)
}

fn settle(x: f64, diagnostic: Option<String>) -> Result<f64> {
    if is_failure(x) { Err(failure(diagnostic)) } else { Ok(x) }
}

fn settle_string(s: String, diagnostic: Option<String>) -> Result<String> {
    if s.trim().is_empty() { Err(failure(diagnostic)) } else { Ok(s) }
}
