pub mod coolprop;

pub use coolprop::{COOLPROP_PATH_VAR, CoolPropBackend};
