/// Module grid and function-module map
pub mod matrix;
/// Version, EC level, mask, mode and encode result types
pub mod qr_code;
/// Mode segments produced by the analyzer
pub mod segment;

pub use matrix::{Module, ModuleMatrix};
pub use qr_code::{
    ALPHANUMERIC_TABLE, ECLevel, MaskPattern, Mode, QrCode, Version, alphanumeric_value,
};
pub use segment::Segment;
