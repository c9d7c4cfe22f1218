use crate::models::{ECLevel, Mode};
use thiserror::Error;

/// Errors produced while encoding a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The input text was empty.
    #[error("input text is empty")]
    EmptyInput,

    /// A byte cannot be represented in the forced mode.
    #[error("byte 0x{byte:02X} at offset {offset} is not encodable in {mode:?} mode")]
    UnsupportedCharacter {
        /// Mode the caller forced.
        mode: Mode,
        /// Offending byte.
        byte: u8,
        /// Offset of the byte in the input.
        offset: usize,
    },

    /// `min_version..=max_version` is empty or outside `1..=40`.
    #[error("invalid version range {min}..={max}, expected a range within 1..=40")]
    InvalidVersionRange {
        /// Requested minimum version.
        min: u8,
        /// Requested maximum version.
        max: u8,
    },

    /// Raster scale outside `1..=40`.
    #[error("module scale {0} out of range, expected 1..=40")]
    InvalidScale(u32),

    /// Raster quiet zone wider than 64 modules.
    #[error("border of {0} modules out of range, expected 0..=64")]
    InvalidBorder(usize),

    /// The data does not fit any allowed version at the requested EC level.
    #[error(
        "data too long: {required_bits} bits required, {capacity_bits} available ({overflow_bits} over)"
    )]
    DataTooLong {
        /// Bits needed at the largest allowed version.
        required_bits: usize,
        /// Data capacity of the largest allowed version.
        capacity_bits: usize,
        /// `required_bits - capacity_bits`.
        overflow_bits: usize,
    },

    /// Codeword bits do not exactly fill the free modules of the symbol.
    #[error("layout overflow: {bits} codeword bits for {slots} data modules")]
    LayoutOverflow {
        /// Bits handed to the placer.
        bits: usize,
        /// Free (non-function) modules in the matrix.
        slots: usize,
    },

    /// A capacity table entry is missing or inconsistent.
    #[error("malformed capacity table entry for version {version} level {ec_level:?}")]
    MalformedTable {
        /// Version number.
        version: u8,
        /// EC level.
        ec_level: ECLevel,
    },

    /// The bit stream grew past the data codeword capacity.
    #[error("bit stream overflow: {bits} bits exceed {capacity} bit capacity")]
    BitStreamOverflow {
        /// Bits written.
        bits: usize,
        /// Capacity in bits.
        capacity: usize,
    },

    /// A module was left `Unset` or `Reserved` in a finished symbol.
    #[error("module ({x}, {y}) left unfilled in finished symbol")]
    UnfilledModule {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },
}

/// Coarse classification used by callers to map errors onto responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad caller input; never retried.
    Input,
    /// Data exceeds capacity; caller may lower the EC level or split input.
    Capacity,
    /// Engine defect.
    Invariant,
}

impl ErrorClass {
    /// HTTP status a service boundary should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorClass::Input | ErrorClass::Capacity => 400,
            ErrorClass::Invariant => 500,
        }
    }
}

impl EncodingError {
    /// Classify this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            EncodingError::EmptyInput
            | EncodingError::UnsupportedCharacter { .. }
            | EncodingError::InvalidVersionRange { .. }
            | EncodingError::InvalidScale(_)
            | EncodingError::InvalidBorder(_) => ErrorClass::Input,
            EncodingError::DataTooLong { .. } => ErrorClass::Capacity,
            EncodingError::LayoutOverflow { .. }
            | EncodingError::MalformedTable { .. }
            | EncodingError::BitStreamOverflow { .. }
            | EncodingError::UnfilledModule { .. } => ErrorClass::Invariant,
        }
    }

    /// Log invariant violations and pass the error through.
    pub(crate) fn logged(self) -> Self {
        if self.class() == ErrorClass::Invariant {
            tracing::error!(error = %self, "encoder invariant violated");
        }
        self
    }
}

/// Errors produced by the symbol reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Matrix side is not `4v + 17` for a version in `1..=40`.
    #[error("matrix side {0} is not a valid QR dimension")]
    InvalidDimension(usize),

    /// Neither format information copy is within correction distance.
    #[error("format information unreadable")]
    FormatInfo,

    /// Version information disagrees with the dimension or is unreadable.
    #[error("version information unreadable")]
    VersionInfo,

    /// A Reed-Solomon block had more errors than it can correct.
    #[error("block {block} is uncorrectable")]
    Uncorrectable {
        /// Block index in interleave order.
        block: usize,
    },

    /// Data codewords do not form a valid segment sequence.
    #[error("malformed payload: {0}")]
    MalformedPayload(&'static str),
}

/// Errors produced while rasterizing a symbol.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Rejected raster parameters.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The image encoder failed.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Failed to parse an EC level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error correction level {0:?}, expected one of L, M, Q, H")]
pub struct ParseLevelError(pub String);
