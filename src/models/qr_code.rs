use super::ModuleMatrix;
use crate::error::ParseLevelError;
use std::fmt;
use std::str::FromStr;

/// QR Code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version
    pub const MIN: Version = Version(1);
    /// Largest version
    pub const MAX: Version = Version(40);

    /// Create a version, `None` outside 1-40
    pub fn new(number: u8) -> Option<Self> {
        (1..=40).contains(&number).then_some(Version(number))
    }

    /// Get the version number
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * (self.0 as usize) + 17
    }

    /// Infer the version from a matrix side length
    pub fn from_size(size: usize) -> Option<Self> {
        if size < 21 || (size - 17) % 4 != 0 {
            return None;
        }
        u8::try_from((size - 17) / 4).ok().and_then(Version::new)
    }

    /// Character-count indicator width class: 0 for 1-9, 1 for 10-26, 2 for 27-40
    pub(crate) fn count_class(&self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    #[default]
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels, weakest first
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two-bit value stored in format information (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// Row index into the capacity tables
    pub(crate) fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl FromStr for ECLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(ECLevel::L),
            "M" => Ok(ECLevel::M),
            "Q" => Ok(ECLevel::Q),
            "H" => Ok(ECLevel::H),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All patterns in id order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from bits
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// Mask id (0-7)
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Check if module at row `i`, column `j` is flipped by this mask
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Segment encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// Digits 0-9
    Numeric,
    /// 0-9, A-Z, space, $%*+-./:
    Alphanumeric,
    /// Arbitrary 8-bit data
    Byte,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Mode for a 4-bit indicator read from a symbol
    pub fn from_indicator(bits: u32) -> Option<Self> {
        match bits {
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::Alphanumeric),
            0b0100 => Some(Mode::Byte),
            _ => None,
        }
    }

    /// Width of the character-count indicator at `version`
    pub fn char_count_bits(&self, version: Version) -> usize {
        let widths = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
        };
        widths[version.count_class()]
    }

    /// Whether `byte` can be represented in this mode
    pub fn accepts(&self, byte: u8) -> bool {
        match self {
            Mode::Numeric => byte.is_ascii_digit(),
            Mode::Alphanumeric => alphanumeric_value(byte).is_some(),
            Mode::Byte => true,
        }
    }

    /// Payload bits for `count` characters
    pub fn payload_bits(&self, count: usize) -> usize {
        match self {
            Mode::Numeric => 10 * (count / 3) + [0, 4, 7][count % 3],
            Mode::Alphanumeric => 11 * (count / 2) + 6 * (count % 2),
            Mode::Byte => 8 * count,
        }
    }

    /// Narrowest mode able to hold `byte`
    pub fn narrowest_for(byte: u8) -> Self {
        if byte.is_ascii_digit() {
            Mode::Numeric
        } else if alphanumeric_value(byte).is_some() {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }
}

/// The 45-symbol alphanumeric alphabet, in code order
pub const ALPHANUMERIC_TABLE: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Code of `byte` in the alphanumeric alphabet
pub fn alphanumeric_value(byte: u8) -> Option<u16> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u16),
        b'A'..=b'Z' => Some((byte - b'A') as u16 + 10),
        b' ' => Some(36),
        b'$' => Some(37),
        b'%' => Some(38),
        b'*' => Some(39),
        b'+' => Some(40),
        b'-' => Some(41),
        b'.' => Some(42),
        b'/' => Some(43),
        b':' => Some(44),
        _ => None,
    }
}

/// Encoded QR code
#[derive(Debug, Clone)]
pub struct QrCode {
    /// QR code version
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern used
    pub mask_pattern: MaskPattern,
    /// Penalty score of the selected mask
    pub penalty: u32,
    /// Modes of the encoded segments, in order
    pub modes: Vec<Mode>,
    /// Finished module matrix
    pub modules: ModuleMatrix,
}

impl QrCode {
    /// Side length in modules
    pub fn size(&self) -> usize {
        self.modules.size()
    }
}
