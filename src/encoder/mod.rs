//! QR code encoding pipeline.
//!
//! Stages run leaf-first: analyzer, capacity selection, bit stream,
//! Reed-Solomon, function patterns and placement, then mask selection.

/// Segmentation of input bytes into modes
pub mod analyzer;
/// Data codeword construction
pub mod bitstream;
/// Version and capacity selection
pub mod capacity;
/// Format and version information
pub mod format;
/// Finder, timing and alignment patterns
pub mod function_patterns;
/// Mask application and penalty scoring
pub mod mask;
/// Per-mode payload encoders
pub mod modes;
/// Zigzag codeword placement
pub mod placement;
/// GF(256) Reed-Solomon coding and interleaving
pub mod reed_solomon;
/// Codeword and block tables
pub mod tables;

use crate::config::{Segmentation, default_segmentation, parallel_masks};
use crate::error::EncodingError;
use crate::models::{ECLevel, MaskPattern, Mode, QrCode, Version};

/// Options controlling a single encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Error correction level (raised further if `boost_ec_level`)
    pub ec_level: ECLevel,
    /// Smallest version to consider
    pub min_version: u8,
    /// Largest version to consider
    pub max_version: u8,
    /// Force a mask instead of picking the lowest penalty
    pub mask: Option<MaskPattern>,
    /// Force a single segment in this mode
    pub mode: Option<Mode>,
    /// Segmentation policy
    pub segmentation: Segmentation,
    /// Raise the EC level while the data still fits the chosen version
    pub boost_ec_level: bool,
    /// Score mask candidates on the rayon pool
    pub parallel_masks: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::L,
            min_version: Version::MIN.number(),
            max_version: Version::MAX.number(),
            mask: None,
            mode: None,
            segmentation: default_segmentation(),
            boost_ec_level: false,
            parallel_masks: parallel_masks(),
        }
    }
}

impl EncodeOptions {
    /// Defaults with the given EC level
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            ..Self::default()
        }
    }

    /// Set the smallest version considered
    pub fn min_version(mut self, version: u8) -> Self {
        self.min_version = version;
        self
    }

    /// Set the largest version considered
    pub fn max_version(mut self, version: u8) -> Self {
        self.max_version = version;
        self
    }

    /// Force a mask pattern
    pub fn mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Force a single-mode segment
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Choose the segmentation policy
    pub fn segmentation(mut self, policy: Segmentation) -> Self {
        self.segmentation = policy;
        self
    }

    /// Enable or disable EC level boosting
    pub fn boost_ec_level(mut self, enabled: bool) -> Self {
        self.boost_ec_level = enabled;
        self
    }

    /// Score masks on the calling thread only
    pub fn sequential(mut self) -> Self {
        self.parallel_masks = false;
        self
    }

    /// Validated `(min, max)` versions
    pub fn version_range(&self) -> Result<(Version, Version), EncodingError> {
        let invalid = EncodingError::InvalidVersionRange {
            min: self.min_version,
            max: self.max_version,
        };
        match (Version::new(self.min_version), Version::new(self.max_version)) {
            (Some(min), Some(max)) if min <= max => Ok((min, max)),
            _ => Err(invalid),
        }
    }
}

/// Reusable encoder holding a set of options
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    options: EncodeOptions,
}

impl QrEncoder {
    /// Create an encoder with the given options
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Options used by this encoder
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode `data` into a finished symbol
    pub fn encode(&self, data: &[u8]) -> Result<QrCode, EncodingError> {
        encode_with_options(data, &self.options)
    }
}

/// Run the full pipeline for `data`
pub fn encode_with_options(data: &[u8], options: &EncodeOptions) -> Result<QrCode, EncodingError> {
    let selection = capacity::select(data, options)?;
    let spec = &selection.spec;

    let data_codewords = bitstream::encode_segments(&selection.segments, spec)?;
    let codewords = reed_solomon::add_error_correction(&data_codewords, spec)?;

    let mut base = function_patterns::function_matrix(spec.version);
    placement::place_codewords(&mut base, &codewords)?;

    let chosen = mask::choose_mask(&base, spec.ec_level, options.mask, options.parallel_masks);
    if let Some((x, y)) = chosen.matrix.first_unfilled() {
        return Err(EncodingError::UnfilledModule { x, y }.logged());
    }

    tracing::debug!(
        version = spec.version.number(),
        ec_level = ?spec.ec_level,
        mask = chosen.mask.id(),
        penalty = chosen.penalty,
        codewords = codewords.len(),
        "symbol encoded"
    );

    Ok(QrCode {
        version: spec.version,
        error_correction: spec.ec_level,
        mask_pattern: chosen.mask,
        penalty: chosen.penalty,
        modes: selection.segments.iter().map(|s| s.mode()).collect(),
        modules: chosen.matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = EncodeOptions::default();
        assert_eq!(opts.ec_level, ECLevel::L);
        assert_eq!(opts.version_range().unwrap(), (Version::MIN, Version::MAX));
        assert!(opts.mask.is_none());
        assert!(opts.mode.is_none());
        assert!(!opts.boost_ec_level);
    }

    #[test]
    fn test_version_range_validation() {
        assert!(EncodeOptions::default().min_version(0).version_range().is_err());
        assert!(EncodeOptions::default().max_version(41).version_range().is_err());
        let (min, max) = EncodeOptions::default()
            .min_version(3)
            .max_version(3)
            .version_range()
            .unwrap();
        assert_eq!(min, max);
    }

    #[test]
    fn test_encode_hello_world() {
        let code = encode_with_options(b"HELLO WORLD", &EncodeOptions::new(ECLevel::Q)).unwrap();
        assert_eq!(code.version.number(), 1);
        assert_eq!(code.error_correction, ECLevel::Q);
        assert_eq!(code.modes, vec![Mode::Alphanumeric]);
        assert_eq!(code.size(), 21);
        assert!(code.modules.first_unfilled().is_none());
    }

    #[test]
    fn test_forced_mask_and_mode() {
        let opts = EncodeOptions::new(ECLevel::M)
            .mask(MaskPattern::Pattern3)
            .mode(Mode::Byte);
        let code = QrEncoder::new(opts).encode(b"12345").unwrap();
        assert_eq!(code.mask_pattern, MaskPattern::Pattern3);
        assert_eq!(code.modes, vec![Mode::Byte]);
    }

    #[test]
    fn test_version_7_has_version_blocks() {
        let opts = EncodeOptions::new(ECLevel::L).min_version(7);
        let code = encode_with_options(b"version info", &opts).unwrap();
        assert_eq!(code.version.number(), 7);
        // Top-right block, bit 0 of 0x07C94 is light
        let size = code.size();
        assert!(code.modules.is_function(size - 11, 0));
        assert!(!code.modules.is_dark(size - 11, 0));
    }
}
