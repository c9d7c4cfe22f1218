//! Version and capacity selection

use crate::encoder::EncodeOptions;
use crate::encoder::analyzer::{forced_segment, segment};
use crate::encoder::tables::SymbolSpec;
use crate::error::EncodingError;
use crate::models::segment::total_bits;
use crate::models::{ECLevel, Segment, Version};

/// Chosen symbol layout and the segments that fill it
#[derive(Debug, Clone)]
pub struct Selection {
    /// Version, level and block layout
    pub spec: SymbolSpec,
    /// Segments sized for the chosen version
    pub segments: Vec<Segment>,
    /// Header and payload bits before terminator and padding
    pub data_bits: usize,
}

/// Pick the smallest version in the allowed range that holds `data`
pub fn select(data: &[u8], options: &EncodeOptions) -> Result<Selection, EncodingError> {
    let (min, max) = options.version_range()?;

    let forced = options
        .mode
        .map(|mode| forced_segment(data, mode))
        .transpose()?;

    // Segmentation only depends on the count-indicator width class
    let mut by_class: [Option<Vec<Segment>>; 3] = [None, None, None];
    let mut last_required = 0;
    let mut last_capacity = 0;

    for number in min.number()..=max.number() {
        let Some(version) = Version::new(number) else {
            continue;
        };
        let segments = match by_class[version.count_class()].take() {
            Some(segments) => segments,
            None => match &forced {
                Some(seg) => vec![seg.clone()],
                None => segment(data, version, options.segmentation)?,
            },
        };

        let spec = SymbolSpec::new(version, options.ec_level)?;
        let capacity = spec.data_capacity_bits();
        match total_bits(&segments, version) {
            Some(bits) if bits <= capacity => {
                let selection = boost(
                    Selection {
                        spec,
                        segments,
                        data_bits: bits,
                    },
                    options.boost_ec_level,
                )?;
                tracing::debug!(
                    version = selection.spec.version.number(),
                    ec_level = ?selection.spec.ec_level,
                    bits = selection.data_bits,
                    capacity = selection.spec.data_capacity_bits(),
                    segments = selection.segments.len(),
                    "version selected"
                );
                return Ok(selection);
            }
            bits => {
                last_required = bits.unwrap_or_else(|| unchecked_bits(&segments, version));
                last_capacity = capacity;
            }
        }
        by_class[version.count_class()] = Some(segments);
    }

    let err = EncodingError::DataTooLong {
        required_bits: last_required,
        capacity_bits: last_capacity,
        overflow_bits: last_required.saturating_sub(last_capacity),
    };
    tracing::debug!(error = %err, "no version fits");
    Err(err)
}

/// Raise the EC level while the data still fits the chosen version
fn boost(mut selection: Selection, enabled: bool) -> Result<Selection, EncodingError> {
    if !enabled {
        return Ok(selection);
    }
    for level in ECLevel::ALL {
        if level <= selection.spec.ec_level {
            continue;
        }
        let spec = SymbolSpec::new(selection.spec.version, level)?;
        if selection.data_bits <= spec.data_capacity_bits() {
            selection.spec = spec;
        }
    }
    Ok(selection)
}

/// Encoded length ignoring count-indicator overflow, for error reporting
fn unchecked_bits(segments: &[Segment], version: Version) -> usize {
    segments
        .iter()
        .map(|s| 4 + s.mode().char_count_bits(version) + s.mode().payload_bits(s.char_count()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mode;

    fn options(level: ECLevel) -> EncodeOptions {
        EncodeOptions::new(level).sequential()
    }

    #[test]
    fn test_hello_world_fits_version_1() {
        let selection = select(b"HELLO WORLD", &options(ECLevel::Q)).unwrap();
        assert_eq!(selection.spec.version.number(), 1);
        assert_eq!(selection.data_bits, 74);
        assert_eq!(selection.segments[0].mode(), Mode::Alphanumeric);
    }

    #[test]
    fn test_byte_capacity_boundary() {
        // 1-L holds 17 bytes in byte mode
        let fits = vec![b'a'; 17];
        let over = vec![b'a'; 18];
        assert_eq!(select(&fits, &options(ECLevel::L)).unwrap().spec.version.number(), 1);
        assert_eq!(select(&over, &options(ECLevel::L)).unwrap().spec.version.number(), 2);
    }

    #[test]
    fn test_min_version_respected() {
        let opts = options(ECLevel::L).min_version(5);
        assert_eq!(select(b"A", &opts).unwrap().spec.version.number(), 5);
    }

    #[test]
    fn test_data_too_long_reports_overflow() {
        let data = vec![0xA5u8; 3000];
        let err = select(&data, &options(ECLevel::H)).unwrap_err();
        match err {
            EncodingError::DataTooLong {
                required_bits,
                capacity_bits,
                overflow_bits,
            } => {
                assert_eq!(capacity_bits, 1276 * 8);
                assert_eq!(required_bits, 4 + 16 + 3000 * 8);
                assert_eq!(overflow_bits, required_bits - capacity_bits);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_max_version_caps_search() {
        let opts = options(ECLevel::L).max_version(1);
        let err = select(&[b'a'; 18], &opts).unwrap_err();
        assert!(matches!(err, EncodingError::DataTooLong { overflow_bits: 4, .. }));
    }

    #[test]
    fn test_boost_raises_level() {
        let opts = options(ECLevel::L).boost_ec_level(true);
        // 74 bits also fit 1-Q (104 bits) but not 1-H (72 bits)
        let selection = select(b"HELLO WORLD", &opts).unwrap();
        assert_eq!(selection.spec.version.number(), 1);
        assert_eq!(selection.spec.ec_level, ECLevel::Q);
    }

    #[test]
    fn test_invalid_range() {
        let opts = options(ECLevel::L).min_version(10).max_version(3);
        assert_eq!(
            select(b"1", &opts).unwrap_err(),
            EncodingError::InvalidVersionRange { min: 10, max: 3 }
        );
    }
}
