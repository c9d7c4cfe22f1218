use std::sync::OnceLock;

/// Segmentation policy used by the data analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segmentation {
    /// Merge maximal character-class runs while merging saves bits
    #[default]
    Greedy,
    /// Minimal-bit segmentation by dynamic programming
    Optimal,
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

fn parse_env_segmentation(name: &str, default: Segmentation) -> Segmentation {
    match std::env::var(name) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "greedy" => Segmentation::Greedy,
            "optimal" => Segmentation::Optimal,
            _ => default,
        },
        Err(_) => default,
    }
}

static SEGMENTATION: OnceLock<Segmentation> = OnceLock::new();

pub(crate) fn default_segmentation() -> Segmentation {
    *SEGMENTATION.get_or_init(|| parse_env_segmentation("QR_SEGMENTATION", Segmentation::Greedy))
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

pub(crate) fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variables_fall_back() {
        assert!(parse_env_bool_u8("QR_TEST_UNSET_FLAG", true));
        assert_eq!(
            parse_env_segmentation("QR_TEST_UNSET_POLICY", Segmentation::Optimal),
            Segmentation::Optimal
        );
    }
}
