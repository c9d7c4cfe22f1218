//! Mask application, penalty scoring and mask selection

use crate::encoder::format::{write_format_info, write_version_info};
use crate::models::{ECLevel, MaskPattern, ModuleMatrix};
use rayon::prelude::*;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// Dark-light-dark-dark-dark-light-dark followed or preceded by four light modules
const FINDER_LIKE: [[bool; 11]; 2] = [
    [
        true, false, true, true, true, false, true, false, false, false, false,
    ],
    [
        false, false, false, false, true, false, true, true, true, false, true,
    ],
];

/// A fully masked symbol with its score
#[derive(Debug, Clone)]
pub struct MaskCandidate {
    /// Mask applied to the data modules
    pub mask: MaskPattern,
    /// Masked symbol with format and version info written
    pub matrix: ModuleMatrix,
    /// Sum of the four penalty rules
    pub penalty: u32,
}

/// Toggle every non-function module selected by `mask`
pub fn apply_mask(matrix: &mut ModuleMatrix, mask: MaskPattern) {
    let size = matrix.size();
    for y in 0..size {
        for x in 0..size {
            if !matrix.is_function(x, y) && mask.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Mask a copy of `base`, write format/version info and score it
pub fn evaluate(base: &ModuleMatrix, ec_level: ECLevel, mask: MaskPattern) -> MaskCandidate {
    let mut matrix = base.clone();
    apply_mask(&mut matrix, mask);
    write_format_info(&mut matrix, ec_level, mask);
    write_version_info(&mut matrix);
    let penalty = penalty_score(&matrix);
    tracing::trace!(mask = mask.id(), penalty, "mask candidate scored");
    MaskCandidate {
        mask,
        matrix,
        penalty,
    }
}

/// Score every candidate mask (or only `forced`) and keep the lowest penalty
pub fn choose_mask(
    base: &ModuleMatrix,
    ec_level: ECLevel,
    forced: Option<MaskPattern>,
    parallel: bool,
) -> MaskCandidate {
    if let Some(mask) = forced {
        return evaluate(base, ec_level, mask);
    }

    let (first, rest) = MaskPattern::ALL.split_at(1);
    let first = evaluate(base, ec_level, first[0]);
    let rest: Vec<MaskCandidate> = if parallel {
        rest.par_iter()
            .map(|&mask| evaluate(base, ec_level, mask))
            .collect()
    } else {
        rest.iter()
            .map(|&mask| evaluate(base, ec_level, mask))
            .collect()
    };

    let winner = pick_lowest(first, rest);
    tracing::debug!(
        mask = winner.mask.id(),
        penalty = winner.penalty,
        "mask selected"
    );
    winner
}

/// Lowest penalty wins; equal penalties go to the lower mask id
pub fn pick_lowest(first: MaskCandidate, rest: Vec<MaskCandidate>) -> MaskCandidate {
    rest.into_iter().fold(first, |best, candidate| {
        if (candidate.penalty, candidate.mask.id()) < (best.penalty, best.mask.id()) {
            candidate
        } else {
            best
        }
    })
}

/// Penalty for each mask applied to `base`, in mask id order
pub fn penalty_table(base: &ModuleMatrix, ec_level: ECLevel) -> Vec<(MaskPattern, u32)> {
    MaskPattern::ALL
        .iter()
        .map(|&mask| (mask, evaluate(base, ec_level, mask).penalty))
        .collect()
}

/// Sum of the four penalty rules
pub fn penalty_score(matrix: &ModuleMatrix) -> u32 {
    let size = matrix.size();
    let rows: Vec<Vec<bool>> = (0..size)
        .map(|y| (0..size).map(|x| matrix.is_dark(x, y)).collect())
        .collect();
    let cols: Vec<Vec<bool>> = (0..size)
        .map(|x| (0..size).map(|y| matrix.is_dark(x, y)).collect())
        .collect();

    let mut penalty = 0;
    for line in rows.iter().chain(cols.iter()) {
        penalty += run_penalty(line);
        penalty += finder_like_penalty(line);
    }
    penalty += block_penalty(&rows);
    penalty += balance_penalty(matrix.dark_count(), size * size);
    penalty
}

/// Rule 1: runs of five or more same-colored modules
fn run_penalty(line: &[bool]) -> u32 {
    let mut penalty = 0;
    let mut run = 0u32;
    let mut color = None;
    for &module in line {
        if color == Some(module) {
            run += 1;
        } else {
            if run >= 5 {
                penalty += PENALTY_N1 + run - 5;
            }
            color = Some(module);
            run = 1;
        }
    }
    if run >= 5 {
        penalty += PENALTY_N1 + run - 5;
    }
    penalty
}

/// Rule 2: uniform 2x2 blocks
fn block_penalty(rows: &[Vec<bool>]) -> u32 {
    rows.windows(2)
        .map(|pair| {
            let (top, bottom) = (&pair[0], &pair[1]);
            (0..top.len().saturating_sub(1))
                .filter(|&x| {
                    let c = top[x];
                    top[x + 1] == c && bottom[x] == c && bottom[x + 1] == c
                })
                .count() as u32
        })
        .sum::<u32>()
        * PENALTY_N2
}

/// Rule 3: 1:1:3:1:1 finder-like patterns with a four-module light margin.
///
/// Only 11-module windows lying wholly inside the symbol are scored. The
/// quiet zone is not treated as light margin, so a pattern touching the
/// symbol edge counts only if its four light modules are inside too.
fn finder_like_penalty(line: &[bool]) -> u32 {
    line.windows(11)
        .map(|w| FINDER_LIKE.iter().filter(|p| w == p.as_slice()).count() as u32)
        .sum::<u32>()
        * PENALTY_N3
}

/// Rule 4: deviation of the dark ratio from 50%, in 5% steps
fn balance_penalty(dark: usize, total: usize) -> u32 {
    let deviation = (dark * 20).abs_diff(total * 10);
    let k = (deviation + total - 1) / total;
    k.saturating_sub(1) as u32 * PENALTY_N4
}
