//! Data analysis: splitting input bytes into mode segments.
//!
//! Two policies are available. Greedy classifies maximal runs by their
//! narrowest mode and merges neighbours while a merge saves bits. Optimal
//! runs a shortest-path search over per-character mode states and always
//! finds the minimal-bit segmentation.

use crate::config::Segmentation;
use crate::error::EncodingError;
use crate::models::{Mode, Segment, Version};

const MODES: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];

/// Segment `data` for the count-indicator widths of `version`
pub fn segment(
    data: &[u8],
    version: Version,
    policy: Segmentation,
) -> Result<Vec<Segment>, EncodingError> {
    if data.is_empty() {
        return Err(EncodingError::EmptyInput);
    }
    let segments = match policy {
        Segmentation::Greedy => greedy(data, version),
        Segmentation::Optimal => optimal(data, version),
    };
    tracing::trace!(
        version = version.number(),
        ?policy,
        segments = segments.len(),
        "input segmented"
    );
    Ok(segments)
}

/// Encode all of `data` in `mode`, rejecting bytes the mode cannot hold
pub fn forced_segment(data: &[u8], mode: Mode) -> Result<Segment, EncodingError> {
    if data.is_empty() {
        return Err(EncodingError::EmptyInput);
    }
    if let Some(offset) = data.iter().position(|&b| !mode.accepts(b)) {
        return Err(EncodingError::UnsupportedCharacter {
            mode,
            byte: data[offset],
            offset,
        });
    }
    Ok(Segment::new(mode, data.to_vec()))
}

fn segment_cost(mode: Mode, len: usize, version: Version) -> usize {
    4 + mode.char_count_bits(version) + mode.payload_bits(len)
}

/// Maximal runs of bytes sharing the same narrowest mode
fn class_runs(data: &[u8]) -> Vec<(Mode, &[u8])> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=data.len() {
        if i == data.len() || Mode::narrowest_for(data[i]) != Mode::narrowest_for(data[start]) {
            runs.push((Mode::narrowest_for(data[start]), &data[start..i]));
            start = i;
        }
    }
    runs
}

fn greedy(data: &[u8], version: Version) -> Vec<Segment> {
    let mut stack: Vec<(Mode, Vec<u8>)> = Vec::new();

    for (mode, bytes) in class_runs(data) {
        let mut current = (mode, bytes.to_vec());
        while let Some((prev_mode, prev_bytes)) = stack.last() {
            let merged_mode = (*prev_mode).max(current.0);
            let merged_len = prev_bytes.len() + current.1.len();
            let separate = segment_cost(*prev_mode, prev_bytes.len(), version)
                + segment_cost(current.0, current.1.len(), version);
            // Equal cost keeps the more restrictive split
            if segment_cost(merged_mode, merged_len, version) >= separate {
                break;
            }
            if let Some((_, mut bytes)) = stack.pop() {
                bytes.extend_from_slice(&current.1);
                current = (merged_mode, bytes);
            }
        }
        stack.push(current);
    }

    stack
        .into_iter()
        .map(|(mode, bytes)| Segment::new(mode, bytes))
        .collect()
}

fn mode_index(mode: Mode) -> usize {
    match mode {
        Mode::Numeric => 0,
        Mode::Alphanumeric => 1,
        Mode::Byte => 2,
    }
}

/// Per-character cost in sixths of a bit
fn char_cost(mode: Mode) -> usize {
    match mode {
        Mode::Numeric => 20,
        Mode::Alphanumeric => 33,
        Mode::Byte => 48,
    }
}

fn optimal(data: &[u8], version: Version) -> Vec<Segment> {
    let head: [usize; 3] = MODES.map(|m| (4 + m.char_count_bits(version)) * 6);

    // char_modes[i][j]: mode used for byte i when the state after byte i is MODES[j]
    let mut char_modes: Vec<[Option<Mode>; 3]> = vec![[None; 3]; data.len()];
    let mut prev_costs = head;

    for (i, &byte) in data.iter().enumerate() {
        let mut cur_costs = [usize::MAX; 3];
        let mut reached = [None; 3];
        for (j, &mode) in MODES.iter().enumerate() {
            if mode.accepts(byte) {
                cur_costs[j] = prev_costs[j] + char_cost(mode);
                reached[j] = Some(mode);
            }
        }

        // Close the current segment after this byte and open one in another mode
        let extended = cur_costs;
        char_modes[i] = reached;
        for j in 0..MODES.len() {
            for (k, from) in reached.iter().enumerate() {
                let Some(from) = *from else { continue };
                let switched = extended[k].div_ceil(6) * 6 + head[j];
                if char_modes[i][j].is_none() || switched < cur_costs[j] {
                    cur_costs[j] = switched;
                    char_modes[i][j] = Some(from);
                }
            }
        }
        prev_costs = cur_costs;
    }

    let mut state = (0..MODES.len())
        .min_by_key(|&j| prev_costs[j])
        .map_or(Mode::Byte, |j| MODES[j]);
    let mut modes = vec![Mode::Byte; data.len()];
    for i in (0..data.len()).rev() {
        state = char_modes[i][mode_index(state)].unwrap_or(Mode::Byte);
        modes[i] = state;
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..=data.len() {
        if i == data.len() || modes[i] != modes[start] {
            segments.push(Segment::new(modes[start], data[start..i].to_vec()));
            start = i;
        }
    }
    segments
}
