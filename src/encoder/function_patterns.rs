use crate::models::{ModuleMatrix, Version};

/// Allocate a matrix for `version` with every function pattern drawn and the
/// format/version areas reserved.
pub fn function_matrix(version: Version) -> ModuleMatrix {
    let mut matrix = ModuleMatrix::new(version);
    let size = matrix.size();

    // Timing patterns (row 6 and column 6); finders overwrite the ends
    for i in 0..size {
        matrix.set_function(6, i, i % 2 == 0);
        matrix.set_function(i, 6, i % 2 == 0);
    }

    // Finder patterns + separators
    draw_finder(&mut matrix, 3, 3);
    draw_finder(&mut matrix, size - 4, 3);
    draw_finder(&mut matrix, 3, size - 4);

    // Alignment patterns
    let align = alignment_pattern_positions(version);
    let last = align.len().saturating_sub(1);
    for (i, &cx) in align.iter().enumerate() {
        for (j, &cy) in align.iter().enumerate() {
            // Skip the three finder corners
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            draw_alignment(&mut matrix, cx, cy);
        }
    }

    reserve_format_areas(&mut matrix);

    // Dark module
    matrix.set_function(8, size - 8, true);

    // Version info (v7+)
    if version.number() >= 7 {
        for dy in 0..6 {
            for dx in 0..3 {
                matrix.reserve(size - 11 + dx, dy);
                matrix.reserve(dy, size - 11 + dx);
            }
        }
    }

    matrix
}

/// 7x7 finder centered at (cx, cy) with its one-module light separator
fn draw_finder(matrix: &mut ModuleMatrix, cx: usize, cy: usize) {
    let size = matrix.size() as isize;
    for dy in -4isize..=4 {
        for dx in -4isize..=4 {
            let x = cx as isize + dx;
            let y = cy as isize + dy;
            if x < 0 || y < 0 || x >= size || y >= size {
                continue;
            }
            let dist = dx.abs().max(dy.abs());
            matrix.set_function(x as usize, y as usize, dist != 2 && dist != 4);
        }
    }
}

/// 5x5 alignment pattern centered at (cx, cy)
fn draw_alignment(matrix: &mut ModuleMatrix, cx: usize, cy: usize) {
    for dy in -2isize..=2 {
        for dx in -2isize..=2 {
            let x = (cx as isize + dx) as usize;
            let y = (cy as isize + dy) as usize;
            matrix.set_function(x, y, dx.abs().max(dy.abs()) != 1);
        }
    }
}

/// Reserve both format information copies
fn reserve_format_areas(matrix: &mut ModuleMatrix) {
    let size = matrix.size();
    for i in 0..9 {
        if i != 6 {
            matrix.reserve(8, i);
            matrix.reserve(i, 8);
        }
    }
    for i in 0..8 {
        matrix.reserve(size - 1 - i, 8);
    }
    for i in 0..7 {
        matrix.reserve(8, size - 1 - i);
    }
}

/// Alignment pattern centers for a given version.
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let step = (v * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;

    let mut positions = vec![0usize; num_align];
    positions[0] = 6;
    let mut pos = version.size() - 7;
    for i in (1..num_align).rev() {
        positions[i] = pos;
        pos -= step;
    }
    positions
}
