//! Function patterns: finders, separators, timing, alignment and the
//! reserved format and version areas.

use crate::models::{EcLevel, MaskPattern, ModuleGrid, Version};

use super::format::{draw_format_bits, draw_version_bits};

/// Grid with every function module of `version` drawn and reserved.
///
/// Format information is drawn with a placeholder; the encoder overwrites it
/// once the mask is known.
pub fn build(version: Version) -> ModuleGrid {
    let size = version.size();
    let mut grid = ModuleGrid::new(size);

    // Timing patterns (row 6 and column 6)
    for i in 0..size {
        grid.set_function(6, i, i % 2 == 0);
        grid.set_function(i, 6, i % 2 == 0);
    }

    // Finder patterns + separators (clipped to bounds)
    draw_finder(&mut grid, 3, 3);
    draw_finder(&mut grid, size - 4, 3);
    draw_finder(&mut grid, 3, size - 4);

    // Alignment patterns, except where they would overlap a finder
    let align = alignment_pattern_positions(version);
    let last = align.len().saturating_sub(1);
    for (i, &cx) in align.iter().enumerate() {
        for (j, &cy) in align.iter().enumerate() {
            let on_finder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !on_finder {
                draw_alignment(&mut grid, cx, cy);
            }
        }
    }

    draw_format_bits(&mut grid, EcLevel::M, MaskPattern::Pattern0);
    draw_version_bits(&mut grid, version);
    grid
}

fn draw_finder(grid: &mut ModuleGrid, cx: usize, cy: usize) {
    let size = grid.size() as isize;
    for dy in -4isize..=4 {
        for dx in -4isize..=4 {
            let x = cx as isize + dx;
            let y = cy as isize + dy;
            if (0..size).contains(&x) && (0..size).contains(&y) {
                let dist = dx.abs().max(dy.abs());
                grid.set_function(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }
}

fn draw_alignment(grid: &mut ModuleGrid, cx: usize, cy: usize) {
    for dy in 0..5usize {
        for dx in 0..5usize {
            let dist = dx.abs_diff(2).max(dy.abs_diff(2));
            grid.set_function(cx - 2 + dx, cy - 2 + dy, dist != 1);
        }
    }
}

/// Alignment pattern centers for a given version, ascending.
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let step = (v * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;

    let last = version.size() - 7;
    let mut positions = vec![6usize; num_align];
    for (k, slot) in positions.iter_mut().skip(1).rev().enumerate() {
        *slot = last - k * step;
    }
    positions
}

/// Number of modules left for data and ECC bits
pub fn data_module_count(grid: &ModuleGrid) -> usize {
    let size = grid.size();
    size * size - grid.reserved().count_ones()
}
