//! Data masking and mask selection.
//!
//! Penalty rules:
//! - N1: runs of five or more same-coloured modules in a row or column
//! - N2: 2x2 blocks of one colour
//! - N3: 1:1:3:1:1 finder-like patterns with four light modules on one side
//! - N4: deviation of the dark share from 50%

use rayon::prelude::*;

use crate::models::{EcLevel, MaskPattern, ModuleGrid};

use super::format::draw_format_bits;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// Invert every data module selected by `mask`
pub fn apply(grid: &mut ModuleGrid, mask: MaskPattern) {
    let size = grid.size();
    for y in 0..size {
        for x in 0..size {
            if mask.is_masked(y, x) {
                grid.flip_data(x, y);
            }
        }
    }
}

/// Penalty score of a finished grid, format information included
pub fn penalty(grid: &ModuleGrid) -> u32 {
    let size = grid.size();
    let mut result = 0;

    // N1 and N3 over rows, then over columns
    for line in 0..size {
        result += line_penalty(size, |i| grid.is_dark(i, line));
        result += line_penalty(size, |i| grid.is_dark(line, i));
    }

    // N2
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = grid.is_dark(x, y);
            if color == grid.is_dark(x + 1, y)
                && color == grid.is_dark(x, y + 1)
                && color == grid.is_dark(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }

    // N4: smallest k such that the dark share lies within (45-5k)%..(55+5k)%
    let total = (size * size) as i64;
    let dark = grid.dark_count() as i64;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    result += k.max(0) as u32 * PENALTY_N4;

    result
}

/// N1 and N3 contributions of one row or column
fn line_penalty(size: usize, is_dark: impl Fn(usize) -> bool) -> u32 {
    let mut result = 0;
    let mut history = RunHistory::new(size);
    let mut run_color = false;
    let mut run_len = 0;

    for i in 0..size {
        if is_dark(i) == run_color {
            run_len += 1;
            if run_len == 5 {
                result += PENALTY_N1;
            } else if run_len > 5 {
                result += 1;
            }
        } else {
            history.push(run_len);
            if !run_color {
                result += history.count_finder_patterns() * PENALTY_N3;
            }
            run_color = is_dark(i);
            run_len = 1;
        }
    }
    result + history.terminate(run_color, run_len) * PENALTY_N3
}

/// Lengths of the last seven runs, newest first; the area outside the symbol
/// counts as light
struct RunHistory {
    size: usize,
    runs: [usize; 7],
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self { size, runs: [0; 7] }
    }

    fn push(&mut self, mut run_len: usize) {
        if self.runs[0] == 0 {
            // First run of the line borders the light quiet zone
            run_len += self.size;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = run_len;
    }

    /// Finder-like patterns ending at the most recent light run
    fn count_finder_patterns(&self) -> u32 {
        let h = &self.runs;
        let n = h[1];
        let core = n > 0 && h[2] == n && h[3] == n * 3 && h[4] == n && h[5] == n;
        u32::from(core && h[0] >= n * 4 && h[6] >= n) + u32::from(core && h[6] >= n * 4 && h[0] >= n)
    }

    fn terminate(&mut self, run_color: bool, mut run_len: usize) -> u32 {
        if run_color {
            self.push(run_len);
            run_len = 0;
        }
        run_len += self.size;
        self.push(run_len);
        self.count_finder_patterns()
    }
}

/// Chosen mask and the finished grid it produced
#[derive(Debug, Clone)]
pub struct MaskCandidate {
    /// Pattern applied
    pub mask: MaskPattern,
    /// Penalty of the masked grid
    pub penalty: u32,
    /// Masked grid with final format information
    pub grid: ModuleGrid,
}

/// Apply `mask` to a copy of `grid` and write the format bits for it
pub fn masked(grid: &ModuleGrid, ec_level: EcLevel, mask: MaskPattern) -> ModuleGrid {
    let mut candidate = grid.clone();
    apply(&mut candidate, mask);
    draw_format_bits(&mut candidate, ec_level, mask);
    candidate
}

/// Penalty of every mask, evaluated in parallel, in mask index order
pub fn evaluate_all(grid: &ModuleGrid, ec_level: EcLevel) -> Vec<(MaskPattern, u32)> {
    MaskPattern::ALL
        .par_iter()
        .map(|&mask| (mask, penalty(&masked(grid, ec_level, mask))))
        .collect()
}

/// Lowest-penalty mask; ties go to the lowest mask index
pub fn select_best(grid: &ModuleGrid, ec_level: EcLevel) -> MaskCandidate {
    let (mask, penalty) = evaluate_all(grid, ec_level).into_iter().fold(
        (MaskPattern::Pattern0, u32::MAX),
        |best, (mask, penalty)| {
            if penalty < best.1 {
                (mask, penalty)
            } else {
                best
            }
        },
    );
    MaskCandidate {
        mask,
        penalty,
        grid: masked(grid, ec_level, mask),
    }
}
