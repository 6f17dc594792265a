/// Zig-zag placement of codeword bits into the data area
use crate::models::ModuleGrid;

/// Data module coordinates `(x, y)` in placement order.
///
/// Column pairs are walked right to left, skipping the vertical timing
/// column, alternating upward and downward; reserved modules are skipped.
pub fn data_positions(grid: &ModuleGrid) -> Vec<(usize, usize)> {
    let size = grid.size();
    let mut positions = Vec::with_capacity(size * size);

    let mut upward = true;
    let mut col = size as isize - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }

        let right = col as usize;
        let left = right - 1;
        let mut visit = |row: usize| {
            for x in [right, left] {
                if !grid.is_reserved(x, row) {
                    positions.push((x, row));
                }
            }
        };

        if upward {
            (0..size).rev().for_each(&mut visit);
        } else {
            (0..size).for_each(&mut visit);
        }

        upward = !upward;
        col -= 2;
    }

    positions
}

/// Write `codewords` MSB first along the zig-zag path; modules past the last
/// bit (remainder bits) stay light
pub fn place_codewords(grid: &mut ModuleGrid, codewords: &[u8]) {
    let total_bits = codewords.len() * 8;
    for (i, (x, y)) in data_positions(grid).into_iter().enumerate() {
        let dark = i < total_bits && (codewords[i / 8] >> (7 - i % 8)) & 1 == 1;
        grid.set_data(x, y, dark);
    }
}
