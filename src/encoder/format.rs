/// Format and version information placement
use crate::models::{EcLevel, MaskPattern, ModuleGrid, Version};

use super::bch::Bch;

/// Module coordinates `(x, y)` of the two format information copies,
/// indexed by bit (bit 0 is the least significant)
pub fn format_positions(size: usize) -> ([(usize, usize); 15], [(usize, usize); 15]) {
    let mut first = [(0, 0); 15];
    let mut second = [(0, 0); 15];
    for (i, slot) in first.iter_mut().enumerate() {
        *slot = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
    }
    for (i, slot) in second.iter_mut().enumerate() {
        *slot = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
    }
    (first, second)
}

/// Module coordinates of the two version information copies, indexed by bit
pub fn version_positions(size: usize) -> [((usize, usize), (usize, usize)); 18] {
    let mut positions = [((0, 0), (0, 0)); 18];
    for (i, slot) in positions.iter_mut().enumerate() {
        let a = size - 11 + i % 3;
        let b = i / 3;
        *slot = ((a, b), (b, a));
    }
    positions
}

/// Write both format information copies and the dark module
pub fn draw_format_bits(grid: &mut ModuleGrid, ec_level: EcLevel, mask: MaskPattern) {
    let bits = Bch::format_bits(ec_level, mask);
    let size = grid.size();
    let (first, second) = format_positions(size);
    for i in 0..15 {
        let dark = (bits >> i) & 1 == 1;
        grid.set_function(first[i].0, first[i].1, dark);
        grid.set_function(second[i].0, second[i].1, dark);
    }
    grid.set_function(8, size - 8, true);
}

/// Write both version information blocks; no-op below version 7
pub fn draw_version_bits(grid: &mut ModuleGrid, version: Version) {
    if version.number() < 7 {
        return;
    }
    let bits = Bch::version_bits(version);
    for (i, &(a, b)) in version_positions(grid.size()).iter().enumerate() {
        let dark = (bits >> i) & 1 == 1;
        grid.set_function(a.0, a.1, dark);
        grid.set_function(b.0, b.1, dark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_copies_agree() {
        let mut grid = ModuleGrid::new(21);
        draw_format_bits(&mut grid, EcLevel::L, MaskPattern::Pattern4);
        let (first, second) = format_positions(21);
        let expected = Bch::format_bits(EcLevel::L, MaskPattern::Pattern4);
        let read = |positions: &[(usize, usize); 15]| {
            positions
                .iter()
                .enumerate()
                .fold(0u16, |acc, (i, &(x, y))| acc | (grid.is_dark(x, y) as u16) << i)
        };
        assert_eq!(read(&first), expected);
        assert_eq!(read(&second), expected);
        assert!(grid.is_dark(8, 13));
    }

    #[test]
    fn test_version_block() {
        let version = Version::new(7).unwrap();
        let mut grid = ModuleGrid::new(version.size());
        draw_version_bits(&mut grid, version);
        // 0x07C94: bit 2 set, bits 0 and 1 clear
        assert!(!grid.is_dark(34, 0));
        assert!(!grid.is_dark(35, 0));
        assert!(grid.is_dark(36, 0));
        assert!(grid.is_dark(0, 36));
        assert_eq!(grid.reserved().count_ones(), 36);
    }
}
