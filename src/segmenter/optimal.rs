//! Minimum-length mode assignment.
//!
//! Dynamic program over the characters. Costs are kept in sixths of a bit so
//! numeric (10/3 bits per digit) and alphanumeric (11/2 bits per character)
//! stay integral. Switching into a mode pays its header (indicator plus
//! character count bits) after rounding the running cost up to a whole bit.

use crate::models::Version;
use crate::modes::{AlphanumericCodec, Mode, NumericCodec};

const MODES: [Mode; 3] = [Mode::Byte, Mode::Alphanumeric, Mode::Numeric];

/// Mode of every character in a minimum-length encoding of `chars`
pub(super) fn char_modes(chars: &[char], version: Version) -> Vec<Mode> {
    if chars.is_empty() {
        return Vec::new();
    }

    let head_costs: [usize; 3] = MODES.map(|m| (4 + m.char_count_bits(version)) * 6);
    // choice[i][j]: mode of character i when the encoding is in MODES[j]
    // right after character i.
    let mut choice: Vec<[Option<Mode>; 3]> = Vec::with_capacity(chars.len());
    let mut prev_costs = head_costs;

    for &ch in chars {
        let mut cur_costs = [0usize; 3];
        let mut modes: [Option<Mode>; 3] = [None; 3];

        cur_costs[0] = prev_costs[0] + ch.len_utf8() * 8 * 6;
        modes[0] = Some(Mode::Byte);
        if AlphanumericCodec::is_member(ch) {
            cur_costs[1] = prev_costs[1] + 33;
            modes[1] = Some(Mode::Alphanumeric);
        }
        if NumericCodec::is_member(ch) {
            cur_costs[2] = prev_costs[2] + 20;
            modes[2] = Some(Mode::Numeric);
        }

        for j in 0..MODES.len() {
            for k in 0..MODES.len() {
                if modes[k].is_none() {
                    continue;
                }
                let switched = cur_costs[k].div_ceil(6) * 6 + head_costs[j];
                if modes[j].is_none() || switched < cur_costs[j] {
                    cur_costs[j] = switched;
                    modes[j] = modes[k];
                }
            }
        }

        choice.push(modes);
        prev_costs = cur_costs;
    }

    let mut current = MODES[0];
    let mut min_cost = usize::MAX;
    for (j, &mode) in MODES.iter().enumerate() {
        if choice[chars.len() - 1][j].is_some() && prev_costs[j] < min_cost {
            min_cost = prev_costs[j];
            current = mode;
        }
    }

    let mut result = vec![Mode::Byte; chars.len()];
    for i in (0..chars.len()).rev() {
        let j = MODES.iter().position(|&m| m == current).unwrap_or(0);
        current = choice[i][j].unwrap_or(Mode::Byte);
        result[i] = current;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes_of(text: &str) -> Vec<Mode> {
        let chars: Vec<char> = text.chars().collect();
        char_modes(&chars, Version::MIN)
    }

    #[test]
    fn test_pure_inputs_stay_in_one_mode() {
        assert!(modes_of("0123456789").iter().all(|&m| m == Mode::Numeric));
        assert!(modes_of("HELLO WORLD").iter().all(|&m| m == Mode::Alphanumeric));
        assert!(modes_of("hello").iter().all(|&m| m == Mode::Byte));
    }

    #[test]
    fn test_short_digit_run_is_absorbed() {
        // Switching for two digits costs more than it saves
        let modes = modes_of("ab12cd");
        assert!(modes.iter().all(|&m| m == Mode::Byte));
    }

    #[test]
    fn test_long_digit_run_switches() {
        let modes = modes_of("a01234567890123456789");
        assert_eq!(modes[0], Mode::Byte);
        assert!(modes[1..].iter().all(|&m| m == Mode::Numeric));
    }
}
