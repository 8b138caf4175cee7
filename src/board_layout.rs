//! Premium-square layout of the standard 15x15 board.

use super::matrix;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Premium {
    pub word_multiplier: i8,
    pub letter_multiplier: i8,
}

pub const NO_PREMIUM: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 1,
};

const TWS: Premium = Premium {
    word_multiplier: 3,
    letter_multiplier: 1,
};
const DWS: Premium = Premium {
    word_multiplier: 2,
    letter_multiplier: 1,
};
const TLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 3,
};
const DLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 2,
};
const FVS: Premium = NO_PREMIUM;

static STANDARD_PREMIUMS: [Premium; 225] = [
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
    FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
    FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
    DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
    FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
    FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
    FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
    FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
    FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
    FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
    DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
    FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
    FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
    TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
];

pub struct BoardLayout {
    premiums: &'static [Premium],
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

impl BoardLayout {
    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    /// The star square doubles the word and must be covered by the first move.
    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        self.star_row
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        self.star_col
    }

    #[inline(always)]
    pub fn is_star(&self, row: i8, col: i8) -> bool {
        row == self.star_row && col == self.star_col
    }

    #[inline(always)]
    pub fn premium_at(&self, row: i8, col: i8) -> Premium {
        self.premiums[self.dim.at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn premiums(&self) -> &[Premium] {
        self.premiums
    }
}

pub fn make_standard_board_layout() -> BoardLayout {
    BoardLayout {
        premiums: &STANDARD_PREMIUMS,
        dim: matrix::Dim { rows: 15, cols: 15 },
        star_row: 7,
        star_col: 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_words_sit_on_edges() {
        let layout = make_standard_board_layout();
        for (row, col) in [
            (0, 0),
            (0, 7),
            (0, 14),
            (7, 0),
            (7, 14),
            (14, 0),
            (14, 7),
            (14, 14),
        ] {
            assert_eq!(layout.premium_at(row, col).word_multiplier, 3);
        }
    }

    #[test]
    fn star_is_a_double_word() {
        let layout = make_standard_board_layout();
        assert!(layout.is_star(7, 7));
        assert_eq!(layout.premium_at(7, 7), DWS);
    }

    #[test]
    fn double_words_run_down_the_diagonals() {
        let layout = make_standard_board_layout();
        // the inner diagonal cells at 5, 6, 8, 9 carry letter premiums instead
        for i in [1i8, 2, 3, 4, 10, 11, 12, 13] {
            assert_eq!(layout.premium_at(i, i).word_multiplier, 2, "({i},{i})");
            assert_eq!(
                layout.premium_at(i, 14 - i).word_multiplier,
                2,
                "({i},{})",
                14 - i
            );
        }
    }

    #[test]
    fn letter_premiums_match_the_classic_chart() {
        let layout = make_standard_board_layout();
        for (row, col) in [
            (1, 5),
            (1, 9),
            (5, 1),
            (5, 5),
            (5, 9),
            (5, 13),
            (9, 1),
            (9, 5),
            (9, 9),
            (9, 13),
            (13, 5),
            (13, 9),
        ] {
            assert_eq!(layout.premium_at(row, col).letter_multiplier, 3);
        }
        for (row, col) in [(0, 3), (2, 6), (3, 7), (6, 12), (7, 11), (11, 0), (14, 11)] {
            assert_eq!(layout.premium_at(row, col).letter_multiplier, 2);
        }
    }

    #[test]
    fn layout_is_symmetric() {
        let layout = make_standard_board_layout();
        for row in 0..15i8 {
            for col in 0..15i8 {
                assert_eq!(
                    layout.premium_at(row, col),
                    layout.premium_at(14 - row, 14 - col)
                );
            }
        }
    }
}
