//! A player's turn: place tiles, exchange tiles, or pass.

use crate::alphabet;
use crate::error::{GameError, Result};

/// Tiles use the encoding of [`crate::alphabet`]; a placed blank carries
/// `BLANK_FLAG` plus the letter it was designated as.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Play {
    /// Deposit `tiles` in order starting at `(row, col)`, skipping over
    /// squares that already hold a tile.
    Place {
        row: i8,
        col: i8,
        down: bool,
        tiles: Box<[u8]>,
    },
    /// Return `tiles` to the bag and draw replacements.
    Exchange { tiles: Box<[u8]> },
    Pass,
}

impl Play {
    /// Converts scattered single-tile placements (as an interactive client
    /// collects them) into a `Place`. The placements must share a row or a
    /// column; gaps are fine, they will thread through existing board tiles.
    pub fn from_placements(placements: &[(i8, i8, u8)]) -> Result<Play> {
        let Some(&(first_row, first_col, _)) = placements.first() else {
            return Err(GameError::NoTiles);
        };
        let same_row = placements.iter().all(|&(row, _, _)| row == first_row);
        let same_col = placements.iter().all(|&(_, col, _)| col == first_col);
        if !same_row && !same_col {
            return Err(GameError::NotInLine);
        }
        // a single tile reads across; validation settles the axis it extends
        let down = same_col && !same_row;
        let mut ordered: Vec<(i8, i8, u8)> = placements.to_vec();
        if down {
            ordered.sort_by_key(|&(row, _, _)| row);
        } else {
            ordered.sort_by_key(|&(_, col, _)| col);
        }
        let (row, col, _) = ordered[0];
        Ok(Play::Place {
            row,
            col,
            down,
            tiles: ordered.iter().map(|&(_, _, tile)| tile).collect(),
        })
    }

    pub fn tiles(&self) -> &[u8] {
        match self {
            Play::Place { tiles, .. } | Play::Exchange { tiles } => tiles,
            Play::Pass => &[],
        }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let alphabet = alphabet::make_english_alphabet();
        match self {
            Play::Place {
                row,
                col,
                down,
                tiles,
            } => {
                write!(
                    f,
                    "place {} at ({}, {}) {}",
                    alphabet.fmt_rack(tiles),
                    row,
                    col,
                    if *down { "down" } else { "across" }
                )
            }
            Play::Exchange { tiles } => write!(f, "exchange {}", alphabet.fmt_rack(tiles)),
            Play::Pass => write!(f, "pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_placements_are_rejected() {
        assert!(matches!(
            Play::from_placements(&[]),
            Err(GameError::NoTiles)
        ));
    }

    #[test]
    fn scattered_placements_are_rejected() {
        let result = Play::from_placements(&[(7, 7, 1), (8, 8, 2)]);
        assert!(matches!(result, Err(GameError::NotInLine)));
    }

    #[test]
    fn row_placements_sort_by_column() {
        let play = Play::from_placements(&[(7, 9, 3), (7, 7, 1), (7, 8, 2)]).unwrap();
        assert_eq!(
            play,
            Play::Place {
                row: 7,
                col: 7,
                down: false,
                tiles: Box::from([1, 2, 3]),
            }
        );
    }

    #[test]
    fn column_placements_sort_by_row() {
        let play = Play::from_placements(&[(9, 4, 3), (7, 4, 1)]).unwrap();
        assert_eq!(
            play,
            Play::Place {
                row: 7,
                col: 4,
                down: true,
                tiles: Box::from([1, 3]),
            }
        );
    }

    #[test]
    fn single_tile_reads_across() {
        let play = Play::from_placements(&[(3, 4, 5)]).unwrap();
        assert!(matches!(play, Play::Place { down: false, .. }));
    }
}
