//! Placement validation and scoring.
//!
//! Validation overlays a tentative placement on a copy of the board, extracts
//! the words it forms, and checks them against the dictionary and the
//! geometry rules. Scoring walks the formed words on the overlay, applying
//! each premium square at most once per move. Neither touches live state.

use std::collections::HashSet;

use crate::error::{GameError, Result};
use crate::{board, gaddag, game_config, matrix, play};

/// A formed word pinned to the overlay: a lane, the half-open index span of
/// its run, and its spelled-out text.
#[derive(Clone, Debug)]
pub struct PlacedWord {
    pub down: bool,
    pub lane: i8,
    pub span: std::ops::Range<i8>,
    pub text: String,
}

impl PlacedWord {
    fn positions(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let down = self.down;
        let lane = self.lane;
        self.span.clone().map(move |idx| position(down, lane, idx))
    }
}

/// The outcome of a successful validation, everything scoring needs.
pub struct Validation {
    pub overlay: Box<[u8]>,
    /// `(row, col, tile)` of each newly deposited tile, in deposit order.
    pub new_tiles: Vec<(i8, i8, u8)>,
    /// Main word first, then cross-words in deposit order, deduplicated.
    pub words: Vec<PlacedWord>,
}

impl Validation {
    pub fn formed_words(&self) -> Vec<String> {
        self.words.iter().map(|word| word.text.clone()).collect()
    }
}

#[inline(always)]
fn position(down: bool, lane: i8, idx: i8) -> (i8, i8) {
    if down {
        (idx, lane)
    } else {
        (lane, idx)
    }
}

fn word_at(
    overlay: &[u8],
    config: &game_config::GameConfig,
    dim: matrix::Dim,
    down: bool,
    lane: i8,
    idx: i8,
) -> PlacedWord {
    let span = board::run_through(overlay, dim, down, lane, idx);
    let strider = dim.lane(down, lane);
    let alphabet = config.alphabet();
    let text = span
        .clone()
        .map(|i| alphabet.letter_of(overlay[strider.at(i)]))
        .collect();
    PlacedWord {
        down,
        lane,
        span,
        text,
    }
}

/// Checks a placement against the live board and collects the words it forms.
///
/// Rules, in order: the move must bring tiles and start on the board; the
/// deposit must not run off the board; a first move must cover the star; the
/// main word must be a dictionary word of length two or more, as must every
/// cross-word; a later move must thread through or touch existing tiles.
pub fn validate_place(
    config: &game_config::GameConfig,
    live_board: &board::Board,
    dictionary: &gaddag::Gaddag,
    play: &play::Play,
) -> Result<Validation> {
    let play::Play::Place {
        row,
        col,
        down,
        tiles,
    } = play
    else {
        return Err(GameError::NoTiles);
    };
    let (row, col, down) = (*row, *col, *down);
    if tiles.is_empty() {
        return Err(GameError::NoTiles);
    }
    let layout = config.board_layout();
    let dim = layout.dim();
    if !dim.is_within(row, col) {
        return Err(GameError::OutOfBounds);
    }

    let (lane, start_idx) = if down { (col, row) } else { (row, col) };
    let strider = dim.lane(down, lane);

    // overlay construction: thread the tiles through existing letters
    let mut overlay: Box<[u8]> = live_board.tiles().into();
    let mut new_tiles = Vec::with_capacity(tiles.len());
    let mut idx = start_idx;
    for &tile in tiles.iter() {
        while idx < strider.len() && overlay[strider.at(idx)] != 0 {
            idx += 1;
        }
        if idx >= strider.len() {
            return Err(GameError::OutOfBounds);
        }
        overlay[strider.at(idx)] = tile;
        let (r, c) = position(down, lane, idx);
        new_tiles.push((r, c, tile));
        idx += 1;
    }

    let first_move = live_board.is_empty();
    let main = word_at(&overlay, config, dim, down, lane, start_idx);

    if first_move {
        let star_idx = if down {
            layout.star_row()
        } else {
            layout.star_col()
        };
        let star_lane = if down {
            layout.star_col()
        } else {
            layout.star_row()
        };
        if lane != star_lane || !main.span.contains(&star_idx) {
            return Err(GameError::FirstMoveMissesCenter);
        }
    }

    if main.span.len() < 2 || !dictionary.is_word(&main.text) {
        return Err(GameError::NotInDictionary(main.text));
    }

    let mut words = vec![main];
    for &(r, c, _) in &new_tiles {
        let (cross_lane, cross_idx) = if down { (r, c) } else { (c, r) };
        let cross = word_at(&overlay, config, dim, !down, cross_lane, cross_idx);
        if cross.span.len() < 2 {
            continue;
        }
        if !dictionary.is_word(&cross.text) {
            return Err(GameError::NotInDictionary(cross.text));
        }
        words.push(cross);
    }

    if !first_move {
        let new_set: HashSet<(i8, i8)> = new_tiles.iter().map(|&(r, c, _)| (r, c)).collect();
        let threads_through_existing = words
            .iter()
            .any(|word| word.positions().any(|pos| !new_set.contains(&pos)));
        let touches_existing = new_tiles
            .iter()
            .any(|&(r, c, _)| live_board.has_adjacent_tile(r, c));
        if !threads_through_existing && !touches_existing {
            return Err(GameError::Disconnected);
        }
    }

    // dedup by text, first occurrence wins
    let mut seen = HashSet::new();
    words.retain(|word| seen.insert(word.text.clone()));

    Ok(Validation {
        overlay,
        new_tiles,
        words,
    })
}

/// Scores a validated placement.
///
/// Letter premiums apply to each new tile wherever its word is counted; word
/// premiums multiply at most once per move even when several formed words
/// share the square. Premiums already consumed by earlier moves contribute
/// nothing. Placing a full rack earns the bingo bonus.
pub fn score_play(
    config: &game_config::GameConfig,
    live_board: &board::Board,
    validation: &Validation,
    num_tiles_placed: usize,
) -> i32 {
    let alphabet = config.alphabet();
    let layout = config.board_layout();
    let dim = layout.dim();
    let premium_flags = live_board.premium_flags();
    let new_set: HashSet<(i8, i8)> = validation
        .new_tiles
        .iter()
        .map(|&(r, c, _)| (r, c))
        .collect();

    let mut used_premium: HashSet<(i8, i8)> = HashSet::new();
    let mut total = 0i32;
    for word in &validation.words {
        let strider = dim.lane(word.down, word.lane);
        let mut word_multiplier = 1i32;
        let mut word_score = 0i32;
        for idx in word.span.clone() {
            let pos = position(word.down, word.lane, idx);
            let tile = validation.overlay[strider.at(idx)];
            let mut letter_value = alphabet.score(tile) as i32;
            if new_set.contains(&pos) && !premium_flags[dim.at_row_col(pos.0, pos.1)] {
                let premium = layout.premium_at(pos.0, pos.1);
                letter_value *= premium.letter_multiplier as i32;
                if premium.word_multiplier > 1 && used_premium.insert(pos) {
                    word_multiplier *= premium.word_multiplier as i32;
                }
            }
            word_score += letter_value;
        }
        total += word_score * word_multiplier;
    }
    total + config.num_played_bonus(num_tiles_placed as u8)
}
