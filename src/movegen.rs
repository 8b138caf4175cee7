//! AI move generation.
//!
//! Candidates are enumerated from anchor squares with the GADDAG, validated
//! and scored like any player move, then ranked by a composite of raw score,
//! rack-leave quality, and premium usage. Generation never fails; anything
//! that goes wrong degrades to a pass.

use log::debug;
use rand::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{alphabet, game_config, game_state, play, play_scorer};
use crate::alphabet::{rack_form, BLANK, BLANK_FLAG};

const RACK_LEAVE_WEIGHT: f64 = 0.15;
const PREMIUM_SQUARE_WEIGHT: f64 = 0.15;
const BONUS_ALL_TILES: f64 = 10.0;
const BONUS_MULTI_WORD: f64 = 5.0;

/// Candidates within this rank of the best are eligible for selection.
const TOP_WINDOW: usize = 3;

/// Cooperative cancellation for a running search. Checked between anchors and
/// between candidate evaluations; a cancelled search returns a pass.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct Candidate {
    pub play: play::Play,
    pub score: i32,
    pub formed_words: Vec<String>,
    pub equity: f64,
}

pub struct MoveGenerator {
    pub candidates: Vec<Candidate>,
    cancel: CancelToken,
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator {
    pub fn new() -> Self {
        Self::with_cancel(CancelToken::new())
    }

    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self {
            candidates: Vec::new(),
            cancel,
        }
    }

    /// Picks a move for the current player. Always returns something
    /// playable: a placement, an exchange, or a pass.
    pub fn generate(
        &mut self,
        state: &game_state::GameState<'_>,
        rng: &mut dyn RngCore,
    ) -> play::Play {
        self.candidates.clear();
        let rack = &state.current_player().rack;
        if rack.is_empty() {
            return play::Play::Pass;
        }

        if !self.collect_candidates(state) {
            return play::Play::Pass;
        }
        self.candidates.retain(|candidate| candidate.score > 0);
        if self.candidates.is_empty() {
            debug!("no scoring placement found, falling back");
            return fallback(state);
        }

        self.candidates
            .sort_by(|a, b| b.equity.partial_cmp(&a.equity).unwrap_or(std::cmp::Ordering::Equal));
        let window = TOP_WINDOW.min(self.candidates.len());
        let pick = rng.gen_range(0..window);
        debug!(
            "{} candidates, picked #{pick} ({} for {})",
            self.candidates.len(),
            self.candidates[pick].play,
            self.candidates[pick].score
        );
        self.candidates[pick].play.clone()
    }

    /// False when the search was cancelled midway.
    fn collect_candidates(&mut self, state: &game_state::GameState<'_>) -> bool {
        let config = state.game_config;
        let layout = config.board_layout();
        let dim = layout.dim();
        let alphabet = config.alphabet();
        let rack = &state.current_player().rack;
        let rack_string: String = rack
            .iter()
            .map(|&tile| {
                if tile == BLANK {
                    '*'
                } else {
                    alphabet.letter_of(tile)
                }
            })
            .collect();
        let anchor_letters: BTreeSet<char> = rack_string.chars().filter(|&c| c != '*').collect();
        let mut seen: HashSet<(i8, i8, bool, Box<[u8]>)> = HashSet::new();

        if state.board.is_empty() {
            // opening: every expressible word, slid through the star square
            let mut words: BTreeSet<String> = BTreeSet::new();
            for &letter in &anchor_letters {
                words.extend(state.dictionary.words_from(&rack_string, letter, true, true));
            }
            debug!("opening move: {} candidate words", words.len());
            for word in &words {
                if self.cancel.is_cancelled() {
                    return false;
                }
                let len = word.len() as i8;
                for offset in 0..len {
                    let col = layout.star_col() - offset;
                    if col >= 0 && col + len <= dim.cols {
                        self.try_candidate(state, layout.star_row(), col, false, word, &mut seen);
                    }
                    let row = layout.star_row() - offset;
                    if row >= 0 && row + len <= dim.rows {
                        self.try_candidate(state, row, layout.star_col(), true, word, &mut seen);
                    }
                }
            }
            return true;
        }

        let mut anchors = Vec::new();
        for row in 0..dim.rows {
            for col in 0..dim.cols {
                if state.board.tiles()[dim.at_row_col(row, col)] == 0
                    && state.board.has_adjacent_tile(row, col)
                {
                    anchors.push((row, col));
                }
            }
        }
        debug!("{} anchor squares", anchors.len());

        // the enumeration only depends on the rack, so share it across anchors
        let mut words_cache: HashMap<char, BTreeSet<String>> = HashMap::new();
        for &(anchor_row, anchor_col) in &anchors {
            if self.cancel.is_cancelled() {
                return false;
            }
            for down in [false, true] {
                for &letter in &anchor_letters {
                    let words = words_cache.entry(letter).or_insert_with(|| {
                        state
                            .dictionary
                            .words_from(&rack_string, letter, true, true)
                            .into_iter()
                            .collect()
                    });
                    for word in words.iter() {
                        let len = word.len() as i8;
                        for (i, c) in word.chars().enumerate() {
                            if c != letter {
                                continue;
                            }
                            let i = i as i8;
                            let (row, col) = if down {
                                (anchor_row - i, anchor_col)
                            } else {
                                (anchor_row, anchor_col - i)
                            };
                            if row < 0 || col < 0 {
                                continue;
                            }
                            let fits = if down {
                                row + len <= dim.rows
                            } else {
                                col + len <= dim.cols
                            };
                            if fits {
                                self.try_candidate(state, row, col, down, word, &mut seen);
                            }
                        }
                    }
                }
            }
        }
        true
    }

    fn try_candidate(
        &mut self,
        state: &game_state::GameState<'_>,
        row: i8,
        col: i8,
        down: bool,
        word: &str,
        seen: &mut HashSet<(i8, i8, bool, Box<[u8]>)>,
    ) {
        let config = state.game_config;
        let rack = &state.current_player().rack;
        let Some(tiles) = tiles_for_word(config.alphabet(), word, rack) else {
            return;
        };
        let tiles: Box<[u8]> = tiles.into();
        if !seen.insert((row, col, down, tiles.clone())) {
            return;
        }
        let candidate_play = play::Play::Place {
            row,
            col,
            down,
            tiles,
        };
        let Ok(validation) =
            play_scorer::validate_place(config, &state.board, state.dictionary, &candidate_play)
        else {
            return;
        };
        let num_tiles = candidate_play.tiles().len();
        let score = play_scorer::score_play(config, &state.board, &validation, num_tiles);

        let mut leave = rack.clone();
        for &tile in candidate_play.tiles() {
            let from = rack_form(tile);
            if let Some(pos) = leave.iter().rposition(|&t| t == from) {
                leave.swap_remove(pos);
            }
        }

        let formed_words = validation.formed_words();
        let mut equity = score as f64;
        if num_tiles == config.rack_size() as usize {
            equity += BONUS_ALL_TILES;
        }
        if formed_words.len() > 1 {
            equity += BONUS_MULTI_WORD;
        }
        equity += RACK_LEAVE_WEIGHT * rack_leave_value(config.alphabet(), &leave);
        equity += PREMIUM_SQUARE_WEIGHT
            * premium_usage_value(config, &state.board, &validation.new_tiles);

        self.candidates.push(Candidate {
            play: candidate_play,
            score,
            formed_words,
            equity,
        });
    }
}

/// Picks an AI move with a one-off generator.
pub fn generate_ai_move(state: &game_state::GameState<'_>, rng: &mut dyn RngCore) -> play::Play {
    MoveGenerator::new().generate(state, rng)
}

/// Spells `word` out of the rack, substituting one blank per missing letter.
fn tiles_for_word(alphabet: &alphabet::Alphabet, word: &str, rack: &[u8]) -> Option<Vec<u8>> {
    let mut tally = [0u8; 27];
    for &tile in rack {
        tally[tile as usize] += 1;
    }
    let mut tiles = Vec::with_capacity(word.len());
    for c in word.chars() {
        let tile = alphabet.from_char(c)?;
        if tile == BLANK {
            return None;
        }
        if tally[tile as usize] > 0 {
            tally[tile as usize] -= 1;
            tiles.push(tile);
        } else if tally[BLANK as usize] > 0 {
            tally[BLANK as usize] -= 1;
            tiles.push(BLANK_FLAG | tile);
        } else {
            return None;
        }
    }
    Some(tiles)
}

/// Quality of the tiles kept back after a move. Rewards a balanced
/// vowel-consonant mix, blanks, and S; penalizes hoarded duplicates and a
/// pocket of hard letters.
fn rack_leave_value(alphabet: &alphabet::Alphabet, leave: &[u8]) -> f64 {
    let mut tally = [0u8; 27];
    let mut vowels = 0usize;
    let mut blanks = 0usize;
    for &tile in leave {
        tally[tile as usize] += 1;
        if tile == BLANK {
            blanks += 1;
        } else if alphabet.is_vowel(tile) {
            vowels += 1;
        }
    }
    let ratio = vowels as f64 / leave.len().max(1) as f64;
    let mut value = if (0.3..=0.6).contains(&ratio) {
        5.0
    } else {
        -10.0 * (ratio - 0.4).abs()
    };
    value += 8.0 * blanks as f64;
    let mut hard = 0u8;
    for (tile, &count) in tally.iter().enumerate().skip(1) {
        match alphabet.letter_of(tile as u8) {
            'S' => value += 3.0 * count as f64,
            'J' | 'Q' | 'X' | 'Z' => hard += count,
            _ => {}
        }
        if count > 2 {
            value -= 3.0 * (count - 2) as f64;
        }
    }
    if hard > 1 {
        value -= 5.0 * (hard - 1) as f64;
    }
    value
}

/// How much unconsumed premium real estate the new tiles claim.
fn premium_usage_value(
    config: &game_config::GameConfig,
    live_board: &crate::board::Board,
    new_tiles: &[(i8, i8, u8)],
) -> f64 {
    let layout = config.board_layout();
    let dim = layout.dim();
    let alphabet = config.alphabet();
    let premium_flags = live_board.premium_flags();
    let mut value = 0.0;
    for &(row, col, tile) in new_tiles {
        if premium_flags[dim.at_row_col(row, col)] {
            continue;
        }
        let premium = layout.premium_at(row, col);
        let tile_value = (alphabet.score(tile) as i32).min(8) as f64;
        value += if premium.word_multiplier == 3 {
            15.0
        } else if premium.word_multiplier == 2 {
            8.0
        } else if premium.letter_multiplier == 3 {
            3.0 * tile_value
        } else if premium.letter_multiplier == 2 {
            1.5 * tile_value
        } else {
            0.0
        };
    }
    value
}

/// Strategic worth of holding one tile, for deciding what to exchange.
fn tile_strategic_value(alphabet: &alphabet::Alphabet, tile: u8, rack: &[u8]) -> f64 {
    let mut value = 10.0 - (alphabet.score(tile) as i32).min(8) as f64;
    if tile == BLANK {
        return value + 20.0;
    }
    let letter = alphabet.letter_of(tile);
    let same = rack.iter().filter(|&&t| t == tile).count();
    let vowel_count = rack
        .iter()
        .filter(|&&t| t != BLANK && alphabet.is_vowel(t))
        .count();
    if alphabet.is_vowel(tile) {
        if vowel_count <= 2 {
            value += 5.0;
        } else if vowel_count > 4 {
            value -= 3.0;
        }
    }
    if letter == 'S' {
        value += 8.0;
    }
    if "ETAOINSHRD".contains(letter) {
        value += 3.0;
    }
    if same > 2 {
        value -= 5.0;
    }
    if letter == 'Q'
        && !rack
            .iter()
            .any(|&t| t != BLANK && alphabet.letter_of(t) == 'U')
    {
        value -= 10.0;
    }
    if "JQXZ".contains(letter) {
        value -= 3.0;
    }
    value
}

/// No placement worked: swap out the two least useful tiles while the bag
/// allows it, otherwise pass.
fn fallback(state: &game_state::GameState<'_>) -> play::Play {
    let rack = &state.current_player().rack;
    if state.bag.len() >= state.game_config.exchange_tile_limit() && !rack.is_empty() {
        let alphabet = state.game_config.alphabet();
        let mut by_value: Vec<u8> = rack.clone();
        by_value.sort_by(|&a, &b| {
            tile_strategic_value(alphabet, a, rack)
                .partial_cmp(&tile_strategic_value(alphabet, b, rack))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        by_value.truncate(2.min(rack.len()));
        return play::Play::Exchange {
            tiles: by_value.into(),
        };
    }
    play::Play::Pass
}
