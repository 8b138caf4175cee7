//! Live game state and the move lifecycle.
//!
//! A play goes through validate -> score -> commit. Validation and scoring
//! are pure; commit re-runs them and only then mutates, so any error leaves
//! the board, racks, bag, and scores exactly as they were.

use log::debug;
use rand::prelude::*;

use super::{bag, board, gaddag, game_config, play, play_scorer};
use crate::alphabet::{rack_form, BLANK_FLAG};
use crate::error::{GameError, Result};

pub struct GamePlayer {
    pub name: String,
    pub is_ai: bool,
    pub score: i32,
    pub rack: Vec<u8>,
}

/// One line of the move history, in commit order.
pub struct CommittedPlay {
    pub player: usize,
    pub play: play::Play,
    pub score: i32,
    pub formed_words: Vec<String>,
}

/// What a successful commit reports back.
pub struct Committed {
    pub score: i32,
    pub formed_words: Vec<String>,
    pub game_over: bool,
}

pub struct GameState<'a> {
    pub game_config: &'a game_config::GameConfig,
    pub dictionary: &'a gaddag::Gaddag,
    pub players: Vec<GamePlayer>,
    pub board: board::Board,
    pub bag: bag::Bag,
    pub turn: usize,
    pub consecutive_passes: u32,
    pub game_over: bool,
    pub history: Vec<CommittedPlay>,
}

fn use_tiles<II: IntoIterator<Item = u8>>(rack: &mut Vec<u8>, tiles_iter: II) -> Result<()> {
    for tile in tiles_iter {
        let pos = rack
            .iter()
            .rposition(|&t| t == tile)
            .ok_or(GameError::TilesNotInRack)?;
        rack.swap_remove(pos);
    }
    Ok(())
}

fn rack_holds(rack: &[u8], tiles: &[u8]) -> bool {
    let mut tally = [0i32; 27];
    for &tile in rack {
        tally[(tile & !BLANK_FLAG) as usize] += 1;
    }
    for &tile in tiles {
        let slot = rack_form(tile) as usize;
        tally[slot] -= 1;
        if tally[slot] < 0 {
            return false;
        }
    }
    true
}

impl<'a> GameState<'a> {
    pub fn new(game_config: &'a game_config::GameConfig, dictionary: &'a gaddag::Gaddag) -> Self {
        Self {
            game_config,
            dictionary,
            players: Vec::new(),
            board: board::Board::new(game_config.board_layout()),
            bag: bag::Bag::new(game_config.alphabet()),
            turn: 0,
            consecutive_passes: 0,
            game_over: false,
            history: Vec::new(),
        }
    }

    pub fn add_player(&mut self, name: impl Into<String>, is_ai: bool) -> usize {
        self.players.push(GamePlayer {
            name: name.into(),
            is_ai,
            score: 0,
            rack: Vec::with_capacity(self.game_config.rack_size() as usize),
        });
        self.players.len() - 1
    }

    /// Shuffles the bag, deals every rack, and picks a random first player.
    pub fn start(&mut self, rng: &mut dyn RngCore) {
        assert!(!self.players.is_empty(), "cannot start a game with no players");
        let rack_size = self.game_config.rack_size() as usize;
        self.bag.shuffle(rng);
        for player in self.players.iter_mut() {
            self.bag.replenish(&mut player.rack, rack_size);
        }
        self.turn = rng.gen_range(0..self.players.len());
        self.consecutive_passes = 0;
        self.game_over = false;
        self.history.clear();
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn]
    }

    pub fn next_turn(&mut self) {
        self.turn = (self.turn + 1) % self.players.len();
    }

    /// Checks a play without touching any state; returns the formed words.
    pub fn validate(&self, play: &play::Play) -> Result<Vec<String>> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        match play {
            play::Play::Place { tiles, .. } => {
                let validation = play_scorer::validate_place(
                    self.game_config,
                    &self.board,
                    self.dictionary,
                    play,
                )?;
                if !rack_holds(&self.current_player().rack, tiles) {
                    return Err(GameError::TilesNotInRack);
                }
                Ok(validation.formed_words())
            }
            play::Play::Exchange { tiles } => {
                if tiles.is_empty() {
                    return Err(GameError::NoTiles);
                }
                let needed = self.game_config.exchange_tile_limit();
                if self.bag.len() < needed {
                    return Err(GameError::BagUnderflow {
                        available: self.bag.len(),
                        needed,
                    });
                }
                if !rack_holds(&self.current_player().rack, tiles) {
                    return Err(GameError::TilesNotInRack);
                }
                Ok(Vec::new())
            }
            play::Play::Pass => Ok(Vec::new()),
        }
    }

    /// The points a play would score, without committing it.
    pub fn score(&self, play: &play::Play) -> Result<i32> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        match play {
            play::Play::Place { tiles, .. } => {
                let validation = play_scorer::validate_place(
                    self.game_config,
                    &self.board,
                    self.dictionary,
                    play,
                )?;
                if !rack_holds(&self.current_player().rack, tiles) {
                    return Err(GameError::TilesNotInRack);
                }
                Ok(play_scorer::score_play(
                    self.game_config,
                    &self.board,
                    &validation,
                    tiles.len(),
                ))
            }
            _ => {
                self.validate(play)?;
                Ok(0)
            }
        }
    }

    /// Applies a play: board, rack, bag, score, and history advance together
    /// or not at all.
    pub fn commit(&mut self, rng: &mut dyn RngCore, play: &play::Play) -> Result<Committed> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        let rack_size = self.game_config.rack_size() as usize;
        let (score, formed_words) = match play {
            play::Play::Place { tiles, .. } => {
                // every failure path runs before the first mutation
                let validation = play_scorer::validate_place(
                    self.game_config,
                    &self.board,
                    self.dictionary,
                    play,
                )?;
                if !rack_holds(&self.current_player().rack, tiles) {
                    return Err(GameError::TilesNotInRack);
                }
                let score = play_scorer::score_play(
                    self.game_config,
                    &self.board,
                    &validation,
                    tiles.len(),
                );

                for &(row, col, tile) in &validation.new_tiles {
                    self.board.place(row, col, tile)?;
                    self.board.consume_premium(row, col)?;
                }
                let player = &mut self.players[self.turn];
                use_tiles(&mut player.rack, tiles.iter().map(|&t| rack_form(t)))?;
                player.score += score;
                self.consecutive_passes = 0;
                self.bag.replenish(&mut player.rack, rack_size);
                if player.rack.is_empty() && self.bag.is_empty() {
                    player.score += self.game_config.empty_rack_bonus();
                    self.game_over = true;
                    self.finalize_scores(Some(self.turn));
                }
                (score, validation.formed_words())
            }
            play::Play::Exchange { tiles } => {
                self.validate(play)?;
                let player = &mut self.players[self.turn];
                use_tiles(&mut player.rack, tiles.iter().copied())?;
                self.bag.replenish(&mut player.rack, rack_size);
                self.bag.put_back(rng, tiles);
                self.consecutive_passes = 0;
                (0, Vec::new())
            }
            play::Play::Pass => {
                self.consecutive_passes += 1;
                if self.consecutive_passes
                    >= self.game_config.num_passes_to_end(self.players.len())
                {
                    self.game_over = true;
                    self.finalize_scores(None);
                }
                (0, Vec::new())
            }
        };

        debug!(
            "player {} committed {play}: {score} points",
            self.players[self.turn].name
        );
        self.history.push(CommittedPlay {
            player: self.turn,
            play: play.clone(),
            score,
            formed_words: formed_words.clone(),
        });
        let game_over = self.game_over;
        if !game_over {
            self.next_turn();
        }
        Ok(Committed {
            score,
            formed_words,
            game_over,
        })
    }

    /// Swaps tiles with the bag; the turn still passes to the next player.
    pub fn exchange(&mut self, rng: &mut dyn RngCore, tiles: &[u8]) -> Result<Committed> {
        self.commit(
            rng,
            &play::Play::Exchange {
                tiles: tiles.into(),
            },
        )
    }

    pub fn pass(&mut self, rng: &mut dyn RngCore) -> Result<Committed> {
        self.commit(rng, &play::Play::Pass)
    }

    /// End-of-game accounting: a player who went out collects the value of
    /// everyone else's rack; on a pass-out everyone eats their own rack.
    fn finalize_scores(&mut self, out_player: Option<usize>) {
        let alphabet = self.game_config.alphabet();
        match out_player {
            Some(out) => {
                let mut collected = 0;
                for (i, player) in self.players.iter_mut().enumerate() {
                    if i != out {
                        let rack_value = alphabet.rack_score(&player.rack);
                        player.score -= rack_value;
                        collected += rack_value;
                    }
                }
                self.players[out].score += collected;
            }
            None => {
                for player in self.players.iter_mut() {
                    player.score -= alphabet.rack_score(&player.rack);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_config::make_english_game_config;
    use rand::SeedableRng;

    fn rng() -> rand_chacha::ChaCha20Rng {
        rand_chacha::ChaCha20Rng::seed_from_u64(42)
    }

    fn tiles(config: &game_config::GameConfig, word: &str) -> Box<[u8]> {
        word.chars()
            .map(|c| config.alphabet().from_char(c).unwrap())
            .collect()
    }

    #[test]
    fn start_deals_full_racks() {
        let config = make_english_game_config();
        let dict = gaddag::Gaddag::from_words(["CAT"]);
        let mut state = GameState::new(&config, &dict);
        state.add_player("one", false);
        state.add_player("two", true);
        state.start(&mut rng());
        assert_eq!(state.players[0].rack.len(), 7);
        assert_eq!(state.players[1].rack.len(), 7);
        assert_eq!(state.bag.len(), 86);
    }

    #[test]
    fn exchange_needs_a_stocked_bag() {
        let config = make_english_game_config();
        let dict = gaddag::Gaddag::from_words(["CAT"]);
        let mut state = GameState::new(&config, &dict);
        state.add_player("one", false);
        state.start(&mut rng());
        state.bag.0.truncate(6);
        let tile = state.current_player().rack[0];
        let result = state.exchange(&mut rng(), &[tile]);
        assert!(matches!(
            result,
            Err(GameError::BagUnderflow {
                available: 6,
                needed: 7
            })
        ));
    }

    #[test]
    fn exchange_keeps_the_rack_full() {
        let config = make_english_game_config();
        let dict = gaddag::Gaddag::from_words(["CAT"]);
        let mut state = GameState::new(&config, &dict);
        state.add_player("one", false);
        state.add_player("two", false);
        state.start(&mut rng());
        let player = state.turn;
        let swap: Vec<u8> = state.current_player().rack[..2].to_vec();
        state.exchange(&mut rng(), &swap).unwrap();
        assert_eq!(state.players[player].rack.len(), 7);
        assert_eq!(state.bag.len(), 86);
        assert_eq!(state.turn, (player + 1) % 2);
    }

    #[test]
    fn exchanging_unheld_tiles_fails() {
        let config = make_english_game_config();
        let dict = gaddag::Gaddag::from_words(["CAT"]);
        let mut state = GameState::new(&config, &dict);
        state.add_player("one", false);
        state.start(&mut rng());
        state.players[0].rack = tiles(&config, "AAAAAAA").to_vec();
        state.turn = 0;
        let q = config.alphabet().from_char('Q').unwrap();
        assert!(matches!(
            state.exchange(&mut rng(), &[q]),
            Err(GameError::TilesNotInRack)
        ));
    }

    #[test]
    fn two_full_rounds_of_passes_end_the_game() {
        let config = make_english_game_config();
        let dict = gaddag::Gaddag::from_words(["CAT"]);
        let mut state = GameState::new(&config, &dict);
        state.add_player("one", false);
        state.add_player("two", false);
        state.start(&mut rng());
        for _ in 0..3 {
            let committed = state.pass(&mut rng()).unwrap();
            assert!(!committed.game_over);
        }
        let committed = state.pass(&mut rng()).unwrap();
        assert!(committed.game_over);
        assert!(state.game_over);
        assert!(matches!(
            state.pass(&mut rng()),
            Err(GameError::GameOver)
        ));
    }

    #[test]
    fn committed_place_updates_score_rack_and_history() {
        let config = make_english_game_config();
        let dict = gaddag::Gaddag::from_words(["CAT"]);
        let mut state = GameState::new(&config, &dict);
        state.add_player("one", false);
        state.start(&mut rng());
        state.players[0].rack = tiles(&config, "CATXYZQ").to_vec();
        state.turn = 0;
        let play = play::Play::Place {
            row: 7,
            col: 6,
            down: false,
            tiles: tiles(&config, "CAT"),
        };
        let committed = state.commit(&mut rng(), &play).unwrap();
        assert_eq!(committed.score, 10);
        assert_eq!(committed.formed_words, vec!["CAT"]);
        assert_eq!(state.players[0].score, 10);
        assert_eq!(state.players[0].rack.len(), 7);
        assert_eq!(state.history.len(), 1);
        assert!(state.board.premium_used(7, 7).unwrap());
    }

    #[test]
    fn failed_commit_leaves_state_untouched() {
        let config = make_english_game_config();
        let dict = gaddag::Gaddag::from_words(["CAT"]);
        let mut state = GameState::new(&config, &dict);
        state.add_player("one", false);
        state.start(&mut rng());
        state.players[0].rack = tiles(&config, "TACXYZQ").to_vec();
        state.turn = 0;
        let board_before = state.board.tiles().to_vec();
        let rack_before = state.players[0].rack.clone();
        let bag_before = state.bag.0.clone();
        let play = play::Play::Place {
            row: 7,
            col: 6,
            down: false,
            tiles: tiles(&config, "TAC"),
        };
        assert!(matches!(
            state.commit(&mut rng(), &play),
            Err(GameError::NotInDictionary(_))
        ));
        assert_eq!(state.board.tiles(), &board_before[..]);
        assert_eq!(state.players[0].rack, rack_before);
        assert_eq!(state.bag.0, bag_before);
        assert_eq!(state.players[0].score, 0);
        assert!(state.history.is_empty());
    }

    #[test]
    fn playing_out_collects_opponent_racks() {
        let config = make_english_game_config();
        let dict = gaddag::Gaddag::from_words(["CAT"]);
        let mut state = GameState::new(&config, &dict);
        state.add_player("one", false);
        state.add_player("two", false);
        state.turn = 0;
        state.bag.0.clear();
        state.players[0].rack = tiles(&config, "CAT").to_vec();
        state.players[1].rack = tiles(&config, "QZ").to_vec();
        let play = play::Play::Place {
            row: 7,
            col: 6,
            down: false,
            tiles: tiles(&config, "CAT"),
        };
        let committed = state.commit(&mut rng(), &play).unwrap();
        assert!(committed.game_over);
        // 10 for CAT, 50 for going out, 20 from the opponent's Q and Z
        assert_eq!(state.players[0].score, 80);
        assert_eq!(state.players[1].score, -20);
    }
}
