pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod display;
pub mod error;
pub mod gaddag;
pub mod game_config;
pub mod game_state;
pub mod matrix;
pub mod movegen;
pub mod play;
pub mod play_scorer;
