//! Text rendering of boards and game state for the demo driver and logs.

use super::{board, board_layout, game_config, game_state};

/// One-character label for an empty square's premium.
pub fn empty_label(layout: &board_layout::BoardLayout, row: i8, col: i8) -> &'static str {
    if layout.is_star(row, col) {
        return "*";
    }
    let premium = layout.premium_at(row, col);
    match premium.word_multiplier {
        3 => "=",
        2 => "-",
        _ => match premium.letter_multiplier {
            3 => "\"",
            2 => "'",
            _ => " ",
        },
    }
}

pub fn format_board(config: &game_config::GameConfig, board: &board::Board) -> String {
    let alphabet = config.alphabet();
    let layout = config.board_layout();
    let dim = board.dim();
    let mut out = String::new();
    out.push_str("   ");
    for col in 0..dim.cols {
        out.push(' ');
        out.push((b'a' + col as u8) as char);
    }
    out.push('\n');
    for row in 0..dim.rows {
        out.push_str(&format!("{:2} ", row + 1));
        for col in 0..dim.cols {
            out.push(' ');
            let tile = board.tiles()[dim.at_row_col(row, col)];
            if tile == 0 {
                out.push_str(empty_label(layout, row, col));
            } else {
                out.push(alphabet.of_board(tile));
            }
        }
        out.push('\n');
    }
    out
}

pub fn print_game_state(config: &game_config::GameConfig, state: &game_state::GameState<'_>) {
    println!("{}", format_board(config, &state.board));
    let alphabet = config.alphabet();
    for (i, player) in state.players.iter().enumerate() {
        println!(
            "{} {}: {} points, rack {}",
            if i == state.turn && !state.game_over {
                "->"
            } else {
                "  "
            },
            player.name,
            player.score,
            alphabet.fmt_rack(&player.rack)
        );
    }
    println!("{} tiles left in the bag", state.bag.len());
}
