use anyhow::Context;
use clap::Parser;
use rand::prelude::*;
use std::path::PathBuf;

use wordgrid::{display, gaddag, game_config, game_state, movegen};

/// Plays a full game of AI players against each other.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// Newline-delimited word list to play with.
    #[arg(long, default_value = "dictionary.txt")]
    dict: PathBuf,

    /// Seed for deterministic replay; drawn from entropy when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of players seated.
    #[arg(long, default_value_t = 2)]
    players: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let dictionary = gaddag::Gaddag::load(&opts.dict)
        .with_context(|| format!("cannot load dictionary from {}", opts.dict.display()))?;
    println!("{} words loaded", dictionary.word_count());

    let config = game_config::make_english_game_config();
    let mut rng: rand_chacha::ChaCha20Rng = match opts.seed {
        Some(seed) => SeedableRng::seed_from_u64(seed),
        None => rand_chacha::ChaCha20Rng::from_entropy(),
    };

    let mut state = game_state::GameState::new(&config, &dictionary);
    for i in 0..opts.players.clamp(2, 4) {
        state.add_player(format!("Bot {}", i + 1), true);
    }
    state.start(&mut rng);

    let mut generator = movegen::MoveGenerator::new();
    while !state.game_over {
        display::print_game_state(&config, &state);
        let play = generator.generate(&state, &mut rng);
        let name = state.current_player().name.clone();
        let committed = state.commit(&mut rng, &play)?;
        if committed.formed_words.is_empty() {
            println!("{name}: {play}");
        } else {
            println!(
                "{name}: {play}, forming {} for {} points",
                committed.formed_words.join(", "),
                committed.score
            );
        }
        // a degenerate word list can stall on endless exchanges
        if state.history.len() >= 500 {
            println!("move limit reached, stopping");
            break;
        }
    }

    display::print_game_state(&config, &state);
    println!("Final scores:");
    for player in &state.players {
        println!("  {}: {}", player.name, player.score);
    }
    Ok(())
}
