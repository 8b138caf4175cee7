use thiserror::Error;

/// Errors surfaced to engine clients.
///
/// Validation errors are purely local: they are returned without touching live
/// game state. Commit is all-or-nothing; any error leaves the game unchanged.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("placement extends off the board")]
    OutOfBounds,
    #[error("move places no tiles")]
    NoTiles,
    #[error("placed tiles are not in a single row or column")]
    NotInLine,
    #[error("first move must cover the center square")]
    FirstMoveMissesCenter,
    #[error("{0:?} is not in the dictionary")]
    NotInDictionary(String),
    #[error("move does not connect to existing tiles")]
    Disconnected,
    #[error("rack does not hold the requested tiles")]
    TilesNotInRack,
    #[error("bag holds {available} tiles, exchanging needs at least {needed}")]
    BagUnderflow { available: usize, needed: usize },
    #[error("failed to load dictionary")]
    DictionaryLoad(#[from] std::io::Error),
    #[error("game is already over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, GameError>;
