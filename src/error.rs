// Error taxonomy for the bot
//
// Transport and protocol failures abort the session. Game-over and
// no-legal-move are terminal game outcomes surfaced to the caller.
// Unreachable path targets are NOT errors; the strategy recovers from those
// locally by excluding the candidate.

use thiserror::Error;

use crate::types::Position;

#[derive(Debug, Error)]
pub enum BotError {
    /// Connection or read/write failure on the server socket
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The server reply was not a well-formed JSON document
    #[error("invalid server reply: {0}")]
    Json(#[from] serde_json::Error),

    /// The server reply parsed but did not match the expected shape
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The flattened map string could not be turned into a grid
    #[error("malformed map: {0}")]
    BadMap(String),

    /// The server reported that the agent was eliminated
    #[error("game over, Pakku is dead")]
    GameOver,

    /// The agent is completely walled in; there is no move to make
    #[error("no legal move from {from}")]
    NoLegalMove { from: Position },

    /// A computed path begins with a step that is not adjacent to the
    /// current position; sending it would be an invalid move
    #[error("path step {step} is not adjacent to {from}")]
    PathInconsistency { from: Position, step: Position },
}
