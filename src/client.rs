// Transport and game loop
//
// Each request is "<command> <json>" on a persistent TCP stream; each reply
// is a single JSON document. The receive loop only cares about "one complete
// document": it keeps reading and re-parsing until the document closes, so
// server-side chunking never matters to the rest of the bot.

use log::info;
use serde::Deserialize;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::BotError;
use crate::strategy::HideStrategy;
use crate::types::{Direction, Grid};

const READ_CHUNK_SIZE: usize = 1024;

/// Reply to the start command
#[derive(Debug, Deserialize)]
struct StartReply {
    token: String,
    map: String,
    mapwidth: usize,
}

/// Reply to the move command
#[derive(Debug, Deserialize)]
struct MoveReply {
    state: String,
    map: String,
}

/// Reply to the state command
#[derive(Debug, Deserialize)]
struct StateReply {
    map: String,
}

/// Persistent connection to the game server
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    pub async fn connect(addr: &str) -> Result<Self, BotError> {
        let stream = TcpStream::connect(addr).await?;
        info!("Connected to {}", addr);
        Ok(Connection { stream })
    }

    /// Sends "<command> <payload>" and waits for the reply document
    async fn request(
        &mut self,
        command: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, BotError> {
        let message = format!("{} {}", command, payload);
        self.stream.write_all(message.as_bytes()).await?;

        self.receive().await
    }

    /// Reads from the socket until one complete JSON document has arrived
    async fn receive(&mut self) -> Result<serde_json::Value, BotError> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        loop {
            let n = self.stream.read(&mut chunk).await?;
            if n == 0 {
                return Err(BotError::Protocol(
                    "server closed the connection mid-reply".to_string(),
                ));
            }
            buf.extend_from_slice(&chunk[..n]);

            match serde_json::from_slice::<serde_json::Value>(&buf) {
                Ok(value) => return Ok(value),
                // Document not complete yet, keep reading
                Err(e) if e.is_eof() => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// A running game session: connection, session token, current grid, and the
/// strategy that picks the moves
pub struct GameClient {
    conn: Connection,
    token: String,
    width: usize,
    map_str: String,
    grid: Grid,
    strategy: HideStrategy,
    debug_logger: DebugLogger,
    turn: u32,
}

impl GameClient {
    /// Connects and performs the start handshake
    pub async fn start(config: &Config) -> Result<Self, BotError> {
        let mut conn = Connection::connect(&config.server.address()).await?;

        let payload = json!({
            "email": config.game.email,
            "ghosts": config.game.ghosts,
            "map": config.game.map,
        });
        let reply = conn.request("start", payload).await?;
        let reply: StartReply = serde_json::from_value(reply)?;

        let grid = Grid::parse(&reply.map, reply.mapwidth)?;
        let strategy = HideStrategy::new(config.strategy.clone(), &grid)?;
        let debug_logger =
            DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;

        info!(
            "Session started: {}x{} board, {} dots to collect",
            reply.mapwidth,
            reply.mapwidth,
            grid.food_remaining()
        );

        Ok(GameClient {
            conn,
            token: reply.token,
            width: reply.mapwidth,
            map_str: reply.map,
            grid,
            strategy,
            debug_logger,
            turn: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Win condition: no collectible cells remain
    pub fn won(&self) -> bool {
        self.grid.is_cleared()
    }

    /// Computes, submits, and confirms a single move
    ///
    /// The move is irrevocable; there is no retry. `GameOver` means the
    /// server eliminated the agent.
    pub async fn step(&mut self) -> Result<Direction, BotError> {
        let decision = self.strategy.decide(&self.grid)?;
        self.turn += 1;
        info!(
            "Turn {}: moving {} to {}",
            self.turn,
            decision.direction.as_str(),
            decision.destination
        );

        let payload = json!({
            "direction": decision.direction.as_str(),
            "token": self.token,
        });
        let reply = self.conn.request("move", payload).await?;
        let reply: MoveReply = serde_json::from_value(reply)?;

        if reply.state == "game_over" {
            return Err(BotError::GameOver);
        }

        self.grid = Grid::parse(&reply.map, self.width)?;
        self.map_str = reply.map;
        self.strategy.confirm_move(&self.grid, &decision);
        self.debug_logger
            .log_move(self.turn, self.map_str.clone(), decision.direction);

        Ok(decision.direction)
    }

    /// Re-fetches the authoritative map from the server
    pub async fn refresh_state(&mut self) -> Result<(), BotError> {
        let reply = self
            .conn
            .request("state", json!({ "token": self.token }))
            .await?;
        let reply: StateReply = serde_json::from_value(reply)?;

        self.grid = Grid::parse(&reply.map, self.width)?;
        self.map_str = reply.map;
        Ok(())
    }

    /// Runs turns until the board is cleared or the game ends
    ///
    /// With `manual` set, pauses for Enter between turns.
    pub async fn play(&mut self, manual: bool) -> Result<(), BotError> {
        while !self.won() {
            // Clear the terminal and show the board, like a tiny curses UI
            print!("\x1B[2J");
            println!("{}", self.grid);

            self.step().await?;

            if manual {
                wait_for_enter().await?;
            }
        }

        info!("Board cleared after {} turns", self.turn);
        Ok(())
    }
}

async fn wait_for_enter() -> Result<(), BotError> {
    use tokio::io::{AsyncBufReadExt, BufReader};

    println!("Press Enter to continue");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(())
}
