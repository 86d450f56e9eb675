//! Hex Text Protocol (HTP) front end.
//!
//! HTP follows the framing of the Go Text Protocol: every command may carry a
//! numeric id, successful responses start with `=`, failures with `?`, and
//! each response is terminated by a blank line. It lets the engine be driven
//! by Hex GUIs such as HexGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Start a new game on a `size`x`size` board
//! - `clear_board` - Start a new game on the current board size
//! - `play <color> <cell>` - Play a move, e.g. `play blue c2`
//! - `genmove <color>` - Let the engine choose and play a move
//! - `swap` - Apply the swap rule after the opening move
//! - `showboard` - Print the board
//! - `winner` - Report the winner (`blue`, `red` or `none`)
//! - `playouts <n>` - Set the number of playouts per generated move

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::board::{Cell, Player};
use crate::constants::{DEFAULT_SIZE, MAX_TEXT_SIZE};
use crate::error::Result;
use crate::game::{Controller, Game};
use crate::playout::SearchConfig;

/// The list of known HTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "playouts",
    "protocol_version",
    "quit",
    "showboard",
    "swap",
    "version",
    "winner",
];

/// HTP engine state.
pub struct HtpEngine {
    game: Game,
    size: usize,
    config: SearchConfig,
}

impl HtpEngine {
    /// Create an engine for a `size`x`size` board.
    ///
    /// Sizes outside the text coordinate range fall back to the default.
    pub fn new(size: usize, config: SearchConfig) -> Result<Self> {
        let size = if size <= MAX_TEXT_SIZE {
            size
        } else {
            warn!(size, "board too large for text coordinates, using default");
            DEFAULT_SIZE
        };
        Ok(Self {
            game: Self::new_game(size)?,
            size,
            config,
        })
    }

    fn new_game(size: usize) -> Result<Game> {
        Game::new(size, Controller::Human, Controller::Human)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the HTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!(%command, ?args, "htp command");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute an HTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(name) => {
                    let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "boardsize" => match args.first().map(|a| a.parse::<usize>()) {
                Some(Ok(size)) if size <= MAX_TEXT_SIZE => match Self::new_game(size) {
                    Ok(game) => {
                        self.size = size;
                        self.game = game;
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                },
                Some(Ok(size)) => (
                    false,
                    format!("unacceptable size, at most {MAX_TEXT_SIZE} is supported (got {size})"),
                ),
                Some(Err(_)) => (false, "invalid size".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "clear_board" => match Self::new_game(self.size) {
                Ok(game) => {
                    self.game = game;
                    (true, String::new())
                }
                Err(err) => (false, err.to_string()),
            },

            "playouts" => match args.first().map(|a| a.parse::<usize>()) {
                Some(Ok(n)) if n > 0 => {
                    self.config.playouts = n;
                    (true, String::new())
                }
                Some(_) => (false, "invalid playout count".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let player = match args[0].parse::<Player>() {
                    Ok(player) => player,
                    Err(_) => return (false, "invalid color".to_string()),
                };
                let cell = match args[1].parse::<Cell>() {
                    Ok(cell) => cell,
                    Err(err) => return (false, err.to_string()),
                };
                if self.game.current_turn() != Some(player) {
                    return (false, format!("it is not {player}'s turn"));
                }
                match self.game.claim(cell) {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                let player = match args.first().map(|a| a.parse::<Player>()) {
                    Some(Ok(player)) => player,
                    Some(Err(_)) => return (false, "invalid color".to_string()),
                    None => return (false, "missing argument".to_string()),
                };
                if self.game.current_turn() != Some(player) {
                    return (false, format!("it is not {player}'s turn"));
                }
                self.game
                    .set_controller(player, Controller::Automated(self.config));
                let result = self.game.play_automated_move();
                self.game.set_controller(player, Controller::Human);
                match result {
                    Ok(cell) => (true, cell.to_string()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "swap" => match self.game.swap_opening() {
                Ok(()) => (true, String::new()),
                Err(err) => (false, err.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game.board())),

            "winner" => {
                let winner = self
                    .game
                    .winner()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "none".to_string());
                (true, winner)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
