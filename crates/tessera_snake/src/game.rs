//! # Game Loop
//!
//! Owns one world and advances it a tick at a time. Input arrives as an
//! optional heading per tick; pacing and display belong to the caller.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tessera_core::Entity;

use crate::config::SnakeConfig;
use crate::error::{SnakeError, SnakeResult};
use crate::render::render;
use crate::systems;
use crate::world::{Board, SnakeWorld};
use crate::Direction;

/// State of the game after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game continues.
    Running,
    /// A player crashed; further ticks do nothing.
    GameOver,
    /// The snake filled the board; further ticks do nothing.
    Won,
}

/// A running game.
pub struct Game {
    world: SnakeWorld,
    config: SnakeConfig,
    board: Board,
    rng: ChaCha8Rng,
    head: Entity,
    apple: Entity,
    ticks: u64,
    state: TickOutcome,
}

impl Game {
    /// Builds the world, spawns the snake and places the first apple.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid.
    pub fn new(config: SnakeConfig) -> SnakeResult<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(clock_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = config.board();
        let mut world = SnakeWorld::with_config(&config.world)?;

        let head = systems::init_snake(&mut world, config.initial_length)?;
        let apple = systems::spawn_apple(&mut world)?;
        systems::place_edible(&mut world, apple, board, &mut rng)?;

        tracing::info!(
            "new {}x{} game, seed {}, capacity {}",
            board.width,
            board.height,
            seed,
            config.world.max_entities
        );

        Ok(Self {
            world,
            config,
            board,
            rng,
            head,
            apple,
            ticks: 0,
            state: TickOutcome::Running,
        })
    }

    /// Applies `input`, runs the systems once and checks for a crash.
    ///
    /// Eating the apple when no free cell is left for the next one wins
    /// the game.
    ///
    /// # Errors
    ///
    /// Propagates ECS failures from the systems.
    pub fn tick(&mut self, input: Option<Direction>) -> SnakeResult<TickOutcome> {
        if self.state != TickOutcome::Running {
            return Ok(self.state);
        }

        if let Some(dir) = input {
            systems::steer(&mut self.world, dir);
        }
        systems::update_interactables(&mut self.world)?;
        let eaten = systems::update_edibles(&mut self.world, self.board, &mut self.rng);
        self.ticks += 1;

        match eaten {
            Ok(()) => {}
            Err(SnakeError::BoardFull { .. }) => {
                self.state = TickOutcome::Won;
                tracing::info!("board filled after {} ticks, score {}", self.ticks, self.score());
                return Ok(TickOutcome::Won);
            }
            Err(err) => return Err(err),
        }

        if systems::is_game_over(&self.world, self.board) {
            self.state = TickOutcome::GameOver;
            tracing::info!("game over after {} ticks, score {}", self.ticks, self.score());
        }
        Ok(self.state)
    }

    /// Renders the current state.
    #[must_use]
    pub fn frame(&self) -> String {
        render(&self.world, self.board)
    }

    /// Returns the score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.world.score
    }

    /// Returns the number of ticks run.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns the outcome of the last tick.
    #[must_use]
    pub const fn outcome(&self) -> TickOutcome {
        self.state
    }

    /// Checks whether the game has ended, lost or won.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state != TickOutcome::Running
    }

    /// Returns the snake's head.
    #[must_use]
    pub const fn head(&self) -> Entity {
        self.head
    }

    /// Returns the respawning apple.
    #[must_use]
    pub const fn apple(&self) -> Entity {
        self.apple
    }

    /// Returns the board.
    #[must_use]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// Returns the configuration the game was built from.
    #[must_use]
    pub const fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Returns the world.
    #[must_use]
    pub const fn world(&self) -> &SnakeWorld {
        &self.world
    }

    /// Returns the world mutably, for scripted setups.
    pub fn world_mut(&mut self) -> &mut SnakeWorld {
        &mut self.world
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()))
}
