use std::time::Instant;

use sdl2::{AudioSubsystem, Sdl};
use tracing::{debug, info};

use crate::constants::{LOOP_TIME, SCREEN_SIZE};
use crate::error::{GameError, GameResult};
use crate::game::Game;

/// Main application wrapper that manages SDL initialization, window
/// lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    // Keep SDL alive for the app lifetime so subsystems (audio) are not
    // shut down.
    _sdl_context: Sdl,
    _audio_subsystem: AudioSubsystem,
}

impl App {
    /// Initializes SDL subsystems, creates the game window, and sets up the
    /// game state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or
    /// propagates errors from `Game::new()` during game state setup.
    pub fn new() -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;

        debug!("Initializing SDL2 subsystems");
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let audio_subsystem = sdl_context.audio().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        debug!(width = SCREEN_SIZE.x, height = SCREEN_SIZE.y, "Creating game window");
        let window = video_subsystem
            .window("Forest Runner", SCREEN_SIZE.x, SCREEN_SIZE.y)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        debug!("Creating hardware-accelerated canvas");
        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let game = Game::new(canvas, event_pump)?;

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            _sdl_context: sdl_context,
            _audio_subsystem: audio_subsystem,
        })
    }

    /// Executes a single fixed tick of the game loop, sleeping away any time
    /// left in the frame budget.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game
    /// requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        if self.game.tick() {
            return false;
        }

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            spin_sleep::sleep(LOOP_TIME - elapsed);
        }

        true
    }
}
