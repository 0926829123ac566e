use tracing::info;
use tracing_subscriber::EnvFilter;

use forest_runner::app::App;
use forest_runner::constants::LOOP_TIME;

/// The main entry point of the application.
///
/// This function initializes logging, SDL, the window, the game state, and
/// then enters the main game loop.
pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut app = App::new().expect("Could not create app");

    info!(loop_time = ?LOOP_TIME, "Starting game loop");

    loop {
        if !app.run() {
            break;
        }
    }
}
