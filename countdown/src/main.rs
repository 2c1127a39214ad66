//! Countdown panel
//!
//! ```sh
//! countdown --count 100 --tick-speed 50 --count-diff 5
//! countdown --keybindings keys.json --log-file countdown.log
//! ```

use std::cell::RefCell;
use std::io;

use clap::Parser;
use countdown::config::{self, Args};
use countdown::ui::CounterUi;
use countdown::{handle_effect, reducer, Action, AppState};
use countdown_core::{EffectRuntime, EffectStoreWithMiddleware, LoggingMiddleware};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Configuration errors are reported before entering TUI mode
    let setup = config::init_logging(args.log_file.as_deref())
        .and_then(|()| config::load_keybindings(args.keybindings.as_deref()));
    let keybindings = match setup {
        Ok(keybindings) => keybindings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let counter_config = args.counter_config();
    info!(?counter_config, "Starting countdown");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let store = EffectStoreWithMiddleware::new(
        AppState::new(counter_config),
        reducer,
        LoggingMiddleware::new().quiet("tick"),
    );
    let mut runtime = EffectRuntime::from_store(store);
    let ui = RefCell::new(CounterUi::new(keybindings));

    let result = runtime
        .run(
            &mut terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
