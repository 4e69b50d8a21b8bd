//! Terminal setup and teardown for the full-screen surface
//!
//! Raw mode and the alternate screen belong to the thread running the frame
//! loop. Exchange resolution runs on runtime worker threads, and a panic there
//! is already turned into an `ERROR IN AI CORE` reply by the Conductor, so the
//! panic hook leaves the screen alone for those.

use std::io::{self, Stdout};
use std::panic;
use std::thread;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Terminal type used by the full-screen surface
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen
pub fn enter() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Leave the alternate screen and raw mode
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Restore the terminal before reporting panics on the calling thread
pub fn install_panic_hook() {
    install_panic_hook_with(|| {
        let _ = restore();
    });
}

/// Install a panic hook that runs `restore` for panics on the calling thread
///
/// Panics on other threads are logged and otherwise left to whoever joins
/// that thread.
pub fn install_panic_hook_with<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let ui_thread = thread::current().id();
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if thread::current().id() == ui_thread {
            restore();
            original_hook(panic_info);
        } else {
            tracing::error!("Panic off the UI thread: {panic_info}");
        }
    }));
}
