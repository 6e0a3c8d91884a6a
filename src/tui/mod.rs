// TUI module for the interactive research interface
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use terminal::TerminalGuard;

use crate::session::SearchSession;

/// Run the interactive TUI.
///
/// The terminal is restored on every exit path, including panics inside
/// the event loop (the guard restores on drop).
pub fn run_interactive(session: SearchSession) -> Result<()> {
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(session);

    let result = app.run(guard.terminal_mut());

    // Keep the app's error if both fail; a restore error alone still surfaces.
    let restored = guard.restore();
    result.and(restored)
}
