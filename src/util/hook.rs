use tracing::error;

use crate::ui::tui;

/// Leaves the alternate screen before the default hook prints, so the
/// panic message stays readable, and mirrors it into the log file.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = tui::Tui::restore() {
            error!("Failed to restore terminal: {}", e);
        }
        error!("{}", panic_info);
        hook(panic_info);
    }));
}
