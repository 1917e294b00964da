pub mod find;

use fltk::{app, prelude::*, window::Window};

/// Block until `dialog` is hidden. Gives up early (hiding it) when the
/// application is shutting down underneath it.
pub fn run_dialog(dialog: &Window) {
    let mut dialog = dialog.clone();
    while dialog.shown() {
        if !app::wait() || app::should_program_quit() {
            dialog.hide();
        }
    }
}
