//! Terminal output: status messages and split summaries.
//!
//! Everything here writes to stderr except [`print_split_summary`], whose
//! table is the primary output of `check`.
//!
//! ```no_run
//! use fob_split_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Loading module graph...");
//! ui::success("Wrote 4 packages");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_groups, print_split_summary};
pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` enables them in a non-TTY,
/// otherwise colors follow whether stderr is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether UI output is colored.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

/// Whether [`init_colors`] enabled colors.
pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
