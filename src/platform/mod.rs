// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface the session controller uses to talk to
// the user.  No `unsafe` lives here; all Win32 FFI is confined to the
// `win32` sub-module and never leaks outward.

use std::path::PathBuf;

pub mod console;
#[cfg(windows)]
pub mod win32;

/// Dialogs and notifications the session controller needs from a frontend.
///
/// Every prompt returns `None` when the user cancels.
pub(crate) trait Prompter {
    /// Ask for a document to open.
    fn prompt_open_path(&mut self) -> Option<PathBuf>;

    /// Ask where to save; `suggested` pre-fills the file name.
    fn prompt_save_as_path(&mut self, suggested: &str) -> Option<PathBuf>;

    /// Show a user-visible error.  Must not fail.
    fn notify_error(&mut self, message: &str);

    /// Offer `families` and return the chosen one.
    fn prompt_font_choice(&mut self, families: &[String], current: &str) -> Option<String>;

    /// Ask for a point size.  The raw input is returned unparsed.
    fn prompt_font_size(&mut self, current: u32) -> Option<String>;
}

/// A `Prompter` that can also drive the command loop.
pub(crate) trait Frontend: Prompter {
    /// Next line of user input, without its terminator; `None` at end of
    /// input.
    fn next_line(&mut self) -> Option<String>;

    /// Show informational output.
    fn show(&mut self, text: &str);
}
