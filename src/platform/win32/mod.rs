// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is the only module in the codebase where `unsafe` code is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

use std::path::PathBuf;

use super::{Frontend, Prompter};

pub mod dialogs;

/// Wraps a text frontend, routing path prompts and error notifications
/// through native dialogs.  Font prompts and the command stream stay with
/// the inner frontend.
pub(crate) struct NativeDialogs<F> {
    inner: F,
}

impl<F: Frontend> NativeDialogs<F> {
    pub(crate) fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Frontend> Prompter for NativeDialogs<F> {
    fn prompt_open_path(&mut self) -> Option<PathBuf> {
        dialogs::show_open_dialog()
    }

    fn prompt_save_as_path(&mut self, suggested: &str) -> Option<PathBuf> {
        dialogs::show_save_dialog(suggested)
    }

    fn notify_error(&mut self, message: &str) {
        dialogs::show_error_dialog(message);
    }

    fn prompt_font_choice(&mut self, families: &[String], current: &str) -> Option<String> {
        self.inner.prompt_font_choice(families, current)
    }

    fn prompt_font_size(&mut self, current: u32) -> Option<String> {
        self.inner.prompt_font_size(current)
    }
}

impl<F: Frontend> Frontend for NativeDialogs<F> {
    fn next_line(&mut self) -> Option<String> {
        self.inner.next_line()
    }

    fn show(&mut self, text: &str) {
        self.inner.show(text);
    }
}
