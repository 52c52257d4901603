// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (common dialogs
// and message boxes).  Each unsafe block there MUST carry a `// SAFETY:`
// comment.
#![deny(unsafe_code)]

mod app;
mod autosave;
mod commands;
mod dictionary;
mod document;
mod error;
mod font;
mod logging;
mod platform;
mod settings;

use std::{io, path::Path};

use app::App;
use dictionary::Dictionary;
use platform::console::Console;
use settings::Settings;

fn main() {
    let mut settings = Settings::load(Path::new(settings::SETTINGS_PATH));
    logging::init(&settings.log_level);
    tracing::info!("Plume starting");

    let dictionary = Dictionary::load(Path::new(dictionary::DICTIONARY_PATH));
    let mut app = App::new(&settings, dictionary);

    if let Err(e) = app.start_autosave(
        Path::new(autosave::AUTOSAVE_PATH),
        settings.autosave_interval(),
    ) {
        // The editor stays usable without autosave.
        tracing::error!(error = %e, "could not start autosave");
    }

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());

    #[cfg(windows)]
    let mut ui = platform::win32::NativeDialogs::new(console);
    #[cfg(not(windows))]
    let mut ui = console;

    commands::run(&mut app, &mut ui);

    let font = app.shutdown();
    settings.update_font(&font);
    if let Err(e) = settings.save(Path::new(settings::SETTINGS_PATH)) {
        tracing::warn!(error = %e, "could not save settings");
    }
    tracing::info!("Plume exiting");
}
