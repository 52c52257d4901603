// ── Console command language ──────────────────────────────────────────────────
//
// Lines starting with `:` are commands; every other line is appended to the
// buffer.  A leading `::` appends the line minus one colon.  Commands that
// take an argument prompt for it when it is omitted.

use std::path::PathBuf;

use crate::{
    app::App,
    error::{PlumeError, Result},
    platform::Frontend,
};

const HELP: &str = "\
Lines are appended to the document (start with :: to append a line
beginning with :).  Commands:
  :open [path]     open a file
  :save            save to the current file
  :saveas [path]   save to a new file
  :font [family]   change font family
  :size [n]        change font size
  :lookup <word>   look a word up in the dictionary
  :print           show the document
  :clear           empty the document
  :status          show session state
  :help            show this help
  :quit            exit (twice if there are unsaved changes)";

const UNSAVED_WARNING: &str = "unsaved changes; :quit again to discard them";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Plain text to append.
    Append(String),
    Open(Option<PathBuf>),
    Save,
    SaveAs(Option<PathBuf>),
    Font(Option<String>),
    FontSize(Option<String>),
    Lookup(String),
    Print,
    Clear,
    Status,
    Help,
    Quit,
}

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self> {
        if let Some(text) = line.strip_prefix("::") {
            return Ok(Self::Append(format!(":{text}")));
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Self::Append(line.to_owned()));
        };

        let rest = rest.trim();
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim().to_owned())),
            None => (rest, None),
        };

        Ok(match name {
            "open" | "o" => Self::Open(arg.map(PathBuf::from)),
            "save" | "w" => Self::Save,
            "saveas" => Self::SaveAs(arg.map(PathBuf::from)),
            "font" => Self::Font(arg),
            "size" => Self::FontSize(arg),
            "lookup" => match arg {
                Some(word) => Self::Lookup(word),
                None => {
                    return Err(PlumeError::UnknownCommand {
                        line: line.to_owned(),
                    })
                }
            },
            "print" | "p" => Self::Print,
            "clear" => Self::Clear,
            "status" => Self::Status,
            "help" | "h" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => {
                return Err(PlumeError::UnknownCommand {
                    line: line.to_owned(),
                })
            }
        })
    }
}

/// Drive `app` from `ui` until `:quit` or end of input.
///
/// `:quit` with unsaved changes only warns; a second `:quit` straight after
/// it exits.
pub(crate) fn run<F: Frontend>(app: &mut App, ui: &mut F) {
    ui.show(&format!("{} (:help for commands)", app.window_title()));

    let mut quit_pending = false;
    while let Some(line) = ui.next_line() {
        let command = match Command::parse(&line) {
            Ok(c) => c,
            Err(e) => {
                ui.notify_error(&e.to_string());
                continue;
            }
        };
        tracing::trace!(?command, "dispatch");

        match command {
            Command::Quit if app.is_dirty() && !quit_pending => {
                quit_pending = true;
                ui.show(UNSAVED_WARNING);
                continue;
            }
            Command::Quit => break,
            Command::Append(text) => app.append_line(&text),
            Command::Open(Some(path)) => app.open_reporting(&path, ui),
            Command::Open(None) => app.open_file(ui),
            Command::Save => app.save_file(ui),
            Command::SaveAs(Some(path)) => app.save_reporting(&path, ui),
            Command::SaveAs(None) => app.save_file_as(ui),
            Command::Font(Some(family)) => app.apply_font_family(&family, ui),
            Command::Font(None) => app.change_font(ui),
            Command::FontSize(Some(input)) => app.apply_font_size(&input, ui),
            Command::FontSize(None) => app.change_font_size(ui),
            Command::Lookup(word) => ui.show(&app.lookup(&word)),
            Command::Print => ui.show(app.content().trim_end_matches('\n')),
            Command::Clear => app.clear(),
            Command::Status => ui.show(&app.status()),
            Command::Help => ui.show(HELP),
        }
        quit_pending = false;
    }
}
