// ── Line-oriented console frontend ────────────────────────────────────────────
//
// Prompts are written to `out` and answered by the next line of `input`.  An
// empty answer (or end of input) counts as cancel.  Generic over the streams
// so tests can script a whole session.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use super::{Frontend, Prompter};

pub(crate) struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Write `prompt`, then read one answer.  `None` on cancel.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        // Console output failures have nowhere better to go.
        let _ = write!(self.out, "{prompt}");
        let _ = self.out.flush();
        self.next_line()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.out
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn prompt_open_path(&mut self) -> Option<PathBuf> {
        self.ask("Open file (*.txt): ").map(PathBuf::from)
    }

    fn prompt_save_as_path(&mut self, suggested: &str) -> Option<PathBuf> {
        self.ask(&format!("Save as [{suggested}]: ")).map(PathBuf::from)
    }

    fn notify_error(&mut self, message: &str) {
        let _ = writeln!(self.out, "error: {message}");
    }

    fn prompt_font_choice(&mut self, families: &[String], current: &str) -> Option<String> {
        let _ = writeln!(self.out, "Fonts: {}", families.join(", "));
        self.ask(&format!("Choose font [{current}]: "))
    }

    fn prompt_font_size(&mut self, current: u32) -> Option<String> {
        self.ask(&format!("Enter font size [{current}]: "))
    }
}

impl<R: BufRead, W: Write> Frontend for Console<R, W> {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            }
            Err(e) => {
                tracing::warn!(error = %e, "console input failed");
                None
            }
        }
    }

    fn show(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(c: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(c.into_output()).expect("utf8")
    }

    #[test]
    fn next_line_strips_terminators() {
        let mut c = console("one\r\ntwo\nthree");
        assert_eq!(c.next_line().as_deref(), Some("one"));
        assert_eq!(c.next_line().as_deref(), Some("two"));
        assert_eq!(c.next_line().as_deref(), Some("three"));
        assert_eq!(c.next_line(), None);
    }

    #[test]
    fn blank_answer_cancels() {
        let mut c = console("   \n");
        assert_eq!(c.prompt_open_path(), None);
    }

    #[test]
    fn end_of_input_cancels() {
        let mut c = console("");
        assert_eq!(c.prompt_font_size(12), None);
    }

    #[test]
    fn save_prompt_shows_suggestion() {
        let mut c = console(" out.txt \n");
        assert_eq!(c.prompt_save_as_path("notes.txt"), Some(PathBuf::from("out.txt")));
        assert_eq!(output(c), "Save as [notes.txt]: ");
    }

    #[test]
    fn font_choice_lists_families() {
        let mut c = console("Serif\n");
        let families = vec!["Monospaced".to_owned(), "Serif".to_owned()];
        assert_eq!(
            c.prompt_font_choice(&families, "Monospaced").as_deref(),
            Some("Serif")
        );
        assert!(output(c).starts_with("Fonts: Monospaced, Serif\n"));
    }

    #[test]
    fn errors_are_printed() {
        let mut c = console("");
        c.notify_error("Error opening file: gone");
        assert_eq!(output(c), "error: Error opening file: gone\n");
    }
}
