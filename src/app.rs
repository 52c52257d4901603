// ── Application session & top-level state ─────────────────────────────────────
//
// A single `App` is created on startup by `main` and owned by the frontend
// loop for the lifetime of the process.  It holds the document, the
// dictionary, the presentation font and the autosave handle; there is no
// global mutable state.  The only other thread is the autosave worker, which
// sees the document through `SharedDocument`.

use std::{
    fs, io,
    path::Path,
    time::Duration,
};

use crate::{
    autosave::AutosaveScheduler,
    dictionary::Dictionary,
    document::{Document, SharedDocument},
    error::{PlumeError, Result},
    font::FontSettings,
    platform::Prompter,
    settings::Settings,
};

const APP_NAME: &str = "Plume";

/// Top-level session state.
pub(crate) struct App {
    doc: SharedDocument,
    dictionary: Dictionary,
    font: FontSettings,
    font_families: Vec<String>,
    autosave: Option<AutosaveScheduler>,
}

impl App {
    /// Create a session with an untitled, empty document.  Autosave is not
    /// running until `start_autosave` is called.
    pub(crate) fn new(settings: &Settings, dictionary: Dictionary) -> Self {
        Self {
            doc: SharedDocument::new(Document::new()),
            dictionary,
            font: settings.font(),
            font_families: settings.font_families.clone(),
            autosave: None,
        }
    }

    pub(crate) fn start_autosave(&mut self, path: &Path, interval: Duration) -> io::Result<()> {
        // Replacing a running scheduler stops the old one on drop.
        self.autosave = Some(AutosaveScheduler::start(self.doc.clone(), path, interval)?);
        Ok(())
    }

    // ── File open ─────────────────────────────────────────────────────────────

    /// Replace the buffer with the full contents of `path`.
    ///
    /// The file is read completely before the buffer is touched, so on
    /// error the document is unchanged.
    pub(crate) fn open(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path).map_err(|e| PlumeError::io(path, e))?;
        let mut doc = self.doc.lock();
        doc.load(path.to_path_buf(), &bytes);
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            encoding = doc.encoding().as_str(),
            "opened"
        );
        Ok(())
    }

    /// Prompt for a path and open it; failures are reported to the user.
    pub(crate) fn open_file(&mut self, ui: &mut dyn Prompter) {
        if let Some(path) = ui.prompt_open_path() {
            self.open_reporting(&path, ui);
        }
    }

    pub(crate) fn open_reporting(&mut self, path: &Path, ui: &mut dyn Prompter) {
        if let Err(e) = self.open(path) {
            tracing::debug!(error = %e, "open failed");
            ui.notify_error(&format!("Error opening file: {e}"));
        }
    }

    // ── File save ─────────────────────────────────────────────────────────────

    /// Write the whole buffer to `path`, overwriting it.
    ///
    /// On success the document is bound to `path` and marked clean.  On
    /// failure neither the dirty flag, the bound path nor the encoding
    /// changes.
    pub(crate) fn save(&mut self, path: &Path) -> Result<()> {
        let (encoding, bytes) = {
            let doc = self.doc.lock();
            let (encoding, bytes) = doc.encode_for_disk();
            if encoding != doc.encoding() {
                tracing::info!(
                    from = doc.encoding().as_str(),
                    to = encoding.as_str(),
                    "content not representable in original encoding"
                );
            }
            (encoding, bytes)
        };
        fs::write(path, &bytes).map_err(|e| PlumeError::io(path, e))?;
        self.doc.lock().mark_saved(path.to_path_buf(), encoding);
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            encoding = encoding.as_str(),
            "saved"
        );
        Ok(())
    }

    /// Save to the bound path, or ask for one if the document is untitled.
    pub(crate) fn save_file(&mut self, ui: &mut dyn Prompter) {
        let bound = self.doc.lock().path().map(Path::to_path_buf);
        match bound {
            Some(path) => self.save_reporting(&path, ui),
            None => self.save_file_as(ui),
        }
    }

    /// Always ask for a destination.
    pub(crate) fn save_file_as(&mut self, ui: &mut dyn Prompter) {
        let suggested = self.doc.lock().display_name();
        if let Some(path) = ui.prompt_save_as_path(&suggested) {
            self.save_reporting(&path, ui);
        }
    }

    pub(crate) fn save_reporting(&mut self, path: &Path, ui: &mut dyn Prompter) {
        if let Err(e) = self.save(path) {
            tracing::debug!(error = %e, "save failed");
            ui.notify_error(&format!("Error saving file: {e}"));
        }
    }

    // ── Presentation ──────────────────────────────────────────────────────────

    pub(crate) fn change_font(&mut self, ui: &mut dyn Prompter) {
        if let Some(family) = ui.prompt_font_choice(&self.font_families, &self.font.family) {
            self.apply_font_family(&family, ui);
        }
    }

    pub(crate) fn apply_font_family(&mut self, family: &str, ui: &mut dyn Prompter) {
        match self.font.set_family(family, &self.font_families) {
            Ok(()) => tracing::debug!(font = %self.font.describe(), "font changed"),
            Err(e) => ui.notify_error(&format!("Invalid font: {e}")),
        }
    }

    pub(crate) fn change_font_size(&mut self, ui: &mut dyn Prompter) {
        if let Some(input) = ui.prompt_font_size(self.font.size) {
            self.apply_font_size(&input, ui);
        }
    }

    pub(crate) fn apply_font_size(&mut self, input: &str, ui: &mut dyn Prompter) {
        match self.font.set_size_from_input(input) {
            Ok(()) => tracing::debug!(font = %self.font.describe(), "font size changed"),
            Err(e) => ui.notify_error(&format!("Invalid font size: {e}")),
        }
    }

    #[cfg(test)]
    pub(crate) fn font(&self) -> &FontSettings {
        &self.font
    }

    // ── Edits ─────────────────────────────────────────────────────────────────

    #[cfg(test)]
    pub(crate) fn set_text(&mut self, text: &str) {
        self.doc.lock().set_content(text);
    }

    pub(crate) fn append_line(&mut self, line: &str) {
        self.doc.lock().append_line(line);
    }

    pub(crate) fn clear(&mut self) {
        self.doc.lock().clear();
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub(crate) fn content(&self) -> String {
        self.doc.snapshot()
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.doc.lock().is_dirty()
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> Option<std::path::PathBuf> {
        self.doc.lock().path().map(Path::to_path_buf)
    }

    /// Dictionary membership for `word`, phrased for display.
    pub(crate) fn lookup(&self, word: &str) -> String {
        if !self.dictionary.is_enabled() {
            "spell check disabled".to_owned()
        } else if self.dictionary.contains(word) {
            format!("{word:?}: in dictionary")
        } else {
            format!("{word:?}: not in dictionary")
        }
    }

    #[cfg(test)]
    pub(crate) fn autosave(&self) -> Option<&AutosaveScheduler> {
        self.autosave.as_ref()
    }

    /// Compute the title string for the session.
    ///
    /// | State | Title |
    /// |---|---|
    /// | No path, clean | `"Plume"` |
    /// | Path set, clean | `"filename — Plume"` |
    /// | Path set, dirty | `"*filename — Plume"` |
    /// | No path, dirty | `"*Untitled — Plume"` |
    pub(crate) fn window_title(&self) -> String {
        let doc = self.doc.lock();
        if doc.path().is_none() && !doc.is_dirty() {
            return APP_NAME.to_owned();
        }
        let dirty = if doc.is_dirty() { "*" } else { "" };
        format!("{dirty}{} \u{2014} {APP_NAME}", doc.display_name())
    }

    /// Multi-line summary for the `:status` command.
    pub(crate) fn status(&self) -> String {
        let (chars, encoding) = {
            let doc = self.doc.lock();
            (doc.content().chars().count(), doc.encoding().as_str())
        };
        let spell = if self.dictionary.is_enabled() {
            format!("{} words", self.dictionary.len())
        } else {
            "disabled".to_owned()
        };
        let autosave = match &self.autosave {
            Some(a) => format!(
                "{:?} every {}s to {}",
                a.state(),
                a.interval().as_secs(),
                a.path().display()
            ),
            None => "off".to_owned(),
        };
        format!(
            "{}\n{chars} chars, {encoding}\nfont: {}\ndictionary: {spell}\nautosave: {autosave}",
            self.window_title(),
            self.font.describe(),
        )
    }

    // ── Shutdown ──────────────────────────────────────────────────────────────

    /// Stop and join the autosave worker, then hand back the font state for
    /// persistence.
    pub(crate) fn shutdown(&mut self) -> FontSettings {
        if let Some(mut autosave) = self.autosave.take() {
            autosave.stop();
        }
        self.font.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autosave::AutosaveState;
    use std::{collections::VecDeque, path::PathBuf};

    /// Scripted `Prompter` that records every notification.
    #[derive(Default)]
    struct FakePrompter {
        paths: VecDeque<Option<PathBuf>>,
        answers: VecDeque<Option<String>>,
        errors: Vec<String>,
        suggested: Vec<String>,
    }

    impl Prompter for FakePrompter {
        fn prompt_open_path(&mut self) -> Option<PathBuf> {
            self.paths.pop_front().flatten()
        }

        fn prompt_save_as_path(&mut self, suggested: &str) -> Option<PathBuf> {
            self.suggested.push(suggested.to_owned());
            self.paths.pop_front().flatten()
        }

        fn notify_error(&mut self, message: &str) {
            self.errors.push(message.to_owned());
        }

        fn prompt_font_choice(&mut self, _: &[String], _: &str) -> Option<String> {
            self.answers.pop_front().flatten()
        }

        fn prompt_font_size(&mut self, _: u32) -> Option<String> {
            self.answers.pop_front().flatten()
        }
    }

    fn app() -> App {
        App::new(&Settings::default(), Dictionary::default())
    }

    #[test]
    fn title_clean_untitled() {
        assert_eq!(app().window_title(), "Plume");
    }

    #[test]
    fn title_dirty_untitled() {
        let mut app = app();
        app.append_line("x");
        assert_eq!(app.window_title(), "*Untitled \u{2014} Plume");
    }

    #[test]
    fn open_reads_exact_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("todo.txt");
        let text = "line one\r\n\ttabbed \u{2603}\nno trailing newline";
        fs::write(&path, text).expect("write");

        let mut app = app();
        app.set_text("scratch");
        app.open(&path).expect("open");
        assert_eq!(app.content(), text);
        assert!(!app.is_dirty());
        assert_eq!(app.path().as_deref(), Some(path.as_path()));
        assert_eq!(app.window_title(), "todo.txt \u{2014} Plume");
    }

    #[test]
    fn failed_open_leaves_buffer_unchanged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app();
        app.set_text("keep me");

        let err = app.open(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, PlumeError::Io { .. }));
        assert_eq!(app.content(), "keep me");
        assert!(app.is_dirty());
        assert_eq!(app.path(), None);
    }

    #[test]
    fn save_then_open_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let text = "alpha\nbeta\n\u{1F980} gamma";

        let mut app = app();
        app.set_text(text);
        app.save(&path).expect("save");
        assert!(!app.is_dirty());
        assert_eq!(app.window_title(), "out.txt \u{2014} Plume");

        let mut other = self::app();
        other.open(&path).expect("open");
        assert_eq!(other.content(), text);
    }

    #[test]
    fn latin1_file_with_euro_edit_survives_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prices.txt");
        fs::write(&path, b"caf\xE9\n").expect("seed");

        let mut app = app();
        app.open(&path).expect("open");
        app.append_line("price 5\u{20AC}");
        app.save(&path).expect("save");

        let mut other = self::app();
        other.open(&path).expect("reopen");
        assert_eq!(other.content(), app.content());
        assert_eq!(other.content(), "caf\u{e9}\nprice 5\u{20AC}\n");
    }

    #[test]
    fn latin1_text_that_looks_like_utf8_survives_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("mojibake.txt");
        fs::write(&path, b"\xFF").expect("seed");

        let mut app = app();
        app.open(&path).expect("open");
        app.set_text("\u{c3}\u{a9}");
        app.save(&path).expect("save");

        let mut other = self::app();
        other.open(&path).expect("reopen");
        assert_eq!(other.content(), "\u{c3}\u{a9}");
    }

    #[test]
    fn utf8_bom_survives_open_and_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bom.txt");
        fs::write(&path, b"\xEF\xBB\xBFhello").expect("seed");

        let mut app = app();
        app.open(&path).expect("open");
        assert_eq!(app.content(), "hello");
        app.save(&path).expect("save");
        assert_eq!(fs::read(&path).expect("read"), b"\xEF\xBB\xBFhello");
    }

    #[test]
    fn odd_length_utf16_file_is_saved_byte_for_byte() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("odd.txt");
        let raw = b"\xFF\xFEa\x00b";
        fs::write(&path, raw).expect("seed");

        let mut app = app();
        app.open(&path).expect("open");
        assert!(app.status().contains("ANSI"));
        app.save(&path).expect("save");
        assert_eq!(fs::read(&path).expect("read"), raw);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        fs::write(&path, "a much longer previous body").expect("seed");

        let mut app = app();
        app.set_text("short");
        app.save(&path).expect("save");
        assert_eq!(fs::read_to_string(&path).expect("read"), "short");
    }

    #[test]
    fn failed_save_keeps_dirty_and_binding() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app();
        app.set_text("unsaved");

        // A directory is not a writable file.
        assert!(app.save(dir.path()).is_err());
        assert!(app.is_dirty());
        assert_eq!(app.path(), None);
    }

    #[test]
    fn open_file_cancel_is_a_no_op() {
        let mut app = app();
        app.set_text("stay");
        let mut ui = FakePrompter::default();
        ui.paths.push_back(None);
        app.open_file(&mut ui);
        assert_eq!(app.content(), "stay");
        assert!(ui.errors.is_empty());
    }

    #[test]
    fn open_file_failure_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app();
        let mut ui = FakePrompter::default();
        ui.paths.push_back(Some(dir.path().join("nope.txt")));
        app.open_file(&mut ui);
        assert_eq!(ui.errors.len(), 1);
        assert!(ui.errors[0].starts_with("Error opening file"));
    }

    #[test]
    fn save_file_prompts_only_when_untitled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = dir.path().join("first.txt");

        let mut app = app();
        app.set_text("v1");
        let mut ui = FakePrompter::default();
        ui.paths.push_back(Some(first.clone()));
        app.save_file(&mut ui);
        assert_eq!(ui.suggested, ["Untitled"]);
        assert_eq!(fs::read_to_string(&first).expect("read"), "v1");

        // Bound now: no prompt is consumed.
        app.set_text("v2");
        app.save_file(&mut ui);
        assert_eq!(ui.suggested.len(), 1);
        assert_eq!(fs::read_to_string(&first).expect("read"), "v2");
        assert!(ui.errors.is_empty());
    }

    #[test]
    fn save_file_as_failure_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app();
        app.set_text("x");
        let mut ui = FakePrompter::default();
        ui.paths
            .push_back(Some(dir.path().join("no_such_dir").join("x.txt")));
        app.save_file_as(&mut ui);
        assert_eq!(ui.errors.len(), 1);
        assert!(ui.errors[0].starts_with("Error saving file"));
        assert!(app.is_dirty());
    }

    #[test]
    fn font_size_14_is_applied() {
        let mut app = app();
        let mut ui = FakePrompter::default();
        ui.answers.push_back(Some("14".to_owned()));
        app.change_font_size(&mut ui);
        assert_eq!(app.font().size, 14);
        assert!(ui.errors.is_empty());
    }

    #[test]
    fn font_size_abc_is_rejected_and_reported() {
        let mut app = app();
        let before = app.font().size;
        let mut ui = FakePrompter::default();
        ui.answers.push_back(Some("abc".to_owned()));
        app.change_font_size(&mut ui);
        assert_eq!(app.font().size, before);
        assert_eq!(ui.errors.len(), 1);
        assert!(ui.errors[0].starts_with("Invalid font size"));
    }

    #[test]
    fn font_change_keeps_document_untouched() {
        let mut app = app();
        let mut ui = FakePrompter::default();
        ui.answers.push_back(Some("Serif".to_owned()));
        app.change_font(&mut ui);
        assert_eq!(app.font().family, "Serif");
        assert!(!app.is_dirty());
        assert_eq!(app.content(), "");
    }

    #[test]
    fn unknown_font_is_reported() {
        let mut app = app();
        let mut ui = FakePrompter::default();
        app.apply_font_family("Wingdings", &mut ui);
        assert_eq!(app.font().family, crate::font::DEFAULT_FAMILY);
        assert_eq!(ui.errors.len(), 1);
    }

    #[test]
    fn autosave_tracks_buffer_and_stops_on_shutdown() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("autosave.txt");
        let mut app = app();
        app.set_text("recover me");
        app.start_autosave(&path, Duration::from_millis(20))
            .expect("start");
        assert_eq!(
            app.autosave().map(AutosaveScheduler::state),
            Some(AutosaveState::Running)
        );

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while fs::read_to_string(&path).ok().as_deref() != Some("recover me")
            && std::time::Instant::now() < deadline
        {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(fs::read_to_string(&path).expect("read"), "recover me");
        // Autosave is not a user save.
        assert!(app.is_dirty());

        let font = app.shutdown();
        assert_eq!(font, FontSettings::default());
        assert!(app.autosave().is_none());
    }

    #[test]
    fn lookup_consults_loaded_dictionary() {
        let dict = Dictionary::from_reader(std::io::Cursor::new("Hello\n"));
        let app = App::new(&Settings::default(), dict);
        assert_eq!(app.lookup("HELLO"), "\"HELLO\": in dictionary");
        assert_eq!(app.lookup("bye"), "\"bye\": not in dictionary");
    }

    #[test]
    fn status_mentions_disabled_dictionary() {
        let status = app().status();
        assert!(status.contains("dictionary: disabled"));
        assert!(status.contains("autosave: off"));
    }
}
