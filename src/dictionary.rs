// ── Dictionary word list ──────────────────────────────────────────────────────
//
// Loaded once at startup from a newline-delimited word list.  A missing or
// unreadable source is not an error: the dictionary is empty and spell check
// is reported as disabled.

use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::document::decode_latin1;

/// Fixed word-list location, relative to the working directory.
pub(crate) const DICTIONARY_PATH: &str = "dictionary.txt";

/// Immutable set of trimmed, lower-cased words.
#[derive(Debug, Default)]
pub(crate) struct Dictionary {
    words: HashSet<String>,
    enabled: bool,
}

impl Dictionary {
    /// Read the word list at `path`.
    ///
    /// Never fails; problems are logged and yield a disabled dictionary.
    pub(crate) fn load(path: &Path) -> Self {
        let dict = File::open(path)
            .map(|f| Self::from_reader(BufReader::new(f)))
            .unwrap_or_else(|e| {
                tracing::debug!(path = %path.display(), error = %e, "cannot open word list");
                Self::default()
            });

        if dict.enabled {
            tracing::info!(words = dict.len(), path = %path.display(), "dictionary loaded");
        } else {
            tracing::warn!("Dictionary not found. Spell check disabled.");
        }
        dict
    }

    /// Build from any line source.  A read error part-way through discards
    /// what was read so far.
    pub(crate) fn from_reader(reader: impl BufRead) -> Self {
        match collect_words(reader) {
            Ok(words) => Self {
                words,
                enabled: true,
            },
            Err(e) => {
                tracing::debug!(error = %e, "word list unreadable");
                Self::default()
            }
        }
    }

    /// Exact membership test after the same normalisation used on load.
    pub(crate) fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalise(word))
    }

    pub(crate) fn len(&self) -> usize {
        self.words.len()
    }

    /// `false` when the word list could not be loaded.
    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Lines that are not valid UTF-8 are read as Latin-1 rather than failing
/// the whole list; only an I/O error is fatal.
fn collect_words(reader: impl BufRead) -> io::Result<HashSet<String>> {
    let mut words = HashSet::new();
    for line in reader.split(b'\n') {
        let line = match String::from_utf8(line?) {
            Ok(text) => text,
            Err(e) => decode_latin1(e.as_bytes()),
        };
        let word = normalise(&line);
        if !word.is_empty() {
            words.insert(word);
        }
    }
    Ok(words)
}

fn normalise(word: &str) -> String {
    word.trim().to_lowercase()
}
