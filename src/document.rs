// ── Document buffer ───────────────────────────────────────────────────────────
//
// The single in-memory document.  Shared between the session controller and
// the autosave worker as `SharedDocument`; every access goes through `lock`.
// Content is always held as a Rust `String`; `encoding` records how to write
// it back to disk.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];

// ── Encoding ──────────────────────────────────────────────────────────────────

/// The character encoding of the document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    /// UTF-8 without BOM.
    Utf8,
    /// UTF-8 preceded by `EF BB BF`.
    Utf8Bom,
    /// UTF-16 Little-Endian with BOM.
    Utf16Le,
    /// UTF-16 Big-Endian with BOM.
    Utf16Be,
    /// Bytes that are not valid UTF-8, read as Latin-1 (one byte per char).
    Ansi,
}

impl Encoding {
    /// Short display string for status output.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf8Bom => "UTF-8 BOM",
            Self::Utf16Le => "UTF-16 LE",
            Self::Utf16Be => "UTF-16 BE",
            Self::Ansi => "ANSI",
        }
    }

    /// `text` in this encoding, or `None` when it has no representation
    /// (Latin-1 with a char above U+00FF).
    fn encode(self, text: &str) -> Option<Vec<u8>> {
        let bytes = match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf8Bom => {
                let mut out = UTF8_BOM.to_vec();
                out.extend_from_slice(text.as_bytes());
                out
            }
            Self::Utf16Le => {
                let mut out = UTF16LE_BOM.to_vec();
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                out
            }
            Self::Utf16Be => {
                let mut out = UTF16BE_BOM.to_vec();
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                out
            }
            Self::Ansi => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect::<Option<Vec<u8>>>()?,
        };
        Some(bytes)
    }
}

// ── Document ──────────────────────────────────────────────────────────────────

/// Text content plus the file it is bound to.
///
/// `dirty` is cleared by `load` and `mark_saved`, and set by every edit.
#[derive(Debug)]
pub(crate) struct Document {
    content: String,
    path: Option<PathBuf>,
    dirty: bool,
    encoding: Encoding,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A fresh, untitled, empty document.
    pub(crate) fn new() -> Self {
        Self {
            content: String::new(),
            path: None,
            dirty: false,
            encoding: Encoding::Utf8,
        }
    }

    pub(crate) fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn encoding(&self) -> Encoding {
        self.encoding
    }

    // ── Edits ─────────────────────────────────────────────────────────────────

    /// Replace the whole content as a user edit.
    #[cfg(test)]
    pub(crate) fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.dirty = true;
    }

    /// Append `line` followed by a newline.
    pub(crate) fn append_line(&mut self, line: &str) {
        self.content.push_str(line);
        self.content.push('\n');
        self.dirty = true;
    }

    pub(crate) fn clear(&mut self) {
        self.content.clear();
        self.dirty = true;
    }

    // ── Disk binding ──────────────────────────────────────────────────────────

    /// Replace content with freshly read file bytes and bind to `path`.
    ///
    /// Encoding detection order:
    /// 1. UTF-16 LE BOM (`FF FE`) with a well-formed UTF-16 payload
    /// 2. UTF-16 BE BOM (`FE FF`) with a well-formed UTF-16 payload
    /// 3. UTF-8 BOM (`EF BB BF`) followed by valid UTF-8
    /// 4. Valid UTF-8
    /// 5. Fallback: Latin-1
    pub(crate) fn load(&mut self, path: PathBuf, bytes: &[u8]) {
        let (encoding, text) = detect_and_decode(bytes);
        self.encoding = encoding;
        self.content = text;
        self.path = Some(path);
        self.dirty = false;
    }

    /// Content encoded for writing, together with the encoding used.
    ///
    /// The document's own encoding is used when reopening the written bytes
    /// would yield the same content.  Otherwise the content is written as
    /// UTF-8 (plain, or with a BOM when the text itself starts with U+FEFF).
    pub(crate) fn encode_for_disk(&self) -> (Encoding, Vec<u8>) {
        for encoding in [self.encoding, Encoding::Utf8] {
            if let Some(bytes) = encoding.encode(&self.content) {
                if detect_and_decode(&bytes).1 == self.content {
                    return (encoding, bytes);
                }
            }
        }
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(self.content.as_bytes());
        (Encoding::Utf8Bom, bytes)
    }

    /// Record a successful write of the current content to `path` in
    /// `encoding`.
    pub(crate) fn mark_saved(&mut self, path: PathBuf, encoding: Encoding) {
        self.path = Some(path);
        self.encoding = encoding;
        self.dirty = false;
    }

    /// The bare filename component, or `"Untitled"` if no path is set.
    pub(crate) fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_owned())
    }
}

// ── Decoding helpers ──────────────────────────────────────────────────────────

fn detect_and_decode(bytes: &[u8]) -> (Encoding, String) {
    if let Some(text) = bytes
        .strip_prefix(&UTF16LE_BOM)
        .and_then(|p| decode_utf16(p, u16::from_le_bytes))
    {
        return (Encoding::Utf16Le, text);
    }

    if let Some(text) = bytes
        .strip_prefix(&UTF16BE_BOM)
        .and_then(|p| decode_utf16(p, u16::from_be_bytes))
    {
        return (Encoding::Utf16Be, text);
    }

    if let Some(Ok(text)) = bytes.strip_prefix(&UTF8_BOM).map(std::str::from_utf8) {
        return (Encoding::Utf8Bom, text.to_owned());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (Encoding::Utf8, text.to_owned()),
        Err(_) => (Encoding::Ansi, decode_latin1(bytes)),
    }
}

/// `None` for an odd byte count or unpaired surrogates, so the caller can
/// fall through to the byte-preserving Latin-1 reading.
fn decode_utf16(payload: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if payload.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|c| unit([c[0], c[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

/// Each byte becomes the char with the same code point.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

// ── Shared handle ─────────────────────────────────────────────────────────────

/// The document as seen by both the controller and the autosave worker.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedDocument(Arc<Mutex<Document>>);

impl SharedDocument {
    pub(crate) fn new(doc: Document) -> Self {
        Self(Arc::new(Mutex::new(doc)))
    }

    /// Lock the document.  A panic while holding the lock cannot leave the
    /// `String` half-written, so a poisoned lock is taken over as-is.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Document> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current content, taken under the lock.
    pub(crate) fn snapshot(&self) -> String {
        self.lock().content().to_owned()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
