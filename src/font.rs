// ── Presentation font ─────────────────────────────────────────────────────────
//
// Font family and point size belong to the display, not the document.  They
// are never written into the buffer; they persist only through settings.

use crate::error::{PlumeError, Result};

pub(crate) const DEFAULT_FAMILY: &str = "Monospaced";
pub(crate) const DEFAULT_SIZE: u32 = 12;

/// Accepted point sizes, inclusive.
pub(crate) const MIN_SIZE: u32 = 1;
pub(crate) const MAX_SIZE: u32 = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FontSettings {
    pub(crate) family: String,
    pub(crate) size: u32,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: DEFAULT_FAMILY.to_owned(),
            size: DEFAULT_SIZE,
        }
    }
}

impl FontSettings {
    /// Switch family, keeping the size.  `family` must be one of `available`.
    pub(crate) fn set_family(&mut self, family: &str, available: &[String]) -> Result<()> {
        let family = family.trim();
        match available.iter().find(|f| f.eq_ignore_ascii_case(family)) {
            Some(known) => {
                self.family = known.clone();
                Ok(())
            }
            None => Err(PlumeError::UnknownFont {
                family: family.to_owned(),
            }),
        }
    }

    /// Parse `input` as a point size and apply it.  The previous size is
    /// kept on error.
    pub(crate) fn set_size_from_input(&mut self, input: &str) -> Result<()> {
        self.size = parse_size(input)?;
        Ok(())
    }

    /// One-line description, e.g. `Monospaced 12pt`.
    pub(crate) fn describe(&self) -> String {
        format!("{} {}pt", self.family, self.size)
    }
}

pub(crate) fn parse_size(input: &str) -> Result<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (MIN_SIZE..=MAX_SIZE).contains(n))
        .ok_or_else(|| PlumeError::InvalidFontSize {
            input: input.to_owned(),
        })
}
