//! # Rack File Naming
//!
//! Every racked buffer is stored under a name derived from its own content:
//!
//! 1. **Candidate**: the first line of the trimmed content, trimmed and cut to
//!    [`MAX_TITLE_CHARS`] characters.
//! 2. **Sanitize**: the candidate is NFD-decomposed and every character outside
//!    `A-Z a-z 0-9 - _ . ( )` and space is dropped, so accents fall away and
//!    path syntax never reaches the filesystem. An empty result becomes a
//!    timestamped placeholder (`untitled - 14-05_03-02-26`).
//! 3. **Disambiguate**: when `<base><ext>` belongs to another buffer's file, a
//!    counter is appended to the base (`notes1.txt`, `notes2.txt`, ...). A
//!    buffer's own current name never counts as a collision.
//!
//! Generation is pure: for the same content, current name and set of existing
//! names it always returns the same file name.

use chrono::{DateTime, Local};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

pub const MAX_TITLE_CHARS: usize = 50;
pub const DEFAULT_FILE_EXT: &str = ".txt";
const PLACEHOLDER_PREFIX: &str = "untitled - ";
const PLACEHOLDER_TIME_FORMAT: &str = "%H-%M_%d-%m-%y";

#[derive(Debug, Clone)]
pub struct NameGenerator {
    file_ext: String,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self {
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Derive the rack file name for `content`.
    ///
    /// `current_name` is the file the buffer already owns, if any, and
    /// `existing` holds every file name currently in the rack.
    pub fn generate(
        &self,
        content: &str,
        current_name: Option<&str>,
        existing: &HashSet<String>,
    ) -> String {
        self.generate_at(content, current_name, existing, Local::now())
    }

    /// Same as [`generate`](Self::generate) with an explicit clock for the
    /// placeholder name.
    pub fn generate_at(
        &self,
        content: &str,
        current_name: Option<&str>,
        existing: &HashSet<String>,
        now: DateTime<Local>,
    ) -> String {
        let mut base = sanitize(&candidate(content));
        if base.is_empty() {
            base = placeholder(now);
        }
        self.disambiguate(&base, current_name, existing)
    }

    fn disambiguate(
        &self,
        base: &str,
        current_name: Option<&str>,
        existing: &HashSet<String>,
    ) -> String {
        let is_free = |name: &str| current_name == Some(name) || !existing.contains(name);

        let name = format!("{}{}", base, self.file_ext);
        if is_free(&name) {
            return name;
        }

        let mut counter: u64 = 1;
        loop {
            let name = format!("{}{}{}", base, counter, self.file_ext);
            if is_free(&name) {
                return name;
            }
            counter += 1;
        }
    }
}

/// First line of the trimmed content, itself trimmed and cut to
/// [`MAX_TITLE_CHARS`] characters.
pub fn candidate(content: &str) -> String {
    content
        .trim()
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect()
}

/// Reduce `raw` to the characters that are safe in a file name on every
/// platform the rack runs on.
pub fn sanitize(raw: &str) -> String {
    let kept: String = raw.nfd().filter(|c| is_allowed(*c)).collect();
    kept.trim().to_string()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '(' | ')' | ' ')
}

/// Name used when the content yields nothing usable.
pub fn placeholder(now: DateTime<Local>) -> String {
    format!("{}{}", PLACEHOLDER_PREFIX, now.format(PLACEHOLDER_TIME_FORMAT))
}
