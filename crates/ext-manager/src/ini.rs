//! Reader for the INI dialect used by `metadata.ini`.
//!
//! ```text
//! [Extension]
//! Name = my-extension
//! Requires = other-ext,
//!     another-ext
//! ```
//!
//! - section names are case-sensitive, keys are not
//! - `=` or `:` separates key and value, the first one wins
//! - `#` and `;` start full-line comments
//! - indented lines continue the previous value, across blank lines
//! - `[DEFAULT]` supplies fallbacks to every other section
//!
//! Duplicate sections, duplicate keys within a section, options outside any
//! section and lines without a delimiter are errors.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Section whose keys act as fallbacks for all other sections.
pub const DEFAULT_SECTION: &str = "DEFAULT";

type Options = BTreeMap<String, String>;

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Options,
    sections: Vec<(String, Options)>,
}

#[derive(Clone, Copy)]
enum Cursor {
    Defaults,
    Section(usize),
}

impl IniDocument {
    /// An empty document; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut doc = Self::default();
        let mut cursor: Option<Cursor> = None;
        let mut last_key: Option<String> = None;
        // Blank lines seen since the last value line; kept only if a
        // continuation follows.
        let mut blank_run = 0;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() {
                blank_run += 1;
                continue;
            }
            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(char::is_whitespace);
            if indented && let (Some(at), Some(key)) = (cursor, last_key.as_deref()) {
                if let Some(value) = doc.options_mut(at).get_mut(key) {
                    if !value.is_empty() || blank_run > 0 {
                        value.push_str(&"\n".repeat(blank_run + 1));
                    }
                    value.push_str(line);
                }
                blank_run = 0;
                continue;
            }
            blank_run = 0;

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .rfind(']')
                    .map(|end| &header[..end])
                    .ok_or_else(|| Error::ini(line_no, "unterminated section header"))?;
                if name.is_empty() {
                    return Err(Error::ini(line_no, "empty section name"));
                }
                cursor = Some(doc.open_section(name, line_no)?);
                last_key = None;
                continue;
            }

            let at = cursor.ok_or_else(|| {
                Error::ini(line_no, "option appears before any section header")
            })?;
            let delim = line
                .find(['=', ':'])
                .ok_or_else(|| Error::ini(line_no, format!("expected 'key = value', found '{line}'")))?;
            let key = line[..delim].trim().to_lowercase();
            if key.is_empty() {
                return Err(Error::ini(line_no, "option has an empty key"));
            }
            let value = line[delim + 1..].trim().to_string();

            let options = doc.options_mut(at);
            if options.contains_key(&key) {
                return Err(Error::ini(line_no, format!("duplicate option '{key}'")));
            }
            options.insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(doc)
    }

    /// Look up `key` in `section`, falling back to `[DEFAULT]`.
    ///
    /// Returns `None` when the section does not exist, even if `[DEFAULT]`
    /// defines the key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        if section == DEFAULT_SECTION {
            return self.defaults.get(&key).map(String::as_str);
        }
        let options = self.section(section)?;
        options
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(String::as_str)
    }

    /// Like [`get`](Self::get) with a fallback for missing sections or keys.
    pub fn get_or<'a>(&'a self, section: &str, key: &str, fallback: &'a str) -> &'a str {
        self.get(section, key).unwrap_or(fallback)
    }

    fn section(&self, name: &str) -> Option<&Options> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, options)| options)
    }

    fn open_section(&mut self, name: &str, line_no: usize) -> Result<Cursor> {
        if name == DEFAULT_SECTION {
            return Ok(Cursor::Defaults);
        }
        if self.section(name).is_some() {
            return Err(Error::ini(line_no, format!("duplicate section '{name}'")));
        }
        self.sections.push((name.to_string(), Options::new()));
        Ok(Cursor::Section(self.sections.len() - 1))
    }

    fn options_mut(&mut self, at: Cursor) -> &mut Options {
        match at {
            Cursor::Defaults => &mut self.defaults,
            Cursor::Section(idx) => &mut self.sections[idx].1,
        }
    }
}
