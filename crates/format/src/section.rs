//! Line-oriented `[Section]` / `key=value` reader.

use std::collections::{BTreeMap, HashMap};

/// Parsed sections of an INI-style file, keyed by section name.
///
/// The reader accepts UTF-8 input (with or without a BOM) as well as
/// UTF-16LE input marked with the 0xFF 0xFE byte-order marker, which is
/// what wide-character producers write. Lines that are blank, comments
/// (`;`), or outside any section are skipped; duplicate sections are
/// merged with later keys winning.
#[derive(Debug, Clone, Default)]
pub struct SectionStore {
    sections: HashMap<String, BTreeMap<String, String>>,
}

impl SectionStore {
    /// Parses raw file bytes, detecting the text encoding from the BOM.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&decode_text(bytes))
    }

    /// Parses already-decoded text.
    pub fn from_text(text: &str) -> Self {
        let mut sections: HashMap<String, BTreeMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for raw_line in text.split('\n') {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') {
                continue;
            }
            if let Some(name) = trimmed.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }
            let Some(section) = &current else {
                continue;
            };
            if let Some((key, value)) = line.split_once('=') {
                sections
                    .entry(section.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.to_string());
            }
        }

        Self { sections }
    }

    /// The ordered key/value mapping of a section, if present.
    pub fn keys(&self, section: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(section)
    }

    /// A single value, if the section and key are both present.
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }
}

fn decode_text(bytes: &[u8]) -> String {
    if let Some(wide) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = wide
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        let utf8 = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
        String::from_utf8_lossy(utf8).into_owned()
    }
}
