//! Minimal section-keyed text format.
//!
//! ```text
//! [Section]
//! key=value ; comment
//! ```
//!
//! Sections and keys are kept sorted so rendered output is stable.

use std::collections::BTreeMap;

use stratus_core::config::{parse_flag, parse_hotkey};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniSection {
    entries: BTreeMap<String, String>,
}

impl IniSection {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Float value, or `default` when the key is absent or not a finite number.
    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        self.get(key)
            .and_then(|v| v.parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).map(parse_flag).unwrap_or(default)
    }

    /// Virtual-key code, or `default` for absent or symbolic values.
    pub fn get_hotkey(&self, key: &str, default: u32) -> u32 {
        self.get(key).and_then(parse_hotkey).unwrap_or(default)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Store a float using the shortest text that parses back to the same value.
    pub fn set_float(&mut self, key: impl Into<String>, value: f32) {
        self.set(key, value.to_string());
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }

    pub fn set_hotkey(&mut self, key: impl Into<String>, value: u32) {
        self.set(key, value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniDocument {
    sections: BTreeMap<String, IniSection>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document. Blank lines and `;` comments are ignored; any other
    /// line that is neither a `[section]` header nor `key=value` is skipped
    /// with a warning. Keys before the first header land in the unnamed
    /// section `""`.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::new();
        let mut current = String::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.split(';').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = name.trim().to_string();
                doc.sections.entry(current.clone()).or_default();
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("Ignoring malformed line {}: {raw:?}", index + 1);
                continue;
            };
            doc.section_mut(&current).set(key.trim(), value.trim());
        }

        doc
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(name)
    }

    /// Section by name, created empty if absent.
    pub fn section_mut(&mut self, name: &str) -> &mut IniSection {
        self.sections.entry(name.to_string()).or_default()
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &IniSection)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, section) in &self.sections {
            out.push_str(&format!("[{name}]\n"));
            for (key, value) in &section.entries {
                out.push_str(&format!("{key}={value}\n"));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_and_comments() {
        let text = "; header comment\r\n[Global]\r\nAutoApply = true ; inline\r\n\r\n[CLEAR_12:00]\nBottomCover=0.25\n";
        let doc = IniDocument::parse(text);
        let global = doc.section("Global").expect("Global section");
        assert!(global.get_bool("AutoApply", false));
        let preset = doc.section("CLEAR_12:00").expect("preset section");
        assert_eq!(preset.get_float("BottomCover", 1.0), 0.25);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let doc = IniDocument::parse("# my tweaks\n[A]\nkey=1\nnot a pair\nother=2\n");
        let section = doc.section("A").expect("section A");
        assert_eq!(section.len(), 2);
        assert_eq!(section.get("other"), Some("2"));
        assert!(doc.section("").is_none());
    }

    #[test]
    fn test_typed_defaults() {
        let mut section = IniSection::default();
        section.set("Bad", "abc");
        section.set("NaN", "nan");
        section.set("Inf", "-inf");
        section.set("Key", "VK_F10");
        assert_eq!(section.get_float("Missing", 2.5), 2.5);
        assert_eq!(section.get_float("Bad", 2.5), 2.5);
        assert_eq!(section.get_float("NaN", 2.5), 2.5);
        assert_eq!(section.get_float("Inf", 2.5), 2.5);
        assert_eq!(section.get_hotkey("Key", 0x79), 0x79);
        assert!(section.get_bool("Missing", true));
    }

    #[test]
    fn test_render_then_parse() {
        let mut doc = IniDocument::new();
        doc.section_mut("Global").set_bool("AutoApply", false);
        doc.section_mut("Global").set_hotkey("HotkeySave", 0x79);
        doc.section_mut("RAIN_06:00").set_float("TopCover", 0.1);

        let parsed = IniDocument::parse(&doc.render());
        assert_eq!(parsed, doc);
        assert_eq!(
            parsed.section("Global").and_then(|s| s.get("HotkeySave")),
            Some("121")
        );
    }

    #[test]
    fn test_float_text_is_exact() {
        let mut section = IniSection::default();
        for value in [0.1f32, 1.0 / 3.0, 123456.79, 1e-7, -0.0] {
            section.set_float("v", value);
            assert_eq!(section.get_float("v", f32::NAN).to_bits(), value.to_bits());
        }
    }
}
