//! Best-effort importer for shader-side weather tables.
//!
//! The source is a text file with one macro call per weather:
//!
//! ```text
//! CLOUD_LAYER_PRESET(Clear,
//!     1.0, 0.5, ...   // 22 bottom layer values
//!     1.2, 0.4, ...)  // 22 top layer values
//! ```
//!
//! The table has no time-of-day data, so each entry is copied into every
//! time bucket of its weather.

use std::fs;
use std::path::Path;

use regex::Regex;
use stratus_core::constants::LAYER_FIELD_COUNT;
use stratus_core::preset::{CloudPreset, LayerParams};
use stratus_core::types::{TimeBucket, Weather};

use crate::error::PersistError;
use crate::store::PresetStore;

/// Macro name used by the stock weather table.
pub const DEFAULT_PRESET_TOKEN: &str = "CLOUD_LAYER_PRESET";

/// Number of positional values per entry: one full record per layer.
pub const VALUES_PER_ENTRY: usize = 2 * LAYER_FIELD_COUNT;

/// One successfully parsed table entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedEntry {
    /// Name as written in the source.
    pub source_name: String,
    pub weather: Weather,
    pub bottom_layer: LayerParams,
    pub top_layer: LayerParams,
}

impl ImportedEntry {
    pub fn preset(&self) -> CloudPreset {
        CloudPreset::from_layers(self.bottom_layer, self.top_layer)
    }
}

#[derive(Debug, Clone)]
pub struct ExternalTableImporter {
    pattern: Regex,
}

impl ExternalTableImporter {
    pub fn new() -> Result<Self, PersistError> {
        Self::with_token(DEFAULT_PRESET_TOKEN)
    }

    /// Importer for calls of the form `<token>(Name, v1, ..., v44)`.
    pub fn with_token(token: &str) -> Result<Self, PersistError> {
        let pattern = Regex::new(&format!(
            r"{}\s*\(\s*([A-Za-z0-9_]+)\s*,([^)]*)\)",
            regex::escape(token)
        ))?;
        Ok(Self { pattern })
    }

    /// Parse every well-formed entry. Malformed entries are logged and skipped.
    pub fn parse(&self, text: &str) -> Vec<ImportedEntry> {
        let text = strip_line_comments(text);
        let mut entries = Vec::new();
        for caps in self.pattern.captures_iter(&text) {
            let name = &caps[1];
            let values = match parse_values(&caps[2]) {
                Ok(values) => values,
                Err(reason) => {
                    log::warn!("Skipping weather table entry '{name}': {reason}");
                    continue;
                }
            };
            if values.len() != VALUES_PER_ENTRY {
                log::warn!(
                    "Skipping weather table entry '{name}': expected {VALUES_PER_ENTRY} values, found {}",
                    values.len()
                );
                continue;
            }

            let mut bottom = [0.0; LAYER_FIELD_COUNT];
            let mut top = [0.0; LAYER_FIELD_COUNT];
            bottom.copy_from_slice(&values[..LAYER_FIELD_COUNT]);
            top.copy_from_slice(&values[LAYER_FIELD_COUNT..]);
            entries.push(ImportedEntry {
                source_name: name.to_string(),
                weather: match_weather_name(name),
                bottom_layer: LayerParams::from_array(bottom),
                top_layer: LayerParams::from_array(top),
            });
        }
        entries
    }
}

/// Drop `//` comments so parentheses inside them cannot end a call early.
fn strip_line_comments(text: &str) -> String {
    text.lines()
        .map(|line| line.split("//").next().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse comma-separated floats. Empty tokens are ignored; any other
/// non-numeric token fails the entry.
fn parse_values(args: &str) -> Result<Vec<f32>, String> {
    let mut values = Vec::with_capacity(VALUES_PER_ENTRY);
    for token in args.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let literal = token.strip_suffix(&['f', 'F'][..]).unwrap_or(token);
        let value: f32 = literal
            .parse()
            .map_err(|_| format!("'{token}' is not a number"))?;
        values.push(value);
    }
    Ok(values)
}

/// Map a table name onto a weather.
///
/// Tries, in order: exact name (case-insensitive), the first weather whose
/// name contains the input, the longest weather name contained in the input,
/// and finally NEUTRAL.
pub fn match_weather_name(name: &str) -> Weather {
    if let Some(weather) = Weather::from_name(name) {
        return weather;
    }

    let upper = name.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return Weather::Neutral;
    }
    if let Some(weather) = Weather::ALL.into_iter().find(|w| w.name().contains(&upper)) {
        return weather;
    }
    Weather::ALL
        .into_iter()
        .filter(|w| upper.contains(w.name()))
        .max_by_key(|w| w.name().len())
        .unwrap_or(Weather::Neutral)
}

impl PresetStore {
    /// Apply imported entries to every time bucket of their weather.
    /// Returns the number of entries applied.
    pub fn apply_imported(&mut self, entries: &[ImportedEntry]) -> usize {
        for entry in entries {
            let preset = entry.preset();
            for bucket in TimeBucket::ALL {
                self.set(entry.weather, bucket, preset);
            }
        }
        entries.len()
    }

    /// Import a weather table. Fails with [`PersistError::NoEntries`] when
    /// no entry could be applied; existing presets are kept in that case.
    pub fn read_external_table(&mut self, path: &Path) -> Result<usize, PersistError> {
        let text = fs::read_to_string(path)?;
        let entries = ExternalTableImporter::new()?.parse(&text);
        if entries.is_empty() {
            return Err(PersistError::NoEntries(path.display().to_string()));
        }
        Ok(self.apply_imported(&entries))
    }

    /// Like [`PresetStore::read_external_table`], reporting only success.
    pub fn load_from_external_table(&mut self, path: &Path) -> bool {
        match self.read_external_table(path) {
            Ok(count) => {
                log::info!("Imported {count} weather table entries from {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("Weather table import from {} failed: {e}", path.display());
                false
            }
        }
    }
}
