use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use stratus_core::config::GlobalConfig;
use stratus_core::preset::CloudPreset;
use stratus_core::types::{TimeBucket, Weather};

use crate::error::PersistError;
use crate::format::{
    parse_preset_key, preset_key, read_config, read_preset, write_config, write_preset,
    GLOBAL_SECTION,
};
use crate::ini::IniDocument;

/// Cloud presets keyed by (weather, time bucket), plus the session config.
///
/// Entries are created lazily by [`PresetStore::get_or_create`]; a missing
/// entry is never an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PresetStore {
    presets: BTreeMap<String, CloudPreset>,
    config: GlobalConfig,
}

impl PresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical id of a stored preset, e.g. `CLEAR_12:00`.
    pub fn key(weather: Weather, bucket: TimeBucket) -> String {
        preset_key(weather, bucket)
    }

    /// Snap a clock reading to the closest preset bucket.
    pub fn nearest_bucket(hour: i32, minute: i32) -> TimeBucket {
        TimeBucket::nearest(hour, minute)
    }

    pub fn try_get(&self, weather: Weather, bucket: TimeBucket) -> Option<CloudPreset> {
        self.presets.get(&Self::key(weather, bucket)).copied()
    }

    /// Preset for editing. Inserts the default preset first if absent.
    pub fn get_or_create(&mut self, weather: Weather, bucket: TimeBucket) -> &mut CloudPreset {
        self.presets.entry(Self::key(weather, bucket)).or_default()
    }

    /// Read-through lookup that materializes a default entry on a miss.
    pub fn resolve(&mut self, weather: Weather, bucket: TimeBucket) -> CloudPreset {
        match self.try_get(weather, bucket) {
            Some(preset) => preset,
            None => *self.get_or_create(weather, bucket),
        }
    }

    pub fn set(&mut self, weather: Weather, bucket: TimeBucket, preset: CloudPreset) {
        self.presets.insert(Self::key(weather, bucket), preset);
    }

    /// Restore the documented defaults for one entry.
    pub fn reset(&mut self, weather: Weather, bucket: TimeBucket) {
        self.set(weather, bucket, CloudPreset::default());
    }

    pub fn contains(&self, weather: Weather, bucket: TimeBucket) -> bool {
        self.presets.contains_key(&Self::key(weather, bucket))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CloudPreset)> {
        self.presets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GlobalConfig {
        &mut self.config
    }

    /// Render the store as an INI document.
    pub fn to_ini(&self) -> IniDocument {
        let mut doc = IniDocument::new();
        write_config(doc.section_mut(GLOBAL_SECTION), &self.config);
        for (key, preset) in &self.presets {
            write_preset(doc.section_mut(key), preset);
        }
        doc
    }

    /// Build a store from an INI document. Sections that are not preset keys
    /// are skipped with a warning.
    pub fn from_ini(doc: &IniDocument) -> Self {
        let mut store = Self::new();
        if let Some(global) = doc.section(GLOBAL_SECTION) {
            store.config = read_config(global);
        }
        for (name, section) in doc.sections() {
            if name == GLOBAL_SECTION {
                continue;
            }
            match parse_preset_key(name) {
                Some((weather, bucket)) => store.set(weather, bucket, read_preset(section)),
                None => log::warn!("Skipping unrecognized preset section [{name}]"),
            }
        }
        store
    }

    /// Replace the whole store with the contents of `path`.
    /// On error the store is left unchanged. Returns the preset count.
    pub fn read(&mut self, path: &Path) -> Result<usize, PersistError> {
        let text = fs::read_to_string(path)?;
        let doc = IniDocument::parse(&text);
        *self = Self::from_ini(&doc);
        Ok(self.len())
    }

    /// Write every preset and the config to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), PersistError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_ini().render())?;
        Ok(())
    }

    /// Like [`PresetStore::read`], reporting only success.
    pub fn load(&mut self, path: &Path) -> bool {
        match self.read(path) {
            Ok(count) => {
                log::info!("Loaded {count} cloud presets from {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("Failed to load cloud presets from {}: {e}", path.display());
                false
            }
        }
    }

    /// Like [`PresetStore::write`], reporting only success.
    pub fn save(&self, path: &Path) -> bool {
        match self.write(path) {
            Ok(()) => {
                log::info!("Saved {} cloud presets to {}", self.len(), path.display());
                true
            }
            Err(e) => {
                log::warn!("Failed to save cloud presets to {}: {e}", path.display());
                false
            }
        }
    }

    /// Load `ini_path`; if it cannot be read, import `table_path` instead.
    pub fn load_or_import(&mut self, ini_path: &Path, table_path: &Path) -> bool {
        self.load(ini_path) || self.load_from_external_table(table_path)
    }
}
