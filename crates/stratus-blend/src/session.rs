use std::path::{Path, PathBuf};

use stratus_core::live::{EditContext, LiveState};
use stratus_core::preset::CloudPreset;
use stratus_core::uniform::UniformSink;
use stratus_persist::PresetStore;

use crate::controller::{BlendController, TickReport};

/// Everything the cloud preset feature needs for one host session.
///
/// The session owns all mutable state; hosts keep one instance and drive it
/// from a single thread.
#[derive(Debug)]
pub struct CloudSession {
    store: PresetStore,
    controller: BlendController,
    edit: EditContext,
    presets_path: PathBuf,
}

impl CloudSession {
    /// Create a session backed by `presets_path`. The file is not read yet.
    pub fn new(presets_path: impl Into<PathBuf>) -> Self {
        Self {
            store: PresetStore::new(),
            controller: BlendController::default(),
            edit: EditContext::default(),
            presets_path: presets_path.into(),
        }
    }

    /// Create a session and load its presets file, if it exists.
    pub fn open(presets_path: impl Into<PathBuf>) -> Self {
        let mut session = Self::new(presets_path);
        session.reload();
        session
    }

    pub fn presets_path(&self) -> &Path {
        &self.presets_path
    }

    pub fn store(&self) -> &PresetStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PresetStore {
        &mut self.store
    }

    pub fn controller(&self) -> &BlendController {
        &self.controller
    }

    pub fn edit(&self) -> EditContext {
        self.edit
    }

    pub fn set_edit(&mut self, edit: EditContext) {
        self.edit = edit;
    }

    /// Advance one tick.
    pub fn tick(&mut self, now: f64, live: &LiveState, sink: &mut dyn UniformSink) -> TickReport {
        self.controller
            .tick(now, live, &self.edit, &mut self.store, sink)
    }

    pub fn save(&self) -> bool {
        self.store.save(&self.presets_path)
    }

    /// Re-read the presets file. On success the next tick applies the new
    /// target without fading.
    pub fn reload(&mut self) -> bool {
        let loaded = self.store.load(&self.presets_path);
        if loaded {
            self.controller.skip_to_target();
        }
        loaded
    }

    /// Discard unsaved edits by reloading from disk.
    pub fn revert(&mut self) -> bool {
        self.reload()
    }

    pub fn set_auto_apply(&mut self, auto_apply: bool) {
        if self.store.config().auto_apply != auto_apply {
            self.store.config_mut().auto_apply = auto_apply;
            self.controller.skip_to_target();
        }
    }

    pub fn set_blend_seconds(&mut self, seconds: f32) {
        self.store.config_mut().blend_seconds = seconds.max(0.0);
    }

    /// Preset under the editor selection, created if absent.
    pub fn edit_preset_mut(&mut self) -> &mut CloudPreset {
        self.store.get_or_create(self.edit.weather, self.edit.bucket)
    }

    pub fn reset_edit_preset(&mut self) {
        self.store.reset(self.edit.weather, self.edit.bucket);
    }

    /// Seed an empty store from a weather table. A non-empty store is left
    /// alone and reported as not seeded.
    pub fn seed_from_external_table(&mut self, table_path: &Path) -> bool {
        if !self.store.is_empty() {
            log::debug!("Preset store already populated, skipping weather table import");
            return false;
        }
        self.store.load_from_external_table(table_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::BlendPhase;
    use std::collections::HashMap;
    use std::fs;
    use stratus_core::types::{Region, TimeBucket, Weather};
    use stratus_core::uniform::UniformValue;

    #[test]
    fn test_edit_save_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clouds.ini");

        let mut session = CloudSession::new(&path);
        session.set_edit(EditContext::new(Weather::Rain, TimeBucket::new(20, 0)));
        session.edit_preset_mut().top_layer.cover = 0.45;
        assert!(session.save());

        let reopened = CloudSession::open(&path);
        let preset = reopened
            .store()
            .try_get(Weather::Rain, TimeBucket::new(20, 0))
            .expect("saved preset");
        assert_eq!(preset.top_layer.cover, 0.45);
    }

    #[test]
    fn test_revert_discards_edits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clouds.ini");

        let mut session = CloudSession::new(&path);
        session.edit_preset_mut().bottom_layer.cover = 0.1;
        assert!(session.save());
        session.edit_preset_mut().bottom_layer.cover = 0.9;
        assert!(session.revert());
        assert_eq!(session.edit_preset_mut().bottom_layer.cover, 0.1);

        session.reset_edit_preset();
        assert_eq!(*session.edit_preset_mut(), CloudPreset::default());
    }

    #[test]
    fn test_reload_applies_without_fade() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clouds.ini");

        let mut writer = CloudSession::new(&path);
        writer.set_blend_seconds(30.0);
        writer.edit_preset_mut().bottom_layer.cover = 0.25;
        assert!(writer.save());

        let mut session = CloudSession::open(&path);
        session.set_auto_apply(false);
        let mut sink: HashMap<String, UniformValue> = HashMap::new();
        let report = session.tick(100.0, &LiveState::unavailable(), &mut sink);
        assert_eq!(report.factor, 1.0);
        assert_eq!(sink["ClearBottomCover"], UniformValue::Float(0.25));

        // later target changes fade over the configured duration
        session.set_edit(EditContext::new(Weather::Clouds, TimeBucket::NOON));
        let report = session.tick(101.0, &LiveState::unavailable(), &mut sink);
        assert!(report.factor < 1.0);
    }

    #[test]
    fn test_unusable_blend_time_in_file_still_settles() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clouds.ini");
        fs::write(
            &path,
            "[Global]\nAutoApply=0\nBlendTimeSeconds=nan\n\n[CLEAR_12:00]\nBottomCover=0.4\n",
        )
        .expect("write");

        let mut session = CloudSession::open(&path);
        assert!(session.store().config().blend_seconds.is_finite());
        session.set_edit(EditContext::new(Weather::Clear, TimeBucket::NOON));
        let mut sink: HashMap<String, UniformValue> = HashMap::new();
        for step in 0..100 {
            session.tick(step as f64 * 0.1, &LiveState::unavailable(), &mut sink);
        }
        assert_eq!(sink["ClearBottomCover"], UniformValue::Float(0.4));
        assert_eq!(session.controller().phase(), BlendPhase::Settled);
    }

    #[test]
    fn test_seed_only_when_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let table = dir.path().join("weathers.fxh");
        let values: Vec<String> = (0..44).map(|i| i.to_string()).collect();
        fs::write(&table, format!("CLOUD_LAYER_PRESET(Blizzard, {})", values.join(", ")))
            .expect("write");

        let mut session = CloudSession::new(dir.path().join("clouds.ini"));
        assert!(session.seed_from_external_table(&table));
        assert!(session.store().contains(Weather::Blizzard, TimeBucket::new(0, 0)));
        assert!(!session.seed_from_external_table(&table));
    }

    #[test]
    fn test_live_tick_through_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = CloudSession::new(dir.path().join("clouds.ini"));
        session.set_blend_seconds(0.0);

        let live = LiveState::new(6, 5, Weather::Halloween, Region::Global);
        let mut sink: HashMap<String, UniformValue> = HashMap::new();
        let report = session.tick(0.0, &live, &mut sink);
        assert_eq!(report.target.weather, Weather::Halloween);
        assert_eq!(report.target.bucket, TimeBucket::new(6, 0));
        assert!(sink.contains_key("HalloweenTopCover"));
    }
}
