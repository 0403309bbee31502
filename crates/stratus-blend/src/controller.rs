use stratus_core::live::{EditContext, LiveState, PresetTarget};
use stratus_core::math::{blend_factor, Lerp};
use stratus_core::preset::CloudPreset;
use stratus_core::types::Weather;
use stratus_core::uniform::{UniformSink, UniformStage};
use stratus_persist::PresetStore;

use crate::output::{stage_layers, stage_preset};

/// Where the controller is on its cross-fade timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendPhase {
    /// No tick has resolved a target yet.
    #[default]
    NoTarget,
    /// Fading from the last applied preset toward the target.
    Blending,
    /// Output equals the target preset.
    Settled,
}

/// What one tick resolved and pushed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub target: PresetTarget,
    /// Blend factor in `[0, 1]`.
    pub factor: f32,
    pub phase: BlendPhase,
    /// Blended preset pushed this tick.
    pub output: CloudPreset,
    /// Weather whose uniform tag received `output`.
    pub output_weather: Weather,
    /// Editor selection pushed unblended alongside the live output, if any.
    pub preview: Option<PresetTarget>,
}

/// Per-tick cross-fade toward whichever preset is currently targeted.
///
/// The target comes from the live clock and weather when auto-apply is on
/// and live data is available, otherwise from the editor selection. Each
/// target change restarts the fade from the last fully applied preset.
#[derive(Debug, Clone)]
pub struct BlendController {
    last_applied: CloudPreset,
    last_change_time: f64,
    current_target: Option<PresetTarget>,
    phase: BlendPhase,
    skip_pending: bool,
}

impl Default for BlendController {
    fn default() -> Self {
        Self::new(CloudPreset::default())
    }
}

impl BlendController {
    pub fn new(last_applied: CloudPreset) -> Self {
        Self {
            last_applied,
            last_change_time: 0.0,
            current_target: None,
            phase: BlendPhase::NoTarget,
            skip_pending: false,
        }
    }

    pub fn last_applied(&self) -> &CloudPreset {
        &self.last_applied
    }

    pub fn last_change_time(&self) -> f64 {
        self.last_change_time
    }

    pub fn current_target(&self) -> Option<PresetTarget> {
        self.current_target
    }

    pub fn phase(&self) -> BlendPhase {
        self.phase
    }

    /// Jump straight to the target on the next tick, even if the target
    /// changes on that tick.
    pub fn skip_to_target(&mut self) {
        self.skip_pending = true;
    }

    /// Resolve the render target for this tick.
    pub fn resolve_target(live: &LiveState, edit: &EditContext, auto_apply: bool) -> PresetTarget {
        if auto_apply && live.available {
            PresetTarget::from_live(live)
        } else {
            *edit
        }
    }

    /// Run one tick at wall time `now` (seconds) and push the result to `sink`.
    pub fn tick(
        &mut self,
        now: f64,
        live: &LiveState,
        edit: &EditContext,
        store: &mut PresetStore,
        sink: &mut dyn UniformSink,
    ) -> TickReport {
        let config = *store.config();
        let target = Self::resolve_target(live, edit, config.auto_apply);
        let target_preset = store.resolve(target.weather, target.bucket);

        if self.current_target != Some(target) {
            log::debug!(
                "Cloud preset target -> {}",
                PresetStore::key(target.weather, target.bucket)
            );
            self.current_target = Some(target);
            self.last_change_time = now;
        }
        if std::mem::take(&mut self.skip_pending) {
            self.last_change_time = f64::NEG_INFINITY;
        }

        let factor = blend_factor(now - self.last_change_time, config.blend_seconds);
        let output = self.last_applied.lerp(&target_preset, factor);
        let output_weather = if live.available {
            live.weather
        } else {
            target.weather
        };

        let mut stage = UniformStage::new();
        stage_preset(&mut stage, output_weather, &output);

        if factor >= 1.0 {
            self.last_applied = target_preset;
            self.phase = BlendPhase::Settled;
        } else {
            self.phase = BlendPhase::Blending;
        }

        let preview = if !config.auto_apply && live.available {
            let live_target = PresetTarget::from_live(live);
            let shares_tag = edit.weather.uniform_tag() == output_weather.uniform_tag();
            if *edit != live_target && !shares_tag {
                let preview_preset = store.resolve(edit.weather, edit.bucket);
                stage_layers(&mut stage, edit.weather, &preview_preset);
                Some(*edit)
            } else {
                None
            }
        } else {
            None
        };

        stage.commit(sink);

        TickReport {
            target,
            factor,
            phase: self.phase,
            output,
            output_weather,
            preview,
        }
    }
}
