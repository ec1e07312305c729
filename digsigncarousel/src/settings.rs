use digsignfeed::{DisplaySettings, LayoutType, SettingsPatch};
use std::time::Duration;

const MIN_INTERVAL_SECS: f64 = 1.0;

/// Réglages appliqués par le client
///
/// Seeded from the page defaults, then patched by every successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSettings {
    pub refresh_interval: Duration,
    pub slide_delay: Duration,
    pub codes_enabled: bool,
    pub layout_type: LayoutType,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self::from(&DisplaySettings::default())
    }
}

impl From<&DisplaySettings> for EffectiveSettings {
    fn from(settings: &DisplaySettings) -> Self {
        Self {
            refresh_interval: Duration::from_secs(settings.refresh_interval.max(1)),
            slide_delay: Duration::from_secs(settings.slide_delay.max(1)),
            codes_enabled: settings.enable_qrcodes,
            layout_type: settings.layout_type,
        }
    }
}

/// Ce qu'un patch a modifié
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsChange {
    pub refresh_interval: bool,
    pub slide_delay: bool,
    pub codes_enabled: bool,
}

/// Interval in seconds from the wire, floored to one second.
/// Zero, missing or unrepresentable values leave the interval unchanged.
fn patched_interval(value: Option<f64>) -> Option<Duration> {
    value
        .filter(|v| *v != 0.0)
        .and_then(|v| Duration::try_from_secs_f64(v.max(MIN_INTERVAL_SECS)).ok())
}

impl EffectiveSettings {
    /// Applique les champs présents du patch, chacun indépendamment
    pub fn apply(&mut self, patch: &SettingsPatch) -> SettingsChange {
        let mut change = SettingsChange::default();

        if let Some(refresh) = patched_interval(patch.refresh_interval) {
            change.refresh_interval = refresh != self.refresh_interval;
            self.refresh_interval = refresh;
        }
        if let Some(delay) = patched_interval(patch.slide_delay) {
            change.slide_delay = delay != self.slide_delay;
            self.slide_delay = delay;
        }
        if let Some(enabled) = patch.enable_qrcodes {
            change.codes_enabled = enabled != self.codes_enabled;
            self.codes_enabled = enabled;
        }
        if let Some(layout) = patch.layout_type.as_deref().and_then(|l| l.parse().ok()) {
            self.layout_type = layout;
        }

        change
    }
}
