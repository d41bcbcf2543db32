use std::fmt;

use liftlog_domain::{SessionConfig, SessionSummary, Weight};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub rest_seconds: u32,
    pub carry_forward: bool,
    pub weight_unit: WeightUnit,
}

impl Settings {
    #[must_use]
    pub fn format_weight(&self, weight: Weight) -> String {
        self.weight_unit.format(weight.into())
    }

    #[must_use]
    pub fn format_volume(&self, summary: &SessionSummary) -> String {
        self.weight_unit.format(summary.total_volume)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rest_seconds: SessionConfig::DEFAULT_REST_SECONDS,
            carry_forward: true,
            weight_unit: WeightUnit::default(),
        }
    }
}

impl From<&Settings> for SessionConfig {
    fn from(settings: &Settings) -> Self {
        SessionConfig {
            rest_seconds: settings.rest_seconds,
            carry_forward: settings.carry_forward,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Kg,
    #[default]
    Lb,
}

impl WeightUnit {
    /// Formats a weight or volume with at most one decimal, e.g. "102.5 kg".
    #[must_use]
    pub fn format(self, value: f32) -> String {
        let value = format!("{value:.1}");
        let value = value.strip_suffix(".0").unwrap_or(&value);
        format!("{value} {self}")
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lb => write!(f, "lbs"),
        }
    }
}
