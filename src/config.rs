//! Driver configuration.
//!
//! Settings for the headless driver, loaded from an INI file. Every value has
//! a safe default, and keys missing from the file keep their current value.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! delta = 0.016
//! tick_interval_ms = 16
//! ticks = 600
//! report_every = 60
//!
//! [scene]
//! path = scenes/demo.json
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::SimError;
use crate::resources::worldtime::DEFAULT_DELTA;

const DEFAULT_TICK_INTERVAL_MS: u64 = 16;
const DEFAULT_TICKS: u64 = 600;
const DEFAULT_REPORT_EVERY: u64 = 60;
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Fixed tick duration in seconds.
    pub delta: f32,
    /// Wall-clock pause between ticks when running in real time.
    pub tick_interval_ms: u64,
    /// Number of ticks to run.
    pub ticks: u64,
    /// Report every N ticks; 0 disables periodic reports.
    pub report_every: u64,
    /// Scene description file; the built-in demo scene is used when unset.
    pub scene_path: Option<PathBuf>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            delta: DEFAULT_DELTA,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            ticks: DEFAULT_TICKS,
            report_every: DEFAULT_REPORT_EVERY,
            scene_path: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. A non-positive or
    /// non-finite `delta` is rejected.
    pub fn load_from_file(&mut self) -> Result<(), SimError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| SimError::Config(format!("failed to load config file: {}", e)))?;
        self.apply(&config)
    }

    /// Like [`load_from_file`](Self::load_from_file), but a missing file is
    /// not an error: returns `Ok(false)` and keeps the current values. A file
    /// that exists but does not parse or validate is still an error.
    pub fn load_if_present(&mut self) -> Result<bool, SimError> {
        if !self.config_path.exists() {
            return Ok(false);
        }
        self.load_from_file()?;
        Ok(true)
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, content: &str) -> Result<(), SimError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| SimError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    /// Applies every key or none of them.
    fn apply(&mut self, config: &Ini) -> Result<(), SimError> {
        let mut next = self.clone();

        // [simulation] section
        if let Some(delta) = config
            .getfloat("simulation", "delta")
            .map_err(SimError::Config)?
        {
            if !delta.is_finite() || delta <= 0.0 {
                return Err(SimError::Config(format!(
                    "simulation.delta must be positive, got {delta}"
                )));
            }
            next.delta = delta as f32;
        }
        if let Some(interval) = config
            .getuint("simulation", "tick_interval_ms")
            .map_err(SimError::Config)?
        {
            next.tick_interval_ms = interval;
        }
        if let Some(ticks) = config
            .getuint("simulation", "ticks")
            .map_err(SimError::Config)?
        {
            next.ticks = ticks;
        }
        if let Some(every) = config
            .getuint("simulation", "report_every")
            .map_err(SimError::Config)?
        {
            next.report_every = every;
        }

        // [scene] section
        if let Some(path) = config.get("scene", "path").filter(|p| !p.is_empty()) {
            next.scene_path = Some(PathBuf::from(path));
        }

        info!(
            "Loaded config: delta={}, interval={}ms, ticks={}, report_every={}, scene={:?}",
            next.delta, next.tick_interval_ms, next.ticks, next.report_every, next.scene_path
        );

        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), SimError> {
        let mut config = Ini::new();

        // [simulation] section
        config.set("simulation", "delta", Some(self.delta.to_string()));
        config.set(
            "simulation",
            "tick_interval_ms",
            Some(self.tick_interval_ms.to_string()),
        );
        config.set("simulation", "ticks", Some(self.ticks.to_string()));
        config.set("simulation", "report_every", Some(self.report_every.to_string()));

        // [scene] section
        if let Some(path) = &self.scene_path {
            config.set("scene", "path", Some(path.display().to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| SimError::Config(format!("failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
