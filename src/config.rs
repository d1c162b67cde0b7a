// src/config.rs
use configparser::ini::Ini;
use log::{info, warn};
use once_cell::sync::Lazy;
use std::f64::consts::FRAC_PI_2;
use std::path::Path;
use std::sync::Mutex;

// Spin Planning Constants
pub const MIN_FULL_TURNS: u32 = 5;
pub const MAX_FULL_TURNS: u32 = 9;

// Animation Constants
pub const FRAME_DELAY_MS: u64 = 16; // ~60 ticks per second
pub const MAX_DELTA_TIME: f64 = 0.1;

// Collision handling: forward nudge applied before the single re-resolve.
pub const RETRY_NUDGE: f64 = FRAC_PI_2;

// Presentation defaults (overridable via settings.ini)
pub const DEFAULT_SPIN_DURATION_MS: u64 = 3000;
pub const DEFAULT_EXTRACTION_PAUSE_MS: u64 = 500;

const SETTINGS_INI_PATH: &str = "settings.ini";

#[derive(Debug, Clone)]
pub struct Settings {
    pub spin_duration_ms: u64,
    pub extraction_pause_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            extraction_pause_ms: DEFAULT_EXTRACTION_PAUSE_MS,
        }
    }
}

// Global static for the loaded settings.
static SETTINGS: Lazy<Mutex<Settings>> = Lazy::new(|| Mutex::new(Settings::default()));

/// Creates a default settings.ini if one doesn't exist.
fn create_default_file() -> Result<(), std::io::Error> {
    info!("Settings file not found, creating '{}'.", SETTINGS_INI_PATH);
    let mut conf = Ini::new();
    conf.set(
        "wheel",
        "SpinDurationMs",
        Some(DEFAULT_SPIN_DURATION_MS.to_string()),
    );
    conf.set(
        "wheel",
        "ExtractionPauseMs",
        Some(DEFAULT_EXTRACTION_PAUSE_MS.to_string()),
    );
    conf.write(SETTINGS_INI_PATH)?;
    Ok(())
}

pub fn load() {
    if !Path::new(SETTINGS_INI_PATH).exists() {
        if let Err(e) = create_default_file() {
            warn!("Could not create default settings file: {}", e);
            return;
        }
    }

    let mut conf = Ini::new();
    if let Err(e) = conf.load(SETTINGS_INI_PATH) {
        warn!("Failed to load '{}': {}. Using defaults.", SETTINGS_INI_PATH, e);
        return;
    }

    let mut settings = Settings::default();
    match conf.getuint("wheel", "SpinDurationMs") {
        Ok(Some(ms)) => settings.spin_duration_ms = ms,
        Ok(None) => {}
        Err(e) => warn!("Bad SpinDurationMs in settings.ini: {}", e),
    }
    match conf.getuint("wheel", "ExtractionPauseMs") {
        Ok(Some(ms)) => settings.extraction_pause_ms = ms,
        Ok(None) => {}
        Err(e) => warn!("Bad ExtractionPauseMs in settings.ini: {}", e),
    }

    info!(
        "Settings loaded: spin {} ms, pause {} ms.",
        settings.spin_duration_ms, settings.extraction_pause_ms
    );
    *SETTINGS.lock().unwrap() = settings;
}

pub fn settings() -> Settings {
    SETTINGS.lock().unwrap().clone()
}
