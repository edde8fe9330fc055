use std::fs;

use anyhow::{Context, Result};

/// Runtime options settable via CLI or config file
#[derive(Debug, Clone)]
pub struct Options {
    pub locale_file: Option<String>,
    pub language: Option<String>,
    pub captions: Option<bool>,
    pub speech_rate: Option<f32>,
    pub tick_hz: Option<u32>,
    pub idle_threshold: Option<f32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            locale_file: None,
            language: None,
            captions: Some(true),
            speech_rate: None,
            tick_hz: Some(30),
            idle_threshold: None,
        }
    }
}

/// Load configuration from a `key = value` file, falling back to defaults
/// when no path is given.
pub fn load_config(path: &Option<String>) -> Result<Options> {
    let mut options = Options::default();
    let Some(path) = path else {
        return Ok(options);
    };

    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read config {path}"))?;
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .with_context(|| format!("malformed config line {}: {raw:?}", index + 1))?;
        let (key, value) = (key.trim(), value.trim());
        match key {
            "locale_file" => options.locale_file = Some(value.to_string()),
            "language" => options.language = Some(value.to_string()),
            "captions" => {
                options.captions = Some(
                    value
                        .parse::<bool>()
                        .with_context(|| format!("invalid captions value {value:?}"))?,
                )
            }
            "speech_rate" => options.speech_rate = Some(parse_speech_rate(value)?),
            "tick_hz" => options.tick_hz = Some(parse_tick_hz(value)?),
            "idle_threshold" => options.idle_threshold = Some(parse_idle_threshold(value)?),
            _ => anyhow::bail!("unknown config key {key:?} on line {}", index + 1),
        }
    }
    Ok(options)
}

/// Parse a scheduler tick rate in Hz (1-240)
pub fn parse_tick_hz(s: &str) -> Result<u32> {
    let hz: u32 = s.parse().context("Invalid tick rate value")?;
    if !(1..=240).contains(&hz) {
        anyhow::bail!("Tick rate out of range (1 to 240 Hz)");
    }
    Ok(hz)
}

/// Parse a simulated speech rate in words per second (0.5-10.0)
pub fn parse_speech_rate(s: &str) -> Result<f32> {
    let rate: f32 = s.parse().context("Invalid speech rate value")?;
    if !(0.5..=10.0).contains(&rate) {
        anyhow::bail!("Speech rate out of range (0.5 to 10.0 words per second)");
    }
    Ok(rate)
}

/// Parse an idle threshold in seconds (non-negative)
pub fn parse_idle_threshold(s: &str) -> Result<f32> {
    let seconds: f32 = s.parse().context("Invalid idle threshold value")?;
    if !seconds.is_finite() || seconds < 0.0 {
        anyhow::bail!("Idle threshold must be a non-negative number of seconds");
    }
    Ok(seconds)
}
