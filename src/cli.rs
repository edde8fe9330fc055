use anyhow::Result;
use clap::Parser;

use voxhub::config::{parse_idle_threshold, parse_speech_rate, parse_tick_hz, Options};

/// voxhub - audio-first game hub narration demo
#[derive(Parser, Debug)]
#[command(name = "voxhub")]
#[command(version = "0.3.0")]
#[command(about = "Audio-first game hub narration demo", long_about = None)]
pub struct Cli {
    /// Localization catalog file (key = value lines)
    #[arg(short, long, value_name = "FILE")]
    pub locale: Option<String>,

    /// Speech language code (e.g. en-US)
    #[arg(short = 'g', long, value_name = "CODE")]
    pub language: Option<String>,

    /// Disable caption output
    #[arg(long)]
    pub nocaptions: bool,

    /// Scheduler ticks per second (1-240)
    #[arg(short, long, value_name = "HZ")]
    pub tickhz: Option<String>,

    /// Simulated speech rate in words per second (0.5-10.0)
    #[arg(short, long, value_name = "RATE")]
    pub speechrate: Option<String>,

    /// Idle seconds before the repeat announcement fires
    #[arg(short, long, value_name = "SECONDS")]
    pub idle: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "CONFIGFILE")]
    pub config: Option<String>,
}

impl Cli {
    /// Merge CLI options into config-file options; the CLI wins.
    pub fn merge_into_options(&self, mut options: Options) -> Result<Options> {
        if let Some(locale) = &self.locale {
            options.locale_file = Some(locale.clone());
        }
        if let Some(language) = &self.language {
            options.language = Some(language.clone());
        }
        if self.nocaptions {
            options.captions = Some(false);
        }
        if let Some(hz) = &self.tickhz {
            options.tick_hz = Some(parse_tick_hz(hz)?);
        }
        if let Some(rate) = &self.speechrate {
            options.speech_rate = Some(parse_speech_rate(rate)?);
        }
        if let Some(idle) = &self.idle {
            options.idle_threshold = Some(parse_idle_threshold(idle)?);
        }
        Ok(options)
    }
}
