// voxhub demo binary
// Runs a scripted narration tour of the hub against console-backed ports.

mod cli;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use voxhub::activity::{RepeatService, UserInactivity};
use voxhub::audiofx::{AudioCueService, CueCatalog, UiCueId};
use voxhub::config::{self, Options};
use voxhub::localization::{LocalizationService, TableLocalization};
use voxhub::narrate::{
    sequences, NarrationScheduler, NarrationScope, Sequence, SpeakAndWait,
    DEFAULT_GATE_DELAY_SECONDS,
};
use voxhub::speech::{ConsoleSpeechService, SpeechPriority, SpeechService};
use voxhub::visual_assist::CaptionBoard;

/// Cue device for the demo: prints the clip the platform layer would play.
struct ConsoleCueService {
    catalog: CueCatalog,
}

impl AudioCueService for ConsoleCueService {
    fn play_cue(&self, cue: UiCueId) {
        match self.catalog.clip_for(cue) {
            Some(clip) => println!("[cue] {clip}"),
            None => println!("[cue] {cue:?}"),
        }
    }

    fn stop_all(&self) {}
}

enum TourAction {
    Welcome,
    BrowseTo(&'static str),
    ConfirmSelection,
    EndTransition,
    ExitApp,
}

fn tour_script() -> Vec<(f32, TourAction)> {
    vec![
        (0.0, TourAction::Welcome),
        (3.0, TourAction::BrowseTo("Memory Match")),
        (4.5, TourAction::BrowseTo("Steam Rush")),
        (6.0, TourAction::ConfirmSelection),
        (8.0, TourAction::EndTransition),
        (14.0, TourAction::ExitApp),
    ]
}

fn builtin_catalog() -> TableLocalization {
    TableLocalization::from_pairs([
        ("app.welcome", "Welcome to the game hub"),
        ("hint.navigate", "Swipe left or right to browse games"),
        ("enter.game_select", "Game selection"),
        ("current.game", "Current game: {0}"),
        ("hint.select", "Double tap to open the selected game"),
        ("nav.to_game_menu", "Opening {0}"),
        ("exit.to_main_menu", "Back to the main menu"),
        ("app.visual_assist.on", "Visual assist on"),
        ("app.visual_assist.off", "Visual assist off"),
        ("hint.visual_assist.settings", "Adjust visual assist in settings"),
        ("app.exit", "Goodbye"),
    ])
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = config::load_config(&cli.config)?;
    let options = cli.merge_into_options(options)?;
    run_tour(&options)
}

fn run_tour(options: &Options) -> Result<()> {
    let speech = Arc::new(ConsoleSpeechService::new(options.speech_rate.unwrap_or(2.5)));
    let localization: Arc<dyn LocalizationService> = match &options.locale_file {
        Some(path) => Arc::new(TableLocalization::load_from_file(path)?),
        None => Arc::new(builtin_catalog()),
    };
    if let Some(language) = &options.language {
        speech.set_language(language);
    }

    let cues = Arc::new(ConsoleCueService {
        catalog: CueCatalog::default(),
    });
    let board = Arc::new(CaptionBoard::new());
    let captions = options.captions.unwrap_or(true);

    let mut scheduler = NarrationScheduler::new(speech.clone(), localization, cues.clone());
    if captions {
        scheduler = scheduler.with_visual_assist(board.clone());
    }

    let transitioning = Arc::new(AtomicBool::new(false));
    let inactivity = Arc::new(Mutex::new(UserInactivity::new()));
    let mut repeat = {
        let flag = transitioning.clone();
        RepeatService::new(inactivity.clone(), speech.clone(), move || {
            flag.load(Ordering::Relaxed)
        })
    };
    repeat.idle_threshold_seconds = options.idle_threshold.unwrap_or(4.0);

    let script = tour_script();
    let mut script_index = 0;

    let tick_hz = options.tick_hz.unwrap_or(30).max(1);
    let tick = Duration::from_secs_f32(1.0 / tick_hz as f32);
    let tour_end = script.last().map(|(at, _)| at + 3.0).unwrap_or(0.0);

    let mut last_caption: Option<String> = None;
    let mut sim_time = 0.0f32;
    let mut last_instant = Instant::now();

    // Fire the t=0 actions before the first sleep so the tour opens
    // immediately.
    loop {
        while script_index < script.len() && script[script_index].0 <= sim_time {
            apply_action(
                &script[script_index].1,
                &mut scheduler,
                &cues,
                &transitioning,
                &inactivity,
            );
            script_index += 1;
        }

        if captions {
            let caption = board.current_caption();
            if caption != last_caption {
                if let Some(text) = &caption {
                    println!("[caption] {text}");
                }
                last_caption = caption;
            }
        }

        if sim_time >= tour_end && !scheduler.is_running() && !scheduler.gate_active() {
            break;
        }

        thread::sleep(tick);
        let now = Instant::now();
        let dt = now.duration_since(last_instant).as_secs_f32();
        last_instant = now;
        sim_time += dt;

        speech.tick(dt);
        inactivity.lock().tick(dt);
        scheduler.tick(dt);

        if repeat.tick_auto(dt) {
            inactivity.lock().mark_nav_action();
            cues.play_cue(UiCueId::Repeat);
            scheduler.play(
                NarrationScope::Hub,
                |_| sequences::current_item("current.game", "Steam Rush"),
                SpeechPriority::Low,
                true,
            );
        }
    }

    println!("[hub] tour finished");
    Ok(())
}

fn apply_action(
    action: &TourAction,
    scheduler: &mut NarrationScheduler,
    cues: &ConsoleCueService,
    transitioning: &Arc<AtomicBool>,
    inactivity: &Mutex<UserInactivity>,
) {
    match action {
        TourAction::Welcome => {
            cues.play_cue(UiCueId::WelcomeChime);
            scheduler.play(
                NarrationScope::Start,
                |_| {
                    Sequence::new()
                        .then(SpeakAndWait::new("app.welcome"))
                        .then(SpeakAndWait::new("hint.navigate"))
                },
                SpeechPriority::Normal,
                true,
            );
        }
        TourAction::BrowseTo(name) => {
            let name = *name;
            inactivity.lock().mark_nav_action();
            cues.play_cue(UiCueId::NavigateNext);
            scheduler.play(
                NarrationScope::Hub,
                move |_| sequences::current_item("current.game", name),
                SpeechPriority::Normal,
                true,
            );
        }
        TourAction::ConfirmSelection => {
            inactivity.lock().mark_nav_action();
            cues.play_cue(UiCueId::Confirm);
            transitioning.store(true, Ordering::Relaxed);
            let flag = transitioning.clone();
            scheduler.play_gated(
                NarrationScope::Hub,
                "nav.to_game_menu",
                move || flag.load(Ordering::Relaxed),
                DEFAULT_GATE_DELAY_SECONDS,
                SpeechPriority::High,
                &["Steam Rush".to_string()],
            );
        }
        TourAction::EndTransition => {
            transitioning.store(false, Ordering::Relaxed);
        }
        TourAction::ExitApp => {
            inactivity.lock().mark_nav_action();
            scheduler.play(
                NarrationScope::Hub,
                |_| sequences::exit_app(),
                SpeechPriority::High,
                false,
            );
        }
    }
}
