//! Stock narration sequences shared across the hub
//!
//! Builders only assemble steps; nothing speaks until the scheduler drives
//! the sequence.

use crate::audiofx::UiCueId;

use super::sequence::Sequence;
use super::step::{PlayCue, SpeakAndWait};

/// Speak a single localized key.
pub fn speak_key(key: &str, args: &[String]) -> Sequence {
    Sequence::new().then(SpeakAndWait::with_args(key, args.to_vec()))
}

/// Announce the navigation target the user is heading toward.
pub fn navigate_to(key: &str, args: &[String]) -> Sequence {
    speak_key(key, args)
}

/// Announce leaving the current screen.
pub fn exit_to(exit_key: &str) -> Sequence {
    speak_key(exit_key, &[])
}

/// Announce the item the selector currently rests on.
pub fn current_item(current_key: &str, item_text: &str) -> Sequence {
    speak_key(current_key, &[item_text.to_string()])
}

/// Announce application shutdown.
pub fn exit_app() -> Sequence {
    Sequence::new()
        .then(PlayCue::new(UiCueId::ExitChime))
        .then(SpeakAndWait::new("app.exit"))
}

/// Announce the new visual-assist state plus the settings hint.
pub fn toggle_visual_assist(enabled: bool) -> Sequence {
    let status_key = if enabled {
        "app.visual_assist.on"
    } else {
        "app.visual_assist.off"
    };
    Sequence::new()
        .then(SpeakAndWait::new(status_key))
        .then(SpeakAndWait::new("hint.visual_assist.settings"))
}

/// Full game-select prompt: screen name, current item, control hint.
pub fn game_select_prompt(current_item_text: &str, hint_key: &str) -> Sequence {
    Sequence::new()
        .then(SpeakAndWait::new("enter.game_select"))
        .then(SpeakAndWait::with_args(
            "current.game",
            vec![current_item_text.to_string()],
        ))
        .then(SpeakAndWait::new(hint_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_assemble_expected_step_counts() {
        assert_eq!(speak_key("k", &[]).len(), 1);
        assert_eq!(exit_app().len(), 2);
        assert_eq!(toggle_visual_assist(true).len(), 2);
        assert_eq!(game_select_prompt("Memory Match", "hint.select").len(), 3);
    }
}
