//! User-activity tracking
//!
//! Repeat narration ("say that again") only makes sense when the user has
//! actually gone quiet: not mid-navigation, not while speech is already
//! playing, not during a screen transition. This module tracks idle time and
//! gates repeat requests on it.

pub mod inactivity;
pub mod repeat;

pub use inactivity::UserInactivity;
pub use repeat::RepeatService;
