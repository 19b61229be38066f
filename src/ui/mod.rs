//! User interface components for terminal interaction.
//!
//! - [`display`]: result lines and summaries
//! - [`progress`]: per-file progress bar
//! - [`prompt`]: master password prompts

pub mod display;
pub mod progress;
pub mod prompt;
