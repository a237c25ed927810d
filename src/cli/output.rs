use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::config::Config;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPreferences {
    /// ASCII-only labels, no icons or colour.
    pub plain_mode: bool,
    pub color_enabled: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            plain_mode: false,
            color_enabled: true,
        }
    }
}

impl OutputPreferences {
    pub fn from_config(config: &Config) -> Self {
        Self {
            plain_mode: config.plain_output,
            color_enabled: config.ui_color_enabled && !config.plain_output,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
    if prefs.color_enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

/// Applies the display-related settings of `config` to all subsequent output.
pub fn apply_config(config: &Config) {
    set_preferences(OutputPreferences::from_config(config));
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind, plain: bool) -> &'static str {
    match (kind, plain) {
        (MessageKind::Success, false) => "✔",
        (MessageKind::Warning, false) => "⚠",
        (MessageKind::Error, false) => "✖",
        (MessageKind::Success, true) => "OK:",
        (MessageKind::Warning, true) => "WARNING:",
        (MessageKind::Error, true) => "ERROR:",
        (MessageKind::Hint, _) => "hint:",
        (MessageKind::Info, _) | (MessageKind::Section, _) => "",
    }
}

pub fn styled(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        _ => format!("{} {}", label(kind, prefs.plain_mode), text),
    };

    if !prefs.color_enabled {
        return base;
    }

    match kind {
        MessageKind::Success => base.green().to_string(),
        MessageKind::Warning => base.yellow().to_string(),
        MessageKind::Error => base.red().to_string(),
        MessageKind::Hint => base.dimmed().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = styled(kind, message, &current_preferences());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}
