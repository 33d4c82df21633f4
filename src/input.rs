// Single-key terminal input
// Raw mode is held only while a read is in progress and always restored.

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::time::Duration;
use tracing::warn;

use crate::config::KEY_POLL_INTERVAL;
use crate::error::TeleopError;
use crate::shutdown::ShutdownFlag;

/// One key press as seen by the teleop loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl-C pressed while the terminal was in raw mode
    Interrupt,
    /// Arrows, function keys and the like
    Other,
}

/// Decode a terminal event; `None` for events that are not a key press
pub fn key_from_event(event: &Event) -> Option<Key> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };

    if *kind != KeyEventKind::Press {
        return None;
    }

    let key = match code {
        KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Interrupt
        }
        // ETX, in case the terminal hands Ctrl-C through untranslated
        KeyCode::Char('\x03') => Key::Interrupt,
        // Ctrl-Z, Ctrl-D and friends are control codes, not movement keys
        KeyCode::Char(_) if modifiers.contains(KeyModifiers::CONTROL) => Key::Other,
        KeyCode::Char(ch) => Key::Char(*ch),
        _ => Key::Other,
    };
    Some(key)
}

/// Raw mode for as long as the guard lives
pub struct RawModeGuard(());

impl RawModeGuard {
    pub fn acquire() -> Result<Self, TeleopError> {
        enable_raw_mode()?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Block until one key is pressed
///
/// Returns `Ok(None)` if `shutdown` is raised before a key arrives.
pub fn read_one_key(shutdown: &ShutdownFlag) -> Result<Option<Key>, TeleopError> {
    read_one_key_with_poll(shutdown, KEY_POLL_INTERVAL)
}

fn read_one_key_with_poll(
    shutdown: &ShutdownFlag,
    poll_interval: Duration,
) -> Result<Option<Key>, TeleopError> {
    let _raw = RawModeGuard::acquire()?;

    loop {
        if shutdown.is_requested() {
            return Ok(None);
        }
        if !event::poll(poll_interval)? {
            continue;
        }
        let event = event::read()?;
        if let Some(key) = key_from_event(&event) {
            return Ok(Some(key));
        }
    }
}

/// Where the session loop gets its keys from
#[allow(async_fn_in_trait)]
pub trait KeySource {
    /// Next key press, or `None` once an external shutdown was requested
    async fn next_key(&mut self) -> Result<Option<Key>, TeleopError>;
}

/// Keys from the controlling terminal
///
/// Each read runs on the blocking pool so the runtime keeps servicing the
/// signal listener and Zenoh while we wait for the operator.
pub struct TerminalKeys {
    shutdown: ShutdownFlag,
}

impl TerminalKeys {
    pub fn new(shutdown: ShutdownFlag) -> Self {
        Self { shutdown }
    }
}

impl KeySource for TerminalKeys {
    async fn next_key(&mut self) -> Result<Option<Key>, TeleopError> {
        let shutdown = self.shutdown.clone();
        tokio::task::spawn_blocking(move || read_one_key(&shutdown)).await?
    }
}
