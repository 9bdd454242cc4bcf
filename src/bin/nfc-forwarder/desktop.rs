use std::{thread::sleep, time::Duration};

use anyhow::{Context as _, Result};
use arboard::Clipboard;
use enigo::{Direction, Enigo, Key, Keyboard as _, Settings};
use plant_automation::nfc::{Notifier, Uid, UidSink};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::warn;

#[cfg(target_os = "macos")]
const PASTE_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const PASTE_MODIFIER: Key = Key::Control;

/// Pastes the UID into the focused window and confirms it with Enter.
pub struct KeyboardSink {
    // Dropping the clipboard handle clears our selection on X11.
    clipboard: Clipboard,
    enigo: Enigo,
    settle_delay: Duration,
}

impl KeyboardSink {
    pub fn new(settle_delay: Duration) -> Result<Self> {
        let clipboard = Clipboard::new().context("failed to open clipboard")?;
        let enigo =
            Enigo::new(&Settings::default()).context("failed to initialize keyboard input")?;

        Ok(Self {
            clipboard,
            enigo,
            settle_delay,
        })
    }

    fn paste_and_submit(&mut self) -> Result<()> {
        self.enigo
            .key(PASTE_MODIFIER, Direction::Press)
            .context("failed to press paste modifier")?;
        let pasted = self.enigo.key(Key::Unicode('v'), Direction::Click);
        self.enigo
            .key(PASTE_MODIFIER, Direction::Release)
            .context("failed to release paste modifier")?;
        pasted.context("failed to send paste shortcut")?;

        self.enigo
            .key(Key::Return, Direction::Click)
            .context("failed to press Enter")?;

        Ok(())
    }
}

impl UidSink for KeyboardSink {
    fn deliver(&mut self, uid: &Uid) -> Result<()> {
        sleep(self.settle_delay);

        self.clipboard
            .set_text(uid.as_str())
            .context("failed to copy UID to clipboard")?;

        self.paste_and_submit()
    }
}

pub struct PopupNotifier;

impl Notifier for PopupNotifier {
    fn notify(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, title: &str, message: &str) {
        warn!("{title}: {}", message.replace('\n', " "));
    }
}
