use crate::app::Tone;
use crate::notify::{NameChangeFeed, NameChanges};
use crate::prefs::{Prefs, NAME_KEY};
use crate::report;

/// Owns the preferred-name slot and tells everyone when it moves.
#[derive(Debug)]
pub struct Personalization {
    changes: NameChanges,
    status: (String, Tone),
}

impl Personalization {
    pub fn init(prefs: &Prefs) -> Self {
        let status = match prefs.get(NAME_KEY) {
            Some(stored) if !stored.is_empty() => (
                format!("Hi {stored}! We'll greet you by name next time."),
                Tone::Success,
            ),
            _ => (
                "Enter your name so the greeting feels personal.".to_owned(),
                Tone::Info,
            ),
        };

        Self {
            changes: NameChanges::new(),
            status,
        }
    }

    pub fn subscribe(&mut self) -> NameChangeFeed {
        self.changes.subscribe()
    }

    pub fn name(prefs: &Prefs) -> String {
        prefs.get(NAME_KEY).unwrap_or_default()
    }

    /// Form submit: an empty value clears the preference, anything else is
    /// trimmed and stored. Either way the change is broadcast; a failed
    /// write is logged and the session carries on unpersisted.
    pub fn submit(&mut self, prefs: &Prefs, raw: &str) {
        let value = raw.trim();
        if value.is_empty() {
            report!(prefs.remove(NAME_KEY), "failed to clear preferred name");
            self.status = (
                "Got it! We'll keep the greeting general.".to_owned(),
                Tone::Info,
            );
            self.changes.publish("");
            return;
        }

        report!(prefs.set(NAME_KEY, value), "failed to store preferred name");
        self.status = (format!("Nice to meet you, {value}!"), Tone::Success);
        self.changes.publish(value);
    }

    pub fn clear(&mut self, prefs: &Prefs) {
        report!(prefs.remove(NAME_KEY), "failed to clear preferred name");
        self.status = (
            "Preference cleared. The greeting stays general.".to_owned(),
            Tone::Info,
        );
        self.changes.publish("");
    }

    pub fn status(&self) -> (&str, Tone) {
        (&self.status.0, self.status.1)
    }
}
