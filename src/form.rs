use crate::app::Tone;
use crate::notify::NameChangeFeed;
use crate::personalize::Personalization;
use crate::prefs::Prefs;

pub const NAME_MISSING: &str = "Please let me know your name so I can address you properly.";
pub const NAME_TOO_SHORT: &str = "A name that short looks accidental—mind adding a bit more?";
pub const EMAIL_MISSING: &str = "Your email helps me get back to you.";
pub const EMAIL_MALFORMED: &str = "That email format looks off. Can you double-check it?";
pub const MESSAGE_MISSING: &str = "Share a short message about what you need help with.";
pub const MESSAGE_TOO_SHORT: &str = "A few more details will help me respond thoughtfully.";

const MIN_NAME_LEN: usize = 2;
const MIN_MESSAGE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Email,
    Message,
}

impl FieldId {
    pub const ALL: [FieldId; 3] = [FieldId::Name, FieldId::Email, FieldId::Message];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Email => "Email",
            FieldId::Message => "Message",
        }
    }
}

/// A single editable line with a cursor, in the console-input style.
#[derive(Debug, Default)]
pub struct Input {
    pub value: String,
    pub cursor: usize,
    pub error: Option<&'static str>,
}

impl Input {
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.value.remove(at);
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_owned();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.error = None;
    }
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.contains(char::is_whitespace)
}

fn validate(id: FieldId, value: &str) -> Option<&'static str> {
    let value = value.trim();
    match id {
        FieldId::Name => {
            if value.is_empty() {
                Some(NAME_MISSING)
            } else if value.chars().count() < MIN_NAME_LEN {
                Some(NAME_TOO_SHORT)
            } else {
                None
            }
        }
        FieldId::Email => {
            if value.is_empty() {
                Some(EMAIL_MISSING)
            } else if !looks_like_email(value) {
                Some(EMAIL_MALFORMED)
            } else {
                None
            }
        }
        FieldId::Message => {
            if value.is_empty() {
                Some(MESSAGE_MISSING)
            } else if value.chars().count() < MIN_MESSAGE_LEN {
                Some(MESSAGE_TOO_SHORT)
            } else {
                None
            }
        }
    }
}

/// Contact form with per-field validation messages. The name field is
/// primed from the stored preferred name and follows later name changes
/// while it is still empty.
#[derive(Debug)]
pub struct ContactForm {
    pub name: Input,
    pub email: Input,
    pub message: Input,
    pub focus: FieldId,
    feedback: Option<(String, Tone)>,
    feed: NameChangeFeed,
}

impl ContactForm {
    pub fn init(prefs: &Prefs, feed: NameChangeFeed) -> Self {
        let mut form = Self {
            name: Input::default(),
            email: Input::default(),
            message: Input::default(),
            focus: FieldId::Name,
            feedback: None,
            feed,
        };

        let stored = Personalization::name(prefs);
        if !stored.is_empty() {
            form.name.set_value(&stored);
        }
        form
    }

    pub fn field(&self, id: FieldId) -> &Input {
        match id {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut Input {
        match id {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Message => &mut self.message,
        }
    }

    pub fn focused(&mut self) -> &mut Input {
        self.field_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FieldId::Name => FieldId::Email,
            FieldId::Email => FieldId::Message,
            FieldId::Message => FieldId::Name,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FieldId::Name => FieldId::Message,
            FieldId::Email => FieldId::Name,
            FieldId::Message => FieldId::Email,
        };
    }

    /// Fixing a field clears its error as soon as it validates again.
    pub fn after_edit(&mut self) {
        let id = self.focus;
        let input = self.field_mut(id);
        if input.error.is_some() && validate(id, &input.value).is_none() {
            input.error = None;
        }
    }

    pub fn submit(&mut self, prefs: &Prefs) -> bool {
        let mut has_error = false;
        for id in FieldId::ALL {
            let error = validate(id, &self.field(id).value);
            self.field_mut(id).error = error;
            has_error |= error.is_some();
        }

        if has_error {
            self.feedback = Some((
                "Please fix the highlighted fields before sending.".to_owned(),
                Tone::Error,
            ));
            return false;
        }

        let name = self.name.value.trim();
        let name = if name.is_empty() { "there" } else { name };
        self.feedback = Some((
            format!("Thanks {name}! Your message is on its way."),
            Tone::Success,
        ));

        self.name.clear();
        self.email.clear();
        self.message.clear();

        // Re-prime the name from the stored preference, like the reset
        // handler on the page did.
        let stored = Personalization::name(prefs);
        if !stored.is_empty() {
            self.name.set_value(&stored);
        }
        true
    }

    pub fn tick(&mut self) {
        if let Some(name) = self.feed.poll_latest() {
            if !name.is_empty() && self.name.value.is_empty() {
                self.name.set_value(&name);
            }
        }
    }

    pub fn feedback(&self) -> Option<(&str, Tone)> {
        self.feedback.as_ref().map(|(m, t)| (m.as_str(), *t))
    }
}
