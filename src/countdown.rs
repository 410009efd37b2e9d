use chrono::{DateTime, FixedOffset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segments {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Live countdown to a fixed instant. Recomputes once per tick until the
/// target passes, then latches at zero.
#[derive(Debug)]
pub struct Countdown {
    target: DateTime<FixedOffset>,
    done_message: String,
    segments: Segments,
    message: String,
    done: bool,
}

impl Countdown {
    pub fn new(target: DateTime<FixedOffset>, done_message: String) -> Self {
        Self {
            target,
            done_message,
            segments: Segments::default(),
            message: String::new(),
            done: false,
        }
    }

    pub fn tick(&mut self) {
        self.update_at(Utc::now());
    }

    pub fn update_at(&mut self, now: DateTime<Utc>) {
        // The repeating recompute is cancelled once the target passes.
        if self.done {
            return;
        }

        let total = self.target.signed_duration_since(now).num_seconds();
        if total <= 0 {
            self.segments = Segments::default();
            self.message = self.done_message.clone();
            self.done = true;
            return;
        }

        self.segments = Segments {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        };
        self.message = format!(
            "Only {} days left until I walk the stage.",
            self.segments.days
        );
    }

    pub fn segments(&self) -> Segments {
        self.segments
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
