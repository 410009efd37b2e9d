use std::collections::HashMap;
use std::error;

use crate::config::{theme, Config, Mode};
use crate::countdown::Countdown;
use crate::form::{ContactForm, Input};
use crate::github::GithubFeed;
use crate::greet::Greeting;
use crate::personalize::Personalization;
use crate::prefs::{Prefs, THEME_KEY};
use crate::projects::{catalog, ProjectCard, Projects};
use crate::report;
use crate::util::sort_projects;
use chrono::{Datelike, Local};
use log::warn;
use tui::widgets::ListState;

pub use crate::github::Tone;

/// Application result type.
pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Projects,
    Activity,
    Contact,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Projects, Tab::Activity, Tab::Contact];

    pub fn index_of(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Projects => 1,
            Tab::Activity => 2,
            Tab::Contact => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Projects => "Projects",
            Tab::Activity => "Activity",
            Tab::Contact => "Contact",
        }
    }

    fn next(self) -> Self {
        Tab::ALL[(self.index_of() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Self {
        Tab::ALL[(self.index_of() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditName,
    EditContact,
}

/// Sections fade in the first time they come on screen; a short settle
/// counter drops the DIM treatment a few ticks after the reveal.
#[derive(Debug, Default)]
pub struct Reveal {
    settling: HashMap<&'static str, u8>,
    seen: Vec<&'static str>,
}

const REVEAL_TICKS: u8 = 2;

impl Reveal {
    pub fn mark(&mut self, key: &'static str) {
        if !self.seen.contains(&key) {
            self.seen.push(key);
            self.settling.insert(key, REVEAL_TICKS);
        }
    }

    pub fn tick(&mut self) {
        self.settling.retain(|_, ticks| {
            *ticks -= 1;
            *ticks > 0
        });
    }

    pub fn is_settling(&self, key: &str) -> bool {
        self.settling.contains_key(key)
    }
}

/// Application.
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub config: Config,
    pub prefs: Prefs,
    pub active_tab: Tab,
    pub input_mode: InputMode,
    pub show_keybinds: bool,
    pub theme_mode: Mode,
    pub personalization: Personalization,
    pub greeting: Greeting,
    pub name_input: Input,
    pub projects: Projects,
    pub cards: StatefulList<ProjectCard>,
    pub feed: GithubFeed,
    pub countdown: Countdown,
    pub form: ContactForm,
    pub reveal: Reveal,
}

/// Stored preference wins; otherwise follow the terminal's idea of the
/// system scheme, defaulting dark.
fn resolve_mode(prefs: &Prefs) -> Mode {
    prefs
        .get(THEME_KEY)
        .and_then(|s| s.parse().ok())
        .or_else(theme::system_mode)
        .unwrap_or(Mode::Dark)
}

impl App {
    pub fn init(mut config: Config) -> AppResult<Self> {
        let prefs = Prefs::open(&config)?;

        // An explicit config/CLI theme beats the persisted preference;
        // custom theme files ride on top of the dark mode.
        let (theme_mode, applied) = match config.theme_preference() {
            Some(name) => match name.parse::<Mode>() {
                Ok(mode) => (mode, mode.theme()),
                Err(_) => match name.parse::<theme::Theme>() {
                    Ok(custom) => (Mode::Dark, custom),
                    Err(_) => {
                        warn!("unknown theme {name:?}, falling back to preference");
                        let mode = resolve_mode(&prefs);
                        (mode, mode.theme())
                    }
                },
            },
            None => {
                let mode = resolve_mode(&prefs);
                (mode, mode.theme())
            }
        };
        config.set_theme(applied);

        let mut personalization = Personalization::init(&prefs);
        let greeting = Greeting::new(Personalization::name(&prefs), personalization.subscribe());
        let form = ContactForm::init(&prefs, personalization.subscribe());

        let mut name_input = Input::default();
        name_input.set_value(&Personalization::name(&prefs));

        let projects = Projects::init(&prefs);
        let mut items = catalog();
        sort_projects(&mut items, projects.sort);
        let mut cards = StatefulList::with_items(items);
        cards.state.select(Some(0));

        let feed = GithubFeed::new(&config);
        let mut countdown = Countdown::new(
            config.countdown_target(),
            config.countdown_done_message().to_owned(),
        );
        countdown.tick();

        Ok(Self {
            running: true,
            config,
            prefs,
            active_tab: Tab::Home,
            input_mode: InputMode::Normal,
            show_keybinds: false,
            theme_mode,
            personalization,
            greeting,
            name_input,
            projects,
            cards,
            feed,
            countdown,
            form,
            reveal: Reveal::default(),
        })
    }

    /// Handles the tick event of the terminal.
    pub fn tick(&mut self) {
        self.greeting.tick();
        self.form.tick();
        self.feed.tick();
        self.countdown.tick();
        self.reveal.tick();
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    pub fn goto_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn next_element(&mut self) {
        match self.active_tab {
            Tab::Projects => self.cards.next(),
            Tab::Contact => self.form.focus_next(),
            _ => {}
        }
    }

    pub fn prev_element(&mut self) {
        match self.active_tab {
            Tab::Projects => self.cards.previous(),
            Tab::Contact => self.form.focus_prev(),
            _ => {}
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.flipped();
        self.config.set_theme(self.theme_mode.theme());
        report!(
            self.prefs.set(THEME_KEY, self.theme_mode.as_str()),
            "failed to persist theme preference"
        );
    }

    /// Mirrors a system scheme change, but only while no explicit
    /// preference has been stored.
    pub fn sync_system_theme(&mut self, system: Mode) {
        if self.prefs.get(THEME_KEY).is_none() {
            self.theme_mode = system;
            self.config.set_theme(system.theme());
        }
    }

    pub fn refresh_feed(&mut self) {
        self.feed.fetch(true);
    }

    pub fn cycle_sort(&mut self) {
        let order = self.projects.cycle_sort(&self.prefs);
        sort_projects(&mut self.cards.items, order);
    }

    pub fn toggle_grid(&mut self) {
        self.projects.toggle_grid(&self.prefs);
    }

    pub fn toggle_selected_details(&mut self) {
        if let Some(card) = self
            .cards
            .state
            .selected()
            .and_then(|i| self.cards.items().get(i))
        {
            self.projects.toggle_details(card.title);
        }
    }

    pub fn submit_name(&mut self) {
        let raw = self.name_input.value.clone();
        self.personalization.submit(&self.prefs, &raw);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.name_input.clear();
        } else {
            self.name_input.set_value(trimmed);
        }
    }

    pub fn clear_name(&mut self) {
        self.personalization.clear(&self.prefs);
        self.name_input.clear();
    }

    pub fn submit_contact(&mut self) {
        self.form.submit(&self.prefs);
    }

    /// The header picks up its "scrolled" treatment once the project list
    /// has scrolled past the top.
    pub fn is_scrolled(&self) -> bool {
        self.cards.state.offset() > 0
    }

    pub fn footer_year(&self) -> i32 {
        Local::now().year()
    }
}

#[derive(Debug, Default)]
pub struct StatefulList<T> {
    pub state: ListState,
    pub items: Vec<T>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> StatefulList<T> {
        StatefulList {
            state: ListState::default(),
            items,
        }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn items(&self) -> &Vec<T> {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::SortOrder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// A config whose preference store stays in memory.
    fn test_config() -> Config {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(b"[data]\ncache = false\n").unwrap();
        Config::read_from_path(Some(file.path())).unwrap()
    }

    fn test_app() -> App {
        App::init(test_config()).unwrap()
    }

    #[test]
    fn system_theme_applies_only_without_stored_preference() {
        let mut app = test_app();

        app.sync_system_theme(Mode::Light);
        assert_eq!(app.theme_mode, Mode::Light);

        // An explicit toggle stores the preference...
        app.toggle_theme();
        assert_eq!(app.theme_mode, Mode::Dark);
        assert_eq!(app.prefs.get(THEME_KEY), Some("dark".to_owned()));

        // ...after which system changes stop mattering.
        app.sync_system_theme(Mode::Light);
        assert_eq!(app.theme_mode, Mode::Dark);
    }

    #[test]
    fn toggle_theme_persists_each_flip() {
        let mut app = test_app();
        let first = app.theme_mode;

        app.toggle_theme();
        assert_eq!(app.theme_mode, first.flipped());
        assert_eq!(
            app.prefs.get(THEME_KEY),
            Some(first.flipped().as_str().to_owned())
        );
    }

    #[test]
    fn cycle_sort_reorders_the_cards() {
        let mut app = test_app();
        assert_eq!(app.projects.sort, SortOrder::Newest);

        app.cycle_sort();
        assert_eq!(app.projects.sort, SortOrder::Oldest);

        let dates: Vec<_> = app.cards.items().iter().map(|c| c.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn submitted_name_reaches_the_greeting() {
        let mut app = test_app();
        app.name_input.set_value("  Sam ");
        app.submit_name();

        app.greeting.tick();
        assert!(app.greeting.line().contains("Sam! Welcome back."));
        assert_eq!(app.name_input.value, "Sam");
    }

    #[test]
    fn clearing_the_name_goes_back_to_general() {
        let mut app = test_app();
        app.name_input.set_value("Sam");
        app.submit_name();
        app.clear_name();

        app.greeting.tick();
        assert!(app.greeting.line().ends_with("welcome to my portfolio."));
        assert!(app.name_input.value.is_empty());
    }

    #[test]
    fn details_toggle_follows_the_selected_card() {
        let mut app = test_app();
        let selected = app.cards.items()[0].title;

        app.toggle_selected_details();
        assert!(app.projects.is_expanded(selected));

        app.toggle_selected_details();
        assert!(!app.projects.is_expanded(selected));
    }

    #[test]
    fn tabs_cycle_in_both_directions() {
        let mut app = test_app();
        assert_eq!(app.active_tab, Tab::Home);

        app.next_tab();
        assert_eq!(app.active_tab, Tab::Projects);
        app.prev_tab();
        app.prev_tab();
        assert_eq!(app.active_tab, Tab::Contact);
    }

    #[test]
    fn reveal_settles_after_a_few_ticks() {
        let mut reveal = Reveal::default();
        reveal.mark("home");
        assert!(reveal.is_settling("home"));

        reveal.tick();
        reveal.tick();
        assert!(!reveal.is_settling("home"));

        // A section only reveals once.
        reveal.mark("home");
        assert!(!reveal.is_settling("home"));
    }
}
