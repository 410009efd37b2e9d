use crate::prefs::{Prefs, GRID_KEY, SORT_KEY};
use crate::report;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub title: &'static str,
    pub date: NaiveDate,
    pub summary: &'static str,
    pub details: &'static [&'static str],
    pub stack: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct SpotlightPanel {
    pub key: &'static str,
    pub title: &'static str,
    pub blurb: &'static str,
}

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid project date")
}

/// The portfolio's project cards, newest first as authored.
pub fn catalog() -> Vec<ProjectCard> {
    vec![
        ProjectCard {
            title: "StudyShare Notes",
            date: d(2026, 1, 25),
            summary: "Collaborative markdown note hub for study groups.",
            details: &[
                "Live-merging editor sessions with per-paragraph locks.",
                "Export to printable sheets the night before finals.",
            ],
            stack: &["typescript", "websockets", "postgres"],
        },
        ProjectCard {
            title: "Campus Course Planner",
            date: d(2025, 11, 2),
            summary: "Degree-plan scheduler that dodges section clashes.",
            details: &[
                "Constraint solver over section times and prerequisites.",
                "Shareable plan links for advisor review.",
            ],
            stack: &["rust", "axum", "sqlite"],
        },
        ProjectCard {
            title: "Transit Tracker",
            date: d(2025, 3, 14),
            summary: "Live arrivals board for the two bus lines I actually ride.",
            details: &[
                "Polls the agency GTFS-rt feed and caches predictions.",
                "E-ink friendly rendering for a bedside display.",
            ],
            stack: &["rust", "gtfs", "e-ink"],
        },
        ProjectCard {
            title: "Recipe Roulette",
            date: d(2024, 10, 5),
            summary: "Spin-the-wheel dinner picker seeded from a house list.",
            details: &["Weighted repeats so pasta week stays occasional."],
            stack: &["javascript"],
        },
        ProjectCard {
            title: "Pixel Garden",
            date: d(2024, 6, 18),
            summary: "Generative art toy where plants grow from keystrokes.",
            details: &[
                "L-system growth rules with a tiny mutation slider.",
                "Canvas snapshots exportable as wallpapers.",
            ],
            stack: &["canvas", "generative-art"],
        },
    ]
}

/// Featured panels for the single-select spotlight. Exactly one is shown at
/// a time; the first is active by default.
pub const SPOTLIGHT: &[SpotlightPanel] = &[
    SpotlightPanel {
        key: "planner",
        title: "Campus Course Planner",
        blurb: "The planner started as a spreadsheet argument with my advisor. It now \
                builds a clash-free semester in under a second and exports the plan \
                straight into the registrar's worksheet format.",
    },
    SpotlightPanel {
        key: "notes",
        title: "StudyShare Notes",
        blurb: "StudyShare grew out of a four-person exam crunch. Everyone types into \
                the same outline, nobody overwrites anybody, and the night-before \
                print sheet is one keystroke.",
    },
    SpotlightPanel {
        key: "transit",
        title: "Transit Tracker",
        blurb: "A bedside arrivals board that answers exactly one question: do I run \
                for the 8:12 or make another coffee. It has been right every morning \
                since March.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
    Name,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Name => "name",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Name,
            SortOrder::Name => SortOrder::Newest,
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "name" => Ok(SortOrder::Name),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid and spotlight state. Sort order and grid visibility persist; the
/// expand/collapse set and the active spotlight panel are session-only,
/// as on the original page.
#[derive(Debug)]
pub struct Projects {
    pub spotlight: usize,
    pub sort: SortOrder,
    pub grid_visible: bool,
    expanded: HashSet<&'static str>,
}

impl Projects {
    pub fn init(prefs: &Prefs) -> Self {
        let sort = prefs
            .get(SORT_KEY)
            .and_then(|s| s.parse().ok())
            .unwrap_or(SortOrder::Newest);

        // Anything but an explicit "false" counts as visible.
        let grid_visible = prefs.get(GRID_KEY).as_deref() != Some("false");

        Self {
            spotlight: 0,
            sort,
            grid_visible,
            expanded: HashSet::new(),
        }
    }

    pub fn cycle_sort(&mut self, prefs: &Prefs) -> SortOrder {
        self.sort = self.sort.next();
        report!(prefs.set(SORT_KEY, self.sort.as_str()), "failed to persist sort order");
        self.sort
    }

    pub fn toggle_grid(&mut self, prefs: &Prefs) {
        self.grid_visible = !self.grid_visible;
        report!(
            prefs.set(GRID_KEY, if self.grid_visible { "true" } else { "false" }),
            "failed to persist grid visibility"
        );
    }

    /// Expanding one card never touches its siblings.
    pub fn toggle_details(&mut self, title: &'static str) {
        if !self.expanded.remove(title) {
            self.expanded.insert(title);
        }
    }

    pub fn is_expanded(&self, title: &str) -> bool {
        self.expanded.contains(title)
    }

    pub fn next_spotlight(&mut self) {
        self.spotlight = (self.spotlight + 1) % SPOTLIGHT.len();
    }

    pub fn prev_spotlight(&mut self) {
        self.spotlight = self.spotlight.checked_sub(1).unwrap_or(SPOTLIGHT.len() - 1);
    }

    pub fn active_panel(&self) -> &'static SpotlightPanel {
        &SPOTLIGHT[self.spotlight]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_preferences() {
        let prefs = Prefs::open_in_memory();
        let projects = Projects::init(&prefs);
        assert_eq!(projects.sort, SortOrder::Newest);
        assert!(projects.grid_visible);
        assert_eq!(projects.spotlight, 0);
    }

    #[test]
    fn stored_preferences_are_honored() {
        let prefs = Prefs::open_in_memory();
        prefs.set(SORT_KEY, "name").unwrap();
        prefs.set(GRID_KEY, "false").unwrap();

        let projects = Projects::init(&prefs);
        assert_eq!(projects.sort, SortOrder::Name);
        assert!(!projects.grid_visible);
    }

    #[test]
    fn unknown_sort_preference_falls_back() {
        let prefs = Prefs::open_in_memory();
        prefs.set(SORT_KEY, "shuffled").unwrap();

        let projects = Projects::init(&prefs);
        assert_eq!(projects.sort, SortOrder::Newest);
    }

    #[test]
    fn cycle_sort_persists() {
        let prefs = Prefs::open_in_memory();
        let mut projects = Projects::init(&prefs);

        assert_eq!(projects.cycle_sort(&prefs), SortOrder::Oldest);
        assert_eq!(prefs.get(SORT_KEY), Some("oldest".to_owned()));
    }

    #[test]
    fn grid_toggle_round_trips_through_prefs() {
        let prefs = Prefs::open_in_memory();
        let mut projects = Projects::init(&prefs);

        projects.toggle_grid(&prefs);
        assert_eq!(prefs.get(GRID_KEY), Some("false".to_owned()));

        let reloaded = Projects::init(&prefs);
        assert!(!reloaded.grid_visible);
    }

    #[test]
    fn details_toggle_is_independent_per_card() {
        let prefs = Prefs::open_in_memory();
        let mut projects = Projects::init(&prefs);

        projects.toggle_details("Pixel Garden");
        assert!(projects.is_expanded("Pixel Garden"));
        assert!(!projects.is_expanded("Transit Tracker"));

        projects.toggle_details("Pixel Garden");
        assert!(!projects.is_expanded("Pixel Garden"));
    }

    #[test]
    fn spotlight_wraps_both_ways() {
        let prefs = Prefs::open_in_memory();
        let mut projects = Projects::init(&prefs);

        projects.prev_spotlight();
        assert_eq!(projects.spotlight, SPOTLIGHT.len() - 1);
        projects.next_spotlight();
        assert_eq!(projects.spotlight, 0);
    }
}
