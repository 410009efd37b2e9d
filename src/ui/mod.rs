use crate::app::{App, Tab, Tone};
use tui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Tabs},
    Frame,
};

pub mod contact;
pub mod feed;
pub mod home;
pub mod projects;

/// Renders the user interface widgets.
pub fn render(app: &mut App, frame: &mut Frame<'_>) {
    let wrapper = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .split(frame.area());

    frame.render_widget(
        Block::default().style(app.config.theme().base()),
        frame.area(),
    );

    render_tabs_bar(app, frame, wrapper[0]);

    match app.active_tab {
        Tab::Home => home::render_home(app, frame, wrapper[1]),
        Tab::Projects => projects::render_projects(app, frame, wrapper[1]),
        Tab::Activity => feed::render_feed(app, frame, wrapper[1]),
        Tab::Contact => contact::render_contact(app, frame, wrapper[1]),
    }

    render_status_bar(app, frame, wrapper[2]);

    if app.show_keybinds {
        render_keybinds_overlay(app, frame, frame.area());
    }
}

fn hotkey_line(title: &str) -> Line<'static> {
    let (head, tail) = title.split_at(1);
    Line::from(vec![
        Span::styled(
            head.to_owned(),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
        Span::raw(tail.to_owned()),
    ])
}

fn render_tabs_bar(app: &mut App, frame: &mut Frame<'_>, area: Rect) {
    // The header border brightens once the project list is scrolled,
    // standing in for the page header's scrolled state.
    let border_style = if app.is_scrolled() {
        app.config.theme().active_border()
    } else {
        app.config.theme().border()
    };

    let tabs = Tabs::new(Tab::ALL.map(|tab| hotkey_line(tab.title())).to_vec())
        .block(
            Block::default()
                .title("Baraa Zino")
                .title_style(app.config.theme().status())
                .style(app.config.theme().status())
                .borders(Borders::BOTTOM)
                .border_style(border_style),
        )
        .select(app.active_tab.index_of())
        .highlight_style(app.config.theme().selection());
    frame.render_widget(tabs, area);
}

pub(crate) fn tone_style(app: &App, tone: Tone) -> Style {
    match tone {
        Tone::Info => app.config.theme().status(),
        Tone::Success => app.config.theme().success(),
        Tone::Error => app.config.theme().error(),
    }
}

fn render_status_bar(app: &mut App, frame: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .style(app.config.theme().status())
        .borders(Borders::TOP)
        .border_style(app.config.theme().active_border());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(10)])
        .split(area);

    // The status line always carries the feed's latest outcome.
    let status = app.feed.status().clone();
    frame.render_widget(
        Paragraph::new(status.message)
            .style(tone_style(app, status.tone))
            .block(block.clone()),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(format!("© {}", app.footer_year()))
            .alignment(Alignment::Right)
            .block(block),
        chunks[1],
    );
}

fn render_keybinds_overlay(app: &mut App, frame: &mut Frame<'_>, area: Rect) {
    let area = centered_rect_ratio((3, 5), (3, 5), area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.config.theme().overlay())
        .border_type(BorderType::Plain)
        .style(app.config.theme().overlay())
        .padding(Padding {
            top: 1,
            bottom: 1,
            left: 2,
            right: 2,
        });

    let keybinds = vec![
        Line::from("j/k      scroll lists / cycle form fields"),
        Line::from("Tab      cycle tabs (h/p/a/c jump directly)"),
        Line::from("←/→      switch spotlight panel"),
        Line::from("Ent      expand project / send message"),
        Line::from("n        edit preferred name"),
        Line::from("x        clear preferred name"),
        Line::from("i        edit the focused contact field"),
        Line::from("s        cycle project sort order"),
        Line::from("g        show/hide the project grid"),
        Line::from("t        toggle light/dark theme"),
        Line::from("r        refresh GitHub activity"),
        Line::from("?        toggle this help dialog"),
        Line::from("q        quit"),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(keybinds).block(block.title("Keybinds")),
        area,
    );
}

fn centered_rect_ratio(ratio_x: (u32, u32), ratio_y: (u32, u32), r: Rect) -> Rect {
    let each_x = (ratio_x.1 - ratio_x.0) / 2;
    let each_y = (ratio_y.1 - ratio_y.0) / 2;

    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Ratio(each_y, ratio_y.1),
                Constraint::Ratio(ratio_y.0, ratio_y.1),
                Constraint::Ratio(each_y, ratio_y.1),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Ratio(each_x, ratio_x.1),
                Constraint::Ratio(ratio_x.0, ratio_x.1),
                Constraint::Ratio(each_x, ratio_x.1),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
