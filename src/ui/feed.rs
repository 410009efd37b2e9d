use crate::app::App;
use crate::github::RepoSummary;
use crate::ui::tone_style;
use tui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

pub fn render_feed(app: &mut App, frame: &mut Frame<'_>, area: Rect) {
    app.reveal.mark("activity");
    let settling = app.reveal.is_settling("activity");

    let base = if settling {
        app.config.theme().base().add_modifier(Modifier::DIM)
    } else {
        app.config.theme().base()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(area);

    let status = app.feed.status().clone();
    frame.render_widget(
        Paragraph::new(status.message).style(tone_style(app, status.tone)),
        chunks[0],
    );

    let block = Block::default()
        .title("GitHub activity · r to refresh")
        .title_alignment(Alignment::Left)
        .padding(Padding::uniform(1))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(app.config.theme().border());

    if app.feed.repos().is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing to show.")
                .style(app.config.theme().status())
                .alignment(Alignment::Center)
                .block(block.style(base)),
            chunks[1],
        );
        return;
    }

    let items = app
        .feed
        .repos()
        .iter()
        .map(|repo| repo_card(app, repo, base))
        .collect::<Vec<_>>();

    frame.render_widget(List::new(items).block(block).style(base), chunks[1]);
}

/// One card per repository: linked title, description, language/update
/// line, counts, and up to three topic chips.
fn repo_card(app: &App, repo: &RepoSummary, base: Style) -> ListItem<'static> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                repo.name.clone(),
                base.add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                repo.html_url.clone(),
                app.config
                    .theme()
                    .status()
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(
            repo.description
                .clone()
                .unwrap_or_else(|| "No description provided yet.".to_owned()),
        ),
        Line::styled(
            format!(
                "{} • Updated {}",
                repo.language.as_deref().unwrap_or("Unknown"),
                repo.updated_label()
            ),
            app.config.theme().status(),
        ),
        Line::styled(
            format!("Stars: {} • Forks: {}", repo.stargazers_count, repo.forks_count),
            app.config.theme().status(),
        ),
    ];

    if !repo.topics.is_empty() {
        let chips = repo
            .topics
            .iter()
            .take(3)
            .map(|topic| format!("[{topic}]"))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::styled(chips, app.config.theme().success()));
    }

    lines.push(Line::raw(""));
    ListItem::new(lines)
}
