use crate::app::{App, Tab};
use crate::projects::SPOTLIGHT;
use tui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Padding, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render_projects(app: &mut App, frame: &mut Frame<'_>, area: Rect) {
    app.reveal.mark("projects");
    let settling = app.reveal.is_settling("projects");

    let base = if settling {
        app.config.theme().base().add_modifier(Modifier::DIM)
    } else {
        app.config.theme().base()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(area);

    render_spotlight(app, frame, chunks[0], base);
    render_grid(app, frame, chunks[1], base);
}

fn render_spotlight(app: &mut App, frame: &mut Frame<'_>, area: Rect, base: Style) {
    let block = Block::default()
        .title("Spotlight")
        .title_alignment(Alignment::Left)
        .padding(Padding::horizontal(1))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(app.config.theme().border());

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .margin(1)
        .split(area);

    frame.render_widget(block.style(base), area);

    // Exactly one panel shows at a time; the toggles mirror the selection.
    let toggles = Tabs::new(SPOTLIGHT.iter().map(|p| p.title).collect::<Vec<_>>())
        .select(app.projects.spotlight)
        .style(app.config.theme().status())
        .highlight_style(app.config.theme().active_selection());
    frame.render_widget(toggles, inner[0]);

    let panel = app.projects.active_panel();
    frame.render_widget(
        Paragraph::new(panel.blurb)
            .style(base)
            .wrap(Wrap { trim: true }),
        inner[1],
    );
}

fn render_grid(app: &mut App, frame: &mut Frame<'_>, area: Rect, base: Style) {
    let block = Block::default()
        .title(format!("Projects · {}", app.projects.sort))
        .title_alignment(Alignment::Left)
        .padding(Padding::uniform(1))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(if app.active_tab == Tab::Projects {
            app.config.theme().active_border()
        } else {
            app.config.theme().border()
        });

    if !app.projects.grid_visible {
        frame.render_widget(
            Paragraph::new("Project grid hidden. Press g to show it again.")
                .style(app.config.theme().status())
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let items = app
        .cards
        .items()
        .iter()
        .map(|card| {
            let mut lines = vec![Line::from(vec![
                Span::styled(card.title, base.add_modifier(Modifier::BOLD)),
                Span::raw("  ·  "),
                Span::styled(
                    card.date.format("%b %-d, %Y").to_string(),
                    app.config.theme().status(),
                ),
            ])];

            if app.projects.is_expanded(card.title) {
                lines.push(Line::from(card.summary));
                for detail in card.details {
                    lines.push(Line::from(format!("  - {detail}")));
                }
                lines.push(Line::styled(
                    format!("  [{}]", card.stack.join("] [")),
                    app.config.theme().status(),
                ));
            }

            ListItem::new(lines)
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(block)
        .style(base)
        .highlight_style(app.config.theme().active_selection());

    frame.render_stateful_widget(list, area, &mut app.cards.state);
}
