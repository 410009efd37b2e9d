use crate::app::{App, InputMode};
use crate::ui::tone_style;
use tui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};

pub fn render_home(app: &mut App, frame: &mut Frame<'_>, area: Rect) {
    app.reveal.mark("home");
    let settling = app.reveal.is_settling("home");

    let base = if settling {
        app.config.theme().base().add_modifier(Modifier::DIM)
    } else {
        app.config.theme().base()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(6),
        ])
        .split(area);

    render_greeting(app, frame, chunks[0], base);
    render_name_form(app, frame, chunks[1], base);
    render_countdown(app, frame, chunks[2], base);
}

fn render_greeting(app: &mut App, frame: &mut Frame<'_>, area: Rect, base: Style) {
    let greeting = Paragraph::new(app.greeting.line())
        .style(base.add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(app.config.theme().border()),
        );
    frame.render_widget(greeting, area);
}

fn render_name_form(app: &mut App, frame: &mut Frame<'_>, area: Rect, base: Style) {
    let editing = app.input_mode == InputMode::EditName;

    let block = Block::default()
        .title("Preferred name")
        .title_alignment(Alignment::Left)
        .padding(Padding::horizontal(1))
        .borders(Borders::ALL)
        .border_style(if editing {
            app.config.theme().active_border()
        } else {
            app.config.theme().border()
        });

    let (status, tone) = app.personalization.status();
    let lines = vec![
        Line::from(app.name_input.value.as_str()),
        Line::styled(status.to_owned(), tone_style(app, tone)),
        Line::styled(
            "n edit · x clear · Enter save",
            app.config.theme().status(),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).style(base).block(block), area);

    if editing {
        // Draw the cursor at the current position in the input field.
        frame.set_cursor_position((
            area.x + 2 + app.name_input.cursor as u16,
            area.y + 1,
        ));
    }
}

fn render_countdown(app: &mut App, frame: &mut Frame<'_>, area: Rect, base: Style) {
    let block = Block::default()
        .title("Graduation countdown")
        .title_alignment(Alignment::Left)
        .padding(Padding::uniform(1))
        .borders(Borders::ALL)
        .border_style(app.config.theme().border());

    let segments = app.countdown.segments();
    let clock = Line::from(vec![
        Span::styled(
            segments.days.to_string(),
            base.add_modifier(Modifier::BOLD),
        ),
        Span::raw(" days  "),
        Span::styled(
            format!(
                "{:02}:{:02}:{:02}",
                segments.hours, segments.minutes, segments.seconds
            ),
            base.add_modifier(Modifier::BOLD),
        ),
    ])
    .alignment(Alignment::Center);

    let message = if app.countdown.is_done() {
        Line::styled(
            app.countdown.message().to_owned(),
            app.config.theme().success(),
        )
    } else {
        Line::styled(
            app.countdown.message().to_owned(),
            app.config.theme().status(),
        )
    }
    .alignment(Alignment::Center);

    let text = vec![clock, Line::raw(""), message];
    frame.render_widget(
        Paragraph::new(text)
            .style(base)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
