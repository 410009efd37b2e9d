use crate::app::{App, InputMode};
use crate::form::FieldId;
use crate::ui::tone_style;
use tui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

pub fn render_contact(app: &mut App, frame: &mut Frame<'_>, area: Rect) {
    app.reveal.mark("contact");
    let settling = app.reveal.is_settling("contact");

    let base = if settling {
        app.config.theme().base().add_modifier(Modifier::DIM)
    } else {
        app.config.theme().base()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    for (i, id) in FieldId::ALL.into_iter().enumerate() {
        render_field(app, frame, chunks[i], id, base);
    }

    if let Some((message, tone)) = app.form.feedback() {
        frame.render_widget(
            Paragraph::new(message.to_owned()).style(tone_style(app, tone)),
            chunks[3],
        );
    }

    frame.render_widget(
        Paragraph::new("i edit · Tab next field · Enter send")
            .style(app.config.theme().status())
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn render_field(app: &mut App, frame: &mut Frame<'_>, area: Rect, id: FieldId, base: Style) {
    let input = app.form.field(id);
    let editing = app.input_mode == InputMode::EditContact && app.form.focus == id;
    let focused = app.form.focus == id;

    // Invalid fields keep their red border until the input validates again.
    let border_style = if input.error.is_some() {
        app.config.theme().error()
    } else if focused {
        app.config.theme().active_border()
    } else {
        app.config.theme().border()
    };

    let block = Block::default()
        .title(id.label())
        .title_alignment(Alignment::Left)
        .padding(Padding::horizontal(1))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(border_style);

    let lines = vec![
        Line::from(input.value.clone()),
        match input.error {
            Some(message) => Line::styled(message, app.config.theme().error()),
            None => Line::raw(""),
        },
    ];

    frame.render_widget(Paragraph::new(lines).style(base).block(block), area);

    if editing {
        frame.set_cursor_position((
            area.x + 2 + app.form.field(id).cursor as u16,
            area.y + 1,
        ));
    }
}
