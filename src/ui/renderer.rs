use crate::core::app::App;
use crate::core::constants::EMPTY_PLACEHOLDER;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Project the application state into one frame. Pure view: the only
/// state this touches is the scroll offset, which it clamps to the
/// transcript that was actually drawn.
pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    // Paint the theme background across the whole frame first.
    let background = Block::default().style(Style::default().bg(app.theme.background_color));
    f.render_widget(background, f.area());

    let title = match &app.status {
        Some(status) => format!("Parley v{} • {}", env!("CARGO_PKG_VERSION"), status),
        None => format!("Parley v{}", env!("CARGO_PKG_VERSION")),
    };
    let transcript_block = Block::default().title(Span::styled(title, app.theme.title_style));

    if app.conversation.is_empty() && !app.turn.is_sending() {
        let placeholder = Paragraph::new(Span::styled(
            EMPTY_PLACEHOLDER,
            app.theme.placeholder_style,
        ))
        .alignment(Alignment::Center)
        .block(transcript_block);
        f.render_widget(placeholder, chunks[0]);
    } else {
        let lines = app.transcript_lines();
        let available_height = chunks[0].height.saturating_sub(1); // Account for title
        let max_offset = (lines.len() as u16).saturating_sub(available_height);
        let scroll_offset = if app.auto_scroll {
            max_offset
        } else {
            app.scroll_offset.min(max_offset)
        };

        let transcript = Paragraph::new(lines)
            .block(transcript_block)
            .wrap(Wrap { trim: true })
            .scroll((scroll_offset, 0));
        f.render_widget(transcript, chunks[0]);

        app.scroll_offset = scroll_offset;
    }

    let input_title = if app.turn.is_sending() {
        "Waiting for the reply... (Ctrl+C to quit)"
    } else {
        "Type your message (Enter to send, Ctrl+T to switch theme, Ctrl+C to quit)"
    };
    app.input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.input_border_style)
            .title(Span::styled(input_title, app.theme.input_title_style)),
    );
    f.render_widget(&app.input, chunks[1]);
}
