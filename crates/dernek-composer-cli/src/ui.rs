use dernek_composer_engine::{DisplayNode, MentionSession, Mode, StyleKind, render_preview};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::App;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(rows[0]);

    let text = app.buffer.text();
    let editor = Paragraph::new(text.as_str())
        .block(Block::default().borders(Borders::ALL).title("Belge"));
    f.render_widget(editor, panes[0]);

    let (line, col) = cursor_line_col(&text, app.buffer.cursor());
    let cursor_x = panes[0].x.saturating_add(1).saturating_add(col);
    let cursor_y = panes[0].y.saturating_add(1).saturating_add(line);
    f.set_cursor_position((cursor_x, cursor_y));

    let preview = Paragraph::new(preview_lines(&render_preview(&text)))
        .block(Block::default().borders(Borders::ALL).title("Önizleme"))
        .wrap(Wrap { trim: false });
    f.render_widget(preview, panes[1]);

    if !app.composer.session().is_idle() {
        let popup = Rect::new(cursor_x, cursor_y.saturating_add(1), 44, 12);
        draw_popup(f, app, popup.intersection(f.area()));
    }

    let help = if app.status.is_empty() {
        Line::from(vec![
            Span::raw("Ctrl+Q: Çıkış | "),
            Span::raw("@: Bahset | "),
            Span::raw("Tab: Bitir/Ekle | "),
            Span::raw("Ctrl+F: Ara | "),
            Span::raw("Ctrl+Space, Ctrl+B/I/U/L: Biçim"),
        ])
    } else {
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Yellow),
        ))
    };
    f.render_widget(Paragraph::new(vec![help]), rows[1]);
}

fn draw_popup(f: &mut Frame, app: &App, area: Rect) {
    let session = app.composer.session();
    let (title, items) = match session.mode() {
        Mode::Idle => return,
        Mode::CommandMenu => ("Komutlar".to_string(), command_items(app)),
        Mode::EntitySearch => {
            let query = app.search_input.as_deref().unwrap_or(session.query());
            let cursor = if app.search_input.is_some() { "▏" } else { "" };
            (format!("Ara: {query}{cursor}"), candidate_items(session))
        }
        Mode::FieldSelect => ("Alanlar (Tab: ekle)".to_string(), field_items(app)),
    };

    let mut state = ListState::default().with_selected(Some(session.highlight_index()));
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

fn command_items(app: &App) -> Vec<ListItem<'static>> {
    let commands = app.composer.commands();
    app.composer
        .session()
        .menu_matches()
        .iter()
        .filter_map(|&i| commands.get(i))
        .map(|command| ListItem::new(format!("@{}  {}", command.trigger, command.label)))
        .collect()
}

fn candidate_items(session: &MentionSession) -> Vec<ListItem<'static>> {
    if session.shows_no_results() {
        return vec![ListItem::new("Sonuç bulunamadı")];
    }
    session
        .candidates()
        .iter()
        .map(|entity| {
            let mark = match (session.multi_select(), session.is_selected(entity)) {
                (false, _) => "",
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
            };
            ListItem::new(format!("{mark}{}", entity.display_name()))
        })
        .collect()
}

fn field_items(app: &App) -> Vec<ListItem<'static>> {
    let session = app.composer.session();
    let preview = session.preview_entity();
    app.composer
        .catalog()
        .entries()
        .iter()
        .map(|entry| {
            let order = session.selected_fields().iter().position(|&k| k == entry.key);
            let mark = order.map_or("   ".to_string(), |i| format!("{}. ", i + 1));
            let sample = preview
                .and_then(|entity| entity.value(entry.key))
                .unwrap_or("-");
            ListItem::new(format!("{mark}{}: {sample}", entry.label))
        })
        .collect()
}

fn preview_lines(nodes: &[DisplayNode]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    push_nodes(&mut lines, nodes, Style::default());
    lines
}

fn push_nodes(lines: &mut Vec<Line<'static>>, nodes: &[DisplayNode], style: Style) {
    for node in nodes {
        match node {
            DisplayNode::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.spans.push(Span::styled(text.clone(), style));
                }
            }
            DisplayNode::LineBreak => lines.push(Line::default()),
            DisplayNode::Styled { kind, children } => {
                push_nodes(lines, children, style.patch(style_for(*kind)));
            }
            DisplayNode::Table { headers, rows } => {
                let header_style = style.add_modifier(Modifier::BOLD);
                lines.push(Line::from(Span::styled(headers.join(" | "), header_style)));
                for row in rows {
                    lines.push(Line::from(Span::styled(row.join(" | "), style)));
                }
                lines.push(Line::default());
            }
        }
    }
}

fn style_for(kind: StyleKind) -> Style {
    match kind {
        StyleKind::Bold => Style::default().add_modifier(Modifier::BOLD),
        StyleKind::Italic => Style::default().add_modifier(Modifier::ITALIC),
        StyleKind::Underline => Style::default().add_modifier(Modifier::UNDERLINED),
        // Terminals have one font size; large text is highlighted instead.
        StyleKind::Size(px) if px > 14 => Style::default().fg(Color::Cyan),
        StyleKind::Size(_) => Style::default(),
    }
}

fn cursor_line_col(text: &str, cursor: usize) -> (u16, u16) {
    let before = text.get(..cursor).unwrap_or(text);
    let line = before.matches('\n').count();
    let col = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count());
    (
        u16::try_from(line).unwrap_or(u16::MAX),
        u16::try_from(col).unwrap_or(u16::MAX),
    )
}
