use crate::model::User;
use crate::tui::app::{App, LoadState};
use crate::tui::colors;
use crate::tui::search::PLACEHOLDER;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

pub const LOADING_TEXT: &str = "Loading users...";
pub const ERROR_TEXT: &str = "Error fetching users";
pub const EMPTY_TEXT: &str = "No users found";
pub const LIST_TITLE: &str = "Our Users";
pub const DETAILS_TITLE: &str = "User Details";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SEARCH_PREFIX: &str = " > ";
const CLEAR_BUTTON_WIDTH: u16 = 5;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(3),    // User list
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);
    draw_users(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    let overlay = app.selected_user().map(|user| draw_details(frame, user, area));
    app.hit_areas.overlay = overlay.map(|(popup, _)| popup);
    app.hit_areas.close_button = overlay.map(|(_, close)| close);

    // Show cursor in search bar when focused and nothing covers it
    if overlay.is_none() && app.search.focused {
        let input = app.hit_areas.search;
        let width = SEARCH_PREFIX.width() + app.search.before_cursor().width();
        let offset = u16::try_from(width).unwrap_or(u16::MAX);
        let max_x = input.right().saturating_sub(2);
        let cursor_x = input.x.saturating_add(1).saturating_add(offset).min(max_x);
        frame.set_cursor_position(Position::new(cursor_x, input.y + 1));
    }
}

fn draw_search_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(CLEAR_BUTTON_WIDTH)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors::border(app.search.focused))
        .title(" Search ");

    let line = if app.search.query.is_empty() {
        Line::from(vec![
            Span::raw(SEARCH_PREFIX),
            Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(colors::MUTED)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(SEARCH_PREFIX),
            Span::styled(app.search.query.as_str(), Style::default().fg(Color::White)),
        ])
    };
    frame.render_widget(Paragraph::new(line).block(block), parts[0]);

    let clear = Paragraph::new("✕")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(colors::DANGER)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::MUTED)),
        );
    frame.render_widget(clear, parts[1]);

    app.hit_areas.search = parts[0];
    app.hit_areas.clear_button = parts[1];
}

fn draw_users(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors::border(!app.search.focused))
        .title(format!(" {} ", LIST_TITLE))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.list.visible_rows = inner.height as usize;
    app.hit_areas.list = inner;

    match &app.load {
        LoadState::Idle | LoadState::Loading => {
            let spinner = SPINNER[(app.tick % SPINNER.len() as u64) as usize];
            let text = Line::from(vec![
                Span::styled(format!(" {} ", spinner), Style::default().fg(colors::ACCENT)),
                Span::styled(LOADING_TEXT, Style::default().fg(Color::Yellow)),
            ]);
            frame.render_widget(Paragraph::new(text), inner);
        }
        LoadState::Failed(e) => {
            let lines = vec![
                Line::from(Span::styled(
                    format!(" {}", ERROR_TEXT),
                    Style::default()
                        .fg(colors::DANGER)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!(" {} error: {}", e.kind(), e),
                    Style::default().fg(colors::MUTED),
                )),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        }
        LoadState::Loaded(users) => {
            if app.filtered_indices.is_empty() {
                let text = Span::styled(
                    format!(" {}", EMPTY_TEXT),
                    Style::default().fg(colors::MUTED),
                );
                frame.render_widget(Paragraph::new(text), inner);
                return;
            }

            // Build visible rows only
            let start = app.list.scroll_offset;
            let end = (start + inner.height as usize).min(app.filtered_indices.len());
            let open_id = app.selection.selected_id();

            let items: Vec<ListItem> = (start..end)
                .enumerate()
                .filter_map(|(visual_idx, logical_idx)| {
                    let user = users.get(*app.filtered_indices.get(logical_idx)?)?;
                    let highlighted = app.list.highlighted == Some(logical_idx);
                    let style = colors::row(visual_idx, highlighted, open_id == Some(user.id));
                    Some(ListItem::new(user_line(user)).style(style))
                })
                .collect();

            frame.render_widget(List::new(items), inner);
        }
    }
}

fn user_line(user: &User) -> Line<'_> {
    let mut spans = vec![Span::raw(format!(" {}", user.name))];
    if !user.username.is_empty() {
        spans.push(Span::styled(
            format!("  @{}", user.username),
            Style::default().fg(colors::MUTED),
        ));
    }
    Line::from(spans)
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match &app.load {
        LoadState::Idle | LoadState::Loading => " Fetching...".to_string(),
        LoadState::Failed(_) => " Fetch failed".to_string(),
        LoadState::Loaded(users) => {
            let mut text = format!(" {} of {} users", app.filtered_indices.len(), users.len());
            if let Some(user) = app.selected_user() {
                text.push_str(&format!(" | viewing #{}", user.id));
            }
            text
        }
    };

    let right_text = if app.selection.is_open() {
        " Esc:Close  Enter:Show  Ctrl+Q:Quit "
    } else {
        " Tab:Focus  Enter:Details  Ctrl+U:Clear  Esc:Cancel  Ctrl+Q:Quit "
    };

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        format!("{:width$}", left_text, width = available_width)
    };

    let style = colors::status_indicator(app.is_loading(), app.fetch_error().is_some());
    frame.render_widget(Paragraph::new(status_str).style(style), area);
}

/// Helper to create a centered popup area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Draw the detail overlay. Returns the popup and its close button areas.
fn draw_details(frame: &mut Frame, user: &User, area: Rect) -> (Rect, Rect) {
    let rows = user.detail_rows();
    let label_w = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 2;
    let value_w = rows.iter().map(|(_, value)| value.width()).max().unwrap_or(0);

    let width = u16::try_from(label_w + value_w + 4)
        .unwrap_or(u16::MAX)
        .max(36)
        .min(area.width.saturating_sub(4));
    // Borders, blank line above the rows, blank line and hint below
    let height = u16::try_from(rows.len() + 5)
        .unwrap_or(u16::MAX)
        .min(area.height.saturating_sub(2));
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::ACCENT))
        .title(format!(" {} ", DETAILS_TITLE))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let close_area = Rect::new(
        popup_area.right().saturating_sub(5),
        popup_area.y,
        3,
        1,
    )
    .intersection(area);
    frame.render_widget(
        Paragraph::new("[×]").style(
            Style::default()
                .fg(colors::DANGER)
                .add_modifier(Modifier::BOLD),
        ),
        close_area,
    );

    let mut lines = vec![Line::from("")];
    for (label, value) in rows {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<label_w$}", format!("{}:", label), label_w = label_w),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Esc/x: close",
        Style::default().fg(colors::MUTED),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    (popup_area, close_area)
}
