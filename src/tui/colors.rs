use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;
pub const BAR_BG: Color = Color::Rgb(0, 95, 135);
pub const ROW_ALT_BG: Color = Color::Rgb(25, 25, 35);
pub const HIGHLIGHT_BG: Color = Color::Rgb(60, 60, 80);
pub const DANGER: Color = Color::Red;
pub const MUTED: Color = Color::DarkGray;

/// Border style for a panel, brighter when it has focus
pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Style of one list row. The open user stands out even when the highlight
/// has moved elsewhere.
pub fn row(visual_idx: usize, highlighted: bool, open: bool) -> Style {
    let bg = if highlighted {
        HIGHLIGHT_BG
    } else if visual_idx % 2 == 1 {
        ROW_ALT_BG
    } else {
        Color::Reset
    };

    let style = Style::default().fg(Color::White).bg(bg);
    match (highlighted, open) {
        (_, true) => style.fg(ACCENT).add_modifier(Modifier::BOLD),
        (true, false) => style.add_modifier(Modifier::BOLD),
        (false, false) => style,
    }
}

/// Status line from the fetch state
pub fn status_indicator(loading: bool, failed: bool) -> Style {
    match (loading, failed) {
        (_, true) => Style::default().fg(Color::White).bg(DANGER),
        (true, _) => Style::default().fg(Color::Black).bg(Color::Yellow),
        _ => Style::default().fg(Color::White).bg(BAR_BG),
    }
}
