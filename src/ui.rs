use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Terminal,
};

pub type Term = Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>;

// The classic green-on-dark handset display.
const SCREEN_FG: Color = Color::Green;

// ── Padding ───────────────────────────────────────────────────────────────────
// Horizontal padding applied to app screens so text never touches the edges.
const H_PAD: u16 = 1;

/// Shrink a rect by H_PAD columns on each side.
pub fn pad_horizontal(area: Rect) -> Rect {
    let pad = H_PAD.min(area.width / 2);
    Rect {
        x: area.x + pad,
        y: area.y,
        width: area.width.saturating_sub(pad * 2),
        height: area.height,
    }
}

// ── Style helpers ─────────────────────────────────────────────────────────────

pub fn normal_style() -> Style {
    Style::default().fg(SCREEN_FG)
}
pub fn sel_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(SCREEN_FG)
        .add_modifier(Modifier::BOLD)
}
pub fn title_style() -> Style {
    Style::default().fg(SCREEN_FG).add_modifier(Modifier::BOLD)
}
pub fn dim_style() -> Style {
    Style::default().fg(SCREEN_FG).add_modifier(Modifier::DIM)
}

// ── List rows ─────────────────────────────────────────────────────────────────

/// One selectable row, cursor marker included.
pub fn selection_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(format!("> {label}"), sel_style()))
    } else {
        Line::from(Span::styled(format!("  {label}"), normal_style()))
    }
}
