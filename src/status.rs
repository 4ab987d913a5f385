use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};

use crate::ui::dim_style;

const SIGNAL_BARS: &str = "▂▄▆█";
const BATTERY_REFRESH: Duration = Duration::from_secs(30);

// ── Status line ───────────────────────────────────────────────────────────────

/// Signal / clock / battery strip at the top of the display. The clock string
/// is cached and only reformatted when the minute changes; battery is read
/// from /sys at a coarse interval (full-bar mock where unavailable).
pub struct StatusLine {
    time: String,
    minute: i64,
    battery: Option<u8>,
    battery_read_at: Option<Instant>,
}

impl StatusLine {
    pub fn new() -> Self {
        let mut s = Self {
            time: String::new(),
            minute: -1,
            battery: None,
            battery_read_at: None,
        };
        s.refresh(Instant::now());
        s
    }

    pub fn refresh(&mut self, now: Instant) {
        let local = Local::now();
        let minute = local.timestamp() / 60;
        if minute != self.minute {
            self.minute = minute;
            self.time = local.format("%H:%M").to_string();
        }

        let stale = self
            .battery_read_at
            .map_or(true, |t| now.duration_since(t) > BATTERY_REFRESH);
        if stale {
            self.battery = read_battery_linux();
            self.battery_read_at = Some(now);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let batt = battery_glyph(self.battery.unwrap_or(100));
        let used = SIGNAL_BARS.chars().count() + self.time.chars().count() + 1;
        let gap = (area.width as usize).saturating_sub(used) / 2;
        let pad = " ".repeat(gap);
        let line = Line::from(vec![
            Span::styled(SIGNAL_BARS, dim_style()),
            Span::raw(pad.clone()),
            Span::styled(self.time.clone(), dim_style()),
            Span::raw(pad),
            Span::styled(batt, dim_style()),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

fn battery_glyph(pct: u8) -> &'static str {
    if pct >= 75 {
        "▓"
    } else if pct >= 50 {
        "▒"
    } else if pct >= 25 {
        "░"
    } else {
        "▁"
    }
}

fn read_battery_linux() -> Option<u8> {
    for entry in std::fs::read_dir("/sys/class/power_supply").ok()? {
        let path = entry.ok()?.path();
        let kind = std::fs::read_to_string(path.join("type")).ok()?;
        if kind.trim() == "Battery" {
            let cap = std::fs::read_to_string(path.join("capacity")).ok()?;
            return cap.trim().parse().ok();
        }
    }
    None
}
