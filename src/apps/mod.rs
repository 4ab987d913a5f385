//! Resident applications. Each one is a small state machine over its own
//! screens that registers exactly one dispatcher handler while mounted and
//! declares its softkey labels whenever its state changes.

use std::time::Instant;

use anyhow::Result;
use ratatui::{layout::Rect, Frame};

use crate::dispatch::Dispatcher;
use crate::input::Action;
use crate::nav::Navigator;
use crate::registry::AppId;
use crate::store::Store;

mod contacts;
mod home;
mod menu;
mod messages;
mod settings;
mod snake_app;

pub use contacts::ContactsApp;
pub use home::HomeApp;
pub use menu::MenuApp;
pub use messages::MessagesApp;
pub use settings::SettingsApp;
pub use snake_app::SnakeApp;

// ── Module contract ───────────────────────────────────────────────────────────

/// What a module's key handler can reach while processing an action or a tick.
pub struct Ctx<'a> {
    pub nav: &'a mut Navigator,
    pub store: &'a mut Store,
}

/// Lifecycle and input contract shared by every resident app. The shell calls
/// `activate`/`deactivate` at the moment the active app changes, so handler
/// registration is deterministic — no framework effect timing involved.
pub trait AppModule {
    fn id(&self) -> AppId;

    /// Mounted: register one handler, declare softkeys, load whatever the
    /// module needs from the store.
    fn activate(&mut self, dispatcher: &mut Dispatcher, ctx: &mut Ctx<'_>);

    /// Unmounted: the handler must be unregistered here, or it would shadow
    /// the next module's input.
    fn deactivate(&mut self, dispatcher: &mut Dispatcher);

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) -> Result<()>;

    /// Scheduled work. Only modules that run a clock override this.
    fn tick(&mut self, _now: Instant, _ctx: &mut Ctx<'_>) {}

    fn render(&self, f: &mut Frame<'_>, area: Rect);
}

// ── Selection helpers ─────────────────────────────────────────────────────────
// Bounded index movement with wrap-around, shared by every list screen.

pub(crate) fn select_prev(idx: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if idx == 0 {
        len - 1
    } else {
        idx - 1
    }
}

pub(crate) fn select_next(idx: usize, len: usize) -> usize {
    if len == 0 || idx + 1 >= len {
        0
    } else {
        idx + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        assert_eq!(select_prev(0, 4), 3);
        assert_eq!(select_prev(2, 4), 1);
        assert_eq!(select_next(3, 4), 0);
        assert_eq!(select_next(1, 4), 2);
    }

    #[test]
    fn empty_lists_pin_the_cursor_to_zero() {
        assert_eq!(select_prev(0, 0), 0);
        assert_eq!(select_next(0, 0), 0);
    }
}
