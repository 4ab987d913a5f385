//! The shell ties everything together: it owns the dispatcher, the navigation
//! state, the store and the resident apps, drives module lifecycle when the
//! active app changes, and renders the whole handset frame.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::apps::{
    AppModule, ContactsApp, Ctx, HomeApp, MenuApp, MessagesApp, SettingsApp, SnakeApp,
};
use crate::dispatch::{Dispatcher, HandlerHost};
use crate::input::{self, Action, KeypadButton, KEYPAD_ROWS};
use crate::nav::Navigator;
use crate::registry::{self, AppId};
use crate::sound::{self, Tone};
use crate::status::StatusLine;
use crate::store::{self, Store};
use crate::ui::{dim_style, normal_style, sel_style};

const KEYPAD_HEIGHT: u16 = KEYPAD_ROWS.len() as u16;

// ── Resident apps ─────────────────────────────────────────────────────────────

/// One instance of every registered app, alive for the whole session so that
/// in-memory state (inbox edits, cursor positions) survives navigation.
struct Apps {
    home: HomeApp,
    menu: MenuApp,
    messages: MessagesApp,
    contacts: ContactsApp,
    snake: SnakeApp,
    settings: SettingsApp,
}

impl Apps {
    fn new() -> Self {
        Self {
            home: HomeApp::new(),
            menu: MenuApp::new(),
            messages: MessagesApp::new(),
            contacts: ContactsApp::new(),
            snake: SnakeApp::new(),
            settings: SettingsApp::new(),
        }
    }

    fn get_mut(&mut self, id: AppId) -> Option<&mut dyn AppModule> {
        Some(match id {
            _ if id == registry::HOME => &mut self.home,
            _ if id == registry::MENU => &mut self.menu,
            _ if id == registry::MESSAGES => &mut self.messages,
            _ if id == registry::CONTACTS => &mut self.contacts,
            _ if id == registry::SNAKE => &mut self.snake,
            _ if id == registry::SETTINGS => &mut self.settings,
            _ => return None,
        })
    }

    fn get(&self, id: AppId) -> Option<&dyn AppModule> {
        Some(match id {
            _ if id == registry::HOME => &self.home,
            _ if id == registry::MENU => &self.menu,
            _ if id == registry::MESSAGES => &self.messages,
            _ if id == registry::CONTACTS => &self.contacts,
            _ if id == registry::SNAKE => &self.snake,
            _ if id == registry::SETTINGS => &self.settings,
            _ => return None,
        })
    }
}

// ── Phone ─────────────────────────────────────────────────────────────────────

/// Everything a dispatched action may touch. Split off from `Shell` so the
/// dispatcher can borrow it as the handler host while staying borrowed itself.
struct Phone {
    nav: Navigator,
    store: Store,
    apps: Apps,
    /// The app whose handler is currently registered. Trails `nav.active()`
    /// until `sync_active` runs.
    mounted: AppId,
    muted: bool,
}

impl HandlerHost for Phone {
    fn feedback(&mut self) {
        if !self.muted && self.store.get_bool(store::SOUND_ENABLED, true) {
            sound::play(Tone::Keypress);
        }
    }

    fn handle(&mut self, owner: AppId, action: Action) -> anyhow::Result<()> {
        // END always hangs up to the idle screen, no matter which app is up.
        if action == Action::End {
            self.nav.go_home();
            return Ok(());
        }
        let Phone {
            nav, store, apps, ..
        } = self;
        match apps.get_mut(owner) {
            Some(module) => module.handle(action, &mut Ctx { nav, store }),
            None => Ok(()),
        }
    }
}

// ── Shell ─────────────────────────────────────────────────────────────────────

pub struct Shell {
    dispatcher: Dispatcher,
    phone: Phone,
    status: StatusLine,
    /// Clickable regions recorded during the last render, hit-tested on mouse
    /// press. Stale for at most one frame.
    zones: Vec<(Rect, Action)>,
}

impl Shell {
    pub fn new(store: Store, muted: bool) -> Self {
        let mut shell = Self {
            dispatcher: Dispatcher::new(),
            phone: Phone {
                nav: Navigator::new(),
                store,
                apps: Apps::new(),
                mounted: registry::HOME,
                muted,
            },
            status: StatusLine::new(),
            zones: Vec::new(),
        };
        shell.mount(registry::HOME);

        // Resume where the previous session left off.
        let last = shell
            .phone
            .store
            .get_string(store::LAST_ACTIVE_APP, registry::HOME.as_str());
        if let Some(id) = registry::app_id_from_str(&last) {
            if id != registry::HOME {
                shell.phone.nav.open_app(id);
                shell.sync_active();
            }
        }
        shell
    }

    /// Handle a key event. Returns `false` when the session should end.
    pub fn on_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            return false;
        }
        if let Some(action) = input::map_key(key) {
            self.dispatcher.dispatch(action, &mut self.phone);
            self.sync_active();
        }
        true
    }

    pub fn on_mouse(&mut self, ev: &MouseEvent) {
        if ev.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(ev.column, ev.row);
        let hit = self
            .zones
            .iter()
            .find(|(zone, _)| zone.contains(pos))
            .map(|&(_, action)| action);
        if let Some(action) = hit {
            self.dispatcher.dispatch(action, &mut self.phone);
            self.sync_active();
        }
    }

    /// Run scheduled work for the active module and refresh the status line.
    pub fn on_tick(&mut self, now: Instant) {
        self.status.refresh(now);
        let Phone {
            nav,
            store,
            apps,
            mounted,
            ..
        } = &mut self.phone;
        if let Some(module) = apps.get_mut(*mounted) {
            module.tick(now, &mut Ctx { nav, store });
        }
        self.sync_active();
    }

    /// Swap module lifecycle when navigation moved since the last call. The
    /// old module deactivates before the new one activates, so the handler
    /// stack never holds both.
    fn sync_active(&mut self) {
        let active = self.phone.nav.active();
        if active == self.phone.mounted {
            return;
        }
        let previous = self.phone.mounted;
        if let Some(module) = self.phone.apps.get_mut(previous) {
            module.deactivate(&mut self.dispatcher);
        }
        let name = registry::app_by_id(active).map_or("?", |a| a.name);
        log::info!("switching app: {previous} -> {active} ({name})");
        self.phone
            .store
            .set_string(store::LAST_ACTIVE_APP, active.as_str());
        self.mount(active);
    }

    fn mount(&mut self, id: AppId) {
        self.phone.mounted = id;
        let Phone {
            nav, store, apps, ..
        } = &mut self.phone;
        if let Some(module) = apps.get_mut(id) {
            module.activate(&mut self.dispatcher, &mut Ctx { nav, store });
        } else {
            log::warn!("no module registered for app id {id}");
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame<'_>) {
        self.zones.clear();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
                Constraint::Length(KEYPAD_HEIGHT),
            ])
            .split(f.area());

        self.status.render(f, chunks[0]);

        let active = self.phone.nav.active();
        match self.phone.apps.get(active) {
            Some(module) => module.render(f, chunks[1]),
            None => {
                f.render_widget(
                    Paragraph::new(Span::styled("App not found", dim_style()))
                        .alignment(Alignment::Center),
                    chunks[1],
                );
            }
        }

        self.render_softkeys(f, chunks[2]);
        self.render_keypad(f, chunks[3]);
    }

    fn render_softkeys(&mut self, f: &mut Frame<'_>, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let keys = self.phone.nav.softkeys();
        let left = keys.left.clone().unwrap_or_default();
        let right = keys.right.clone().unwrap_or_default();
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {left} "), sel_style())),
            halves[0],
        );
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {right} "), sel_style()))
                .alignment(Alignment::Right),
            halves[1],
        );
        self.zones.push((halves[0], Action::SoftLeft));
        self.zones.push((halves[1], Action::SoftRight));
    }

    fn render_keypad(&mut self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(1); KEYPAD_ROWS.len()])
            .split(area);

        for (row_area, buttons) in rows.iter().zip(KEYPAD_ROWS) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Ratio(1, buttons.len() as u32);
                    buttons.len()
                ])
                .split(*row_area);
            for (cell, button) in cells.iter().zip(*buttons) {
                self.render_button(f, *cell, *button);
            }
        }
    }

    fn render_button(&mut self, f: &mut Frame<'_>, cell: Rect, button: KeypadButton) {
        f.render_widget(
            Paragraph::new(Span::styled(button.label(), normal_style()))
                .alignment(Alignment::Center),
            cell,
        );
        self.zones.push((cell, button.action()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn shell() -> Shell {
        let mut store = Store::in_memory();
        store.set_bool(store::SOUND_ENABLED, false);
        Shell::new(store, true)
    }

    /// Drive actions through the real dispatcher with timestamps spaced past
    /// the debounce window.
    fn press_all(shell: &mut Shell, actions: &[Action]) {
        // A process-wide step counter keeps timestamps monotonic across
        // consecutive `press_all` calls; restarting from `Instant::now()`
        // each call would land inside the previous call's debounce window.
        use std::sync::atomic::{AtomicU64, Ordering};
        static STEPS: AtomicU64 = AtomicU64::new(1);
        let base = Instant::now();
        for &action in actions {
            let step = STEPS.fetch_add(1, Ordering::Relaxed);
            let now = base + Duration::from_millis(100 * step);
            shell.dispatcher.dispatch_at(action, &mut shell.phone, now);
            shell.sync_active();
        }
    }

    #[test]
    fn session_starts_on_home_with_its_handler_mounted() {
        let s = shell();
        assert_eq!(s.phone.nav.active(), registry::HOME);
        assert_eq!(s.dispatcher.top_owner(), Some(registry::HOME));
        assert_eq!(s.dispatcher.depth(), 1);
    }

    #[test]
    fn opening_an_app_swaps_the_mounted_handler() {
        let mut s = shell();
        press_all(&mut s, &[Action::Select]); // home -> menu
        assert_eq!(s.phone.nav.active(), registry::MENU);
        assert_eq!(s.dispatcher.top_owner(), Some(registry::MENU));
        assert_eq!(s.dispatcher.depth(), 1);

        press_all(&mut s, &[Action::Select]); // menu -> messages
        assert_eq!(s.phone.nav.active(), registry::MESSAGES);
        assert_eq!(s.dispatcher.top_owner(), Some(registry::MESSAGES));
        assert_eq!(s.dispatcher.depth(), 1);
    }

    #[test]
    fn back_walks_the_stack_to_home() {
        let mut s = shell();
        press_all(&mut s, &[Action::Select, Action::Select]);
        assert_eq!(s.phone.nav.active(), registry::MESSAGES);

        press_all(&mut s, &[Action::Back, Action::Back]);
        assert_eq!(s.phone.nav.active(), registry::HOME);
        assert_eq!(s.dispatcher.top_owner(), Some(registry::HOME));
    }

    #[test]
    fn end_key_hangs_up_to_home_from_anywhere() {
        let mut s = shell();
        press_all(&mut s, &[Action::Select, Action::Select]); // home -> menu -> messages
        assert_eq!(s.phone.nav.active(), registry::MESSAGES);

        press_all(&mut s, &[Action::End]);
        assert_eq!(s.phone.nav.active(), registry::HOME);
        assert!(s.phone.nav.stack().is_empty());
        assert_eq!(s.dispatcher.top_owner(), Some(registry::HOME));
    }

    #[test]
    fn the_active_app_is_persisted_on_every_switch() {
        let mut s = shell();
        press_all(&mut s, &[Action::SoftRight]); // home -> contacts
        assert_eq!(
            s.phone.store.get_string(store::LAST_ACTIVE_APP, ""),
            "contacts"
        );
    }

    #[test]
    fn the_last_active_app_is_restored_at_startup() {
        let mut store = Store::in_memory();
        store.set_bool(store::SOUND_ENABLED, false);
        store.set_string(store::LAST_ACTIVE_APP, "settings");

        let s = Shell::new(store, true);
        assert_eq!(s.phone.nav.active(), registry::SETTINGS);
        assert_eq!(s.dispatcher.top_owner(), Some(registry::SETTINGS));
        // back still leads home
        assert_eq!(s.phone.nav.stack(), &[registry::HOME]);
    }

    #[test]
    fn an_unknown_persisted_app_falls_back_to_home() {
        let mut store = Store::in_memory();
        store.set_bool(store::SOUND_ENABLED, false);
        store.set_string(store::LAST_ACTIVE_APP, "calculator");

        let s = Shell::new(store, true);
        assert_eq!(s.phone.nav.active(), registry::HOME);
    }

    #[test]
    fn ctrl_q_ends_the_session() {
        let mut s = shell();
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(!s.on_key(&quit));

        let plain = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(s.on_key(&plain));
    }

    #[test]
    fn bounced_keys_do_not_navigate() {
        let mut s = shell();
        let t0 = Instant::now();
        s.dispatcher.dispatch_at(Action::Select, &mut s.phone, t0);
        s.sync_active();
        assert_eq!(s.phone.nav.active(), registry::MENU);

        // inside the debounce window, discarded
        s.dispatcher
            .dispatch_at(Action::Select, &mut s.phone, t0 + Duration::from_millis(10));
        s.sync_active();
        assert_eq!(s.phone.nav.active(), registry::MENU);
    }
}
