use anyhow::Result;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

use super::{select_next, select_prev, AppModule, Ctx};
use crate::dispatch::{Dispatcher, HandlerId};
use crate::input::Action;
use crate::nav::Navigator;
use crate::registry::{self, AppId};
use crate::store;
use crate::ui::{normal_style, pad_horizontal, selection_line, title_style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Ringtones,
    Display,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Ringtones,
    Sound,
    Display,
    About,
}

const ITEMS: &[Item] = &[Item::Ringtones, Item::Sound, Item::Display, Item::About];

/// Settings menu plus three static sub-screens. The sound toggle is the one
/// entry that writes through to the store.
pub struct SettingsApp {
    screen: Screen,
    selected: usize,
    // mirrors the stored flag so render() does not need the store
    sound_on: bool,
    handler: Option<HandlerId>,
}

impl SettingsApp {
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu,
            selected: 0,
            sound_on: true,
            handler: None,
        }
    }

    fn sync_softkeys(&self, nav: &mut Navigator) {
        match self.screen {
            Screen::Menu => nav.set_softkeys(Some("Change"), Some("Back")),
            _ => nav.set_softkeys(None, Some("Back")),
        }
    }

    fn item_label(&self, item: Item) -> String {
        match item {
            Item::Ringtones => "Ringtones".to_string(),
            Item::Sound => format!("Sound: {}", if self.sound_on { "ON" } else { "OFF" }),
            Item::Display => "Display".to_string(),
            Item::About => "About Phone".to_string(),
        }
    }
}

impl AppModule for SettingsApp {
    fn id(&self) -> AppId {
        registry::SETTINGS
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, ctx: &mut Ctx<'_>) {
        self.handler = Some(dispatcher.register(self.id()));
        self.screen = Screen::Menu;
        self.sound_on = ctx.store.get_bool(store::SOUND_ENABLED, true);
        self.sync_softkeys(ctx.nav);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher) {
        if let Some(h) = self.handler.take() {
            dispatcher.unregister(h);
        }
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) -> Result<()> {
        match self.screen {
            Screen::Menu => match action {
                Action::Up => self.selected = select_prev(self.selected, ITEMS.len()),
                Action::Down => self.selected = select_next(self.selected, ITEMS.len()),
                Action::Select | Action::SoftLeft => match ITEMS[self.selected] {
                    Item::Sound => {
                        let on = ctx.store.get_bool(store::SOUND_ENABLED, true);
                        ctx.store.set_bool(store::SOUND_ENABLED, !on);
                        self.sound_on = !on;
                    }
                    Item::Ringtones => {
                        self.screen = Screen::Ringtones;
                        self.sync_softkeys(ctx.nav);
                    }
                    Item::Display => {
                        self.screen = Screen::Display;
                        self.sync_softkeys(ctx.nav);
                    }
                    Item::About => {
                        self.screen = Screen::About;
                        self.sync_softkeys(ctx.nav);
                    }
                },
                Action::SoftRight | Action::Back => ctx.nav.go_back(),
                _ => {}
            },
            _ => match action {
                Action::SoftRight | Action::Back => {
                    self.screen = Screen::Menu;
                    self.sync_softkeys(ctx.nav);
                }
                _ => {}
            },
        }
        Ok(())
    }

    fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let inner = pad_horizontal(area);
        let lines: Vec<Line> = match self.screen {
            Screen::Menu => {
                let mut lines = vec![Line::styled("Settings", title_style())];
                for (idx, item) in ITEMS.iter().enumerate() {
                    lines.push(selection_line(&self.item_label(*item), idx == self.selected));
                }
                lines
            }
            Screen::Ringtones => vec![
                Line::styled("Ringtones", title_style()),
                Line::styled("  Classic Tune", normal_style()),
                Line::styled("  Ascending", normal_style()),
                Line::styled("  Badinerie", normal_style()),
                Line::styled("  Grande Valse", normal_style()),
            ],
            Screen::Display => vec![
                Line::styled("Display", title_style()),
                Line::styled("  Contrast: Normal", normal_style()),
                Line::styled("  Backlight: 15 sec", normal_style()),
            ],
            Screen::About => vec![
                Line::styled("About Phone", title_style()),
                Line::styled("  Model: Brick 3310", normal_style()),
                Line::styled(
                    format!("  Version: {}", env!("CARGO_PKG_VERSION")),
                    normal_style(),
                ),
                Line::styled("  Terminal Emulator", normal_style()),
            ],
        };
        f.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn drive(app: &mut SettingsApp, nav: &mut Navigator, store: &mut Store, action: Action) {
        app.handle(action, &mut Ctx { nav, store }).unwrap();
    }

    fn move_to(app: &mut SettingsApp, nav: &mut Navigator, store: &mut Store, item: Item) {
        while ITEMS[app.selected] != item {
            drive(app, nav, store, Action::Down);
        }
    }

    #[test]
    fn toggling_sound_writes_through_the_store() {
        let mut app = SettingsApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();

        move_to(&mut app, &mut nav, &mut store, Item::Sound);
        drive(&mut app, &mut nav, &mut store, Action::Select);
        assert!(!store.get_bool(store::SOUND_ENABLED, true));

        drive(&mut app, &mut nav, &mut store, Action::Select);
        assert!(store.get_bool(store::SOUND_ENABLED, false));
    }

    #[test]
    fn toggling_sound_stays_on_the_menu_screen() {
        let mut app = SettingsApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();

        move_to(&mut app, &mut nav, &mut store, Item::Sound);
        drive(&mut app, &mut nav, &mut store, Action::SoftLeft);
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn sub_screens_drop_the_left_softkey() {
        let mut app = SettingsApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();
        let mut dispatcher = Dispatcher::new();

        app.activate(
            &mut dispatcher,
            &mut Ctx {
                nav: &mut nav,
                store: &mut store,
            },
        );
        assert_eq!(nav.softkeys().left.as_deref(), Some("Change"));

        drive(&mut app, &mut nav, &mut store, Action::Select); // Ringtones
        assert_eq!(app.screen, Screen::Ringtones);
        assert_eq!(nav.softkeys().left, None);

        drive(&mut app, &mut nav, &mut store, Action::Back);
        assert_eq!(app.screen, Screen::Menu);
        assert_eq!(nav.softkeys().left.as_deref(), Some("Change"));
    }

    #[test]
    fn back_at_the_root_menu_leaves_the_app() {
        let mut app = SettingsApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();
        nav.open_app(registry::SETTINGS);

        drive(&mut app, &mut nav, &mut store, Action::SoftRight);
        assert_eq!(nav.active(), registry::HOME);
    }

    #[test]
    fn sound_label_follows_the_toggle() {
        let mut app = SettingsApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();

        assert_eq!(app.item_label(Item::Sound), "Sound: ON");
        move_to(&mut app, &mut nav, &mut store, Item::Sound);
        drive(&mut app, &mut nav, &mut store, Action::Select);
        assert_eq!(app.item_label(Item::Sound), "Sound: OFF");
    }
}
