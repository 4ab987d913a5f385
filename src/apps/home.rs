use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{AppModule, Ctx};
use crate::dispatch::{Dispatcher, HandlerId};
use crate::input::Action;
use crate::registry::{self, AppId};
use crate::ui::{normal_style, title_style};

const BRAND: &[&str] = &[
    "█▄▄ █▀█ █ █▀▀ █▄▀",
    "█▄█ █▀▄ █ █▄▄ █ █",
];

/// Idle screen. Any navigation key opens the menu; the right softkey jumps
/// straight to the contact book.
pub struct HomeApp {
    handler: Option<HandlerId>,
}

impl HomeApp {
    pub fn new() -> Self {
        Self { handler: None }
    }
}

impl AppModule for HomeApp {
    fn id(&self) -> AppId {
        registry::HOME
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, ctx: &mut Ctx<'_>) {
        self.handler = Some(dispatcher.register(self.id()));
        ctx.nav.set_softkeys(Some("Menu"), Some("Names"));
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher) {
        if let Some(h) = self.handler.take() {
            dispatcher.unregister(h);
        }
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) -> Result<()> {
        match action {
            Action::SoftLeft
            | Action::Select
            | Action::Up
            | Action::Down
            | Action::Left
            | Action::Right => ctx.nav.open_app(registry::MENU),
            Action::SoftRight => ctx.nav.open_app(registry::CONTACTS),
            _ => {}
        }
        Ok(())
    }

    fn tick(&mut self, _now: Instant, _ctx: &mut Ctx<'_>) {}

    fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(BRAND.len() as u16),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(area);

        let brand: Vec<Line> = BRAND
            .iter()
            .map(|l| Line::from(Span::styled(*l, title_style())))
            .collect();
        f.render_widget(
            Paragraph::new(brand).alignment(Alignment::Center),
            chunks[1],
        );

        let date = Local::now().format("%a %-d %b").to_string();
        f.render_widget(
            Paragraph::new(Span::styled(date, normal_style())).alignment(Alignment::Center),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Navigator;
    use crate::store::Store;

    fn ctx<'a>(nav: &'a mut Navigator, store: &'a mut Store) -> Ctx<'a> {
        Ctx { nav, store }
    }

    #[test]
    fn any_navigation_key_opens_the_menu() {
        for action in [
            Action::Up,
            Action::Down,
            Action::Left,
            Action::Right,
            Action::Select,
            Action::SoftLeft,
        ] {
            let mut nav = Navigator::new();
            let mut store = Store::in_memory();
            let mut home = HomeApp::new();
            home.handle(action, &mut ctx(&mut nav, &mut store)).unwrap();
            assert_eq!(nav.active(), registry::MENU);
        }
    }

    #[test]
    fn right_softkey_opens_contacts() {
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();
        let mut home = HomeApp::new();
        home.handle(Action::SoftRight, &mut ctx(&mut nav, &mut store))
            .unwrap();
        assert_eq!(nav.active(), registry::CONTACTS);
    }

    #[test]
    fn digits_are_ignored_on_the_idle_screen() {
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();
        let mut home = HomeApp::new();
        home.handle(Action::Digit(5), &mut ctx(&mut nav, &mut store))
            .unwrap();
        assert_eq!(nav.active(), registry::HOME);
    }
}
