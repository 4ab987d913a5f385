use anyhow::Result;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{select_next, select_prev, AppModule, Ctx};
use crate::dispatch::{Dispatcher, HandlerId};
use crate::input::Action;
use crate::registry::{self, AppDefinition, AppId};
use crate::ui::{pad_horizontal, selection_line, title_style};

/// Main menu: the launchable apps in registry order.
pub struct MenuApp {
    apps: Vec<&'static AppDefinition>,
    selected: usize,
    handler: Option<HandlerId>,
}

impl MenuApp {
    pub fn new() -> Self {
        Self {
            apps: registry::launchable_apps().collect(),
            selected: 0,
            handler: None,
        }
    }

    #[cfg(test)]
    fn selected(&self) -> usize {
        self.selected
    }
}

impl AppModule for MenuApp {
    fn id(&self) -> AppId {
        registry::MENU
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, ctx: &mut Ctx<'_>) {
        self.handler = Some(dispatcher.register(self.id()));
        ctx.nav.set_softkeys(Some("Select"), Some("Back"));
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher) {
        if let Some(h) = self.handler.take() {
            dispatcher.unregister(h);
        }
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) -> Result<()> {
        match action {
            Action::Up => self.selected = select_prev(self.selected, self.apps.len()),
            Action::Down => self.selected = select_next(self.selected, self.apps.len()),
            Action::Select | Action::SoftLeft => {
                if let Some(app) = self.apps.get(self.selected) {
                    ctx.nav.open_app(app.id);
                }
            }
            Action::SoftRight | Action::Back => ctx.nav.go_back(),
            _ => {}
        }
        Ok(())
    }

    fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let inner = pad_horizontal(area);
        let mut lines = vec![Line::styled("Menu", title_style()), Line::raw("")];
        for (idx, app) in self.apps.iter().enumerate() {
            let label = match app.icon {
                Some(icon) => format!("{icon} {}", app.name),
                None => app.name.to_string(),
            };
            lines.push(selection_line(&label, idx == self.selected));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Navigator;
    use crate::registry::{MESSAGES, SETTINGS};
    use crate::store::Store;

    fn drive(menu: &mut MenuApp, nav: &mut Navigator, store: &mut Store, action: Action) {
        menu.handle(action, &mut Ctx { nav, store }).unwrap();
    }

    #[test]
    fn selection_wraps_around_both_ends() {
        let mut menu = MenuApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();
        let len = registry::launchable_apps().count();

        drive(&mut menu, &mut nav, &mut store, Action::Up);
        assert_eq!(menu.selected(), len - 1);
        drive(&mut menu, &mut nav, &mut store, Action::Down);
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn select_opens_the_highlighted_app() {
        let mut menu = MenuApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();

        drive(&mut menu, &mut nav, &mut store, Action::Select);
        assert_eq!(nav.active(), MESSAGES);
    }

    #[test]
    fn soft_left_also_commits_the_selection() {
        let mut menu = MenuApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();

        drive(&mut menu, &mut nav, &mut store, Action::Up);
        drive(&mut menu, &mut nav, &mut store, Action::SoftLeft);
        assert_eq!(nav.active(), SETTINGS);
    }

    #[test]
    fn back_returns_to_the_previous_app() {
        let mut menu = MenuApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();
        nav.open_app(registry::MENU);

        drive(&mut menu, &mut nav, &mut store, Action::SoftRight);
        assert_eq!(nav.active(), registry::HOME);
    }
}
