use anyhow::Result;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{select_next, select_prev, AppModule, Ctx};
use crate::data::{self, Message};
use crate::dispatch::{Dispatcher, HandlerId};
use crate::input::Action;
use crate::nav::Navigator;
use crate::registry::{self, AppId};
use crate::ui::{dim_style, normal_style, pad_horizontal, selection_line, title_style};

const OPTIONS: &[&str] = &["Reply", "Delete", "Back"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Inbox,
    Detail,
    Options,
}

/// Inbox with a read view and an options sub-screen. Deleting removes the
/// message for the session; replying needs a radio stack we don't have.
pub struct MessagesApp {
    messages: Vec<Message>,
    screen: Screen,
    selected: usize,
    options_idx: usize,
    handler: Option<HandlerId>,
}

impl MessagesApp {
    pub fn new() -> Self {
        Self {
            messages: data::MESSAGES.to_vec(),
            screen: Screen::Inbox,
            selected: 0,
            options_idx: 0,
            handler: None,
        }
    }

    fn sync_softkeys(&self, nav: &mut Navigator) {
        match self.screen {
            Screen::Inbox => nav.set_softkeys(Some("Options"), Some("Back")),
            Screen::Detail => nav.set_softkeys(None, Some("Back")),
            Screen::Options => nav.set_softkeys(Some("Select"), Some("Back")),
        }
    }

    fn enter(&mut self, screen: Screen, nav: &mut Navigator) {
        self.screen = screen;
        self.sync_softkeys(nav);
    }

    fn delete_selected(&mut self) {
        if self.selected < self.messages.len() {
            self.messages.remove(self.selected);
            if self.selected >= self.messages.len() && self.selected > 0 {
                self.selected -= 1;
            }
        }
    }
}

impl AppModule for MessagesApp {
    fn id(&self) -> AppId {
        registry::MESSAGES
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, ctx: &mut Ctx<'_>) {
        self.handler = Some(dispatcher.register(self.id()));
        self.screen = Screen::Inbox;
        self.sync_softkeys(ctx.nav);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher) {
        if let Some(h) = self.handler.take() {
            dispatcher.unregister(h);
        }
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) -> Result<()> {
        match self.screen {
            Screen::Inbox => match action {
                Action::Up => self.selected = select_prev(self.selected, self.messages.len()),
                Action::Down => self.selected = select_next(self.selected, self.messages.len()),
                Action::Select => {
                    if self.selected < self.messages.len() {
                        self.enter(Screen::Detail, ctx.nav);
                    }
                }
                Action::SoftLeft => {
                    if self.selected < self.messages.len() {
                        self.options_idx = 0;
                        self.enter(Screen::Options, ctx.nav);
                    }
                }
                Action::SoftRight | Action::Back => ctx.nav.go_back(),
                _ => {}
            },
            Screen::Detail => match action {
                Action::SoftRight | Action::Back => self.enter(Screen::Inbox, ctx.nav),
                _ => {}
            },
            Screen::Options => match action {
                Action::Up => self.options_idx = select_prev(self.options_idx, OPTIONS.len()),
                Action::Down => self.options_idx = select_next(self.options_idx, OPTIONS.len()),
                Action::Select | Action::SoftLeft => {
                    match OPTIONS[self.options_idx] {
                        "Delete" => self.delete_selected(),
                        // "Reply" has nothing to send through
                        _ => {}
                    }
                    self.enter(Screen::Inbox, ctx.nav);
                }
                Action::SoftRight | Action::Back => self.enter(Screen::Inbox, ctx.nav),
                _ => {}
            },
        }
        Ok(())
    }

    fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let inner = pad_horizontal(area);
        match self.screen {
            Screen::Inbox => {
                let mut lines = vec![Line::styled("Messages", title_style())];
                if self.messages.is_empty() {
                    lines.push(Line::styled("No messages", dim_style()));
                }
                for (idx, msg) in self.messages.iter().enumerate() {
                    lines.push(selection_line(msg.sender, idx == self.selected));
                    lines.push(Line::styled(format!("    {}", msg.preview), dim_style()));
                }
                f.render_widget(Paragraph::new(lines), inner);
            }
            Screen::Detail => {
                let msg = &self.messages[self.selected];
                let lines = vec![
                    Line::styled(msg.sender, title_style()),
                    Line::styled(msg.timestamp, dim_style()),
                    Line::raw(""),
                    Line::styled(msg.content, normal_style()),
                ];
                f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
            }
            Screen::Options => {
                let mut lines = vec![Line::styled("Options", title_style())];
                for (idx, item) in OPTIONS.iter().enumerate() {
                    lines.push(selection_line(item, idx == self.options_idx));
                }
                f.render_widget(Paragraph::new(lines), inner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn drive(app: &mut MessagesApp, nav: &mut Navigator, store: &mut Store, action: Action) {
        app.handle(action, &mut Ctx { nav, store }).unwrap();
    }

    #[test]
    fn select_opens_the_detail_screen() {
        let mut app = MessagesApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();

        drive(&mut app, &mut nav, &mut store, Action::Select);
        assert_eq!(app.screen, Screen::Detail);
        drive(&mut app, &mut nav, &mut store, Action::Back);
        assert_eq!(app.screen, Screen::Inbox);
    }

    #[test]
    fn delete_removes_the_selected_message() {
        let mut app = MessagesApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();
        let initial = app.messages.len();

        drive(&mut app, &mut nav, &mut store, Action::SoftLeft);
        assert_eq!(app.screen, Screen::Options);
        drive(&mut app, &mut nav, &mut store, Action::Down); // Delete
        drive(&mut app, &mut nav, &mut store, Action::Select);

        assert_eq!(app.screen, Screen::Inbox);
        assert_eq!(app.messages.len(), initial - 1);
        assert!(app.messages.iter().all(|m| m.sender != "Mom"));
    }

    #[test]
    fn deleting_the_last_message_clamps_the_cursor() {
        let mut app = MessagesApp::new();
        app.messages.truncate(2);
        app.selected = 1;
        app.delete_selected();
        assert_eq!(app.selected, 0);
        app.delete_selected();
        assert!(app.messages.is_empty());
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn options_on_an_empty_inbox_is_ignored() {
        let mut app = MessagesApp::new();
        let mut nav = Navigator::new();
        let mut store = Store::in_memory();
        app.messages.clear();

        drive(&mut app, &mut nav, &mut store, Action::SoftLeft);
        assert_eq!(app.screen, Screen::Inbox);
        drive(&mut app, &mut nav, &mut store, Action::Select);
        assert_eq!(app.screen, Screen::Inbox);
    }

    #[test]
    fn softkeys_follow_the_screen() {
        let mut app = MessagesApp::new();
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
        assert_eq!(nav.softkeys().left.as_deref(), Some("Options"));

        drive(&mut app, &mut nav, &mut store, Action::Select);
        assert_eq!(nav.softkeys().left, None);
        assert_eq!(nav.softkeys().right.as_deref(), Some("Back"));
    }
}
