use anyhow::Result;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

use super::{select_next, select_prev, AppModule, Ctx};
use crate::data::{self, Contact};
use crate::dispatch::{Dispatcher, HandlerId};
use crate::input::Action;
use crate::nav::Navigator;
use crate::registry::{self, AppId};
use crate::ui::{normal_style, pad_horizontal, selection_line, title_style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    List,
    Detail,
}

/// Contact book: a list screen and a per-contact detail screen.
pub struct ContactsApp {
    contacts: &'static [Contact],
    screen: Screen,
    selected: usize,
    handler: Option<HandlerId>,
}

impl ContactsApp {
    pub fn new() -> Self {
        Self {
            contacts: data::CONTACTS,
            screen: Screen::List,
            selected: 0,
            handler: None,
        }
    }

    fn sync_softkeys(&self, nav: &mut Navigator) {
        match self.screen {
            Screen::List => nav.set_softkeys(Some("View"), Some("Back")),
            Screen::Detail => nav.set_softkeys(None, Some("Back")),
        }
    }
}

impl AppModule for ContactsApp {
    fn id(&self) -> AppId {
        registry::CONTACTS
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, ctx: &mut Ctx<'_>) {
        self.handler = Some(dispatcher.register(self.id()));
        self.screen = Screen::List;
        self.sync_softkeys(ctx.nav);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher) {
        if let Some(h) = self.handler.take() {
            dispatcher.unregister(h);
        }
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) -> Result<()> {
        match self.screen {
            Screen::List => match action {
                Action::Up => self.selected = select_prev(self.selected, self.contacts.len()),
                Action::Down => self.selected = select_next(self.selected, self.contacts.len()),
                Action::Select | Action::SoftLeft => {
                    if self.selected < self.contacts.len() {
                        self.screen = Screen::Detail;
                        self.sync_softkeys(ctx.nav);
                    }
                }
                Action::SoftRight | Action::Back => ctx.nav.go_back(),
                _ => {}
            },
            Screen::Detail => match action {
                Action::SoftRight | Action::Back => {
                    self.screen = Screen::List;
                    self.sync_softkeys(ctx.nav);
                }
                _ => {}
            },
        }
        Ok(())
    }

    fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let inner = pad_horizontal(area);
        let lines = match self.screen {
            Screen::List => {
                let mut lines = vec![Line::styled("Contacts", title_style())];
                for (idx, contact) in self.contacts.iter().enumerate() {
                    lines.push(selection_line(contact.name, idx == self.selected));
                }
                lines
            }
            Screen::Detail => {
                let contact = &self.contacts[self.selected];
                vec![
                    Line::styled(contact.name, title_style()),
                    Line::raw(""),
                    Line::styled("Phone:", title_style()),
                    Line::styled(format!("  {}", contact.phone), normal_style()),
                ]
            }
        };
        f.render_widget(Paragraph::new(lines), inner);
    }
}
