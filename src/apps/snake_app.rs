use std::time::Instant;

use anyhow::Result;
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppModule, Ctx};
use crate::dispatch::{Dispatcher, HandlerId};
use crate::input::Action;
use crate::nav::Navigator;
use crate::registry::{self, AppId};
use crate::snake::{Direction, GameStatus, Pos, SnakeGame, TICK};
use crate::sound::{self, Tone};
use crate::store::{self, Store};
use crate::ui::{dim_style, normal_style, title_style};

/// Snake wrapped as a phone app: maps keys to direction changes, drives the
/// fixed-rate tick while the game is playing, and persists the high score.
pub struct SnakeApp {
    game: SnakeGame,
    high_score: u32,
    /// Deadline of the next simulation step. `None` while paused, on game
    /// over, or when the app is not active.
    next_tick: Option<Instant>,
    handler: Option<HandlerId>,
}

impl SnakeApp {
    pub fn new() -> Self {
        Self {
            game: SnakeGame::new(&mut rand::thread_rng()),
            high_score: 0,
            next_tick: None,
            handler: None,
        }
    }

    fn sync_softkeys(&self, nav: &mut Navigator) {
        let left = match self.game.status() {
            GameStatus::Playing => "Pause",
            GameStatus::Paused => "Resume",
            GameStatus::GameOver => "Retry",
        };
        nav.set_softkeys(Some(left), Some("Exit"));
    }

    fn direction_for(action: Action) -> Option<Direction> {
        match action {
            Action::Up | Action::Digit(2) => Some(Direction::Up),
            Action::Down | Action::Digit(8) => Some(Direction::Down),
            Action::Left | Action::Digit(4) => Some(Direction::Left),
            Action::Right | Action::Digit(6) => Some(Direction::Right),
            _ => None,
        }
    }

    fn advance(&mut self, rng: &mut impl Rng, ctx: &mut Ctx<'_>) {
        self.game.step(rng);
        if self.game.status() == GameStatus::GameOver {
            self.next_tick = None;
            self.high_score = persist_high_score(ctx.store, self.game.score());
            if ctx.store.get_bool(store::SOUND_ENABLED, true) {
                sound::play(Tone::GameOver);
            }
            self.sync_softkeys(ctx.nav);
        }
    }
}

impl AppModule for SnakeApp {
    fn id(&self) -> AppId {
        registry::SNAKE
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, ctx: &mut Ctx<'_>) {
        self.handler = Some(dispatcher.register(self.id()));
        self.game.reset(&mut rand::thread_rng());
        self.high_score = ctx.store.get_u32(store::HIGH_SCORE, 0);
        self.next_tick = Some(Instant::now() + TICK);
        self.sync_softkeys(ctx.nav);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher) {
        self.next_tick = None;
        if let Some(h) = self.handler.take() {
            dispatcher.unregister(h);
        }
    }

    fn handle(&mut self, action: Action, ctx: &mut Ctx<'_>) -> Result<()> {
        if let Some(dir) = Self::direction_for(action) {
            self.game.change_direction(dir);
            return Ok(());
        }
        match action {
            Action::Select | Action::SoftLeft => {
                match self.game.status() {
                    GameStatus::GameOver => {
                        self.game.reset(&mut rand::thread_rng());
                        self.next_tick = Some(Instant::now() + TICK);
                    }
                    _ => {
                        self.game.toggle_pause();
                        self.next_tick = match self.game.status() {
                            GameStatus::Playing => Some(Instant::now() + TICK),
                            _ => None,
                        };
                    }
                }
                self.sync_softkeys(ctx.nav);
            }
            Action::SoftRight | Action::Back => ctx.nav.go_back(),
            _ => {}
        }
        Ok(())
    }

    fn tick(&mut self, now: Instant, ctx: &mut Ctx<'_>) {
        while let Some(deadline) = self.next_tick {
            if now < deadline {
                break;
            }
            self.next_tick = Some(deadline + TICK);
            self.advance(&mut rand::thread_rng(), ctx);
        }
    }

    fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(self.game.height() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(area);

        let header = Line::from(vec![
            Span::styled(format!(" Score: {}", self.game.score()), title_style()),
            Span::styled(format!("   Best: {}", self.high_score), dim_style()),
        ]);
        f.render_widget(Paragraph::new(header), chunks[0]);

        if self.game.status() == GameStatus::GameOver {
            let lines = vec![
                Line::raw(""),
                Line::styled("GAME OVER", title_style()),
                Line::raw(""),
                Line::styled(format!("Score: {}", self.game.score()), normal_style()),
                Line::styled(format!("High Score: {}", self.high_score), normal_style()),
            ];
            f.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL)),
                chunks[1],
            );
            return;
        }

        let mut rows: Vec<Line> = Vec::with_capacity(self.game.height() as usize);
        for y in 0..self.game.height() {
            let mut row = String::with_capacity(self.game.width() as usize);
            for x in 0..self.game.width() {
                let p = Pos { x, y };
                if self.game.occupies(p) {
                    row.push('█');
                } else if p == self.game.food() {
                    row.push('▒');
                } else {
                    row.push(' ');
                }
            }
            rows.push(Line::styled(row, normal_style()));
        }
        let title = if self.game.status() == GameStatus::Paused {
            " PAUSED "
        } else {
            ""
        };
        f.render_widget(
            Paragraph::new(rows).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title, title_style())),
            ),
            chunks[1],
        );
    }
}

/// Write the score through as the new high score when it beats the stored
/// one. Returns the high score in effect afterwards.
fn persist_high_score(store: &mut Store, score: u32) -> u32 {
    let best = store.get_u32(store::HIGH_SCORE, 0);
    if score > best {
        store.set_u32(store::HIGH_SCORE, score);
        score
    } else {
        best
    }
}
