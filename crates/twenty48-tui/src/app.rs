use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use twenty48_engine::engine::{Game, Move};

use crate::render::{Overlay, Renderer};

pub struct App {
    game: Game,
    renderer: Renderer,
}

impl App {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            renderer: Renderer::new(),
        }
    }

    /// Blocking event loop; returns once the player quits.
    pub fn run(mut self) -> Result<()> {
        self.renderer.init()?;
        self.renderer.draw(self.game.board(), &Overlay::Help)?;

        'game: loop {
            let key = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key,
                _ => continue,
            };
            if is_quit(&key) {
                break;
            }

            let mut overlay = Overlay::None;
            let mut game_over = false;
            if let Some(direction) = move_for_key(key.code) {
                let result = self.game.step(direction);
                debug!(
                    "direction" = ?direction,
                    "changed" = result.changed,
                    "delta" = result.delta
                );
                game_over = result.game_over;
            } else if is_undo_key(key.code) {
                match self.game.undo() {
                    Ok(()) => debug!("undone to score" = self.game.score()),
                    Err(err) => debug!("undo rejected" = %err),
                }
            } else if let KeyCode::Char(other) = key.code {
                overlay = Overlay::UnknownKey(other);
            }

            if game_over {
                info!("final score" = self.game.score());
                let can_undo = self.game.undos_left() > 0 && self.game.history_len() > 1;
                self.renderer
                    .draw(self.game.board(), &Overlay::GameOver { can_undo })?;
                loop {
                    let key = match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => key,
                        _ => continue,
                    };
                    if is_quit(&key) {
                        break 'game;
                    }
                    if can_undo && is_undo_key(key.code) {
                        self.game.undo()?;
                        self.renderer.draw(self.game.board(), &Overlay::None)?;
                        continue 'game;
                    }
                }
            }

            self.renderer.draw(self.game.board(), &overlay)?;
        }

        self.renderer.restore()?;
        Ok(())
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn move_for_key(code: KeyCode) -> Option<Move> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Move::Left),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Move::Down),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Move::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Move::Right),
        _ => None,
    }
}

fn is_undo_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char('u') | KeyCode::Char('z') | KeyCode::Char(' ')
    )
}
