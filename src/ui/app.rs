use crate::ai::{Agent, RandomAgent};
use crate::config::AppConfig;
use crate::error::BoardError;
use crate::game::Player;
#[cfg(test)]
use crate::game::Cell;
use crate::training::Episode;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Human against the random agent on a single episode.
pub struct App {
    episode: Episode,
    agent: RandomAgent,
    human: Player,
    cursor: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, BoardError> {
        let mut episode = Episode::from_config(config)?;
        episode.set_collecting(false);
        let agent = match config.episode.seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        };
        let mut app = App {
            cursor: center(episode.rows(), episode.columns()),
            episode,
            agent,
            human: Player::Blue,
            should_quit: false,
            message: None,
        };
        app.agent_turn();
        Ok(app)
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    pub fn human(&self) -> Player {
        self.human
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        let columns = self.episode.columns();
        let (row, column) = (self.cursor / columns, self.cursor % columns);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left if column > 0 => self.cursor -= 1,
            KeyCode::Right if column + 1 < columns => self.cursor += 1,
            KeyCode::Up if row > 0 => self.cursor -= columns,
            KeyCode::Down if row + 1 < self.episode.rows() => self.cursor += columns,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place_stone();
            }
            KeyCode::Char('r') => {
                self.restart();
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char('s') => {
                self.human = self.human.other();
                self.restart();
                self.message = Some(format!("You now play {}.", self.human.name()));
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.episode.reset();
        self.cursor = center(self.episode.rows(), self.episode.columns());
        self.agent_turn();
    }

    /// Place the human's stone under the cursor, then let the agent reply.
    fn place_stone(&mut self) {
        if self.episode.is_done() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        if !self.episode.attempt(self.cursor) {
            self.message = Some("Cell is occupied!".to_string());
            return;
        }

        self.announce_result();
        self.agent_turn();
    }

    /// Let the agent move while it is the agent's turn.
    fn agent_turn(&mut self) {
        while !self.episode.is_done() && self.episode.current_player() != self.human {
            let observation = self.episode.observe();
            let legal = self.episode.legal_actions();
            let action = self.agent.select_action(&observation, &legal, false);
            if let Err(e) = self.episode.step(action) {
                self.message = Some(format!("Agent error: {}", e));
                return;
            }
            self.announce_result();
        }
    }

    fn announce_result(&mut self) {
        if let Some(player) = self.episode.winner() {
            self.message = Some(if player == self.human {
                format!("{} wins! Well played.", player.name())
            } else {
                format!("{} wins!", player.name())
            });
        } else if self.episode.is_draw() {
            self.message = Some("Board full without a winner.".to_string());
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.episode,
            self.human,
            self.cursor,
            &self.message,
            self.agent.name(),
        );
    }

    #[cfg(test)]
    fn cell_under_cursor(&self) -> Option<Cell> {
        self.episode.game().board().cell(self.cursor)
    }
}

/// Location of the middle cell.
fn center(rows: usize, columns: usize) -> usize {
    (rows / 2) * columns + columns / 2
}
