use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::{bail, Result};
use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use crossterm::style::Color;
use log::info;
use rand::rngs::ThreadRng;

use snake::{Coords, GameState, GameStatus, Modes, MoveResult, Direction::{*, self}};

use crate::palette::{Palette, DEAD_COLOR, HEAD_COLOR};
use crate::term::{TermCoords, TermInt, TermManager};

const POLL_INTERVAL_MS: u64 = 5;

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// Whether the player wants another round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    PlayAgain,
    Quit,
}

/// Terminal front end: reads keys, runs the tick clock and draws the engine's snapshot.
pub struct SnakeGame {
    state: GameState,
    term: TermManager,
    palette: Palette,
    rng: ThreadRng,
    apple_color: Color,
    segment_colors: Vec<Color>,
    origin: TermCoords,
    paused: bool,
    started: bool,
}

impl SnakeGame {
    pub fn new(state: GameState) -> Result<Self> {
        let term = TermManager::new()?;

        let (board_w, board_h) = board_size(&state);
        let (term_w, term_h) = term.get_terminal_size();
        if board_w > term_w || board_h > term_h {
            bail!(
                "terminal is {}x{} but a {}x{} grid needs {}x{}",
                term_w, term_h, state.grid().width(), state.grid().height(), board_w, board_h
            );
        }
        let origin = ((term_w - board_w) / 2, (term_h - board_h) / 2);

        let palette = Palette::new();
        let mut rng = rand::thread_rng();
        let apple_color = palette.pick(&mut rng);

        Ok(SnakeGame {
            state,
            term,
            palette,
            rng,
            apple_color,
            segment_colors: vec![],
            origin,
            paused: false,
            started: false,
        })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    pub fn show_intro(&mut self) -> Result<Flow> {
        let mode = mode_line(self.state.modes());
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C or Q to quit",
            "",
            &*mode,
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        if is_quit(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::PlayAgain)
    }

    /// Plays one round and asks whether to play another.
    pub fn play(&mut self) -> Result<Flow> {
        if !self.state.status().is_running() {
            self.state.reset();
        }
        self.new_round();

        self.term.hide_message()?;
        self.term.clear()?;
        let (board_w, board_h) = board_size(&self.state);
        self.term.draw_borders(self.origin, (board_w, board_h - 1))?;
        self.render()?;

        let mut last_step = Instant::now();

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match &key_ev {
                    ev if is_quit(ev) => return Ok(Flow::Quit),
                    KeyEvent { code, .. } => match code {
                        KeyCode::Char('w') | KeyCode::Up => self.steer(Up),
                        KeyCode::Char('a') | KeyCode::Left => self.steer(Left),
                        KeyCode::Char('s') | KeyCode::Down => self.steer(Down),
                        KeyCode::Char('d') | KeyCode::Right => self.steer(Right),
                        KeyCode::Esc => self.toggle_pause()?,
                        _ => {}
                    }
                }
            }

            // The snake waits for the first direction key
            if self.paused || !self.started { continue; }

            if last_step.elapsed() < self.state.modes().tick_interval(self.state.score()) {
                continue;
            }
            last_step = Instant::now();

            if let MoveResult::Moved { old_tail: None, .. } = self.state.tick() {
                self.segment_colors.push(self.apple_color);
                self.apple_color = self.palette.pick(&mut self.rng);
            }
            self.render()?;

            if !self.state.status().is_running() {
                self.game_over()?;
                break;
            }
        }

        if is_quit(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }
        Ok(Flow::PlayAgain)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn new_round(&mut self) {
        self.segment_colors = vec![HEAD_COLOR];
        for _ in 1..self.state.snake().len() {
            let color = self.palette.pick(&mut self.rng);
            self.segment_colors.push(color);
        }
        self.apple_color = self.palette.pick(&mut self.rng);
        self.paused = false;
        self.started = false;
    }

    fn steer(&mut self, dir: Direction) {
        if self.paused {
            return;
        }

        self.state.set_direction(dir);
        self.started = true;
    }

    fn game_over(&mut self) -> Result<()> {
        let snap = self.state.snapshot();
        let headline = match snap.status {
            GameStatus::Won => "You won!",
            GameStatus::LostByWallCollision => "Game over! You hit the wall.",
            GameStatus::LostBySelfCollision => "Game over! You bit yourself.",
            GameStatus::Running => return Ok(()),
        };
        info!("{} Score: {}", headline, snap.score);

        self.term.show_message(&[
            headline,
            &*format!("Score: {}", snap.score),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])?;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let snap = self.state.snapshot();
        let grid = snap.grid;
        let dead = matches!(snap.status, GameStatus::LostByWallCollision | GameStatus::LostBySelfCollision);

        let mut cells: Vec<Option<(char, char, Color)>> = vec![None; grid.area()];
        let cell_index = |pos: Coords| pos.1 as usize * grid.width() as usize + pos.0 as usize;

        if let Some(apple) = snap.food {
            cells[cell_index(apple)] = Some((APPLE_CHAR, ' ', self.apple_color));
        }

        // Tail first, so the head wins where the body overlaps itself
        for (i, &pos) in snap.body.iter().enumerate().rev() {
            let color = self.segment_colors.get(i).copied().unwrap_or(HEAD_COLOR);
            cells[cell_index(pos)] = Some(segment_glyph(dead, i, snap.heading, color));
        }

        for pos in grid.cells() {
            let (left, right, color) = cells[cell_index(pos)].unwrap_or((' ', ' ', Color::Reset));
            let (x, y) = self.to_term(pos);
            self.term.print_at((x, y), left, color)?;
            self.term.print_at((x + 1, y), right, color)?;
        }

        let (_, board_h) = board_size(&self.state);
        let score_line = format!("Score: {:<6}", snap.score);
        self.term.print_str_at((self.origin.0, self.origin.1 + board_h - 1), &score_line)?;

        self.term.flush()?;
        Ok(())
    }

    fn to_term(&self, pos: Coords) -> TermCoords {
        (self.origin.0 + 1 + 2 * pos.0 as TermInt, self.origin.1 + 1 + pos.1 as TermInt)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or CTRL+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

/// Terminal cells needed for the bordered board plus the score line.
fn board_size(state: &GameState) -> TermCoords {
    let grid = state.grid();
    let width = 2 * grid.width() as usize + 2;
    let height = grid.height() as usize + 3;
    (
        width.min(TermInt::MAX as usize) as TermInt,
        height.min(TermInt::MAX as usize) as TermInt,
    )
}

/// Both halves of a two-column body cell; `index` 0 is the head.
fn segment_glyph(dead: bool, index: usize, heading: Direction, color: Color) -> (char, char, Color) {
    match (dead, index) {
        (true, _) => (DEAD_SNAKE_CHAR, DEAD_SNAKE_CHAR, DEAD_COLOR),
        (false, 0) => (heading.head_char(), ' ', color),
        (false, _) => (SNAKE_BODY_CHAR, SNAKE_BODY_CHAR, color),
    }
}

fn mode_line(modes: Modes) -> String {
    let flag = |on: bool| if on {"on"} else {"off"};
    format!(
        "Walls: {}  Body: {}  Speed-up: {}",
        flag(modes.wall_collision_enabled),
        flag(modes.body_collision_enabled),
        flag(modes.speed_increase_enabled)
    )
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL, .. })
        || matches!(ev, KeyEvent { code: KeyCode::Char('q') | KeyCode::Char('Q'), .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake::{Grid, Snake};

    #[test]
    fn board_fits_border_and_score_line() {
        let grid = Grid::new(20, 10).unwrap();
        let state = GameState::with_seed(grid, Snake::coiled(grid.center(), 1), Modes::easy(), 1).unwrap();
        assert_eq!(board_size(&state), (42, 13));
    }

    #[test]
    fn head_is_drawn_facing_the_snapshot_heading() {
        let grid = Grid::new(10, 10).unwrap();
        let mut state = GameState::with_seed(grid, Snake::new((5, 5), 3, Right), Modes::easy(), 1).unwrap();
        state.set_direction(Down);
        state.tick();

        let snap = state.snapshot();
        assert_eq!(segment_glyph(false, 0, snap.heading, HEAD_COLOR), ('v', ' ', HEAD_COLOR));
        assert_eq!(segment_glyph(false, 1, snap.heading, HEAD_COLOR).0, SNAKE_BODY_CHAR);
        assert_eq!(segment_glyph(true, 0, snap.heading, HEAD_COLOR), (DEAD_SNAKE_CHAR, DEAD_SNAKE_CHAR, DEAD_COLOR));
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }));
        assert!(is_quit(&KeyEvent { code: KeyCode::Char('q'), modifiers: KeyModifiers::NONE }));
        assert!(!is_quit(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::NONE }));
    }

    #[test]
    fn mode_line_lists_every_flag() {
        assert_eq!(mode_line(Modes::classic()), "Walls: on  Body: on  Speed-up: on");
        assert_eq!(mode_line(Modes::easy()), "Walls: off  Body: off  Speed-up: off");
    }
}
