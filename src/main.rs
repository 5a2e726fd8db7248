mod board;
mod game;
mod piece;
mod point;
mod shape;
mod ui;

use Color::*;
use color_eyre::Result;
use game::{Action, GameState};
use log::info;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Alignment::Center;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::prelude::Stylize;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};
use std::time::{Duration, Instant};
use ui::{BOARD_SIZE, GameWidget};

/// Board plus its rounded border.
const FRAME_SIZE: (u16, u16) = (BOARD_SIZE.0 + 2, BOARD_SIZE.1 + 2);

/// Longest wait for input before the next frame.
const FRAME_BUDGET: Duration = Duration::from_micros(16_667);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Outcome {
    Quit,
    GameOver,
}

struct RatatuiApp {
    tetris: GameState,
    running: bool,
}

impl Default for RatatuiApp {
    fn default() -> Self {
        Self::new(GameState::new())
    }
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

impl RatatuiApp {
    fn new(tetris: GameState) -> Self {
        Self {
            tetris,
            running: false,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<Outcome> {
        self.running = true;
        let mut last_frame = Instant::now();
        while self.running {
            let now = Instant::now();
            self.tetris.tick(now - last_frame);
            last_frame = now;
            if self.tetris.is_over() {
                return Ok(Outcome::GameOver);
            }

            self.handle_input()?;
            self.draw(&mut terminal)?;
        }
        Ok(Outcome::Quit)
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let (w, h) = (area.width, area.height);
        if w < FRAME_SIZE.0 || h < FRAME_SIZE.1 {
            Self::draw_too_small(frame, area, w, h);
        } else {
            self.draw_tetris(frame, area);
        }
    }

    fn draw_too_small(frame: &mut Frame, area: Rect, w: u16, h: u16) {
        let too_small_block = Block::new()
            .borders(Borders::all())
            .border_type(BorderType::Rounded)
            .border_style(Style::new())
            .title_top("Too small!")
            .title_style(Style::from(Red))
            .title_alignment(Center);

        let inner = Self::center(
            too_small_block.inner(area),
            Constraint::Min(0),
            Constraint::Max(2),
        );
        frame.render_widget(too_small_block, area);

        let (need_w, need_h) = FRAME_SIZE;
        let too_small_text = Paragraph::new(format!("need: {need_w}x{need_h}, have: {w}x{h}"))
            .centered()
            .wrap(Wrap { trim: false })
            .fg(Red);
        frame.render_widget(too_small_text, inner);
    }

    fn draw_tetris(&self, frame: &mut Frame, area: Rect) {
        let area = Self::center(
            area,
            Constraint::Length(FRAME_SIZE.0),
            Constraint::Length(FRAME_SIZE.1),
        );

        let tetris = Block::new()
            .borders(Borders::all())
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(ui::GRID_COLOR))
            .title_top("TETRIS")
            .title_alignment(Center);
        let inner = tetris.inner(area);
        frame.render_widget(tetris, area);

        frame.render_widget(GameWidget { game: &self.tetris }, inner);
    }

    fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
        let [area] = Layout::horizontal([horizontal])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
        area
    }

    /// Waits up to one frame for input, then drains everything queued.
    fn handle_input(&mut self) -> Result<()> {
        let mut timeout = FRAME_BUDGET;
        while self.running && event::poll(timeout)? {
            timeout = Duration::ZERO;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Repeats come from the terminal's own key repeat and count as presses.
        if key.kind == KeyEventKind::Release {
            return;
        }
        let action = match key.code {
            KeyCode::Left => Action::MoveLeft,
            KeyCode::Right => Action::MoveRight,
            KeyCode::Down => Action::MoveDown,
            KeyCode::Up => Action::Rotate,
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => return self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.quit();
            }
            _ => return,
        };
        self.tetris.apply(action);
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    fn quit(&mut self) {
        info!("quit");
        self.running = false;
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let outcome = {
        let terminal = ratatui::init();
        let _guard = TerminalGuard;
        RatatuiApp::default().run(terminal)?
    };

    if outcome == Outcome::GameOver {
        println!("Game Over!");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::shape::Tetromino;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::KeyEventState;

    fn app() -> RatatuiApp {
        let mut tetris = GameState::with_seed(5);
        tetris.spawn(Tetromino::O);
        let mut app = RatatuiApp::new(tetris);
        app.running = true;
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn pos(app: &RatatuiApp) -> Point<i16> {
        app.tetris.active().map(|p| p.pos()).unwrap_or_default()
    }

    #[test]
    fn arrows_move_and_rotate() {
        let mut app = app();
        assert_eq!(pos(&app), Point(4, 0));

        app.handle_key(press(KeyCode::Left));
        assert_eq!(pos(&app), Point(3, 0));
        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Right));
        assert_eq!(pos(&app), Point(5, 0));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(pos(&app), Point(5, 1));
        app.handle_key(press(KeyCode::Up));
        assert_eq!(pos(&app), Point(5, 1));
        assert!(app.running);
    }

    #[test]
    fn release_is_ignored_and_repeat_moves() {
        let mut app = app();
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..press(KeyCode::Left)
        };
        app.handle_key(release);
        assert_eq!(pos(&app), Point(4, 0));

        let repeat = KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
            KeyEventState::NONE,
        );
        app.handle_key(repeat);
        assert_eq!(pos(&app), Point(3, 0));
    }

    #[test]
    fn quit_keys() {
        for key in [
            press(KeyCode::Esc),
            press(KeyCode::Char('q')),
            press(KeyCode::Char('Q')),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            app.handle_key(key);
            assert!(!app.running, "{key:?}");
        }

        let mut app = app();
        app.handle_key(press(KeyCode::Char('c')));
        assert!(app.running);
    }

    #[test]
    fn renders_framed_board() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(FRAME_SIZE.0, FRAME_SIZE.1))
            .expect("test backend");
        terminal
            .draw(|frame| app.render(frame))
            .expect("draw");

        let buf = terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].symbol(), "╭");
        assert_eq!(buf[(FRAME_SIZE.0 - 1, FRAME_SIZE.1 - 1)].symbol(), "╯");
        // O piece at board column 4 sits inside the border.
        assert_eq!(buf[(1 + 8, 1)].bg, Tetromino::O.color());
    }

    #[test]
    fn renders_too_small_message() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).expect("test backend");
        terminal
            .draw(|frame| app.render(frame))
            .expect("draw");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Too small!"));
    }
}
