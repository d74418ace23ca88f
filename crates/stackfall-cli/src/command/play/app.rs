use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    widgets::{Block as BlockWidget, Padding},
};
use stackfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, GameState, GameStatus, PREVIEW_SIZE};

use crate::{
    tui::{App, Tui},
    view::widgets::{CellGrid, GridDisplay, KeyBinding, KeyBindingDisplay, StatsDisplay},
};

const SIDE_PANEL_WIDTH: u16 = 26;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateLeft,
    RotateRight,
    TogglePause,
    Start,
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if !event.is_press() {
            return None;
        }
        match event.code {
            KeyCode::Left => Some(Self::MoveLeft),
            KeyCode::Right => Some(Self::MoveRight),
            KeyCode::Down => Some(Self::SoftDrop),
            KeyCode::Up | KeyCode::Char(' ') => Some(Self::HardDrop),
            KeyCode::Char('z') => Some(Self::RotateLeft),
            KeyCode::Char('x') => Some(Self::RotateRight),
            KeyCode::Char('p') => Some(Self::TogglePause),
            KeyCode::Char('s') | KeyCode::Enter => Some(Self::Start),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    fn bindings(status: &GameStatus) -> &'static [KeyBinding<'static>] {
        match status {
            GameStatus::Ready => &[(&["s", "Enter"], "Start"), (&["q", "Esc"], "Quit")],
            GameStatus::Playing | GameStatus::Clearing(_) => &[
                (&["←", "→"], "Move"),
                (&["↓"], "Soft Drop"),
                (&["↑", "Space"], "Hard Drop"),
                (&["z", "x"], "Rotate"),
                (&["p"], "Pause"),
                (&["q", "Esc"], "Quit"),
            ],
            GameStatus::Paused => &[(&["p"], "Resume"), (&["q", "Esc"], "Quit")],
            GameStatus::GameOver => &[(&["q", "Esc"], "Quit")],
        }
    }
}

#[derive(Debug)]
pub struct PlayApp {
    game: GameState,
    board: CellGrid,
    preview: CellGrid,
    gravity: Duration,
    fps: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(game: GameState, gravity: Duration, fps: f64) -> Self {
        Self {
            game,
            board: CellGrid::new(),
            preview: CellGrid::new(),
            gravity,
            fps,
            is_exiting: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.game.move_left(),
            Action::MoveRight => self.game.move_right(),
            Action::SoftDrop => _ = self.game.move_down(),
            Action::HardDrop => self.game.hard_drop(),
            Action::RotateLeft => self.game.rotate_left(),
            Action::RotateRight => self.game.rotate_right(),
            Action::TogglePause if self.game.is_paused() => self.game.unpause(),
            Action::TogglePause => self.game.pause(),
            Action::Start => self.game.start(),
            Action::Quit => self.is_exiting = true,
        }
    }

    fn repaint(&mut self) {
        self.game.render(&mut self.board);
        self.game.render_next(&mut self.preview);
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(self.fps);
        tui.set_gravity_interval(Some(self.gravity));
        self.repaint();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: &Event) {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event)
        {
            self.apply(action);
        }
    }

    fn on_gravity(&mut self, _tui: &mut Tui) {
        if self.game.status().is_playing() {
            self.game.move_down();
        }
    }

    fn update(&mut self, _tui: &mut Tui, dt: f64) {
        self.game.update_clearing_animation(dt);
        self.repaint();
    }

    fn draw(&self, frame: &mut Frame) {
        let board = GridDisplay::new(&self.board)
            .show_dots(true)
            .block(BlockWidget::bordered().title("STACKFALL"));
        let preview = GridDisplay::new(&self.preview).block(
            BlockWidget::bordered()
                .title("NEXT")
                .padding(Padding::horizontal(1)),
        );
        let stats = StatsDisplay::new(&self.game).block(
            BlockWidget::bordered()
                .title("STATS")
                .padding(Padding::horizontal(1)),
        );
        let help = KeyBindingDisplay::new(Action::bindings(self.game.status())).block(
            BlockWidget::bordered()
                .title("KEYS")
                .padding(Padding::horizontal(1)),
        );

        let board_width = board.width_for(BOARD_WIDTH);
        let board_height = board.height_for(BOARD_HEIGHT);
        let side_height = preview.height_for(PREVIEW_SIZE) + stats.height() + help.height();
        let viewport = frame.area().centered(
            Constraint::Length(board_width + 2 + SIDE_PANEL_WIDTH),
            Constraint::Length(board_height.max(side_height)),
        );
        let [board_area, side_area] = Layout::horizontal([
            Constraint::Length(board_width),
            Constraint::Length(SIDE_PANEL_WIDTH),
        ])
        .spacing(2)
        .areas(viewport);
        let [preview_area, stats_area, help_area] = Layout::vertical([
            Constraint::Length(preview.height_for(PREVIEW_SIZE)),
            Constraint::Length(stats.height()),
            Constraint::Length(help.height()),
        ])
        .areas(side_area);
        let board_area = board_area.centered_vertically(Constraint::Length(board_height));
        let preview_area = preview_area.centered_horizontally(Constraint::Length(
            preview.width_for(PREVIEW_SIZE),
        ));

        frame.render_widget(board, board_area);
        frame.render_widget(preview, preview_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyModifiers};
    use stackfall_engine::{PieceKind, PieceQueue};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> PlayApp {
        let game = GameState::with_queue(PieceQueue::scripted(vec![PieceKind::O]));
        PlayApp::new(game, Duration::from_secs(1), 60.0)
    }

    fn send(app: &mut PlayApp, code: KeyCode) {
        if let Some(action) = Action::from_key_event(&press(code)) {
            app.apply(action);
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key_event(&press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(
            Action::from_key_event(&press(KeyCode::Char(' '))),
            Some(Action::HardDrop)
        );
        assert_eq!(
            Action::from_key_event(&press(KeyCode::Char('x'))),
            Some(Action::RotateRight)
        );
        assert_eq!(Action::from_key_event(&press(KeyCode::Char('a'))), None);

        let mut release = press(KeyCode::Left);
        release.kind = KeyEventKind::Release;
        assert_eq!(Action::from_key_event(&release), None);
    }

    #[test]
    fn test_start_pause_and_quit() {
        let mut app = app();
        assert!(app.game().status().is_ready());
        send(&mut app, KeyCode::Char('s'));
        assert!(app.game().status().is_playing());

        send(&mut app, KeyCode::Char('p'));
        assert!(app.game().is_paused());
        send(&mut app, KeyCode::Char('p'));
        assert!(!app.game().is_paused());

        assert!(!app.should_exit());
        send(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_hard_drop_then_animation_tick() {
        let mut app = app();
        send(&mut app, KeyCode::Enter);
        send(&mut app, KeyCode::Up);
        assert_eq!(app.game().completed_pieces(), 1);

        let mut tui = Tui::new();
        app.on_gravity(&mut tui);
        app.update(&mut tui, 1.0 / 60.0);
        assert_eq!(app.board.height(), BOARD_HEIGHT);
        assert!(app.board.rows().nth(19).unwrap()[4].is_some());
    }
}
