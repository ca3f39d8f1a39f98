use std::io::stdout;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use plexus_config::Config;
use plexus_core::{ColorScheme, Vec2};
use plexus_field::{CELL_HEIGHT, CELL_WIDTH, CellSurface, FieldHandle, Stage, logical_size};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tracing::{debug, info, warn};

use crate::page::{Page, RISK_PANEL_COLS, RISK_PANEL_ROWS};
use crate::view::PageView;

mod content;
mod logging;
mod page;
mod view;

/// Rows reserved for the key help line.
const STATUS_HEIGHT: u16 = 1;

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Terminal landing page with scroll reveals and a plexus particle background.
#[derive(Debug, Parser)]
#[command(name = "plexus", version, about)]
struct Args {
    /// Read settings from this file instead of the platform config directory.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let logging = logging::init(&config.log)?;
    if let Some(guard) = &logging {
        info!(log_dir = %guard.log_dir().display(), config_path = ?args.config, "starting");
    }

    let terminal = ratatui::init();
    let result = run(terminal, config);
    if let Err(err) = execute!(stdout(), DisableMouseCapture) {
        warn!(%err, "failed to release the mouse");
    }
    ratatui::restore();
    result
}

fn run(mut terminal: DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    App::new(config, size).run(terminal)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Current color scheme.
    color_scheme: ColorScheme,
    page: Page,
    /// Particle fields of the hero and the risk panel.
    stage: Stage<CellSurface>,
    hero: FieldHandle,
    /// Created the first time the risk panel scrolls into view.
    risk_panel: Option<FieldHandle>,
    opened: Instant,
    last_frame: Instant,
}

impl App {
    /// Lay out the page for a terminal of `size` and start the hero field.
    pub fn new(config: Config, size: Size) -> Self {
        let viewport_height = size.height.saturating_sub(STATUS_HEIGHT);
        let page = Page::new(size.width, viewport_height, config.reveal());

        let mut stage = config.seed.map_or_else(Stage::new, Stage::with_seed);
        let (point_count, field) = config.background_field();
        let hero = stage.create(
            Some(CellSurface::for_area(page.layout().hero)),
            point_count,
            field,
        );
        stage.track_window(hero);

        let now = Instant::now();
        Self {
            running: false,
            color_scheme: config.color_scheme,
            config,
            page,
            stage,
            hero,
            risk_panel: None,
            opened: now,
            last_frame: now,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.teardown();
        Ok(())
    }

    /// Milliseconds since the page opened.
    fn now_ms(&self) -> u64 {
        u64::try_from(self.opened.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Apply scroll reveals and run a frame of every field when one is due.
    fn tick(&mut self) {
        if self.page.update(self.now_ms()) {
            self.open_risk_panel();
        }
        if self.last_frame.elapsed() >= self.config.frame_interval() {
            self.last_frame = Instant::now();
            self.stage.advance_frame();
        }
    }

    fn open_risk_panel(&mut self) {
        if self.risk_panel.is_some() {
            return;
        }
        let (point_count, field) = self.config.risk_panel_field();
        let handle = self.stage.create(
            Some(CellSurface::new(RISK_PANEL_COLS, RISK_PANEL_ROWS)),
            point_count,
            field,
        );
        debug!(?handle, point_count, "risk panel opened");
        self.risk_panel = Some(handle);
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(STATUS_HEIGHT)])
                .areas(frame.area());

        let palette = self.color_scheme.palette();
        frame.render_widget(
            PageView {
                page: &self.page,
                hero: self.stage.surface(self.hero),
                risk_panel: self.risk_panel.and_then(|h| self.stage.surface(h)),
                palette,
                now_ms: self.now_ms(),
            },
            body,
        );

        let color: Color = palette.accent.into();
        let key = Style::new().fg(color).add_modifier(Modifier::BOLD);
        let label = Style::new().fg(Color::DarkGray);
        let help = Line::from(vec![
            Span::styled("q", key),
            Span::styled(" quit  ", label),
            Span::styled("j/k", key),
            Span::styled(" scroll  ", label),
            Span::styled("space", key),
            Span::styled(" page  ", label),
            Span::styled("g/G", key),
            Span::styled(" top/bottom  ", label),
            Span::styled("c", key),
            Span::styled(format!(" color: {}", self.color_scheme.name()), label),
        ])
        .centered();
        frame.render_widget(help, status);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .config
            .frame_interval()
            .saturating_sub(self.last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.on_resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('j') | KeyCode::Down) => self.page.scroll_by(1),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.page.scroll_by(-1),
            (_, KeyCode::Char(' ') | KeyCode::PageDown) => self.page.page(true),
            (_, KeyCode::PageUp) => self.page.page(false),
            (_, KeyCode::Char('g') | KeyCode::Home) => self.page.scroll_to(0),
            (_, KeyCode::Char('G') | KeyCode::End) => self.page.scroll_to_end(),
            (_, KeyCode::Char('c')) => self.cycle_color_scheme(),
            _ => {}
        }
    }

    /// Pointer moves feed the hero field; the wheel scrolls.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let hero = self.page.layout().hero;
                let row = i32::from(self.page.document_row(mouse.row)) - i32::from(hero.y);
                self.stage.pointer_moved(Vec2::new(
                    (f32::from(mouse.column) + 0.5) * CELL_WIDTH,
                    (row as f32 + 0.5) * CELL_HEIGHT,
                ));
            }
            MouseEventKind::ScrollDown => self.page.scroll_by(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.page.scroll_by(-WHEEL_ROWS),
            _ => {}
        }
    }

    /// Relayout the page and stretch the hero field with the window.
    fn on_resize(&mut self, width: u16, height: u16) {
        self.page.resize(width, height.saturating_sub(STATUS_HEIGHT));
        let hero = self.page.layout().hero;
        self.stage
            .window_resized(logical_size(hero.width, hero.height));
    }

    /// Cycle through available color schemes.
    fn cycle_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
        self.stage.set_color_scheme(self.color_scheme);
        debug!(scheme = self.color_scheme.name(), "color scheme changed");
    }

    /// Cancel every frame loop and observation.
    fn teardown(&mut self) {
        let frames = self.stage.field(self.hero).map_or(0, |f| f.frames());
        self.stage.destroy(self.hero);
        if let Some(panel) = self.risk_panel.take() {
            self.stage.destroy(panel);
        }
        self.page.teardown();
        info!(frames, "page closed");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::SurfaceSize;

    fn app() -> App {
        let config = Config {
            seed: Some(11),
            ..Config::default()
        };
        App::new(config, Size::new(100, 31))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_args_take_an_optional_config_path() {
        let args = Args::try_parse_from(["plexus"]).unwrap();
        assert!(args.config.is_none());
        let args = Args::try_parse_from(["plexus", "-c", "site.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("site.toml")));
        let args = Args::try_parse_from(["plexus", "--config", "/etc/plexus.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/plexus.toml")));

        assert!(Args::try_parse_from(["plexus", "--config"]).is_err());
        assert!(Args::try_parse_from(["plexus", "extra"]).is_err());
    }

    #[test]
    fn test_hero_field_fills_the_first_screen() {
        let app = app();
        let surface = app.stage.surface(app.hero).unwrap();
        assert_eq!((surface.cols(), surface.rows()), (100, 30));
        assert_eq!(app.stage.particle_count(app.hero), 60);
        assert!(app.stage.is_running(app.hero));
        assert!(app.risk_panel.is_none());
    }

    #[test]
    fn test_keys_scroll_and_quit() {
        let mut app = app();
        app.running = true;
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.page.offset(), 2);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.page.offset(), 1);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.page.offset(), app.page.layout().height() - 30);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.page.offset(), 0);

        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_color_key_cycles_scheme() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.color_scheme, ColorScheme::Violet);
        let field = app.stage.field(app.hero).unwrap();
        assert_eq!(field.config().color_scheme, ColorScheme::Violet);
    }

    #[test]
    fn test_risk_panel_opens_when_scrolled_into_view() {
        let mut app = app();
        app.tick();
        assert!(app.risk_panel.is_none());

        app.on_mouse_event(mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(app.page.offset(), 3);
        app.page.scroll_to(app.page.layout().problem.y);
        app.tick();
        let panel = app.risk_panel.unwrap();
        assert_eq!(app.stage.particle_count(panel), 80);
        assert_eq!(app.stage.surface(panel).unwrap().cols(), RISK_PANEL_COLS);

        // scrolling away and back keeps the same field
        app.page.scroll_to(0);
        app.tick();
        app.page.scroll_to(app.page.layout().problem.y);
        app.tick();
        assert_eq!(app.risk_panel, Some(panel));
    }

    #[test]
    fn test_mouse_moves_reach_the_hero_field() {
        let mut app = app();
        assert_eq!(app.stage.pointer_subscribers(), 1);
        app.on_mouse_event(mouse(MouseEventKind::Moved, 10, 4));
        app.on_mouse_event(mouse(MouseEventKind::Moved, 12, 5));
        // still one shared pointer, no new subscriptions
        assert_eq!(app.stage.pointer_subscribers(), 1);
    }

    #[test]
    fn test_resize_follows_the_window() {
        let mut app = app();
        app.on_resize(60, 25);
        assert_eq!(app.page.viewport_height(), 24);
        let surface = app.stage.surface(app.hero).unwrap();
        assert_eq!((surface.cols(), surface.rows()), (60, 24));
        assert_eq!(
            app.stage.field(app.hero).unwrap().size(),
            SurfaceSize::new(480.0, 384.0)
        );
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut app = app();
        app.page.scroll_to(app.page.layout().problem.y);
        app.tick();
        assert!(app.risk_panel.is_some());

        app.teardown();
        assert!(app.stage.is_empty());
        assert_eq!(app.stage.pending_frames(), 0);
        assert_eq!(app.stage.pointer_subscribers(), 0);
        assert!(app.page.detector().is_empty());
    }
}
