use std::io::stdout;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use lumen_config::Config;
use lumen_fx::{CellMetrics, HeroOptions, HeroState};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use tracing::info;

mod logging;
mod tagline;

use tagline::TaglineView;

const ACCENT: Color = Color::Rgb(0x67, 0xe8, 0xf9);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    let config = Config::load()?;
    info!(?log_path, ?config, "starting lumen");

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| App::new(config).run(terminal));
    let released = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result?;
    released?;
    Ok(())
}

/// Seed derived from the system clock.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Layer stack of the hero background.
    hero: HeroState,
    /// Show the headline overlay.
    show_tagline: bool,
    cells: CellMetrics,
    frame_interval: Duration,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let cells = CellMetrics {
            width: config.cell_width,
            height: config.cell_height,
            pixel_ratio: config.effective_pixel_ratio(),
        };
        let hero = HeroState::new(HeroOptions {
            scene: config.scene,
            speed: config.speed,
            fps: config.fps,
            seed: config.seed.unwrap_or_else(clock_seed),
            cells,
            parallax: config.parallax,
        });
        Self {
            running: false,
            hero,
            show_tagline: config.show_tagline,
            cells,
            frame_interval: Duration::from_secs_f64(1.0 / config.fps.max(1) as f64),
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let elapsed_ms = self.elapsed_ms();
        self.hero.render(frame, elapsed_ms);

        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .split(frame.area());

        if self.show_tagline {
            let view = TaglineView {
                elapsed_s: elapsed_ms as f32 / 1000.0,
                cell_height: self.cells.height,
            };
            frame.render_widget(view, chunks[0]);
        }

        let parallax = if self.hero.parallax() { "on" } else { "off" };
        let help = Line::from(vec![
            "q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "s".bold().fg(ACCENT),
            format!(" scene: {}  ", self.hero.scene().label()).dark_gray(),
            "p".bold().fg(ACCENT),
            format!(" parallax: {parallax}  ").dark_gray(),
            "t".bold().fg(ACCENT),
            " tagline  ".dark_gray(),
            "r".bold().fg(ACCENT),
            " reseed".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame interval as timeout so animations keep running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(_, _) => {}
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
            (_, KeyCode::Char('s')) => self.hero.next_scene(),
            (_, KeyCode::Char('p')) => self.hero.set_parallax(!self.hero.parallax()),
            (_, KeyCode::Char('t')) => self.show_tagline = !self.show_tagline,
            (_, KeyCode::Char('r')) => self.hero.reseed(clock_seed()),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            self.hero.track_pointer(mouse.column, mouse.row);
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
