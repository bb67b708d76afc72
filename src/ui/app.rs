//! Interactive event loop.
//!
//! One unbounded channel carries every event: key presses forwarded from a
//! blocking reader task, animation ticks, and completions posted by spawned
//! fetch tasks. The loop owns the `App` aggregate exclusively; tasks only
//! send messages back.

use crate::cli::Args;
use crate::config::Config;
use crate::services::fetcher::CountryFetcher;
use crate::services::images;
use crate::state::{Status, ViewState};
use crate::ui::events::AppEvent;
use crate::ui::lazy_image::{ImageCell, ImageStyle};
use crate::ui::render;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{execute, terminal};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::warn;

pub struct App {
    pub(crate) state: ViewState,
    /// Lazy image cells keyed by image URI. Rows that share a URI share one
    /// cell and one load; a known weakness accepted because displayed rows
    /// are not expected to collide on flag or emblem URIs.
    pub(crate) images: HashMap<String, ImageCell>,
    pub(crate) scroll: usize,
    pub(crate) viewport_rows: usize,
    pub(crate) proximity_rows: usize,
    pub(crate) search_mode: bool,
    pub(crate) spinner_frame: usize,
    should_quit: bool,
}

impl App {
    pub fn new(proximity_rows: usize) -> Self {
        Self {
            state: ViewState::new(),
            images: HashMap::new(),
            scroll: 0,
            viewport_rows: 0,
            proximity_rows,
            search_mode: false,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub(crate) fn image_display(&self, url: &str) -> String {
        match self.images.get(url) {
            Some(cell) => cell.display(),
            None => "·".to_string(),
        }
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        tx: &UnboundedSender<AppEvent>,
        fetcher: &Arc<CountryFetcher>,
    ) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // While loading the controls are hidden, and in the error state the
        // filter controls are inert; only quit and retry act.
        match self.state.status() {
            Status::Loading => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
                return;
            }
            Status::Error => {
                match key.code {
                    KeyCode::Char('q') => self.should_quit = true,
                    KeyCode::Char('r') => self.refresh(tx, fetcher),
                    _ => {}
                }
                return;
            }
            Status::Idle => {}
        }

        if self.search_mode {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.search_mode = false,
                KeyCode::Backspace => self.state.pop_query_char(),
                KeyCode::Char(c) => self.state.push_query_char(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.refresh(tx, fetcher),
            KeyCode::Char('/') => self.search_mode = true,
            KeyCode::Char('c') => self.state.clear(),
            KeyCode::Tab => self.state.cycle_bucket(),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll += 1,
            _ => {}
        }
    }

    fn refresh(&mut self, tx: &UnboundedSender<AppEvent>, fetcher: &Arc<CountryFetcher>) {
        self.state.begin_refresh();
        spawn_fetch(tx.clone(), fetcher.clone());
    }

    /// Feeds visibility observations into the image cells for the current
    /// filtered rows and spawns a load for every cell that just activated.
    /// Also clamps the scroll offset against the filtered row count.
    fn observe_images(&mut self, tx: &UnboundedSender<AppEvent>, client: &reqwest::Client) {
        let countries = self.state.filtered().to_vec();

        let max_scroll = countries.len().saturating_sub(1);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }

        let near_start = self.scroll.saturating_sub(self.proximity_rows);
        let near_end = self.scroll + self.viewport_rows + self.proximity_rows;

        for (idx, country) in countries.iter().enumerate() {
            let near = idx >= near_start && idx < near_end;
            for url in [country.media.flag.as_str(), country.media.emblem.as_str()] {
                if url.is_empty() {
                    continue;
                }
                let cell = self
                    .images
                    .entry(url.to_string())
                    .or_insert_with(|| ImageCell::new(url, ImageStyle::default()));
                if cell.observe(near) {
                    spawn_image_load(tx.clone(), client.clone(), url.to_string());
                }
            }
        }
    }
}

/// Restores the terminal even when the loop exits through `?`.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        execute!(io::stdout(), EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub async fn run(config: &Config, args: &Args) -> Result<()> {
    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.countries_api_url.clone());
    let fetcher = Arc::new(CountryFetcher::new(endpoint));
    let image_client = reqwest::Client::new();

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone());
    spawn_ticker(tx.clone(), config.tick_interval_ms);

    let mut app = App::new(config.image_proximity_rows);

    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    if args.should_fetch_on_start() {
        app.refresh(&tx, &fetcher);
    }

    terminal.draw(|f| render::draw(f, &mut app))?;

    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Input(key) => app.handle_key(key, &tx, &fetcher),
            AppEvent::Tick => app.spinner_frame = app.spinner_frame.wrapping_add(1),
            AppEvent::FetchCompleted(result) => app.state.apply_fetch(result),
            AppEvent::ImageLoaded { url, bytes } => {
                if let Some(cell) = app.images.get_mut(&url) {
                    cell.resolve(bytes);
                }
            }
            AppEvent::ImageFailed { url } => {
                if let Some(cell) = app.images.get_mut(&url) {
                    cell.fail();
                }
            }
        }

        if app.should_quit {
            break;
        }

        app.observe_images(&tx, &image_client);
        terminal.draw(|f| render::draw(f, &mut app))?;
    }

    // In-flight fetches are not cancelled; dropping the receiver makes their
    // completion sends no-ops and the tasks end with the runtime.
    Ok(())
}

fn spawn_fetch(tx: UnboundedSender<AppEvent>, fetcher: Arc<CountryFetcher>) {
    tokio::spawn(async move {
        let result = fetcher.fetch().await;
        let _ = tx.send(AppEvent::FetchCompleted(result));
    });
}

fn spawn_image_load(tx: UnboundedSender<AppEvent>, client: reqwest::Client, url: String) {
    tokio::spawn(async move {
        match images::fetch_image_size(&client, &url).await {
            Ok(bytes) => {
                let _ = tx.send(AppEvent::ImageLoaded { url, bytes });
            }
            Err(err) => {
                warn!(%url, "image load failed: {err}");
                let _ = tx.send(AppEvent::ImageFailed { url });
            }
        }
    });
}

fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => {
                if let Ok(Event::Key(key)) = event::read() {
                    if tx.send(AppEvent::Input(key)).is_err() {
                        break;
                    }
                }
            }
            Ok(false) => {}
            Err(_) => break,
        }
    });
}

fn spawn_ticker(tx: UnboundedSender<AppEvent>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(16)));
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
}
