use crate::models::country::Country;
use crate::services::fetcher::FetchError;
use crossterm::event::KeyEvent;

/// Everything the event loop reacts to, merged into one channel: user input,
/// animation ticks and completions from spawned fetch tasks.
#[derive(Debug)]
pub enum AppEvent {
    Input(KeyEvent),
    Tick,
    FetchCompleted(Result<Vec<Country>, FetchError>),
    ImageLoaded { url: String, bytes: u64 },
    ImageFailed { url: String },
}
