//! Deferred-loading image cells.
//!
//! A cell starts out unrequested and only asks for its resource once a
//! visibility observation puts it near the viewport. The request happens at
//! most once per cell lifetime, whatever the later observations say.

/// Structured cell presentation options.
#[derive(Debug, Clone, Copy)]
pub struct ImageStyle {
    /// Rendered text is truncated to this many characters.
    pub max_width: u16,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self { max_width: 14 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePhase {
    NotVisible,
    Loading,
    Loaded(u64),
    Failed,
}

#[derive(Debug)]
pub struct ImageCell {
    url: String,
    style: ImageStyle,
    phase: ImagePhase,
    requested: bool,
}

impl ImageCell {
    pub fn new(url: impl Into<String>, style: ImageStyle) -> Self {
        Self {
            url: url.into(),
            style,
            phase: ImagePhase::NotVisible,
            requested: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn phase(&self) -> ImagePhase {
        self.phase
    }

    /// Feeds one visibility observation into the cell. Returns true exactly
    /// when the caller should start fetching the resource: the first time the
    /// cell comes near the viewport. Cells with no URI never request.
    pub fn observe(&mut self, near_viewport: bool) -> bool {
        if !near_viewport || self.requested || self.url.is_empty() {
            return false;
        }
        self.requested = true;
        self.phase = ImagePhase::Loading;
        true
    }

    pub fn resolve(&mut self, bytes: u64) {
        self.phase = ImagePhase::Loaded(bytes);
    }

    pub fn fail(&mut self) {
        self.phase = ImagePhase::Failed;
    }

    /// Cell text for the current phase, truncated to the style width.
    pub fn display(&self) -> String {
        let text = if self.url.is_empty() {
            "-".to_string()
        } else {
            match self.phase {
                ImagePhase::NotVisible => "·".to_string(),
                ImagePhase::Loading => "…".to_string(),
                ImagePhase::Loaded(bytes) => format!("img {}", format_bytes(bytes)),
                ImagePhase::Failed => "unavailable".to_string(),
            }
        };
        truncate(&text, self.style.max_width as usize)
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
