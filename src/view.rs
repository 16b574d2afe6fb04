// Local Crate Imports
use crate::{host::Theme, uploader::WidgetState};

// Public API ==========================================================================================================

pub const SPINNER: &str = "🔄 Uploading...";

/// Everything a UI needs to draw the widget, derived from its state without touching it
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct View {
    pub controls_disabled: bool,
    pub button_label: &'static str,
    pub spinner: Option<&'static str>,
    pub progress_bar: Option<u8>,
    pub palette: Palette,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    pub dark: bool,
    pub text: &'static str,
    pub border: &'static str,
    pub background: &'static str,
    pub progress_track: &'static str,
    pub progress_fill: &'static str,
}

impl Palette {
    pub const DARK: Self = Self {
        dark: true,
        text: "white",
        border: "white",
        background: "#444",
        progress_track: "#ddd",
        progress_fill: "lightgreen",
    };

    pub const LIGHT: Self = Self {
        dark: false,
        text: "black",
        border: "black",
        background: "#f9f9f9",
        progress_track: "#ddd",
        progress_fill: "green",
    };

    /// A theme from the host always wins, and the system preference is only a fallback for when there isn't one
    #[must_use]
    pub fn new(theme: Option<&Theme>, system_prefers_dark: bool) -> Self {
        if theme.map_or(system_prefers_dark, Theme::is_dark) {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

#[must_use]
pub fn render(
    state: &WidgetState,
    show_progress: bool,
    theme: Option<&Theme>,
    system_prefers_dark: bool,
) -> View {
    let uploading = state.upload.in_progress;

    View {
        controls_disabled: uploading,
        button_label: if uploading { "Uploading..." } else { "Upload" },
        spinner: (uploading && show_progress).then_some(SPINNER),
        progress_bar: (uploading && show_progress).then_some(state.upload.progress_percent.min(100)),
        palette: Palette::new(theme, system_prefers_dark),
    }
}

// Unit Tests ==========================================================================================================
