use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context as _;

use crate::foundation::error::{EmojiError, EmojiResult};

/// Color scheme preference carried as application context.
///
/// The library never paints UI chrome, so this is only handed through to whichever front-end
/// drives the [`crate::Studio`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Follow the host preference.
    #[default]
    System,
    /// Light scheme.
    Light,
    /// Dark scheme.
    Dark,
}

/// Session configuration injected into a [`crate::Studio`] at start.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Side length of the square composite surface in pixels.
    pub canvas_size: u32,
    /// Side length of the on-screen box the surface is shown in.
    pub display_size: u32,
    /// Lifetime of the transition cue applied after each draw, in milliseconds.
    pub pulse_ms: u64,
    /// Width/height and viewBox extent of merged vector exports.
    pub vector_size: u32,
    /// Tab thumbnail size in pixels.
    pub tab_thumb_size: u32,
    /// Gallery thumbnail size in pixels.
    pub gallery_thumb_size: u32,
    /// Color scheme preference.
    pub color_scheme: ColorScheme,
    /// Title passed to the save dialog.
    pub save_title: String,
    /// File stem of suggested export names (`<stem>.png`, `<stem>.svg`).
    pub default_file_stem: String,
    /// Worker threads used for layer resolution. `None` uses the rayon default.
    pub resolve_threads: Option<usize>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            canvas_size: 640,
            display_size: 160,
            pulse_ms: 500,
            vector_size: 32,
            tab_thumb_size: 48,
            gallery_thumb_size: 40,
            color_scheme: ColorScheme::System,
            save_title: "Save emoji".to_string(),
            default_file_stem: "emoji".to_string(),
            resolve_threads: None,
        }
    }
}

impl StudioConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> EmojiResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: StudioConfig = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| EmojiError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> EmojiResult<()> {
        for (name, v) in [
            ("canvas_size", self.canvas_size),
            ("display_size", self.display_size),
            ("vector_size", self.vector_size),
            ("tab_thumb_size", self.tab_thumb_size),
            ("gallery_thumb_size", self.gallery_thumb_size),
        ] {
            if v == 0 {
                return Err(EmojiError::validation(format!("{name} must be > 0")));
            }
        }
        const MAX_CANVAS: u32 = 8192;
        if self.canvas_size > MAX_CANVAS {
            return Err(EmojiError::validation(format!(
                "canvas_size must be <= {MAX_CANVAS}"
            )));
        }
        if self.resolve_threads == Some(0) {
            return Err(EmojiError::validation(
                "resolve_threads must be >= 1 when set",
            ));
        }
        if self.default_file_stem.trim().is_empty() {
            return Err(EmojiError::validation("default_file_stem must be non-empty"));
        }
        Ok(())
    }

    /// Transition cue lifetime.
    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    /// Suggested export file name for `extension`.
    pub fn suggested_file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.default_file_stem)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
