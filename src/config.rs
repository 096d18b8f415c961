use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "NOTED_CONFIG";

/// Suggested filename for exported drawings.
pub const EXPORT_FILENAME: &str = "noted_export.png";

/// Settings for the sketchpad. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Canvas fill behind the drawing, as `[r, g, b]`.
    pub canvas_background: [u8; 3],
    /// Pixel size of stamped glyphs on the canvas.
    pub glyph_size: f32,
    /// Minimum displacement on either axis before a stamp trail records
    /// another glyph.
    pub stamp_spacing: f32,
    pub start_thickness: f32,
    pub thin_thickness: f32,
    pub thick_thickness: f32,
    pub initial_stickers: Vec<String>,
    /// Remove strokes that never got a second point when the gesture ends.
    pub discard_degenerate_strokes: bool,
    pub export: ExportConfig,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_background: [0, 0, 0],
            glyph_size: 16.0,
            stamp_spacing: 10.0,
            start_thickness: 1.5,
            thin_thickness: 0.75,
            thick_thickness: 2.5,
            initial_stickers: vec!["💀".to_owned(), "👻".to_owned(), "👹".to_owned()],
            discard_degenerate_strokes: false,
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    /// Uniform scale from canvas coordinates to export pixels.
    pub scale: f32,
    pub background: [u8; 3],
    pub glyph_size: f32,
    pub filename: String,
    /// Where the native build writes exports.
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            scale: 4.0,
            background: [0, 0, 0],
            glyph_size: 16.0,
            filename: EXPORT_FILENAME.to_owned(),
            directory: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    pub fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }
}

impl SketchConfig {
    pub fn canvas_background_color(&self) -> Color32 {
        let [r, g, b] = self.canvas_background;
        Color32::from_rgb(r, g, b)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or defaults if unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("start_thickness", self.start_thickness),
            ("thin_thickness", self.thin_thickness),
            ("thick_thickness", self.thick_thickness),
            ("glyph_size", self.glyph_size),
            ("export.scale", self.export.scale),
            ("export.glyph_size", self.export.glyph_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.stamp_spacing.is_finite() && self.stamp_spacing >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stamp_spacing must not be negative, got {}",
                self.stamp_spacing
            )));
        }
        if self.export.width == 0 || self.export.height == 0 {
            return Err(ConfigError::Invalid("export size must be non-zero".to_owned()));
        }
        if self.export.filename.trim().is_empty() {
            return Err(ConfigError::Invalid("export.filename is empty".to_owned()));
        }
        Ok(())
    }
}
