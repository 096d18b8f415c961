#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod drawable;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod panels;
pub mod preview;
pub mod raster;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod tools;

pub use app::NotedApp;
pub use config::SketchConfig;
pub use drawable::{Drawable, StampTrail, Stroke};
pub use error::{ConfigError, ExportError};
pub use history::History;
pub use input::{Gesture, InputEvent, InputHandler};
pub use preview::Preview;
pub use renderer::{DrawingObserver, Renderer, Scene};
pub use state::EditorState;
pub use surface::{Point, Surface};
pub use tools::{Pen, StickerPalette, ToolState};
