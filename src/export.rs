use crate::config::ExportConfig;
use crate::drawable::Drawable;
use crate::error::ExportError;
use crate::raster::RasterSurface;
use crate::renderer::draw_drawables;

/// Render `drawables` into a fresh fixed-size buffer and encode it as PNG.
///
/// Only reads the drawables; the preview never reaches an export.
pub fn export_png(drawables: &[Drawable], config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
    let surface = render_export(drawables, config)?;
    let png = surface.encode_png()?;
    log::info!(
        "exported {} drawables to a {}x{} PNG ({} bytes)",
        drawables.len(),
        surface.width(),
        surface.height(),
        png.len()
    );
    Ok(png)
}

/// The export buffer before encoding: background, then every drawable at
/// the export scale.
pub fn render_export(
    drawables: &[Drawable],
    config: &ExportConfig,
) -> Result<RasterSurface, ExportError> {
    let mut surface =
        RasterSurface::new(config.width, config.height, config.scale, config.glyph_size)?;
    surface.fill_background(config.background_color());
    draw_drawables(&mut surface, drawables);
    Ok(surface)
}

/// Hands a finished export to the user.
pub trait FileSaver {
    fn save(&mut self, payload: &[u8], filename: &str) -> Result<(), ExportError>;
}

/// Writes exports into a directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DiskSaver {
    directory: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DiskSaver {
    pub fn new(directory: impl Into<std::path::PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSaver for DiskSaver {
    fn save(&mut self, payload: &[u8], filename: &str) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(filename);
        std::fs::write(&path, payload)?;
        log::info!("Exported PNG to: {}", path.display());
        Ok(())
    }
}

/// Triggers a browser download through a temporary object URL.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl FileSaver for BrowserDownload {
    fn save(&mut self, payload: &[u8], filename: &str) -> Result<(), ExportError> {
        use wasm_bindgen::JsCast as _;

        let js_err = |err: wasm_bindgen::JsValue| ExportError::Browser(format!("{err:?}"));

        let bytes = js_sys::Uint8Array::from(payload);
        let parts = js_sys::Array::of1(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;
        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Browser("created element is not an anchor".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
        log::info!("Offered {filename} for download");
        Ok(())
    }
}

/// Collects exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySaver {
    pub saved: Vec<(String, Vec<u8>)>,
}

impl FileSaver for MemorySaver {
    fn save(&mut self, payload: &[u8], filename: &str) -> Result<(), ExportError> {
        self.saved.push((filename.to_owned(), payload.to_vec()));
        Ok(())
    }
}
