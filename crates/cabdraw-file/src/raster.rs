//! PNG 导出
//!
//! 先生成与 SVG 导出相同的文档，再用 resvg 光栅化（抗锯齿）并编码为 RGBA PNG。

use crate::error::{ExportError, Result};
use crate::export::Exporter;
use crate::svg::render_svg;
use cabdraw_core::scene::SceneNode;
use cabdraw_core::settings::RenderSettings;
use cabdraw_core::view::ViewDirection;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// 分辨率倍数下限
pub const MIN_RESOLUTION: f32 = 0.25;

/// 分辨率倍数上限
pub const MAX_RESOLUTION: f32 = 8.0;

/// 系统字体库，首次使用时扫描一次
fn system_fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut fontdb = usvg::fontdb::Database::new();
            fontdb.load_system_fonts();
            debug!(faces = fontdb.len(), "Loaded system fonts");
            Arc::new(fontdb)
        })
        .clone()
}

/// PNG 导出器
#[derive(Debug, Clone)]
pub struct PngExporter {
    /// 分辨率倍数（1.0 表示每个屏幕单位一个像素）
    resolution: f32,
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl PngExporter {
    /// 创建导出器，倍数截断到 `[0.25, 8.0]`
    pub fn new(resolution: f32) -> Self {
        let resolution = if resolution.is_finite() {
            resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION)
        } else {
            1.0
        };
        Self { resolution }
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }
}

impl Exporter for PngExporter {
    fn export_view(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
    ) -> Result<Vec<u8>> {
        let (svg, width, height) = render_svg(root, view, settings);

        let mut options = usvg::Options::default();
        options.fontdb = system_fonts();

        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| ExportError::encoding("Failed to parse drawing for rasterization", e))?;

        let out_w = ((width as f32) * self.resolution).round().max(1.0) as u32;
        let out_h = ((height as f32) * self.resolution).round().max(1.0) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(out_w, out_h).ok_or_else(|| {
            ExportError::InvalidInput(format!("cannot allocate {}x{} raster", out_w, out_h))
        })?;
        debug!(out_w, out_h, resolution = self.resolution, "Rasterizing view");

        let background = settings.background_color;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            255,
        ));
        let transform = tiny_skia::Transform::from_scale(self.resolution, self.resolution);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let png = pixmap
            .encode_png()
            .map_err(|e| ExportError::encoding("Failed to encode PNG", e))?;
        info!(%view, width = out_w, height = out_h, bytes = png.len(), "Exported PNG");
        Ok(png)
    }

    fn file_extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }

    fn format_name(&self) -> &'static str {
        "PNG"
    }
}
