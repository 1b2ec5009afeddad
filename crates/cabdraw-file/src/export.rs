//! 导出模块
//!
//! 所有格式实现同一个 [`Exporter`] 接口：先在内存中生成完整字节，
//! 成功后才写入流或文件，失败时不留下截断的输出。

use crate::dxf_io::DxfExporter;
use crate::error::{ExportError, Result};
use crate::pdf::PdfExporter;
use crate::raster::PngExporter;
use crate::svg::SvgExporter;
use cabdraw_core::scene::SceneNode;
use cabdraw_core::settings::RenderSettings;
use cabdraw_core::view::ViewDirection;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// 格式导出器
pub trait Exporter {
    /// 导出单个视图
    fn export_view(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
    ) -> Result<Vec<u8>>;

    /// 导出多个视图
    ///
    /// 默认只导出第一个视图；支持分页的格式覆盖此方法。
    fn export_views(
        &self,
        root: &SceneNode,
        views: &[ViewDirection],
        settings: &RenderSettings,
    ) -> Result<Vec<u8>> {
        let (first, rest) = views
            .split_first()
            .ok_or_else(|| ExportError::InvalidInput("no views requested".to_string()))?;
        if !rest.is_empty() {
            warn!(
                format = self.format_name(),
                ignored = rest.len(),
                "Format supports a single view; exporting only {}",
                first
            );
        }
        self.export_view(root, *first, settings)
    }

    /// 导出单个视图到输出流
    fn write_view(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
        out: &mut dyn Write,
    ) -> Result<()> {
        let bytes = self.export_view(root, view, settings)?;
        write_stream(out, &bytes)
    }

    /// 导出多个视图到输出流
    fn write_views(
        &self,
        root: &SceneNode,
        views: &[ViewDirection],
        settings: &RenderSettings,
        out: &mut dyn Write,
    ) -> Result<()> {
        let bytes = self.export_views(root, views, settings)?;
        write_stream(out, &bytes)
    }

    /// 导出单个视图到文件
    fn export_view_to_file(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
        path: &Path,
    ) -> Result<()> {
        let bytes = self.export_view(root, view, settings)?;
        write_file(path, &bytes)?;
        info!(format = self.format_name(), path = %path.display(), "Exported to file");
        Ok(())
    }

    /// 导出多个视图到文件
    fn export_views_to_file(
        &self,
        root: &SceneNode,
        views: &[ViewDirection],
        settings: &RenderSettings,
        path: &Path,
    ) -> Result<()> {
        let bytes = self.export_views(root, views, settings)?;
        write_file(path, &bytes)?;
        info!(format = self.format_name(), path = %path.display(), "Exported to file");
        Ok(())
    }

    /// 文件扩展名（不含点）
    fn file_extension(&self) -> &'static str;

    /// MIME 类型
    fn mime_type(&self) -> &'static str;

    /// 格式名称
    fn format_name(&self) -> &'static str;
}

fn write_stream(out: &mut dyn Write, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes)
        .and_then(|_| out.flush())
        .map_err(|e| ExportError::io("Failed to write export stream", e))
}

/// 写入文件；失败时删除不完整的文件
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let result = File::create(path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(e) = result {
        let _ = fs::remove_file(path);
        return Err(ExportError::io(
            format!("Failed to write {}", path.display()),
            e,
        ));
    }
    Ok(())
}

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Svg,
    Png,
    Pdf,
    Dxf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Svg,
        ExportFormat::Png,
        ExportFormat::Pdf,
        ExportFormat::Dxf,
    ];

    /// 默认配置的导出器
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Svg => Box::new(SvgExporter::new()),
            ExportFormat::Png => Box::new(PngExporter::default()),
            ExportFormat::Pdf => Box::new(PdfExporter::new()),
            ExportFormat::Dxf => Box::new(DxfExporter::new()),
        }
    }

    /// 按扩展名识别格式（不区分大小写，可带点）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "svg" => Some(ExportFormat::Svg),
            "png" => Some(ExportFormat::Png),
            "pdf" => Some(ExportFormat::Pdf),
            "dxf" => Some(ExportFormat::Dxf),
            _ => None,
        }
    }

    /// 按文件路径的扩展名识别格式
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// 通用导出函数：按路径扩展名选择格式并写入文件
pub fn export_scene(
    root: &SceneNode,
    views: &[ViewDirection],
    settings: &RenderSettings,
    path: &Path,
) -> Result<()> {
    let format = ExportFormat::from_path(path).ok_or_else(|| {
        ExportError::InvalidInput(format!(
            "unsupported export file extension: {}",
            path.display()
        ))
    })?;
    format
        .exporter()
        .export_views_to_file(root, views, settings, path)
}
