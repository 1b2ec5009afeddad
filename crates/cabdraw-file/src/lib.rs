//! CabDraw 导出格式
//!
//! 支持：
//! - `.svg` 矢量图（单视图）
//! - `.png` 位图（单视图，可调分辨率）
//! - `.pdf` 多页文档（动态版式或建筑蓝图版式）
//! - `.dxf` CAD 交换格式（1:1 英寸）

pub mod blueprint;
pub mod dxf_io;
pub mod error;
pub mod export;
pub mod pdf;
pub mod raster;
pub mod svg;

pub use blueprint::BlueprintLayout;
pub use dxf_io::DxfExporter;
pub use error::ExportError;
pub use export::{export_scene, ExportFormat, Exporter};
pub use pdf::{PageMode, PdfExporter};
pub use raster::PngExporter;
pub use svg::SvgExporter;
