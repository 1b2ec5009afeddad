//! DXF 导出
//!
//! 输出 AutoCAD 2000 (AC1015) ASCII DXF，固定四段：HEADER、TABLES、ENTITIES、EOF。
//!
//! - 单位为英寸，1:1，不经过相机比例
//! - 每个板件一条闭合的四顶点 LWPOLYLINE，位于 PARTS 图层
//! - 尺寸线和尺寸文字位于 DIMENSIONS 图层
//! - 所有坐标保留4位小数；相同输入产生逐字节相同的输出

use crate::error::Result;
use crate::export::Exporter;
use cabdraw_core::scene::SceneNode;
use cabdraw_core::settings::RenderSettings;
use cabdraw_core::units::format_fractional_inches;
use cabdraw_core::view::ViewDirection;
use cabdraw_renderer::camera::Camera;
use cabdraw_renderer::renderer::depth_sorted;
use cabdraw_renderer::surface::Rect;
use std::fmt::Write as _;
use tracing::{debug, info, warn};

/// 图层：名称与 ACI 颜色号
pub const LAYERS: [(&str, u8); 3] = [("0", 7), ("PARTS", 5), ("DIMENSIONS", 1)];

pub const PARTS_LAYER: &str = "PARTS";
pub const DIMENSIONS_LAYER: &str = "DIMENSIONS";

/// 投影尺寸低于该值（英寸）的板件不输出
pub const MIN_PART_SIZE: f64 = 0.01;

/// 板件标签的最小宽度
pub const MIN_LABEL_WIDTH: f64 = 2.0;

/// 板件标签的最小高度
pub const MIN_LABEL_HEIGHT: f64 = 1.0;

/// 图形范围外扩量
pub const LIMITS_PADDING: f64 = 5.0;

/// 尺寸线与几何体的距离
pub const DIMENSION_LINE_OFFSET: f64 = 1.5;

/// 尺寸文字与几何体的距离
pub const DIMENSION_TEXT_OFFSET: f64 = 2.5;

const LABEL_HEIGHT: f64 = 0.5;
const DIMENSION_TEXT_HEIGHT: f64 = 0.5;

/// 第一个实体句柄
const FIRST_HANDLE: u32 = 0x100;

/// 坐标格式：4位小数，不输出 `-0.0000`
fn coord(value: f64) -> String {
    format!("{:.4}", value + 0.0)
}

/// 单行 ASCII 文字：换行变空格，其它非 ASCII 字符写成 `\U+XXXX`
fn dxf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' | '\n' => out.push(' '),
            ' '..='~' => out.push(c),
            _ if (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\U+{:04X}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

/// 组码/值对写入器
struct DxfWriter {
    out: String,
    next_handle: u32,
}

impl DxfWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            next_handle: FIRST_HANDLE,
        }
    }

    fn pair(&mut self, code: i32, value: impl std::fmt::Display) {
        let _ = write!(self.out, "{:>3}\n{}\n", code, value);
    }

    fn point(&mut self, code: i32, x: f64, y: f64) {
        self.pair(code, coord(x));
        self.pair(code + 10, coord(y));
    }

    fn point3(&mut self, code: i32, x: f64, y: f64) {
        self.point(code, x, y);
        self.pair(code + 20, coord(0.0));
    }

    fn handle(&mut self) {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.pair(5, format!("{:X}", handle));
    }

    fn begin_section(&mut self, name: &str) {
        self.pair(0, "SECTION");
        self.pair(2, name);
    }

    fn end_section(&mut self) {
        self.pair(0, "ENDSEC");
    }

    fn begin_entity(&mut self, kind: &str, layer: &str) {
        self.pair(0, kind);
        self.handle();
        self.pair(100, "AcDbEntity");
        self.pair(8, layer);
    }

    fn header(&mut self, extents: &Rect) {
        self.begin_section("HEADER");
        self.pair(9, "$ACADVER");
        self.pair(1, "AC1015");
        self.pair(9, "$DWGCODEPAGE");
        self.pair(3, "ANSI_1252");
        self.pair(9, "$INSUNITS");
        self.pair(70, 1);
        self.pair(9, "$LIMMIN");
        self.point(10, extents.min_x() - LIMITS_PADDING, extents.min_y() - LIMITS_PADDING);
        self.pair(9, "$LIMMAX");
        self.point(10, extents.max_x() + LIMITS_PADDING, extents.max_y() + LIMITS_PADDING);
        self.pair(9, "$EXTMIN");
        self.point3(10, extents.min_x(), extents.min_y());
        self.pair(9, "$EXTMAX");
        self.point3(10, extents.max_x(), extents.max_y());
        self.end_section();
    }

    fn tables(&mut self) {
        self.begin_section("TABLES");

        self.pair(0, "TABLE");
        self.pair(2, "LTYPE");
        self.pair(70, 1);
        self.pair(0, "LTYPE");
        self.pair(2, "CONTINUOUS");
        self.pair(70, 0);
        self.pair(3, "Solid line");
        self.pair(72, 65);
        self.pair(73, 0);
        self.pair(40, coord(0.0));
        self.pair(0, "ENDTAB");

        self.pair(0, "TABLE");
        self.pair(2, "LAYER");
        self.pair(70, LAYERS.len());
        for (name, color) in LAYERS {
            self.pair(0, "LAYER");
            self.pair(2, name);
            self.pair(70, 0);
            self.pair(62, color);
            self.pair(6, "CONTINUOUS");
        }
        self.pair(0, "ENDTAB");

        self.end_section();
    }

    fn polyline(&mut self, layer: &str, rect: &Rect) {
        self.begin_entity("LWPOLYLINE", layer);
        self.pair(100, "AcDbPolyline");
        self.pair(90, 4);
        self.pair(70, 1);
        for corner in rect.corners() {
            self.point(10, corner.x, corner.y);
        }
    }

    fn line(&mut self, layer: &str, from: (f64, f64), to: (f64, f64)) {
        self.begin_entity("LINE", layer);
        self.pair(100, "AcDbLine");
        self.point3(10, from.0, from.1);
        self.point3(11, to.0, to.1);
    }

    /// 居中文字（水平居中、竖直居中）
    fn centered_text(&mut self, layer: &str, at: (f64, f64), height: f64, rotation: f64, text: &str) {
        self.begin_entity("TEXT", layer);
        self.pair(100, "AcDbText");
        self.point3(10, at.0, at.1);
        self.pair(40, coord(height));
        self.pair(1, dxf_text(text));
        if rotation != 0.0 {
            self.pair(50, coord(rotation));
        }
        self.pair(72, 1);
        self.point3(11, at.0, at.1);
        self.pair(100, "AcDbText");
        self.pair(73, 2);
    }

    fn finish(mut self) -> String {
        self.pair(0, "EOF");
        self.out
    }
}

/// DXF 导出器
#[derive(Debug, Clone, Default)]
pub struct DxfExporter;

impl DxfExporter {
    pub fn new() -> Self {
        Self
    }

    /// 生成 DXF 文本
    pub fn export_text(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
    ) -> String {
        let projection_view = if view.is_isometric() {
            warn!("DXF export has no isometric projection; using FRONT axis mapping");
            ViewDirection::Front
        } else {
            view
        };
        let camera = Camera::new(projection_view, 1.0);

        let mut parts = Vec::new();
        for placed in depth_sorted(root, projection_view) {
            let Some(bounds) = placed.world_bounds() else {
                continue;
            };
            let rect = camera.project_box(&bounds);
            if rect.width < MIN_PART_SIZE || rect.height < MIN_PART_SIZE {
                debug!(part = placed.node.name(), "Skipping degenerate part");
                continue;
            }
            parts.push((placed.node, rect));
        }

        let total = root.calculate_total_bounds();
        let extents = camera.project_box(&total);

        let mut writer = DxfWriter::new();
        writer.header(&extents);
        writer.tables();

        writer.begin_section("ENTITIES");
        for (node, rect) in &parts {
            writer.polyline(PARTS_LAYER, rect);
            if settings.show_labels
                && node.style().show_label
                && rect.width > MIN_LABEL_WIDTH
                && rect.height > MIN_LABEL_HEIGHT
            {
                let center = rect.center();
                writer.centered_text(PARTS_LAYER, (center.x, center.y), LABEL_HEIGHT, 0.0, node.label());
            }
        }

        if settings.show_dimensions && !parts.is_empty() {
            let center = extents.center();

            let y = extents.min_y() - DIMENSION_LINE_OFFSET;
            writer.line(DIMENSIONS_LAYER, (extents.min_x(), y), (extents.max_x(), y));
            writer.centered_text(
                DIMENSIONS_LAYER,
                (center.x, extents.min_y() - DIMENSION_TEXT_OFFSET),
                DIMENSION_TEXT_HEIGHT,
                0.0,
                &format_fractional_inches(extents.width),
            );

            let x = extents.max_x() + DIMENSION_LINE_OFFSET;
            writer.line(DIMENSIONS_LAYER, (x, extents.min_y()), (x, extents.max_y()));
            writer.centered_text(
                DIMENSIONS_LAYER,
                (extents.max_x() + DIMENSION_TEXT_OFFSET, center.y),
                DIMENSION_TEXT_HEIGHT,
                90.0,
                &format_fractional_inches(extents.height),
            );
        }
        writer.end_section();

        debug!(parts = parts.len(), "Wrote DXF entities");
        writer.finish()
    }
}

impl Exporter for DxfExporter {
    fn export_view(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
    ) -> Result<Vec<u8>> {
        let text = self.export_text(root, view, settings);
        info!(%view, bytes = text.len(), "Exported DXF");
        Ok(text.into_bytes())
    }

    fn file_extension(&self) -> &'static str {
        "dxf"
    }

    fn mime_type(&self) -> &'static str {
        "application/dxf"
    }

    fn format_name(&self) -> &'static str {
        "DXF"
    }
}
