//! PDF 导出
//!
//! 每个视图一页。两种模式：
//!
//! - **动态模式**：页面尺寸随内容变化，版式与 SVG/PNG 相同
//! - **蓝图模式**：固定横向图纸，图框、网格参考、传统标题栏，页码 "N OF total"
//!
//! 设置同时要求固定图纸和传统标题栏时使用蓝图模式。

use crate::blueprint::{BlueprintLayout, TitleBlockValues};
use crate::error::{ExportError, Result};
use crate::export::Exporter;
use cabdraw_core::math::Point2;
use cabdraw_core::properties::Color;
use cabdraw_core::scene::SceneNode;
use cabdraw_core::settings::RenderSettings;
use cabdraw_core::view::ViewDirection;
use cabdraw_renderer::annotate::DimensionAnnotator;
use cabdraw_renderer::canvas::ViewCanvas;
use cabdraw_renderer::renderer::SceneRenderer;
use cabdraw_renderer::surface::{estimate_text_width, DrawingSurface, Rect, TextAnchor, TextStyle};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use tracing::{debug, info};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// CP1252 在 0x80..=0x9F 区间的字符
const WIN_ANSI_EXTRAS: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// 按 WinAnsiEncoding 编码文字，无法表示的字符写成 `?`
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => WIN_ANSI_EXTRAS
                .iter()
                .find(|(extra, _)| *extra == c)
                .map_or(b'?', |(_, byte)| *byte),
        })
        .collect()
}

/// 页面模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    Dynamic,
    Blueprint,
}

impl PageMode {
    pub fn for_settings(settings: &RenderSettings) -> Self {
        if settings.uses_blueprint_layout() {
            PageMode::Blueprint
        } else {
            PageMode::Dynamic
        }
    }
}

/// 生成 PDF 内容流操作的绘图表面
pub struct PdfSurface {
    operations: Vec<Operation>,
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSurface {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn set_fill(&mut self, color: Color) {
        let [r, g, b] = color.to_unit_rgb();
        self.push("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)]);
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        let [r, g, b] = color.to_unit_rgb();
        self.push("RG", vec![Object::Real(r), Object::Real(g), Object::Real(b)]);
        self.push("w", vec![real(width)]);
    }

    fn path(&mut self, points: &[Point2], close: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.push("m", vec![real(first.x), real(first.y)]);
        for p in rest {
            self.push("l", vec![real(p.x), real(p.y)]);
        }
        if close {
            self.push("h", vec![]);
        }
    }

    pub fn into_content(self) -> Content {
        Content {
            operations: self.operations,
        }
    }
}

impl DrawingSurface for PdfSurface {
    fn fill_polygon(&mut self, points: &[Point2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.set_fill(color);
        self.path(points, true);
        self.push("f", vec![]);
    }

    fn stroke_polygon(&mut self, points: &[Point2], color: Color, width: f64) {
        if points.len() < 2 {
            return;
        }
        self.set_stroke(color, width);
        self.path(points, true);
        self.push("S", vec![]);
    }

    fn line(&mut self, from: Point2, to: Point2, color: Color, width: f64) {
        self.set_stroke(color, width);
        self.path(&[from, to], false);
        self.push("S", vec![]);
    }

    fn text(&mut self, text: &str, at: Point2, style: &TextStyle) {
        let (sin, cos) = style.rotation.to_radians().sin_cos();
        let shift = match style.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => estimate_text_width(text, style.size) / 2.0,
            TextAnchor::End => estimate_text_width(text, style.size),
        };
        let x = at.x - cos * shift;
        let y = at.y - sin * shift;
        let font = if style.bold { FONT_BOLD } else { FONT_REGULAR };

        self.set_fill(style.color);
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(font.as_bytes().to_vec()), real(style.size)]);
        self.push(
            "Tm",
            vec![real(cos), real(sin), real(-sin), real(cos), real(x), real(y)],
        );
        self.push(
            "Tj",
            vec![Object::String(win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }
}

/// 一页：尺寸与内容
struct PdfPage {
    width: f64,
    height: f64,
    content: Content,
}

/// 把页面组装成 PDF 文档
fn assemble(pages: Vec<PdfPage>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular_id,
            FONT_BOLD => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let bytes = page
            .content
            .encode()
            .map_err(|e| ExportError::encoding("Failed to encode PDF page content", e))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), bytes));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(page.width),
                real(page.height),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::encoding("Failed to serialize PDF document", e))?;
    Ok(buffer)
}

/// PDF 导出器（多页）
#[derive(Debug, Clone, Default)]
pub struct PdfExporter;

impl PdfExporter {
    pub fn new() -> Self {
        Self
    }

    fn dynamic_page(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
    ) -> PdfPage {
        let canvas = ViewCanvas::layout(root, view, settings);
        let mut surface = PdfSurface::new();
        let stats = canvas.draw(root, settings, &mut surface);
        debug!(%view, drawn = stats.drawn, "Rendered dynamic PDF page");
        PdfPage {
            width: canvas.width,
            height: canvas.height,
            content: surface.into_content(),
        }
    }

    fn blueprint_page(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
        sheet_number: u32,
        total_sheets: u32,
    ) -> PdfPage {
        let layout = BlueprintLayout::new(settings);
        let mut surface = PdfSurface::new();

        surface.fill_rect(
            &Rect::new(0.0, 0.0, layout.page_width, layout.page_height),
            Color::WHITE,
        );
        if settings.architectural_border {
            layout.draw_borders(&mut surface);
            layout.draw_grid_references(&mut surface);
        }

        let bounds = root.calculate_total_bounds();
        let camera = layout.fit_camera(&bounds, view);
        let stats = SceneRenderer::new(&camera, settings).render(root, &mut surface);

        if settings.show_dimensions && !view.is_isometric() {
            let content = camera.project_box(&bounds);
            DimensionAnnotator::new(settings).draw_pair(
                &mut surface,
                &content,
                view.dimension_pair(&bounds),
            );
        }

        let values = TitleBlockValues::resolve(
            &settings.title_block,
            root.label(),
            view,
            sheet_number,
            total_sheets,
        );
        layout.draw_title_block(&mut surface, &values);
        debug!(%view, sheet = %values.sheet, drawn = stats.drawn, "Rendered blueprint sheet");

        PdfPage {
            width: layout.page_width,
            height: layout.page_height,
            content: surface.into_content(),
        }
    }
}

impl Exporter for PdfExporter {
    fn export_view(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
    ) -> Result<Vec<u8>> {
        self.export_views(root, &[view], settings)
    }

    fn export_views(
        &self,
        root: &SceneNode,
        views: &[ViewDirection],
        settings: &RenderSettings,
    ) -> Result<Vec<u8>> {
        if views.is_empty() {
            return Err(ExportError::InvalidInput("no views requested".to_string()));
        }

        let mode = PageMode::for_settings(settings);
        let pages: Vec<PdfPage> = match mode {
            PageMode::Dynamic => views
                .iter()
                .map(|view| self.dynamic_page(root, *view, settings))
                .collect(),
            PageMode::Blueprint => {
                let count = u32::try_from(views.len()).unwrap_or(u32::MAX);
                let first = settings.title_block.sheet_number.unwrap_or(1);
                let total = settings
                    .title_block
                    .total_sheets
                    .unwrap_or_else(|| first.saturating_sub(1).saturating_add(count));
                views
                    .iter()
                    .zip(0u32..)
                    .map(|(view, i)| {
                        self.blueprint_page(root, *view, settings, first.saturating_add(i), total)
                    })
                    .collect()
            }
        };

        let bytes = assemble(pages)?;
        info!(?mode, pages = views.len(), bytes = bytes.len(), "Exported PDF");
        Ok(bytes)
    }

    fn file_extension(&self) -> &'static str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn format_name(&self) -> &'static str {
        "PDF"
    }
}
