//! SVG 导出
//!
//! SVG 的Y轴向下，表面在写出坐标时按页面高度翻转。

use crate::error::Result;
use crate::export::Exporter;
use cabdraw_core::math::Point2;
use cabdraw_core::properties::Color;
use cabdraw_core::scene::SceneNode;
use cabdraw_core::settings::RenderSettings;
use cabdraw_core::view::ViewDirection;
use cabdraw_renderer::canvas::ViewCanvas;
use cabdraw_renderer::surface::{DrawingSurface, TextAnchor, TextStyle};
use std::fmt::Write as _;
use tracing::info;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// 转义 XML 文本
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// 输出 SVG 元素的绘图表面
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    fn flip(&self, p: Point2) -> (f64, f64) {
        (p.x, self.height - p.y)
    }

    fn points_attr(&self, points: &[Point2]) -> String {
        points
            .iter()
            .map(|p| {
                let (x, y) = self.flip(*p);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn opacity_attr(name: &str, color: Color) -> String {
        if color.a == 255 {
            String::new()
        } else {
            format!(r#" {}="{:.3}""#, name, color.opacity())
        }
    }

    /// 完成文档
    pub fn finish(self) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">
"#,
            w = self.width,
            h = self.height
        );
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl DrawingSurface for SvgSurface {
    fn fill_polygon(&mut self, points: &[Point2], color: Color) {
        let points = self.points_attr(points);
        let _ = writeln!(
            self.body,
            r#"  <polygon points="{}" fill="{}"{} stroke="none"/>"#,
            points,
            color.to_svg(),
            Self::opacity_attr("fill-opacity", color)
        );
    }

    fn stroke_polygon(&mut self, points: &[Point2], color: Color, width: f64) {
        let points = self.points_attr(points);
        let _ = writeln!(
            self.body,
            r#"  <polygon points="{}" fill="none" stroke="{}"{} stroke-width="{:.2}" stroke-linejoin="miter"/>"#,
            points,
            color.to_svg(),
            Self::opacity_attr("stroke-opacity", color),
            width
        );
    }

    fn line(&mut self, from: Point2, to: Point2, color: Color, width: f64) {
        let (x1, y1) = self.flip(from);
        let (x2, y2) = self.flip(to);
        let _ = writeln!(
            self.body,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"{} stroke-width="{:.2}"/>"#,
            x1,
            y1,
            x2,
            y2,
            color.to_svg(),
            Self::opacity_attr("stroke-opacity", color),
            width
        );
    }

    fn text(&mut self, text: &str, at: Point2, style: &TextStyle) {
        let (x, y) = self.flip(at);
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight = if style.bold { r#" font-weight="bold""# } else { "" };
        // 表面约定逆时针为正，SVG 顺时针为正
        let transform = if style.rotation != 0.0 {
            format!(
                r#" transform="rotate({:.2} {:.2} {:.2})""#,
                -style.rotation,
                x,
                y
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            self.body,
            r#"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}"{} fill="{}" text-anchor="{}"{}>{}</text>"#,
            x,
            y,
            FONT_FAMILY,
            style.size,
            weight,
            style.color.to_svg(),
            anchor,
            transform,
            escape_xml(text)
        );
    }
}

/// 渲染单个视图为 SVG 文档，同时返回画布尺寸
pub(crate) fn render_svg(
    root: &SceneNode,
    view: ViewDirection,
    settings: &RenderSettings,
) -> (String, f64, f64) {
    let canvas = ViewCanvas::layout(root, view, settings);
    let mut surface = SvgSurface::new(canvas.width, canvas.height);
    canvas.draw(root, settings, &mut surface);
    (surface.finish(), canvas.width, canvas.height)
}

/// SVG 导出器（单视图）
#[derive(Debug, Clone, Default)]
pub struct SvgExporter;

impl SvgExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for SvgExporter {
    fn export_view(
        &self,
        root: &SceneNode,
        view: ViewDirection,
        settings: &RenderSettings,
    ) -> Result<Vec<u8>> {
        let (svg, width, height) = render_svg(root, view, settings);
        info!(%view, width, height, bytes = svg.len(), "Exported SVG");
        Ok(svg.into_bytes())
    }

    fn file_extension(&self) -> &'static str {
        "svg"
    }

    fn mime_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn format_name(&self) -> &'static str {
        "SVG"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabdraw_core::math::Vector3;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A & B <C>"), "A &amp; B &lt;C&gt;");
    }

    #[test]
    fn test_surface_flips_y() {
        let mut surface = SvgSurface::new(100.0, 50.0);
        surface.line(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 50.0),
            Color::BLACK,
            1.0,
        );
        let svg = surface.finish();
        assert!(svg.contains(r#"x1="0.00" y1="50.00" x2="10.00" y2="0.00""#));
    }

    #[test]
    fn test_rotated_text() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.text(
            "12\"",
            Point2::new(50.0, 40.0),
            &TextStyle::new(10.0, Color::BLACK).centered().rotated(90.0),
        );
        let svg = surface.finish();
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"rotate(-90.00 50.00 60.00)"#));
        assert!(svg.contains("12&quot;"));
    }

    #[test]
    fn test_export_front_view() {
        let root = SceneNode::new("Base Cabinet").with_child(
            SceneNode::new("side")
                .with_label("Left Side")
                .with_size(Vector3::new(0.75, 34.5, 24.0)),
        );
        let settings = RenderSettings::blueprint();
        let bytes = SvgExporter::new()
            .export_view(&root, ViewDirection::Front, &settings)
            .unwrap();
        let svg = String::from_utf8(bytes).unwrap();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("FRONT VIEW"));
        assert!(svg.contains("34 1/2&quot;"));
    }
}
