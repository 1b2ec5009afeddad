//! 标注：尺寸线、背景网格、简易标题栏

use crate::surface::{DrawingSurface, Rect, TextAnchor, TextStyle};
use cabdraw_core::math::Point2;
use cabdraw_core::properties::Color;
use cabdraw_core::settings::RenderSettings;
use cabdraw_core::units::format_fractional_inches;
use cabdraw_core::view::ViewDirection;

/// 尺寸界线与几何体之间的空隙
const EXTENSION_GAP: f64 = 2.0;

/// 尺寸界线越过尺寸线的长度
const EXTENSION_OVERSHOOT: f64 = 3.0;

/// 尺寸线端部斜线的半长
const TICK_SIZE: f64 = 3.0;

/// 尺寸标注占用的额外空间（偏移 + 文字 + 余量）
pub fn dimension_allowance(settings: &RenderSettings) -> f64 {
    if settings.show_dimensions {
        settings.dimension_offset + settings.dimension_text_size + 4.0
    } else {
        0.0
    }
}

/// 尺寸总结文本，例如 `24" W x 34 1/2" H`
pub fn dimension_summary(width: f64, height: f64) -> String {
    format!(
        "{} W x {} H",
        format_fractional_inches(width),
        format_fractional_inches(height)
    )
}

/// 尺寸标注绘制器
pub struct DimensionAnnotator<'a> {
    settings: &'a RenderSettings,
}

impl<'a> DimensionAnnotator<'a> {
    pub fn new(settings: &'a RenderSettings) -> Self {
        Self { settings }
    }

    fn text_style(&self) -> TextStyle {
        TextStyle::new(self.settings.dimension_text_size, self.settings.dimension_color).centered()
    }

    /// 在内容矩形下方画水平宽度标注
    pub fn draw_width(&self, surface: &mut dyn DrawingSurface, content: &Rect, inches: f64) {
        let color = self.settings.dimension_color;
        let width = self.settings.dimension_width;
        let y = content.min_y() - self.settings.dimension_offset;

        for x in [content.min_x(), content.max_x()] {
            surface.line(
                Point2::new(x, content.min_y() - EXTENSION_GAP),
                Point2::new(x, y - EXTENSION_OVERSHOOT),
                color,
                width,
            );
            surface.line(
                Point2::new(x - TICK_SIZE, y - TICK_SIZE),
                Point2::new(x + TICK_SIZE, y + TICK_SIZE),
                color,
                width,
            );
        }
        surface.line(
            Point2::new(content.min_x(), y),
            Point2::new(content.max_x(), y),
            color,
            width,
        );

        let at = Point2::new(
            content.center().x,
            y - self.settings.dimension_text_size - EXTENSION_GAP,
        );
        surface.text(&format_fractional_inches(inches), at, &self.text_style());
    }

    /// 在内容矩形右侧画竖直高度标注（文字旋转90°）
    pub fn draw_height(&self, surface: &mut dyn DrawingSurface, content: &Rect, inches: f64) {
        let color = self.settings.dimension_color;
        let width = self.settings.dimension_width;
        let x = content.max_x() + self.settings.dimension_offset;

        for y in [content.min_y(), content.max_y()] {
            surface.line(
                Point2::new(content.max_x() + EXTENSION_GAP, y),
                Point2::new(x + EXTENSION_OVERSHOOT, y),
                color,
                width,
            );
            surface.line(
                Point2::new(x - TICK_SIZE, y - TICK_SIZE),
                Point2::new(x + TICK_SIZE, y + TICK_SIZE),
                color,
                width,
            );
        }
        surface.line(
            Point2::new(x, content.min_y()),
            Point2::new(x, content.max_y()),
            color,
            width,
        );

        let at = Point2::new(
            x + self.settings.dimension_text_size + EXTENSION_GAP,
            content.center().y,
        );
        surface.text(
            &format_fractional_inches(inches),
            at,
            &self.text_style().rotated(90.0),
        );
    }

    /// 宽高两个标注
    pub fn draw_pair(
        &self,
        surface: &mut dyn DrawingSurface,
        content: &Rect,
        (width, height): (f64, f64),
    ) {
        self.draw_width(surface, content, width);
        self.draw_height(surface, content, height);
    }
}

/// 在区域内画背景网格
pub fn draw_grid(surface: &mut dyn DrawingSurface, area: &Rect, settings: &RenderSettings) {
    let spacing = settings.grid_spacing;
    if spacing <= 0.0 {
        return;
    }
    let color = settings.grid_color;
    let width = settings.grid_width;

    let mut x = area.min_x();
    while x <= area.max_x() {
        surface.line(
            Point2::new(x, area.min_y()),
            Point2::new(x, area.max_y()),
            color,
            width,
        );
        x += spacing;
    }
    let mut y = area.min_y();
    while y <= area.max_y() {
        surface.line(
            Point2::new(area.min_x(), y),
            Point2::new(area.max_x(), y),
            color,
            width,
        );
        y += spacing;
    }
}

/// 页面底部的简易标题栏：名称、视图、总尺寸
pub fn draw_simple_title_block(
    surface: &mut dyn DrawingSurface,
    page_width: f64,
    settings: &RenderSettings,
    name: &str,
    view: ViewDirection,
    dimensions: (f64, f64),
) {
    let height = settings.title_block_height;
    if height <= 0.0 {
        return;
    }
    let band = Rect::new(0.0, 0.0, page_width, height);
    surface.line(
        Point2::new(band.min_x(), band.max_y()),
        Point2::new(band.max_x(), band.max_y()),
        settings.outline_color,
        settings.outline_width,
    );

    let left = settings.margin;
    let title_size = (height * 0.25).clamp(8.0, 14.0);
    let detail_size = (height * 0.18).clamp(6.0, 10.0);
    let title = settings
        .title_block
        .project_name
        .as_deref()
        .map(|project| format!("{} - {}", project, name))
        .unwrap_or_else(|| name.to_string());

    surface.text(
        &title,
        Point2::new(left, band.max_y() - title_size - 6.0),
        &TextStyle::new(title_size, Color::BLACK).bold(),
    );
    surface.text(
        &format!("{} VIEW", view.label()),
        Point2::new(left, band.min_y() + detail_size + 6.0),
        &TextStyle::new(detail_size, Color::DARK_GRAY),
    );
    surface.text(
        &dimension_summary(dimensions.0, dimensions.1),
        Point2::new(page_width - settings.margin, band.min_y() + detail_size + 6.0),
        &TextStyle::new(detail_size, Color::DARK_GRAY).anchored(TextAnchor::End),
    );
}
