//! 建筑蓝图版式
//!
//! 固定横向图纸上的双线图框、网格参考、传统六行标题栏，
//! 以及标题栏以外的可用绘图区域。所有尺寸单位为点（1/72 英寸）。

use cabdraw_core::math::{Box3, Point2, Vector2};
use cabdraw_core::properties::Color;
use cabdraw_core::settings::{RenderSettings, TitleBlockInfo};
use cabdraw_core::view::ViewDirection;
use cabdraw_renderer::camera::Camera;
use cabdraw_renderer::surface::{DrawingSurface, Rect, TextAnchor, TextStyle};
use tracing::debug;

/// 外框距纸边（0.5 英寸）
pub const OUTER_MARGIN: f64 = 36.0;

/// 内框与外框的间距（0.125 英寸）
pub const BORDER_GAP: f64 = 9.0;

/// 网格参考带宽度
pub const GRID_ZONE: f64 = 18.0;

/// 网格参考带内侧的额外边距
pub const DRAWING_MARGIN: f64 = 10.0;

/// 标题栏宽度（3.5 英寸）
pub const TITLE_BLOCK_WIDTH: f64 = 252.0;

/// 标题栏高度（2.25 英寸）
pub const TITLE_BLOCK_HEIGHT: f64 = 162.0;

/// 绘图区为标题栏预留的额外间隙
pub const TITLE_BLOCK_CLEARANCE: f64 = 30.0;

/// 标题栏各行高度，自上而下
pub const TITLE_BLOCK_ROWS: [f64; 6] = [32.0, 32.0, 24.0, 24.0, 24.0, 26.0];

/// 外框线宽
pub const OUTER_BORDER_WIDTH: f64 = 3.0;

/// 内框线宽
pub const INNER_BORDER_WIDTH: f64 = 1.0;

/// 内容适配时每个方向为尺寸标注预留的空间
pub const DIMENSION_RESERVE: f64 = 60.0;

/// 自动比例的舒适系数
pub const FIT_FACTOR: f64 = 0.65;

/// 内容中心上移量，给下方宽度标注留位置
pub const CONTENT_LIFT: f64 = 15.0;

/// 标题栏数值的最大字符数
const MAX_VALUE_CHARS: usize = 14;

const LABEL_SIZE: f64 = 5.5;
const VALUE_SIZE: f64 = 8.0;
const CELL_PADDING: f64 = 4.0;

/// 截断过长的标题栏数值
pub fn truncate_value(value: &str) -> String {
    if value.chars().count() > MAX_VALUE_CHARS {
        let head: String = value.chars().take(MAX_VALUE_CHARS - 2).collect();
        format!("{}..", head)
    } else {
        value.to_string()
    }
}

/// 列标签：A..Z，之后 AA、AB……
pub fn column_label(index: u32) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        label.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn or_placeholder(value: &Option<String>) -> &str {
    non_empty(value).unwrap_or("-")
}

/// 标题栏数值（已填充占位符）
#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlockValues {
    pub company: String,
    pub drawing_title: String,
    pub view_name: String,
    pub scale: String,
    pub date: String,
    pub drawn_by: String,
    pub checked_by: String,
    pub revision: String,
    pub description: String,
    pub project: String,
    pub sheet: String,
}

impl TitleBlockValues {
    /// 由标题栏字段生成；未设置的字段用占位符
    pub fn resolve(
        info: &TitleBlockInfo,
        cabinet_name: &str,
        view: ViewDirection,
        sheet_number: u32,
        total_sheets: u32,
    ) -> Self {
        let view_name = format!("{} VIEW", view.label());
        Self {
            company: or_placeholder(&info.company).to_string(),
            drawing_title: cabinet_name.to_string(),
            scale: non_empty(&info.scale_text)
                .unwrap_or("AS NOTED")
                .to_string(),
            date: non_empty(&info.date).map_or_else(
                || chrono::Local::now().format("%m/%d/%Y").to_string(),
                str::to_string,
            ),
            drawn_by: or_placeholder(&info.drawn_by).to_string(),
            checked_by: or_placeholder(&info.checked_by).to_string(),
            revision: or_placeholder(&info.revision).to_string(),
            description: non_empty(&info.description)
                .map_or_else(|| view_name.clone(), str::to_string),
            project: or_placeholder(&info.project_name).to_string(),
            sheet: format!("{} OF {}", sheet_number, total_sheets),
            view_name,
        }
    }
}

/// 蓝图版式
#[derive(Debug, Clone)]
pub struct BlueprintLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub columns: u32,
    pub rows: u32,
    pub line_color: Color,
}

impl BlueprintLayout {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            page_width: settings.page_width,
            page_height: settings.page_height,
            columns: settings.grid_columns.max(1),
            rows: settings.grid_rows.max(1),
            line_color: Color::BLACK,
        }
    }

    fn page(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width, self.page_height)
    }

    /// 外框矩形
    pub fn outer_border(&self) -> Rect {
        self.page().inset(OUTER_MARGIN)
    }

    /// 内框矩形
    pub fn inner_border(&self) -> Rect {
        self.page().inset(OUTER_MARGIN + BORDER_GAP)
    }

    /// 网格参考带内侧边界
    pub fn grid_zone_inner(&self) -> Rect {
        self.inner_border().inset(GRID_ZONE)
    }

    /// 标题栏矩形（右下角，紧贴网格参考带内侧）
    pub fn title_block_rect(&self) -> Rect {
        let zone = self.grid_zone_inner();
        Rect::new(
            zone.max_x() - TITLE_BLOCK_WIDTH,
            zone.min_y(),
            TITLE_BLOCK_WIDTH,
            TITLE_BLOCK_HEIGHT,
        )
    }

    /// 可用绘图区域：去掉图框、网格带、边距以及右侧和底部为标题栏预留的部分
    pub fn get_drawing_area(&self) -> Rect {
        let inner = self.grid_zone_inner().inset(DRAWING_MARGIN);
        let reserve_right = TITLE_BLOCK_WIDTH + TITLE_BLOCK_CLEARANCE;
        let reserve_bottom = TITLE_BLOCK_HEIGHT + TITLE_BLOCK_CLEARANCE;
        Rect::new(
            inner.x,
            inner.y + reserve_bottom,
            (inner.width - reserve_right).max(0.0),
            (inner.height - reserve_bottom).max(0.0),
        )
    }

    /// 把内容适配到绘图区：自动比例 ×0.65，居中后上移
    pub fn fit_camera(&self, bounds: &Box3, view: ViewDirection) -> Camera {
        let area = self.get_drawing_area();
        let probe = Camera::new(view, 1.0);
        let fit = probe.calculate_auto_scale(
            bounds,
            area.width - DIMENSION_RESERVE,
            area.height - DIMENSION_RESERVE,
            0.0,
        );
        let mut camera = Camera::new(view, fit * FIT_FACTOR);
        camera.center_on(bounds, area.width, area.height, 0.0);
        camera.offset += Vector2::new(area.x, area.y + CONTENT_LIFT);
        debug!(%view, scale = camera.scale, "Fitted view to drawing area");
        camera
    }

    /// 双线图框
    pub fn draw_borders(&self, surface: &mut dyn DrawingSurface) {
        surface.stroke_rect(&self.outer_border(), self.line_color, OUTER_BORDER_WIDTH);
        surface.stroke_rect(&self.inner_border(), self.line_color, INNER_BORDER_WIDTH);
    }

    /// 网格参考：四边刻度线，上下标列字母，左右标行号
    pub fn draw_grid_references(&self, surface: &mut dyn DrawingSurface) {
        let outer = self.inner_border();
        let inner = self.grid_zone_inner();
        let color = self.line_color;
        let text = TextStyle::new(7.0, color).centered();

        surface.stroke_rect(&inner, color, 0.5);

        let cell_w = outer.width / self.columns as f64;
        for i in 0..self.columns {
            let x0 = outer.min_x() + i as f64 * cell_w;
            if i > 0 {
                surface.line(
                    Point2::new(x0, outer.min_y()),
                    Point2::new(x0, inner.min_y()),
                    color,
                    0.5,
                );
                surface.line(
                    Point2::new(x0, outer.max_y()),
                    Point2::new(x0, inner.max_y()),
                    color,
                    0.5,
                );
            }
            let label = column_label(i);
            let cx = x0 + cell_w / 2.0;
            surface.text(
                &label,
                Point2::new(cx, outer.min_y() + GRID_ZONE / 2.0 - 2.5),
                &text,
            );
            surface.text(
                &label,
                Point2::new(cx, outer.max_y() - GRID_ZONE / 2.0 - 2.5),
                &text,
            );
        }

        let cell_h = outer.height / self.rows as f64;
        for i in 0..self.rows {
            // i 从上往下数
            let y_top = outer.max_y() - i as f64 * cell_h;
            if i > 0 {
                surface.line(
                    Point2::new(outer.min_x(), y_top),
                    Point2::new(inner.min_x(), y_top),
                    color,
                    0.5,
                );
                surface.line(
                    Point2::new(outer.max_x(), y_top),
                    Point2::new(inner.max_x(), y_top),
                    color,
                    0.5,
                );
            }
            let label = (self.rows - i).to_string();
            let cy = y_top - cell_h / 2.0 - 2.5;
            surface.text(
                &label,
                Point2::new(outer.min_x() + GRID_ZONE / 2.0, cy),
                &text,
            );
            surface.text(
                &label,
                Point2::new(outer.max_x() - GRID_ZONE / 2.0, cy),
                &text,
            );
        }
    }

    /// 传统标题栏
    pub fn draw_title_block(&self, surface: &mut dyn DrawingSurface, values: &TitleBlockValues) {
        let block = self.title_block_rect();
        let color = self.line_color;
        surface.fill_rect(&block, Color::WHITE);
        surface.stroke_rect(&block, color, 1.5);

        // 各行的上边界
        let mut row_tops = Vec::with_capacity(TITLE_BLOCK_ROWS.len());
        let mut y = block.max_y();
        for height in TITLE_BLOCK_ROWS {
            row_tops.push(y);
            y -= height;
            if y > block.min_y() + f64::EPSILON {
                surface.line(
                    Point2::new(block.min_x(), y),
                    Point2::new(block.max_x(), y),
                    color,
                    0.75,
                );
            }
        }

        // 下面四行的竖直分隔线
        let mid_x = block.min_x() + block.width / 2.0;
        surface.line(
            Point2::new(mid_x, row_tops[2]),
            Point2::new(mid_x, block.min_y()),
            color,
            0.75,
        );

        let cx = block.center().x;
        surface.text(
            &truncate_label_line(&values.company, 28),
            Point2::new(cx, row_tops[0] - 20.0),
            &TextStyle::new(12.0, color).centered().bold(),
        );
        surface.text(
            &truncate_label_line(&values.drawing_title, 32),
            Point2::new(cx, row_tops[1] - 14.0),
            &TextStyle::new(10.0, color).centered().bold(),
        );
        surface.text(
            &values.view_name,
            Point2::new(cx, row_tops[1] - 26.0),
            &TextStyle::new(8.0, Color::DARK_GRAY).centered(),
        );

        let cells = [
            (("SCALE", &values.scale), ("DATE", &values.date)),
            (("DRAWN BY", &values.drawn_by), ("CHECKED BY", &values.checked_by)),
            (("REVISION", &values.revision), ("DESCRIPTION", &values.description)),
            (("PROJECT", &values.project), ("SHEET", &values.sheet)),
        ];
        for (row, (left, right)) in cells.iter().enumerate() {
            let top = row_tops[row + 2];
            self.draw_cell(surface, block.min_x(), top, left.0, left.1);
            self.draw_cell(surface, mid_x, top, right.0, right.1);
        }
    }

    fn draw_cell(
        &self,
        surface: &mut dyn DrawingSurface,
        left: f64,
        top: f64,
        label: &str,
        value: &str,
    ) {
        let x = left + CELL_PADDING;
        surface.text(
            label,
            Point2::new(x, top - CELL_PADDING - LABEL_SIZE),
            &TextStyle::new(LABEL_SIZE, Color::GRAY).anchored(TextAnchor::Start),
        );
        surface.text(
            &truncate_value(value),
            Point2::new(x, top - CELL_PADDING - LABEL_SIZE - 3.0 - VALUE_SIZE),
            &TextStyle::new(VALUE_SIZE, Color::BLACK),
        );
    }
}

/// 标题栏上部整行文本的截断
fn truncate_label_line(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 2).collect();
        format!("{}..", head)
    } else {
        text.to_string()
    }
}
