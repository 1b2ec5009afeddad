//! 渲染设置
//!
//! 渲染设置是按值传入每次导出调用的配置，导出器只读不写。
//! 通过预设（`blueprint` / `preview` / `cad_export` / `architectural_blueprint`）
//! 加 `with_*` 覆盖构建，也可以用 JSON 保存和加载（缺失字段取默认值）。

use crate::properties::Color;
use serde::{Deserialize, Serialize};

/// 固定图纸宽度（11 英寸，点）
pub const LETTER_LANDSCAPE_WIDTH: f64 = 792.0;

/// 固定图纸高度（8.5 英寸，点）
pub const LETTER_LANDSCAPE_HEIGHT: f64 = 612.0;

/// 标题栏文本字段
///
/// 未设置的字段在标题栏中显示为占位符。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleBlockInfo {
    pub project_name: Option<String>,
    pub drawn_by: Option<String>,
    pub company: Option<String>,
    pub date: Option<String>,
    pub checked_by: Option<String>,
    pub revision: Option<String>,
    pub description: Option<String>,
    /// 比例文本，未设置时显示 `AS NOTED`
    pub scale_text: Option<String>,
    pub sheet_number: Option<u32>,
    pub total_sheets: Option<u32>,
}

/// 渲染设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    // ===== 比例与边距 =====
    /// 屏幕单位/英寸
    pub scale: f64,
    /// 页边距（屏幕单位）
    pub margin: f64,

    // ===== 线宽 =====
    pub outline_width: f64,
    pub dimension_width: f64,
    pub grid_width: f64,

    // ===== 颜色 =====
    pub outline_color: Color,
    /// 默认填充色，`None` 表示不填充
    pub fill_color: Option<Color>,
    pub dimension_color: Color,
    pub background_color: Color,
    pub grid_color: Color,

    // ===== 尺寸标注 =====
    pub show_dimensions: bool,
    /// 尺寸线与几何体的距离
    pub dimension_offset: f64,
    /// 尺寸文字字号
    pub dimension_text_size: f64,

    // ===== 标签 =====
    pub show_labels: bool,

    // ===== 标题栏 =====
    pub show_title_block: bool,
    pub title_block_height: f64,
    pub title_block: TitleBlockInfo,

    // ===== 网格 =====
    pub show_grid: bool,
    pub grid_spacing: f64,
    /// 图框网格参考的列数
    pub grid_columns: u32,
    /// 图框网格参考的行数
    pub grid_rows: u32,

    // ===== 固定图纸（建筑蓝图） =====
    pub fixed_page_size: bool,
    pub page_width: f64,
    pub page_height: f64,
    pub architectural_border: bool,
    pub traditional_title_block: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::blueprint()
    }
}

impl RenderSettings {
    /// 蓝图预设：白底黑线，无填充，带尺寸和标题栏
    pub fn blueprint() -> Self {
        Self {
            scale: 10.0,
            margin: 50.0,
            outline_width: 1.0,
            dimension_width: 0.5,
            grid_width: 0.25,
            outline_color: Color::BLACK,
            fill_color: None,
            dimension_color: Color::DARK_GRAY,
            background_color: Color::WHITE,
            grid_color: Color::LIGHT_GRAY,
            show_dimensions: true,
            dimension_offset: 20.0,
            dimension_text_size: 10.0,
            show_labels: true,
            show_title_block: true,
            title_block_height: 60.0,
            title_block: TitleBlockInfo::default(),
            show_grid: false,
            grid_spacing: 12.0,
            grid_columns: 8,
            grid_rows: 6,
            fixed_page_size: false,
            page_width: LETTER_LANDSCAPE_WIDTH,
            page_height: LETTER_LANDSCAPE_HEIGHT,
            architectural_border: false,
            traditional_title_block: false,
        }
    }

    /// 预览预设：木色填充，小比例，无标题栏
    pub fn preview() -> Self {
        Self {
            scale: 5.0,
            margin: 20.0,
            fill_color: Some(Color::WOOD),
            outline_color: Color::new(101, 67, 33),
            show_dimensions: false,
            show_title_block: false,
            ..Self::blueprint()
        }
    }

    /// CAD 导出预设：1:1，无填充，带尺寸
    pub fn cad_export() -> Self {
        Self {
            scale: 1.0,
            margin: 10.0,
            fill_color: None,
            show_dimensions: true,
            show_labels: true,
            show_title_block: false,
            ..Self::blueprint()
        }
    }

    /// 建筑蓝图预设：固定 11×8.5 英寸横向图纸，图框、网格参考和传统标题栏
    pub fn architectural_blueprint() -> Self {
        Self {
            fixed_page_size: true,
            page_width: LETTER_LANDSCAPE_WIDTH,
            page_height: LETTER_LANDSCAPE_HEIGHT,
            architectural_border: true,
            traditional_title_block: true,
            show_grid: true,
            dimension_text_size: 8.0,
            ..Self::blueprint()
        }
    }

    /// 是否使用固定图纸的蓝图版式
    pub fn uses_blueprint_layout(&self) -> bool {
        self.fixed_page_size && self.traditional_title_block
    }

    /// 标题栏实际占用的高度
    pub fn effective_title_block_height(&self) -> f64 {
        if self.show_title_block {
            self.title_block_height
        } else {
            0.0
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_fill_color(mut self, color: Option<Color>) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_outline_color(mut self, color: Color) -> Self {
        self.outline_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_dimensions(mut self, show: bool) -> Self {
        self.show_dimensions = show;
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn with_title_block(mut self, show: bool) -> Self {
        self.show_title_block = show;
        self
    }

    pub fn with_grid(mut self, show: bool, spacing: f64) -> Self {
        self.show_grid = show;
        self.grid_spacing = spacing;
        self
    }

    pub fn with_grid_divisions(mut self, columns: u32, rows: u32) -> Self {
        self.grid_columns = columns;
        self.grid_rows = rows;
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.title_block.project_name = Some(name.into());
        self
    }

    pub fn with_drawn_by(mut self, name: impl Into<String>) -> Self {
        self.title_block.drawn_by = Some(name.into());
        self
    }

    pub fn with_company(mut self, name: impl Into<String>) -> Self {
        self.title_block.company = Some(name.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.title_block.date = Some(date.into());
        self
    }

    pub fn with_checked_by(mut self, name: impl Into<String>) -> Self {
        self.title_block.checked_by = Some(name.into());
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.title_block.revision = Some(revision.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.title_block.description = Some(description.into());
        self
    }

    pub fn with_sheet(mut self, number: u32, total: u32) -> Self {
        self.title_block.sheet_number = Some(number);
        self.title_block.total_sheets = Some(total);
        self
    }

    /// 从 JSON 加载（缺失字段取蓝图预设的值）
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 保存为 JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
