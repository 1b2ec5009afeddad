//! 视觉属性定义
//!
//! 包含颜色和节点渲染样式。

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// RGBA颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 从十六进制值创建（如 0xFF0000 表示红色）
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    /// 按亮度系数调整（结果截断到 0..=255，alpha 不变）
    pub fn shade(&self, factor: f64) -> Self {
        let scale = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// 转换为 [0.0, 1.0] 范围的 RGB（PDF 颜色操作数）
    pub fn to_unit_rgb(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// SVG 颜色字符串
    pub fn to_svg(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// 不透明度 [0.0, 1.0]
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::new(200, 200, 200);
    pub const DARK_GRAY: Color = Color::new(64, 64, 64);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const RED: Color = Color::new(255, 0, 0);

    /// 木板填充色
    pub const WOOD: Color = Color::new(222, 184, 135);

    /// 蓝图线条色
    pub const BLUEPRINT_LINE: Color = Color::new(0, 51, 102);
}

/// 节点渲染样式
///
/// `None` 的颜色字段表示沿用渲染设置中的默认值：
/// `fill_color` 为空时用设置中的填充色（若设置也为空则不填充），
/// `stroke_color` 为空时用设置中的轮廓色。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// 填充色
    pub fill_color: Option<Color>,
    /// 描边色
    pub stroke_color: Option<Color>,
    /// 描边宽度
    pub stroke_width: f64,
    /// 是否显示标签
    pub show_label: bool,
    /// 标签颜色
    pub label_color: Color,
    /// 标签字号
    pub label_font_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_width: 1.0,
            show_label: true,
            label_color: Color::BLACK,
            label_font_size: 8.0,
        }
    }
}

impl RenderStyle {
    /// 只画轮廓
    pub fn outline() -> Self {
        Self::default()
    }

    /// 木板填充
    pub fn wood_panel() -> Self {
        Self {
            fill_color: Some(Color::WOOD),
            stroke_color: Some(Color::new(139, 90, 43)),
            ..Default::default()
        }
    }

    /// 蓝图：无填充，只画轮廓
    pub fn blueprint() -> Self {
        Self {
            fill_color: None,
            stroke_color: Some(Color::BLUEPRINT_LINE),
            label_color: Color::BLUEPRINT_LINE,
            ..Default::default()
        }
    }

    /// 设置填充色
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// 设置描边色
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    /// 设置描边宽度
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// 设置标签可见性
    pub fn with_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    /// 包装为可在节点间共享的引用
    pub fn shared(self) -> Arc<RenderStyle> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_clamps() {
        let c = Color::new(250, 100, 0);
        assert_eq!(c.shade(1.05), Color::new(255, 105, 0));
        assert_eq!(c.shade(0.9), Color::new(225, 90, 0));
    }

    #[test]
    fn test_color_formats() {
        assert_eq!(Color::from_hex(0xDEB887), Color::WOOD);
        assert_eq!(Color::WOOD.to_svg(), "#deb887");
        assert_eq!(Color::WHITE.to_unit_rgb(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_style_presets() {
        assert!(RenderStyle::outline().fill_color.is_none());
        assert_eq!(RenderStyle::wood_panel().fill_color, Some(Color::WOOD));
        let bp = RenderStyle::blueprint();
        assert!(bp.fill_color.is_none());
        assert!(bp.stroke_color.is_some());
    }
}
