//! 通用2D绘图表面
//!
//! 所有坐标使用Y轴向上的页面坐标（与 PDF 一致），
//! Y轴向下的后端（SVG、位图）在自己的实现里翻转。

use cabdraw_core::math::Point2;
use cabdraw_core::properties::Color;

/// 轴对齐矩形，`(x, y)` 为左下角
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// 四周收缩
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    /// 左下、右下、右上、左上
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.min_x(), self.min_y()),
            Point2::new(self.max_x(), self.min_y()),
            Point2::new(self.max_x(), self.max_y()),
            Point2::new(self.min_x(), self.max_y()),
        ]
    }
}

/// 文本水平对齐
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// 文本样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub anchor: TextAnchor,
    /// 逆时针旋转角度（度）
    pub rotation: f64,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            anchor: TextAnchor::Start,
            rotation: 0.0,
            bold: false,
        }
    }

    pub fn centered(mut self) -> Self {
        self.anchor = TextAnchor::Middle;
        self
    }

    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Helvetica 的平均字宽（em）
const AVERAGE_CHAR_WIDTH: f64 = 0.55;

/// 估算文本宽度
pub fn estimate_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * AVERAGE_CHAR_WIDTH
}

/// 2D绘图表面
pub trait DrawingSurface {
    /// 填充多边形
    fn fill_polygon(&mut self, points: &[Point2], color: Color);

    /// 描边闭合多边形
    fn stroke_polygon(&mut self, points: &[Point2], color: Color, width: f64);

    /// 画线段
    fn line(&mut self, from: Point2, to: Point2, color: Color, width: f64);

    /// 画文本，`at` 为基线锚点
    fn text(&mut self, text: &str, at: Point2, style: &TextStyle);

    /// 填充矩形
    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.fill_polygon(&rect.corners(), color);
    }

    /// 描边矩形
    fn stroke_rect(&mut self, rect: &Rect, color: Color, width: f64) {
        self.stroke_polygon(&rect.corners(), color, width);
    }
}

/// 记录下来的绘图命令
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillPolygon {
        points: Vec<Point2>,
        color: Color,
    },
    StrokePolygon {
        points: Vec<Point2>,
        color: Color,
        width: f64,
    },
    Line {
        from: Point2,
        to: Point2,
        color: Color,
        width: f64,
    },
    Text {
        text: String,
        at: Point2,
        style: TextStyle,
    },
}

/// 只记录命令的绘图表面（显示列表）
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有文本内容
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 重放到另一个表面
    pub fn replay(&self, target: &mut dyn DrawingSurface) {
        for command in &self.commands {
            match command {
                DrawCommand::FillPolygon { points, color } => target.fill_polygon(points, *color),
                DrawCommand::StrokePolygon {
                    points,
                    color,
                    width,
                } => target.stroke_polygon(points, *color, *width),
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => target.line(*from, *to, *color, *width),
                DrawCommand::Text { text, at, style } => target.text(text, *at, style),
            }
        }
    }
}

impl DrawingSurface for CommandRecorder {
    fn fill_polygon(&mut self, points: &[Point2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[Point2], color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn line(&mut self, from: Point2, to: Point2, color: Color, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn text(&mut self, text: &str, at: Point2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_helpers() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.max_x(), 40.0);
        assert_eq!(r.max_y(), 60.0);
        assert_eq!(r.center(), Point2::new(25.0, 40.0));
        assert_eq!(r.inset(5.0), Rect::new(15.0, 25.0, 20.0, 30.0));
    }

    #[test]
    fn test_recorder_replay() {
        let mut first = CommandRecorder::new();
        first.fill_rect(&Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        first.text("A", Point2::new(0.0, 0.0), &TextStyle::new(8.0, Color::BLACK));

        let mut second = CommandRecorder::new();
        first.replay(&mut second);
        assert_eq!(first.commands, second.commands);
        assert_eq!(second.texts(), vec!["A"]);
    }
}
