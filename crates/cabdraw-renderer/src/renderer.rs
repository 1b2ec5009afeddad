//! 场景渲染与深度排序
//!
//! 收集所有带几何体的节点，按视图相关的深度键从远到近排序（画家算法），
//! 再逐个画到绘图表面：正交视图画平面矩形，轴测视图画三面着色的盒子。
//!
//! # 已知限制
//!
//! 深度键只取节点世界位置在单一轴上的分量（轴测为 `x + z`），不是可见性求解器。
//! 对沿排序轴深度区间互不交错的盒子（橱柜板件就是这种排布）结果正确，
//! 对任意相互重叠的盒子可能排错顺序。

use crate::camera::Camera;
use crate::surface::{DrawingSurface, Rect, TextStyle};
use cabdraw_core::math::{Box3, Point2, Vector3};
use cabdraw_core::properties::Color;
use cabdraw_core::scene::{PlacedNode, SceneNode};
use cabdraw_core::settings::RenderSettings;
use cabdraw_core::view::ViewDirection;

use tracing::debug;

/// 投影尺寸小于该值（屏幕单位）的节点不绘制
pub const MIN_PROJECTED_SIZE: f64 = 0.5;

/// 显示标签所需的最小矩形宽度
pub const MIN_LABEL_WIDTH: f64 = 20.0;

/// 显示标签所需的最小矩形高度
pub const MIN_LABEL_HEIGHT: f64 = 15.0;

/// 标签最大字符数，超出截断并加省略号
pub const MAX_LABEL_CHARS: usize = 12;

/// 轴测顶面亮度系数
pub const TOP_FACE_SHADE: f64 = 1.05;

/// 轴测正面亮度系数
pub const FRONT_FACE_SHADE: f64 = 1.0;

/// 轴测右侧面亮度系数
pub const RIGHT_FACE_SHADE: f64 = 0.9;

/// 节点在指定视图下的深度键，值越小越先画
pub fn depth_key(view: ViewDirection, world_position: &Vector3) -> f64 {
    match view {
        ViewDirection::Front => world_position.z,
        ViewDirection::Back => -world_position.z,
        ViewDirection::Left => world_position.x,
        ViewDirection::Right => -world_position.x,
        ViewDirection::Top => world_position.y,
        ViewDirection::Bottom => -world_position.y,
        ViewDirection::Isometric => world_position.x + world_position.z,
    }
}

/// 收集带几何体的节点并按深度排序（稳定排序，同深度保持遍历顺序）
pub fn depth_sorted(root: &SceneNode, view: ViewDirection) -> Vec<PlacedNode<'_>> {
    let mut nodes: Vec<PlacedNode<'_>> = root.geometry_nodes().collect();
    nodes.sort_by(|a, b| {
        depth_key(view, &a.world_position).total_cmp(&depth_key(view, &b.world_position))
    });
    nodes
}

/// 截断标签
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        let head: String = label.chars().take(MAX_LABEL_CHARS).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// 渲染统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// 场景渲染器
pub struct SceneRenderer<'a> {
    camera: &'a Camera,
    settings: &'a RenderSettings,
}

impl<'a> SceneRenderer<'a> {
    pub fn new(camera: &'a Camera, settings: &'a RenderSettings) -> Self {
        Self { camera, settings }
    }

    /// 渲染整个场景
    pub fn render(&self, root: &SceneNode, surface: &mut dyn DrawingSurface) -> RenderStats {
        let mut stats = RenderStats::default();
        for placed in depth_sorted(root, self.camera.view) {
            if self.draw_node(&placed, surface) {
                stats.drawn += 1;
            } else {
                stats.skipped += 1;
            }
        }
        debug!(
            view = %self.camera.view,
            drawn = stats.drawn,
            skipped = stats.skipped,
            "Rendered scene"
        );
        stats
    }

    /// 绘制单个节点；投影退化时返回 `false`
    pub fn draw_node(&self, placed: &PlacedNode<'_>, surface: &mut dyn DrawingSurface) -> bool {
        let Some(bounds) = placed.world_bounds() else {
            return false;
        };
        if self.camera.view.is_isometric() {
            self.draw_isometric(placed.node, &bounds, surface)
        } else {
            self.draw_flat(placed.node, &bounds, surface)
        }
    }

    fn fill_color(&self, node: &SceneNode) -> Option<Color> {
        node.style().fill_color.or(self.settings.fill_color)
    }

    fn stroke_color(&self, node: &SceneNode) -> Color {
        node.style()
            .stroke_color
            .unwrap_or(self.settings.outline_color)
    }

    fn stroke_width(&self, node: &SceneNode) -> f64 {
        node.style().stroke_width * self.settings.outline_width
    }

    /// 正交：填充、描边、标签
    fn draw_flat(&self, node: &SceneNode, bounds: &Box3, surface: &mut dyn DrawingSurface) -> bool {
        let rect = self.camera.project_box(bounds);
        if rect.width < MIN_PROJECTED_SIZE || rect.height < MIN_PROJECTED_SIZE {
            debug!(node = node.name(), "Skipping degenerate projection");
            return false;
        }

        if let Some(fill) = self.fill_color(node) {
            surface.fill_rect(&rect, fill);
        }
        surface.stroke_rect(&rect, self.stroke_color(node), self.stroke_width(node));

        let style = node.style();
        if style.show_label
            && self.settings.show_labels
            && rect.width > MIN_LABEL_WIDTH
            && rect.height > MIN_LABEL_HEIGHT
        {
            self.draw_label(node, &rect, surface);
        }
        true
    }

    fn draw_label(&self, node: &SceneNode, rect: &Rect, surface: &mut dyn DrawingSurface) {
        let style = node.style();
        let center = rect.center();
        // 基线下移约 1/3 字高，使文字视觉居中
        let at = Point2::new(center.x, center.y - style.label_font_size * 0.35);
        surface.text(
            &truncate_label(node.label()),
            at,
            &TextStyle::new(style.label_font_size, style.label_color).centered(),
        );
    }

    /// 轴测：三个可见面（顶、正、右）着色后描边
    fn draw_isometric(
        &self,
        node: &SceneNode,
        bounds: &Box3,
        surface: &mut dyn DrawingSurface,
    ) -> bool {
        let extent = self.camera.project_box(bounds);
        if extent.width < MIN_PROJECTED_SIZE && extent.height < MIN_PROJECTED_SIZE {
            debug!(node = node.name(), "Skipping degenerate projection");
            return false;
        }

        let p: Vec<Point2> = bounds
            .corners()
            .iter()
            .map(|c| self.camera.project(c))
            .collect();

        let top = [p[4], p[5], p[6], p[7]];
        let front = [p[3], p[2], p[6], p[7]];
        let right = [p[1], p[2], p[6], p[5]];

        let base = self
            .fill_color(node)
            .unwrap_or(self.settings.background_color);
        surface.fill_polygon(&top, base.shade(TOP_FACE_SHADE));
        surface.fill_polygon(&front, base.shade(FRONT_FACE_SHADE));
        surface.fill_polygon(&right, base.shade(RIGHT_FACE_SHADE));

        let stroke = self.stroke_color(node);
        let width = self.stroke_width(node);
        surface.stroke_polygon(&front, stroke, width);
        surface.stroke_polygon(&top, stroke, width);
        surface.line(p[1], p[5], stroke, width);
        surface.line(p[2], p[6], stroke, width);
        true
    }
}
