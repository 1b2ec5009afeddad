//! 单视图画布
//!
//! 按场景包围盒、比例、边距、尺寸标注空间和标题栏高度计算页面尺寸，
//! 并把背景、网格、场景、尺寸标注和简易标题栏画到一个表面上。
//! 位图、矢量图和 PDF 动态模式共用这套布局。

use crate::annotate::{self, DimensionAnnotator};
use crate::camera::Camera;
use crate::renderer::{RenderStats, SceneRenderer};
use crate::surface::{DrawingSurface, Rect};
use cabdraw_core::math::{Box3, Point2};
use cabdraw_core::scene::SceneNode;
use cabdraw_core::settings::RenderSettings;
use cabdraw_core::view::ViewDirection;
use tracing::debug;

/// 单视图画布布局
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCanvas {
    pub view: ViewDirection,
    /// 页面宽度（屏幕单位）
    pub width: f64,
    /// 页面高度（屏幕单位）
    pub height: f64,
    /// 场景内容在页面上占据的矩形
    pub content: Rect,
    /// 已设置偏移的相机
    pub camera: Camera,
    /// 场景总包围盒
    pub bounds: Box3,
}

impl ViewCanvas {
    /// 计算画布布局
    ///
    /// 内容的投影最小角点落在 `(margin, margin + 标题栏高 + 标注空间)`，
    /// Y轴向上。
    pub fn layout(root: &SceneNode, view: ViewDirection, settings: &RenderSettings) -> Self {
        let bounds = root.calculate_total_bounds();
        let mut camera = Camera::new(view, settings.scale);
        let (pw, ph) = camera.calculate_projected_size(&bounds);

        let title_band = settings.effective_title_block_height();
        // 轴测视图不标注单一的宽高
        let allowance = if view.is_isometric() {
            0.0
        } else {
            annotate::dimension_allowance(settings)
        };

        let origin = Point2::new(settings.margin, settings.margin + title_band + allowance);
        camera.anchor_at(&bounds, origin);

        let width = pw + 2.0 * settings.margin + allowance;
        let height = ph + 2.0 * settings.margin + title_band + allowance;
        debug!(%view, width, height, "Computed canvas layout");

        Self {
            view,
            width,
            height,
            content: Rect::new(origin.x, origin.y, pw, ph),
            camera,
            bounds,
        }
    }

    /// 整页绘制
    pub fn draw(
        &self,
        root: &SceneNode,
        settings: &RenderSettings,
        surface: &mut dyn DrawingSurface,
    ) -> RenderStats {
        let page = Rect::new(0.0, 0.0, self.width, self.height);
        surface.fill_rect(&page, settings.background_color);

        if settings.show_grid {
            annotate::draw_grid(surface, &page, settings);
        }

        let stats = SceneRenderer::new(&self.camera, settings).render(root, surface);

        let dimensions = self.view.dimension_pair(&self.bounds);
        if settings.show_dimensions && !self.view.is_isometric() {
            DimensionAnnotator::new(settings).draw_pair(surface, &self.content, dimensions);
        }

        if settings.show_title_block {
            annotate::draw_simple_title_block(
                surface,
                self.width,
                settings,
                root.label(),
                self.view,
                dimensions,
            );
        }
        stats
    }
}
