//! 投影相机
//!
//! 把3D点/包围盒投影到2D屏幕坐标（Y轴向上）。
//!
//! 正交：`screen = ±axis(point) * scale + offset`，按视图的轴映射和镜像标志取分量。
//! 轴测：`x' = (x - z)·cos30`，`y' = y + (x + z)·sin30`，再缩放加偏移。

use crate::surface::Rect;
use cabdraw_core::math::{Box3, Point2, Vector2, Vector3, EPSILON};
use cabdraw_core::view::{ViewDirection, COS_30, SIN_30};

/// 投影相机
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// 视图方向
    pub view: ViewDirection,

    /// 缩放（屏幕单位/英寸）
    pub scale: f64,

    /// 屏幕偏移
    pub offset: Vector2,
}

impl Camera {
    /// 创建新的相机
    pub fn new(view: ViewDirection, scale: f64) -> Self {
        Self {
            view,
            scale,
            offset: Vector2::zeros(),
        }
    }

    /// 设置偏移
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// 单位比例、零偏移下的投影
    fn project_unit(&self, point: &Vector3) -> (f64, f64) {
        match self.view.axis_mapping() {
            Some(mapping) => {
                let mut x = mapping.horizontal.value(point);
                let mut y = mapping.vertical.value(point);
                if mapping.mirror_horizontal {
                    x = -x;
                }
                if mapping.mirror_vertical {
                    y = -y;
                }
                (x, y)
            }
            None => (
                (point.x - point.z) * COS_30,
                point.y + (point.x + point.z) * SIN_30,
            ),
        }
    }

    /// 投影一个点
    pub fn project(&self, point: &Vector3) -> Point2 {
        let (x, y) = self.project_unit(point);
        Point2::new(
            x * self.scale + self.offset.x,
            y * self.scale + self.offset.y,
        )
    }

    /// 投影包围盒，返回屏幕上的外接矩形
    pub fn project_box(&self, bounds: &Box3) -> Rect {
        let mut min = Point2::new(f64::MAX, f64::MAX);
        let mut max = Point2::new(f64::MIN, f64::MIN);
        for corner in bounds.corners() {
            let p = self.project(&corner);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// 投影尺寸（只看包围盒尺寸，与位置和偏移无关）
    pub fn calculate_projected_size(&self, bounds: &Box3) -> (f64, f64) {
        let origin_box = Box3::new(Vector3::zeros(), bounds.size);
        let unshifted = Camera::new(self.view, self.scale);
        let rect = unshifted.project_box(&origin_box);
        (rect.width, rect.height)
    }

    /// 计算使包围盒适配屏幕的比例
    ///
    /// 可用区域为屏幕尺寸减去两倍边距，两个方向的比值取较小者，
    /// 因此结果在一个方向上恰好贴边，另一个方向不超出。
    /// 投影尺寸为零的方向不参与计算；两个方向都为零时保持当前比例。
    pub fn calculate_auto_scale(
        &self,
        bounds: &Box3,
        screen_width: f64,
        screen_height: f64,
        margin: f64,
    ) -> f64 {
        let (pw, ph) = Camera::new(self.view, 1.0).calculate_projected_size(bounds);
        let available_w = (screen_width - 2.0 * margin).max(0.0);
        let available_h = (screen_height - 2.0 * margin).max(0.0);

        let ratios = [(available_w, pw), (available_h, ph)];
        ratios
            .iter()
            .filter(|(_, projected)| *projected > EPSILON)
            .map(|(available, projected)| available / projected)
            .reduce(f64::min)
            .unwrap_or(self.scale)
    }

    /// 调整偏移使包围盒在屏幕中居中
    ///
    /// 偏移 = (屏幕尺寸 - 投影尺寸) / 2 - 投影最小角点。
    /// 对原点处的包围盒，正交视图的最小角点为零；轴测视图的水平最小值为
    /// `-depth·cos30·scale`，即内容整体右移以抵消深度方向的左倾。
    pub fn center_on(&mut self, bounds: &Box3, screen_width: f64, screen_height: f64, margin: f64) {
        let unshifted = Camera::new(self.view, self.scale);
        let rect = unshifted.project_box(bounds);
        let available_w = screen_width - 2.0 * margin;
        let available_h = screen_height - 2.0 * margin;
        self.offset = Vector2::new(
            margin + (available_w - rect.width) / 2.0 - rect.x,
            margin + (available_h - rect.height) / 2.0 - rect.y,
        );
    }

    /// 调整偏移使包围盒的投影最小角点落在指定位置
    pub fn anchor_at(&mut self, bounds: &Box3, origin: Point2) {
        let unshifted = Camera::new(self.view, self.scale);
        let rect = unshifted.project_box(bounds);
        self.offset = Vector2::new(origin.x - rect.x, origin.y - rect.y);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(ViewDirection::Front, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabdraw_core::math::approx_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample_box() -> Box3 {
        Box3::new(Vector3::new(3.0, 1.0, 2.0), Vector3::new(24.0, 34.5, 12.0))
    }

    #[test]
    fn test_front_projection() {
        let camera = Camera::new(ViewDirection::Front, 2.0).with_offset(Vector2::new(10.0, 20.0));
        let p = camera.project(&Vector3::new(1.0, 2.0, 3.0));
        assert!(approx_eq(p.x, 12.0));
        assert!(approx_eq(p.y, 24.0));
    }

    #[test]
    fn test_mirrored_views_negate_one_axis() {
        let point = Vector3::new(1.5, 2.5, 3.5);
        for view in ViewDirection::ALL_ORTHOGRAPHIC {
            let camera = Camera::new(view, 1.0);
            let mapping = view.axis_mapping().unwrap();
            let p = camera.project(&point);

            // 沿镜像轴取反后的点投影为相反数
            let mut mirrored = point;
            if mapping.mirror_horizontal {
                match mapping.horizontal {
                    cabdraw_core::math::Axis::X => mirrored.x = -mirrored.x,
                    cabdraw_core::math::Axis::Y => mirrored.y = -mirrored.y,
                    cabdraw_core::math::Axis::Z => mirrored.z = -mirrored.z,
                }
            }
            if mapping.mirror_vertical {
                match mapping.vertical {
                    cabdraw_core::math::Axis::X => mirrored.x = -mirrored.x,
                    cabdraw_core::math::Axis::Y => mirrored.y = -mirrored.y,
                    cabdraw_core::math::Axis::Z => mirrored.z = -mirrored.z,
                }
            }
            let q = camera.project(&mirrored);
            let raw_h = mapping.horizontal.value(&point);
            let raw_v = mapping.vertical.value(&point);
            assert!(approx_eq(p.x, if mapping.mirror_horizontal { -raw_h } else { raw_h }), "{view}");
            assert!(approx_eq(p.y, if mapping.mirror_vertical { -raw_v } else { raw_v }), "{view}");
            if mapping.mirror_horizontal {
                assert!(approx_eq(q.x, raw_h), "{view}");
            }
            if mapping.mirror_vertical {
                assert!(approx_eq(q.y, raw_v), "{view}");
            }
        }
    }

    #[test]
    fn test_back_mirrors_front() {
        let point = Vector3::new(4.0, 5.0, 6.0);
        let front = Camera::new(ViewDirection::Front, 1.0).project(&point);
        let back = Camera::new(ViewDirection::Back, 1.0).project(&point);
        assert!(approx_eq(front.x, -back.x));
        assert!(approx_eq(front.y, back.y));

        let top = Camera::new(ViewDirection::Top, 1.0).project(&point);
        let bottom = Camera::new(ViewDirection::Bottom, 1.0).project(&point);
        assert!(approx_eq(top.x, bottom.x));
        assert!(approx_eq(top.y, -bottom.y));
    }

    #[test]
    fn test_isometric_projection() {
        let camera = Camera::new(ViewDirection::Isometric, 1.0);
        let p = camera.project(&Vector3::new(2.0, 1.0, 0.0));
        assert!(close(p.x, 2.0 * COS_30));
        assert!(close(p.y, 1.0 + 2.0 * SIN_30));

        let q = camera.project(&Vector3::new(0.0, 0.0, 2.0));
        assert!(close(q.x, -2.0 * COS_30));
        assert!(close(q.y, 1.0));
    }

    #[test]
    fn test_projected_size_ignores_position_and_offset() {
        let b = sample_box();
        for view in ViewDirection::ALL {
            let a = Camera::new(view, 3.0).calculate_projected_size(&b);
            let shifted = Camera::new(view, 3.0)
                .with_offset(Vector2::new(100.0, -50.0))
                .calculate_projected_size(&b.translated(Vector3::new(7.0, 8.0, 9.0)));
            assert!(close(a.0, shifted.0) && close(a.1, shifted.1), "{view}");
        }
    }

    #[test]
    fn test_projected_size_scales_linearly() {
        let b = sample_box();
        for view in ViewDirection::ALL {
            let (w1, h1) = Camera::new(view, 1.5).calculate_projected_size(&b);
            let (wk, hk) = Camera::new(view, 1.5 * 4.0).calculate_projected_size(&b);
            assert!(close(wk, w1 * 4.0), "{view}");
            assert!(close(hk, h1 * 4.0), "{view}");
        }
    }

    #[test]
    fn test_isometric_projected_size() {
        let b = sample_box();
        let (w, h) = Camera::new(ViewDirection::Isometric, 1.0).calculate_projected_size(&b);
        assert!(close(w, (24.0 + 12.0) * COS_30));
        assert!(close(h, 34.5 + (24.0 + 12.0) * SIN_30));
    }

    #[test]
    fn test_auto_scale_fits_with_one_binding_axis() {
        let b = sample_box();
        let (sw, sh, margin) = (800.0, 600.0, 40.0);
        for view in ViewDirection::ALL {
            let camera = Camera::new(view, 1.0);
            let scale = camera.calculate_auto_scale(&b, sw, sh, margin);
            let (pw, ph) = Camera::new(view, scale).calculate_projected_size(&b);
            let (aw, ah) = (sw - 2.0 * margin, sh - 2.0 * margin);
            assert!(pw <= aw + 1e-9 && ph <= ah + 1e-9, "{view}");
            assert!(close(pw, aw) || close(ph, ah), "{view}");
        }
    }

    #[test]
    fn test_auto_scale_ignores_flat_axis() {
        let panel = Box3::new(Vector3::zeros(), Vector3::new(0.0, 30.0, 24.0));
        let scale = Camera::new(ViewDirection::Front, 1.0).calculate_auto_scale(&panel, 400.0, 400.0, 50.0);
        assert!(close(scale, 10.0));
    }

    #[test]
    fn test_center_on_orthographic() {
        let b = Box3::new(Vector3::zeros(), Vector3::new(20.0, 10.0, 5.0));
        let mut camera = Camera::new(ViewDirection::Front, 2.0);
        camera.center_on(&b, 100.0, 60.0, 10.0);
        assert!(close(camera.offset.x, (100.0 - 40.0) / 2.0));
        assert!(close(camera.offset.y, (60.0 - 20.0) / 2.0));

        let rect = camera.project_box(&b);
        assert!(close(rect.x + rect.width / 2.0, 50.0));
        assert!(close(rect.y + rect.height / 2.0, 30.0));
    }

    #[test]
    fn test_center_on_isometric_shifts_by_depth() {
        let b = Box3::new(Vector3::zeros(), Vector3::new(20.0, 10.0, 8.0));
        let mut camera = Camera::new(ViewDirection::Isometric, 2.0);
        camera.center_on(&b, 300.0, 200.0, 0.0);
        let (pw, ph) = camera.calculate_projected_size(&b);
        assert!(close(camera.offset.x, (300.0 - pw) / 2.0 + 8.0 * COS_30 * 2.0));
        assert!(close(camera.offset.y, (200.0 - ph) / 2.0));
    }

    #[test]
    fn test_center_on_mirrored_view_stays_on_screen() {
        let b = Box3::new(Vector3::zeros(), Vector3::new(20.0, 10.0, 5.0));
        let mut camera = Camera::new(ViewDirection::Back, 1.0);
        camera.center_on(&b, 100.0, 100.0, 0.0);
        let rect = camera.project_box(&b);
        assert!(close(rect.x, 40.0));
        assert!(close(rect.y, 45.0));
    }
}
