//! 视图方向
//!
//! 六个正交方向各自定义：哪个世界轴映射到屏幕水平方向、哪个映射到屏幕竖直方向，
//! 以及两个镜像标志。BACK/RIGHT/BOTTOM 分别相对 FRONT/LEFT/TOP 镜像一个轴，
//! 这样背面、右侧、底面视图朝向正确，而不是“透过物体看”。
//! ISOMETRIC 没有轴映射，由相机直接按 30° 轴测公式投影。

use crate::math::{Axis, Box3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// cos(30°)
pub const COS_30: f64 = 0.866_025_403_784_438_6;

/// sin(30°)
pub const SIN_30: f64 = 0.5;

/// 正交视图的轴映射
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMapping {
    /// 映射到屏幕水平方向的世界轴
    pub horizontal: Axis,
    /// 映射到屏幕竖直方向的世界轴
    pub vertical: Axis,
    /// 水平方向取反
    pub mirror_horizontal: bool,
    /// 竖直方向取反
    pub mirror_vertical: bool,
}

/// 视图方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewDirection {
    #[default]
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
    Isometric,
}

impl ViewDirection {
    /// 六个正交方向
    pub const ALL_ORTHOGRAPHIC: [ViewDirection; 6] = [
        ViewDirection::Front,
        ViewDirection::Back,
        ViewDirection::Left,
        ViewDirection::Right,
        ViewDirection::Top,
        ViewDirection::Bottom,
    ];

    /// 全部七个方向
    pub const ALL: [ViewDirection; 7] = [
        ViewDirection::Front,
        ViewDirection::Back,
        ViewDirection::Left,
        ViewDirection::Right,
        ViewDirection::Top,
        ViewDirection::Bottom,
        ViewDirection::Isometric,
    ];

    /// 正交轴映射（轴测视图返回 `None`）
    pub fn axis_mapping(&self) -> Option<AxisMapping> {
        let mapping = |horizontal, vertical, mirror_horizontal, mirror_vertical| AxisMapping {
            horizontal,
            vertical,
            mirror_horizontal,
            mirror_vertical,
        };
        match self {
            ViewDirection::Front => Some(mapping(Axis::X, Axis::Y, false, false)),
            ViewDirection::Back => Some(mapping(Axis::X, Axis::Y, true, false)),
            ViewDirection::Left => Some(mapping(Axis::Z, Axis::Y, false, false)),
            ViewDirection::Right => Some(mapping(Axis::Z, Axis::Y, true, false)),
            ViewDirection::Top => Some(mapping(Axis::X, Axis::Z, false, false)),
            ViewDirection::Bottom => Some(mapping(Axis::X, Axis::Z, false, true)),
            ViewDirection::Isometric => None,
        }
    }

    pub fn is_isometric(&self) -> bool {
        matches!(self, ViewDirection::Isometric)
    }

    /// 大写显示名称
    pub fn label(&self) -> &'static str {
        match self {
            ViewDirection::Front => "FRONT",
            ViewDirection::Back => "BACK",
            ViewDirection::Left => "LEFT",
            ViewDirection::Right => "RIGHT",
            ViewDirection::Top => "TOP",
            ViewDirection::Bottom => "BOTTOM",
            ViewDirection::Isometric => "ISOMETRIC",
        }
    }

    /// 该视图标注的“宽/高”两个总尺寸
    ///
    /// | 视图 | 宽 | 高 |
    /// |---|---|---|
    /// | FRONT/BACK | 宽度 | 高度 |
    /// | LEFT/RIGHT | 深度 | 高度 |
    /// | TOP/BOTTOM | 宽度 | 深度 |
    /// | ISOMETRIC | (宽+深)·cos30 | 高 + (宽+深)·sin30/2 |
    pub fn dimension_pair(&self, bounds: &Box3) -> (f64, f64) {
        let (w, h, d) = (bounds.width(), bounds.height(), bounds.depth());
        match self {
            ViewDirection::Front | ViewDirection::Back => (w, h),
            ViewDirection::Left | ViewDirection::Right => (d, h),
            ViewDirection::Top | ViewDirection::Bottom => (w, d),
            ViewDirection::Isometric => ((w + d) * COS_30, h + (w + d) * SIN_30 / 2.0),
        }
    }
}

impl fmt::Display for ViewDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 视图名称解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown view direction: {0}")]
pub struct ParseViewError(pub String);

impl FromStr for ViewDirection {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FRONT" => Ok(ViewDirection::Front),
            "BACK" => Ok(ViewDirection::Back),
            "LEFT" => Ok(ViewDirection::Left),
            "RIGHT" => Ok(ViewDirection::Right),
            "TOP" | "PLAN" => Ok(ViewDirection::Top),
            "BOTTOM" => Ok(ViewDirection::Bottom),
            "ISOMETRIC" | "ISO" => Ok(ViewDirection::Isometric),
            _ => Err(ParseViewError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, Vector3};

    #[test]
    fn test_exactly_one_mirror_on_opposite_views() {
        for view in ViewDirection::ALL_ORTHOGRAPHIC {
            let m = view.axis_mapping().unwrap();
            let mirrored = m.mirror_horizontal as u8 + m.mirror_vertical as u8;
            match view {
                ViewDirection::Front | ViewDirection::Left | ViewDirection::Top => {
                    assert_eq!(mirrored, 0, "{view} should not be mirrored")
                }
                _ => assert_eq!(mirrored, 1, "{view} should mirror exactly one axis"),
            }
        }
        assert!(ViewDirection::Isometric.axis_mapping().is_none());
    }

    #[test]
    fn test_opposite_views_share_axes() {
        let pairs = [
            (ViewDirection::Front, ViewDirection::Back),
            (ViewDirection::Left, ViewDirection::Right),
            (ViewDirection::Top, ViewDirection::Bottom),
        ];
        for (a, b) in pairs {
            let (ma, mb) = (a.axis_mapping().unwrap(), b.axis_mapping().unwrap());
            assert_eq!(ma.horizontal, mb.horizontal);
            assert_eq!(ma.vertical, mb.vertical);
        }
    }

    #[test]
    fn test_dimension_pair() {
        let b = Box3::new(Vector3::zeros(), Vector3::new(24.0, 34.5, 12.0));
        assert_eq!(ViewDirection::Front.dimension_pair(&b), (24.0, 34.5));
        assert_eq!(ViewDirection::Right.dimension_pair(&b), (12.0, 34.5));
        assert_eq!(ViewDirection::Bottom.dimension_pair(&b), (24.0, 12.0));

        let (w, h) = ViewDirection::Isometric.dimension_pair(&b);
        assert!(approx_eq(w, 36.0 * COS_30));
        assert!(approx_eq(h, 34.5 + 9.0));
    }

    #[test]
    fn test_parse_view() {
        assert_eq!("front".parse::<ViewDirection>(), Ok(ViewDirection::Front));
        assert_eq!("Iso".parse::<ViewDirection>(), Ok(ViewDirection::Isometric));
        assert!("sideways".parse::<ViewDirection>().is_err());
        assert_eq!(ViewDirection::Left.to_string(), "LEFT");
    }
}
