//! 数学基础类型
//!
//! 向量和点基于 nalgebra，单位统一为英寸：
//! X = 左右，Y = 上下，Z = 前后。

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// 2D点类型（屏幕/图纸坐标）
pub type Point2 = na::Point2<f64>;

/// 2D向量类型
pub type Vector2 = na::Vector2<f64>;

/// 3D向量类型（位置或尺寸，英寸）
pub type Vector3 = na::Vector3<f64>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 判断两个3D向量是否近似相等
#[inline]
pub fn vectors_approx_eq(a: &Vector3, b: &Vector3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

/// 世界坐标轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// 取向量在该轴上的分量
    #[inline]
    pub fn value(self, v: &Vector3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// 轴对齐3D包围盒
///
/// `position` 是最小角点，`size` 是三个方向的尺寸。
/// 某一维为零的盒子是合法的，表示一块平板。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    pub position: Vector3,
    pub size: Vector3,
}

impl Box3 {
    /// 创建新的包围盒
    pub fn new(position: Vector3, size: Vector3) -> Self {
        Self { position, size }
    }

    /// 零包围盒（原点处，尺寸为零）
    pub fn zero() -> Self {
        Self {
            position: Vector3::zeros(),
            size: Vector3::zeros(),
        }
    }

    /// 由两个角点创建
    pub fn from_corners(a: Vector3, b: Vector3) -> Self {
        let min = a.inf(&b);
        let max = a.sup(&b);
        Self::new(min, max - min)
    }

    /// 最小角点
    pub fn min(&self) -> Vector3 {
        self.position
    }

    /// 最大角点
    pub fn max(&self) -> Vector3 {
        self.position + self.size
    }

    /// 中心点
    pub fn center(&self) -> Vector3 {
        self.position + self.size * 0.5
    }

    /// 宽度（X方向）
    pub fn width(&self) -> f64 {
        self.size.x
    }

    /// 高度（Y方向）
    pub fn height(&self) -> f64 {
        self.size.y
    }

    /// 深度（Z方向）
    pub fn depth(&self) -> f64 {
        self.size.z
    }

    /// 平移后的副本
    pub fn translated(&self, offset: Vector3) -> Self {
        Self::new(self.position + offset, self.size)
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &Self) -> Self {
        Self::from_corners(
            self.min().inf(&other.min()),
            self.max().sup(&other.max()),
        )
    }

    /// 检查是否与另一个包围盒相交（边界接触也算相交）
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x
            && a_max.x >= b_min.x
            && a_min.y <= b_max.y
            && a_max.y >= b_min.y
            && a_min.z <= b_max.z
            && a_max.z >= b_min.z
    }

    /// 检查是否包含指定点
    pub fn contains(&self, point: &Vector3) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && point.z >= min.z
            && point.z <= max.z
    }

    /// 检查是否完全包含另一个包围盒
    pub fn contains_box(&self, other: &Self) -> bool {
        self.contains(&other.min()) && self.contains(&other.max())
    }

    /// 8个角点：先底面（沿宽度再沿深度），再顶面
    pub fn corners(&self) -> [Vector3; 8] {
        let p = self.position;
        let (w, h, d) = (self.size.x, self.size.y, self.size.z);
        [
            p,
            p + Vector3::new(w, 0.0, 0.0),
            p + Vector3::new(w, 0.0, d),
            p + Vector3::new(0.0, 0.0, d),
            p + Vector3::new(0.0, h, 0.0),
            p + Vector3::new(w, h, 0.0),
            p + Vector3::new(w, h, d),
            p + Vector3::new(0.0, h, d),
        ]
    }
}

impl Default for Box3 {
    fn default() -> Self {
        Self::zero()
    }
}
