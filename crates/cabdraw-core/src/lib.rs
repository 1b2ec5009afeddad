//! CabDraw 核心数据模型
//!
//! 提供橱柜出图引擎的3D场景数据：几何图元、单位、场景树、视图方向和渲染设置。
//!
//! # 架构设计
//!
//! - `math`: 向量与轴对齐包围盒（英寸）
//! - `units`: 带单位长度与分数英寸格式化
//! - `scene`: 场景树，父节点按值拥有子节点
//! - `properties`: 颜色与节点渲染样式
//! - `view`: 七个视图方向及其轴映射
//! - `settings`: 渲染设置与预设
//!
//! # 示例
//!
//! ```rust
//! use cabdraw_core::prelude::*;
//!
//! let panel = SceneNode::new("side")
//!     .with_size(Vector3::new(0.75, 34.5, 24.0))
//!     .with_style(RenderStyle::wood_panel());
//!
//! let (w, h) = ViewDirection::Left.dimension_pair(&panel.calculate_total_bounds());
//! println!("{} x {}", format_fractional_inches(w), format_fractional_inches(h));
//! ```

pub mod math;
pub mod properties;
pub mod scene;
pub mod settings;
pub mod units;
pub mod view;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::math::{Axis, Box3, Point2, Vector2, Vector3};
    pub use crate::properties::{Color, RenderStyle};
    pub use crate::scene::{PlacedNode, SceneNode};
    pub use crate::settings::{RenderSettings, TitleBlockInfo};
    pub use crate::units::{format_fractional_inches, Dimension, LengthUnit};
    pub use crate::view::{ViewDirection, COS_30, SIN_30};
}
