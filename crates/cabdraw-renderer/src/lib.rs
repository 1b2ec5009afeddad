//! CabDraw 渲染器
//!
//! 把3D场景投影到2D绘图表面。
//!
//! # 特点
//!
//! - **六个正交视图**：按视图轴映射和镜像规则投影
//! - **轴测视图**：固定30°轴测，三个可见面按亮度系数着色
//! - **画家算法**：按视图深度键从远到近绘制
//! - **后端无关**：所有输出格式实现同一个 [`DrawingSurface`]

pub mod annotate;
pub mod camera;
pub mod canvas;
pub mod renderer;
pub mod surface;

pub use annotate::DimensionAnnotator;
pub use camera::Camera;
pub use canvas::ViewCanvas;
pub use renderer::{depth_sorted, RenderStats, SceneRenderer};
pub use surface::{CommandRecorder, DrawCommand, DrawingSurface, Rect, TextAnchor, TextStyle};
