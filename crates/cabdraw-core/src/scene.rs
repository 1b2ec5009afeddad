//! 场景树
//!
//! 场景是一棵命名节点树。每个节点有局部位置、可选尺寸（无尺寸表示纯分组节点）、
//! 共享的渲染样式、显示标签和子节点列表。
//!
//! 父节点按值拥有子节点，子节点不保存指向父节点的指针：
//! 世界坐标通过从根向下遍历时累加祖先位置得到。
//! 节点被移动进父节点后就不能再挂到别处，因此不会出现环或多重父节点。
//!
//! # 示例
//!
//! ```rust
//! use cabdraw_core::prelude::*;
//!
//! let cabinet = SceneNode::new("cabinet")
//!     .with_position(Vector3::new(100.0, 0.0, 50.0))
//!     .with_child(
//!         SceneNode::new("left_side")
//!             .with_size(Vector3::new(0.75, 34.5, 24.0)),
//!     );
//!
//! let bounds = cabinet.calculate_total_bounds();
//! assert_eq!(bounds.position.x, 100.0);
//! ```

use crate::math::{Box3, Vector3};
use crate::properties::RenderStyle;
use std::sync::Arc;

/// 场景节点
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// 名称（稳定键）
    name: String,
    /// 显示标签（为空时使用名称）
    label: Option<String>,
    /// 相对父节点的位置
    position: Vector3,
    /// 尺寸；`None` 表示没有几何体
    size: Option<Vector3>,
    /// 渲染样式，多个节点可共享
    style: Arc<RenderStyle>,
    /// 子节点
    children: Vec<SceneNode>,
}

/// 遍历时得到的节点及其世界坐标
#[derive(Debug, Clone, Copy)]
pub struct PlacedNode<'a> {
    pub node: &'a SceneNode,
    /// 世界坐标系下的位置
    pub world_position: Vector3,
    /// 树深度（起始节点为 0）
    pub depth: usize,
}

impl<'a> PlacedNode<'a> {
    /// 世界坐标系下的包围盒（无几何体时为 `None`）
    pub fn world_bounds(&self) -> Option<Box3> {
        self.node
            .size
            .map(|size| Box3::new(self.world_position, size))
    }
}

impl SceneNode {
    /// 创建新节点
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            position: Vector3::zeros(),
            size: None,
            style: Arc::new(RenderStyle::default()),
            children: Vec::new(),
        }
    }

    /// 设置局部位置
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// 设置尺寸（使节点拥有几何体）
    pub fn with_size(mut self, size: Vector3) -> Self {
        self.size = Some(size);
        self
    }

    /// 同时设置位置和尺寸
    pub fn with_bounds(self, bounds: Box3) -> Self {
        self.with_position(bounds.position).with_size(bounds.size)
    }

    /// 设置显示标签
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 设置独占样式
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = Arc::new(style);
        self
    }

    /// 设置共享样式
    pub fn with_shared_style(mut self, style: Arc<RenderStyle>) -> Self {
        self.style = style;
        self
    }

    /// 添加子节点
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// 添加子节点（原地）
    pub fn push_child(&mut self, child: SceneNode) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 显示标签，未设置时返回名称
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn size(&self) -> Option<Vector3> {
        self.size
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// 是否有几何体
    pub fn has_geometry(&self) -> bool {
        self.size.is_some()
    }

    /// 局部包围盒（相对父节点）
    pub fn local_bounds(&self) -> Option<Box3> {
        self.size.map(|size| Box3::new(self.position, size))
    }

    /// 深度优先遍历（先序），以本节点为根
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![PlacedNode {
                node: self,
                world_position: self.position,
                depth: 0,
            }],
        }
    }

    /// 所有带几何体的节点（先序）
    pub fn geometry_nodes(&self) -> impl Iterator<Item = PlacedNode<'_>> {
        self.walk().filter(|p| p.node.has_geometry())
    }

    /// 按名称查找节点
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.walk().find(|p| p.node.name == name).map(|p| p.node)
    }

    /// 按名称查找节点的世界位置
    pub fn world_position_of(&self, name: &str) -> Option<Vector3> {
        self.walk()
            .find(|p| p.node.name == name)
            .map(|p| p.world_position)
    }

    /// 按名称查找节点的世界包围盒
    pub fn world_bounds_of(&self, name: &str) -> Option<Box3> {
        self.walk()
            .find(|p| p.node.name == name)
            .and_then(|p| p.world_bounds())
    }

    /// 子树节点总数（含自身）
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// 子树中带几何体的节点数
    pub fn geometry_count(&self) -> usize {
        self.geometry_nodes().count()
    }

    /// 计算整棵子树的总包围盒
    ///
    /// 合并自身（若有几何体）与所有后代的世界包围盒；
    /// 子树中没有任何几何体时返回零包围盒。
    pub fn calculate_total_bounds(&self) -> Box3 {
        self.walk()
            .filter_map(|p| p.world_bounds())
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_else(Box3::zero)
    }
}

/// 深度优先遍历器
pub struct Walk<'a> {
    stack: Vec<PlacedNode<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = PlacedNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // 逆序压栈，保证子节点按声明顺序出栈
        for child in current.node.children.iter().rev() {
            self.stack.push(PlacedNode {
                node: child,
                world_position: current.world_position + child.position,
                depth: current.depth + 1,
            });
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vectors_approx_eq;

    #[test]
    fn test_world_position_accumulates_ancestors() {
        let root = SceneNode::new("room")
            .with_position(Vector3::new(100.0, 0.0, 50.0))
            .with_child(
                SceneNode::new("cabinet")
                    .with_position(Vector3::new(10.0, 0.0, 5.0))
                    .with_child(
                        SceneNode::new("shelf")
                            .with_position(Vector3::new(0.75, 15.0, 0.5))
                            .with_size(Vector3::new(22.5, 0.75, 23.0)),
                    ),
            );

        let world = root.world_position_of("shelf").unwrap();
        assert!(vectors_approx_eq(&world, &Vector3::new(110.75, 15.0, 55.5)));

        let placed = root.walk().find(|p| p.node.name() == "shelf").unwrap();
        assert_eq!(placed.depth, 2);
    }

    #[test]
    fn test_total_bounds_of_group() {
        let root = SceneNode::new("cabinet")
            .with_child(
                SceneNode::new("left")
                    .with_size(Vector3::new(0.75, 34.5, 24.0)),
            )
            .with_child(
                SceneNode::new("right")
                    .with_position(Vector3::new(23.25, 0.0, 0.0))
                    .with_size(Vector3::new(0.75, 34.5, 24.0)),
            )
            .with_child(
                SceneNode::new("bottom")
                    .with_position(Vector3::new(0.75, 0.0, 0.0))
                    .with_size(Vector3::new(22.5, 0.75, 24.0)),
            );

        assert!(!root.has_geometry());
        let bounds = root.calculate_total_bounds();
        assert!(vectors_approx_eq(&bounds.min(), &Vector3::zeros()));
        assert!(vectors_approx_eq(&bounds.max(), &Vector3::new(24.0, 34.5, 24.0)));
    }

    #[test]
    fn test_total_bounds_without_geometry_is_zero() {
        let root = SceneNode::new("empty").with_child(SceneNode::new("group"));
        assert_eq!(root.calculate_total_bounds(), Box3::zero());
    }

    #[test]
    fn test_label_defaults_to_name() {
        let node = SceneNode::new("toe_kick");
        assert_eq!(node.label(), "toe_kick");
        let node = node.with_label("Toe Kick");
        assert_eq!(node.label(), "Toe Kick");
    }

    #[test]
    fn test_walk_is_preorder() {
        let root = SceneNode::new("a")
            .with_child(SceneNode::new("b").with_child(SceneNode::new("c")))
            .with_child(SceneNode::new("d"));
        let names: Vec<&str> = root.walk().map(|p| p.node.name()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(root.node_count(), 4);
        assert_eq!(root.geometry_count(), 0);
    }

    #[test]
    fn test_shared_style() {
        let style = RenderStyle::wood_panel().shared();
        let a = SceneNode::new("a").with_shared_style(style.clone());
        let b = SceneNode::new("b").with_shared_style(style.clone());
        assert_eq!(a.style(), b.style());
        assert_eq!(Arc::strong_count(&style), 3);
    }
}
