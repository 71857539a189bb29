//! 选择与拾取
//!
//! - 悬停检测：阈值内第一个命中的图元（按绘制顺序，不按距离排序）
//! - 框选：向右拖动为 inside（完全包含），向左拖动为 intersect（相交即选中）

use crate::drawing::Drawing;
use svgcad_core::entity::EntityId;
use svgcad_core::geometry::Rectangle;
use svgcad_core::math::Point2;

/// 框选模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeMode {
    /// 图元包围盒完全在框内
    Inside,
    /// 图元与框相交
    Intersect,
}

impl MarqueeMode {
    /// 由拖动方向决定模式
    pub fn from_drag(start: &Point2, current: &Point2) -> Self {
        if current.x < start.x {
            MarqueeMode::Intersect
        } else {
            MarqueeMode::Inside
        }
    }
}

/// 进行中的框选
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub start: Point2,
    pub current: Point2,
}

impl Marquee {
    pub fn new(start: Point2) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn rect(&self) -> Rectangle {
        Rectangle::from_corners(self.start, self.current)
    }

    pub fn mode(&self) -> MarqueeMode {
        MarqueeMode::from_drag(&self.start, &self.current)
    }
}

/// 悬停检测
pub fn check_hover(drawing: &Drawing, point: &Point2, threshold: f64) -> Option<EntityId> {
    drawing
        .all_primitives()
        .iter()
        .find(|e| e.geometry.distance_to_point(point) < threshold)
        .map(|e| e.id)
}

/// 框内的图元
pub fn find_elements(drawing: &Drawing, rect: &Rectangle, mode: MarqueeMode) -> Vec<EntityId> {
    drawing
        .all_primitives()
        .iter()
        .filter(|e| match mode {
            MarqueeMode::Inside => e.geometry.is_inside_rect(rect),
            MarqueeMode::Intersect => e.geometry.intersects_rect(rect),
        })
        .map(|e| e.id)
        .collect()
}
