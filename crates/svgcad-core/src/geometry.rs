//! 几何图元定义
//!
//! 支持的基本图元：
//! - 线段 (Line)
//! - 圆 (Circle)
//! - 矩形 (Rectangle，轴对齐)
//! - 多边形 (Polygon，闭合)
//! - 圆弧 (Arc)
//!
//! 图元是封闭的和类型，新增变体时编译器会强制所有 `match` 处理它。

use crate::distance::{
    distance, distance_point_to_circle_stroke, distance_point_to_rectangle_stroke,
    distance_point_to_segment,
};
use crate::intersection;
use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// 几何类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Circle(Circle),
    Rectangle(Rectangle),
    Polygon(Polygon),
    Arc(Arc),
}

impl Geometry {
    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Geometry::Line(l) => l.bounding_box(),
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Rectangle(r) => r.bounding_box(),
            Geometry::Polygon(p) => p.bounding_box(),
            Geometry::Arc(a) => a.bounding_box(),
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Line(_) => "Line",
            Geometry::Circle(_) => "Circle",
            Geometry::Rectangle(_) => "Rectangle",
            Geometry::Polygon(_) => "Polygon",
            Geometry::Arc(_) => "Arc",
        }
    }

    /// 点到描边的最短距离（悬停检测使用）
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        match self {
            Geometry::Line(l) => l.distance_to_point(point),
            Geometry::Circle(c) => distance_point_to_circle_stroke(point, &c.center, c.radius),
            Geometry::Rectangle(r) => distance_point_to_rectangle_stroke(point, r),
            Geometry::Polygon(p) => p.distance_to_point(point),
            Geometry::Arc(a) => a.distance_to_point(point),
        }
    }

    /// 检查点是否在描边上（考虑容差）
    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        self.distance_to_point(point) <= tolerance
    }

    /// 是否与矩形相交（框选的 intersect 模式）
    pub fn intersects_rect(&self, rect: &Rectangle) -> bool {
        match self {
            Geometry::Line(l) => intersection::line_intersects_rect(l, rect),
            Geometry::Circle(c) => intersection::circle_intersects_rect(c, rect),
            Geometry::Rectangle(r) => intersection::polygon_intersects_rect(&r.to_polygon(), rect),
            Geometry::Polygon(p) => intersection::polygon_intersects_rect(p, rect),
            Geometry::Arc(a) => a
                .flatten(32)
                .windows(2)
                .any(|seg| intersection::line_intersects_rect(&Line::new(seg[0], seg[1]), rect)),
        }
    }

    /// 是否完全位于矩形内（框选的 inside 模式）
    pub fn is_inside_rect(&self, rect: &Rectangle) -> bool {
        rect.bounding_box().contains_box(&self.bounding_box())
    }
}

/// 线段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// 方向向量（未归一化）
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// 单位方向向量，零长度线段返回 `None`
    pub fn direction(&self) -> Option<Vector2> {
        self.vector().try_normalize(EPSILON)
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// 计算点到线段的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        distance_point_to_segment(point, &self.start, &self.end)
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}

/// 圆
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// 点是否在圆内（不含边界）
    pub fn contains_point(&self, point: &Point2) -> bool {
        distance(point, &self.center) < self.radius
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

/// 轴对齐矩形
///
/// `origin` 为最小角点，宽高非负。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub origin: Point2,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(origin: Point2, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// 由任意两个对角点创建
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        let bbox = BoundingBox2::new(a, b);
        Self::new(bbox.min, bbox.width(), bbox.height())
    }

    pub fn center(&self) -> Point2 {
        Point2::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    /// 四个角点，按边界顺序排列
    pub fn corners(&self) -> [Point2; 4] {
        let (x, y) = (self.origin.x, self.origin.y);
        [
            Point2::new(x, y),
            Point2::new(x + self.width, y),
            Point2::new(x + self.width, y + self.height),
            Point2::new(x, y + self.height),
        ]
    }

    /// 四条边
    pub fn edges(&self) -> [Line; 4] {
        let c = self.corners();
        [
            Line::new(c[0], c[1]),
            Line::new(c[1], c[2]),
            Line::new(c[2], c[3]),
            Line::new(c[3], c[0]),
        ]
    }

    /// 点是否在矩形内（含边界）
    pub fn contains_point(&self, point: &Point2) -> bool {
        self.bounding_box().contains(point)
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(self.corners().to_vec())
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            self.origin,
            Point2::new(self.origin.x + self.width, self.origin.y + self.height),
        )
    }
}

/// 闭合多边形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point2>,
}

impl Polygon {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// 所有边（含首尾闭合边）
    pub fn edges(&self) -> Vec<Line> {
        let n = self.points.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .map(|i| Line::new(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    /// 有向面积，逆时针为正
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum / 2.0
    }

    /// 射线法判断点是否在多边形内
    pub fn contains_point(&self, point: &Point2) -> bool {
        intersection::point_in_polygon(point, &self.points)
    }

    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        match self.points.as_slice() {
            [] => f64::INFINITY,
            [only] => distance(point, only),
            _ => self
                .edges()
                .iter()
                .map(|edge| edge.distance_to_point(point))
                .fold(f64::INFINITY, f64::min),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points(self.points.iter().copied())
    }
}

/// 圆弧
///
/// 从 `start_angle` 逆时针扫到 `end_angle`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    /// 起始角度（弧度）
    pub start_angle: f64,
    /// 终止角度（弧度）
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// 由两个端点创建圆弧
    ///
    /// `sweep_positive` 为 true 时从 `from` 沿角度增大方向到 `to`，否则反向。
    pub fn from_endpoints(
        center: Point2,
        radius: f64,
        from: Point2,
        to: Point2,
        sweep_positive: bool,
    ) -> Self {
        let a_from = (from.y - center.y).atan2(from.x - center.x);
        let a_to = (to.y - center.y).atan2(to.x - center.x);
        if sweep_positive {
            Self::new(center, radius, a_from, a_to)
        } else {
            Self::new(center, radius, a_to, a_from)
        }
    }

    /// 计算扫过的角度，范围 [0, 2π)
    pub fn sweep_angle(&self) -> f64 {
        (self.end_angle - self.start_angle).rem_euclid(TAU)
    }

    /// 计算弧长
    pub fn length(&self) -> f64 {
        self.sweep_angle() * self.radius
    }

    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.end_angle)
    }

    pub fn mid_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle + self.sweep_angle() / 2.0)
    }

    /// 检查角度是否在弧的范围内
    pub fn contains_angle(&self, angle: f64) -> bool {
        (angle - self.start_angle).rem_euclid(TAU) <= self.sweep_angle() + EPSILON
    }

    /// 计算点到圆弧的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        let angle = (point.y - self.center.y).atan2(point.x - self.center.x);
        if self.contains_angle(angle) {
            distance_point_to_circle_stroke(point, &self.center, self.radius)
        } else {
            distance(point, &self.start_point()).min(distance(point, &self.end_point()))
        }
    }

    /// 离散为折线（`segments` 段）
    pub fn flatten(&self, segments: usize) -> Vec<Point2> {
        let segments = segments.max(1);
        let step = self.sweep_angle() / segments as f64;
        (0..=segments)
            .map(|i| self.point_at_angle(self.start_angle + step * i as f64))
            .collect()
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        let mut bbox = BoundingBox2::from_points([self.start_point(), self.end_point()]);

        // 检查象限点
        for angle in [0.0, PI / 2.0, PI, 3.0 * PI / 2.0] {
            if self.contains_angle(angle) {
                bbox.expand_to_include(&self.point_at_angle(angle));
            }
        }

        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert!((line.length() - 5.0).abs() < EPSILON);
        assert!(Line::new(Point2::origin(), Point2::origin()).direction().is_none());
    }

    #[test]
    fn test_rectangle_from_corners() {
        let rect = Rectangle::from_corners(Point2::new(10.0, 2.0), Point2::new(4.0, 8.0));
        assert_eq!(rect.origin, Point2::new(4.0, 2.0));
        assert!((rect.width - 6.0).abs() < EPSILON);
        assert!((rect.height - 6.0).abs() < EPSILON);
        assert_eq!(rect.center(), Point2::new(7.0, 5.0));
    }

    #[test]
    fn test_polygon_signed_area() {
        let square = Rectangle::new(Point2::origin(), 2.0, 2.0).to_polygon();
        assert!((square.signed_area() - 4.0).abs() < EPSILON);
        let mut reversed = square.points.clone();
        reversed.reverse();
        assert!((Polygon::new(reversed).signed_area() + 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_arc_sweep_and_bbox() {
        let arc = Arc::new(Point2::origin(), 1.0, 0.0, PI / 2.0);
        assert!((arc.sweep_angle() - PI / 2.0).abs() < EPSILON);
        assert!(arc.contains_angle(PI / 4.0));
        assert!(!arc.contains_angle(PI));

        let bbox = arc.bounding_box();
        assert!((bbox.max.x - 1.0).abs() < 1e-9);
        assert!((bbox.max.y - 1.0).abs() < 1e-9);
        assert!(bbox.min.x.abs() < 1e-9);
    }

    #[test]
    fn test_arc_from_endpoints_direction() {
        let center = Point2::new(1.0, 1.0);
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(0.0, 1.0);
        // 角度减小方向：从 270° 到 180°，规范化后为 180° -> 270°
        let arc = Arc::from_endpoints(center, 1.0, a, b, false);
        assert!((arc.sweep_angle() - PI / 2.0).abs() < 1e-9);
        assert!((arc.start_point() - b).norm() < 1e-9);
        assert!((arc.end_point() - a).norm() < 1e-9);
    }

    #[test]
    fn test_stroke_distance_dispatch() {
        let circle = Geometry::Circle(Circle::new(Point2::origin(), 5.0));
        assert!((circle.distance_to_point(&Point2::new(0.0, 3.0)) - 2.0).abs() < EPSILON);

        let rect = Geometry::Rectangle(Rectangle::new(Point2::origin(), 10.0, 10.0));
        assert!((rect.distance_to_point(&Point2::new(5.0, 4.0)) - 4.0).abs() < EPSILON);
        assert!(rect.contains_point(&Point2::new(10.2, 5.0), 0.5));
    }
}
