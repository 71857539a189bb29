//! 偏移计算
//!
//! 偏移方向由指针位置决定：
//! - 线段：平移到指针所在一侧
//! - 圆 / 圆弧：同心，指针在半径内时向内
//! - 矩形：绕中心均匀缩放，指针在矩形内时向内
//! - 多边形：逐边偏移后用相邻偏移边的交点作为新顶点（斜接），指针在内部时向内

use crate::distance::distance;
use crate::geometry::{Arc, Circle, Geometry, Line, Polygon, Rectangle};
use crate::intersection::line_line_intersection;
use crate::math::{Point2, Vector2, EPSILON};

/// 根据指针位置偏移几何
pub fn offset_geometry(geometry: &Geometry, offset: f64, pointer: &Point2) -> Geometry {
    match geometry {
        Geometry::Line(l) => Geometry::Line(offset_line(l, offset, pointer)),
        Geometry::Circle(c) => Geometry::Circle(offset_circle(c, offset, pointer)),
        Geometry::Rectangle(r) => Geometry::Rectangle(offset_rectangle(r, offset, pointer)),
        Geometry::Polygon(p) => Geometry::Polygon(offset_polygon(p, offset, pointer)),
        Geometry::Arc(a) => Geometry::Arc(offset_arc(a, offset, pointer)),
    }
}

/// 线段左侧单位法向量
fn left_normal(line: &Line) -> Option<Vector2> {
    line.direction().map(|d| Vector2::new(-d.y, d.x))
}

pub fn offset_line(line: &Line, offset: f64, pointer: &Point2) -> Line {
    let Some(normal) = left_normal(line) else {
        return *line;
    };
    let side = if (pointer - line.midpoint()).dot(&normal) >= 0.0 {
        1.0
    } else {
        -1.0
    };
    let shift = normal * (offset * side);
    Line::new(line.start + shift, line.end + shift)
}

pub fn offset_circle(circle: &Circle, offset: f64, pointer: &Point2) -> Circle {
    Circle::new(
        circle.center,
        concentric_radius(&circle.center, circle.radius, offset, pointer),
    )
}

pub fn offset_arc(arc: &Arc, offset: f64, pointer: &Point2) -> Arc {
    Arc::new(
        arc.center,
        concentric_radius(&arc.center, arc.radius, offset, pointer),
        arc.start_angle,
        arc.end_angle,
    )
}

fn concentric_radius(center: &Point2, radius: f64, offset: f64, pointer: &Point2) -> f64 {
    if distance(pointer, center) < radius {
        (radius - offset).max(0.0)
    } else {
        radius + offset
    }
}

pub fn offset_rectangle(rect: &Rectangle, offset: f64, pointer: &Point2) -> Rectangle {
    let grow = if rect.contains_point(pointer) {
        -offset
    } else {
        offset
    };
    let center = rect.center();
    let width = (rect.width + 2.0 * grow).max(0.0);
    let height = (rect.height + 2.0 * grow).max(0.0);
    Rectangle::new(
        Point2::new(center.x - width / 2.0, center.y - height / 2.0),
        width,
        height,
    )
}

pub fn offset_polygon(polygon: &Polygon, offset: f64, pointer: &Point2) -> Polygon {
    let n = polygon.points.len();
    if n < 3 {
        return polygon.clone();
    }

    // 逆时针多边形的外侧在边的右边
    let outward = if polygon.signed_area() >= 0.0 { -1.0 } else { 1.0 };
    let inward = polygon.contains_point(pointer);
    let amount = (if inward { -offset } else { offset }) * outward;

    let shifted: Vec<Line> = polygon
        .edges()
        .iter()
        .map(|edge| match left_normal(edge) {
            Some(normal) => {
                let shift = normal * amount;
                Line::new(edge.start + shift, edge.end + shift)
            }
            None => *edge,
        })
        .collect();

    let points = (0..n)
        .map(|i| {
            let prev = &shifted[(i + n - 1) % n];
            let next = &shifted[i];
            line_line_intersection(prev, next).unwrap_or(next.start)
        })
        .collect();
    Polygon::new(points)
}

/// 偏移距离是否有效
pub fn is_valid_offset(offset: f64) -> bool {
    offset.is_finite() && offset > EPSILON
}
