//! 二维变换：平移、旋转、缩放
//!
//! 变换总是作用在传入的几何副本上，返回新几何，不修改原值。

use crate::geometry::{Arc, Circle, Geometry, Line, Polygon, Rectangle};
use crate::math::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// 绕 `center` 旋转 `angle` 弧度（逆时针为正）
pub fn rotate_point(p: &Point2, center: &Point2, angle: f64) -> Point2 {
    let (sin, cos) = angle.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point2::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// 以 `base` 为基点缩放
pub fn scale_point(p: &Point2, base: &Point2, factor: f64) -> Point2 {
    base + (p - base) * factor
}

/// 从 center->reference 转到 center->target 的有符号角度（弧度）
pub fn rotation_angle(center: &Point2, reference: &Point2, target: &Point2) -> f64 {
    let a = reference - center;
    let b = target - center;
    let cross = a.x * b.y - a.y * b.x;
    let dot = a.dot(&b);
    cross.atan2(dot)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform2D {
    Translate(Vector2),
    Rotate { center: Point2, angle: f64 },
    Scale { base: Point2, factor: f64 },
}

impl Transform2D {
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        match *self {
            Transform2D::Translate(delta) => p + delta,
            Transform2D::Rotate { center, angle } => rotate_point(p, &center, angle),
            Transform2D::Scale { base, factor } => scale_point(p, &base, factor),
        }
    }

    /// 变换几何
    ///
    /// 旋转矩形得到多边形：旋转后不再轴对齐。
    pub fn apply(&self, geometry: &Geometry) -> Geometry {
        match geometry {
            Geometry::Line(l) => {
                Geometry::Line(Line::new(self.apply_point(&l.start), self.apply_point(&l.end)))
            }
            Geometry::Circle(c) => Geometry::Circle(Circle::new(
                self.apply_point(&c.center),
                c.radius * self.length_factor(),
            )),
            Geometry::Rectangle(r) => match self {
                Transform2D::Rotate { .. } => Geometry::Polygon(Polygon::new(
                    r.corners().iter().map(|p| self.apply_point(p)).collect(),
                )),
                _ => Geometry::Rectangle(Rectangle::from_corners(
                    self.apply_point(&r.origin),
                    self.apply_point(&Point2::new(r.origin.x + r.width, r.origin.y + r.height)),
                )),
            },
            Geometry::Polygon(p) => Geometry::Polygon(Polygon::new(
                p.points.iter().map(|pt| self.apply_point(pt)).collect(),
            )),
            Geometry::Arc(a) => {
                let turn = match *self {
                    Transform2D::Rotate { angle, .. } => angle,
                    _ => 0.0,
                };
                Geometry::Arc(Arc::new(
                    self.apply_point(&a.center),
                    a.radius * self.length_factor(),
                    a.start_angle + turn,
                    a.end_angle + turn,
                ))
            }
        }
    }

    fn length_factor(&self) -> f64 {
        match *self {
            Transform2D::Scale { factor, .. } => factor.abs(),
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotate_point_quarter_turn() {
        let p = rotate_point(&Point2::new(2.0, 1.0), &Point2::new(1.0, 1.0), FRAC_PI_2);
        assert!((p.x - 1.0).abs() < EPSILON);
        assert!((p.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_angle_sign() {
        let c = Point2::origin();
        let a = rotation_angle(&c, &Point2::new(1.0, 0.0), &Point2::new(0.0, 3.0));
        assert!((a - FRAC_PI_2).abs() < EPSILON);
        let b = rotation_angle(&c, &Point2::new(1.0, 0.0), &Point2::new(0.0, -3.0));
        assert!((b + FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_rotate_rectangle_becomes_polygon() {
        let rect = Geometry::Rectangle(Rectangle::new(Point2::origin(), 4.0, 2.0));
        let rotated = Transform2D::Rotate {
            center: Point2::origin(),
            angle: PI,
        }
        .apply(&rect);
        match rotated {
            Geometry::Polygon(p) => {
                assert_eq!(p.points.len(), 4);
                assert!((p.points[2].x + 4.0).abs() < 1e-9);
                assert!((p.points[2].y + 2.0).abs() < 1e-9);
            }
            other => panic!("expected polygon, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_scale_circle_and_rectangle() {
        let base = Point2::new(1.0, 1.0);
        let t = Transform2D::Scale { base, factor: 2.0 };

        let circle = t.apply(&Geometry::Circle(Circle::new(Point2::new(2.0, 1.0), 1.5)));
        assert_eq!(circle, Geometry::Circle(Circle::new(Point2::new(3.0, 1.0), 3.0)));

        let rect = t.apply(&Geometry::Rectangle(Rectangle::new(Point2::new(1.0, 1.0), 2.0, 3.0)));
        assert_eq!(rect, Geometry::Rectangle(Rectangle::new(Point2::new(1.0, 1.0), 4.0, 6.0)));
    }

    #[test]
    fn test_translate_arc_keeps_angles() {
        let arc = Geometry::Arc(Arc::new(Point2::origin(), 1.0, 0.0, FRAC_PI_2));
        let moved = Transform2D::Translate(Vector2::new(5.0, -3.0)).apply(&arc);
        assert_eq!(moved, Geometry::Arc(Arc::new(Point2::new(5.0, -3.0), 1.0, 0.0, FRAC_PI_2)));
    }
}
