//! 相交与包含测试
//!
//! 框选（marquee）和倒圆角使用的纯几何判断。

use crate::error::GeometryError;
use crate::geometry::{Circle, Line, Polygon, Rectangle};
use crate::math::{cross, Point2, EPSILON};

/// 行列式接近零视为平行
pub const PARALLEL_TOLERANCE: f64 = 1e-10;

/// 三点的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// 计算 p -> q -> r 的转向
pub fn orientation(p: &Point2, q: &Point2, r: &Point2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val.abs() < EPSILON {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// 共线时 q 是否落在线段 p-r 的范围内
pub fn on_segment(p: &Point2, q: &Point2, r: &Point2) -> bool {
    q.x <= p.x.max(r.x) + EPSILON
        && q.x >= p.x.min(r.x) - EPSILON
        && q.y <= p.y.max(r.y) + EPSILON
        && q.y >= p.y.min(r.y) - EPSILON
}

/// 两条线段是否相交（含端点接触与共线重叠）
pub fn segments_intersect(a: &Line, b: &Line) -> bool {
    let o1 = orientation(&a.start, &a.end, &b.start);
    let o2 = orientation(&a.start, &a.end, &b.end);
    let o3 = orientation(&b.start, &b.end, &a.start);
    let o4 = orientation(&b.start, &b.end, &a.end);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(&a.start, &b.start, &a.end))
        || (o2 == Orientation::Collinear && on_segment(&a.start, &b.end, &a.end))
        || (o3 == Orientation::Collinear && on_segment(&b.start, &a.start, &b.end))
        || (o4 == Orientation::Collinear && on_segment(&b.start, &a.end, &b.end))
}

/// 线段是否与矩形相交：完全在内，或与任一边相交
pub fn line_intersects_rect(line: &Line, rect: &Rectangle) -> bool {
    if rect.contains_point(&line.start) && rect.contains_point(&line.end) {
        return true;
    }
    rect.edges().iter().any(|edge| segments_intersect(line, edge))
}

/// 圆与矩形是否相交（矩形上离圆心最近的点在圆内）
pub fn circle_intersects_rect(circle: &Circle, rect: &Rectangle) -> bool {
    let bbox = rect.bounding_box();
    let closest = Point2::new(
        circle.center.x.clamp(bbox.min.x, bbox.max.x),
        circle.center.y.clamp(bbox.min.y, bbox.max.y),
    );
    (circle.center - closest).norm_squared() <= circle.radius * circle.radius
}

/// 多边形与矩形是否相交
///
/// 三个条件缺一不可：顶点在矩形内、边相交、矩形中心在多边形内（矩形被多边形包住）。
pub fn polygon_intersects_rect(polygon: &Polygon, rect: &Rectangle) -> bool {
    if polygon.points.iter().any(|p| rect.contains_point(p)) {
        return true;
    }

    let rect_edges = rect.edges();
    let crosses = polygon
        .edges()
        .iter()
        .any(|edge| rect_edges.iter().any(|r| segments_intersect(edge, r)));
    if crosses {
        return true;
    }

    point_in_polygon(&rect.center(), &polygon.points)
}

/// 射线法（奇偶规则）
pub fn point_in_polygon(point: &Point2, vertices: &[Point2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// 两条直线（无限延长）的交点
pub fn line_line_intersection(l1: &Line, l2: &Line) -> Result<Point2, GeometryError> {
    let d1 = l1.vector();
    let d2 = l2.vector();
    let det = cross(&d1, &d2);
    if det.abs() < PARALLEL_TOLERANCE {
        return Err(GeometryError::ParallelLines);
    }

    let t = cross(&(l2.start - l1.start), &d2) / det;
    Ok(l1.start + d1 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn test_line_line_intersection_at_origin() {
        let p = line_line_intersection(&line(-1.0, 0.0, 1.0, 0.0), &line(0.0, -1.0, 0.0, 1.0))
            .unwrap();
        assert!(p.x.abs() < EPSILON);
        assert!(p.y.abs() < EPSILON);
    }

    #[test]
    fn test_line_line_intersection_extended() {
        // 交点在两条线段之外
        let p = line_line_intersection(&line(2.0, 0.0, 5.0, 0.0), &line(0.0, 3.0, 0.0, 6.0))
            .unwrap();
        assert!(p.x.abs() < EPSILON);
        assert!(p.y.abs() < EPSILON);
    }

    #[test]
    fn test_parallel_lines() {
        let err = line_line_intersection(&line(0.0, 0.0, 1.0, 0.0), &line(0.0, 1.0, 5.0, 1.0));
        assert_eq!(err, Err(GeometryError::ParallelLines));
    }

    #[test]
    fn test_segments_intersect_collinear() {
        assert!(segments_intersect(&line(0.0, 0.0, 4.0, 0.0), &line(2.0, 0.0, 6.0, 0.0)));
        assert!(!segments_intersect(&line(0.0, 0.0, 1.0, 0.0), &line(2.0, 0.0, 6.0, 0.0)));
        assert!(segments_intersect(&line(0.0, 0.0, 2.0, 2.0), &line(0.0, 2.0, 2.0, 0.0)));
    }

    #[test]
    fn test_line_rect() {
        let rect = Rectangle::new(Point2::origin(), 10.0, 10.0);
        assert!(line_intersects_rect(&line(2.0, 2.0, 8.0, 8.0), &rect));
        assert!(line_intersects_rect(&line(5.0, 5.0, 15.0, 5.0), &rect));
        assert!(line_intersects_rect(&line(-5.0, 5.0, 15.0, 5.0), &rect));
        assert!(!line_intersects_rect(&line(11.0, 0.0, 20.0, 10.0), &rect));
    }

    #[test]
    fn test_circle_rect() {
        let rect = Rectangle::new(Point2::origin(), 10.0, 10.0);
        assert!(circle_intersects_rect(&Circle::new(Point2::new(12.0, 5.0), 3.0), &rect));
        assert!(!circle_intersects_rect(&Circle::new(Point2::new(14.0, 5.0), 3.0), &rect));
        // 角点附近：包围盒重叠但不相交
        assert!(!circle_intersects_rect(&Circle::new(Point2::new(12.0, 12.0), 2.5), &rect));
    }

    #[test]
    fn test_polygon_rect_containment_cases() {
        let rect = Rectangle::new(Point2::new(4.0, 4.0), 2.0, 2.0);

        // 多边形包住矩形：无顶点在内、无边相交，只有中心测试命中
        let big = Rectangle::new(Point2::origin(), 10.0, 10.0).to_polygon();
        assert!(polygon_intersects_rect(&big, &rect));

        // 多边形顶点落在矩形内
        let tri = Polygon::new(vec![
            Point2::new(5.0, 5.0),
            Point2::new(20.0, 5.0),
            Point2::new(20.0, 20.0),
        ]);
        assert!(polygon_intersects_rect(&tri, &rect));

        let far = Polygon::new(vec![
            Point2::new(20.0, 20.0),
            Point2::new(30.0, 20.0),
            Point2::new(30.0, 30.0),
        ]);
        assert!(!polygon_intersects_rect(&far, &rect));
    }

    #[test]
    fn test_point_in_polygon() {
        let square = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        assert!(point_in_polygon(&Point2::new(2.0, 2.0), &square));
        assert!(!point_in_polygon(&Point2::new(5.0, 2.0), &square));
        assert!(!point_in_polygon(&Point2::new(2.0, 2.0), &square[..2]));
    }

    #[test]
    fn test_orientation() {
        let p = Point2::new(0.0, 0.0);
        let q = Point2::new(1.0, 0.0);
        assert_eq!(orientation(&p, &q, &Point2::new(2.0, 0.0)), Orientation::Collinear);
        assert_eq!(orientation(&p, &q, &Point2::new(1.0, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(&p, &q, &Point2::new(1.0, -1.0)), Orientation::Clockwise);
    }
}
