//! 距离计算
//!
//! 纯函数，无副作用。

use crate::geometry::Rectangle;
use crate::math::{Point2, Vector2, EPSILON};

/// 欧氏距离
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// 点到线段 `v`-`w` 的距离
///
/// 投影参数 t 截断到 [0, 1]；零长度线段退化为点距离。
pub fn distance_point_to_segment(p: &Point2, v: &Point2, w: &Point2) -> f64 {
    let seg = w - v;
    let len2 = seg.norm_squared();
    if len2 < EPSILON * EPSILON {
        return distance(p, v);
    }
    let t = ((p - v).dot(&seg) / len2).clamp(0.0, 1.0);
    let projection = v + seg * t;
    distance(p, &projection)
}

/// 点到圆周的距离
pub fn distance_point_to_circle_stroke(p: &Point2, center: &Point2, radius: f64) -> f64 {
    (distance(p, center) - radius).abs()
}

/// 点到矩形边框的距离（四条边的最小值）
pub fn distance_point_to_rectangle_stroke(p: &Point2, rect: &Rectangle) -> f64 {
    rect.edges()
        .iter()
        .map(|edge| distance_point_to_segment(p, &edge.start, &edge.end))
        .fold(f64::INFINITY, f64::min)
}

/// 由基点和目标点计算位移
///
/// - `distance` 给定时，位移为 `target - base` 方向上长度为 `distance` 的向量；方向为零时位移为零
/// - `ortho` 为 true 时先投影到主轴（|dx| 与 |dy| 中较大者），再把较小分量置零
pub fn delta_from_base_point(
    base: &Point2,
    target: &Point2,
    distance: Option<f64>,
    ortho: bool,
) -> Vector2 {
    let raw = target - base;
    let direction = if ortho { ortho_projection(&raw) } else { raw };

    let delta = match distance {
        Some(d) => match direction.try_normalize(EPSILON) {
            Some(unit) => unit * d,
            None => Vector2::zeros(),
        },
        None => direction,
    };

    if ortho {
        ortho_projection(&delta)
    } else {
        delta
    }
}

/// 保留绝对值较大的分量
pub fn ortho_projection(v: &Vector2) -> Vector2 {
    if v.x.abs() > v.y.abs() {
        Vector2::new(v.x, 0.0)
    } else {
        Vector2::new(0.0, v.y)
    }
}

/// 正交约束后的点
pub fn ortho_point(base: &Point2, target: &Point2) -> Point2 {
    base + ortho_projection(&(target - base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_on_segment() {
        let d = distance_point_to_segment(
            &Point2::new(0.0, 5.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(0.0, 10.0),
        );
        assert!(d.abs() < EPSILON);
    }

    #[test]
    fn test_point_beyond_segment_end() {
        let d = distance_point_to_segment(
            &Point2::new(5.0, 15.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(0.0, 10.0),
        );
        assert!((d - (25.0f64 + 25.0).sqrt()).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Point2::new(3.0, 4.0);
        let d = distance_point_to_segment(&p, &Point2::origin(), &Point2::origin());
        assert!((d - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_stroke_distance() {
        let center = Point2::new(1.0, 1.0);
        assert!((distance_point_to_circle_stroke(&Point2::new(1.0, 1.0), &center, 2.0) - 2.0).abs() < EPSILON);
        assert!((distance_point_to_circle_stroke(&Point2::new(5.0, 1.0), &center, 2.0) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_delta_with_distance() {
        let delta = delta_from_base_point(
            &Point2::origin(),
            &Point2::new(3.0, 4.0),
            Some(10.0),
            false,
        );
        assert!((delta.x - 6.0).abs() < EPSILON);
        assert!((delta.y - 8.0).abs() < EPSILON);

        let zero = delta_from_base_point(&Point2::origin(), &Point2::origin(), Some(10.0), false);
        assert_eq!(zero, Vector2::zeros());
    }

    #[test]
    fn test_delta_ortho() {
        let base = Point2::new(1.0, 1.0);
        let delta = delta_from_base_point(&base, &Point2::new(6.0, 3.0), None, true);
        assert_eq!(delta, Vector2::new(5.0, 0.0));

        // 正交 + 距离：先投影到主轴再取长度
        let delta = delta_from_base_point(&base, &Point2::new(2.0, -9.0), Some(4.0), true);
        assert!(delta.x.abs() < EPSILON);
        assert!((delta.y + 4.0).abs() < EPSILON);
    }
}
