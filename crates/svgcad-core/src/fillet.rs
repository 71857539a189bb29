//! 倒圆角计算
//!
//! 输入两条线段、半径以及用户在每条线上的点击位置，输出裁剪后的线段和切线圆弧。
//!
//! 拐角点的确定顺序：
//! 1. 两线已共享端点时，直接使用该点，保留各自的另一端
//! 2. 否则求两直线交点，按点击位置决定保留哪一端：
//!    `(端点 - 交点)·(点击 - 交点)` 较大的端点与点击位于交点同侧

use crate::distance::distance;
use crate::error::GeometryError;
use crate::geometry::{Arc, Line};
use crate::intersection::line_line_intersection;
use crate::math::{cross, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};

/// 夹角下限（弧度），小于它视为平行
pub const MIN_FILLET_ANGLE: f64 = 0.01;

/// 切点距离相对可用长度的上限
pub const MAX_TANGENT_RATIO: f64 = 0.95;

/// 共享端点判定容差
const CONNECTED_TOLERANCE: f64 = 1e-6;

/// 倒圆角圆弧（SVG 圆弧参数）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilletArc {
    pub center: Point2,
    pub radius: f64,
    /// 第一条线上的切点
    pub start_point: Point2,
    /// 第二条线上的切点
    pub end_point: Point2,
    /// true 表示从起点沿角度增大方向扫到终点
    pub sweep_flag: bool,
}

impl FilletArc {
    pub fn to_arc(&self) -> Arc {
        Arc::from_endpoints(
            self.center,
            self.radius,
            self.start_point,
            self.end_point,
            self.sweep_flag,
        )
    }
}

/// 倒圆角结果
#[derive(Debug, Clone, PartialEq)]
pub struct FilletResult {
    pub line1: Line,
    pub line2: Line,
    /// 半径为 0 时没有圆弧，两线延伸/裁剪到交点
    pub arc: Option<FilletArc>,
}

/// 拐角：交点与两条线各自保留的端点
#[derive(Debug, Clone, Copy, PartialEq)]
struct Corner {
    point: Point2,
    keep1: Point2,
    keep2: Point2,
}

/// 计算倒圆角圆弧
pub fn compute_fillet_arc(
    line1: &Line,
    line2: &Line,
    radius: f64,
    clicks: (Point2, Point2),
) -> Result<FilletArc, GeometryError> {
    if radius <= EPSILON {
        return Err(GeometryError::InvalidConfiguration(
            "fillet arc requires a positive radius".to_string(),
        ));
    }
    let corner = find_corner(line1, line2, clicks)?;
    arc_at_corner(&corner, radius)
}

/// 对两条线执行倒圆角，返回裁剪后的线段
pub fn fillet_lines(
    line1: &Line,
    line2: &Line,
    radius: f64,
    clicks: (Point2, Point2),
) -> Result<FilletResult, GeometryError> {
    if radius < 0.0 || !radius.is_finite() {
        return Err(GeometryError::InvalidConfiguration(format!(
            "invalid radius {}",
            radius
        )));
    }

    let corner = find_corner(line1, line2, clicks)?;

    if radius <= EPSILON {
        // 半径 0：延伸/裁剪到交点
        return Ok(FilletResult {
            line1: trimmed(line1, corner.keep1, corner.point),
            line2: trimmed(line2, corner.keep2, corner.point),
            arc: None,
        });
    }

    let arc = arc_at_corner(&corner, radius)?;
    Ok(FilletResult {
        line1: trimmed(line1, corner.keep1, arc.start_point),
        line2: trimmed(line2, corner.keep2, arc.end_point),
        arc: Some(arc),
    })
}

/// 共享端点优先，否则用交点 + 点击位置
fn find_corner(
    line1: &Line,
    line2: &Line,
    clicks: (Point2, Point2),
) -> Result<Corner, GeometryError> {
    if let Some(corner) = shared_endpoint(line1, line2) {
        return Ok(corner);
    }

    let point = line_line_intersection(line1, line2)?;
    Ok(Corner {
        point,
        keep1: preserved_end(line1, &point, &clicks.0),
        keep2: preserved_end(line2, &point, &clicks.1),
    })
}

fn shared_endpoint(line1: &Line, line2: &Line) -> Option<Corner> {
    let pairs = [
        (line1.start, line1.end, line2.start, line2.end),
        (line1.start, line1.end, line2.end, line2.start),
        (line1.end, line1.start, line2.start, line2.end),
        (line1.end, line1.start, line2.end, line2.start),
    ];
    pairs
        .into_iter()
        .find(|(a, _, b, _)| distance(a, b) < CONNECTED_TOLERANCE)
        .map(|(shared, keep1, _, keep2)| Corner {
            point: shared,
            keep1,
            keep2,
        })
}

fn preserved_end(line: &Line, corner: &Point2, click: &Point2) -> Point2 {
    let to_click = click - corner;
    let d_start = (line.start - corner).dot(&to_click);
    let d_end = (line.end - corner).dot(&to_click);

    if (d_start - d_end).abs() < EPSILON {
        // 点击无法区分时保留离交点较远的一端
        if distance(&line.start, corner) >= distance(&line.end, corner) {
            line.start
        } else {
            line.end
        }
    } else if d_start > d_end {
        line.start
    } else {
        line.end
    }
}

fn arc_at_corner(corner: &Corner, radius: f64) -> Result<FilletArc, GeometryError> {
    let v1 = corner.keep1 - corner.point;
    let v2 = corner.keep2 - corner.point;
    let len1 = v1.norm();
    let len2 = v2.norm();
    let (u1, u2) = match (v1.try_normalize(EPSILON), v2.try_normalize(EPSILON)) {
        (Some(u1), Some(u2)) => (u1, u2),
        _ => return Err(GeometryError::InsufficientLength),
    };

    let angle = u1.dot(&u2).clamp(-1.0, 1.0).acos();
    if angle < MIN_FILLET_ANGLE {
        return Err(GeometryError::ParallelLines);
    }
    if angle > std::f64::consts::PI - MIN_FILLET_ANGLE {
        return Err(GeometryError::LinesOpposite);
    }

    let half = angle / 2.0;
    let tangent_distance = radius / half.tan();
    if tangent_distance > MAX_TANGENT_RATIO * len1 || tangent_distance > MAX_TANGENT_RATIO * len2 {
        return Err(GeometryError::InsufficientLength);
    }

    let bisector: Vector2 = (u1 + u2).normalize();
    let center = corner.point + bisector * (radius / half.sin());

    Ok(FilletArc {
        center,
        radius,
        start_point: corner.point + u1 * tangent_distance,
        end_point: corner.point + u2 * tangent_distance,
        sweep_flag: cross(&u1, &u2) < 0.0,
    })
}

/// 保持原线段方向，把非保留端替换为 `new_end`
fn trimmed(line: &Line, keep: Point2, new_end: Point2) -> Line {
    if keep == line.start {
        Line::new(keep, new_end)
    } else {
        Line::new(new_end, keep)
    }
}
