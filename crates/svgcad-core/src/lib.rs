//! svgcad 核心几何引擎
//!
//! 纯几何层，不持有任何编辑器状态：
//! - 图元：线段、圆、矩形、多边形、圆弧
//! - 距离、相交与包含测试（悬停检测与框选）
//! - 倒圆角、偏移、旋转/缩放变换
//! - 命令行坐标输入解析与对象捕捉
//!
//! # 示例
//!
//! ```rust
//! use svgcad_core::prelude::*;
//!
//! let l1 = Line::new(Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0));
//! let l2 = Line::new(Point2::new(0.0, -1.0), Point2::new(0.0, 1.0));
//! let p = line_line_intersection(&l1, &l2).unwrap();
//! assert!(p.x.abs() < EPSILON && p.y.abs() < EPSILON);
//! ```

pub mod distance;
pub mod entity;
pub mod error;
pub mod fillet;
pub mod geometry;
pub mod input_parser;
pub mod intersection;
pub mod math;
pub mod offset;
pub mod properties;
pub mod snap;
pub mod transform;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::distance::{delta_from_base_point, distance, distance_point_to_segment};
    pub use crate::entity::{Entity, EntityId, GroupId, Highlight};
    pub use crate::error::GeometryError;
    pub use crate::fillet::{compute_fillet_arc, fillet_lines, FilletArc, FilletResult};
    pub use crate::geometry::{Arc, Circle, Geometry, Line, Polygon, Rectangle};
    pub use crate::input_parser::{InputParser, InputValue, ParseError};
    pub use crate::intersection::line_line_intersection;
    pub use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
    pub use crate::offset::offset_geometry;
    pub use crate::properties::{Color, Style};
    pub use crate::snap::{SnapConfig, SnapEngine, SnapPoint, SnapType};
    pub use crate::transform::{rotate_point, Transform2D};
}
