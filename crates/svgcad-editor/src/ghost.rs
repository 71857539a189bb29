//! 幽灵预览（未提交的实时变换预览）
//!
//! 开始预览时记录原图元的几何副本，之后每一帧都从该副本重新计算，
//! 不在上一帧的基础上累加，避免漂移。预览不修改 `Drawing`。

use svgcad_core::distance::delta_from_base_point;
use svgcad_core::entity::EntityId;
use svgcad_core::geometry::Geometry;
use svgcad_core::math::{Point2, EPSILON};
use svgcad_core::offset::offset_geometry;
use svgcad_core::transform::{rotation_angle, Transform2D};

/// 预览图元 ID，与绘图 ID 空间分离
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GhostId(pub u64);

/// 原图元与预览图元的对应记录
#[derive(Debug, Clone, PartialEq)]
pub struct GhostRecord {
    pub original_id: EntityId,
    pub ghost_id: GhostId,
    /// 开始预览时捕获的原始几何
    pub captured: Geometry,
}

/// 预览变换
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostTransform {
    /// 指针相对基点平移
    Translate { base: Point2 },
    /// 绕中心从参考方向转到指针方向
    Rotate { center: Point2, reference: Point2 },
    /// 以基点缩放，比例 = |指针 - 基点| / |参考 - 基点|
    Scale { base: Point2, reference: Point2 },
    /// 按指针一侧偏移
    Offset { distance: f64 },
}

#[derive(Debug, Clone, Default)]
pub struct GhostPreview {
    records: Vec<GhostRecord>,
    transform: Option<GhostTransform>,
    next_ghost_id: u64,
}

impl GhostPreview {
    /// 开始预览，替换之前的预览
    pub fn start(&mut self, originals: &[(EntityId, Geometry)], transform: GhostTransform) {
        self.records = originals
            .iter()
            .map(|(id, geometry)| {
                self.next_ghost_id += 1;
                GhostRecord {
                    original_id: *id,
                    ghost_id: GhostId(self.next_ghost_id),
                    captured: geometry.clone(),
                }
            })
            .collect();
        self.transform = Some(transform);
    }

    pub fn is_active(&self) -> bool {
        self.transform.is_some()
    }

    pub fn records(&self) -> &[GhostRecord] {
        &self.records
    }

    /// 计算当前帧
    pub fn frame(&self, cursor: &Point2, ortho: bool, distance: Option<f64>) -> Vec<Geometry> {
        let Some(transform) = self.transform else {
            return Vec::new();
        };

        match transform {
            GhostTransform::Offset { distance: offset } => self
                .records
                .iter()
                .map(|r| offset_geometry(&r.captured, offset, cursor))
                .collect(),
            _ => {
                let t = frame_transform(&transform, cursor, ortho, distance);
                self.records.iter().map(|r| t.apply(&r.captured)).collect()
            }
        }
    }

    /// 结束预览，返回之前是否处于预览中
    pub fn clear(&mut self) -> bool {
        self.records.clear();
        self.transform.take().is_some()
    }
}

fn frame_transform(
    transform: &GhostTransform,
    cursor: &Point2,
    ortho: bool,
    distance: Option<f64>,
) -> Transform2D {
    match *transform {
        GhostTransform::Translate { base } => {
            Transform2D::Translate(delta_from_base_point(&base, cursor, distance, ortho))
        }
        GhostTransform::Rotate { center, reference } => Transform2D::Rotate {
            center,
            angle: rotation_angle(&center, &reference, cursor),
        },
        GhostTransform::Scale { base, reference } => {
            let reference_length = (reference - base).norm();
            let factor = if reference_length > EPSILON {
                (cursor - base).norm() / reference_length
            } else {
                1.0
            };
            Transform2D::Scale { base, factor }
        }
        GhostTransform::Offset { .. } => Transform2D::Translate(nalgebra::Vector2::zeros()),
    }
}
