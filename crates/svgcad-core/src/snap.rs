//! 对象捕捉
//!
//! 支持的捕捉类型：
//! - 端点 (Endpoint)：线段端点、多边形/矩形顶点、圆弧端点
//! - 中点 (Midpoint)：线段中点
//! - 圆心 (Center)：圆和圆弧的圆心

use crate::entity::{Entity, EntityId};
use crate::geometry::Geometry;
use crate::distance::distance;
use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 捕捉类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapType {
    Endpoint,
    Midpoint,
    Center,
}

impl SnapType {
    pub fn name(&self) -> &'static str {
        match self {
            SnapType::Endpoint => "Endpoint",
            SnapType::Midpoint => "Midpoint",
            SnapType::Center => "Center",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            SnapType::Endpoint => 1 << 0,
            SnapType::Midpoint => 1 << 1,
            SnapType::Center => 1 << 2,
        }
    }
}

/// 启用的捕捉类型位掩码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapMask(u8);

impl SnapMask {
    pub const ALL: SnapMask = SnapMask(0b111);

    pub fn is_enabled(&self, snap_type: SnapType) -> bool {
        self.0 & snap_type.bit() != 0
    }

    pub fn set(&mut self, snap_type: SnapType, enabled: bool) {
        if enabled {
            self.0 |= snap_type.bit();
        } else {
            self.0 &= !snap_type.bit();
        }
    }

    pub fn toggle(&mut self, snap_type: SnapType) {
        self.0 ^= snap_type.bit();
    }
}

impl Default for SnapMask {
    fn default() -> Self {
        // 默认只捕捉端点
        SnapMask(SnapType::Endpoint.bit())
    }
}

/// 捕捉点
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoint {
    pub point: Point2,
    pub snap_type: SnapType,
    pub entity_id: EntityId,
    /// 到指针的世界距离
    pub distance: f64,
}

/// 捕捉配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// 捕捉容差（世界单位）
    pub tolerance: f64,
    pub enabled_types: SnapMask,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.5,
            enabled_types: SnapMask::default(),
        }
    }
}

/// 捕捉引擎
#[derive(Debug, Clone, Default)]
pub struct SnapEngine {
    config: SnapConfig,
    /// 缓存的候选捕捉点
    candidates: Vec<SnapPoint>,
}

impl SnapEngine {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            candidates: Vec::with_capacity(64),
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SnapConfig {
        &mut self.config
    }

    /// 寻找容差内最近的捕捉点
    pub fn find_snap_point<'a>(
        &mut self,
        mouse: Point2,
        entities: impl IntoIterator<Item = &'a Entity>,
    ) -> Option<SnapPoint> {
        self.candidates.clear();

        for entity in entities {
            self.collect_entity_snap_points(entity, mouse);
        }

        let tolerance = self.config.tolerance;
        self.candidates
            .iter()
            .filter(|p| p.distance <= tolerance)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .cloned()
    }

    fn collect_entity_snap_points(&mut self, entity: &Entity, mouse: Point2) {
        let mask = self.config.enabled_types;
        let mut push = |point: Point2, snap_type: SnapType| {
            if mask.is_enabled(snap_type) {
                self.candidates.push(SnapPoint {
                    point,
                    snap_type,
                    entity_id: entity.id,
                    distance: distance(&point, &mouse),
                });
            }
        };

        match &entity.geometry {
            Geometry::Line(line) => {
                push(line.start, SnapType::Endpoint);
                push(line.end, SnapType::Endpoint);
                push(line.midpoint(), SnapType::Midpoint);
            }
            Geometry::Circle(circle) => push(circle.center, SnapType::Center),
            Geometry::Rectangle(rect) => {
                for corner in rect.corners() {
                    push(corner, SnapType::Endpoint);
                }
            }
            Geometry::Polygon(polygon) => {
                for &vertex in &polygon.points {
                    push(vertex, SnapType::Endpoint);
                }
            }
            Geometry::Arc(arc) => {
                push(arc.start_point(), SnapType::Endpoint);
                push(arc.end_point(), SnapType::Endpoint);
                push(arc.center, SnapType::Center);
            }
        }
    }
}
