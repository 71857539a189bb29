//! 图元实体：唯一标识 + 几何 + 样式 + 所属分组

use crate::geometry::Geometry;
use crate::properties::Style;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 图元 ID
///
/// 由绘图会话单调分配，删除后不会被新图元复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 绘图分组 ID（图元的父容器）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    /// 默认绘图分组
    pub const DRAWING: GroupId = GroupId(0);
}

impl Default for GroupId {
    fn default() -> Self {
        GroupId::DRAWING
    }
}

/// 图元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub geometry: Geometry,
    pub style: Style,
    pub group: GroupId,
}

impl Entity {
    pub fn new(id: EntityId, geometry: Geometry, style: Style, group: GroupId) -> Self {
        Self {
            id,
            geometry,
            style,
            group,
        }
    }
}

/// 图元的呈现状态（不属于身份）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    #[default]
    Normal,
    Hovered,
    Selected,
}
