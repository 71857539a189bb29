//! 场景模型：有序图元集合
//!
//! 顺序只影响绘制层次和大纲显示。图元只应通过命令的 execute/undo/redo 修改。

use svgcad_core::entity::{Entity, EntityId, GroupId};
use svgcad_core::geometry::Geometry;
use svgcad_core::properties::Style;

/// 被删除图元的记录，用于原位恢复
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    pub entity: Entity,
    /// 删除前在集合中的位置
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Drawing {
    entities: Vec<Entity>,
    /// 下一个分配的 ID，只增不减
    next_id: u64,
}

impl Drawing {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        // Default 构造时 next_id 为 0
        self.next_id = self.next_id.max(1);
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// 添加图元，返回新分配的 ID
    pub fn add_primitive(&mut self, geometry: Geometry, style: Style, group: GroupId) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(Entity::new(id, geometry, style, group));
        id
    }

    /// 删除图元；ID 不存在时什么也不做
    pub fn remove_primitive(&mut self, id: EntityId) -> Option<Removed> {
        let index = self.index_of(id)?;
        let entity = self.entities.remove(index);
        Some(Removed { entity, index })
    }

    /// 把删除的图元放回原位置（保留原 ID）
    ///
    /// ID 已存在时忽略，返回 false。
    pub fn restore(&mut self, removed: Removed) -> bool {
        if self.contains(removed.entity.id) {
            return false;
        }
        // 回收的 ID 必须已经分配过
        self.next_id = self.next_id.max(removed.entity.id.0 + 1);
        let index = removed.index.min(self.entities.len());
        self.entities.insert(index, removed.entity);
        true
    }

    /// 用新 ID 的图元替换旧图元（同一位置、同一样式与分组）
    ///
    /// 返回旧图元的删除记录和新 ID。持有旧 ID 的选择集与历史记录需由调用方更新。
    pub fn replace_primitive(&mut self, id: EntityId, geometry: Geometry) -> Option<(Removed, EntityId)> {
        let removed = self.remove_primitive(id)?;
        let new_id = self.allocate_id();
        let entity = Entity::new(new_id, geometry, removed.entity.style, removed.entity.group);
        self.entities.insert(removed.index, entity);
        Some((removed, new_id))
    }

    pub fn find_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn geometry(&self, id: EntityId) -> Option<&Geometry> {
        self.find_by_id(id).map(|e| &e.geometry)
    }

    /// 原位替换几何，ID 不变
    pub fn replace_geometry(&mut self, id: EntityId, geometry: Geometry) -> bool {
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(entity) => {
                entity.geometry = geometry;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    /// 按插入（绘制层次）顺序的全部图元
    pub fn all_primitives(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
