//! 变换快照
//!
//! 选择确认时捕获一次原始几何，之后的应用、撤销、重做都基于这份快照，
//! 从不读取已被变换过的当前几何。

use crate::context::EditorContext;
use crate::drawing::Removed;
use svgcad_core::entity::EntityId;
use svgcad_core::geometry::Geometry;
use svgcad_core::transform::Transform2D;
use std::mem::discriminant;

/// 图元类型改变时的替换记录（矩形旋转为多边形）
#[derive(Debug, Clone)]
struct Replacement {
    /// 被替换的原图元
    original: Removed,
    /// 新图元 ID
    new_id: EntityId,
    /// 撤销后新图元的记录，重做时原样放回
    undone: Option<Removed>,
}

#[derive(Debug, Clone)]
struct Entry {
    id: EntityId,
    original: Geometry,
    replacement: Option<Replacement>,
}

#[derive(Debug, Clone, Default)]
pub struct TransformSnapshot {
    entries: Vec<Entry>,
}

impl TransformSnapshot {
    /// 捕获图元当前几何
    pub fn capture(ctx: &EditorContext, ids: &[EntityId]) -> Self {
        Self {
            entries: ctx
                .snapshot(ids)
                .into_iter()
                .map(|(id, original)| Entry {
                    id,
                    original,
                    replacement: None,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn originals(&self) -> Vec<(EntityId, Geometry)> {
        self.entries
            .iter()
            .map(|e| (e.id, e.original.clone()))
            .collect()
    }

    /// 把变换应用到原始快照
    ///
    /// 结果与原几何类型相同时原位修改；类型改变时以新 ID 替换，
    /// 并更新选择集中的引用。
    pub fn apply(&mut self, ctx: &mut EditorContext, transform: &Transform2D) {
        let mut selection_changed = false;
        for entry in self.entries.iter_mut() {
            let result = transform.apply(&entry.original);
            let same_kind = discriminant(&result) == discriminant(&entry.original);

            match entry.replacement.as_mut() {
                Some(replacement) => {
                    // 重做：放回第一次生成的图元
                    ctx.drawing.remove_primitive(entry.id);
                    if let Some(undone) = replacement.undone.take() {
                        ctx.drawing.restore(undone);
                    }
                    ctx.drawing.replace_geometry(replacement.new_id, result);
                    selection_changed |= ctx.session.replace_selected(entry.id, replacement.new_id);
                }
                None if same_kind => {
                    ctx.drawing.replace_geometry(entry.id, result);
                }
                None => {
                    if let Some((original, new_id)) = ctx.drawing.replace_primitive(entry.id, result) {
                        selection_changed |= ctx.session.replace_selected(entry.id, new_id);
                        entry.replacement = Some(Replacement {
                            original,
                            new_id,
                            undone: None,
                        });
                    }
                }
            }
        }
        ctx.notify_drawing_changed();
        if selection_changed {
            ctx.notify_selection_changed();
        }
    }

    /// 原样恢复快照
    pub fn restore(&mut self, ctx: &mut EditorContext) {
        let mut selection_changed = false;
        for entry in self.entries.iter_mut().rev() {
            match entry.replacement.as_mut() {
                Some(replacement) => {
                    if let Some(removed) = ctx.drawing.remove_primitive(replacement.new_id) {
                        replacement.undone = Some(removed);
                    }
                    ctx.drawing.restore(replacement.original.clone());
                    selection_changed |= ctx.session.replace_selected(replacement.new_id, entry.id);
                }
                None => {
                    ctx.drawing.replace_geometry(entry.id, entry.original.clone());
                }
            }
        }
        ctx.notify_drawing_changed();
        if selection_changed {
            ctx.notify_selection_changed();
        }
    }
}
