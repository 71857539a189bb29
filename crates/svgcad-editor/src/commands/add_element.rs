//! 添加图元（历史条目）
//!
//! 绘图命令逐段提交、偏移命令生成新图元时登记这个命令。

use crate::command::{Command, CommandKind, CommandStep};
use crate::context::EditorContext;
use crate::drawing::Removed;
use crate::error::CommandError;
use svgcad_core::entity::{EntityId, GroupId};
use svgcad_core::geometry::Geometry;
use svgcad_core::properties::Style;

pub struct AddElementCommand {
    geometry: Geometry,
    style: Style,
    group: GroupId,
    /// 执行后分配的 ID
    id: Option<EntityId>,
    /// 撤销时的删除记录，重做时原样放回
    removed: Option<Removed>,
}

impl AddElementCommand {
    pub fn new(geometry: Geometry, style: Style, group: GroupId) -> Self {
        Self {
            geometry,
            style,
            group,
            id: None,
            removed: None,
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Command for AddElementCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::AddElement
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        match self.id {
            None => {
                let id = ctx
                    .drawing
                    .add_primitive(self.geometry.clone(), self.style, self.group);
                self.id = Some(id);
            }
            Some(_) => self.redo(ctx),
        }
        ctx.notify_drawing_changed();
        Ok(CommandStep::Completed)
    }

    fn undo(&mut self, ctx: &mut EditorContext) {
        if let Some(id) = self.id {
            if let Some(removed) = ctx.drawing.remove_primitive(id) {
                self.removed = Some(removed);
            }
            if ctx.session.deselect(id) {
                ctx.notify_selection_changed();
            }
        }
    }

    fn redo(&mut self, ctx: &mut EditorContext) {
        if let Some(removed) = self.removed.take() {
            ctx.drawing.restore(removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgcad_core::geometry::Circle;
    use svgcad_core::math::Point2;

    #[test]
    fn test_redo_reuses_id() {
        let mut ctx = EditorContext::default();
        let mut command = AddElementCommand::new(
            Geometry::Circle(Circle::new(Point2::origin(), 2.0)),
            Style::default(),
            GroupId::DRAWING,
        );
        command.execute(&mut ctx).unwrap();
        let id = command.id().unwrap();

        command.undo(&mut ctx);
        assert!(ctx.drawing.is_empty());
        // 撤销两次不出错
        command.undo(&mut ctx);

        command.redo(&mut ctx);
        assert!(ctx.drawing.contains(id));
        assert_eq!(ctx.drawing.len(), 1);
    }

    #[test]
    fn test_undo_deselects() {
        let mut ctx = EditorContext::default();
        let mut command = AddElementCommand::new(
            Geometry::Circle(Circle::new(Point2::origin(), 2.0)),
            Style::default(),
            GroupId::DRAWING,
        );
        command.execute(&mut ctx).unwrap();
        let id = command.id().unwrap();
        ctx.session.select(id);
        command.undo(&mut ctx);
        assert!(ctx.session.selected.is_empty());
    }
}
