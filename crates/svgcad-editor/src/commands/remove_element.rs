//! 删除图元（历史条目）

use crate::command::{Command, CommandKind, CommandStep};
use crate::context::EditorContext;
use crate::drawing::Removed;
use crate::error::CommandError;
use svgcad_core::entity::EntityId;

pub struct RemoveElementCommand {
    id: EntityId,
    /// 删除记录：撤销时放回原位置与原分组
    removed: Option<Removed>,
}

impl RemoveElementCommand {
    pub fn new(id: EntityId) -> Self {
        Self { id, removed: None }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    fn remove(&mut self, ctx: &mut EditorContext) {
        // 已不存在时保留之前的记录
        if let Some(removed) = ctx.drawing.remove_primitive(self.id) {
            self.removed = Some(removed);
        }
        if ctx.session.deselect(self.id) {
            ctx.notify_selection_changed();
        }
    }
}

impl Command for RemoveElementCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::RemoveElement
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        self.remove(ctx);
        ctx.notify_drawing_changed();
        Ok(CommandStep::Completed)
    }

    fn undo(&mut self, ctx: &mut EditorContext) {
        if let Some(removed) = self.removed.clone() {
            ctx.drawing.restore(removed);
        }
    }

    fn redo(&mut self, ctx: &mut EditorContext) {
        self.remove(ctx);
    }
}
