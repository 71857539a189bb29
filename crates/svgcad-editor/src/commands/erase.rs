//! 删除选中的图元

use super::remove_element::RemoveElementCommand;
use crate::command::{Command, CommandKind, CommandStep};
use crate::context::EditorContext;
use crate::error::CommandError;
use tracing::info;

#[derive(Default)]
pub struct EraseCommand {
    removals: Vec<RemoveElementCommand>,
}

impl EraseCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for EraseCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::Erase
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        if self.removals.is_empty() {
            if ctx.session.selected.is_empty() {
                return Err(CommandError::NoSelection);
            }
            self.removals = ctx
                .session
                .selected
                .iter()
                .map(|id| RemoveElementCommand::new(*id))
                .collect();
        }

        for removal in self.removals.iter_mut() {
            removal.execute(ctx)?;
        }
        info!("Erased {} elements", self.removals.len());
        ctx.log(format!("Erased {} elements.", self.removals.len()));
        Ok(CommandStep::Completed)
    }

    fn undo(&mut self, ctx: &mut EditorContext) {
        // 逆序放回，保证原位置正确
        for removal in self.removals.iter_mut().rev() {
            removal.undo(ctx);
        }
        ctx.log("Undo: Elements restored.");
    }

    fn redo(&mut self, ctx: &mut EditorContext) {
        for removal in self.removals.iter_mut() {
            removal.redo(ctx);
        }
        ctx.log("Redo: Elements erased again.");
    }

    fn repeat(&self) -> Option<Box<dyn Command>> {
        Some(Box::new(EraseCommand::new()))
    }
}
