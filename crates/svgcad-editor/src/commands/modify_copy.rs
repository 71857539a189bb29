//! 复制命令
//!
//! 流程与移动相同，结果是带新 ID 的副本，继承源图元的样式与分组。

use super::{
    confirm_selection, prompt_selection, set_pending_distance, translation_to, AddElementCommand,
    TransformSnapshot,
};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::ghost::GhostTransform;
use crate::signals::InputKind;
use svgcad_core::entity::EntityId;
use svgcad_core::math::{Point2, Vector2};
use svgcad_core::transform::Transform2D;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    SelectObjects,
    SetBasePoint,
    SetSecondPoint,
    Done,
}

pub struct CopyCommand {
    status: Status,
    snapshot: TransformSnapshot,
    base_point: Point2,
    copies: Vec<AddElementCommand>,
    interactive_execution_done: bool,
}

impl CopyCommand {
    pub fn new() -> Self {
        Self {
            status: Status::SelectObjects,
            snapshot: TransformSnapshot::default(),
            base_point: Point2::origin(),
            copies: Vec::new(),
            interactive_execution_done: false,
        }
    }

    /// 副本 ID
    pub fn copy_ids(&self) -> Vec<EntityId> {
        self.copies.iter().filter_map(|c| c.id()).collect()
    }

    fn finish(&mut self, ctx: &mut EditorContext, delta: Vector2) -> Result<CommandStep, CommandError> {
        ctx.clear_ghost();
        let transform = Transform2D::Translate(delta);

        for (id, geometry) in self.snapshot.originals() {
            let Some(source) = ctx.drawing.find_by_id(id) else {
                continue;
            };
            let mut copy = AddElementCommand::new(transform.apply(&geometry), source.style, source.group);
            copy.execute(ctx)?;
            self.copies.push(copy);
        }

        info!("Copied {} elements by ({}, {})", self.copies.len(), delta.x, delta.y);
        ctx.log("Elements copied.");
        ctx.clear_selection();
        self.status = Status::Done;
        self.interactive_execution_done = true;
        Ok(CommandStep::Completed)
    }
}

impl Default for CopyCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for CopyCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::Copy
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        if self.interactive_execution_done {
            return Ok(CommandStep::Finished);
        }
        prompt_selection(ctx, self.name(), "copy");
        Ok(CommandStep::Continue)
    }

    fn on_input(
        &mut self,
        ctx: &mut EditorContext,
        input: InputEvent,
    ) -> Result<CommandStep, CommandError> {
        match (self.status, input) {
            (Status::SelectObjects, InputEvent::Confirm) => {
                self.snapshot = confirm_selection(ctx)?;
                ctx.log("Specify base point.");
                ctx.inputs.subscribe_once(InputKind::Point);
                self.status = Status::SetBasePoint;
            }
            (Status::SetBasePoint, InputEvent::Point(point)) => {
                self.base_point = point;
                ctx.session.last_point = Some(point);
                ctx.log(format!("Base point: {}", EditorContext::format_point(&point)));
                ctx.log("Specify second point or enter a distance.");
                ctx.start_ghost(&self.snapshot.ids(), GhostTransform::Translate { base: point });
                ctx.inputs.subscribe_once(InputKind::Point);
                ctx.inputs.subscribe(InputKind::Value);
                self.status = Status::SetSecondPoint;
            }
            (Status::SetSecondPoint, InputEvent::Point(point)) => {
                if let Some(delta) = translation_to(ctx, &self.base_point, &point) {
                    return self.finish(ctx, delta);
                }
            }
            (Status::SetSecondPoint, InputEvent::Value(text)) => set_pending_distance(ctx, &text),
            _ => {}
        }
        Ok(CommandStep::Continue)
    }

    fn on_pointer_move(&mut self, ctx: &mut EditorContext, _point: &Point2) {
        if self.status == Status::SetSecondPoint {
            ctx.update_ghost();
        }
    }

    fn undo(&mut self, ctx: &mut EditorContext) {
        for copy in self.copies.iter_mut().rev() {
            copy.undo(ctx);
        }
        ctx.log("Undo: Copies removed.");
    }

    fn redo(&mut self, ctx: &mut EditorContext) {
        for copy in self.copies.iter_mut() {
            copy.redo(ctx);
        }
        ctx.log("Redo: Elements copied again.");
    }

    fn repeat(&self) -> Option<Box<dyn Command>> {
        self.interactive_execution_done
            .then(|| Box::new(CopyCommand::new()) as Box<dyn Command>)
    }
}
