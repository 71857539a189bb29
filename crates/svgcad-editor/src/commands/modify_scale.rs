//! 缩放命令
//!
//! 选择 → 基点 → 参考点 → 目标点，比例 = |目标 - 基点| / |参考 - 基点|；
//! 参考点或目标点阶段也可以直接键入比例。

use super::{confirm_selection, format_value, parse_positive, prompt_selection, TransformSnapshot};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::ghost::GhostTransform;
use crate::signals::InputKind;
use svgcad_core::math::{Point2, EPSILON};
use svgcad_core::transform::Transform2D;
use tracing::info;

/// 缩放状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    SelectObjects,
    SetBasePoint,
    SetReference,
    SetTarget,
    Done,
}

pub struct ScaleCommand {
    status: Status,
    snapshot: TransformSnapshot,
    base_point: Point2,
    reference: Point2,
    factor: f64,
    interactive_execution_done: bool,
}

impl ScaleCommand {
    pub fn new() -> Self {
        Self {
            status: Status::SelectObjects,
            snapshot: TransformSnapshot::default(),
            base_point: Point2::origin(),
            reference: Point2::origin(),
            factor: 1.0,
            interactive_execution_done: false,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    fn transform(&self) -> Transform2D {
        Transform2D::Scale {
            base: self.base_point,
            factor: self.factor,
        }
    }

    fn scale_elements(&mut self, ctx: &mut EditorContext, factor: f64) -> CommandStep {
        ctx.clear_ghost();
        self.factor = factor;
        let transform = self.transform();
        self.snapshot.apply(ctx, &transform);

        info!("Scaled {} elements by {}", self.snapshot.len(), factor);
        ctx.log(format!("Elements scaled by {}.", format_value(factor)));
        ctx.clear_selection();
        self.status = Status::Done;
        self.interactive_execution_done = true;
        CommandStep::Completed
    }

    fn typed_factor(&mut self, ctx: &mut EditorContext, text: &str) -> CommandStep {
        match parse_positive(text) {
            Some(factor) => self.scale_elements(ctx, factor),
            None => {
                ctx.log("Invalid scale factor.");
                CommandStep::Continue
            }
        }
    }
}

impl Default for ScaleCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ScaleCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::Scale
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        if self.interactive_execution_done {
            return Ok(CommandStep::Finished);
        }
        prompt_selection(ctx, self.name(), "scale");
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
                ctx.log("Specify reference point or enter a scale factor.");
                ctx.inputs.subscribe_once(InputKind::Point);
                ctx.inputs.subscribe(InputKind::Value);
                self.status = Status::SetReference;
            }
            (Status::SetReference, InputEvent::Point(point)) => {
                if (point - self.base_point).norm() < EPSILON {
                    ctx.log("Reference point must differ from the base point.");
                    ctx.inputs.subscribe_once(InputKind::Point);
                    return Ok(CommandStep::Continue);
                }
                self.reference = point;
                ctx.log(format!("Reference point: {}", EditorContext::format_point(&point)));
                ctx.log("Specify second point or enter a scale factor.");
                ctx.start_ghost(
                    &self.snapshot.ids(),
                    GhostTransform::Scale {
                        base: self.base_point,
                        reference: point,
                    },
                );
                ctx.inputs.subscribe_once(InputKind::Point);
                self.status = Status::SetTarget;
            }
            (Status::SetTarget, InputEvent::Point(point)) => {
                let factor = (point - self.base_point).norm() / (self.reference - self.base_point).norm();
                if factor < EPSILON {
                    ctx.log("Invalid scale factor.");
                    ctx.inputs.subscribe_once(InputKind::Point);
                    return Ok(CommandStep::Continue);
                }
                return Ok(self.scale_elements(ctx, factor));
            }
            (Status::SetReference | Status::SetTarget, InputEvent::Value(text)) => {
                return Ok(self.typed_factor(ctx, &text));
            }
            _ => {}
        }
        Ok(CommandStep::Continue)
    }

    fn on_pointer_move(&mut self, ctx: &mut EditorContext, _point: &Point2) {
        if self.status == Status::SetTarget {
            ctx.update_ghost();
        }
    }

    fn undo(&mut self, ctx: &mut EditorContext) {
        self.snapshot.restore(ctx);
        ctx.log("Undo: Scale reversed.");
    }

    fn redo(&mut self, ctx: &mut EditorContext) {
        let transform = self.transform();
        self.snapshot.apply(ctx, &transform);
        ctx.log("Redo: Scale reapplied.");
    }

    fn repeat(&self) -> Option<Box<dyn Command>> {
        self.interactive_execution_done
            .then(|| Box::new(ScaleCommand::new()) as Box<dyn Command>)
    }
}
