//! 移动命令
//!
//! 选择 → 回车确认 → 基点 → 第二点或距离

use super::{
    confirm_selection, prompt_selection, set_pending_distance, translation_to, TransformSnapshot,
};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::ghost::GhostTransform;
use crate::signals::InputKind;
use svgcad_core::math::{Point2, Vector2};
use svgcad_core::transform::Transform2D;
use tracing::info;

/// 移动状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待选择对象
    SelectObjects,
    /// 等待指定基点
    SetBasePoint,
    /// 等待第二点或距离
    SetSecondPoint,
    Done,
}

pub struct MoveCommand {
    status: Status,
    snapshot: TransformSnapshot,
    base_point: Point2,
    delta: Vector2,
    interactive_execution_done: bool,
}

impl MoveCommand {
    pub fn new() -> Self {
        Self {
            status: Status::SelectObjects,
            snapshot: TransformSnapshot::default(),
            base_point: Point2::origin(),
            delta: Vector2::zeros(),
            interactive_execution_done: false,
        }
    }

    pub fn delta(&self) -> Vector2 {
        self.delta
    }

    fn finish(&mut self, ctx: &mut EditorContext, delta: Vector2) -> CommandStep {
        ctx.clear_ghost();
        self.delta = delta;
        self.snapshot.apply(ctx, &Transform2D::Translate(delta));
        info!("Moved {} elements by ({}, {})", self.snapshot.len(), delta.x, delta.y);
        ctx.log("Elements moved.");
        ctx.clear_selection();
        self.status = Status::Done;
        self.interactive_execution_done = true;
        CommandStep::Completed
    }
}

impl Default for MoveCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for MoveCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::Move
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        if self.interactive_execution_done {
            return Ok(CommandStep::Finished);
        }
        prompt_selection(ctx, self.name(), "move");
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
                    return Ok(self.finish(ctx, delta));
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
        self.snapshot.restore(ctx);
        ctx.log("Undo: Elements moved back.");
    }

    fn redo(&mut self, ctx: &mut EditorContext) {
        self.snapshot.apply(ctx, &Transform2D::Translate(self.delta));
        ctx.log("Redo: Elements moved again.");
    }

    fn repeat(&self) -> Option<Box<dyn Command>> {
        self.interactive_execution_done
            .then(|| Box::new(MoveCommand::new()) as Box<dyn Command>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgcad_core::entity::{EntityId, GroupId};
    use svgcad_core::geometry::{Circle, Geometry, Line};
    use svgcad_core::properties::Style;

    fn setup() -> (EditorContext, EntityId, EntityId) {
        let mut ctx = EditorContext::default();
        let line = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        let circle = ctx.drawing.add_primitive(
            Geometry::Circle(Circle::new(Point2::new(5.0, 5.0), 2.0)),
            Style::default(),
            GroupId::DRAWING,
        );
        ctx.session.select(line);
        ctx.session.select(circle);
        (ctx, line, circle)
    }

    #[test]
    fn test_move_by_points() {
        let (mut ctx, line, circle) = setup();
        let mut command = MoveCommand::new();
        assert_eq!(command.execute(&mut ctx), Ok(CommandStep::Continue));
        command.on_input(&mut ctx, InputEvent::Confirm).unwrap();
        assert!(ctx.session.is_interacting());
        command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(1.0, 1.0)))
            .unwrap();
        let step = command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(6.0, -2.0)))
            .unwrap();
        assert_eq!(step, CommandStep::Completed);
        assert_eq!(command.delta(), Vector2::new(5.0, -3.0));
        assert_eq!(
            ctx.drawing.geometry(line),
            Some(&Geometry::Line(Line::new(Point2::new(5.0, -3.0), Point2::new(15.0, -3.0))))
        );
        assert_eq!(
            ctx.drawing.geometry(circle),
            Some(&Geometry::Circle(Circle::new(Point2::new(10.0, 2.0), 2.0)))
        );

        // 完成后再次 execute 是空操作
        assert_eq!(command.execute(&mut ctx), Ok(CommandStep::Finished));
        assert_eq!(
            ctx.drawing.geometry(circle),
            Some(&Geometry::Circle(Circle::new(Point2::new(10.0, 2.0), 2.0)))
        );
    }

    #[test]
    fn test_typed_distance_waits_for_direction() {
        let (mut ctx, line, _) = setup();
        let original = ctx.drawing.geometry(line).cloned();
        let mut command = MoveCommand::new();
        command.execute(&mut ctx).unwrap();
        command.on_input(&mut ctx, InputEvent::Confirm).unwrap();
        command
            .on_input(&mut ctx, InputEvent::Point(Point2::origin()))
            .unwrap();
        command
            .on_input(&mut ctx, InputEvent::Value("abc".to_string()))
            .unwrap();
        assert_eq!(ctx.session.pending_distance, None);

        let step = command
            .on_input(&mut ctx, InputEvent::Value("4".to_string()))
            .unwrap();
        assert_eq!(step, CommandStep::Continue);
        assert_eq!(ctx.session.pending_distance, Some(4.0));
        assert_eq!(ctx.drawing.geometry(line).cloned(), original);

        // 点击只决定方向
        let step = command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(0.0, 20.0)))
            .unwrap();
        assert_eq!(step, CommandStep::Completed);
        assert_eq!(
            ctx.drawing.geometry(line),
            Some(&Geometry::Line(Line::new(Point2::new(0.0, 4.0), Point2::new(10.0, 4.0))))
        );
    }

    #[test]
    fn test_point_on_base_is_rejected() {
        let (mut ctx, line, _) = setup();
        let original = ctx.drawing.geometry(line).cloned();
        let mut command = MoveCommand::new();
        command.execute(&mut ctx).unwrap();
        command.on_input(&mut ctx, InputEvent::Confirm).unwrap();
        command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(1.0, 1.0)))
            .unwrap();
        command
            .on_input(&mut ctx, InputEvent::Value("5".to_string()))
            .unwrap();

        let step = command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(1.0, 1.0)))
            .unwrap();
        assert_eq!(step, CommandStep::Continue);
        assert_eq!(ctx.drawing.geometry(line).cloned(), original);
        assert!(ctx.inputs.is_subscribed(InputKind::Point));
        assert!(command.repeat().is_none());
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let mut ctx = EditorContext::default();
        let mut command = MoveCommand::new();
        command.execute(&mut ctx).unwrap();
        assert_eq!(
            command.on_input(&mut ctx, InputEvent::Confirm),
            Err(CommandError::NoSelection)
        );
        assert!(ctx.session.is_idle());
    }
}
