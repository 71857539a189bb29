//! 圆命令：圆心 → 圆上一点或键入半径

use super::{begin_draw, commit_shape, format_value, parse_positive};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::signals::InputKind;
use svgcad_core::distance::distance;
use svgcad_core::geometry::{Circle, Geometry};
use svgcad_core::math::{Point2, EPSILON};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Center,
    Radius,
    Done,
}

pub struct DrawCircleCommand {
    status: Status,
    center: Point2,
}

impl DrawCircleCommand {
    pub fn new() -> Self {
        Self {
            status: Status::Center,
            center: Point2::origin(),
        }
    }

    fn finish(&mut self, ctx: &mut EditorContext, radius: f64) -> Result<CommandStep, CommandError> {
        ctx.clear_ghost();
        commit_shape(ctx, Geometry::Circle(Circle::new(self.center, radius)))?;
        info!("Circle drawn with radius {}", radius);
        ctx.log(format!("Circle radius: {}", format_value(radius)));
        self.status = Status::Done;
        Ok(CommandStep::Finished)
    }
}

impl Default for DrawCircleCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for DrawCircleCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::DrawCircle
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        begin_draw(ctx, self.name())?;
        ctx.inputs.subscribe_once(InputKind::Point);
        Ok(CommandStep::Continue)
    }

    fn on_input(
        &mut self,
        ctx: &mut EditorContext,
        input: InputEvent,
    ) -> Result<CommandStep, CommandError> {
        match (self.status, input) {
            (Status::Center, InputEvent::Point(point)) => {
                self.center = point;
                ctx.session.last_point = Some(point);
                ctx.log(format!("Center point: {}", EditorContext::format_point(&point)));
                ctx.log("Specify a point on the circle or enter a radius.");
                ctx.inputs.subscribe_once(InputKind::Point);
                ctx.inputs.subscribe(InputKind::Value);
                self.status = Status::Radius;
            }
            (Status::Radius, InputEvent::Point(point)) => {
                let radius = distance(&self.center, &point);
                if radius < EPSILON {
                    ctx.log("Invalid radius.");
                    ctx.inputs.subscribe_once(InputKind::Point);
                    return Ok(CommandStep::Continue);
                }
                return self.finish(ctx, radius);
            }
            (Status::Radius, InputEvent::Value(text)) => match parse_positive(&text) {
                Some(radius) => return self.finish(ctx, radius),
                None => ctx.log("Invalid radius."),
            },
            _ => {}
        }
        Ok(CommandStep::Continue)
    }

    fn on_pointer_move(&mut self, ctx: &mut EditorContext, point: &Point2) {
        if self.status == Status::Radius {
            let radius = distance(&self.center, point);
            ctx.show_rubber_band(Geometry::Circle(Circle::new(self.center, radius)));
        }
    }

    fn undo(&mut self, _ctx: &mut EditorContext) {}

    fn redo(&mut self, _ctx: &mut EditorContext) {}

    fn repeat(&self) -> Option<Box<dyn Command>> {
        Some(Box::new(DrawCircleCommand::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> (EditorContext, DrawCircleCommand) {
        let mut ctx = EditorContext::default();
        let mut command = DrawCircleCommand::new();
        command.execute(&mut ctx).unwrap();
        command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(2.0, 2.0)))
            .unwrap();
        (ctx, command)
    }

    #[test]
    fn test_radius_from_point() {
        let (mut ctx, mut command) = started();
        let step = command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(5.0, 6.0)))
            .unwrap();
        assert_eq!(step, CommandStep::Finished);
        assert_eq!(
            ctx.drawing.all_primitives()[0].geometry,
            Geometry::Circle(Circle::new(Point2::new(2.0, 2.0), 5.0))
        );
        assert_eq!(ctx.take_registered().len(), 1);
    }

    #[test]
    fn test_typed_radius() {
        let (mut ctx, mut command) = started();
        assert_eq!(
            command.on_input(&mut ctx, InputEvent::Value("-1".to_string())),
            Ok(CommandStep::Continue)
        );
        assert!(ctx.drawing.is_empty());
        let step = command
            .on_input(&mut ctx, InputEvent::Value("1.5".to_string()))
            .unwrap();
        assert_eq!(step, CommandStep::Finished);
        assert_eq!(
            ctx.drawing.all_primitives()[0].geometry,
            Geometry::Circle(Circle::new(Point2::new(2.0, 2.0), 1.5))
        );
    }
}
