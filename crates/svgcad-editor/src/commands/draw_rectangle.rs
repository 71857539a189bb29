//! 矩形命令：第一角点 → 对角点（绝对坐标或 `@宽,高`）

use super::{begin_draw, commit_shape, format_value};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::signals::InputKind;
use svgcad_core::geometry::{Geometry, Rectangle};
use svgcad_core::math::{Point2, EPSILON};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    FirstCorner,
    OppositeCorner,
    Done,
}

pub struct DrawRectangleCommand {
    status: Status,
    first: Point2,
}

impl DrawRectangleCommand {
    pub fn new() -> Self {
        Self {
            status: Status::FirstCorner,
            first: Point2::origin(),
        }
    }
}

impl Default for DrawRectangleCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for DrawRectangleCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::DrawRectangle
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
            (Status::FirstCorner, InputEvent::Point(point)) => {
                self.first = point;
                // `@宽,高` 相对第一角点解析
                ctx.session.last_point = Some(point);
                ctx.log(format!("First corner: {}", EditorContext::format_point(&point)));
                ctx.log("Specify opposite corner or enter @width,height.");
                ctx.inputs.subscribe_once(InputKind::Point);
                self.status = Status::OppositeCorner;
            }
            (Status::OppositeCorner, InputEvent::Point(point)) => {
                let rect = Rectangle::from_corners(self.first, point);
                if rect.width < EPSILON || rect.height < EPSILON {
                    ctx.log("Rectangle must have a non-zero width and height.");
                    ctx.inputs.subscribe_once(InputKind::Point);
                    return Ok(CommandStep::Continue);
                }
                ctx.clear_ghost();
                commit_shape(ctx, Geometry::Rectangle(rect))?;
                info!("Rectangle drawn {}x{}", rect.width, rect.height);
                ctx.log(format!(
                    "Rectangle: {} x {}",
                    format_value(rect.width),
                    format_value(rect.height)
                ));
                ctx.session.last_point = Some(point);
                self.status = Status::Done;
                return Ok(CommandStep::Finished);
            }
            _ => {}
        }
        Ok(CommandStep::Continue)
    }

    fn on_pointer_move(&mut self, ctx: &mut EditorContext, point: &Point2) {
        if self.status == Status::OppositeCorner {
            ctx.show_rubber_band(Geometry::Rectangle(Rectangle::from_corners(self.first, *point)));
        }
    }

    fn undo(&mut self, _ctx: &mut EditorContext) {}

    fn redo(&mut self, _ctx: &mut EditorContext) {}

    fn repeat(&self) -> Option<Box<dyn Command>> {
        Some(Box::new(DrawRectangleCommand::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgcad_core::input_parser::InputParser;

    #[test]
    fn test_corners_are_normalised() {
        let mut ctx = EditorContext::default();
        let mut command = DrawRectangleCommand::new();
        command.execute(&mut ctx).unwrap();
        command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(4.0, 5.0)))
            .unwrap();
        let step = command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(1.0, 1.0)))
            .unwrap();
        assert_eq!(step, CommandStep::Finished);
        assert_eq!(
            ctx.drawing.all_primitives()[0].geometry,
            Geometry::Rectangle(Rectangle::new(Point2::new(1.0, 1.0), 3.0, 4.0))
        );
    }

    #[test]
    fn test_relative_size_from_first_corner() {
        let mut ctx = EditorContext::default();
        let mut command = DrawRectangleCommand::new();
        command.execute(&mut ctx).unwrap();
        command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(2.0, 2.0)))
            .unwrap();
        let opposite = InputParser::parse_point("@6,3", ctx.session.last_point).unwrap();
        command
            .on_input(&mut ctx, InputEvent::Point(opposite))
            .unwrap();
        assert_eq!(
            ctx.drawing.all_primitives()[0].geometry,
            Geometry::Rectangle(Rectangle::new(Point2::new(2.0, 2.0), 6.0, 3.0))
        );
    }

    #[test]
    fn test_degenerate_rectangle_is_rejected() {
        let mut ctx = EditorContext::default();
        let mut command = DrawRectangleCommand::new();
        command.execute(&mut ctx).unwrap();
        command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(2.0, 2.0)))
            .unwrap();
        let step = command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(8.0, 2.0)))
            .unwrap();
        assert_eq!(step, CommandStep::Continue);
        assert!(ctx.drawing.is_empty());
        assert!(ctx.inputs.is_subscribed(InputKind::Point));
    }
}
