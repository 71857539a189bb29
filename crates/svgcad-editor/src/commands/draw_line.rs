//! 直线命令
//!
//! 点击或键入点连续绘制线段，每段的终点是下一段的起点。
//! 每段提交为一条添加图元记录；回车或 Esc 结束，已提交的线段保留。

use super::{begin_draw, commit_shape, parse_positive};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::signals::InputKind;
use svgcad_core::distance::{delta_from_base_point, ortho_point};
use svgcad_core::geometry::{Geometry, Line};
use svgcad_core::math::{Point2, EPSILON};
use tracing::debug;

/// 直线状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待起点
    FirstPoint,
    /// 等待下一个点或长度
    NextPoint,
}

pub struct DrawLineCommand {
    status: Status,
    start: Point2,
    /// 已提交的段数
    segments: usize,
}

impl DrawLineCommand {
    pub fn new() -> Self {
        Self {
            status: Status::FirstPoint,
            start: Point2::origin(),
            segments: 0,
        }
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    fn constrained(&self, ctx: &EditorContext, point: &Point2) -> Point2 {
        if ctx.session.ortho_mode {
            ortho_point(&self.start, point)
        } else {
            *point
        }
    }

    fn commit_segment(&mut self, ctx: &mut EditorContext, end: Point2) -> Result<(), CommandError> {
        if (end - self.start).norm() < EPSILON {
            return Ok(());
        }
        commit_shape(ctx, Geometry::Line(Line::new(self.start, end)))?;
        self.segments += 1;
        debug!("Line segment {} committed", self.segments);
        self.start = end;
        ctx.session.last_point = Some(end);
        Ok(())
    }
}

impl Default for DrawLineCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for DrawLineCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::DrawLine
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        begin_draw(ctx, self.name())?;
        ctx.inputs.subscribe(InputKind::Point);
        ctx.inputs.subscribe(InputKind::Value);
        ctx.inputs.subscribe(InputKind::Confirm);
        Ok(CommandStep::Continue)
    }

    fn on_input(
        &mut self,
        ctx: &mut EditorContext,
        input: InputEvent,
    ) -> Result<CommandStep, CommandError> {
        match (self.status, input) {
            (Status::FirstPoint, InputEvent::Point(point)) => {
                self.start = point;
                ctx.session.last_point = Some(point);
                ctx.log("Specify next point or enter a length.");
                self.status = Status::NextPoint;
            }
            (Status::NextPoint, InputEvent::Point(point)) => {
                let end = self.constrained(ctx, &point);
                self.commit_segment(ctx, end)?;
            }
            (Status::NextPoint, InputEvent::Value(text)) => {
                // 沿指针方向画出键入的长度
                let delta = parse_positive(&text).map(|length| {
                    delta_from_base_point(
                        &self.start,
                        &ctx.session.cursor,
                        Some(length),
                        ctx.session.ortho_mode,
                    )
                });
                match delta {
                    Some(delta) if delta.norm() > EPSILON => {
                        let end = self.start + delta;
                        self.commit_segment(ctx, end)?;
                    }
                    _ => ctx.log("Invalid length."),
                }
            }
            (Status::FirstPoint, InputEvent::Value(_)) => ctx.log("Specify a start point."),
            (_, InputEvent::Confirm) => return Ok(CommandStep::Finished),
            _ => {}
        }
        Ok(CommandStep::Continue)
    }

    fn on_pointer_move(&mut self, ctx: &mut EditorContext, point: &Point2) {
        if self.status == Status::NextPoint {
            let end = self.constrained(ctx, point);
            ctx.show_rubber_band(Geometry::Line(Line::new(self.start, end)));
        }
    }

    // 每段线由各自的添加图元记录撤销
    fn undo(&mut self, _ctx: &mut EditorContext) {}

    fn redo(&mut self, _ctx: &mut EditorContext) {}

    fn repeat(&self) -> Option<Box<dyn Command>> {
        Some(Box::new(DrawLineCommand::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ctx: &mut EditorContext, command: &mut DrawLineCommand, x: f64, y: f64) -> CommandStep {
        command
            .on_input(ctx, InputEvent::Point(Point2::new(x, y)))
            .unwrap()
    }

    #[test]
    fn test_segments_chain_from_last_endpoint() {
        let mut ctx = EditorContext::default();
        let mut command = DrawLineCommand::new();
        command.execute(&mut ctx).unwrap();
        assert!(ctx.session.is_drawing());

        point(&mut ctx, &mut command, 0.0, 0.0);
        point(&mut ctx, &mut command, 10.0, 0.0);
        point(&mut ctx, &mut command, 10.0, 5.0);
        assert_eq!(command.segments(), 2);
        assert_eq!(ctx.take_registered().len(), 2);

        let lines: Vec<_> = ctx.drawing.all_primitives().iter().map(|e| e.geometry.clone()).collect();
        assert_eq!(
            lines,
            vec![
                Geometry::Line(Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))),
                Geometry::Line(Line::new(Point2::new(10.0, 0.0), Point2::new(10.0, 5.0))),
            ]
        );

        assert_eq!(
            command.on_input(&mut ctx, InputEvent::Confirm),
            Ok(CommandStep::Finished)
        );
    }

    #[test]
    fn test_ortho_constrains_endpoint() {
        let mut ctx = EditorContext::default();
        ctx.session.ortho_mode = true;
        let mut command = DrawLineCommand::new();
        command.execute(&mut ctx).unwrap();
        point(&mut ctx, &mut command, 1.0, 1.0);
        point(&mut ctx, &mut command, 2.0, 8.0);
        assert_eq!(
            ctx.drawing.all_primitives()[0].geometry,
            Geometry::Line(Line::new(Point2::new(1.0, 1.0), Point2::new(1.0, 8.0)))
        );
    }

    #[test]
    fn test_typed_length_follows_cursor() {
        let mut ctx = EditorContext::default();
        let mut command = DrawLineCommand::new();
        command.execute(&mut ctx).unwrap();
        point(&mut ctx, &mut command, 0.0, 0.0);
        ctx.session.cursor = Point2::new(0.0, -3.0);
        command
            .on_input(&mut ctx, InputEvent::Value("4".to_string()))
            .unwrap();
        assert_eq!(
            ctx.drawing.all_primitives()[0].geometry,
            Geometry::Line(Line::new(Point2::new(0.0, 0.0), Point2::new(0.0, -4.0)))
        );
    }

    #[test]
    fn test_zero_length_segment_is_skipped() {
        let mut ctx = EditorContext::default();
        let mut command = DrawLineCommand::new();
        command.execute(&mut ctx).unwrap();
        point(&mut ctx, &mut command, 3.0, 3.0);
        point(&mut ctx, &mut command, 3.0, 3.0);
        assert!(ctx.drawing.is_empty());
    }

    #[test]
    fn test_refuses_to_start_while_busy() {
        let mut ctx = EditorContext::default();
        ctx.session.begin_interacting().unwrap();
        let mut command = DrawLineCommand::new();
        assert_eq!(command.execute(&mut ctx), Err(CommandError::Busy));
    }
}
