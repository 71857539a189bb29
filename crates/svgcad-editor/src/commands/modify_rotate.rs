//! 旋转命令
//!
//! 选择 → 中心点 → 参考点或键入角度（度，逆时针为正）→ 目标点。
//! 矩形旋转后不再轴对齐，以新 ID 的多边形替换。

use super::{confirm_selection, format_value, prompt_selection, TransformSnapshot};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::ghost::GhostTransform;
use crate::signals::InputKind;
use svgcad_core::input_parser::{InputParser, InputValue};
use svgcad_core::math::Point2;
use svgcad_core::transform::{rotation_angle, Transform2D};
use tracing::info;

/// 旋转状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待选择对象
    SelectObjects,
    /// 等待指定旋转中心
    SetCenter,
    /// 等待参考点或角度
    SetReference,
    /// 等待目标点
    SetTarget,
    Done,
}

pub struct RotateCommand {
    status: Status,
    snapshot: TransformSnapshot,
    center: Point2,
    reference: Point2,
    /// 旋转角（弧度）
    angle: f64,
    interactive_execution_done: bool,
}

impl RotateCommand {
    pub fn new() -> Self {
        Self {
            status: Status::SelectObjects,
            snapshot: TransformSnapshot::default(),
            center: Point2::origin(),
            reference: Point2::origin(),
            angle: 0.0,
            interactive_execution_done: false,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    fn transform(&self) -> Transform2D {
        Transform2D::Rotate {
            center: self.center,
            angle: self.angle,
        }
    }

    fn perform_rotation(&mut self, ctx: &mut EditorContext, angle: f64) -> CommandStep {
        ctx.clear_ghost();
        self.angle = angle;
        let transform = self.transform();
        self.snapshot.apply(ctx, &transform);

        let degrees = format_value(angle.to_degrees());
        info!("Rotated {} elements by {} degrees", self.snapshot.len(), degrees);
        ctx.log(format!("Elements rotated by {} degrees.", degrees));
        ctx.clear_selection();
        self.status = Status::Done;
        self.interactive_execution_done = true;
        CommandStep::Completed
    }
}

impl Default for RotateCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for RotateCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::Rotate
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        if self.interactive_execution_done {
            return Ok(CommandStep::Finished);
        }
        prompt_selection(ctx, self.name(), "rotate");
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
                ctx.log("Specify center point.");
                ctx.inputs.subscribe_once(InputKind::Point);
                self.status = Status::SetCenter;
            }
            (Status::SetCenter, InputEvent::Point(point)) => {
                self.center = point;
                ctx.session.last_point = Some(point);
                ctx.log(format!("Center point: {}", EditorContext::format_point(&point)));
                ctx.log("Specify reference point or an angle to rotate.");
                ctx.inputs.subscribe_once(InputKind::Point);
                ctx.inputs.subscribe(InputKind::Value);
                self.status = Status::SetReference;
            }
            (Status::SetReference, InputEvent::Value(text)) => {
                // 键入角度：数值或 `<角度`
                let degrees = match InputParser::parse(&text, None) {
                    Ok(InputValue::Number(v)) => Some(v),
                    Ok(InputValue::Angle(rad)) => Some(rad.to_degrees()),
                    _ => None,
                };
                match degrees {
                    Some(degrees) => return Ok(self.perform_rotation(ctx, degrees.to_radians())),
                    None => ctx.log("Invalid angle."),
                }
            }
            (Status::SetReference, InputEvent::Point(point)) => {
                if (point - self.center).norm() < f64::EPSILON {
                    ctx.log("Reference point must differ from the center point.");
                    ctx.inputs.subscribe_once(InputKind::Point);
                    return Ok(CommandStep::Continue);
                }
                ctx.inputs.unsubscribe(InputKind::Value);
                self.reference = point;
                ctx.log(format!("Reference point: {}", EditorContext::format_point(&point)));
                ctx.log("Specify the target point.");
                ctx.start_ghost(
                    &self.snapshot.ids(),
                    GhostTransform::Rotate {
                        center: self.center,
                        reference: point,
                    },
                );
                ctx.inputs.subscribe_once(InputKind::Point);
                self.status = Status::SetTarget;
            }
            (Status::SetTarget, InputEvent::Point(point)) => {
                ctx.log(format!("Target point: {}", EditorContext::format_point(&point)));
                let angle = rotation_angle(&self.center, &self.reference, &point);
                ctx.log(format!("Rotation angle: {}°", format_value(angle.to_degrees())));
                return Ok(self.perform_rotation(ctx, angle));
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
        ctx.log("Undo: Rotation reversed.");
    }

    fn redo(&mut self, ctx: &mut EditorContext) {
        let transform = self.transform();
        self.snapshot.apply(ctx, &transform);
        ctx.log("Redo: Rotation reapplied.");
    }

    fn repeat(&self) -> Option<Box<dyn Command>> {
        self.interactive_execution_done
            .then(|| Box::new(RotateCommand::new()) as Box<dyn Command>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgcad_core::entity::GroupId;
    use svgcad_core::geometry::{Geometry, Line, Rectangle};
    use svgcad_core::properties::Style;

    const TOL: f64 = 1e-9;

    fn start(ctx: &mut EditorContext, command: &mut RotateCommand) {
        command.execute(ctx).unwrap();
        command.on_input(ctx, InputEvent::Confirm).unwrap();
        command
            .on_input(ctx, InputEvent::Point(Point2::origin()))
            .unwrap();
    }

    #[test]
    fn test_rotate_by_points() {
        let mut ctx = EditorContext::default();
        let id = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::new(1.0, 0.0), Point2::new(2.0, 0.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        ctx.session.select(id);

        let mut command = RotateCommand::new();
        start(&mut ctx, &mut command);
        command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(5.0, 0.0)))
            .unwrap();
        let step = command
            .on_input(&mut ctx, InputEvent::Point(Point2::new(0.0, 3.0)))
            .unwrap();
        assert_eq!(step, CommandStep::Completed);
        assert!((command.angle() - std::f64::consts::FRAC_PI_2).abs() < TOL);

        match ctx.drawing.geometry(id) {
            Some(Geometry::Line(l)) => {
                assert!((l.start - Point2::new(0.0, 1.0)).norm() < TOL);
                assert!((l.end - Point2::new(0.0, 2.0)).norm() < TOL);
            }
            other => panic!("unexpected {:?}", other),
        }

        command.undo(&mut ctx);
        assert_eq!(
            ctx.drawing.geometry(id),
            Some(&Geometry::Line(Line::new(Point2::new(1.0, 0.0), Point2::new(2.0, 0.0))))
        );
    }

    #[test]
    fn test_typed_angle_rotates_rectangle_into_polygon() {
        let mut ctx = EditorContext::default();
        let rect = ctx.drawing.add_primitive(
            Geometry::Rectangle(Rectangle::new(Point2::new(1.0, 0.0), 2.0, 1.0)),
            Style::default(),
            GroupId::DRAWING,
        );
        ctx.session.select(rect);

        let mut command = RotateCommand::new();
        start(&mut ctx, &mut command);
        let step = command
            .on_input(&mut ctx, InputEvent::Value("90".to_string()))
            .unwrap();
        assert_eq!(step, CommandStep::Completed);
        assert!(!ctx.drawing.contains(rect));
        let polygon = ctx.drawing.all_primitives()[0].id;
        assert_eq!(ctx.drawing.all_primitives()[0].geometry.type_name(), "Polygon");

        command.undo(&mut ctx);
        assert!(ctx.drawing.contains(rect));
        assert!(!ctx.drawing.contains(polygon));

        // 重做得到同一个多边形，而不是再旋转一次
        command.redo(&mut ctx);
        let redone = &ctx.drawing.all_primitives()[0];
        assert_eq!(redone.id, polygon);
        match &redone.geometry {
            Geometry::Polygon(p) => assert!((p.points[0] - Point2::new(0.0, 1.0)).norm() < TOL),
            other => panic!("unexpected {:?}", other),
        }
    }
}
