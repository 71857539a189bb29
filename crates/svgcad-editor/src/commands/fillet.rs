//! 倒圆角命令
//!
//! 键入数值设置半径（记忆在命令参数中）；单选模式下依次点击两条直线，
//! 点击位置决定每条线保留哪一端。半径为 0 时两线延伸/裁剪到交点。
//! 计算失败时绘图保持不变，只输出失败信息，不进入历史。

use super::{format_value, AddElementCommand};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::signals::InputKind;
use svgcad_core::entity::EntityId;
use svgcad_core::fillet::{fillet_lines, FilletResult};
use svgcad_core::geometry::{Geometry, Line};
use svgcad_core::input_parser::InputParser;
use svgcad_core::math::Point2;
use tracing::{info, warn};

/// 倒圆角状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待第一条线
    SelectFirst,
    /// 等待第二条线
    SelectSecond,
    Done,
}

/// 一条被选中的线
#[derive(Debug, Clone, Copy)]
struct Pick {
    id: EntityId,
    click: Point2,
}

pub struct FilletCommand {
    status: Status,
    picks: Vec<Pick>,
    radius: f64,
    /// 执行前的两条线
    originals: Vec<(EntityId, Line)>,
    result: Option<FilletResult>,
    arc: Option<AddElementCommand>,
    interactive_execution_done: bool,
}

impl FilletCommand {
    pub fn new() -> Self {
        Self {
            status: Status::SelectFirst,
            picks: Vec::new(),
            radius: 0.0,
            originals: Vec::new(),
            result: None,
            arc: None,
            interactive_execution_done: false,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// 新增圆弧的 ID
    pub fn arc_id(&self) -> Option<EntityId> {
        self.arc.as_ref().and_then(|a| a.id())
    }

    fn start_selection(&mut self, ctx: &mut EditorContext) {
        ctx.session.select_single_element = true;
        ctx.inputs.subscribe_once(InputKind::Element);
    }

    fn line_of(ctx: &EditorContext, id: EntityId) -> Option<Line> {
        match ctx.drawing.geometry(id) {
            Some(Geometry::Line(line)) => Some(*line),
            _ => None,
        }
    }

    fn fillet_elements(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        self.status = Status::Done;
        let (first, second) = (self.picks[0], self.picks[1]);

        let lines = (Self::line_of(ctx, first.id), Self::line_of(ctx, second.id));
        let (Some(line1), Some(line2)) = lines else {
            ctx.log("Fillet only works with line elements.");
            return Ok(CommandStep::Finished);
        };
        if first.id == second.id {
            ctx.log("Select two different lines.");
            return Ok(CommandStep::Finished);
        }

        let radius = self.radius;
        // 先计算后修改：失败时绘图不变
        match fillet_lines(&line1, &line2, radius, (first.click, second.click)) {
            Ok(result) => {
                self.originals = vec![(first.id, line1), (second.id, line2)];
                if let Some(fillet_arc) = result.arc {
                    let Some(source) = ctx.drawing.find_by_id(first.id) else {
                        return Ok(CommandStep::Finished);
                    };
                    self.arc = Some(AddElementCommand::new(
                        Geometry::Arc(fillet_arc.to_arc()),
                        source.style,
                        source.group,
                    ));
                }
                self.result = Some(result);
                self.apply(ctx)?;

                info!("Fillet {} / {} with radius {}", first.id, second.id, radius);
                ctx.log(format!("Fillet completed with radius {}", format_value(radius)));
                ctx.clear_selection();
                self.interactive_execution_done = true;
                Ok(CommandStep::Completed)
            }
            Err(err) => {
                warn!("Fillet failed: {}", err);
                ctx.log(format!("Fillet failed: {}", err));
                ctx.clear_selection();
                Ok(CommandStep::Finished)
            }
        }
    }

    fn apply(&mut self, ctx: &mut EditorContext) -> Result<(), CommandError> {
        let Some(result) = self.result.as_ref() else {
            return Ok(());
        };
        if let [(id1, _), (id2, _)] = self.originals.as_slice() {
            ctx.drawing.replace_geometry(*id1, Geometry::Line(result.line1));
            ctx.drawing.replace_geometry(*id2, Geometry::Line(result.line2));
        }
        if let Some(arc) = self.arc.as_mut() {
            arc.execute(ctx)?;
        }
        ctx.notify_drawing_changed();
        Ok(())
    }
}

impl Default for FilletCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for FilletCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::Fillet
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        if self.interactive_execution_done {
            return Ok(CommandStep::Finished);
        }
        ctx.session.begin_interacting()?;
        self.radius = ctx.session.params.fillet_radius;
        ctx.log_strong(format!("{} ", self.name().to_uppercase()));
        ctx.log_span(format!(
            "Select elements to fillet - Radius: {}",
            format_value(self.radius)
        ));
        ctx.clear_selection();
        ctx.inputs.subscribe(InputKind::Value);
        self.start_selection(ctx);
        Ok(CommandStep::Continue)
    }

    fn on_input(
        &mut self,
        ctx: &mut EditorContext,
        input: InputEvent,
    ) -> Result<CommandStep, CommandError> {
        match (self.status, input) {
            (Status::SelectFirst | Status::SelectSecond, InputEvent::Value(text)) => {
                match InputParser::parse_value(&text) {
                    Ok(radius) if radius >= 0.0 => {
                        self.radius = radius;
                        ctx.session.params.fillet_radius = radius;
                        ctx.log(format!("Radius set to {}", format_value(radius)));
                    }
                    _ => ctx.log("Invalid radius."),
                }
            }
            (Status::SelectFirst, InputEvent::Element { id, click }) => {
                self.picks.push(Pick { id, click });
                self.status = Status::SelectSecond;
                self.start_selection(ctx);
            }
            (Status::SelectSecond, InputEvent::Element { id, click }) => {
                self.picks.push(Pick { id, click });
                ctx.inputs.clear();
                return self.fillet_elements(ctx);
            }
            _ => {}
        }
        Ok(CommandStep::Continue)
    }

    fn undo(&mut self, ctx: &mut EditorContext) {
        if let Some(arc) = self.arc.as_mut() {
            arc.undo(ctx);
        }
        for (id, line) in &self.originals {
            ctx.drawing.replace_geometry(*id, Geometry::Line(*line));
        }
        ctx.log("Undo: Fillet reversed.");
    }

    fn redo(&mut self, ctx: &mut EditorContext) {
        if let Err(err) = self.apply(ctx) {
            warn!("Fillet redo failed: {}", err);
        }
        ctx.log("Redo: Fillet reapplied.");
    }

    fn repeat(&self) -> Option<Box<dyn Command>> {
        Some(Box::new(FilletCommand::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgcad_core::entity::GroupId;
    use svgcad_core::properties::Style;

    const TOL: f64 = 1e-9;

    fn corner(ctx: &mut EditorContext) -> (EntityId, EntityId) {
        let h = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        let v = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        (h, v)
    }

    fn pick(
        ctx: &mut EditorContext,
        command: &mut FilletCommand,
        id: EntityId,
        click: Point2,
    ) -> CommandStep {
        command.on_input(ctx, InputEvent::Element { id, click }).unwrap()
    }

    #[test]
    fn test_fillet_radius_two_and_undo() {
        let mut ctx = EditorContext::default();
        let (h, v) = corner(&mut ctx);
        let before = ctx.drawing.all_primitives().to_vec();

        let mut command = FilletCommand::new();
        command.execute(&mut ctx).unwrap();
        assert!(ctx.session.is_interacting());
        assert!(ctx.session.select_single_element);
        command
            .on_input(&mut ctx, InputEvent::Value("2".to_string()))
            .unwrap();
        assert_eq!(command.radius(), 2.0);

        assert_eq!(pick(&mut ctx, &mut command, h, Point2::new(8.0, 0.0)), CommandStep::Continue);
        assert_eq!(pick(&mut ctx, &mut command, v, Point2::new(0.0, 8.0)), CommandStep::Completed);

        assert_eq!(ctx.drawing.len(), 3);
        match ctx.drawing.geometry(h) {
            Some(Geometry::Line(l)) => {
                assert!((l.start - Point2::new(2.0, 0.0)).norm() < TOL);
                assert!((l.end - Point2::new(10.0, 0.0)).norm() < TOL);
            }
            other => panic!("unexpected {:?}", other),
        }
        let arc_id = command.arc_id().unwrap();
        match ctx.drawing.geometry(arc_id) {
            Some(Geometry::Arc(arc)) => assert!((arc.radius - 2.0).abs() < TOL),
            other => panic!("unexpected {:?}", other),
        }

        command.undo(&mut ctx);
        assert_eq!(ctx.drawing.all_primitives(), before.as_slice());

        command.redo(&mut ctx);
        assert_eq!(ctx.drawing.len(), 3);
        assert!(ctx.drawing.contains(arc_id));
    }

    #[test]
    fn test_refuses_to_start_while_drawing() {
        let mut ctx = EditorContext::default();
        ctx.session.begin_drawing().unwrap();
        let mut command = FilletCommand::new();
        assert_eq!(command.execute(&mut ctx), Err(CommandError::Busy));
        assert!(ctx.session.is_drawing());
        assert!(!ctx.inputs.is_subscribed(InputKind::Element));
    }

    #[test]
    fn test_failure_leaves_drawing_unchanged() {
        let mut ctx = EditorContext::default();
        let a = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        let b = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::new(0.0, 5.0), Point2::new(10.0, 5.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        let before = ctx.drawing.all_primitives().to_vec();

        let mut command = FilletCommand::new();
        command.execute(&mut ctx).unwrap();
        pick(&mut ctx, &mut command, a, Point2::new(1.0, 0.0));
        assert_eq!(pick(&mut ctx, &mut command, b, Point2::new(1.0, 5.0)), CommandStep::Finished);
        assert_eq!(ctx.drawing.all_primitives(), before.as_slice());
    }

    #[test]
    fn test_rejects_non_lines() {
        let mut ctx = EditorContext::default();
        let (h, _) = corner(&mut ctx);
        let circle = ctx.drawing.add_primitive(
            Geometry::Circle(svgcad_core::geometry::Circle::new(Point2::new(5.0, 5.0), 1.0)),
            Style::default(),
            GroupId::DRAWING,
        );
        let mut command = FilletCommand::new();
        command.execute(&mut ctx).unwrap();
        pick(&mut ctx, &mut command, h, Point2::new(1.0, 0.0));
        assert_eq!(pick(&mut ctx, &mut command, circle, Point2::new(5.0, 6.0)), CommandStep::Finished);
        assert_eq!(ctx.drawing.len(), 3);
    }

    #[test]
    fn test_zero_radius_extends_to_corner() {
        let mut ctx = EditorContext::default();
        let a = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::new(2.0, 0.0), Point2::new(10.0, 0.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        let b = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::new(0.0, 3.0), Point2::new(0.0, 10.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        let mut command = FilletCommand::new();
        command.execute(&mut ctx).unwrap();
        pick(&mut ctx, &mut command, a, Point2::new(8.0, 0.0));
        assert_eq!(pick(&mut ctx, &mut command, b, Point2::new(0.0, 8.0)), CommandStep::Completed);
        assert!(command.arc_id().is_none());
        assert_eq!(ctx.drawing.len(), 2);
        match ctx.drawing.geometry(a) {
            Some(Geometry::Line(l)) => {
                assert!((l.start - Point2::origin()).norm() < TOL);
                assert!((l.end - Point2::new(10.0, 0.0)).norm() < TOL);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
