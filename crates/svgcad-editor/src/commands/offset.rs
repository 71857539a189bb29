//! 偏移命令
//!
//! 距离 → 单选一个图元 → 指针选择一侧并点击确认 → 回到单选，直到 Esc。
//! 每个新图元作为一条添加图元记录进入历史，偏移命令本身不入栈。

use super::{format_value, parse_positive, AddElementCommand};
use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::ghost::GhostTransform;
use crate::signals::InputKind;
use svgcad_core::entity::EntityId;
use svgcad_core::math::Point2;
use svgcad_core::offset::offset_geometry;
use tracing::info;

/// 偏移状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待偏移距离
    SetDistance,
    /// 等待选择一个图元
    SelectElement,
    /// 等待点击确认偏移侧
    ChooseSide,
}

pub struct OffsetCommand {
    status: Status,
    distance: Option<f64>,
    element: Option<EntityId>,
    /// 本次命令创建的图元
    created: Vec<EntityId>,
}

impl OffsetCommand {
    pub fn new() -> Self {
        Self {
            status: Status::SetDistance,
            distance: None,
            element: None,
            created: Vec::new(),
        }
    }

    /// 沿用已确认的距离（重复上一条命令）
    pub fn with_distance(distance: f64) -> Self {
        Self {
            distance: Some(distance),
            ..Self::new()
        }
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn created(&self) -> &[EntityId] {
        &self.created
    }

    fn accept_distance(&mut self, ctx: &mut EditorContext, distance: f64) {
        self.distance = Some(distance);
        ctx.session.params.offset_distance = Some(distance);
        ctx.log(format!(
            "Offset distance: {}. Select one element.",
            format_value(distance)
        ));
        self.start_selection(ctx);
    }

    fn start_selection(&mut self, ctx: &mut EditorContext) {
        ctx.clear_selection();
        ctx.session.select_single_element = true;
        ctx.inputs.clear();
        ctx.inputs.subscribe_once(InputKind::Element);
        self.element = None;
        self.status = Status::SelectElement;
    }
}

impl Default for OffsetCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for OffsetCommand {
    fn command_type(&self) -> CommandKind {
        CommandKind::Offset
    }

    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError> {
        ctx.session.begin_interacting()?;
        ctx.log_strong(format!("{} ", self.name().to_uppercase()));
        match self.distance {
            Some(distance) => self.accept_distance(ctx, distance),
            None => {
                match ctx.session.params.offset_distance {
                    Some(last) => {
                        ctx.log_span(format!("Enter a distance to offset <{}>", format_value(last)));
                        ctx.inputs.subscribe_once(InputKind::Confirm);
                    }
                    None => ctx.log_span("Enter a distance to offset"),
                }
                ctx.inputs.subscribe_once(InputKind::Value);
                self.status = Status::SetDistance;
            }
        }
        Ok(CommandStep::Continue)
    }

    fn on_input(
        &mut self,
        ctx: &mut EditorContext,
        input: InputEvent,
    ) -> Result<CommandStep, CommandError> {
        match (self.status, input) {
            (Status::SetDistance, InputEvent::Value(text)) => match parse_positive(&text) {
                Some(distance) => self.accept_distance(ctx, distance),
                None => {
                    ctx.log("Invalid distance. Command cancelled.");
                    return Ok(CommandStep::Cancelled);
                }
            },
            (Status::SetDistance, InputEvent::Confirm) => {
                match ctx.session.params.offset_distance {
                    Some(distance) => self.accept_distance(ctx, distance),
                    None => {
                        ctx.log("Invalid distance. Command cancelled.");
                        return Ok(CommandStep::Cancelled);
                    }
                }
            }
            (Status::SelectElement, InputEvent::Element { id, .. }) => {
                let Some(distance) = self.distance else {
                    return Ok(CommandStep::Cancelled);
                };
                if !ctx.drawing.contains(id) {
                    ctx.inputs.subscribe_once(InputKind::Element);
                    return Ok(CommandStep::Continue);
                }
                self.element = Some(id);
                ctx.session.select_single_element = false;
                ctx.start_ghost(&[id], GhostTransform::Offset { distance });
                ctx.log("Move mouse to choose side, click to confirm.");
                ctx.inputs.subscribe_once(InputKind::Point);
                self.status = Status::ChooseSide;
            }
            (Status::ChooseSide, InputEvent::Point(point)) => {
                let (Some(id), Some(distance)) = (self.element, self.distance) else {
                    return Ok(CommandStep::Cancelled);
                };
                ctx.clear_ghost();
                if let Some(source) = ctx.drawing.find_by_id(id) {
                    let geometry = offset_geometry(&source.geometry, distance, &point);
                    let mut add = AddElementCommand::new(geometry, source.style, source.group);
                    add.execute(ctx)?;
                    if let Some(new_id) = add.id() {
                        self.created.push(new_id);
                        info!("Offset element {} -> {}", id, new_id);
                    }
                    ctx.register(Box::new(add));
                    ctx.log("Created offset element.");
                }
                // 同一距离继续偏移
                self.start_selection(ctx);
            }
            _ => {}
        }
        Ok(CommandStep::Continue)
    }

    fn on_pointer_move(&mut self, ctx: &mut EditorContext, _point: &Point2) {
        if self.status == Status::ChooseSide {
            ctx.update_ghost();
        }
    }

    // 偏移本身不进入历史，新图元由添加图元记录撤销
    fn undo(&mut self, _ctx: &mut EditorContext) {}

    fn redo(&mut self, _ctx: &mut EditorContext) {}

    fn repeat(&self) -> Option<Box<dyn Command>> {
        self.distance
            .map(|d| Box::new(OffsetCommand::with_distance(d)) as Box<dyn Command>)
    }
}
