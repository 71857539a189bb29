//! 命令实现
//!
//! - 绘图：直线、圆、矩形
//! - 修改：移动、复制、旋转、缩放、偏移、倒圆角、删除
//! - 历史条目：添加图元、删除图元

pub mod add_element;
pub mod draw_circle;
pub mod draw_line;
pub mod draw_rectangle;
pub mod erase;
pub mod fillet;
pub mod modify_copy;
pub mod modify_move;
pub mod modify_rotate;
pub mod modify_scale;
pub mod offset;
pub mod remove_element;
pub mod snapshot;

pub use add_element::AddElementCommand;
pub use draw_circle::DrawCircleCommand;
pub use draw_line::DrawLineCommand;
pub use draw_rectangle::DrawRectangleCommand;
pub use erase::EraseCommand;
pub use fillet::FilletCommand;
pub use modify_copy::CopyCommand;
pub use modify_move::MoveCommand;
pub use modify_rotate::RotateCommand;
pub use modify_scale::ScaleCommand;
pub use offset::OffsetCommand;
pub use remove_element::RemoveElementCommand;
pub use snapshot::TransformSnapshot;

use crate::command::{Command, CommandKind};
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::signals::InputKind;
use svgcad_core::distance::delta_from_base_point;
use svgcad_core::entity::GroupId;
use svgcad_core::geometry::Geometry;
use svgcad_core::input_parser::InputParser;
use svgcad_core::math::{Point2, Vector2, EPSILON};

/// 按类型创建命令；撤销/重做和历史条目不能从命令行直接创建
pub fn create(kind: CommandKind) -> Option<Box<dyn Command>> {
    let command: Box<dyn Command> = match kind {
        CommandKind::DrawLine => Box::new(DrawLineCommand::new()),
        CommandKind::DrawCircle => Box::new(DrawCircleCommand::new()),
        CommandKind::DrawRectangle => Box::new(DrawRectangleCommand::new()),
        CommandKind::Move => Box::new(MoveCommand::new()),
        CommandKind::Copy => Box::new(CopyCommand::new()),
        CommandKind::Rotate => Box::new(RotateCommand::new()),
        CommandKind::Scale => Box::new(ScaleCommand::new()),
        CommandKind::Offset => Box::new(OffsetCommand::new()),
        CommandKind::Fillet => Box::new(FilletCommand::new()),
        CommandKind::Erase => Box::new(EraseCommand::new()),
        CommandKind::AddElement
        | CommandKind::RemoveElement
        | CommandKind::Undo
        | CommandKind::Redo => return None,
    };
    Some(command)
}

/// 选择阶段：保留已有选择，等待回车确认
pub(crate) fn prompt_selection(ctx: &mut EditorContext, name: &str, verb: &str) {
    ctx.log_strong(format!("{} ", name.to_uppercase()));
    ctx.log_span(format!("Select elements to {} and press Enter to confirm.", verb));
    ctx.inputs.subscribe_once(InputKind::Confirm);
}

/// 确认选择：捕获快照并进入交互模式
pub(crate) fn confirm_selection(ctx: &mut EditorContext) -> Result<TransformSnapshot, CommandError> {
    if ctx.session.selected.is_empty() {
        return Err(CommandError::NoSelection);
    }
    let ids = ctx.session.selected.clone();
    let snapshot = TransformSnapshot::capture(ctx, &ids);
    ctx.session.begin_interacting()?;
    ctx.log(format!("Selected {} elements.", snapshot.len()));
    Ok(snapshot)
}

/// 绘图命令开始：进入绘图模式并提示第一个点
pub(crate) fn begin_draw(ctx: &mut EditorContext, name: &str) -> Result<(), CommandError> {
    ctx.session.begin_drawing()?;
    ctx.clear_selection();
    ctx.log_strong(format!("DRAW {} ", name.to_uppercase()));
    ctx.log_span(format!(
        "Click to start drawing a {} or type (x,y) coordinates",
        name
    ));
    Ok(())
}

/// 提交一个绘制完成的图形，作为添加图元记录进入历史
pub(crate) fn commit_shape(ctx: &mut EditorContext, geometry: Geometry) -> Result<(), CommandError> {
    let style = ctx.config.default_style;
    ctx.execute_and_register(Box::new(AddElementCommand::new(
        geometry,
        style,
        GroupId::DRAWING,
    )))
}

/// 记住键入的位移距离，下一次点击只决定方向
pub(crate) fn set_pending_distance(ctx: &mut EditorContext, text: &str) {
    match parse_positive(text) {
        Some(distance) => {
            ctx.session.pending_distance = Some(distance);
            ctx.log(format!("Distance: {}. Specify direction.", format_value(distance)));
            ctx.update_ghost();
        }
        None => ctx.log("Invalid distance."),
    }
}

/// 基点到第二点的位移（应用键入的距离与正交）
///
/// 位移为零时提示并重新等待第二点。
pub(crate) fn translation_to(
    ctx: &mut EditorContext,
    base: &Point2,
    target: &Point2,
) -> Option<Vector2> {
    let delta = delta_from_base_point(
        base,
        target,
        ctx.session.pending_distance,
        ctx.session.ortho_mode,
    );
    if delta.norm() < EPSILON {
        ctx.log("Second point must differ from the base point.");
        ctx.inputs.subscribe_once(InputKind::Point);
        return None;
    }
    Some(delta)
}

/// 解析键入的正数（距离、半径、比例）
pub(crate) fn parse_positive(text: &str) -> Option<f64> {
    InputParser::parse_value(text).ok().filter(|v| *v > 0.0)
}

/// 去掉多余小数位的数值文本
pub(crate) fn format_value(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
