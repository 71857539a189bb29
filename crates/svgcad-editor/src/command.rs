//! 命令系统
//!
//! 每个用户操作是一个 [`Command`] 实现，采用状态机模式处理多步交互：
//! 命令在每个挂起点通过 [`InputSubscriptions`](crate::signals::InputSubscriptions)
//! 声明等待的输入类型，编辑器收到对应输入后调用 [`Command::on_input`] 恢复执行。

use crate::context::EditorContext;
use crate::error::CommandError;
use svgcad_core::entity::EntityId;
use svgcad_core::math::Point2;

/// 命令类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    // 绘图
    DrawLine,
    DrawCircle,
    DrawRectangle,

    // 修改
    Move,
    Copy,
    Rotate,
    Scale,
    Offset,
    Fillet,
    Erase,

    // 历史条目
    AddElement,
    RemoveElement,

    // 编辑器
    Undo,
    Redo,
}

impl CommandKind {
    /// 命令名称
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::DrawLine => "Line",
            CommandKind::DrawCircle => "Circle",
            CommandKind::DrawRectangle => "Rectangle",
            CommandKind::Move => "Move",
            CommandKind::Copy => "Copy",
            CommandKind::Rotate => "Rotate",
            CommandKind::Scale => "Scale",
            CommandKind::Offset => "Offset",
            CommandKind::Fillet => "Fillet",
            CommandKind::Erase => "Erase",
            CommandKind::AddElement => "Add Element",
            CommandKind::RemoveElement => "Remove Element",
            CommandKind::Undo => "Undo",
            CommandKind::Redo => "Redo",
        }
    }
}

/// 命令推进的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStep {
    /// 仍在等待输入
    Continue,
    /// 效果已应用，命令本身进入撤销栈
    Completed,
    /// 命令结束但本身不进入撤销栈（绘图命令已逐段登记、倒圆角失败等）
    Finished,
    /// 用户取消
    Cancelled,
}

impl CommandStep {
    pub fn is_done(&self) -> bool {
        !matches!(self, CommandStep::Continue)
    }
}

/// 投递给挂起命令的外部输入
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// 捕获的点（点击或键入坐标，已应用捕捉）
    Point(Point2),
    /// 键入的原始文本，由命令解释
    Value(String),
    /// 单选模式下点击的图元及点击位置
    Element { id: EntityId, click: Point2 },
    /// 回车确认
    Confirm,
}

/// Command trait - 所有绘图/编辑命令的核心接口
pub trait Command {
    /// 获取命令类型
    fn command_type(&self) -> CommandKind;

    /// 获取命令名称
    fn name(&self) -> &str {
        self.command_type().name()
    }

    /// 执行命令
    ///
    /// 交互命令第一次调用时进入交互流程并返回 `Continue`；
    /// 交互完成后再次调用是空操作，防止重复应用。
    fn execute(&mut self, ctx: &mut EditorContext) -> Result<CommandStep, CommandError>;

    // ========== 事件处理 ==========

    /// 挂起点收到输入
    fn on_input(
        &mut self,
        _ctx: &mut EditorContext,
        _input: InputEvent,
    ) -> Result<CommandStep, CommandError> {
        Ok(CommandStep::Continue)
    }

    /// 指针移动（刷新幽灵预览或橡皮筋）
    fn on_pointer_move(&mut self, _ctx: &mut EditorContext, _point: &Point2) {}

    /// 结束或取消时释放订阅、清除预览并回到空闲
    fn cleanup(&mut self, ctx: &mut EditorContext) {
        ctx.inputs.clear();
        ctx.clear_ghost();
        ctx.session.end();
    }

    // ========== 历史操作 ==========

    /// 撤销：原样恢复快照
    fn undo(&mut self, ctx: &mut EditorContext);

    /// 重做：用相同参数重放同一份快照
    fn redo(&mut self, ctx: &mut EditorContext);

    /// "重复上一条命令" 使用的新实例，沿用已确认的参数
    fn repeat(&self) -> Option<Box<dyn Command>> {
        None
    }
}
