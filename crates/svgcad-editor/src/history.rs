//! 撤销/重做历史
//!
//! 两个栈：`undo_stack` 保存已执行的命令（最近的在末尾），
//! `redo_stack` 保存已撤销的命令；任何新命令入栈都会清空 `redo_stack`。

use crate::command::Command;
use crate::config::HISTORY_MAX_DEPTH;
use crate::context::EditorContext;
use tracing::debug;

pub struct History {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    max_depth: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_depth(HISTORY_MAX_DEPTH)
    }

    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// 记录已完成的命令
    pub fn push(&mut self, command: Box<dyn Command>) {
        debug!("History push: {}", command.name());
        self.redo_stack.clear();
        self.undo_stack.push(command);

        // 超出深度时丢弃最旧的记录
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }

    /// 撤销最近一条命令，栈空时返回 false
    pub fn undo(&mut self, ctx: &mut EditorContext) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            ctx.log("Nothing to undo.");
            return false;
        };
        debug!("Undo: {}", command.name());
        command.undo(ctx);
        self.redo_stack.push(command);
        ctx.notify_drawing_changed();
        true
    }

    pub fn redo(&mut self, ctx: &mut EditorContext) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            ctx.log("Nothing to redo.");
            return false;
        };
        debug!("Redo: {}", command.name());
        command.redo(ctx);
        self.undo_stack.push(command);
        ctx.notify_drawing_changed();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// 撤销栈顶命令的名称
    pub fn last_name(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.name())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_element::AddElementCommand;
    use svgcad_core::entity::GroupId;
    use svgcad_core::geometry::{Geometry, Line};
    use svgcad_core::math::Point2;
    use svgcad_core::properties::Style;

    fn add_line(ctx: &mut EditorContext, history: &mut History, x: f64) {
        let mut command = Box::new(AddElementCommand::new(
            Geometry::Line(Line::new(Point2::new(x, 0.0), Point2::new(x, 1.0))),
            Style::default(),
            GroupId::DRAWING,
        ));
        command.execute(ctx).unwrap();
        history.push(command);
    }

    #[test]
    fn test_undo_redo_lifo() {
        let mut ctx = EditorContext::default();
        let mut history = History::new();
        add_line(&mut ctx, &mut history, 0.0);
        add_line(&mut ctx, &mut history, 1.0);
        let after: Vec<_> = ctx.drawing.all_primitives().to_vec();

        assert!(history.undo(&mut ctx));
        assert!(history.undo(&mut ctx));
        assert!(ctx.drawing.is_empty());
        assert!(!history.undo(&mut ctx));

        assert!(history.redo(&mut ctx));
        assert!(history.redo(&mut ctx));
        assert_eq!(ctx.drawing.all_primitives(), after.as_slice());
        assert!(!history.redo(&mut ctx));
    }

    #[test]
    fn test_push_clears_redo() {
        let mut ctx = EditorContext::default();
        let mut history = History::new();
        add_line(&mut ctx, &mut history, 0.0);
        history.undo(&mut ctx);
        assert!(history.can_redo());

        add_line(&mut ctx, &mut history, 2.0);
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_max_depth_drops_oldest() {
        let mut ctx = EditorContext::default();
        let mut history = History::with_depth(2);
        for i in 0..3 {
            add_line(&mut ctx, &mut history, i as f64);
        }
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.last_name(), Some("Add Element"));
    }
}
