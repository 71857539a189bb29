//! 编辑器上下文
//!
//! 显式传给每个命令的会话对象：绘图、交互会话、信号、输入订阅、幽灵预览与配置。

use crate::command::Command;
use crate::config::EditorConfig;
use crate::drawing::Drawing;
use crate::error::CommandError;
use crate::ghost::{GhostPreview, GhostTransform};
use crate::session::InteractionSession;
use crate::signals::{InputSubscriptions, LogMessage, LogStyle, Signals};
use svgcad_core::entity::EntityId;
use svgcad_core::geometry::Geometry;
use svgcad_core::math::Point2;
use svgcad_core::snap::{SnapConfig, SnapEngine};
use tracing::debug;

pub struct EditorContext {
    pub drawing: Drawing,
    pub session: InteractionSession,
    pub signals: Signals,
    pub inputs: InputSubscriptions,
    pub ghost: GhostPreview,
    pub config: EditorConfig,
    pub snap: SnapEngine,
    /// 活动命令执行期间产生的历史条目，由编辑器移入撤销栈
    registered: Vec<Box<dyn Command>>,
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        let mut session = InteractionSession::default();
        session.ortho_mode = config.ortho_mode;
        session.snap_mode = config.snap_mode;
        session.params.fillet_radius = config.default_fillet_radius;
        let snap = SnapEngine::new(SnapConfig {
            tolerance: config.snap_tolerance,
            ..SnapConfig::default()
        });

        Self {
            drawing: Drawing::new(),
            session,
            signals: Signals::default(),
            inputs: InputSubscriptions::default(),
            ghost: GhostPreview::default(),
            config,
            snap,
            registered: Vec::new(),
        }
    }

    // ========== 终端日志 ==========

    pub fn log(&mut self, text: impl Into<String>) {
        self.emit(text.into(), LogStyle::Plain);
    }

    /// 命令标题
    pub fn log_strong(&mut self, text: impl Into<String>) {
        self.emit(text.into(), LogStyle::Strong);
    }

    /// 提示
    pub fn log_span(&mut self, text: impl Into<String>) {
        self.emit(text.into(), LogStyle::Span);
    }

    fn emit(&mut self, text: String, style: LogStyle) {
        debug!(target: "terminal", "{}", text);
        self.signals
            .terminal_logged
            .dispatch(&LogMessage { text, style });
    }

    // ========== 通知 ==========

    pub fn notify_selection_changed(&mut self) {
        let selected = self.session.selected.clone();
        self.signals.selection_changed.dispatch(&selected);
    }

    pub fn notify_drawing_changed(&mut self) {
        self.signals.drawing_changed.dispatch(&());
    }

    /// 清空选择并通知
    pub fn clear_selection(&mut self) {
        if self.session.clear_selection() {
            self.notify_selection_changed();
        }
    }

    // ========== 历史条目 ==========

    /// 执行一个即时命令并登记到历史
    pub fn execute_and_register(&mut self, mut command: Box<dyn Command>) -> Result<(), CommandError> {
        command.execute(self)?;
        self.register(command);
        Ok(())
    }

    /// 登记已执行的命令
    pub fn register(&mut self, command: Box<dyn Command>) {
        self.registered.push(command);
    }

    pub(crate) fn take_registered(&mut self) -> Vec<Box<dyn Command>> {
        std::mem::take(&mut self.registered)
    }

    // ========== 幽灵预览 ==========

    /// 以选中图元的当前几何开始预览
    pub fn start_ghost(&mut self, ids: &[EntityId], transform: GhostTransform) {
        let originals = self.snapshot(ids);
        self.ghost.start(&originals, transform);
        self.update_ghost();
    }

    /// 按当前指针位置刷新预览
    pub fn update_ghost(&mut self) {
        if !self.ghost.is_active() {
            return;
        }
        let frame = self.ghost.frame(
            &self.session.cursor,
            self.session.ortho_mode,
            self.session.pending_distance,
        );
        self.signals.ghost_preview.dispatch(&frame);
    }

    /// 发布橡皮筋图形（绘图命令）
    pub fn show_rubber_band(&mut self, geometry: Geometry) {
        self.signals.ghost_preview.dispatch(&vec![geometry]);
    }

    pub fn clear_ghost(&mut self) {
        self.ghost.clear();
        self.signals.ghost_cleared.dispatch(&());
    }

    // ========== 查询 ==========

    /// 捕获图元当前几何的深拷贝，不存在的 ID 被跳过
    pub fn snapshot(&self, ids: &[EntityId]) -> Vec<(EntityId, Geometry)> {
        ids.iter()
            .filter_map(|id| self.drawing.geometry(*id).map(|g| (*id, g.clone())))
            .collect()
    }

    /// 点的世界坐标描述，两位小数
    pub fn format_point(point: &Point2) -> String {
        format!("{:.2}, {:.2}", point.x, point.y)
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use svgcad_core::entity::GroupId;
    use svgcad_core::geometry::Line;
    use svgcad_core::properties::Style;

    #[test]
    fn test_log_dispatches_terminal_message() {
        let mut ctx = EditorContext::default();
        let messages = Rc::new(RefCell::new(Vec::new()));
        let m = messages.clone();
        ctx.signals
            .terminal_logged
            .add(move |msg: &LogMessage| m.borrow_mut().push(msg.clone()));

        ctx.log_strong("MOVE ");
        ctx.log("Elements moved.");

        let messages = messages.borrow();
        assert_eq!(messages[0].style, LogStyle::Strong);
        assert_eq!(messages[1].text, "Elements moved.");
    }

    #[test]
    fn test_config_initializes_session() {
        let config = EditorConfig {
            ortho_mode: true,
            default_fillet_radius: 2.5,
            ..EditorConfig::default()
        };
        let ctx = EditorContext::new(config);
        assert!(ctx.session.ortho_mode);
        assert_eq!(ctx.session.params.fillet_radius, 2.5);
    }

    #[test]
    fn test_snapshot_skips_missing() {
        let mut ctx = EditorContext::default();
        let id = ctx.drawing.add_primitive(
            Geometry::Line(Line::new(Point2::origin(), Point2::new(1.0, 0.0))),
            Style::default(),
            GroupId::DRAWING,
        );
        let snapshot = ctx.snapshot(&[id, EntityId(42)]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].0, id);
    }

    #[test]
    fn test_format_point() {
        assert_eq!(EditorContext::format_point(&Point2::new(1.0, -2.5)), "1.00, -2.50");
    }
}
