//! 编辑器外观
//!
//! 把外部事件（指针、按键、命令行文本）路由给活动命令，
//! 管理命令生命周期、撤销/重做历史与"重复上一条命令"。
//! 同一时刻最多一个活动命令。

use crate::command::{Command, CommandKind, CommandStep, InputEvent};
use crate::command_registry::CommandRegistry;
use crate::commands::{self, AddElementCommand};
use crate::config::EditorConfig;
use crate::context::EditorContext;
use crate::error::CommandError;
use crate::history::History;
use crate::selection::{check_hover, find_elements, Marquee};
use crate::signals::InputKind;
use svgcad_core::entity::{EntityId, GroupId};
use svgcad_core::geometry::Geometry;
use svgcad_core::input_parser::{InputParser, InputValue};
use svgcad_core::math::Point2;
use tracing::{debug, info};

/// 编辑器关心的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    /// 切换正交
    F8,
    /// 切换捕捉
    F3,
}

pub struct Editor {
    pub ctx: EditorContext,
    history: History,
    registry: CommandRegistry,
    active: Option<Box<dyn Command>>,
    /// 空闲时回车重复的命令
    last_command: Option<Box<dyn Command>>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let history = History::with_depth(config.history_max_depth);
        Self {
            ctx: EditorContext::new(config),
            history,
            registry: CommandRegistry::new(),
            active: None,
            last_command: None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    /// 活动命令的名称
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_ref().map(|c| c.name())
    }

    /// 添加一个图元并记录到历史
    pub fn add_element(&mut self, geometry: Geometry) -> Result<EntityId, CommandError> {
        let style = self.ctx.config.default_style;
        let mut command = AddElementCommand::new(geometry, style, GroupId::DRAWING);
        command.execute(&mut self.ctx)?;
        let id = command
            .id()
            .ok_or_else(|| CommandError::InvalidInput("element was not added".to_string()))?;
        self.history.push(Box::new(command));
        Ok(id)
    }

    // ========== 命令 ==========

    /// 按类型启动命令，已有活动命令时拒绝
    pub fn run_command(&mut self, kind: CommandKind) -> Result<(), CommandError> {
        self.ensure_idle()?;
        match kind {
            CommandKind::Undo => {
                self.history.undo(&mut self.ctx);
            }
            CommandKind::Redo => {
                self.history.redo(&mut self.ctx);
            }
            _ => match commands::create(kind) {
                Some(command) => self.start(command),
                None => {
                    let err = CommandError::InvalidInput(format!("{} cannot be run directly", kind.name()));
                    self.ctx.log(err.to_string());
                    return Err(err);
                }
            },
        }
        Ok(())
    }

    /// 撤销最近一条记录，活动命令存在或栈空时返回 false
    pub fn undo(&mut self) -> bool {
        self.ensure_idle().is_ok() && self.history.undo(&mut self.ctx)
    }

    pub fn redo(&mut self) -> bool {
        self.ensure_idle().is_ok() && self.history.redo(&mut self.ctx)
    }

    fn ensure_idle(&mut self) -> Result<(), CommandError> {
        if self.active.is_some() {
            let err = CommandError::Busy;
            self.ctx.log(err.to_string());
            return Err(err);
        }
        Ok(())
    }

    fn start(&mut self, mut command: Box<dyn Command>) {
        info!("Command started: {}", command.name());
        let result = command.execute(&mut self.ctx);
        self.handle_step(command, result);
    }

    fn dispatch(&mut self, input: InputEvent) {
        let Some(mut command) = self.active.take() else {
            return;
        };
        debug!("Input for {}: {:?}", command.name(), input);
        let result = command.on_input(&mut self.ctx, input);
        self.handle_step(command, result);
    }

    fn handle_step(&mut self, command: Box<dyn Command>, result: Result<CommandStep, CommandError>) {
        match result {
            Ok(step) if step.is_done() => self.finish(command, step),
            Ok(_) => {
                self.drain_registered();
                self.active = Some(command);
            }
            Err(err) => {
                info!("Command {} failed: {}", command.name(), err);
                self.ctx.log(err.to_string());
                self.finish(command, CommandStep::Cancelled);
            }
        }
    }

    /// 命令结束：清理订阅与预览，登记的条目和已完成的命令进入历史
    fn finish(&mut self, mut command: Box<dyn Command>, step: CommandStep) {
        command.cleanup(&mut self.ctx);
        self.drain_registered();
        if let Some(next) = command.repeat() {
            self.last_command = Some(next);
        }
        info!("Command {}: {:?}", command.name(), step);
        if step == CommandStep::Completed {
            self.history.push(command);
        }
        self.ctx.notify_drawing_changed();
    }

    fn drain_registered(&mut self) {
        for entry in self.ctx.take_registered() {
            self.history.push(entry);
        }
    }

    /// 取消活动命令，不进入历史
    pub fn cancel(&mut self) -> bool {
        let Some(command) = self.active.take() else {
            return false;
        };
        self.ctx.log("Command cancelled.");
        self.finish(command, CommandStep::Cancelled);
        true
    }

    fn repeat_last(&mut self) {
        let Some(command) = self.last_command.take() else {
            return;
        };
        // 重复被取消时仍可再次重复同类命令
        self.last_command = commands::create(command.command_type());
        self.start(command);
    }

    // ========== 命令行 ==========

    /// 提交命令行文本
    ///
    /// 空闲时按命令名启动命令，空文本重复上一条命令；
    /// 命令活动时按订阅的输入类型解释：点、数值或确认。
    pub fn submit_text(&mut self, text: &str) {
        let text = text.trim();
        self.ctx.session.input_buffer.clear();

        if self.active.is_none() {
            if text.is_empty() {
                self.repeat_last();
                return;
            }
            match self.registry.lookup(text) {
                Some(kind) => {
                    if let Err(err) = self.run_command(kind) {
                        debug!("{} not started: {}", kind.name(), err);
                    }
                }
                None => {
                    self.ctx.log(format!("Unknown command: {}", text));
                    let candidates = self.registry.complete(text);
                    if !candidates.is_empty() {
                        self.ctx.log(format!("Did you mean: {}?", candidates.join(", ")));
                    }
                }
            }
            return;
        }

        if text.is_empty() {
            if self.ctx.inputs.consume(InputKind::Confirm) {
                self.dispatch(InputEvent::Confirm);
            }
            return;
        }

        let reference = self.ctx.session.last_point;
        let wants_point = self.ctx.inputs.is_subscribed(InputKind::Point);
        let point = InputParser::parse_point(text, reference).ok();

        // 坐标优先；单独的数值先交给数值订阅
        let looks_like_point = matches!(
            InputParser::parse(text, reference),
            Ok(InputValue::Point(_) | InputValue::LengthAngle { .. })
        );
        if wants_point && looks_like_point {
            if let Some(point) = point {
                self.ctx.inputs.consume(InputKind::Point);
                self.dispatch(InputEvent::Point(point));
                return;
            }
        }
        if self.ctx.inputs.consume(InputKind::Value) {
            self.dispatch(InputEvent::Value(text.to_string()));
            return;
        }
        if let (true, Some(point)) = (wants_point, point) {
            self.ctx.inputs.consume(InputKind::Point);
            self.dispatch(InputEvent::Point(point));
            return;
        }
        self.ctx.log(format!("Invalid input: {}", text));
    }

    // ========== 按键 ==========

    /// 当前命令行缓冲
    pub fn input_buffer(&self) -> &str {
        &self.ctx.session.input_buffer
    }

    /// 向命令行缓冲追加文本，回车或空格提交
    pub fn type_text(&mut self, text: &str) {
        self.ctx.session.input_buffer.push_str(text);
    }


    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Enter | Key::Space => {
                let text = std::mem::take(&mut self.ctx.session.input_buffer);
                self.submit_text(&text);
            }
            Key::Escape => {
                if !self.cancel() {
                    self.ctx.session.marquee = None;
                    self.ctx.session.hovered.clear();
                    self.ctx.clear_selection();
                }
            }
            Key::F8 => {
                let session = &mut self.ctx.session;
                session.ortho_mode = !session.ortho_mode;
                let state = on_off(session.ortho_mode);
                self.ctx.log(format!("Ortho: {}", state));
                self.ctx.update_ghost();
            }
            Key::F3 => {
                let session = &mut self.ctx.session;
                session.snap_mode = !session.snap_mode;
                let state = on_off(session.snap_mode);
                self.ctx.log(format!("Snap: {}", state));
            }
        }
    }

    // ========== 指针 ==========

    /// 绘图/交互时应用对象捕捉，单选拾取图元时不捕捉
    fn snapped(&mut self, raw: Point2) -> Point2 {
        let ctx = &mut self.ctx;
        if !ctx.session.snap_mode || ctx.session.is_idle() || ctx.session.select_single_element {
            return raw;
        }
        ctx.snap
            .find_snap_point(raw, ctx.drawing.all_primitives())
            .map(|snap| snap.point)
            .unwrap_or(raw)
    }

    fn hover_at(&self, point: &Point2) -> Option<EntityId> {
        check_hover(&self.ctx.drawing, point, self.ctx.config.hover_threshold)
    }

    pub fn pointer_move(&mut self, raw: Point2) {
        let point = self.snapped(raw);
        self.ctx.session.cursor = point;
        self.ctx.signals.coordinates_updated.dispatch(&point);

        if let Some(marquee) = self.ctx.session.marquee.as_mut() {
            marquee.current = point;
            let marquee = *marquee;
            self.ctx.session.hovered = find_elements(&self.ctx.drawing, &marquee.rect(), marquee.mode());
        } else if self.ctx.session.is_idle() || self.ctx.session.select_single_element {
            self.ctx.session.hovered = self.hover_at(&point).into_iter().collect();
        }

        if let Some(command) = self.active.as_mut() {
            command.on_pointer_move(&mut self.ctx, &point);
        }
    }

    pub fn pointer_down(&mut self, raw: Point2) {
        let point = self.snapped(raw);
        self.ctx.session.cursor = point;

        // 单选模式：把点击的图元交给命令
        if self.ctx.session.select_single_element {
            if let Some(id) = self.hover_at(&point) {
                if self.ctx.inputs.consume(InputKind::Element) {
                    if self.ctx.session.select(id) {
                        self.ctx.notify_selection_changed();
                    }
                    self.dispatch(InputEvent::Element { id, click: point });
                }
            }
            return;
        }

        if !self.ctx.session.is_idle() {
            if self.ctx.inputs.consume(InputKind::Point) {
                self.dispatch(InputEvent::Point(point));
            }
            return;
        }

        match self.hover_at(&point) {
            Some(id) => {
                self.ctx.session.toggle_selection(id);
                self.ctx.notify_selection_changed();
            }
            None => self.ctx.session.marquee = Some(Marquee::new(point)),
        }
    }

    pub fn pointer_up(&mut self, raw: Point2) {
        let Some(mut marquee) = self.ctx.session.marquee.take() else {
            return;
        };
        marquee.current = raw;
        let found = find_elements(&self.ctx.drawing, &marquee.rect(), marquee.mode());
        self.ctx.session.hovered.clear();

        let mut changed = false;
        for id in found {
            changed |= self.ctx.session.select(id);
        }
        debug!("Marquee {:?} selected {} elements", marquee.mode(), self.ctx.session.selected.len());
        if changed {
            self.ctx.notify_selection_changed();
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

fn on_off(state: bool) -> &'static str {
    if state {
        "ON"
    } else {
        "OFF"
    }
}
