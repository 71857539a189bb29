//! 类型化信号与输入订阅
//!
//! 两套机制：
//! - [`Signal`]：面向 UI 适配器的通知通道，区分持久订阅 (`add`) 与一次性订阅 (`add_once`)
//! - [`InputSubscriptions`]：命令挂起点的登记表。命令声明自己在等待哪类输入，
//!   编辑器只把对应输入投递给当前命令，一次性订阅在投递后自动移除

use std::fmt;
use svgcad_core::entity::EntityId;
use svgcad_core::geometry::Geometry;
use svgcad_core::math::Point2;

/// 订阅句柄
pub type SubscriptionId = u64;

struct Listener<T> {
    id: SubscriptionId,
    once: bool,
    callback: Box<dyn FnMut(&T)>,
}

/// 信号
pub struct Signal<T> {
    listeners: Vec<Listener<T>>,
    next_id: SubscriptionId,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    fn push(&mut self, once: bool, callback: Box<dyn FnMut(&T)>) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push(Listener { id, once, callback });
        id
    }

    /// 持久订阅，直到 `remove`
    pub fn add(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        self.push(false, Box::new(callback))
    }

    /// 一次性订阅，首次触发后自动移除
    pub fn add_once(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        self.push(true, Box::new(callback))
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn dispatch(&mut self, value: &T) {
        for listener in self.listeners.iter_mut() {
            (listener.callback)(value);
        }
        self.listeners.retain(|l| !l.once);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// 终端日志样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// 命令标题
    Strong,
    /// 提示
    Span,
    Plain,
}

/// 终端日志消息（纯文本，无严重级别）
#[derive(Debug, Clone, PartialEq)]
pub struct LogMessage {
    pub text: String,
    pub style: LogStyle,
}

/// 编辑器对外的信号集合
#[derive(Debug, Default)]
pub struct Signals {
    pub terminal_logged: Signal<LogMessage>,
    pub selection_changed: Signal<Vec<EntityId>>,
    pub drawing_changed: Signal<()>,
    pub ghost_preview: Signal<Vec<Geometry>>,
    pub ghost_cleared: Signal<()>,
    pub coordinates_updated: Signal<Point2>,
}

/// 命令等待的输入类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// 捕获点（点击或键入坐标）
    Point,
    /// 键入的数值
    Value,
    /// 单选模式下点击图元
    Element,
    /// 回车确认
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    Once,
    Persistent,
}

/// 命令挂起点登记表
#[derive(Debug, Clone, Default)]
pub struct InputSubscriptions {
    entries: Vec<(InputKind, Lifetime)>,
}

impl InputSubscriptions {
    pub fn subscribe_once(&mut self, kind: InputKind) {
        self.set(kind, Lifetime::Once);
    }

    pub fn subscribe(&mut self, kind: InputKind) {
        self.set(kind, Lifetime::Persistent);
    }

    fn set(&mut self, kind: InputKind, lifetime: Lifetime) {
        self.unsubscribe(kind);
        self.entries.push((kind, lifetime));
    }

    pub fn unsubscribe(&mut self, kind: InputKind) {
        self.entries.retain(|(k, _)| *k != kind);
    }

    pub fn is_subscribed(&self, kind: InputKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    /// 投递前调用：已订阅返回 true，一次性订阅同时被移除
    pub fn consume(&mut self, kind: InputKind) -> bool {
        match self.entries.iter().position(|(k, _)| *k == kind) {
            Some(index) => {
                if self.entries[index].1 == Lifetime::Once {
                    self.entries.remove(index);
                }
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
