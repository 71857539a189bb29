//! svgcad 编辑器核心
//!
//! 在几何层之上提供交互式编辑：
//! - 绘图（有序图元集合）与交互会话（空闲/绘图/交互三种模式）
//! - 命令系统：多步交互命令通过输入订阅挂起与恢复
//! - 撤销/重做历史与命令注册表
//! - 悬停检测、框选与幽灵预览
//!
//! # 示例
//!
//! ```rust
//! use svgcad_editor::prelude::*;
//!
//! let mut editor = Editor::default();
//! for input in ["line", "0,0", "10,0", ""] {
//!     editor.submit_text(input);
//! }
//! assert_eq!(editor.ctx.drawing.len(), 1);
//! assert!(editor.undo());
//! assert!(editor.ctx.drawing.is_empty());
//! ```

pub mod command;
pub mod command_registry;
pub mod commands;
pub mod config;
pub mod context;
pub mod drawing;
pub mod editor;
pub mod error;
pub mod ghost;
pub mod history;
pub mod selection;
pub mod session;
pub mod signals;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::command::{Command, CommandKind, CommandStep, InputEvent};
    pub use crate::command_registry::CommandRegistry;
    pub use crate::config::{ConfigError, EditorConfig};
    pub use crate::context::EditorContext;
    pub use crate::drawing::Drawing;
    pub use crate::editor::{Editor, Key};
    pub use crate::error::CommandError;
    pub use crate::history::History;
    pub use crate::selection::MarqueeMode;
    pub use crate::session::{InteractionSession, Mode};
    pub use crate::signals::{InputKind, LogMessage, LogStyle};
}
