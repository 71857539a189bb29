//! 交互会话状态
//!
//! 模式 {Idle, Drawing, Interacting} 互斥：任何时刻最多一个绘图手势或一个交互命令。
//! 进入非空闲模式前必须处于 Idle，否则返回 [`CommandError::Busy`]。

use crate::error::CommandError;
use crate::selection::Marquee;
use svgcad_core::entity::{EntityId, Highlight};
use svgcad_core::math::Point2;

/// 会话模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    /// 橡皮筋绘制中（绘图命令或框选）
    Drawing,
    /// 参数化命令等待点或数值输入
    Interacting,
}

/// 命令记忆的参数（重复上一条命令时复用）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CommandParams {
    pub fillet_radius: f64,
    pub offset_distance: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct InteractionSession {
    mode: Mode,

    /// 选中的图元（无重复）
    pub selected: Vec<EntityId>,

    /// 悬停高亮的图元；悬停检测时至多一个，框选拖动时为候选集合
    pub hovered: Vec<EntityId>,

    /// 最近一次捕获的点，相对坐标输入的参考点
    pub last_point: Option<Point2>,

    /// 指针世界坐标（已应用捕捉）
    pub cursor: Point2,

    /// 正交模式
    pub ortho_mode: bool,

    /// 对象捕捉
    pub snap_mode: bool,

    /// 单选模式：点击图元作为命令输入而不是切换选择
    pub select_single_element: bool,

    /// 键入的距离，作用于当前手势
    pub pending_distance: Option<f64>,

    /// 命令行输入缓冲
    pub input_buffer: String,

    pub params: CommandParams,

    /// 进行中的框选
    pub marquee: Option<Marquee>,
}

impl Default for InteractionSession {
    fn default() -> Self {
        Self {
            mode: Mode::Idle,
            selected: Vec::new(),
            hovered: Vec::new(),
            last_point: None,
            cursor: Point2::origin(),
            ortho_mode: false,
            snap_mode: false,
            select_single_element: false,
            pending_distance: None,
            input_buffer: String::new(),
            params: CommandParams::default(),
            marquee: None,
        }
    }
}

impl InteractionSession {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Idle
    }

    pub fn is_drawing(&self) -> bool {
        self.mode == Mode::Drawing
    }

    pub fn is_interacting(&self) -> bool {
        self.mode == Mode::Interacting
    }

    pub fn begin_drawing(&mut self) -> Result<(), CommandError> {
        self.enter(Mode::Drawing)
    }

    pub fn begin_interacting(&mut self) -> Result<(), CommandError> {
        self.enter(Mode::Interacting)
    }

    fn enter(&mut self, mode: Mode) -> Result<(), CommandError> {
        if self.mode != Mode::Idle {
            return Err(CommandError::Busy);
        }
        self.mode = mode;
        self.hovered.clear();
        Ok(())
    }

    /// 回到空闲，清除手势相关的临时状态
    pub fn end(&mut self) {
        self.mode = Mode::Idle;
        self.select_single_element = false;
        self.pending_distance = None;
        self.marquee = None;
    }

    // ========== 选择 ==========

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected.contains(&id)
    }

    /// 添加到选择，已存在时返回 false
    pub fn select(&mut self, id: EntityId) -> bool {
        if self.is_selected(id) {
            return false;
        }
        self.selected.push(id);
        true
    }

    pub fn deselect(&mut self, id: EntityId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|e| *e != id);
        self.selected.len() != before
    }

    /// 切换选择状态，返回切换后是否选中
    pub fn toggle_selection(&mut self, id: EntityId) -> bool {
        if self.deselect(id) {
            false
        } else {
            self.selected.push(id);
            true
        }
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// 图元的呈现状态，选中优先于悬停
    pub fn highlight(&self, id: EntityId) -> Highlight {
        if self.is_selected(id) {
            Highlight::Selected
        } else if self.hovered.contains(&id) {
            Highlight::Hovered
        } else {
            Highlight::Normal
        }
    }

    /// 图元被替换（如矩形旋转为多边形）后更新引用，返回选择集是否改变
    pub fn replace_selected(&mut self, old: EntityId, new: EntityId) -> bool {
        let mut changed = false;
        for id in self.selected.iter_mut() {
            if *id == old {
                *id = new;
                changed = true;
            }
        }
        self.hovered.retain(|id| *id != old);
        changed
    }
}
