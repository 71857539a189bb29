//! 命令注册表
//!
//! 命令行输入到命令类型的映射：完整命令、快捷键、用户别名（不区分大小写）与前缀补全。

use crate::command::CommandKind;
use std::collections::HashMap;

/// 命令注册表
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    /// 完整命令 -> CommandKind
    main_commands: HashMap<String, CommandKind>,
    /// 快捷键/短命令 -> CommandKind
    short_commands: HashMap<String, CommandKind>,
    /// 用户别名 -> 完整命令
    aliases: HashMap<String, String>,
    /// CommandKind -> 完整命令（反向查找）
    kind_to_command: HashMap<CommandKind, String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            main_commands: HashMap::new(),
            short_commands: HashMap::new(),
            aliases: HashMap::new(),
            kind_to_command: HashMap::new(),
        };
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        // 绘图命令
        self.register(CommandKind::DrawLine, "LINE", &["L"]);
        self.register(CommandKind::DrawCircle, "CIRCLE", &["C"]);
        self.register(CommandKind::DrawRectangle, "RECTANGLE", &["REC", "RECT"]);

        // 修改命令
        self.register(CommandKind::Move, "MOVE", &["M"]);
        self.register(CommandKind::Copy, "COPY", &["CO", "CP"]);
        self.register(CommandKind::Rotate, "ROTATE", &["RO"]);
        self.register(CommandKind::Scale, "SCALE", &["SC"]);
        self.register(CommandKind::Offset, "OFFSET", &["O"]);
        self.register(CommandKind::Fillet, "FILLET", &["F"]);
        self.register(CommandKind::Erase, "ERASE", &["E", "DELETE"]);

        // 历史
        self.register(CommandKind::Undo, "UNDO", &["U"]);
        self.register(CommandKind::Redo, "REDO", &[]);
    }

    /// 注册命令
    ///
    /// # 参数
    /// - `kind`: 命令类型
    /// - `full_cmd`: 完整命令名（如 "LINE"）
    /// - `shortcuts`: 快捷键/短命令列表（如 ["L"]）
    pub fn register(&mut self, kind: CommandKind, full_cmd: &str, shortcuts: &[&str]) {
        let full_cmd_upper = full_cmd.to_uppercase();
        self.main_commands.insert(full_cmd_upper.clone(), kind);
        self.kind_to_command.insert(kind, full_cmd_upper);

        for shortcut in shortcuts {
            self.short_commands.insert(shortcut.to_uppercase(), kind);
        }
    }

    /// 查找输入对应的命令类型
    pub fn lookup(&self, input: &str) -> Option<CommandKind> {
        let input_upper = input.trim().to_uppercase();

        // 1. 完整命令
        if let Some(&kind) = self.main_commands.get(&input_upper) {
            return Some(kind);
        }
        // 2. 快捷键
        if let Some(&kind) = self.short_commands.get(&input_upper) {
            return Some(kind);
        }
        // 3. 别名
        self.aliases
            .get(&input_upper)
            .and_then(|cmd| self.main_commands.get(cmd).copied())
    }

    /// 前缀补全，结果按字母排序
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let prefix_upper = prefix.to_uppercase();
        let mut results: Vec<String> = self
            .main_commands
            .keys()
            .filter(|cmd| cmd.starts_with(&prefix_upper))
            .cloned()
            .collect();
        results.sort();
        results
    }

    /// 命令的完整名称
    pub fn get_command_name(&self, kind: CommandKind) -> Option<&str> {
        self.kind_to_command.get(&kind).map(|s| s.as_str())
    }

    /// 添加用户别名，目标必须是已注册的完整命令
    pub fn add_alias(&mut self, alias: &str, command: &str) -> bool {
        let alias_upper = alias.to_uppercase();
        let command_upper = command.to_uppercase();

        // 不允许覆盖现有命令
        if self.main_commands.contains_key(&alias_upper)
            || self.short_commands.contains_key(&alias_upper)
        {
            return false;
        }
        if !self.main_commands.contains_key(&command_upper) {
            return false;
        }
        self.aliases.insert(alias_upper, command_upper);
        true
    }

    pub fn remove_alias(&mut self, alias: &str) -> bool {
        self.aliases.remove(&alias.to_uppercase()).is_some()
    }

    /// 所有完整命令
    pub fn get_all_commands(&self) -> Vec<(&str, CommandKind)> {
        let mut commands: Vec<_> = self
            .main_commands
            .iter()
            .map(|(cmd, &kind)| (cmd.as_str(), kind))
            .collect();
        commands.sort_by(|a, b| a.0.cmp(b.0));
        commands
    }

    /// 所有快捷键
    pub fn get_all_shortcuts(&self) -> Vec<(&str, CommandKind)> {
        let mut shortcuts: Vec<_> = self
            .short_commands
            .iter()
            .map(|(cmd, &kind)| (cmd.as_str(), kind))
            .collect();
        shortcuts.sort_by(|a, b| a.0.cmp(b.0));
        shortcuts
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let registry = CommandRegistry::new();

        // 完整命令
        assert_eq!(registry.lookup("LINE"), Some(CommandKind::DrawLine));
        assert_eq!(registry.lookup("fillet"), Some(CommandKind::Fillet));

        // 快捷键
        assert_eq!(registry.lookup("l"), Some(CommandKind::DrawLine));
        assert_eq!(registry.lookup("REC"), Some(CommandKind::DrawRectangle));
        assert_eq!(registry.lookup("o"), Some(CommandKind::Offset));
        assert_eq!(registry.lookup(" u "), Some(CommandKind::Undo));

        assert_eq!(registry.lookup("NOTEXIST"), None);
    }

    #[test]
    fn test_complete() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.complete("C"), vec!["CIRCLE".to_string(), "COPY".to_string()]);
        assert_eq!(registry.complete("re"), vec!["RECTANGLE".to_string(), "REDO".to_string()]);
    }

    #[test]
    fn test_alias() {
        let mut registry = CommandRegistry::new();

        assert!(registry.add_alias("LL", "LINE"));
        assert_eq!(registry.lookup("ll"), Some(CommandKind::DrawLine));

        // 不能覆盖快捷键，也不能指向不存在的命令
        assert!(!registry.add_alias("M", "COPY"));
        assert!(!registry.add_alias("XX", "MIRROR"));

        assert!(registry.remove_alias("LL"));
        assert_eq!(registry.lookup("LL"), None);
    }

    #[test]
    fn test_reverse_lookup_matches_kind_names() {
        let registry = CommandRegistry::new();
        for (command, kind) in registry.get_all_commands() {
            assert_eq!(registry.get_command_name(kind), Some(command));
        }
        assert_eq!(registry.get_command_name(CommandKind::AddElement), None);
    }
}
