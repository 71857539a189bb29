//! svgcad 终端适配器
//!
//! 从标准输入逐行读取事件驱动编辑器，把终端日志打印到标准输出。
//!
//! - `click x,y`：指针点击
//! - `move x,y`：指针移动
//! - `drag x1,y1 x2,y2`：拖动（框选）
//! - `esc` / `f3` / `f8`：按键
//! - `list`：以 JSON 列出所有图元（含呈现状态）
//! - `commands`：列出命令与快捷键
//! - `alias <别名> <命令>` / `unalias <别名>`：管理用户别名
//! - `quit`：退出
//! - 其他文本（含空行）写入命令行缓冲并回车提交

use anyhow::{Context, Result};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::Path;
use svgcad_core::input_parser::InputParser;
use svgcad_core::math::Point2;
use svgcad_editor::prelude::*;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// 一行输入对应的事件
#[derive(Debug, Clone, PartialEq)]
enum Event {
    Click(Point2),
    Move(Point2),
    Drag(Point2, Point2),
    Key(Key),
    List,
    Commands,
    Alias(String, String),
    Unalias(String),
    Quit,
    Text(String),
}

fn parse_event(line: &str) -> Result<Event> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let point = |text: &str| {
        InputParser::parse_point(text.trim(), None).with_context(|| format!("bad point '{}'", text.trim()))
    };

    let event = match word.to_lowercase().as_str() {
        "click" => Event::Click(point(rest)?),
        "move" if !rest.is_empty() => Event::Move(point(rest)?),
        "drag" => {
            let (from, to) = rest
                .trim()
                .split_once(' ')
                .context("drag needs two points")?;
            Event::Drag(point(from)?, point(to)?)
        }
        "esc" | "escape" => Event::Key(Key::Escape),
        "f3" => Event::Key(Key::F3),
        "f8" => Event::Key(Key::F8),
        "list" => Event::List,
        "commands" => Event::Commands,
        "alias" => {
            let (alias, command) = rest
                .trim()
                .split_once(' ')
                .context("alias needs a name and a command")?;
            Event::Alias(alias.to_string(), command.trim().to_string())
        }
        "unalias" if !rest.is_empty() => Event::Unalias(rest.trim().to_string()),
        "quit" | "exit" => Event::Quit,
        _ => Event::Text(line.to_string()),
    };
    Ok(event)
}

fn print_log(message: &LogMessage) {
    match message.style {
        LogStyle::Strong => print!("{}", message.text),
        LogStyle::Span | LogStyle::Plain => println!("{}", message.text),
    }
}

fn print_entities(editor: &Editor) {
    for entity in editor.ctx.drawing.all_primitives() {
        let line = json!({
            "entity": entity,
            "stroke": entity.style.stroke.to_hex(),
            "state": editor.ctx.session.highlight(entity.id),
        });
        println!("{}", line);
    }
}

fn print_commands(registry: &CommandRegistry) {
    for (command, kind) in registry.get_all_commands() {
        println!("{:<10} {}", command, kind.name());
    }
    for (shortcut, kind) in registry.get_all_shortcuts() {
        println!("{:<10} -> {}", shortcut, registry.get_command_name(kind).unwrap_or("?"));
    }
}

fn load_config() -> (EditorConfig, Option<(String, ConfigError)>) {
    match std::env::args().nth(1) {
        Some(path) => match EditorConfig::load(Path::new(&path)) {
            Ok(config) => (config, None),
            Err(err) => (EditorConfig::default(), Some((path, err))),
        },
        None => (EditorConfig::default(), None),
    }
}

fn main() -> Result<()> {
    let (config, config_error) = load_config();

    // 初始化日志
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(io::stderr)
            .finish(),
    )?;
    if let Some((path, err)) = config_error {
        warn!("Failed to load config {}: {}, using defaults", path, err);
    }

    info!("Starting svgcad...");

    let mut editor = Editor::new(config);
    editor.ctx.signals.terminal_logged.add(print_log);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let event = match parse_event(&line) {
            Ok(event) => event,
            Err(err) => {
                println!("{:#}", err);
                continue;
            }
        };
        match event {
            Event::Click(p) => {
                editor.pointer_move(p);
                editor.pointer_down(p);
                editor.pointer_up(p);
            }
            Event::Move(p) => editor.pointer_move(p),
            Event::Drag(from, to) => {
                editor.pointer_move(from);
                editor.pointer_down(from);
                editor.pointer_move(to);
                editor.pointer_up(to);
            }
            Event::Key(key) => editor.key_down(key),
            Event::List => print_entities(&editor),
            Event::Commands => print_commands(editor.registry()),
            Event::Alias(alias, command) => {
                if editor.registry_mut().add_alias(&alias, &command) {
                    println!("Alias {} -> {}", alias.to_uppercase(), command.to_uppercase());
                } else {
                    println!("Cannot alias {} to {}", alias, command);
                }
            }
            Event::Unalias(alias) => {
                if !editor.registry_mut().remove_alias(&alias) {
                    println!("No alias {}", alias);
                }
            }
            Event::Quit => break,
            Event::Text(text) => {
                editor.type_text(&text);
                editor.key_down(Key::Enter);
            }
        }
        io::stdout().flush()?;
    }

    info!("svgcad exiting");
    Ok(())
}
