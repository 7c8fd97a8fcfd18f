//! 输入解析
//!
//! 以 `:` 开头的是命令，其余非空行都当作答案

use phf::phf_map;

/// 答题命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Next,
    Previous,
    Submit,
    Exit,
    Status,
    Help,
}

static COMMANDS: phf::Map<&'static str, Command> = phf_map! {
    "start" => Command::Start,
    "n" => Command::Next,
    "next" => Command::Next,
    "p" => Command::Previous,
    "prev" => Command::Previous,
    "s" => Command::Submit,
    "submit" => Command::Submit,
    "q" => Command::Exit,
    "quit" => Command::Exit,
    "exit" => Command::Exit,
    "status" => Command::Status,
    "h" => Command::Help,
    "help" => Command::Help,
};

/// 一行输入的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Command(Command),
    UnknownCommand(String),
    Answer(String),
}

/// 解析一行输入
pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }

    match trimmed.strip_prefix(':') {
        Some(name) => {
            let name = name.trim().to_lowercase();
            match COMMANDS.get(name.as_str()) {
                Some(command) => Input::Command(*command),
                None => Input::UnknownCommand(name),
            }
        }
        // 答案原样保留，评分时再做空白处理
        None => Input::Answer(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// 退出确认：只有 y / yes / 是 表示确认
pub fn is_confirmation(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes" | "是")
}
