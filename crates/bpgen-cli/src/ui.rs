//! bpgen CLI UI primitives.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const TRIANGLE: &str = "\u{25B8}"; // ▸
    pub const DOT: &str = "\u{00B7}"; // ·
}

/// Print compact version header
pub fn print_compact_header(version: &str) {
    println!(
        "  {} {} {}",
        style(symbols::DIAMOND).fg(colors::CYAN),
        style("bpgen").fg(colors::CYAN).bold(),
        style(version).dim()
    );
}

pub fn success(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::TARGET_FILLED).fg(colors::GREEN),
        msg
    );
}

pub fn info(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        msg
    );
}

pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// Print the failure header shown before a diagnostic.
pub fn error_header(msg: &str) {
    eprintln!();
    eprintln!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA).bold(),
        style(msg).fg(colors::MAGENTA).bold()
    );
    eprintln!();
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("\u{25CE}\u{25C9}\u{25CE}\u{25C9}") // ◎◉◎◉
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(spinner_style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(150));
    pb
}

/// Print `actions · channels · events · states` counts.
pub fn counts(actions: usize, channels: usize, events: usize, states: usize) {
    println!(
        "    {} actions {} {} channels {} {} events {} {} states",
        actions,
        symbols::DOT,
        channels,
        symbols::DOT,
        events,
        symbols::DOT,
        states
    );
}

/// Print generated paths as a tree, one line per file.
pub fn file_tree<'a>(paths: impl IntoIterator<Item = &'a str>) {
    let mut paths: Vec<&str> = paths.into_iter().collect();
    paths.sort_unstable();

    let mut current_dir: Option<&str> = None;
    for path in paths {
        let (dir, file) = path.rsplit_once('/').unwrap_or(("", path));
        if current_dir != Some(dir) {
            if !dir.is_empty() {
                println!(
                    "  {} {}/",
                    style(symbols::TRIANGLE).fg(colors::CYAN),
                    style(dir).fg(colors::CYAN).bold()
                );
            }
            current_dir = Some(dir);
        }
        let indent = if dir.is_empty() { "  " } else { "      " };
        println!("  {}{}", indent, style(file).fg(colors::DIM));
    }
}

/// Print timing information
pub fn timing(label: &str, duration_ms: u128) {
    println!(
        "  {} {} in {}ms",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        label,
        duration_ms
    );
}
