//! Terminal output. Layout math is Unicode-width aware; colors come from
//! `colored`, which drops them when stdout is not a terminal.

use chrono::{DateTime, Utc};
use colored::*;
use filerack::api::{CmdMessage, MessageLevel};
use filerack::model::RackFile;
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
pub const SYNTAX_WIDTH: usize = 12;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub fn print_files(files: &[RackFile]) {
    if files.is_empty() {
        println!("The rack is empty.");
        return;
    }
    for file in files {
        println!("{}", format_file_line(file));
    }
}

pub fn print_content(content: &str) {
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
}

pub fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

fn format_file_line(file: &RackFile) -> String {
    let time_ago = file.modified_at.map(format_time_ago).unwrap_or_default();
    let syntax = file.syntax.as_deref().unwrap_or("");
    let syntax = truncate_to_width(syntax, SYNTAX_WIDTH);

    let available = LINE_WIDTH.saturating_sub(TIME_WIDTH + SYNTAX_WIDTH + 2);
    let title = truncate_to_width(file.title(), available);
    let padding = available.saturating_sub(title.width());
    let syntax_padding = SYNTAX_WIDTH.saturating_sub(syntax.width());

    format!(
        "  {}{}{}{}{:>width$}",
        title,
        " ".repeat(padding),
        syntax.cyan(),
        " ".repeat(syntax_padding),
        time_ago.dimmed(),
        width = TIME_WIDTH
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn truncate_marks_cut_strings() {
        let cut = truncate_to_width("a rather long title", 8);
        assert_eq!(cut, "a rathe…");
        assert!(cut.width() <= 8);
    }

    #[test]
    fn truncate_counts_wide_chars() {
        let cut = truncate_to_width("日本語のメモ", 5);
        assert_eq!(cut, "日本…");
    }

    #[test]
    fn file_line_fits_line_width() {
        colored::control::set_override(false);
        let file = RackFile {
            name: format!("{}.txt", "x".repeat(200)),
            modified_at: Some(Utc::now()),
            syntax: Some("Markdown".into()),
        };
        let line = format_file_line(&file);
        assert!(line.width() <= LINE_WIDTH + 2);
        assert!(line.contains("Markdown"));
    }
}
