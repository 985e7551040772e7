//! # Rendering Module
//!
//! Turns `CmdResult` data into terminal text. Every function returns a
//! `String`; callers decide where it goes (stdout for one-shot commands, the
//! session writer for the menu).
//!
//! ## Table Layout
//!
//! | Column | Width |
//! |--------|-------|
//! | ID     | 12    |
//! | Name   | 20    |
//! | Age    | 6     |
//! | Grade  | 10    |
//! | Email  | 25    |
//! | Phone  | 15    |
//!
//! Cells wider than their column are truncated with `…`, measured in display
//! width so CJK names and emoji line up.

use colored::Colorize;
use roster::api::{CmdMessage, MessageLevel, Statistics};
use roster::config::{RosterConfig, KEYS};
use roster::model::StudentRecord;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const COL_ID: usize = 12;
pub const COL_NAME: usize = 20;
pub const COL_AGE: usize = 6;
pub const COL_GRADE: usize = 10;
pub const COL_EMAIL: usize = 25;
pub const COL_PHONE: usize = 15;

const COLUMNS: [(&str, usize); 6] = [
    ("ID", COL_ID),
    ("Name", COL_NAME),
    ("Age", COL_AGE),
    ("Grade", COL_GRADE),
    ("Email", COL_EMAIL),
    ("Phone", COL_PHONE),
];

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => format!("ℹ {}", message.content).cyan(),
            MessageLevel::Success => format!("✓ {}", message.content).green(),
            MessageLevel::Warning => format!("! {}", message.content).yellow(),
            MessageLevel::Error => format!("✗ {}", message.content).red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn render_header() -> String {
    let bar = "═".repeat(59);
    format!(
        "{}\n{}\n{}\n",
        format!("╔{}╗", bar).cyan().bold(),
        format!("║{:^59}║", "STUDENT MANAGEMENT SYSTEM").yellow().bold(),
        format!("╚{}╝", bar).cyan().bold()
    )
}

pub fn render_menu() -> String {
    let items = [
        "Add Student",
        "View All Students",
        "Search Student",
        "Update Student",
        "Delete Student",
        "Statistics",
        "Exit",
    ];
    let mut out = format!("{}\n", "MAIN MENU".bold());
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("  {} {}\n", format!("{}.", i + 1).cyan().bold(), item));
    }
    out
}

/// Title line for a list of students, e.g. "ALL STUDENTS (3 total)".
pub fn render_title(title: &str) -> String {
    format!("{}\n", title.bold().blue())
}

pub fn render_student_table(students: &[StudentRecord]) -> String {
    let mut out = String::new();

    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(name, width)| pad_to_width(name, *width))
        .collect();
    out.push_str(&format!("{}\n", header.join(" ").magenta().bold()));

    let rule_width = COLUMNS.iter().map(|(_, w)| w).sum::<usize>() + COLUMNS.len() - 1;
    out.push_str(&format!("{}\n", "─".repeat(rule_width).blue()));

    for student in students {
        let cells = [
            pad_to_width(&student.student_id, COL_ID).cyan(),
            pad_to_width(&student.name, COL_NAME).green(),
            pad_to_width(&student.age.to_string(), COL_AGE).yellow(),
            pad_to_width(&student.grade, COL_GRADE).blue(),
            pad_to_width(&student.email, COL_EMAIL).magenta(),
            pad_to_width(&student.phone, COL_PHONE).cyan(),
        ];
        let row: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }
    out
}

pub fn render_student_details(student: &StudentRecord) -> String {
    let fields = [
        ("ID", student.student_id.clone()),
        ("Name", student.name.clone()),
        ("Age", student.age.to_string()),
        ("Grade", student.grade.clone()),
        ("Email", student.email.clone()),
        ("Phone", student.phone.clone()),
        ("Enrolled", student.enrollment_date.clone()),
    ];
    let mut out = String::new();
    for (label, value) in fields {
        out.push_str(&format!("{} {}\n", format!("{}:", label).cyan(), value));
    }
    out
}

pub fn render_statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        "Total Students:".cyan(),
        stats.total.to_string().green().bold()
    ));
    out.push_str(&format!(
        "{} {}\n",
        "Average Age:".cyan(),
        format!("{:.1}", stats.average_age).yellow().bold()
    ));
    out.push_str(&format!("\n{}\n", "Grade Distribution:".cyan()));
    out.push_str(&format!(
        "{} {}\n",
        pad_to_width("Grade", COL_GRADE).magenta().bold(),
        "Count".magenta().bold()
    ));
    for (grade, count) in &stats.grades {
        out.push_str(&format!(
            "{} {}\n",
            pad_to_width(grade, COL_GRADE).cyan(),
            count.to_string().green()
        ));
    }
    out
}

pub fn render_config(config: &RosterConfig) -> String {
    KEYS.iter()
        .filter_map(|key| config.get(key).map(|v| format!("{} = {}\n", key, v)))
        .collect()
}

/// Truncates to `width` display columns, then pads with spaces to exactly `width`.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut cell = truncate_to_width(s, width);
    let used = cell.width();
    cell.push_str(&" ".repeat(width.saturating_sub(used)));
    cell
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
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
