//! # Interactive Session
//!
//! [`Session`] is the prompting context: one reader, one writer, and whether a
//! human is on the other end. Everything that asks a question goes through it,
//! so the menu can be driven from a script in tests exactly as from a terminal.
//!
//! End of input is never an error: a prompt that hits EOF returns `None`, the
//! current action is abandoned, and the menu loop ends at its next prompt.

use super::commands::{
    handle_add, handle_delete, handle_list, handle_search, handle_stats, handle_update, AppContext,
};
use super::render::{render_header, render_menu, render_messages, render_student_details};
use super::setup::FieldArgs;
use roster::api::CmdMessage;
use roster::error::{Result, RosterError};
use roster::model::{StudentChanges, StudentInput, StudentRecord};
use roster::store::backend::StorageBackend;
use roster::validate::{self, ValidationError};
use std::io::{self, BufRead, IsTerminal, Stdin, Stdout, Write};

pub struct Session<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl Session<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        let interactive = stdin.is_terminal() && io::stdout().is_terminal();
        Self::new(stdin.lock(), io::stdout(), interactive)
    }
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
        }
    }

    pub fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    pub fn messages(&mut self, messages: &[CmdMessage]) -> Result<()> {
        self.write(&render_messages(messages))
    }

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn pause(&mut self) -> Result<()> {
        if self.interactive {
            self.prompt("\nPress Enter to continue...")?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.interactive {
            let _ = console::Term::stdout().clear_screen();
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

type Check = fn(&str) -> std::result::Result<(), ValidationError>;

fn no_check(_: &str) -> std::result::Result<(), ValidationError> {
    Ok(())
}

fn check_age(value: &str) -> std::result::Result<(), ValidationError> {
    validate::check_age(value).map(|_| ())
}

/// Uses `preset` when given; otherwise prompts and validates right away.
fn ask<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
    label: &str,
    preset: Option<String>,
    check: Check,
) -> Result<Option<String>> {
    if preset.is_some() {
        return Ok(preset);
    }
    let Some(value) = session.prompt(label)? else {
        return Ok(None);
    };
    check(&value)?;
    Ok(Some(value))
}

/// Gathers a new student's fields, prompting for the ones not supplied.
/// The id is checked for collisions before anything else is asked.
pub fn collect_new_student<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &AppContext<B>,
    session: &mut Session<R, W>,
    id: Option<String>,
    fields: FieldArgs,
) -> Result<Option<StudentInput>> {
    let Some(student_id) = ask(session, "Student ID:", id, validate::check_id)? else {
        return Ok(None);
    };
    if ctx.api.get_student(&student_id).is_some() {
        return Err(RosterError::DuplicateId(student_id.trim().to_string()));
    }

    let steps: [(&str, Option<String>, Check); 5] = [
        ("Name:", fields.name, no_check),
        ("Age:", fields.age, check_age),
        ("Grade/Class:", fields.grade, validate::check_grade),
        ("Email:", fields.email, validate::check_email),
        ("Phone:", fields.phone, validate::check_phone),
    ];

    let mut values = Vec::with_capacity(steps.len());
    for (label, preset, check) in steps {
        match ask(session, label, preset, check)? {
            Some(value) => values.push(value),
            None => return Ok(None),
        }
    }

    let [name, age, grade, email, phone]: [String; 5] = match values.try_into() {
        Ok(values) => values,
        Err(_) => return Ok(None),
    };
    Ok(Some(StudentInput {
        student_id,
        name,
        age,
        grade,
        email,
        phone,
    }))
}

fn blank_or(check: Check) -> impl Fn(&str) -> std::result::Result<(), ValidationError> {
    move |value: &str| {
        if value.is_empty() {
            Ok(())
        } else {
            check(value)
        }
    }
}

/// Shows the current values and asks for replacements; blank keeps a value.
pub fn collect_changes<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
    current: &StudentRecord,
) -> Result<Option<StudentChanges>> {
    session.write(&format!("\nCurrent details for {}:\n\n", current.name))?;
    session.write(&render_student_details(current))?;
    session.write("\nLeave blank to keep current value\n\n")?;

    let age = current.age.to_string();
    let steps: [(&str, &str, Check); 5] = [
        ("Name", &current.name, no_check),
        ("Age", &age, check_age),
        ("Grade", &current.grade, validate::check_grade),
        ("Email", &current.email, validate::check_email),
        ("Phone", &current.phone, validate::check_phone),
    ];

    let mut answers: Vec<Option<String>> = Vec::with_capacity(steps.len());
    for (label, value, check) in steps {
        let Some(answer) = session.prompt(&format!("New {} [{}]:", label, value))? else {
            return Ok(None);
        };
        blank_or(check)(&answer)?;
        answers.push(Some(answer).filter(|a| !a.is_empty()));
    }

    let mut answers = answers.into_iter();
    let mut next = || answers.next().flatten();
    Ok(Some(StudentChanges {
        name: next(),
        age: next(),
        grade: next(),
        email: next(),
        phone: next(),
    }))
}

/// Asks for a typed `YES` (any case). EOF counts as no.
pub fn confirm_deletion<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
    student: &StudentRecord,
) -> Result<bool> {
    session.write("\n! You are about to delete:\n")?;
    session.write(&format!("Name: {}\nID: {}\n\n", student.name, student.student_id))?;
    let answer = session.prompt("Type 'YES' to confirm deletion:")?;
    Ok(matches!(answer, Some(a) if a.to_uppercase() == "YES"))
}

/// The menu loop. Action errors are shown and the loop continues; only a
/// broken output stream ends it early.
pub fn run_menu<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &mut AppContext<B>,
    session: &mut Session<R, W>,
) -> Result<()> {
    loop {
        session.clear();
        session.write(&render_header())?;
        session.write("\n")?;
        session.write(&render_menu())?;

        let Some(choice) = session.prompt("\nEnter your choice (1-7):")? else {
            break;
        };

        let outcome = match choice.as_str() {
            "1" => handle_add(ctx, session, None, FieldArgs::default()),
            "2" => handle_list(ctx, session),
            "3" => match session.prompt("Enter student ID, name, or email:")? {
                Some(query) => handle_search(ctx, session, &query),
                None => Ok(()),
            },
            "4" => match session.prompt("Enter Student ID to update:")? {
                Some(id) => handle_update(ctx, session, &id, FieldArgs::default()),
                None => Ok(()),
            },
            "5" => match session.prompt("Enter Student ID to delete:")? {
                Some(id) => handle_delete(ctx, session, &id, true),
                None => Ok(()),
            },
            "6" => handle_stats(ctx, session),
            "7" => {
                session.messages(&[CmdMessage::success(
                    "Thank you for using Student Management System! Goodbye!",
                )])?;
                break;
            }
            _ => {
                session.messages(&[CmdMessage::error("Invalid choice! Please enter 1-7.")])?;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            session.messages(&[CmdMessage::error(e.to_string())])?;
        }
        session.pause()?;
    }
    Ok(())
}
