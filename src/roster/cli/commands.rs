//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve config and the backing file, open the API
//! 3. **API Dispatch**: Call the appropriate `RosterApi` method
//! 4. **Output Formatting**: Render `CmdResult`s through `render.rs`
//!
//! Handlers are generic over the storage backend and over the session's
//! reader and writer, so the same code serves the menu, the one-shot
//! subcommands, and the tests.

use super::logging::init_logging;
use super::render::{
    render_config, render_statistics, render_student_details, render_student_table, render_title,
};
use super::session::{collect_changes, collect_new_student, confirm_deletion, run_menu, Session};
use super::setup::{Cli, Commands, FieldArgs};
use clap::Parser;
use directories::ProjectDirs;
use roster::api::{CmdMessage, ConfigAction, RosterApi, RosterPaths};
use roster::config::{RosterConfig, FILE_ENV, HOME_ENV};
use roster::error::{Result, RosterError};
use roster::model::StudentChanges;
use roster::store::backend::StorageBackend;
use roster::store::fs_backend::FsBackend;
use roster::store::LoadOutcome;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct AppContext<B: StorageBackend> {
    pub api: RosterApi<B>,
    pub confirm_delete: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;
    let mut session = Session::stdio();
    report_load(&ctx, &mut session)?;

    match cli.command {
        None | Some(Commands::Menu) => run_menu(&mut ctx, &mut session),
        Some(Commands::Add { id, fields }) => handle_add(&mut ctx, &mut session, id, fields),
        Some(Commands::List) => handle_list(&ctx, &mut session),
        Some(Commands::Search { query }) => handle_search(&ctx, &mut session, &query.join(" ")),
        Some(Commands::Show { id }) => handle_show(&ctx, &mut session, &id),
        Some(Commands::Update { id, fields }) => handle_update(&mut ctx, &mut session, &id, fields),
        Some(Commands::Delete { id, yes }) => {
            let confirm = ctx.confirm_delete && !yes;
            handle_delete(&mut ctx, &mut session, &id, confirm)
        }
        Some(Commands::Stats) => handle_stats(&ctx, &mut session),
        Some(Commands::Path) => {
            session.write(&format!("{}\n", ctx.api.data_location().display()))
        }
        Some(Commands::Config { key, value }) => handle_config(&ctx, &mut session, key, value),
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "roster", "roster")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| RosterError::Config("Could not determine config dir".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext<FsBackend>> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config_dir = config_dir()?;

    let config = RosterConfig::load(&config_dir).unwrap_or_else(|e| {
        warn!(dir = %config_dir.display(), error = %e, "ignoring unreadable config");
        RosterConfig::default()
    });

    let data_file = match (&cli.file, std::env::var_os(FILE_ENV)) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => PathBuf::from(path),
        (None, None) => config.data_path(&cwd),
    };
    debug!(data_file = %data_file.display(), config_dir = %config_dir.display(), "resolved paths");

    let paths = RosterPaths {
        config_dir,
        data_file: data_file.clone(),
    };
    let api = RosterApi::new(FsBackend::new(data_file), paths);

    Ok(AppContext {
        api,
        confirm_delete: config.confirm_delete,
    })
}

fn report_load<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &AppContext<B>,
    session: &mut Session<R, W>,
) -> Result<()> {
    if let LoadOutcome::Recovered { reason, backup } = ctx.api.load_outcome() {
        let mut message = format!(
            "Could not read {} ({}). Starting with an empty roster.",
            ctx.api.data_location().display(),
            reason
        );
        if let Some(backup) = backup {
            message.push_str(&format!(" The unreadable file was copied to {}.", backup.display()));
        }
        session.messages(&[CmdMessage::warning(message)])?;
    }
    Ok(())
}

pub fn handle_add<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &mut AppContext<B>,
    session: &mut Session<R, W>,
    id: Option<String>,
    fields: FieldArgs,
) -> Result<()> {
    let Some(input) = collect_new_student(ctx, session, id, fields)? else {
        return Ok(());
    };
    let result = ctx.api.add_student(&input)?;
    session.messages(&result.messages)
}

pub fn handle_list<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &AppContext<B>,
    session: &mut Session<R, W>,
) -> Result<()> {
    let result = ctx.api.list_students()?;
    if !result.listed_students.is_empty() {
        session.write(&render_title(&format!(
            "ALL STUDENTS ({} total)",
            result.listed_students.len()
        )))?;
        session.write(&render_student_table(&result.listed_students))?;
    }
    session.messages(&result.messages)
}

pub fn handle_search<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &AppContext<B>,
    session: &mut Session<R, W>,
    query: &str,
) -> Result<()> {
    let result = ctx.api.search_students(query)?;
    session.messages(&result.messages)?;
    if !result.listed_students.is_empty() {
        session.write(&render_student_table(&result.listed_students))?;
    }
    Ok(())
}

pub fn handle_show<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &AppContext<B>,
    session: &mut Session<R, W>,
    id: &str,
) -> Result<()> {
    let result = ctx.api.view_student(id)?;
    for student in &result.listed_students {
        session.write(&render_student_details(student))?;
    }
    Ok(())
}

pub fn handle_update<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &mut AppContext<B>,
    session: &mut Session<R, W>,
    id: &str,
    fields: FieldArgs,
) -> Result<()> {
    let changes = if fields.is_empty() {
        let current = ctx
            .api
            .get_student(id)
            .cloned()
            .ok_or_else(|| RosterError::StudentNotFound(id.trim().to_string()))?;
        match collect_changes(session, &current)? {
            Some(changes) => changes,
            None => return Ok(()),
        }
    } else {
        StudentChanges {
            name: fields.name,
            age: fields.age,
            grade: fields.grade,
            email: fields.email,
            phone: fields.phone,
        }
    };

    let result = ctx.api.update_student(id, &changes)?;
    session.messages(&result.messages)
}

/// Deletes `id`, first asking for a typed `YES` when `confirm` is set.
pub fn handle_delete<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &mut AppContext<B>,
    session: &mut Session<R, W>,
    id: &str,
    confirm: bool,
) -> Result<()> {
    let Some(student) = ctx.api.get_student(id).cloned() else {
        return Err(RosterError::StudentNotFound(id.trim().to_string()));
    };

    if confirm && !confirm_deletion(session, &student)? {
        return session.messages(&[CmdMessage::info("Deletion cancelled.")]);
    }

    let result = ctx.api.delete_student(id)?;
    session.messages(&result.messages)
}

pub fn handle_stats<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &AppContext<B>,
    session: &mut Session<R, W>,
) -> Result<()> {
    let result = ctx.api.statistics()?;
    if let Some(stats) = &result.statistics {
        session.write(&render_title("STATISTICS"))?;
        session.write(&render_statistics(stats))?;
    }
    session.messages(&result.messages)
}

fn handle_config<B: StorageBackend, R: BufRead, W: Write>(
    ctx: &AppContext<B>,
    session: &mut Session<R, W>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        session.write(&render_config(config))?;
    }
    session.messages(&result.messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::model::StudentInput;
    use roster::store::mem_backend::MemBackend;
    use std::io::Cursor;

    fn ctx_with(backend: MemBackend, confirm_delete: bool) -> AppContext<MemBackend> {
        let paths = RosterPaths {
            config_dir: PathBuf::from("memory://config"),
            data_file: PathBuf::from("memory://students"),
        };
        AppContext {
            api: RosterApi::new(backend, paths),
            confirm_delete,
        }
    }

    fn session(script: &str) -> Session<Cursor<String>, Vec<u8>> {
        colored::control::set_override(false);
        Session::new(Cursor::new(script.to_string()), Vec::new(), false)
    }

    fn output(session: Session<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    fn seed(ctx: &mut AppContext<MemBackend>) {
        ctx.api
            .add_student(&StudentInput {
                student_id: "S1".into(),
                name: "Ada".into(),
                age: "20".into(),
                grade: "A".into(),
                email: "ada@x.com".into(),
                phone: "123-4567".into(),
            })
            .unwrap();
    }

    #[test]
    fn add_with_all_flags_does_not_prompt() {
        let mut ctx = ctx_with(MemBackend::new(), true);
        let mut s = session("");
        let fields = FieldArgs {
            name: Some("Ada".into()),
            age: Some("20".into()),
            grade: Some("A".into()),
            email: Some("ada@x.com".into()),
            phone: Some("123-4567".into()),
        };
        handle_add(&mut ctx, &mut s, Some("S1".into()), fields).unwrap();

        assert!(output(s).contains("Student added successfully!"));
        assert!(ctx.api.get_student("S1").is_some());
    }

    #[test]
    fn add_prompts_for_missing_fields() {
        let mut ctx = ctx_with(MemBackend::new(), true);
        let mut s = session("ada@x.com\n123-4567\n");
        let fields = FieldArgs {
            name: Some("Ada".into()),
            age: Some("20".into()),
            grade: Some("A".into()),
            ..Default::default()
        };
        handle_add(&mut ctx, &mut s, Some("S1".into()), fields).unwrap();

        let out = output(s);
        assert!(out.contains("Email:"));
        assert!(out.contains("Phone:"));
        assert!(!out.contains("Name:"));
        assert_eq!(ctx.api.get_student("S1").unwrap().phone, "123-4567");
    }

    #[test]
    fn invalid_flag_value_is_an_error() {
        let mut ctx = ctx_with(MemBackend::new(), true);
        let mut s = session("");
        let fields = FieldArgs {
            name: Some("Ada".into()),
            age: Some("abc".into()),
            grade: Some("A".into()),
            email: Some("ada@x.com".into()),
            phone: Some("1".into()),
        };
        let err = handle_add(&mut ctx, &mut s, Some("S1".into()), fields).unwrap_err();
        assert_eq!(err.to_string(), "Invalid age! Must be between 5 and 100.");
    }

    #[test]
    fn update_with_flags_skips_prompts() {
        let mut ctx = ctx_with(MemBackend::new(), true);
        seed(&mut ctx);
        let mut s = session("");
        let fields = FieldArgs {
            grade: Some("B".into()),
            ..Default::default()
        };
        handle_update(&mut ctx, &mut s, "S1", fields).unwrap();
        assert_eq!(ctx.api.get_student("S1").unwrap().grade, "B");
    }

    #[test]
    fn delete_without_confirm_skips_prompt() {
        let mut ctx = ctx_with(MemBackend::new(), true);
        seed(&mut ctx);
        let mut s = session("");
        handle_delete(&mut ctx, &mut s, "S1", false).unwrap();
        assert!(!output(s).contains("Type 'YES'"));
        assert!(ctx.api.get_student("S1").is_none());
    }

    #[test]
    fn delete_with_confirm_accepts_typed_yes() {
        let mut ctx = ctx_with(MemBackend::new(), false);
        seed(&mut ctx);
        let mut s = session("Yes\n");
        handle_delete(&mut ctx, &mut s, "S1", true).unwrap();
        assert!(output(s).contains("Type 'YES' to confirm deletion:"));
        assert!(ctx.api.get_student("S1").is_none());
    }

    #[test]
    fn delete_at_eof_cancels() {
        let mut ctx = ctx_with(MemBackend::new(), true);
        seed(&mut ctx);
        let mut s = session("");
        handle_delete(&mut ctx, &mut s, "S1", true).unwrap();
        assert!(output(s).contains("Deletion cancelled."));
        assert!(ctx.api.get_student("S1").is_some());
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut ctx = ctx_with(MemBackend::new(), true);
        let mut s = session("");
        assert!(matches!(
            handle_delete(&mut ctx, &mut s, "S9", true),
            Err(RosterError::StudentNotFound(_))
        ));
    }

    #[test]
    fn failed_save_surfaces_error() {
        let mut ctx = ctx_with(MemBackend::new(), false);
        seed(&mut ctx);
        ctx.api.store().backend().set_simulate_write_error(true);
        let mut s = session("");
        let err = handle_delete(&mut ctx, &mut s, "S1", false).unwrap_err();
        assert!(err.to_string().contains("Simulated write error"));
        assert!(ctx.api.get_student("S1").is_some());
    }

    #[test]
    fn show_prints_details() {
        let mut ctx = ctx_with(MemBackend::new(), true);
        seed(&mut ctx);
        let mut s = session("");
        handle_show(&ctx, &mut s, "S1").unwrap();
        assert!(output(s).contains("Email: ada@x.com"));
    }

    #[test]
    fn recovered_load_is_reported() {
        let ctx = ctx_with(MemBackend::unreadable("expected value at line 1"), true);
        let mut s = session("");
        report_load(&ctx, &mut s).unwrap();

        let out = output(s);
        assert!(out.contains("Starting with an empty roster."));
        assert!(out.contains("memory://students.corrupt"));
    }

    #[test]
    fn config_show_all_and_set() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RosterPaths {
            config_dir: dir.path().to_path_buf(),
            data_file: dir.path().join("students.json"),
        };
        let ctx = AppContext {
            api: RosterApi::new(MemBackend::new(), paths),
            confirm_delete: true,
        };

        let mut s = session("");
        handle_config(&ctx, &mut s, None, None).unwrap();
        assert!(output(s).contains("data-file = students.json"));

        let mut s = session("");
        handle_config(&ctx, &mut s, Some("data-file".into()), Some("class.json".into())).unwrap();
        assert!(output(s).contains("data-file set to class.json"));
    }
}
