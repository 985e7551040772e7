//! # CLI Behavior
//!
//! This is **one possible UI client** for roster, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ## Two Ways In
//!
//! - `roster` (or `roster menu`): the interactive menu. Each action prompts
//!   field by field and validates every value as soon as it is typed.
//! - `roster <command>`: one-shot commands for scripting. `add` and `update`
//!   take their fields as flags; any field `add` is missing is prompted for.
//!
//! ## Delete Confirmation
//!
//! The menu always asks for a typed `YES` (any case) before deleting. The
//! one-shot `delete` asks too, unless `--yes` is passed or `confirm-delete`
//! is set to `false`.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `session`: Prompting context and the interactive menu
//! - `render`: Output formatting (tables, colors, messages)
//! - `setup`: Argument parsing via clap
//! - `logging`: tracing subscriber setup

mod commands;
mod logging;
mod render;
mod session;
pub mod setup;

pub use commands::run;
