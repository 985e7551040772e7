use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version = get_version())]
#[command(about = "Terminal record manager for student profiles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backing JSON file (overrides ROSTER_FILE and the data-file setting)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verbose logging to stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Field flags shared by `add` and `update`.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Age (5-100)
    #[arg(long)]
    pub age: Option<String>,

    /// Grade or class
    #[arg(long)]
    pub grade: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number (digits, spaces and hyphens)
    #[arg(long)]
    pub phone: Option<String>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.grade.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive menu (default)
    Menu,

    /// Add a student, prompting for any field not given
    #[command(alias = "a")]
    Add {
        /// Student ID
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List all students
    #[command(alias = "ls")]
    List,

    /// Search by ID, name or email (case-insensitive)
    #[command(alias = "s")]
    Search {
        /// Text to look for (empty matches everyone)
        query: Vec<String>,
    },

    /// Show one student
    #[command(alias = "v")]
    Show { id: String },

    /// Update a student; with no field flags, prompts for each field
    #[command(alias = "u")]
    Update {
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a student
    #[command(alias = "rm")]
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show totals, average age and grade distribution
    Stats,

    /// Print the path of the backing file
    Path,

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, confirm-delete)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
