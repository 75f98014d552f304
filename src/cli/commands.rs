use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::handlers;

#[derive(Parser)]
#[command(name = "ck")]
#[command(version)]
#[command(about = "Keep track of notes, tasks and context across projects", long_about = None)]
pub struct Cli {
    /// Storage directory (overrides CK_STORAGE_PATH and .contextkeeper discovery)
    #[arg(long, global = true, value_name = "DIR")]
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a .contextkeeper directory in the current directory
    Init,

    /// Add a new item from an argument, the editor, or piped stdin
    Add(AddArgs),

    /// List items (active and unarchived unless told otherwise)
    List(ListArgs),

    /// Case-insensitive search over content and tags
    Search(SearchArgs),

    /// Mark an item as completed
    Done {
        /// Full id or unique prefix
        id: String,
    },

    /// Clear an item's completion
    Reopen {
        /// Full id or unique prefix
        id: String,
    },

    /// Hide an item from default listings
    Archive {
        /// Full id or unique prefix
        id: String,
    },

    /// Bring an archived item back
    Unarchive {
        /// Full id or unique prefix
        id: String,
    },

    /// Change an item's content, project or tags
    Edit(EditArgs),

    /// Permanently delete an item
    Remove {
        /// Full id or unique prefix
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Counts, projects and tags at a glance
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration
    Config(ConfigArgs),

    /// Write active items into .claude/.cursor rule files in the current directory
    Sync,
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Item text (read from stdin when omitted and stdin is piped)
    pub content: Option<String>,

    /// Project name (defaults to the configured project)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Tags, comma or space separated
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Write the content in an editor
    #[arg(short, long)]
    pub editor: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only items whose project equals this name
    #[arg(short = 'P', long)]
    pub project: Option<String>,

    /// Only items carrying every one of these tags
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Include completed items
    #[arg(short, long)]
    pub all: bool,

    /// Include archived items
    #[arg(long)]
    pub archived: bool,

    /// Filter expression, e.g. "project:web tag:bug status:done since:2024-01-01"
    #[arg(short, long)]
    pub filter: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Text to look for; omit to list everything active
    pub query: Option<String>,

    /// Only items carrying every one of these tags
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Include completed items
    #[arg(short, long)]
    pub all: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Full id or unique prefix
    pub id: String,

    /// New content (opens the editor when no field flag is given)
    #[arg(long)]
    pub content: Option<String>,

    /// New project; pass an empty string to clear it
    #[arg(short, long)]
    pub project: Option<String>,

    /// Replacement tags, comma or space separated
    #[arg(short, long)]
    pub tags: Option<String>,
}

impl EditArgs {
    pub fn has_field_flags(&self) -> bool {
        self.content.is_some() || self.project.is_some() || self.tags.is_some()
    }
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Print a single value
    #[arg(long, value_name = "KEY", conflicts_with_all = ["set", "reset"])]
    pub get: Option<String>,

    /// Set KEY to VALUE and save
    #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"], conflicts_with = "reset")]
    pub set: Option<Vec<String>>,

    /// Restore defaults, keeping the storage path
    #[arg(long)]
    pub reset: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let path = cli.path.as_deref();

    match cli.command {
        Some(Commands::Init) => handlers::init(path),
        Some(Commands::Add(args)) => handlers::add(path, &args),
        Some(Commands::List(args)) => handlers::list(path, &args),
        Some(Commands::Search(args)) => handlers::search(path, &args),
        Some(Commands::Done { id }) => handlers::done(path, &id),
        Some(Commands::Reopen { id }) => handlers::reopen(path, &id),
        Some(Commands::Archive { id }) => handlers::archive(path, &id),
        Some(Commands::Unarchive { id }) => handlers::unarchive(path, &id),
        Some(Commands::Edit(args)) => handlers::edit(path, &args),
        Some(Commands::Remove { id, force }) => handlers::remove(path, &id, force),
        Some(Commands::Status { json }) => handlers::status(path, json),
        Some(Commands::Config(args)) => handlers::config(path, &args),
        Some(Commands::Sync) => handlers::sync(path),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
