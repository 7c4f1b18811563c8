use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("td v", env!("CARGO_PKG_VERSION"), " - a to-do list you can drag into order"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory holding todo.toml and the store (default: current directory)
    #[arg(short = 'C', long = "dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the list
    List(ListArgs),
    /// Add an item to the end of the unfinished section
    Add(AddArgs),
    /// Mark an item finished
    Done(IdArg),
    /// Mark a finished item unfinished again
    Reopen(IdArg),
    /// Change an item's title or description
    Edit(EditArgs),
    /// Delete an item
    Rm(IdArg),
    /// Move an item within a section by position
    Mv(MvArgs),
    /// Replay a recorded drag gesture against a section
    Drag(DragArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Display order (default, date-asc, date-desc, title-az, title-za)
    #[arg(long)]
    pub sort: Option<String>,
    /// Sections to show (all, completed, uncompleted)
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item title
    pub title: String,
    /// Item description
    #[arg(short = 'd', long = "description", default_value = "")]
    pub description: String,
    /// Reminder time in epoch milliseconds (repeatable)
    #[arg(long = "at")]
    pub at: Vec<i64>,
}

#[derive(Args)]
pub struct IdArg {
    /// Item ID
    pub id: u32,
}

#[derive(Args)]
pub struct EditArgs {
    /// Item ID
    pub id: u32,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(short = 'd', long = "description")]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Section (unfinished, finished)
    pub section: String,
    /// Current position within the section (0-based)
    pub from: usize,
    /// New position within the section (0-based)
    pub to: usize,
}

#[derive(Args)]
pub struct DragArgs {
    /// Section (unfinished, finished)
    pub section: String,
    /// Path to a JSON gesture trace
    pub trace: String,
    /// Display order the drag happens in (default: from todo.toml)
    #[arg(long)]
    pub sort: Option<String>,
    /// Print drag state after every step
    #[arg(long)]
    pub steps: bool,
}
