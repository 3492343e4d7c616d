use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wp", about = concat!("wp v", env!("CARGO_PKG_VERSION"), " - the wedding guest list, in a CSV file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different planner directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a planner.toml in the planner directory
    Init(InitArgs),
    /// Add a guest
    Add(AddArgs),
    /// List guests with their row numbers
    List(ListArgs),
    /// Change fields of one guest
    Edit(EditArgs),
    /// Mark guests as invited
    Invite(RowsArgs),
    /// Remove guests from the list
    Delete(RowsArgs),
    /// Show the dashboard: totals, cities and categories
    Stats,
    /// Show plate counts for each event
    Catering,
    /// Show who needs rooms
    Rooms,
    /// Write the guest list as a downloadable CSV
    Export(ExportArgs),
    /// Show the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Data file to use instead of guest_list.csv
    #[arg(long)]
    pub file: Option<String>,
    /// Overwrite an existing planner.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Guest or family name
    pub name: String,
    /// Category (default: the first configured category)
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, default_value = "")]
    pub city: String,
    /// Digits and + only
    #[arg(long, default_value = "")]
    pub mobile: String,
    /// Event (default: the first configured event)
    #[arg(long)]
    pub event: Option<String>,
    /// Number of people (1 to 20)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub pax: u32,
    /// Rooms to book, 0 to 10 (0 if no stay is needed)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub rooms: u32,
    /// The invitation has already been given
    #[arg(long)]
    pub invited: bool,
    #[arg(long, default_value = "")]
    pub note: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only guests whose invitation is still pending
    #[arg(long)]
    pub pending: bool,
    /// Only guests from this city
    #[arg(long)]
    pub city: Option<String>,
    /// Only guests in this category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Row number as shown by `wp list`
    pub row: usize,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
    #[arg(long)]
    pub event: Option<String>,
    /// 1 to 20
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub pax: Option<u32>,
    /// 0 to 10
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub rooms: Option<u32>,
    /// true or false
    #[arg(long)]
    pub invited: Option<bool>,
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Args)]
pub struct RowsArgs {
    /// Row numbers as shown by `wp list`
    #[arg(required = true)]
    pub rows: Vec<usize>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output path, or - for stdout (default: the configured export name)
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Maximum number of entries to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
}
