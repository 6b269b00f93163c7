use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("[ ] td v", env!("CARGO_PKG_VERSION"), " - a small to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this store directory instead of discovering `.todo/`
    #[arg(short = 'C', long = "store-dir", global = true)]
    pub store_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks through a filter
    List(ListArgs),
    /// Add a task with its deadline
    Add(AddArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Flip a task between pending and completed
    Toggle(ToggleArgs),
    /// Delete one task (asks for confirmation)
    Delete(DeleteArgs),
    /// Delete every task (asks for confirmation)
    Clear(ClearArgs),
    /// Mark every task completed, or pending with --undone
    MarkAll(MarkAllArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter: all, pending, completed
    #[arg(long, short = 'f', default_value = "all")]
    pub filter: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
    /// Deadline: YYYY-MM-DDTHH:MM, YYYY-MM-DD HH:MM, YYYY-MM-DD or RFC 3339
    #[arg(long, short = 'd')]
    pub deadline: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task number as shown by `td list`
    pub index: usize,
    /// New task text
    pub text: String,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task number as shown by `td list`
    pub index: usize,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task number as shown by `td list`
    pub index: usize,
    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct MarkAllArgs {
    /// Mark every task pending instead
    #[arg(long)]
    pub undone: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["td", "list", "--json", "-C", "/tmp/x"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.store_dir.as_deref(), Some("/tmp/x"));
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn add_requires_deadline() {
        assert!(Cli::try_parse_from(["td", "add", "Buy milk"]).is_err());
        let cli = Cli::try_parse_from(["td", "add", "Buy milk", "--deadline", "2025-01-01"])
            .unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.text, "Buy milk");
                assert_eq!(args.deadline, "2025-01-01");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["td"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn mark_all_subcommand_name() {
        let cli = Cli::try_parse_from(["td", "mark-all", "--undone"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::MarkAll(MarkAllArgs { undone: true }))));
    }
}
