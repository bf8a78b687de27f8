//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{doc_cmd, logging, page_cmd, tui};
use crate::storage::Workspace;

#[derive(Parser)]
#[command(name = "logbook")]
#[command(author, version, about = "Markdown todo lists with a built-in logbook")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured one)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Data directory holding the documents
    #[arg(long, short = 'd', global = true, env = "LOGBOOK_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and a default config
    Init,

    /// Print a document
    Show {
        /// Page to show (defaults to main)
        #[arg(long, short)]
        page: Option<String>,

        /// Print the raw markdown instead of the rendered view
        #[arg(long)]
        raw: bool,
    },

    /// Complete or reopen the todo item on a line
    Toggle {
        /// Line number (1-based)
        line: usize,

        /// Page to edit (defaults to main)
        #[arg(long, short)]
        page: Option<String>,
    },

    /// Swap a line with its neighbour
    Move {
        /// Line number (1-based)
        line: usize,

        /// Direction to move the line
        direction: doc_cmd::MoveDirection,

        /// Caret column to carry along (0-based)
        #[arg(long, default_value = "0")]
        column: usize,

        /// Page to edit (defaults to main)
        #[arg(long, short)]
        page: Option<String>,
    },

    /// Move a line so it lands before another line
    Drop {
        /// Line to move (1-based)
        from: usize,

        /// Line to drop before (1-based); with --logbook, a logbook timestamp line
        to: usize,

        /// Append to the logbook section starting at <to> instead
        #[arg(long)]
        logbook: bool,

        /// Page to edit (defaults to main)
        #[arg(long, short)]
        page: Option<String>,
    },

    /// Print the current logbook timestamp
    Date,

    /// Manage pages
    #[command(subcommand)]
    Page(page_cmd::PageCommands),

    /// Open the interactive editor
    Edit {
        /// Page to open (defaults to main)
        #[arg(long, short)]
        page: Option<String>,

        /// Start in preview mode
        #[arg(long)]
        preview: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let root = Workspace::resolve(cli.dir)?;
    let workspace = match cli.command {
        Commands::Init => Workspace::init(&root)?,
        _ => Workspace::open(&root)?,
    };

    let format = cli
        .format
        .unwrap_or_else(|| workspace.config().default_format.into());
    let output = Output::new(format, cli.verbose);

    // The editor owns the terminal, so it logs to a file instead
    if output.is_verbose() && !matches!(cli.command, Commands::Edit { .. }) {
        logging::init_stderr();
    }

    output.verbose_ctx("workspace", &format!("Using {}", workspace.root().display()));

    match cli.command {
        Commands::Init => {
            output.success(&format!(
                "Initialized logbook at {}",
                workspace.root().display()
            ));
        }

        Commands::Show { page, raw } => doc_cmd::show(&workspace, &output, page.as_deref(), raw)?,

        Commands::Toggle { line, page } => {
            output.verbose_ctx("toggle", &format!("line={}, page={:?}", line, page));
            doc_cmd::toggle(&workspace, &output, page.as_deref(), line)?
        }

        Commands::Move {
            line,
            direction,
            column,
            page,
        } => {
            output.verbose_ctx(
                "move",
                &format!("line={}, direction={:?}, column={}", line, direction, column),
            );
            doc_cmd::move_line(&workspace, &output, page.as_deref(), line, direction.into(), column)?
        }

        Commands::Drop {
            from,
            to,
            logbook,
            page,
        } => {
            output.verbose_ctx("drop", &format!("from={}, to={}, logbook={}", from, to, logbook));
            doc_cmd::drop_line(&workspace, &output, page.as_deref(), from, to, logbook)?
        }

        Commands::Date => doc_cmd::date(&output),

        Commands::Page(cmd) => page_cmd::run(cmd, &workspace, &output)?,

        Commands::Edit { page, preview } => tui::run(&workspace, &output, page.as_deref(), preview)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
