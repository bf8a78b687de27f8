//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Data directory | `init` |
//! | Document | Inspect and edit a page | `show`, `toggle`, `move`, `drop`, `date` |
//! | Pages | Named documents | `page list`, `page new`, `page delete` |
//! | Editor | Interactive terminal UI | `edit`, `edit --preview` |
//!
//! Line numbers on the command line are 1-based.
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! Without the flag the `default_format` from `config.toml` is used.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including engine diagnostics:
//! ```bash
//! logbook --verbose toggle 4
//! RUST_LOG=logbook_cli=trace logbook -v show
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod doc_cmd;
mod logging;
mod output;
mod page_cmd;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
