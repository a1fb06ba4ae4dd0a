//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project management | `init`, `serve` |
//! | List | List lifecycle | `list add`, `list ls`, `list show`, `list rm` |
//! | Task | Task management | `task add`, `task toggle`, `task edit` |
//! | Data | Bulk transfer | `export`, `import` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod list;
mod task;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
