use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::io;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary and note listing
    #[default]
    Text,
    /// The tool's structured payload as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "quicknote")]
#[command(version)]
#[command(about = "A quick note and code-snippet store served over MCP")]
#[command(long_about = "
quicknote stores short notes and code snippets with tags and exposes them as
Model Context Protocol tools: save_note, list_notes, get_recent_notes and
delete_note. The same tools are available from the command line.

Example usage:
  quicknote serve                      # JSON-RPC over HTTP on 127.0.0.1:3000
  quicknote serve --stdio              # MCP over stdin/stdout
  quicknote note save 'const x = 1' --tag javascript
  quicknote note list --query javascript
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a quicknote.yaml configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for note commands
    #[arg(long, value_enum, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server
    #[command(long_about = "
Runs quicknote as an MCP server.

By default the server speaks raw JSON-RPC over HTTP at /mcp:
  GET     health and server information
  POST    JSON-RPC requests (initialize, tools/list, tools/call, ...)
  OPTIONS CORS preflight

With --stdio it speaks MCP over stdin/stdout instead, which is how
desktop MCP clients launch servers. Logs then go to <data_dir>/mcp.log
(override with QUICKNOTE_LOG_FILE).

Examples:
  quicknote serve
  quicknote serve --bind 0.0.0.0:8080 --base-url https://notes.example.com
  quicknote serve --stdio
")]
    Serve {
        /// Serve MCP over stdin/stdout instead of HTTP
        #[arg(long)]
        stdio: bool,

        /// Socket address for the HTTP server
        #[arg(long, value_name = "ADDR", conflicts_with = "stdio")]
        bind: Option<String>,

        /// Public base URL used for widget URIs
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// Manage notes
    #[command(long_about = "
Save, list, search and delete notes in the configured store. These commands
run the same tools the MCP server exposes.

Examples:
  quicknote note save 'SELECT * FROM users' --tag sql --tag snippet
  echo 'multi-line note' | quicknote note save -
  quicknote note list --query sql --limit 5
  quicknote note recent --count 3
  quicknote note tag sql
  quicknote note delete 01ARZ3NDEKTSV4RRFFQ69G5FAV
  quicknote note list --format json
")]
    Note {
        #[command(subcommand)]
        subcommand: NoteCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Save a new note or code snippet
    Save {
        /// Note content; use - to read from stdin
        content: String,
        /// Tag for the note (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },
    /// List notes, optionally filtered by content or tag
    List {
        /// Search query matched against content and tags
        #[arg(long)]
        query: Option<String>,
        /// Maximum number of notes to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the most recently saved notes
    Recent {
        /// Number of notes to show
        #[arg(long)]
        count: Option<usize>,
    },
    /// Delete a note by its ID
    Delete {
        /// ID of the note to delete
        id: String,
    },
    /// List notes whose tags contain TAG
    Tag {
        /// Tag text, matched case-insensitively
        tag: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}
