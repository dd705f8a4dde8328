use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "filerack", bin_name = "filerack", version)]
#[command(about = "Browse and feed the rack of auto-saved scratch files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List rack files, newest first
    #[command(alias = "ls")]
    List,

    /// Print a rack file
    View {
        /// File name, with or without extension
        name: String,
    },

    /// Print the full path of rack files, or the rack directory
    Path { names: Vec<String> },

    /// Rack text read from stdin as if it were typed into a new buffer
    Capture {
        /// Syntax to remember for the file
        #[arg(short, long)]
        syntax: Option<String>,
    },

    /// Delete rack files
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Show or change configuration
    Config {
        /// Configuration key (rack-path, explicit-save)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}
