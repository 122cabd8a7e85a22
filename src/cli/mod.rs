use clap::{Subcommand, ValueEnum};

use crate::application::SortOrder;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Keep the order the backend sent
    #[default]
    Snapshot,
    /// Sort repositories by name
    Name,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Snapshot => SortOrder::Snapshot,
            SortArg::Name => SortOrder::Name,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Live view of per-repository sync progress, refreshed every 10 seconds
    Watch {
        #[arg(long, value_enum, default_value_t = SortArg::Snapshot)]
        sort: SortArg,
    },

    /// Print per-repository sync progress once
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(long, value_enum, default_value_t = SortArg::Snapshot)]
        sort: SortArg,
    },

    /// Ask the backend to stop tracking a repository
    Remove {
        /// Repository identifier, exactly as shown by `list`
        uuid: String,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Watch {
            sort: SortArg::Snapshot,
        }
    }
}
