use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "food-checkr",
    about = "Look up food products by barcode and rate their additives",
    version
)]
pub struct Cli {
    /// Config file [default: ./.food-checkr/config.toml, fallback ~/.config/food-checkr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log lookups and history changes to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print summary lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up one or more barcodes and save them to history
    Scan {
        /// Barcodes (8 to 14 digits)
        #[arg(required = true, value_name = "BARCODE")]
        barcodes: Vec<String>,

        /// Print products as JSON
        #[arg(long)]
        json: bool,

        /// Do not record the lookup in history
        #[arg(long)]
        no_save: bool,
    },

    /// Inspect or edit the scan history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show details for an additive code, or the whole reference table
    Additive {
        /// Additive code, e.g. E621, 621 or en:e621
        code: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List saved products, most recent first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a saved product without fetching it again
    Show { code: String },
    /// Remove one product from history
    Remove { code: String },
    /// Remove every product from history
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from(["food-checkr", "scan", "5449000000996", "96385074", "--no-save"])
            .unwrap();
        match cli.command {
            Command::Scan {
                barcodes,
                json,
                no_save,
            } => {
                assert_eq!(barcodes, ["5449000000996", "96385074"]);
                assert!(!json);
                assert!(no_save);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_scan_requires_barcode() {
        assert!(Cli::try_parse_from(["food-checkr", "scan"]).is_err());
    }

    #[test]
    fn test_parse_history_and_globals() {
        let cli = Cli::try_parse_from(["food-checkr", "history", "remove", "123", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Command::History {
                action: HistoryAction::Remove { ref code }
            } if code == "123"
        ));
    }

    #[test]
    fn test_parse_additive_without_code() {
        let cli = Cli::try_parse_from(["food-checkr", "additive", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Additive { code: None, json: true }));
    }
}
