use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "formulink",
    version,
    about = "Import formulary functions into a unit-aware registry",
    propagate_version = true
)]
pub struct Cli {
    /// Increase log detail (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// JSON file overriding the allow-list, deny-list or citation
    #[arg(long, value_name = "PATH", env = "FORMULINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an import and report what was registered and skipped
    Import {
        /// Qualified names (`module.path.function`); all eligible functions when empty
        names: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every registered entry
    List,

    /// Show units, arguments and citation of one entry
    Describe {
        name: String,
    },

    /// Call a registered entry with positional arguments
    Call {
        name: String,

        /// Numbers, `true`/`false`, `null`, or text such as `e-`
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call() {
        let cli = Cli::parse_from(["formulink", "-vv", "call", "omega_p1", "1e19", "e-"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Call { name, args } => {
                assert_eq!(name, "omega_p1");
                assert_eq!(args, vec!["1e19", "e-"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_import_names() {
        let cli = Cli::parse_from(["formulink", "import", "--json", "plasma.formulary.parameters.mass_density"]);
        match cli.command {
            Command::Import { names, json } => {
                assert!(json);
                assert_eq!(names, vec!["plasma.formulary.parameters.mass_density"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["formulink", "-q", "-v", "list"]).is_err());
    }

    #[test]
    fn test_command_factory() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
