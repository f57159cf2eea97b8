use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{Parser, Subcommand};

use wallet_ledger::cli::Shell;
use wallet_ledger::config::{Settings, WalletPaths};
use wallet_ledger::logging::init_logging;
use wallet_ledger::services::FinanceManager;

#[derive(Parser)]
#[command(
    name = "wallet",
    version,
    about = "Terminal personal-finance ledger",
    long_about = "A multi-user ledger of income and expenses with category budgets, \
                  spending notifications and transfers between users. Run without \
                  a subcommand to start the interactive shell."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = WalletPaths::new()?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            paths.ensure_directories()?;
            let manager = FinanceManager::open(paths)?;
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut shell = Shell::new(manager, stdin.lock(), io::stdout().lock())
                .interactive(interactive);
            shell.run()?;
        }
        Commands::Config => {
            let settings = Settings::load_or_create(&paths)?;
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("Wallet ledger configuration");
            println!("===========================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Registry file:    {}", paths.registry_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!();
            println!("Settings:");
            println!("  Autosave:              {}", settings.autosave);
            println!("  Top expense categories: {}", settings.top_expense_categories);
            println!(
                "  Minimum login length:  {}",
                settings.credentials.min_login_length
            );
            println!(
                "  Minimum password length: {}",
                settings.credentials.min_password_length
            );
        }
    }

    Ok(())
}
