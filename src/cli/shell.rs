//! Interactive line-command shell
//!
//! Reads one command per line, dispatches it to the [`FinanceManager`] and
//! prints the result followed by every queued notice.

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, warn};

use super::commands::{join_words, ShellCommand, ShellLine};
use crate::display::{
    format_balance, format_budgets, format_category_stats, format_detailed_report,
    format_operations, format_statistics, format_summary, format_transfers,
};
use crate::error::{WalletError, WalletResult};
use crate::models::{parse_amount, DateRange};
use crate::services::FinanceManager;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Whether the loop keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    manager: FinanceManager,
    input: R,
    output: W,
    interactive: bool,
}

fn parse_range(period: Option<&str>) -> WalletResult<Option<DateRange>> {
    period.map(str::parse).transpose()
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(manager: FinanceManager, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
            interactive: false,
        }
    }

    /// Show a prompt before each line
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn manager(&self) -> &FinanceManager {
        &self.manager
    }

    pub fn into_parts(self) -> (FinanceManager, W) {
        (self.manager, self.output)
    }

    /// Run until `exit` or end of input, then save
    pub fn run(&mut self) -> WalletResult<()> {
        writeln!(self.output, "Wallet ledger. Type 'help' for a list of commands.")?;

        loop {
            if self.interactive {
                let prompt = match self.manager.current_login() {
                    Some(login) => format!("{}> ", login),
                    None => "> ".to_string(),
                };
                write!(self.output, "{}", prompt)?;
                self.output.flush()?;
            }

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if self.execute_line(line)? == Flow::Exit {
                break;
            }
        }

        self.shutdown()
    }

    fn shutdown(&mut self) -> WalletResult<()> {
        if self.manager.is_authenticated() {
            self.manager.logout();
        } else if let Err(e) = self.manager.save() {
            warn!(error = %e, "failed to save registry on exit");
            writeln!(self.output, "Error: {}", e)?;
        }
        self.flush_notices()?;
        self.output.flush()?;
        Ok(())
    }

    /// Parse and run one line; only output failures are returned
    pub fn execute_line(&mut self, line: &str) -> WalletResult<Flow> {
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                self.report_parse_error(&e)?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "shell command");

        let flow = match self.dispatch(command) {
            Ok(flow) => flow,
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                Flow::Continue
            }
        };
        self.flush_notices()?;
        Ok(flow)
    }

    fn report_parse_error(&mut self, error: &clap::Error) -> WalletResult<()> {
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                write!(self.output, "{}", error)?;
            }
            _ => {
                let rendered = error.to_string();
                let first = rendered.lines().next().unwrap_or_default();
                let message = first.strip_prefix("error: ").unwrap_or(first);
                writeln!(self.output, "Error: {}", message)?;
                writeln!(self.output, "Type 'help' for a list of commands.")?;
            }
        }
        Ok(())
    }

    fn flush_notices(&mut self) -> WalletResult<()> {
        for notice in self.manager.drain_notices() {
            writeln!(self.output, "{}", notice)?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> WalletResult<()> {
        write!(self.output, "{}", text)?;
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> WalletResult<bool> {
        write!(self.output, "{} (yes/no): ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        let answer = answer.trim().to_lowercase();
        Ok(answer == "yes" || answer == "y")
    }

    fn dispatch(&mut self, command: ShellCommand) -> WalletResult<Flow> {
        match command {
            ShellCommand::Register { login, password } => {
                self.manager.register(&login, &password)?;
            }
            ShellCommand::Login { login, password } => {
                self.manager.login(&login, &password)?;
            }
            ShellCommand::Logout => {
                if !self.manager.is_authenticated() {
                    return Err(WalletError::Unauthenticated);
                }
                self.manager.logout();
            }
            ShellCommand::AddIncome {
                amount,
                category,
                description,
            } => {
                let amount = parse_amount(&amount)?;
                self.manager
                    .add_income(amount, &category, &join_words(&description))?;
            }
            ShellCommand::AddExpense {
                amount,
                category,
                description,
            } => {
                let amount = parse_amount(&amount)?;
                self.manager
                    .add_expense(amount, &category, &join_words(&description))?;
            }
            ShellCommand::SetBudget { category, limit } => {
                let limit = parse_amount(&limit)?;
                self.manager.set_budget(&category, limit)?;
            }
            ShellCommand::EditBudget { category, limit } => {
                let limit = parse_amount(&limit)?;
                self.manager.edit_budget(&category, limit)?;
            }
            ShellCommand::RemoveBudget { category } => {
                self.manager.remove_budget(&category)?;
            }
            ShellCommand::Transfer {
                to,
                amount,
                description,
            } => {
                let amount = parse_amount(&amount)?;
                self.manager.transfer(&to, amount, &join_words(&description))?;
            }
            ShellCommand::AddCategory { name, description } => {
                self.manager.add_category(&name, &join_words(&description))?;
            }
            ShellCommand::EditCategory {
                old,
                new,
                description,
            } => {
                let description = join_words(&description);
                let description = (!description.is_empty()).then_some(description.as_str());
                self.manager.rename_category(&old, &new, description)?;
            }
            ShellCommand::Balance => {
                let text = format_balance(self.manager.ledger()?);
                self.print(&text)?;
            }
            ShellCommand::Stats { categories, period } => {
                let range = parse_range(period.as_deref())?;
                let ledger = self.manager.ledger()?;
                let text = if categories.is_empty() {
                    format_statistics(ledger, range.as_ref())
                } else {
                    format_category_stats(ledger, &categories, range.as_ref())
                };
                self.print(&text)?;
            }
            ShellCommand::Budgets => {
                let text = format_budgets(self.manager.ledger()?);
                self.print(&text)?;
            }
            ShellCommand::Operations { period, category } => {
                let range = parse_range(period.as_deref())?;
                let text =
                    format_operations(self.manager.ledger()?, range.as_ref(), category.as_deref());
                self.print(&text)?;
            }
            ShellCommand::Report => {
                let top = self.manager.settings().top_expense_categories;
                let text = format_detailed_report(self.manager.ledger()?, top);
                self.print(&text)?;
            }
            ShellCommand::Summary => {
                let text = format_summary(self.manager.ledger()?);
                self.print(&text)?;
            }
            ShellCommand::Demo => {
                self.manager.load_demo()?;
                self.flush_notices()?;
                let text = format_summary(self.manager.ledger()?);
                self.print(&text)?;
            }
            ShellCommand::Export { name, format } => {
                self.manager.export(&name, format)?;
            }
            ShellCommand::Import { name, format, yes } => {
                // fail before prompting when nobody is logged in
                self.manager.ledger()?;
                if !yes && !self.confirm("This replaces your current ledger. Continue?")? {
                    writeln!(self.output, "Import cancelled.")?;
                    return Ok(Flow::Continue);
                }
                self.manager.import(&name, format)?;
            }
            ShellCommand::Transfers => {
                let text = format_transfers(&self.manager.transfer_history()?);
                self.print(&text)?;
            }
            ShellCommand::Help => {
                let help = ShellLine::command().render_help().to_string();
                self.print(&help)?;
            }
            ShellCommand::Clear => {
                self.print(CLEAR_SCREEN)?;
            }
            ShellCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::HashParams;
    use crate::config::{Settings, WalletPaths};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> FinanceManager {
        let mut settings = Settings::default();
        settings.password_hashing = HashParams {
            memory_cost: 64,
            time_cost: 1,
            parallelism: 1,
        };
        FinanceManager::with_settings(WalletPaths::with_base_dir(dir.path().to_path_buf()), settings)
            .unwrap()
    }

    fn run_script(dir: &TempDir, script: &str) -> String {
        let mut shell = Shell::new(manager(dir), Cursor::new(script.to_string()), Vec::new());
        shell.run().unwrap();
        let (_, output) = shell.into_parts();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_session_flow() {
        let dir = TempDir::new().unwrap();
        let out = run_script(
            &dir,
            "register alice secret\nlogin alice secret\nadd_income 1000 Salary \"March pay\"\nbalance\n",
        );

        assert!(out.contains("User 'alice' registered."));
        assert!(out.contains("Welcome, alice!"));
        assert!(out.contains("Balance: 1,000.0"));
        // end of input logs out
        assert!(out.contains("Goodbye, alice!"));
    }

    #[test]
    fn test_errors_are_printed_and_loop_continues() {
        let dir = TempDir::new().unwrap();
        let out = run_script(
            &dir,
            "balance\nfrobnicate\nregister al secret\nregister alice secret\nlogin alice secret\nadd_expense abc Food\nadd_expense -5 Food\nstats --period 31.02.2023-01.03.2023\n",
        );

        assert!(out.contains("Error: Authentication required"));
        assert!(out.contains("Error: unrecognized subcommand"));
        assert!(out.contains("Error: Invalid credentials"));
        assert!(out.contains("Error: Invalid argument: Invalid amount: abc"));
        assert!(out.contains("Error: Invalid argument: Amount must be positive"));
        assert!(out.contains("Error: Invalid date"));
        assert!(out.contains("Welcome, alice!"));
    }

    #[test]
    fn test_demo_prints_summary() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "register alice secret\nlogin alice secret\ndemo\nexit\nbalance\n");

        assert!(out.contains("Total income: 63,000.0"));
        assert!(out.contains("Utilities: 2,500.0, remaining: -500.0"));
        assert!(out.contains("Budget for 'Utilities' set to 2,500.0 (spent so far 3,000.0)."));
        // nothing runs after exit
        assert!(!out.contains("Balance:"));
    }

    #[test]
    fn test_import_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let out = run_script(
            &dir,
            "register alice secret\nlogin alice secret\nadd_income 100 Salary\nexport snap binary\nadd_income 50 Bonus\nimport snap binary\nno\nbalance\nimport snap binary\ny\nbalance\n",
        );

        assert!(out.contains("Import cancelled."));
        assert!(out.contains("Balance: 150.0"));
        assert!(out.contains("Imported 1 operations"));
        assert!(out.contains("Balance: 100.0"));
    }

    #[test]
    fn test_transfer_between_users() {
        let dir = TempDir::new().unwrap();
        let out = run_script(
            &dir,
            "register alice secret\nregister bob secret\nlogin alice secret\nadd_income 2000 Salary\ntransfer bob 1500 rent share\ntransfer alice 1 x\ntransfers\nlogout\nlogin bob secret\nbalance\n",
        );

        assert!(out.contains("Transferred 1,500.0 to 'bob'."));
        assert!(out.contains("Error: Cannot transfer money to yourself"));
        assert!(out.contains("alice -> bob | 1,500.0 | rent share"));
        assert!(out.contains("Balance: 1,500.0"));
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        run_script(&dir, "register alice secret\nlogin alice secret\nadd_expense 40 Food\n");
        let out = run_script(&dir, "login alice secret\nbalance\n");
        assert!(out.contains("Balance: -40.0"));
    }

    #[test]
    fn test_category_stats_follow_period() {
        let dir = TempDir::new().unwrap();
        let out = run_script(
            &dir,
            "register alice secret\nlogin alice secret\nadd_expense 40 Food\nstats Food --period 01.01.2000-31.12.2000\nstats Food\n",
        );

        assert!(out.contains("CATEGORY STATISTICS 01.01.2000 - 31.12.2000"));
        assert!(out.contains("Food: income 0.0, expense 0.0"));
        assert!(out.contains("Food: income 0.0, expense 40.0"));
    }

    #[test]
    fn test_help_lists_commands() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "help\n");
        for name in ["add_income", "set_budget", "edit_category", "transfers", "exit"] {
            assert!(out.contains(name), "missing {}", name);
        }
    }
}
