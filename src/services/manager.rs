//! Finance manager: the session-level orchestrator
//!
//! Owns the owner registry and the login session, and dispatches every
//! ledger operation to the logged-in owner's ledger. Confirmation messages
//! and the ledger's notifications accumulate in a session notice queue that
//! the shell drains after each command.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::auth::Authenticator;
use crate::config::{Settings, WalletPaths};
use crate::error::{WalletError, WalletResult};
use crate::export::{export_ledger, import_ledger, ExportFormat};
use crate::ledger::Ledger;
use crate::models::{
    category_key, format_amount, Budget, Category, DefaultCategory, Operation, Owner, Transfer,
};
use crate::storage::{Registry, RegistryStore};

pub struct FinanceManager {
    paths: WalletPaths,
    settings: Settings,
    authenticator: Authenticator,
    store: RegistryStore,
    audit: AuditLogger,
    registry: Registry,
    current: Option<String>,
    notices: Vec<String>,
}

impl FinanceManager {
    /// Open the data directory, loading settings and the registry
    pub fn open(paths: WalletPaths) -> WalletResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        Self::with_settings(paths, settings)
    }

    pub fn with_settings(paths: WalletPaths, settings: Settings) -> WalletResult<Self> {
        let store = RegistryStore::new(paths.registry_file());
        let registry = store.load()?;
        info!(owners = registry.len(), path = %store.path().display(), "registry opened");

        Ok(Self {
            authenticator: Authenticator::new(settings.password_hashing.clone()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
            settings,
            store,
            registry,
            current: None,
            notices: Vec::new(),
        })
    }

    pub fn paths(&self) -> &WalletPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn owner_count(&self) -> usize {
        self.registry.len()
    }

    // --- session ----------------------------------------------------------

    pub fn register(&mut self, login: &str, password: &str) -> WalletResult<()> {
        if self.registry.contains_key(login) {
            return Err(WalletError::DuplicateUser(login.to_string()));
        }

        let policy = &self.settings.credentials;
        if !policy.validate(login, password) {
            return Err(WalletError::CredentialsInvalid(format!(
                "login needs at least {} characters and password at least {}",
                policy.min_login_length, policy.min_password_length
            )));
        }

        let hash = self.authenticator.hash_password(password)?;
        self.registry
            .insert(login.to_string(), Owner::new(login, hash));
        info!(login, "owner registered");

        self.audit_or_warn(&AuditEntry::register(login));
        self.save_or_warn();
        self.notice(format!("User '{}' registered. You can now log in.", login));
        Ok(())
    }

    pub fn login(&mut self, login: &str, password: &str) -> WalletResult<()> {
        let owner = self
            .registry
            .get_mut(login)
            .ok_or_else(|| WalletError::UserNotFound(login.to_string()))?;

        if !self
            .authenticator
            .verify_password(password, owner.password_hash())
        {
            return Err(WalletError::CredentialsInvalid("wrong password".into()));
        }

        // budget notices queued while away are kept, health is re-checked once
        owner.ledger_mut().refresh_financial_health();
        let pending = owner.ledger_mut().drain_notifications();

        self.current = Some(login.to_string());
        info!(login, "logged in");
        self.notice(format!("Welcome, {}!", login));
        self.notices
            .extend(pending.into_iter().map(|n| n.to_string()));
        Ok(())
    }

    /// No-op without a session
    pub fn logout(&mut self) {
        if let Some(login) = self.current.take() {
            self.save_or_warn();
            info!(login = %login, "logged out");
            self.notice(format!("Goodbye, {}!", login));
        }
    }

    pub fn current_login(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn require_login(&self) -> WalletResult<String> {
        self.current.clone().ok_or(WalletError::Unauthenticated)
    }

    fn current_owner_mut(&mut self) -> WalletResult<&mut Owner> {
        let login = self.require_login()?;
        self.registry
            .get_mut(&login)
            .ok_or(WalletError::UserNotFound(login))
    }

    /// The logged-in owner's ledger
    pub fn ledger(&self) -> WalletResult<&Ledger> {
        let login = self.current.as_ref().ok_or(WalletError::Unauthenticated)?;
        self.registry
            .get(login)
            .map(Owner::ledger)
            .ok_or_else(|| WalletError::UserNotFound(login.clone()))
    }

    fn ledger_mut(&mut self) -> WalletResult<&mut Ledger> {
        Ok(self.current_owner_mut()?.ledger_mut())
    }

    // --- notices and persistence ------------------------------------------

    fn notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// Move the current ledger's notifications into the session queue
    fn collect_ledger_notices(&mut self) -> WalletResult<()> {
        let pending = self.ledger_mut()?.drain_notifications();
        self.notices
            .extend(pending.into_iter().map(|n| n.to_string()));
        Ok(())
    }

    /// Everything queued since the previous drain
    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Write the registry to disk
    pub fn save(&self) -> WalletResult<()> {
        self.paths.ensure_directories()?;
        self.store.save(&self.registry)
    }

    fn save_or_warn(&mut self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to save registry");
            self.notice(format!("Warning: failed to save data: {}", e));
        }
    }

    /// Save after a mutation when autosave is on
    fn persist(&mut self) {
        if self.settings.autosave {
            self.save_or_warn();
        }
    }

    fn audit_or_warn(&self, entry: &AuditEntry) {
        if let Err(e) = self.audit.log(entry) {
            warn!(error = %e, action = %entry.action, "failed to write audit entry");
        }
    }

    // --- operations -------------------------------------------------------

    /// The ledger's category for `name`, created empty if unknown
    fn ensure_category(&mut self, name: &str) -> WalletResult<Category> {
        let name = name.trim();
        let ledger = self.ledger_mut()?;
        if let Some(existing) = ledger.get_category(name) {
            return Ok(existing.clone());
        }

        let created = Category::new(name, "")?;
        ledger.add_category(created.clone());
        debug!(category = created.name(), "category auto-created");
        self.notice(format!("Category '{}' created.", created.name()));
        Ok(created)
    }

    pub fn add_income(&mut self, amount: f64, category: &str, description: &str) -> WalletResult<()> {
        self.require_login()?;
        // validate before a category gets auto-created
        Operation::income(amount, Category::default(), "")?;

        let category = self.ensure_category(category)?;
        let operation = Operation::income(amount, category.clone(), description)?;
        self.ledger_mut()?.append_operation(operation);
        debug!(amount, category = category.name(), "income added");

        self.notice(format!(
            "Income of {} added to '{}'.",
            format_amount(amount),
            category.name()
        ));
        self.collect_ledger_notices()?;
        self.persist();
        Ok(())
    }

    pub fn add_expense(&mut self, amount: f64, category: &str, description: &str) -> WalletResult<()> {
        self.require_login()?;
        Operation::expense(amount, Category::default(), "")?;

        let category = self.ensure_category(category)?;
        let operation = Operation::expense(amount, category.clone(), description)?;
        self.ledger_mut()?.append_operation(operation);
        debug!(amount, category = category.name(), "expense added");

        self.notice(format!(
            "Expense of {} added to '{}'.",
            format_amount(amount),
            category.name()
        ));
        self.collect_ledger_notices()?;
        self.persist();
        Ok(())
    }

    // --- budgets ----------------------------------------------------------

    fn validate_limit(limit: f64) -> WalletResult<()> {
        if !limit.is_finite() || limit < 0.0 {
            return Err(WalletError::InvalidArgument(format!(
                "Budget limit must be a non-negative number, got {}",
                limit
            )));
        }
        Ok(())
    }

    pub fn set_budget(&mut self, category: &str, limit: f64) -> WalletResult<()> {
        self.require_login()?;
        Self::validate_limit(limit)?;

        let category = self.ensure_category(category)?;
        let budget = self.ledger_mut()?.set_budget(category.name(), limit)?;
        let message = format!(
            "Budget for '{}' set to {} (spent so far {}).",
            category.name(),
            format_amount(budget.limit()),
            format_amount(budget.spent())
        );
        debug!(category = category.name(), limit, "budget set");

        self.notice(message);
        self.collect_ledger_notices()?;
        self.persist();
        Ok(())
    }

    pub fn edit_budget(&mut self, category: &str, limit: f64) -> WalletResult<()> {
        Self::validate_limit(limit)?;

        let budget = self.ledger_mut()?.edit_budget(category, limit)?;
        let message = format!(
            "Budget for '{}' changed to {}.",
            budget.category().name(),
            format_amount(budget.limit())
        );
        debug!(category, limit, "budget edited");

        self.notice(message);
        self.persist();
        Ok(())
    }

    pub fn remove_budget(&mut self, category: &str) -> WalletResult<()> {
        let ledger = self.ledger_mut()?;
        let removed = ledger
            .remove_budget(category)
            .ok_or_else(|| WalletError::BudgetNotFound(category.to_string()))?;
        debug!(category, "budget removed");

        self.notice(format!(
            "Budget for '{}' removed.",
            removed.category().name()
        ));
        self.persist();
        Ok(())
    }

    // --- categories -------------------------------------------------------

    pub fn add_category(&mut self, name: &str, description: &str) -> WalletResult<()> {
        let category = Category::new(name.trim(), description)?;
        let ledger = self.ledger_mut()?;
        if ledger.has_category(category.name()) {
            return Err(WalletError::CategoryAlreadyExists(category.name().to_string()));
        }

        ledger.add_category(category.clone());
        debug!(category = category.name(), "category added");
        self.notice(format!("Category '{}' added.", category.name()));
        self.persist();
        Ok(())
    }

    /// Rename `old` to `new`, optionally replacing its description
    ///
    /// Operations are re-pointed and any budget moves over with its limit and
    /// spent amount intact. A case-only match of `old` and `new` changes just
    /// the description.
    pub fn rename_category(
        &mut self,
        old: &str,
        new: &str,
        description: Option<&str>,
    ) -> WalletResult<()> {
        let actor = self.require_login()?;
        let ledger = self.ledger_mut()?;
        let existing = ledger
            .get_category(old)
            .cloned()
            .ok_or_else(|| WalletError::CategoryNotFound(old.to_string()))?;
        let description = description
            .map(str::to_string)
            .unwrap_or_else(|| existing.description().to_string());

        if category_key(old) == category_key(new.trim()) {
            let mut updated = existing.clone();
            updated.set_description(description);
            ledger.add_category(updated.clone());
            for op in ledger.operations_mut() {
                if op.category().matches(old) {
                    op.set_category(updated.clone());
                }
            }
            for budget in ledger.budgets_mut() {
                if budget.category().matches(old) {
                    budget.set_category(updated.clone());
                }
            }

            self.notice(format!("Category '{}' updated.", updated.name()));
            self.persist();
            return Ok(());
        }

        let renamed = Category::new(new.trim(), description)?;
        if ledger.has_category(renamed.name()) {
            return Err(WalletError::CategoryAlreadyExists(renamed.name().to_string()));
        }

        ledger.add_category(renamed.clone());
        let mut moved = 0usize;
        for op in ledger.operations_mut() {
            if op.category().matches(old) {
                op.set_category(renamed.clone());
                moved += 1;
            }
        }
        if let Some(budget) = ledger.remove_budget(old) {
            ledger.insert_budget(Budget::with_spent(
                renamed.clone(),
                budget.limit(),
                budget.spent(),
            ));
        }
        ledger.remove_category(old);
        debug!(from = existing.name(), to = renamed.name(), operations = moved, "category renamed");

        self.audit_or_warn(&AuditEntry::category_rename(
            &actor,
            existing.name(),
            renamed.name(),
        ));
        self.notice(format!(
            "Category '{}' renamed to '{}' ({} operations updated).",
            existing.name(),
            renamed.name(),
            moved
        ));
        self.persist();
        Ok(())
    }

    // --- transfers --------------------------------------------------------

    /// Move `amount` from the logged-in owner to `to`
    ///
    /// Both operations are built before either ledger changes, and appending
    /// cannot fail, so the pair lands together or not at all.
    pub fn transfer(&mut self, to: &str, amount: f64, description: &str) -> WalletResult<Transfer> {
        let from = self.require_login()?;

        if to == from {
            return Err(WalletError::SelfTransfer);
        }
        if !self.registry.contains_key(to) {
            return Err(WalletError::RecipientNotFound(to.to_string()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(WalletError::InvalidArgument(format!(
                "Transfer amount must be positive, got {}",
                amount
            )));
        }
        let available = self.ledger()?.balance();
        if available < amount {
            return Err(WalletError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        let describe = |direction: &str, who: &str| {
            if description.is_empty() {
                format!("Transfer {} {}", direction, who)
            } else {
                format!("Transfer {} {}: {}", direction, who, description)
            }
        };

        let mut recipient = self
            .registry
            .remove(to)
            .ok_or_else(|| WalletError::RecipientNotFound(to.to_string()))?;
        let Some(sender) = self.registry.get_mut(&from) else {
            self.registry.insert(to.to_string(), recipient);
            return Err(WalletError::UserNotFound(from));
        };

        let sender_misc = misc_category(sender.ledger_mut());
        let recipient_misc = misc_category(recipient.ledger_mut());
        let built = Operation::expense(amount, sender_misc, describe("to", to)).and_then(|debit| {
            Operation::income(amount, recipient_misc, describe("from", &from))
                .map(|credit| (debit, credit))
        });
        let (debit, credit) = match built {
            Ok(pair) => pair,
            Err(e) => {
                self.registry.insert(to.to_string(), recipient);
                return Err(e);
            }
        };

        sender.ledger_mut().append_operation(debit);
        recipient.ledger_mut().append_operation(credit);
        self.registry.insert(to.to_string(), recipient);

        let record = Transfer::new(from.as_str(), to, amount, description);
        info!(from = %from, to, amount, id = %record.id, "transfer completed");
        self.audit_or_warn(&AuditEntry::transfer(&record));

        self.notice(format!(
            "Transferred {} to '{}'.",
            format_amount(amount),
            to
        ));
        self.collect_ledger_notices()?;
        self.persist();
        Ok(record)
    }

    /// Transfers sent or received by the logged-in owner
    pub fn transfer_history(&self) -> WalletResult<Vec<Transfer>> {
        let login = self.require_login()?;
        self.audit.transfers_involving(&login)
    }

    // --- export / import --------------------------------------------------

    pub fn export(&mut self, name: &str, format: ExportFormat) -> WalletResult<Vec<PathBuf>> {
        let actor = self.require_login()?;
        let files = export_ledger(self.ledger()?, name, format, &self.paths.exports_dir())?;
        info!(format = %format, files = files.len(), "export written");

        self.audit_or_warn(&AuditEntry::export(&actor, &files, &format.to_string()));
        for file in &files {
            self.notice(format!("Exported to {}", file.display()));
        }
        Ok(files)
    }

    /// Replace the logged-in owner's ledger with an imported one
    pub fn import(&mut self, name: &str, format: ExportFormat) -> WalletResult<PathBuf> {
        let actor = self.require_login()?;
        let (ledger, path) = import_ledger(name, format, &self.paths.exports_dir())?;
        let count = ledger.operations().len();

        self.current_owner_mut()?.replace_ledger(ledger);
        info!(format = %format, path = %path.display(), operations = count, "ledger imported");

        self.audit_or_warn(&AuditEntry::import(&actor, &path, &format.to_string()));
        self.notice(format!(
            "Imported {} operations from {}",
            count,
            path.display()
        ));
        self.persist();
        Ok(path)
    }

    // --- demo -------------------------------------------------------------

    /// Load a sample month of income, spending and budgets
    pub fn load_demo(&mut self) -> WalletResult<()> {
        self.require_login()?;

        self.add_income(20000.0, "Salary", "First half of the month")?;
        self.add_income(40000.0, "Salary", "Second half of the month")?;
        self.add_income(3000.0, "Bonus", "Quarterly bonus")?;
        self.add_expense(300.0, "Food", "Lunch")?;
        self.add_expense(500.0, "Food", "Groceries")?;
        self.add_expense(3000.0, "Entertainment", "Concert")?;
        self.add_expense(3000.0, "Utilities", "Rent")?;
        self.add_expense(1500.0, "Taxi", "Airport ride")?;
        self.set_budget("Food", 4000.0)?;
        self.set_budget("Entertainment", 3000.0)?;
        self.set_budget("Utilities", 2500.0)?;
        Ok(())
    }
}

/// The miscellaneous category, re-created if the owner removed it
fn misc_category(ledger: &mut Ledger) -> Category {
    let name = DefaultCategory::Other.name();
    if let Some(existing) = ledger.get_category(name) {
        return existing.clone();
    }
    let category = DefaultCategory::Other.to_category();
    ledger.add_category(category.clone());
    category
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::HashParams;
    use crate::ledger::Notification;
    use tempfile::TempDir;

    fn cheap_settings() -> Settings {
        let mut settings = Settings::default();
        settings.password_hashing = HashParams {
            memory_cost: 64,
            time_cost: 1,
            parallelism: 1,
        };
        settings
    }

    fn manager_in(dir: &TempDir) -> FinanceManager {
        let paths = WalletPaths::with_base_dir(dir.path().to_path_buf());
        FinanceManager::with_settings(paths, cheap_settings()).unwrap()
    }

    fn logged_in(dir: &TempDir, login: &str) -> FinanceManager {
        let mut manager = manager_in(dir);
        manager.register(login, "1234").unwrap();
        manager.login(login, "1234").unwrap();
        manager.drain_notices();
        manager
    }

    /// alice with 10,000 on her balance, bob registered with nothing
    fn two_owners(dir: &TempDir) -> FinanceManager {
        let mut manager = manager_in(dir);
        manager.register("alice", "1234").unwrap();
        manager.register("bob", "5678").unwrap();
        manager.login("alice", "1234").unwrap();
        manager.add_income(10000.0, "Salary", "").unwrap();
        manager.drain_notices();
        manager
    }

    #[test]
    fn test_register_and_login() {
        let dir = TempDir::new().unwrap();
        let mut manager = manager_in(&dir);

        manager.register("alice", "1234").unwrap();
        assert!(!manager.is_authenticated());
        assert!(dir.path().join("users_data.dat").exists());

        manager.login("alice", "1234").unwrap();
        assert_eq!(manager.current_login(), Some("alice"));
        assert!(manager
            .drain_notices()
            .iter()
            .any(|n| n.contains("Welcome, alice")));
    }

    #[test]
    fn test_register_errors_in_order() {
        let dir = TempDir::new().unwrap();
        let mut manager = manager_in(&dir);
        manager.register("alice", "1234").unwrap();

        // duplicate is reported before the policy
        assert!(matches!(
            manager.register("alice", "1"),
            Err(WalletError::DuplicateUser(_))
        ));
        assert!(matches!(
            manager.register("al", "1234"),
            Err(WalletError::CredentialsInvalid(_))
        ));
        assert!(matches!(
            manager.register("bob", "12"),
            Err(WalletError::CredentialsInvalid(_))
        ));
        assert_eq!(manager.owner_count(), 1);
    }

    #[test]
    fn test_login_errors() {
        let dir = TempDir::new().unwrap();
        let mut manager = manager_in(&dir);
        manager.register("alice", "1234").unwrap();

        assert!(matches!(
            manager.login("bob", "1234"),
            Err(WalletError::UserNotFound(_))
        ));
        assert!(matches!(
            manager.login("alice", "9999"),
            Err(WalletError::CredentialsInvalid(_))
        ));
        // logins are case-sensitive
        assert!(matches!(
            manager.login("Alice", "1234"),
            Err(WalletError::UserNotFound(_))
        ));
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_operations_require_login() {
        let dir = TempDir::new().unwrap();
        let mut manager = manager_in(&dir);

        assert!(matches!(
            manager.add_income(10.0, "Salary", ""),
            Err(WalletError::Unauthenticated)
        ));
        assert!(matches!(manager.ledger(), Err(WalletError::Unauthenticated)));
        assert!(matches!(
            manager.transfer("bob", 1.0, ""),
            Err(WalletError::Unauthenticated)
        ));
        assert!(matches!(
            manager.export("x", ExportFormat::Json),
            Err(WalletError::Unauthenticated)
        ));
    }

    #[test]
    fn test_logout() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");
        manager.logout();
        assert!(!manager.is_authenticated());
        assert!(manager.drain_notices()[0].contains("Goodbye"));

        manager.logout();
        assert!(manager.drain_notices().is_empty());
    }

    #[test]
    fn test_unknown_category_is_created() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");

        manager.add_income(500.0, "Freelance", "Logo").unwrap();
        let notices = manager.drain_notices();
        assert_eq!(notices[0], "Category 'Freelance' created.");
        assert!(notices[1].starts_with("Income of 500.0"));
        assert!(manager.ledger().unwrap().has_category("freelance"));
    }

    #[test]
    fn test_invalid_amount_does_not_create_category() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");

        assert!(matches!(
            manager.add_expense(-5.0, "Nowhere", ""),
            Err(WalletError::InvalidArgument(_))
        ));
        assert!(!manager.ledger().unwrap().has_category("Nowhere"));
    }

    #[test]
    fn test_demo_scenario() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");
        manager.load_demo().unwrap();

        let ledger = manager.ledger().unwrap();
        assert!((ledger.total_income() - 63000.0).abs() < 0.01);
        assert!((ledger.total_expense() - 8300.0).abs() < 0.01);
        assert!((ledger.budget("Food").unwrap().remaining() - 3200.0).abs() < 0.01);
        assert!((ledger.budget("Utilities").unwrap().remaining() + 500.0).abs() < 0.01);
    }

    #[test]
    fn test_budget_commands() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");

        assert!(matches!(
            manager.set_budget("Food", -1.0),
            Err(WalletError::InvalidArgument(_))
        ));
        assert!(matches!(
            manager.set_budget("Food", f64::NAN),
            Err(WalletError::InvalidArgument(_))
        ));
        assert!(matches!(
            manager.edit_budget("Food", 10.0),
            Err(WalletError::BudgetNotFound(_))
        ));
        assert!(matches!(
            manager.remove_budget("Food"),
            Err(WalletError::BudgetNotFound(_))
        ));

        manager.set_budget("Food", 1000.0).unwrap();
        manager.add_expense(850.0, "Food", "").unwrap();
        let notices = manager.drain_notices();
        let near = Notification::BudgetNearLimit {
            category: "Food".into(),
            spent: 850.0,
            limit: 1000.0,
            percentage: 85.0,
        }
        .to_string();
        assert!(notices.contains(&near));
        assert!(!notices.iter().any(|n| n.contains("exceeded")));

        manager.edit_budget("food", 2000.0).unwrap();
        assert_eq!(manager.ledger().unwrap().budget("Food").unwrap().spent(), 850.0);
        manager.remove_budget("FOOD").unwrap();
        assert!(!manager.ledger().unwrap().has_budget("Food"));
    }

    #[test]
    fn test_set_budget_on_new_category() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");

        manager.set_budget("Travel", 500.0).unwrap();
        let notices = manager.drain_notices();
        assert_eq!(notices[0], "Category 'Travel' created.");
        assert!(manager.ledger().unwrap().has_budget("travel"));
    }

    #[test]
    fn test_add_category() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");

        manager.add_category("Education", "Courses").unwrap();
        assert!(matches!(
            manager.add_category("education", ""),
            Err(WalletError::CategoryAlreadyExists(_))
        ));
        assert!(matches!(
            manager.add_category("  ", ""),
            Err(WalletError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rename_category() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");
        manager.load_demo().unwrap();
        let before = manager.ledger().unwrap().expense_by_category("Food");

        manager.rename_category("Food", "Groceries", None).unwrap();

        let ledger = manager.ledger().unwrap();
        assert!(!ledger.has_category("Food"));
        assert!(ledger.has_category("Groceries"));
        assert_eq!(
            ledger.get_category("Groceries").unwrap().description(),
            DefaultCategory::Food.description()
        );
        assert!((ledger.expense_by_category("Groceries") - before).abs() < 0.01);
        assert_eq!(ledger.expense_by_category("Food"), 0.0);

        let budget = ledger.budget("groceries").unwrap();
        assert_eq!(budget.limit(), 4000.0);
        assert!((budget.spent() - 800.0).abs() < 0.01);
        assert!(!ledger.has_budget("Food"));
    }

    #[test]
    fn test_rename_category_errors() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");

        assert!(matches!(
            manager.rename_category("Nothing", "Else", None),
            Err(WalletError::CategoryNotFound(_))
        ));
        assert!(matches!(
            manager.rename_category("Food", "taxi", None),
            Err(WalletError::CategoryAlreadyExists(_))
        ));
        assert!(manager.ledger().unwrap().has_category("Food"));
    }

    #[test]
    fn test_rename_case_only_updates_description() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");
        manager.add_expense(50.0, "Food", "").unwrap();

        manager
            .rename_category("Food", "FOOD", Some("Only healthy food"))
            .unwrap();

        let ledger = manager.ledger().unwrap();
        let food = ledger.get_category("food").unwrap();
        assert_eq!(food.name(), "Food");
        assert_eq!(food.description(), "Only healthy food");
        assert_eq!(
            ledger.operations()[0].category().description(),
            "Only healthy food"
        );
    }

    #[test]
    fn test_transfer_moves_money() {
        let dir = TempDir::new().unwrap();
        let mut manager = two_owners(&dir);

        let record = manager.transfer("bob", 2500.0, "Rent share").unwrap();
        assert_eq!(record.from, "alice");
        assert_eq!(record.to, "bob");

        let alice = manager.ledger().unwrap();
        assert!((alice.balance() - 7500.0).abs() < 0.01);
        let debit = alice.operations().last().unwrap();
        assert!(debit.is_expense());
        assert_eq!(debit.category().name(), "Other");
        assert_eq!(debit.description(), "Transfer to bob: Rent share");

        manager.logout();
        manager.login("bob", "5678").unwrap();
        let bob = manager.ledger().unwrap();
        assert!((bob.balance() - 2500.0).abs() < 0.01);
        assert_eq!(
            bob.operations()[0].description(),
            "Transfer from alice: Rent share"
        );
    }

    #[test]
    fn test_transfer_conserves_total() {
        let dir = TempDir::new().unwrap();
        let mut manager = two_owners(&dir);
        let total_before: f64 = manager.registry.values().map(|o| o.ledger().balance()).sum();

        manager.transfer("bob", 1234.5, "").unwrap();

        let total_after: f64 = manager.registry.values().map(|o| o.ledger().balance()).sum();
        assert!((total_before - total_after).abs() < 0.01);
        assert!((manager.registry["bob"].ledger().balance() - 1234.5).abs() < 0.01);
    }

    #[test]
    fn test_transfer_errors() {
        let dir = TempDir::new().unwrap();
        let mut manager = two_owners(&dir);

        assert!(matches!(
            manager.transfer("alice", 10.0, ""),
            Err(WalletError::SelfTransfer)
        ));
        assert!(matches!(
            manager.transfer("carol", 10.0, ""),
            Err(WalletError::RecipientNotFound(_))
        ));
        assert!(matches!(
            manager.transfer("bob", 0.0, ""),
            Err(WalletError::InvalidArgument(_))
        ));
        assert!(matches!(
            manager.transfer("bob", 50000.0, ""),
            Err(WalletError::InsufficientFunds { .. })
        ));

        assert!((manager.registry["alice"].ledger().balance() - 10000.0).abs() < 0.01);
        assert_eq!(manager.registry["bob"].ledger().balance(), 0.0);
        assert_eq!(manager.registry["bob"].ledger().operations().len(), 0);
    }

    #[test]
    fn test_transfer_recreates_misc_category() {
        let dir = TempDir::new().unwrap();
        let mut manager = two_owners(&dir);
        manager
            .registry
            .get_mut("bob")
            .unwrap()
            .ledger_mut()
            .remove_category("Other");

        manager.transfer("bob", 100.0, "").unwrap();
        assert!(manager.registry["bob"].ledger().has_category("Other"));
        assert_eq!(
            manager.registry["bob"].ledger().operations()[0].description(),
            "Transfer from alice"
        );
    }

    #[test]
    fn test_transfer_history_from_audit() {
        let dir = TempDir::new().unwrap();
        let mut manager = two_owners(&dir);
        manager.transfer("bob", 100.0, "one").unwrap();
        manager.transfer("bob", 200.0, "two").unwrap();

        let history = manager.transfer_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].description, "two");
    }

    #[test]
    fn test_export_import_json() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");
        manager.load_demo().unwrap();

        let files = manager.export("backup", ExportFormat::Json).unwrap();
        assert_eq!(files, vec![dir.path().join("exports").join("backup.json")]);

        manager.add_expense(100.0, "Taxi", "").unwrap();
        manager.import("backup", ExportFormat::Json).unwrap();

        let ledger = manager.ledger().unwrap();
        assert_eq!(ledger.operations().len(), 8);
        assert!((ledger.balance() - 54700.0).abs() < 0.01);
    }

    #[test]
    fn test_import_csv_rejected() {
        let dir = TempDir::new().unwrap();
        let mut manager = logged_in(&dir, "alice");
        manager.export("report", ExportFormat::Csv).unwrap();

        assert!(matches!(
            manager.import("report", ExportFormat::Csv),
            Err(WalletError::InvalidArgument(_))
        ));
        assert!(matches!(
            manager.import("missing", ExportFormat::Json),
            Err(WalletError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut manager = logged_in(&dir, "alice");
            manager.add_income(750.0, "Salary", "").unwrap();
        }

        let mut manager = manager_in(&dir);
        manager.login("alice", "1234").unwrap();
        assert!((manager.ledger().unwrap().balance() - 750.0).abs() < 0.01);
    }

    #[test]
    fn test_without_autosave_saves_on_logout() {
        let dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(dir.path().to_path_buf());
        let mut settings = cheap_settings();
        settings.autosave = false;
        let mut manager = FinanceManager::with_settings(paths.clone(), settings.clone()).unwrap();
        manager.register("alice", "1234").unwrap();
        manager.login("alice", "1234").unwrap();
        manager.add_income(300.0, "Salary", "").unwrap();

        let reopened = FinanceManager::with_settings(paths.clone(), settings.clone()).unwrap();
        assert_eq!(reopened.registry["alice"].ledger().balance(), 0.0);

        manager.logout();
        let reopened = FinanceManager::with_settings(paths, settings).unwrap();
        assert_eq!(reopened.registry["alice"].ledger().balance(), 300.0);
    }

    #[test]
    fn test_recipient_notices_wait_for_login() {
        let dir = TempDir::new().unwrap();
        let mut manager = manager_in(&dir);
        manager.register("alice", "1234").unwrap();
        manager.register("bob", "5678").unwrap();
        manager.login("bob", "5678").unwrap();
        manager.add_expense(500.0, "Food", "").unwrap();
        manager.logout();
        manager.login("alice", "1234").unwrap();
        manager.add_income(1000.0, "Salary", "").unwrap();
        manager.drain_notices();

        manager.transfer("bob", 100.0, "").unwrap();
        assert!(!manager.drain_notices().iter().any(|n| n.contains("-400.0")));
        assert!(!manager.registry["bob"]
            .ledger()
            .pending_notifications()
            .is_empty());

        manager.transfer("bob", 50.0, "").unwrap();
        manager.logout();
        manager.drain_notices();

        manager.login("bob", "5678").unwrap();
        let notices = manager.drain_notices();
        assert_eq!(notices[0], "Welcome, bob!");
        let count = |needle: &str| notices.iter().filter(|n| n.contains(needle)).count();
        assert_eq!(count("negative balance"), 1);
        assert_eq!(count("Current balance: -350.0"), 1);
        assert_eq!(count("expenses are"), 1);
        assert_eq!(count("below 10% of total income"), 1);
        assert_eq!(notices.len(), 4);
        assert!(manager.ledger().unwrap().pending_notifications().is_empty());
    }
}
