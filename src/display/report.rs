//! Report renderers
//!
//! Each function returns the finished text; the shell decides where it goes.

use std::collections::BTreeMap;
use super::layout::{banner, double_separator, format_bar, separator, truncate, REPORT_WIDTH};
use crate::ledger::Ledger;
use crate::models::{category_key, format_amount, Budget, DateRange, OperationKind};

/// Budgets the summary lists first, in this order
pub const SUMMARY_PRIORITY: [&str; 3] = ["Utilities", "Food", "Entertainment"];

/// Expense ratio above which the detailed report warns
const HIGH_RATIO_WARNING: f64 = 80.0;
/// Expense ratio below which the detailed report praises savings
const GOOD_RATIO: f64 = 50.0;

/// Descending by amount, ties alphabetical
fn sorted_desc(grouped: BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = grouped.into_iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

fn budget_line(budget: &Budget) -> String {
    format!(
        "  {:<20} limit {:>12}  spent {:>12}  remaining {:>12}  [{}]",
        truncate(budget.category().name(), 20),
        format_amount(budget.limit()),
        format_amount(budget.spent()),
        format_amount(budget.remaining()),
        budget.status()
    )
}

fn amount_lines(out: &mut String, entries: &[(String, f64)]) {
    if entries.is_empty() {
        out.push_str("  (none)\n");
    }
    for (name, amount) in entries {
        out.push_str(&format!(
            "  {:<20} {:>15}\n",
            truncate(name, 20),
            format_amount(*amount)
        ));
    }
}

fn expense_ratio(ledger: &Ledger) -> f64 {
    let income = ledger.total_income();
    if income > 0.0 {
        ledger.total_expense() / income * 100.0
    } else {
        0.0
    }
}

pub fn format_balance(ledger: &Ledger) -> String {
    format!(
        "Balance: {}\nTotal income: {}\nTotal expense: {}\n",
        format_amount(ledger.balance()),
        format_amount(ledger.total_income()),
        format_amount(ledger.total_expense())
    )
}

/// Totals, grouped income and expense and all budgets
///
/// With a range, the totals and grouped figures cover only that range.
pub fn format_statistics(ledger: &Ledger, range: Option<&DateRange>) -> String {
    let mut out = match range {
        Some(range) => banner(&format!("STATISTICS {}", range)),
        None => banner("STATISTICS"),
    };

    let (income, expense, income_grouped, expense_grouped) = match range {
        Some(range) => (
            ledger.total_income_in(range),
            ledger.total_expense_in(range),
            ledger.grouped_in(OperationKind::Income, range),
            ledger.grouped_in(OperationKind::Expense, range),
        ),
        None => (
            ledger.total_income(),
            ledger.total_expense(),
            ledger.income_grouped(),
            ledger.expense_grouped(),
        ),
    };

    out.push_str(&format!("Total income: {}\n", format_amount(income)));
    out.push_str(&format!("Total expense: {}\n", format_amount(expense)));

    out.push_str("\nIncome by category:\n");
    amount_lines(&mut out, &sorted_desc(income_grouped));
    out.push_str("\nExpense by category:\n");
    amount_lines(&mut out, &sorted_desc(expense_grouped));

    out.push_str("\nBudgets:\n");
    let mut any = false;
    for budget in ledger.budgets() {
        any = true;
        out.push_str(&budget_line(budget));
        out.push('\n');
    }
    if !any {
        out.push_str("  (none)\n");
    }
    out
}

/// Income and expense for the named categories only
///
/// With a range, the income and expense figures cover only that range.
pub fn format_category_stats(
    ledger: &Ledger,
    names: &[String],
    range: Option<&DateRange>,
) -> String {
    let mut out = match range {
        Some(range) => banner(&format!("CATEGORY STATISTICS {}", range)),
        None => banner("CATEGORY STATISTICS"),
    };
    for name in names {
        match ledger.get_category(name) {
            Some(category) => {
                out.push_str(&format!(
                    "{}: income {}, expense {}\n",
                    category.name(),
                    format_amount(ledger.category_total(OperationKind::Income, name, range)),
                    format_amount(ledger.category_total(OperationKind::Expense, name, range))
                ));
                if let Some(budget) = ledger.budget(name) {
                    out.push_str(&budget_line(budget));
                    out.push('\n');
                }
            }
            None => {
                out.push_str(&format!("Category '{}' not found\n", name));
            }
        }
    }
    out
}

/// Every budget alphabetically, with status and a usage bar
pub fn format_budgets(ledger: &Ledger) -> String {
    let mut out = banner("BUDGETS");
    let mut any = false;
    for budget in ledger.budgets() {
        any = true;
        out.push_str(&budget_line(budget));
        out.push_str(&format!(
            "  {} {:.0}%\n",
            format_bar(budget.usage_percentage(), 100.0, 10),
            budget.usage_percentage()
        ));
    }
    if !any {
        out.push_str("No budgets set.\n");
    }
    out
}

/// Totals, top expense categories, budgets by usage and the expense ratio
pub fn format_detailed_report(ledger: &Ledger, top_n: usize) -> String {
    let mut out = banner("DETAILED REPORT");

    out.push_str("\nOverview:\n");
    out.push_str(&format!("  Balance: {}\n", format_amount(ledger.balance())));
    out.push_str(&format!("  Total income: {}\n", format_amount(ledger.total_income())));
    out.push_str(&format!("  Total expense: {}\n", format_amount(ledger.total_expense())));
    out.push_str(&format!("  Operations: {}\n", ledger.operations().len()));

    let expenses = sorted_desc(ledger.expense_grouped());
    if !expenses.is_empty() {
        out.push_str(&format!("\nTop {} expense categories:\n", top_n));
        let top: Vec<(String, f64)> = expenses.into_iter().take(top_n).collect();
        amount_lines(&mut out, &top);
    }

    let mut budgets: Vec<&Budget> = ledger.budgets().collect();
    if !budgets.is_empty() {
        budgets.sort_by(|a, b| b.usage_percentage().total_cmp(&a.usage_percentage()));
        out.push_str("\nBudget status:\n");
        for budget in budgets {
            out.push_str(&format!(
                "  {:<20} {:>6.0}% {}\n",
                truncate(budget.category().name(), 20),
                budget.usage_percentage(),
                budget.status()
            ));
        }
    }

    let ratio = expense_ratio(ledger);
    out.push_str(&separator(REPORT_WIDTH));
    out.push_str("\nFinancial health:\n");
    out.push_str(&format!("  Expense to income ratio: {:.1}%\n", ratio));
    if ratio > HIGH_RATIO_WARNING {
        out.push_str("  Warning: expenses exceed 80% of income\n");
    } else if ratio < GOOD_RATIO {
        out.push_str("  Good savings level\n");
    }
    out.push_str(&double_separator(REPORT_WIDTH));
    out.push('\n');
    out
}

/// Income, expense and budgets in a fixed, readable order
///
/// Budgets named in [`SUMMARY_PRIORITY`] come first in that order, then the
/// rest alphabetically by key.
pub fn format_summary(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total income: {}\n", format_amount(ledger.total_income())));

    let income = sorted_desc(ledger.income_grouped());
    if !income.is_empty() {
        out.push_str("Income by category:\n");
        for (name, amount) in &income {
            out.push_str(&format!("{}: {}\n", name, format_amount(*amount)));
        }
    }

    out.push_str(&format!("Total expense: {}\n", format_amount(ledger.total_expense())));

    let priority_keys: Vec<String> = SUMMARY_PRIORITY.iter().map(|n| category_key(n)).collect();
    let prioritized = SUMMARY_PRIORITY.iter().filter_map(|name| ledger.budget(name));
    let rest = ledger
        .budgets()
        .filter(|b| !priority_keys.contains(&b.category().key()));
    let ordered: Vec<&Budget> = prioritized.chain(rest).collect();

    if !ordered.is_empty() {
        out.push_str("Budget by category:\n");
        for budget in ordered {
            out.push_str(&format!(
                "{}: {}, remaining: {}\n",
                budget.category().name(),
                format_amount(budget.limit()),
                format_amount(budget.remaining())
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tests::{op_on, scenario_ledger};
    use crate::models::{Category, Operation};
    use chrono::NaiveDate;

    #[test]
    fn test_balance() {
        let text = format_balance(&scenario_ledger());
        assert_eq!(
            text,
            "Balance: 54,700.0\nTotal income: 63,000.0\nTotal expense: 8,300.0\n"
        );
    }

    #[test]
    fn test_summary_order_and_values() {
        let mut ledger = scenario_ledger();
        ledger.set_budget("Taxi", 2000.0).unwrap();
        let text = format_summary(&ledger);

        let expected = "\
Total income: 63,000.0
Income by category:
Salary: 60,000.0
Bonus: 3,000.0
Total expense: 8,300.0
Budget by category:
Utilities: 2,500.0, remaining: -500.0
Food: 4,000.0, remaining: 3,200.0
Entertainment: 3,000.0, remaining: 0.0
Taxi: 2,000.0, remaining: 500.0
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_summary_without_budgets() {
        let text = format_summary(&Ledger::new());
        assert_eq!(text, "Total income: 0.0\nTotal expense: 0.0\n");
    }

    #[test]
    fn test_statistics_sorted_and_labelled() {
        let text = format_statistics(&scenario_ledger(), None);
        let entertainment = text.find("Entertainment").unwrap();
        let food = text.find("  Food").unwrap();
        // 3000 (Entertainment, Utilities) before 1500 (Taxi) before 800 (Food)
        assert!(entertainment < text.find("Taxi").unwrap());
        assert!(text.find("Taxi").unwrap() < food);
        assert!(text.contains("[EXCEEDED]"));
        assert!(text.contains("[OK]"));
    }

    #[test]
    fn test_statistics_for_range() {
        let mut ledger = Ledger::new();
        let food = ledger.get_category("Food").unwrap().clone();
        for (day, amount) in [(1, 100.0), (15, 200.0)] {
            let ts = NaiveDate::from_ymd_opt(2023, 10, day)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap();
            ledger.append_operation(
                Operation::new(OperationKind::Expense, amount, Some(food.clone()), Some(ts), "")
                    .unwrap(),
            );
        }

        let range: DateRange = "10.10.2023-20.10.2023".parse().unwrap();
        let text = format_statistics(&ledger, Some(&range));
        assert!(text.contains("10.10.2023 - 20.10.2023"));
        assert!(text.contains("Total expense: 200.0"));
    }

    #[test]
    fn test_category_stats() {
        let text = format_category_stats(
            &scenario_ledger(),
            &["food".to_string(), "Pets".to_string()],
            None,
        );
        assert!(text.contains("Food: income 0.0, expense 800.0"));
        assert!(text.contains("Category 'Pets' not found"));
    }

    #[test]
    fn test_category_stats_in_period() {
        let mut ledger = Ledger::new();
        let food = ledger.get_category("Food").unwrap().clone();
        let salary = ledger.get_category("Salary").unwrap().clone();
        ledger.append_operation(op_on(OperationKind::Expense, 100.0, &food, (2023, 10, 1), ""));
        ledger.append_operation(op_on(OperationKind::Expense, 200.0, &food, (2023, 10, 15), ""));
        ledger.append_operation(op_on(OperationKind::Income, 900.0, &salary, (2023, 10, 15), ""));

        let range: DateRange = "10.10.2023-20.10.2023".parse().unwrap();
        let names = ["Food".to_string(), "Salary".to_string()];
        let text = format_category_stats(&ledger, &names, Some(&range));
        assert!(text.contains("CATEGORY STATISTICS 10.10.2023 - 20.10.2023"));
        assert!(text.contains("Food: income 0.0, expense 200.0"));
        assert!(text.contains("Salary: income 900.0, expense 0.0"));

        let text = format_category_stats(&ledger, &names, None);
        assert!(text.contains("Food: income 0.0, expense 300.0"));
    }

    #[test]
    fn test_budgets_listing() {
        assert!(format_budgets(&Ledger::new()).contains("No budgets set."));

        let text = format_budgets(&scenario_ledger());
        let positions: Vec<usize> = ["Entertainment", "Food", "Utilities"]
            .iter()
            .map(|n| text.find(n).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_detailed_report() {
        let text = format_detailed_report(&scenario_ledger(), 2);
        assert!(text.contains("Top 2 expense categories:"));
        assert!(text.contains("Operations: 8"));
        assert!(!text.contains("  Taxi "));
        // 8300 / 63000 is about 13%
        assert!(text.contains("Expense to income ratio: 13.2%"));
        assert!(text.contains("Good savings level"));

        let utilities = text.find("Utilities").unwrap();
        let food = text.rfind("Food").unwrap();
        assert!(utilities < food);
    }

    #[test]
    fn test_detailed_report_warns_on_high_ratio() {
        let mut ledger = Ledger::new();
        let salary = ledger.get_category("Salary").unwrap().clone();
        let custom = Category::new("Rent", "").unwrap();
        ledger.append_operation(Operation::income(1000.0, salary, "").unwrap());
        ledger.append_operation(Operation::expense(900.0, custom, "").unwrap());

        let text = format_detailed_report(&ledger, 5);
        assert!(text.contains("Warning: expenses exceed 80% of income"));
    }
}
