//! Operation and transfer listings

use super::layout::banner;
use crate::ledger::Ledger;
use crate::models::{DateRange, Operation, Transfer};

/// Operations newest first, optionally restricted to a range and a category
pub fn format_operations(
    ledger: &Ledger,
    range: Option<&DateRange>,
    category: Option<&str>,
) -> String {
    let mut selected: Vec<&Operation> = ledger
        .operations()
        .iter()
        .filter(|op| range.map_or(true, |r| r.contains(op.date())))
        .filter(|op| category.map_or(true, |c| op.category().matches(c)))
        .collect();
    // newest append first inside one timestamp; the sort is stable
    selected.reverse();
    selected.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

    let mut out = banner("OPERATIONS");
    if selected.is_empty() {
        out.push_str("No operations found.\n");
    }
    for op in &selected {
        out.push_str(&format!("{}\n", op));
    }
    out.push_str(&format!("Total operations: {}\n", selected.len()));
    out
}

pub fn format_transfers(transfers: &[Transfer]) -> String {
    let mut out = banner("TRANSFERS");
    if transfers.is_empty() {
        out.push_str("No transfers yet.\n");
        return out;
    }
    for transfer in transfers {
        out.push_str(&format!("{}\n", transfer));
    }
    out
}
