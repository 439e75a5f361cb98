// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::parse_tx_date;
use crate::models::{Transaction, TxType};
use chrono::{DateTime, Datelike, Local};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Index 0 is January.
    pub income_by_month: [Decimal; 12],
    pub expense_by_month: [Decimal; 12],
}

impl Default for Aggregate {
    fn default() -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            income_by_month: [Decimal::ZERO; 12],
            expense_by_month: [Decimal::ZERO; 12],
        }
    }
}

impl Aggregate {
    pub fn net(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

/// Sums the filtered list by type and local month of year. Values stay
/// unrounded; rounding happens only at display time.
pub fn aggregate(filtered: &[Transaction], now: DateTime<Local>) -> Aggregate {
    let mut agg = Aggregate::default();
    for tx in filtered {
        let month = parse_tx_date(&tx.date, now).month0() as usize;
        match tx.r#type {
            TxType::Income => {
                agg.total_income += tx.amount;
                agg.income_by_month[month] += tx.amount;
            }
            TxType::Expense => {
                agg.total_expense += tx.amount;
                agg.expense_by_month[month] += tx.amount;
            }
            TxType::Other(_) => {}
        }
    }
    agg
}
