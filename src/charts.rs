// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Plain-text charts for the dashboard.

use crate::aggregate::Aggregate;
use crate::utils::fmt_amount;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const PIE_WIDTH: usize = 30;
const BAR_WIDTH: usize = 40;

fn bar(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    let ratio = (value / max).to_f64().unwrap_or(0.0);
    ((ratio * width as f64).round() as usize).min(width)
}

/// Income vs expense share.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub income: Decimal,
    pub expense: Decimal,
}

impl PieChart {
    /// Percentage shares, `(0, 0)` when there is nothing to show.
    pub fn shares(&self) -> (Decimal, Decimal) {
        let income = self.income.max(Decimal::ZERO);
        let expense = self.expense.max(Decimal::ZERO);
        let total = income + expense;
        if total.is_zero() {
            return (Decimal::ZERO, Decimal::ZERO);
        }
        let hundred = Decimal::ONE_HUNDRED;
        (income * hundred / total, expense * hundred / total)
    }
}

impl fmt::Display for PieChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Income vs Expense")?;
        let (inc_pct, exp_pct) = self.shares();
        for (label, value, pct) in [
            ("Income", self.income, inc_pct),
            ("Expense", self.expense, exp_pct),
        ] {
            let filled = bar(pct, Decimal::ONE_HUNDRED, PIE_WIDTH);
            writeln!(
                f,
                "  {:<8} {}{} {:>6.1}%  {}",
                label,
                "█".repeat(filled),
                "░".repeat(PIE_WIDTH - filled),
                pct.round_dp(1),
                fmt_amount(value)
            )?;
        }
        Ok(())
    }
}

/// Monthly income vs expense, January first.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub income: [Decimal; 12],
    pub expense: [Decimal; 12],
}

impl BarChart {
    fn max(&self) -> Decimal {
        self.income
            .iter()
            .chain(self.expense.iter())
            .copied()
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Monthly Income vs Expense")?;
        let max = self.max();
        for (i, month) in MONTHS.iter().enumerate() {
            writeln!(
                f,
                "  {} + {:<width$} {}",
                month,
                "▇".repeat(bar(self.income[i], max, BAR_WIDTH)),
                fmt_amount(self.income[i]),
                width = BAR_WIDTH
            )?;
            writeln!(
                f,
                "      - {:<width$} {}",
                "▒".repeat(bar(self.expense[i], max, BAR_WIDTH)),
                fmt_amount(self.expense[i]),
                width = BAR_WIDTH
            )?;
        }
        Ok(())
    }
}

/// The two charts drawn for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub pie: PieChart,
    pub bar: BarChart,
}

impl ChartSet {
    pub fn draw(agg: &Aggregate) -> Self {
        Self {
            pie: PieChart {
                income: agg.total_income,
                expense: agg.total_expense,
            },
            bar: BarChart {
                income: agg.income_by_month,
                expense: agg.expense_by_month,
            },
        }
    }
}

impl fmt::Display for ChartSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.pie, self.bar)
    }
}
