//! Royal lending: loans credited to the treasury and their repayment.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::{Economy, KingdomError, Notice, Outcome, Severity};

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Bank {
    loan_amount: f64,
    interest_rate: f64,
    is_corrupt: bool,
    security_level: i32,
    audit_cost: i32,
}

impl Default for Bank {
    fn default() -> Self {
        Self {
            loan_amount: 0.0,
            interest_rate: 0.1,
            is_corrupt: false,
            security_level: 1,
            audit_cost: 100,
        }
    }
}

impl Bank {
    pub fn loan_amount(&self) -> f64 {
        self.loan_amount
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn is_corrupt(&self) -> bool {
        self.is_corrupt
    }

    pub fn security_level(&self) -> i32 {
        self.security_level
    }

    pub fn audit_cost(&self) -> i32 {
        self.audit_cost
    }

    /// A loan larger than the treasury's headroom is still owed in full.
    pub fn take_loan(&mut self, amount: f64, economy: &mut Economy) -> Outcome {
        if !amount.is_finite() {
            return Err(KingdomError::NonFiniteAmount {
                what: "loan amount",
            });
        }
        if amount <= 0.0 {
            return Err(KingdomError::NonPositiveAmount {
                what: "loan amount",
            });
        }
        let credit = economy.spend_gold(-amount)?;
        self.loan_amount += amount;
        Ok(Notice::success(format!(
            "Loan of {amount:.2} gold taken. Total debt: {:.2} gold.",
            self.loan_amount
        ))
        .clamped(credit.severity == Severity::Warning))
    }

    /// Repayments above the outstanding debt are trimmed to the debt.
    pub fn repay_loan(&mut self, amount: f64, economy: &mut Economy) -> Outcome {
        if !amount.is_finite() {
            return Err(KingdomError::NonFiniteAmount {
                what: "repayment amount",
            });
        }
        if amount <= 0.0 {
            return Err(KingdomError::NonPositiveAmount {
                what: "repayment amount",
            });
        }
        let amount = amount.min(self.loan_amount);
        economy.spend_gold(amount)?;
        self.loan_amount -= amount;
        Ok(Notice::success(format!(
            "Repaid {amount:.2} gold. Remaining debt: {:.2} gold.",
            self.loan_amount
        )))
    }

    pub(crate) fn restore_loan(&mut self, loan_amount: f64) {
        self.loan_amount = loan_amount.max(0.0);
    }
}
