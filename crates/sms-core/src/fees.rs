//! Fee and payment status derivation.
//!
//! Amounts are plain `f64` values; callers are responsible for decrypting
//! stored amounts before handing them to these functions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment status of a fee record.
///
/// `Pending`, `Partial` and `Paid` are stored; `Overdue` is derived at read
/// time from the due date and is never written back to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Partial => "Partial",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
        }
    }

    /// Parse a stored status string. Unknown values map to `Pending` so a
    /// corrupted row degrades to "nothing collected" rather than "settled".
    pub fn parse(s: &str) -> Self {
        match s {
            "Partial" => Self::Partial,
            "Paid" => Self::Paid,
            "Overdue" => Self::Overdue,
            _ => Self::Pending,
        }
    }

    pub const fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

/// Amount still owed on a fee record: `total - paid + fine`.
pub fn calculate_amount_due(total: f64, paid: f64, fine: f64) -> f64 {
    total - paid + fine
}

/// Derive the stored payment status from the amounts on the record.
///
/// The fine counts toward what must be settled, so a record is `Paid` only
/// once payments cover the total plus any accrued fine.
pub fn derive_payment_status(total: f64, fine: f64, paid: f64) -> PaymentStatus {
    if paid >= total + fine {
        PaymentStatus::Paid
    } else if paid > 0.0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}

/// A fee is overdue iff today is strictly past the due date and the record is
/// not settled.
pub fn is_overdue(due_date: NaiveDate, today: NaiveDate, status: PaymentStatus) -> bool {
    today > due_date && !status.is_paid()
}

/// Days past the due date; zero when not overdue.
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate, status: PaymentStatus) -> i64 {
    if is_overdue(due_date, today, status) {
        (today - due_date).num_days()
    } else {
        0
    }
}

/// Fraction of the outstanding amount a late fee may never exceed.
pub const MAX_LATE_FEE_FRACTION: f64 = 0.25;

/// Late fee accrued on an outstanding amount.
///
/// Linear in days overdue (`outstanding * daily_rate * days`), capped at
/// [`MAX_LATE_FEE_FRACTION`] of the outstanding amount. Recomputing from the
/// current days-overdue count keeps the operation idempotent.
pub fn late_fee(outstanding: f64, days_overdue: i64, daily_rate: f64) -> f64 {
    if outstanding <= 0.0 || days_overdue <= 0 {
        return 0.0;
    }
    let accrued = outstanding * daily_rate * days_overdue as f64;
    accrued.min(outstanding * MAX_LATE_FEE_FRACTION)
}
