use chrono::{Duration, Months, NaiveDate};

use crate::domain::models::payment_plan::{InstallmentFrequency, PlanStatus};

/// Next due date one cadence step after `date`. Calendar-month arithmetic
/// clamps the day-of-month to shorter months (Jan 31 + 1 month = Feb 28/29).
pub fn advance(date: NaiveDate, frequency: InstallmentFrequency) -> NaiveDate {
    match frequency {
        InstallmentFrequency::Weekly => date + Duration::days(7),
        InstallmentFrequency::Biweekly => date + Duration::days(14),
        InstallmentFrequency::Monthly => date.checked_add_months(Months::new(1)).unwrap_or(date),
        InstallmentFrequency::Quarterly => date.checked_add_months(Months::new(3)).unwrap_or(date),
    }
}

/// Plan state after an installment has been applied. A balance of zero or
/// below completes the plan and clears the due date; overpayment is accepted
/// without credit-forward.
pub fn settle(
    total_amount_cents: i64,
    amount_paid_cents: i64,
    frequency: InstallmentFrequency,
    paid_on: NaiveDate,
) -> (PlanStatus, Option<NaiveDate>) {
    let balance = total_amount_cents - amount_paid_cents;
    if balance <= 0 {
        (PlanStatus::Completed, None)
    } else {
        (PlanStatus::Active, Some(advance(paid_on, frequency)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_advance_weekly_and_biweekly() {
        assert_eq!(advance(d(2025, 1, 1), InstallmentFrequency::Weekly), d(2025, 1, 8));
        assert_eq!(advance(d(2025, 1, 1), InstallmentFrequency::Biweekly), d(2025, 1, 15));
        assert_eq!(advance(d(2025, 12, 29), InstallmentFrequency::Weekly), d(2026, 1, 5));
    }

    #[test]
    fn test_advance_monthly_preserves_day() {
        assert_eq!(advance(d(2025, 1, 1), InstallmentFrequency::Monthly), d(2025, 2, 1));
        assert_eq!(advance(d(2025, 4, 15), InstallmentFrequency::Monthly), d(2025, 5, 15));
        assert_eq!(advance(d(2025, 12, 10), InstallmentFrequency::Monthly), d(2026, 1, 10));
    }

    #[test]
    fn test_advance_monthly_clamps_short_months() {
        assert_eq!(advance(d(2025, 1, 31), InstallmentFrequency::Monthly), d(2025, 2, 28));
        assert_eq!(advance(d(2024, 1, 31), InstallmentFrequency::Monthly), d(2024, 2, 29));
        assert_eq!(advance(d(2025, 3, 31), InstallmentFrequency::Monthly), d(2025, 4, 30));
    }

    #[test]
    fn test_advance_quarterly() {
        assert_eq!(advance(d(2025, 1, 1), InstallmentFrequency::Quarterly), d(2025, 4, 1));
        assert_eq!(advance(d(2025, 11, 30), InstallmentFrequency::Quarterly), d(2026, 2, 28));
    }

    #[test]
    fn test_settle_keeps_plan_active_with_balance() {
        let (status, next_due) = settle(30000, 5000, InstallmentFrequency::Monthly, d(2025, 2, 1));
        assert_eq!(status, PlanStatus::Active);
        assert_eq!(next_due, Some(d(2025, 3, 1)));
    }

    #[test]
    fn test_settle_completes_on_zero_balance() {
        let (status, next_due) = settle(30000, 30000, InstallmentFrequency::Monthly, d(2025, 6, 1));
        assert_eq!(status, PlanStatus::Completed);
        assert_eq!(next_due, None);
    }

    #[test]
    fn test_settle_accepts_overpayment() {
        let (status, next_due) = settle(4000, 5000, InstallmentFrequency::Weekly, d(2025, 6, 1));
        assert_eq!(status, PlanStatus::Completed);
        assert_eq!(next_due, None);
    }
}
