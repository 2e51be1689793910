//! Hourly booking price breakdown

use serde::Serialize;

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Price of a booking in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingBreakdown {
    pub hourly_rate: i64,
    pub hours: i64,
    pub subtotal: i64,
    pub cleaning_fee: i64,
    pub service_fee: i64,
    pub total: i64,
}

impl PricingBreakdown {
    /// `service_fee` is `service_fee_percent` of the hourly subtotal,
    /// rounded half up. The cleaning fee is not subject to the service fee.
    ///
    /// Fails with `Validation` when any amount leaves the `i64` range.
    pub fn compute(
        hourly_rate: i64,
        hours: i64,
        cleaning_fee: i64,
        service_fee_percent: u32,
    ) -> DomainResult<Self> {
        let out_of_range = || {
            DomainError::Validation(format!(
                "price of {} hours at {} per hour is out of range",
                hours, hourly_rate
            ))
        };

        let subtotal = hourly_rate.checked_mul(hours).ok_or_else(out_of_range)?;
        let service_fee = subtotal
            .checked_mul(i64::from(service_fee_percent))
            .and_then(|v| v.checked_add(50))
            .map(|v| v / 100)
            .ok_or_else(out_of_range)?;
        let total = subtotal
            .checked_add(cleaning_fee)
            .and_then(|v| v.checked_add(service_fee))
            .ok_or_else(out_of_range)?;

        Ok(Self {
            hourly_rate,
            hours,
            subtotal,
            cleaning_fee,
            service_fee,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtotal_fee_and_total() {
        let p = PricingBreakdown::compute(75, 3, 40, 10).unwrap();
        assert_eq!(p.subtotal, 225);
        assert_eq!(p.service_fee, 23);
        assert_eq!(p.total, 225 + 40 + 23);
    }

    #[test]
    fn zero_percent_means_no_service_fee() {
        let p = PricingBreakdown::compute(100, 2, 0, 0).unwrap();
        assert_eq!(p.service_fee, 0);
        assert_eq!(p.total, 200);
    }

    #[test]
    fn overflowing_amounts_are_rejected() {
        assert!(matches!(
            PricingBreakdown::compute(i64::MAX / 2, 3, 0, 10),
            Err(DomainError::Validation(_))
        ));
        // Subtotal fits but the fee multiplication does not
        assert!(PricingBreakdown::compute(i64::MAX / 4, 2, 0, 10).is_err());
        assert!(PricingBreakdown::compute(i64::MAX / 2, 1, i64::MAX / 2, 0).is_ok());
        assert!(PricingBreakdown::compute(i64::MAX / 2, 2, 2, 0).is_err());
    }
}
