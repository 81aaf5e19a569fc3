//! Ticket enrichment models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Sales status derived from the seats the ticket service still reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Available,
    Limited,
    SoldOut,
    /// The ticket service could not be reached.
    Unknown,
}

impl TicketStatus {
    /// Sold out when nothing is left, limited below a tenth of the event's capacity.
    pub fn from_seats(available_seats: Option<i64>, capacity: i32) -> Self {
        match available_seats {
            None => TicketStatus::SoldOut,
            Some(seats) if seats <= 0 => TicketStatus::SoldOut,
            Some(seats) if seats.saturating_mul(10) < i64::from(capacity) => TicketStatus::Limited,
            Some(_) => TicketStatus::Available,
        }
    }
}

/// Pricing region parsed from the caller's region code (e.g. "US", "EU-RO").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingRegion {
    Us,
    Romania,
    Eurozone,
}

impl PricingRegion {
    pub fn from_code(code: &str) -> Self {
        let code = code.to_ascii_uppercase();
        if code.contains("US") {
            PricingRegion::Us
        } else if code.contains("RO") {
            PricingRegion::Romania
        } else {
            PricingRegion::Eurozone
        }
    }

    /// Revenue summary in the region's language and currency.
    pub fn revenue_message(&self, event_name: &str, revenue: Decimal) -> String {
        let revenue = revenue.round_dp(2);
        match self {
            PricingRegion::Us => format!(
                "Event '{}' has generated ${:.2} in revenue (US pricing).",
                event_name, revenue
            ),
            PricingRegion::Romania => format!(
                "Evenimentul '{}' a generat {:.2} RON în venituri (preturi România).",
                event_name, revenue
            ),
            PricingRegion::Eurozone => format!(
                "Event '{}' has generated {:.2} EUR in revenue (EU pricing).",
                event_name, revenue
            ),
        }
    }
}

/// An event together with the ticket service's view of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventWithTicketInfo {
    #[serde(flatten)]
    pub event: Event,
    pub available_seats: i64,
    pub total_revenue: Decimal,
    pub ticket_status: TicketStatus,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn status_thresholds() {
        assert_eq!(TicketStatus::from_seats(None, 1000), TicketStatus::SoldOut);
        assert_eq!(TicketStatus::from_seats(Some(0), 1000), TicketStatus::SoldOut);
        assert_eq!(TicketStatus::from_seats(Some(99), 1000), TicketStatus::Limited);
        assert_eq!(
            TicketStatus::from_seats(Some(100), 1000),
            TicketStatus::Available
        );
    }

    #[test]
    fn huge_seat_counts_do_not_overflow() {
        assert_eq!(
            TicketStatus::from_seats(Some(i64::MAX), i32::MAX),
            TicketStatus::Available
        );
    }

    #[test]
    fn region_codes() {
        assert_eq!(PricingRegion::from_code("us"), PricingRegion::Us);
        assert_eq!(PricingRegion::from_code("EU-RO"), PricingRegion::Romania);
        assert_eq!(PricingRegion::from_code("EU"), PricingRegion::Eurozone);
        assert_eq!(PricingRegion::from_code(""), PricingRegion::Eurozone);
    }

    #[test]
    fn messages_are_localized() {
        assert_eq!(
            PricingRegion::Us.revenue_message("Opening", dec!(1234.5)),
            "Event 'Opening' has generated $1234.50 in revenue (US pricing)."
        );
        assert_eq!(
            PricingRegion::Eurozone.revenue_message("Opening", dec!(10)),
            "Event 'Opening' has generated 10.00 EUR in revenue (EU pricing)."
        );
        assert!(PricingRegion::Romania
            .revenue_message("Opening", dec!(3.14159))
            .contains("3.14 RON"));
    }
}
