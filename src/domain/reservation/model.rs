//! Reservation domain entity

use chrono::{DateTime, Utc};

/// Reservation lifecycle status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Booked, awaiting confirmation or payment
    Pending,
    /// Confirmed, slot is held
    Confirmed,
    /// A charging session is running against this reservation
    Active,
    Cancelled,
    Expired,
    Completed,
    /// Unrecognized raw value, passed through
    Other(String),
}

impl ReservationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "active" => Self::Active,
            "cancelled" => Self::Cancelled,
            "expired" => Self::Expired,
            "completed" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Completed => "completed",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One booked slot within a reservation
#[derive(Debug, Clone)]
pub struct ReservationItem {
    pub slot_id: String,
    /// End of the booked window
    pub end_at: DateTime<Utc>,
}

/// Customer booking referencing one or more slots
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: String,
    pub status: ReservationStatus,
    /// Ordered as received from the backend
    pub items: Vec<ReservationItem>,
}

impl Reservation {
    pub fn new(id: impl Into<String>, status: ReservationStatus) -> Self {
        Self {
            id: id.into(),
            status,
            items: Vec::new(),
        }
    }

    /// A reservation is live while at least one item's window end is
    /// strictly in the future. One with no items, or only past items,
    /// is not live and must never block a slot.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.items.iter().any(|item| item.end_at > now)
    }

    /// The booked window end for one specific slot, if this reservation
    /// references it.
    pub fn end_for_slot(&self, slot_id: &str) -> Option<DateTime<Utc>> {
        self.items
            .iter()
            .find(|item| item.slot_id == slot_id)
            .map(|item| item.end_at)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reservation_ending_in(hours: i64) -> Reservation {
        let mut r = Reservation::new("r-01", ReservationStatus::Confirmed);
        r.items.push(ReservationItem {
            slot_id: "s-01".to_string(),
            end_at: Utc::now() + Duration::hours(hours),
        });
        r
    }

    #[test]
    fn live_while_an_item_ends_in_the_future() {
        assert!(reservation_ending_in(1).is_live(Utc::now()));
    }

    #[test]
    fn not_live_when_every_item_has_ended() {
        assert!(!reservation_ending_in(-1).is_live(Utc::now()));
    }

    #[test]
    fn not_live_without_items() {
        let r = Reservation::new("r-02", ReservationStatus::Pending);
        assert!(!r.is_live(Utc::now()));
    }

    #[test]
    fn one_future_item_keeps_the_whole_reservation_live() {
        let now = Utc::now();
        let mut r = reservation_ending_in(-2);
        r.items.push(ReservationItem {
            slot_id: "s-02".to_string(),
            end_at: now + Duration::minutes(30),
        });
        assert!(r.is_live(now));
    }

    #[test]
    fn end_at_exactly_now_is_not_live() {
        let now = Utc::now();
        let mut r = Reservation::new("r-03", ReservationStatus::Active);
        r.items.push(ReservationItem {
            slot_id: "s-01".to_string(),
            end_at: now,
        });
        assert!(!r.is_live(now));
    }

    #[test]
    fn end_for_slot_finds_the_matching_item() {
        let r = reservation_ending_in(1);
        assert!(r.end_for_slot("s-01").is_some());
        assert!(r.end_for_slot("s-99").is_none());
    }

    #[test]
    fn status_parse_roundtrip() {
        for raw in ["pending", "confirmed", "active", "cancelled", "expired", "completed"] {
            assert_eq!(ReservationStatus::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn unknown_status_is_passed_through() {
        assert_eq!(
            ReservationStatus::parse("no_show"),
            ReservationStatus::Other("no_show".to_string())
        );
    }
}
