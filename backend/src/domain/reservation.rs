//! Reservation status codes.
//!
//! Reservations are only counted by this service. The status decides whether
//! a reservation contributes to an office's `reservations_count`.

/// Lifecycle state of a reservation, stored as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    /// The booking stands.
    Active,
    /// The booking was withdrawn.
    Canceled,
}

impl ReservationStatus {
    /// Stored representation.
    pub const fn code(self) -> i16 {
        match self {
            Self::Active => 1,
            Self::Canceled => 2,
        }
    }

    /// Decode a stored value.
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Active),
            2 => Some(Self::Canceled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReservationStatus::Active, 1)]
    #[case(ReservationStatus::Canceled, 2)]
    fn codes_are_stable(#[case] status: ReservationStatus, #[case] code: i16) {
        assert_eq!(status.code(), code);
        assert_eq!(ReservationStatus::from_code(code), Some(status));
    }

    #[rstest]
    fn unknown_code_is_rejected() {
        assert_eq!(ReservationStatus::from_code(0), None);
    }
}
