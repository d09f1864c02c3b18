//! Data models
//!
//! This module contains the records exchanged with the museum API:
//! - Server-owned entities (Exhibit, Exhibition, Reservation, Donation)
//! - The session user decoded from a token
//! - Request bodies for create/update calls
//!
//! Field names are camelCase on the wire.

mod donation;
mod exhibit;
mod exhibition;
mod reservation;
mod user;

pub use donation::{Donation, DonationInput, DonationStatus};
pub use exhibit::{Exhibit, ExhibitCategory, ExhibitInput, ExhibitSearchCriteria};
pub use exhibition::{Exhibition, ExhibitionInput};
pub use reservation::{Reservation, ReservationRequest, TimeSlot};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, UserRole};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default.
///
/// The backend leaves optional text columns as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wall-clock times as `HH:mm`, accepting `HH:mm:ss` on input.
pub(crate) mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn parse(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(s, FORMAT))
            .ok()
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::hh_mm;
    use chrono::NaiveTime;

    #[test]
    fn test_hh_mm_accepts_both_precisions() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(hh_mm::parse("10:00"), Some(ten));
        assert_eq!(hh_mm::parse("10:00:00"), Some(ten));
        assert_eq!(hh_mm::parse(" 10:00 "), Some(ten));
        assert_eq!(hh_mm::parse("ten"), None);
    }
}
