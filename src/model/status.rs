//! Enumerated status strings stored as TEXT with CHECK constraints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

macro_rules! text_enum {
    ($name:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            /// Case-insensitive; clients send `approved` as often as `Approved`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case(stringify!($variant)) {
                        return Ok($name::$variant);
                    }
                )+
                Err(UnknownVariant {
                    kind: $kind,
                    value: s.to_string(),
                    expected: concat!($(stringify!($variant), " "),+),
                })
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownVariant;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }
    };
}

text_enum!(Role, "role", [Customer, Admin, Staff]);
text_enum!(TableStatus, "table status", [Available, Occupied, Reserved]);
text_enum!(ReservationStatus, "reservation status", [Pending, Approved, Completed, Cancelled]);
text_enum!(PaymentStatus, "payment status", [Pending, Completed, Failed, Refunded]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("approved".parse::<ReservationStatus>().unwrap(), ReservationStatus::Approved);
        assert_eq!(" Occupied ".parse::<TableStatus>().unwrap(), TableStatus::Occupied);
        assert_eq!("STAFF".parse::<Role>().unwrap(), Role::Staff);
    }

    #[test]
    fn unknown_value_lists_expected_variants() {
        let err = "Seated".parse::<TableStatus>().unwrap_err();
        assert_eq!(err.kind, "table status");
        assert!(err.to_string().contains("Available Occupied Reserved"));
    }

    #[test]
    fn serializes_as_pascal_case_name() {
        assert_eq!(serde_json::to_value(PaymentStatus::Refunded).unwrap(), "Refunded");
        assert_eq!(ReservationStatus::Cancelled.as_str(), "Cancelled");
        assert_eq!(Role::ALL.len(), 3);
    }
}
