use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(PregnancyStatus {
    Active => "Active",
    Ended => "Ended",
});

str_enum!(Role {
    Patient => "patient",
    Doctor => "doctor",
});

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn pregnancy_status_roundtrip() {
        assert_eq!(PregnancyStatus::Active.as_str(), "Active");
        assert_eq!(
            PregnancyStatus::from_str("Ended").unwrap(),
            PregnancyStatus::Ended
        );
    }

    #[test]
    fn unknown_status_rejected() {
        assert!(PregnancyStatus::from_str("Paused").is_err());
    }

    #[test]
    fn role_roundtrip() {
        assert_eq!(Role::from_str("doctor").unwrap(), Role::Doctor);
        assert_eq!(Role::Patient.as_str(), "patient");
    }
}
