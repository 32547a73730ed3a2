//! Status enums for orders, payments, and admin roles.
//!
//! All variants use the exact wire spellings the clients expect
//! (`"outForDelivery"`, `"super_admin"`, ...). In Postgres they are stored
//! as TEXT; the codecs below delegate to `Display`/`FromStr` so the
//! database and the JSON API always agree on spelling.

use serde::{Deserialize, Serialize};

/// Implements Postgres TEXT encoding for an enum via its
/// `Display`/`FromStr` pair (with the `postgres` feature).
macro_rules! impl_pg_text {
    ($name:ident) => {
        #[cfg(feature = "postgres")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                s.parse::<Self>().map_err(Into::into)
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.to_string(), buf)
            }
        }
    };
}

/// Error returned when parsing a status string fails.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid {kind}: {value}")]
pub struct StatusParseError {
    kind: &'static str,
    value: String,
}

/// Order fulfillment lifecycle.
///
/// Orders move forward only: `Confirmed → Processing → OutForDelivery →
/// Delivered`, with `Cancelled` reachable from any state before delivery.
/// `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Processing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Position in the forward progression, `None` for `Cancelled`.
    const fn rank(self) -> Option<u8> {
        match self {
            Self::Confirmed => Some(0),
            Self::Processing => Some(1),
            Self::OutForDelivery => Some(2),
            Self::Delivered => Some(3),
            Self::Cancelled => None,
        }
    }

    /// Whether this status admits no further changes.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Forward moves may skip intermediate states. Repeating the current
    /// status is not a transition and is rejected.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == Self::Cancelled {
            return true;
        }
        match (self.rank(), next.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }

    /// The wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::OutForDelivery => "outForDelivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "outForDelivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(StatusParseError {
                kind: "order status",
                value: s.to_owned(),
            }),
        }
    }
}

impl_pg_text!(OrderStatus);

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "succeeded" => Ok(Self::Succeeded),
            "failed" => Ok(Self::Failed),
            _ => Err(StatusParseError {
                kind: "payment status",
                value: s.to_owned(),
            }),
        }
    }
}

impl_pg_text!(PaymentStatus);

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Hosted card checkout.
    Online,
    /// Cash on delivery.
    Cod,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Online => "online",
            Self::Cod => "cod",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "cod" => Ok(Self::Cod),
            _ => Err(StatusParseError {
                kind: "payment method",
                value: s.to_owned(),
            }),
        }
    }
}

impl_pg_text!(PaymentMethod);

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access including admin-account management.
    SuperAdmin,
    /// Store management within granted permissions.
    Admin,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            _ => Err(StatusParseError {
                kind: "admin role",
                value: s.to_owned(),
            }),
        }
    }
}

impl_pg_text!(AdminRole);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        use OrderStatus::*;
        assert!(Confirmed.can_transition_to(Processing));
        assert!(Confirmed.can_transition_to(OutForDelivery)); // skip ahead
        assert!(Confirmed.can_transition_to(Delivered));
        assert!(Processing.can_transition_to(OutForDelivery));
        assert!(OutForDelivery.can_transition_to(Delivered));
    }

    #[test]
    fn test_backward_and_self_transitions_rejected() {
        use OrderStatus::*;
        assert!(!Processing.can_transition_to(Confirmed));
        assert!(!Delivered.can_transition_to(OutForDelivery));
        assert!(!Confirmed.can_transition_to(Confirmed));
        assert!(!OutForDelivery.can_transition_to(Processing));
    }

    #[test]
    fn test_cancellation() {
        use OrderStatus::*;
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(OutForDelivery.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_states() {
        use OrderStatus::*;
        for next in [Confirmed, Processing, OutForDelivery, Delivered, Cancelled] {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_order_status_wire_spelling() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"outForDelivery\"");
        let parsed: OrderStatus = serde_json::from_str("\"outForDelivery\"").unwrap();
        assert_eq!(parsed, OrderStatus::OutForDelivery);
        assert_eq!("outForDelivery".parse::<OrderStatus>().unwrap(), parsed);
    }

    #[test]
    fn test_admin_role_roundtrip() {
        assert_eq!(AdminRole::SuperAdmin.to_string(), "super_admin");
        assert_eq!(
            "super_admin".parse::<AdminRole>().unwrap(),
            AdminRole::SuperAdmin
        );
        assert!("viewer".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("cod".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cod);
        assert!("card".parse::<PaymentMethod>().is_err());
    }
}
