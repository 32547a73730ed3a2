//! Monetary amounts in minor currency units.

use core::fmt;
use serde::{Deserialize, Serialize};

/// A monetary amount stored as an integer count of the smallest currency
/// unit (kobo for NGN, cents for USD).
///
/// Serializes transparently as an integer, so `Price::from_minor(600)`
/// appears as `600` on the wire. All arithmetic is checked; totals are
/// computed with [`Price::checked_add`] and [`Price::checked_mul`] so an
/// absurd quantity cannot silently wrap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Create a price from minor currency units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// The amount in minor currency units.
    #[must_use]
    pub const fn as_minor(self) -> i64 {
        self.0
    }

    /// Whether this price is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication by a line quantity.
    #[must_use]
    pub const fn checked_mul(self, quantity: i64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Price {
    /// Formats as major units with two decimal places, e.g. `6.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

// SQLx support (with postgres feature): stored as BIGINT.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let minor = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(minor))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Price::from_minor(600);
        assert_eq!(a.checked_mul(2).unwrap(), Price::from_minor(1200));
        assert_eq!(
            a.checked_add(Price::from_minor(400)).unwrap(),
            Price::from_minor(1000)
        );
    }

    #[test]
    fn test_overflow_is_caught() {
        let max = Price::from_minor(i64::MAX);
        assert!(max.checked_add(Price::from_minor(1)).is_none());
        assert!(max.checked_mul(2).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_minor(600).to_string(), "6.00");
        assert_eq!(Price::from_minor(1205).to_string(), "12.05");
        assert_eq!(Price::from_minor(-50).to_string(), "-0.50");
    }

    #[test]
    fn test_serde_transparent() {
        let p = Price::from_minor(600);
        assert_eq!(serde_json::to_string(&p).unwrap(), "600");
        let parsed: Price = serde_json::from_str("600").unwrap();
        assert_eq!(parsed, p);
    }
}
