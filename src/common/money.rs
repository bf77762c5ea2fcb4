use bigdecimal::{BigDecimal, ParseBigDecimalError, RoundingMode, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[derive(Debug, Clone, Default)]
/// A decimal monetary value of arbitrary precision.
///
/// Wrapping `BigDecimal` keeps amounts and balances from being mixed up with other
/// numbers and pins down the two renderings the log format needs: amounts are written
/// without insignificant trailing zeros (`5`, not `5.00`), balances at a fixed scale.
/// Equality is numeric, so `1.50` and `1.5` are the same amount.
///
/// # Examples
/// ```
/// use txlog_aggregator::common::money::Money;
///
/// let amount: Money = "12.500".parse().unwrap();
/// assert_eq!(amount.to_string(), "12.5");
/// assert_eq!(amount.to_string_scaled(2), "12.50");
/// assert_eq!(amount, "12.5".parse().unwrap());
/// ```
pub struct Money(BigDecimal);

impl Money {
    pub fn zero() -> Self {
        Money(BigDecimal::zero())
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Plain notation with trailing fractional zeros removed.
    pub fn to_string_plain(&self) -> String {
        let normalized = self.0.normalized();
        // normalized() turns 100 into 1E+2; plain rendering wants the integer digits back
        if normalized.fractional_digit_count() < 0 {
            normalized.with_scale(0).to_plain_string()
        } else {
            normalized.to_plain_string()
        }
    }

    /// Fixed number of decimal places, rounding half away from zero.
    pub fn to_string_scaled(&self, scale: u32) -> String {
        self.0
            .with_scale_round(i64::from(scale), RoundingMode::HalfUp)
            .to_plain_string()
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;
        Ok(Money(bd))
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money(BigDecimal::from(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_plain())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign<&Money> for Money {
    fn sub_assign(&mut self, rhs: &Money) {
        self.0 -= &rhs.0;
    }
}

impl AddAssign<&Money> for Money {
    fn add_assign(&mut self, rhs: &Money) {
        self.0 += &rhs.0;
    }
}
