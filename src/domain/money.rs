use crate::error::ScenarioError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A monetary value in the account currency.
///
/// Wraps `rust_decimal::Decimal` so money never passes through binary floating
/// point. The value is signed: deficits and cash outflows are negative, all
/// validated inputs are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// The smallest currency unit.
    pub const CENT: Self = Self(Decimal::from_parts(1, 0, 0, false, 2));

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Validates a caller-supplied amount against `[0, max]`. `field` names the
    /// parameter in the error message.
    pub fn bounded(amount: Decimal, max: Money, field: &str) -> Result<Self, ScenarioError> {
        if amount < Decimal::ZERO {
            return Err(ScenarioError::Validation(format!(
                "{field} must not be negative (got {amount})"
            )));
        }
        if amount > max.0 {
            return Err(ScenarioError::Validation(format!(
                "{field} of {amount} exceeds the supported maximum of {}",
                max.0
            )));
        }
        Ok(Self(amount))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds to the smallest currency unit. Only applied when a result is reported.
    pub fn round_cents(self) -> Self {
        let mut value = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        // Pin the scale so equal amounts serialize identically.
        value.rescale(2);
        Self(value)
    }

    /// Rounds up to the next whole cent.
    pub fn ceil_cents(self) -> Self {
        Self(self.0.round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity))
    }

    /// Rounds down to the previous whole cent.
    pub fn floor_cents(self) -> Self {
        Self(self.0.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity))
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn max(self, other: Self) -> Self {
        if self >= other { self } else { other }
    }

    pub fn min(self, other: Self) -> Self {
        if self <= other { self } else { other }
    }

    /// Clamps negative values to zero.
    pub fn floor_zero(self) -> Self {
        self.max(Self::ZERO)
    }

    pub fn annualized(self) -> Self {
        Self(self.0.saturating_mul(MONTHS_PER_YEAR))
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    pub fn saturating_mul(self, factor: Decimal) -> Self {
        Self(self.0.saturating_mul(factor))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_mul(self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    /// Whole cents as an integer, for searches over the currency grid.
    pub(crate) fn to_cents(self) -> i128 {
        let cents = self.0.saturating_mul(ONE_HUNDRED).trunc();
        cents.mantissa() / 10_i128.pow(cents.scale())
    }

    pub(crate) fn from_cents(cents: i128) -> Self {
        Self(Decimal::from_i128_with_scale(cents, 2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_cents().0;
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-${}", group_thousands(rounded.abs()))
        } else {
            write!(f, "${}", group_thousands(rounded))
        }
    }
}

fn group_thousands(amount: Decimal) -> String {
    let text = format!("{amount:.2}");
    let (whole, frac) = text.split_once('.').unwrap_or((&text, "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{frac}")
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;
    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

/// An annual rate expressed in percent (`18.99` means 18.99% per year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub Decimal);

impl Percent {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Validates a caller-supplied rate against `[0, max]`.
    pub fn bounded(value: Decimal, max: Percent, field: &str) -> Result<Self, ScenarioError> {
        if value < Decimal::ZERO {
            return Err(ScenarioError::Validation(format!(
                "{field} must not be negative (got {value})"
            )));
        }
        if value > max.0 {
            return Err(ScenarioError::Validation(format!(
                "{field} of {value}% exceeds the supported maximum of {}%",
                max.0
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `apr / 100 / 12`
    pub fn monthly_rate(&self) -> Decimal {
        self.0 / ONE_HUNDRED / MONTHS_PER_YEAR
    }

    /// A ratio `part / whole` expressed in percent; zero when `whole` is zero.
    /// Saturates when the ratio is too large to represent.
    pub fn ratio(part: Money, whole: Money) -> Self {
        if whole.is_zero() {
            return Self::ZERO;
        }
        let saturated = if part.0.is_sign_negative() == whole.0.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        };
        Self(
            part.0
                .checked_div(whole.0)
                .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
                .unwrap_or(saturated),
        )
    }

    pub fn clamp(self, min: Decimal, max: Decimal) -> Self {
        Self(self.0.clamp(min, max))
    }

    pub fn round_dp(self, dp: u32) -> Self {
        let mut value = self
            .0
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(dp);
        Self(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.round_dp(1).0)
    }
}
