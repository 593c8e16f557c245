use serde::de::{self, Visitor};
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Exact decimal amount in fixed-point units of 10^-18.
///
/// Prices arrive as JSON numbers (`base_price * multiplier` on the backend,
/// so sub-cent digits are common) and are summed client-side. They are parsed
/// from their decimal text and kept at full precision; rounding to cents
/// happens only in `Display`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    units: i128,
}

const SCALE: usize = 18;
const UNIT: i128 = 10_i128.pow(SCALE as u32);
const CENT: i128 = UNIT / 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid decimal amount: {0}")]
pub struct ParseMoneyError(String);

impl Money {
    pub const ZERO: Money = Money { units: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self {
            units: i128::from(cents) * CENT,
        }
    }

    /// Amount rounded half up to whole cents.
    pub fn rounded_cents(&self) -> i64 {
        let cents = (self.units.unsigned_abs() + CENT.unsigned_abs() / 2) / CENT.unsigned_abs();
        let cents = i64::try_from(cents).unwrap_or(i64::MAX);
        if self.units < 0 {
            -cents
        } else {
            cents
        }
    }

    /// Full-precision decimal text without trailing zeros, e.g. `46.125`.
    pub fn to_exact_string(&self) -> String {
        let sign = if self.units < 0 { "-" } else { "" };
        let abs = self.units.unsigned_abs();
        let whole = abs / UNIT.unsigned_abs();
        let frac = abs % UNIT.unsigned_abs();
        if frac == 0 {
            return format!("{}{}", sign, whole);
        }
        let digits = format!("{:0width$}", frac, width = SCALE);
        format!("{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses `12`, `12.5`, `-3.125`; digits past the 18th decimal round half up.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError(s.to_owned());
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(err());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }

        let whole_units = if whole.is_empty() {
            0
        } else {
            whole.parse::<i128>().map_err(|_| err())?.checked_mul(UNIT).ok_or_else(err)?
        };

        let (kept, dropped) = frac.split_at(frac.len().min(SCALE));
        let frac_units = if kept.is_empty() {
            0
        } else {
            kept.parse::<i128>().map_err(|_| err())? * 10_i128.pow((SCALE - kept.len()) as u32)
        };
        let round_up = dropped.bytes().next().map_or(false, |d| d >= b'5');

        let units = whole_units
            .checked_add(frac_units + i128::from(round_up))
            .ok_or_else(err)?;
        Ok(Money {
            units: if negative { -units } else { units },
        })
    }
}

impl fmt::Display for Money {
    /// Two decimals, rounded half up (away from zero).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.rounded_cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money {
            units: self.units.saturating_add(rhs.units),
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value: f64 = self.to_exact_string().parse().map_err(<S::Error as ser::Error>::custom)?;
        serializer.serialize_f64(value)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount as number or string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        i128::from(v)
            .checked_mul(UNIT)
            .map(|units| Money { units })
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("amount out of range"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        // `{}` on f64 prints the shortest round-tripping decimal, never an exponent.
        format!("{}", v).parse().map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor)
    }
}
