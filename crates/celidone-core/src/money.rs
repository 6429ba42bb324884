//! # Money Module
//!
//! `Money` type plus the BRL formatter/parser pair used by every monetary
//! form field (valor do aluguel, caução, desconto, total).
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In the renderer (JavaScript):                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    R$ 10,00 is stored as 1000                                          │
//! │    Floats only appear at the edges (parsing typed text, JSON numbers)  │
//! │    and are rounded to the nearest centavo immediately.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Formatting Round Trip
//! ```text
//!   1234.5 ──format_currency──► "R$ 1.234,50" ──parse_currency──► 1234.5
//! ```
//! `parse_currency` is deliberately forgiving: anything that is not a digit
//! or a comma is dropped, and garbage parses to `0.0`.
//!
//! ## Usage
//! ```rust
//! use celidone_core::money::{format_currency, parse_currency, Money};
//!
//! let aluguel = Money::from_cents(10_000); // R$ 100,00
//! assert_eq!(aluguel.to_string(), "R$ 100,00");
//!
//! assert_eq!(format_currency(1234.5), "R$ 1.234,50");
//! assert_eq!(parse_currency("R$ 1.234,50"), 1234.5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Digits kept by [`mask_currency_input`]; more would overflow `i64` centavos.
const MAX_TYPED_DIGITS: usize = 15;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centavos.
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount larger than the subtotal yields a negative
///   total, and that has to be representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: serializes as centavos; use [`serde_reais`] where the backend
///   expects a reais number
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  valorAluguel ──┐                                                       │
/// │                 ├──► valorAluguel × periodo − valorDesconto = valorTotal│
/// │  valorDesconto ─┘                                  │                    │
/// │                                                    ▼                    │
/// │  valorCaucao ──────────────────────────────► multa por atraso          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use celidone_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// For negative amounts only `reais` carries the sign:
    /// `from_reais_centavos(-5, 50)` is -R$ 5,50.
    #[inline]
    pub const fn from_reais_centavos(reais: i64, centavos: i64) -> Self {
        if reais < 0 {
            Money(reais * 100 - centavos)
        } else {
            Money(reais * 100 + centavos)
        }
    }

    /// Converts a decimal amount in reais, rounding to the nearest centavo.
    ///
    /// Returns `None` for NaN and infinities. This is the only float entry
    /// point; it exists because form payloads carry amounts as JSON numbers.
    ///
    /// ## Example
    /// ```rust
    /// use celidone_core::money::Money;
    ///
    /// assert_eq!(Money::from_reais(99.999), Some(Money::from_cents(10_000)));
    /// assert_eq!(Money::from_reais(f64::NAN), None);
    /// ```
    pub fn from_reais(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Money((value * 100.0).round() as i64))
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value as a reais number, for JSON payloads only.
    #[inline]
    pub fn to_reais_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a number of rental periods, saturating at the `i64`
    /// bounds.
    ///
    /// ## Example
    /// ```rust
    /// use celidone_core::money::Money;
    ///
    /// let diaria = Money::from_cents(10_000); // R$ 100,00
    /// assert_eq!(diaria.times(7).cents(), 70_000);
    /// ```
    #[inline]
    pub const fn times(&self, periods: i64) -> Self {
        Money(self.0.saturating_mul(periods))
    }

    /// Multiplies by a number of rental periods, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use celidone_core::money::Money;
    ///
    /// let diaria = Money::from_cents(10_000);
    /// assert_eq!(diaria.checked_times(7), Some(Money::from_cents(70_000)));
    /// assert_eq!(diaria.checked_times(i64::MAX / 2), None);
    /// ```
    #[inline]
    pub const fn checked_times(&self, periods: i64) -> Option<Self> {
        match self.0.checked_mul(periods) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts, `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `bps` basis points of this amount (10000 = 100%).
    ///
    /// Rounds half away from zero on the centavo:
    /// `(amount × bps ± 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use celidone_core::money::Money;
    ///
    /// let total = Money::from_cents(12_345);
    /// assert_eq!(total.percent_bps(200).cents(), 247); // 2% of R$ 123,45
    /// ```
    pub fn percent_bps(&self, bps: u32) -> Money {
        let scaled = self.0 as i128 * bps as i128;
        let rounded = if scaled >= 0 {
            (scaled + 5000) / 10000
        } else {
            (scaled - 5000) / 10000
        };
        Money(i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays money the way `Intl.NumberFormat("pt-BR", BRL)` does, with a
/// plain space after the symbol: `R$ 1.234,50`, `-R$ 5,50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            group_thousands(abs / 100),
            abs % 100
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, periods: i64) -> Self {
        self.times(periods)
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Formatter / Parser
// =============================================================================

/// Formats a reais amount as BRL currency text.
///
/// Non-finite input formats as `R$ 0,00`, matching the form's fallback for
/// empty or NaN fields.
///
/// ## Example
/// ```rust
/// use celidone_core::money::format_currency;
///
/// assert_eq!(format_currency(690.0), "R$ 690,00");
/// assert_eq!(format_currency(1_234_567.891), "R$ 1.234.567,89");
/// assert_eq!(format_currency(f64::NAN), "R$ 0,00");
/// ```
pub fn format_currency(value: f64) -> String {
    Money::from_reais(value).unwrap_or_default().to_string()
}

/// Parses BRL currency text back into a reais amount.
///
/// ## Rules
/// 1. Drop every character except digits and `,`
/// 2. The first `,` becomes the decimal point
/// 3. Parse the leading number; anything unparseable is `0.0`
///
/// The sign is dropped with the other symbols, so `-R$ 5,00` parses to
/// `5.0`. Amounts typed with a `.` decimal separator lose it the same way.
///
/// ## Example
/// ```rust
/// use celidone_core::money::parse_currency;
///
/// assert_eq!(parse_currency("R$ 1.234,50"), 1234.5);
/// assert_eq!(parse_currency("abc"), 0.0);
/// ```
pub fn parse_currency(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    let normalized = cleaned.replacen(',', ".", 1);
    leading_number(&normalized).unwrap_or(0.0)
}

/// Parses BRL currency text straight into [`Money`].
pub fn parse_money(text: &str) -> Money {
    Money::from_reais(parse_currency(text)).unwrap_or_default()
}

/// Masks a currency field while the user types: digits are read as centavos.
///
/// ## User Workflow
/// ```text
/// keys: 1 → "R$ 0,01"
/// keys: 12 → "R$ 0,12"
/// keys: 1234 → "R$ 12,34"
/// keys: 123456 → "R$ 1.234,56"
/// ```
pub fn mask_currency_input(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_TYPED_DIGITS)
        .collect();
    let cents = digits.parse::<i64>().unwrap_or(0);
    Money::from_cents(cents).to_string()
}

/// Longest `digits[.digits]` prefix, as `parseFloat` reads it.
fn leading_number(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_point = false;
    for (i, c) in text.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
    }
    text[..end].parse::<f64>().ok()
}

// =============================================================================
// Serde Helpers
// =============================================================================

/// Serializes [`Money`] as a reais number (`690.0`) instead of centavos.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::serde_reais")]
/// pub valor_total: Money,
/// ```
pub mod serde_reais {
    use super::Money;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_reais_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_reais(value).ok_or_else(|| de::Error::custom("valor monetário inválido"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
