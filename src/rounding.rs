//! Decimal-accurate rounding of binary floating-point values.
//!
//! Rounding an `f64` with plain float arithmetic is biased by binary
//! representation error: `6.445` is stored as `6.44499999999…`, so
//! half-up rounding at two places yields `6.44` instead of the `6.45` a
//! reader of the decimal literal expects. The functions here round the
//! *shortest round-trip decimal representation* of the value instead —
//! the digits `Display` prints — so a value that prints as `6.445`
//! rounds as decimal 6.445 regardless of its binary approximation.
//!
//! # Sign convention
//!
//! All modes are magnitude-based and symmetric under negation:
//! [`RoundingMode::Up`] rounds away from zero (so `-6.444` at two places
//! becomes `-6.45`), [`RoundingMode::Down`] truncates toward zero. The
//! directional modes are defined by "magnitude increases", not
//! "numerically increases".
//!
//! # Example
//!
//! ```
//! use fitkit::rounding::{RoundingMode, round_to_places};
//!
//! let n = 6.445677;
//! assert_eq!(round_to_places(n, 2, RoundingMode::HalfAwayFromZero).unwrap(), 6.45);
//! assert_eq!(round_to_places(n, 2, RoundingMode::Up).unwrap(), 6.45);
//! assert_eq!(round_to_places(n, 2, RoundingMode::Down).unwrap(), 6.44);
//! ```

use core::cmp::Ordering;

use thiserror::Error;

/// Tie-breaking and directional policy for [`round_to_places`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round away from zero whenever any discarded digit is non-zero.
    Up,
    /// Truncate toward zero.
    Down,
    /// Round to nearest; exact halves round away from zero.
    HalfAwayFromZero,
    /// Round to nearest; exact halves round to the even retained digit
    /// (banker's rounding).
    HalfEven,
}

/// Rounding failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RoundingError {
    /// Input was NaN or infinite.
    #[error("cannot round a non-finite value")]
    NonFinite,
}

/// Round `value` to `places` fractional digits under `mode`.
///
/// `places = 0` rounds to an integral value. Values whose decimal
/// representation already fits in `places` digits are returned unchanged.
///
/// ```
/// use fitkit::rounding::{RoundingMode, round_to_places};
///
/// assert_eq!(round_to_places(2.5, 0, RoundingMode::HalfEven).unwrap(), 2.0);
/// assert_eq!(round_to_places(3.5, 0, RoundingMode::HalfEven).unwrap(), 4.0);
/// ```
pub fn round_to_places(value: f64, places: u32, mode: RoundingMode) -> Result<f64, RoundingError> {
    if !value.is_finite() {
        return Err(RoundingError::NonFinite);
    }
    if value == 0.0 {
        return Ok(0.0);
    }

    let negative = value < 0.0;
    // Shortest decimal representation that round-trips. Rust's float
    // Display is always positional (never scientific), so splitting on
    // '.' is sufficient.
    let printed = format!("{}", value.abs());
    let Some((int_part, frac_part)) = printed.split_once('.') else {
        return Ok(value);
    };
    let places = places as usize;
    if frac_part.len() <= places {
        return Ok(value);
    }

    // Retained digits as one contiguous string; the decimal point sits
    // `places` digits from the end.
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .collect();
    let discarded = &frac_part.as_bytes()[places..];

    let round_up = match mode {
        RoundingMode::Down => false,
        RoundingMode::Up => discarded.iter().any(|&b| b != b'0'),
        RoundingMode::HalfAwayFromZero => discarded[0] >= b'5',
        RoundingMode::HalfEven => match compare_to_half(discarded) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                let last = digits.last().copied().unwrap_or(b'0');
                (last - b'0') % 2 == 1
            }
        },
    };
    if round_up {
        increment_digits(&mut digits);
    }

    let mut rounded = String::with_capacity(digits.len() + 1);
    let point = digits.len() - places;
    for (i, &b) in digits.iter().enumerate() {
        if i == point && places > 0 {
            rounded.push('.');
        }
        rounded.push(b as char);
    }

    rounded
        .parse::<f64>()
        .map(|v| if negative { -v } else { v })
        .map_err(|_| RoundingError::NonFinite)
}

/// Round up to `places` decimal places ([`RoundingMode::Up`]).
///
/// ```
/// assert_eq!(fitkit::rounding::ceil_to(6.444677, 2).unwrap(), 6.45);
/// ```
pub fn ceil_to(value: f64, places: u32) -> Result<f64, RoundingError> {
    round_to_places(value, places, RoundingMode::Up)
}

/// Round down to `places` decimal places ([`RoundingMode::Down`]).
///
/// ```
/// assert_eq!(fitkit::rounding::floor_to(6.445677, 2).unwrap(), 6.44);
/// ```
pub fn floor_to(value: f64, places: u32) -> Result<f64, RoundingError> {
    round_to_places(value, places, RoundingMode::Down)
}

/// Round to nearest at `places` decimal places
/// ([`RoundingMode::HalfAwayFromZero`]).
///
/// ```
/// assert_eq!(fitkit::rounding::round_to(6.445677, 2).unwrap(), 6.45);
/// ```
pub fn round_to(value: f64, places: u32) -> Result<f64, RoundingError> {
    round_to_places(value, places, RoundingMode::HalfAwayFromZero)
}

/// Format with zero decimals when integral, else with exactly
/// `keep_places` decimals.
///
/// This is plain binary-float formatting, not decimal-exact rounding —
/// it exists for display strings where trailing `.0` on whole numbers
/// is unwanted. Unlike [`round_to_places`] there is no error path:
/// non-finite values format as `Display` does (`"NaN"`, `"inf"`,
/// `"-inf"`).
///
/// ```
/// use fitkit::rounding::clean_decimal;
///
/// assert_eq!(clean_decimal(6.0, 2), "6");
/// assert_eq!(clean_decimal(6.5, 2), "6.50");
/// ```
pub fn clean_decimal(value: f64, keep_places: usize) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{:.*}", keep_places, value)
    }
}

/// Compare a discarded digit string against exactly one half
/// (`5` followed by zeros).
fn compare_to_half(discarded: &[u8]) -> Ordering {
    let first = discarded.first().copied().unwrap_or(b'0');
    match first.cmp(&b'5') {
        Ordering::Greater => Ordering::Greater,
        Ordering::Less => Ordering::Less,
        Ordering::Equal => {
            if discarded[1..].iter().all(|&b| b == b'0') {
                Ordering::Equal
            } else {
                Ordering::Greater
            }
        }
    }
}

/// Add one at the last digit, propagating the carry. A carry past the
/// first digit prepends a `1`.
fn increment_digits(digits: &mut Vec<u8>) {
    for b in digits.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
