// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Integer Cell Parsing
//!
//! A cell is an integer when it is an optional `+` or `-` followed by one or
//! more ASCII digits, and the value fits the target type. Nothing else is
//! accepted: no surrounding whitespace, no digit separators, no decimal point
//! or exponent.
//!
//! ```rust
//! use rowcheck_scan::cell::{parse_cell, CellError};
//!
//! assert_eq!(parse_cell::<i64>("-42"), Ok(-42));
//! assert_eq!(parse_cell::<i64>("1,000"), Err(CellError::InvalidDigit));
//! assert_eq!(parse_cell::<i8>("300"), Err(CellError::OutOfRange));
//! ```

use num_traits::PrimInt;
use std::str::FromStr;

/// Why a cell failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CellError {
    /// The cell was empty or held only a sign.
    #[error("cell has no digits")]
    Empty,
    /// The cell contained a character other than a leading sign and ASCII digits.
    #[error("cell contains a non-digit character")]
    InvalidDigit,
    /// The digits are well formed but the value does not fit the integer type.
    #[error("cell value is out of range")]
    OutOfRange,
}

/// Parses `text` as an integer of type `T`.
///
/// # Errors
///
/// Returns a `CellError` describing why `text` is not an integer of type `T`.
pub fn parse_cell<T>(text: &str) -> Result<T, CellError>
where
    T: PrimInt + FromStr,
{
    let digits = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);

    if digits.is_empty() {
        return Err(CellError::Empty);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CellError::InvalidDigit);
    }

    // Shape is valid, so the only remaining failure is magnitude (or a minus
    // sign on an unsigned type).
    text.parse::<T>().map_err(|_| CellError::OutOfRange)
}

/// Returns `true` if `text` parses as an integer of type `T`.
#[inline]
pub fn is_integer<T>(text: &str) -> bool
where
    T: PrimInt + FromStr,
{
    parse_cell::<T>(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_and_signed_digits() {
        assert_eq!(parse_cell::<i64>("0"), Ok(0));
        assert_eq!(parse_cell::<i64>("123"), Ok(123));
        assert_eq!(parse_cell::<i64>("+7"), Ok(7));
        assert_eq!(parse_cell::<i64>("-7"), Ok(-7));
        assert_eq!(parse_cell::<i64>("0007"), Ok(7));
    }

    #[test]
    fn test_rejects_empty_and_bare_signs() {
        assert_eq!(parse_cell::<i64>(""), Err(CellError::Empty));
        assert_eq!(parse_cell::<i64>("+"), Err(CellError::Empty));
        assert_eq!(parse_cell::<i64>("-"), Err(CellError::Empty));
    }

    #[test]
    fn test_rejects_non_integer_shapes() {
        for text in ["x", "1.5", "1e3", "1,000", "1_000", " 1", "1 ", "--1", "+-1", "0x10", "١٢"] {
            assert_eq!(
                parse_cell::<i64>(text),
                Err(CellError::InvalidDigit),
                "{:?} must be rejected",
                text
            );
        }
    }

    #[test]
    fn test_range_depends_on_type() {
        assert_eq!(parse_cell::<i64>("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(parse_cell::<i64>("-9223372036854775808"), Ok(i64::MIN));
        assert_eq!(
            parse_cell::<i64>("9223372036854775808"),
            Err(CellError::OutOfRange)
        );
        assert_eq!(
            parse_cell::<i128>("9223372036854775808"),
            Ok(9_223_372_036_854_775_808i128)
        );
        assert_eq!(parse_cell::<u8>("-1"), Err(CellError::OutOfRange));
        assert_eq!(parse_cell::<u8>("255"), Ok(255));
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer::<i32>("-12"));
        assert!(!is_integer::<i32>("twelve"));
    }
}
