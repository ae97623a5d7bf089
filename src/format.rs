use crate::error::ContentError;

/// Unit of measure declared by `%MO…*%` (or the deprecated G70/G71).
///
/// Emitted coordinates are raw format units, so the unit never enters any
/// arithmetic; it is carried for completeness and duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Millimeters,
    Inches,
}

/// Which side's zeroes may be omitted from packed coordinate numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroOmission {
    Leading,
    Trailing,
}

/// Absolute or incremental coordinate notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateMode {
    Absolute,
    Incremental,
}

/// Coordinate format declared by `%FS…*%`, immutable for the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateFormat {
    pub zero_omission: ZeroOmission,
    pub mode: CoordinateMode,
    /// Number of integer digits, 1..=6.
    pub integer: u8,
    /// Number of fractional digits, 1..=6.
    pub decimal: u8,
}

impl CoordinateFormat {
    pub fn new(zero_omission: ZeroOmission, mode: CoordinateMode, integer: u8, decimal: u8) -> Self {
        CoordinateFormat {
            zero_omission,
            mode,
            integer,
            decimal,
        }
    }

    /// `10^decimal`, the factor between a decimal value in the file's unit
    /// and the raw integer coordinate used downstream.
    pub fn factor(&self) -> f64 {
        10f64.powi(self.decimal as i32)
    }
}

/// Decode one packed coordinate token (an optional sign and digits, as found
/// after `X`/`Y`/`I`/`J`) into a raw integer coordinate.
///
/// With leading omission the token is the low-order end of the number, so a
/// plain integer parse is exact; with trailing omission the token is the
/// high-order end and is padded with zeroes up to the declared digit count
/// first.
pub fn decode_coordinate(token: &str, format: &CoordinateFormat) -> Result<i64, ContentError> {
    let (sign, digits) = match token.as_bytes().first().copied() {
        Some(b'+') => (1i64, &token[1..]),
        Some(b'-') => (-1i64, &token[1..]),
        _ => (1i64, token),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ContentError::FailedToParseCoordinate {
            coord_num_str: token.to_string(),
        });
    }

    let max_digits = format.integer + format.decimal;
    if digits.len() > max_digits as usize {
        return Err(ContentError::CoordinateTooLong {
            coord_num_str: token.to_string(),
            max_digits,
        });
    }

    let magnitude = match format.zero_omission {
        ZeroOmission::Leading => digits.parse::<i64>(),
        ZeroOmission::Trailing => {
            let mut padded = digits.to_string();
            while padded.len() < max_digits as usize {
                padded.push('0');
            }
            padded.parse::<i64>()
        }
    }
    .map_err(|_| ContentError::FailedToParseCoordinate {
        coord_num_str: token.to_string(),
    })?;

    Ok(sign * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leading_26() -> CoordinateFormat {
        CoordinateFormat::new(ZeroOmission::Leading, CoordinateMode::Absolute, 2, 6)
    }

    #[test]
    fn leading_omission_is_a_plain_integer_parse() {
        let fs = leading_26();
        assert_eq!(decode_coordinate("5000000", &fs).unwrap(), 5000000);
        assert_eq!(decode_coordinate("-18", &fs).unwrap(), -18);
        assert_eq!(decode_coordinate("+7", &fs).unwrap(), 7);
        assert_eq!(decode_coordinate("0", &fs).unwrap(), 0);
    }

    #[test]
    fn trailing_omission_pads_low_order_zeroes() {
        let fs = CoordinateFormat::new(ZeroOmission::Trailing, CoordinateMode::Absolute, 2, 3);
        // "1" is the high-order digit of a 5 digit number.
        assert_eq!(decode_coordinate("1", &fs).unwrap(), 10000);
        assert_eq!(decode_coordinate("-12", &fs).unwrap(), -12000);
        // A full-width number needs no padding.
        assert_eq!(decode_coordinate("12345", &fs).unwrap(), 12345);
    }

    #[test]
    fn over_long_and_junk_tokens_are_rejected() {
        let fs = CoordinateFormat::new(ZeroOmission::Leading, CoordinateMode::Absolute, 2, 3);
        assert!(matches!(
            decode_coordinate("123456", &fs),
            Err(ContentError::CoordinateTooLong { .. })
        ));
        assert!(matches!(
            decode_coordinate("12a4", &fs),
            Err(ContentError::FailedToParseCoordinate { .. })
        ));
        assert!(matches!(
            decode_coordinate("-", &fs),
            Err(ContentError::FailedToParseCoordinate { .. })
        ));
    }
}
