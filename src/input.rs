/// Why raw text could not be turned into a value. The messages are shown to
/// the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Valeur invalide")]
    InvalidInput,
    #[error("Nombre trop grand ou trop petit")]
    OutOfRange,
}

/// Validates raw input text.
///
/// `Ok(None)` means nothing was typed yet, which is not an error: the caller
/// clears its output instead of reporting a problem.
pub fn validate_value(raw: Option<&str>) -> Result<Option<f64>, InputError> {
    let text = match raw {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(None),
    };
    let value = parse_float_prefix(text).ok_or(InputError::InvalidInput)?;
    if !value.is_finite() {
        return Err(InputError::OutOfRange);
    }
    Ok(Some(value))
}

/// Parses the longest leading decimal literal of `text`, ignoring leading
/// whitespace and anything after the literal: `"42abc"` is 42, `"3,5"` is 3.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}');
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // An exponent only counts when it has digits: "1e" reads as 1.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
