//! Number <-> string conversions used by the coercion engine.
//!
//! - [`to_js_string`] is `Number::toString(10)`
//! - [`string_to_number`] is StringToNumber (used by ToNumber)
//! - [`parse_float_prefix`] / [`parse_int_prefix`] back `parseFloat` / `parseInt`

/// Format a number per `Number::toString` (radix 10).
pub fn to_js_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n < 0.0 {
        return format!("-{}", to_js_string(-n));
    }

    // Shortest round-trip digits: "d.ddde±x"
    let sci = format!("{:e}", n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n_exp = exp + 1;

    if k <= n_exp && n_exp <= 21 {
        let mut out = digits;
        out.extend(std::iter::repeat_n('0', (n_exp - k) as usize));
        out
    } else if 0 < n_exp && n_exp <= 21 {
        let (int_part, frac_part) = digits.split_at(n_exp as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n_exp && n_exp <= 0 {
        format!("0.{}{}", "0".repeat((-n_exp) as usize), digits)
    } else {
        let e = n_exp - 1;
        let sign = if e < 0 { '-' } else { '+' };
        if k == 1 {
            format!("{}e{}{}", digits, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", &digits[..1], &digits[1..], sign, e.abs())
        }
    }
}

fn is_js_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// StringToNumber: the ToNumber conversion for string operands.
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        let mut result = 0.0_f64;
        for c in digits.chars() {
            match c.to_digit(radix) {
                Some(d) => result = result * radix as f64 + d as f64,
                None => return f64::NAN,
            }
        }
        return result;
    }

    // Rust's float parser also accepts "inf"/"nan"; JS does not
    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !valid {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Longest StrDecimalLiteral prefix of `s` (after leading whitespace), as `parseFloat` reads it.
pub fn parse_float_prefix(s: &str) -> f64 {
    let input = s.trim_start_matches(is_js_whitespace);
    let bytes = input.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    if input[i..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if mantissa_digits > 0 || j > frac_start {
            mantissa_digits += j - frac_start;
            i = j;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    input[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// `parseInt` on an already ToString-coerced input.
pub fn parse_int_prefix(s: &str, radix: i32) -> f64 {
    let input = s.trim_start_matches(is_js_whitespace);
    let (sign, rest) = match input.as_bytes().first() {
        Some(b'-') => (-1.0, &input[1..]),
        Some(b'+') => (1.0, &input[1..]),
        _ => (1.0, input),
    };

    let mut radix = radix;
    let mut strip_prefix = true;
    if radix != 0 {
        if !(2..=36).contains(&radix) {
            return f64::NAN;
        }
        if radix != 16 {
            strip_prefix = false;
        }
    } else {
        radix = 10;
    }

    // Check for 0x/0X prefix
    let digits = if strip_prefix && (rest.starts_with("0x") || rest.starts_with("0X")) {
        radix = 16;
        &rest[2..]
    } else {
        rest
    };

    let mut result = 0.0_f64;
    let mut any_valid = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix as u32) else {
            break;
        };
        any_valid = true;
        result = result * radix as f64 + d as f64;
    }

    if !any_valid {
        return f64::NAN;
    }
    sign * result
}
