//! # Unit Formatting
//!
//! Fixed-point scaling between the chain's smallest unit (wei) and the
//! display units of the explorer. The wei path is integer-only; floating
//! point appears only where the display value is itself a float (gwei
//! chart samples).

use super::validation::{ValidationError, ValidationResult};

/// Decimals of the native coin.
pub const NATIVE_DECIMALS: u32 = 18;

/// Wei per gwei.
const WEI_PER_GWEI: f64 = 1e9;

/// Formats a wei amount as a decimal coin string.
///
/// Scales by `10^decimals` using integer arithmetic, trimming trailing
/// zeros from the fractional part: `1_500_000_000_000_000_000` wei with
/// 18 decimals formats as `"1.5"`.
#[must_use]
pub fn format_wei(wei: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let whole = wei / scale;
    let frac = wei % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_digits = format!("{:0>width$}", frac, width = decimals as usize);
    let trimmed = frac_digits.trim_end_matches('0');
    format!("{}.{}", whole, trimmed)
}

/// Formats a wei amount with the native 18 decimals.
#[must_use]
pub fn format_native(wei: u128) -> String {
    format_wei(wei, NATIVE_DECIMALS)
}

/// Parses a decimal coin amount into wei.
///
/// Accepts plain (`"1"`) and fractional (`"0.25"`) decimal forms. The
/// amount must be strictly positive and carry no more fractional digits
/// than `decimals`.
///
/// # Errors
///
/// Returns [`ValidationError::Amount`] for empty, non-decimal, zero, or
/// over-precise input.
pub fn parse_to_wei(input: &str, decimals: u32) -> ValidationResult<u128> {
    let trimmed = input.trim();
    let reject = || ValidationError::amount(trimmed);

    let (whole_text, frac_text) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole_text.is_empty() && frac_text.is_empty() {
        return Err(reject());
    }
    if !whole_text.chars().all(|c| c.is_ascii_digit())
        || !frac_text.chars().all(|c| c.is_ascii_digit())
    {
        return Err(reject());
    }
    if frac_text.len() > decimals as usize {
        return Err(reject());
    }

    let scale = 10u128.pow(decimals);
    let whole: u128 = if whole_text.is_empty() {
        0
    } else {
        whole_text.parse().map_err(|_| reject())?
    };
    let frac: u128 = if frac_text.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_text, width = decimals as usize);
        padded.parse().map_err(|_| reject())?
    };

    let wei = whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(|| reject())?;
    if wei == 0 {
        return Err(reject());
    }
    Ok(wei)
}

/// Converts a wei gas price to gwei for display.
#[must_use]
pub fn wei_to_gwei(wei: u128) -> f64 {
    wei as f64 / WEI_PER_GWEI
}

/// Formats a gas quantity with thousands separators: `21000` -> `21,000`.
#[must_use]
pub fn format_gas(gas: u64) -> String {
    let digits = gas.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
