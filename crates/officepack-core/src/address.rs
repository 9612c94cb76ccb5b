//! A1-style cell reference codec
//!
//! Cell references use column letters (`A`..`Z`, `AA`, ...) followed by a
//! 1-based row number. Internally rows and columns are 0-based, so `"A1"` is
//! `(0, 0)` and `"AB120"` is `(119, 27)`.
//!
//! Column letters form a bijective base-26 numeral: every letter contributes
//! `value(letter) * 26^position` with `A = 1 .. Z = 26`; there is no zero digit.

use crate::error::{Error, Result};

/// Parse an A1-style reference into a 0-based `(row, col)` pair.
///
/// # Examples
/// ```
/// use officepack_core::parse_address;
///
/// assert_eq!(parse_address("A1").unwrap(), (0, 0));
/// assert_eq!(parse_address("AB120").unwrap(), (119, 27));
/// assert!(parse_address("120").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<(u32, u32)> {
    let bytes = text.as_bytes();
    let split = bytes
        .iter()
        .position(|b| !b.is_ascii_alphabetic())
        .unwrap_or(bytes.len());

    let (letters, digits) = text.split_at(split);
    if letters.is_empty() {
        return Err(Error::InvalidAddress(format!(
            "no column letters in '{}'",
            text
        )));
    }
    if digits.is_empty() {
        return Err(Error::InvalidAddress(format!("no row number in '{}'", text)));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidAddress(format!(
            "unexpected characters in '{}'",
            text
        )));
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", text)))?;
    if row == 0 {
        return Err(Error::InvalidAddress(format!(
            "row number must be >= 1 in '{}'",
            text
        )));
    }

    let col = parse_column(letters)?;
    Ok((row - 1, col))
}

/// Convert column letters to a 0-based index (A = 0, Z = 25, AA = 26, ...)
pub fn parse_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut col: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
        if col > u32::MAX as u64 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' is too large",
                letters
            )));
        }
    }

    Ok((col - 1) as u32)
}

/// Convert a 0-based column index to letters (0 = A, 25 = Z, 26 = AA, ...)
pub fn format_column(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col as u64 + 1;

    while n > 0 {
        let digit = (n - 1) % 26;
        letters.push(b'A' + digit as u8);
        n = (n - 1) / 26;
    }

    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Format a 0-based `(row, col)` pair as an A1-style reference.
pub fn format_address(row: u32, col: u32) -> String {
    format!("{}{}", format_column(col), row as u64 + 1)
}

/// Format a rectangular range such as `A1:C3`.
pub fn format_range(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> String {
    format!(
        "{}:{}",
        format_address(first_row, first_col),
        format_address(last_row, last_col)
    )
}

/// Parse `A1:C3` (or a single cell `B2`) into `((first_row, first_col), (last_row, last_col))`.
pub fn parse_range(text: &str) -> Result<((u32, u32), (u32, u32))> {
    let text = text.trim();
    match text.split_once(':') {
        Some((start, end)) => {
            let start = parse_address(start)
                .map_err(|_| Error::InvalidRange(text.to_string()))?;
            let end = parse_address(end).map_err(|_| Error::InvalidRange(text.to_string()))?;
            Ok((start, end))
        }
        None => {
            let cell = parse_address(text).map_err(|_| Error::InvalidRange(text.to_string()))?;
            Ok((cell, cell))
        }
    }
}
