use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Signed number, either digit-grouped with a decimal part (`1,520.5`,
    /// `1.520,5`) or with an optional `,` or `.` decimal part.
    static ref NUMBER_REGEX: Regex =
        Regex::new(r"-?\d{1,3}(?:[.,]\d{3})+[.,]\d+|-?\d+(?:[.,]\d+)?")
            .expect("Invalid regex pattern");

    /// Unsigned literal, used when scanning prose where `-` is a separator.
    static ref LITERAL_REGEX: Regex =
        Regex::new(r"\d{1,3}(?:[.,]\d{3})+[.,]\d+|\d+(?:[.,]\d+)?")
            .expect("Invalid regex pattern");
}

/// Parse a single numeric literal, accepting either `,` or `.` as the
/// decimal separator.
pub fn parse_decimal(literal: &str) -> Option<f64> {
    literal.trim().replace(',', ".").parse::<f64>().ok()
}

const SEPARATORS: &[char] = &['.', ','];

/// Parse a matched literal. With more than one separator the last one is the
/// decimal point and the others group thousands.
fn parse_literal(literal: &str) -> Option<f64> {
    if literal.matches(SEPARATORS).count() < 2 {
        return parse_decimal(literal);
    }
    let pos = literal.rfind(SEPARATORS)?;
    let (whole, fraction) = literal.split_at(pos);
    format!("{}.{}", whole.replace(SEPARATORS, ""), &fraction[1..])
        .parse::<f64>()
        .ok()
}

/// Pull the first number out of a formatted catalog value such as `"$82.15"`,
/// `"27,48"`, `"1,520.5"` or `"1845 USD/ton"`.
pub fn parse_formatted_value(value: &str) -> Option<f64> {
    NUMBER_REGEX
        .find(value)
        .and_then(|m| parse_literal(m.as_str()))
}

/// Every numeric literal in `text`, in order of appearance.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    LITERAL_REGEX
        .find_iter(text)
        .filter_map(|m| parse_literal(m.as_str()))
        .collect()
}

/// Whether `value` lies within `tolerance` (a fraction) of `target`.
pub fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= target.abs() * tolerance
}
