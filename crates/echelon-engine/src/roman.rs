//! Roman-numeral row labels.
//!
//! Row labels use standard subtractive notation restricted to the symbols
//! I, V and X. That covers 1 through 39, far more rows than any system this
//! engine edits; this is deliberately not a general Roman-numeral parser.

/// Converts a 1-based row number to its Roman label.
#[must_use]
pub fn to_roman(mut n: usize) -> String {
    const NUMERALS: [(&str, usize); 5] = [("X", 10), ("IX", 9), ("V", 5), ("IV", 4), ("I", 1)];
    let mut result = String::new();
    for (roman, value) in NUMERALS {
        while n >= value {
            result.push_str(roman);
            n -= value;
        }
    }
    result
}

/// Parses a Roman label back to its 1-based row number.
///
/// Returns `None` for the empty string or any character outside I, V, X.
#[must_use]
pub fn from_roman(s: &str) -> Option<usize> {
    if s.is_empty() {
        return None;
    }
    let values: Vec<usize> = s
        .chars()
        .map(|c| match c {
            'I' => Some(1),
            'V' => Some(5),
            'X' => Some(10),
            _ => None,
        })
        .collect::<Option<_>>()?;

    let mut result = 0;
    for (i, &current) in values.iter().enumerate() {
        // A smaller symbol before a larger one subtracts (IV, IX, ...)
        if values.get(i + 1).is_some_and(|&next| current < next) {
            result -= current as isize;
        } else {
            result += current as isize;
        }
    }
    usize::try_from(result).ok().filter(|&n| n > 0)
}
