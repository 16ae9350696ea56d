const MASK_CHAR: char = '*';

/// Masks a subscriber number for log output: the first 4 and last 3
/// characters are kept, the interior is replaced, and length is preserved.
///
/// Numbers of 6 characters or fewer are returned unmasked.
#[must_use]
pub fn mask_msisdn(number: &str) -> String {
    let len = number.chars().count();
    if len <= 6 {
        return number.to_string();
    }

    number
        .chars()
        .enumerate()
        .map(|(i, c)| if i < 4 || i >= len - 3 { c } else { MASK_CHAR })
        .collect()
}
