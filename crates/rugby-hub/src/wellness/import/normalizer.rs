/// Header key used for alias lookup: invisible marks dropped, punctuation and spacing
/// removed, lowercased. `"Sleep Quality (1-5)"` becomes `"sleepquality15"`.
pub(crate) fn normalize_header(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}'], "")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_header(value)
}
