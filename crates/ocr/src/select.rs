//! Picks one text per region out of the recognizer outputs for its
//! enhancement variants.

/// Punctuation that legitimately appears on receipts and is not counted as noise.
const ALLOWED_PUNCTUATION: &[char] = &[',', '.', '\'', '/', '-', '(', ')', ':'];

/// Quality score of one recognizer output. Longer, letter-dense, digit-bearing
/// text scores higher; stray symbols cost one point each.
pub fn score(text: &str) -> f32 {
    let (mut len, mut alpha, mut digits, mut noise) = (0u32, 0u32, 0u32, 0u32);
    for c in text.chars() {
        len += 1;
        if c.is_alphabetic() {
            alpha += 1;
        }
        if c.is_ascii_digit() {
            digits += 1;
        }
        if !c.is_alphanumeric() && !c.is_whitespace() && !ALLOWED_PUNCTUATION.contains(&c) {
            noise += 1;
        }
    }
    2.0 * len as f32 + 3.0 * alpha as f32 + 1.5 * digits as f32 - noise as f32
}

/// Highest-scoring candidate; the first one wins a tie. `None` for no candidates.
pub fn select_best<S: AsRef<str>>(candidates: &[S]) -> Option<&str> {
    let mut best: Option<(&str, f32)> = None;
    for candidate in candidates {
        let text = candidate.as_ref();
        let s = score(text);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((text, s));
        }
    }
    best.map(|(text, _)| text)
}
