/// Compiles a regex literal once per process and exposes it as `fn $name() -> &'static Regex`.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static ::regex::Regex {
            static R: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
            R.get_or_init(|| ::regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

/// Levenshtein edit distance over `char`s, two-row O(min(m,n)) space.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let (a, b, m, n) = if m <= n { (a, b, m, n) } else { (b, a, n, m) };

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Lowercase, trim and collapse runs of whitespace to a single space.
pub fn normalize_text(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit-distance similarity of two normalized strings, in `[0.0, 1.0]`.
pub fn similarity(s1: &str, s2: &str) -> f32 {
    let a = normalize_text(s1);
    let b = normalize_text(s2);
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(&a, &b) as f32 / max_len as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn empty_string_is_length_of_other() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
    }

    #[test]
    fn diacritics_count_as_one_edit() {
        // 'ố' is multi-byte; a byte-wise distance would report more than one edit.
        assert_eq!(levenshtein_distance("phố", "pho"), 1);
    }

    #[test]
    fn commutative() {
        assert_eq!(
            levenshtein_distance("vinmart", "vin mart q7"),
            levenshtein_distance("vin mart q7", "vinmart")
        );
    }

    #[test]
    fn similarity_ignores_case_and_spacing() {
        assert_eq!(similarity("  VIN   Mart ", "vin mart"), 1.0);
    }

    #[test]
    fn similarity_of_suffixed_name() {
        let s = similarity("VIN MART Q7", "VIN MART");
        assert!(s > 0.7 && s < 0.75, "score was {s}");
    }

    #[test]
    fn similarity_unrelated_is_low() {
        assert!(similarity("CIRCLE K", "BACH HOA XANH") < 0.3);
    }
}
