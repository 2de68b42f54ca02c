use regex::Regex;

/// A case-insensitive keyword list, compiled once. Keywords only match at the
/// start of a word, so `mart` does not fire inside `SMARTPHONE`.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    words: Vec<Regex>,
    anchors: Vec<Regex>,
}

impl KeywordSet {
    pub fn new(keywords: &[String]) -> Self {
        let prefixes: Vec<String> = keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(|k| {
                let boundary = if k.starts_with(char::is_alphanumeric) { r"\b" } else { "" };
                format!(r"(?i){boundary}{}", regex::escape(k))
            })
            .collect();
        let words = prefixes.iter().filter_map(|p| Regex::new(p).ok()).collect();
        // Keyword, optional punctuation, then the first non-blank line after it:
        // the rest of its own line, or the next line when it stands alone.
        let anchors = prefixes
            .iter()
            .filter_map(|p| Regex::new(&format!(r"{p}[\s:.\-]*([^\n]+)")).ok())
            .collect();
        Self { words, anchors }
    }

    /// Whether `line` mentions any keyword.
    pub fn matches(&self, line: &str) -> bool {
        self.words.iter().any(|re| re.is_match(line))
    }

    /// Trimmed text following the first keyword (in list order) that is followed
    /// by anything at all.
    pub fn text_after(&self, text: &str) -> Option<String> {
        self.anchors.iter().find_map(|re| {
            re.captures_iter(text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
                .find(|rest| !rest.is_empty())
        })
    }
}
