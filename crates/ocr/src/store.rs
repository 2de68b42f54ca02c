use hoadon_core::{CanonicalStore, Category, ExtractionConfig, RecognizedRegion};

use crate::keywords::KeywordSet;
use crate::util::similarity;

/// Maps noisy store-name text onto the merchant dictionary, falling back to
/// the raw text when nothing in the dictionary is close enough.
pub struct StoreResolver {
    stores: Vec<CanonicalStore>,
    threshold: f32,
    keywords: KeywordSet,
}

impl StoreResolver {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            stores: config.stores.clone(),
            threshold: config.store_match_threshold,
            keywords: KeywordSet::new(&config.store_keywords),
        }
    }

    /// Best dictionary entry for `text` with its ratio, if any variant scores
    /// strictly above the threshold. Earlier entries win ties.
    pub fn best_match(&self, text: &str) -> Option<(&CanonicalStore, f32)> {
        if text.trim().is_empty() {
            return None;
        }
        let mut best: Option<(&CanonicalStore, f32)> = None;
        for store in &self.stores {
            for variant in &store.variants {
                let ratio = similarity(text, variant);
                if best.map_or(true, |(_, r)| ratio > r) {
                    best = Some((store, ratio));
                }
            }
        }
        best.filter(|(_, r)| *r > self.threshold)
    }

    /// Resolve the store name for a receipt. Empty when every strategy fails.
    pub fn resolve(&self, regions: &[RecognizedRegion]) -> String {
        let fragments: Vec<&str> = regions
            .iter()
            .filter(|r| r.category() == Category::Store)
            .map(|r| r.text.trim())
            .filter(|t| !t.is_empty())
            .collect();

        let joined = fragments.join(" ");
        if let Some((store, ratio)) = self.best_match(&joined) {
            tracing::debug!(store = %store.name, ratio, "store matched dictionary");
            return store.name.clone();
        }

        // `rev` so the first of equally long fragments wins.
        let longest = fragments
            .iter()
            .copied()
            .filter(|t| t.chars().count() > 1)
            .rev()
            .max_by_key(|t| t.chars().count());
        if let Some(raw) = longest {
            tracing::debug!(store = raw, "store taken from longest fragment");
            return raw.to_string();
        }

        let all_text = regions
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        match self.keywords.text_after(&all_text) {
            Some(found) => {
                tracing::debug!(store = %found, "store found after keyword");
                found
            }
            None => String::new(),
        }
    }
}
