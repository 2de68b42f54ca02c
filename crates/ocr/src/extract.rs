use hoadon_core::{Category, ExtractedReceipt, ExtractionConfig, RecognizedRegion};

use crate::aggregate::{aggregate, RawFields};
use crate::amount::max_amount_in;
use crate::date::{find_date, mask_dates};
use crate::keywords::KeywordSet;
use crate::store::StoreResolver;

// A house number followed by a capitalised street name and nothing numeric after it.
re!(re_street_line,
    r"^\s*\d{1,5}(?:/\d{1,5})*[A-Za-z]?\s+\p{Lu}[^\d]*$");

// ── Public extraction API ─────────────────────────────────────────────────────

/// Turns the recognized regions of one receipt into its structured fields.
///
/// Each field runs its own fallback chain and yields an empty value (or `0`)
/// when every strategy fails; nothing here returns an error.
pub struct Extractor {
    config: ExtractionConfig,
    store: StoreResolver,
    total_keywords: KeywordSet,
    address_keywords: KeywordSet,
    address_anchors: KeywordSet,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            store: StoreResolver::new(&config),
            total_keywords: KeywordSet::new(&config.total_keywords),
            address_keywords: KeywordSet::new(&config.address_keywords),
            address_anchors: KeywordSet::new(&config.address_anchor_keywords),
            config,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn extract(&self, regions: &[RecognizedRegion]) -> ExtractedReceipt {
        let receipt = aggregate(self.extract_fields(regions));
        tracing::info!(
            regions = regions.len(),
            completeness = receipt.completeness,
            success = receipt.success,
            "receipt extracted"
        );
        receipt
    }

    pub fn extract_fields(&self, regions: &[RecognizedRegion]) -> RawFields {
        RawFields {
            store_name: self.extract_store(regions),
            date: self.extract_date(regions),
            total_amount: self.extract_total(regions),
            address: self.extract_address(regions),
        }
    }

    // ── Store ─────────────────────────────────────────────────────────────────

    pub fn extract_store(&self, regions: &[RecognizedRegion]) -> String {
        self.store.resolve(regions)
    }

    // ── Date ──────────────────────────────────────────────────────────────────

    pub fn extract_date(&self, regions: &[RecognizedRegion]) -> String {
        if let Some(d) = find_date(&joined_text(regions, Some(Category::Date))) {
            tracing::debug!(date = %d, "date from DATE regions");
            return d;
        }
        if let Some(d) = find_date(&joined_text(regions, None)) {
            tracing::debug!(date = %d, "date from full text");
            return d;
        }
        String::new()
    }

    // ── Total ─────────────────────────────────────────────────────────────────

    /// Largest in-range amount, looking first at TOTAL regions, then at lines
    /// naming a total, then at every line that does not look like an address.
    pub fn extract_total(&self, regions: &[RecognizedRegion]) -> i64 {
        let (min, max) = (self.config.min_amount, self.config.max_amount);

        let tagged = regions
            .iter()
            .filter(|r| r.category() == Category::Total)
            .filter_map(|r| max_amount_in(&mask_dates(&r.text), min, max))
            .max();
        if let Some(total) = tagged {
            tracing::debug!(total, "total from TOTAL regions");
            return total;
        }

        let keyed = all_lines(regions)
            .filter(|l| self.total_keywords.matches(l))
            .filter_map(|l| max_amount_in(&mask_dates(l), min, max))
            .max();
        if let Some(total) = keyed {
            tracing::debug!(total, "total from keyword line");
            return total;
        }

        let loose = all_lines(regions)
            .filter(|l| !self.is_address_like(l))
            .filter_map(|l| max_amount_in(&mask_dates(l), min, max))
            .max();
        if let Some(total) = loose {
            tracing::debug!(total, "total from unlabelled line");
            return total;
        }
        0
    }

    fn is_address_like(&self, line: &str) -> bool {
        self.address_keywords.matches(line) || re_street_line().is_match(line)
    }

    // ── Address ───────────────────────────────────────────────────────────────

    pub fn extract_address(&self, regions: &[RecognizedRegion]) -> String {
        let min_len = self.config.min_address_fragment_len;
        let fragments: Vec<&str> = regions
            .iter()
            .filter(|r| r.category() == Category::Address)
            .map(|r| r.text.trim())
            .filter(|t| t.chars().count() > min_len)
            .collect();
        if !fragments.is_empty() {
            return fragments.join(" ");
        }

        match self.address_anchors.text_after(&joined_text(regions, None)) {
            Some(found) => {
                tracing::debug!(address = %found, "address found after keyword");
                found
            }
            None => String::new(),
        }
    }
}

// ── Text helpers ──────────────────────────────────────────────────────────────

/// Region texts joined by newlines, optionally restricted to one category.
fn joined_text(regions: &[RecognizedRegion], only: Option<Category>) -> String {
    regions
        .iter()
        .filter(|r| only.map_or(true, |c| r.category() == c))
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn all_lines(regions: &[RecognizedRegion]) -> impl Iterator<Item = &str> {
    regions.iter().flat_map(|r| r.text.lines())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use hoadon_core::CanonicalStore;

    fn region(category: Category, text: &str) -> RecognizedRegion {
        RecognizedRegion::tagged(category, text)
    }

    // ── Total ─────────────────────────────────────────────────────────────────

    #[test]
    fn total_from_tagged_region() {
        let regions = vec![region(Category::Total, "Tổng tiền: 123,456 VNĐ")];
        assert_eq!(Extractor::default().extract_total(&regions), 123_456);
    }

    #[test]
    fn total_takes_largest_tagged_value() {
        let regions = vec![
            region(Category::Total, "45,000"),
            region(Category::Total, "Cộng 120.000"),
            region(Category::Unknown, "Tổng 900,000"),
        ];
        assert_eq!(Extractor::default().extract_total(&regions), 120_000);
    }

    #[test]
    fn total_ignores_out_of_range_tagged_values() {
        let regions = vec![
            region(Category::Total, "999"),
            region(Category::Unknown, "Thanh toán 50,000đ"),
        ];
        assert_eq!(Extractor::default().extract_total(&regions), 50_000);
    }

    #[test]
    fn tagged_total_ignores_dates() {
        let regions = vec![region(Category::Total, "Tổng: 1.500đ 15/08/2020")];
        assert_eq!(Extractor::default().extract_total(&regions), 1_500);
    }

    #[test]
    fn total_from_keyword_line() {
        let regions = vec![
            region(Category::Unknown, "Trà sữa 2 x 30,000\nThanh toán 50,000đ"),
            region(Category::Unknown, "Tiền khách đưa 100,000"),
        ];
        assert_eq!(Extractor::default().extract_total(&regions), 50_000);
    }

    #[test]
    fn keyword_line_dates_are_not_amounts() {
        let regions = vec![region(Category::Unknown, "Tổng kết ngày 15/08/2020")];
        assert_eq!(Extractor::default().extract_total(&regions), 0);
    }

    #[test]
    fn total_last_resort_skips_address_lines() {
        let regions = vec![
            region(Category::Unknown, "Số 1234 đường Nguyễn Trãi"),
            region(Category::Unknown, "Bánh mì 25,000"),
        ];
        assert_eq!(Extractor::default().extract_total(&regions), 25_000);
    }

    #[test]
    fn street_line_is_address_like() {
        let e = Extractor::default();
        assert!(e.is_address_like("590 Trần Phú"));
        assert!(e.is_address_like("12/3B Lê Lợi"));
        assert!(!e.is_address_like("2 Pepsi 20,000"));
        assert!(!e.is_address_like("Bánh mì 25,000"));
    }

    #[test]
    fn total_zero_when_nothing_found() {
        let regions = vec![region(Category::Address, "590 Trần Phú")];
        assert_eq!(Extractor::default().extract_total(&regions), 0);
        assert_eq!(Extractor::default().extract_total(&[]), 0);
    }

    #[test]
    fn total_respects_configured_bounds() {
        let config = ExtractionConfig { min_amount: 60_000, ..ExtractionConfig::default() };
        let regions = vec![region(Category::Total, "50,000")];
        assert_eq!(Extractor::new(config).extract_total(&regions), 0);
    }

    // ── Date ──────────────────────────────────────────────────────────────────

    #[test]
    fn date_prefers_tagged_region() {
        let regions = vec![
            region(Category::Unknown, "In lúc 01/01/2021"),
            region(Category::Date, "Ngày: 2020-08-15"),
        ];
        assert_eq!(Extractor::default().extract_date(&regions), "15/08/2020");
    }

    #[test]
    fn date_falls_back_to_all_text() {
        let regions = vec![
            region(Category::Date, "Ngày bán"),
            region(Category::Unknown, "HĐ 0012 - 15.8.20 - Quầy 3"),
        ];
        assert_eq!(Extractor::default().extract_date(&regions), "15/08/2020");
    }

    #[test]
    fn date_empty_when_absent() {
        let regions = vec![region(Category::Date, "Quầy 3")];
        assert_eq!(Extractor::default().extract_date(&regions), "");
    }

    // ── Address ───────────────────────────────────────────────────────────────

    #[test]
    fn address_joins_tagged_fragments_in_order() {
        let regions = vec![
            region(Category::Address, " 590 Trần Phú "),
            region(Category::Address, "Q5"),
            region(Category::Address, "TP. Hồ Chí Minh"),
        ];
        assert_eq!(
            Extractor::default().extract_address(&regions),
            "590 Trần Phú TP. Hồ Chí Minh"
        );
    }

    #[test]
    fn address_keyword_fallback() {
        let regions = vec![region(Category::Unknown, "VINMART\nĐịa chỉ: 72 Lê Thánh Tôn, Q1")];
        assert_eq!(
            Extractor::default().extract_address(&regions),
            "72 Lê Thánh Tôn, Q1"
        );
    }

    #[test]
    fn address_keyword_in_its_own_region() {
        let regions = vec![
            region(Category::Unknown, "Địa chỉ:"),
            region(Category::Unknown, "12 Lê Lợi, Q1"),
        ];
        assert_eq!(Extractor::default().extract_address(&regions), "12 Lê Lợi, Q1");
    }

    #[test]
    fn address_empty_when_absent() {
        let regions = vec![region(Category::Address, "Q1")];
        assert_eq!(Extractor::default().extract_address(&regions), "");
    }

    // ── Whole receipt ─────────────────────────────────────────────────────────

    #[test]
    fn complete_receipt_succeeds() {
        let config = ExtractionConfig::with_stores(vec![CanonicalStore::new(
            "VINMART",
            ["VINMART", "VIN MART"],
        )]);
        let regions = vec![
            region(Category::Store, "VIN MART Q7"),
            region(Category::Address, "590 Trần Phú, P7, Q5"),
            region(Category::Date, "15/08/2020 10:32"),
            region(Category::Total, "Tổng tiền: 123,456 VNĐ"),
        ];
        let r = Extractor::new(config).extract(&regions);
        assert_eq!(r.store_name, "VINMART");
        assert_eq!(r.date, "15/08/2020");
        assert_eq!(r.total_amount, 123_456);
        assert_eq!(r.address, "590 Trần Phú, P7, Q5");
        assert_eq!(r.completeness, 1.0);
        assert!(r.success);
    }

    #[test]
    fn empty_input_is_well_formed() {
        let r = Extractor::default().extract(&[]);
        assert_eq!(r.completeness, 0.0);
        assert!(!r.success);
        assert_eq!(r.message, hoadon_core::MSG_INCOMPLETE);
    }

    #[test]
    fn no_panic_on_garbage_input() {
        let regions = vec![
            region(Category::Total, "!@#$%^&*()\n\0\x01\x02"),
            region(Category::Store, "¶¶¶"),
            region(Category::Date, "99/99/99"),
        ];
        let _ = Extractor::default().extract(&regions);
    }
}
