use serde::{Deserialize, Serialize};

/// A merchant's standard name plus the spellings OCR tends to produce for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalStore {
    pub name: String,
    pub variants: Vec<String>,
}

impl CanonicalStore {
    pub fn new<S: Into<String>>(name: &str, variants: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_string(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

/// Built-in dictionary of Vietnamese retail chains.
pub fn default_stores() -> Vec<CanonicalStore> {
    vec![
        CanonicalStore::new("VINMART", ["VINMART", "VIN MART", "VINMART+", "VINMARTPLUS"]),
        CanonicalStore::new("WINMART", ["WINMART", "WIN MART", "WINMART+", "WM+"]),
        CanonicalStore::new("CO.OPMART", ["CO.OPMART", "COOPMART", "CO OP MART", "SAIGON CO.OP"]),
        CanonicalStore::new("CO.OP FOOD", ["CO.OP FOOD", "COOP FOOD", "COOPFOOD"]),
        CanonicalStore::new("BACH HOA XANH", ["BACH HOA XANH", "BÁCH HÓA XANH", "BACHHOAXANH"]),
        CanonicalStore::new("BIG C", ["BIG C", "BIGC", "GO!", "GO! BIG C"]),
        CanonicalStore::new("LOTTE MART", ["LOTTE MART", "LOTTEMART", "LOTTE"]),
        CanonicalStore::new("AEON", ["AEON", "AEON MALL", "AEON CITIMART"]),
        CanonicalStore::new("CIRCLE K", ["CIRCLE K", "CIRCLEK", "CIRCLE-K"]),
        CanonicalStore::new("FAMILYMART", ["FAMILYMART", "FAMILY MART"]),
        CanonicalStore::new("MINISTOP", ["MINISTOP", "MINI STOP"]),
        CanonicalStore::new("GS25", ["GS25", "GS 25"]),
        CanonicalStore::new("7-ELEVEN", ["7-ELEVEN", "7 ELEVEN", "SEVEN ELEVEN"]),
        CanonicalStore::new("MEGA MARKET", ["MEGA MARKET", "MM MEGA MARKET", "METRO"]),
        CanonicalStore::new("HIGHLANDS COFFEE", ["HIGHLANDS COFFEE", "HIGHLANDS"]),
        CanonicalStore::new("PHUC LONG", ["PHUC LONG", "PHÚC LONG", "PHUC LONG COFFEE & TEA"]),
        CanonicalStore::new("THE COFFEE HOUSE", ["THE COFFEE HOUSE", "COFFEE HOUSE"]),
    ]
}
