use hoadon_core::ExtractedReceipt;

/// Field values as the extractors produced them, before clean-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub store_name: String,
    pub date: String,
    pub total_amount: i64,
    pub address: String,
}

/// Normalize the extractor outputs and derive completeness, success and the
/// status message.
pub fn aggregate(fields: RawFields) -> ExtractedReceipt {
    ExtractedReceipt::from_fields(
        fields.store_name.trim().to_uppercase(),
        fields.date.trim().to_string(),
        fields.total_amount.max(0),
        fields.address.trim().to_string(),
    )
}
