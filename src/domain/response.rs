/// Error details reported by the messaging API on a non-2xx response.
///
/// Every field is optional; absent or `null` values stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub more_info: Option<String>,
}
