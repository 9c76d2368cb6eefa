/// Number of fractional digits an exchange rate is stored with
pub const RATE_SCALE: u32 = 8;

/// Longest tag description that is accepted
pub const MAX_TAG_DESCRIPTION_LEN: usize = 2048;

/// Default base currency for new settings
pub const DEFAULT_BASE_CURRENCY: &str = "USD";
