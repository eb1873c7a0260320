/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local hour at which a studio's trading day begins
pub(crate) const BUSINESS_DAY_START_HOUR: u32 = 6;

/// Default local zone offset (IST, UTC+5:30) in seconds
pub(crate) const DEFAULT_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub(crate) const DEFAULT_API_URL: &str = "https://app.snookerplus.in/apis/data";

pub(crate) const DEFAULT_STUDIO: &str = "Default Studio";

pub(crate) const DEFAULT_CURRENCY: &str = "₹";

/// Fallback table id for frames that carry none
pub(crate) const UNKNOWN: &str = "unknown";
