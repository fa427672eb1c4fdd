/// Production gateway.
pub const PRODUCTION_API_URL: &str = "https://openapi.alipay.com/gateway.do";

/// Sandbox gateway.
pub const SANDBOX_API_URL: &str = "https://openapi.alipaydev.com/gateway.do";

/// Value of the `format` field.
pub const FORMAT: &str = "JSON";

/// Value of the `charset` field.
pub const CHARSET: &str = "utf-8";

/// Value of the `version` field.
pub const VERSION: &str = "1.0";

/// `chrono` format string for the `timestamp` field (`yyyy-MM-dd HH:mm:ss`).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Suffix appended to the underscored method name to find the payload node.
pub const RESPONSE_SUFFIX: &str = "_response";

/// Request body content type.
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Provider timezone offset (UTC+8) used for `timestamp`.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;
