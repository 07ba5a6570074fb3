// constants.rs

// Work item parameter keys
pub const PARAM_URL: &str = "Url";
pub const PARAM_METHOD: &str = "Method";
pub const PARAM_CONTENT_TYPE: &str = "ContentType";
pub const PARAM_CONTENT: &str = "Content";
pub const PARAM_ACCEPT_HEADER: &str = "AcceptHeader";
pub const PARAM_CONNECT_TIMEOUT: &str = "ConnectTimeout";
pub const PARAM_READ_TIMEOUT: &str = "ReadTimeout";
pub const PARAM_HANDLE_RESPONSE_ERRORS: &str = "HandleResponseErrors";

// Outcome keys as seen by the host result sink
pub const RESULT_KEY: &str = "Result";
pub const STATUS_KEY: &str = "Status";
pub const STATUS_MSG_KEY: &str = "StatusMsg";

// HTTP header names
pub const HTTP_HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HTTP_HEADER_ACCEPT: &str = "Accept";

// Defaults applied when a parameter is absent or unusable
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
