pub mod network {
    pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
    pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];
}

pub mod commands {
    pub const LIST_TRIGGER: &str = "webhooks";
}

pub mod replies {
    pub const SUCCESS_DEFAULT: &str = "Request sent successfully";
    pub const ERROR_STATUS_DEFAULT: &str = "Request failed with status {status}";
    pub const ERROR_TRANSPORT_DEFAULT: &str = "Request failed: {error}";
}
