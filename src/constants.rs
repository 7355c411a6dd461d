pub mod marketplace {
    /// Browser-like identity; the search endpoint serves a stripped page to
    /// unknown agents.
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36";

    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

    pub const BASE_URL: &str = "https://www.amazon.com";
}

pub mod retry {
    use std::time::Duration;

    pub const MAX_RETRIES: u32 = 3;

    pub const BASE_DELAY: Duration = Duration::from_secs(1);

    /// Transient upstream statuses worth retrying.
    pub const RETRYABLE_STATUSES: &[u16] = &[500, 502, 503, 504];
}

pub mod limits {

    pub const MAX_PAGES: u32 = 10;

    /// Inter-page delay bounds in milliseconds, randomized per page to
    /// avoid request bursts.
    pub const PAGE_DELAY_MIN_MS: u64 = 800;

    pub const PAGE_DELAY_MAX_MS: u64 = 1800;
}
