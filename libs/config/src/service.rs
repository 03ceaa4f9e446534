//! Service defaults
//!
//! Default values and constants used when the runner configuration leaves a
//! field unset.

/// Candle source defaults
pub mod market_data {
    pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

    /// Short timeframe interval
    pub const SHORT_INTERVAL: &str = "5m";

    /// Medium timeframe interval
    pub const MEDIUM_INTERVAL: &str = "15m";

    /// Candles requested per fetch
    pub const CANDLE_LIMIT: usize = 200;

    pub const HTTP_TIMEOUT_SECS: u64 = 15;
}

/// Fetch failure handling defaults
pub mod fetch {
    /// No retry unless configured
    pub const RETRY_ATTEMPTS: u32 = 0;

    /// Backoff base, doubled per attempt
    pub const RETRY_BACKOFF_MS: u64 = 500;

    /// Sequential pair processing
    pub const MAX_CONCURRENT_PAIRS: usize = 1;
}

/// Fixed indicator periods
pub mod indicators {
    pub const RSI_PERIOD: usize = 14;
    pub const BOLLINGER_PERIOD: usize = 20;
    pub const ATR_PERIOD: usize = 14;
}

/// File locations, relative to the working directory
pub mod paths {
    pub const THRESHOLDS: &str = "thresholds.json";
    pub const WEIGHTS: &str = "weights.json";
    pub const STATE: &str = "state.json";

    /// Runner config location when no path is given
    pub const RUNNER_CONFIG: &str = "configs/mtf_signals.toml";

    /// Env var that overrides the runner config location
    pub const RUNNER_CONFIG_ENV: &str = "MTF_SIGNALS_CONFIG_PATH";
}

/// Notification defaults
pub mod telegram {
    pub const API_BASE_URL: &str = "https://api.telegram.org";
    pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
    pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

    /// Alert wording
    pub const ALERT_HEADLINE: &str = "Strong signal";
    pub const CONFIDENCE_LABEL: &str = "Confidence";
}

/// Environment overrides
pub mod env {
    /// Nested overrides take the form `MTF_<SECTION>__<FIELD>`
    pub const PREFIX: &str = "MTF";
    pub const NESTING_SEPARATOR: &str = "__";

    /// Fixed variable names and the keys they override
    pub const ALIASES: &[(&str, &str)] = &[
        ("MTF_THRESHOLDS_PATH", "paths.thresholds"),
        ("MTF_WEIGHTS_PATH", "paths.weights"),
        ("MTF_STATE_PATH", "paths.state"),
        ("MTF_BINANCE_BASE_URL", "market_data.base_url"),
        ("MTF_CANDLE_LIMIT", "market_data.candle_limit"),
        ("MTF_FETCH_POLICY", "fetch.policy"),
        ("MTF_MAX_CONCURRENT_PAIRS", "fetch.max_concurrent_pairs"),
        (super::telegram::TOKEN_ENV, "telegram.bot_token"),
        (super::telegram::CHAT_ID_ENV, "telegram.chat_id"),
    ];
}
