/// Constants module to avoid magic numbers in the codebase

// Generation endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

// Prompting
pub const ADVICE_PROMPT_PREFIX: &str = "Provide financial insights for: ";

// Fallback answers
pub const WARNING_PREFIX: &str = "⚠️";
pub const NO_RESPONSE_MESSAGE: &str = "⚠️ No response received.";

// Config discovery
pub const CONFIG_APP_NAME: &str = "genfin";
pub const LOCAL_CONFIG_PATH: &str = ".genfin/config.toml";
pub const ENV_PREFIX: &str = "GENFIN_";
pub const LOG_FILE_NAME: &str = "genfin.log";

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_LINES: u16 = 3;
pub const UI_PAGE_LINES: u16 = 10;
pub const UI_SIDEBAR_PERCENT: u16 = 28;
pub const INPUT_PLACEHOLDER: &str = "Type your financial question here...";
pub const APP_TITLE: &str = "GenFin";
pub const APP_SUBTITLE: &str = "Next-gen financial intelligence";

/// Quotes shown under the header, as (quote, author)
pub const FINANCIAL_QUOTES: &[(&str, &str)] = &[
    (
        "The stock market is filled with individuals who know the price of everything but the value of nothing.",
        "Philip Fisher",
    ),
    (
        "An investment in knowledge pays the best interest.",
        "Benjamin Franklin",
    ),
    (
        "Do not save what is left after spending, but spend what is left after saving.",
        "Warren Buffett",
    ),
];
