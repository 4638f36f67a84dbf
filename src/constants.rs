// UI Constants
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const TOAST_DURATION_MS: u64 = 2000;
pub const TICK_RATE_MS: u64 = 100;
pub const USER_LABEL: &str = "You";
pub const LOADING_TEXT: &str = "Generating reply...";
pub const COPIED_TEXT: &str = "Copied to clipboard!";

// API Constants
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_API_VERSION: &str = "v1beta";
pub const API_KEY_HEADER: &str = "x-goog-api-key";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

// Typing effect
pub const DEFAULT_TYPING_INTERVAL_MS: u64 = 20;
