//! Test fixtures and constants.

/// Master key name used across UAT tests.
pub const UAT_KEY_NAME: &str = "UAT_SECRET_KEY";

/// Standard test credentials.
pub const STANDARD_CREDENTIALS: &[(&str, &str)] = &[
    ("PORTAL_USERNAME", "alice"),
    ("PORTAL_PASSWORD", "hunter2"),
    ("API_TOKEN", "sk-test-12345"),
];

/// Sample UAT file content with comments and unrelated settings.
pub const SAMPLE_UAT_ENV: &str = "# uat credentials\n\
PORTAL_USERNAME=alice\n\
PORTAL_PASSWORD=hunter2\n\
BASE_URL=https://uat.example.com\n";
