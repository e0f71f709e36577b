pub const DEFAULT_API_URL: &str = "https://api.example.org/v1";
pub const CONFIG_FILE: &str = ".org-cli-config.json";

pub const API_KEY_ENV: &str = "ORG_API_KEY";
pub const API_URL_ENV: &str = "ORG_API_URL";
pub const DEFAULT_ORG_ENV: &str = "ORG_DEFAULT_ORG";
pub const LOG_LEVEL_ENV: &str = "ORG_LOG";

/// Reserved name of the system team that holds machine roles.
pub const MACHINE_TEAM_NAME: &str = "machine-team";

pub const DEFAULT_COLUMNS: usize = 80;
pub const RIGHT_PAD: usize = 2;
