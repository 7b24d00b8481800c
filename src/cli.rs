use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::{config::DEFAULT_BASE_URL, ApiConfig};
use crate::ui::app::ScreenOptions;

/// Browse and record transactions kept by a remote finance API.
#[derive(Debug, Parser)]
#[command(name = "finance-tracker", version)]
pub struct Cli {
    /// Host serving /api/transactions and /api/categories.
    #[arg(long, env = "FINANCE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "FINANCE_API_TIMEOUT_MS", default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Where diagnostics are written while the terminal is in use.
    #[arg(long, env = "FINANCE_LOG_FILE", default_value = "finance-tracker.log")]
    pub log_file: PathBuf,

    /// Connect directly even if proxy variables are set.
    #[arg(long)]
    pub no_proxy: bool,

    /// Hide the filter dialog on the transaction list.
    #[arg(long)]
    pub no_filter: bool,

    /// Keep the form date on today and drop date bounds from the filter.
    #[arg(long)]
    pub no_date_picker: bool,
}

impl Cli {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.base_url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .no_proxy(self.no_proxy)
    }

    pub fn screen_options(&self) -> ScreenOptions {
        ScreenOptions {
            filtering: !self.no_filter,
            date_picker: !self.no_date_picker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "finance-tracker",
            "--base-url",
            "http://localhost:3000/",
            "--timeout-ms",
            "250",
            "--no-filter",
        ])
        .unwrap();

        let config = cli.api_config();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(
            cli.screen_options(),
            ScreenOptions {
                filtering: false,
                date_picker: true,
            }
        );
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["finance-tracker", "--timeout-ms", "soon"]).is_err());
    }
}
