use chrono::{NaiveDate, NaiveTime};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ScreeningError;
use crate::utils::{parse_iso_date, run_date_stamp};

pub const DEFAULT_DATA_PATH: &str = "./";
pub const DEFAULT_EXCEL_FILENAME: &str = "AASTOCKS_Export_2025-7-13.xlsx";
pub const DEFAULT_CHART_START: &str = "2024-01-01";
pub const HISTORY_START: &str = "2021-01-01";
pub const LOG_FILE_NAME: &str = "stock_screening.log";
pub const CHART_FILE_NAME: &str = "chart1.png";

const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Required variables for delivery, in the order they are reported
pub const REQUIRED_VARS: [&str; 2] = ["TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Runtime configuration, built once at startup and passed to every stage
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub data_path: String,
    pub excel_filename: String,
    /// First date shown on the performance chart
    pub chart_start_date: NaiveDate,
    /// First date requested from the market-data source
    pub history_start_date: NaiveDate,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Local time of day the scheduler fires
    pub schedule_time: NaiveTime,
    pub yahoo_base_url: Url,
    pub telegram_api_url: Url,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ScreeningError> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScreeningError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let chart_start = non_empty("START_DATE").unwrap_or_else(|| DEFAULT_CHART_START.to_string());
        let chart_start_date = parse_iso_date(&chart_start).ok_or_else(|| ScreeningError::InvalidConfig {
            key: "START_DATE".to_string(),
            reason: format!("expected YYYY-MM-DD, got {chart_start:?}"),
        })?;

        Ok(Config {
            telegram_token: non_empty("TELEGRAM_TOKEN"),
            telegram_chat_id: non_empty("TELEGRAM_CHAT_ID"),
            data_path: non_empty("DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
            excel_filename: non_empty("EXCEL_FILENAME")
                .unwrap_or_else(|| DEFAULT_EXCEL_FILENAME.to_string()),
            chart_start_date,
            ..Config::default()
        })
    }

    /// Full path of the input spreadsheet
    pub fn input_path(&self) -> PathBuf {
        Path::new(&self.data_path).join(&self.excel_filename)
    }

    /// Token and chat id, or the names of the missing variables
    pub fn telegram_credentials(&self) -> Result<(&str, &str), ScreeningError> {
        match (self.telegram_token.as_deref(), self.telegram_chat_id.as_deref()) {
            (Some(token), Some(chat_id)) => Ok((token, chat_id)),
            (token, chat_id) => {
                let missing = REQUIRED_VARS
                    .iter()
                    .zip([token.is_none(), chat_id.is_none()])
                    .filter(|(_, missing)| *missing)
                    .map(|(name, _)| name.to_string())
                    .collect();
                Err(ScreeningError::MissingCredentials(missing))
            }
        }
    }

    /// `output/df_result_<DDMMYYYY>.xlsx`
    pub fn result_path(&self, run_date: NaiveDate) -> PathBuf {
        self.output_dir
            .join(format!("df_result_{}.xlsx", run_date_stamp(run_date)))
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(CHART_FILE_NAME)
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            telegram_token: None,
            telegram_chat_id: None,
            data_path: DEFAULT_DATA_PATH.to_string(),
            excel_filename: DEFAULT_EXCEL_FILENAME.to_string(),
            chart_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            history_start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default(),
            output_dir: PathBuf::from("output"),
            log_dir: PathBuf::from("logs"),
            schedule_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            yahoo_base_url: Url::parse(YAHOO_BASE_URL).expect("static URL is valid"),
            telegram_api_url: Url::parse(TELEGRAM_API_URL).expect("static URL is valid"),
        }
    }
}
