//! Hosted-spreadsheet CSV export fetch.
//!
//! `SheetClient` wraps a blocking HTTP client with retry, backoff, and
//! error classification. The export endpoint is public-link based (no
//! auth header): a 401/403 means the sheet is not shared for link
//! viewing, which gets its own exit code and hint because it is by far
//! the most common operator mistake.

use std::thread;
use std::time::Duration;

use crate::exit_codes;
use crate::CliError;

const MAX_RETRIES: u32 = 3;
const USER_AGENT: &str = concat!("rostersync/", env!("CARGO_PKG_VERSION"));

/// Build the CSV export URL for one worksheet.
///
/// Shape: `{base}/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}`.
/// `base_url` comes from config so tests can point it at a local server.
pub fn sheet_csv_url(base_url: &str, sheet_id: &str, gid: &str) -> Result<String, CliError> {
    let url = format!(
        "{}/spreadsheets/d/{}/export?format=csv&gid={}",
        base_url.trim_end_matches('/'),
        sheet_id,
        gid,
    );
    url::Url::parse(&url)
        .map_err(|e| CliError::usage(format!("invalid sheet export URL {url}: {e}")))?;
    Ok(url)
}

/// Blocking HTTP client for sheet CSV exports.
pub struct SheetClient {
    http: reqwest::blocking::Client,
}

impl SheetClient {
    pub fn new() -> Result<Self, CliError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CliError::error(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// GET one CSV export with retry + exponential backoff.
    ///
    /// 429 and 5xx retry (Retry-After honored for 429); auth and other
    /// 4xx fail immediately. Returns the body text with any leading
    /// UTF-8 BOM stripped.
    pub fn fetch_csv(&self, label: &str, url: &str) -> Result<String, CliError> {
        let mut backoff_secs = 1u64;

        for attempt in 0..=MAX_RETRIES {
            let result = self.http.get(url).send();

            match result {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    // Not link-readable: fail immediately with a hint
                    if status == 401 || status == 403 {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_FORBIDDEN,
                            message: format!(
                                "{label} sheet export refused ({status}): sheet is not link-readable"
                            ),
                            hint: Some(
                                "share the sheet as 'Anyone with the link can view' and retry"
                                    .to_string(),
                            ),
                        });
                    }

                    // Bad request: fail immediately
                    if status == 400 {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_VALIDATION,
                            message: format!(
                                "{label} sheet export rejected ({status}): check sheet_id and gid"
                            ),
                            hint: None,
                        });
                    }

                    // Other 4xx (not 429): fail immediately
                    if status >= 400 && status < 500 && status != 429 {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_UPSTREAM,
                            message: format!("{label} sheet export error ({status})"),
                            hint: None,
                        });
                    }

                    // Retryable: 429, 5xx
                    if status == 429 || status >= 500 {
                        if attempt == MAX_RETRIES {
                            let exit_code = if status == 429 {
                                exit_codes::EXIT_FETCH_RATE_LIMIT
                            } else {
                                exit_codes::EXIT_FETCH_UPSTREAM
                            };
                            return Err(CliError {
                                code: exit_code,
                                message: format!(
                                    "{label} sheet {} after {} attempts ({status})",
                                    if status == 429 {
                                        "rate limited"
                                    } else {
                                        "upstream error"
                                    },
                                    MAX_RETRIES,
                                ),
                                hint: None,
                            });
                        }

                        // Respect Retry-After header for 429
                        let wait = if status == 429 {
                            resp.headers()
                                .get("retry-after")
                                .and_then(|v| v.to_str().ok())
                                .and_then(|v| v.parse::<u64>().ok())
                                .unwrap_or(backoff_secs)
                        } else {
                            backoff_secs
                        };

                        eprintln!(
                            "warning: retry {}/{} in {}s (HTTP {})",
                            attempt + 1,
                            MAX_RETRIES,
                            wait,
                            status,
                        );
                        thread::sleep(Duration::from_secs(wait));
                        backoff_secs *= 2;
                        continue;
                    }

                    let text = resp.text().map_err(|e| CliError {
                        code: exit_codes::EXIT_FETCH_UPSTREAM,
                        message: format!("failed to read {label} sheet response body: {e}"),
                        hint: None,
                    })?;
                    return Ok(text.trim_start_matches('\u{feff}').to_string());
                }
                Err(e) => {
                    // Network/timeout errors: retry
                    if attempt == MAX_RETRIES {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH_UPSTREAM,
                            message: format!(
                                "{label} sheet fetch failed after {MAX_RETRIES} attempts: {e}"
                            ),
                            hint: None,
                        });
                    }

                    eprintln!(
                        "warning: retry {}/{} in {}s (network error: {})",
                        attempt + 1,
                        MAX_RETRIES,
                        backoff_secs,
                        e,
                    );
                    thread::sleep(Duration::from_secs(backoff_secs));
                    backoff_secs *= 2;
                }
            }
        }

        unreachable!("retry loop always returns")
    }
}
