//! # Bounded Retry
//!
//! Transient failures against the registry are retried a fixed number
//! of times with exponential backoff. Transport errors and 5xx answers
//! count as transient; every 4xx is final and returned to the caller
//! untouched.

use std::time::Duration;

use crate::config::RegistryMode;
use crate::error::RegistryError;

/// Total attempts per call, the first one included.
pub const MAX_ATTEMPTS: u32 = 3;

const BASE_DELAY_MS: u64 = 250;

/// Send a request with bounded retry.
///
/// `build` produces a fresh request per attempt; request bodies are not
/// reusable after a send. Delays double per attempt starting at 250ms.
pub(crate) async fn send_with_retry<F>(
    build: F,
    mode: RegistryMode,
) -> Result<reqwest::Response, RegistryError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut delay = Duration::from_millis(BASE_DELAY_MS);
    let mut last_detail = String::new();

    for attempt in 1..=MAX_ATTEMPTS {
        match build().send().await {
            Ok(response) if response.status().is_server_error() => {
                last_detail = format!("registry answered {}", response.status());
            }
            Ok(response) => return Ok(response),
            Err(e) => {
                last_detail = e.to_string();
            }
        }

        if attempt < MAX_ATTEMPTS {
            tracing::warn!(
                attempt,
                registry = %mode,
                delay_ms = delay.as_millis() as u64,
                "registry call failed, retrying: {last_detail}"
            );
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }

    Err(RegistryError::Unreachable {
        mode,
        attempts: MAX_ATTEMPTS,
        detail: last_detail,
    })
}
