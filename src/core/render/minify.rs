//! Page minification in an isolated worker
//!
//! The minifier parses user-controlled data embedded in the page. It runs on
//! its own thread so that a panic or a runaway parse ends as an ordinary
//! [`Error::Minify`] instead of taking the process down or hanging the run.

use crate::core::error::{Error, Result};
use crate::{debug, info};
use minify_html::Cfg;
use regex::Regex;
use std::any::Any;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

/// Default time the worker gets before the run gives up on it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Deeply nested scripts recurse deeply in the JS parser.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Block comments, non-greedy across lines.
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern is valid"));

/// Whole-document minifier.
pub trait Minifier: Send + 'static {
    /// Minify a complete HTML document.
    ///
    /// # Errors
    /// Returns a description of the failure.
    fn minify(&self, html: &str) -> std::result::Result<String, String>;
}

/// Collapses whitespace and minifies inline CSS and JavaScript with
/// `minify-html`. Block comments mentioning a license survive.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMinifier;

impl Minifier for HtmlMinifier {
    fn minify(&self, html: &str) -> std::result::Result<String, String> {
        let mut cfg = Cfg::new();
        cfg.minify_css = true;
        cfg.minify_js = true;

        let minified = minify_html::minify(html.as_bytes(), &cfg);
        let minified = String::from_utf8(minified).map_err(|e| e.to_string())?;
        Ok(restore_license_comments(html, minified))
    }
}

/// Block comments in `html` that mention a license (case-insensitive).
#[must_use]
pub fn license_comments(html: &str) -> Vec<&str> {
    BLOCK_COMMENT
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|comment| comment.to_ascii_lowercase().contains("license"))
        .collect()
}

/// Put license comments the minifier dropped back at the start of the first
/// inline script.
fn restore_license_comments(original: &str, minified: String) -> String {
    let dropped: Vec<&str> = license_comments(original)
        .into_iter()
        .filter(|comment| !minified.contains(comment))
        .collect();
    if dropped.is_empty() {
        return minified;
    }

    let Some(start) = minified.find("<script>").map(|i| i + "<script>".len()) else {
        return minified;
    };
    debug!("Restoring {} license comment(s)", dropped.len());
    let extra: usize = dropped.iter().map(|c| c.len() + 1).sum();
    let mut restored = String::with_capacity(minified.len() + extra);
    restored.push_str(&minified[..start]);
    for comment in dropped {
        restored.push_str(comment);
        restored.push('\n');
    }
    restored.push_str(&minified[start..]);
    restored
}

/// Run `minifier` over `html` on a dedicated worker thread.
///
/// The worker is created for this call and receives the page once. A panic,
/// an error from the minifier, or no answer within `timeout` becomes
/// [`Error::Minify`]. A worker that timed out is left detached.
///
/// # Errors
/// Returns [`Error::Minify`] as described above, or when the worker thread
/// cannot be started.
pub fn minify_isolated<M: Minifier>(
    minifier: M,
    html: String,
    timeout: Duration,
) -> Result<String> {
    let original_len = html.len();
    let (tx, rx) = mpsc::channel();
    let worker = thread::Builder::new()
        .name("minifier".to_string())
        .stack_size(WORKER_STACK_SIZE)
        .spawn(move || {
            let _ = tx.send(minifier.minify(&html));
        })
        .map_err(|e| Error::Minify(format!("could not start worker: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(outcome) => {
            let _ = worker.join();
            let minified = outcome.map_err(Error::Minify)?;
            info!("Minified {original_len} bytes to {} bytes", minified.len());
            Ok(minified)
        }
        Err(RecvTimeoutError::Timeout) => {
            Err(Error::Minify(format!("no result after {timeout:?}")))
        }
        Err(RecvTimeoutError::Disconnected) => {
            let reason = worker
                .join()
                .err()
                .map_or_else(|| "worker exited without a result".to_string(), panic_message);
            Err(Error::Minify(reason))
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("worker panicked: {detail}")
}
