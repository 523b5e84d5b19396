//! Batch mode tracking using tokio task-local storage.
//!
//! Bulk classification marks its tasks as batch work. Extractors consult the flag
//! through [`run_parser`] to move CPU-heavy parsing onto the blocking pool only when
//! several documents are in flight; single documents are parsed inline.

use crate::{HeronError, Result};
use std::cell::Cell;
use tokio::task_local;

task_local! {
    static BATCH_MODE: Cell<bool>;
}

/// Whether the current task runs inside [`with_batch_mode`].
pub fn is_batch_mode() -> bool {
    BATCH_MODE.try_with(|cell| cell.get()).unwrap_or(false)
}

/// Run a future with batch mode enabled.
pub async fn with_batch_mode<F, T>(future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    BATCH_MODE.scope(Cell::new(true), future).await
}

/// Run a synchronous parser over owned bytes.
///
/// In batch mode the parser is moved to `spawn_blocking`; otherwise it runs on the
/// calling task.
pub async fn run_parser<T, F>(label: &'static str, content: &[u8], parse: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&[u8]) -> Result<T> + Send + 'static,
{
    if !is_batch_mode() {
        return parse(content);
    }

    let content_owned = content.to_vec();
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        let _guard = span.entered();
        parse(&content_owned)
    })
    .await
    .map_err(|e| HeronError::extraction(format!("{} task failed: {}", label, e)))?
}
