/*!
 * Bounded-concurrency work pool.
 *
 * This module provides the single concurrency primitive reused across the
 * pipeline: apply an async unit of work to a sequence of items with at most
 * a fixed number of units in flight, while keeping output order identical
 * to input order regardless of completion order.
 */

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Apply `worker` to every item with at most `limit` units in flight.
///
/// The returned vector is positionally aligned with `items`: slot `i` holds
/// the worker output for `items[i]` even when completions arrive out of
/// order. The pool is failure-agnostic; a worker that needs a fallback
/// returns it as part of its own output type (e.g. `Result` or a stub
/// value), and one item's outcome never cancels its siblings.
///
/// An empty input returns an empty vector without scheduling any work.
/// Pools at different nesting levels are independent; nothing here imposes
/// a cap across nesting levels.
pub async fn bounded_map<I, T, F, Fut>(items: Vec<I>, limit: usize, worker: F) -> Vec<T>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = T>,
{
    if items.is_empty() {
        return Vec::new();
    }

    let limit = limit.max(1).min(items.len());

    let mut indexed = stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| {
            let unit = worker(item);
            async move { (index, unit.await) }
        })
        .buffer_unordered(limit)
        .collect::<Vec<_>>()
        .await;

    // Completion order is arbitrary; restore input order by slot index.
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
