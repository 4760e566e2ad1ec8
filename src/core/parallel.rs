//! Parallel processing utilities

use crate::error::Result;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Shared completion counter that workers bump after each item
#[derive(Debug)]
pub struct ProgressCounter {
    done: AtomicUsize,
    total: usize,
}

impl ProgressCounter {
    pub fn new(total: usize) -> Self {
        Self {
            done: AtomicUsize::new(0),
            total,
        }
    }

    /// Count one finished item
    pub fn tick(&self, message: impl Into<String>) -> ProgressUpdate {
        let current = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        ProgressUpdate::new(current, self.total, message)
    }
}

/// Build a bounded worker pool
pub fn build_pool(threads: usize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|index| format!("reposcope-worker-{}", index))
        .build()?;
    Ok(pool)
}

/// Map every item on the pool, returning results in input order
pub fn parallel_process<T, F, R>(pool: &ThreadPool, items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
{
    pool.install(|| items.par_iter().map(|item| f(item)).collect())
}

/// Map every item on the pool with progress reporting
///
/// Progress updates arrive in completion order; the returned results stay
/// in input order.
pub fn parallel_process_with_progress<T, F, R, P>(
    pool: &ThreadPool,
    items: &[T],
    f: F,
    progress_callback: P,
) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> (R, String) + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let counter = ProgressCounter::new(items.len());
    parallel_process(pool, items, |item| {
        let (result, message) = f(item);
        progress_callback(counter.tick(message));
        result
    })
}

/// Same contract as [`parallel_process_with_progress`] on the calling thread
pub fn sequential_process_with_progress<T, F, R, P>(
    items: &[T],
    f: F,
    progress_callback: P,
) -> Vec<R>
where
    F: Fn(&T) -> (R, String),
    P: Fn(ProgressUpdate),
{
    let counter = ProgressCounter::new(items.len());
    items
        .iter()
        .map(|item| {
            let (result, message) = f(item);
            progress_callback(counter.tick(message));
            result
        })
        .collect()
}
