// src/pool.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }}
};

use crate::config::consts::JITTER_MS;

/// Run `work` over `items` on at most `workers` threads.
///
/// Workers pull the next index from a shared counter, so completion order is arbitrary;
/// `on_result` sees results as they arrive, and the returned vector is back in input order.
/// `pause_ms` (+ a small per-item jitter) is slept after each item to go easy on servers.
pub fn run_pool<T, R, F, P>(
    items: &[T],
    workers: usize,
    pause_ms: u64,
    work: F,
    mut on_result: P,
) -> Vec<Result<R, String>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R, String> + Sync,
    P: FnMut(usize, &Result<R, String>),
{
    if items.is_empty() {
        return Vec::new();
    }

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<R, String>)>();
    let workers = workers.min(items.len()).max(1);

    let mut slots: Vec<Option<Result<R, String>>> = Vec::with_capacity(items.len());
    slots.resize_with(items.len(), || None);

    thread::scope(|scope| {
        let work = &work;
        let counter = &counter;

        for _ in 0..workers {
            let tx = res_tx.clone();
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= items.len() {
                        break;
                    }
                    let result = work(&items[i]);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    if pause_ms > 0 {
                        let jitter = (i as u64) % JITTER_MS.max(1);
                        thread::sleep(Duration::from_millis(pause_ms + jitter)); // be polite
                    }
                }
            });
        }
        drop(res_tx); // this thread is the sole receiver now

        for (i, result) in res_rx {
            on_result(i, &result);
            slots[i] = Some(result);
        }
    });

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err(s!("worker exited before finishing"))))
        .collect()
}
