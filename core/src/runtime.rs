//! Component H — the bounded-concurrency scrape runtime (spec.md §4.H /
//! §5), grounded on the teacher's `rayon`+`indicatif` bulk-indexing loop in
//! `mtgjson-indexer/src/main.rs` and on the colly worker-pool/queue pattern
//! in `examples/original_source/jupitergames.go`. Since spec.md excludes a
//! logging sink from scope, adapters report through an injectable
//! [`LogCallback`] instead — the same shape as `mtgban.LogCallbackFunc` and
//! each adapter's own `printf` wrapper in the original source.

use crate::store::{InventoryEntry, InventoryRecord, MergeMode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cooperative cancellation flag (spec.md §5): workers check it between
/// fetches and stop picking up new work once it is set, the same
/// `Arc<AtomicUsize>`-style shared counter `the-muppet-scryfall-parser`'s
/// `main.rs` uses for its own cross-thread progress state. A scrape has no
/// owned timeout of its own; a caller wanting one sets this flag from a
/// timer or a dropped `select!` arm.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub enum LogEvent {
    Info(String),
    Warn(String),
    Error(String),
}

pub type LogCallback = Arc<dyn Fn(LogEvent) + Send + Sync>;

pub(crate) fn emit(log: Option<&LogCallback>, event: LogEvent) {
    if let Some(cb) = log {
        cb(event);
    }
}

#[derive(Clone)]
pub struct RuntimeConfig {
    /// Worker pool width; spec.md §4.H defaults this to 8.
    pub max_concurrency: usize,
    pub log: Option<LogCallback>,
    pub show_progress: bool,
    /// Checked between work items; a caller's own timeout or shutdown
    /// signal sets this to stop the scrape early without aborting
    /// in-flight work (spec.md §5 "Cancellation and timeouts").
    pub cancel: CancellationToken,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            max_concurrency: 8,
            log: None,
            show_progress: true,
            cancel: CancellationToken::new(),
        }
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("max_concurrency", &self.max_concurrency)
            .field("log", &self.log.is_some())
            .field("show_progress", &self.show_progress)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

fn build_pool(config: &RuntimeConfig) -> anyhow::Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_concurrency)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build worker pool: {e}"))
}

fn progress_bar(config: &RuntimeConfig, len: usize) -> Option<indicatif::ProgressBar> {
    if !config.show_progress {
        return None;
    }
    let bar = indicatif::ProgressBar::new(len as u64);
    bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} ({eta})")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar()),
    );
    Some(bar)
}

/// Run `work` over `items` across a bounded worker pool, collecting results
/// in input order (spec.md §4.H "Run").
pub fn run_pool<T, R, F>(items: &[T], config: &RuntimeConfig, work: F) -> anyhow::Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    use rayon::prelude::*;

    let pool = build_pool(config)?;
    let bar = progress_bar(config, items.len());

    let results = pool.install(|| {
        items
            .par_iter()
            .map(|item| {
                let r = work(item);
                if let Some(b) = &bar {
                    b.inc(1);
                }
                r
            })
            .collect()
    });

    if let Some(b) = bar {
        b.finish_and_clear();
    }
    Ok(results)
}

/// Fan a per-item fetch out across a bounded worker pool and drain the
/// resulting `(id, entry)` pairs into a single [`InventoryRecord`] through
/// one serialized writer, so concurrent producers never contend for a lock
/// on the record itself (spec.md §5).
pub fn fill_inventory<T, F>(
    items: &[T],
    config: &RuntimeConfig,
    mode: MergeMode,
    produce: F,
) -> anyhow::Result<InventoryRecord>
where
    T: Sync,
    F: Fn(&T) -> anyhow::Result<Vec<(String, InventoryEntry)>> + Sync,
{
    use crossbeam::channel::unbounded;
    use rayon::prelude::*;

    let pool = build_pool(config)?;
    let bar = progress_bar(config, items.len());
    let (tx, rx) = unbounded::<(String, InventoryEntry)>();

    let writer = std::thread::spawn(move || {
        let mut record = InventoryRecord::new();
        while let Ok((id, entry)) = rx.recv() {
            // A write failure here means a genuine (conditions, price)
            // collision slipped past the adapter's own dedup; keep going
            // rather than abort the whole scrape over one bad row.
            let _ = record.add(&id, entry, mode);
        }
        record
    });

    pool.install(|| {
        items.par_iter().for_each(|item| {
            // Checked once per item, between fetches, per spec.md §5: a
            // worker that sees cancellation flushes nothing new and exits
            // rather than tearing down the row it's mid-fetch on.
            if config.cancel.is_cancelled() {
                return;
            }
            match produce(item) {
                Ok(pairs) => {
                    for pair in pairs {
                        if tx.send(pair).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => emit(config.log.as_ref(), LogEvent::Error(e.to_string())),
            }
            if let Some(b) = &bar {
                b.inc(1);
            }
        });
    });

    drop(tx);
    if let Some(b) = bar {
        b.finish_and_clear();
    }
    writer
        .join()
        .map_err(|_| anyhow::anyhow!("inventory writer thread panicked"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(price: f64) -> InventoryEntry {
        InventoryEntry {
            conditions: "NM".to_string(),
            price,
            quantity: 1,
            url: "https://example.test".to_string(),
            seller_name: "Test".to_string(),
            bundle: false,
            original_id: None,
            instance_id: None,
        }
    }

    #[test]
    fn run_pool_preserves_input_order() {
        let items = vec![1, 2, 3, 4, 5];
        let config = RuntimeConfig {
            show_progress: false,
            ..Default::default()
        };
        let out = run_pool(&items, &config, |n| n * 10).unwrap();
        assert_eq!(out, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn fill_inventory_merges_results_from_every_worker() {
        let ids = vec!["id-a".to_string(), "id-b".to_string(), "id-c".to_string()];
        let config = RuntimeConfig {
            max_concurrency: 2,
            show_progress: false,
            ..Default::default()
        };
        let record = fill_inventory(&ids, &config, MergeMode::Default, |id| {
            Ok(vec![(id.clone(), entry(1.0))])
        })
        .unwrap();
        assert_eq!(record.len(), 3);
        for id in &ids {
            assert_eq!(record.get(id).len(), 1);
        }
    }

    #[test]
    fn fill_inventory_reports_fetch_errors_without_aborting() {
        use std::sync::Mutex;
        let seen_errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_errors_cb = seen_errors.clone();
        let config = RuntimeConfig {
            show_progress: false,
            log: Some(Arc::new(move |event| {
                if let LogEvent::Error(msg) = event {
                    seen_errors_cb.lock().unwrap().push(msg);
                }
            })),
            ..Default::default()
        };
        let ids = vec!["ok".to_string(), "bad".to_string()];
        let record = fill_inventory(&ids, &config, MergeMode::Default, |id| {
            if id == "bad" {
                anyhow::bail!("fetch failed for {id}")
            } else {
                Ok(vec![(id.clone(), entry(1.0))])
            }
        })
        .unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(seen_errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn a_pre_cancelled_token_stops_every_fetch() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let config = RuntimeConfig {
            show_progress: false,
            cancel,
            ..Default::default()
        };
        let ids = vec!["a".to_string(), "b".to_string()];
        let record = fill_inventory(&ids, &config, MergeMode::Default, |id| {
            Ok(vec![(id.clone(), entry(1.0))])
        })
        .unwrap();
        assert!(record.is_empty());
    }
}
