//! # Ensemble task distribution
//!
//! Fans the per-member track files out to a fixed pool of executor threads and
//! collects one histogram triple per member, in completion order.
//!
//! ## Protocol
//! -----------------
//! Pull-based coordinator/executor over channels:
//!
//! * The work channel is a rendezvous channel (`bounded(0)`): a send completes
//!   only when an idle executor pulls, so the coordinator never runs ahead of
//!   the pool.
//! * The result channel is buffered to the member count, so executors never
//!   block returning results.
//! * Termination is queue closure: the coordinator drops the work sender once
//!   every member is dispatched, executors drain the queue and exit, and the
//!   thread-scope join is the acknowledgment barrier.
//!
//! With a pool of size 1 the calling thread processes members sequentially in
//! listed order. For larger pools the stack order is arrival order and carries
//! no member identity; the downstream reduction is order-independent, so the
//! result is invariant to pool size.
//!
//! ## Failure policy
//! -----------------
//! An executor reports a failing member as its result and keeps serving; the
//! coordinator folds after the barrier and aborts the run with the first
//! error. No retry, no skip, no partial results.

use std::thread;

use camino::{Utf8Path, Utf8PathBuf};
use crossbeam_channel::bounded;
use tracing::{debug, info};

use crate::grid::GateGrid;
use crate::histogram::{find_crossings, CrossingHistograms};
use crate::loncross_errors::LoncrossError;
use crate::tracks::csv_reader::load_tracks;

/// List the ensemble member files of a track directory.
///
/// Entries whose file name starts with `prefix` are selected and sorted
/// lexicographically, fixing iteration order for the single-worker path.
pub fn discover_members(
    dir: &Utf8Path,
    prefix: &str,
) -> Result<Vec<Utf8PathBuf>, LoncrossError> {
    let mut members = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_name().starts_with(prefix) {
            members.push(entry.into_path());
        }
    }
    members.sort();
    if members.is_empty() {
        return Err(LoncrossError::NoEnsembleMembers(dir.to_owned()));
    }
    Ok(members)
}

fn process_member(path: &Utf8Path, grid: &GateGrid) -> Result<CrossingHistograms, LoncrossError> {
    let tracks = load_tracks(path)?;
    Ok(find_crossings(&tracks, grid))
}

/// Compute one histogram triple per ensemble member across a worker pool.
///
/// Arguments
/// -----------------
/// * `sources` – one track file per member; each is processed exactly once.
/// * `workers` – pool size `W ≥ 1`. `W == 1` runs sequentially on the calling
///   thread; `W > 1` spawns `W − 1` executors plus the coordinating caller.
/// * `grid` – shared read-only gate geometry, broadcast to all executors.
///
/// Return
/// ----------
/// * `Ok(stack)` – exactly `sources.len()` triples. Sequential runs preserve
///   listed order; pooled runs return completion order.
/// * `Err(_)` – invalid pool size, an empty member list, or the first member
///   failure (the whole run aborts; see the module docs).
pub fn run_ensemble(
    sources: &[Utf8PathBuf],
    workers: usize,
    grid: &GateGrid,
) -> Result<Vec<CrossingHistograms>, LoncrossError> {
    if workers == 0 {
        return Err(LoncrossError::InvalidWorkerCount);
    }
    if sources.is_empty() {
        return Err(LoncrossError::EmptyEnsemble);
    }

    info!(
        "processing {} ensemble members on {} worker(s)",
        sources.len(),
        workers
    );

    if workers == 1 {
        return sources
            .iter()
            .map(|path| {
                debug!("processing track file {path}");
                process_member(path, grid)
            })
            .collect();
    }

    let (job_tx, job_rx) = bounded::<&Utf8PathBuf>(0);
    let (result_tx, result_rx) = bounded(sources.len());

    let mut results: Vec<Result<CrossingHistograms, LoncrossError>> =
        Vec::with_capacity(sources.len());

    thread::scope(|scope| {
        for worker in 0..workers - 1 {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok(path) = job_rx.recv() {
                    debug!("worker {worker} processing track file {path}");
                    if result_tx.send(process_member(path, grid)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(result_tx);

        for path in sources {
            if job_tx.send(path).is_err() {
                break;
            }
        }
        // Queue closure doubles as the termination signal.
        drop(job_tx);

        for _ in 0..sources.len() {
            match result_rx.recv() {
                Ok(result) => results.push(result),
                Err(_) => break,
            }
        }
    });

    if results.len() != sources.len() {
        return Err(LoncrossError::ExecutorDisconnected);
    }
    results.into_iter().collect()
}
