//! Parallel fan-out over scanlines.
//!
//! Every stage in the crate writes its output through
//! [`ScanlineExecutor::for_each_band_mut`]: the output bytes are split into
//! disjoint row bands and each band is handed to exactly one rayon task.
//! A call returns only after every band has finished, so two consecutive
//! calls are separated by a full barrier.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{PixelError, Result};

/// Row-parallel executor backed by a rayon pool.
pub struct ScanlineExecutor {
    pool: Option<ThreadPool>,
}

impl ScanlineExecutor {
    /// Executor on rayon's global pool (one worker per available core).
    pub fn global() -> Self {
        Self { pool: None }
    }

    /// Executor on a dedicated pool of `workers` threads.
    pub fn with_workers(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(PixelError::InvalidWorkerCount);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("p1x-scanline-{i}"))
            .build()?;
        Ok(Self { pool: Some(pool) })
    }

    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn run<OP>(&self, op: OP)
    where
        OP: FnOnce() + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Run `f(y)` once for every `y` in `0..height`, in no particular order.
    pub fn for_each_row<F>(&self, height: usize, f: F)
    where
        F: Fn(usize) + Sync,
    {
        self.run(|| (0..height).into_par_iter().for_each(&f));
    }

    /// Split `data` into consecutive bands of `band_len` bytes (the last
    /// may be shorter) and run `f(index, band)` once per band.
    ///
    /// With `band_len == stride` each band is one scanline; with
    /// `band_len == stride * n` each band is a row of `n`-pixel blocks.
    pub fn for_each_band_mut<F>(&self, data: &mut [u8], band_len: usize, f: F)
    where
        F: Fn(usize, &mut [u8]) + Sync,
    {
        if data.is_empty() || band_len == 0 {
            return;
        }
        self.run(|| {
            data.par_chunks_mut(band_len)
                .enumerate()
                .for_each(|(i, band)| f(i, band));
        });
    }
}

impl Default for ScanlineExecutor {
    fn default() -> Self {
        Self::global()
    }
}

impl std::fmt::Debug for ScanlineExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanlineExecutor")
            .field("dedicated", &self.pool.is_some())
            .field("workers", &self.workers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_every_row_runs_once() {
        let executor = ScanlineExecutor::with_workers(3).unwrap();
        let hits: Vec<AtomicUsize> = (0..50).map(|_| AtomicUsize::new(0)).collect();

        executor.for_each_row(hits.len(), |y| {
            hits[y].fetch_add(1, Ordering::Relaxed);
        });

        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn test_bands_cover_buffer_with_short_tail() {
        let executor = ScanlineExecutor::global();
        let mut data = vec![0u8; 10];

        executor.for_each_band_mut(&mut data, 4, |i, band| {
            for b in band.iter_mut() {
                *b = i as u8 + 1;
            }
        });

        assert_eq!(data, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3]);
    }

    #[test]
    fn test_empty_buffer_is_noop() {
        let executor = ScanlineExecutor::global();
        let mut data: Vec<u8> = Vec::new();
        executor.for_each_band_mut(&mut data, 0, |_, _| panic!("no bands expected"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            ScanlineExecutor::with_workers(0),
            Err(PixelError::InvalidWorkerCount)
        ));
    }

    #[test]
    fn test_dedicated_pool_size() {
        let executor = ScanlineExecutor::with_workers(2).unwrap();
        assert_eq!(executor.workers(), 2);
    }
}
