use std::{
    sync::{Arc, mpsc},
    time::Duration,
};

use rayon::prelude::*;

use crate::{
    assets::library::AssetLibrary,
    foundation::{
        core::{Category, PerCategory},
        error::{EmojiError, EmojiResult},
    },
    render::rasterize::{RasterLayer, rasterize_layer},
    selection::state::{BatchToken, CompositeRequest},
};

/// Outcome of resolving one category's selection to pixels.
#[derive(Clone, Debug)]
pub enum Resolution {
    /// Rasterized variant.
    Image(Arc<RasterLayer>),
    /// None slot, empty category, or index with no entry. Draws nothing.
    Empty,
    /// Rasterization failed. Draws nothing.
    Failed(String),
}

impl Resolution {
    /// The rasterized layer, if any.
    pub fn image(&self) -> Option<&RasterLayer> {
        match self {
            Resolution::Image(layer) => Some(layer.as_ref()),
            Resolution::Empty | Resolution::Failed(_) => None,
        }
    }
}

/// Five resolutions for one selection snapshot.
#[derive(Clone, Debug)]
pub struct ResolvedBatch {
    /// Token of the request this batch answers.
    pub token: BatchToken,
    /// Snapshot the layers were resolved from.
    pub snapshot: PerCategory<usize>,
    /// Per-category outcome.
    pub layers: PerCategory<Resolution>,
}

/// Resolve `index` of `category` to a `size`×`size` layer.
pub fn resolve_one(
    library: &AssetLibrary,
    category: Category,
    index: usize,
    size: u32,
) -> Resolution {
    let Some(layer) = library
        .variant(category, index)
        .and_then(|v| v.layer.as_ref())
    else {
        return Resolution::Empty;
    };
    match rasterize_layer(layer, size) {
        Ok(raster) => Resolution::Image(Arc::new(raster)),
        Err(e) => {
            tracing::warn!(%category, index, error = %e, "layer failed to rasterize");
            Resolution::Failed(e.to_string())
        }
    }
}

/// Resolve all five categories of `request`, fanning out and joining before return.
pub fn resolve_batch(library: &AssetLibrary, request: &CompositeRequest, size: u32) -> ResolvedBatch {
    let resolved: Vec<Resolution> = Category::ALL
        .par_iter()
        .map(|&c| resolve_one(library, c, request.snapshot[c], size))
        .collect();

    let mut it = resolved.into_iter();
    ResolvedBatch {
        token: request.token,
        snapshot: request.snapshot.clone(),
        layers: PerCategory::from_fn(|_| it.next().unwrap_or(Resolution::Empty)),
    }
}

/// Background resolver: requests are resolved on a private rayon pool and completions are
/// delivered, in whatever order they finish, through [`Resolver::try_next`] / [`Resolver::next_timeout`].
pub struct Resolver {
    library: Arc<AssetLibrary>,
    size: u32,
    pool: rayon::ThreadPool,
    tx: mpsc::Sender<ResolvedBatch>,
    rx: mpsc::Receiver<ResolvedBatch>,
    in_flight: usize,
}

impl Resolver {
    /// Build a resolver producing `size`×`size` layers. `threads` of `None` uses the rayon default.
    pub fn new(library: Arc<AssetLibrary>, size: u32, threads: Option<usize>) -> EmojiResult<Self> {
        let pool = build_thread_pool(threads)?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            library,
            size,
            pool,
            tx,
            rx,
            in_flight: 0,
        })
    }

    /// Start resolving `request` in the background.
    pub fn submit(&mut self, request: CompositeRequest) {
        let library = Arc::clone(&self.library);
        let tx = self.tx.clone();
        let size = self.size;
        self.in_flight += 1;
        self.pool.spawn(move || {
            let batch = resolve_batch(&library, &request, size);
            let _ = tx.send(batch);
        });
    }

    /// Number of submitted batches not yet received.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Take a finished batch without blocking.
    pub fn try_next(&mut self) -> Option<ResolvedBatch> {
        let batch = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(batch)
    }

    /// Wait up to `timeout` for a finished batch.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<ResolvedBatch> {
        if self.in_flight == 0 {
            return None;
        }
        let batch = self.rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(batch)
    }
}

fn build_thread_pool(threads: Option<usize>) -> EmojiResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(EmojiError::validation(
            "resolve threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| EmojiError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/resolve.rs"]
mod tests;
