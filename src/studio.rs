use std::{
    sync::{Arc, mpsc},
    time::{Duration, Instant},
};

use rand::rngs::StdRng;

use crate::{
    assets::{library::AssetLibrary, source::AssetSource},
    export::{ExportOutcome, Exporter},
    foundation::{
        config::StudioConfig,
        core::{Category, PerCategory},
        error::{EmojiError, EmojiResult},
    },
    picker::view::{Picker, PickerAction, PickerView, render_thumbnail},
    render::{
        compositor::{Compositor, DrawOutcome},
        rasterize::RasterLayer,
        resolve::{Resolution, Resolver},
        surface::Surface,
    },
    selection::state::{CompositeRequest, SelectionState},
};

/// Non-fatal message for the front-end to show (e.g. as a toast).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Human-readable text.
    pub message: String,
}

/// One editing session: owns every piece of state and is driven from a single event loop.
///
/// Selection changes publish composite requests; [`Studio::pump`] forwards them to the background
/// [`Resolver`] and draws whatever finished, discarding stale batches.
pub struct Studio {
    config: StudioConfig,
    source: Arc<dyn AssetSource>,
    library: Arc<AssetLibrary>,
    selection: SelectionState,
    requests: mpsc::Receiver<CompositeRequest>,
    resolver: Resolver,
    compositor: Compositor,
    picker: Picker,
    exporter: Exporter,
    notices: Vec<Notice>,
    rng: StdRng,
}

impl Studio {
    /// Validate `config`, load every category from `source`, then make the initial random pick.
    #[tracing::instrument(skip_all)]
    pub fn start(
        config: StudioConfig,
        source: Arc<dyn AssetSource>,
        exporter: Exporter,
        rng: StdRng,
    ) -> EmojiResult<Self> {
        config.validate()?;

        let library = Arc::new(AssetLibrary::load(source.as_ref()));
        let mut selection = SelectionState::new(library.lens());
        let requests = selection.subscribe();
        let resolver = Resolver::new(
            Arc::clone(&library),
            config.canvas_size,
            config.resolve_threads,
        )?;
        let compositor = Compositor::new(config.canvas_size, config.pulse())?;

        let mut studio = Self {
            config,
            source,
            library,
            selection,
            requests,
            resolver,
            compositor,
            picker: Picker::new(),
            exporter,
            notices: Vec::new(),
            rng,
        };
        for dropped in studio.library.dropped().to_vec() {
            studio.notify(format!(
                "skipped '{}': {}",
                dropped.asset.locator, dropped.reason
            ));
        }
        studio.randomize();
        Ok(studio)
    }

    /// Injected configuration.
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Loaded variant lists.
    pub fn library(&self) -> &AssetLibrary {
        &self.library
    }

    /// Current selection tuple.
    pub fn selection(&self) -> PerCategory<usize> {
        self.selection.snapshot()
    }

    /// Randomize every category.
    pub fn randomize(&mut self) {
        self.selection.randomize_all(&mut self.rng);
    }

    /// Select `index` in `category`; out-of-range picks are ignored.
    pub fn pick(&mut self, category: Category, index: usize) -> bool {
        self.selection.set(category, index)
    }

    /// Forward a picker action.
    pub fn dispatch(&mut self, action: PickerAction) -> bool {
        self.picker.dispatch(action, &mut self.selection)
    }

    /// Current picker view.
    pub fn picker_view(&self) -> PickerView {
        let drawn = self.compositor.drawn_snapshot();
        self.picker.view(&self.library, &self.selection.snapshot(), |c| {
            match self.compositor.resolved(c) {
                Some(Resolution::Image(_)) => drawn.map(|snapshot| snapshot[c]),
                _ => None,
            }
        })
    }

    /// Thumbnail of the variant currently drawn for `category`, at the tab thumbnail size.
    pub fn tab_thumbnail(&self, category: Category) -> EmojiResult<Option<RasterLayer>> {
        let Some(snapshot) = self.compositor.drawn_snapshot() else {
            return Ok(None);
        };
        render_thumbnail(
            &self.library,
            category,
            snapshot[category],
            self.config.tab_thumb_size,
        )
    }

    /// Thumbnail of entry `index` of the active gallery, at the gallery thumbnail size.
    pub fn gallery_thumbnail(&self, index: usize) -> EmojiResult<Option<RasterLayer>> {
        render_thumbnail(
            &self.library,
            self.picker.active(),
            index,
            self.config.gallery_thumb_size,
        )
    }

    /// Submit pending composite requests and draw every finished batch. Returns batches drawn.
    pub fn pump(&mut self) -> EmojiResult<usize> {
        self.submit_pending();
        let mut drawn = 0;
        while let Some(batch) = self.resolver.try_next() {
            if self.compositor.complete(batch, Instant::now())? == DrawOutcome::Drawn {
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    /// Block until every submitted batch has finished (or `timeout` passes between completions).
    /// Returns the number of batches received, drawn or stale.
    pub fn settle(&mut self, timeout: Duration) -> EmojiResult<usize> {
        self.submit_pending();
        let mut received = 0;
        while self.resolver.in_flight() > 0 {
            let Some(batch) = self.resolver.next_timeout(timeout) else {
                return Err(EmojiError::render(format!(
                    "composite did not finish within {timeout:?}"
                )));
            };
            received += 1;
            self.compositor.complete(batch, Instant::now())?;
        }
        Ok(received)
    }

    /// The drawn composite, `None` before the first draw.
    pub fn surface(&self) -> Option<&Surface> {
        self.compositor.drawn_token()?;
        Some(self.compositor.surface())
    }

    /// Compositor owning the surface.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Whether the post-draw transition cue is showing at `now`.
    pub fn cue_active(&self, now: Instant) -> bool {
        self.compositor.cue_active(now)
    }

    /// Export the drawn composite as PNG. `None` when the export failed (a notice is queued).
    pub fn export_png(&mut self) -> Option<ExportOutcome> {
        let surface = self
            .compositor
            .drawn_token()
            .map(|_| self.compositor.surface());
        let result = self.exporter.export_png(surface, &self.config);
        self.report(result)
    }

    /// Export the merged SVG of the current selection. `None` when the export failed.
    pub fn export_svg(&mut self) -> Option<ExportOutcome> {
        let selection = self.selection.snapshot();
        let result = self.exporter.export_svg(
            &self.library,
            self.source.as_ref(),
            &selection,
            &self.config,
        );
        self.report(result)
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Resolve only the newest queued request; older ones are already stale.
    fn submit_pending(&mut self) {
        let mut newest = None;
        while let Ok(request) = self.requests.try_recv() {
            self.compositor.note_request(request.token);
            newest = Some(request);
        }
        if let Some(request) = newest {
            self.resolver.submit(request);
        }
    }

    fn report(&mut self, result: EmojiResult<ExportOutcome>) -> Option<ExportOutcome> {
        match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.notify(format!("export failed: {e}"));
                None
            }
        }
    }

    fn notify(&mut self, message: String) {
        self.notices.push(Notice { message });
    }
}

#[cfg(test)]
#[path = "../tests/unit/studio.rs"]
mod tests;
