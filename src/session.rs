use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::Context;

use crate::compose::decode::{DecodedBitmap, decode_bitmap};
use crate::compose::render::composite_png;
use crate::export::namer::export_file_name;
use crate::foundation::error::{MolduraError, MolduraResult};
use crate::ingest::payload::ImagePayload;
use crate::overlay::catalog::OverlayCatalog;

/// Observable lifecycle of an asynchronously decoded bitmap slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing ingested/selected, or the last load failed.
    Absent,
    /// A decode job is staged but has not been driven yet.
    Loading,
    /// Decode completed with known, nonzero dimensions.
    Ready,
}

/// Which element of the hosting surface currently holds input focus.
///
/// Pastes are ignored while a text input has focus so ordinary text paste is
/// not hijacked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFocus {
    /// No text-editing element is focused.
    #[default]
    Free,
    /// A text input or text area is focused.
    TextInput,
}

/// What an ingestion event did with its item list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A payload was accepted and its decode staged.
    Ingested,
    /// The event carried nothing usable and was dropped without error.
    Ignored,
}

/// Fully ingested, decode-complete base photo.
#[derive(Debug, Clone)]
pub struct BaseImage {
    data_uri: String,
    width: u32,
    height: u32,
}

impl BaseImage {
    /// Stored same-origin encoded form of the photo.
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Native width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Native height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Ephemeral export artifact: encoded PNG plus its derived file name.
///
/// Produced once per export request and handed straight to the caller; the
/// session retains nothing.
#[derive(Debug, Clone)]
pub struct CompositeOutput {
    /// Derived `imagem-<overlay>-<timestamp>.png` file name.
    pub file_name: String,
    /// Lossless PNG payload at the base image's native resolution.
    pub png: Vec<u8>,
}

#[derive(Debug)]
enum BaseSlot {
    Absent,
    Loading(ImagePayload),
    Ready(BaseImage),
}

#[derive(Debug)]
enum OverlaySlot {
    Absent,
    Loading(PathBuf),
    Ready(DecodedBitmap),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadTarget {
    Base,
    Overlay,
}

/// Application state for one frame-overlay editing session.
///
/// The session owns the overlay selection, the two independently-loading
/// bitmap slots, and the queue of staged decode jobs. All work is
/// single-threaded and cooperative: ingestion and selection only *stage*
/// decodes, and the host drives them with [`Session::run_pending_loads`] (or
/// one at a time with [`Session::run_one_load`], in either order relative to
/// each other). Consumers gate on slot readiness, never on completion order.
///
/// Each slot holds at most one staged job; staging a new load replaces the
/// previous one, so the last write always wins and a stranded job is never
/// decoded.
#[derive(Debug)]
pub struct Session {
    catalog: OverlayCatalog,
    overlay_id: String,
    base: BaseSlot,
    overlay: OverlaySlot,
    focus: InputFocus,
    pending: VecDeque<LoadTarget>,
}

impl Session {
    /// Construct a session and stage the load of the catalog's default overlay.
    pub fn new(catalog: OverlayCatalog) -> Self {
        let overlay_id = catalog.default_id().to_string();
        let mut session = Self {
            catalog,
            overlay_id,
            base: BaseSlot::Absent,
            overlay: OverlaySlot::Absent,
            focus: InputFocus::default(),
            pending: VecDeque::new(),
        };
        session.stage_overlay_load();
        session
    }

    /// Currently selected overlay identifier.
    pub fn overlay_id(&self) -> &str {
        &self.overlay_id
    }

    /// Resolved asset path of the current selection.
    ///
    /// Reflects the selection synchronously, independent of decode state, so
    /// a live preview can swap its overlay reference immediately.
    pub fn overlay_asset(&self) -> Option<PathBuf> {
        self.catalog.resolve(&self.overlay_id)
    }

    /// Catalog consulted for overlay selection.
    pub fn catalog(&self) -> &OverlayCatalog {
        &self.catalog
    }

    /// Select an overlay by identifier.
    ///
    /// Unknown identifiers are ignored without touching the current selection
    /// or the overlay slot. A recognized identifier updates the selection
    /// synchronously and stages a reload of the overlay bitmap.
    pub fn select_overlay(&mut self, id: &str) {
        if !self.catalog.contains(id) {
            tracing::warn!(id, "ignoring unknown overlay identifier");
            return;
        }
        self.overlay_id = id.to_string();
        self.stage_overlay_load();
    }

    /// Record which element holds input focus.
    pub fn set_focus(&mut self, focus: InputFocus) {
        self.focus = focus;
    }

    /// Current input focus.
    pub fn focus(&self) -> InputFocus {
        self.focus
    }

    /// Ingest a payload, replacing any previous base image wholesale.
    ///
    /// Rejects payloads whose declared media type is not an image family; the
    /// previous base image is untouched on rejection. On acceptance the base
    /// slot moves to loading and the dimension decode is staged.
    pub fn ingest(&mut self, payload: ImagePayload) -> MolduraResult<()> {
        if !payload.is_image() {
            return Err(MolduraError::invalid_input(format!(
                "declared media type '{}' is not an image",
                payload.media_type()
            )));
        }
        self.base = BaseSlot::Loading(payload);
        self.enqueue(LoadTarget::Base);
        Ok(())
    }

    /// Ingest from an explicit file selection: the first file of the list.
    ///
    /// An empty selection is an error rather than a no-op: a picker change
    /// event always carries the user's intent to load something.
    pub fn ingest_file_selection(
        &mut self,
        files: Vec<ImagePayload>,
    ) -> MolduraResult<IngestOutcome> {
        let Some(first) = files.into_iter().next() else {
            return Err(MolduraError::invalid_input("no file selected"));
        };
        self.ingest(first)?;
        Ok(IngestOutcome::Ingested)
    }

    /// Ingest from a drop event: the first file of the dropped list.
    ///
    /// An empty drop is silently ignored.
    pub fn ingest_drop(&mut self, files: Vec<ImagePayload>) -> MolduraResult<IngestOutcome> {
        match files.into_iter().next() {
            Some(first) => {
                self.ingest(first)?;
                Ok(IngestOutcome::Ingested)
            }
            None => Ok(IngestOutcome::Ignored),
        }
    }

    /// Ingest from a paste event: the first image-typed item of the clipboard.
    ///
    /// Ignored entirely while a text input holds focus, and ignored without
    /// error when no item declares an image type.
    pub fn ingest_paste(&mut self, items: Vec<ImagePayload>) -> MolduraResult<IngestOutcome> {
        if self.focus == InputFocus::TextInput {
            return Ok(IngestOutcome::Ignored);
        }
        match items.into_iter().find(ImagePayload::is_image) {
            Some(item) => {
                self.ingest(item)?;
                Ok(IngestOutcome::Ingested)
            }
            None => Ok(IngestOutcome::Ignored),
        }
    }

    /// Drive every staged decode job to completion, in staging order.
    pub fn run_pending_loads(&mut self) {
        while self.run_one_load() {}
    }

    /// Drive the oldest staged decode job. Returns `false` when none is staged.
    pub fn run_one_load(&mut self) -> bool {
        let Some(target) = self.pending.pop_front() else {
            return false;
        };
        match target {
            LoadTarget::Base => self.complete_base_load(),
            LoadTarget::Overlay => self.complete_overlay_load(),
        }
        true
    }

    /// Lifecycle state of the base image slot.
    pub fn base_state(&self) -> LoadState {
        match self.base {
            BaseSlot::Absent => LoadState::Absent,
            BaseSlot::Loading(_) => LoadState::Loading,
            BaseSlot::Ready(_) => LoadState::Ready,
        }
    }

    /// Lifecycle state of the overlay bitmap slot.
    pub fn overlay_state(&self) -> LoadState {
        match self.overlay {
            OverlaySlot::Absent => LoadState::Absent,
            OverlaySlot::Loading(_) => LoadState::Loading,
            OverlaySlot::Ready(_) => LoadState::Ready,
        }
    }

    /// The decode-complete base image, if ready.
    pub fn base_image(&self) -> Option<&BaseImage> {
        match &self.base {
            BaseSlot::Ready(b) => Some(b),
            _ => None,
        }
    }

    /// Whether the surface should show the preview rather than the placeholder.
    ///
    /// Flips as soon as a payload is accepted, before dimensions are known.
    pub fn has_image(&self) -> bool {
        !matches!(self.base, BaseSlot::Absent)
    }

    /// Displayed preview size for the ready base image, if any.
    ///
    /// Cosmetic only; export resolution is always the native size.
    pub fn preview_size(&self, avail_width: u32) -> Option<(u32, u32)> {
        let img = self.base_image()?;
        Some(preview_dims(img.width, img.height, avail_width))
    }

    /// Export the flattened composite, named with the current instant.
    pub fn export(&self) -> MolduraResult<CompositeOutput> {
        self.export_at(chrono::Utc::now().timestamp_millis())
    }

    /// Export the flattened composite, named with the supplied timestamp.
    ///
    /// Fails with `NoBaseImage` until a base image is decode-ready and with
    /// `OverlayNotReady` while the selected overlay is still loading or its
    /// load failed. Neither failure changes session state, so a retry after
    /// the pending load is driven succeeds.
    #[tracing::instrument(skip(self), fields(overlay = %self.overlay_id))]
    pub fn export_at(&self, timestamp_ms: i64) -> MolduraResult<CompositeOutput> {
        let base = match &self.base {
            BaseSlot::Ready(b) => b,
            _ => {
                return Err(MolduraError::no_base_image(
                    "load an image before exporting",
                ));
            }
        };
        let overlay = match &self.overlay {
            OverlaySlot::Ready(b) => b,
            _ => {
                return Err(MolduraError::overlay_not_ready(
                    "the selected overlay has not finished loading",
                ));
            }
        };

        let payload = ImagePayload::from_data_uri(base.data_uri())?;
        let png = composite_png(&payload, overlay)?;
        Ok(CompositeOutput {
            file_name: export_file_name(&self.overlay_id, timestamp_ms),
            png,
        })
    }

    fn stage_overlay_load(&mut self) {
        let Some(source) = self.catalog.resolve(&self.overlay_id) else {
            return;
        };
        self.overlay = OverlaySlot::Loading(source);
        self.enqueue(LoadTarget::Overlay);
    }

    fn enqueue(&mut self, target: LoadTarget) {
        if !self.pending.contains(&target) {
            self.pending.push_back(target);
        }
    }

    fn complete_base_load(&mut self) {
        let payload = match std::mem::replace(&mut self.base, BaseSlot::Absent) {
            BaseSlot::Loading(p) => p,
            other => {
                self.base = other;
                return;
            }
        };
        match decode_bitmap(payload.bytes()) {
            Ok(decoded) => {
                self.base = BaseSlot::Ready(BaseImage {
                    data_uri: payload.to_data_uri(),
                    width: decoded.width,
                    height: decoded.height,
                });
            }
            Err(e) => tracing::warn!(error = %e, "base image decode failed"),
        }
    }

    fn complete_overlay_load(&mut self) {
        let source = match std::mem::replace(&mut self.overlay, OverlaySlot::Absent) {
            OverlaySlot::Loading(s) => s,
            other => {
                self.overlay = other;
                return;
            }
        };
        let loaded = std::fs::read(&source)
            .with_context(|| format!("read overlay asset '{}'", source.display()))
            .map_err(MolduraError::from)
            .and_then(|bytes| decode_bitmap(&bytes));
        match loaded {
            Ok(bitmap) => self.overlay = OverlaySlot::Ready(bitmap),
            Err(e) => {
                tracing::warn!(error = %e, source = %source.display(), "overlay asset load failed");
            }
        }
    }
}

/// Displayed preview size: natural size capped to half the available width.
pub fn preview_dims(native_w: u32, native_h: u32, avail_width: u32) -> (u32, u32) {
    let max_w = (avail_width / 2).max(1);
    if native_w <= max_w {
        return (native_w, native_h);
    }
    let h = (u64::from(native_h) * u64::from(max_w) / u64::from(native_w)) as u32;
    (max_w, h.max(1))
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
