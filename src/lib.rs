//! Moldura overlays a decorative frame on a user photo and flattens the
//! result into a downloadable PNG.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: a payload from any modality (file pick, drop, paste) is
//!    normalized into an [`ImagePayload`], validated by declared media type,
//!    and stored as a base64 data URI while its dimension decode is staged.
//! 2. **Select**: an [`OverlayCatalog`] identifier picks the frame asset;
//!    selection is synchronous, the bitmap load is staged.
//! 3. **Drive**: the host drives staged decodes through the [`Session`]; the
//!    base and overlay loads are independent and complete in either order.
//! 4. **Export**: once both slots are ready, the compositor re-decodes the
//!    base from its stored payload, stretches the overlay over the full
//!    surface, and serializes a PNG named by [`export_file_name`].
//!
//! Everything is single-threaded and cooperative; readiness is a tagged slot
//! state, never a completion-order assumption.
#![forbid(unsafe_code)]

mod compose;
mod export;
mod foundation;
mod ingest;
mod overlay;
mod session;

pub use compose::decode::{DecodedBitmap, decode_bitmap};
pub use compose::render::composite_png;
pub use export::namer::{EXPORT_FILE_PREFIX, export_file_name};
pub use foundation::error::{MolduraError, MolduraResult};
pub use ingest::payload::{ImagePayload, is_image_media_type, media_type_for_path};
pub use ingest::sources::{payload_from_clipboard, payload_from_file, payload_from_reader};
pub use overlay::catalog::{DEFAULT_OVERLAY_ID, OverlayCatalog, normalize_rel_path};
pub use session::{
    BaseImage, CompositeOutput, IngestOutcome, InputFocus, LoadState, Session, preview_dims,
};
