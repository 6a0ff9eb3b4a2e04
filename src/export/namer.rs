/// Fixed prefix of every exported file name.
pub const EXPORT_FILE_PREFIX: &str = "imagem";

/// Derive the export file name for an overlay identifier at a point in time.
///
/// `timestamp_ms` is milliseconds since the Unix epoch. Two calls within the
/// same millisecond collide; that is acceptable because the artifact is handed
/// straight to the user rather than persisted to a shared namespace.
pub fn export_file_name(overlay_id: &str, timestamp_ms: i64) -> String {
    format!("{EXPORT_FILE_PREFIX}-{overlay_id}-{timestamp_ms}.png")
}

#[cfg(test)]
#[path = "../../tests/unit/export/namer.rs"]
mod tests;
