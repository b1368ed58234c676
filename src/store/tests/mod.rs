
use tempfile::TempDir;

/// Fresh data directory; removed when the guard drops.
pub(super) fn data_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("daybook-store-")
        .tempdir()
        .expect("temp dir")
}
