use std::io;
use std::path::Path;

/// Read-only storage collaborator for gallery and query images.
///
/// The pipeline needs exactly two operations: list the entries of a
/// directory and read a file's bytes. A distributed filesystem client
/// plugs in at the same seam as the local disk.
pub trait ImageStore: Send + Sync {
    /// Entry names (not full paths) of the files in `dir`.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>>;

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;
}
