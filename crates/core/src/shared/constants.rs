/// Gallery filename extensions accepted by the dataset builder
/// (matched case-insensitively). Everything else is ignored.
pub const GALLERY_EXTENSIONS: &[&str] = &["jpg", "pgm", "png"];

/// Default edge length of the square resolution all images are resized to.
pub const DEFAULT_FACE_SIZE: u32 = 200;
