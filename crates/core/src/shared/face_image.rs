use ndarray::ArrayView2;

/// A single grayscale face crop: contiguous intensity bytes in row-major
/// order.
///
/// Format conversion and resizing happen at I/O boundaries only; everything
/// past the loader relies on all images in one run sharing identical
/// dimensions.
#[derive(Clone, Debug)]
pub struct FaceImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl FaceImage {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` pair every consumer validates against.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels, i.e. the dimensionality of the flattened sample.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("FaceImage data length must match dimensions")
    }
}
