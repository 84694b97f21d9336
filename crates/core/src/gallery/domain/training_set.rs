use crate::shared::face_image::FaceImage;

/// Integer identity class of a face, decoded from the gallery filename.
pub type Label = u32;

/// One gallery image paired with its decoded label.
#[derive(Clone, Debug)]
pub struct TrainingSample {
    pub image: FaceImage,
    pub label: Label,
}

/// The ordered collection of samples built from one gallery listing.
///
/// Immutable once built; a new gallery requires a full rebuild. Sample
/// order only determines internal model indexing (and thereby distance
/// tie-breaking), never which label a class carries.
#[derive(Clone, Debug)]
pub struct TrainingSet {
    samples: Vec<TrainingSample>,
}

impl TrainingSet {
    pub fn new(samples: Vec<TrainingSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of distinct labels present.
    pub fn class_count(&self) -> usize {
        let mut labels: Vec<Label> = self.samples.iter().map(|s| s.label).collect();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }

    /// Shared `(width, height)` of all samples, or `None` when empty.
    ///
    /// The loader's fixed-resize step guarantees the samples agree, so the
    /// first sample is authoritative.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.samples.first().map(|s| s.image.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(label: Label) -> TrainingSample {
        TrainingSample {
            image: FaceImage::new(vec![0u8; 4], 2, 2),
            label,
        }
    }

    #[test]
    fn test_len_and_order_preserved() {
        let set = TrainingSet::new(vec![sample(2), sample(1), sample(2)]);
        assert_eq!(set.len(), 3);
        let labels: Vec<Label> = set.samples().iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![2, 1, 2]);
    }

    #[test]
    fn test_class_count_dedupes_labels() {
        let set = TrainingSet::new(vec![sample(1), sample(1), sample(2), sample(2)]);
        assert_eq!(set.class_count(), 2);
    }

    #[test]
    fn test_class_count_single_label() {
        let set = TrainingSet::new(vec![sample(5), sample(5)]);
        assert_eq!(set.class_count(), 1);
    }

    #[test]
    fn test_dimensions_from_first_sample() {
        let set = TrainingSet::new(vec![sample(1)]);
        assert_eq!(set.dimensions(), Some((2, 2)));
    }

    #[test]
    fn test_empty_set() {
        let set = TrainingSet::new(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.class_count(), 0);
        assert_eq!(set.dimensions(), None);
    }
}
