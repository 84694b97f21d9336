pub mod dataset_builder;
pub mod image_loader;
pub mod label_codec;
pub mod training_set;
