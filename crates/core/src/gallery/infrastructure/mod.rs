pub mod decoding_image_loader;
