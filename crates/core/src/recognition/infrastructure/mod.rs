pub mod eigenface_recognizer;
pub mod fisherface_recognizer;
pub mod linalg;
pub mod subspace;
