use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use facematch_core::gallery::domain::dataset_builder::DatasetBuilder;
use facematch_core::gallery::infrastructure::decoding_image_loader::DecodingImageLoader;
use facematch_core::pipeline::classify_face_use_case::ClassifyFaceUseCase;
use facematch_core::recognition::domain::face_recognizer::FaceRecognizer;
use facematch_core::recognition::infrastructure::eigenface_recognizer::EigenfaceRecognizer;
use facematch_core::recognition::infrastructure::fisherface_recognizer::FisherfaceRecognizer;
use facematch_core::shared::constants::DEFAULT_FACE_SIZE;
use facematch_core::storage::domain::image_store::ImageStore;
use facematch_core::storage::infrastructure::local_disk_store::LocalDiskStore;

/// Classify a face image against a labeled gallery of cropped faces.
///
/// Gallery images are named `<label>-<anything>.{jpg,pgm,png}`, e.g.
/// `1-jon_doe_1.png`.
#[derive(Parser)]
#[command(name = "facematch")]
struct Cli {
    /// Query face image to classify.
    query: PathBuf,

    /// Gallery directory of labeled training images.
    gallery: PathBuf,

    /// Edge length all images are resized to before training.
    #[arg(long, default_value_t = DEFAULT_FACE_SIZE)]
    size: u32,

    /// Recognizer variant: fisher or eigen.
    #[arg(long, default_value = "fisher")]
    recognizer: String,

    /// Principal components to retain (eigen variant only).
    #[arg(long)]
    components: Option<usize>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    log::info!(
        "Classifying {} against gallery {} ({} recognizer, {}x{})",
        cli.query.display(),
        cli.gallery.display(),
        cli.recognizer,
        cli.size,
        cli.size
    );

    let store: Arc<dyn ImageStore> = Arc::new(LocalDiskStore::new());
    let loader = Box::new(DecodingImageLoader::new(
        Arc::clone(&store),
        cli.size,
        cli.size,
    ));
    let builder = DatasetBuilder::new(
        Arc::clone(&store),
        Box::new(DecodingImageLoader::new(store, cli.size, cli.size)),
    );
    let recognizer = build_recognizer(&cli)?;

    let mut use_case = ClassifyFaceUseCase::new(loader, builder, recognizer);
    let label = use_case.execute(&cli.gallery, &cli.query)?;

    println!("Predicted label: {label}");
    Ok(())
}

fn build_recognizer(cli: &Cli) -> Result<Box<dyn FaceRecognizer>, Box<dyn std::error::Error>> {
    match cli.recognizer.as_str() {
        "fisher" => {
            if cli.components.is_some() {
                return Err("--components only applies to the eigen recognizer".into());
            }
            let recognizer: Box<dyn FaceRecognizer> = Box::new(FisherfaceRecognizer::new());
            Ok(recognizer)
        }
        "eigen" => {
            let recognizer: Box<dyn FaceRecognizer> = match cli.components {
                Some(k) => Box::new(EigenfaceRecognizer::with_components(k)),
                None => Box::new(EigenfaceRecognizer::new()),
            };
            Ok(recognizer)
        }
        other => Err(format!("Recognizer must be 'fisher' or 'eigen', got '{other}'").into()),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.query.exists() {
        return Err(format!("Query image not found: {}", cli.query.display()).into());
    }
    if !cli.gallery.is_dir() {
        return Err(format!("Gallery directory not found: {}", cli.gallery.display()).into());
    }
    if cli.size == 0 {
        return Err("Size must be a positive number of pixels".into());
    }
    Ok(())
}
