// This file is an example of how to use the `mudra_vision` library.
// The main library entry point is `src/lib.rs`.

use mudra_vision::{GestureCatalog, describe};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mudra_vision=info")))
        .init();

    println!("Mudra Vision Engine - Example Runner");

    let catalog = GestureCatalog::standard();
    info!(rules = catalog.len(), dead_aliases = catalog.dead_aliases().len(), "Catalog loaded");
    for (priority, label) in catalog.labels().enumerate() {
        println!("{:>2}. {:<22} {}", priority + 1, label, describe(label).meaning);
    }

    // In a real application, landmarks come from a hand tracker each frame:
    //
    // let classifier = Classifier::new(catalog);
    // let result = classifier.classify_points(&tracked_points)?;
    // println!("{result}");
}
