use tracelift_importer::core::App;

#[tokio::main]
async fn main() {
    if let Err(e) = App::run().await {
        eprintln!("\nError: {}\n", e);
        std::process::exit(1);
    }
}
