#[tokio::main]
async fn main() {
    if let Err(err) = hooksend::run().await {
        eprintln!("hooksend: {}", err);
        std::process::exit(1);
    }
}
