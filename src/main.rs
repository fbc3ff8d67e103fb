#[tokio::main]
async fn main() {
    rentals_backend::run().await;
}
