#[tokio::main]
async fn main() {
    schedule_backend::run().await;
}
