#[tokio::main]
async fn main() {
    gamestats::start_server().await;
}
