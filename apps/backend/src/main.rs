#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wortschatz_backend::run().await
}
