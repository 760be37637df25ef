#[tokio::main]
async fn main() -> anyhow::Result<()> {
    admitbot_server::start().await
}
