#[tokio::main]
async fn main() -> anyhow::Result<()> {
    journal_entry_proxy_lib::run().await
}
