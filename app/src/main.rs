#[tokio::main]
async fn main() -> anyhow::Result<()> {
    userdb_lib::run().await
}
