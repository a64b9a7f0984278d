//! simvec server binary
//!
//! Loads configuration from `simvec.toml` and `SIMVEC_SERVER__*`
//! environment variables, then serves the vector similarity store.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    server::start_server(config).await?;
    Ok(())
}
