// Entry point for `cargo run -p web-server`: serves the API with the file and
// environment configuration, without the CLI's overrides.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configuration::load_config(None)?;
    let _guard = configuration::init_tracing(&config.logging)?;
    web_server::run_server(&config).await
}
