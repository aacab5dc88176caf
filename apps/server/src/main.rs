use anyhow::Context;
use brk::domain::config::ApiConfig;
use brk::kernel::config::load_config;
use brk_logger::Logger;
use brk_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder().config(&cfg.logging).name(env!("CARGO_PKG_NAME")).init()?;

    Server::builder().config(cfg).build()?.run().await
}
