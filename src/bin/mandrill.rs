use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use mandrill::actions::{self, RunContext};
use mandrill::api::{HttpTransport, MandrillClient};
use mandrill::cli::Cli;
use mandrill::config::Config;

fn main() {
    env_logger::init();

    // usage errors exit here, before anything touches the network
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        println!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = Config::from_env()?;
    debug!("base url {}, table width {}", cfg.base_url, cfg.table_width);

    let (key, action) = cli.into_parts();
    let transport =
        HttpTransport::new(cfg.base_url.clone()).context("Could not build HTTP client")?;
    let client = MandrillClient::new(transport, key);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    actions::run(&action, &client, RunContext::now(cfg.table_width), &mut out)
}
