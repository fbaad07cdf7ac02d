//! # authz-check
//!
//! Evaluates one scope request and prints the resulting token access
//! section as JSON.
//!
//! ```text
//! authz-check --username alice --role user --scope repository:alice/web:pull,push
//! {"access":[{"type":"repository","name":"alice/web","actions":["pull","push"]}]}
//! ```
//!
//! Configuration:
//! - `RUST_LOG` - Log level (default: info), logs go to stderr
//! - `AUTHZ_*` - See [`ServiceConfig::from_env`]

use anyhow::Context;
use clap::Parser;
use docker_scope_authz::{AuthorizationService, Identity, ResponseToken, ServiceConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "authz-check")]
#[command(about = "Decide Docker registry token grants for an identity and scope")]
#[command(version)]
struct Cli {
    /// Authenticated username
    #[arg(short, long)]
    username: String,

    /// Role held by the user (repeatable)
    #[arg(short, long = "role")]
    roles: Vec<String>,

    /// Requested scope, e.g. repository:alice/web:pull,push
    #[arg(short, long)]
    scope: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ServiceConfig::from_env().context("loading configuration")?;
    let service = AuthorizationService::new(config);
    let identity = Identity::new(cli.username).with_roles(cli.roles);

    info!("authz-check v{}", docker_scope_authz::VERSION);

    let decision = match service.decide(&identity, cli.scope.as_deref()) {
        Ok(decision) => decision,
        Err(e) => {
            error!("authorization failed: {}", e);
            return Err(e).context("authorizing scope request");
        }
    };

    info!(kind = %decision.kind, "decision");

    let token = ResponseToken {
        access: decision.into_access(),
    };
    let output = if cli.pretty {
        serde_json::to_string_pretty(&token)?
    } else {
        serde_json::to_string(&token)?
    };
    println!("{}", output);

    Ok(())
}
