use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use miette::{IntoDiagnostic, WrapErr};
use skypost::client::Agent;
use skypost::post::Draft;
use skypost::types::Datetime;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about = "Post to Bluesky, with mentions, links, replies and images")]
struct Args {
    /// Account handle (e.g. alice.bsky.social) or DID
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    handle: String,

    /// App password
    #[arg(
        long,
        env = "BSKY_APP_PASSWORD",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    password: String,

    /// Post text; @mentions and URLs become facets
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    text: String,

    /// Post to reply to, as an at:// URI or a https://bsky.app/ link
    #[arg(long, alias = "parentUri")]
    parent_uri: Option<String>,

    /// Image to attach; repeat for several
    #[arg(long = "image-path", alias = "imagePath")]
    image_paths: Vec<PathBuf>,

    /// Alt text applied to every attached image
    #[arg(long, alias = "altText", default_value = "")]
    alt_text: String,

    /// Timestamp to use instead of now, as "DD/MM/YYYY hh:mm" (UTC)
    #[arg(long, alias = "customDate")]
    custom_date: Option<String>,

    /// PDS to talk to
    #[arg(long, env = "BSKY_PDS_URL", default_value = "https://bsky.social")]
    pds: Url,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log request progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "skypost=debug,skypost_common=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("SKYPOST_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let created_at = args
        .custom_date
        .as_deref()
        .map(Datetime::parse_custom)
        .transpose()
        .wrap_err("Invalid custom date")?;

    let mut http = reqwest::Client::builder();
    if let Some(secs) = args.timeout {
        http = http.timeout(Duration::from_secs(secs));
    }
    let http = http.build().into_diagnostic()?;

    let mut agent = Agent::new(http, args.pds);
    agent
        .login(&args.handle, &args.password)
        .await
        .wrap_err("Failed to login")?;

    let draft = Draft::builder()
        .text(args.text)
        .maybe_parent_uri(args.parent_uri)
        .images(args.image_paths)
        .alt_text(args.alt_text)
        .maybe_created_at(created_at)
        .build();
    let output = agent.publish(draft).await?;

    let pretty = serde_json::to_string_pretty(&output).into_diagnostic()?;
    println!("Post successful: {pretty}");
    Ok(())
}
