use clap::{Args, Parser, Subcommand};
use reqly::{routes, Backend, CommandRouter, Config, FormInput, Method, RemoteBackend, RequestForm};
use std::net::IpAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(version, about = "Fill in an HTTP request, hand it to the backend, read what comes back")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the command host (`/api/invoke/{command}`)
    Serve(ServeArgs),
    /// Submit one request through the form and print the response text
    Send(SendArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides REQLY_BIND)
    #[arg(long)]
    bind: Option<IpAddr>,

    /// Per-phase request timeout in milliseconds (overrides REQLY_TIMEOUT_MS)
    #[arg(long = "timeout-ms")]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Args)]
struct SendArgs {
    /// Request URL, passed through unvalidated
    #[arg(long, default_value = "")]
    url: String,

    /// GET, POST, PUT or DELETE
    #[arg(short = 'X', long, default_value_t = Method::Get)]
    method: Method,

    /// Header line `Name: Value`; repeatable
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Header lines as one newline-separated block, appended after --header
    #[arg(long = "headers-text")]
    headers_text: Option<String>,

    /// Request body
    #[arg(short = 'd', long, default_value = "")]
    body: String,

    /// Base URL of a `reqly serve` host (overrides REQLY_BACKEND_URL)
    #[arg(long)]
    backend: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reqly=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Serve(args) => serve(config, args).await,
        Command::Send(args) => send(config, args).await,
    }
}

async fn serve(mut config: Config, args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(timeout_ms) = args.timeout_ms.filter(|t| *t > 0) {
        config.request_timeout_ms = timeout_ms;
    }

    let app = routes::app(CommandRouter::from_config(&config));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn send(config: Config, args: SendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let backend: Arc<dyn Backend> = match args.backend.or(config.backend_url.clone()) {
        Some(base_url) => Arc::new(RemoteBackend::new(base_url)),
        None => Arc::new(CommandRouter::from_config(&config)),
    };

    let mut headers = args.headers;
    headers.extend(args.headers_text);

    let mut form = RequestForm::new(backend);
    form.handle(FormInput::Url(args.url));
    form.handle(FormInput::Method(args.method));
    form.handle(FormInput::Headers(headers.join("\n")));
    form.handle(FormInput::Body(args.body));

    form.send_request().await;
    println!("{}", form.response_text());
    Ok(())
}
