use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "transformime", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the mimetype that would be rendered (nothing if none is renderable).
    Preferred(BundleArgs),
    /// Render the preferred representation as an HTML fragment.
    Render(RenderArgs),
    /// List the renderable mimetypes in precedence order.
    Mimetypes(OrderArgs),
}

#[derive(Args, Debug)]
struct OrderArgs {
    /// Precedence config JSON (`{"order": [...]}`). Defaults to the built-in order.
    #[arg(long)]
    order: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BundleArgs {
    /// Input mimebundle or notebook output JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    order: OrderArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    bundle: BundleArgs,

    /// Output HTML path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Preferred(args) => cmd_preferred(args),
        Command::Render(args) => cmd_render(args),
        Command::Mimetypes(args) => cmd_mimetypes(args),
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn build_registry(args: &OrderArgs) -> anyhow::Result<transformime::Transformime> {
    let options = match &args.order {
        Some(path) => {
            let cfg = transformime::PrecedenceConfig::from_path(path)
                .with_context(|| format!("load precedence config '{}'", path.display()))?;
            transformime::TransformimeOptions::with_config(builtin_transformers(), &cfg)
        }
        None => transformime::TransformimeOptions::default(),
    };
    Ok(transformime::Transformime::new(options)?)
}

fn builtin_transformers() -> Vec<Arc<dyn transformime::Transformer>> {
    transformime::Builtin::ALL
        .into_iter()
        .map(|b| Arc::new(b) as Arc<dyn transformime::Transformer>)
        .collect()
}

fn read_bundle(path: &Path) -> anyhow::Result<transformime::MimeBundle> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open bundle '{}'", path.display()))?;
    let bundle = transformime::MimeBundle::from_json_str(&s)
        .with_context(|| format!("parse bundle '{}'", path.display()))?;
    Ok(bundle)
}

fn cmd_preferred(args: BundleArgs) -> anyhow::Result<()> {
    let registry = build_registry(&args.order)?;
    let bundle = read_bundle(&args.in_path)?;
    if let Some(mimetype) = registry.preferred_mimetype(&bundle) {
        println!("{mimetype}");
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let registry = build_registry(&args.bundle.order)?;
    let bundle = read_bundle(&args.bundle.in_path)?;

    let Some(mut artifact) = registry.transform(&bundle)? else {
        eprintln!("no renderable representation");
        return Ok(());
    };
    artifact.ensure_typeset(&transformime::NoopTypesetter)?;
    let html = artifact.to_html();

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, html.as_bytes())
                .with_context(|| format!("write html '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn cmd_mimetypes(args: OrderArgs) -> anyhow::Result<()> {
    let registry = build_registry(&args)?;
    for mimetype in registry.active_order() {
        println!("{mimetype}");
    }
    Ok(())
}
