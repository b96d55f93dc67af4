use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use jamsearch::{cli, config, context::AppContext, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Skip the network and work from cached results only
    #[clap(long, global = true)]
    offline: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search tracks by name
    Search(SearchOptions),

    /// Show details of a single track
    Detail(DetailOptions),

    /// Interactive search reading queries from stdin
    Browse,

    /// Inspect or clear cached search results
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search text
    pub query: String,

    /// Number of result pages to load
    #[clap(long, default_value_t = 1)]
    pub pages: u32,

    /// Refetch the first page even if it is cached
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DetailOptions {
    /// Jamendo track id
    pub id: String,

    /// Refetch even if the track detail is cached
    #[clap(long)]
    pub force: bool,

    /// Open the track page in the browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    /// Remove the cached snapshot
    #[clap(long)]
    pub clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let ctx = match AppContext::bootstrap(cli.offline).await {
        Ok(ctx) => ctx,
        Err(e) => error!("Cannot start jamsearch. Err: {}", e),
    };

    match cli.command {
        Command::Search(opt) => cli::search(&ctx, opt.query, opt.pages, opt.force).await,
        Command::Detail(opt) => cli::detail(&ctx, opt.id, opt.force, opt.open).await,
        Command::Browse => cli::browse(&ctx).await,
        Command::Cache(opt) => cli::cache(&ctx, opt.clear).await,
        Command::Completions(_) => {}
    }
}
