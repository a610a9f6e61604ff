use std::path::PathBuf;
use std::process::ExitCode;

use agricompass::net::api::TransportError;
use agricompass::net::types::{LISTING_CATEGORIES, Role};
use agricompass::pages::explorer::ListingFilters;
use agricompass::state::shell::{AuthMode, Screen};
use agricompass_cli::config::{ClientConfig, ConfigError};
use agricompass_cli::render::{DashboardText, ExplorerText, Header, ScreenText};
use agricompass_cli::terminal::Terminal;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Parser, Debug)]
#[command(name = "agricompass", about = "Agricompass marketplace client")]
struct Cli {
    /// Backend base URL; overrides `AGRICOMPASS_BACKEND_URL`.
    #[arg(long)]
    backend_url: Option<String>,

    /// Session file; overrides `AGRICOMPASS_SESSION_FILE`.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Log requests to stderr.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current screen without fetching anything.
    Status {
        #[arg(long, value_enum, default_value_t = ModeArg::Login)]
        mode: ModeArg,
    },
    Login(LoginArgs),
    Signup(SignupArgs),
    Logout,
    /// Show listings, plus orders for buyers.
    Dashboard,
    /// Search listings; empty filters are omitted.
    Search(SearchArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Login,
    Signup,
}

impl From<ModeArg> for AuthMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Login => Self::Login,
            ModeArg::Signup => Self::Signup,
        }
    }
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "AGRICOMPASS_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "AGRICOMPASS_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, default_value = "farmer")]
    role: Role,
    #[arg(long, default_value = "")]
    region: String,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Free-text query.
    #[arg(long, default_value = "")]
    q: String,
    #[arg(long, default_value = "", value_parser = PossibleValuesParser::new(LISTING_CATEGORIES.into_iter().chain([""])))]
    category: String,
    #[arg(long, default_value = "")]
    region: String,
    #[arg(long, default_value = "")]
    min_price: String,
    #[arg(long, default_value = "")]
    max_price: String,
}

impl From<SearchArgs> for ListingFilters {
    fn from(args: SearchArgs) -> Self {
        Self {
            q: args.q,
            category: args.category,
            region: args.region,
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, CliError> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, ".env file ignored");
        }
    }

    let config = load_config(&cli)?;
    tracing::debug!(backend = %config.backend_url, session_file = %config.session_file.display(), "client configured");
    let mut term = Terminal::from_config(&config)?;

    let ok = match cli.command {
        Command::Status { mode } => run_status(&mut term, mode),
        Command::Login(args) => run_login(&mut term, args).await,
        Command::Signup(args) => run_signup(&mut term, args).await,
        Command::Logout => run_logout(&mut term),
        Command::Dashboard => run_dashboard(&mut term).await,
        Command::Search(args) => run_search(&mut term, args).await,
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.backend_url {
        config = config.with_backend_url(url)?;
    }
    if let Some(path) = &cli.session_file {
        config.session_file.clone_from(path);
    }
    Ok(config)
}

fn run_status(term: &mut Terminal, mode: ModeArg) -> bool {
    term.set_mode(mode.into());
    match term.screen() {
        Screen::Authenticated => print!("{}", Header(term.session())),
        Screen::Unauthenticated(_) => print!("{}", ScreenText(term)),
    }
    true
}

async fn run_login(term: &mut Terminal, args: LoginArgs) -> bool {
    term.set_mode(AuthMode::Login);
    term.login.email = args.email;
    term.login.password = args.password;
    term.submit_login().await;
    print!("{}", ScreenText(term));
    !term.has_error()
}

async fn run_signup(term: &mut Terminal, args: SignupArgs) -> bool {
    term.set_mode(AuthMode::Signup);
    term.signup.name = args.name;
    term.signup.email = args.email;
    term.signup.password = args.password;
    term.signup.role = args.role;
    term.signup.region = args.region;
    term.submit_signup().await;
    print!("{}", ScreenText(term));
    !term.has_error()
}

fn run_logout(term: &mut Terminal) -> bool {
    term.logout();
    print!("{}", ScreenText(term));
    true
}

async fn run_dashboard(term: &mut Terminal) -> bool {
    if !require_session(term) {
        return false;
    }
    term.mount_dashboard().await;
    let dashboard = DashboardText { state: &term.dashboard, session: term.session() };
    print!("{}\n{dashboard}", Header(term.session()));
    term.dashboard.error.is_none()
}

async fn run_search(term: &mut Terminal, args: SearchArgs) -> bool {
    if !require_session(term) {
        return false;
    }
    term.explorer.filters = args.into();
    term.search().await;
    print!("{}\n{}", Header(term.session()), ExplorerText(&term.explorer));
    term.explorer.error.is_none()
}

fn require_session(term: &Terminal) -> bool {
    if term.screen() == Screen::Authenticated {
        return true;
    }
    eprintln!("not signed in; run `agricompass login` first");
    false
}
