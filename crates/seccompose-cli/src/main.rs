//! Seccompose CLI — build-time seccomp policy composition.
//!
//! Invoked by the build system once per device/architecture artifact:
//! base policy in, composed policy out, non-zero exit on anything that
//! would leave the sandbox filter incomplete.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

/// Seccompose — compose seccomp-bpf policies for sandboxed device processes.
///
/// Expands `@include` directives in a per-device base policy with the
/// contents of shared policy fragments drawn from a fixed catalog, failing
/// closed on any directive it cannot resolve.
#[derive(Parser)]
#[command(name = "seccompose", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (repeat for more detail: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output logs as JSON (for machine consumption).
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compose a base policy with its shared fragments.
    Compose(commands::compose::ComposeArgs),
    /// Check that every directive in a base policy resolves, without composing.
    Check(commands::check::CheckArgs),
    /// Detect duplicate syscall definitions in a composed policy.
    Lint(commands::lint::LintArgs),
    /// List the fragment catalog.
    Fragments(commands::fragments::FragmentsArgs),
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbosity. Logs go to stderr
    // unconditionally — stdout carries policy text.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Compose(args) => commands::compose::execute(&args),
        Commands::Check(args) => commands::check::execute(&args),
        Commands::Lint(args) => commands::lint::execute(&args),
        Commands::Fragments(args) => commands::fragments::execute(&args),
    }
}
