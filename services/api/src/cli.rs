use crate::demo::{run_demo, run_stats_report, DemoArgs, StatsReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talentdesk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talentdesk",
    about = "Run the job-board API or inspect its hiring statistics from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect hiring statistics without starting the server
    Stats {
        #[command(subcommand)]
        command: StatsCommand,
    },
    /// Run an end-to-end CLI demo covering intake, review, and statistics
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum StatsCommand {
    /// Render a registration-rate table for a period ending today
    Report(StatsReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Stats {
            command: StatsCommand::Report(args),
        } => run_stats_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
