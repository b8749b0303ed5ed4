use crate::report::{
    run_readiness_score, run_roles_show, run_wellness_summary, run_wellness_trend,
    ReadinessScoreArgs, RolesShowArgs, WellnessSummaryArgs, WellnessTrendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rugby_hub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rugby Hub",
    about = "Score squad wellness and inspect staff permissions from the command line",
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
    /// Score a single questionnaire without storing it
    Readiness {
        #[command(subcommand)]
        command: ReadinessCommand,
    },
    /// Analyse wellness exports
    Wellness {
        #[command(subcommand)]
        command: WellnessCommand,
    },
    /// Inspect the role and permission tables
    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ReadinessCommand {
    /// Print the readiness score and traffic-light status
    Score(ReadinessScoreArgs),
}

#[derive(Subcommand, Debug)]
enum WellnessCommand {
    /// Trailing-window trend and alerts for one player
    Trend(WellnessTrendArgs),
    /// Squad readiness overview for one day
    Summary(WellnessSummaryArgs),
}

#[derive(Subcommand, Debug)]
enum RolesCommand {
    /// Show a role's rank and permissions, or the full matrix when no role is given
    Show(RolesShowArgs),
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
        Command::Readiness {
            command: ReadinessCommand::Score(args),
        } => {
            run_readiness_score(args);
            Ok(())
        }
        Command::Wellness {
            command: WellnessCommand::Trend(args),
        } => run_wellness_trend(args),
        Command::Wellness {
            command: WellnessCommand::Summary(args),
        } => run_wellness_summary(args),
        Command::Roles {
            command: RolesCommand::Show(args),
        } => run_roles_show(args),
    }
}
