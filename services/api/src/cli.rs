use crate::console::{run_chat, run_screen, ChatArgs, ScreenArgs};
use crate::server;
use campus_care::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Campus Care",
    about = "Run the campus wellbeing service or try the screening and support tools locally",
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
    /// Score a questionnaire from the command line
    Screen(ScreenArgs),
    /// Classify a single support message and print the reply
    Chat(ChatArgs),
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
        Command::Screen(args) => run_screen(args),
        Command::Chat(args) => run_chat(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["campus-care"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn screen_collects_answers() {
        let cli = Cli::try_parse_from(["campus-care", "screen", "gad7", "1", "2", "0"])
            .expect("parses");
        match cli.command {
            Some(Command::Screen(args)) => {
                assert_eq!(args.instrument, "gad7");
                assert_eq!(args.answers, vec!["1", "2", "0"]);
            }
            other => panic!("expected screen command, got {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["campus-care", "serve", "--port", "9090"]).expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(9090));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
