use clap::Parser;
use gitsage_dashboard::cli::{
    call, handle_completions, handle_config_init, notify, watch, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Call(args) => call::run_call(args).await,
        Commands::Watch(args) => watch::run_watch(args).await,
        Commands::Notify(args) => notify::run_notify(args).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
