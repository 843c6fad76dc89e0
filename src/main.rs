//! SmartBasket CLI entry point

use std::process::ExitCode;

use clap::Parser;

use smart_basket::cli::{
    app::{run_cart, run_suggest, run_transcribe, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use smart_basket::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action } => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Suggest {
            request,
            people,
            budget,
        } => run_suggest(request, people, budget).await,
        Commands::Cart {
            ingredients,
            budget,
        } => run_cart(ingredients, budget).await,
        Commands::Transcribe { file } => run_transcribe(file).await,
    }
}
