use clap::Parser;
use colored::Colorize;

use plotmap::cli::Cli;
use plotmap::config::{get_config, init_config};
use plotmap::runtime::modes::{self, Mode};
use plotmap::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            let config = get_config();
            // guard 必须存活到进程结束，保证日志刷新
            let _guard = init_logging(&config.logging)?;
            modes::run_server().await
        }
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Unknown => {
            eprintln!("{}", "No execution mode enabled in this build".red());
            std::process::exit(2);
        }
    }
}
