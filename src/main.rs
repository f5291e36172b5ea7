mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use convbox::app::{AppContext, render_tool_list};
use convbox::config::Config;
use convbox::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    match cli.command {
        Commands::Tools(args) => {
            print!("{}", render_tool_list(&config.catalog(), args.category.as_deref())?);
        }
        Commands::Convert(args) => {
            let app = AppContext::new(config)?;
            let store = app.store_for(args.out.as_deref())?;
            let saved = app
                .convert_files(&args.tool, &args.files, args.option.as_deref(), &store)
                .await?;
            println!("{}", saved.location);
        }
        Commands::Fetch(args) => {
            let app = AppContext::new(config)?;
            let store = app.store_for(args.out.as_deref())?;
            let saved = app
                .fetch_url(args.tool.as_deref(), &args.url, args.format.as_deref(), &store)
                .await?;
            println!("{}", saved.location);
        }
    }

    Ok(())
}
