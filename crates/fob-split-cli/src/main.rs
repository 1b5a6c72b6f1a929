use clap::Parser;
use fob_split_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Split(split_args) => commands::split_execute(split_args).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
        cli::Command::Explain(explain_args) => commands::explain_execute(explain_args).await,
        cli::Command::Schema(schema_args) => commands::schema_execute(schema_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
