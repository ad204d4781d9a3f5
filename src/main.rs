use clap::Parser;
use miette::Result;
use tolchain::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    tolchain::cli::init_logging(cli.global.verbose);

    match cli.command {
        Commands::Analyze(args) => tolchain::cli::commands::analyze::run(args, &cli.global),
        Commands::Validate(args) => tolchain::cli::commands::validate::run(args, &cli.global),
    }
}
