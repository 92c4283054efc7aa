use clap::Parser;
use hexaflock::cli::{Cli, Commands, Context};
use hexaflock::manifest::Manifest;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let manifest = Manifest::load_or_default(cli.config.as_deref())?;
    hexaflock::logging::init(&manifest.log_level, manifest.log_format)?;

    let ctx = Context::new(manifest, cli.style);

    match cli.command {
        Commands::Generate(args) => hexaflock::cli::generate::run(args, &ctx)?,
        Commands::Traits(args) => hexaflock::cli::traits::run(args, &ctx)?,
        Commands::Batch(args) => hexaflock::cli::batch::run(args, &ctx)?,
        Commands::Stamp(args) => hexaflock::cli::stamp::run(args, &ctx)?,
        Commands::Fee(args) => hexaflock::cli::fee::run(args, &ctx)?,
        Commands::Validate(args) => hexaflock::cli::validate::run(args, &ctx)?,
        Commands::Inspect(args) => hexaflock::cli::inspect::run(args, &ctx)?,
        Commands::Completions(args) => hexaflock::cli::completions::run(args)?,
    }

    Ok(())
}
