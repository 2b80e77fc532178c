use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;

use fittrack::cli::args::{Cli, Commands};
use fittrack::cli::commands::{self, Context};
use fittrack::config::{ColorSetting, Config, Paths};
use fittrack::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("loading settings from {}", paths.config_file.display()))?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }
    logging::init(&config.general.log_level, cli.verbose);
    tracing::debug!(root = %paths.root.display(), "starting fittrack");

    let ctx = Context::new(config, paths, cli.output);

    let output = match cli.command {
        Commands::Login { email, password } => commands::login(&ctx, &email, &password)?,
        Commands::Register {
            name,
            email,
            password,
        } => commands::register(&ctx, &name, &email, &password)?,
        Commands::Logout => commands::logout(&ctx)?,
        Commands::Whoami => commands::whoami(&ctx)?,
        Commands::Profile(args) => commands::profile(&ctx, args)?,
        Commands::Add(args) => commands::add(&ctx, args)?,
        Commands::Edit(args) => commands::edit(&ctx, args)?,
        Commands::Rm { id } => commands::remove(&ctx, &id)?,
        Commands::List { search } => commands::list(&ctx, search.as_deref())?,
        Commands::Show { id } => commands::show(&ctx, &id)?,
        Commands::Stats(args) => commands::stats(&ctx, args.command)?,
        Commands::Dashboard => commands::dashboard(&ctx)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
