use clap::Parser;
use mkkeylayout::{build_bundle, LayoutError, GENERIC_EXIT_CODE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyboard layout bundle compiler", long_about = None)]
struct Args {
    /// Bundle configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: PathBuf,

    /// Directory the bundle is created in
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let bundle = build_bundle(&args.config, &args.output_dir)?;
    if args.verbose {
        println!("Created {}", bundle.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        let code = e
            .downcast_ref::<LayoutError>()
            .map(LayoutError::exit_code)
            .unwrap_or(GENERIC_EXIT_CODE);
        std::process::exit(code);
    }
}
