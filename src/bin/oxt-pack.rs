use std::path::PathBuf;

use clap::{Parser, Subcommand};
use coolprop_calc::package::{PackageSpec, build_extension};
use coolprop_calc::{Calculator, registry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oxt-pack")]
#[command(about = "Package the CoolProp spreadsheet functions as a LibreOffice extension", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the .oxt extension archive
    Build {
        /// Calculation script bundled under Scripts/python/
        #[arg(long)]
        script: PathBuf,
        /// Basic library stub stored as CoolProp/CoolProp.xba
        #[arg(long)]
        basic: PathBuf,
        /// Output archive (defaults to CoolPropLibre.oxt next to the script)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the registered function table as JSON
    Describe,
    /// Show where the CoolProp library is searched for
    Diag,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            script,
            basic,
            output,
        } => {
            let mut package = PackageSpec::new(script, basic);
            if let Some(output) = output {
                package = package.output(output);
            }
            let entries = build_extension(&package)?;
            for entry in &entries {
                println!("  Added: {entry}");
            }
            println!("\nSuccessfully created: {}", package.output.display());
            println!("\nTo install:");
            println!("1. Open LibreOffice Calc");
            println!("2. Go to Tools → Extension Manager");
            println!("3. Click 'Add' and select the .oxt file");
            println!("4. Restart LibreOffice");
        }
        Commands::Describe => {
            println!("{}", serde_json::to_string_pretty(registry::FUNCTIONS)?);
        }
        Commands::Diag => {
            println!("{}", Calculator::from_env().diagnostics());
        }
    }
    Ok(())
}
