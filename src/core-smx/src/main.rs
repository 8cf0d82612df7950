use std::path::PathBuf;

use clap::{Parser, Subcommand};

use core_smx::common::logging::setup_logging;
use core_smx::writer::write_sitemaps;
use core_smx::{SitemapConfig, generate_sitemaps};

#[derive(Parser)]
#[command(name = "core-smx")]
#[command(about = "The Core Sitemap Toolkit", long_about = None)]
struct CoreCli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sitemap files from a config file
    Generate {
        /// The sitemap configuration file (JSON).
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for the generated .xml files (overrides the
        /// config's outDir; defaults to the current directory).
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Add line breaks and tabs to make the sitemaps human-readable
        #[arg(short, long)]
        pretty: bool,
    },

    /// Load and validate a config file without writing anything
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    setup_logging("info");

    let cli = CoreCli::parse();

    match cli.command {
        Commands::Generate {
            config,
            out_dir,
            pretty,
        } => {
            let mut loaded = match SitemapConfig::from_file(&config) {
                Ok(loaded) => loaded,
                Err(e) => {
                    println!("ERROR: Cannot load config ({config:?}): {e}");
                    std::process::exit(1)
                }
            };

            if pretty {
                loaded.pretty = true;
            }
            let dir = out_dir
                .or_else(|| loaded.out_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));

            let (options, urls, routes) = loaded.into_parts();
            let sitemaps = match generate_sitemaps(&options, &urls, &routes).await {
                Ok(sitemaps) => sitemaps,
                Err(e) => {
                    println!("ERROR: {e}");
                    std::process::exit(1)
                }
            };

            match write_sitemaps(&dir, &sitemaps) {
                Ok(written) => {
                    for path in written {
                        println!("Wrote {}", path.display());
                    }
                }
                Err(e) => {
                    println!("ERROR: Cannot write sitemaps to {dir:?}: {e}");
                    std::process::exit(1)
                }
            }
        }

        Commands::Check { config } => match SitemapConfig::from_file(&config) {
            Ok(_) => println!("Valid sitemap config: {config:?}"),
            Err(e) => {
                println!("Invalid sitemap config ({config:?}): {e}");
                std::process::exit(1)
            }
        },
    }
}
