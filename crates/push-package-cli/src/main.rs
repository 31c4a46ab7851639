//! Command-line interface for building signed push packages.
//!
//! Reads website parameters from a JSON file, validates the iconset,
//! signs the digest manifest with PEM or PKCS#12 credentials, and writes
//! the package archive.

use clap::Parser;
use push_package::{default_output_path, PushPackage, SigningCredentials, WebsiteParams};
use secrecy::SecretString;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "push-package")]
#[command(about = "Build a signed Safari push notification package")]
struct Cli {
    /// Website parameters JSON file
    #[arg(short = 'w', long)]
    website_json: PathBuf,

    /// Directory containing the six required icon files
    #[arg(short = 'i', long)]
    iconset: PathBuf,

    /// PKCS#12 (.p12) credential container
    #[arg(short = 'p', long)]
    pkcs12: Option<PathBuf>,

    /// PEM bundle containing certificate and private key
    #[arg(short = 'c', long)]
    certificate: Option<PathBuf>,

    /// Password for the PKCS#12 container
    #[arg(long)]
    password: Option<String>,

    /// Intermediate certificate to co-package for chain verification
    #[arg(long)]
    intermediate: Option<PathBuf>,

    /// Output path (defaults to pushPackage.zip in the system temp dir)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// ZIP compression level (0-9, default: 6)
    #[arg(short = 'z', long, default_value = "6")]
    zip_level: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let params = WebsiteParams::from_reader(File::open(&cli.website_json)?)?;
    let credentials = load_credentials(&cli)?;

    let output = cli.output.clone().unwrap_or_else(default_output_path);

    PushPackage::new()
        .website_params(params)
        .iconset(&cli.iconset)
        .credentials(credentials)
        .compression_level(cli.zip_level)
        .save_to(&output)?;

    println!("Wrote: {}", output.display());
    Ok(())
}

fn load_credentials(cli: &Cli) -> Result<SigningCredentials, Box<dyn std::error::Error>> {
    let password = cli.password.clone().map(SecretString::new);

    let source = cli
        .pkcs12
        .as_ref()
        .or(cli.certificate.as_ref())
        .ok_or("Must provide either --pkcs12 or --certificate")?;

    let mut credentials = SigningCredentials::from_path(source, password.as_ref())?;

    if let Some(ref intermediate) = cli.intermediate {
        credentials = credentials.with_intermediate_path(intermediate)?;
    }

    Ok(credentials)
}
