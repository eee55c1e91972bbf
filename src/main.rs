mod cli;

use unable::{config, convert};
use unable_aifc::Decryption;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "unable=trace,unable_aifc=debug".to_string()
        } else {
            "unable=info,unable_aifc=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Decrypt {
            inputs,
            output,
            force,
        } => decrypt_files(&inputs, output, force, cli.config.as_deref()),
        Commands::Inspect { file, json } => inspect_file(&file, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("unable {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn decrypt_files(
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    force: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if output.is_some() && inputs.len() > 1 {
        anyhow::bail!("--output can only be used with a single input file");
    }

    let overwrite = force || config.output.overwrite;
    let mut failed = 0;

    for input in inputs {
        let target = match &output {
            Some(path) => path.clone(),
            None => convert::output_path_for(input, &config.output)?,
        };

        tracing::debug!("Decrypting {:?} -> {:?}", input, target);

        match convert::decrypt_file(input, &target, overwrite) {
            Ok(Decryption::Decrypted) => {
                println!("Decrypted: {} -> {}", input.display(), target.display());
            }
            Ok(Decryption::AlreadyPlain) => {
                println!(
                    "info: {} was not encrypted, duplicated input file",
                    input.display()
                );
                println!("Copied: {} -> {}", input.display(), target.display());
            }
            Err(e) => {
                failed += 1;
                eprintln!("error: {:#}", e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, inputs.len());
    }

    Ok(())
}

fn inspect_file(file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let reader = File::open(file).with_context(|| format!("Failed to open {:?}", file))?;
    let report = unable_aifc::inspect(&mut BufReader::new(reader))
        .with_context(|| format!("Failed to inspect {:?}", file))?;

    if json {
        let json_str = serde_json::to_string_pretty(&report)?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Form: {} ({} bytes)", report.form_type, report.form_size);

    if let Some(ref format) = report.format {
        println!("Channels: {}", format.channels);
        println!("Sample size: {} bit", format.sample_size);
        println!("Sample rate: {} Hz", format.sample_rate);
        print!("Frames: {}", format.sample_frames);
        if let Some(secs) = format.duration_secs() {
            print!(" ({:.3} s)", secs);
        }
        println!();
        print!("Compression: {}", format.compression_type);
        if let Some(ref name) = format.compression_name {
            print!(" \"{}\"", name);
        }
        println!();
    } else {
        println!("No COMM chunk");
    }

    println!(
        "Encrypted: {}{}",
        if report.is_encrypted() { "yes" } else { "no" },
        if report.has_key { " (key present)" } else { "" }
    );

    println!("\nChunks: {}", report.chunks.len());
    for (i, chunk) in report.chunks.iter().enumerate() {
        println!(
            "  [{}] {} at {} ({} bytes)",
            i, chunk.id, chunk.data_start, chunk.size
        );
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_output_config(&config.output);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            print_output_config(&config.output);
        }
    }

    Ok(())
}

fn print_output_config(output: &config::OutputConfig) {
    match output.dir {
        Some(ref dir) => println!("  Output dir: {}", dir.display()),
        None => println!("  Output dir: next to input"),
    }
    println!("  Suffix: {:?}", output.suffix);
    println!("  Overwrite: {}", output.overwrite);
}
