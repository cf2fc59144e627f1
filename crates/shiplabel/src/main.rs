//! `shiplabel` - CLI for shipping label identifiers
//!
//! This binary encodes delivery records into identifier URLs, decodes them
//! back, and recovers records from printed label text.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use shiplabel::cli::{
    describe_record, describe_recovery, Cli, Command, ConfigCommand, DecodeCommand,
    EncodeCommand, LabelCommand, RecoverCommand,
};
use shiplabel::config::OutputFormat;
use shiplabel::recover::{Recovery, RecoverySource};
use shiplabel::{init_logging, parse_query, Config, Identifier, LabelText, RecordEncoder};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    // Execute the command
    match cli.command {
        Command::Encode(cmd) => handle_encode(&config, cmd),
        Command::Decode(cmd) => handle_decode(&config, &cmd),
        Command::Recover(cmd) => handle_recover(&config, &cmd),
        Command::Label(cmd) => handle_label(&config, cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn encoder_for(config: &Config, base_url: Option<String>) -> RecordEncoder {
    match base_url {
        Some(url) => RecordEncoder::new(url),
        None => RecordEncoder::from_config(config),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_encode(config: &Config, cmd: EncodeCommand) -> Result<()> {
    let encoder = encoder_for(config, cmd.base_url);
    println!("{}", encoder.encode(&cmd.record.into_record()));
    Ok(())
}

fn handle_decode(config: &Config, cmd: &DecodeCommand) -> Result<()> {
    let params = if cmd.lenient {
        parse_query(&cmd.identifier)
    } else {
        Identifier::parse(&cmd.identifier)
            .context("decoding identifier")?
            .into_params()
    };
    debug!(params = params.len(), "Decoded identifier parameters");

    let recovery = RecoverySource::Structured(params).recover();
    print_recovery(&recovery, cmd.format.unwrap_or(config.output.format), false)
}

fn handle_recover(config: &Config, cmd: &RecoverCommand) -> Result<()> {
    let recovery = RecoverySource::FormattedText {
        address_line: cmd.address.clone(),
        transport_line: cmd.transport.clone(),
        known: cmd.known_scalars(),
    }
    .recover();
    print_recovery(&recovery, cmd.format.unwrap_or(config.output.format), true)
}

fn print_recovery(recovery: &Recovery, format: OutputFormat, with_fidelity: bool) -> Result<()> {
    match format {
        OutputFormat::Json if with_fidelity => print_json(recovery),
        OutputFormat::Json => print_json(&recovery.record),
        OutputFormat::Plain if with_fidelity => {
            println!("{}", describe_recovery(recovery));
            Ok(())
        }
        OutputFormat::Plain => {
            println!("{}", describe_record(&recovery.record));
            Ok(())
        }
    }
}

fn handle_label(config: &Config, cmd: LabelCommand) -> Result<()> {
    let encoder = encoder_for(config, cmd.base_url);
    let label = LabelText::new(&cmd.record.into_record(), &encoder);
    match cmd.format.unwrap_or(config.output.format) {
        OutputFormat::Json => print_json(&label),
        OutputFormat::Plain => {
            println!("{label}");
            Ok(())
        }
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                print_json(config)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Encoder]");
                println!("  Base URL:           {}", config.encoder.base_url);
                println!();
                println!("[Output]");
                println!("  Format:             {:?}", config.output.format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
