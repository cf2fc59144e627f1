//! Command-line interface for shiplabel.
//!
//! This module provides the CLI structure for the `shiplabel` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    describe_record, describe_recovery, ConfigCommand, DecodeCommand, EncodeCommand,
    LabelCommand, RecordArgs, RecoverCommand,
};

use crate::logging::Verbosity;

/// shiplabel - Encode delivery records into label identifiers and back
///
/// Builds the identifier URL carried by a shipping label's code, decodes it
/// back into the delivery record, and recovers records from printed label
/// text when no identifier is available.
#[derive(Debug, Parser)]
#[command(name = "shiplabel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a delivery record into an identifier URL
    Encode(EncodeCommand),

    /// Decode an identifier URL back into its record
    Decode(DecodeCommand),

    /// Recover a record from printed label lines
    Recover(RecoverCommand),

    /// Print the text of a shipping label
    Label(LabelCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "shiplabel");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(
            parse(&["shiplabel", "-q", "config", "path"]).verbosity(),
            Verbosity::Quiet
        );
        assert_eq!(
            parse(&["shiplabel", "config", "path"]).verbosity(),
            Verbosity::Normal
        );
        assert_eq!(
            parse(&["shiplabel", "-v", "config", "path"]).verbosity(),
            Verbosity::Verbose
        );
        assert_eq!(
            parse(&["shiplabel", "-vv", "config", "path"]).verbosity(),
            Verbosity::Trace
        );
    }

    #[test]
    fn test_parse_encode() {
        let cli = parse(&[
            "shiplabel",
            "encode",
            "--order",
            "12345",
            "--street",
            "Av. Brasil",
            "--boxes",
            "3",
            "--base-url",
            "https://example.com/pedido",
        ]);
        let Command::Encode(cmd) = cli.command else {
            panic!("expected encode");
        };
        assert_eq!(cmd.base_url.as_deref(), Some("https://example.com/pedido"));

        let record = cmd.record.into_record();
        assert_eq!(record.order_number, "12345");
        assert_eq!(record.address.street, "Av. Brasil");
        assert_eq!(record.box_count.get(), 3);
    }

    #[test]
    fn test_parse_encode_requires_order() {
        assert!(Cli::try_parse_from(["shiplabel", "encode", "--street", "X"]).is_err());
    }

    #[test]
    fn test_parse_decode() {
        let cli = parse(&[
            "shiplabel",
            "decode",
            "https://example.com/pedido/1?street=X",
            "--format",
            "json",
        ]);
        let Command::Decode(cmd) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(cmd.identifier, "https://example.com/pedido/1?street=X");
        assert_eq!(cmd.format, Some(OutputFormat::Json));
        assert!(!cmd.lenient);
    }

    #[test]
    fn test_parse_recover() {
        let cli = parse(&[
            "shiplabel",
            "recover",
            "--address",
            "Rua X, 1 - Centro, Recife - PE, 50000-000",
            "--transport",
            "Placa: XYZ-9876 | Motorista: Ana",
            "--order",
            "77",
        ]);
        let Command::Recover(cmd) = cli.command else {
            panic!("expected recover");
        };
        assert_eq!(cmd.known_scalars().order_number, "77");
        assert_eq!(cmd.boxes, "1");
        assert_eq!(cmd.format, None);
    }

    #[test]
    fn test_parse_label() {
        let cli = parse(&["shiplabel", "label", "-o", "5", "-f", "json"]);
        assert!(matches!(cli.command, Command::Label(ref cmd) if cmd.format == Some(OutputFormat::Json)));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["shiplabel", "config", "validate", "--file", "/tmp/x.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["shiplabel", "-c", "/custom/config.toml", "config", "show"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
