//! protoc-gen-mmdata - protoc plugin and offline CLI for mmdata tables
//!
//! Commands:
//! - `protoc-gen-mmdata` / `protoc-gen-mmdata plugin` - Run as a protoc plugin (stdin/stdout)
//! - `protoc-gen-mmdata generate` - Generate artifacts from a descriptor set
//! - `protoc-gen-mmdata list` - List the tables a descriptor set defines

use clap::{Parser, Subcommand};
use mmdata_codegen::GenerateError;
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;
mod offline;
mod plugin;

#[cfg(test)]
mod test_fixtures;

#[derive(Parser)]
#[command(name = "protoc-gen-mmdata")]
#[command(author, version, about = "Generate mmdata shared-memory tables from protobuf schemas", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset (default: from configuration)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a CodeGeneratorRequest from stdin, write the response to stdout
    Plugin,

    /// Generate artifacts from a serialized FileDescriptorSet
    Generate {
        /// Descriptor set produced by `protoc --descriptor_set_out`
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Proto path to generate (repeatable; default: every file in the set)
        #[arg(short, long = "file")]
        files: Vec<String>,

        /// Output directory for generated artifacts
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Plugin parameter string (key=value,...), applied after --config
        #[arg(short, long)]
        param: Option<String>,
    },

    /// List every table the descriptor set defines, without writing artifacts
    List {
        /// Descriptor set produced by `protoc --descriptor_set_out`
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print JSON instead of one line per table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_level = cli.log_level.as_deref();

    let result = match cli.command.unwrap_or(Commands::Plugin) {
        Commands::Plugin => plugin::run(log_level),
        Commands::Generate {
            descriptor_set,
            files,
            out_dir,
            config,
            param,
        } => offline::generate(
            &offline::GenerateArgs {
                descriptor_set,
                files,
                out_dir,
                config,
                param,
            },
            log_level,
        ),
        Commands::List {
            descriptor_set,
            config,
            json,
        } => offline::list(&descriptor_set, config.as_deref(), json, log_level),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("protoc-gen-mmdata: {err:#}");
            exit_code_for(&err)
        }
    }
}

/// Generator errors keep their own code; anything else is a plain failure.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<GenerateError>()
        .map_or(ExitCode::FAILURE, |e| ExitCode::from(e.error_code()))
}
