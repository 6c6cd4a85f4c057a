// Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

mod registers;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Xtask {
    /// Log debug output
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    xtask: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a UVM register model from a spreadsheet register table
    RalAutogen {
        /// Register table (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
        #[arg(short, long, value_name = "TABLE")]
        input: PathBuf,

        /// SystemVerilog file to write
        #[arg(short, long, value_name = "FILE", default_value = "uvm_ral_model.sv")]
        output: PathBuf,

        /// Check output only
        #[arg(short, long, default_value_t = false)]
        check: bool,

        /// Fail instead of skipping fields that cannot be parsed
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Generator settings in TOML
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Class name of the generated register block
        #[arg(long)]
        block_name: Option<String>,

        /// Worksheet to read instead of the first one
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Print the registers parsed from a spreadsheet as JSON
    RalInspect {
        /// Register table (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
        #[arg(short, long, value_name = "TABLE")]
        input: PathBuf,

        /// Generator settings in TOML
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Worksheet to read instead of the first one
        #[arg(long)]
        sheet: Option<String>,
    },
}

fn main() {
    let cli = Xtask::parse();
    let _ = simple_logger::SimpleLogger::new()
        .with_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();
    let result = match &cli.xtask {
        Commands::RalAutogen {
            input,
            output,
            check,
            strict,
            config,
            block_name,
            sheet,
        } => registers::load_config(config.as_deref(), *strict, block_name, sheet)
            .and_then(|cfg| registers::autogen(*check, input, output, &cfg)),
        Commands::RalInspect {
            input,
            config,
            sheet,
        } => registers::load_config(config.as_deref(), false, &None, sheet)
            .and_then(|cfg| registers::inspect(input, &cfg)),
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
}
