//! EzLottery license and data file tool
//!
//! Vendor side:
//!   ezlottery issue --machine ABCD-1234-... --expires 2027-12-31 --features import,redeem
//!   ezlottery encrypt --input tickets.csv
//!
//! Operator side:
//!   ezlottery machine-code
//!   ezlottery activate --token @license-ABCD1234.txt
//!   ezlottery decrypt --input tickets.dat --output tickets.csv
//!
//! Logs go to stderr; stdout carries only command output.

use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ezlottery_cli::{
    Config, activate, current_date, days_remaining, decrypt_file, default_license_path,
    encrypt_file, issue, read_token_arg, status, verify, write_license,
};
use ezlottery_license::{LicensePayload, machine_code};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "ezlottery")]
#[command(about = "EzLottery license issuing and data file encryption")]
struct Args {
    /// Config file (defaults to ./ezlottery.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print this machine's code
    MachineCode,

    /// Sign a license for a machine code
    Issue {
        /// Machine code as supplied by the customer
        #[arg(short, long)]
        machine: String,

        /// Expiry date, YYYY-MM-DD
        #[arg(short, long, default_value = "")]
        expires: String,

        /// Comma-separated feature tags; empty grants all
        #[arg(short, long, default_value = "")]
        features: String,

        /// Output file (defaults to license-<first 8>.txt)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Verify a license token
    Verify {
        /// Token text, or @file
        #[arg(short, long)]
        token: String,

        /// Machine code to check against (defaults to this machine)
        #[arg(short, long)]
        machine: Option<String>,

        /// Feature the license must grant (repeatable)
        #[arg(short, long = "feature")]
        features: Vec<String>,
    },

    /// Verify a license for this machine and cache it
    Activate {
        /// Token text, or @file
        #[arg(short, long)]
        token: String,

        /// Machine code to bind to (defaults to this machine)
        #[arg(short, long)]
        machine: Option<String>,
    },

    /// Check the cached license
    Status {
        /// Machine code to check against (defaults to this machine)
        #[arg(short, long)]
        machine: Option<String>,
    },

    /// Encrypt a data file into a .dat container
    Encrypt {
        #[arg(short, long, default_value = "./data.csv")]
        input: PathBuf,

        /// Output file (defaults to the input with a .dat extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a .dat container
    Decrypt {
        #[arg(short, long, default_value = "./data.dat")]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = Config::load(args.config.as_deref())?;
    debug!(?config, "configuration");
    let today = current_date();

    match args.command {
        Command::MachineCode => {
            println!("{}", machine_code());
        }
        Command::Issue {
            machine,
            expires,
            features,
            out,
        } => {
            let token = issue(&config, &machine, &expires, &features)?;
            if token.payload().device_id.is_empty() {
                warn!("machine code has no alphanumeric characters");
            }
            let path = out.unwrap_or_else(|| default_license_path(&token));
            write_license(&token, &path)?;
            println!("{token}");
            eprintln!("License written to {}", path.display());
        }
        Command::Verify {
            token,
            machine,
            features,
        } => {
            let token = read_token_arg(&token)?;
            let payload = verify(&config, &token, machine.as_deref(), &features, today)?;
            print_payload(&payload, today);
        }
        Command::Activate { token, machine } => {
            let token = read_token_arg(&token)?;
            let machine = machine.unwrap_or_else(machine_code);
            let payload = activate(&config, &token, &machine, today)?;
            print_payload(&payload, today);
        }
        Command::Status { machine } => {
            let machine = machine.unwrap_or_else(machine_code);
            match status(&config, &machine, today)? {
                Some(payload) => print_payload(&payload, today),
                None => bail!("not activated"),
            }
        }
        Command::Encrypt { input, output } => {
            let recipient = config.keys.encryption_key()?;
            let written = encrypt_file(&input, output.as_deref(), &recipient)?;
            println!("{}", written.display());
        }
        Command::Decrypt { input, output } => {
            let recipient = config.keys.decryption_key()?;
            decrypt_file(&input, &output, &recipient)?;
            println!("{}", output.display());
        }
    }

    Ok(())
}

fn print_payload(payload: &LicensePayload, today: NaiveDate) {
    println!("device:   {}", payload.device_id);
    println!("expires:  {}", payload.expires);
    println!("features: {}", payload.features.join(","));
    if let Some(days) = days_remaining(payload, today) {
        println!("valid:    {days} more day(s)");
    }
}
