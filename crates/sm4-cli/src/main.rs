//! Command-line interface for the SM4 tool.
//!
//! Key, IV and mode come from `--key`/`--iv`/`--mode`, then the `SM4_KEY`,
//! `SM4_IV` and `SM4_MODE` environment variables, then the same variables as
//! seen at build time:
//!
//! ```text
//! SM4_KEY=1234123412341234 SM4_IV=0000111122223333 SM4_MODE=CBC cargo build --release
//! ```

#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sm4_engine::{CipherConfig, CipherError, Mode, Sm4Engine, Verifier};

const USAGE_HINT: &str = "set --key and --iv (or SM4_KEY and SM4_IV, at run or build time); \
both must be 16 bytes. --mode is ECB (default), CBC, CFB or OFB.";

/// SM4 encryption and decryption.
#[derive(Parser)]
#[command(
    name = "sm4",
    version,
    about = "SM4 encryption and decryption with round-trip checks"
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, PartialEq, Eq)]
struct Settings {
    /// Key as 16 bytes of text.
    #[arg(long, global = true, env = "SM4_KEY", hide_env_values = true)]
    key: Option<String>,
    /// IV as 16 bytes of text; required even for ECB.
    #[arg(long, global = true, env = "SM4_IV", hide_env_values = true)]
    iv: Option<String>,
    /// Chaining mode: ECB, CBC, CFB or OFB.
    #[arg(long, global = true, env = "SM4_MODE")]
    mode: Option<String>,
}

impl Settings {
    /// Values baked in from the build environment.
    fn built_in() -> Self {
        Self {
            key: option_env!("SM4_KEY").map(str::to_string),
            iv: option_env!("SM4_IV").map(str::to_string),
            mode: option_env!("SM4_MODE").map(str::to_string),
        }
    }

    /// Fills every unset field from `fallback`.
    fn or(self, fallback: Settings) -> Self {
        Self {
            key: self.key.or(fallback.key),
            iv: self.iv.or(fallback.iv),
            mode: self.mode.or(fallback.mode),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt the argument and print the ciphertext as hex.
    Encrypt {
        /// Plaintext.
        text: String,
        /// Treat the argument as hex-encoded bytes.
        #[arg(long, default_value_t = false)]
        hex_input: bool,
    },
    /// Decrypt a hex ciphertext and print the plaintext.
    Decrypt {
        /// Ciphertext as hex.
        #[arg(value_name = "HEX")]
        ciphertext: String,
        /// Print the plaintext as hex instead of text.
        #[arg(long, default_value_t = false)]
        hex_output: bool,
    },
    /// Round-trip random messages in every mode with the configured key and IV.
    Check {
        /// Number of random messages per mode.
        #[arg(long, default_value_t = 32)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Why a run failed; decides the exit status.
#[derive(Debug)]
enum Failure {
    /// Settings were rejected before any operation started.
    Config(CipherError),
    /// The requested operation failed.
    Operation(anyhow::Error),
}

impl Failure {
    fn exit_status(&self) -> u8 {
        match self {
            Failure::Config(_) => 2,
            Failure::Operation(_) => 1,
        }
    }

    fn report(&self) {
        match self {
            Failure::Config(err) => {
                eprintln!("error: {err}");
                eprintln!("{USAGE_HINT}");
            }
            Failure::Operation(err) => eprintln!("error: {err:#}"),
        }
    }
}

fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match execute(Cli::parse()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            failure.report();
            ExitCode::from(failure.exit_status())
        }
    }
}

fn execute(cli: Cli) -> Result<String, Failure> {
    let config = resolve_config(cli.settings).map_err(Failure::Config)?;
    run(cli.command, config).map_err(Failure::Operation)
}

fn resolve_config(settings: Settings) -> Result<CipherConfig, CipherError> {
    let settings = settings.or(Settings::built_in());
    CipherConfig::from_parts(
        settings.key.as_deref(),
        settings.iv.as_deref(),
        settings.mode.as_deref(),
    )
}

fn run(command: Commands, config: CipherConfig) -> Result<String> {
    debug!("running with mode {}", config.mode());
    match command {
        Commands::Encrypt { text, hex_input } => cmd_encrypt(config, &text, hex_input),
        Commands::Decrypt {
            ciphertext,
            hex_output,
        } => cmd_decrypt(config, &ciphertext, hex_output),
        Commands::Check { samples, seed } => cmd_check(&config, samples, seed),
    }
}

fn cmd_encrypt(config: CipherConfig, text: &str, hex_input: bool) -> Result<String> {
    let plaintext = if hex_input {
        hex::decode(text.trim()).context("decode plaintext hex")?
    } else {
        text.as_bytes().to_vec()
    };
    let verifier = Verifier::new(Sm4Engine::new(config));
    let ciphertext = verifier.encrypt(&plaintext)?;
    Ok(hex::encode(ciphertext))
}

fn cmd_decrypt(config: CipherConfig, ciphertext_hex: &str, hex_output: bool) -> Result<String> {
    let ciphertext = hex::decode(ciphertext_hex.trim()).context("decode ciphertext hex")?;
    let verifier = Verifier::new(Sm4Engine::new(config));
    let plaintext = verifier.decrypt(&ciphertext)?;
    if hex_output {
        Ok(hex::encode(plaintext))
    } else {
        Ok(String::from_utf8_lossy(&plaintext).into_owned())
    }
}

fn cmd_check(config: &CipherConfig, samples: usize, seed: Option<u64>) -> Result<String> {
    let mut rng = seeded_rng(seed);
    for mode in Mode::ALL {
        let verifier = Verifier::new(Sm4Engine::new(config.with_mode(mode)));
        for sample in 0..samples {
            let mut message = vec![0u8; (rng.next_u32() % 80) as usize];
            rng.fill_bytes(&mut message);
            let ciphertext = verifier
                .encrypt(&message)
                .with_context(|| format!("{mode} sample {sample}: encrypt"))?;
            let plaintext = verifier
                .decrypt(&ciphertext)
                .with_context(|| format!("{mode} sample {sample}: decrypt"))?;
            if plaintext != message {
                bail!("{mode} sample {sample}: decrypted message differs");
            }
        }
        info!("{mode}: {samples} samples ok");
    }
    Ok(format!("ok: {samples} samples in each of ECB, CBC, CFB, OFB"))
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
