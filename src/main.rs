use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use textlock::crypto::{DEFAULT_ITERATIONS, KEY_LEN};
use textlock::{Document, EncryptionEngine, HashRecord, KdfParams};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TEXTLOCK_LOG";

#[derive(Debug, clap::Args)]
struct KdfArgs {
    /// PBKDF2 iteration count; must match between encrypt and decrypt
    #[arg(
        long,
        global = true,
        env = "TEXTLOCK_ITERATIONS",
        default_value_t = DEFAULT_ITERATIONS
    )]
    iterations: u32,
}

impl KdfArgs {
    fn to_kdf_params(&self) -> Result<KdfParams> {
        KdfParams::new(self.iterations, KEY_LEN).context("invalid key derivation settings")
    }
}

/// Where the text to transform comes from and where the result goes.
#[derive(Debug, clap::Args)]
struct IoArgs {
    /// Inline input instead of stdin
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Read input from a file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Write output to a file (atomically) instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl IoArgs {
    /// Stdin is free for a piped password only when input comes from elsewhere.
    fn stdin_free(&self) -> bool {
        self.text.is_some() || self.input.is_some()
    }

    fn read_input(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.input {
            return Document::new(path).read_text();
        }

        if io::stdin().is_terminal() {
            bail!("no input: pass --text, --input or pipe text on stdin");
        }
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    }

    fn write_output(&self, data: &str, trailing_newline: bool) -> Result<()> {
        match &self.output {
            Some(path) => {
                let doc = Document::new(path);
                let replacing = doc.exists();
                doc.write_atomic(data.as_bytes())?;
                tracing::info!(
                    path = %doc.path().display(),
                    bytes = data.len(),
                    replacing,
                    "wrote output"
                );
                Ok(())
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(data.as_bytes())?;
                if trailing_newline {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "textlock")]
#[command(
    version,
    about = "Password-based text encryption and salted password hashing."
)]
struct Cli {
    #[command(flatten)]
    kdf: KdfArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encrypts text into a base64 container
    Encrypt {
        #[command(flatten)]
        files: IoArgs,
    },

    /// Decrypts a base64 container back into text
    Decrypt {
        #[command(flatten)]
        files: IoArgs,
    },

    /// Prints the salted SHA-256 hash of the password
    #[command(arg_required_else_help = true)]
    Hash {
        /// Salt mixed into the hash
        #[arg(long)]
        salt: String,

        /// Print salt and hash as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Checks the password against a salted hash
    #[command(arg_required_else_help = true)]
    Verify {
        /// Salt the hash was computed with
        #[arg(long)]
        salt: String,

        /// Expected hex digest
        #[arg(long)]
        expected: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Cli::parse();

    match args.command {
        Commands::Encrypt { files } => {
            let kdf = args.kdf.to_kdf_params()?;
            let text = files.read_input()?;
            let password = auth::read_password(files.stdin_free(), true)?;

            tracing::info!(bytes = text.len(), iterations = kdf.iterations(), "encrypting");
            let container = EncryptionEngine::with_kdf(kdf).encrypt(&text, &password)?;
            files.write_output(&container, true)?;
        }
        Commands::Decrypt { files } => {
            let kdf = args.kdf.to_kdf_params()?;
            let input = files.read_input()?;
            let password = auth::read_password(files.stdin_free(), false)?;

            tracing::info!(bytes = input.len(), iterations = kdf.iterations(), "decrypting");
            let text = EncryptionEngine::with_kdf(kdf).decrypt(input.trim(), &password)?;
            files.write_output(&text, false)?;
        }
        Commands::Hash { salt, json } => {
            let password = auth::read_password(true, false)?;
            let record = HashRecord::new(&password, &salt);
            if json {
                println!("{}", serde_json::to_string(&record)?);
            } else {
                println!("{}", record.hash());
            }
        }
        Commands::Verify { salt, expected } => {
            let password = auth::read_password(true, false)?;
            if !textlock::matches(&password, &salt, expected.trim()) {
                tracing::warn!("hash verification failed");
                bail!("password does not match");
            }
            println!("match");
        }
    }

    Ok(())
}
