use crate::bencode::{encode, get, get_int, get_str, BencodeValue, Decoder, DEFAULT_MAX_DEPTH};
use crate::error::Result;
use crate::torrent::{info_hash_hex, load_file};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bencode-rs")]
#[command(about = "Inspect and canonicalize bencoded files", long_about = None)]
pub struct Cli {
    /// Maximum list/dictionary nesting accepted by the decoder
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Disable the nesting limit
    #[arg(long, global = true, conflicts_with = "max_depth")]
    unbounded: bool,

    /// Reject trailing bytes after the top-level value
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the decoded structure of a file
    Show {
        /// Path to the bencoded file
        file: PathBuf,
    },

    /// Print the value at a slash-delimited path, e.g. info/name
    Get {
        /// Path to the bencoded file
        file: PathBuf,

        /// Dictionary path
        path: String,

        /// How to print the resolved value
        #[arg(long = "as", value_enum, default_value_t = OutputKind::Auto)]
        kind: OutputKind,
    },

    /// Re-encode a file with sorted dictionary keys
    Canonicalize {
        /// Path to the bencoded file
        file: PathBuf,

        /// Output file, `-` for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
    },

    /// Print the SHA1 of the canonical `info` dictionary
    InfoHash {
        /// Path to the .torrent file
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputKind {
    /// Pretty-print any value
    Auto,
    /// Require a UTF-8 string
    Text,
    /// Require an integer
    Int,
    /// Write the bencoded bytes of the value
    Raw,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Decoder configured from the global flags
    pub fn decoder(&self) -> Decoder {
        let decoder = Decoder::new().strict(self.strict);
        if self.unbounded {
            decoder.unbounded()
        } else {
            decoder.with_max_depth(self.max_depth)
        }
    }

    pub async fn run(&self) -> Result<()> {
        let decoder = self.decoder();

        match &self.command {
            Commands::Show { file } => {
                let value = load_file(file, &decoder).await?;
                println!("{}", value);
            }

            Commands::Get { file, path, kind } => {
                let value = load_file(file, &decoder).await?;
                self.print_path(&value, path, *kind).await?;
            }

            Commands::Canonicalize { file, output } => {
                let value = load_file(file, &decoder).await?;
                let encoded = encode(&value)?;
                write_output(output, &encoded).await?;
                info!("Wrote {} canonical bytes to {}", encoded.len(), output);
            }

            Commands::InfoHash { file } => {
                let value = load_file(file, &decoder).await?;
                println!("{}", info_hash_hex(&value)?);
            }
        }

        Ok(())
    }

    async fn print_path(&self, value: &BencodeValue, path: &str, kind: OutputKind) -> Result<()> {
        match kind {
            OutputKind::Auto => println!("{}", get(value, path)?),
            OutputKind::Text => println!("{}", get_str(value, path)?),
            OutputKind::Int => println!("{}", get_int(value, path)?),
            OutputKind::Raw => write_output("-", &encode(get(value, path)?)?).await?,
        }
        Ok(())
    }
}

async fn write_output(output: &str, data: &[u8]) -> Result<()> {
    if output == "-" {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(data).await?;
        stdout.flush().await?;
    } else {
        fs::write(Path::new(output), data).await?;
    }
    Ok(())
}
