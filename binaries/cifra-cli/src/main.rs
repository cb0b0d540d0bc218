//! Cifra CLI
//!
//! Command-line front end for the classical cipher library.
//!
//! ```bash
//! cifra encrypt -c keyword-shift -k CLAVE "ataque al amanecer"
//! cifra decrypt -c rail-fence -n 3 WECRLTEERDSOEEFEAOCAIVDEN
//! cifra kasiski --json "$(cat ciphertext.txt)"
//! cifra request request.json
//! ```

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cifra_cipher::analysis::TOO_SHORT;
use cifra_cipher::{Action, Alphabet, CipherRequest, CipherType, Kasiski};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "cifra")]
#[command(about = "Classical ciphers over the Latin and Spanish alphabets")]
#[command(version)]
struct Cli {
    /// Config file (default: $CIFRA_CONFIG or ~/.config/cifra/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text with a classical cipher
    Encrypt(CipherArgs),

    /// Decrypt text with a classical cipher
    Decrypt(CipherArgs),

    /// Kasiski examination of a ciphertext
    Kasiski {
        /// Ciphertext
        text: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every algorithm with its key form
    List,

    /// Execute a JSON request (`-` reads stdin)
    Request {
        /// Path to the request file
        path: String,
    },
}

#[derive(Args)]
struct CipherArgs {
    /// Cipher name, see `cifra list`
    #[arg(short, long)]
    cipher: String,

    /// Letter key, or digit key for periodic
    #[arg(short, long)]
    key: Option<String>,

    /// Permutation for columnar and series, e.g. 3142
    #[arg(short, long)]
    order: Option<String>,

    /// Column permutation for double transposition
    #[arg(long)]
    column_order: Option<String>,

    /// Row permutation for double transposition
    #[arg(long)]
    row_order: Option<String>,

    /// Hill matrix, e.g. "2,3;1,4"
    #[arg(short, long)]
    matrix: Option<String>,

    /// Use the 26-letter alphabet for Hill
    #[arg(long)]
    latin: bool,

    /// Row count, group size or rail count
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Print only the result
    #[arg(short, long)]
    quiet: bool,

    /// Text to transform
    text: String,
}

impl CipherArgs {
    fn request(&self, action: Action) -> CipherRequest {
        CipherRequest {
            text: self.text.clone(),
            algorithm: self.cipher.clone(),
            action,
            key: self.key.clone(),
            digit_key: None,
            order: self.order.clone(),
            column_order: self.column_order.clone(),
            row_order: self.row_order.clone(),
            matrix: self.matrix.clone(),
            alphabet: self.latin.then_some(Alphabet::Latin),
            group_size: self.size,
            rows: self.size,
            rails: self.size,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::debug!(config = ?cli.config, kasiski = ?config.kasiski, "configuration loaded");

    match cli.command {
        Commands::Encrypt(args) => cmd_cipher(&args, Action::Encrypt),
        Commands::Decrypt(args) => cmd_cipher(&args, Action::Decrypt),
        Commands::Kasiski { text, json } => cmd_kasiski(&text, json || config.json, &config),
        Commands::List => cmd_list(),
        Commands::Request { path } => cmd_request(&path, &config),
    }
}

fn cmd_cipher(args: &CipherArgs, action: Action) -> Result<()> {
    let request = args.request(action);
    let cipher = request.cipher_type()?;
    let result = request.execute()?;

    if args.quiet {
        println!("{}", result);
        return Ok(());
    }

    let label = match action {
        Action::Encrypt => "ENCRYPT",
        Action::Decrypt => "DECRYPT",
    };
    println!("\n  {} ({})", label, cipher.name().to_uppercase());
    println!("  Input:  {}", args.text);
    println!("  Output: {}", result);
    Ok(())
}

fn cmd_kasiski(text: &str, json: bool, config: &CliConfig) -> Result<()> {
    println!("{}", render_kasiski(text, json, config)?);
    Ok(())
}

/// Kasiski report as text or pretty JSON, or the too-short message.
fn render_kasiski(text: &str, json: bool, config: &CliConfig) -> Result<String> {
    Ok(match Kasiski::analyze_with(text, &config.kasiski)? {
        Some(report) if json => serde_json::to_string_pretty(&report)?,
        Some(report) => report.to_string().trim_end().to_string(),
        None => TOO_SHORT.to_string(),
    })
}

fn cmd_list() -> Result<()> {
    println!("\n  ALGORITHMS");
    println!("  ==========\n");
    for cipher in CipherType::ALL {
        println!(
            "  {:<22} {:<16} {}",
            cipher.id(),
            cipher.category(),
            cipher.key_form()
        );
    }
    Ok(())
}

fn cmd_request(path: &str, config: &CliConfig) -> Result<()> {
    let request = read_request(path)?;
    println!("{}", request.execute_with(&config.kasiski)?);
    Ok(())
}

/// Parse a request from `path`, or from stdin when `path` is `-`.
fn read_request(path: &str) -> Result<CipherRequest> {
    let json = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?
    };
    Ok(CipherRequest::from_json(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_encrypt_args_build_request() {
        let cli = parse(&["cifra", "encrypt", "-c", "zigzag", "-n", "3", "WEAREDISCOVERED"]);
        let Commands::Encrypt(args) = cli.command else {
            panic!("expected encrypt");
        };
        let request = args.request(Action::Encrypt);
        assert_eq!(request.rails, Some(3));
        assert_eq!(request.cipher_type().unwrap(), CipherType::RailFence);
        assert_eq!(request.execute().unwrap(), "WECRERDSOEEAIVD");
    }

    #[test]
    fn test_latin_flag_selects_hill_alphabet() {
        let cli = parse(&["cifra", "encrypt", "-c", "hill", "-m", "3,3;2,5", "--latin", "HELP"]);
        let Commands::Encrypt(args) = cli.command else {
            panic!("expected encrypt");
        };
        assert_eq!(args.request(Action::Encrypt).execute().unwrap(), "HIAT");
    }

    #[test]
    fn test_double_transposition_args() {
        let cli = parse(&[
            "cifra",
            "decrypt",
            "-c",
            "double-transposition",
            "--column-order",
            "21",
            "--row-order",
            "312",
            "DCFEBA",
        ]);
        let Commands::Decrypt(args) = cli.command else {
            panic!("expected decrypt");
        };
        assert_eq!(args.request(Action::Decrypt).execute().unwrap(), "ABCDEF");
    }

    #[test]
    fn test_request_file_executes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            r#"{"tipo": "filas", "accion": "descifrar", "texto": "WRIOREESVEADCED", "filas": 3}"#,
        )
        .unwrap();

        let request = read_request(path.to_str().unwrap()).unwrap();
        assert_eq!(request.action, Action::Decrypt);
        let config = CliConfig::default();
        assert_eq!(request.execute_with(&config.kasiski).unwrap(), "WEAREDISCOVERED");
    }

    #[test]
    fn test_request_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent.json");
        let err = read_request(missing.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("absent.json"));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(read_request(broken.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_kasiski_rendering() {
        let config = CliConfig::default();
        let text = render_kasiski("ABCDEFABC", false, &config).unwrap();
        assert!(text.starts_with("Distances (in characters): 6\n"));
        assert!(text.ends_with("  k = 20 -> 0 occurrences"));

        let json = render_kasiski("ABCDEFABC", true, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["distances"], serde_json::json!([6]));
        assert!(value.get("range").is_none());

        assert_eq!(render_kasiski("AB", true, &config).unwrap(), TOO_SHORT);
    }

    #[test]
    fn test_kasiski_rendering_uses_configured_range() {
        let mut config = CliConfig::default();
        config.kasiski.max_period = 6;
        let text = render_kasiski("ABCDEFABC", false, &config).unwrap();
        assert!(text.contains("Most likely factors (2-6):"));
        assert!(!text.contains("k = 7 "));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = parse(&["cifra", "list", "--config", "/tmp/cifra.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/cifra.yaml")));
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_cipher_is_required() {
        assert!(Cli::try_parse_from(["cifra", "encrypt", "HELLO"]).is_err());
    }
}
