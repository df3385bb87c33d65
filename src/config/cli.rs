use crate::config::toml_config::{CalcConfig, ProviderConfig};
use crate::domain::model::Operation;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "string-calc")]
#[command(about = "Add or subtract the numbers in a delimited string")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the exclusive upper bound (default 1000)
    #[arg(long)]
    pub upper_bound: Option<i64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sum the numbers in the input
    Add(InputArgs),
    /// Subtract the remaining numbers from the first one
    Subtract(InputArgs),
    /// Sum numbers supplied by the configured provider
    Fetch(FetchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Input string; read from stdin when omitted or "-"
    pub input: Option<String>,

    /// Interpret `\n` and `\\` in the input as newline and backslash
    #[arg(short, long)]
    pub escapes: bool,
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Fetch from this URL instead of the configured provider
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub separator: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}

impl Command {
    /// The operation and input of `add`/`subtract`; `None` for `fetch`.
    pub fn calculation(&self) -> Option<(Operation, &InputArgs)> {
        match self {
            Command::Add(args) => Some((Operation::Add, args)),
            Command::Subtract(args) => Some((Operation::Subtract, args)),
            Command::Fetch(_) => None,
        }
    }
}

impl CliConfig {
    /// Loads the config file, if any, and applies command line overrides.
    pub fn load_config(&self) -> Result<CalcConfig> {
        let mut config = match &self.config {
            Some(path) => CalcConfig::from_file(path)?,
            None => CalcConfig::default(),
        };

        if let Some(bound) = self.upper_bound {
            config.calculator.upper_bound = Some(bound);
        }
        if let Command::Fetch(args) = &self.command {
            args.apply(&mut config);
        }

        Ok(config)
    }
}

impl InputArgs {
    pub fn read(&self) -> Result<String> {
        let raw = match self.input.as_deref() {
            Some(input) if input != "-" => input.to_string(),
            _ => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        Ok(if self.escapes { unescape(&raw) } else { raw })
    }
}

impl FetchArgs {
    fn apply(&self, config: &mut CalcConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.provider = Some(ProviderConfig::web(endpoint.clone()));
        }
        if let Some(provider) = config.provider.as_mut() {
            if self.separator.is_some() {
                provider.separator = self.separator.clone();
            }
            if self.timeout_seconds.is_some() {
                provider.timeout_seconds = self.timeout_seconds;
            }
        }
    }
}

/// `\n` → newline, `\\` → backslash; other sequences are kept.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::ProviderType;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("//;\\n1;2"), "//;\n1;2");
        assert_eq!(unescape("a\\\\n"), "a\\n");
        assert_eq!(unescape("\\t\\"), "\\t\\");
        assert_eq!(unescape("1,2"), "1,2");
    }

    #[test]
    fn test_parse_add_command() {
        let cli = CliConfig::try_parse_from(["string-calc", "add", "1,2", "--escapes"]).unwrap();
        match &cli.command {
            Command::Add(args) => {
                assert_eq!(args.input.as_deref(), Some("1,2"));
                assert!(args.escapes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(matches!(cli.command.calculation(), Some((Operation::Add, _))));
    }

    #[test]
    fn test_input_escapes_applied() {
        let args = InputArgs {
            input: Some("//[**]\\n1**2".to_string()),
            escapes: true,
        };
        assert_eq!(args.read().unwrap(), "//[**]\n1**2");
    }

    #[test]
    fn test_fetch_overrides_provider() {
        let cli = CliConfig::try_parse_from([
            "string-calc",
            "--upper-bound",
            "50",
            "fetch",
            "--endpoint",
            "https://numbers.example.com",
            "--separator",
            ",",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.settings().upper_bound, 50);
        let provider = config.provider.unwrap();
        assert_eq!(provider.r#type, ProviderType::Web);
        assert_eq!(provider.endpoint.as_deref(), Some("https://numbers.example.com"));
        assert_eq!(provider.separator.as_deref(), Some(","));
    }
}
