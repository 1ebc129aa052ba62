use clap::Parser;
use log::kv::{ToValue, Value};

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,
}

impl ToValue for CliArgs {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = CliArgs::parse_from(["self", "--config", "conf/tracebench.toml"]);
        assert_eq!(
            args,
            CliArgs {
                config: Some("conf/tracebench.toml".to_string())
            }
        );
    }

    #[test]
    fn test_args_default_config() {
        let args = CliArgs::parse_from(["self"]);
        assert_eq!(args, CliArgs { config: None });
    }
}
