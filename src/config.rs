use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "Usage: thunderbird <file> [--ast] [--symbols] [--quiet]";

/// Command line options of the `thunderbird` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub file: PathBuf,
    /// Print the analyzed tree
    pub dump_ast: bool,
    /// Print every scope's symbol table
    pub dump_symbols: bool,
    /// Only set the exit status, print nothing
    pub quiet: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no input file given\n{}", USAGE)]
    MissingFile,
    #[error("unexpected argument {argument:?}\n{}", USAGE)]
    UnexpectedArgument { argument: String },
    #[error("unknown flag {flag:?}\n{}", USAGE)]
    UnknownFlag { flag: String },
}

impl Config {
    /// Builds the configuration from the arguments after the program name.
    pub fn from_args<I, S>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut file = None;
        let mut dump_ast = false;
        let mut dump_symbols = false;
        let mut quiet = false;

        for argument in args {
            let argument: String = argument.into();
            match argument.as_str() {
                "--ast" => dump_ast = true,
                "--symbols" => dump_symbols = true,
                "--quiet" | "-q" => quiet = true,
                flag if flag.starts_with('-') => {
                    return Err(ConfigError::UnknownFlag {
                        flag: flag.to_string(),
                    })
                }
                _ if file.is_some() => return Err(ConfigError::UnexpectedArgument { argument }),
                _ => file = Some(PathBuf::from(argument)),
            }
        }

        Ok(Config {
            file: file.ok_or(ConfigError::MissingFile)?,
            dump_ast,
            dump_symbols,
            quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use std::path::PathBuf;

    #[test]
    fn test_file_only() {
        let config = Config::from_args(["main.tb"]).unwrap();

        assert_eq!(config.file, PathBuf::from("main.tb"));
        assert!(!config.dump_ast);
        assert!(!config.dump_symbols);
        assert!(!config.quiet);
    }

    #[test]
    fn test_flags_in_any_position() {
        let config = Config::from_args(["--symbols", "main.tb", "--ast", "-q"]).unwrap();

        assert!(config.dump_ast);
        assert!(config.dump_symbols);
        assert!(config.quiet);
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(
            Config::from_args(Vec::<String>::new()),
            Err(ConfigError::MissingFile)
        );
    }

    #[test]
    fn test_unknown_flag() {
        assert_eq!(
            Config::from_args(["main.tb", "--verbose"]),
            Err(ConfigError::UnknownFlag {
                flag: String::from("--verbose")
            })
        );
    }

    #[test]
    fn test_second_file_rejected() {
        assert!(matches!(
            Config::from_args(["a.tb", "b.tb"]),
            Err(ConfigError::UnexpectedArgument { .. })
        ));
    }
}
