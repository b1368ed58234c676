use crate::config::DEFAULT_CONFIG_FILE;
use crate::errors::{Error, Result};
use std::path::PathBuf;

pub const USAGE: &str = "Usage: daybook [--config <file>] [--data <dir>] [--logs <dir>] <command> [args...]";

/// Global path flags plus the command words that follow them. Flags are only
/// recognized before the first command word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliPaths {
    pub config_path: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub logs_dir: Option<PathBuf>,
    pub command: Vec<String>,
}

impl CliPaths {
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut paths = Self::defaults();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    paths.config_path = Self::next_path(&mut args, "--config")?;
                }
                "--data" => {
                    paths.data_dir = Some(Self::next_path(&mut args, "--data")?);
                }
                "--logs" => {
                    paths.logs_dir = Some(Self::next_path(&mut args, "--logs")?);
                }
                flag if flag.starts_with("--") && flag != "--help" => {
                    return Err(Error::parse(format!("Unknown argument: {arg}\n{USAGE}")));
                }
                _ => {
                    paths.command.push(arg);
                    paths.command.extend(args.by_ref());
                    break;
                }
            }
        }
        Ok(paths)
    }

    fn next_path<I>(args: &mut I, flag: &str) -> Result<PathBuf>
    where
        I: Iterator<Item = String>,
    {
        args.next()
            .map(PathBuf::from)
            .ok_or_else(|| Error::parse(format!("Missing value for {flag}\n{USAGE}")))
    }

    fn defaults() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            data_dir: None,
            logs_dir: None,
            command: Vec::new(),
        }
    }
}
