use crate::errors::{Error, Result, require_parse};
use crate::extensions::string::StrExt;
use std::str::FromStr;

/// Index-addressed view over the words following a command's action.
#[derive(Debug, Clone, Copy)]
pub struct Positional<'a> {
    args: &'a [String],
}

impl<'a> Positional<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self { args }
    }

    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).map(String::as_str)
    }

    /// Like `get`, but blank words count as absent.
    pub fn non_blank(&self, idx: usize) -> Option<&'a str> {
        self.get(idx).and_then(|v| v.non_blank())
    }

    pub fn required(&self, idx: usize, name: &str) -> Result<&'a str> {
        require_parse(self.get(idx), format!("Missing argument <{name}>."))
    }

    /// Parse an optional word; a blank word is treated as absent.
    pub fn parsed<T: FromStr>(&self, idx: usize, name: &str) -> Result<Option<T>> {
        self.non_blank(idx)
            .map(|raw| {
                raw.trim().parse::<T>().map_err(|_| {
                    Error::parse(format!("Invalid {name}: '{}'.", raw.trim()))
                })
            })
            .transpose()
    }

    pub fn required_parsed<T: FromStr>(&self, idx: usize, name: &str) -> Result<T> {
        self.required(idx, name)?;
        require_parse(self.parsed(idx, name)?, format!("Missing argument <{name}>."))
    }
}
