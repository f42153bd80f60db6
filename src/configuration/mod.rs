use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind},
    path::Path,
};

use log::debug;
use regex::Regex;

use crate::error::Error;
use crate::usage::collector::DuCollector;

#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub target: String,
    pub length: usize,
    pub human_readable: bool,
    pub du_program: String,
}

impl Configuration {
    pub const DEFAULT_LENGTH: usize = 20;
    pub const DEFAULT_TARGET: &'static str = ".";
    pub const FILE_NAME: &'static str = "duim.conf";

    pub fn new() -> Configuration {
        Configuration {
            target: String::from(Self::DEFAULT_TARGET),
            length: Self::DEFAULT_LENGTH,
            human_readable: false,
            du_program: String::from(DuCollector::DEFAULT_PROGRAM),
        }
    }

    /// Replaces a leading `~` with the home directory of the current user.
    pub fn expand_home(filename: &str) -> String {
        let rest = match filename.strip_prefix('~') {
            Some(rest) => rest,
            None => return String::from(filename),
        };
        match dirs::home_dir() {
            Some(home_dir) => match home_dir.to_str() {
                Some(home) => format!("{}{}", home, rest),
                None => String::from(filename),
            },
            None => String::from(filename),
        }
    }

    /// Picks the config file to read: the explicit one if given, otherwise
    /// the first of `./duim.conf`, `~/.duim.conf` and `/etc/duim.conf`.
    pub fn find_file(explicit: Option<&str>) -> Result<Option<String>, Error> {
        if let Some(file) = explicit {
            let normalized_file = Self::expand_home(file);
            if !Path::new(&normalized_file).exists() {
                return Err(Error::Configuration(format!(
                    "config file '{}' doesn't exist.",
                    file
                )));
            }
            return Ok(Some(normalized_file));
        }

        let candidates = [
            String::from(Self::FILE_NAME),
            Self::expand_home(&format!("~/.{}", Self::FILE_NAME)),
            format!("/etc/{}", Self::FILE_NAME),
        ];
        Ok(candidates
            .into_iter()
            .find(|candidate| Path::new(candidate).exists()))
    }

    pub fn load_file(&mut self, filename: &str) -> Result<(), Error> {
        debug!("read settings from {}", filename);
        let file = match File::open(filename) {
            Ok(file) => file,
            Err(why) => match why.kind() {
                ErrorKind::NotFound => {
                    return Err(Error::Configuration(format!(
                        "config file '{}' does not exist.",
                        filename
                    )))
                }
                _ => {
                    return Err(Error::Configuration(format!(
                        "unable to open config file '{}'",
                        filename
                    )))
                }
            },
        };

        for line in BufReader::new(file).lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => continue,
            };
            self.apply_line(&line)?;
        }

        Ok(())
    }

    /// Applies a single `key = value` line. Blank lines, comments and
    /// unknown keys are ignored.
    pub fn apply_line(&mut self, line: &str) -> Result<(), Error> {
        lazy_static! {
            static ref REGEX_SETTING: Regex =
                Regex::new(r"^\s*([A-Za-z_-]+)\s*=\s*(.*?)\s*$").unwrap();
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }
        let captures = match REGEX_SETTING.captures(trimmed) {
            Some(captures) => captures,
            None => {
                debug!("ignoring config line: {}", line);
                return Ok(());
            }
        };
        let value = &captures[2];

        match captures[1].replace('-', "_").as_str() {
            "length" => match value.parse::<usize>() {
                Ok(length) => self.length = length,
                Err(_) => {
                    return Err(Error::Configuration(format!(
                        "invalid length value '{}'.",
                        value
                    )))
                }
            },
            "human_readable" => match Self::parse_bool(value) {
                Some(human_readable) => self.human_readable = human_readable,
                None => {
                    return Err(Error::Configuration(format!(
                        "invalid human_readable value '{}'.",
                        value
                    )))
                }
            },
            "du_program" => {
                if value.is_empty() {
                    return Err(Error::Configuration(String::from(
                        "du_program must not be empty.",
                    )));
                }
                self.du_program = Self::expand_home(value);
            }
            key => debug!("unknown config key: {}", key),
        }

        Ok(())
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" | "enabled" => Some(true),
            "0" | "false" | "no" | "off" | "disabled" => Some(false),
            _ => None,
        }
    }
}
