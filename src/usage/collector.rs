use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::Error;

/// Lists the immediate children of a directory together with their sizes.
pub trait Collector {
    fn collect(&self, directory: &str) -> Result<String, Error>;
}

/// Runs `du -B1 -d 1 <directory>` and hands back its standard output, with
/// sizes in bytes.
pub struct DuCollector {
    pub program: String,
}

impl DuCollector {
    pub const DEFAULT_PROGRAM: &'static str = "du";

    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn build_command(&self, directory: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-B1")
            .arg("-d")
            .arg("1")
            .arg(directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        cmd
    }
}

impl Default for DuCollector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl Collector for DuCollector {
    fn collect(&self, directory: &str) -> Result<String, Error> {
        if !Path::new(directory).is_dir() {
            return Err(Error::InvalidTarget(String::from(directory)));
        }

        let mut cmd = self.build_command(directory);
        debug!("disk usage command: {:?}", cmd);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                return Err(Error::CollectionFailure(format!(
                    "unable to spawn '{}': {}",
                    self.program, err
                )))
            }
        };
        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(err) => {
                return Err(Error::CollectionFailure(format!(
                    "error while waiting for '{}': {}",
                    self.program, err
                )))
            }
        };

        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                debug!("du returned {} bytes of output", stdout.len());
                Ok(stdout)
            }
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                let message = match (code, stderr.is_empty()) {
                    (_, false) => stderr,
                    (Some(code), true) => format!("exit-code: {}", code),
                    (None, true) => String::from("terminated by signal"),
                };
                Err(Error::CollectionFailure(message))
            }
        }
    }
}
