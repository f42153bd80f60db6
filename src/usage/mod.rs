use std::collections::HashMap;

use log::debug;

pub mod collector;

/// Sizes reported by the disk-usage utility, keyed by the literal path it printed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageTable {
    entries: HashMap<String, u64>,
    skipped: usize,
}

impl UsageTable {
    pub fn new() -> UsageTable {
        UsageTable {
            entries: HashMap::new(),
            skipped: 0,
        }
    }

    /// Parses lines of the form `<size><whitespace><path>`.
    ///
    /// Lines without a leading integer are skipped. Only the second token is
    /// used as the path, so paths containing whitespace are truncated. A later
    /// line for the same path overwrites an earlier one.
    pub fn parse(output: &str) -> UsageTable {
        let mut table = UsageTable::new();

        for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let mut parts = line.split_whitespace();
            let (size, path) = match (parts.next(), parts.next()) {
                (Some(size), Some(path)) => (size, path),
                _ => {
                    table.skipped += 1;
                    continue;
                }
            };

            match size.parse::<u64>() {
                Ok(size) => table.insert(path, size),
                Err(_) => {
                    debug!("skipping unparsable du line: {}", line);
                    table.skipped += 1;
                }
            }
        }

        table
    }

    pub fn insert<S: Into<String>>(&mut self, path: S, size: u64) {
        self.entries.insert(path.into(), size);
    }

    #[cfg(test)]
    pub fn get(&self, path: &str) -> Option<u64> {
        self.entries.get(path).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(path, size)| (path.as_str(), *size))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lines that could not be parsed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
