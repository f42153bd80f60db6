use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::configuration::Configuration;
use crate::error::Error;
use crate::formatter::Formatter;
use crate::usage::UsageTable;

/// Makes `path` absolute against the working directory and folds `.` and
/// `..` lexically. Trailing separators disappear with the components.
/// Symlinks are left untouched.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(current_dir) => current_dir.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    pub percent: f64,
    pub bar: String,
    pub size: u64,
    pub formatted_size: String,
    pub path: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:4.0}% [{}] {:>10}  {}",
            self.percent, self.bar, self.formatted_size, self.path
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub lines: Vec<ReportLine>,
    pub total: u64,
    pub formatted_total: String,
    pub target: String,
}

impl Report {
    pub fn build(table: &UsageTable, configuration: &Configuration) -> Result<Report, Error> {
        let target_path = normalize(&configuration.target);

        let total = match table
            .iter()
            .find(|(path, _)| normalize(path) == target_path)
        {
            Some((_, size)) => size,
            None => return Err(Error::TotalUndetermined(configuration.target.clone())),
        };
        if total == 0 {
            return Err(Error::ZeroTotal(configuration.target.clone()));
        }

        let mut children: Vec<(&str, u64)> = table
            .iter()
            .filter(|(path, _)| normalize(path) != target_path)
            .collect();
        children.sort_by(|a, b| b.1.cmp(&a.1));
        debug!("{} children below {}", children.len(), target_path.display());

        let mut lines = Vec::with_capacity(children.len());
        for (path, size) in children {
            let percent = 100.0 * size as f64 / total as f64;
            lines.push(ReportLine {
                percent,
                bar: Formatter::percent_to_graph(percent, configuration.length)?,
                size,
                formatted_size: Formatter::format_size(size, configuration.human_readable),
                path: String::from(path),
            });
        }

        Ok(Report {
            lines,
            total,
            formatted_total: Formatter::format_size(total, configuration.human_readable),
            target: configuration.target.clone(),
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "Total: {}  {}", self.formatted_total, self.target)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::usage::collector::{Collector, DuCollector};

    struct CannedCollector {
        output: &'static str,
    }

    impl Collector for CannedCollector {
        fn collect(&self, _directory: &str) -> Result<String, Error> {
            Ok(String::from(self.output))
        }
    }

    fn configuration(target: &str, length: usize) -> Configuration {
        let mut configuration = Configuration::new();
        configuration.target = String::from(target);
        configuration.length = length;
        configuration
    }

    fn table(entries: &[(&str, u64)]) -> UsageTable {
        let mut table = UsageTable::new();
        for (path, size) in entries {
            table.insert(*path, *size);
        }
        table
    }

    #[test]
    fn normalize_strips_trailing_slash_and_dots() {
        assert_eq!(normalize("/x/"), PathBuf::from("/x"));
        assert_eq!(normalize("/x/./a/../b"), PathBuf::from("/x/b"));
        assert_eq!(normalize("/"), PathBuf::from("/"));
    }

    #[test]
    fn normalize_makes_relative_paths_absolute() {
        let current_dir = env::current_dir().unwrap();

        assert_eq!(normalize("."), current_dir);
        assert_eq!(normalize("./sub/"), current_dir.join("sub"));
    }

    #[test]
    fn excludes_target_and_sorts_descending() {
        let table = table(&[("/x", 100), ("/x/a", 30), ("/x/b", 70)]);
        let report = Report::build(&table, &configuration("/x", 20)).unwrap();

        let paths: Vec<&str> = report.lines.iter().map(|l| l.path.as_str()).collect();
        assert_eq!(paths, vec!["/x/b", "/x/a"]);
        assert_eq!(report.lines[0].percent, 70.0);
        assert_eq!(report.lines[1].percent, 30.0);
        assert_eq!(report.total, 100);
    }

    #[test]
    fn matches_target_with_trailing_slash() {
        let table = table(&[("/x/", 10), ("/x/a", 5)]);
        let report = Report::build(&table, &configuration("/x", 10)).unwrap();

        assert_eq!(report.total, 10);
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].bar, "=====     ");
    }

    #[test]
    fn missing_total_is_fatal() {
        let table = table(&[("/y", 10), ("/y/a", 5)]);

        assert_eq!(
            Report::build(&table, &configuration("/x", 10)),
            Err(Error::TotalUndetermined(String::from("/x")))
        );
    }

    #[test]
    fn zero_total_is_fatal() {
        let table = table(&[("/x", 0), ("/x/a", 0)]);

        assert_eq!(
            Report::build(&table, &configuration("/x", 10)),
            Err(Error::ZeroTotal(String::from("/x")))
        );
    }

    #[test]
    fn child_larger_than_total_is_rejected() {
        let table = table(&[("/x", 10), ("/x/a", 20)]);

        assert_eq!(
            Report::build(&table, &configuration("/x", 10)),
            Err(Error::InvalidPercent(200.0))
        );
    }

    #[test]
    fn zero_length_bars_are_empty() {
        let table = table(&[("/x", 10), ("/x/a", 10)]);
        let report = Report::build(&table, &configuration("/x", 0)).unwrap();

        assert_eq!(report.lines[0].bar, "");
        assert_eq!(report.to_string(), " 100% []       10 B  /x/a\nTotal: 10 B  /x");
    }

    #[test]
    fn renders_canned_du_output() {
        let collector = CannedCollector {
            output: "300\t/root\n100\t/root/a\n200\t/root/b\n",
        };
        let table = UsageTable::parse(&collector.collect("/root").unwrap());
        let report = Report::build(&table, &configuration("/root", 10)).unwrap();

        assert_eq!(report.lines[0].path, "/root/b");
        assert_eq!(report.lines[0].size, 200);
        assert_eq!(report.lines[1].path, "/root/a");
        assert_eq!(report.lines[1].size, 100);
        assert_eq!(report.total, 300);
        assert_eq!(
            report.to_string(),
            "  67% [=======   ]      200 B  /root/b\n\
             \x20 33% [===       ]      100 B  /root/a\n\
             Total: 300 B  /root"
        );
    }

    #[test]
    fn human_readable_report() {
        let table = table(&[("/data", 3 * 1024 * 1024), ("/data/big", 2 * 1024 * 1024)]);
        let mut configuration = configuration("/data/", 4);
        configuration.human_readable = true;
        let report = Report::build(&table, &configuration).unwrap();

        assert_eq!(report.lines[0].formatted_size, "2.0 M");
        assert_eq!(report.formatted_total, "3.0 M");
        assert_eq!(report.to_string().lines().last(), Some("Total: 3.0 M  /data/"));
    }

    #[test]
    fn reports_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("small")).unwrap();
        fs::create_dir(dir.path().join("large")).unwrap();
        fs::write(dir.path().join("small").join("a"), vec![1u8; 4096]).unwrap();
        fs::write(dir.path().join("large").join("b"), vec![1u8; 1024 * 1024]).unwrap();
        let root = format!("{}/", dir.path().display());

        let output = DuCollector::default().collect(&root).unwrap();
        let report = Report::build(&UsageTable::parse(&output), &configuration(&root, 20)).unwrap();

        assert_eq!(report.lines.len(), 2);
        assert!(report.lines[0].path.ends_with("large"));
        assert!(report.lines[0].size >= report.lines[1].size);
        assert_eq!(report.target, root);
    }
}
