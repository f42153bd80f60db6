#[macro_use]
extern crate clap;
#[macro_use]
extern crate lazy_static;

use std::path::Path;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{debug, error, LevelFilter};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    filter::threshold::ThresholdFilter,
};

mod configuration;
mod error;
mod formatter;
mod report;
mod usage;

use configuration::Configuration;
use error::Error;
use report::Report;
use usage::collector::{Collector, DuCollector};
use usage::UsageTable;

fn init_logging(level: LevelFilter) -> Result<(), String> {
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("stderr", Box::new(stderr)),
        )
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|err| format!("{}", err))?;
    log4rs::init_config(config).map_err(|err| format!("{}", err))?;

    Ok(())
}

fn build_command() -> Command {
    Command::new("duim")
        .version(crate_version!())
        .author(crate_authors!())
        .about("DU Improved -- See Disk Usage Report with bar charts")
        .after_help("Copyright 2025")
        .arg(
            Arg::new("length")
                .short('l')
                .long("length")
                .value_name("LENGTH")
                .value_parser(value_parser!(usize))
                .help("Specify the length of the graph. Default is 20."),
        )
        .arg(
            Arg::new("human-readable")
                .short('H')
                .long("human-readable")
                .action(ArgAction::SetTrue)
                .help("print sizes in human readable format (e.g. 1K 23M 2G)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Specify a config file from where to read settings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("print debug output to stderr"),
        )
        .arg(
            Arg::new("target")
                .value_name("TARGET")
                .help("The directory to scan."),
        )
}

/// Defaults, then the config file, then the command line.
fn get_configuration(matches: &ArgMatches) -> Result<Configuration, Error> {
    let mut configuration = Configuration::new();

    let config_file =
        Configuration::find_file(matches.get_one::<String>("config").map(String::as_str))?;
    if let Some(file) = config_file {
        configuration.load_file(&file)?;
    }

    if let Some(length) = matches.get_one::<usize>("length") {
        configuration.length = *length;
    }
    if matches.get_flag("human-readable") {
        configuration.human_readable = true;
    }
    if let Some(target) = matches.get_one::<String>("target") {
        configuration.target = target.clone();
    }

    Ok(configuration)
}

fn run(configuration: &Configuration, collector: &dyn Collector) -> Result<Report, Error> {
    if !Path::new(&configuration.target).is_dir() {
        return Err(Error::InvalidTarget(configuration.target.clone()));
    }

    let output = collector.collect(&configuration.target)?;
    let table = UsageTable::parse(&output);
    if table.is_empty() {
        debug!("du output contained no parsable lines");
    }
    debug!(
        "parsed {} du entries, skipped {} lines",
        table.len(),
        table.skipped()
    );

    Report::build(&table, configuration)
}

fn main() {
    let matches = build_command().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(why) = init_logging(level) {
        eprintln!("unable to initialize logging: {}", why);
    }

    let configuration = match get_configuration(&matches) {
        Ok(configuration) => configuration,
        Err(why) => {
            error!("Error: {}", why);
            process::exit(1);
        }
    };
    debug!("{:?}", configuration);

    let collector = DuCollector::new(configuration.du_program.as_str());
    match run(&configuration, &collector) {
        Ok(report) => println!("{}", report),
        Err(why) => {
            error!("Error: {}", why);
            process::exit(1);
        }
    }
}
