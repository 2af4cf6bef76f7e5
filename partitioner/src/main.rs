use chrono::NaiveDate;
use clap::{Arg, ArgMatches, Command};
use common::config::Settings;
use partitioner::services::RegistrationRequest;
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "All arguments needed: partitioner <database> <table> \
                     <start date (YYYY-MM-DD format)> <num of days>";

fn cli() -> Command {
    Command::new("partitioner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Registers day/hour/minute partitions for a Glue catalog table")
        .arg(Arg::new("database").required(true).help("Catalog database name"))
        .arg(Arg::new("table").required(true).help("Table to add partitions to"))
        .arg(
            Arg::new("start_date")
                .required(true)
                .value_name("START_DATE")
                .value_parser(parse_start_date)
                .help("First day to register, YYYY-MM-DD"),
        )
        .arg(
            Arg::new("num_days")
                .required(true)
                .value_name("NUM_DAYS")
                .value_parser(clap::value_parser!(u32))
                .help("Number of days to register, starting at START_DATE"),
        )
        .arg(
            Arg::new("rest")
                .num_args(0..)
                .trailing_var_arg(true)
                .hide(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file"),
        )
        .arg(
            Arg::new("batch_size")
                .long("batch-size")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Partitions per BatchCreatePartition call (1-100)"),
        )
        .arg(
            Arg::new("region")
                .long("region")
                .value_name("REGION")
                .help("AWS region of the catalog"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .value_name("URL")
                .help("Overrides the catalog endpoint URL"),
        )
}

fn parse_start_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", value, e))
}

fn registration_request(matches: &ArgMatches) -> Option<RegistrationRequest> {
    Some(RegistrationRequest {
        database: matches.get_one::<String>("database")?.clone(),
        table: matches.get_one::<String>("table")?.clone(),
        start_date: *matches.get_one::<NaiveDate>("start_date")?,
        num_days: *matches.get_one::<u32>("num_days")?,
    })
}

fn apply_overrides(settings: &mut Settings, matches: &ArgMatches) {
    if let Some(batch_size) = matches.get_one::<usize>("batch_size") {
        settings.registration.batch_size = *batch_size;
    }
    if let Some(region) = matches.get_one::<String>("region") {
        settings.catalog.region = Some(region.clone());
    }
    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        settings.catalog.endpoint = Some(endpoint.clone());
    }
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stdout)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            println!("{}", e);
            println!("{}", USAGE);
            process::exit(1);
        }
    };

    let Some(request) = registration_request(&matches) else {
        println!("{}", USAGE);
        process::exit(1);
    };

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let mut settings = match Settings::new(config_path) {
        Ok(settings) => settings,
        Err(e) => {
            println!("{}", e);
            process::exit(-1);
        }
    };
    apply_overrides(&mut settings, &matches);

    init_logging(&settings.logging.level);
    settings.log_loaded();

    if let Err(e) = partitioner::run_partition_registration(&settings, &request).await {
        println!("{}", e);
        process::exit(-1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_positional_arguments() {
        let matches = cli()
            .try_get_matches_from(["partitioner", "analytics", "events", "2023-01-01", "2"])
            .unwrap();
        let request = registration_request(&matches).unwrap();

        assert_eq!(request.database, "analytics");
        assert_eq!(request.table, "events");
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(request.num_days, 2);
    }

    #[test]
    fn test_missing_arguments_rejected() {
        let result =
            cli().try_get_matches_from(["partitioner", "analytics", "events", "2023-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_trailing_arguments_ignored() {
        let matches = cli()
            .try_get_matches_from([
                "partitioner",
                "--batch-size",
                "50",
                "analytics",
                "events",
                "2023-01-01",
                "1",
                "extra",
                "more",
            ])
            .unwrap();
        let request = registration_request(&matches).unwrap();

        assert_eq!(request.table, "events");
        assert_eq!(request.num_days, 1);
        assert_eq!(matches.get_one::<usize>("batch_size"), Some(&50));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result =
            cli().try_get_matches_from(["partitioner", "analytics", "events", "2023-13-01", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_days_rejected() {
        let result =
            cli().try_get_matches_from(["partitioner", "analytics", "events", "2023-01-01", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_replace_settings() {
        let matches = cli()
            .try_get_matches_from([
                "partitioner",
                "analytics",
                "events",
                "2023-01-01",
                "1",
                "--batch-size",
                "50",
                "--region",
                "eu-west-1",
                "--endpoint",
                "http://localhost:4566",
            ])
            .unwrap();

        let mut settings = Settings::default();
        apply_overrides(&mut settings, &matches);

        assert_eq!(settings.registration.batch_size, 50);
        assert_eq!(settings.catalog.region.as_deref(), Some("eu-west-1"));
        assert_eq!(settings.catalog.endpoint.as_deref(), Some("http://localhost:4566"));
    }
}
