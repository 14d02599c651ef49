use std::error::Error;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches};

use branch_locator::app::coordinates::Coordinates;
use branch_locator::app::finder::{nearest_branches, TOP_NUMBER_OF_BRANCHES};
use branch_locator::directory::load_branches;

const BRANCHES_FILE_ENV: &str = "BRANCHES_FILE";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = command().get_matches();

    let location = Coordinates::new(
        *matches.get_one::<f64>("latitude").ok_or("Missing latitude")?,
        *matches.get_one::<f64>("longitude").ok_or("Missing longitude")?,
    );
    let limit = matches
        .get_one::<u16>("limit")
        .map(|limit| *limit as usize)
        .unwrap_or(TOP_NUMBER_OF_BRANCHES);
    let branches = load_branches(&branches_file(&matches)?)?;
    log::info!("Ranking {} branches from {location:?}", branches.len());

    let Some(nearest) = nearest_branches(&location, &branches, limit) else {
        println!("No branch with a geolocation found");
        return Ok(());
    };

    if matches.get_flag("json") {
        let selected: Vec<_> = nearest.iter().map(|n| n.branch).collect();
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        for branch_distance in nearest.iter() {
            println!(
                "{:.2} km\t{}\t{}",
                branch_distance.distance,
                branch_distance.branch.identification,
                branch_distance.branch.display_name()
            );
        }
    }
    Ok(())
}

fn branches_file(m: &ArgMatches) -> Result<PathBuf, Box<dyn Error>> {
    m.get_one::<PathBuf>("branches")
        .cloned()
        .or_else(|| std::env::var(BRANCHES_FILE_ENV).ok().map(PathBuf::from))
        .ok_or_else(|| {
            format!("Please specify --branches or a {BRANCHES_FILE_ENV} env variable").into()
        })
}

fn command() -> clap::Command {
    clap::Command::new("nearest_branches")
        .version("0.1.0")
        .about("List the branches closest to a location")
        .arg(
            Arg::new("latitude")
                .short('a')
                .long("latitude")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Device latitude in decimal degrees"),
        )
        .arg(
            Arg::new("longitude")
                .short('o')
                .long("longitude")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Device longitude in decimal degrees"),
        )
        .arg(
            Arg::new("branches")
                .short('b')
                .long("branches")
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("Path to the branch directory json file"),
        )
        .arg(
            Arg::new("limit")
                .short('n')
                .long("limit")
                .value_parser(value_parser!(u16).range(1..))
                .default_value(TOP_NUMBER_OF_BRANCHES.to_string())
                .help("Number of branches to list"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the selected branches as json"),
        )
}
