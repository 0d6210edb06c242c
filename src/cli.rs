use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Time};
use tokio::io::BufReader;

use trackas_boundary::NewClass;
use trackas_core::{
    gateways::GeocodingGateway as _,
    picker::LocationPicker,
    usecases::{self, ClassScheduleForm},
};
use trackas_entities::geo::Coordinate;
use trackas_gateways::{geolocation::ConfiguredPosition, nominatim::Nominatim};

use crate::{
    config::{Config, GeocodingGateway},
    session::{self, StdoutHost, TerminalCanvas},
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

#[derive(Parser)]
#[command(author, version, about = "Pick and schedule class venues")]
pub struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the name of a position
    #[command(allow_negative_numbers = true)]
    Reverse { lat: f64, lng: f64 },
    /// Search for places by name
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Pick a location interactively
    Pick,
    /// Schedule a class and pick its venue
    Schedule(ScheduleArgs),
}

#[derive(Args)]
pub struct ScheduleArgs {
    #[arg(long)]
    course_code: String,
    #[arg(long)]
    course_title: String,
    /// Day of the class, e.g. 2026-10-20
    #[arg(long, value_parser = parse_date)]
    date: Date,
    /// Start of the class, e.g. 09:30
    #[arg(long, value_parser = parse_time)]
    time: Time,
    #[arg(long)]
    note: Option<String>,
    #[arg(long)]
    lecturer_id: Option<String>,
    /// Print the attendance link of this course
    #[arg(long)]
    course_id: Option<String>,
}

fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, DATE_FORMAT)
}

fn parse_time(s: &str) -> Result<Time, time::error::Parse> {
    Time::parse(s, TIME_FORMAT)
}

type Picker = LocationPicker<TerminalCanvas, Nominatim, ConfiguredPosition>;

fn geocoding_gateway(cfg: &Config) -> Result<Nominatim> {
    match &cfg.geocoding.gateway {
        Some(GeocodingGateway::Nominatim {
            base_url,
            user_agent,
            timeout,
        }) => Ok(Nominatim::new(base_url, user_agent, *timeout)?),
        None => Err(anyhow!("No geocoding gateway configured")),
    }
}

fn location_picker(cfg: &Config) -> Result<Picker> {
    let canvas = TerminalCanvas::new(cfg.map.center, cfg.map.zoom);
    let geolocation = ConfiguredPosition::new(cfg.geolocation.position);
    Ok(LocationPicker::new(
        canvas,
        geocoding_gateway(cfg)?,
        geolocation,
        cfg.picker_options(),
    ))
}

async fn pick_interactively<H>(picker: &Picker, host: &mut H) -> Result<bool>
where
    H: trackas_core::picker::LocationHost,
{
    eprintln!("Select a location (type 'help' for a list of commands)");
    let input = BufReader::new(tokio::io::stdin());
    let location = session::run(input, picker, host).await?;
    Ok(location.is_some())
}

pub async fn run(command: Command, cfg: Config) -> Result<()> {
    match command {
        Command::Reverse { lat, lng } => {
            let pos = Coordinate::try_from_lat_lng_deg(lat, lng)
                .ok_or_else(|| anyhow!("Invalid coordinate: {lat},{lng}"))?;
            let name = geocoding_gateway(&cfg)?.reverse(pos).await?;
            println!("{name}");
        }
        Command::Search { query } => {
            let query = query.join(" ");
            let places = geocoding_gateway(&cfg)?.search(&query).await?;
            if places.is_empty() {
                println!("No results found");
            }
            for place in places {
                println!("{}\t{}", place.pos, place.display_name);
            }
        }
        Command::Pick => {
            let picker = location_picker(&cfg)?;
            if !pick_interactively(&picker, &mut StdoutHost).await? {
                log::info!("No location selected");
            }
        }
        Command::Schedule(args) => {
            let ScheduleArgs {
                course_code,
                course_title,
                date,
                time,
                note,
                lecturer_id,
                course_id,
            } = args;
            let mut form = ClassScheduleForm {
                course_title,
                course_code,
                date: Some(date),
                time: Some(time),
                note: note.unwrap_or_default(),
                lecturer_id,
                ..Default::default()
            };
            form.open_venue_picker();
            let picker = location_picker(&cfg)?;
            if !pick_interactively(&picker, &mut form).await? {
                return Err(anyhow!("A venue is required to schedule a class"));
            }
            let schedule = usecases::schedule_class(&form)?;
            let link = course_id
                .map(|id| usecases::attendance_link(&cfg.attendance.base_url, &id, &schedule))
                .transpose()?;
            let row = NewClass::try_from(schedule)?;
            println!("{}", serde_json::to_string_pretty(&row)?);
            if let Some(link) = link {
                println!("Attendance link: {link}");
            }
        }
    }
    Ok(())
}
