//! Location picker sessions in the terminal.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use trackas_core::{
    gateways::{GeocodingGateway, GeolocationGateway},
    notice::{Notice, NoticeLevel},
    picker::{LocationHost, LocationPicker, MapCanvas, Selection, Trigger},
};
use trackas_entities::{geo::Coordinate, location::SelectedLocation};

const HELP: &str = "\
Commands:
  click <lat> <lng>   select a position on the map
  search <text>       select the first place matching <text>
  here                select the current location of this device
  status              show the current selection
  confirm             use the selected location
  cancel              quit without a location";

/// A map that is "rendered" as log output.
#[derive(Debug)]
pub struct TerminalCanvas {
    center: Coordinate,
    zoom: f64,
    next_marker: u32,
}

impl TerminalCanvas {
    pub const fn new(center: Coordinate, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            next_marker: 0,
        }
    }

    pub const fn center(&self) -> Coordinate {
        self.center
    }
}

impl MapCanvas for TerminalCanvas {
    type Marker = u32;

    fn add_marker(&mut self, pos: Coordinate, label: &str) -> Self::Marker {
        self.next_marker += 1;
        log::debug!("Add marker #{} at {pos}: {label}", self.next_marker);
        self.next_marker
    }

    fn remove_marker(&mut self, marker: Self::Marker) {
        log::debug!("Remove marker #{marker}");
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        log::debug!("Move map to {center} (zoom {zoom})");
        self.center = center;
        self.zoom = zoom;
    }
}

/// Prints the location that has been handed over.
#[derive(Debug, Default)]
pub struct StdoutHost;

impl LocationHost for StdoutHost {
    fn on_select_location(&mut self, name: &str, pos: Coordinate) {
        println!("Venue: {name}");
        println!("Location: {}", pos.to_ewkt());
    }

    fn on_close(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Click(Coordinate),
    Search(String),
    Here,
    Status,
    Confirm,
    Cancel,
    Help,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (cmd, args) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let args = args.trim();
        let cmd = match cmd {
            "click" => {
                let (lat, lng) = args
                    .split_once(|c: char| c.is_whitespace() || c == ',')
                    .ok_or_else(|| anyhow!("Usage: click <lat> <lng>"))?;
                Self::Click(Coordinate::parse_lat_lng_deg(lat, lng)?)
            }
            "search" => Self::Search(args.to_string()),
            "here" => Self::Here,
            "status" => Self::Status,
            "confirm" => Self::Confirm,
            "cancel" | "quit" => Self::Cancel,
            "help" | "?" => Self::Help,
            _ => return Err(anyhow!("Unknown command '{cmd}'")),
        };
        Ok(cmd)
    }
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("{notice}"),
        NoticeLevel::Warning | NoticeLevel::Error => eprintln!("{notice}"),
    }
}

fn print_selection(trigger: Trigger, selection: &Selection) {
    let location = &selection.location;
    println!("Selected: {} ({})", location.display_name, location.pos);
    if let Some(notice) = Notice::for_selection(trigger, selection) {
        print_notice(&notice);
    }
}

fn print_failure(err: &trackas_core::picker::Error) {
    if let Some(notice) = Notice::failed(err) {
        print_notice(&notice);
    }
}

/// Run a picker session reading commands line by line from `input`.
///
/// Returns the confirmed location or `None` if the session has been
/// cancelled. The end of `input` cancels the session.
pub async fn run<R, G, L, H>(
    input: R,
    picker: &LocationPicker<TerminalCanvas, G, L>,
    host: &mut H,
) -> Result<Option<SelectedLocation>>
where
    R: AsyncBufRead + Unpin,
    G: GeocodingGateway,
    L: GeolocationGateway,
    H: LocationHost,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        match cmd {
            Command::Click(pos) => match picker.select_by_map_click(pos).await {
                Ok(selection) => print_selection(Trigger::MapClick, &selection),
                Err(err) => print_failure(&err),
            },
            Command::Search(query) => match picker.search_by_text(&query).await {
                Ok(Some(selection)) => print_selection(Trigger::Search, &selection),
                Ok(None) => {}
                Err(err) => print_failure(&err),
            },
            Command::Here => match picker.select_by_current_location().await {
                Ok(selection) => print_selection(Trigger::CurrentLocation, &selection),
                Err(err) => print_failure(&err),
            },
            Command::Status => match picker.selection() {
                Some(location) => println!("{} ({})", location.display_name, location.pos),
                None => {
                    let center = picker.with_canvas(TerminalCanvas::center);
                    println!("Nothing selected, map centered at {center}");
                }
            },
            Command::Confirm => match picker.confirm(host) {
                Ok(location) => return Ok(Some(location)),
                Err(err) => print_failure(&err),
            },
            Command::Cancel => {
                picker.cancel(host)?;
                return Ok(None);
            }
            Command::Help => println!("{HELP}"),
        }
    }
    log::debug!("End of input");
    if picker.is_open() {
        picker.cancel(host)?;
    }
    Ok(None)
}
