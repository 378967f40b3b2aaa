use flood_tracker::client::AlertsClient;
use flood_tracker::filter::{self, Query, ANY_STATE};
use flood_tracker::geojson::FeatureCollection;
use flood_tracker::map::{MapDocument, MapOptions};
use flood_tracker::output::Output;
use flood_tracker::{config, filter_features};
use log::{error, warn};
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "flood_tracker",
    about = "Fetch, filter and map active NWS flash flood warnings"
)]
enum Opt {
    /// Write the filtered warnings as GeoJSON or summary lines
    Alerts {
        #[structopt(flatten)]
        common: Common,
        /// One summary line per warning instead of GeoJSON
        #[structopt(long)]
        summaries: bool,
    },
    /// Write a map document with rainfall overlays for a renderer
    Map {
        #[structopt(flatten)]
        common: Common,
        /// Leave out the 1-hour rainfall layer
        #[structopt(long = "no-p1h")]
        no_p1h: bool,
        /// Leave out the 24-hour rainfall layer
        #[structopt(long = "no-p24h")]
        no_p24h: bool,
        /// Rainfall layer opacity
        #[structopt(long, default_value = "0.55")]
        opacity: f64,
    },
}

#[derive(StructOpt)]
struct Common {
    /// County name to match, e.g. 'Travis'
    #[structopt(short, long, default_value = "")]
    county: String,
    /// State/territory abbreviation, e.g. 'TX'
    #[structopt(short, long, default_value = "(Any)")]
    state: String,
    /// Read a GeoJSON file instead of querying the NWS API
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Output file (stdout when omitted)
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

impl Common {
    fn query(&self) -> Query {
        if self.state != ANY_STATE && !filter::is_known_state(&self.state) {
            warn!("unknown state/territory {:?}", self.state);
        }
        filter::parse(&self.county, &self.state)
    }

    fn collection(&self) -> Result<FeatureCollection, Box<dyn Error>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)?;
                let collection = serde_json::from_reader(file)?;
                Ok(collection)
            }
            None => {
                let user_agent = config::user_agent();
                let mut client = AlertsClient::new(&user_agent)?;
                client.active_warnings()
            }
        }
    }

    fn writer(&self) -> Result<Box<dyn Write>, Box<dyn Error>> {
        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout()),
        };
        Ok(writer)
    }
}

fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    match opt {
        Opt::Alerts { common, summaries } => {
            let collection = common.collection()?;
            let filtered = filter_features(&collection, &common.query());
            let mut writer = common.writer()?;
            if summaries {
                filtered.write_json_lines(&mut writer)
            } else {
                filtered.write_geojson(&mut writer)
            }
        }
        Opt::Map {
            common,
            no_p1h,
            no_p24h,
            opacity,
        } => {
            if !(0.0..=1.0).contains(&opacity) {
                return Err("opacity must be between 0.0 and 1.0".into());
            }
            let collection = common.collection()?;
            let filtered = filter_features(&collection, &common.query());
            let options = MapOptions {
                show_p1h: !no_p1h,
                show_p24h: !no_p24h,
                opacity,
            };
            let document = MapDocument::compose(&collection, &filtered, &options);
            let mut writer = common.writer()?;
            let json = serde_json::to_string(&document)?;
            writeln!(writer, "{}", json)?;
            Ok(())
        }
    }
}

fn main() {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    if let Err(err) = run(opt) {
        error!("{}", err);
        exit(1);
    }
}
