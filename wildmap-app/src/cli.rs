use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;
use wildmap::LatLng;

pub const USAGE: &str = "\
Usage: wildmap-app [OPTIONS]

Options:
  --config FILE       JSON map configuration
  --data FILE|URL     animal records (default: the config's data_source)
  --focus ID          animal to focus once the records are loaded
  --location LAT,LNG  position reported by \"Locate me\"
  --url PAGE_URL      take the focus id from PAGE_URL's ?focus= parameter
  -h, --help          print this help";

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub data: Option<String>,
    pub focus: Option<String>,
    pub location: Option<LatLng>,
    pub page_url: Option<String>,
    pub help: bool,
}

impl Args {
    /// `args` includes the program name at index 0
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Args::default();
        let mut iter = args.iter().skip(1);

        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow!("{flag} needs a value"))
            };
            match flag.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(value()?)),
                "--data" => parsed.data = Some(value()?),
                "--focus" => parsed.focus = Some(value()?),
                "--location" => parsed.location = Some(parse_lat_lng(&value()?)?),
                "--url" => parsed.page_url = Some(value()?),
                "-h" | "--help" => parsed.help = true,
                other => bail!("unknown argument {other:?}\n\n{USAGE}"),
            }
        }

        Ok(parsed)
    }

    /// `--focus` wins over the page URL's query parameter
    pub fn initial_focus(&self) -> Option<String> {
        self.focus
            .clone()
            .or_else(|| self.page_url.as_deref().and_then(wildmap::focus_from_url))
    }
}

fn parse_lat_lng(text: &str) -> Result<LatLng> {
    let (lat, lng) = text
        .split_once(',')
        .ok_or_else(|| anyhow!("expected LAT,LNG, got {text:?}"))?;
    let position = LatLng::new(
        lat.trim().parse().context("latitude")?,
        lng.trim().parse().context("longitude")?,
    );
    if !position.is_valid() {
        bail!("location {text:?} is out of range");
    }
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("wildmap-app")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_all_flags() {
        let parsed = Args::parse(&args(&[
            "--config",
            "map.json",
            "--data",
            "https://zoo.example/animals.json",
            "--location",
            "51.5, -0.12",
        ]))
        .unwrap();

        assert_eq!(parsed.config, Some(PathBuf::from("map.json")));
        assert_eq!(parsed.data.as_deref(), Some("https://zoo.example/animals.json"));
        assert_eq!(parsed.location, Some(LatLng::new(51.5, -0.12)));
    }

    #[test]
    fn focus_flag_beats_page_url() {
        let parsed = Args::parse(&args(&["--url", "https://zoo.example/map?focus=owl"])).unwrap();
        assert_eq!(parsed.initial_focus().as_deref(), Some("owl"));

        let parsed = Args::parse(&args(&[
            "--url",
            "https://zoo.example/map?focus=owl",
            "--focus",
            "otter",
        ]))
        .unwrap();
        assert_eq!(parsed.initial_focus().as_deref(), Some("otter"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::parse(&args(&["--focus"])).is_err());
        assert!(Args::parse(&args(&["--zoom", "3"])).is_err());
        assert!(Args::parse(&args(&["--location", "91,0"])).is_err());
        assert!(Args::parse(&args(&["--location", "north"])).is_err());
    }
}
