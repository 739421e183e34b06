use serde::Deserialize;
use serde_json::Value;

use crate::client::MetarError;

#[derive(Debug, Deserialize)]
struct DecodedResponse {
    #[serde(default)]
    data: Vec<MetarReport>,
}

/// One decoded observation. CheckWX mixes numbers and strings for the same
/// fields across stations, so leaf values stay untyped until rendering.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MetarReport {
    #[serde(default)]
    pub station: Option<Station>,
    #[serde(default)]
    pub observed: Option<Value>,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default)]
    pub dewpoint: Option<Temperature>,
    #[serde(default)]
    pub barometer: Option<Barometer>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Station {
    #[serde(default)]
    pub name: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Wind {
    #[serde(default)]
    pub degrees: Option<Value>,
    #[serde(default)]
    pub speed_kts: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Temperature {
    #[serde(default)]
    pub celsius: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Barometer {
    #[serde(default)]
    pub hpa: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Visibility {
    #[serde(default)]
    pub meters: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MetarLookup {
    Found(Box<MetarReport>),
    NotFound,
    Unavailable { status: u16 },
}

/// Interpret a `/metar/{icao}/decoded` response.
pub fn decode_response(status: u16, body: &str) -> Result<MetarLookup, MetarError> {
    if status != 200 {
        return Ok(MetarLookup::Unavailable { status });
    }

    let decoded: DecodedResponse = serde_json::from_str(body)?;
    Ok(match decoded.data.into_iter().next() {
        Some(report) => MetarLookup::Found(Box::new(report)),
        None => MetarLookup::NotFound,
    })
}

/// Four ASCII letters or digits, e.g. `KJFK` or `EGLL`.
pub fn is_valid_icao(raw: &str) -> bool {
    raw.len() == 4 && raw.bytes().all(|byte| byte.is_ascii_alphanumeric())
}

fn render(value: Option<&Value>, fallback: &str) -> String {
    match value {
        None | Some(Value::Null) => fallback.to_owned(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn format_report(icao: &str, report: &MetarReport) -> String {
    let station = render(
        report.station.as_ref().and_then(|station| station.name.as_ref()),
        icao,
    );
    let observed = render(report.observed.as_ref(), "Unknown time");
    let wind_dir = render(
        report.wind.as_ref().and_then(|wind| wind.degrees.as_ref()),
        "Calm",
    );
    let wind_speed = render(
        report.wind.as_ref().and_then(|wind| wind.speed_kts.as_ref()),
        "0",
    );
    let temperature = render(
        report.temperature.as_ref().and_then(|temp| temp.celsius.as_ref()),
        "N/A",
    );
    let dewpoint = render(
        report.dewpoint.as_ref().and_then(|dew| dew.celsius.as_ref()),
        "N/A",
    );
    let pressure = render(
        report.barometer.as_ref().and_then(|baro| baro.hpa.as_ref()),
        "N/A",
    );
    let visibility = render(
        report.visibility.as_ref().and_then(|vis| vis.meters.as_ref()),
        "N/A",
    );

    format!(
        "METAR for `{icao}`: **{station}**\n\
         Time: {observed}\n\
         Wind: {wind_dir} deg at {wind_speed} kt\n\
         Visibility: {visibility} m\n\
         Temp.: {temperature} °C | Dew: {dewpoint} °C\n\
         Pressure: {pressure} hPa"
    )
}
