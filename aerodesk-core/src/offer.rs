use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// ============================================================================
// Flight offer as returned by the search provider
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
    pub itineraries: Vec<Itinerary>,
    pub price: Price,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub duration: Option<String>, // ISO-8601, e.g. PT7H30M
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub carrier_code: String,
    pub number: String,
    pub aircraft: Option<Aircraft>,
    pub duration: Option<String>,
    #[serde(default)]
    pub number_of_stops: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub iata_code: String,
    pub terminal: Option<String>,
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Aircraft {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: String,
    pub total: String,
    pub grand_total: String,
}

/// Code-to-name lookups returned alongside the offers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dictionaries {
    #[serde(default)]
    pub carriers: HashMap<String, String>,
    #[serde(default)]
    pub aircraft: HashMap<String, String>,
    #[serde(default)]
    pub currencies: HashMap<String, String>,
}

impl Dictionaries {
    /// Display name for a carrier, falling back to the code itself.
    pub fn carrier_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.carriers.get(code).map(String::as_str).unwrap_or(code)
    }
}

impl Segment {
    /// Carrier plus flight number (`LH` + `400` = `LH400`); the key used for seat conflicts.
    pub fn leg_number(&self) -> String {
        format!("{}{}", self.carrier_code, self.number)
    }
}

impl Itinerary {
    /// Stops in this direction of travel: connections plus technical stops.
    pub fn stop_count(&self) -> u32 {
        let connections = self.segments.len().saturating_sub(1) as u32;
        connections + self.segments.iter().map(|s| s.number_of_stops).sum::<u32>()
    }

    /// Airports where the traveller changes plane.
    pub fn connection_airports(&self) -> impl Iterator<Item = &str> {
        let last = self.segments.len().saturating_sub(1);
        self.segments[..last].iter().map(|s| s.arrival.iata_code.as_str())
    }

    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration.as_deref().and_then(parse_iso_duration_minutes)
    }
}

impl FlightOffer {
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.itineraries.iter().flat_map(|it| it.segments.iter())
    }

    /// Every leg number in the offer, across all itineraries.
    pub fn leg_numbers(&self) -> BTreeSet<String> {
        self.segments().map(Segment::leg_number).collect()
    }

    fn outbound(&self) -> Option<&Itinerary> {
        self.itineraries.first()
    }

    /// Departure airport of the outbound itinerary.
    pub fn origin(&self) -> Option<&str> {
        self.outbound()
            .and_then(|it| it.segments.first())
            .map(|s| s.departure.iata_code.as_str())
    }

    /// Arrival airport of the outbound itinerary's last leg.
    pub fn destination(&self) -> Option<&str> {
        self.outbound()
            .and_then(|it| it.segments.last())
            .map(|s| s.arrival.iata_code.as_str())
    }

    /// Carrier and number of the first leg, e.g. `LH 400`.
    pub fn headline_flight(&self) -> Option<String> {
        self.outbound()
            .and_then(|it| it.segments.first())
            .map(|s| format!("{} {}", s.carrier_code, s.number))
    }

    pub fn departure_date(&self) -> Option<chrono::NaiveDate> {
        self.outbound()
            .and_then(|it| it.segments.first())
            .map(|s| s.departure.at.date())
    }

    pub fn grand_total_cents(&self) -> Option<i64> {
        parse_amount_cents(&self.price.grand_total)
    }
}

/// Parses a decimal amount such as `"546.7"` into cents.
pub fn parse_amount_cents(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (units, fraction) = match raw.split_once('.') {
        Some((u, f)) => (u, f),
        None => (raw, ""),
    };
    if units.is_empty() || fraction.len() > 2 {
        return None;
    }
    if !units.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let units: i64 = units.parse().ok()?;
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };
    units.checked_mul(100)?.checked_add(cents)
}

/// Parses the day/hour/minute subset of ISO-8601 durations (`P1DT2H15M`) into minutes.
pub fn parse_iso_duration_minutes(raw: &str) -> Option<u32> {
    let rest = raw.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((d, t)) => (d, t),
        None => (rest, ""),
    };

    fn take(number: &mut String, scale: u32) -> Option<u32> {
        number.drain(..).as_str().parse::<u32>().ok()?.checked_mul(scale)
    }

    let mut minutes = 0u32;
    let mut number = String::new();

    for c in date_part.chars() {
        match c {
            '0'..='9' => number.push(c),
            'D' => minutes = minutes.checked_add(take(&mut number, 24 * 60)?)?,
            _ => return None,
        }
    }
    if !number.is_empty() {
        return None;
    }

    for c in time_part.chars() {
        match c {
            '0'..='9' => number.push(c),
            'H' => minutes = minutes.checked_add(take(&mut number, 60)?)?,
            'M' => minutes = minutes.checked_add(take(&mut number, 1)?)?,
            'S' => {
                number.clear();
            }
            _ => return None,
        }
    }
    if !number.is_empty() {
        return None;
    }

    Some(minutes)
}
