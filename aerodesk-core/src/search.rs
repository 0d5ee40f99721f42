use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::offer::{Dictionaries, FlightOffer};
use crate::{CoreError, CoreResult};

/// Upper bound the provider accepts for travellers in one search.
pub const MAX_PASSENGERS: u32 = 9;

/// Offers requested from the provider per search.
pub const RESULT_LIMIT: u32 = 10;

/// Longest journey, in hours, the duration filter accepts.
pub const MAX_DURATION_HOURS: u32 = 48;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
    #[serde(default)]
    pub filters: SearchFilters,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SearchFilters {
    pub max_price: Option<u32>,
    #[serde(default)]
    pub non_stop: bool,
    pub carrier: Option<String>,
    pub max_duration_hours: Option<u32>,
    #[serde(default)]
    pub stops: StopsFilter,
    pub layover_airport: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum StopsFilter {
    #[default]
    Any,
    #[serde(rename = "Non-stop")]
    NonStop,
    #[serde(rename = "1 Stop")]
    OneStop,
    #[serde(rename = "2+ Stops")]
    TwoPlus,
}

impl StopsFilter {
    pub fn allows(&self, stops: u32) -> bool {
        match self {
            StopsFilter::Any => true,
            StopsFilter::NonStop => stops == 0,
            StopsFilter::OneStop => stops == 1,
            StopsFilter::TwoPlus => stops >= 2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(rename = "data", default)]
    pub offers: Vec<FlightOffer>,
    #[serde(default)]
    pub dictionaries: Dictionaries,
}

/// Extracts the IATA code from either `LIS` or a picker label such as `LIS - Lisbon`.
pub fn location_code(raw: &str) -> Option<String> {
    let code = raw.split(" - ").next()?.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code)
    } else {
        None
    }
}

impl SearchRequest {
    /// Normalizes airport labels to codes and checks dates and party size.
    pub fn validated(mut self) -> CoreResult<Self> {
        self.origin = location_code(&self.origin)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown origin: {}", self.origin)))?;
        self.destination = location_code(&self.destination).ok_or_else(|| {
            CoreError::ValidationError(format!("Unknown destination: {}", self.destination))
        })?;

        if self.origin == self.destination {
            return Err(CoreError::ValidationError(
                "Origin and destination must differ".to_string(),
            ));
        }
        if self.passengers == 0 || self.passengers > MAX_PASSENGERS {
            return Err(CoreError::ValidationError(format!(
                "Passengers must be between 1 and {}",
                MAX_PASSENGERS
            )));
        }
        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err(CoreError::ValidationError(
                    "Return date is before departure date".to_string(),
                ));
            }
        }
        if let Some(hours) = self.filters.max_duration_hours {
            if hours == 0 || hours > MAX_DURATION_HOURS {
                return Err(CoreError::ValidationError(format!(
                    "Max duration must be between 1 and {} hours",
                    MAX_DURATION_HOURS
                )));
            }
        }
        if let Some(carrier) = self.filters.carrier.take() {
            let carrier = carrier.trim().to_ascii_uppercase();
            self.filters.carrier = (!carrier.is_empty()).then_some(carrier);
        }
        if let Some(airport) = self.filters.layover_airport.take() {
            self.filters.layover_airport = location_code(&airport);
        }
        Ok(self)
    }

    /// Query parameters for the provider's flight-offers endpoint.
    ///
    /// The stops filter has no provider parameter and is applied by `SearchFilters::matches`.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("originLocationCode", self.origin.clone()),
            ("destinationLocationCode", self.destination.clone()),
            ("departureDate", self.departure_date.to_string()),
        ];
        if let Some(return_date) = self.return_date {
            params.push(("returnDate", return_date.to_string()));
        }
        params.push(("adults", self.passengers.to_string()));
        params.push(("max", RESULT_LIMIT.to_string()));

        let filters = &self.filters;
        if let Some(max_price) = filters.max_price {
            params.push(("maxPrice", max_price.to_string()));
        }
        if filters.non_stop {
            params.push(("nonStop", "true".to_string()));
        }
        if let Some(carrier) = &filters.carrier {
            params.push(("includedAirlineCodes", carrier.clone()));
        }
        if let Some(hours) = filters.max_duration_hours {
            params.push(("maxFlightDuration", hours.saturating_mul(60).to_string()));
        }
        if let Some(airport) = &filters.layover_airport {
            params.push(("viaAirlineCode", airport.clone()));
        }
        params
    }

    /// Whether an offer flies this request's route on its departure date.
    pub fn matches_route(&self, offer: &FlightOffer) -> bool {
        offer.origin() == Some(self.origin.as_str())
            && offer.destination() == Some(self.destination.as_str())
            && offer.departure_date() == Some(self.departure_date)
    }
}

impl SearchFilters {
    pub fn matches(&self, offer: &FlightOffer) -> bool {
        if let Some(max_price) = self.max_price {
            match offer.grand_total_cents() {
                Some(cents) if cents <= i64::from(max_price) * 100 => {}
                _ => return false,
            }
        }

        if self.non_stop && offer.itineraries.iter().any(|it| it.stop_count() > 0) {
            return false;
        }

        if let Some(carrier) = &self.carrier {
            if offer.segments().any(|s| &s.carrier_code != carrier) {
                return false;
            }
        }

        if let Some(hours) = self.max_duration_hours {
            let limit = hours.saturating_mul(60);
            let within = offer
                .itineraries
                .iter()
                .all(|it| it.duration_minutes().map_or(false, |m| m <= limit));
            if !within {
                return false;
            }
        }

        if !offer.itineraries.iter().all(|it| self.stops.allows(it.stop_count())) {
            return false;
        }

        if let Some(airport) = &self.layover_airport {
            let via = offer
                .itineraries
                .iter()
                .any(|it| it.connection_airports().any(|a| a == airport));
            if !via {
                return false;
            }
        }

        true
    }
}
