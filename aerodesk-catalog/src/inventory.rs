use aerodesk_core::{Booking, FlightOffer, SeatId};
use std::collections::HashSet;

/// Seats already sold on the candidate flight.
///
/// A past booking blocks all of its seats when it shares any leg number with the
/// candidate, across every itinerary of both offers. Occupancy is not split per leg.
pub fn resolve_occupied_seats(candidate: &FlightOffer, bookings: &[Booking]) -> HashSet<SeatId> {
    let candidate_legs = candidate.leg_numbers();

    let occupied: HashSet<SeatId> = bookings
        .iter()
        .filter(|booking| {
            booking
                .flight
                .segments()
                .any(|segment| candidate_legs.contains(&segment.leg_number()))
        })
        .flat_map(|booking| booking.seats.iter().copied())
        .collect();

    tracing::debug!(
        "Resolved {} occupied seat(s) on legs {:?} from {} booking(s)",
        occupied.len(),
        candidate_legs,
        bookings.len()
    );

    occupied
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use aerodesk_core::offer::{Endpoint, Itinerary, Price, Segment};
    use aerodesk_core::Passenger;
    use chrono::{NaiveDateTime, Utc};
    use uuid::Uuid;

    pub fn flight(legs: &[&[(&str, &str)]]) -> FlightOffer {
        let at = NaiveDateTime::parse_from_str("2024-12-25T09:15:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        FlightOffer {
            id: "1".to_string(),
            validating_airline_codes: vec![],
            itineraries: legs
                .iter()
                .map(|itinerary| Itinerary {
                    duration: Some("PT8H".to_string()),
                    segments: itinerary
                        .iter()
                        .map(|(carrier, number)| Segment {
                            departure: Endpoint { iata_code: "FRA".to_string(), terminal: None, at },
                            arrival: Endpoint { iata_code: "JFK".to_string(), terminal: None, at },
                            carrier_code: carrier.to_string(),
                            number: number.to_string(),
                            aircraft: None,
                            duration: None,
                            number_of_stops: 0,
                        })
                        .collect(),
                })
                .collect(),
            price: Price {
                currency: "EUR".to_string(),
                total: "610.00".to_string(),
                grand_total: "610.00".to_string(),
            },
        }
    }

    pub fn booking(flight: FlightOffer, seats: &[&str]) -> Booking {
        let seats: Vec<SeatId> = seats.iter().map(|s| s.parse().unwrap()).collect();
        let passengers = seats
            .iter()
            .enumerate()
            .map(|(i, seat)| Passenger {
                name: format!("Passenger {}", i + 1),
                email: format!("p{}@example.com", i + 1),
                seat: *seat,
            })
            .collect();
        Booking {
            id: Uuid::new_v4(),
            flight,
            seats,
            passengers,
            booked_by: None,
            created_at: Utc::now(),
        }
    }

    fn seat_set(seats: &[&str]) -> HashSet<SeatId> {
        seats.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_shared_leg_blocks_booked_seats() {
        let log = vec![booking(flight(&[&[("LH", "400")]]), &["1A", "1B"])];
        let candidate = flight(&[&[("LH", "400")]]);

        assert_eq!(resolve_occupied_seats(&candidate, &log), seat_set(&["1A", "1B"]));
    }

    #[test]
    fn test_unrelated_flight_is_free() {
        let log = vec![booking(flight(&[&[("LH", "400")]]), &["1A", "1B"])];
        let candidate = flight(&[&[("AF", "900")]]);

        assert!(resolve_occupied_seats(&candidate, &log).is_empty());
    }

    #[test]
    fn test_empty_log_means_no_occupancy() {
        let candidate = flight(&[&[("LH", "400")]]);
        assert!(resolve_occupied_seats(&candidate, &[]).is_empty());
    }

    #[test]
    fn test_any_shared_leg_blocks_whole_itinerary() {
        // outbound LH400 + return LH401; a later one-way on LH401 only
        let log = vec![
            booking(flight(&[&[("LH", "400")], &[("LH", "401")]]), &["7C"]),
            booking(flight(&[&[("LH", "401")]]), &["7D", "7E"]),
            booking(flight(&[&[("UA", "960")]]), &["9F"]),
        ];

        let connecting = flight(&[&[("AF", "1019"), ("LH", "401")]]);
        assert_eq!(resolve_occupied_seats(&connecting, &log), seat_set(&["7C", "7D", "7E"]));
    }

    #[test]
    fn test_same_number_different_carrier_does_not_conflict() {
        let log = vec![booking(flight(&[&[("LH", "400")]]), &["2A"])];
        let candidate = flight(&[&[("AF", "400")]]);

        assert!(resolve_occupied_seats(&candidate, &log).is_empty());
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let log = vec![
            booking(flight(&[&[("LH", "400")]]), &["1A"]),
            booking(flight(&[&[("LH", "400")]]), &["1A", "3B"]),
        ];
        let candidate = flight(&[&[("LH", "400")]]);

        let first = resolve_occupied_seats(&candidate, &log);
        let second = resolve_occupied_seats(&candidate, &log);
        assert_eq!(first, second);
        assert_eq!(first, seat_set(&["1A", "3B"]));
    }
}
