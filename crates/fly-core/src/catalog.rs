//! Flight catalog.
//!
//! The built-in catalog holds three offers. Callers may supply their own list,
//! either programmatically or as a JSON array of [`FlightOffer`] objects.

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::types::{FlightOffer, Token};

/// An ordered, id-unique list of flight offers.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    offers: Vec<FlightOffer>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            offers: vec![
                FlightOffer::new(1, "JFK", "LAX", 0.85, Token::Eth, "FlyAnyTrip Air", "5h 45m"),
                FlightOffer::new(2, "LHR", "CDG", 0.42, Token::Usdc, "Web3 Airways", "1h 20m"),
                FlightOffer::new(3, "SFO", "HND", 1.25, Token::Eth, "Crypto Airlines", "10h 30m"),
            ],
        }
    }
}

impl Catalog {
    /// Build a catalog from caller-supplied offers.
    ///
    /// Rejects duplicate ids and negative or non-finite prices.
    pub fn from_offers(offers: Vec<FlightOffer>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(offers.len());
        for offer in &offers {
            if !seen.insert(offer.id) {
                return Err(CatalogError::DuplicateId(offer.id));
            }
            if !offer.price.is_finite() || offer.price < 0.0 {
                return Err(CatalogError::InvalidPrice { id: offer.id });
            }
        }
        Ok(Self { offers })
    }

    /// Parse a JSON array of offers.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let offers: Vec<FlightOffer> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_offers(offers)
    }

    pub fn get(&self, id: u32) -> Option<&FlightOffer> {
        self.offers.iter().find(|o| o.id == id)
    }

    /// Like [`get`](Self::get), but an unknown id is an error.
    pub fn require(&self, id: u32) -> Result<&FlightOffer, CatalogError> {
        self.get(id).ok_or(CatalogError::UnknownFlight(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlightOffer> {
        self.offers.iter()
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}
