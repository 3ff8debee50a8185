//! Postal-code distance lookups against the service area.

use crate::config::toml_config::{GeocodingConfig, ServiceAreaConfig};
use crate::domain::model::DistanceAnnotation;
use crate::domain::ports::DistanceLookup;
use crate::utils::error::Result;
use crate::utils::validation::{is_valid_postal_code, postal_prefix};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Geocodes postal codes through a Nominatim-compatible search endpoint.
pub struct NominatimLookup {
    client: Client,
    endpoint: String,
    user_agent: String,
    country: String,
    area: ServiceAreaConfig,
}

impl NominatimLookup {
    pub fn new(geocoding: &GeocodingConfig, area: ServiceAreaConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: geocoding.endpoint.clone(),
            user_agent: geocoding.user_agent().to_string(),
            country: geocoding.country().to_string(),
            area,
        }
    }

    fn annotate(&self, postal_code: &str, lat: f64, lng: f64) -> DistanceAnnotation {
        let distance = haversine_km(self.area.latitude, self.area.longitude, lat, lng);
        DistanceAnnotation {
            postal_code: postal_code.to_string(),
            distance_km: distance.round() as u32,
            outside_service_area: distance > self.area.max_distance_km,
            is_estimate: false,
        }
    }
}

#[async_trait]
impl DistanceLookup for NominatimLookup {
    async fn lookup(&self, postal_code: &str) -> Result<Option<DistanceAnnotation>> {
        if !is_valid_postal_code(postal_code) {
            return Ok(None);
        }

        tracing::debug!("Geocoding {} via {}", postal_code, self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("postalcode", postal_code),
                ("country", self.country.as_str()),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Geocoding endpoint returned {}", response.status());
            return Ok(None);
        }

        let places: Vec<Place> = response.json().await?;
        let Some(place) = places.first() else {
            return Ok(None);
        };

        match (place.lat.parse::<f64>(), place.lon.parse::<f64>()) {
            (Ok(lat), Ok(lng)) => Ok(Some(self.annotate(postal_code, lat, lng))),
            _ => {
                tracing::warn!("Unparseable coordinates for {}: {:?}", postal_code, place);
                Ok(None)
            }
        }
    }
}

/// Offline distance guess from the two-digit postal prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixEstimateLookup;

impl PrefixEstimateLookup {
    const NEARBY_PREFIXES: [u8; 12] = [23, 24, 25, 26, 27, 28, 29, 30, 31, 38, 39, 49];

    pub fn estimate(postal_code: &str) -> Option<DistanceAnnotation> {
        let prefix = postal_prefix(postal_code)?;
        let (distance_km, outside_service_area) = match prefix {
            20..=22 => (0, false),
            p if Self::NEARBY_PREFIXES.contains(&p) => (100, false),
            _ => (300, true),
        };
        Some(DistanceAnnotation {
            postal_code: postal_code.to_string(),
            distance_km,
            outside_service_area,
            is_estimate: true,
        })
    }
}

#[async_trait]
impl DistanceLookup for PrefixEstimateLookup {
    async fn lookup(&self, postal_code: &str) -> Result<Option<DistanceAnnotation>> {
        Ok(Self::estimate(postal_code))
    }
}

/// Tries the primary lookup and falls back to the prefix estimate.
pub struct FallbackLookup<P: DistanceLookup> {
    primary: P,
}

impl<P: DistanceLookup> FallbackLookup<P> {
    pub fn new(primary: P) -> Self {
        Self { primary }
    }
}

#[async_trait]
impl<P: DistanceLookup> DistanceLookup for FallbackLookup<P> {
    async fn lookup(&self, postal_code: &str) -> Result<Option<DistanceAnnotation>> {
        match self.primary.lookup(postal_code).await {
            Ok(Some(annotation)) => Ok(Some(annotation)),
            Ok(None) => {
                tracing::warn!("No geocoding result for {}, estimating by prefix", postal_code);
                Ok(PrefixEstimateLookup::estimate(postal_code))
            }
            Err(e) => {
                tracing::warn!("Geocoding failed for {}: {}, estimating by prefix", postal_code, e);
                Ok(PrefixEstimateLookup::estimate(postal_code))
            }
        }
    }
}
