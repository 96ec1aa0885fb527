use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::{
    error::{Result, TravelError},
    normalize::{normalize_itinerary, normalize_place_detail},
    services::HttpTransport,
    types::{FullItinerary, PlaceDetailRequest, PlaceDetailResult, PlannerRequest},
};

pub const BASE_URL_ENV: &str = "TRAVEL_API_BASE_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

const FULL_ITINERARY_PATH: &str = "/planner/full-itinerary";
const PLACE_DETAIL_PATH: &str = "/planner/place-detail-tts";

/// The two backend calls the viewer depends on.
#[async_trait]
pub trait PlannerApi: Send + Sync {
    async fn fetch_full_itinerary(&self, request: &PlannerRequest) -> Result<FullItinerary>;

    async fn fetch_place_detail(&self, request: &PlaceDetailRequest) -> Result<PlaceDetailResult>;
}

/// HTTP client for the itinerary engine. Responses are normalized before
/// they are returned; only transport and status failures surface as errors.
#[derive(Clone, Debug)]
pub struct PlannerClient {
    transport: HttpTransport,
}

impl PlannerClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url.as_ref(), timeout)?,
        })
    }

    /// Build the client from `TRAVEL_API_BASE_URL`. A missing value is fatal.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV).map_err(|_| {
            TravelError::Config(format!(
                "{BASE_URL_ENV} environment variable must be set before creating a PlannerClient"
            ))
        })?;
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

#[async_trait]
impl PlannerApi for PlannerClient {
    async fn fetch_full_itinerary(&self, request: &PlannerRequest) -> Result<FullItinerary> {
        info!(
            target: "trip_viewer::client",
            destination = %request.destination_city,
            days = request.num_days,
            "requesting full itinerary"
        );
        let raw = self
            .transport
            .post_json(FULL_ITINERARY_PATH, request, "Failed to generate itinerary.")
            .await?;
        Ok(normalize_itinerary(&raw))
    }

    async fn fetch_place_detail(&self, request: &PlaceDetailRequest) -> Result<PlaceDetailResult> {
        info!(
            target: "trip_viewer::client",
            place = %request.place,
            "requesting place narration"
        );
        let raw = self
            .transport
            .post_json(PLACE_DETAIL_PATH, request, "Failed to fetch place details.")
            .await?;
        Ok(normalize_place_detail(&raw, self.transport.base_url()))
    }
}
