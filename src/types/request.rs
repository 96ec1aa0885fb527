use serde::{Deserialize, Serialize};

use crate::error::{Result, TravelError};

/// Trip parameters sent to `POST {base}/planner/full-itinerary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerRequest {
    /// City the traveler starts from
    pub home_city: String,
    /// City the itinerary is planned for
    pub destination_city: String,
    /// Trip length in days, at least 1
    pub num_days: u32,
    /// Total budget in the backend's currency unit
    pub budget: f64,
    /// Interest tags in the order they were entered
    pub interests: Vec<String>,
}

impl PlannerRequest {
    pub fn new(
        home_city: impl Into<String>,
        destination_city: impl Into<String>,
        num_days: u32,
        budget: f64,
    ) -> Self {
        Self {
            home_city: home_city.into().trim().to_string(),
            destination_city: destination_city.into().trim().to_string(),
            num_days,
            budget,
            interests: Vec::new(),
        }
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.interests = interests
            .into_iter()
            .map(|interest| interest.as_ref().trim().to_string())
            .filter(|interest| !interest.is_empty())
            .collect();
        self
    }

    /// Split a comma-separated interest list the way the input form does.
    pub fn parse_interests(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Budget spread evenly across the trip, rounded to a whole unit.
    pub fn per_day_budget(&self) -> f64 {
        if self.num_days == 0 {
            return 0.0;
        }
        (self.budget / f64::from(self.num_days)).round()
    }

    /// The only local checks: required text fields and at least one day.
    /// Everything else is left to the backend.
    pub fn validate(&self) -> Result<()> {
        if self.home_city.trim().is_empty() {
            return Err(TravelError::Validation("home city is required".to_string()));
        }
        if self.destination_city.trim().is_empty() {
            return Err(TravelError::Validation(
                "destination city is required".to_string(),
            ));
        }
        if self.num_days < 1 {
            return Err(TravelError::Validation(
                "trip must be at least 1 day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of `POST {base}/planner/place-detail-tts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetailRequest {
    pub time: String,
    pub place: String,
    pub reason_for_time_choice: String,
    pub image_url: String,
    pub destination_city: String,
}
