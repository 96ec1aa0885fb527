use tracing::{debug, info, warn};

use super::{
    client::PlannerApi,
    playback::PlaybackSlot,
    reveal::Typewriter,
    session::{PlannerView, SessionSnapshot, SessionStore},
};
use crate::{
    error::Result,
    types::{
        DayPlan, FullItinerary, Language, PlaceDetailRequest, PlaceDetailResult, PlaceVisit,
        PlannerRequest, TimelineEntry,
    },
};

/// Proof that a place-detail fetch was started for the current selection.
/// A ticket goes stale as soon as another place is selected or the overlay
/// is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTicket {
    generation: u64,
    pub request: PlaceDetailRequest,
}

/// State of the open place-detail overlay.
#[derive(Debug, Clone)]
pub struct DetailOverlay {
    pub day_index: usize,
    pub entry_index: usize,
    pub place: PlaceVisit,
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<PlaceDetailResult>,
    pub language: Language,
    pub typewriter: Typewriter,
    pub playback: PlaybackSlot,
}

impl DetailOverlay {
    fn new(day_index: usize, entry_index: usize, place: PlaceVisit) -> Self {
        Self {
            day_index,
            entry_index,
            place,
            loading: true,
            error: None,
            result: None,
            language: Language::English,
            typewriter: Typewriter::default(),
            playback: PlaybackSlot::new(),
        }
    }

    /// Narration for the selected language, empty until loaded.
    pub fn active_text(&self) -> &str {
        self.result
            .as_ref()
            .map(|result| result.narration(self.language))
            .unwrap_or("")
    }

    /// Switch narration language and restart the reveal.
    pub fn select_language(&mut self, language: Language) {
        self.language = language;
        let text = self.active_text().to_string();
        self.typewriter.restart(text);
    }

    pub fn available_languages(&self) -> Vec<Language> {
        self.result
            .as_ref()
            .map(PlaceDetailResult::available_languages)
            .unwrap_or_default()
    }

    pub fn audio_languages(&self) -> Vec<Language> {
        self.result
            .as_ref()
            .map(PlaceDetailResult::audio_languages)
            .unwrap_or_default()
    }

    /// Play the clip for `language`, stopping whatever was playing. Returns
    /// the address now playing, or `None` when that language has no audio.
    pub fn play(&mut self, language: Language) -> Option<&str> {
        let url = self.result.as_ref()?.audio_url(language)?.to_string();
        self.playback.play(language, url);
        self.playback.current().map(|clip| clip.url.as_str())
    }

    fn shutdown(&mut self) {
        self.playback.stop();
        self.typewriter.clear();
    }
}

/// Controller behind the terminal views: owns the persisted session plus
/// the transient overlay state.
#[derive(Debug)]
pub struct Viewer {
    store: SessionStore,
    snapshot: SessionSnapshot,
    last_error: Option<String>,
    detail: Option<DetailOverlay>,
    generation: u64,
}

impl Viewer {
    /// Load the last session once; anything unreadable starts fresh.
    pub fn resume(store: SessionStore) -> Self {
        let snapshot = store.load();
        Self {
            store,
            snapshot,
            last_error: None,
            detail: None,
            generation: 0,
        }
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    pub fn itinerary(&self) -> Option<&FullItinerary> {
        self.snapshot.itinerary_data.as_ref()
    }

    pub fn active_view(&self) -> PlannerView {
        self.snapshot.active_view
    }

    pub fn selected_day_index(&self) -> usize {
        self.snapshot.selected_day_index
    }

    /// Selected day, or the first day when the index is out of range.
    pub fn current_day(&self) -> Option<&DayPlan> {
        self.itinerary()?
            .itinerary
            .day_or_first(self.snapshot.selected_day_index)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn detail(&self) -> Option<&DetailOverlay> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailOverlay> {
        self.detail.as_mut()
    }

    pub fn persist(&self) -> Result<()> {
        self.store.save(&self.snapshot)
    }

    /// Generate a new itinerary. On failure the user is returned to the input
    /// view with the message kept in [`Viewer::last_error`]; any previous
    /// itinerary is left in place.
    pub async fn submit<A>(&mut self, api: &A, request: PlannerRequest) -> Result<()>
    where
        A: PlannerApi + ?Sized,
    {
        self.last_error = None;

        let outcome = match request.validate() {
            Ok(()) => api.fetch_full_itinerary(&request).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(mut data) => {
                data.metadata.destination_city = Some(request.destination_city.clone());
                info!(
                    target: "trip_viewer::viewer",
                    days = data.itinerary.days.len(),
                    "itinerary loaded"
                );
                self.close_detail();
                self.snapshot.itinerary_data = Some(data);
                self.snapshot.selected_day_index = 0;
                self.snapshot.active_view = PlannerView::Itinerary;
                self.persist()
            }
            Err(err) => {
                warn!(target: "trip_viewer::viewer", error = %err, "itinerary request failed");
                self.last_error = Some(err.to_string());
                self.snapshot.active_view = PlannerView::Input;
                if let Err(persist_err) = self.persist() {
                    warn!(
                        target: "trip_viewer::viewer",
                        error = %persist_err,
                        "could not save session after failed request"
                    );
                }
                Err(err)
            }
        }
    }

    pub fn select_day(&mut self, index: usize) -> Result<()> {
        self.snapshot.selected_day_index = index;
        self.persist()
    }

    pub fn show_input(&mut self) -> Result<()> {
        self.close_detail();
        self.snapshot.active_view = PlannerView::Input;
        self.persist()
    }

    /// Switch to the itinerary view. Without an itinerary the view stays on
    /// input and `false` is returned.
    pub fn show_itinerary(&mut self) -> Result<bool> {
        if self.snapshot.itinerary_data.is_none() {
            self.snapshot.active_view = PlannerView::Input;
            self.persist()?;
            return Ok(false);
        }
        self.snapshot.active_view = PlannerView::Itinerary;
        self.persist()?;
        Ok(true)
    }

    /// Open the overlay for a place on the timeline. Meals and missing
    /// entries yield `None`.
    pub fn select_place(&mut self, day_index: usize, entry_index: usize) -> Option<DetailTicket> {
        let data = self.snapshot.itinerary_data.as_ref()?;
        let place = match data.itinerary.days.get(day_index)?.timeline.get(entry_index)? {
            TimelineEntry::Place(place) => place.clone(),
            TimelineEntry::Meal(_) => return None,
        };

        let request = PlaceDetailRequest {
            time: place.window.time.clone(),
            place: place.place_name.clone(),
            reason_for_time_choice: place.reason_for_time_choice.clone(),
            image_url: place.image_url.clone().unwrap_or_default(),
            destination_city: data.metadata.destination_city.clone().unwrap_or_default(),
        };

        self.close_detail();
        self.detail = Some(DetailOverlay::new(day_index, entry_index, place));
        debug!(
            target: "trip_viewer::viewer",
            generation = self.generation,
            place = %request.place,
            "place selected"
        );

        Some(DetailTicket {
            generation: self.generation,
            request,
        })
    }

    /// Apply a fetched place detail if `ticket` still belongs to the open
    /// overlay. Stale results are dropped and `false` is returned.
    pub fn apply_detail(
        &mut self,
        ticket: &DetailTicket,
        outcome: Result<PlaceDetailResult>,
    ) -> bool {
        let overlay = match self.detail.as_mut() {
            Some(overlay) if ticket.generation == self.generation => overlay,
            _ => {
                debug!(
                    target: "trip_viewer::viewer",
                    place = %ticket.request.place,
                    "discarding stale place detail"
                );
                return false;
            }
        };

        overlay.loading = false;
        match outcome {
            Ok(result) => {
                overlay.error = None;
                overlay.result = Some(result);
                let text = overlay.active_text().to_string();
                overlay.typewriter.restart(text);
            }
            Err(err) => {
                overlay.error = Some(err.to_string());
            }
        }
        true
    }

    /// Select a place and fetch its narration in one step.
    pub async fn open_place<A>(
        &mut self,
        api: &A,
        day_index: usize,
        entry_index: usize,
    ) -> Option<&DetailOverlay>
    where
        A: PlannerApi + ?Sized,
    {
        let ticket = self.select_place(day_index, entry_index)?;
        let outcome = api.fetch_place_detail(&ticket.request).await;
        self.apply_detail(&ticket, outcome);
        self.detail.as_ref()
    }

    /// Close the overlay: stop audio, clear the reveal, and invalidate any
    /// fetch still in flight.
    pub fn close_detail(&mut self) {
        self.generation += 1;
        if let Some(mut overlay) = self.detail.take() {
            overlay.shutdown();
        }
    }
}
