//! Booking service
//!
//! Implements the visit booking flow:
//! - `BookingWizard`: date -> time slot -> guest count -> confirm, checked
//!   against the availability the server reports for the chosen date
//! - `BookingService`: slot lookup, reservation submit and the visitor's
//!   own reservations
//!
//! Slot lists are tagged with the date they were requested for; a list that
//! arrives after the visitor picked another date is dropped.

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;

use super::SERVER_ERROR_MESSAGE;
use crate::client::{ApiError, ReservationRepository};
use crate::models::{Reservation, ReservationRequest, TimeSlot};
use crate::session::{Capability, SessionContext, SessionError};

/// Guest count of a fresh wizard
pub const MIN_GUESTS: u32 = 1;

/// Error types for booking operations
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error("No visit date selected")]
    NoDateSelected,

    #[error("No time slot selected")]
    NoTimeSelected,

    /// The server lists the slot as taken
    #[error("Time slot {0} is not available")]
    SlotUnavailable(NaiveTime),

    /// The slot is not offered on the selected date
    #[error("Time slot {0} does not exist on the selected date")]
    UnknownSlot(NaiveTime),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl BookingServiceError {
    /// Message suitable for end users (Polish UI)
    pub fn user_message(&self) -> String {
        match self {
            BookingServiceError::NoDateSelected => "Wybierz datę wizyty.".to_string(),
            BookingServiceError::NoTimeSelected => "Wybierz godzinę wizyty.".to_string(),
            BookingServiceError::SlotUnavailable(time) => {
                format!("Termin {} jest już zajęty.", time.format("%H:%M"))
            }
            BookingServiceError::UnknownSlot(time) => {
                format!("Godzina {} nie jest dostępna w tym dniu.", time.format("%H:%M"))
            }
            BookingServiceError::Session(e) => e.user_message(),
            BookingServiceError::Api(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Where the wizard currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    ChooseDate,
    ChooseTime,
    ChooseGuests,
    Confirm,
}

/// Multi-step booking state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWizard {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    guests: u32,
    guests_confirmed: bool,
    slots: Vec<TimeSlot>,
    max_guests: Option<u32>,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BookingWizard {
    /// Create a wizard; `max_guests` caps the party size when set
    pub fn new(max_guests: Option<u32>) -> Self {
        Self {
            date: None,
            time: None,
            guests: MIN_GUESTS,
            guests_confirmed: false,
            slots: Vec::new(),
            max_guests: max_guests.map(|max| max.max(MIN_GUESTS)),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    /// Slots loaded for the selected date
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn step(&self) -> BookingStep {
        match (self.date, self.time) {
            (None, _) => BookingStep::ChooseDate,
            (Some(_), None) => BookingStep::ChooseTime,
            (Some(_), Some(_)) if !self.guests_confirmed => BookingStep::ChooseGuests,
            _ => BookingStep::Confirm,
        }
    }

    /// Pick a visit date. The selected time and any loaded slots are dropped
    /// until availability for the new date arrives.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.time = None;
        self.guests_confirmed = false;
        self.slots.clear();
    }

    /// Store slots fetched for `date`
    ///
    /// # Returns
    /// `false` when `date` is no longer the selected date and the slots were dropped.
    pub fn receive_slots(&mut self, date: NaiveDate, mut slots: Vec<TimeSlot>) -> bool {
        if self.date != Some(date) {
            tracing::debug!(%date, "Dropping slots for a date no longer selected");
            return false;
        }
        slots.sort_by_key(|slot| slot.time);
        self.slots = slots;
        true
    }

    /// Pick a time slot among the loaded ones
    ///
    /// # Errors
    /// - `NoDateSelected` before a date is picked
    /// - `UnknownSlot` when the time is not offered for the date
    /// - `SlotUnavailable` when the server marks it taken
    pub fn select_time(&mut self, time: NaiveTime) -> Result<(), BookingServiceError> {
        if self.date.is_none() {
            return Err(BookingServiceError::NoDateSelected);
        }
        let slot = self
            .slots
            .iter()
            .find(|slot| slot.time == time)
            .ok_or(BookingServiceError::UnknownSlot(time))?;
        if !slot.available {
            return Err(BookingServiceError::SlotUnavailable(time));
        }
        self.time = Some(time);
        Ok(())
    }

    /// Set the party size, clamped to `[1, max_guests]`
    pub fn set_guests(&mut self, guests: u32) {
        let guests = guests.max(MIN_GUESTS);
        self.guests = match self.max_guests {
            Some(max) => guests.min(max),
            None => guests,
        };
    }

    pub fn increment_guests(&mut self) {
        self.set_guests(self.guests.saturating_add(1));
    }

    pub fn decrement_guests(&mut self) {
        self.set_guests(self.guests.saturating_sub(1));
    }

    /// Mark the guest count as final
    pub fn confirm_guests(&mut self) {
        self.guests_confirmed = true;
    }

    /// The reservation the wizard describes
    pub fn request(&self) -> Result<ReservationRequest, BookingServiceError> {
        let date = self.date.ok_or(BookingServiceError::NoDateSelected)?;
        let time = self.time.ok_or(BookingServiceError::NoTimeSelected)?;
        Ok(ReservationRequest {
            date,
            time,
            number_of_guests: self.guests,
        })
    }

    /// Back to an empty wizard, keeping the guest cap
    pub fn reset(&mut self) {
        *self = Self::new(self.max_guests);
    }
}

/// Booking service
pub struct BookingService {
    repo: Arc<dyn ReservationRepository>,
    session: Arc<SessionContext>,
    max_guests: Option<u32>,
}

impl BookingService {
    pub fn new(
        repo: Arc<dyn ReservationRepository>,
        session: Arc<SessionContext>,
        max_guests: Option<u32>,
    ) -> Self {
        Self {
            repo,
            session,
            max_guests,
        }
    }

    /// Fresh wizard with the configured guest cap
    pub fn wizard(&self) -> BookingWizard {
        BookingWizard::new(self.max_guests)
    }

    /// Hourly slots of a day, earliest first
    pub async fn available_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, BookingServiceError> {
        let mut slots = self.repo.available_slots(date).await?;
        slots.sort_by_key(|slot| slot.time);
        Ok(slots)
    }

    /// Select `date` in the wizard and load its availability
    pub async fn choose_date(
        &self,
        wizard: &mut BookingWizard,
        date: NaiveDate,
    ) -> Result<(), BookingServiceError> {
        wizard.select_date(date);
        let slots = self.repo.available_slots(date).await?;
        wizard.receive_slots(date, slots);
        Ok(())
    }

    /// Send the wizard's reservation; the wizard resets on success
    ///
    /// # Returns
    /// The server's confirmation text.
    pub async fn submit(&self, wizard: &mut BookingWizard) -> Result<String, BookingServiceError> {
        let user = self.session.require(Capability::Authenticated)?;
        let request = wizard.request()?;

        let confirmation = self.repo.create(&request).await.map_err(|e| {
            tracing::error!(date = %request.date, time = %request.time, "Reservation failed: {}", e);
            BookingServiceError::Api(e)
        })?;

        tracing::info!(
            email = %user.email,
            date = %request.date,
            time = %request.time,
            guests = request.number_of_guests,
            "Reservation created"
        );
        wizard.reset();
        Ok(confirmation)
    }

    /// Run the whole wizard in one go
    pub async fn book(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        guests: u32,
    ) -> Result<String, BookingServiceError> {
        self.session.require(Capability::Authenticated)?;

        let mut wizard = self.wizard();
        self.choose_date(&mut wizard, date).await?;
        wizard.select_time(time)?;
        wizard.set_guests(guests);
        wizard.confirm_guests();
        self.submit(&mut wizard).await
    }

    /// Reservations of the signed-in user, by visit date and time
    pub async fn my_reservations(&self) -> Result<Vec<Reservation>, BookingServiceError> {
        self.session.require(Capability::Authenticated)?;
        let mut reservations = self.repo.list_mine().await?;
        reservations.sort_by_key(|r| (r.visit_date, r.visit_time));
        Ok(reservations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::*;
    use proptest::prelude::*;

    fn slots(available: &[(u32, bool)]) -> Vec<TimeSlot> {
        available
            .iter()
            .map(|(hour, available)| TimeSlot {
                time: time(*hour),
                available: *available,
            })
            .collect()
    }

    #[test]
    fn test_wizard_steps() {
        let day = date(2025, 9, 1);
        let mut wizard = BookingWizard::default();
        assert_eq!(wizard.step(), BookingStep::ChooseDate);

        wizard.select_date(day);
        assert_eq!(wizard.step(), BookingStep::ChooseTime);

        wizard.receive_slots(day, slots(&[(10, true)]));
        wizard.select_time(time(10)).unwrap();
        assert_eq!(wizard.step(), BookingStep::ChooseGuests);

        wizard.confirm_guests();
        assert_eq!(wizard.step(), BookingStep::Confirm);
        assert_eq!(
            wizard.request().unwrap(),
            ReservationRequest {
                date: day,
                time: time(10),
                number_of_guests: 1,
            }
        );
    }

    #[test]
    fn test_new_date_clears_time_and_slots() {
        let mut wizard = BookingWizard::default();
        wizard.select_date(date(2025, 9, 1));
        wizard.receive_slots(date(2025, 9, 1), slots(&[(10, true), (11, true)]));
        wizard.select_time(time(11)).unwrap();

        wizard.select_date(date(2025, 9, 2));

        assert_eq!(wizard.time(), None);
        assert!(wizard.slots().is_empty());
        assert!(matches!(wizard.request(), Err(BookingServiceError::NoTimeSelected)));
    }

    #[test]
    fn test_stale_slots_are_ignored() {
        let mut wizard = BookingWizard::default();
        wizard.select_date(date(2025, 9, 1));
        wizard.select_date(date(2025, 9, 2));

        assert!(!wizard.receive_slots(date(2025, 9, 1), slots(&[(10, true)])));
        assert!(wizard.slots().is_empty());

        assert!(wizard.receive_slots(date(2025, 9, 2), slots(&[(12, false), (10, true)])));
        assert_eq!(wizard.slots()[0].time, time(10));
    }

    #[test]
    fn test_unavailable_and_unknown_slots_rejected() {
        let day = date(2025, 9, 1);
        let mut wizard = BookingWizard::default();
        assert!(matches!(
            wizard.select_time(time(10)),
            Err(BookingServiceError::NoDateSelected)
        ));

        wizard.select_date(day);
        wizard.receive_slots(day, slots(&[(10, false), (11, true)]));

        assert!(matches!(
            wizard.select_time(time(10)),
            Err(BookingServiceError::SlotUnavailable(_))
        ));
        assert!(matches!(
            wizard.select_time(time(16)),
            Err(BookingServiceError::UnknownSlot(_))
        ));
        assert_eq!(wizard.time(), None);
    }

    #[test]
    fn test_guest_bounds() {
        let mut wizard = BookingWizard::default();
        wizard.decrement_guests();
        wizard.decrement_guests();
        assert_eq!(wizard.guests(), 1);

        wizard.set_guests(250);
        assert_eq!(wizard.guests(), 250);

        let mut capped = BookingWizard::new(Some(10));
        capped.set_guests(25);
        assert_eq!(capped.guests(), 10);
        capped.increment_guests();
        assert_eq!(capped.guests(), 10);
    }

    #[test]
    fn test_reset_keeps_cap() {
        let mut wizard = BookingWizard::new(Some(4));
        wizard.select_date(date(2025, 9, 1));
        wizard.set_guests(3);

        wizard.reset();

        assert_eq!(wizard, BookingWizard::new(Some(4)));
    }

    #[tokio::test]
    async fn test_choose_date_loads_slots() {
        let repo = FakeReservationRepository::new();
        repo.take(date(2025, 9, 1), 12);
        let service = BookingService::new(repo.clone(), user_session(), None);
        let mut wizard = service.wizard();

        service.choose_date(&mut wizard, date(2025, 9, 1)).await.unwrap();

        assert_eq!(wizard.slots().len(), 6);
        assert!(wizard.select_time(time(12)).is_err());
        assert!(wizard.select_time(time(13)).is_ok());
    }

    #[tokio::test]
    async fn test_submit_creates_and_resets() {
        let repo = FakeReservationRepository::new();
        let service = BookingService::new(repo.clone(), user_session(), None);
        let mut wizard = service.wizard();
        service.choose_date(&mut wizard, date(2025, 9, 1)).await.unwrap();
        wizard.select_time(time(10)).unwrap();
        wizard.set_guests(3);

        let confirmation = service.submit(&mut wizard).await.unwrap();

        assert_eq!(confirmation, "Reservation confirmed!");
        assert_eq!(wizard.step(), BookingStep::ChooseDate);
        let mine = service.my_reservations().await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].number_of_guests, 3);
    }

    #[tokio::test]
    async fn test_submit_requires_login() {
        let service = BookingService::new(FakeReservationRepository::new(), session(), None);
        let mut wizard = service.wizard();

        let err = service.submit(&mut wizard).await.unwrap_err();

        assert!(matches!(err, BookingServiceError::Session(SessionError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_book_rejects_taken_slot() {
        let repo = FakeReservationRepository::new();
        repo.take(date(2025, 9, 1), 10);
        let service = BookingService::new(repo.clone(), user_session(), Some(10));

        let err = service.book(date(2025, 9, 1), time(10), 2).await.unwrap_err();
        assert!(matches!(err, BookingServiceError::SlotUnavailable(_)));
        assert_eq!(err.user_message(), "Termin 10:00 jest już zajęty.");

        service.book(date(2025, 9, 1), time(11), 40).await.unwrap();
        assert_eq!(repo.reservations.lock().unwrap()[0].number_of_guests, 10);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_wizard() {
        let repo = FakeReservationRepository::new();
        let service = BookingService::new(repo.clone(), user_session(), None);
        let mut wizard = service.wizard();
        service.choose_date(&mut wizard, date(2025, 9, 1)).await.unwrap();
        wizard.select_time(time(14)).unwrap();
        repo.fail.fail_next(reqwest::StatusCode::INTERNAL_SERVER_ERROR);

        let err = service.submit(&mut wizard).await.unwrap_err();

        assert_eq!(err.user_message(), SERVER_ERROR_MESSAGE);
        assert_eq!(wizard.time(), Some(time(14)));
    }

    #[derive(Debug, Clone)]
    enum GuestOp {
        Increment,
        Decrement,
        Set(u32),
    }

    fn guest_op_strategy() -> impl Strategy<Value = GuestOp> {
        prop_oneof![
            Just(GuestOp::Increment),
            Just(GuestOp::Decrement),
            (0u32..50).prop_map(GuestOp::Set),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// The guest count never drops below one and never exceeds the cap.
        #[test]
        fn property_guest_count_stays_in_bounds(
            ops in prop::collection::vec(guest_op_strategy(), 0..40),
            max in prop::option::of(1u32..20),
        ) {
            let mut wizard = BookingWizard::new(max);
            for op in ops {
                match op {
                    GuestOp::Increment => wizard.increment_guests(),
                    GuestOp::Decrement => wizard.decrement_guests(),
                    GuestOp::Set(n) => wizard.set_guests(n),
                }
                prop_assert!(wizard.guests() >= MIN_GUESTS);
                if let Some(max) = max {
                    prop_assert!(wizard.guests() <= max);
                }
            }
        }

        /// Whatever was selected before, a new date leaves no time selected.
        #[test]
        fn property_new_date_clears_time(hour in 10u32..16, day in 1u32..28, next in 1u32..28) {
            let mut wizard = BookingWizard::default();
            wizard.select_date(date(2025, 9, day));
            wizard.receive_slots(date(2025, 9, day), slots(&[(hour, true)]));
            wizard.select_time(time(hour)).unwrap();

            wizard.select_date(date(2025, 10, next));

            prop_assert_eq!(wizard.time(), None);
            prop_assert_eq!(wizard.step(), BookingStep::ChooseTime);
        }
    }
}
