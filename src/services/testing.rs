//! In-memory repositories for service tests

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::client::{
    ApiError, ApiResult, AuthRepository, DonationRepository, ExhibitRepository,
    ExhibitionRepository, ReservationRepository,
};
use crate::models::*;
use crate::session::test_tokens;
use crate::session::{MemoryTokenStore, SessionContext};

/// Makes the next call of a fake fail with a status
#[derive(Default)]
pub struct FailSwitch(Mutex<Option<StatusCode>>);

impl FailSwitch {
    pub fn fail_next(&self, status: StatusCode) {
        *self.0.lock().unwrap() = Some(status);
    }

    fn check(&self, path: &str) -> ApiResult<()> {
        match self.0.lock().unwrap().take() {
            Some(status) => Err(ApiError::from_status(status, path, String::new())),
            None => Ok(()),
        }
    }
}

pub fn session() -> Arc<SessionContext> {
    Arc::new(SessionContext::init(Arc::new(MemoryTokenStore::new()), "token"))
}

pub fn user_session() -> Arc<SessionContext> {
    let session = session();
    session.login(&test_tokens::user_token("jan@kowalski.pl")).unwrap();
    session
}

pub fn admin_session() -> Arc<SessionContext> {
    let session = session();
    session.login(&test_tokens::admin_token("admin@muzeum.pl")).unwrap();
    session
}

pub fn exhibit(id: i64, name: &str, year: &str, category: ExhibitCategory) -> Exhibit {
    Exhibit {
        id,
        name: name.to_string(),
        description: format!("Opis: {}", name),
        production_year: year.to_string(),
        image_url: String::new(),
        category,
    }
}

pub fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Default)]
pub struct FakeAuthRepository {
    /// email -> (password, role)
    pub accounts: Mutex<HashMap<String, (String, &'static str)>>,
    pub fail: FailSwitch,
}

impl FakeAuthRepository {
    pub fn with_account(email: &str, password: &str, admin: bool) -> Arc<Self> {
        let repo = Self::default();
        let role = if admin { "ROLE_ADMIN" } else { "ROLE_USER" };
        repo.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), role));
        Arc::new(repo)
    }

    fn token_for(email: &str, role: &str) -> String {
        test_tokens::sign(&test_tokens::claims(email, role, chrono::Duration::hours(1)))
    }
}

#[async_trait]
impl AuthRepository for FakeAuthRepository {
    async fn authenticate(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.fail.check("/auth/authenticate")?;
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(&request.email) {
            Some((password, role)) if *password == request.password => Ok(AuthResponse {
                token: Self::token_for(&request.email, role),
                message: None,
            }),
            _ => Err(ApiError::Forbidden),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.fail.check("/auth/register")?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&request.email) {
            return Err(ApiError::Forbidden);
        }
        accounts.insert(request.email.clone(), (request.password.clone(), "ROLE_USER"));
        Ok(AuthResponse {
            token: Self::token_for(&request.email, "ROLE_USER"),
            message: Some("Rejestracja zakończona sukcesem".to_string()),
        })
    }
}

// ============================================================================
// Exhibits
// ============================================================================

#[derive(Default)]
pub struct FakeExhibitRepository {
    pub exhibits: Mutex<Vec<Exhibit>>,
    pub last_criteria: Mutex<Option<ExhibitSearchCriteria>>,
    pub fail: FailSwitch,
}

impl FakeExhibitRepository {
    pub fn with(exhibits: Vec<Exhibit>) -> Arc<Self> {
        let repo = Self::default();
        *repo.exhibits.lock().unwrap() = exhibits;
        Arc::new(repo)
    }
}

#[async_trait]
impl ExhibitRepository for FakeExhibitRepository {
    async fn list(&self, criteria: &ExhibitSearchCriteria) -> ApiResult<Vec<Exhibit>> {
        self.fail.check("/exhibits")?;
        *self.last_criteria.lock().unwrap() = Some(criteria.clone());
        let exhibits = self.exhibits.lock().unwrap();
        Ok(exhibits
            .iter()
            .filter(|e| criteria.category.map_or(true, |c| e.category == c))
            .filter(|e| {
                criteria
                    .name
                    .as_ref()
                    .map_or(true, |n| e.name.to_lowercase().contains(&n.to_lowercase()))
            })
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Option<Exhibit>> {
        self.fail.check("/exhibits/{id}")?;
        Ok(self.exhibits.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, input: &ExhibitInput) -> ApiResult<Exhibit> {
        self.fail.check("/exhibits")?;
        let mut exhibits = self.exhibits.lock().unwrap();
        let id = exhibits.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let exhibit = Exhibit {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            production_year: input.production_year.clone(),
            image_url: input.image_url.clone(),
            category: input.category,
        };
        exhibits.push(exhibit.clone());
        Ok(exhibit)
    }

    async fn update(&self, id: i64, input: &ExhibitInput) -> ApiResult<Exhibit> {
        self.fail.check("/exhibits/{id}")?;
        let mut exhibits = self.exhibits.lock().unwrap();
        let existing = exhibits
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("/exhibits/{}", id)))?;
        existing.name = input.name.clone();
        existing.description = input.description.clone();
        existing.production_year = input.production_year.clone();
        existing.image_url = input.image_url.clone();
        existing.category = input.category;
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        self.fail.check("/exhibits/{id}")?;
        let mut exhibits = self.exhibits.lock().unwrap();
        let before = exhibits.len();
        exhibits.retain(|e| e.id != id);
        if exhibits.len() == before {
            return Err(ApiError::NotFound(format!("/exhibits/{}", id)));
        }
        Ok(())
    }
}

// ============================================================================
// Exhibitions
// ============================================================================

#[derive(Default)]
pub struct FakeExhibitionRepository {
    pub catalog: Vec<Exhibit>,
    pub exhibitions: Mutex<Vec<Exhibition>>,
    pub fail: FailSwitch,
}

impl FakeExhibitionRepository {
    pub fn with_catalog(catalog: Vec<Exhibit>) -> Arc<Self> {
        Arc::new(Self {
            catalog,
            ..Default::default()
        })
    }

    fn build(&self, id: i64, input: &ExhibitionInput) -> Exhibition {
        Exhibition {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            background_image_url: input.background_image_url.clone(),
            exhibits: input
                .exhibit_ids
                .iter()
                .filter_map(|id| self.catalog.iter().find(|e| e.id == *id).cloned())
                .collect(),
        }
    }
}

#[async_trait]
impl ExhibitionRepository for FakeExhibitionRepository {
    async fn list(&self) -> ApiResult<Vec<Exhibition>> {
        self.fail.check("/exhibitions")?;
        Ok(self.exhibitions.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Option<Exhibition>> {
        self.fail.check("/exhibitions/{id}")?;
        Ok(self.exhibitions.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, input: &ExhibitionInput) -> ApiResult<Exhibition> {
        self.fail.check("/exhibitions")?;
        let mut exhibitions = self.exhibitions.lock().unwrap();
        let id = exhibitions.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let exhibition = self.build(id, input);
        exhibitions.push(exhibition.clone());
        Ok(exhibition)
    }

    async fn update(&self, id: i64, input: &ExhibitionInput) -> ApiResult<Exhibition> {
        self.fail.check("/exhibitions/{id}")?;
        let updated = self.build(id, input);
        let mut exhibitions = self.exhibitions.lock().unwrap();
        let existing = exhibitions
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("/exhibitions/{}", id)))?;
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        self.fail.check("/exhibitions/{id}")?;
        self.exhibitions.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

// ============================================================================
// Reservations
// ============================================================================

#[derive(Default)]
pub struct FakeReservationRepository {
    /// Hours already taken per date
    pub taken: Mutex<HashMap<NaiveDate, Vec<u32>>>,
    pub reservations: Mutex<Vec<Reservation>>,
    pub slot_requests: Mutex<Vec<NaiveDate>>,
    pub fail: FailSwitch,
}

impl FakeReservationRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self, date: NaiveDate, hour: u32) {
        self.taken.lock().unwrap().entry(date).or_default().push(hour);
    }
}

#[async_trait]
impl ReservationRepository for FakeReservationRepository {
    async fn available_slots(&self, date: NaiveDate) -> ApiResult<Vec<TimeSlot>> {
        self.fail.check("/reservations/available-slots")?;
        self.slot_requests.lock().unwrap().push(date);
        let taken = self.taken.lock().unwrap();
        let taken = taken.get(&date).cloned().unwrap_or_default();
        Ok((10..=15)
            .map(|hour| TimeSlot {
                time: time(hour),
                available: !taken.contains(&hour),
            })
            .collect())
    }

    async fn create(&self, request: &ReservationRequest) -> ApiResult<String> {
        self.fail.check("/reservations")?;
        let mut reservations = self.reservations.lock().unwrap();
        let id = reservations.len() as i64 + 1;
        reservations.push(Reservation {
            id,
            visit_date: request.date,
            visit_time: request.time,
            number_of_guests: request.number_of_guests,
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            user_email: "jan@kowalski.pl".to_string(),
        });
        Ok("Reservation confirmed!".to_string())
    }

    async fn list_mine(&self) -> ApiResult<Vec<Reservation>> {
        self.fail.check("/reservations/my")?;
        Ok(self.reservations.lock().unwrap().clone())
    }

    async fn list_by_date(&self, date: NaiveDate) -> ApiResult<Vec<Reservation>> {
        self.fail.check("/reservations/by-date")?;
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.visit_date == date)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Donations
// ============================================================================

#[derive(Default)]
pub struct FakeDonationRepository {
    pub donations: Mutex<Vec<Donation>>,
    pub fail: FailSwitch,
}

impl FakeDonationRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, item_name: &str, status: DonationStatus) -> i64 {
        let mut donations = self.donations.lock().unwrap();
        let id = donations.len() as i64 + 1;
        donations.push(Donation {
            id,
            item_name: item_name.to_string(),
            description: String::new(),
            image_url: String::new(),
            status,
            created_at: None,
            donor_email: "anna@example.pl".to_string(),
        });
        id
    }
}

#[async_trait]
impl DonationRepository for FakeDonationRepository {
    async fn create(&self, input: &DonationInput) -> ApiResult<Donation> {
        self.fail.check("/donations")?;
        let id = self.seed(&input.item_name, DonationStatus::Pending);
        let mut donations = self.donations.lock().unwrap();
        let donation = donations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound("/donations".to_string()))?;
        donation.description = input.description.clone();
        donation.image_url = input.image_url.clone();
        Ok(donation.clone())
    }

    async fn list_mine(&self) -> ApiResult<Vec<Donation>> {
        self.fail.check("/donations/my")?;
        Ok(self.donations.lock().unwrap().clone())
    }

    async fn list(&self, status: Option<DonationStatus>) -> ApiResult<Vec<Donation>> {
        self.fail.check("/donations")?;
        Ok(self
            .donations
            .lock()
            .unwrap()
            .iter()
            .filter(|d| status.map_or(true, |s| d.status == s))
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: i64, status: DonationStatus) -> ApiResult<()> {
        self.fail.check("/donations/{id}/status")?;
        let mut donations = self.donations.lock().unwrap();
        let donation = donations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("/donations/{}/status", id)))?;
        donation.status = status;
        Ok(())
    }
}
