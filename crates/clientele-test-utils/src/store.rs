use async_trait::async_trait;
use clientele_core::{CountrySource, RecordStore, StoreError};
use clientele_protocol::{Country, CustomerRecord, NewCustomer, RecordId};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

/// Call observed by a [`StubStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List,
    ListCountries,
    Create(NewCustomer),
    Update(RecordId, CustomerRecord),
}

#[derive(Debug, Default)]
struct StubState {
    records: Vec<CustomerRecord>,
    countries: Vec<Country>,
    calls: Vec<StoreCall>,
    list_error: Option<StoreError>,
    countries_error: Option<StoreError>,
    save_error: Option<StoreError>,
}

/// In-memory record store and country source.
///
/// Creates assign a fresh id and prepend to the held records; updates
/// replace by id. Each operation can be made to fail instead.
#[derive(Debug, Clone, Default)]
pub struct StubStore {
    state: Arc<Mutex<StubState>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(records: Vec<CustomerRecord>, countries: Vec<Country>) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock();
            state.records = records;
            state.countries = countries;
        }
        store
    }

    pub fn fail_list(self, error: StoreError) -> Self {
        self.state.lock().list_error = Some(error);
        self
    }

    pub fn fail_countries(self, error: StoreError) -> Self {
        self.state.lock().countries_error = Some(error);
        self
    }

    /// Make creates and updates fail.
    pub fn fail_saves(self, error: StoreError) -> Self {
        self.state.lock().save_error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().calls.clone()
    }

    /// Records as the store currently holds them.
    pub fn records(&self) -> Vec<CustomerRecord> {
        self.state.lock().records.clone()
    }
}

#[async_trait]
impl RecordStore for StubStore {
    async fn list(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::List);
        match &state.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(state.records.clone()),
        }
    }

    async fn create(&self, customer: NewCustomer) -> Result<CustomerRecord, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::Create(customer.clone()));
        if let Some(error) = &state.save_error {
            return Err(error.clone());
        }
        let record = CustomerRecord {
            name: Some(customer.name),
            gender: Some(customer.gender),
            country: Some(customer.country),
            created_at: Some(customer.created_at),
            ..CustomerRecord::new(Uuid::new_v4().to_string())
        };
        state.records.insert(0, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &RecordId,
        record: CustomerRecord,
    ) -> Result<CustomerRecord, StoreError> {
        let mut state = self.state.lock();
        state
            .calls
            .push(StoreCall::Update(id.clone(), record.clone()));
        if let Some(error) = &state.save_error {
            return Err(error.clone());
        }
        let slot = state.records.iter_mut().find(|held| &held.id == id);
        match slot {
            Some(held) => {
                *held = record.clone();
                Ok(record)
            }
            None => Err(StoreError::Status {
                status: 404,
                body: "Not found".to_string(),
            }),
        }
    }
}

#[async_trait]
impl CountrySource for StubStore {
    async fn list_countries(&self) -> Result<Vec<Country>, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::ListCountries);
        match &state.countries_error {
            Some(error) => Err(error.clone()),
            None => Ok(state.countries.clone()),
        }
    }
}
