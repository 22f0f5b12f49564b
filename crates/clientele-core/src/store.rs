//! Collaborator traits for the remote record store and country list.

use crate::error::StoreError;
use async_trait::async_trait;
use clientele_protocol::{Country, CustomerRecord, NewCustomer, RecordId};
use futures_util::future::try_join;
use log::{debug, info};

/// Remote collection of customer records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record, in store order.
    async fn list(&self) -> Result<Vec<CustomerRecord>, StoreError>;

    /// Create a record and return it as stored, including its new id.
    async fn create(&self, customer: NewCustomer) -> Result<CustomerRecord, StoreError>;

    /// Replace the record with `id` and return the stored result.
    async fn update(
        &self,
        id: &RecordId,
        record: CustomerRecord,
    ) -> Result<CustomerRecord, StoreError>;
}

/// Source of selectable countries for the form.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn list_countries(&self) -> Result<Vec<Country>, StoreError>;
}

/// Everything the screen needs after a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub records: Vec<CustomerRecord>,
    pub countries: Vec<Country>,
}

/// Fetch records and countries concurrently.
///
/// Fails as a whole if either request fails; no partial snapshot is ever
/// returned.
pub async fn load_snapshot(
    store: &dyn RecordStore,
    source: &dyn CountrySource,
) -> Result<Snapshot, StoreError> {
    debug!("Loading records and countries");
    let (records, countries) = try_join(store.list(), source.list_countries()).await?;
    info!(
        "Loaded snapshot (records={}, countries={})",
        records.len(),
        countries.len()
    );
    Ok(Snapshot { records, countries })
}

/// A pending create or update.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create(NewCustomer),
    Update { id: RecordId, record: CustomerRecord },
}

impl SaveRequest {
    pub fn is_create(&self) -> bool {
        matches!(self, SaveRequest::Create(_))
    }

    /// Send the request to `store`.
    pub async fn send(self, store: &dyn RecordStore) -> Result<SaveOutcome, StoreError> {
        match self {
            SaveRequest::Create(customer) => store.create(customer).await.map(SaveOutcome::Created),
            SaveRequest::Update { id, record } => {
                let record = store.update(&id, record).await?;
                Ok(SaveOutcome::Updated { id, record })
            }
        }
    }
}

/// Result of a successful save.
///
/// `Updated` keeps the id the update was addressed to; the roster replaces
/// by that id even if the store echoes something else.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(CustomerRecord),
    Updated { id: RecordId, record: CustomerRecord },
}
