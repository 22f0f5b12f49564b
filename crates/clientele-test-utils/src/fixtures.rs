use clientele_protocol::{Country, CustomerRecord};
use serde_json::{Value, json};

/// Record with every display field set; empty strings become absent fields.
pub fn customer(
    id: u64,
    name: &str,
    gender: &str,
    country: &str,
    created_at: &str,
) -> CustomerRecord {
    let text = |value: &str| (!value.is_empty()).then(|| value.to_string());
    CustomerRecord {
        name: text(name),
        gender: text(gender),
        country: text(country),
        created_at: text(created_at),
        ..CustomerRecord::new(id)
    }
}

pub fn country(id: u64, name: &str) -> Country {
    Country {
        id: id.into(),
        name: name.to_string(),
    }
}

pub fn sample_records() -> Vec<CustomerRecord> {
    vec![
        customer(1, "Ann", "female", "France", "2025-01-01T00:00:00Z"),
        customer(2, "Bob", "male", "Peru", "2025-03-05T10:00:00Z"),
        customer(3, "Chen", "other", "China", "2024-11-30T18:15:00Z"),
        customer(4, "Dana", "Female", "France", ""),
    ]
}

pub fn sample_countries() -> Vec<Country> {
    vec![
        country(1, "France"),
        country(2, "Peru"),
        country(3, "China"),
        country(4, "Chile"),
    ]
}

/// JSON form of [`sample_records`] as a store would return it.
pub fn sample_records_json() -> Value {
    json!([
        { "id": "1", "name": "Ann", "gender": "female", "country": "France", "createdAt": "2025-01-01T00:00:00Z" },
        { "id": 2, "name": "Bob", "gender": "male", "country": "Peru", "createdAt": "2025-03-05T10:00:00Z" },
        { "id": "3", "name": "Chen", "gender": "other", "country": "China", "createdAt": "2024-11-30T18:15:00Z" },
        { "id": "4", "name": "Dana", "gender": "Female", "country": "France", "createdAt": null }
    ])
}
