//! In-memory record collection.

use clientele_protocol::{CustomerRecord, RecordId};

/// Records in display order.
///
/// Every mutation bumps a revision counter so derived views can tell when
/// their cached results are stale.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<CustomerRecord>,
    revision: u64,
}

impl Roster {
    /// Replace the whole collection, as after a successful load.
    pub fn replace_all(&mut self, records: Vec<CustomerRecord>) {
        self.records = records;
        self.bump();
    }

    /// Insert a newly created record at the front.
    pub fn prepend(&mut self, record: CustomerRecord) {
        self.records.insert(0, record);
        self.bump();
    }

    /// Replace every record whose id equals `id`, keeping its position.
    ///
    /// Returns `false` when no record carries `id`; the collection is then
    /// left as it was.
    pub fn replace_by_id(&mut self, id: &RecordId, record: CustomerRecord) -> bool {
        let mut replaced = false;
        for slot in self.records.iter_mut().filter(|slot| &slot.id == id) {
            *slot = record.clone();
            replaced = true;
        }
        if replaced {
            self.bump();
        }
        replaced
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&CustomerRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counter incremented on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(id: u64, name: &str) -> CustomerRecord {
        CustomerRecord {
            name: Some(name.to_string()),
            ..CustomerRecord::new(id)
        }
    }

    fn names(roster: &Roster) -> Vec<&str> {
        roster
            .records()
            .iter()
            .filter_map(|record| record.name.as_deref())
            .collect()
    }

    #[test]
    fn prepend_places_record_first() {
        let mut roster = Roster::default();
        roster.replace_all(vec![named(1, "Ann"), named(2, "Bob")]);
        roster.prepend(named(3, "Cid"));
        assert_eq!(names(&roster), vec!["Cid", "Ann", "Bob"]);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn replace_by_id_keeps_position() {
        let mut roster = Roster::default();
        roster.replace_all(vec![named(1, "Ann"), named(2, "Bob"), named(3, "Cid")]);
        let before = roster.revision();
        assert!(roster.replace_by_id(&RecordId::from(2u64), named(2, "Bea")));
        assert_eq!(names(&roster), vec!["Ann", "Bea", "Cid"]);
        assert!(roster.revision() > before);
    }

    #[test]
    fn replace_of_unknown_id_is_a_no_op() {
        let mut roster = Roster::default();
        roster.replace_all(vec![named(1, "Ann")]);
        let before = roster.revision();
        assert!(!roster.replace_by_id(&RecordId::from("missing"), named(9, "Zed")));
        assert_eq!(names(&roster), vec!["Ann"]);
        assert_eq!(roster.revision(), before);
    }
}
