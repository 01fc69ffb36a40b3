use crate::record::OfficialRecord;
use std::collections::{HashMap, HashSet};

/// Unique identifiers in first-seen order
pub fn unique_ids(records: &[OfficialRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Copies of every row carrying `id`. Empty when the identifier is unknown.
pub fn select_by_id(records: &[OfficialRecord], id: &str) -> Vec<OfficialRecord> {
    let id = id.trim();
    records.iter().filter(|r| r.id == id).cloned().collect()
}

/// Group rows by identifier, keeping first-seen order of identifiers and rows.
pub fn group_by_id(records: Vec<OfficialRecord>) -> Vec<(String, Vec<OfficialRecord>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<OfficialRecord>)> = Vec::new();
    for record in records {
        match index.get(&record.id) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(record.id.clone(), groups.len());
                groups.push((record.id.clone(), vec![record]));
            }
        }
    }
    groups
}
