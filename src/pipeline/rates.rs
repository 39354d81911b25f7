//! Survival rates per category of a grouping factor

use std::collections::BTreeMap;

use serde::Serialize;

use super::records::EngineeredRecord;

/// Family sizes above this are left out of the reported family-size table.
/// They still count everywhere else.
pub const MAX_REPORTED_FAMILY_SIZE: u32 = 6;

/// Grouping factors for survival rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKey {
    Sex,
    Class,
    AgeBucket,
    FamilySize,
    Embarked,
    IsAlone,
}

impl GroupKey {
    /// Tables reported by the analysis, in display order
    pub const STANDARD: [GroupKey; 6] = [
        GroupKey::Sex,
        GroupKey::Class,
        GroupKey::AgeBucket,
        GroupKey::FamilySize,
        GroupKey::Embarked,
        GroupKey::IsAlone,
    ];

    /// Group name shown in reports
    pub fn title(self) -> &'static str {
        match self {
            GroupKey::Sex => "Gender",
            GroupKey::Class => "Class",
            GroupKey::AgeBucket => "Age Group",
            GroupKey::FamilySize => "Family Size",
            GroupKey::Embarked => "Port of Embarkation",
            GroupKey::IsAlone => "Traveling Alone",
        }
    }

    /// Sort key and label of the record's category, or `None` when the record is
    /// left out of this table.
    fn category(self, record: &EngineeredRecord) -> Option<(CategoryOrder, String)> {
        match self {
            GroupKey::Sex => Some((CategoryOrder::Text(record.sex.clone()), record.sex.clone())),
            GroupKey::Class => Some((
                CategoryOrder::Rank(u32::from(record.pclass)),
                format!("Class {}", record.pclass),
            )),
            GroupKey::AgeBucket => Some((
                CategoryOrder::Rank(record.age_bucket as u32),
                record.age_bucket.label().to_string(),
            )),
            GroupKey::FamilySize => (record.family_size <= MAX_REPORTED_FAMILY_SIZE).then(|| {
                (
                    CategoryOrder::Rank(record.family_size),
                    format!("Size {}", record.family_size),
                )
            }),
            GroupKey::Embarked => Some((
                CategoryOrder::Text(record.embarked.clone()),
                port_label(&record.embarked),
            )),
            GroupKey::IsAlone => Some(if record.is_alone {
                (CategoryOrder::Rank(1), "Alone".to_string())
            } else {
                (CategoryOrder::Rank(0), "With Family".to_string())
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CategoryOrder {
    Rank(u32),
    Text(String),
}

/// Survival within one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRate {
    pub label: String,
    pub count: usize,
    pub survivors: usize,
    /// Mean outcome, in [0, 1]
    pub rate: f64,
}

/// Survival rates for every observed category of one grouping factor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRateTable {
    pub name: String,
    pub rates: Vec<GroupRate>,
}

impl GroupRateTable {
    /// Rate for a category label
    pub fn rate(&self, label: &str) -> Option<f64> {
        self.rates.iter().find(|r| r.label == label).map(|r| r.rate)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rates.iter().map(|r| r.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Mean survival per category of `key`.
pub fn group_rates(records: &[EngineeredRecord], key: GroupKey) -> GroupRateTable {
    let mut groups: BTreeMap<CategoryOrder, (String, usize, usize)> = BTreeMap::new();

    for record in records {
        if let Some((order, label)) = key.category(record) {
            let entry = groups.entry(order).or_insert((label, 0, 0));
            entry.1 += 1;
            if record.survived {
                entry.2 += 1;
            }
        }
    }

    let rates = groups
        .into_values()
        .map(|(label, count, survivors)| GroupRate {
            label,
            count,
            survivors,
            rate: survivors as f64 / count as f64,
        })
        .collect();

    GroupRateTable {
        name: key.title().to_string(),
        rates,
    }
}

/// All [`GroupKey::STANDARD`] tables, in order.
pub fn standard_group_rates(records: &[EngineeredRecord]) -> Vec<GroupRateTable> {
    GroupKey::STANDARD
        .iter()
        .map(|&key| group_rates(records, key))
        .collect()
}

/// Full port name for an embarkation code
pub fn port_label(code: &str) -> String {
    match code {
        "C" => "Cherbourg (C)".to_string(),
        "Q" => "Queenstown (Q)".to_string(),
        "S" => "Southampton (S)".to_string(),
        other => other.to_string(),
    }
}
