//! Passenger records and the engineered features derived from them

use serde::{Deserialize, Serialize};

/// One row of the passenger file, as loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub passenger_id: i64,
    pub survived: bool,
    /// Ticket class, 1 to 3
    pub pclass: u8,
    pub sex: String,
    pub age: Option<f64>,
    /// Siblings/spouses aboard
    pub sibsp: u32,
    /// Parents/children aboard
    pub parch: u32,
    pub fare: Option<f64>,
    pub embarked: Option<String>,
    pub name: String,
}

/// Fixed-edge age bucket: edges 0/12/18/35/60/100, lower edge inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    Child,
    Teen,
    Adult,
    MiddleAge,
    Senior,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Child,
        AgeBucket::Teen,
        AgeBucket::Adult,
        AgeBucket::MiddleAge,
        AgeBucket::Senior,
    ];

    /// Assign an age to its bucket. Total over all inputs: anything below 12
    /// (including negatives) is a child, anything from 60 up is a senior.
    pub fn from_age(age: f64) -> Self {
        if age < 12.0 {
            AgeBucket::Child
        } else if age < 18.0 {
            AgeBucket::Teen
        } else if age < 35.0 {
            AgeBucket::Adult
        } else if age < 60.0 {
            AgeBucket::MiddleAge
        } else {
            AgeBucket::Senior
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::Child => "Child",
            AgeBucket::Teen => "Teen",
            AgeBucket::Adult => "Adult",
            AgeBucket::MiddleAge => "MiddleAge",
            AgeBucket::Senior => "Senior",
        }
    }
}

/// Quartile fare bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FareBucket {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl FareBucket {
    pub const ALL: [FareBucket; 4] = [
        FareBucket::Low,
        FareBucket::Medium,
        FareBucket::High,
        FareBucket::VeryHigh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FareBucket::Low => "Low",
            FareBucket::Medium => "Medium",
            FareBucket::High => "High",
            FareBucket::VeryHigh => "VeryHigh",
        }
    }
}

/// A passenger after missing-value filling and feature engineering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredRecord {
    pub passenger_id: i64,
    pub survived: bool,
    pub pclass: u8,
    pub sex: String,
    pub age: f64,
    pub sibsp: u32,
    pub parch: u32,
    pub fare: f64,
    pub embarked: String,
    pub name: String,
    pub family_size: u32,
    pub is_alone: bool,
    pub age_bucket: AgeBucket,
    pub fare_bucket: FareBucket,
    pub title: String,
}

impl EngineeredRecord {
    /// Outcome as 0.0/1.0
    pub fn outcome(&self) -> f64 {
        if self.survived {
            1.0
        } else {
            0.0
        }
    }
}

/// Features fed to the importance and correlation estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Pclass,
    Sex,
    Age,
    SibSp,
    Parch,
    Fare,
    Embarked,
    FamilySize,
    IsAlone,
    AgeGroup,
    FareGroup,
    Title,
}

/// Feature order used by the importance estimator (and for its tie-breaks).
pub const FEATURES: [Feature; 12] = [
    Feature::Pclass,
    Feature::Sex,
    Feature::Age,
    Feature::SibSp,
    Feature::Parch,
    Feature::Fare,
    Feature::Embarked,
    Feature::FamilySize,
    Feature::IsAlone,
    Feature::AgeGroup,
    Feature::FareGroup,
    Feature::Title,
];

/// Column order used by the correlation estimator: numeric columns, then the
/// encoded categorical ones.
pub const CORRELATION_FEATURES: [Feature; 12] = [
    Feature::Pclass,
    Feature::Age,
    Feature::SibSp,
    Feature::Parch,
    Feature::Fare,
    Feature::FamilySize,
    Feature::IsAlone,
    Feature::Sex,
    Feature::Embarked,
    Feature::AgeGroup,
    Feature::FareGroup,
    Feature::Title,
];

impl Feature {
    /// Column name of the feature
    pub fn name(self) -> &'static str {
        match self {
            Feature::Pclass => "Pclass",
            Feature::Sex => "Sex",
            Feature::Age => "Age",
            Feature::SibSp => "SibSp",
            Feature::Parch => "Parch",
            Feature::Fare => "Fare",
            Feature::Embarked => "Embarked",
            Feature::FamilySize => "FamilySize",
            Feature::IsAlone => "IsAlone",
            Feature::AgeGroup => "AgeGroup",
            Feature::FareGroup => "FareGroup",
            Feature::Title => "Title",
        }
    }

    pub fn is_categorical(self) -> bool {
        matches!(
            self,
            Feature::Sex
                | Feature::Embarked
                | Feature::AgeGroup
                | Feature::FareGroup
                | Feature::Title
        )
    }

    /// Numeric value of a non-categorical feature; `None` for categorical ones.
    pub fn numeric_value(self, record: &EngineeredRecord) -> Option<f64> {
        match self {
            Feature::Pclass => Some(f64::from(record.pclass)),
            Feature::Age => Some(record.age),
            Feature::SibSp => Some(f64::from(record.sibsp)),
            Feature::Parch => Some(f64::from(record.parch)),
            Feature::Fare => Some(record.fare),
            Feature::FamilySize => Some(f64::from(record.family_size)),
            Feature::IsAlone => Some(if record.is_alone { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// String value of a categorical feature; `None` for numeric ones.
    pub fn category_value(self, record: &EngineeredRecord) -> Option<&str> {
        match self {
            Feature::Sex => Some(record.sex.as_str()),
            Feature::Embarked => Some(record.embarked.as_str()),
            Feature::AgeGroup => Some(record.age_bucket.label()),
            Feature::FareGroup => Some(record.fare_bucket.label()),
            Feature::Title => Some(record.title.as_str()),
            _ => None,
        }
    }
}

/// Human-friendly name for a feature column. Unknown names pass through unchanged.
pub fn display_name(feature: &str) -> &str {
    match feature {
        "Sex" => "Gender",
        "Pclass" => "Passenger Class",
        "Fare" => "Ticket Fare",
        "Age" => "Age",
        "FamilySize" => "Family Size",
        "Title" => "Social Title",
        "Embarked" => "Port of Embarkation",
        "IsAlone" => "Traveling Alone",
        "FareGroup" => "Fare Category",
        "AgeGroup" => "Age Category",
        "SibSp" => "Siblings/Spouses",
        "Parch" => "Parents/Children",
        other => other,
    }
}
