use crate::domain::covid::{CaseTotals, CovidSnapshot};
use crate::domain::facility::{HospitalRecord, LabRecord};
use crate::domain::geo::GeoDocument;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A key that is always present in the source object but whose value may be
/// `null`. Unlike `Option` fields, it is never skipped on output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Nullable<T> {
    #[default]
    Null,
    Value(T),
}

impl<T> Nullable<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Nullable::Null => None,
            Nullable::Value(v) => Some(v),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Null => None,
            Nullable::Value(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Nullable::Value(v),
            None => Nullable::Null,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Null => serializer.serialize_none(),
            Nullable::Value(v) => serializer.serialize_some(v),
        }
    }
}

/// Which of the four source documents a pipeline handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Hospital,
    Lab,
    Geo,
    Covid,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Hospital => "hospital",
            DatasetKind::Lab => "lab",
            DatasetKind::Geo => "geo",
            DatasetKind::Covid => "covid",
        }
    }

    /// Default output stem when a run is not given an explicit name.
    pub fn default_name(&self) -> &'static str {
        match self {
            DatasetKind::Hospital => "hospitals",
            DatasetKind::Lab => "labs",
            DatasetKind::Geo => "provinces",
            DatasetKind::Covid => "covid",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hospital" | "hospitals" => Ok(DatasetKind::Hospital),
            "lab" | "labs" => Ok(DatasetKind::Lab),
            "geo" | "geojson" => Ok(DatasetKind::Geo),
            "covid" => Ok(DatasetKind::Covid),
            other => Err(format!(
                "unknown dataset kind '{}' (expected hospital, lab, geo or covid)",
                other
            )),
        }
    }
}

/// A fully validated source document.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Hospitals(Vec<HospitalRecord>),
    Labs(Vec<LabRecord>),
    Geo(GeoDocument),
    Covid(CovidSnapshot),
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Hospitals(_) => DatasetKind::Hospital,
            Dataset::Labs(_) => DatasetKind::Lab,
            Dataset::Geo(_) => DatasetKind::Geo,
            Dataset::Covid(_) => DatasetKind::Covid,
        }
    }

    /// Hospitals, labs, features or regions, depending on the kind.
    pub fn record_count(&self) -> usize {
        match self {
            Dataset::Hospitals(records) => records.len(),
            Dataset::Labs(records) => records.len(),
            Dataset::Geo(doc) => doc.features.len(),
            Dataset::Covid(snapshot) => snapshot.by_region.len(),
        }
    }

    /// The source-shaped JSON form of the dataset.
    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Dataset::Hospitals(records) => serde_json::to_value(records),
            Dataset::Labs(records) => serde_json::to_value(records),
            Dataset::Geo(doc) => serde_json::to_value(doc),
            Dataset::Covid(snapshot) => serde_json::to_value(snapshot),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub kind: DatasetKind,
    pub record_count: usize,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_totals: Option<CaseTotals>,
    /// Records (or cases, for covid/geo) per province label.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub per_province: BTreeMap<String, i64>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub name: String,
    pub dataset: Dataset,
    pub json_output: String,
    pub csv_output: String,
    pub summary: DatasetSummary,
}

/// What a finished run hands back to its caller.
#[derive(Debug, Clone)]
pub struct EtlOutcome {
    pub output_path: String,
    pub dataset: Dataset,
    pub summary: DatasetSummary,
}
