//! Structural validation of the raw dashboard documents.
//!
//! Every entry point takes an already-decoded `serde_json::Value`, walks it
//! once, and returns either the typed record or the first
//! [`ValidationError`] found. No partial records are produced and no state
//! is kept between calls.

pub mod error;

mod covid;
mod facility;
mod geo;
mod reader;

use crate::domain::covid::CovidSnapshot;
use crate::domain::facility::{HospitalRecord, LabRecord};
use crate::domain::geo::GeoDocument;
use crate::domain::model::{Dataset, DatasetKind};
use serde_json::Value;

pub use error::{ValidationError, ValidationReason};

const ROOT: &str = "$";

pub fn parse_hospital_record(raw: &Value) -> Result<HospitalRecord, ValidationError> {
    facility::hospital_at(raw, ROOT)
}

pub fn parse_lab_record(raw: &Value) -> Result<LabRecord, ValidationError> {
    facility::lab_at(raw, ROOT)
}

pub fn parse_geo_document(raw: &Value) -> Result<GeoDocument, ValidationError> {
    geo::document_at(raw, ROOT)
}

pub fn parse_covid_snapshot(raw: &Value) -> Result<CovidSnapshot, ValidationError> {
    covid::snapshot_at(raw, ROOT)
}

/// A JSON array of hospital records, as the facility feed publishes them.
pub fn parse_hospital_records(raw: &Value) -> Result<Vec<HospitalRecord>, ValidationError> {
    reader::parse_each(raw, ROOT, facility::hospital_at)
}

pub fn parse_lab_records(raw: &Value) -> Result<Vec<LabRecord>, ValidationError> {
    reader::parse_each(raw, ROOT, facility::lab_at)
}

/// Validates a whole source document of the given kind.
pub fn parse_dataset(kind: DatasetKind, raw: &Value) -> Result<Dataset, ValidationError> {
    match kind {
        DatasetKind::Hospital => parse_hospital_records(raw).map(Dataset::Hospitals),
        DatasetKind::Lab => parse_lab_records(raw).map(Dataset::Labs),
        DatasetKind::Geo => parse_geo_document(raw).map(Dataset::Geo),
        DatasetKind::Covid => parse_covid_snapshot(raw).map(Dataset::Covid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_lists_prefix_index() {
        let raw = json!([
            { "nama": "A", "kode_rs": "1", "tempat_tidur": 10, "wilayah": "BALI" },
            { "nama": "B", "kode_rs": "2", "tempat_tidur": 10, "wilayah": "BALI", "tipe": "KLINIK" }
        ]);

        let err = parse_hospital_records(&raw).unwrap_err();
        assert_eq!(err.path, "$[1].tipe");
        assert_eq!(err.reason, ValidationReason::NotInEnumeration);
    }

    #[test]
    fn test_root_must_match_kind() {
        let err = parse_dataset(DatasetKind::Hospital, &json!({})).unwrap_err();
        assert_eq!(err.path, "$");
        assert_eq!(err.reason, ValidationReason::WrongType);

        let err = parse_dataset(DatasetKind::Covid, &json!([])).unwrap_err();
        assert_eq!(err.reason, ValidationReason::WrongType);
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let dataset = parse_dataset(DatasetKind::Lab, &json!([])).unwrap();
        assert_eq!(dataset.record_count(), 0);
    }
}
