use crate::domain::facility::{Coordinate, FacilityTier, HospitalRecord, LabRecord};
use crate::schema::reader::{ObjectReader, SchemaResult};
use serde_json::Value;

fn coordinate(reader: ObjectReader<'_>) -> SchemaResult<Coordinate> {
    Ok(Coordinate {
        latitude: reader.number("lat")?,
        longitude: reader.number("lon")?,
    })
}

pub(crate) fn hospital_at(raw: &Value, path: &str) -> SchemaResult<HospitalRecord> {
    let r = ObjectReader::new(raw, path)?;

    Ok(HospitalRecord {
        name: r.string("nama")?,
        facility_code: r.string("kode_rs")?,
        bed_count: r.signed("tempat_tidur")?,
        phone: r.optional_string("telepon")?,
        location: r.optional_object("lokasi")?.map(coordinate).transpose()?,
        address: r.optional_string("alamat")?,
        facility_tier: r.optional_literal::<FacilityTier>("tipe")?,
        region: r.string("wilayah")?,
    })
}

pub(crate) fn lab_at(raw: &Value, path: &str) -> SchemaResult<LabRecord> {
    let r = ObjectReader::new(raw, path)?;

    Ok(LabRecord {
        lab_name: r.string("nama_lab")?,
        latitude: r.string("lat")?,
        longitude: r.string("lon")?,
        address: r.string("alamat")?,
        contact_phone: r.nullable_string("kontak_phone")?,
        province: r.nullable_string("provinsi")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Nullable;
    use crate::schema::error::ValidationReason;
    use serde_json::json;

    fn hospital() -> Value {
        json!({
            "nama": "RSUP Persahabatan",
            "kode_rs": "3175063",
            "tempat_tidur": 565,
            "telepon": "(021) 4891708",
            "lokasi": { "lat": -6.2035, "lon": 106.8846 },
            "alamat": "Jl. Persahabatan Raya No.1",
            "tipe": "RS_RUJUKAN_NASIONAL",
            "wilayah": "DKI JAKARTA"
        })
    }

    #[test]
    fn test_full_hospital() {
        let record = hospital_at(&hospital(), "$").unwrap();

        assert_eq!(record.name, "RSUP Persahabatan");
        assert_eq!(record.bed_count, 565);
        assert_eq!(record.facility_tier, Some(FacilityTier::NationalReferral));
        let location = record.location.unwrap();
        assert_eq!(location.latitude, -6.2035);
        assert_eq!(location.longitude, 106.8846);
    }

    #[test]
    fn test_empty_tier_is_a_member() {
        let mut raw = hospital();
        raw["tipe"] = json!("");

        let record = hospital_at(&raw, "$").unwrap();
        assert_eq!(record.facility_tier, Some(FacilityTier::Unspecified));
    }

    #[test]
    fn test_each_required_hospital_key() {
        for key in ["nama", "kode_rs", "tempat_tidur", "wilayah"] {
            let mut raw = hospital();
            raw.as_object_mut().unwrap().remove(key);

            let err = hospital_at(&raw, "$").unwrap_err();
            assert_eq!(err.reason, ValidationReason::Missing, "key {}", key);
            assert_eq!(err.path, format!("$.{}", key));
        }
    }

    #[test]
    fn test_bad_location_reports_nested_path() {
        let mut raw = hospital();
        raw["lokasi"] = json!({ "lat": "-6.2", "lon": 106.8 });

        let err = hospital_at(&raw, "$").unwrap_err();
        assert_eq!(err.path, "$.lokasi.lat");
        assert_eq!(err.reason, ValidationReason::WrongType);
    }

    #[test]
    fn test_lab_nullable_keys() {
        let raw = json!({
            "nama_lab": "Lab Kesehatan Daerah",
            "lat": "-6.17",
            "lon": "106.83",
            "alamat": "Jl. Rawasari",
            "kontak_phone": "021-123",
            "provinsi": null
        });

        let lab = lab_at(&raw, "$").unwrap();
        assert_eq!(lab.contact_phone, Nullable::Value("021-123".to_string()));
        assert!(lab.province.is_null());
    }

    #[test]
    fn test_lab_coordinates_must_be_text() {
        let raw = json!({
            "nama_lab": "Lab",
            "lat": -6.17,
            "lon": "106.83",
            "alamat": "Jl.",
            "kontak_phone": null,
            "provinsi": null
        });

        let err = lab_at(&raw, "$").unwrap_err();
        assert_eq!(err.path, "$.lat");
        assert_eq!(err.reason, ValidationReason::WrongType);
    }
}
