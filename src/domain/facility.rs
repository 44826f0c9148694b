use crate::domain::literal::closed_enum;
use crate::domain::model::Nullable;
use serde::Serialize;

closed_enum! {
    /// Hospital classification carried in the `tipe` field.
    pub enum FacilityTier {
        /// Present but left blank by the source.
        Unspecified => "",
        GeneralHospital => "RS",
        NationalReferral => "RS_RUJUKAN_NASIONAL",
        ProvincialReferral => "RS_RUJUKAN_PROVINSI",
    }
}

impl FacilityTier {
    pub fn is_referral(&self) -> bool {
        matches!(self, Self::NationalReferral | Self::ProvincialReferral)
    }
}

/// Latitude-first position used by hospital records (`{"lat", "lon"}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalRecord {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "kode_rs")]
    pub facility_code: String,
    #[serde(rename = "tempat_tidur")]
    pub bed_count: i64,
    #[serde(rename = "telepon", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "lokasi", skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "tipe", skip_serializing_if = "Option::is_none")]
    pub facility_tier: Option<FacilityTier>,
    #[serde(rename = "wilayah")]
    pub region: String,
}

/// Testing laboratory. Coordinates stay textual as published; the two
/// nullable keys are always emitted, with `null` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabRecord {
    #[serde(rename = "nama_lab")]
    pub lab_name: String,
    #[serde(rename = "lat")]
    pub latitude: String,
    #[serde(rename = "lon")]
    pub longitude: String,
    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "kontak_phone")]
    pub contact_phone: Nullable<String>,
    #[serde(rename = "provinsi")]
    pub province: Nullable<String>,
}
