//! Tabular views and per-province aggregates derived from validated datasets.

use crate::domain::covid::CovidSnapshot;
use crate::domain::facility::{HospitalRecord, LabRecord};
use crate::domain::geo::GeoDocument;
use crate::domain::literal::Literal;
use crate::domain::model::{Dataset, DatasetSummary};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Province labels differ in case and padding between feeds
/// ("DKI Jakarta" vs "DKI JAKARTA").
pub fn province_key(name: &str) -> String {
    name.trim().to_uppercase()
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("failed to flush CSV buffer: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

fn opt(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

pub fn hospital_table(records: &[HospitalRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "nama", "kode_rs", "tempat_tidur", "telepon", "lat", "lon", "alamat", "tipe", "wilayah",
    ])?;

    for r in records {
        let (lat, lon) = match r.location {
            Some(c) => (c.latitude.to_string(), c.longitude.to_string()),
            None => (String::new(), String::new()),
        };
        wtr.write_record([
            r.name.as_str(),
            r.facility_code.as_str(),
            r.bed_count.to_string().as_str(),
            opt(r.phone.as_deref()),
            lat.as_str(),
            lon.as_str(),
            opt(r.address.as_deref()),
            r.facility_tier.map(|t| t.as_literal()).unwrap_or(""),
            r.region.as_str(),
        ])?;
    }

    finish(wtr)
}

pub fn lab_table(records: &[LabRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["nama_lab", "lat", "lon", "alamat", "kontak_phone", "provinsi"])?;

    for r in records {
        wtr.write_record([
            r.lab_name.as_str(),
            r.latitude.as_str(),
            r.longitude.as_str(),
            r.address.as_str(),
            opt(r.contact_phone.as_option().map(String::as_str)),
            opt(r.province.as_option().map(String::as_str)),
        ])?;
    }

    finish(wtr)
}

pub fn province_table(doc: &GeoDocument) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "province_id",
        "name",
        "slug",
        "jumlah_kasus",
        "jumlah_sembuh",
        "jumlah_meninggal",
        "jumlah_dirawat",
        "hospital_count",
        "lab_count",
        "polygons",
    ])?;

    for f in &doc.features {
        let p = &f.properties;
        wtr.write_record([
            p.province_id.to_string(),
            p.name.clone(),
            p.slug.clone(),
            p.stats.case_count.to_string(),
            p.stats.recovered_count.to_string(),
            p.stats.death_count.to_string(),
            p.stats.active_count.to_string(),
            p.hospital_count.to_string(),
            p.lab_count.to_string(),
            f.geometry.polygon_count().to_string(),
        ])?;
    }

    finish(wtr)
}

pub fn region_table(snapshot: &CovidSnapshot) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "key",
        "jumlah_kasus",
        "jumlah_sembuh",
        "jumlah_meninggal",
        "jumlah_dirawat",
        "positif",
        "sembuh",
        "meninggal",
        "lon",
        "lat",
    ])?;

    for d in &snapshot.by_region {
        wtr.write_record([
            d.key.clone(),
            d.case_count.to_string(),
            d.recovered_count.to_string(),
            d.death_count.to_string(),
            d.active_count.to_string(),
            d.delta.new_positive.to_string(),
            d.delta.new_recovered.to_string(),
            d.delta.new_deceased.to_string(),
            d.location.longitude.to_string(),
            d.location.latitude.to_string(),
        ])?;
    }

    finish(wtr)
}

pub fn dataset_table(dataset: &Dataset) -> Result<String> {
    match dataset {
        Dataset::Hospitals(records) => hospital_table(records),
        Dataset::Labs(records) => lab_table(records),
        Dataset::Geo(doc) => province_table(doc),
        Dataset::Covid(snapshot) => region_table(snapshot),
    }
}

pub fn summarize(name: &str, dataset: &Dataset) -> DatasetSummary {
    let mut per_province = BTreeMap::new();
    let mut case_totals = None;

    match dataset {
        Dataset::Hospitals(records) => {
            for r in records {
                *per_province.entry(province_key(&r.region)).or_insert(0) += 1;
            }
        }
        Dataset::Labs(records) => {
            for r in records {
                if let Some(p) = r.province.as_option() {
                    *per_province.entry(province_key(p)).or_insert(0) += 1;
                }
            }
        }
        Dataset::Geo(doc) => {
            for f in &doc.features {
                let cases = per_province.entry(province_key(&f.properties.name)).or_insert(0);
                *cases = i64::saturating_add(*cases, f.properties.stats.case_count);
            }
        }
        Dataset::Covid(snapshot) => {
            for d in &snapshot.by_region {
                let cases = per_province.entry(province_key(&d.key)).or_insert(0);
                *cases = i64::saturating_add(*cases, d.case_count);
            }
            case_totals = Some(snapshot.totals());
        }
    }

    DatasetSummary {
        name: name.to_string(),
        kind: dataset.kind(),
        record_count: dataset.record_count(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        case_totals,
        per_province,
    }
}

/// Facility counts per province, keyed by [`province_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvinceIndex {
    hospitals: BTreeMap<String, i64>,
    labs: BTreeMap<String, i64>,
    unassigned_labs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountMismatch {
    pub province: String,
    pub declared_hospitals: i64,
    pub counted_hospitals: i64,
    pub declared_labs: i64,
    pub counted_labs: i64,
}

impl ProvinceIndex {
    pub fn from_facilities(hospitals: &[HospitalRecord], labs: &[LabRecord]) -> Self {
        let mut index = Self::default();

        for h in hospitals {
            *index.hospitals.entry(province_key(&h.region)).or_insert(0) += 1;
        }
        for l in labs {
            match l.province.as_option() {
                Some(p) => *index.labs.entry(province_key(p)).or_insert(0) += 1,
                None => index.unassigned_labs += 1,
            }
        }

        index
    }

    pub fn hospital_count(&self, province: &str) -> i64 {
        self.hospitals.get(&province_key(province)).copied().unwrap_or(0)
    }

    pub fn lab_count(&self, province: &str) -> i64 {
        self.labs.get(&province_key(province)).copied().unwrap_or(0)
    }

    /// Labs whose `provinsi` is `null`.
    pub fn unassigned_labs(&self) -> i64 {
        self.unassigned_labs
    }

    /// Features whose declared `hospital_count`/`lab_count` disagree with
    /// the facility feeds.
    pub fn reconcile(&self, doc: &GeoDocument) -> Vec<CountMismatch> {
        doc.features
            .iter()
            .filter_map(|f| {
                let p = &f.properties;
                let counted_hospitals = self.hospital_count(&p.name);
                let counted_labs = self.lab_count(&p.name);
                if counted_hospitals == p.hospital_count && counted_labs == p.lab_count {
                    return None;
                }
                Some(CountMismatch {
                    province: p.name.clone(),
                    declared_hospitals: p.hospital_count,
                    counted_hospitals,
                    declared_labs: p.lab_count,
                    counted_labs,
                })
            })
            .collect()
    }
}

pub fn mismatch_table(mismatches: &[CountMismatch]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for m in mismatches {
        wtr.serialize(m)?;
    }
    finish(wtr)
}
