use crate::domain::literal::closed_enum;
use serde::Serialize;

closed_enum! {
    /// `jenis_kelamin` bucket key.
    pub enum Sex {
        Male => "LAKI-LAKI",
        Female => "PEREMPUAN",
    }
}

closed_enum! {
    /// `kelompok_umur` bucket key. The buckets are published exactly like
    /// this, gaps and the `≥` glyph included.
    pub enum AgeGroup {
        Toddler => "0-5",
        School => "6-18",
        YoungAdult => "19-30",
        Adult => "31-45",
        MiddleAged => "46-59",
        Senior => "≥ 60",
    }
}

/// Longitude-first position used by the case aggregates (`{"lon", "lat"}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeltaCounts {
    #[serde(rename = "positif")]
    pub new_positive: f64,
    #[serde(rename = "sembuh")]
    pub new_recovered: f64,
    #[serde(rename = "meninggal")]
    pub new_deceased: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SexBucket {
    pub key: Sex,
    pub doc_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeValue {
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBucket {
    pub key: AgeGroup,
    pub doc_count: i64,
    #[serde(rename = "usia")]
    pub age_value: AgeValue,
}

/// Epidemiological summary for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListDatum {
    pub key: String,
    pub doc_count: i64,
    #[serde(rename = "jumlah_kasus")]
    pub case_count: i64,
    #[serde(rename = "jumlah_sembuh")]
    pub recovered_count: i64,
    #[serde(rename = "jumlah_meninggal")]
    pub death_count: i64,
    #[serde(rename = "jumlah_dirawat")]
    pub active_count: i64,
    #[serde(rename = "jenis_kelamin")]
    pub by_sex: Vec<SexBucket>,
    #[serde(rename = "kelompok_umur")]
    pub by_age_group: Vec<AgeBucket>,
    #[serde(rename = "lokasi")]
    pub location: GeoPoint,
    #[serde(rename = "penambahan")]
    pub delta: DeltaCounts,
}

impl ListDatum {
    pub fn sex_count(&self, sex: Sex) -> i64 {
        self.by_sex
            .iter()
            .filter(|b| b.key == sex)
            .fold(0, |acc: i64, b| acc.saturating_add(b.doc_count))
    }

    pub fn age_group_count(&self, group: AgeGroup) -> i64 {
        self.by_age_group
            .iter()
            .filter(|b| b.key == group)
            .fold(0, |acc: i64, b| acc.saturating_add(b.doc_count))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovidSnapshot {
    pub last_date: String,
    #[serde(rename = "current_data")]
    pub current_data_count: i64,
    #[serde(rename = "missing_data")]
    pub missing_data_count: i64,
    #[serde(rename = "tanpa_provinsi")]
    pub unassigned_province_count: i64,
    #[serde(rename = "list_data")]
    pub by_region: Vec<ListDatum>,
}

/// National sums over every region of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CaseTotals {
    pub cases: i64,
    pub recovered: i64,
    pub deaths: i64,
    pub active: i64,
}

impl CaseTotals {
    fn add(&mut self, datum: &ListDatum) {
        self.cases = self.cases.saturating_add(datum.case_count);
        self.recovered = self.recovered.saturating_add(datum.recovered_count);
        self.deaths = self.deaths.saturating_add(datum.death_count);
        self.active = self.active.saturating_add(datum.active_count);
    }
}

impl CovidSnapshot {
    pub fn totals(&self) -> CaseTotals {
        let mut totals = CaseTotals::default();
        for datum in &self.by_region {
            totals.add(datum);
        }
        totals
    }

    pub fn region(&self, key: &str) -> Option<&ListDatum> {
        self.by_region.iter().find(|d| d.key == key)
    }
}
