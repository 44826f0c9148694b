use crate::domain::covid::ListDatum;
use crate::domain::literal::closed_enum;
use serde::Serialize;

closed_enum! {
    pub enum Country {
        Indonesia => "Indonesia",
    }
}

/// `[x, y]` (longitude, latitude) with any extra ordinates kept as given.
pub type Position = Vec<f64>;

/// polygon list → ring list → position list → position.
pub type MultiPolygonCoordinates = Vec<Vec<Vec<Position>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrsProperties {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrsInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "MultiPolygon")]
pub struct Geometry {
    pub coordinates: MultiPolygonCoordinates,
}

impl Geometry {
    pub fn polygon_count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn position_count(&self) -> usize {
        self.coordinates
            .iter()
            .flat_map(|polygon| polygon.iter())
            .map(|ring| ring.len())
            .sum()
    }
}

/// Province identity plus the full case summary for that province, stored
/// side by side in one `properties` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    #[serde(flatten)]
    pub stats: ListDatum,
    pub cartodb_id: i64,
    #[serde(rename = "id_1")]
    pub row_id: i64,
    pub province_id: i64,
    pub name: String,
    pub country: Country,
    pub slug: String,
    pub state: String,
    pub sample_value: f64,
    pub hospital_count: i64,
    pub lab_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(rename = "crs")]
    pub coordinate_reference_system: CrsInfo,
    pub features: Vec<Feature>,
}

impl GeoDocument {
    pub fn feature_by_name(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.properties.name == name)
    }
}
