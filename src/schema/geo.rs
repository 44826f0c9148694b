use crate::domain::geo::{
    Country, CrsInfo, CrsProperties, Feature, FeatureProperties, GeoDocument, Geometry,
    MultiPolygonCoordinates, Position,
};
use crate::schema::covid::list_datum_from;
use crate::schema::error::{ValidationError, ValidationReason};
use crate::schema::reader::{index_path, ObjectReader, SchemaResult};
use serde_json::Value;

const FEATURE_TAG: &str = "Feature";
const GEOMETRY_TAG: &str = "MultiPolygon";
const COORDINATE_DEPTH: usize = 4;

/// One array level of the coordinate tree. `depth` counts from 1 at the
/// outermost array.
fn level<'a>(value: &'a Value, path: &str, depth: usize) -> SchemaResult<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Number(_) => Err(ValidationError::wrong_depth(
            path,
            format!(
                "found a number at depth {}, coordinates must nest exactly {} levels",
                depth, COORDINATE_DEPTH
            ),
        )),
        other => Err(ValidationError::wrong_type(path, "array", other)),
    }
}

fn position(value: &Value, path: &str) -> SchemaResult<Position> {
    let ordinates = level(value, path, COORDINATE_DEPTH)?;
    let mut out = Vec::with_capacity(ordinates.len());

    for (i, ordinate) in ordinates.iter().enumerate() {
        let ordinate_path = index_path(path, i);
        match ordinate {
            Value::Number(n) => out.push(
                n.as_f64()
                    .ok_or_else(|| ValidationError::wrong_type(&ordinate_path, "number", ordinate))?,
            ),
            Value::Array(_) => {
                return Err(ValidationError::wrong_depth(
                    ordinate_path,
                    format!(
                        "found an array at depth {}, coordinates must nest exactly {} levels",
                        COORDINATE_DEPTH + 1,
                        COORDINATE_DEPTH
                    ),
                ))
            }
            other => return Err(ValidationError::wrong_type(ordinate_path, "number", other)),
        }
    }

    if out.len() < 2 {
        return Err(ValidationError::new(
            path,
            ValidationReason::WrongType,
            format!("position needs at least 2 ordinates, found {}", out.len()),
        ));
    }

    Ok(out)
}

fn ring(value: &Value, path: &str) -> SchemaResult<Vec<Position>> {
    level(value, path, 3)?
        .iter()
        .enumerate()
        .map(|(i, pos)| position(pos, &index_path(path, i)))
        .collect()
}

fn polygon(value: &Value, path: &str) -> SchemaResult<Vec<Vec<Position>>> {
    level(value, path, 2)?
        .iter()
        .enumerate()
        .map(|(i, r)| ring(r, &index_path(path, i)))
        .collect()
}

fn multipolygon(value: &Value, path: &str) -> SchemaResult<MultiPolygonCoordinates> {
    level(value, path, 1)?
        .iter()
        .enumerate()
        .map(|(i, p)| polygon(p, &index_path(path, i)))
        .collect()
}

fn geometry(r: ObjectReader<'_>) -> SchemaResult<Geometry> {
    r.tag("type", GEOMETRY_TAG)?;
    Ok(Geometry {
        coordinates: multipolygon(r.required("coordinates")?, &r.path_of("coordinates"))?,
    })
}

fn properties(r: ObjectReader<'_>) -> SchemaResult<FeatureProperties> {
    Ok(FeatureProperties {
        stats: list_datum_from(&r)?,
        cartodb_id: r.signed("cartodb_id")?,
        row_id: r.signed("id_1")?,
        province_id: r.signed("province_id")?,
        name: r.string("name")?,
        country: r.constant::<Country>("country")?,
        slug: r.string("slug")?,
        state: r.string("state")?,
        sample_value: r.number("sample_value")?,
        hospital_count: r.signed("hospital_count")?,
        lab_count: r.signed("lab_count")?,
    })
}

fn feature(raw: &Value, path: &str) -> SchemaResult<Feature> {
    let r = ObjectReader::new(raw, path)?;
    r.tag("type", FEATURE_TAG)?;

    Ok(Feature {
        properties: properties(r.object("properties")?)?,
        geometry: geometry(r.object("geometry")?)?,
    })
}

pub(crate) fn document_at(raw: &Value, path: &str) -> SchemaResult<GeoDocument> {
    let r = ObjectReader::new(raw, path)?;
    let crs = r.object("crs")?;

    Ok(GeoDocument {
        kind: r.string("type")?,
        name: r.string("name")?,
        coordinate_reference_system: CrsInfo {
            kind: crs.string("type")?,
            properties: CrsProperties {
                name: crs.object("properties")?.string("name")?,
            },
        },
        features: r.array("features", feature)?,
    })
}
