use crate::domain::covid::{
    AgeBucket, AgeGroup, AgeValue, CovidSnapshot, DeltaCounts, GeoPoint, ListDatum, Sex, SexBucket,
};
use crate::schema::reader::{ObjectReader, SchemaResult};
use serde_json::Value;

fn sex_bucket(raw: &Value, path: &str) -> SchemaResult<SexBucket> {
    let r = ObjectReader::new(raw, path)?;
    Ok(SexBucket {
        key: r.literal::<Sex>("key")?,
        doc_count: r.signed("doc_count")?,
    })
}

fn age_bucket(raw: &Value, path: &str) -> SchemaResult<AgeBucket> {
    let r = ObjectReader::new(raw, path)?;
    Ok(AgeBucket {
        key: r.literal::<AgeGroup>("key")?,
        doc_count: r.signed("doc_count")?,
        age_value: AgeValue {
            value: r.object("usia")?.number("value")?,
        },
    })
}

/// Reads the case summary keys of `r`. Shared with geo feature properties,
/// which carry the same keys inline.
pub(crate) fn list_datum_from(r: &ObjectReader<'_>) -> SchemaResult<ListDatum> {
    let key = r.string("key")?;
    let doc_count = r.signed("doc_count")?;
    let case_count = r.signed("jumlah_kasus")?;
    let recovered_count = r.signed("jumlah_sembuh")?;
    let death_count = r.signed("jumlah_meninggal")?;
    let active_count = r.signed("jumlah_dirawat")?;
    let by_sex = r.array("jenis_kelamin", sex_bucket)?;
    let by_age_group = r.array("kelompok_umur", age_bucket)?;

    let location = r.object("lokasi")?;
    let location = GeoPoint {
        longitude: location.number("lon")?,
        latitude: location.number("lat")?,
    };

    let delta = r.object("penambahan")?;
    let delta = DeltaCounts {
        new_positive: delta.number("positif")?,
        new_recovered: delta.number("sembuh")?,
        new_deceased: delta.number("meninggal")?,
    };

    Ok(ListDatum {
        key,
        doc_count,
        case_count,
        recovered_count,
        death_count,
        active_count,
        by_sex,
        by_age_group,
        location,
        delta,
    })
}

fn list_datum(raw: &Value, path: &str) -> SchemaResult<ListDatum> {
    list_datum_from(&ObjectReader::new(raw, path)?)
}

pub(crate) fn snapshot_at(raw: &Value, path: &str) -> SchemaResult<CovidSnapshot> {
    let r = ObjectReader::new(raw, path)?;

    Ok(CovidSnapshot {
        last_date: r.string("last_date")?,
        current_data_count: r.signed("current_data")?,
        missing_data_count: r.signed("missing_data")?,
        unassigned_province_count: r.signed("tanpa_provinsi")?,
        by_region: r.array("list_data", list_datum)?,
    })
}
