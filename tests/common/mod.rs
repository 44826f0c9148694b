#![allow(dead_code)]

use serde_json::{json, Value};

pub fn hospital() -> Value {
    json!({
        "nama": "RSUD Dr. Soetomo",
        "kode_rs": "3578015",
        "tempat_tidur": 1514,
        "telepon": "(031) 5501078",
        "lokasi": { "lat": -7.2684, "lon": 112.7583 },
        "alamat": "Jl. Mayjen Prof. Dr. Moestopo No. 6-8",
        "tipe": "RS_RUJUKAN_PROVINSI",
        "wilayah": "JAWA TIMUR"
    })
}

pub fn hospitals() -> Value {
    json!([
        hospital(),
        {
            "nama": "RS Sanglah",
            "kode_rs": "5171014",
            "tempat_tidur": 713,
            "wilayah": "BALI"
        },
        {
            "nama": "RSUD Wangaya",
            "kode_rs": "5171021",
            "tempat_tidur": 229,
            "tipe": "",
            "wilayah": "Bali"
        }
    ])
}

pub fn lab() -> Value {
    json!({
        "nama_lab": "Lab Kesehatan Daerah Bali",
        "lat": "-8.6705",
        "lon": "115.2126",
        "alamat": "Jl. Angsoka No. 12, Denpasar",
        "kontak_phone": "(0361) 227159",
        "provinsi": "BALI"
    })
}

pub fn labs() -> Value {
    json!([
        lab(),
        {
            "nama_lab": "Lab Mobile BSL-2",
            "lat": "-7.25",
            "lon": "112.75",
            "alamat": "Surabaya",
            "kontak_phone": null,
            "provinsi": null
        }
    ])
}

pub fn list_datum(key: &str, cases: i64) -> Value {
    json!({
        "key": key,
        "doc_count": cases,
        "jumlah_kasus": cases,
        "jumlah_sembuh": cases / 2,
        "jumlah_meninggal": cases / 10,
        "jumlah_dirawat": cases - cases / 2 - cases / 10,
        "jenis_kelamin": [
            { "key": "LAKI-LAKI", "doc_count": cases / 2 },
            { "key": "PEREMPUAN", "doc_count": cases - cases / 2 }
        ],
        "kelompok_umur": [
            { "key": "0-5", "doc_count": 1, "usia": { "value": 1 } },
            { "key": "6-18", "doc_count": 2, "usia": { "value": 2 } },
            { "key": "19-30", "doc_count": 3, "usia": { "value": 3 } },
            { "key": "31-45", "doc_count": 4, "usia": { "value": 4 } },
            { "key": "46-59", "doc_count": 5, "usia": { "value": 5 } },
            { "key": "≥ 60", "doc_count": 6, "usia": { "value": 6 } }
        ],
        "lokasi": { "lon": 115.2, "lat": -8.65 },
        "penambahan": { "positif": 12, "sembuh": 4, "meninggal": 1 }
    })
}

pub fn covid_snapshot() -> Value {
    json!({
        "last_date": "2020-07-15",
        "current_data": 78572,
        "missing_data": 12,
        "tanpa_provinsi": 3,
        "list_data": [list_datum("JAWA TIMUR", 17000), list_datum("BALI", 2100)]
    })
}

pub fn feature(name: &str, hospital_count: i64, lab_count: i64) -> Value {
    let mut properties = list_datum(&name.to_uppercase(), 2100);
    let extra = json!({
        "cartodb_id": 1,
        "id_1": 2,
        "province_id": 51,
        "name": name,
        "country": "Indonesia",
        "slug": name.to_lowercase().replace(' ', "-"),
        "state": name,
        "sample_value": 0.5,
        "hospital_count": hospital_count,
        "lab_count": lab_count
    });
    for (k, v) in extra.as_object().unwrap() {
        properties[k] = v.clone();
    }

    json!({
        "type": "Feature",
        "properties": properties,
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": [[[
                [115.1, -8.1], [115.7, -8.3], [115.5, -8.8], [115.1, -8.1]
            ]]]
        }
    })
}

pub fn geo_document() -> Value {
    json!({
        "type": "FeatureCollection",
        "name": "indonesia-province",
        "crs": {
            "type": "name",
            "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" }
        },
        "features": [feature("Bali", 2, 1), feature("Jawa Timur", 1, 0)]
    })
}
