#![allow(dead_code)]

use incydr_types::{FieldDef, Record, Schema};
use once_cell::sync::Lazy;
use serde_json::json;

pub static LABEL: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Label",
        vec![FieldDef::string("key"), FieldDef::string("value")],
    )
});

pub static ITEM: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Item",
        vec![
            FieldDef::string("id").required(),
            FieldDef::string("name").alias("displayName"),
            FieldDef::integer("size").required(),
            FieldDef::boolean("active"),
            FieldDef::string_list("tags"),
            FieldDef::nested("label", &LABEL),
        ],
    )
});

pub fn item(id: &str, name: &str, size: i64) -> Record {
    Record::from_json(&ITEM, &json!({"id": id, "displayName": name, "size": size})).unwrap()
}
