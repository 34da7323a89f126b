//! CSV-shaped reading and writing of records and raw mappings.
//!
//! The empty cell is the text form of an absent value in both directions.
//! Every function takes either an open stream or a path; files opened from a
//! path are owned by the returned reader (or the write call) and closed when
//! it is dropped.

mod reader;
mod writer;

pub use reader::{
    DictRows, ModelRows, read_dict_from_csv, read_dict_from_path, read_models_from_csv,
    read_models_from_path,
};
pub use writer::{
    flatten_mapping, parse_columns, write_dict_to_csv, write_dict_to_path, write_models_to_csv,
    write_models_to_path,
};
