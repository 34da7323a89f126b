// Engine - schema walking, field resolution, formatted iteration and the
// tabular codec. Sits between the schema tables (types) and the resource
// models / CLI presentation.

pub mod error;
pub mod format;
pub mod resolver;
pub mod tabular;
pub mod walker;

pub use error::{Error, Result};
pub use format::{FormattedFields, iter_model_formatted};
pub use resolver::{get_field_value_and_info, resolve};
pub use tabular::{
    DictRows, ModelRows, flatten_mapping, parse_columns, read_dict_from_csv, read_dict_from_path,
    read_models_from_csv, read_models_from_path, write_dict_to_csv, write_dict_to_path,
    write_models_to_csv, write_models_to_path,
};
pub use walker::{Fields, FlattenFields, WILDCARD, flatten_fields, get_fields};
