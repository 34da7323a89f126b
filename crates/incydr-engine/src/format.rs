use crate::resolver::get_field_value_and_info;
use crate::walker::{Fields, get_fields};
use crate::Result;
use incydr_types::{Record, RenderHint, Value};

/// `(path, rendered value)` pairs for one record, see [`iter_model_formatted`].
#[derive(Debug)]
pub struct FormattedFields<'r> {
    record: &'r Record,
    fields: Fields,
    render: Option<RenderHint>,
}

impl FormattedFields<'_> {
    fn format(&self, name: String) -> Result<(String, Value)> {
        let path: Vec<&str> = name.split('.').collect();
        let (value, field) = get_field_value_and_info(self.record, &path)?;

        if let Some(hint) = self.render
            && let Some(render) = field.render_with(hint)
        {
            return Ok((name, render(value.as_ref())));
        }

        if let Some(encoder) = self.record.schema().encoder_for(value.kind()) {
            return Ok((name, encoder(value.as_ref())));
        }

        Ok((name, value.into_owned()))
    }
}

impl Iterator for FormattedFields<'_> {
    type Item = Result<(String, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.fields.next()?;
        Some(self.format(name))
    }
}

/// Iterate a record's fields (optionally flattened and filtered by `include`)
/// as `(name, value)` pairs with rendering applied in this order:
///
/// 1. the field's transformation for the requested `render` hint, if declared
/// 2. the record schema's default encoder for the value's runtime kind
/// 3. the raw value
pub fn iter_model_formatted<'r, S: AsRef<str>>(
    record: &'r Record,
    include: &[S],
    flat: bool,
    render: Option<RenderHint>,
) -> Result<FormattedFields<'r>> {
    let fields = get_fields(record.schema(), include, flat)?;
    Ok(FormattedFields {
        record,
        fields,
        render,
    })
}
