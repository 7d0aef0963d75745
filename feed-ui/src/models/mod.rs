mod input_fields;

pub use input_fields::{DEFAULT_SPECIES, FieldName, InputError, InputFields};
