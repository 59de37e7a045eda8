// src/row/schema.rs
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use std::sync::{Arc, OnceLock};

/// Output column names, in row order
pub const COLUMN_NAMES: [&str; 9] = [
    "traceID",
    "fieldRecordNumberID",
    "distSRG",
    "srcX",
    "srcY",
    "sampleInterval",
    "ilineID",
    "xlineID",
    "traceData",
];

pub(crate) fn sample_item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::Float64, false))
}

/// Arrow schema of one output row. Every column is required.
pub fn trace_schema() -> SchemaRef {
    static SCHEMA: OnceLock<SchemaRef> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            let mut fields: Vec<Field> = COLUMN_NAMES[..8]
                .iter()
                .map(|name| Field::new(*name, DataType::Int32, false))
                .collect();
            fields.push(Field::new(COLUMN_NAMES[8], DataType::List(sample_item_field()), false));
            Arc::new(Schema::new(fields))
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_field_order_and_types() {
        let schema = trace_schema();
        assert_eq!(schema.fields().len(), 9);

        for (field, name) in schema.fields().iter().zip(COLUMN_NAMES) {
            assert_eq!(field.name(), name);
            assert!(!field.is_nullable());
        }
        for field in schema.fields().iter().take(8) {
            assert_eq!(field.data_type(), &DataType::Int32);
        }
        match schema.field(8).data_type() {
            DataType::List(item) => assert_eq!(item.data_type(), &DataType::Float64),
            other => panic!("traceData should be a list, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_is_shared() {
        assert!(Arc::ptr_eq(&trace_schema(), &trace_schema()));
    }
}
