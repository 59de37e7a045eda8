// src/row/batch.rs
use crate::error::{SegyError, Result};
use crate::row::schema::{sample_item_field, trace_schema, COLUMN_NAMES};
use crate::trace::Trace;
use arrow::array::{ArrayRef, AsArray, Float64Builder, Int32Builder, ListBuilder};
use arrow::datatypes::{Float64Type, Int32Type};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// One output row, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRow {
    pub trace_id: i32,
    pub field_record_number: i32,
    pub dist_srg: i32,
    pub src_x: i32,
    pub src_y: i32,
    /// Widened from the header's 16-bit field
    pub sample_interval: i32,
    pub iline_id: i32,
    pub xline_id: i32,
    pub trace_data: Vec<f64>,
}

impl From<Trace> for TraceRow {
    fn from(trace: Trace) -> Self {
        let h = trace.header;
        TraceRow {
            trace_id: h.trace_id,
            field_record_number: h.field_record_number,
            dist_srg: h.dist_srg,
            src_x: h.src_x,
            src_y: h.src_y,
            sample_interval: h.sample_interval as i32,
            iline_id: h.iline_id,
            xline_id: h.xline_id,
            trace_data: trace.samples,
        }
    }
}

impl From<&Trace> for TraceRow {
    fn from(trace: &Trace) -> Self {
        TraceRow::from(trace.clone())
    }
}

impl TraceRow {
    fn header_values(&self) -> [i32; 8] {
        [
            self.trace_id,
            self.field_record_number,
            self.dist_srg,
            self.src_x,
            self.src_y,
            self.sample_interval,
            self.iline_id,
            self.xline_id,
        ]
    }

    /// Read rows back out of a batch laid out as [`trace_schema`]
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<TraceRow>> {
        let schema = batch.schema();
        let names = schema.fields().iter().map(|f| f.name().as_str());
        if !names.eq(COLUMN_NAMES) {
            return Err(SegyError::InvalidInput(format!(
                "batch schema does not match trace schema: {:?}",
                batch.schema()
            )));
        }

        let mismatch = || SegyError::InvalidInput("unexpected column type".to_string());

        let mut header_columns = Vec::with_capacity(8);
        for i in 0..8 {
            header_columns.push(batch.column(i).as_primitive_opt::<Int32Type>().ok_or_else(mismatch)?);
        }
        let trace_data = batch.column(8).as_list_opt::<i32>().ok_or_else(mismatch)?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for row in 0..batch.num_rows() {
            let v: Vec<i32> = header_columns.iter().map(|c| c.value(row)).collect();
            let samples = trace_data.value(row);
            let samples = samples.as_primitive_opt::<Float64Type>().ok_or_else(mismatch)?;

            rows.push(TraceRow {
                trace_id: v[0],
                field_record_number: v[1],
                dist_srg: v[2],
                src_x: v[3],
                src_y: v[4],
                sample_interval: v[5],
                iline_id: v[6],
                xline_id: v[7],
                trace_data: samples.values().to_vec(),
            });
        }
        Ok(rows)
    }
}

/// Accumulates rows into Arrow column builders.
pub struct RowBatchBuilder {
    header_columns: Vec<Int32Builder>,
    trace_data: ListBuilder<Float64Builder>,
    len: usize,
}

impl RowBatchBuilder {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(rows: usize) -> Self {
        RowBatchBuilder {
            header_columns: (0..8).map(|_| Int32Builder::with_capacity(rows)).collect(),
            trace_data: ListBuilder::with_capacity(Float64Builder::new(), rows)
                .with_field(sample_item_field()),
            len: 0,
        }
    }

    pub fn append(&mut self, row: &TraceRow) {
        for (builder, value) in self.header_columns.iter_mut().zip(row.header_values()) {
            builder.append_value(value);
        }
        self.trace_data.values().append_slice(&row.trace_data);
        self.trace_data.append(true);
        self.len += 1;
    }

    pub fn append_trace(&mut self, trace: Trace) {
        self.append(&TraceRow::from(trace));
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Build a batch from the buffered rows and reset the builder
    pub fn finish(&mut self) -> Result<RecordBatch> {
        let mut columns: Vec<ArrayRef> = self
            .header_columns
            .iter_mut()
            .map(|b| Arc::new(b.finish()) as ArrayRef)
            .collect();
        columns.push(Arc::new(self.trace_data.finish()));
        self.len = 0;

        Ok(RecordBatch::try_new(trace_schema(), columns)?)
    }
}

impl Default for RowBatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
