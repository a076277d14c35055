//! End-to-end conversions over an in-memory content source.

mod degradation;
mod pipeline;
