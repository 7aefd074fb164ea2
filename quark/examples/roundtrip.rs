//! Encodes a few TLV values, splits the bytes into small chunks and decodes
//! them back, reporting which strings came out borrowed and which were copied.
//!
//! Run with: `RUST_LOG=trace cargo run --example roundtrip`

use quark::prelude::*;

fn main() -> Result<(), TlvError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let samples = [
        Value::Int32(42),
        Value::from("hello"),
        Value::Float32(std::f32::consts::PI),
        Value::from("a string long enough to straddle chunks"),
        Value::Int32(-1),
    ];

    let mut output = GrowableOutput::builder().block_size(64).build();
    for value in &samples {
        serialize_value(&mut output, value)?;
    }
    let bytes = output.into_bytes();
    println!("[Encode] {} values in {} bytes", samples.len(), bytes.len());

    let input = MultiBufferInput::new(bytes.chunks(16));
    println!("[Decode] reading from {} chunks", input.chunk_count());

    let mut values = ValueIter::new(input);
    for (index, value) in values.by_ref().enumerate() {
        match value? {
            Value::String(payload) => println!(
                "  #{index} STRING {:?} ({})",
                payload.as_str()?,
                if payload.is_borrowed() { "borrowed" } else { "copied" }
            ),
            other => println!("  #{index} {} {:?}", other.tag(), other),
        }
    }

    let input = values.into_inner();
    println!("[Decode] consumed {} of {} bytes", input.byte_count(), bytes.len());

    Ok(())
}
