mod parse_bad;
mod property_roundtrip;
mod stream_values;
