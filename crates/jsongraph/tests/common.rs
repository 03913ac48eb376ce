#![allow(dead_code, missing_docs)]

/// A representative document exercised by the integration tests: nested
/// containers, escapes, explicit nulls, scaled numbers, and a rectangular
/// matrix for shape inspection.
pub const DOCUMENT: &str = r#"
{
    "job": {
        "name": "nightly \"full\" run",
        "enabled": true,
        "last_error": null
    },
    "thresholds": [0.25, 0.50, 0.75],
    "matrix": [
        [1, 2, 3],
        [4, 5, 6]
    ],
    "labels": ["build", "test"],
    "retries": 3
}
"#;

/// The same document rendered compactly with members in key order.
pub const DOCUMENT_COMPACT: &str = "{\"job\":{\"enabled\":true,\"last_error\":null,\"name\":\"nightly \\\"full\\\" run\"},\"labels\":[\"build\",\"test\"],\"matrix\":[[1,2,3],[4,5,6]],\"retries\":3,\"thresholds\":[0.25,0.50,0.75]}";
