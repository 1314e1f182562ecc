// Library root
// -----------
// This crate exposes a small library surface for the demo binary. The
// binary (`main.rs`) wires these modules into a single detect-and-print
// flow.
//
// Module responsibilities:
// - `api`: Encapsulates the HTTP interaction with the detection server
//   (multipart upload, response decoding) and the response data shapes.
// - `output`: Formats predictions for the console.
//
// Keeping this separation makes the request/response logic testable
// without going through the binary.
pub mod api;
pub mod output;
