// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) wires these modules together.
//
// Module responsibilities:
// - `api`: the Neveo endpoint client (authentication, retrying request
//   wrapper, paginated media listing).
// - `download`: fetch a single URL and persist it to the downloads
//   directory.
// - `driver`: the paginate / filter-by-date / download loop.
// - `cli`: clap argument definitions.
// - `logging`: tracing subscriber setup from `LOG_LEVEL`.
//
// Keeping the loop in the library (rather than in `main`) is what lets
// the integration tests run the whole workflow against a mock server.
pub mod api;
pub mod cli;
pub mod download;
pub mod driver;
pub mod logging;
