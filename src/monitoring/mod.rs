/*!
 * Monitoring
 * Logging setup for the kernel and its tools
 */

mod tracer;

pub use tracer::{init_test_tracing, init_tracing, TRACE_JSON_VAR};
