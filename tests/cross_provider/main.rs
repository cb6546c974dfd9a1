//! Runs the same streaming scenarios against every provider adapter.

mod providers;
mod streaming_e2e;
