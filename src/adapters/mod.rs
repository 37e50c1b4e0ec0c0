//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                  |
//! |------------|-------------|------------------------------|
//! | `log_sink` | EventSink   | Serial log output            |
//! | `nvs`      | ConfigPort  | NVS / in-memory store        |

pub mod log_sink;
pub mod nvs;
