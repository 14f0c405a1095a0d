//! Bunkatsu Rate Resolution
//!
//! Turns a [`RateTable`](bunkatsu_core::RateTable) snapshot (every currency
//! quoted against USD) into the rate of an arbitrary instrument, always in
//! the orientation "1 unit of base = rate units of quote".
//!
//! | Pair shape | Formula |
//! |------------|---------|
//! | `USD/xxx` | `raw(xxx)` |
//! | `xxx/USD` | `1 / raw(xxx)` |
//! | `xxx/JPY` | `usd_jpy / raw(xxx)` |
//! | `xxx/yyy` | `raw(yyy) / raw(xxx)` (through USD) |
//! | `XAU/USD` | metal spot |
//! | `XAU/JPY` | metal spot × usd_jpy |
//!
//! A missing or zero leg is reported as [`RateError`](bunkatsu_ports::RateError),
//! never replaced by a default of 1.

mod resolver;

pub use resolver::{conversion_rate, resolve, resolve_pair};
