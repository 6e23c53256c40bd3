/*
  Client for the local WebConnect JSON API of SMA SunnyBoy inverters.
  Protocol details based on https://github.com/Dymerz/SMA-SunnyBoy (Python)
  and https://github.com/martijndierckx/sunnyboy-influxdb (Javascript).
*/

mod api;
pub mod keys;
pub mod model;

pub use api::error::Error;
pub use api::transport::{HttpTransport, Transport};
pub use api::{SmaReader, DEFAULT_NUM_TRIES};
