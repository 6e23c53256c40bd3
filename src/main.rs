use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use config::Config;

use sunnyboy_rs::model::AccountType;
use sunnyboy_rs::{keys, SmaReader, Transport};

const DEFAULT_INTERVAL_SECS: i64 = 300;

#[derive(Clone, serde::Deserialize)]
pub struct SunnyboyConfig {
    host: String,
    account: String,
    password: String,
    num_tries: Option<u8>,
    interval: u64,
}

pub fn read_settings() -> SunnyboyConfig {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("SMA"))
        .unwrap()
        .set_default("account", "user")
        .unwrap()
        .set_default("interval", DEFAULT_INTERVAL_SECS)
        .unwrap();

    settings.try_into().expect("Configuration error")
}

/// One polling round: live values plus the energy log of the last hour.
fn collect<T: Transport>(reader: &SmaReader<T>) {
    let query_keys = [keys::KEY_POWER, keys::KEY_ENERGY_TODAY, keys::KEY_ENERGY_TOTAL];
    match reader.get_values_int(&query_keys) {
        Ok(values) => log::info!(
            "power: {} W, today: {} Wh, total: {} Wh",
            values[0],
            values[1],
            values[2]
        ),
        Err(e) => log::error!("value query failed: {}", e),
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System clock before unix epoch")
        .as_secs() as u32;
    match reader.get_log(now - 3600, now) {
        Ok(points) => log::info!("energy log: {} points over the last hour", points.len()),
        Err(e) => log::error!("log query failed: {}", e),
    }
}

fn main() {
    env_logger::init();

    let settings = read_settings();
    let account: AccountType = settings.account.parse().expect("Configuration error");

    let mut reader = SmaReader::new(settings.host, account, &settings.password)
        .expect("HTTP client initialization error");
    if let Some(num_tries) = settings.num_tries {
        reader.set_num_tries(num_tries);
    }

    loop {
        collect(&reader);
        thread::sleep(Duration::from_secs(settings.interval));
    }
}
