pub mod endpoint;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

use std::time::Duration;

use serde_json::Value;

pub use error::Error;
use transport::{HttpTransport, Transport};

use crate::model::{AccountType, Credentials, Host, LogPoint, ScalarValue, Session};

/// How many times a query is attempted before giving up. Fresh sessions on
/// the device fail sporadically, the first try often does not go through.
pub const DEFAULT_NUM_TRIES: u8 = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the local WebConnect JSON API of a SunnyBoy inverter.
///
/// Every operation runs its own login/query/logout cycle; no session state
/// is kept on the reader between calls. One in-flight operation at a time,
/// callers needing concurrency must serialize externally.
pub struct SmaReader<T> {
    host: Host,
    credentials: Credentials,
    num_tries: u8,
    transport: T,
}

impl SmaReader<HttpTransport> {
    pub fn new(host: Host, account_type: AccountType, password: &str) -> Result<Self, Error> {
        let transport = HttpTransport::new(REQUEST_TIMEOUT)?;
        Ok(Self::with_transport(host, account_type, password, transport))
    }
}

impl<T: Transport> SmaReader<T> {
    pub fn with_transport(
        host: Host,
        account_type: AccountType,
        password: &str,
        transport: T,
    ) -> Self {
        SmaReader {
            host,
            credentials: Credentials {
                account_type,
                password: password.to_owned(),
            },
            num_tries: DEFAULT_NUM_TRIES,
            transport,
        }
    }

    pub fn set_num_tries(&mut self, num_tries: u8) {
        self.num_tries = num_tries;
    }

    pub fn set_host(&mut self, host: Host) {
        self.host = host;
    }

    /// Fetch `keys` as integers. Output order mirrors `keys`; a key that is
    /// missing or not integer-typed yields `-1` without affecting the rest.
    pub fn get_values_int(&self, keys: &[&str]) -> Result<Vec<i64>, Error> {
        self.get_values(keys)
            .map(|values| values.into_iter().map(ScalarValue::into_int).collect())
    }

    /// Fetch `keys` as strings. Integer values are stringified; a missing
    /// key yields the empty string.
    pub fn get_values_str(&self, keys: &[&str]) -> Result<Vec<String>, Error> {
        self.get_values(keys)
            .map(|values| values.into_iter().map(ScalarValue::into_text).collect())
    }

    /// Fetch `keys` as tagged scalars, one per requested key in input order.
    pub fn get_values(&self, keys: &[&str]) -> Result<Vec<ScalarValue>, Error> {
        let body = request::values_body(keys)?;
        self.query(endpoint::GET_VALUES, &body, |doc| {
            let device = device_payload(doc)?;
            Ok(keys.iter().map(|key| response::scalar(device, key)).collect())
        })
    }

    /// Fetch the cumulative energy production log between `start_time` and
    /// `end_time` (unix seconds), at the device's 300 second cadence. The
    /// series is bounded by the capacity of the requested window; the device
    /// may return fewer points.
    pub fn get_log(&self, start_time: u32, end_time: u32) -> Result<Vec<LogPoint>, Error> {
        let body = request::logger_body(start_time, end_time)?;
        let capacity = request::log_capacity(start_time, end_time);
        self.query(endpoint::GET_LOGGER, &body, |doc| {
            let device = device_payload(doc)?;
            Ok(response::log_series(device, capacity))
        })
    }

    /// Probe the `getAllOnlValues` endpoint: a single login/query/logout
    /// cycle with no retries, succeeding iff the device answered the POST
    /// with parseable JSON. The payload itself is not interpreted.
    pub fn get_all_values(&self) -> Result<(), Error> {
        self.attempt(endpoint::GET_ALL_ONL_VALUES, &request::all_values_body())
            .map(|_| ())
    }

    /// Open a session on the device.
    fn authorize(&self) -> Result<Session, Error> {
        let url = endpoint::url(&self.host, endpoint::LOGIN);
        let doc = self
            .transport
            .post(&url, &request::login_body(&self.credentials))?;

        if let Some(code) = response::err_code(&doc) {
            return Err(error::from_err_code(code));
        }
        match response::sid(&doc) {
            Some(sid) => {
                log::debug!("authorized, sid: {}", sid);
                Ok(Session {
                    sid: sid.to_owned(),
                })
            }
            None => Err(Error::Auth(
                "login response carried no session id".to_owned(),
            )),
        }
    }

    /// Close `session` on the device. Best-effort: callers treat the
    /// preceding query as authoritative regardless of this outcome.
    fn logout(&self, session: Session) -> Result<(), Error> {
        if session.sid.is_empty() {
            return Err(Error::Auth("no open session".to_owned()));
        }
        let url = endpoint::session_url(&self.host, endpoint::LOGOUT, &session.sid);
        self.transport.post(&url, &request::logout_body()).map(|_| ())
    }

    /// One full session-scoped pass: login, POST `body` to the
    /// session-suffixed `query` URL, logout. Logout runs on every path that
    /// reached authorization and its failure is only logged.
    fn attempt(&self, query: &endpoint::Endpoint, body: &Value) -> Result<Value, Error> {
        let session = self.authorize()?;
        let url = endpoint::session_url(&self.host, query, &session.sid);
        let posted = self.transport.post(&url, body);
        if let Err(e) = self.logout(session) {
            log::warn!("error while logging out: {}", e);
        }
        posted
    }

    /// Run one query through the retry loop. Each attempt is an independent
    /// login/query/logout cycle; `extract` decides whether the response
    /// document is usable. After exhausting the budget the last error is
    /// surfaced.
    fn query<R>(
        &self,
        query: &endpoint::Endpoint,
        body: &Value,
        extract: impl Fn(&Value) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let mut last_error = Error::Transport("no attempt was made".to_owned());
        for attempt in 1..=self.num_tries {
            log::debug!("attempt {}/{}", attempt, self.num_tries);
            match self.attempt(query, body).and_then(|doc| extract(&doc)) {
                Ok(extracted) => return Ok(extracted),
                Err(e) => {
                    log::warn!("attempt {}/{} failed: {}", attempt, self.num_tries, e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

/// Unwrap the single-device payload of a query response, after checking for
/// a firmware-level error code.
fn device_payload(doc: &Value) -> Result<&Value, Error> {
    if let Some(code) = response::err_code(doc) {
        return Err(error::from_err_code(code));
    }
    response::first_device(doc)
        .ok_or_else(|| Error::Protocol("no device payload under result".to_owned()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keys;
    use crate::model::LOG_SENTINEL;
    use serde_json::json;
    use std::cell::RefCell;

    /// Scripted transport: answers from a queue, records every URL hit.
    /// An exhausted script keeps answering with a transport error.
    struct MockTransport {
        calls: RefCell<Vec<String>>,
        script: RefCell<Vec<Result<Value, Error>>>,
    }

    impl MockTransport {
        fn new(script: Vec<Result<Value, Error>>) -> Self {
            MockTransport {
                calls: RefCell::new(Vec::new()),
                script: RefCell::new(script),
            }
        }

        fn calls_to(&self, path: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|url| url.contains(path))
                .count()
        }
    }

    impl Transport for MockTransport {
        fn post(&self, url: &str, _body: &Value) -> Result<Value, Error> {
            self.calls.borrow_mut().push(url.to_owned());
            let mut script = self.script.borrow_mut();
            if script.is_empty() {
                Err(Error::Transport("connection refused".to_owned()))
            } else {
                script.remove(0)
            }
        }
    }

    fn reader(script: Vec<Result<Value, Error>>) -> SmaReader<MockTransport> {
        SmaReader::with_transport(
            "192.168.0.12".to_owned(),
            AccountType::User,
            "secret",
            MockTransport::new(script),
        )
    }

    fn login_ok() -> Result<Value, Error> {
        Ok(json!({"result": {"sid": "sid123"}}))
    }

    fn logout_ok() -> Result<Value, Error> {
        Ok(json!({"result": {"isLogin": false}}))
    }

    fn values_ok() -> Result<Value, Error> {
        Ok(json!({"result": {"0199-B3252E4B": {
            (keys::KEY_POWER): {"1": [{"val": 2071}]},
            (keys::KEY_ETHERNET_IP): {"1": [{"val": "192.168.0.12"}]},
        }}}))
    }

    fn refused() -> Result<Value, Error> {
        Err(Error::Transport("connection refused".to_owned()))
    }

    #[test]
    fn failing_transport_exhausts_num_tries() {
        let mut reader = reader(Vec::new());
        reader.set_num_tries(3);

        assert!(reader.get_values_int(&[keys::KEY_POWER]).is_err());
        assert_eq!(3, reader.transport.calls_to(endpoint::LOGIN));
        assert_eq!(0, reader.transport.calls_to(endpoint::GET_VALUES));
        assert_eq!(0, reader.transport.calls_to(endpoint::LOGOUT));
    }

    #[test]
    fn success_on_second_attempt() {
        let reader = reader(vec![refused(), login_ok(), values_ok(), logout_ok()]);

        let values = reader.get_values_int(&[keys::KEY_POWER]).unwrap();
        assert_eq!(vec![2071], values);
        assert_eq!(2, reader.transport.calls_to(endpoint::LOGIN));
        assert_eq!(1, reader.transport.calls_to(endpoint::GET_VALUES));
        assert_eq!(1, reader.transport.calls_to(endpoint::LOGOUT));
    }

    #[test]
    fn logout_runs_after_failed_query() {
        let mut reader = reader(vec![
            login_ok(),
            refused(),
            logout_ok(),
            login_ok(),
            refused(),
            logout_ok(),
        ]);
        reader.set_num_tries(2);

        assert!(reader.get_values_int(&[keys::KEY_POWER]).is_err());
        assert_eq!(2, reader.transport.calls_to(endpoint::LOGIN));
        assert_eq!(2, reader.transport.calls_to(endpoint::GET_VALUES));
        assert_eq!(2, reader.transport.calls_to(endpoint::LOGOUT));
    }

    #[test]
    fn malformed_response_is_retried() {
        let reader = reader(vec![
            login_ok(),
            Ok(json!({"result": {}})),
            logout_ok(),
            login_ok(),
            values_ok(),
            logout_ok(),
        ]);

        let values = reader.get_values_int(&[keys::KEY_POWER]).unwrap();
        assert_eq!(vec![2071], values);
        assert_eq!(2, reader.transport.calls_to(endpoint::LOGIN));
    }

    #[test]
    fn too_long_key_never_reaches_transport() {
        let reader = reader(vec![login_ok()]);
        let long = "6100_40263F00XXXXX".to_owned(); // 18 chars

        match reader.get_values_int(&[long.as_str()]) {
            Err(Error::Validation(_)) => {}
            other => panic!("expected Validation, got {:?}", other),
        }
        assert!(reader.transport.calls.borrow().is_empty());
    }

    #[test]
    fn inverted_log_range_never_reaches_transport() {
        let reader = reader(vec![login_ok()]);

        match reader.get_log(1609459500, 1609459200) {
            Err(Error::Validation(_)) => {}
            other => panic!("expected Validation, got {:?}", other),
        }
        assert!(reader.transport.calls.borrow().is_empty());
    }

    #[test]
    fn output_mirrors_input_order_with_fallbacks() {
        let reader = reader(vec![login_ok(), values_ok(), logout_ok()]);

        let values = reader
            .get_values_int(&["missing_key", keys::KEY_ETHERNET_IP, keys::KEY_POWER])
            .unwrap();
        assert_eq!(vec![-1, -1, 2071], values);
    }

    #[test]
    fn string_values_stringify_and_default() {
        let reader = reader(vec![login_ok(), values_ok(), logout_ok()]);

        let values = reader
            .get_values_str(&[keys::KEY_POWER, keys::KEY_ETHERNET_IP, "missing_key"])
            .unwrap();
        assert_eq!(
            vec!["2071".to_owned(), "192.168.0.12".to_owned(), String::new()],
            values
        );
    }

    #[test]
    fn refused_login_surfaces_auth_error() {
        let mut reader = reader(vec![Ok(json!({"err": 401})), Ok(json!({"err": 401}))]);
        reader.set_num_tries(2);

        match reader.get_values_int(&[keys::KEY_POWER]) {
            Err(Error::Auth(_)) => {}
            other => panic!("expected Auth, got {:?}", other),
        }
        assert_eq!(2, reader.transport.calls_to(endpoint::LOGIN));
        assert_eq!(0, reader.transport.calls_to(endpoint::GET_VALUES));
    }

    #[test]
    fn log_window_of_one_interval() {
        let t0 = 1609459200;
        let reader = reader(vec![
            login_ok(),
            Ok(json!({"result": {"0199-B3252E4B": [
                {"t": t0, "v": 3120},
                {"t": t0 + 300, "v": 3150},
            ]}})),
            logout_ok(),
        ]);

        let points = reader.get_log(t0, t0 + 300).unwrap();
        assert_eq!(2, points.len());
        assert_eq!(3120, points[0].value);
        assert_eq!(t0 + 300, points[1].timestamp);
    }

    #[test]
    fn log_capacity_truncates_excess_points() {
        let t0 = 1609459200;
        let reader = reader(vec![
            login_ok(),
            Ok(json!({"result": {"0199-B3252E4B": [
                {"t": t0, "v": 3120},
                {"t": t0 + 300, "v": 3150},
                {"t": t0 + 600, "v": 3200},
            ]}})),
            logout_ok(),
        ]);

        /* zero-width window clamps to capacity 1 */
        let points = reader.get_log(t0, t0).unwrap();
        assert_eq!(1, points.len());
    }

    #[test]
    fn log_sentinels_for_sparse_points() {
        let t0 = 1609459200;
        let reader = reader(vec![
            login_ok(),
            Ok(json!({"result": {"0199-B3252E4B": [
                {"t": t0},
                {"v": 3150},
            ]}})),
            logout_ok(),
        ]);

        let points = reader.get_log(t0, t0 + 300).unwrap();
        assert_eq!(LOG_SENTINEL, points[0].value);
        assert_eq!(LOG_SENTINEL, points[1].timestamp);
        assert_eq!(3150, points[1].value);
    }

    #[test]
    fn get_all_values_single_pass() {
        let reader = reader(vec![
            login_ok(),
            Ok(json!({"whatever": {"the": ["device", "says"]}})),
            logout_ok(),
        ]);

        assert!(reader.get_all_values().is_ok());
        assert_eq!(1, reader.transport.calls_to(endpoint::LOGIN));
        assert_eq!(1, reader.transport.calls_to(endpoint::GET_ALL_ONL_VALUES));
        assert_eq!(1, reader.transport.calls_to(endpoint::LOGOUT));
    }

    #[test]
    fn get_all_values_does_not_retry() {
        let reader = reader(Vec::new());

        assert!(reader.get_all_values().is_err());
        assert_eq!(1, reader.transport.calls_to(endpoint::LOGIN));
    }

    #[test]
    fn logout_failure_does_not_fail_the_query() {
        let reader = reader(vec![login_ok(), values_ok(), refused()]);

        let values = reader.get_values_int(&[keys::KEY_POWER]).unwrap();
        assert_eq!(vec![2071], values);
    }

    #[test]
    fn session_url_carries_sid() {
        let reader = reader(vec![login_ok(), values_ok(), logout_ok()]);

        reader.get_values_int(&[keys::KEY_POWER]).unwrap();
        let calls = reader.transport.calls.borrow();
        assert_eq!(
            "http://192.168.0.12/dyn/getValues.json?sid=sid123",
            calls[1]
        );
        assert_eq!("http://192.168.0.12/dyn/logout.json?sid=sid123", calls[2]);
    }
}
