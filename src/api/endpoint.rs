pub type Endpoint = str;

pub const LOGIN: &Endpoint = "/dyn/login.json";
pub const LOGOUT: &Endpoint = "/dyn/logout.json";
pub const GET_VALUES: &Endpoint = "/dyn/getValues.json";
pub const GET_LOGGER: &Endpoint = "/dyn/getLogger.json";
pub const GET_ALL_ONL_VALUES: &Endpoint = "/dyn/getAllOnlValues.json";

/// URL of a pre-login endpoint on `host`.
pub fn url(host: &str, endpoint: &Endpoint) -> String {
    format!("http://{}{}", host, endpoint)
}

/// URL of a session-scoped endpoint on `host`.
pub fn session_url(host: &str, endpoint: &Endpoint, sid: &str) -> String {
    format!("http://{}{}?sid={}", host, endpoint, sid)
}
