/// Network address of the inverter on the local network, e.g. `192.168.0.12`.
pub type Host = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    User,
    Installer,
}

impl AccountType {
    /// Wire name of the login role, sent as the `right` field of the login body.
    pub fn right(&self) -> &'static str {
        match self {
            AccountType::User => "usr",
            AccountType::Installer => "istl",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(AccountType::User),
            "installer" => Ok(AccountType::Installer),
            _ => Err(format!("unknown account type: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub account_type: AccountType,
    pub password: String,
}

/// An open session on the device: holds the server-issued sid between a
/// successful login and the matching logout.
#[derive(Debug)]
pub struct Session {
    pub sid: String,
}

/// A decoded telemetry leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Integer(i64),
    Text(String),
    /// Key absent from the response, or its value of an unusable type.
    Missing,
}

impl ScalarValue {
    /// Render into the integer-only representation; `-1` stands in for
    /// missing or non-integer values.
    pub fn into_int(self) -> i64 {
        match self {
            ScalarValue::Integer(v) => v,
            _ => -1,
        }
    }

    /// Render into the string representation; integers are stringified and
    /// missing values become the empty string.
    pub fn into_text(self) -> String {
        match self {
            ScalarValue::Integer(v) => v.to_string(),
            ScalarValue::Text(s) => s,
            ScalarValue::Missing => String::new(),
        }
    }
}

/// Stands in for an absent or non-integer log field.
pub const LOG_SENTINEL: u32 = u32::MAX;

/// One point of the cumulative energy production log, on the device's
/// nominal 300 second grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPoint {
    /// Unix timestamp of the sample, or [`LOG_SENTINEL`].
    pub timestamp: u32,
    /// Cumulative produced energy in Wh, or [`LOG_SENTINEL`].
    pub value: u32,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scalar_rendering() {
        assert_eq!(42, ScalarValue::Integer(42).into_int());
        assert_eq!(-1, ScalarValue::Text("192.168.0.1".to_owned()).into_int());
        assert_eq!(-1, ScalarValue::Missing.into_int());

        assert_eq!("42", ScalarValue::Integer(42).into_text());
        assert_eq!("a", ScalarValue::Text("a".to_owned()).into_text());
        assert_eq!("", ScalarValue::Missing.into_text());
    }

    #[test]
    fn account_type_from_str() {
        assert_eq!(Ok(AccountType::User), "user".parse());
        assert_eq!(Ok(AccountType::Installer), "installer".parse());
        assert!("admin".parse::<AccountType>().is_err());
    }
}
