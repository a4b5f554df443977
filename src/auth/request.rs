/// The raw query parameters of an update request, as sent by a client.
///
/// Every field is optional here: presence is checked by the
/// [`Verifier`][crate::auth::Verifier] so that a missing field produces a
/// [`MissingField`][crate::error::Error::MissingField] error naming it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub salt: Option<String>,
    pub time: Option<String>,
    pub sign: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// `domn` on the wire.
    pub domain: Option<String>,
    /// `reqc` on the wire.
    pub req_code: Option<String>,
    pub addr: Option<String>,
}

impl UpdateRequest {
    /// Build a request from decoded query pairs. A repeated key keeps its first value and
    /// unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut req = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "salt" => &mut req.salt,
                "time" => &mut req.time,
                "sign" => &mut req.sign,
                "user" => &mut req.user,
                "pass" => &mut req.pass,
                "domn" => &mut req.domain,
                "reqc" => &mut req.req_code,
                "addr" => &mut req.addr,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        req
    }
}

/// Return the value of a present, non-empty parameter.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let req = UpdateRequest::from_pairs([
            ("salt", "q83vEjRWeJq8"),
            ("time", "1700000000"),
            ("sign", "MFRGGZDFMZTWQ2LKNNWG"),
            ("domn", "home.example.com"),
            ("reqc", "2"),
            ("extra", "ignored"),
        ]);
        assert_eq!(
            req,
            UpdateRequest {
                salt: Some("q83vEjRWeJq8".to_string()),
                time: Some("1700000000".to_string()),
                sign: Some("MFRGGZDFMZTWQ2LKNNWG".to_string()),
                domain: Some("home.example.com".to_string()),
                req_code: Some("2".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_repeated_key_keeps_first() {
        let req = UpdateRequest::from_pairs([("reqc", "1"), ("reqc", "0"), ("addr", "")]);
        assert_eq!(req.req_code.as_deref(), Some("1"));
        assert_eq!(req.addr.as_deref(), Some(""));
        assert_eq!(non_empty(req.addr.as_ref()), None);
    }
}
