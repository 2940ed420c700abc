use lazy_static::lazy_static;
use serde_json::Number;
use std::collections::HashSet;

/// Registered HTTP status codes
#[rustfmt::skip]
const REGISTERED_STATUS_CODES: &[u16] = &[
    100, 101, 102, 103,
    200, 201, 202, 203, 204, 205, 206, 207, 208, 226,
    300, 301, 302, 303, 304, 305, 307, 308,
    400, 401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 411, 412, 413, 414, 415,
    416, 417, 418, 421, 422, 423, 424, 425, 426, 428, 429, 431, 451,
    500, 501, 502, 503, 504, 505, 506, 507, 508, 509, 510, 511,
];

/// Messages that carry no information for the caller and usually come from
/// stringifying something that was never meant to be shown
const UNWANTED_MESSAGES: &[&str] = &["[object Object]", "undefined", "null", "Error", "{}"];

lazy_static! {
    static ref LEGAL_STATUS_CODES: HashSet<u16> =
        REGISTERED_STATUS_CODES.iter().copied().collect();
    static ref UNWANTED_MESSAGE_SET: HashSet<&'static str> =
        UNWANTED_MESSAGES.iter().copied().collect();
}

/// Whether `code` is a registered HTTP status code
pub fn is_legal_status(code: u16) -> bool {
    LEGAL_STATUS_CODES.contains(&code)
}

/// Validate a raw status number against the registered codes.
///
/// Integral floats such as `404.0` are accepted; fractional, negative and
/// out-of-range values are not.
pub fn legal_status(raw: &Number) -> Option<u16> {
    let code = match raw.as_u64() {
        Some(n) => n,
        None => {
            let f = raw.as_f64()?;
            if f.fract() != 0.0 || f < 0.0 || f > f64::from(u16::MAX) {
                return None;
            }
            f as u64
        }
    };

    u16::try_from(code).ok().filter(|c| is_legal_status(*c))
}

/// Whether a message is on the denylist of non-informative strings
pub fn is_unwanted_message(message: &str) -> bool {
    UNWANTED_MESSAGE_SET.contains(message.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_codes() {
        assert_eq!(LEGAL_STATUS_CODES.len(), 62);
        assert!(is_legal_status(100));
        assert!(is_legal_status(418));
        assert!(is_legal_status(511));
    }

    #[test]
    fn test_unregistered_codes() {
        assert!(!is_legal_status(0));
        assert!(!is_legal_status(9));
        assert!(!is_legal_status(299));
        assert!(!is_legal_status(420));
        assert!(!is_legal_status(600));
        assert!(!is_legal_status(999));
    }

    #[test]
    fn test_legal_status_from_number() {
        assert_eq!(legal_status(&Number::from(418)), Some(418));
        assert_eq!(legal_status(&Number::from(9)), None);
        assert_eq!(legal_status(&Number::from(-404)), None);
        assert_eq!(legal_status(&Number::from(70_000)), None);
        assert_eq!(legal_status(&Number::from_f64(404.0).unwrap()), Some(404));
        assert_eq!(legal_status(&Number::from_f64(404.5).unwrap()), None);
        assert_eq!(legal_status(&Number::from_f64(-0.5).unwrap()), None);
    }

    #[test]
    fn test_unwanted_messages() {
        assert!(is_unwanted_message("[object Object]"));
        assert!(is_unwanted_message("undefined"));
        assert!(is_unwanted_message(" Error "));
        assert!(!is_unwanted_message("DataStore Error"));
        assert!(!is_unwanted_message("Not Found!"));
    }
}
