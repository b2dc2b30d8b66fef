use axum::http::{header::COOKIE, HeaderMap};
use serde::Deserialize;

/// The lab the browser currently has selected, stored client-side as a
/// JSON cookie named `livingLab`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectedLab {
    pub id: i64,
    pub name: String,
}

/// Extract the selected lab from the `Cookie` header, if present and
/// well-formed. The cookie value may be percent-encoded by the browser.
pub fn selected_lab(headers: &HeaderMap) -> Option<SelectedLab> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;

    let value = cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "livingLab").then_some(value)
    })?;

    let decoded = urlencoding::decode(value).ok()?;
    serde_json::from_str(&decoded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn selected_lab_parses_encoded_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static(
                "theme=dark; livingLab=%7B%22id%22%3A4%2C%22name%22%3A%22Ghent%22%7D",
            ),
        );

        let lab = selected_lab(&headers).expect("cookie should parse");
        assert_eq!(lab.id, 4);
        assert_eq!(lab.name, "Ghent");
    }

    #[test]
    fn selected_lab_parses_plain_json_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("livingLab={\"id\":1,\"name\":\"Pilot\"}"),
        );

        let lab = selected_lab(&headers).expect("cookie should parse");
        assert_eq!(lab.id, 1);
    }

    #[test]
    fn selected_lab_ignores_malformed_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("livingLab=not-json"));

        assert!(selected_lab(&headers).is_none());
    }

    #[test]
    fn selected_lab_absent_without_cookie_header() {
        assert!(selected_lab(&HeaderMap::new()).is_none());
    }
}
