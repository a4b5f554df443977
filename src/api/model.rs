use crate::auth::Challenge;
use axum::response::{Html, IntoResponse, Response};
use std::collections::BTreeMap;
use std::fmt::Write;

/// A response body in the meta-tag format understood by simple dynamic DNS clients: a minimal
/// HTML document with one `<meta name="K" content="V">` tag per field, in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct MetaPage(BTreeMap<&'static str, String>);

impl MetaPage {
    pub fn new(fields: BTreeMap<&'static str, String>) -> Self {
        Self(fields)
    }

    pub fn error(message: String) -> Self {
        Self(BTreeMap::from([("error", message)]))
    }

    pub fn render(&self) -> String {
        let mut page = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n",
        );
        for (name, content) in &self.0 {
            // NB: writing to a String can't fail.
            let _ = writeln!(
                page,
                "<meta name=\"{}\" content=\"{}\">",
                escape(name),
                escape(content)
            );
        }
        page.push_str("<title>saltdns</title>\n</head>\n<body>\n\n</body>\n</html>\n");
        page
    }
}

impl From<Challenge> for MetaPage {
    fn from(challenge: Challenge) -> Self {
        Self(BTreeMap::from([
            ("salt", challenge.salt),
            ("time", challenge.time.to_string()),
            ("sign", challenge.sign),
        ]))
    }
}

impl IntoResponse for MetaPage {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let page = MetaPage::new(BTreeMap::from([
            ("retc", "0".to_string()),
            ("addr", "198.51.100.7".to_string()),
        ]));
        assert_eq!(
            page.render(),
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"UTF-8\">\n\
             <meta name=\"addr\" content=\"198.51.100.7\">\n\
             <meta name=\"retc\" content=\"0\">\n\
             <title>saltdns</title>\n\
             </head>\n\
             <body>\n\
             \n\
             </body>\n\
             </html>\n"
        );
    }

    #[test]
    fn test_escaping() {
        let page = MetaPage::error("<script>\"x\" & 'y'</script>".to_string());
        assert!(page.render().contains(
            "<meta name=\"error\" content=\"&lt;script&gt;&#34;x&#34; &amp; &#39;y&#39;&lt;/script&gt;\">"
        ));
    }

    #[test]
    fn test_from_challenge() {
        let page = MetaPage::from(Challenge {
            salt: "q83vEjRWeJq8".to_string(),
            time: 1_700_000_000,
            sign: "MFRGGZDFMZTWQ2LKNNWG".to_string(),
        });
        let rendered = page.render();
        assert!(rendered.contains("<meta name=\"salt\" content=\"q83vEjRWeJq8\">"));
        assert!(rendered.contains("<meta name=\"time\" content=\"1700000000\">"));
        assert!(rendered.contains("<meta name=\"sign\" content=\"MFRGGZDFMZTWQ2LKNNWG\">"));
    }
}
