//! XML rendering.
//!
//! Elements are assembled directly; attribute values are escaped per
//! the XML 1.0 predefined entities. Absent optional fields are emitted
//! as empty attributes so every record carries the same attribute set.

use crate::core::result::{ResultRecord, ScanResult};

/// Renders one result as a `<results>` element with one `<result>`
/// child per scanner verdict.
pub fn render(result: &ScanResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<results resource=\"{}\">\n",
        escape(&result.resource)
    ));
    for record in result.records() {
        out.push_str(&render_record(&record));
    }
    out.push_str("</results>\n");
    out
}

fn render_record(record: &ResultRecord) -> String {
    let mut out = String::from("  <result");
    push_attr(&mut out, "hash", &record.hash);
    push_attr(&mut out, "scanner", &record.scanner);
    push_attr(&mut out, "version", record.version.as_deref().unwrap_or(""));
    push_attr(&mut out, "detected", if record.detected { "true" } else { "false" });
    push_attr(&mut out, "result", record.result.as_deref().unwrap_or(""));
    push_attr(&mut out, "md5", record.md5.as_deref().unwrap_or(""));
    push_attr(&mut out, "sha1", record.sha1.as_deref().unwrap_or(""));
    push_attr(&mut out, "sha256", record.sha256.as_deref().unwrap_or(""));
    push_attr(&mut out, "update", record.update.as_deref().unwrap_or(""));
    push_attr(&mut out, "permalink", record.permalink.as_deref().unwrap_or(""));
    out.push_str("/>\n");
    out
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!(" {name}=\"{}\"", escape(value)));
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use crate::output::test_fixtures::{sample_result, MD5};

    #[test]
    fn test_xml_structure_and_fields() {
        let xml = super::render(&sample_result());

        assert!(xml.starts_with(&format!("<results resource=\"{MD5}\">")));
        assert!(xml.ends_with("</results>\n"));
        assert_eq!(xml.matches("<result ").count(), 2);
        for attr in [
            "hash=", "scanner=", "version=", "detected=", "result=", "md5=", "sha1=",
            "sha256=", "update=", "permalink=",
        ] {
            assert!(xml.contains(attr), "missing {attr}");
        }
    }

    #[test]
    fn test_xml_escapes_attribute_values() {
        let xml = super::render(&sample_result());
        assert!(xml.contains("Trojan.Generic &lt;evil&amp;&quot;quoted&quot;&gt;"));
        assert!(!xml.contains("<evil"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(super::escape("a&b<c>'d'\"e\""), "a&amp;b&lt;c&gt;&apos;d&apos;&quot;e&quot;");
        assert_eq!(super::escape("plain"), "plain");
    }
}
