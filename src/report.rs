//! Human-readable report rendering.
//!
//! One section per probed collection, in probe order, followed by a short
//! summary. Matching documents are shown with their store-assigned id and
//! the full payload pretty-printed as JSON — the report is the product of
//! this tool, so it favors completeness over brevity.

use std::io;

use chrono::Utc;

use crate::resolver::{ProbeOutcome, ProbeResult};

/// Writes the full probe report to `out`.
///
/// The report starts with the identity key and a UTC timestamp, then one
/// section per collection stating found/not-found (with every matching
/// document's id and payload for hits), and ends with a summary line. A
/// collection holding more than one match is flagged: duplicate records
/// under one identity are a data-integrity finding in their own right.
///
/// # Errors
/// Propagates any `io::Error` from `out`.
pub fn render_report<W: io::Write>(
    out: &mut W,
    identity_key: &str,
    results: &[ProbeResult],
) -> io::Result<()> {
    writeln!(out, "Identity probe report")?;
    writeln!(out, "  key:     {identity_key}")?;
    writeln!(out, "  time:    {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out, "  probed:  {} collections", results.len())?;

    for result in results {
        writeln!(out)?;
        render_section(out, result)?;
    }

    writeln!(out)?;
    render_summary(out, results)?;
    Ok(())
}

fn render_section<W: io::Write>(out: &mut W, result: &ProbeResult) -> io::Result<()> {
    let descriptor = &result.descriptor;
    let tag = if descriptor.legacy { " (legacy)" } else { "" };
    writeln!(out, "[{}] {}{tag}", descriptor.name, descriptor.label)?;

    match &result.outcome {
        ProbeOutcome::NotFound => {
            writeln!(out, "  not found")?;
        }
        ProbeOutcome::Found { documents } => {
            for doc in documents {
                writeln!(out, "  document {}", doc.id)?;
                let pretty = doc
                    .data_pretty()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                for line in pretty.lines() {
                    writeln!(out, "    {line}")?;
                }
            }
            if documents.len() > 1 {
                writeln!(
                    out,
                    "  warning: {} records share this identity key in one collection",
                    documents.len()
                )?;
            }
        }
    }

    Ok(())
}

fn render_summary<W: io::Write>(out: &mut W, results: &[ProbeResult]) -> io::Result<()> {
    let collections_hit = results.iter().filter(|r| r.outcome.is_found()).count();
    let total_matches: usize = results.iter().map(|r| r.outcome.match_count()).sum();

    if collections_hit == 0 {
        writeln!(out, "Summary: not found in any collection")?;
    } else {
        writeln!(
            out,
            "Summary: {total_matches} matching record(s) across {collections_hit} collection(s)"
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::CollectionDescriptor;
    use crate::document::Document;
    use serde_json::json;

    fn payload(email: &str) -> serde_json::Map<String, serde_json::Value> {
        let serde_json::Value::Object(map) = json!({ "email": email, "name": "Asha" }) else {
            panic!("expected JSON object");
        };
        map
    }

    fn render_to_string(results: &[ProbeResult]) -> String {
        let mut buf = Vec::new();
        render_report(&mut buf, "a@x.com", results).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_header_carries_key() {
        let report = render_to_string(&[]);
        assert!(report.contains("a@x.com"));
        assert!(report.contains("0 collections"));
    }

    #[test]
    fn test_not_found_section_is_explicit() {
        let results = vec![ProbeResult {
            descriptor: CollectionDescriptor::current("users_specific", "user profiles"),
            outcome: ProbeOutcome::NotFound,
        }];
        let report = render_to_string(&results);

        assert!(report.contains("[users_specific] user profiles"));
        assert!(report.contains("not found"));
        assert!(report.contains("Summary: not found in any collection"));
    }

    #[test]
    fn test_legacy_collections_are_tagged() {
        let results = vec![ProbeResult {
            descriptor: CollectionDescriptor::legacy("users", "user accounts"),
            outcome: ProbeOutcome::NotFound,
        }];
        let report = render_to_string(&results);
        assert!(report.contains("[users] user accounts (legacy)"));
    }

    #[test]
    fn test_found_section_shows_id_and_payload() {
        let results = vec![ProbeResult {
            descriptor: CollectionDescriptor::legacy("users", "user accounts"),
            outcome: ProbeOutcome::Found {
                documents: vec![Document::new("doc-1", payload("a@x.com"))],
            },
        }];
        let report = render_to_string(&results);

        assert!(report.contains("document doc-1"));
        assert!(report.contains("\"email\""));
        assert!(report.contains("\"Asha\""));
        assert!(report.contains("Summary: 1 matching record(s) across 1 collection(s)"));
    }

    #[test]
    fn test_duplicate_matches_are_flagged() {
        let results = vec![ProbeResult {
            descriptor: CollectionDescriptor::legacy("users", "user accounts"),
            outcome: ProbeOutcome::Found {
                documents: vec![
                    Document::new("doc-1", payload("a@x.com")),
                    Document::new("doc-2", payload("a@x.com")),
                ],
            },
        }];
        let report = render_to_string(&results);

        assert!(report.contains("warning: 2 records share this identity key"));
    }

    #[test]
    fn test_sections_follow_probe_order() {
        let results = vec![
            ProbeResult {
                descriptor: CollectionDescriptor::current("employers", "employer accounts"),
                outcome: ProbeOutcome::NotFound,
            },
            ProbeResult {
                descriptor: CollectionDescriptor::legacy("users", "user accounts"),
                outcome: ProbeOutcome::NotFound,
            },
        ];
        let report = render_to_string(&results);

        let employers = report.find("[employers]").unwrap();
        let users = report.find("[users]").unwrap();
        assert!(employers < users);
    }
}
