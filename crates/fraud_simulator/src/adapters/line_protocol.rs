//! InfluxDB line-protocol encoding for `domain::Point`.
//!
//! `measurement[,tag=value...] field=value[,field=value...]` with no
//! timestamp, so the server stamps ingestion time.

use domain::{FieldValue, Point};

/// Encode `point` as a single line (no trailing newline).
#[must_use]
pub fn encode(point: &Point) -> String {
    let mut line = String::with_capacity(128);
    push_escaped(&mut line, &point.measurement, &[',', ' ']);

    for (key, value) in &point.tags {
        line.push(',');
        push_escaped(&mut line, key, &[',', '=', ' ']);
        line.push('=');
        push_escaped(&mut line, value, &[',', '=', ' ']);
    }

    for (i, (key, value)) in point.fields.iter().enumerate() {
        line.push(if i == 0 { ' ' } else { ',' });
        push_escaped(&mut line, key, &[',', '=', ' ']);
        line.push('=');
        match value {
            FieldValue::Decimal(d) => line.push_str(&d.to_string()),
            FieldValue::Str(s) => {
                line.push('"');
                push_escaped(&mut line, s, &['"', '\\']);
                line.push('"');
            }
        }
    }
    line
}

fn push_escaped(out: &mut String, raw: &str, special: &[char]) {
    for c in raw.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}
