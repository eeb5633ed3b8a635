use std::fmt;

use serde::Serialize;

use super::error::ReportError;
use super::stats::Summary;

pub fn print_summary(title: &str, summary: &Summary) {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, title, summary);
    print!("{}", out);
}

fn write_summary(out: &mut impl fmt::Write, title: &str, summary: &Summary) -> fmt::Result {
    writeln!(out, "{} ({} samples)", title, summary.count)?;
    writeln!(
        out,
        "  50% Confidence Interval: [{:.2}, {:.2}] meters",
        summary.ci50.low, summary.ci50.high
    )?;
    writeln!(
        out,
        "  95% Confidence Interval: [{:.2}, {:.2}] meters",
        summary.ci95.low, summary.ci95.high
    )?;
    writeln!(out, "  Mean Error: {:.2} meters", summary.mean)?;
    writeln!(out, "  Median Error: {:.2} meters", summary.median)
}

#[derive(Serialize)]
struct SiteReport<'a> {
    site: &'a str,
    #[serde(flatten)]
    summary: &'a Summary,
}

pub fn print_json(site: &str, summary: &Summary) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(&SiteReport { site, summary })?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::summarize;

    #[test]
    fn lines_show_summary_values() {
        let summary = summarize(&[4.0, 1.0, 5.0, 3.0, 2.0]).unwrap();
        let mut out = String::new();
        write_summary(&mut out, "low indoor", &summary).unwrap();

        assert_eq!(
            out,
            "low indoor (5 samples)\n\
             \x20 50% Confidence Interval: [2.00, 4.00] meters\n\
             \x20 95% Confidence Interval: [1.10, 4.90] meters\n\
             \x20 Mean Error: 3.00 meters\n\
             \x20 Median Error: 3.00 meters\n"
        );
    }

    #[test]
    fn rounds_to_centimeters() {
        let summary = summarize(&[0.1, 0.5]).unwrap();
        let mut out = String::new();
        write_summary(&mut out, "site", &summary).unwrap();

        assert!(out.contains("Mean Error: 0.30 meters"), "{out}");
        assert!(out.contains("Median Error: 0.30 meters"), "{out}");
        assert!(out.contains("[0.11, 0.49]"), "{out}");
    }
}
