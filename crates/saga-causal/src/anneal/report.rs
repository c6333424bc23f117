//! Tab-separated mass-delta report, one row per node per anneal pass.

use std::fmt::Write;

use saga_core::models::MassDelta;

pub const DELTA_REPORT_HEADER: &str =
    "link_id\tmass_base\tmass_prev\tmass_new\tboost\ttier_prev\ttier_new\ttop_contributor_id";

/// Render deltas as TSV with a header row. Floats use six decimals; a missing
/// top contributor is written as an empty field.
pub fn delta_report_tsv(deltas: &[MassDelta]) -> String {
    let mut out = String::with_capacity(DELTA_REPORT_HEADER.len() + deltas.len() * 64);
    out.push_str(DELTA_REPORT_HEADER);
    out.push('\n');
    for d in deltas {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{}\t{}\t{}",
            d.link_id,
            d.mass_base,
            d.mass_prev,
            d.mass_new,
            d.boost,
            d.tier_prev,
            d.tier_new,
            d.top_contributor_id.as_deref().unwrap_or(""),
        );
    }
    out
}
