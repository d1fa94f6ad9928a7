//! Lane counts for known instrument / flowcell combinations.
//!
//! Used to default the allowed lanes of a run when the run configuration names an
//! instrument and flowcell but does not list lanes explicitly.

/// (instrument, flowcell, lanes)
const FLOWCELL_LANES: &[(&str, &str, u32)] = &[
    ("NovaSeq 6000", "SP", 2),
    ("NovaSeq 6000", "S1", 2),
    ("NovaSeq 6000", "S2", 2),
    ("NovaSeq 6000", "S4", 4),
    ("NovaSeq X", "1.5B", 2),
    ("NovaSeq X", "10B", 8),
    ("NovaSeq X", "25B", 8),
    ("NextSeq 500", "High", 4),
    ("NextSeq 500", "Mid", 4),
    ("NextSeq 550", "High", 4),
    ("NextSeq 550", "Mid", 4),
    ("NextSeq 2000", "P1", 1),
    ("NextSeq 2000", "P2", 1),
    ("NextSeq 2000", "P3", 1),
    ("MiSeq", "Standard", 1),
    ("MiSeq", "Micro", 1),
    ("MiSeq", "Nano", 1),
];

/// Lowercases and drops spaces, dashes and underscores so "NovaSeq_X" matches "novaseq x".
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the number of lanes on `flowcell` for `instrument`, if the combination is known.
///
/// # Example
/// ```
/// use fgsheet_lib::flowcell::lanes_for_flowcell;
///
/// assert_eq!(lanes_for_flowcell("NovaSeq 6000", "S4"), Some(4));
/// assert_eq!(lanes_for_flowcell("novaseq_x", "25b"), Some(8));
/// assert_eq!(lanes_for_flowcell("NovaSeq 6000", "S9"), None);
/// ```
#[must_use]
pub fn lanes_for_flowcell(instrument: &str, flowcell: &str) -> Option<u32> {
    let instrument = normalize(instrument);
    let flowcell = normalize(flowcell);
    FLOWCELL_LANES
        .iter()
        .find(|(i, f, _)| normalize(i) == instrument && normalize(f) == flowcell)
        .map(|&(_, _, lanes)| lanes)
}

/// Lists the flowcells known for an instrument, in table order.
#[must_use]
pub fn known_flowcells(instrument: &str) -> Vec<&'static str> {
    let instrument = normalize(instrument);
    FLOWCELL_LANES.iter().filter(|(i, _, _)| normalize(i) == instrument).map(|&(_, f, _)| f).collect()
}
