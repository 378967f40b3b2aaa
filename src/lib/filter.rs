use super::geojson::Feature;

/// Sentinel emitted by state pickers when no state is selected.
pub const ANY_STATE: &str = "(Any)";

/// US state and territory abbreviations accepted by the CLI.
pub const STATE_ABBRS: [&str; 54] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN",
    "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ",
    "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA",
    "WI", "WV", "WY", "PR", "GU", "VI",
];

pub fn is_known_state(abbr: &str) -> bool {
    STATE_ABBRS.iter().any(|known| known.eq_ignore_ascii_case(abbr))
}

/// A single check against a feature's lower-cased `areaDesc` text.
///
/// Both variants are plain substring containment. Matching stays a
/// free-text heuristic on purpose: a county named "Lee" will match any
/// description containing "lee", and no FIPS or state-code lookup is
/// attempted.
#[derive(PartialEq, Debug, Clone)]
pub enum Condition {
    County(String),
    State(String),
}

impl Condition {
    fn check(&self, area_desc: &str) -> bool {
        match self {
            Condition::County(needle) | Condition::State(needle) => area_desc.contains(needle),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct Query {
    pub conditions: Vec<Condition>,
}

/// Build a query from county/state inputs.
///
/// The county input is trimmed, the state input is taken as-is; empty
/// inputs and the `"(Any)"` state sentinel contribute no condition, so a
/// blank query matches every feature.
///
/// # Example
///
/// ```
/// use flood_tracker::filter::parse;
///
/// let query = parse("Travis", "(Any)");
/// assert_eq!(query.conditions.len(), 1);
/// ```
pub fn parse(county: &str, state: &str) -> Query {
    let mut conditions = vec![];
    let county = county.trim();
    if !county.is_empty() {
        conditions.push(Condition::County(county.to_lowercase()));
    }
    if !state.is_empty() && state != ANY_STATE {
        conditions.push(Condition::State(state.to_lowercase()));
    }
    Query { conditions }
}

pub trait Filter {
    fn matches(&self, query: &Query) -> bool;
}

impl Filter for Feature {
    fn matches(&self, query: &Query) -> bool {
        if query.conditions.is_empty() {
            return true;
        }
        let area_desc = self.area_desc().to_lowercase();
        query.conditions.iter().all(|c| c.check(&area_desc))
    }
}
