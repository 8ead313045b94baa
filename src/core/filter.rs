//! Three-valued event filters

use super::log_event::LogEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Outcome of a filter evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDecision {
    /// Skip the remaining checks of the current stage and keep the event
    Accept,
    /// Drop the event
    Deny,
    /// Defer to the next check in sequence
    Neutral,
}

impl fmt::Display for FilterDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterDecision::Accept => write!(f, "accept"),
            FilterDecision::Deny => write!(f, "deny"),
            FilterDecision::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for FilterDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept" => Ok(FilterDecision::Accept),
            "deny" => Ok(FilterDecision::Deny),
            "neutral" => Ok(FilterDecision::Neutral),
            _ => Err(format!("Invalid filter decision: '{}'", s)),
        }
    }
}

/// An event filter
///
/// The provided `filter` accepts everything, which is the behaviour of a
/// bare filter with no predicate.
pub trait Filter: Send + Sync {
    fn filter(&self, _event: &LogEvent) -> FilterDecision {
        FilterDecision::Accept
    }

    fn type_name(&self) -> &str {
        "Filter"
    }
}

/// Filter that accepts every event
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl Filter for AcceptAll {}

/// Ordered chain of filters; the first non-neutral decision wins
#[derive(Clone, Default)]
pub struct CompositeFilter {
    filters: Vec<Arc<dyn Filter>>,
}

impl CompositeFilter {
    pub fn new(filters: Vec<Arc<dyn Filter>>) -> Self {
        Self { filters }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Filter for CompositeFilter {
    fn filter(&self, event: &LogEvent) -> FilterDecision {
        self.filters
            .iter()
            .map(|f| f.filter(event))
            .find(|decision| *decision != FilterDecision::Neutral)
            .unwrap_or(FilterDecision::Neutral)
    }

    fn type_name(&self) -> &str {
        "CompositeFilter"
    }
}

impl fmt::Debug for CompositeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|flt| flt.type_name()))
            .finish()
    }
}

/// Collapse a list of filters: none -> `None`, one -> itself, more -> composite
pub fn combine(mut filters: Vec<Arc<dyn Filter>>) -> Option<Arc<dyn Filter>> {
    match filters.len() {
        0 => None,
        1 => filters.pop(),
        _ => Some(Arc::new(CompositeFilter::new(filters))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Message};

    struct Fixed(FilterDecision);

    impl Filter for Fixed {
        fn filter(&self, _event: &LogEvent) -> FilterDecision {
            self.0
        }
    }

    fn event() -> LogEvent {
        LogEvent::new("test", LogLevel::INFO, Message::from("hello"))
    }

    #[test]
    fn test_default_filter_accepts() {
        assert_eq!(AcceptAll.filter(&event()), FilterDecision::Accept);
    }

    #[test]
    fn test_composite_first_non_neutral_wins() {
        let composite = CompositeFilter::new(vec![
            Arc::new(Fixed(FilterDecision::Neutral)),
            Arc::new(Fixed(FilterDecision::Deny)),
            Arc::new(Fixed(FilterDecision::Accept)),
        ]);
        assert_eq!(composite.filter(&event()), FilterDecision::Deny);
    }

    #[test]
    fn test_composite_all_neutral() {
        let composite = CompositeFilter::new(vec![
            Arc::new(Fixed(FilterDecision::Neutral)),
            Arc::new(Fixed(FilterDecision::Neutral)),
        ]);
        assert_eq!(composite.filter(&event()), FilterDecision::Neutral);
        assert_eq!(CompositeFilter::default().filter(&event()), FilterDecision::Neutral);
    }

    #[test]
    fn test_combine_rule() {
        assert!(combine(Vec::new()).is_none());

        let single = combine(vec![Arc::new(Fixed(FilterDecision::Deny))]).unwrap();
        assert_eq!(single.type_name(), "Filter");

        let many = combine(vec![
            Arc::new(Fixed(FilterDecision::Neutral)),
            Arc::new(Fixed(FilterDecision::Accept)),
        ])
        .unwrap();
        assert_eq!(many.type_name(), "CompositeFilter");
        assert_eq!(many.filter(&event()), FilterDecision::Accept);
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!("ACCEPT".parse::<FilterDecision>(), Ok(FilterDecision::Accept));
        assert_eq!("neutral".parse::<FilterDecision>(), Ok(FilterDecision::Neutral));
        assert!("maybe".parse::<FilterDecision>().is_err());
    }
}
