//! Text rendering of the landing page

use crate::status::{HealthStatus, StatusTone};
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
}

pub const EYEBROW: &str = "Seasonal, traceable, neighbor-grown";
pub const TITLE: &str = "Local Farmers Collective";
pub const LEAD: &str = "A curated network for fresh produce, transparent supply, and direct \
                        connections between growers and customers.";
pub const CALLS_TO_ACTION: [&str; 2] = ["Browse markets", "Become a vendor"];

pub const MARKET_HIGHLIGHTS: [Highlight; 3] = [
    Highlight {
        title: "Weekly harvest box",
        description: "Curated produce from farms within 50km. Reserve by Friday noon.",
    },
    Highlight {
        title: "Cold storage availability",
        description: "Shared lockers for dairy and greens, bookable by the hour.",
    },
    Highlight {
        title: "Bulk order requests",
        description: "Coordinate restaurants and co-ops for seasonal volume deals.",
    },
];

pub const COMMUNITY_SIGNALS: [Metric; 3] = [
    Metric { label: "Open farm stands", value: "12" },
    Metric { label: "Active growers", value: "48" },
    Metric { label: "Pickup points", value: "7" },
];

pub const GROWER_METRICS: [Metric; 3] = [
    Metric { label: "Response time", value: "< 2 hours" },
    Metric { label: "Order accuracy", value: "98%" },
    Metric { label: "Pickup windows", value: "3 per day" },
];

pub const HIGHLIGHTS_INTRO: &str = "Keep buyers informed and growers aligned with a single \
                                    source of truth for local availability.";
pub const GROWER_INTRO: &str = "Manage pickups, send updates to loyal customers, and keep \
                                product availability synchronized across channels.";

pub const FOOTER: &str = "Local Farmers Collective - Built for community-powered food systems.";

fn tone_marker(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Ok => "[ok]",
        StatusTone::Error => "[error]",
        StatusTone::Loading => "[..]",
    }
}

pub fn refresh_caption(status: &HealthStatus) -> &'static str {
    if status.is_loading() {
        "Checking..."
    } else {
        "Refresh status"
    }
}

pub fn last_checked_line(status: &HealthStatus) -> String {
    match status.checked_at_display() {
        Some(at) => format!("Last checked at {at}"),
        None => "Running first health check".to_string(),
    }
}

/// The status card: indicator, API base, last check time and refresh caption.
pub fn render_status_card(status: &HealthStatus, api_base: &str) -> String {
    format!(
        "{} {}\nAPI base: {api_base}\n{}\n< {} >",
        tone_marker(status.tone()),
        status.label,
        last_checked_line(status),
        refresh_caption(status),
    )
}

pub fn render_page(status: &HealthStatus, api_base: &str) -> String {
    let mut page = String::new();
    // Writing into a String cannot fail.
    let _ = write_page(&mut page, status, api_base);
    page
}

fn write_page(out: &mut impl Write, status: &HealthStatus, api_base: &str) -> fmt::Result {
    writeln!(out, "{EYEBROW}")?;
    writeln!(out, "# {TITLE}")?;
    writeln!(out, "{LEAD}")?;
    writeln!(out, "[{}]  [{}]\n", CALLS_TO_ACTION[0], CALLS_TO_ACTION[1])?;
    writeln!(out, "{}\n", render_status_card(status, api_base))?;

    for signal in COMMUNITY_SIGNALS {
        writeln!(out, "{:>4}  {}", signal.value, signal.label)?;
    }

    writeln!(out, "\n## Today's market highlights")?;
    writeln!(out, "{HIGHLIGHTS_INTRO}")?;
    for highlight in MARKET_HIGHLIGHTS {
        writeln!(out, "- {}: {}", highlight.title, highlight.description)?;
    }

    writeln!(out, "\n## Built for grower success")?;
    writeln!(out, "{GROWER_INTRO}")?;
    for metric in GROWER_METRICS {
        writeln!(out, "{}: {}", metric.label, metric.value)?;
    }

    write!(out, "\n{FOOTER}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Reachability;

    #[test]
    fn test_page_contains_headline_and_content() {
        let page = render_page(&HealthStatus::initial(), "http://localhost:3000");

        assert!(page.contains("# Local Farmers Collective"));
        assert!(page.contains("Weekly harvest box"));
        assert!(page.contains("48  Active growers"));
        assert!(page.contains("Order accuracy: 98%"));
        assert!(page.ends_with(FOOTER));
    }

    #[test]
    fn test_status_card_before_first_result() {
        let card = render_status_card(&HealthStatus::loading(), "http://localhost:3000");

        assert!(card.starts_with("[..] Checking API connectivity"));
        assert!(card.contains("API base: http://localhost:3000"));
        assert!(card.contains("Running first health check"));
        assert!(card.ends_with("< Checking... >"));
    }

    #[test]
    fn test_status_card_after_result() {
        let online = HealthStatus::reachable(&Reachability::Online);
        let card = render_status_card(&online, "https://api.example");

        assert!(card.starts_with("[ok] API online"));
        assert!(card.contains("Last checked at "));
        assert!(card.ends_with("< Refresh status >"));

        let card = render_status_card(&HealthStatus::offline(), "https://api.example");
        assert!(card.starts_with("[error] API offline"));
    }
}
