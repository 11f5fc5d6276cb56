//! Pure projections from records to the card and detail views the browser
//! renders. Nothing here touches browser state.

use crate::browse::records::{
    normalize_url, AddressRef, CompanyRecord, CriteriaRecord, LocationRecord, OfferRecord,
    SalaryRecord,
};

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_ROLE: &str = "Unknown Role";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const NOT_AVAILABLE: &str = "N/A";
pub const PLACEHOLDER_LOGO: &str = "https://via.placeholder.com/50";
pub const LINK_FALLBACK: &str = "#";
pub const CTA_TEXT: &str = "View Details";

/// Summary shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCard {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub logo: String,
    pub link: String,
    pub cta: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

/// Expanded view of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetail {
    pub card: RecordCard,
    pub lines: Vec<DetailLine>,
    pub tags: Vec<String>,
}

impl RecordDetail {
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

/// A record the browser can list and expand.
pub trait Browsable {
    fn card(&self) -> RecordCard;
    fn detail(&self) -> RecordDetail;
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn format_number(value: f64) -> String {
    format!("{value}")
}

/// `city, state` when both are known.
pub fn short_location(location: Option<&LocationRecord>) -> String {
    location
        .and_then(|loc| Some(format!("{}, {}", non_blank(&loc.city)?, non_blank(&loc.state)?)))
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}

/// `address_line, area, city, state, country pincode`; blank parts are dropped.
pub fn full_location(location: Option<&LocationRecord>) -> String {
    let Some(loc) = location else {
        return UNKNOWN_LOCATION.to_string();
    };
    let parts: Vec<&str> = [&loc.address_line, &loc.area, &loc.city, &loc.state]
        .into_iter()
        .filter_map(non_blank)
        .collect();
    let mut line = parts.join(", ");
    if let Some(country) = non_blank(&loc.country) {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(country);
    }
    if let Some(pincode) = non_blank(&loc.pincode) {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(pincode);
    }
    if line.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        line
    }
}

/// Salary in lakhs per annum, e.g. `₹6.00 - ₹9.50 LPA`.
pub fn salary_text(salary: Option<&SalaryRecord>) -> String {
    match salary {
        Some(SalaryRecord {
            min: Some(min),
            max: Some(max),
        }) => format!("₹{:.2} - ₹{:.2} LPA", min / 1e5, max / 1e5),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn criteria_tag(criteria: Option<&CriteriaRecord>) -> String {
    let Some(criteria) = criteria else {
        return NOT_AVAILABLE.to_string();
    };
    let passout = if criteria.passout_year.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        criteria
            .passout_year
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "CGPA {}, Max Backlogs: {}, Branch: {}, Passout: {}",
        criteria
            .min_result
            .map(format_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        criteria
            .max_backlog
            .map(format_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        text_or(criteria.branch.as_deref(), NOT_AVAILABLE),
        passout
    )
}

fn logo_of(company: Option<&CompanyRecord>) -> String {
    company
        .and_then(|c| c.logo.as_deref())
        .and_then(normalize_url)
        .unwrap_or_else(|| PLACEHOLDER_LOGO.to_string())
}

fn link_of(company: Option<&CompanyRecord>) -> String {
    company
        .and_then(|c| c.link.as_deref())
        .and_then(normalize_url)
        .unwrap_or_else(|| LINK_FALLBACK.to_string())
}

impl Browsable for OfferRecord {
    fn card(&self) -> RecordCard {
        let company = self.company.as_ref();
        let min_result = self
            .criteria
            .as_ref()
            .and_then(|c| c.min_result)
            .filter(|v| *v != 0.0)
            .map(format_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        RecordCard {
            title: text_or(company.and_then(|c| c.name.as_deref()), UNKNOWN_COMPANY),
            subtitle: text_or(self.role.as_deref(), UNKNOWN_ROLE),
            description: format!(
                "Location: {} | Criteria: CGPA > {}",
                short_location(self.location.as_ref()),
                min_result
            ),
            logo: logo_of(company),
            link: link_of(company),
            cta: CTA_TEXT,
        }
    }

    fn detail(&self) -> RecordDetail {
        let line = |label, value| DetailLine { label, value };
        let openings = self
            .total_opening
            .map(format_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let mut tags = vec![criteria_tag(self.criteria.as_ref())];
        tags.extend(
            self.skills
                .iter()
                .map(|skill| skill.trim())
                .filter(|skill| !skill.is_empty())
                .map(str::to_string),
        );
        RecordDetail {
            card: self.card(),
            lines: vec![
                line("Location", full_location(self.location.as_ref())),
                line("Openings", openings),
                line("Drive Type", text_or(self.drive.as_deref(), NOT_AVAILABLE)),
                line("Offer Type", text_or(self.offer_type.as_deref(), NOT_AVAILABLE)),
                line("Sector", text_or(self.sector.as_deref(), NOT_AVAILABLE)),
                line("Salary", salary_text(self.salary.as_ref())),
            ],
            tags,
        }
    }
}

impl Browsable for CompanyRecord {
    fn card(&self) -> RecordCard {
        let address = match &self.address {
            Some(AddressRef::Inline(location)) => short_location(Some(location)),
            _ => UNKNOWN_LOCATION.to_string(),
        };
        RecordCard {
            title: text_or(self.name.as_deref(), UNKNOWN_COMPANY),
            subtitle: text_or(self.contact.as_deref(), NOT_AVAILABLE),
            description: format!("Location: {address}"),
            logo: logo_of(Some(self)),
            link: link_of(Some(self)),
            cta: CTA_TEXT,
        }
    }

    fn detail(&self) -> RecordDetail {
        let address = match &self.address {
            Some(AddressRef::Inline(location)) => full_location(Some(location)),
            Some(AddressRef::Id(id)) if !id.trim().is_empty() => format!("Address record {id}"),
            _ => UNKNOWN_LOCATION.to_string(),
        };
        let card = self.card();
        RecordDetail {
            lines: vec![
                DetailLine {
                    label: "Website",
                    value: card.link.clone(),
                },
                DetailLine {
                    label: "Description",
                    value: text_or(self.description.as_deref(), NOT_AVAILABLE),
                },
                DetailLine {
                    label: "Contact",
                    value: text_or(self.contact.as_deref(), NOT_AVAILABLE),
                },
                DetailLine {
                    label: "Address",
                    value: address,
                },
            ],
            tags: Vec::new(),
            card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offer(value: serde_json::Value) -> OfferRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn bare_offer_uses_fallbacks() {
        let card = offer(json!({})).card();
        assert_eq!(card.title, UNKNOWN_COMPANY);
        assert_eq!(card.subtitle, UNKNOWN_ROLE);
        assert_eq!(card.description, "Location: Unknown Location | Criteria: CGPA > N/A");
        assert_eq!(card.logo, PLACEHOLDER_LOGO);
        assert_eq!(card.link, "#");
        assert_eq!(card.cta, "View Details");
    }

    #[test]
    fn full_offer_card_and_detail() {
        let record = offer(json!({
            "company": {"name": "Acme", "logo": "cdn.acme.com/l.png", "link": "http://acme.com"},
            "role": "SDE",
            "location": {"address_line": "12 Ring Rd", "area": "Athwa", "city": "Surat",
                         "state": "Gujarat", "country": "India", "pincode": 395001},
            "total_opening": 3,
            "drive": "on campus",
            "salary": {"min": 600000, "max": 950000},
            "criteria": {"min_result": 7.5, "max_backlog": 0, "passout_year": [2025, 2026], "branch": "CE"},
            "skills": ["Rust", " "]
        }));
        let card = record.card();
        assert_eq!(card.description, "Location: Surat, Gujarat | Criteria: CGPA > 7.5");
        assert_eq!(card.logo, "https://cdn.acme.com/l.png");
        assert_eq!(card.link, "http://acme.com");

        let detail = record.detail();
        assert_eq!(
            detail.value_of("Location"),
            Some("12 Ring Rd, Athwa, Surat, Gujarat, India 395001")
        );
        assert_eq!(detail.value_of("Salary"), Some("₹6.00 - ₹9.50 LPA"));
        assert_eq!(detail.value_of("Offer Type"), Some("N/A"));
        assert_eq!(
            detail.tags,
            vec![
                "CGPA 7.5, Max Backlogs: 0, Branch: CE, Passout: 2025, 2026".to_string(),
                "Rust".to_string()
            ]
        );
    }

    #[test]
    fn projection_is_repeatable() {
        let record = offer(json!({"role": "SDE", "total_opening": "2"}));
        assert_eq!(record.detail(), record.detail());
        assert_eq!(record.detail().value_of("Openings"), Some("2"));
    }

    #[test]
    fn zero_openings_are_shown_but_zero_cgpa_is_not() {
        let record = offer(json!({"total_opening": 0, "criteria": {"min_result": 0}}));
        assert_eq!(record.detail().value_of("Openings"), Some("0"));
        assert_eq!(record.card().description, "Location: Unknown Location | Criteria: CGPA > N/A");
        assert_eq!(offer(json!({})).detail().value_of("Openings"), Some("N/A"));
    }

    #[test]
    fn company_detail_handles_address_reference() {
        let company: CompanyRecord =
            serde_json::from_value(json!({"name": "Acme", "address": "a1", "link": "acme.com"}))
                .unwrap();
        let detail = company.detail();
        assert_eq!(detail.card.title, "Acme");
        assert_eq!(detail.value_of("Website"), Some("https://acme.com"));
        assert_eq!(detail.value_of("Address"), Some("Address record a1"));
        assert_eq!(detail.value_of("Description"), Some("N/A"));
    }
}
