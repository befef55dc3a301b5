//! Schema for the Civic Information `voterinfo` response.
//!
//! Every struct deserializes with defaults so the sparse responses the API
//! returns for most addresses still parse. Field names follow the wire
//! format (camelCase, with two documented snake_case exceptions on the
//! state resource).

use serde::Deserialize;

/// The full parsed response for one voter-info query. Replaced wholesale on
/// a re-query, never mutated field by field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoterInfoResponse {
    pub kind: String,
    pub election: Election,
    pub other_elections: Vec<Election>,
    pub normalized_input: Address,
    pub polling_locations: Vec<PollingPlace>,
    pub early_vote_sites: Vec<PollingPlace>,
    pub drop_off_locations: Vec<PollingPlace>,
    pub contests: Vec<Contest>,
    // The API declares this as an array, but in practice it holds at most
    // one entry for the queried address.
    pub state: Vec<State>,
    pub mail_only: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Election {
    pub id: String,
    pub name: String,
    pub election_day: String,
    pub ocd_division_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub location_name: String,
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    /// One-line rendering: comma-separated non-empty components, with the
    /// zip joined to the state by a space ("Richmond, VA 23220").
    pub fn display(&self) -> String {
        let parts: Vec<&str> = [
            &self.location_name,
            &self.line1,
            &self.line2,
            &self.line3,
            &self.city,
            &self.state,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|part| !part.is_empty())
        .collect();

        let mut out = parts.join(", ");
        if !self.zip.is_empty() {
            if !self.state.is_empty() {
                out.push(' ');
            } else if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&self.zip);
        }
        out
    }

    pub fn is_blank(&self) -> bool {
        *self == Address::default()
    }
}

/// One voting site. Used for polling locations, early-vote sites, and
/// drop-off locations alike.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollingPlace {
    pub address: Address,
    pub notes: String,
    pub polling_hours: String,
    pub name: String,
    pub voter_services: String,
    pub start_date: String,
    pub end_date: String,
    pub latitude: f64,
    pub longitude: f64,
    pub sources: Vec<Source>,
}

impl PollingPlace {
    /// The best available name: the site name, then the address's location
    /// name, then the whole address line.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            self.name.clone()
        } else if !self.address.location_name.is_empty() {
            self.address.location_name.clone()
        } else {
            self.address.display()
        }
    }

    /// A Google Maps search link for the site. Prefers the street address;
    /// falls back to coordinates. None when neither is available.
    pub fn maps_url(&self) -> Option<String> {
        let query = if !self.address.is_blank() {
            self.address.display()
        } else if self.latitude != 0.0 || self.longitude != 0.0 {
            format!("{:.6},{:.6}", self.latitude, self.longitude)
        } else {
            return None;
        };
        let url = reqwest::Url::parse_with_params(
            "https://www.google.com/maps/search/",
            &[("api", "1"), ("query", query.as_str())],
        )
        .ok()?;
        Some(url.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contest {
    // Free-form on the wire ("General", "Referendum", ...); the API does
    // not document a closed value set.
    #[serde(rename = "type")]
    pub contest_type: String,
    pub primary_party: String,
    pub electorate_specifications: String,
    pub special: String,
    pub ballot_title: String,
    pub office: String,
    pub level: Vec<String>,
    pub roles: Vec<String>,
    pub district: District,
    // The published schema says long for these three, but the API returns
    // strings.
    pub number_elected: String,
    pub number_voting_for: String,
    pub ballot_placement: String,
    pub candidates: Vec<Candidate>,
    pub referendum_title: String,
    pub referendum_subtitle: String,
    pub referendum_url: String,
    pub referendum_brief: String,
    pub referendum_text: String,
    pub referendum_pro_statement: String,
    pub referendum_con_statement: String,
    pub referendum_passage_threshold: String,
    pub referendum_effect_of_abstain: String,
    pub referendum_ballot_responses: Vec<String>,
    pub sources: Vec<Source>,
}

impl Contest {
    /// List title: the ballot title (or the office when absent), truncated
    /// at a word boundary past 80 characters.
    pub fn display_title(&self) -> String {
        let base = if !self.ballot_title.is_empty() {
            &self.ballot_title
        } else {
            &self.office
        };
        elliptical_truncate(base, 80)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub name: String,
    pub party: String,
    pub candidate_url: String,
    pub phone: String,
    pub photo_url: String,
    pub email: String,
    pub order_on_ballot: i64,
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Channel {
    #[serde(rename = "type")]
    pub channel_type: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct District {
    pub name: String,
    pub scope: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Source {
    pub name: String,
    pub official: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct State {
    pub name: String,
    pub election_administration_body: ElectionAdministrationBody,
    // snake_case on the wire, unlike the rest of the schema.
    #[serde(rename = "local_jurisdiction")]
    pub local_jurisdiction: Option<Box<AdministrationRegion>>,
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElectionAdministrationBody {
    pub name: String,
    pub election_info_url: String,
    pub election_registration_url: String,
    pub election_registration_confirmation_url: String,
    pub election_notice_text: String,
    pub election_notice_url: String,
    pub absentee_voting_info_url: String,
    pub voting_location_finder_url: String,
    pub ballot_info_url: String,
    pub election_rules_url: String,
    #[serde(rename = "voter_services")]
    pub voter_services: Vec<String>,
    pub hours_of_operation: String,
    pub correspondence_address: Address,
    pub physical_address: Address,
    pub election_officials: Vec<ElectionOfficial>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElectionOfficial {
    pub name: String,
    pub title: String,
    pub office_phone_number: String,
    pub fax_number: String,
    pub email_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdministrationRegion {
    pub name: String,
    pub election_administration_body: ElectionAdministrationBody,
}

/// Truncates `text` after `max_len` characters, cutting back to the last
/// whitespace boundary and appending an ellipsis.
pub fn elliptical_truncate(text: &str, max_len: usize) -> String {
    let mut last_space = None;
    for (count, (ix, ch)) in text.char_indices().enumerate() {
        if ch.is_whitespace() {
            last_space = Some(ix);
        }
        if count + 1 > max_len {
            let cut = last_space.unwrap_or(ix);
            return format!("{}...", &text[..cut]);
        }
    }
    text.to_string()
}
