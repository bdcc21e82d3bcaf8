//! Form Fields
//!
//! Field ids are the public surface of the form and stay fixed.

pub const FIRST_NAME: &str = "vorname_input";
pub const LAST_NAME: &str = "nachname_input";
pub const BIRTHDATE: &str = "geburtsdatum_input";
pub const ROLE: &str = "taetigkeit_input";
pub const PARISH: &str = "kirchengemeinde_input";
pub const MONTH: &str = "monatjahr_input";

pub const SERVICE_LOCATION: &str = "gd_kirchort";
pub const SERVICE_DATE: &str = "gd_datum";
pub const SERVICE_RATE: &str = "gd_satz";
pub const SERVICE_START: &str = "gd_beginn";
pub const SERVICE_END: &str = "gd_ende";

pub const WORK_DATE: &str = "arbeitszeit_datum";
pub const WORK_START: &str = "arbeitsbeginn";
pub const WORK_END: &str = "arbeitsende";

pub const SERVICES_JSON: &str = "gottesdienste_json";
pub const WORK_TIMES_JSON: &str = "arbeitszeiten_json";

/// Fields kept across sessions in the profile blob
pub const PROFILE_FIELDS: &[&str] = &[FIRST_NAME, LAST_NAME, BIRTHDATE, ROLE, PARISH];

/// Fields whose change moves both lists to another partition
pub const CONTEXT_FIELDS: &[&str] = &[PARISH, MONTH, ROLE];

pub const SERVICE_INPUTS: &[&str] = &[
    SERVICE_LOCATION,
    SERVICE_DATE,
    SERVICE_RATE,
    SERVICE_START,
    SERVICE_END,
];

pub const WORK_INPUTS: &[&str] = &[WORK_DATE, WORK_START, WORK_END];

/// Every field that goes into the synced payload, in form order
pub const ALL_FIELDS: &[&str] = &[
    FIRST_NAME,
    LAST_NAME,
    BIRTHDATE,
    ROLE,
    PARISH,
    MONTH,
    SERVICE_LOCATION,
    SERVICE_DATE,
    SERVICE_RATE,
    SERVICE_START,
    SERVICE_END,
    WORK_DATE,
    WORK_START,
    WORK_END,
    SERVICES_JSON,
    WORK_TIMES_JSON,
];

/// The role that records services instead of work times
pub const ORGANIST: &str = "Organist";

/// Only the organist role changes the form. The others are placeholder choices.
pub const ROLES: &[&str] = &[ORGANIST, "Küster", "Reinigungskraft", "Hausmeister", "Pfarrsekretär"];

pub const PARISHES: &[&str] = &[
    "Heilige Katharina Kaspar Limburger Land",
    "St. Peter und Paul Bad Camberg",
    "Heilig Geist Goldener Grund",
];

const PLACES_HKK: &[&str] = &[
    "St. Georg Dom",
    "St. Antonius Eschhofen",
    "St. Hildegard Limburg",
    "St. Jakobus Lindenholzhausen",
    "St. Johannes d.T. Elz",
    "St. Josef Staffel",
    "St. Lubentius Dietkirchen",
    "St. Marien Limburg",
    "St. Nikolaus Dehrn",
    "St. Servatius Offheim",
];

const PLACES_BAD_CAMBERG: &[&str] = &["St. Petrus Eisenbach", "St. Christophorus Niederselters"];

const PLACES_HEILIG_GEIST: &[&str] = &["St. Maximin Niederbrechen", "St. Peter und Paul Villmar"];

/// Location suggestions offered for a parish
pub fn place_suggestions(parish: &str) -> &'static [&'static str] {
    let parish = crate::keys::normalize_key_part(parish);
    match parish.as_str() {
        "Heilige Katharina Kaspar Limburger Land" => PLACES_HKK,
        "St. Peter und Paul Bad Camberg" => PLACES_BAD_CAMBERG,
        p if p.contains("Heilig Geist") => PLACES_HEILIG_GEIST,
        _ => &[],
    }
}

/// Which list panels are shown for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub services: bool,
    pub work_times: bool,
}

impl Visibility {
    pub fn for_role(role: &str) -> Self {
        let organist = role.trim() == ORGANIST;
        Self { services: organist, work_times: !organist }
    }
}
