//! JSON persistence of a contact directory.
//!
//! The serialized form links individuals and companies by *name strings*,
//! never by identity, and a company record may be written before or after
//! the personal records that reference it. Decoding is therefore a two-pass
//! algorithm: [`parse_records`] constructs bare contacts with their
//! sub-records while stashing the relationship names in side tables, and
//! [`resolve_links`] then matches those names against the constructed set,
//! going through the directory's symmetry-preserving operations. A name
//! that matches nothing is a descriptive hint, not a referential-integrity
//! violation, and leaves the relationship unset.

use crate::directory::Directory;
use crate::domain::{Address, Country, EmailAddress, Link, PhoneNumber};
use crate::error::{ParseError, ParseResult, StoreError, StoreResult};
use crate::models::{Contact, ContactId, ContactKind, Note};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Date format of the document's top-level `date` field.
const DATE_FORMAT: &str = "%Y/%m/%d";

/// Relationship name references recorded during pass 1, resolved in pass 2.
///
/// Both directions may mention the same pair; the resolution converges to
/// one consistent graph because the underlying linking operations are
/// idempotent.
#[derive(Debug, Default)]
pub struct PendingLinks {
    /// (personal contact, corporation name) pairs
    corporations: Vec<(ContactId, String)>,
    /// (corporate contact, employee display name) pairs
    employees: Vec<(ContactId, String)>,
}

impl PendingLinks {
    /// True when nothing is left to resolve.
    pub fn is_empty(&self) -> bool {
        self.corporations.is_empty() && self.employees.is_empty()
    }
}

/// Decode a whole contacts document.
///
/// # Errors
///
/// Any structurally missing required field aborts the decode with a
/// [`ParseError`]; no partial directory is ever returned.
pub fn decode(text: &str) -> ParseResult<(Directory, NaiveDate)> {
    let root: Value = serde_json::from_str(text)?;

    let date_text = root
        .get("date")
        .ok_or(ParseError::MissingNode("date"))?
        .as_str()
        .ok_or_else(|| ParseError::InvalidDate(String::new()))?;
    let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(date_text.to_string()))?;

    let records = root
        .get("contacts")
        .ok_or(ParseError::MissingNode("contacts"))?
        .as_array()
        .ok_or(ParseError::NotAnArray("contacts"))?;

    let (mut directory, pending) = parse_records(records)?;
    resolve_links(&mut directory, pending);
    Ok((directory, date))
}

/// Pass 1: construct every contact with its five sub-record maps, recording
/// relationship names in side tables instead of resolving them, since the
/// referenced contact may not be built yet.
pub fn parse_records(records: &[Value]) -> ParseResult<(Directory, PendingLinks)> {
    let mut directory = Directory::new();
    let mut pending = PendingLinks::default();

    for record in records {
        let name = required_str(record, "contact", "name")?;

        // Presence of "firstname" selects an individual.
        let (mut contact, corporation_name, employee_names) = match record.get("firstname") {
            Some(node) => {
                let first_name = node.as_str().ok_or(ParseError::MissingField {
                    record: "contact",
                    field: "firstname",
                })?;
                let corporation = match record.get("corporation") {
                    Some(value) => Some(
                        value
                            .as_str()
                            .ok_or(ParseError::MissingField {
                                record: "contact",
                                field: "corporation",
                            })?
                            .to_string(),
                    ),
                    None => None,
                };
                (Contact::personal(first_name, name)?, corporation, Vec::new())
            }
            None => {
                let mut employees = Vec::new();
                if let Some(node) = record.get("employees") {
                    let entries = node.as_array().ok_or(ParseError::NotAnArray("employees"))?;
                    for entry in entries {
                        let employee = entry.as_str().ok_or(ParseError::MissingField {
                            record: "employees",
                            field: "name",
                        })?;
                        employees.push(employee.to_string());
                    }
                }
                (Contact::corporate(name)?, None, employees)
            }
        };

        if let Some(node) = record.get("image") {
            let uri = node.as_str().ok_or(ParseError::MissingField {
                record: "contact",
                field: "image",
            })?;
            contact.set_image(uri);
        }

        read_phone_numbers(record, &mut contact)?;
        read_addresses(record, &mut contact)?;
        read_emails(record, &mut contact)?;
        read_links(record, &mut contact)?;
        read_notes(record, &mut contact)?;

        match directory.add(contact) {
            Some(id) => {
                if let Some(corporation) = corporation_name {
                    pending.corporations.push((id, corporation));
                }
                for employee in employee_names {
                    pending.employees.push((id, employee));
                }
            }
            None => warn!(name, "duplicate contact record ignored"),
        }
    }

    Ok((directory, pending))
}

/// Pass 2: match recorded names against the constructed set and establish
/// the links through the directory, which updates both sides of each link.
/// Unresolvable names are logged and skipped.
pub fn resolve_links(directory: &mut Directory, pending: PendingLinks) {
    for (corporation, employee_name) in pending.employees {
        match directory.find_personal(&employee_name) {
            Some(person) => {
                directory.add_employee(corporation, person);
            }
            None => debug!(employee = %employee_name, "employee name matches no contact"),
        }
    }
    for (person, corporation_name) in pending.corporations {
        match directory.find_corporate(&corporation_name) {
            Some(corporation) => {
                directory.set_corporation(person, Some(corporation));
            }
            None => debug!(corporation = %corporation_name, "corporation name matches no contact"),
        }
    }
}

/// Encode a directory to a document value, the dual single pass: only name
/// strings are emitted for relationships, never identities.
pub fn encode(directory: &Directory, date: NaiveDate) -> Value {
    let contacts: Vec<Value> = directory
        .iter()
        .map(|(_, contact)| encode_contact(directory, contact))
        .collect();
    json!({
        "date": date.format(DATE_FORMAT).to_string(),
        "contacts": contacts,
    })
}

fn encode_contact(directory: &Directory, contact: &Contact) -> Value {
    let mut node = Map::new();
    node.insert("name".to_string(), json!(contact.name()));

    match contact.kind() {
        ContactKind::Personal {
            first_name,
            corporation,
        } => {
            node.insert("firstname".to_string(), json!(first_name));
            if let Some(employer) = corporation.and_then(|id| directory.get(id)) {
                node.insert("corporation".to_string(), json!(employer.name()));
            }
        }
        ContactKind::Corporate { employees } => {
            if !employees.is_empty() {
                let names: Vec<String> = employees
                    .iter()
                    .filter_map(|id| directory.get(*id))
                    .map(Contact::display_name)
                    .collect();
                node.insert("employees".to_string(), json!(names));
            }
        }
    }

    if let Some(image) = contact.image() {
        node.insert("image".to_string(), json!(image));
    }

    let phones: Vec<Value> = contact
        .phone_numbers()
        .map(|(label, number)| json!({ "name": label, "number": number.to_string() }))
        .collect();
    if !phones.is_empty() {
        node.insert("phones".to_string(), json!(phones));
    }

    let addresses: Vec<Value> = contact
        .addresses()
        .map(|(label, address)| encode_address(label, address))
        .collect();
    if !addresses.is_empty() {
        node.insert("addresses".to_string(), json!(addresses));
    }

    let emails: Vec<Value> = contact
        .emails()
        .map(|(label, email)| json!({ "name": label, "value": email }))
        .collect();
    if !emails.is_empty() {
        node.insert("emails".to_string(), json!(emails));
    }

    let links: Vec<Value> = contact
        .links()
        .map(|(label, link)| json!({ "name": label, "value": link }))
        .collect();
    if !links.is_empty() {
        node.insert("links".to_string(), json!(links));
    }

    let notes: Vec<Value> = contact
        .notes()
        .map(|(label, note)| json!({ "name": label, "content": note.content() }))
        .collect();
    if !notes.is_empty() {
        node.insert("notes".to_string(), json!(notes));
    }

    Value::Object(node)
}

fn encode_address(label: &str, address: &Address) -> Value {
    let mut node = Map::new();
    node.insert("name".to_string(), json!(label));
    if let Some(number) = address.number() {
        node.insert("number".to_string(), json!(number));
    }
    node.insert("way".to_string(), json!(address.way()));
    node.insert("zipcode".to_string(), json!(address.zip_code()));
    node.insert("city".to_string(), json!(address.city()));
    if address.country() != Country::France {
        node.insert(
            "country".to_string(),
            json!(address.country().display_name()),
        );
    }
    Value::Object(node)
}

fn required_str<'a>(
    node: &'a Value,
    record: &'static str,
    field: &'static str,
) -> ParseResult<&'a str> {
    node.get(field)
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField { record, field })
}

fn read_phone_numbers(record: &Value, contact: &mut Contact) -> ParseResult<()> {
    let Some(node) = record.get("phones") else {
        return Ok(());
    };
    let entries = node.as_array().ok_or(ParseError::NotAnArray("phones"))?;
    for entry in entries {
        let label = required_str(entry, "phone", "name")?;
        let number = required_str(entry, "phone", "number")?;
        contact.add_phone_number(label, PhoneNumber::parse(number)?);
    }
    Ok(())
}

fn read_addresses(record: &Value, contact: &mut Contact) -> ParseResult<()> {
    let Some(node) = record.get("addresses") else {
        return Ok(());
    };
    let entries = node.as_array().ok_or(ParseError::NotAnArray("addresses"))?;
    for entry in entries {
        let label = required_str(entry, "address", "name")?;
        let way = required_str(entry, "address", "way")?;
        let zip_code = required_str(entry, "address", "zipcode")?;
        let city = required_str(entry, "address", "city")?;

        let country = match entry.get("country") {
            Some(value) => {
                let text = value.as_str().ok_or(ParseError::MissingField {
                    record: "address",
                    field: "country",
                })?;
                Country::from_display_name(text)
                    .ok_or_else(|| ParseError::UnknownCountry(text.to_string()))?
            }
            None => Country::France,
        };

        // Numbers outside 1..=i32::MAX are treated as absent, not as errors.
        let number = entry
            .get("number")
            .and_then(Value::as_i64)
            .and_then(|value| i32::try_from(value).ok())
            .filter(|value| *value > 0);
        let address = match number {
            Some(number) => Address::new(number, way, city, zip_code, country)?,
            None => Address::without_number(way, city, zip_code, country)?,
        };
        contact.add_address(label, address);
    }
    Ok(())
}

fn read_emails(record: &Value, contact: &mut Contact) -> ParseResult<()> {
    let Some(node) = record.get("emails") else {
        return Ok(());
    };
    let entries = node.as_array().ok_or(ParseError::NotAnArray("emails"))?;
    for entry in entries {
        let label = required_str(entry, "email", "name")?;
        let value = required_str(entry, "email", "value")?;
        contact.add_email(label, EmailAddress::new(value)?);
    }
    Ok(())
}

fn read_links(record: &Value, contact: &mut Contact) -> ParseResult<()> {
    let Some(node) = record.get("links") else {
        return Ok(());
    };
    let entries = node.as_array().ok_or(ParseError::NotAnArray("links"))?;
    for entry in entries {
        let label = required_str(entry, "link", "name")?;
        let value = required_str(entry, "link", "value")?;
        contact.add_link(label, Link::new(value)?);
    }
    Ok(())
}

fn read_notes(record: &Value, contact: &mut Contact) -> ParseResult<()> {
    let Some(node) = record.get("notes") else {
        return Ok(());
    };
    let entries = node.as_array().ok_or(ParseError::NotAnArray("notes"))?;
    for entry in entries {
        let label = required_str(entry, "note", "name")?;
        let content = required_str(entry, "note", "content")?;
        contact.add_note(label, Note::new(content)?);
    }
    Ok(())
}

/// File-backed store for a contacts document.
///
/// Reads and writes are whole-document operations; the store remembers the
/// date of the last document it loaded or saved.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    date: Option<NaiveDate>,
}

impl JsonStore {
    /// Create a store working on `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            date: None,
        }
    }

    /// The working file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Change the working file path.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Date of the last loaded or saved document.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Read and decode the whole document.
    pub fn load(&mut self) -> StoreResult<Directory> {
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let (directory, date) = decode(&text)?;
        self.date = Some(date);
        info!(
            path = %self.path.display(),
            contacts = directory.len(),
            "contacts document loaded"
        );
        Ok(directory)
    }

    /// Encode and write the whole document, stamped with today's date.
    pub fn save(&mut self, directory: &Directory) -> StoreResult<()> {
        let today = Utc::now().date_naive();
        let document = encode(directory, today);
        let text = serde_json::to_string_pretty(&document).map_err(ParseError::Json)?;
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.date = Some(today);
        info!(
            path = %self.path.display(),
            contacts = directory.len(),
            "contacts document saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_ok(text: &str) -> Directory {
        let (directory, _) = decode(text).expect("document should decode");
        directory
    }

    #[test]
    fn test_decode_minimal_document() {
        let directory = decode_ok(r#"{ "date": "2024/01/15", "contacts": [] }"#);
        assert!(directory.is_empty());
    }

    #[test]
    fn test_decode_reads_date() {
        let (_, date) = decode(r#"{ "date": "2024/01/15", "contacts": [] }"#).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_decode_missing_date_fails() {
        let result = decode(r#"{ "contacts": [] }"#);
        assert!(matches!(result, Err(ParseError::MissingNode("date"))));
    }

    #[test]
    fn test_decode_bad_date_fails() {
        let result = decode(r#"{ "date": "15-01-2024", "contacts": [] }"#);
        assert!(matches!(result, Err(ParseError::InvalidDate(_))));
    }

    #[test]
    fn test_decode_missing_contacts_fails() {
        let result = decode(r#"{ "date": "2024/01/15" }"#);
        assert!(matches!(result, Err(ParseError::MissingNode("contacts"))));
    }

    #[test]
    fn test_decode_contacts_not_array_fails() {
        let result = decode(r#"{ "date": "2024/01/15", "contacts": {} }"#);
        assert!(matches!(result, Err(ParseError::NotAnArray("contacts"))));
    }

    #[test]
    fn test_firstname_presence_selects_kind() {
        let directory = decode_ok(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre" },
                { "name": "ENSIIE" }
            ] }"#,
        );
        assert!(directory.find_personal("Pierre Durand").is_some());
        assert!(directory.find_corporate("ENSIIE").is_some());
    }

    #[test]
    fn test_decode_sub_records() {
        let directory = decode_ok(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre",
                  "image": "file:/images/durand.png",
                  "phones": [ { "name": "mobile", "number": "06 69 36 74 62" } ],
                  "addresses": [ { "name": "home", "number": 12,
                                   "way": "Rue du Port", "zipcode": "91000",
                                   "city": "Evry" } ],
                  "emails": [ { "name": "work", "value": "pierre.durand@ensiie.fr" } ],
                  "links": [ { "name": "website", "value": "https://www.ensiie.fr" } ],
                  "notes": [ { "name": "badge", "content": "locker 42" } ]
                }
            ] }"#,
        );
        let id = directory.find_personal("Pierre Durand").unwrap();
        let contact = directory.get(id).unwrap();
        assert_eq!(contact.image(), Some("file:/images/durand.png"));
        assert!(contact.phone_number("mobile").unwrap().is_mobile());
        let address = contact.address("home").unwrap();
        assert_eq!(address.number(), Some(12));
        assert_eq!(address.country(), Country::France);
        assert_eq!(
            contact.email("work").unwrap().as_str(),
            "pierre.durand@ensiie.fr"
        );
        assert_eq!(contact.link("website").unwrap().as_str(), "https://www.ensiie.fr");
        assert_eq!(contact.note("badge").unwrap().content(), "locker 42");
    }

    #[test]
    fn test_decode_missing_phone_number_fails() {
        let result = decode(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre",
                  "phones": [ { "name": "mobile" } ] }
            ] }"#,
        );
        assert!(matches!(
            result,
            Err(ParseError::MissingField {
                record: "phone",
                field: "number"
            })
        ));
    }

    #[test]
    fn test_decode_invalid_phone_fails() {
        let result = decode(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre",
                  "phones": [ { "name": "mobile", "number": "11 69 36 74 61" } ] }
            ] }"#,
        );
        assert!(matches!(result, Err(ParseError::Phone(_))));
    }

    #[test]
    fn test_decode_unknown_country_fails() {
        let result = decode(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre",
                  "addresses": [ { "name": "home", "way": "Rue X",
                                   "zipcode": "75000", "city": "Paris",
                                   "country": "Atlantis" } ] }
            ] }"#,
        );
        assert!(matches!(result, Err(ParseError::UnknownCountry(_))));
    }

    #[test]
    fn test_decode_non_positive_address_number_treated_as_absent() {
        let directory = decode_ok(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre",
                  "addresses": [ { "name": "home", "number": -3, "way": "Rue X",
                                   "zipcode": "75000", "city": "Paris" } ] }
            ] }"#,
        );
        let id = directory.find_personal("Pierre Durand").unwrap();
        let address = directory.get(id).unwrap().address("home").unwrap();
        assert_eq!(address.number(), None);
    }

    #[test]
    fn test_decode_out_of_range_address_number_treated_as_absent() {
        // 4294967308 exceeds i32; it must not wrap around to 12
        let directory = decode_ok(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre",
                  "addresses": [ { "name": "home", "number": 4294967308,
                                   "way": "Rue X", "zipcode": "75000",
                                   "city": "Paris" } ] }
            ] }"#,
        );
        let id = directory.find_personal("Pierre Durand").unwrap();
        let address = directory.get(id).unwrap().address("home").unwrap();
        assert_eq!(address.number(), None);
    }

    #[test]
    fn test_resolution_is_order_independent() {
        // The personal record references "ENSIIE" before that record exists.
        let directory = decode_ok(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre", "corporation": "ENSIIE" },
                { "name": "ENSIIE" }
            ] }"#,
        );
        let person = directory.find_personal("Pierre Durand").unwrap();
        let corporation = directory.find_corporate("ENSIIE").unwrap();
        assert_eq!(
            directory.get(person).unwrap().corporation(),
            Some(corporation)
        );
        assert!(directory
            .get(corporation)
            .unwrap()
            .employees()
            .contains(&person));
    }

    #[test]
    fn test_redundant_references_collapse() {
        // Both sides mention the pair; the link is established once.
        let directory = decode_ok(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "ENSIIE", "employees": [ "Pierre Durand" ] },
                { "name": "Durand", "firstname": "Pierre", "corporation": "ENSIIE" }
            ] }"#,
        );
        let corporation = directory.find_corporate("ENSIIE").unwrap();
        assert_eq!(directory.get(corporation).unwrap().employees().len(), 1);
    }

    #[test]
    fn test_unresolvable_names_leave_links_unset() {
        let directory = decode_ok(
            r#"{ "date": "2024/01/15", "contacts": [
                { "name": "Durand", "firstname": "Pierre", "corporation": "Nowhere Inc" },
                { "name": "ENSIIE", "employees": [ "John Ghost" ] }
            ] }"#,
        );
        let person = directory.find_personal("Pierre Durand").unwrap();
        let corporation = directory.find_corporate("ENSIIE").unwrap();
        assert_eq!(directory.get(person).unwrap().corporation(), None);
        assert!(directory.get(corporation).unwrap().employees().is_empty());
    }

    #[test]
    fn test_encode_shape() {
        let mut directory = Directory::new();
        let mut contact = Contact::personal("Pierre", "Durand").unwrap();
        contact.add_phone_number("mobile", PhoneNumber::parse("0669367462").unwrap());
        contact.add_address(
            "office",
            Address::new(1, "Unter den Linden", "Berlin", "10117", Country::Germany).unwrap(),
        );
        let person = directory.add(contact).unwrap();
        let corporation = directory.add(Contact::corporate("ENSIIE").unwrap()).unwrap();
        directory.set_corporation(person, Some(corporation));

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let document = encode(&directory, date);

        assert_eq!(document["date"], "2024/01/15");
        let contacts = document["contacts"].as_array().unwrap();
        assert_eq!(contacts.len(), 2);

        // sorted: "Durand" before "ENSIIE"
        let durand = &contacts[0];
        assert_eq!(durand["name"], "Durand");
        assert_eq!(durand["firstname"], "Pierre");
        assert_eq!(durand["corporation"], "ENSIIE");
        assert_eq!(durand["phones"][0]["number"], "06 69 36 74 62");
        assert_eq!(durand["addresses"][0]["country"], "Deutschland");

        let ensiie = &contacts[1];
        assert_eq!(ensiie["name"], "ENSIIE");
        assert!(ensiie.get("firstname").is_none());
        assert_eq!(ensiie["employees"][0], "Pierre Durand");
        // relationships are written as names only, never identities
        assert!(ensiie.get("corporation").is_none());
    }

    #[test]
    fn test_encode_omits_empty_collections() {
        let mut directory = Directory::new();
        directory.add(Contact::corporate("ENSIIE").unwrap());
        let document = encode(&directory, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let record = &document["contacts"][0];
        assert!(record.get("employees").is_none());
        assert!(record.get("phones").is_none());
        assert!(record.get("notes").is_none());
        assert!(record.get("image").is_none());
    }
}
