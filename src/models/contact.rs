//! Contact model: individuals and organizations with labeled sub-records.

use crate::domain::{Address, EmailAddress, Link, PhoneNumber, Searchable, ValidationError};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::warn;

/// Opaque identifier of a contact inside a [`Directory`].
///
/// Relationships between contacts are stored as identifiers rather than
/// owning references, so the personal/corporate graph carries no reference
/// cycles.
///
/// [`Directory`]: crate::directory::Directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub(crate) u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two kinds of contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactType {
    /// An individual.
    Personal,
    /// An organization.
    Corporate,
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => write!(f, "person"),
            Self::Corporate => write!(f, "company"),
        }
    }
}

/// Kind-specific contact state.
///
/// The relationship fields are mutated only through the directory, which
/// keeps both sides of a person/company link consistent; no public API can
/// write one side alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactKind {
    /// An individual, optionally employed by one company.
    Personal {
        first_name: String,
        corporation: Option<ContactId>,
    },
    /// An organization holding a set of individuals.
    Corporate { employees: BTreeSet<ContactId> },
}

static NO_EMPLOYEES: BTreeSet<ContactId> = BTreeSet::new();

/// A directory entry: an individual or an organization.
///
/// Every contact carries a non-empty name, an optional image URI (resolving
/// it to pixels is a presentation concern) and five label-keyed sub-record
/// maps: phone numbers, addresses, emails, links and notes. Labels are
/// unique per map.
///
/// Identity (equality, hashing, ordering) is by type and name, plus first
/// name for individuals; sub-records and relationships never participate.
#[derive(Debug, Clone)]
pub struct Contact {
    name: String,
    image: Option<String>,
    phone_numbers: BTreeMap<String, PhoneNumber>,
    addresses: BTreeMap<String, Address>,
    emails: BTreeMap<String, EmailAddress>,
    links: BTreeMap<String, Link>,
    notes: BTreeMap<String, crate::models::Note>,
    kind: ContactKind,
}

impl Contact {
    /// Create an individual with empty sub-record maps.
    ///
    /// # Errors
    ///
    /// `ValidationError::EmptyFirstName` / `ValidationError::EmptyName` for
    /// blank inputs.
    pub fn personal(
        first_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let first_name = first_name.into();
        if first_name.is_empty() {
            return Err(ValidationError::EmptyFirstName);
        }
        Self::bare(
            name,
            ContactKind::Personal {
                first_name,
                corporation: None,
            },
        )
    }

    /// Create an organization with empty sub-record maps.
    pub fn corporate(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::bare(
            name,
            ContactKind::Corporate {
                employees: BTreeSet::new(),
            },
        )
    }

    fn bare(name: impl Into<String>, kind: ContactKind) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            name,
            image: None,
            phone_numbers: BTreeMap::new(),
            addresses: BTreeMap::new(),
            emails: BTreeMap::new(),
            links: BTreeMap::new(),
            notes: BTreeMap::new(),
            kind,
        })
    }

    /// The contact's (last) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name; empty input is ignored.
    ///
    /// Crate-internal because names take part in contact identity: stored
    /// contacts are renamed through
    /// [`Directory::rename`](crate::directory::Directory::rename), which
    /// checks uniqueness and keeps the order in sync.
    pub(crate) fn set_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.name = name.to_string();
        }
    }

    /// The first name, for individuals.
    pub fn first_name(&self) -> Option<&str> {
        match &self.kind {
            ContactKind::Personal { first_name, .. } => Some(first_name),
            ContactKind::Corporate { .. } => None,
        }
    }

    /// Set the first name; empty input and corporate contacts are ignored.
    ///
    /// Crate-internal for the same reason as [`Contact::set_name`].
    pub(crate) fn set_first_name(&mut self, first_name: &str) {
        if first_name.is_empty() {
            return;
        }
        if let ContactKind::Personal {
            first_name: current,
            ..
        } = &mut self.kind
        {
            *current = first_name.to_string();
        }
    }

    /// The image URI reference, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Set the image URI reference; empty input is ignored.
    pub fn set_image(&mut self, uri: &str) {
        if !uri.is_empty() {
            self.image = Some(uri.to_string());
        }
    }

    /// Remove the image URI reference.
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// The kind-specific state.
    pub fn kind(&self) -> &ContactKind {
        &self.kind
    }

    /// The type tag of this contact.
    pub fn contact_type(&self) -> ContactType {
        match self.kind {
            ContactKind::Personal { .. } => ContactType::Personal,
            ContactKind::Corporate { .. } => ContactType::Corporate,
        }
    }

    /// True for individuals.
    pub fn is_personal(&self) -> bool {
        self.contact_type() == ContactType::Personal
    }

    /// True for organizations.
    pub fn is_corporate(&self) -> bool {
        self.contact_type() == ContactType::Corporate
    }

    /// The employing company of an individual, if linked.
    pub fn corporation(&self) -> Option<ContactId> {
        match &self.kind {
            ContactKind::Personal { corporation, .. } => *corporation,
            ContactKind::Corporate { .. } => None,
        }
    }

    /// The employees of an organization (empty for individuals).
    pub fn employees(&self) -> &BTreeSet<ContactId> {
        match &self.kind {
            ContactKind::Corporate { employees } => employees,
            ContactKind::Personal { .. } => &NO_EMPLOYEES,
        }
    }

    /// Write the corporation side of a relationship link. Directory only.
    pub(crate) fn set_corporation_id(&mut self, corporation: Option<ContactId>) {
        if let ContactKind::Personal {
            corporation: current,
            ..
        } = &mut self.kind
        {
            *current = corporation;
        }
    }

    /// Mutable employee set of an organization. Directory only.
    pub(crate) fn employees_mut(&mut self) -> Option<&mut BTreeSet<ContactId>> {
        match &mut self.kind {
            ContactKind::Corporate { employees } => Some(employees),
            ContactKind::Personal { .. } => None,
        }
    }

    /// The name as shown and as written in the persisted format:
    /// "First Last" for individuals, the bare name for organizations.
    pub fn display_name(&self) -> String {
        match &self.kind {
            ContactKind::Personal { first_name, .. } => {
                format!("{} {}", first_name, self.name)
            }
            ContactKind::Corporate { .. } => self.name.clone(),
        }
    }

    // ---- phone numbers ----------------------------------------------------

    /// Add a phone number under `label`; false if the label is taken.
    pub fn add_phone_number(&mut self, label: impl Into<String>, number: PhoneNumber) -> bool {
        let label = label.into();
        if self.phone_numbers.contains_key(&label) {
            warn!(label, "label already exists in phone numbers");
            return false;
        }
        self.phone_numbers.insert(label, number);
        true
    }

    /// The phone number stored under `label`.
    pub fn phone_number(&self, label: &str) -> Option<&PhoneNumber> {
        self.phone_numbers.get(label)
    }

    /// Mutable access to the phone number under `label`, e.g. for an
    /// in-place reparse.
    pub fn phone_number_mut(&mut self, label: &str) -> Option<&mut PhoneNumber> {
        self.phone_numbers.get_mut(label)
    }

    /// Remove the phone number under `label`; false if absent.
    pub fn remove_phone_number(&mut self, label: &str) -> bool {
        if self.phone_numbers.remove(label).is_none() {
            warn!(label, "label does not exist in phone numbers");
            return false;
        }
        true
    }

    /// Labels of all phone numbers, in label order.
    pub fn phone_number_labels(&self) -> impl Iterator<Item = &str> {
        self.phone_numbers.keys().map(String::as_str)
    }

    /// All (label, phone number) pairs, in label order.
    pub fn phone_numbers(&self) -> impl Iterator<Item = (&str, &PhoneNumber)> {
        self.phone_numbers
            .iter()
            .map(|(label, number)| (label.as_str(), number))
    }

    // ---- addresses --------------------------------------------------------

    /// Add an address under `label`; false if the label is taken.
    pub fn add_address(&mut self, label: impl Into<String>, address: Address) -> bool {
        let label = label.into();
        if self.addresses.contains_key(&label) {
            warn!(label, "label already exists in addresses");
            return false;
        }
        self.addresses.insert(label, address);
        true
    }

    /// The address stored under `label`.
    pub fn address(&self, label: &str) -> Option<&Address> {
        self.addresses.get(label)
    }

    /// Mutable access to the address under `label`.
    pub fn address_mut(&mut self, label: &str) -> Option<&mut Address> {
        self.addresses.get_mut(label)
    }

    /// Remove the address under `label`; false if absent.
    pub fn remove_address(&mut self, label: &str) -> bool {
        if self.addresses.remove(label).is_none() {
            warn!(label, "label does not exist in addresses");
            return false;
        }
        true
    }

    /// Labels of all addresses, in label order.
    pub fn address_labels(&self) -> impl Iterator<Item = &str> {
        self.addresses.keys().map(String::as_str)
    }

    /// All (label, address) pairs, in label order.
    pub fn addresses(&self) -> impl Iterator<Item = (&str, &Address)> {
        self.addresses
            .iter()
            .map(|(label, address)| (label.as_str(), address))
    }

    // ---- emails -----------------------------------------------------------

    /// Add an email under `label`; false if the label is taken.
    pub fn add_email(&mut self, label: impl Into<String>, email: EmailAddress) -> bool {
        let label = label.into();
        if self.emails.contains_key(&label) {
            warn!(label, "label already exists in emails");
            return false;
        }
        self.emails.insert(label, email);
        true
    }

    /// The email stored under `label`.
    pub fn email(&self, label: &str) -> Option<&EmailAddress> {
        self.emails.get(label)
    }

    /// Remove the email under `label`; false if absent.
    pub fn remove_email(&mut self, label: &str) -> bool {
        if self.emails.remove(label).is_none() {
            warn!(label, "label does not exist in emails");
            return false;
        }
        true
    }

    /// Labels of all emails, in label order.
    pub fn email_labels(&self) -> impl Iterator<Item = &str> {
        self.emails.keys().map(String::as_str)
    }

    /// All (label, email) pairs, in label order.
    pub fn emails(&self) -> impl Iterator<Item = (&str, &EmailAddress)> {
        self.emails
            .iter()
            .map(|(label, email)| (label.as_str(), email))
    }

    // ---- links ------------------------------------------------------------

    /// Add a link under `label`; false if the label is taken.
    pub fn add_link(&mut self, label: impl Into<String>, link: Link) -> bool {
        let label = label.into();
        if self.links.contains_key(&label) {
            warn!(label, "label already exists in links");
            return false;
        }
        self.links.insert(label, link);
        true
    }

    /// The link stored under `label`.
    pub fn link(&self, label: &str) -> Option<&Link> {
        self.links.get(label)
    }

    /// Remove the link under `label`; false if absent.
    pub fn remove_link(&mut self, label: &str) -> bool {
        if self.links.remove(label).is_none() {
            warn!(label, "label does not exist in links");
            return false;
        }
        true
    }

    /// Labels of all links, in label order.
    pub fn link_labels(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    /// All (label, link) pairs, in label order.
    pub fn links(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.links.iter().map(|(label, link)| (label.as_str(), link))
    }

    // ---- notes ------------------------------------------------------------

    /// Add a note under `label`; false if the label is taken.
    pub fn add_note(&mut self, label: impl Into<String>, note: crate::models::Note) -> bool {
        let label = label.into();
        if self.notes.contains_key(&label) {
            warn!(label, "label already exists in notes");
            return false;
        }
        self.notes.insert(label, note);
        true
    }

    /// The note stored under `label`.
    pub fn note(&self, label: &str) -> Option<&crate::models::Note> {
        self.notes.get(label)
    }

    /// Mutable access to the note under `label`.
    pub fn note_mut(&mut self, label: &str) -> Option<&mut crate::models::Note> {
        self.notes.get_mut(label)
    }

    /// Remove the note under `label`; false if absent.
    pub fn remove_note(&mut self, label: &str) -> bool {
        if self.notes.remove(label).is_none() {
            warn!(label, "label does not exist in notes");
            return false;
        }
        true
    }

    /// Labels of all notes, in label order.
    pub fn note_labels(&self) -> impl Iterator<Item = &str> {
        self.notes.keys().map(String::as_str)
    }

    /// All (label, note) pairs, in label order.
    pub fn notes(&self) -> impl Iterator<Item = (&str, &crate::models::Note)> {
        self.notes.iter().map(|(label, note)| (label.as_str(), note))
    }

    fn type_rank(&self) -> u8 {
        match self.kind {
            ContactKind::Personal { .. } => 0,
            ContactKind::Corporate { .. } => 1,
        }
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.contact_type() == other.contact_type()
            && self.name == other.name
            && self.first_name() == other.first_name()
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.first_name().hash(state);
    }
}

impl Ord for Contact {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.type_rank().cmp(&other.type_rank()))
            .then_with(|| self.first_name().cmp(&other.first_name()))
    }
}

impl PartialOrd for Contact {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Searches the name, the first name for individuals, and every sub-record
/// map, matching labels as well as the values' display forms. Relationship
/// ids are never followed here; the directory layer does the corporate
/// employee recursion since it owns the arena.
impl Searchable for Contact {
    fn contains_text(&self, element: &str) -> bool {
        if self.name.contains(element) {
            return true;
        }
        if let ContactKind::Personal { first_name, .. } = &self.kind {
            if first_name.contains(element) {
                return true;
            }
        }
        self.phone_numbers
            .iter()
            .any(|(label, number)| label.contains(element) || number.contains_text(element))
            || self
                .addresses
                .iter()
                .any(|(label, address)| label.contains(element) || address.contains_text(element))
            || self
                .emails
                .iter()
                .any(|(label, email)| label.contains(element) || email.contains_text(element))
            || self
                .links
                .iter()
                .any(|(label, link)| label.contains(element) || link.contains_text(element))
            || self
                .notes
                .iter()
                .any(|(label, note)| label.contains(element) || note.contains_text(element))
    }
}
