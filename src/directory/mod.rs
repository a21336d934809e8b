//! Directory: the arena of contacts, their sorted view and the
//! person/company relationship invariant.
//!
//! Contacts are stored under generated [`ContactId`]s; relationships are
//! id-valued on both sides and every public mutation that touches one side
//! of a link updates the other in the same call. Code outside this module
//! cannot produce a half-linked pair.

mod filter;

pub use filter::{Filter, TypeFilter};

use crate::domain::Searchable;
use crate::models::{Contact, ContactId, ContactKind};
use std::collections::BTreeMap;
use tracing::debug;

/// A uniquely-keyed, always-sorted collection of contacts.
///
/// Uniqueness is by [`Contact`] equality (type + name + first name).
/// Iteration follows the contact ordering regardless of insertion order.
#[derive(Debug, Default)]
pub struct Directory {
    contacts: BTreeMap<ContactId, Contact>,
    /// Ids sorted by the contact ordering; kept in sync on every mutation
    /// that can affect it.
    order: Vec<ContactId>,
    next_id: u64,
    filter: Filter,
}

impl Directory {
    /// Create an empty directory with an open filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// True when no contact is stored.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Add a contact.
    ///
    /// Returns the assigned id, or `None` without any state change when an
    /// equal contact is already present.
    pub fn add(&mut self, contact: Contact) -> Option<ContactId> {
        if self.contacts.values().any(|existing| existing == &contact) {
            debug!(name = contact.name(), "duplicate contact rejected");
            return None;
        }
        let id = ContactId(self.next_id);
        self.next_id += 1;
        self.contacts.insert(id, contact);
        self.order.push(id);
        self.resort();
        Some(id)
    }

    /// Remove a contact, severing its relationships on both sides so no id
    /// dangles.
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let contact = self.contacts.remove(&id)?;
        match contact.kind() {
            ContactKind::Personal { corporation, .. } => {
                if let Some(corp) = corporation {
                    self.sever_employee(*corp, id);
                }
            }
            ContactKind::Corporate { employees } => {
                for employee in employees {
                    if let Some(person) = self.contacts.get_mut(employee) {
                        person.set_corporation_id(None);
                    }
                }
            }
        }
        self.order.retain(|other| *other != id);
        Some(contact)
    }

    /// The contact stored under `id`.
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    /// Mutable access for sub-record edits.
    ///
    /// Renames should go through [`Directory::rename`] /
    /// [`Directory::rename_first`] instead, so the sort order follows.
    pub fn get_mut(&mut self, id: ContactId) -> Option<&mut Contact> {
        self.contacts.get_mut(&id)
    }

    /// Rename a contact and restore the sort order; empty names are ignored
    /// (the contact setter is best-effort).
    ///
    /// Returns `false` without any state change when the renamed contact
    /// would equal another stored contact.
    pub fn rename(&mut self, id: ContactId, name: &str) -> bool {
        let Some(contact) = self.contacts.get(&id) else {
            return false;
        };
        let mut renamed = contact.clone();
        renamed.set_name(name);
        if self.collides(id, &renamed) {
            debug!(name, "rename rejected, equal contact already present");
            return false;
        }
        self.contacts.insert(id, renamed);
        self.resort();
        true
    }

    /// Change an individual's first name and restore the sort order.
    ///
    /// Returns `false` without any state change when the renamed contact
    /// would equal another stored contact.
    pub fn rename_first(&mut self, id: ContactId, first_name: &str) -> bool {
        let Some(contact) = self.contacts.get(&id) else {
            return false;
        };
        let mut renamed = contact.clone();
        renamed.set_first_name(first_name);
        if self.collides(id, &renamed) {
            debug!(first_name, "rename rejected, equal contact already present");
            return false;
        }
        self.contacts.insert(id, renamed);
        self.resort();
        true
    }

    /// True when a contact other than `id` equals `candidate`.
    fn collides(&self, id: ContactId, candidate: &Contact) -> bool {
        self.contacts
            .iter()
            .any(|(other, existing)| *other != id && existing == candidate)
    }

    /// True if `id` designates a stored contact.
    pub fn contains_id(&self, id: ContactId) -> bool {
        self.contacts.contains_key(&id)
    }

    /// True if a contact equal to `contact` is stored.
    pub fn contains_contact(&self, contact: &Contact) -> bool {
        self.contacts.values().any(|existing| existing == contact)
    }

    /// Iterate all contacts in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactId, &Contact)> {
        self.order
            .iter()
            .filter_map(|id| self.contacts.get(id).map(|contact| (*id, contact)))
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = ContactId> + '_ {
        self.order.iter().copied()
    }

    /// Find an individual by its display name ("First Last").
    pub fn find_personal(&self, display_name: &str) -> Option<ContactId> {
        self.iter()
            .find(|(_, contact)| contact.is_personal() && contact.display_name() == display_name)
            .map(|(id, _)| id)
    }

    /// Find an organization by name.
    pub fn find_corporate(&self, name: &str) -> Option<ContactId> {
        self.iter()
            .find(|(_, contact)| contact.is_corporate() && contact.name() == name)
            .map(|(id, _)| id)
    }

    // ---- relationships ----------------------------------------------------

    /// Link or unlink an individual and a company, keeping both sides
    /// consistent.
    ///
    /// With `Some(corp)`: detaches the person from any prior employer, then
    /// attaches both sides. Setting the current employer again is an
    /// idempotent success. With `None`: detaches both sides; already
    /// unemployed is a no-op success.
    ///
    /// Returns false when an id is unknown or of the wrong kind, with no
    /// state change.
    pub fn set_corporation(&mut self, person: ContactId, corporation: Option<ContactId>) -> bool {
        let current = match self.contacts.get(&person) {
            Some(contact) if contact.is_personal() => contact.corporation(),
            _ => return false,
        };
        match corporation {
            Some(corp) => {
                match self.contacts.get(&corp) {
                    Some(contact) if contact.is_corporate() => {}
                    _ => return false,
                }
                if current == Some(corp) {
                    return true;
                }
                if let Some(previous) = current {
                    self.sever_employee(previous, person);
                }
                if let Some(contact) = self.contacts.get_mut(&person) {
                    contact.set_corporation_id(Some(corp));
                }
                if let Some(employees) =
                    self.contacts.get_mut(&corp).and_then(Contact::employees_mut)
                {
                    employees.insert(person);
                }
                true
            }
            None => {
                if let Some(previous) = current {
                    self.sever_employee(previous, person);
                    if let Some(contact) = self.contacts.get_mut(&person) {
                        contact.set_corporation_id(None);
                    }
                }
                true
            }
        }
    }

    /// Add an individual to a company's employees, updating the individual's
    /// employer reference in the same call.
    ///
    /// Returns false without state change when the person is already an
    /// employee, or when an id is unknown or of the wrong kind.
    pub fn add_employee(&mut self, corporation: ContactId, person: ContactId) -> bool {
        match self.contacts.get(&corporation) {
            Some(contact) if contact.is_corporate() => {
                if contact.employees().contains(&person) {
                    return false;
                }
            }
            _ => return false,
        }
        self.set_corporation(person, Some(corporation))
    }

    /// Remove an individual from a company's employees, clearing the
    /// individual's employer reference in the same call.
    ///
    /// Returns false when the person is not an employee of `corporation`.
    pub fn remove_employee(&mut self, corporation: ContactId, person: ContactId) -> bool {
        match self.contacts.get(&corporation) {
            Some(contact) if contact.is_corporate() && contact.employees().contains(&person) => {
                self.set_corporation(person, None)
            }
            _ => false,
        }
    }

    /// Drop `person` from `corporation`'s employee set, if both still exist.
    fn sever_employee(&mut self, corporation: ContactId, person: ContactId) {
        if let Some(employees) = self
            .contacts
            .get_mut(&corporation)
            .and_then(Contact::employees_mut)
        {
            employees.remove(&person);
        }
    }

    // ---- search & filtering -----------------------------------------------

    /// Free-text match for the contact under `id`.
    ///
    /// A company also matches when one of its employees' own fields match.
    /// An individual's search never follows its employer reference, so the
    /// recursion cannot loop.
    pub fn matches(&self, id: ContactId, text: &str) -> bool {
        let Some(contact) = self.contacts.get(&id) else {
            return false;
        };
        if contact.contains_text(text) {
            return true;
        }
        match contact.kind() {
            ContactKind::Corporate { employees } => employees.iter().any(|employee| {
                self.contacts
                    .get(employee)
                    .map_or(false, |person| person.contains_text(text))
            }),
            ContactKind::Personal { .. } => false,
        }
    }

    /// Replace the active filter.
    pub fn set_filter(&mut self, type_filter: TypeFilter, text: impl Into<String>) {
        self.filter = Filter::new(type_filter, text);
    }

    /// The active filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// The filtered view: contacts passing the active filter, in sorted
    /// order. Recomputed from scratch on every call; nothing is cached
    /// across mutations of the filter or the collection.
    pub fn filtered(&self) -> Vec<(ContactId, &Contact)> {
        self.iter()
            .filter(|(id, contact)| {
                self.filter.type_filter().matches(contact.contact_type())
                    && self.matches(*id, self.filter.text())
            })
            .collect()
    }

    fn resort(&mut self) {
        let contacts = &self.contacts;
        self.order.sort_by(|a, b| contacts[a].cmp(&contacts[b]));
    }
}
