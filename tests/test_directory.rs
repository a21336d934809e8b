//! Integration tests for the directory: ordering, filtering, and search.

use carnet::domain::{Address, Country, EmailAddress, Link, PhoneNumber};
use carnet::{Contact, ContactId, Directory, Note, TypeFilter};

fn sample_directory() -> (Directory, ContactId, ContactId, ContactId) {
    let mut directory = Directory::new();

    let mut durand = Contact::personal("Pierre", "Durand").unwrap();
    durand.add_phone_number("mobile", PhoneNumber::parse("0669367462").unwrap());
    durand.add_email("work", EmailAddress::new("pierre.durand@ensiie.fr").unwrap());
    let durand = directory.add(durand).unwrap();

    let mut martin = Contact::personal("Alice", "Martin").unwrap();
    martin.add_address(
        "home",
        Address::new(12, "Rue du Port", "Evry", "91000", Country::France).unwrap(),
    );
    martin.add_note("hobby", Note::new("plays the violin").unwrap());
    let martin = directory.add(martin).unwrap();

    let mut ensiie = Contact::corporate("ENSIIE").unwrap();
    ensiie.add_link("website", Link::new("https://www.ensiie.fr").unwrap());
    let ensiie = directory.add(ensiie).unwrap();

    directory.add_employee(ensiie, durand);

    (directory, durand, martin, ensiie)
}

fn hits(directory: &Directory) -> Vec<ContactId> {
    directory.filtered().into_iter().map(|(id, _)| id).collect()
}

#[test]
fn test_iteration_is_sorted_by_name() {
    let (directory, ..) = sample_directory();
    let names: Vec<String> = directory
        .iter()
        .map(|(_, contact)| contact.name().to_string())
        .collect();
    assert_eq!(names, ["Durand", "ENSIIE", "Martin"]);
}

#[test]
fn test_rename_resorts_the_directory() {
    let (mut directory, durand, ..) = sample_directory();
    directory.rename(durand, "Zidane");
    let names: Vec<String> = directory
        .iter()
        .map(|(_, contact)| contact.name().to_string())
        .collect();
    assert_eq!(names, ["ENSIIE", "Martin", "Zidane"]);
}

#[test]
fn test_rename_cannot_create_duplicates() {
    let mut directory = Directory::new();
    let durand = directory
        .add(Contact::personal("Pierre", "Durand").unwrap())
        .unwrap();
    let dupont = directory
        .add(Contact::personal("Pierre", "Dupont").unwrap())
        .unwrap();

    assert!(!directory.rename(dupont, "Durand"));

    // both entries keep distinct display names
    let names: Vec<String> = directory
        .iter()
        .map(|(_, contact)| contact.display_name())
        .collect();
    assert_eq!(names, ["Pierre Dupont", "Pierre Durand"]);
    assert_eq!(directory.get(durand).unwrap().name(), "Durand");
    assert_eq!(directory.get(dupont).unwrap().name(), "Dupont");
}

#[test]
fn test_duplicate_add_is_rejected() {
    let (mut directory, ..) = sample_directory();
    let duplicate = Contact::personal("Pierre", "Durand").unwrap();
    assert_eq!(directory.add(duplicate), None);
    assert_eq!(directory.len(), 3);
}

#[test]
fn test_type_filter_partitions_contacts() {
    let (mut directory, ..) = sample_directory();

    directory.set_filter(TypeFilter::Personal, "");
    assert_eq!(directory.filtered().len(), 2);

    directory.set_filter(TypeFilter::Corporate, "");
    assert_eq!(directory.filtered().len(), 1);

    directory.set_filter(TypeFilter::All, "");
    assert_eq!(directory.filtered().len(), 3);
}

#[test]
fn test_text_filter_searches_every_field() {
    let (mut directory, durand, martin, _) = sample_directory();

    // phone number text
    directory.set_filter(TypeFilter::All, "69 36");
    assert_eq!(hits(&directory), [durand]);

    // address city
    directory.set_filter(TypeFilter::All, "Evry");
    assert_eq!(hits(&directory), [martin]);

    // note content
    directory.set_filter(TypeFilter::All, "violin");
    assert_eq!(hits(&directory), [martin]);
}

#[test]
fn test_company_search_reaches_employee_fields() {
    let (mut directory, durand, _, ensiie) = sample_directory();

    // the email lives on the employee, yet the company matches too
    directory.set_filter(TypeFilter::All, "pierre.durand@ensiie.fr");
    assert_eq!(hits(&directory), [durand, ensiie]);
}

#[test]
fn test_person_search_does_not_reach_employer_fields() {
    let (mut directory, _, _, ensiie) = sample_directory();

    // the link lives on the company; the employee does not match through it
    directory.set_filter(TypeFilter::All, "www.ensiie.fr");
    assert_eq!(hits(&directory), [ensiie]);
}

#[test]
fn test_filters_compose() {
    let (mut directory, _, _, ensiie) = sample_directory();

    // "Pierre" matches both Durand and, through him, ENSIIE;
    // the type filter then keeps only the company
    directory.set_filter(TypeFilter::Corporate, "Pierre");
    assert_eq!(hits(&directory), [ensiie]);
}

#[test]
fn test_remove_shrinks_the_view() {
    let (mut directory, _, martin, _) = sample_directory();
    assert!(directory.remove(martin).is_some());
    assert_eq!(directory.len(), 2);
    assert!(directory.get(martin).is_none());
    assert!(directory.remove(martin).is_none());
}
