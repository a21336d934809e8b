//! Integration tests for the employment relationship.
//!
//! Every test here checks the same core property from a different angle:
//! a person's employer reference and the company's employee set always
//! agree, no matter which side the mutation came from.

use carnet::{Contact, ContactId, Directory};

fn linked(directory: &Directory, person: ContactId, corporation: ContactId) -> bool {
    let forward = directory.get(person).map(|c| c.corporation()) == Some(Some(corporation));
    let backward = directory
        .get(corporation)
        .map_or(false, |c| c.employees().contains(&person));
    assert_eq!(forward, backward, "relationship sides disagree");
    forward
}

fn setup() -> (Directory, ContactId, ContactId, ContactId) {
    let mut directory = Directory::new();
    let person = directory
        .add(Contact::personal("Pierre", "Durand").unwrap())
        .unwrap();
    let ensiie = directory.add(Contact::corporate("ENSIIE").unwrap()).unwrap();
    let acme = directory.add(Contact::corporate("Acme").unwrap()).unwrap();
    (directory, person, ensiie, acme)
}

#[test]
fn test_link_from_the_personal_side() {
    let (mut directory, person, ensiie, _) = setup();
    assert!(directory.set_corporation(person, Some(ensiie)));
    assert!(linked(&directory, person, ensiie));
}

#[test]
fn test_link_from_the_corporate_side() {
    let (mut directory, person, ensiie, _) = setup();
    assert!(directory.add_employee(ensiie, person));
    assert!(linked(&directory, person, ensiie));
}

#[test]
fn test_relinking_moves_between_employers() {
    let (mut directory, person, ensiie, acme) = setup();
    directory.set_corporation(person, Some(ensiie));
    assert!(directory.set_corporation(person, Some(acme)));
    assert!(linked(&directory, person, acme));
    assert!(directory.get(ensiie).unwrap().employees().is_empty());
}

#[test]
fn test_detach_clears_both_sides() {
    let (mut directory, person, ensiie, _) = setup();
    directory.set_corporation(person, Some(ensiie));
    assert!(directory.set_corporation(person, None));
    assert!(!linked(&directory, person, ensiie));
    assert_eq!(directory.get(person).unwrap().corporation(), None);
}

#[test]
fn test_remove_employee_clears_both_sides() {
    let (mut directory, person, ensiie, _) = setup();
    directory.add_employee(ensiie, person);
    assert!(directory.remove_employee(ensiie, person));
    assert!(!linked(&directory, person, ensiie));
}

#[test]
fn test_linking_is_idempotent() {
    let (mut directory, person, ensiie, _) = setup();
    assert!(directory.set_corporation(person, Some(ensiie)));
    assert!(directory.set_corporation(person, Some(ensiie)));
    assert!(!directory.add_employee(ensiie, person));
    assert!(linked(&directory, person, ensiie));
    assert_eq!(directory.get(ensiie).unwrap().employees().len(), 1);
}

#[test]
fn test_wrong_kinds_are_rejected() {
    let (mut directory, person, ensiie, acme) = setup();
    // a person cannot employ, a company cannot be employed
    assert!(!directory.add_employee(person, ensiie));
    assert!(!directory.set_corporation(ensiie, Some(acme)));
    assert!(directory.get(person).unwrap().employees().is_empty());
}

#[test]
fn test_removing_a_person_severs_the_employer_link() {
    let (mut directory, person, ensiie, _) = setup();
    directory.set_corporation(person, Some(ensiie));
    directory.remove(person);
    assert!(directory.get(ensiie).unwrap().employees().is_empty());
}

#[test]
fn test_removing_a_company_severs_every_employee_link() {
    let (mut directory, person, ensiie, _) = setup();
    let second = directory
        .add(Contact::personal("Alice", "Martin").unwrap())
        .unwrap();
    directory.set_corporation(person, Some(ensiie));
    directory.set_corporation(second, Some(ensiie));
    directory.remove(ensiie);
    assert_eq!(directory.get(person).unwrap().corporation(), None);
    assert_eq!(directory.get(second).unwrap().corporation(), None);
}

#[test]
fn test_stale_ids_fail_without_side_effects() {
    let (mut directory, person, ensiie, _) = setup();
    let removed = directory
        .add(Contact::personal("Gone", "Soon").unwrap())
        .unwrap();
    directory.remove(removed);

    assert!(!directory.set_corporation(removed, Some(ensiie)));
    assert!(!directory.add_employee(ensiie, removed));
    assert!(directory.get(ensiie).unwrap().employees().is_empty());
    assert_eq!(directory.get(person).unwrap().corporation(), None);
}
