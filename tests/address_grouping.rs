use address_grouper::workflows::grouping::{
    compute_key, group_and_sort, load_records, transliterate_char, AddressGrouper,
    MalformedRecordPolicy, Record, RecordColumns, RecordFormat,
};
use std::fs;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/people.csv");

fn expected_records() -> Vec<Record> {
    vec![
        Record::new("Ivan Draganov", "ul. Shipka 34, 1000 Sofia, Bulgaria"),
        Record::new("Leon Wu", "1 Guanghua Road, Beijing, China 100020"),
        Record::new("Ilona Ilieva", "ул. Шипка 34, София, България"),
        Record::new("Dragan Doichinov", "Shipka Street 34, Sofia, Bulgaria"),
        Record::new(
            "Li Deng",
            "1 Guanghua Road, Chaoyang District, Beijing, P.R.C 100020",
        ),
        Record::new(
            "Frieda Müller",
            "Konrad-Adenauer-Straße 7, 60313 Frankfurt am Main, Germany",
        ),
    ]
}

#[test]
fn both_loaders_read_the_sample_file() {
    let data = include_bytes!("testdata/people.csv");
    let columns = RecordColumns::default();

    let delimited =
        load_records(&data[..], RecordFormat::Delimited, &columns).expect("delimited loads");
    let csv = load_records(&data[..], RecordFormat::Csv, &columns).expect("csv loads");

    assert_eq!(delimited, expected_records());
    assert_eq!(csv, expected_records());
}

#[test]
fn equivalent_addresses_share_keys() {
    let bulgaria = [
        "ul. Shipka 34, 1000 Sofia, Bulgaria",
        "Shipka Street 34, Sofia, Bulgaria",
        "ул. Шипка 34, София, България",
    ]
    .map(|address| compute_key(address).expect("bulgarian key"));
    assert!(bulgaria.iter().all(|key| key == &bulgaria[0]));

    let china = compute_key("1 Guanghua Road, Beijing, China 100020").expect("china key");
    let prc = compute_key("1 Guanghua Road, Chaoyang District, Beijing, P.R.C 100020")
        .expect("prc key");
    assert_eq!(china, prc);
    assert_ne!(china, bulgaria[0]);
}

#[test]
fn transliteration_keeps_case_of_first_letter() {
    assert_eq!(transliterate_char('а'), "a");
    assert_eq!(transliterate_char('А'), "A");
}

#[test]
fn sample_groups_into_three_sorted_lines() {
    let lines = group_and_sort(&expected_records()).expect("groups");
    assert_eq!(
        lines,
        vec![
            "Dragan Doichinov,Ilona Ilieva,Ivan Draganov",
            "Frieda Müller",
            "Leon Wu,Li Deng",
        ]
    );
}

#[test]
fn pipeline_output_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    AddressGrouper::new(FIXTURE, &first)
        .expect("constructs")
        .run()
        .expect("first run");
    AddressGrouper::new(FIXTURE, &second)
        .expect("constructs")
        .run()
        .expect("second run");
    AddressGrouper::new(FIXTURE, &second)
        .expect("constructs")
        .run()
        .expect("rerun overwrites");

    let first = fs::read(first).expect("first output");
    let second = fs::read(second).expect("second output");
    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).expect("utf-8 output"),
        "Dragan Doichinov,Ilona Ilieva,Ivan Draganov\nFrieda Müller\nLeon Wu,Li Deng\n"
    );
}

#[test]
fn pipeline_skips_malformed_rows_when_asked() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("people.csv");
    let mut contents = fs::read_to_string(FIXTURE).expect("fixture");
    contents.push_str("Nobody,\"Somewhere 5, Springfield, Atlantis\"\n");
    contents.push_str("Half Address,\"Shipka 34, Bulgaria\"\n");
    fs::write(&input, contents).expect("input written");

    let output = dir.path().join("sorted.csv");
    let summary = AddressGrouper::new(&input, &output)
        .expect("constructs")
        .with_policy(MalformedRecordPolicy::Skip)
        .run()
        .expect("skips malformed rows");

    assert_eq!(summary.records, 8);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.groups, 3);
    assert!(AddressGrouper::new(&input, dir.path().join("strict.csv"))
        .expect("constructs")
        .run()
        .is_err());
}
