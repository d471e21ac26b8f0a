// tests/feed_parse.rs
use edgar_watch::feed::parse_feed;

const FIXTURE: &str = include_str!("fixtures/edgar_rss.xml");

#[test]
fn fixture_parses_all_items() {
    let filings = parse_feed(FIXTURE).expect("parse fixture");
    assert_eq!(filings.len(), 3);

    let first = &filings[0];
    assert_eq!(first.cik, "0001112223");
    assert_eq!(first.company_name, "NORTHERN GRID HOLDINGS INC");
    assert_eq!(first.form_type, "8-K");
    assert_eq!(first.pub_date, "Tue, 13 Feb 2024 16:05:12 EST");
    assert_eq!(first.documents.len(), 3);
}

#[test]
fn html_documents_filters_by_suffix() {
    let filings = parse_feed(FIXTURE).expect("parse fixture");

    let first: Vec<&str> = filings[0].html_documents().collect();
    assert_eq!(
        first,
        vec!["https://www.sec.gov/Archives/edgar/data/1112223/ngh-8k_20240213.htm"]
    );

    // .html counts too
    let third: Vec<&str> = filings[2].html_documents().collect();
    assert_eq!(
        third,
        vec!["https://www.sec.gov/Archives/edgar/data/320556/cls-8ka_20240213.html"]
    );
}

#[test]
fn form_types_come_through_verbatim() {
    let filings = parse_feed(FIXTURE).expect("parse fixture");
    let forms: Vec<&str> = filings.iter().map(|f| f.form_type.as_str()).collect();
    assert_eq!(forms, vec!["8-K", "10-K", "8-K/A"]);
}
