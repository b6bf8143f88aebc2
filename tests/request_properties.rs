use recipe_search::search::{BoundKind, Filters, OmissionPolicy, RequestBuilder};

#[test]
fn every_nonzero_rating_step_is_sent() {
    let builder = RequestBuilder::default();
    for tenth in 1..=50 {
        let value = f64::from(tenth) / 10.0;
        let filters = Filters::default().with_bound(BoundKind::MinRating, value);
        let request = builder.build("", &filters, 1, 15);
        assert_eq!(
            request.get("min_rating"),
            Some(value.to_string().as_str()),
            "min_rating={}",
            value
        );
    }
}

#[test]
fn ingredients_repeat_and_empty_set_is_absent() {
    let builder = RequestBuilder::default();
    let filters = Filters::default().with_ingredient("milk").with_ingredient("egg");
    let request = builder.build("", &filters, 1, 15);
    assert_eq!(request.get_all("ingredients"), vec!["egg", "milk"]);

    let request = builder.build("", &Filters::default(), 1, 15);
    assert!(!request.contains("ingredients"));
}

#[test]
fn page_and_size_are_always_present() {
    for policy in [OmissionPolicy::Truthy, OmissionPolicy::Touched] {
        let request = RequestBuilder::new(policy).build("", &Filters::default(), 4, 30);
        assert_eq!(request.get("page"), Some("4"));
        assert_eq!(request.get("size"), Some("30"));
    }
}
