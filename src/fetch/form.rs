// src/fetch/form.rs

/// Form fields for a public timetable search of one department in one term.
///
/// `depts` and `terms` are sent twice, a `no_value` placeholder followed by the
/// real selection, the way the search page's multi-selects submit them.
pub fn search_form(dept: &str, term: &str) -> Vec<(&'static str, String)> {
    let fixed: &[(&'static str, &str)] = &[
        ("distribradio", "alldistribs"),
        ("depts", "no_value"),
        ("depts", dept),
        ("periods", "no_value"),
        ("distribs", "no_value"),
        ("distribs_i", "no_value"),
        ("distribs_wc", "no_value"),
        ("distribs_lang", "no_value"),
        ("deliveryradio", "alldelivery"),
        ("deliverymodes", "no_value"),
        ("pmode", "public"),
        ("term", ""),
        ("levl", ""),
        ("fys", "n"),
        ("wrt", "n"),
        ("pe", "n"),
        ("review", "n"),
        ("crnl", "no_value"),
        ("classyear", "2008"),
        ("searchtype", "Subject Area(s)"),
        ("termradio", "selectterms"),
        ("terms", "no_value"),
        ("terms", term),
        ("subjectradio", "selectsubjects"),
        ("hoursradio", "allhours"),
        ("sortorder", "dept"),
    ];
    fixed.iter().map(|&(k, v)| (k, v.to_string())).collect()
}
